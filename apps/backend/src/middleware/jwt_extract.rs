//! Token check for private routes.
//!
//! Reads the `x-auth-token` header, verifies it against the configured
//! secret and stores an [`AuthenticatedUser`] in request extensions for the
//! `CurrentUser` extractor. Missing and invalid tokens get the same 401 body;
//! the reason is only logged. The wrapped service is never called on
//! rejection.
//!
//! Wrap a scope to make every route in it private, or a single `Route` when
//! a resource mixes public and private methods.

use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{web, Error, HttpMessage};
use futures_util::future::{ready, LocalBoxFuture, Ready};

use crate::auth::claims::AuthenticatedUser;
use crate::auth::jwt::verify_access_token;
use crate::error::AppError;
use crate::logging::security;
use crate::state::app_state::AppState;

pub const AUTH_HEADER: &str = "x-auth-token";

pub struct JwtExtract;

impl<S, B> Transform<S, ServiceRequest> for JwtExtract
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtExtractMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtExtractMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct JwtExtractMiddleware<S> {
    service: Rc<S>,
}

/// Token from the auth header; absent, non-ASCII and blank all count as
/// no token.
fn header_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTH_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

impl<S, B> Service<ServiceRequest> for JwtExtractMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let Some(token) = header_token(&req) else {
                security::token_rejected("no_token", req.path());
                let err = AppError::unauthorized_no_token();
                return Ok(req.error_response(err).map_into_right_body());
            };

            let Some(app_state) = req.app_data::<web::Data<AppState>>().cloned() else {
                let err = AppError::internal("AppState not available");
                return Ok(req.error_response(err).map_into_right_body());
            };

            match verify_access_token(&token, &app_state.security) {
                Ok(claims) => {
                    req.extensions_mut()
                        .insert(AuthenticatedUser::from(claims));
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Err(e) => {
                    security::token_rejected(e.reason(), req.path());
                    let err = AppError::from(e);
                    Ok(req.error_response(err).map_into_right_body())
                }
            }
        })
    }
}
