//! One `request_completed` event per request.
//!
//! Server errors log at `error`, client errors at `warn`, the rest at
//! `info`. The authenticated user id is included when `JwtExtract` let the
//! request through.

use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::{Error as ActixError, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::{error, info, warn};

use crate::auth::claims::AuthenticatedUser;
use crate::trace_ctx::TraceId;

pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

struct Completion {
    method: String,
    path: String,
    trace_id: String,
    user_id: Option<String>,
    status: StatusCode,
    duration_us: u64,
}

impl Completion {
    fn emit(&self) {
        let Completion {
            method,
            path,
            trace_id,
            duration_us,
            ..
        } = self;
        let user_id = self.user_id.as_deref().unwrap_or("-");
        let status = self.status.as_u16();

        macro_rules! completed {
            ($level:ident) => {
                $level!(
                    http.method = %method,
                    url.path = %path,
                    http.status_code = status,
                    duration_us,
                    trace_id = %trace_id,
                    user_id = %user_id,
                    "request_completed"
                )
            };
        }

        if self.status.is_server_error() {
            completed!(error);
        } else if self.status.is_client_error() {
            completed!(warn);
        } else {
            completed!(info);
        }
    }
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let method = req.method().to_string();
        let path = req.path().to_string();
        let trace_id = req
            .extensions()
            .get::<TraceId>()
            .map(TraceId::to_string)
            .unwrap_or_else(|| "unknown".to_string());

        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;

            let (status, user_id) = match &result {
                Ok(res) => (
                    res.status(),
                    res.request()
                        .extensions()
                        .get::<AuthenticatedUser>()
                        .map(|u| u.id.clone()),
                ),
                Err(err) => (err.as_response_error().status_code(), None),
            };

            Completion {
                method,
                path,
                trace_id,
                user_id,
                status,
                duration_us: u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX),
            }
            .emit();

            result
        })
    }
}
