use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};

use crate::auth::claims::AuthenticatedUser;
use crate::error::AppError;

/// Id of the caller, as verified by `JwtExtract`.
///
/// Only valid on routes wrapped by that middleware; elsewhere extraction
/// fails with the usual 401.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: String,
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let user = req
            .extensions()
            .get::<AuthenticatedUser>()
            .map(|user| CurrentUser {
                id: user.id.clone(),
            })
            .ok_or_else(AppError::unauthorized_no_token);

        ready(user)
    }
}
