use std::future::Future;
use std::ops::Deref;
use std::pin::Pin;

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use serde::de::DeserializeOwned;
use serde_json::Error as JsonError;
use tracing::debug;

use crate::error::{AppError, FieldError};
use crate::errors::ErrorCode;
use crate::logging::pii::Redacted;

/// JSON body extractor whose failures render as `{"errors": [...]}`.
///
/// An empty body decodes as `{}`, so DTOs with optional fields report each
/// missing field through their own checks instead of failing here.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> FromRequest for ValidatedJson<T>
where
    T: DeserializeOwned + 'static,
{
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let body_fut = web::Bytes::from_request(req, payload);

        Box::pin(async move {
            let body = body_fut.await.map_err(|e| {
                debug!(error = %e, "Failed to read request body");
                AppError::bad_request(ErrorCode::BadRequest, "Failed to read request body")
            })?;

            let bytes: &[u8] = if body.iter().all(u8::is_ascii_whitespace) {
                b"{}"
            } else {
                &body
            };

            serde_json::from_slice::<T>(bytes)
                .map(ValidatedJson)
                .map_err(|e| {
                    debug!(
                        error = %Redacted(&e.to_string()),
                        body_size = body.len(),
                        "JSON parsing failed"
                    );
                    AppError::invalid(vec![FieldError::message(classify_json_error(&e))])
                })
        })
    }
}

/// Sanitized description of a decoding failure.
fn classify_json_error(error: &JsonError) -> String {
    match error.classify() {
        serde_json::error::Category::Syntax => {
            format!("Invalid JSON at line {}", error.line())
        }
        serde_json::error::Category::Eof => "Invalid JSON: unexpected end of input".to_string(),
        serde_json::error::Category::Data => {
            "Invalid JSON: wrong types for one or more fields".to_string()
        }
        serde_json::error::Category::Io => "Invalid JSON: I/O error while reading body".to_string(),
    }
}
