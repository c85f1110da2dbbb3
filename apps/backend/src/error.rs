use std::borrow::Cow;

use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::auth::jwt::TokenError;
use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::errors::ErrorCode;
use crate::trace_ctx;

/// Body returned for every authentication failure, whatever the cause.
pub const AUTH_DENIED_MSG: &str = "No token, authorization denied";

const SERVER_ERROR_MSG: &str = "Server Error";

/// One entry of an `{"errors": [...]}` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
}

impl FieldError {
    pub fn new(param: &str, msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            param: Some(param.to_string()),
        }
    }

    pub fn message(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            param: None,
        }
    }
}

#[derive(Serialize)]
#[serde(untagged)]
enum ErrorBody<'a> {
    Msg { msg: &'a str },
    Errors { errors: Cow<'a, [FieldError]> },
}

#[derive(Error, Debug)]
pub enum AppError {
    /// Authentication failed. `code` says why; the response never does.
    #[error("Unauthorized ({code})")]
    Unauthorized { code: ErrorCode },
    /// Authenticated caller acting on someone else's resource.
    #[error("Forbidden: {detail}")]
    Forbidden { code: ErrorCode, detail: String },
    #[error("Validation error: {errors:?}")]
    Validation { errors: Vec<FieldError> },
    /// Request refused for a business reason, reported in the `errors` list.
    #[error("Rejected ({code}): {detail}")]
    Rejected { code: ErrorCode, detail: String },
    #[error("Bad request ({code}): {detail}")]
    BadRequest { code: ErrorCode, detail: String },
    #[error("Not found ({code}): {detail}")]
    NotFound { code: ErrorCode, detail: String },
    #[error("Database error: {detail}")]
    Db { detail: String },
    /// Store unreachable or timed out. Same client response as `Db`; the
    /// separate code keeps outages apart from bad data in the logs.
    #[error("Database unavailable: {detail}")]
    DbUnavailable { detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Unauthorized { code } => *code,
            AppError::Forbidden { code, .. } => *code,
            AppError::Validation { .. } => ErrorCode::ValidationError,
            AppError::Rejected { code, .. } => *code,
            AppError::BadRequest { code, .. } => *code,
            AppError::NotFound { code, .. } => *code,
            AppError::Db { .. } => ErrorCode::DbError,
            AppError::DbUnavailable { .. } => ErrorCode::DbUnavailable,
            AppError::Internal { .. } => ErrorCode::Internal,
            AppError::Config { .. } => ErrorCode::ConfigError,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::Forbidden { .. } => StatusCode::UNAUTHORIZED,
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Rejected { .. } => StatusCode::BAD_REQUEST,
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Db { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::DbUnavailable { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn unauthorized_no_token() -> Self {
        Self::Unauthorized {
            code: ErrorCode::UnauthorizedNoToken,
        }
    }

    pub fn unauthorized_invalid_token() -> Self {
        Self::Unauthorized {
            code: ErrorCode::UnauthorizedInvalidToken,
        }
    }

    pub fn not_owner() -> Self {
        Self::Forbidden {
            code: ErrorCode::NotOwner,
            detail: "User not authorized".to_string(),
        }
    }

    pub fn invalid(errors: Vec<FieldError>) -> Self {
        Self::Validation { errors }
    }

    pub fn rejected(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Rejected {
            code,
            detail: detail.into(),
        }
    }

    pub fn invalid_credentials() -> Self {
        Self::rejected(ErrorCode::InvalidCredentials, "Invalid credentials")
    }

    pub fn user_exists() -> Self {
        Self::rejected(ErrorCode::UserExists, "User already exists")
    }

    pub fn bad_request(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            detail: detail.into(),
        }
    }

    pub fn not_found(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::NotFound {
            code,
            detail: detail.into(),
        }
    }

    pub fn db(detail: impl Into<String>) -> Self {
        Self::Db {
            detail: detail.into(),
        }
    }

    pub fn db_unavailable(detail: impl Into<String>) -> Self {
        Self::DbUnavailable {
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    fn body(&self) -> ErrorBody<'_> {
        match self {
            AppError::Unauthorized { .. } => ErrorBody::Msg {
                msg: AUTH_DENIED_MSG,
            },
            AppError::Forbidden { detail, .. }
            | AppError::BadRequest { detail, .. }
            | AppError::NotFound { detail, .. } => ErrorBody::Msg { msg: detail },
            AppError::Validation { errors } => ErrorBody::Errors {
                errors: Cow::Borrowed(errors),
            },
            AppError::Rejected { detail, .. } => ErrorBody::Errors {
                errors: Cow::Owned(vec![FieldError::message(detail.clone())]),
            },
            AppError::Db { .. }
            | AppError::DbUnavailable { .. }
            | AppError::Internal { .. }
            | AppError::Config { .. } => ErrorBody::Msg {
                msg: SERVER_ERROR_MSG,
            },
        }
    }
}

impl From<TokenError> for AppError {
    fn from(_: TokenError) -> Self {
        AppError::unauthorized_invalid_token()
    }
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation(detail) => {
                AppError::invalid(vec![FieldError::message(detail)])
            }
            DomainError::Conflict(ConflictKind::UniqueEmail, _) => AppError::user_exists(),
            DomainError::Conflict(_, detail) => AppError::bad_request(ErrorCode::Conflict, detail),
            DomainError::NotFound(kind, _) => match kind {
                NotFoundKind::User => AppError::not_found(ErrorCode::UserNotFound, "User not found"),
                NotFoundKind::Profile => {
                    AppError::bad_request(ErrorCode::ProfileNotFound, "Profile not found")
                }
                NotFoundKind::Post => AppError::not_found(ErrorCode::PostNotFound, "Post not found"),
                NotFoundKind::Comment => {
                    AppError::not_found(ErrorCode::CommentNotFound, "Comment does not exist")
                }
                NotFoundKind::Other(_) => AppError::not_found(ErrorCode::NotFound, "Not found"),
            },
            DomainError::Infra(InfraErrorKind::StoreUnavailable | InfraErrorKind::Timeout, detail) => {
                AppError::db_unavailable(detail)
            }
            DomainError::Infra(_, detail) => AppError::db(detail),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        let trace_id = trace_ctx::trace_id();

        if status.is_server_error() {
            error!(
                code = %self.code(),
                error = %self,
                trace_id = %trace_id,
                "request failed"
            );
        }

        HttpResponse::build(status)
            .insert_header(("x-trace-id", trace_id))
            .json(self.body())
    }
}
