//! MongoDB -> DomainError translation helpers.
//!
//! Adapters convert `mongodb::error::Error` here; higher layers then map
//! `DomainError` to `AppError` via `From`.

use mongodb::error::{ErrorKind, WriteFailure};
use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind};
use crate::logging::pii::Redacted;
use crate::trace_ctx;

const DUPLICATE_KEY: i32 = 11000;

/// Whether `e` is a unique index violation, from either a write or a
/// `findAndModify` command.
pub fn is_duplicate_key(e: &mongodb::error::Error) -> bool {
    match e.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(we)) => we.code == DUPLICATE_KEY,
        ErrorKind::Command(ce) => ce.code == DUPLICATE_KEY,
        _ => false,
    }
}

/// Translate a driver error into a `DomainError` with sanitized, PII-safe
/// detail.
pub fn map_mongo_err(e: mongodb::error::Error) -> DomainError {
    let error_msg = e.to_string();
    let trace_id = trace_ctx::trace_id();

    if is_duplicate_key(&e) {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Unique index violation");

        if error_msg.contains("email") {
            return DomainError::conflict(ConflictKind::UniqueEmail, "Email already registered");
        }
        return DomainError::conflict(
            ConflictKind::Other("Unique".into()),
            "Unique index violation",
        );
    }

    match e.kind.as_ref() {
        ErrorKind::ServerSelection { .. } | ErrorKind::Io(_) | ErrorKind::ConnectionPoolCleared { .. } => {
            warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Store unavailable");
            DomainError::infra(InfraErrorKind::StoreUnavailable, "Store unavailable")
        }
        ErrorKind::BsonDeserialization(_) => {
            error!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Stored document does not decode");
            DomainError::infra(InfraErrorKind::DataCorruption, "Stored document is invalid")
        }
        _ => {
            error!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Unhandled store error");
            DomainError::infra(
                InfraErrorKind::Other("Mongo".into()),
                "Store operation failed",
            )
        }
    }
}
