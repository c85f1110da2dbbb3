//! Errors raised by stores and services, before any HTTP mapping.
//!
//! `From<DomainError> for AppError` in `crate::error` decides status codes
//! and response bodies.

use thiserror::Error;

/// Operational store failures.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    /// No server could be selected or the connection dropped.
    StoreUnavailable,
    Timeout,
    /// A stored document no longer matches its schema.
    DataCorruption,
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    User,
    Profile,
    Post,
    Comment,
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    /// Another identity already uses the email.
    UniqueEmail,
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("conflict {0:?}: {1}")]
    Conflict(ConflictKind, String),
    #[error("{0:?} not found: {1}")]
    NotFound(NotFoundKind, String),
    #[error("store failure {0:?}: {1}")]
    Infra(InfraErrorKind, String),
}

impl DomainError {
    pub fn validation(detail: impl Into<String>) -> Self {
        Self::Validation(detail.into())
    }

    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }

    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }

    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }
}
