//! Error codes for the DevConnect backend API.
//!
//! Codes are SCREAMING_SNAKE_CASE. They are attached to every logged failure
//! so operators can tell apart errors that share a client-facing message
//! (all authentication failures answer with the same body).

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication & Authorization
    /// No token in the auth header
    UnauthorizedNoToken,
    /// Token present but malformed, tampered or expired
    UnauthorizedInvalidToken,
    /// Caller does not own the resource
    NotOwner,

    // Request Validation
    /// One or more request fields failed validation
    ValidationError,
    /// Request body could not be parsed
    BadRequest,
    /// Registration with an email that is already taken
    UserExists,
    /// Login with an unknown email or wrong password
    InvalidCredentials,
    /// Like on an already liked post
    AlreadyLiked,
    /// Unlike on a post that was not liked
    NotLiked,
    /// Operation needs the caller's profile, which does not exist
    NoProfile,

    // Resource Not Found
    UserNotFound,
    ProfileNotFound,
    PostNotFound,
    CommentNotFound,
    GithubProfileNotFound,
    NotFound,

    // Conflicts
    Conflict,

    // System Errors
    DbError,
    DbUnavailable,
    Internal,
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UnauthorizedNoToken => "UNAUTHORIZED_NO_TOKEN",
            Self::UnauthorizedInvalidToken => "UNAUTHORIZED_INVALID_TOKEN",
            Self::NotOwner => "NOT_OWNER",

            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",
            Self::UserExists => "USER_EXISTS",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::AlreadyLiked => "ALREADY_LIKED",
            Self::NotLiked => "NOT_LIKED",
            Self::NoProfile => "NO_PROFILE",

            Self::UserNotFound => "USER_NOT_FOUND",
            Self::ProfileNotFound => "PROFILE_NOT_FOUND",
            Self::PostNotFound => "POST_NOT_FOUND",
            Self::CommentNotFound => "COMMENT_NOT_FOUND",
            Self::GithubProfileNotFound => "GITHUB_PROFILE_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::Conflict => "CONFLICT",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
