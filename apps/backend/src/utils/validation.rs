//! Field checks for request bodies.
//!
//! Request DTOs keep every field optional so a missing field is reported as
//! a validation error with its `param`, not as a JSON decoding failure.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{AppError, FieldError};

fn email_regex() -> &'static Regex {
    static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
        #[allow(clippy::unwrap_used)]
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap()
    });
    &EMAIL_REGEX
}

pub fn is_email(value: &str) -> bool {
    email_regex().is_match(value.trim())
}

/// Accumulates every failed check, in order, then reports them together.
#[derive(Debug, Default)]
#[must_use]
pub struct Checks {
    errors: Vec<FieldError>,
}

impl Checks {
    pub fn new() -> Self {
        Self::default()
    }

    fn fail(mut self, param: &str, msg: &str) -> Self {
        self.errors.push(FieldError::new(param, msg));
        self
    }

    /// Field must be present (any value, even empty).
    pub fn present(self, param: &str, value: Option<&str>, msg: &str) -> Self {
        match value {
            Some(_) => self,
            None => self.fail(param, msg),
        }
    }

    /// Field must be present and contain something besides whitespace.
    pub fn not_empty(self, param: &str, value: Option<&str>, msg: &str) -> Self {
        match value {
            Some(v) if !v.trim().is_empty() => self,
            _ => self.fail(param, msg),
        }
    }

    pub fn email(self, param: &str, value: Option<&str>, msg: &str) -> Self {
        match value {
            Some(v) if is_email(v) => self,
            _ => self.fail(param, msg),
        }
    }

    /// At least `min` characters (not bytes).
    pub fn min_len(self, param: &str, value: Option<&str>, min: usize, msg: &str) -> Self {
        match value {
            Some(v) if v.chars().count() >= min => self,
            _ => self.fail(param, msg),
        }
    }

    pub fn finish(self) -> Result<(), AppError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::invalid(self.errors))
        }
    }
}

/// Trimmed non-empty value, or `None`.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    #[test]
    fn test_email_shapes() {
        assert!(is_email("jane@example.com"));
        assert!(is_email(" jane@example.com "));
        assert!(!is_email("jane@"));
        assert!(!is_email("jane.example.com"));
        assert!(!is_email("ja ne@example.com"));
    }

    #[test]
    fn test_all_failures_are_collected_in_order() {
        let err = Checks::new()
            .not_empty("name", Some("  "), "Name is required")
            .email("email", None, "Please include a valid email")
            .min_len("password", Some("12345"), 6, "too short")
            .finish()
            .unwrap_err();

        match err {
            AppError::Validation { errors } => {
                let params: Vec<_> = errors.iter().filter_map(|e| e.param.as_deref()).collect();
                assert_eq!(params, vec!["name", "email", "password"]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_passing_checks() {
        assert!(Checks::new()
            .present("password", Some(""), "Password is required")
            .min_len("password", Some("ééééé\u{e9}"), 6, "too short")
            .finish()
            .is_ok());

        let err = Checks::new()
            .present("password", None, "Password is required")
            .finish()
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationError);
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  x ".into())), Some("x".into()));
        assert_eq!(non_blank(Some("   ".into())), None);
        assert_eq!(non_blank(None), None);
    }
}
