//! Read-only client for the public GitHub repositories API.

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::AppError;
use crate::errors::ErrorCode;

pub const DEFAULT_GITHUB_API_BASE: &str = "https://api.github.com";

const USER_AGENT: &str = concat!("devconnect/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);
const NOT_FOUND_MSG: &str = "No Github profile found";

#[derive(Debug, Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    base_url: String,
}

impl GithubClient {
    /// Build the HTTP client for `base_url`.
    ///
    /// Fails when the base is not an absolute http(s) URL or the TLS backend
    /// cannot be initialised; GitHub refuses requests without a User-Agent,
    /// so there is no fallback client.
    pub fn new(base_url: impl Into<String>) -> Result<Self, AppError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        let parsed = reqwest::Url::parse(&base_url)
            .map_err(|e| AppError::config(format!("invalid GitHub API base {base_url:?}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(AppError::config(format!(
                "GitHub API base must be http(s), got {base_url:?}"
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AppError::config(format!("failed to build GitHub HTTP client: {e}")))?;

        Ok(Self { http, base_url })
    }

    /// The five most recently created public repositories of `username`,
    /// passed through as GitHub returns them.
    ///
    /// Any upstream failure is reported as the profile not existing.
    pub async fn latest_repos(&self, username: &str) -> Result<Value, AppError> {
        if !is_valid_username(username) {
            return Err(not_found());
        }

        let url = format!("{}/users/{username}/repos", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("per_page", "5"), ("sort", "created:asc")])
            .send()
            .await
            .map_err(|e| {
                warn!(username = %username, error = %e, "GitHub request failed");
                not_found()
            })?;

        if !response.status().is_success() {
            debug!(username = %username, status = %response.status(), "GitHub returned an error status");
            return Err(not_found());
        }

        response.json::<Value>().await.map_err(|e| {
            warn!(username = %username, error = %e, "GitHub response is not JSON");
            not_found()
        })
    }
}

fn not_found() -> AppError {
    AppError::not_found(ErrorCode::GithubProfileNotFound, NOT_FOUND_MSG)
}

// GitHub logins are alphanumerics and single hyphens, at most 39 characters.
fn is_valid_username(username: &str) -> bool {
    !username.is_empty()
        && username.len() <= 39
        && username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_validation() {
        assert!(is_valid_username("octocat"));
        assert!(is_valid_username("some-user-42"));
        assert!(!is_valid_username(""));
        assert!(!is_valid_username("../admin"));
        assert!(!is_valid_username("a?b=c"));
        assert!(!is_valid_username(&"x".repeat(40)));
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = GithubClient::new("http://localhost:1234/").unwrap();
        assert_eq!(client.base_url, "http://localhost:1234");
    }

    #[test]
    fn test_unusable_base_is_a_config_error() {
        for base in ["", "not a url", "ftp://example.com"] {
            let err = GithubClient::new(base).unwrap_err();
            assert_eq!(err.code(), ErrorCode::ConfigError, "{base:?}");
        }
    }

    #[actix_web::test]
    async fn test_invalid_username_is_not_found_without_request() {
        let client = GithubClient::new("http://127.0.0.1:9").unwrap();
        let err = client.latest_repos("bad/name").await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::GithubProfileNotFound);
    }
}
