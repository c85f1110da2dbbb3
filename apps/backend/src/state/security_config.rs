use std::fmt;

use jsonwebtoken::Algorithm;
use time::Duration;

/// Default access token lifetime: ten hours.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 36_000;

/// Configuration for JWT security settings
#[derive(Clone)]
pub struct SecurityConfig {
    /// JWT secret key for signing and verifying tokens
    pub jwt_secret: Vec<u8>,
    /// JWT algorithm to use (defaults to HS256)
    pub algorithm: Algorithm,
    /// Lifetime of tokens minted by `mint_access_token`
    pub token_ttl: Duration,
}

impl SecurityConfig {
    /// Create a new SecurityConfig with the given JWT secret
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
            token_ttl: Duration::seconds(DEFAULT_TOKEN_TTL_SECS),
        }
    }

    pub fn with_token_ttl(mut self, token_ttl: Duration) -> Self {
        self.token_ttl = token_ttl;
        self
    }
}

impl fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("jwt_secret", &"[redacted]")
            .field("algorithm", &self.algorithm)
            .field("token_ttl", &self.token_ttl)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_hides_secret() {
        let config = SecurityConfig::new("super-secret-value".as_bytes());
        let rendered = format!("{config:?}");

        assert!(!rendered.contains("super-secret-value"));
        assert!(rendered.contains("[redacted]"));
    }

    #[test]
    fn test_defaults() {
        let config = SecurityConfig::new(b"k".to_vec());
        assert_eq!(config.algorithm, Algorithm::HS256);
        assert_eq!(config.token_ttl.whole_seconds(), DEFAULT_TOKEN_TTL_SECS);
    }
}
