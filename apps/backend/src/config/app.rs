//! Application configuration loaded from environment variables.

use std::env;

use crate::error::AppError;
use crate::state::security_config::DEFAULT_TOKEN_TTL_SECS;

const MIN_JWT_SECRET_LEN: usize = 32;
const DEFAULT_MAX_PAYLOAD_SIZE: usize = 1024 * 1024;

/// Which store backs the repositories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Mongo,
    /// Process-local maps; data is lost on restart.
    Memory,
}

impl StoreKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKind::Mongo => "mongo",
            StoreKind::Memory => "memory",
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    // Server configuration
    pub host: String,
    pub port: u16,

    // Security configuration
    pub jwt_secret: String,
    pub token_ttl_secs: i64,

    // Store configuration
    pub store: StoreKind,
    pub mongo_uri: String,
    pub mongo_db: String,

    pub github_api_base: String,
    pub cors_allowed_origins: Vec<String>,
    pub max_json_payload_size: usize,
}

impl AppConfig {
    /// Load and validate all configuration from the process environment
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through `lookup`, which returns `None` for unset
    /// variables.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var_or = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        let host = var_or("BACKEND_HOST", "0.0.0.0");

        let port_str = var_or("BACKEND_PORT", "5000");
        let port = port_str.parse::<u16>().map_err(|_| {
            AppError::config(format!(
                "BACKEND_PORT must be a valid port number, got '{port_str}'"
            ))
        })?;

        let jwt_secret = match lookup("BACKEND_JWT_SECRET") {
            Some(secret) if secret.len() >= MIN_JWT_SECRET_LEN => secret,
            Some(_) => {
                return Err(AppError::config(format!(
                    "BACKEND_JWT_SECRET is too short. It should be at least {MIN_JWT_SECRET_LEN} characters."
                )))
            }
            None => return Err(AppError::config("BACKEND_JWT_SECRET must be set.")),
        };

        let ttl_str = var_or("BACKEND_TOKEN_TTL_SECS", &DEFAULT_TOKEN_TTL_SECS.to_string());
        let token_ttl_secs = ttl_str.parse::<i64>().map_err(|_| {
            AppError::config(format!(
                "BACKEND_TOKEN_TTL_SECS must be a number of seconds, got '{ttl_str}'"
            ))
        })?;

        let store = match var_or("BACKEND_STORE", "mongo").to_ascii_lowercase().as_str() {
            "mongo" => StoreKind::Mongo,
            "memory" => StoreKind::Memory,
            other => {
                return Err(AppError::config(format!(
                    "BACKEND_STORE must be 'mongo' or 'memory', got '{other}'"
                )))
            }
        };

        let cors_allowed_origins = var_or(
            "CORS_ALLOWED_ORIGINS",
            "http://localhost:3000,http://127.0.0.1:3000",
        )
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

        let max_json_payload_size = lookup("MAX_JSON_PAYLOAD_SIZE")
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(DEFAULT_MAX_PAYLOAD_SIZE);

        Ok(AppConfig {
            host,
            port,
            jwt_secret,
            token_ttl_secs,
            store,
            mongo_uri: var_or("MONGO_URI", "mongodb://localhost:27017"),
            mongo_db: var_or("MONGO_DB", "devconnect"),
            github_api_base: var_or("GITHUB_API_BASE", "https://api.github.com"),
            cors_allowed_origins,
            max_json_payload_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use serial_test::serial;

    use super::*;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_with_only_secret() {
        let config = AppConfig::from_lookup(lookup_from(&[("BACKEND_JWT_SECRET", SECRET)])).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 5000);
        assert_eq!(config.token_ttl_secs, 36_000);
        assert_eq!(config.store, StoreKind::Mongo);
        assert_eq!(config.mongo_db, "devconnect");
        assert_eq!(config.github_api_base, "https://api.github.com");
        assert_eq!(config.cors_allowed_origins.len(), 2);
    }

    #[test]
    fn test_missing_or_short_secret_is_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(err.to_string().contains("BACKEND_JWT_SECRET"));

        let err = AppConfig::from_lookup(lookup_from(&[("BACKEND_JWT_SECRET", "short")])).unwrap_err();
        assert!(err.to_string().contains("too short"));
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("BACKEND_JWT_SECRET", SECRET),
            ("BACKEND_PORT", "8080"),
            ("BACKEND_TOKEN_TTL_SECS", "60"),
            ("BACKEND_STORE", "Memory"),
            ("CORS_ALLOWED_ORIGINS", " https://a.test , ,https://b.test"),
        ]))
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.token_ttl_secs, 60);
        assert_eq!(config.store, StoreKind::Memory);
        assert_eq!(config.cors_allowed_origins, vec!["https://a.test", "https://b.test"]);
    }

    #[test]
    fn test_invalid_values() {
        for (name, value) in [
            ("BACKEND_PORT", "not-a-port"),
            ("BACKEND_TOKEN_TTL_SECS", "ten hours"),
            ("BACKEND_STORE", "postgres"),
        ] {
            let result =
                AppConfig::from_lookup(lookup_from(&[("BACKEND_JWT_SECRET", SECRET), (name, value)]));
            let err = result.unwrap_err();
            assert!(err.to_string().contains(name), "{err}");
        }
    }

    #[test]
    #[serial]
    fn test_from_env_reads_process_environment() {
        env::set_var("BACKEND_JWT_SECRET", SECRET);
        env::set_var("BACKEND_PORT", "5123");

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.port, 5123);

        env::remove_var("BACKEND_JWT_SECRET");
        env::remove_var("BACKEND_PORT");
    }
}
