//! Rate limiting for the credential endpoints.
//!
//! Registration and login are limited to 5 requests per 60 seconds per
//! client IP. Only the production server wires this in; test apps do not,
//! so suites can log in as often as they need.

use std::time::Duration;

use actix_extensible_rate_limit::backend::memory::InMemoryBackend;
use actix_extensible_rate_limit::backend::SimpleInputFunctionBuilder;

pub const AUTH_LIMIT_WINDOW: Duration = Duration::from_secs(60);
pub const AUTH_LIMIT_MAX_REQUESTS: u64 = 5;

/// Input function for credential endpoints: keyed by the client's real IP.
pub fn auth_rate_limit_config() -> SimpleInputFunctionBuilder {
    SimpleInputFunctionBuilder::new(AUTH_LIMIT_WINDOW, AUTH_LIMIT_MAX_REQUESTS).real_ip_key()
}

/// Process-local counter store. Clones share counters.
pub fn auth_rate_limit_backend() -> InMemoryBackend {
    InMemoryBackend::builder().build()
}
