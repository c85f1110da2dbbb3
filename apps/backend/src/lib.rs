//! DevConnect backend: accounts, developer profiles and posts over a JSON
//! API, backed by MongoDB or an in-process store.

#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod auth;
pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod infra;
pub mod logging;
pub mod middleware;
pub mod repos;
pub mod routes;
pub mod services;
pub mod state;
pub mod telemetry;
pub mod trace_ctx;
pub mod utils;

#[cfg(test)]
pub mod test_bootstrap;

// Used by main.rs and the integration suites
pub use auth::jwt::{mint_access_token, verify_access_token};
pub use auth::claims::{AuthenticatedUser, Claims};
pub use config::{AppConfig, StoreKind};
pub use error::AppError;
pub use errors::ErrorCode;
pub use extractors::current_user::CurrentUser;
pub use infra::mongo::connect as connect_mongo;
pub use middleware::cors::cors_middleware;
pub use middleware::jwt_extract::JwtExtract;
pub use middleware::request_trace::RequestTrace;
pub use middleware::structured_logger::StructuredLogger;
pub use middleware::trace_span::TraceSpan;
pub use state::app_state::AppState;
pub use state::security_config::SecurityConfig;

#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
