#![allow(dead_code)]

// tests/common/mod.rs
use actix_web::http::header::HeaderName;
use serde_json::Value;

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

/// Secret shared by test states that need to mint or inspect tokens.
pub const TEST_SECRET: &str = "test_secret_key_for_testing_purposes_only";

/// The `x-request-id` header value, which every response must carry.
pub fn request_id(headers: &actix_web::http::header::HeaderMap) -> String {
    headers
        .get(HeaderName::from_static("x-request-id"))
        .and_then(|v| v.to_str().ok())
        .expect("x-request-id header should be present")
        .to_string()
}

/// Ids of a JSON array of objects, in order.
pub fn ids(list: &Value) -> Vec<String> {
    list.as_array()
        .expect("expected a JSON array")
        .iter()
        .map(|item| item["id"].as_str().expect("id should be a string").to_string())
        .collect()
}
