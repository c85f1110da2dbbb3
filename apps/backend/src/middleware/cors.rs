use actix_cors::Cors;
use actix_web::http::header;

use super::jwt_extract::AUTH_HEADER;
use super::request_trace::REQUEST_ID_HEADER;

const FALLBACK_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://127.0.0.1:3000"];

/// CORS for the configured origins only.
///
/// Entries that are empty, `null`, or not http(s) are ignored; if nothing
/// valid remains the localhost dev origins are used.
pub fn cors_middleware(allowed_origins: &[String]) -> Cors {
    let mut origins: Vec<&str> = allowed_origins
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty() && *s != "null")
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .collect();

    if origins.is_empty() {
        origins = FALLBACK_ORIGINS.to_vec();
    }

    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::HeaderName::from_static(AUTH_HEADER),
            header::CONTENT_TYPE,
            header::ACCEPT,
        ])
        .expose_headers(vec![
            header::HeaderName::from_static("x-trace-id"),
            header::HeaderName::from_static(REQUEST_ID_HEADER),
        ])
        .max_age(3600);

    for origin in origins {
        cors = cors.allowed_origin(origin);
    }

    cors
}
