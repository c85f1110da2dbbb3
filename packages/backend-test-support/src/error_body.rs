//! Error body test helpers
//!
//! The backend answers errors with one of two JSON shapes:
//! `{"msg": "..."}` or `{"errors": [{"msg": "...", "param": "..."}]}`.
//! These helpers assert them without depending on backend types.

use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct MsgBody {
    msg: String,
}

#[derive(Debug, Deserialize)]
struct FieldErrorLike {
    msg: String,
    #[serde(default)]
    param: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorsBody {
    errors: Vec<FieldErrorLike>,
}

fn assert_trace_header(resp: &ServiceResponse<BoxBody>) {
    let trace_id = resp
        .headers()
        .get("x-trace-id")
        .and_then(|v| v.to_str().ok())
        .expect("x-trace-id header should be present on error responses");
    assert!(!trace_id.is_empty(), "x-trace-id header should not be empty");
}

/// Assert a `{"msg": ...}` error response and return the raw body bytes.
pub async fn assert_msg_error(
    resp: ServiceResponse<BoxBody>,
    expected_status: u16,
    expected_msg: &str,
) -> Vec<u8> {
    assert_eq!(resp.status().as_u16(), expected_status);
    assert_trace_header(&resp);

    let body = actix_web::test::read_body(resp).await;
    let parsed: MsgBody =
        serde_json::from_slice(&body).expect("error body should be {\"msg\": string}");
    assert_eq!(parsed.msg, expected_msg);
    body.to_vec()
}

/// Assert an `{"errors": [...]}` response whose messages include `expected_msg`.
///
/// When `expected_param` is given, the matching entry must also carry it.
pub async fn assert_errors_contain(
    resp: ServiceResponse<BoxBody>,
    expected_status: u16,
    expected_msg: &str,
    expected_param: Option<&str>,
) -> Vec<u8> {
    assert_eq!(resp.status().as_u16(), expected_status);
    assert_trace_header(&resp);

    let body = actix_web::test::read_body(resp).await;
    let parsed: ErrorsBody =
        serde_json::from_slice(&body).expect("error body should be {\"errors\": [...]}");

    let entry = parsed
        .errors
        .iter()
        .find(|e| e.msg == expected_msg)
        .unwrap_or_else(|| {
            panic!(
                "expected an error with msg '{expected_msg}', got {:?}",
                parsed.errors
            )
        });

    if let Some(param) = expected_param {
        assert_eq!(entry.param.as_deref(), Some(param));
    }
    body.to_vec()
}
