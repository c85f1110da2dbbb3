#![allow(dead_code)]

//! Register users through the API and carry their tokens.

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, Error};
use backend_test_support::unique_helpers::unique_email;
use serde_json::{json, Value};

pub const TEST_PASSWORD: &str = "hunter22";

#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub token: String,
}

/// Register a fresh user via `POST /api/users` and look up its id via
/// `GET /api/auth`.
pub async fn register_user<S>(app: &S, name: &str) -> TestUser
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let email = unique_email(&name.to_lowercase());
    let req = test::TestRequest::post()
        .uri("/api/users")
        .set_json(json!({ "name": name, "email": email, "password": TEST_PASSWORD }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status().as_u16(), 200, "registration should succeed");
    let body: Value = test::read_body_json(resp).await;
    let token = body["token"]
        .as_str()
        .expect("registration should return a token")
        .to_string();

    let req = test::TestRequest::get()
        .uri("/api/auth")
        .insert_header(("x-auth-token", token.as_str()))
        .to_request();
    let me: Value = test::call_and_read_body_json(app, req).await;

    TestUser {
        id: me["id"].as_str().expect("id should be a string").to_string(),
        name: name.to_string(),
        email,
        token,
    }
}
