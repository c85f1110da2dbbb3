use actix_web::{web, HttpResponse, Route};
use serde::Deserialize;
use serde_json::json;

use crate::error::AppError;
use crate::extractors::{CurrentUser, ValidatedJson};
use crate::middleware::JwtExtract;
use crate::services::users as users_service;
use crate::state::app_state::AppState;
use crate::utils::validation::Checks;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Exchange credentials for a token.
async fn login(
    body: ValidatedJson<LoginRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let LoginRequest { email, password } = body.into_inner();

    Checks::new()
        .email("email", email.as_deref(), "Please include a valid email")
        .present("password", password.as_deref(), "Password is required")
        .finish()?;

    let token = users_service::login(
        &app_state,
        email.as_deref().unwrap_or_default(),
        password.as_deref().unwrap_or_default(),
    )
    .await?;

    Ok(HttpResponse::Ok().json(json!({ "token": token })))
}

/// The caller's identity, without the password digest.
async fn session(
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let view = users_service::current_user(&app_state, &user.id).await?;
    Ok(HttpResponse::Ok().json(view))
}

/// `GET /api/auth`, behind the token check.
pub fn session_route() -> Route {
    web::get().to(session).wrap(JwtExtract)
}

/// `POST /api/auth`. Public; the server may wrap it in a rate limiter.
pub fn login_route() -> Route {
    web::post().to(login)
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(session_route())
            .route(login_route()),
    );
}
