use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::services::users::{self as users_service, Registration};
use crate::state::app_state::AppState;
use crate::utils::validation::Checks;

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl RegisterRequest {
    fn validate(self) -> Result<Registration, AppError> {
        Checks::new()
            .not_empty("name", self.name.as_deref(), "Name is required")
            .email("email", self.email.as_deref(), "Please include a valid email")
            .min_len(
                "password",
                self.password.as_deref(),
                MIN_PASSWORD_LEN,
                "Please enter a password with 6 or more characters",
            )
            .finish()?;

        Ok(Registration {
            name: self.name.unwrap_or_default().trim().to_string(),
            email: self.email.unwrap_or_default(),
            password: self.password.unwrap_or_default(),
        })
    }
}

/// Create an identity and return a token for it.
async fn register(
    body: ValidatedJson<RegisterRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let registration = body.into_inner().validate()?;
    let token = users_service::register(&app_state, registration).await?;
    Ok(HttpResponse::Ok().json(json!({ "token": token })))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::post().to(register)));
}
