use actix_web::{web, HttpResponse};
use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::warn;

use crate::error::AppError;
use crate::state::app_state::AppState;

pub async fn root() -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().body("DevConnect API running"))
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    app_version: &'static str,
    store: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    store_error: Option<String>,
    time: String,
}

async fn health(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let time = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string());

    let (status, store_error) = match app_state.users.ping().await {
        Ok(()) => ("ok", None),
        Err(e) => {
            warn!(error = %e, store = app_state.store_name, "Store ping failed");
            ("degraded", Some("store unreachable".to_string()))
        }
    };

    Ok(HttpResponse::Ok().json(HealthResponse {
        status,
        app_version: env!("CARGO_PKG_VERSION"),
        store: app_state.store_name,
        store_error,
        time,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health));
}
