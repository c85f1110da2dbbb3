//! `/api/posts`. Every route here requires a token; `mod.rs` wraps the scope.

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use crate::error::AppError;
use crate::extractors::{CurrentUser, ValidatedJson};
use crate::services::posts as posts_service;
use crate::state::app_state::AppState;
use crate::utils::validation::Checks;

#[derive(Debug, Deserialize)]
pub struct TextRequest {
    pub text: Option<String>,
}

impl TextRequest {
    fn validate(self) -> Result<String, AppError> {
        Checks::new()
            .not_empty("text", self.text.as_deref(), "Text is required")
            .finish()?;
        Ok(self.text.unwrap_or_default())
    }
}

async fn create_post(
    user: CurrentUser,
    body: ValidatedJson<TextRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let text = body.into_inner().validate()?;
    let post = posts_service::create_post(&app_state, &user.id, text).await?;
    Ok(HttpResponse::Ok().json(post))
}

async fn all_posts(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let posts = posts_service::all_posts(&app_state).await?;
    Ok(HttpResponse::Ok().json(posts))
}

async fn post_by_id(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let post = posts_service::post_by_id(&app_state, &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post))
}

async fn delete_post(
    user: CurrentUser,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    posts_service::delete_post(&app_state, &user.id, &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "msg": "Post removed" })))
}

async fn like(
    user: CurrentUser,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let likes = posts_service::like_post(&app_state, &user.id, &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(likes))
}

async fn unlike(
    user: CurrentUser,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let likes = posts_service::unlike_post(&app_state, &user.id, &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(likes))
}

async fn add_comment(
    user: CurrentUser,
    path: web::Path<String>,
    body: ValidatedJson<TextRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let text = body.into_inner().validate()?;
    let comments =
        posts_service::add_comment(&app_state, &user.id, &path.into_inner(), text).await?;
    Ok(HttpResponse::Ok().json(comments))
}

async fn delete_comment(
    user: CurrentUser,
    path: web::Path<(String, String)>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (post_id, comment_id) = path.into_inner();
    let comments =
        posts_service::delete_comment(&app_state, &user.id, &post_id, &comment_id).await?;
    Ok(HttpResponse::Ok().json(comments))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::post().to(create_post))
            .route(web::get().to(all_posts)),
    )
    .service(web::resource("/like/{id}").route(web::put().to(like)))
    .service(web::resource("/unlike/{id}").route(web::put().to(unlike)))
    .service(web::resource("/comment/{id}").route(web::post().to(add_comment)))
    .service(
        web::resource("/comment/{id}/{comment_id}").route(web::delete().to(delete_comment)),
    )
    .service(
        web::resource("/{id}")
            .route(web::get().to(post_by_id))
            .route(web::delete().to(delete_post)),
    );
}
