//! Posts, likes and comments.

use time::OffsetDateTime;
use tracing::info;

use crate::domain::posts::{Comment, Like, NewPost, Post};
use crate::domain::users::User;
use crate::error::AppError;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::errors::ErrorCode;
use crate::state::app_state::AppState;

fn post_not_found(post_id: &str) -> DomainError {
    DomainError::not_found(NotFoundKind::Post, post_id)
}

async fn author(state: &AppState, user_id: &str) -> Result<User, AppError> {
    state
        .users
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::not_found(ErrorCode::UserNotFound, "User not found"))
}

/// Errors for a conditional update that changed nothing: the post is
/// missing, or `refused` applies.
async fn explain_no_update(state: &AppState, post_id: &str, refused: AppError) -> AppError {
    match state.posts.find_by_id(post_id).await {
        Ok(Some(_)) => refused,
        Ok(None) => post_not_found(post_id).into(),
        Err(e) => e.into(),
    }
}

pub async fn create_post(state: &AppState, user_id: &str, text: String) -> Result<Post, AppError> {
    let user = author(state, user_id).await?;
    let post = state
        .posts
        .insert(NewPost {
            user: user.id,
            text,
            name: user.name,
        })
        .await?;

    info!(user_id = %user_id, post_id = %post.id, "Post created");
    Ok(post)
}

pub async fn all_posts(state: &AppState) -> Result<Vec<Post>, AppError> {
    Ok(state.posts.list().await?)
}

pub async fn post_by_id(state: &AppState, post_id: &str) -> Result<Post, AppError> {
    Ok(state
        .posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| post_not_found(post_id))?)
}

/// Only the author may delete a post.
pub async fn delete_post(state: &AppState, user_id: &str, post_id: &str) -> Result<(), AppError> {
    let post = post_by_id(state, post_id).await?;
    if post.user != user_id {
        return Err(AppError::not_owner());
    }

    if !state.posts.remove(post_id).await? {
        return Err(post_not_found(post_id).into());
    }

    info!(user_id = %user_id, post_id = %post_id, "Post removed");
    Ok(())
}

pub async fn like_post(
    state: &AppState,
    user_id: &str,
    post_id: &str,
) -> Result<Vec<Like>, AppError> {
    match state.posts.add_like(post_id, user_id).await? {
        Some(likes) => Ok(likes),
        None => Err(explain_no_update(
            state,
            post_id,
            AppError::bad_request(ErrorCode::AlreadyLiked, "Post already liked"),
        )
        .await),
    }
}

pub async fn unlike_post(
    state: &AppState,
    user_id: &str,
    post_id: &str,
) -> Result<Vec<Like>, AppError> {
    match state.posts.remove_like(post_id, user_id).await? {
        Some(likes) => Ok(likes),
        None => Err(explain_no_update(
            state,
            post_id,
            AppError::bad_request(ErrorCode::NotLiked, "Post has not yet been liked"),
        )
        .await),
    }
}

pub async fn add_comment(
    state: &AppState,
    user_id: &str,
    post_id: &str,
    text: String,
) -> Result<Vec<Comment>, AppError> {
    let user = author(state, user_id).await?;
    let comment = Comment {
        id: ulid::Ulid::new().to_string(),
        user: user.id,
        text,
        name: user.name,
        date: OffsetDateTime::now_utc(),
    };

    state
        .posts
        .add_comment(post_id, comment)
        .await?
        .ok_or_else(|| post_not_found(post_id).into())
}

/// Only the comment's author may remove it.
pub async fn delete_comment(
    state: &AppState,
    user_id: &str,
    post_id: &str,
    comment_id: &str,
) -> Result<Vec<Comment>, AppError> {
    let post = post_by_id(state, post_id).await?;
    let comment = post
        .comments
        .iter()
        .find(|c| c.id == comment_id)
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Comment, comment_id))?;

    if comment.user != user_id {
        return Err(AppError::not_owner());
    }

    state
        .posts
        .remove_comment(post_id, comment_id, user_id)
        .await?
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Comment, comment_id).into())
}
