//! Registration, login and account lifecycle.

use actix_web::web;
use tracing::info;

use crate::auth::jwt::mint_access_token;
use crate::auth::password::{dummy_digest, hash_password, verify_password};
use crate::domain::users::{normalize_email, NewUser, UserView};
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError};
use crate::errors::ErrorCode;
use crate::logging::pii::Redacted;
use crate::logging::security;
use crate::state::app_state::AppState;

#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Create an identity and return a token for it.
///
/// A taken email is refused before hashing; the store's unique index
/// catches a concurrent registration that slips past the lookup.
pub async fn register(state: &AppState, registration: Registration) -> Result<String, AppError> {
    let email = normalize_email(&registration.email);

    if state.users.find_by_email(&email).await?.is_some() {
        security::registration_conflict(&email);
        return Err(AppError::user_exists());
    }

    let password = registration.password;
    let password_digest = web::block(move || hash_password(&password))
        .await
        .map_err(|e| AppError::internal(format!("password hashing task failed: {e}")))??;

    let user = state
        .users
        .insert(NewUser {
            name: registration.name.trim().to_string(),
            email: email.clone(),
            password_digest,
        })
        .await
        .map_err(|e| {
            if matches!(e, DomainError::Conflict(ConflictKind::UniqueEmail, _)) {
                security::registration_conflict(&email);
            }
            AppError::from(e)
        })?;

    info!(user_id = %user.id, email = %Redacted(&user.email), "User registered");

    mint_access_token(&user.id, &state.security)
}

/// Check credentials and return a fresh token.
///
/// Unknown emails still pay for one hash verification, and both failures
/// produce the same error.
pub async fn login(state: &AppState, email: &str, password: &str) -> Result<String, AppError> {
    let email = normalize_email(email);
    let user = state.users.find_by_email(&email).await?;

    let digest = user
        .as_ref()
        .map(|u| u.password_digest.clone())
        .unwrap_or_else(|| dummy_digest().to_string());
    let password = password.to_string();
    let matches = web::block(move || verify_password(&password, &digest))
        .await
        .map_err(|e| AppError::internal(format!("password verification task failed: {e}")))?;

    match user {
        Some(user) if matches => {
            info!(user_id = %user.id, "User logged in");
            mint_access_token(&user.id, &state.security)
        }
        Some(_) => {
            security::login_failed("wrong_password", &email);
            Err(AppError::invalid_credentials())
        }
        None => {
            security::login_failed("unknown_email", &email);
            Err(AppError::invalid_credentials())
        }
    }
}

/// The caller's identity, without its digest.
pub async fn current_user(state: &AppState, user_id: &str) -> Result<UserView, AppError> {
    state
        .users
        .find_by_id(user_id)
        .await?
        .map(UserView::from)
        .ok_or_else(|| AppError::not_found(ErrorCode::UserNotFound, "User not found"))
}

/// Remove the caller's posts, profile and identity, in that order, so a
/// failure part way never leaves content without an owner.
pub async fn delete_account(state: &AppState, user_id: &str) -> Result<(), AppError> {
    let posts = state.posts.remove_by_user(user_id).await?;
    let had_profile = state.profiles.remove_by_user(user_id).await?;
    let removed = state.users.remove(user_id).await?;

    info!(
        user_id = %user_id,
        posts_removed = posts,
        had_profile,
        user_removed = removed,
        "Account deleted"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::verify_access_token;
    use crate::infra::state::build_state;

    fn registration(email: &str) -> Registration {
        Registration {
            name: "Jane".into(),
            email: email.into(),
            password: "hunter22".into(),
        }
    }

    #[actix_web::test]
    async fn test_register_then_login_normalizes_email() {
        let state = build_state().with_memory_store().build().await.unwrap();

        let token = register(&state, registration("  Jane@Example.COM ")).await.unwrap();
        let claims = verify_access_token(&token, &state.security).unwrap();

        let login_token = login(&state, "jane@example.com", "hunter22").await.unwrap();
        let login_claims = verify_access_token(&login_token, &state.security).unwrap();
        assert_eq!(claims.sub, login_claims.sub);

        let me = current_user(&state, &claims.sub).await.unwrap();
        assert_eq!(me.email, "jane@example.com");
    }

    #[actix_web::test]
    async fn test_duplicate_registration_is_rejected() {
        let state = build_state().with_memory_store().build().await.unwrap();

        register(&state, registration("dup@example.com")).await.unwrap();
        let err = register(&state, registration("DUP@example.com")).await.unwrap_err();

        assert_eq!(err.code(), ErrorCode::UserExists);
    }

    #[actix_web::test]
    async fn test_login_failures_are_indistinguishable() {
        let state = build_state().with_memory_store().build().await.unwrap();
        register(&state, registration("known@example.com")).await.unwrap();

        let wrong = login(&state, "known@example.com", "nope").await.unwrap_err();
        let unknown = login(&state, "ghost@example.com", "hunter22").await.unwrap_err();

        assert_eq!(wrong.code(), ErrorCode::InvalidCredentials);
        assert_eq!(wrong.code(), unknown.code());
        assert_eq!(wrong.to_string(), unknown.to_string());
    }

    #[actix_web::test]
    async fn test_delete_account_removes_identity() {
        let state = build_state().with_memory_store().build().await.unwrap();
        let token = register(&state, registration("gone@example.com")).await.unwrap();
        let user_id = verify_access_token(&token, &state.security).unwrap().sub;

        delete_account(&state, &user_id).await.unwrap();

        let err = current_user(&state, &user_id).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::UserNotFound);
    }
}
