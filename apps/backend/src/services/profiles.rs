//! Profile reads and partial updates.

use tracing::info;

use crate::domain::profiles::{Education, Experience, Profile, ProfileFields, ProfileView};
use crate::domain::users::UserRef;
use crate::error::AppError;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::errors::ErrorCode;
use crate::state::app_state::AppState;

fn no_profile() -> AppError {
    AppError::bad_request(ErrorCode::NoProfile, "There is no profile for this user")
}

async fn with_owner(state: &AppState, profile: Profile) -> Result<ProfileView, AppError> {
    let names = state.users.find_names(std::slice::from_ref(&profile.user)).await?;
    let name = names
        .get(&profile.user)
        .cloned()
        .ok_or_else(|| DomainError::not_found(NotFoundKind::User, "profile owner is gone"))?;

    let user = UserRef {
        id: profile.user.clone(),
        name,
    };
    Ok(ProfileView::new(profile, user))
}

/// The caller's profile.
pub async fn my_profile(state: &AppState, user_id: &str) -> Result<ProfileView, AppError> {
    let profile = state
        .profiles
        .find_by_user(user_id)
        .await?
        .ok_or_else(no_profile)?;
    with_owner(state, profile).await
}

/// Public profile of `user_id`.
pub async fn profile_of(state: &AppState, user_id: &str) -> Result<ProfileView, AppError> {
    let profile = state
        .profiles
        .find_by_user(user_id)
        .await?
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Profile, user_id))?;
    with_owner(state, profile).await
}

/// Every profile whose owner still exists, with owner names resolved in one
/// store call.
pub async fn all_profiles(state: &AppState) -> Result<Vec<ProfileView>, AppError> {
    let profiles = state.profiles.list().await?;
    let ids: Vec<String> = profiles.iter().map(|p| p.user.clone()).collect();
    let names = state.users.find_names(&ids).await?;

    Ok(profiles
        .into_iter()
        .filter_map(|profile| {
            let name = names.get(&profile.user)?.clone();
            let user = UserRef {
                id: profile.user.clone(),
                name,
            };
            Some(ProfileView::new(profile, user))
        })
        .collect())
}

pub async fn upsert_profile(
    state: &AppState,
    user_id: &str,
    fields: ProfileFields,
) -> Result<ProfileView, AppError> {
    let profile = state.profiles.upsert(user_id, fields).await?;
    info!(user_id = %user_id, profile_id = %profile.id, "Profile saved");
    with_owner(state, profile).await
}

pub async fn add_experience(
    state: &AppState,
    user_id: &str,
    entry: Experience,
) -> Result<ProfileView, AppError> {
    let profile = state
        .profiles
        .add_experience(user_id, entry)
        .await?
        .ok_or_else(no_profile)?;
    with_owner(state, profile).await
}

pub async fn remove_experience(
    state: &AppState,
    user_id: &str,
    entry_id: &str,
) -> Result<ProfileView, AppError> {
    let profile = state
        .profiles
        .remove_experience(user_id, entry_id)
        .await?
        .ok_or_else(no_profile)?;
    with_owner(state, profile).await
}

pub async fn add_education(
    state: &AppState,
    user_id: &str,
    entry: Education,
) -> Result<ProfileView, AppError> {
    let profile = state
        .profiles
        .add_education(user_id, entry)
        .await?
        .ok_or_else(no_profile)?;
    with_owner(state, profile).await
}

pub async fn remove_education(
    state: &AppState,
    user_id: &str,
    entry_id: &str,
) -> Result<ProfileView, AppError> {
    let profile = state
        .profiles
        .remove_education(user_id, entry_id)
        .await?
        .ok_or_else(no_profile)?;
    with_owner(state, profile).await
}
