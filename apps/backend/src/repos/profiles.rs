use async_trait::async_trait;

use crate::domain::profiles::{Education, Experience, Profile, ProfileFields};
use crate::errors::domain::DomainError;

/// Profile store. Methods returning `Option<Profile>` yield `None` when the
/// user has no profile.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn find_by_user(&self, user_id: &str) -> Result<Option<Profile>, DomainError>;

    async fn list(&self) -> Result<Vec<Profile>, DomainError>;

    /// Create the profile or replace its editable fields, keeping
    /// experience and education.
    async fn upsert(&self, user_id: &str, fields: ProfileFields) -> Result<Profile, DomainError>;

    async fn remove_by_user(&self, user_id: &str) -> Result<bool, DomainError>;

    /// Prepend an entry.
    async fn add_experience(
        &self,
        user_id: &str,
        entry: Experience,
    ) -> Result<Option<Profile>, DomainError>;

    async fn remove_experience(
        &self,
        user_id: &str,
        entry_id: &str,
    ) -> Result<Option<Profile>, DomainError>;

    /// Prepend an entry.
    async fn add_education(
        &self,
        user_id: &str,
        entry: Education,
    ) -> Result<Option<Profile>, DomainError>;

    async fn remove_education(
        &self,
        user_id: &str,
        entry_id: &str,
    ) -> Result<Option<Profile>, DomainError>;
}
