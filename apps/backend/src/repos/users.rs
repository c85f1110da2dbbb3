//! Credential store.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::users::{NewUser, User};
use crate::errors::domain::DomainError;

#[async_trait]
pub trait UserStore: Send + Sync {
    /// `email` must already be normalized.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Unknown or unparseable ids yield `None`.
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, DomainError>;

    /// Names for the given ids; ids without a user are absent from the map.
    async fn find_names(&self, ids: &[String]) -> Result<HashMap<String, String>, DomainError>;

    /// Fails with `ConflictKind::UniqueEmail` when the email is taken.
    async fn insert(&self, user: NewUser) -> Result<User, DomainError>;

    /// Returns whether a user was removed.
    async fn remove(&self, id: &str) -> Result<bool, DomainError>;

    /// Cheap liveness check for `/health`.
    async fn ping(&self) -> Result<(), DomainError>;
}
