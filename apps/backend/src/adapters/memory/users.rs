use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use time::OffsetDateTime;

use super::new_id;
use crate::domain::users::{NewUser, User};
use crate::errors::domain::{ConflictKind, DomainError};
use crate::repos::users::UserStore;

#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<String, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .read()
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, DomainError> {
        Ok(self.users.read().get(id).cloned())
    }

    async fn find_names(&self, ids: &[String]) -> Result<HashMap<String, String>, DomainError> {
        let users = self.users.read();
        Ok(ids
            .iter()
            .filter_map(|id| users.get(id).map(|u| (id.clone(), u.name.clone())))
            .collect())
    }

    async fn insert(&self, user: NewUser) -> Result<User, DomainError> {
        let mut users = self.users.write();

        if users.values().any(|u| u.email == user.email) {
            return Err(DomainError::conflict(
                ConflictKind::UniqueEmail,
                "email already registered",
            ));
        }

        let user = User {
            id: new_id(),
            name: user.name,
            email: user.email,
            password_digest: user.password_digest,
            date: OffsetDateTime::now_utc(),
        };
        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn remove(&self, id: &str) -> Result<bool, DomainError> {
        Ok(self.users.write().remove(id).is_some())
    }

    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Jane".into(),
            email: email.into(),
            password_digest: "$argon2id$x".into(),
        }
    }

    #[tokio::test]
    async fn test_insert_then_find() {
        let store = MemoryUserStore::new();
        let user = store.insert(new_user("jane@example.com")).await.unwrap();

        let by_email = store.find_by_email("jane@example.com").await.unwrap();
        let by_id = store.find_by_id(&user.id).await.unwrap();

        assert_eq!(by_email.as_ref(), Some(&user));
        assert_eq!(by_id, Some(user));
        assert_eq!(store.find_by_id("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let store = MemoryUserStore::new();
        store.insert(new_user("dup@example.com")).await.unwrap();

        let err = store.insert(new_user("dup@example.com")).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::Conflict(ConflictKind::UniqueEmail, _)
        ));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_find_names_skips_unknown_ids() {
        let store = MemoryUserStore::new();
        let user = store.insert(new_user("names@example.com")).await.unwrap();

        let names = store
            .find_names(&[user.id.clone(), "ghost".to_string()])
            .await
            .unwrap();

        assert_eq!(names.len(), 1);
        assert_eq!(names[&user.id], "Jane");
    }

    #[tokio::test]
    async fn test_remove() {
        let store = MemoryUserStore::new();
        let user = store.insert(new_user("bye@example.com")).await.unwrap();

        assert!(store.remove(&user.id).await.unwrap());
        assert!(!store.remove(&user.id).await.unwrap());
        assert!(store.is_empty());
    }
}
