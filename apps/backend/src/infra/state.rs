use std::sync::Arc;

use mongodb::Database;

use crate::adapters::memory::{MemoryPostStore, MemoryProfileStore, MemoryUserStore};
use crate::adapters::posts_mongo::MongoPostStore;
use crate::adapters::profiles_mongo::MongoProfileStore;
use crate::adapters::users_mongo::MongoUserStore;
use crate::config::StoreKind;
use crate::error::AppError;
use crate::services::github::{GithubClient, DEFAULT_GITHUB_API_BASE};
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

enum StoreChoice {
    Memory,
    Mongo(Database),
}

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    security_config: SecurityConfig,
    store: Option<StoreChoice>,
    github_base: String,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            security_config: SecurityConfig::new(ulid::Ulid::new().to_string().repeat(2)),
            store: None,
            github_base: DEFAULT_GITHUB_API_BASE.to_string(),
        }
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = security_config;
        self
    }

    /// Back the stores with an already connected database.
    pub fn with_mongo(mut self, db: Database) -> Self {
        self.store = Some(StoreChoice::Mongo(db));
        self
    }

    pub fn with_memory_store(mut self) -> Self {
        self.store = Some(StoreChoice::Memory);
        self
    }

    pub fn with_github_base(mut self, base: impl Into<String>) -> Self {
        self.github_base = base.into();
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let store = self
            .store
            .ok_or_else(|| AppError::config("no store configured for AppState"))?;

        let github = GithubClient::new(self.github_base)?;

        let state = match store {
            StoreChoice::Memory => AppState {
                users: Arc::new(MemoryUserStore::new()),
                profiles: Arc::new(MemoryProfileStore::new()),
                posts: Arc::new(MemoryPostStore::new()),
                security: self.security_config,
                github,
                store_name: StoreKind::Memory.as_str(),
            },
            StoreChoice::Mongo(db) => AppState {
                users: Arc::new(MongoUserStore::new(&db)),
                profiles: Arc::new(MongoProfileStore::new(&db)),
                posts: Arc::new(MongoPostStore::new(&db)),
                security: self.security_config,
                github,
                store_name: StoreKind::Mongo.as_str(),
            },
        };

        Ok(state)
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_build_requires_a_store() {
        let err = build_state().build().await.unwrap_err();
        assert!(err.to_string().contains("no store"));
    }

    #[tokio::test]
    async fn test_memory_state() {
        let state = build_state().with_memory_store().build().await.unwrap();
        assert_eq!(state.store_name, "memory");
        assert!(state.users.ping().await.is_ok());
    }

    #[tokio::test]
    async fn test_bad_github_base_fails_the_build() {
        let err = build_state()
            .with_memory_store()
            .with_github_base("api.github.com")
            .build()
            .await
            .unwrap_err();
        assert_eq!(err.code(), crate::errors::ErrorCode::ConfigError);
    }
}
