//! Adapters for external dependencies.

pub mod memory;
pub mod posts_mongo;
pub mod profiles_mongo;
pub mod users_mongo;
