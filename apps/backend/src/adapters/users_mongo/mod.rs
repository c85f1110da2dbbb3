//! MongoDB adapter for the credential store.

use std::collections::HashMap;

use async_trait::async_trait;
use bson::doc;
use bson::oid::ObjectId;
use futures_util::TryStreamExt;
use mongodb::{Collection, Database};
use time::OffsetDateTime;

use crate::domain::users::{NewUser, User};
use crate::errors::domain::DomainError;
use crate::infra::db_errors::map_mongo_err;
use crate::repos::users::UserStore;

pub mod dto;

pub use dto::UserDoc;

pub const COLLECTION: &str = "users";

#[derive(Debug, Clone)]
pub struct MongoUserStore {
    db: Database,
    users: Collection<UserDoc>,
}

impl MongoUserStore {
    pub fn new(db: &Database) -> Self {
        Self {
            db: db.clone(),
            users: db.collection(COLLECTION),
        }
    }
}

#[async_trait]
impl UserStore for MongoUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let found = self
            .users
            .find_one(doc! { "email": email })
            .await
            .map_err(map_mongo_err)?;
        Ok(found.map(User::from))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, DomainError> {
        let Ok(oid) = ObjectId::parse_str(id) else {
            return Ok(None);
        };
        let found = self
            .users
            .find_one(doc! { "_id": oid })
            .await
            .map_err(map_mongo_err)?;
        Ok(found.map(User::from))
    }

    async fn find_names(&self, ids: &[String]) -> Result<HashMap<String, String>, DomainError> {
        let oids: Vec<ObjectId> = ids
            .iter()
            .filter_map(|id| ObjectId::parse_str(id).ok())
            .collect();
        if oids.is_empty() {
            return Ok(HashMap::new());
        }

        let docs: Vec<UserDoc> = self
            .users
            .find(doc! { "_id": { "$in": oids } })
            .await
            .map_err(map_mongo_err)?
            .try_collect()
            .await
            .map_err(map_mongo_err)?;

        Ok(docs
            .into_iter()
            .map(|doc| (doc.id.to_hex(), doc.name))
            .collect())
    }

    async fn insert(&self, user: NewUser) -> Result<User, DomainError> {
        let doc = UserDoc {
            id: ObjectId::new(),
            name: user.name,
            email: user.email,
            password: user.password_digest,
            date: bson::DateTime::from_time_0_3(OffsetDateTime::now_utc()),
        };

        self.users
            .insert_one(&doc)
            .await
            .map_err(map_mongo_err)?;
        Ok(User::from(doc))
    }

    async fn remove(&self, id: &str) -> Result<bool, DomainError> {
        let Ok(oid) = ObjectId::parse_str(id) else {
            return Ok(false);
        };
        let result = self
            .users
            .delete_one(doc! { "_id": oid })
            .await
            .map_err(map_mongo_err)?;
        Ok(result.deleted_count > 0)
    }

    async fn ping(&self) -> Result<(), DomainError> {
        self.db
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(map_mongo_err)?;
        Ok(())
    }
}
