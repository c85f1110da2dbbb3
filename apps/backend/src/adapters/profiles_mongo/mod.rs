//! MongoDB adapter for profiles.

use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{doc, Document};
use futures_util::TryStreamExt;
use mongodb::options::ReturnDocument;
use mongodb::{Collection, Database};
use serde::Serialize;
use time::OffsetDateTime;

use crate::domain::profiles::{Education, Experience, Profile, ProfileFields};
use crate::errors::domain::{DomainError, InfraErrorKind, NotFoundKind};
use crate::infra::db_errors::map_mongo_err;
use crate::repos::profiles::ProfileStore;

pub mod dto;

pub use dto::ProfileDoc;

pub const COLLECTION: &str = "profiles";

#[derive(Debug, Clone)]
pub struct MongoProfileStore {
    profiles: Collection<ProfileDoc>,
}

impl MongoProfileStore {
    pub fn new(db: &Database) -> Self {
        Self {
            profiles: db.collection(COLLECTION),
        }
    }

    /// Apply `update` to the profile of `user_id` and return the new version.
    async fn update_one(
        &self,
        user_id: &str,
        update: Document,
    ) -> Result<Option<Profile>, DomainError> {
        let Ok(user) = ObjectId::parse_str(user_id) else {
            return Ok(None);
        };

        let updated = self
            .profiles
            .find_one_and_update(doc! { "user": user }, update)
            .return_document(ReturnDocument::After)
            .await
            .map_err(map_mongo_err)?;
        Ok(updated.map(Profile::from))
    }
}

fn to_bson<T: Serialize>(value: &T) -> Result<bson::Bson, DomainError> {
    bson::to_bson(value).map_err(|e| {
        DomainError::infra(
            InfraErrorKind::Other("Encode".into()),
            format!("failed to encode document: {e}"),
        )
    })
}

fn prepend(field: &str, entry: bson::Bson) -> Document {
    let mut push = Document::new();
    push.insert(field, doc! { "$each": [entry], "$position": 0 });
    doc! { "$push": push }
}

#[async_trait]
impl ProfileStore for MongoProfileStore {
    async fn find_by_user(&self, user_id: &str) -> Result<Option<Profile>, DomainError> {
        let Ok(user) = ObjectId::parse_str(user_id) else {
            return Ok(None);
        };
        let found = self
            .profiles
            .find_one(doc! { "user": user })
            .await
            .map_err(map_mongo_err)?;
        Ok(found.map(Profile::from))
    }

    async fn list(&self) -> Result<Vec<Profile>, DomainError> {
        let docs: Vec<ProfileDoc> = self
            .profiles
            .find(doc! {})
            .await
            .map_err(map_mongo_err)?
            .try_collect()
            .await
            .map_err(map_mongo_err)?;
        Ok(docs.into_iter().map(Profile::from).collect())
    }

    async fn upsert(&self, user_id: &str, fields: ProfileFields) -> Result<Profile, DomainError> {
        let user = ObjectId::parse_str(user_id)
            .map_err(|_| DomainError::not_found(NotFoundKind::User, "unknown user id"))?;
        let set = dto::fields_update(fields).map_err(|e| {
            DomainError::infra(
                InfraErrorKind::Other("Encode".into()),
                format!("failed to encode profile: {e}"),
            )
        })?;

        let update = doc! {
            "$set": set,
            "$setOnInsert": {
                "experience": [],
                "education": [],
                "date": bson::DateTime::from_time_0_3(OffsetDateTime::now_utc()),
            },
        };

        self.profiles
            .find_one_and_update(doc! { "user": user }, update)
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await
            .map_err(map_mongo_err)?
            .map(Profile::from)
            .ok_or_else(|| {
                DomainError::infra(
                    InfraErrorKind::Other("Upsert".into()),
                    "upsert returned no document",
                )
            })
    }

    async fn remove_by_user(&self, user_id: &str) -> Result<bool, DomainError> {
        let Ok(user) = ObjectId::parse_str(user_id) else {
            return Ok(false);
        };
        let result = self
            .profiles
            .delete_one(doc! { "user": user })
            .await
            .map_err(map_mongo_err)?;
        Ok(result.deleted_count > 0)
    }

    async fn add_experience(
        &self,
        user_id: &str,
        entry: Experience,
    ) -> Result<Option<Profile>, DomainError> {
        self.update_one(user_id, prepend("experience", to_bson(&entry)?))
            .await
    }

    async fn remove_experience(
        &self,
        user_id: &str,
        entry_id: &str,
    ) -> Result<Option<Profile>, DomainError> {
        self.update_one(
            user_id,
            doc! { "$pull": { "experience": { "id": entry_id } } },
        )
        .await
    }

    async fn add_education(
        &self,
        user_id: &str,
        entry: Education,
    ) -> Result<Option<Profile>, DomainError> {
        self.update_one(user_id, prepend("education", to_bson(&entry)?))
            .await
    }

    async fn remove_education(
        &self,
        user_id: &str,
        entry_id: &str,
    ) -> Result<Option<Profile>, DomainError> {
        self.update_one(
            user_id,
            doc! { "$pull": { "education": { "id": entry_id } } },
        )
        .await
    }
}
