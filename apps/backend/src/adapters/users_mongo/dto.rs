use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::domain::users::User;

/// Document shape of the `users` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDoc {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub email: String,
    /// Argon2 PHC digest
    pub password: String,
    pub date: bson::DateTime,
}

impl From<UserDoc> for User {
    fn from(doc: UserDoc) -> Self {
        Self {
            id: doc.id.to_hex(),
            name: doc.name,
            email: doc.email,
            password_digest: doc.password,
            date: doc.date.to_time_0_3(),
        }
    }
}
