use serde::Serialize;
use time::OffsetDateTime;

/// Stored identity, digest included. Never serialized directly.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_digest: String,
    pub date: OffsetDateTime,
}

/// Identity to be created by `UserStore::insert`.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_digest: String,
}

/// Public view of an identity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserView {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            date: user.date,
        }
    }
}

/// Id and name, embedded wherever another record points at a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserRef {
    pub id: String,
    pub name: String,
}

/// Trim and lower-case an email so lookups and storage agree.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
