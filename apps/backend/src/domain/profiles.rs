use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::users::UserRef;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Social {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
}

impl Social {
    pub fn is_empty(&self) -> bool {
        self == &Social::default()
    }
}

/// The caller-editable part of a profile, replaced as a whole by `upsert`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub status: String,
    pub skills: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub githubusername: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social: Option<Social>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub id: String,
    pub title: String,
    pub company: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub from: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(default)]
    pub current: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    pub id: String,
    pub school: String,
    pub degree: String,
    pub fieldofstudy: String,
    pub from: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(default)]
    pub current: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Stored profile. At most one exists per user.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub id: String,
    pub user: String,
    pub fields: ProfileFields,
    /// Newest first
    pub experience: Vec<Experience>,
    /// Newest first
    pub education: Vec<Education>,
    pub date: OffsetDateTime,
}

/// Profile as returned to clients, with its owner resolved to id and name.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileView {
    pub id: String,
    pub user: UserRef,
    #[serde(flatten)]
    pub fields: ProfileFields,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
}

impl ProfileView {
    pub fn new(profile: Profile, user: UserRef) -> Self {
        Self {
            id: profile.id,
            user,
            fields: profile.fields,
            experience: profile.experience,
            education: profile.education,
            date: profile.date,
        }
    }
}
