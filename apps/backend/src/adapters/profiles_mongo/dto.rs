use bson::oid::ObjectId;
use bson::{doc, Document};
use serde::{Deserialize, Serialize};

use crate::domain::profiles::{Education, Experience, Profile, ProfileFields, Social};

/// Document shape of the `profiles` collection.
///
/// Experience and education entries are embedded with their string ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileDoc {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub user: ObjectId,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    pub status: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub githubusername: Option<String>,
    #[serde(default)]
    pub social: Option<Social>,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
    pub date: bson::DateTime,
}

impl From<ProfileDoc> for Profile {
    fn from(doc: ProfileDoc) -> Self {
        Self {
            id: doc.id.to_hex(),
            user: doc.user.to_hex(),
            fields: ProfileFields {
                company: doc.company,
                website: doc.website,
                location: doc.location,
                status: doc.status,
                skills: doc.skills,
                bio: doc.bio,
                githubusername: doc.githubusername,
                social: doc.social,
            },
            experience: doc.experience,
            education: doc.education,
            date: doc.date.to_time_0_3(),
        }
    }
}

/// `$set` body replacing every editable field; unset options become null.
pub fn fields_update(fields: ProfileFields) -> Result<Document, bson::ser::Error> {
    Ok(doc! {
        "company": fields.company,
        "website": fields.website,
        "location": fields.location,
        "status": fields.status,
        "skills": fields.skills,
        "bio": fields.bio,
        "githubusername": fields.githubusername,
        "social": bson::to_bson(&fields.social)?,
    })
}
