use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Like {
    pub user: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub user: String,
    pub text: String,
    /// Author name when the comment was written
    pub name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    pub id: String,
    pub user: String,
    pub text: String,
    /// Author name when the post was created
    pub name: String,
    /// Newest first
    pub likes: Vec<Like>,
    /// Newest first
    pub comments: Vec<Comment>,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
}

impl Post {
    pub fn is_liked_by(&self, user_id: &str) -> bool {
        self.likes.iter().any(|like| like.user == user_id)
    }
}

#[derive(Debug, Clone)]
pub struct NewPost {
    pub user: String,
    pub text: String,
    pub name: String,
}
