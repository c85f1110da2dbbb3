use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::domain::posts::{Comment, Like, Post};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikeDoc {
    pub user: ObjectId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentDoc {
    pub id: String,
    pub user: ObjectId,
    pub text: String,
    pub name: String,
    pub date: bson::DateTime,
}

/// Document shape of the `posts` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDoc {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub user: ObjectId,
    pub text: String,
    pub name: String,
    #[serde(default)]
    pub likes: Vec<LikeDoc>,
    #[serde(default)]
    pub comments: Vec<CommentDoc>,
    pub date: bson::DateTime,
}

impl From<LikeDoc> for Like {
    fn from(doc: LikeDoc) -> Self {
        Self {
            user: doc.user.to_hex(),
        }
    }
}

impl From<CommentDoc> for Comment {
    fn from(doc: CommentDoc) -> Self {
        Self {
            id: doc.id,
            user: doc.user.to_hex(),
            text: doc.text,
            name: doc.name,
            date: doc.date.to_time_0_3(),
        }
    }
}

impl From<PostDoc> for Post {
    fn from(doc: PostDoc) -> Self {
        Self {
            id: doc.id.to_hex(),
            user: doc.user.to_hex(),
            text: doc.text,
            name: doc.name,
            likes: doc.likes.into_iter().map(Like::from).collect(),
            comments: doc.comments.into_iter().map(Comment::from).collect(),
            date: doc.date.to_time_0_3(),
        }
    }
}
