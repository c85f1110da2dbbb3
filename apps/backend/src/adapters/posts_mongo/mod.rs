//! MongoDB adapter for posts.
//!
//! Likes and comments are changed with single filtered updates so
//! concurrent requests cannot double-like or resurrect removed entries.

use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{doc, Document};
use futures_util::TryStreamExt;
use mongodb::options::ReturnDocument;
use mongodb::{Collection, Database};
use time::OffsetDateTime;

use crate::domain::posts::{Comment, Like, NewPost, Post};
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::infra::db_errors::map_mongo_err;
use crate::repos::posts::PostStore;

pub mod dto;

pub use dto::{CommentDoc, LikeDoc, PostDoc};

pub const COLLECTION: &str = "posts";

#[derive(Debug, Clone)]
pub struct MongoPostStore {
    posts: Collection<PostDoc>,
}

fn parse_ids(post_id: &str, user_id: &str) -> Option<(ObjectId, ObjectId)> {
    Some((
        ObjectId::parse_str(post_id).ok()?,
        ObjectId::parse_str(user_id).ok()?,
    ))
}

impl MongoPostStore {
    pub fn new(db: &Database) -> Self {
        Self {
            posts: db.collection(COLLECTION),
        }
    }

    async fn update_one(
        &self,
        filter: Document,
        update: Document,
    ) -> Result<Option<Post>, DomainError> {
        let updated = self
            .posts
            .find_one_and_update(filter, update)
            .return_document(ReturnDocument::After)
            .await
            .map_err(map_mongo_err)?;
        Ok(updated.map(Post::from))
    }
}

#[async_trait]
impl PostStore for MongoPostStore {
    async fn insert(&self, post: NewPost) -> Result<Post, DomainError> {
        let user = ObjectId::parse_str(&post.user)
            .map_err(|_| DomainError::not_found(NotFoundKind::User, "unknown user id"))?;

        let doc = PostDoc {
            id: ObjectId::new(),
            user,
            text: post.text,
            name: post.name,
            likes: Vec::new(),
            comments: Vec::new(),
            date: bson::DateTime::from_time_0_3(OffsetDateTime::now_utc()),
        };

        self.posts.insert_one(&doc).await.map_err(map_mongo_err)?;
        Ok(Post::from(doc))
    }

    async fn list(&self) -> Result<Vec<Post>, DomainError> {
        let docs: Vec<PostDoc> = self
            .posts
            .find(doc! {})
            .sort(doc! { "date": -1 })
            .await
            .map_err(map_mongo_err)?
            .try_collect()
            .await
            .map_err(map_mongo_err)?;
        Ok(docs.into_iter().map(Post::from).collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Post>, DomainError> {
        let Ok(oid) = ObjectId::parse_str(id) else {
            return Ok(None);
        };
        let found = self
            .posts
            .find_one(doc! { "_id": oid })
            .await
            .map_err(map_mongo_err)?;
        Ok(found.map(Post::from))
    }

    async fn remove(&self, id: &str) -> Result<bool, DomainError> {
        let Ok(oid) = ObjectId::parse_str(id) else {
            return Ok(false);
        };
        let result = self
            .posts
            .delete_one(doc! { "_id": oid })
            .await
            .map_err(map_mongo_err)?;
        Ok(result.deleted_count > 0)
    }

    async fn remove_by_user(&self, user_id: &str) -> Result<u64, DomainError> {
        let Ok(user) = ObjectId::parse_str(user_id) else {
            return Ok(0);
        };
        let result = self
            .posts
            .delete_many(doc! { "user": user })
            .await
            .map_err(map_mongo_err)?;
        Ok(result.deleted_count)
    }

    async fn add_like(
        &self,
        post_id: &str,
        user_id: &str,
    ) -> Result<Option<Vec<Like>>, DomainError> {
        let Some((post, user)) = parse_ids(post_id, user_id) else {
            return Ok(None);
        };

        let updated = self
            .update_one(
                doc! { "_id": post, "likes.user": { "$ne": user } },
                doc! { "$push": { "likes": { "$each": [{ "user": user }], "$position": 0 } } },
            )
            .await?;
        Ok(updated.map(|p| p.likes))
    }

    async fn remove_like(
        &self,
        post_id: &str,
        user_id: &str,
    ) -> Result<Option<Vec<Like>>, DomainError> {
        let Some((post, user)) = parse_ids(post_id, user_id) else {
            return Ok(None);
        };

        let updated = self
            .update_one(
                doc! { "_id": post, "likes.user": user },
                doc! { "$pull": { "likes": { "user": user } } },
            )
            .await?;
        Ok(updated.map(|p| p.likes))
    }

    async fn add_comment(
        &self,
        post_id: &str,
        comment: Comment,
    ) -> Result<Option<Vec<Comment>>, DomainError> {
        let Some((post, user)) = parse_ids(post_id, &comment.user) else {
            return Ok(None);
        };

        let entry = doc! {
            "id": comment.id,
            "user": user,
            "text": comment.text,
            "name": comment.name,
            "date": bson::DateTime::from_time_0_3(comment.date),
        };

        let updated = self
            .update_one(
                doc! { "_id": post },
                doc! { "$push": { "comments": { "$each": [entry], "$position": 0 } } },
            )
            .await?;
        Ok(updated.map(|p| p.comments))
    }

    async fn remove_comment(
        &self,
        post_id: &str,
        comment_id: &str,
        user_id: &str,
    ) -> Result<Option<Vec<Comment>>, DomainError> {
        let Some((post, user)) = parse_ids(post_id, user_id) else {
            return Ok(None);
        };

        let updated = self
            .update_one(
                doc! {
                    "_id": post,
                    "comments": { "$elemMatch": { "id": comment_id, "user": user } },
                },
                doc! { "$pull": { "comments": { "id": comment_id, "user": user } } },
            )
            .await?;
        Ok(updated.map(|p| p.comments))
    }
}
