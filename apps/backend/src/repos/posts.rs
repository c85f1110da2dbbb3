use async_trait::async_trait;

use crate::domain::posts::{Comment, Like, NewPost, Post};
use crate::errors::domain::DomainError;

/// Post store.
///
/// The list mutations are conditional single updates. They return `None`
/// when the post is missing or the condition does not hold; callers read the
/// post again to tell the two apart.
#[async_trait]
pub trait PostStore: Send + Sync {
    async fn insert(&self, post: NewPost) -> Result<Post, DomainError>;

    /// All posts, newest first.
    async fn list(&self) -> Result<Vec<Post>, DomainError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Post>, DomainError>;

    async fn remove(&self, id: &str) -> Result<bool, DomainError>;

    /// Returns the number of posts removed.
    async fn remove_by_user(&self, user_id: &str) -> Result<u64, DomainError>;

    /// Prepend a like unless `user_id` already liked the post.
    async fn add_like(&self, post_id: &str, user_id: &str)
        -> Result<Option<Vec<Like>>, DomainError>;

    /// Remove the like of `user_id` if there is one.
    async fn remove_like(
        &self,
        post_id: &str,
        user_id: &str,
    ) -> Result<Option<Vec<Like>>, DomainError>;

    /// Prepend a comment.
    async fn add_comment(
        &self,
        post_id: &str,
        comment: Comment,
    ) -> Result<Option<Vec<Comment>>, DomainError>;

    /// Remove comment `comment_id` only if `user_id` wrote it.
    async fn remove_comment(
        &self,
        post_id: &str,
        comment_id: &str,
        user_id: &str,
    ) -> Result<Option<Vec<Comment>>, DomainError>;
}
