use async_trait::async_trait;
use parking_lot::RwLock;
use time::OffsetDateTime;

use super::new_id;
use crate::domain::posts::{Comment, Like, NewPost, Post};
use crate::errors::domain::DomainError;
use crate::repos::posts::PostStore;

/// Posts kept newest first.
#[derive(Debug, Default)]
pub struct MemoryPostStore {
    posts: RwLock<Vec<Post>>,
}

impl MemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn update<T, F>(&self, post_id: &str, f: F) -> Option<T>
    where
        F: FnOnce(&mut Post) -> Option<T>,
    {
        let mut posts = self.posts.write();
        let post = posts.iter_mut().find(|p| p.id == post_id)?;
        f(post)
    }
}

#[async_trait]
impl PostStore for MemoryPostStore {
    async fn insert(&self, post: NewPost) -> Result<Post, DomainError> {
        let post = Post {
            id: new_id(),
            user: post.user,
            text: post.text,
            name: post.name,
            likes: Vec::new(),
            comments: Vec::new(),
            date: OffsetDateTime::now_utc(),
        };
        self.posts.write().insert(0, post.clone());
        Ok(post)
    }

    async fn list(&self) -> Result<Vec<Post>, DomainError> {
        Ok(self.posts.read().clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Post>, DomainError> {
        Ok(self.posts.read().iter().find(|p| p.id == id).cloned())
    }

    async fn remove(&self, id: &str) -> Result<bool, DomainError> {
        let mut posts = self.posts.write();
        let before = posts.len();
        posts.retain(|p| p.id != id);
        Ok(posts.len() != before)
    }

    async fn remove_by_user(&self, user_id: &str) -> Result<u64, DomainError> {
        let mut posts = self.posts.write();
        let before = posts.len();
        posts.retain(|p| p.user != user_id);
        Ok((before - posts.len()) as u64)
    }

    async fn add_like(
        &self,
        post_id: &str,
        user_id: &str,
    ) -> Result<Option<Vec<Like>>, DomainError> {
        Ok(self.update(post_id, |post| {
            if post.is_liked_by(user_id) {
                return None;
            }
            post.likes.insert(
                0,
                Like {
                    user: user_id.to_string(),
                },
            );
            Some(post.likes.clone())
        }))
    }

    async fn remove_like(
        &self,
        post_id: &str,
        user_id: &str,
    ) -> Result<Option<Vec<Like>>, DomainError> {
        Ok(self.update(post_id, |post| {
            if !post.is_liked_by(user_id) {
                return None;
            }
            post.likes.retain(|like| like.user != user_id);
            Some(post.likes.clone())
        }))
    }

    async fn add_comment(
        &self,
        post_id: &str,
        comment: Comment,
    ) -> Result<Option<Vec<Comment>>, DomainError> {
        Ok(self.update(post_id, |post| {
            post.comments.insert(0, comment);
            Some(post.comments.clone())
        }))
    }

    async fn remove_comment(
        &self,
        post_id: &str,
        comment_id: &str,
        user_id: &str,
    ) -> Result<Option<Vec<Comment>>, DomainError> {
        Ok(self.update(post_id, |post| {
            let idx = post
                .comments
                .iter()
                .position(|c| c.id == comment_id && c.user == user_id)?;
            post.comments.remove(idx);
            Some(post.comments.clone())
        }))
    }
}
