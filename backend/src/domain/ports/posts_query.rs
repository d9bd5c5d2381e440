//! Driving port for reading posts.

use async_trait::async_trait;

use crate::domain::{Error, Post, PostId};

/// Read-side port for posts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostsQuery: Send + Sync {
    /// All posts, most recently created first.
    async fn list_posts(&self) -> Result<Vec<Post>, Error>;

    /// A single post.
    ///
    /// # Errors
    /// Not found when no post has `post_id`.
    async fn get_post(&self, post_id: &PostId) -> Result<Post, Error>;
}
