//! Driving port for creating and deleting posts.

use async_trait::async_trait;

use crate::domain::{Error, Post, PostId, PostText, UserId};

/// Request to publish a new post.
#[derive(Debug, Clone)]
pub struct CreatePostRequest {
    /// The author.
    pub user_id: UserId,
    /// Validated post body.
    pub text: PostText,
}

/// Request to delete a post.
#[derive(Debug, Clone)]
pub struct DeletePostRequest {
    /// The post to delete.
    pub post_id: PostId,
    /// The acting user, recorded for audit logging.
    pub user_id: UserId,
}

/// Response from deleting a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeletePostResponse {
    /// Whether a post was actually removed.
    pub deleted: bool,
}

/// Driving port for post lifecycle operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostsCommand: Send + Sync {
    /// Publish a post stamped with the author's current profile.
    ///
    /// # Errors
    /// Not found when the author has no profile; internal on store failure.
    async fn create_post(&self, request: CreatePostRequest) -> Result<Post, Error>;

    /// Delete a post. Deleting an unknown post is not an error.
    async fn delete_post(&self, request: DeletePostRequest) -> Result<DeletePostResponse, Error>;
}
