//! Driving port for likes and comments.
//!
//! The [`EngagementCommand`] trait is the inbound contract HTTP handlers use
//! to like, unlike, comment on and remove comments from a post. Each call is
//! a single load, mutate and save of the post; nothing is persisted when a
//! rule rejects the action.

use async_trait::async_trait;

use crate::domain::{Comment, CommentId, Error, Like, PostId, PostText, UserId};

/// Request to like or unlike a post.
#[derive(Debug, Clone)]
pub struct LikeRequest {
    /// The post being (un)liked.
    pub post_id: PostId,
    /// The acting user.
    pub user_id: UserId,
}

/// Request to comment on a post.
#[derive(Debug, Clone)]
pub struct AddCommentRequest {
    /// The post being commented on.
    pub post_id: PostId,
    /// The comment's author.
    pub user_id: UserId,
    /// Validated comment body.
    pub text: PostText,
}

/// Request to remove a comment from a post.
#[derive(Debug, Clone)]
pub struct RemoveCommentRequest {
    /// The post holding the comment.
    pub post_id: PostId,
    /// The comment to remove.
    pub comment_id: CommentId,
    /// The acting user; must be the comment's author.
    pub user_id: UserId,
}

/// Driving port for engagement operations.
///
/// Every operation loads the post first and fails with a not-found error if
/// it is absent.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EngagementCommand: Send + Sync {
    /// Like a post, returning the updated likes (most recent first).
    ///
    /// # Errors
    /// Conflict when the user already likes the post.
    async fn add_like(&self, request: LikeRequest) -> Result<Vec<Like>, Error>;

    /// Withdraw a like, returning the updated likes.
    ///
    /// # Errors
    /// Conflict when the user has not liked the post.
    async fn remove_like(&self, request: LikeRequest) -> Result<Vec<Like>, Error>;

    /// Prepend a comment, returning the updated comments.
    ///
    /// # Errors
    /// Not found when the author has no profile.
    async fn add_comment(&self, request: AddCommentRequest) -> Result<Vec<Comment>, Error>;

    /// Remove a comment, returning the updated comments.
    ///
    /// # Errors
    /// - Not found when the comment does not exist.
    /// - Unauthorized when the acting user did not write it.
    async fn remove_comment(&self, request: RemoveCommentRequest) -> Result<Vec<Comment>, Error>;
}
