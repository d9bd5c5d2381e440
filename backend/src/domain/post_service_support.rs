//! Error translation and lookups shared by the post and engagement services.

use serde_json::json;
use tracing::{error, warn};

use crate::domain::ports::{PostRepository, PostRepositoryError, UserDirectory, UserDirectoryError};
use crate::domain::{AuthorProfile, EngagementError, Error, Post, PostId, UserId};

/// Message returned whenever a post cannot be found.
pub const POST_NOT_FOUND: &str = "Post not found";
/// Message returned when the acting user has no profile.
pub const USER_NOT_FOUND: &str = "User not found";

pub(crate) fn map_post_repository_error(error: PostRepositoryError) -> Error {
    match error {
        PostRepositoryError::Connection { message } => {
            error!(%message, "post repository unavailable");
            Error::internal(format!("post repository unavailable: {message}"))
        }
        PostRepositoryError::Query { message } => {
            error!(%message, "post repository query failed");
            Error::internal(format!("post repository error: {message}"))
        }
        PostRepositoryError::RevisionMismatch { expected, actual } => {
            warn!(expected, actual, "stale post save rejected");
            revision_conflict(expected, actual)
        }
        PostRepositoryError::PostNotFound { post_id } => {
            Error::not_found(POST_NOT_FOUND).with_details(json!({
                "postId": post_id,
                "code": "post_not_found",
            }))
        }
    }
}

pub(crate) fn map_user_directory_error(error: UserDirectoryError) -> Error {
    match error {
        UserDirectoryError::Connection { message } => {
            error!(%message, "user directory unavailable");
            Error::internal(format!("user directory unavailable: {message}"))
        }
        UserDirectoryError::Query { message } => {
            error!(%message, "user directory query failed");
            Error::internal(format!("user directory error: {message}"))
        }
    }
}

pub(crate) fn revision_conflict(expected: u32, actual: u32) -> Error {
    Error::conflict("revision mismatch").with_details(json!({
        "expectedRevision": expected,
        "actualRevision": actual,
        "code": "revision_mismatch",
    }))
}

pub(crate) fn map_engagement_error(error: EngagementError) -> Error {
    let message = error.to_string();
    match error {
        EngagementError::AlreadyLiked | EngagementError::NotLiked => Error::conflict(message),
        EngagementError::CommentNotFound => Error::not_found(message),
        EngagementError::NotCommentAuthor => Error::unauthorized(message),
    }
}

pub(crate) async fn load_post<R>(posts: &R, post_id: &PostId) -> Result<Post, Error>
where
    R: PostRepository + ?Sized,
{
    posts
        .find_by_id(post_id)
        .await
        .map_err(map_post_repository_error)?
        .ok_or_else(|| Error::not_found(POST_NOT_FOUND))
}

pub(crate) async fn resolve_author<U>(users: &U, user_id: &UserId) -> Result<AuthorProfile, Error>
where
    U: UserDirectory + ?Sized,
{
    users
        .find_profile(user_id)
        .await
        .map_err(map_user_directory_error)?
        .ok_or_else(|| Error::not_found(USER_NOT_FOUND))
}
