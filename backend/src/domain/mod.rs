//! Domain primitives, aggregates and services.
//!
//! Purpose: Define strongly typed domain entities used by the API and
//! persistence layers, and the services that apply the posting and
//! engagement rules to them. Invariants live on the types; adapters only
//! ever see validated values.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - Post (alias to `post::Post`): a post with its likes and comments.
//! - EngagementService: likes, dislikes and comments on posts.
//! - PostService: creating, listing, fetching and deleting posts.

pub mod engagement_service;
pub mod error;
pub mod ports;
pub mod post;
pub mod post_service;
mod post_service_support;
pub mod trace_id;
pub mod user;

pub use self::engagement_service::EngagementService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::post::{
    Comment, CommentId, EngagementError, Like, Post, PostId, PostText, PostTextError,
};
pub use self::post_service::PostService;
pub use self::post_service_support::{POST_NOT_FOUND, USER_NOT_FOUND};
pub use self::trace_id::TraceId;
pub use self::user::{AuthorProfile, UserId, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use postboard::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::unauthorized("Token is not valid"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
