//! Like, dislike and comment HTTP handlers.
//!
//! ```text
//! PUT    /api/v1/posts/{post_id}/like
//! PUT    /api/v1/posts/{post_id}/dislike
//! PUT    /api/v1/posts/{post_id}/comments {"text":"Nice"}
//! DELETE /api/v1/posts/{post_id}/comments/{comment_id}
//! ```
//!
//! Each handler answers with the post's updated likes or comments, most
//! recent first.

use actix_web::{delete, put, web};

use crate::domain::ports::{AddCommentRequest, LikeRequest, RemoveCommentRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::posts_dto::{
    CommentResponse, LikeResponse, TextRequest, comments_body, likes_body,
};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_comment_id, parse_post_id, require_text};
use crate::middleware::AuthenticatedUser;

fn like_request(raw_post_id: &str, user: AuthenticatedUser) -> ApiResult<LikeRequest> {
    Ok(LikeRequest {
        post_id: parse_post_id(raw_post_id)?,
        user_id: user.into_inner(),
    })
}

/// Like a post.
#[utoipa::path(
    put,
    path = "/api/v1/posts/{post_id}/like",
    params(("post_id" = String, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Updated likes", body = [LikeResponse]),
        (status = 400, description = "Post not found or already liked", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["engagement"],
    operation_id = "likePost"
)]
#[put("/posts/{post_id}/like")]
pub async fn like_post(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<LikeResponse>>> {
    let likes = state.engagement.add_like(like_request(&path, user)?).await?;
    Ok(web::Json(likes_body(&likes)))
}

/// Withdraw a like.
#[utoipa::path(
    put,
    path = "/api/v1/posts/{post_id}/dislike",
    params(("post_id" = String, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Updated likes", body = [LikeResponse]),
        (status = 400, description = "Post not found or not liked", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["engagement"],
    operation_id = "dislikePost"
)]
#[put("/posts/{post_id}/dislike")]
pub async fn dislike_post(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<LikeResponse>>> {
    let likes = state
        .engagement
        .remove_like(like_request(&path, user)?)
        .await?;
    Ok(web::Json(likes_body(&likes)))
}

/// Comment on a post.
#[utoipa::path(
    put,
    path = "/api/v1/posts/{post_id}/comments",
    params(("post_id" = String, Path, description = "Post identifier")),
    request_body = TextRequest,
    responses(
        (status = 200, description = "Updated comments", body = [CommentResponse]),
        (status = 400, description = "Text missing or post not found", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["engagement"],
    operation_id = "addComment"
)]
#[put("/posts/{post_id}/comments")]
pub async fn add_comment(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<TextRequest>,
) -> ApiResult<web::Json<Vec<CommentResponse>>> {
    let text = require_text(payload.into_inner().text)?;
    let post_id = parse_post_id(&path)?;
    let comments = state
        .engagement
        .add_comment(AddCommentRequest {
            post_id,
            user_id: user.into_inner(),
            text,
        })
        .await?;
    Ok(web::Json(comments_body(&comments)))
}

/// Delete one of your own comments.
#[utoipa::path(
    delete,
    path = "/api/v1/posts/{post_id}/comments/{comment_id}",
    params(
        ("post_id" = String, Path, description = "Post identifier"),
        ("comment_id" = String, Path, description = "Comment identifier")
    ),
    responses(
        (status = 200, description = "Updated comments", body = [CommentResponse]),
        (status = 400, description = "Post or comment not found", body = ErrorSchema),
        (status = 401, description = "Not the comment's author", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["engagement"],
    operation_id = "deleteComment"
)]
#[delete("/posts/{post_id}/comments/{comment_id}")]
pub async fn delete_comment(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<(String, String)>,
) -> ApiResult<web::Json<Vec<CommentResponse>>> {
    let (raw_post_id, raw_comment_id) = path.into_inner();
    let request = RemoveCommentRequest {
        post_id: parse_post_id(&raw_post_id)?,
        comment_id: parse_comment_id(&raw_comment_id)?,
        user_id: user.into_inner(),
    };
    let comments = state.engagement.remove_comment(request).await?;
    Ok(web::Json(comments_body(&comments)))
}

#[cfg(test)]
#[path = "engagement_tests.rs"]
mod tests;
