//! Post lifecycle HTTP handlers.
//!
//! ```text
//! POST   /api/v1/posts {"text":"Hello"}
//! GET    /api/v1/posts
//! GET    /api/v1/posts/{post_id}
//! DELETE /api/v1/posts/{post_id}
//! ```

use actix_web::{delete, get, post, web};

use crate::domain::ports::{CreatePostRequest, DeletePostRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::posts_dto::{MessageResponse, PostResponse, TextRequest};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_post_id, require_text};
use crate::middleware::AuthenticatedUser;

/// Acknowledgement sent for every delete request.
pub const POST_DELETED: &str = "Post deleted successfully.";

/// Publish a post as the authenticated user.
#[utoipa::path(
    post,
    path = "/api/v1/posts",
    request_body = TextRequest,
    responses(
        (status = 200, description = "Created post", body = PostResponse),
        (status = 400, description = "Text missing or author unknown", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "createPost"
)]
#[post("/posts")]
pub async fn create_post(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<TextRequest>,
) -> ApiResult<web::Json<PostResponse>> {
    let text = require_text(payload.into_inner().text)?;
    let post = state
        .posts
        .create_post(CreatePostRequest {
            user_id: user.into_inner(),
            text,
        })
        .await?;
    Ok(web::Json(PostResponse::from(&post)))
}

/// List every post, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/posts",
    responses(
        (status = 200, description = "All posts", body = [PostResponse]),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "listPosts"
)]
#[get("/posts")]
pub async fn list_posts(
    state: web::Data<HttpState>,
    _user: AuthenticatedUser,
) -> ApiResult<web::Json<Vec<PostResponse>>> {
    let posts = state.posts_query.list_posts().await?;
    Ok(web::Json(posts.iter().map(PostResponse::from).collect()))
}

/// Fetch one post.
#[utoipa::path(
    get,
    path = "/api/v1/posts/{post_id}",
    params(("post_id" = String, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "The post", body = PostResponse),
        (status = 400, description = "Post not found", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "getPost"
)]
#[get("/posts/{post_id}")]
pub async fn get_post(
    state: web::Data<HttpState>,
    _user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<PostResponse>> {
    let post_id = parse_post_id(&path)?;
    let post = state.posts_query.get_post(&post_id).await?;
    Ok(web::Json(PostResponse::from(&post)))
}

/// Delete a post.
///
/// Answers with the same acknowledgement whether or not the post existed.
#[utoipa::path(
    delete,
    path = "/api/v1/posts/{post_id}",
    params(("post_id" = String, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Deletion acknowledged", body = MessageResponse),
        (status = 400, description = "Malformed post identifier", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "deletePost"
)]
#[delete("/posts/{post_id}")]
pub async fn delete_post(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let post_id = parse_post_id(&path)?;
    state
        .posts
        .delete_post(DeletePostRequest {
            post_id,
            user_id: user.into_inner(),
        })
        .await?;
    Ok(web::Json(MessageResponse {
        msg: POST_DELETED.to_owned(),
    }))
}

#[cfg(test)]
#[path = "posts_tests.rs"]
mod tests;
