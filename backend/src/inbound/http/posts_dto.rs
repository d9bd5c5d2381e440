//! Wire shapes for the posts API.
//!
//! Field names follow the JSON contract existing clients already consume:
//! `user` for the author id and `date` for the creation timestamp.

use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Comment, Like, Post};

/// Body for creating a post or a comment.
///
/// `text` is optional on the wire so a missing field reports the same
/// validation error as an empty one.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TextRequest {
    #[schema(example = "Hello, world")]
    pub text: Option<String>,
}

/// A like as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LikeResponse {
    #[schema(format = "uuid")]
    pub user: String,
}

impl From<&Like> for LikeResponse {
    fn from(value: &Like) -> Self {
        Self {
            user: value.user_id.to_string(),
        }
    }
}

/// A comment as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    #[schema(format = "uuid")]
    pub id: String,
    #[schema(format = "uuid")]
    pub user: String,
    pub name: String,
    pub avatar: String,
    pub text: String,
    #[schema(format = "date-time")]
    pub date: String,
}

impl From<&Comment> for CommentResponse {
    fn from(value: &Comment) -> Self {
        Self {
            id: value.id.to_string(),
            user: value.author_id.to_string(),
            name: value.author_name.clone(),
            avatar: value.author_avatar.clone(),
            text: value.text.as_str().to_owned(),
            date: value.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// A post with its engagement as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    #[schema(format = "uuid")]
    pub id: String,
    #[schema(format = "uuid")]
    pub user: String,
    pub name: String,
    pub avatar: String,
    pub text: String,
    pub likes: Vec<LikeResponse>,
    pub comments: Vec<CommentResponse>,
    #[schema(format = "date-time")]
    pub date: String,
    /// Optimistic-concurrency revision; bumps on every change.
    pub revision: u32,
}

impl From<&Post> for PostResponse {
    fn from(value: &Post) -> Self {
        Self {
            id: value.id.to_string(),
            user: value.author_id.to_string(),
            name: value.author_name.clone(),
            avatar: value.author_avatar.clone(),
            text: value.text.as_str().to_owned(),
            likes: likes_body(value.likes()),
            comments: comments_body(value.comments()),
            date: value.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            revision: value.revision,
        }
    }
}

/// Plain acknowledgement body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Post deleted successfully.")]
    pub msg: String,
}

pub(crate) fn likes_body(likes: &[Like]) -> Vec<LikeResponse> {
    likes.iter().map(LikeResponse::from).collect()
}

pub(crate) fn comments_body(comments: &[Comment]) -> Vec<CommentResponse> {
    comments.iter().map(CommentResponse::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AuthorProfile, PostId, PostText, UserId};
    use chrono::{TimeZone, Utc};
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn post_serialises_with_client_field_names() {
        let author = UserId::random();
        let profile = AuthorProfile::new("Alice", "a.png").expect("valid profile");
        let created = Utc
            .with_ymd_and_hms(2026, 1, 2, 3, 4, 5)
            .single()
            .expect("valid timestamp");
        let mut post = Post::new(
            PostId::random(),
            author.clone(),
            &profile,
            PostText::new("hello").expect("valid text"),
            created,
        );
        post.add_like(author.clone()).expect("first like");

        let value = serde_json::to_value(PostResponse::from(&post)).expect("serialises");

        assert_eq!(value["user"], json!(author.to_string()));
        assert_eq!(value["name"], json!("Alice"));
        assert_eq!(value["avatar"], json!("a.png"));
        assert_eq!(value["date"], json!("2026-01-02T03:04:05.000Z"));
        assert_eq!(value["likes"], json!([{ "user": author.to_string() }]));
        assert_eq!(value["comments"], json!([]));
        assert_eq!(value["revision"], json!(1));
    }

    #[rstest]
    fn text_request_tolerates_missing_text() {
        let body: TextRequest = serde_json::from_str("{}").expect("decodes");
        assert!(body.text.is_none());
    }
}
