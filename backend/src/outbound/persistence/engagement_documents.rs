//! JSONB encoding of a post's likes and comments.
//!
//! One pair of document structs defines the stored shape in both directions.
//!
//! Decoding goes back through the domain constructors, so a malformed
//! document surfaces as a query error instead of a half-built post.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::domain::{Comment, CommentId, Like, PostText, UserId};

#[derive(Debug, Serialize, Deserialize)]
struct LikeDocument {
    user: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
struct CommentDocument {
    id: Uuid,
    user: Uuid,
    name: String,
    #[serde(default)]
    avatar: String,
    text: String,
    date: DateTime<Utc>,
}

impl From<&Like> for LikeDocument {
    fn from(like: &Like) -> Self {
        Self {
            user: *like.user_id.as_uuid(),
        }
    }
}

impl From<&Comment> for CommentDocument {
    fn from(comment: &Comment) -> Self {
        Self {
            id: *comment.id.as_uuid(),
            user: *comment.author_id.as_uuid(),
            name: comment.author_name.clone(),
            avatar: comment.author_avatar.clone(),
            text: comment.text.as_str().to_owned(),
            date: comment.created_at,
        }
    }
}

pub(super) fn likes_to_json(likes: &[Like]) -> Result<Value, String> {
    let documents: Vec<LikeDocument> = likes.iter().map(LikeDocument::from).collect();
    serde_json::to_value(documents).map_err(|err| format!("encode likes document: {err}"))
}

pub(super) fn comments_to_json(comments: &[Comment]) -> Result<Value, String> {
    let documents: Vec<CommentDocument> = comments.iter().map(CommentDocument::from).collect();
    serde_json::to_value(documents).map_err(|err| format!("encode comments document: {err}"))
}

pub(super) fn json_to_likes(value: Value) -> Result<Vec<Like>, String> {
    let documents: Vec<LikeDocument> =
        serde_json::from_value(value).map_err(|err| format!("malformed likes document: {err}"))?;
    Ok(documents
        .into_iter()
        .map(|doc| Like {
            user_id: UserId::from_uuid(doc.user),
        })
        .collect())
}

pub(super) fn json_to_comments(value: Value) -> Result<Vec<Comment>, String> {
    let documents: Vec<CommentDocument> = serde_json::from_value(value)
        .map_err(|err| format!("malformed comments document: {err}"))?;
    documents
        .into_iter()
        .map(|doc| {
            let text = PostText::new(doc.text)
                .map_err(|err| format!("comment {}: {err}", doc.id))?;
            Ok(Comment {
                id: CommentId::from_uuid(doc.id),
                author_id: UserId::from_uuid(doc.user),
                author_name: doc.name,
                author_avatar: doc.avatar,
                text,
                created_at: doc.date,
            })
        })
        .collect()
}
