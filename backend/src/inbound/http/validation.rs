//! Shared validation helpers for inbound HTTP adapters.
//!
//! Malformed identifiers are reported the same way as unknown ones: the
//! store is never asked about them.

use serde_json::json;

use crate::domain::{CommentId, EngagementError, Error, POST_NOT_FOUND, PostId, PostText};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidUuid,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidUuid => "invalid_uuid",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

fn details(field: FieldName, code: ErrorCode) -> serde_json::Value {
    json!({
        "field": field.as_str(),
        "code": code.as_str(),
    })
}

/// Parse the `post_id` path segment.
pub(crate) fn parse_post_id(raw: &str) -> Result<PostId, Error> {
    raw.parse().map_err(|_| {
        Error::not_found(POST_NOT_FOUND)
            .with_details(details(FieldName::new("postId"), ErrorCode::InvalidUuid))
    })
}

/// Parse the `comment_id` path segment.
pub(crate) fn parse_comment_id(raw: &str) -> Result<CommentId, Error> {
    raw.parse().map_err(|_| {
        Error::not_found(EngagementError::CommentNotFound.to_string())
            .with_details(details(FieldName::new("commentId"), ErrorCode::InvalidUuid))
    })
}

/// Require a non-blank `text` body field.
pub(crate) fn require_text(text: Option<String>) -> Result<PostText, Error> {
    let field = FieldName::new("text");
    let text = text.unwrap_or_default();
    PostText::new(text).map_err(|err| {
        Error::invalid_request(err.to_string()).with_details(details(field, ErrorCode::MissingField))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain;
    use rstest::rstest;

    #[rstest]
    #[case("not-a-uuid")]
    #[case("")]
    #[case("5f4dcc3b5aa765d61d8327de")]
    fn malformed_post_ids_read_as_missing_posts(#[case] raw: &str) {
        let error = parse_post_id(raw).expect_err("malformed id");
        assert_eq!(error.code(), domain::ErrorCode::NotFound);
        assert_eq!(error.message(), "Post not found");
        assert_eq!(
            error.details().and_then(|d| d.get("code")),
            Some(&json!("invalid_uuid"))
        );
    }

    #[rstest]
    fn malformed_comment_ids_read_as_missing_comments() {
        let error = parse_comment_id("nope").expect_err("malformed id");
        assert_eq!(error.code(), domain::ErrorCode::NotFound);
        assert_eq!(error.message(), "Comment not found.");
    }

    #[rstest]
    fn well_formed_ids_parse() {
        let id = PostId::random();
        assert_eq!(parse_post_id(&id.to_string()).expect("valid id"), id);
    }

    #[rstest]
    #[case(None)]
    #[case(Some(String::new()))]
    #[case(Some("   ".to_owned()))]
    fn blank_text_is_rejected(#[case] text: Option<String>) {
        let error = require_text(text).expect_err("blank text");
        assert_eq!(error.code(), domain::ErrorCode::InvalidRequest);
        assert_eq!(error.message(), "Text is required.");
        assert_eq!(
            error.details().and_then(|d| d.get("field")),
            Some(&json!("text"))
        );
    }

    #[rstest]
    fn text_is_kept_verbatim() {
        let text = require_text(Some("hello".to_owned())).expect("valid text");
        assert_eq!(text.as_str(), "hello");
    }
}
