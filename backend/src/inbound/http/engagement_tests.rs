//! Handler tests for likes and comments.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test;
use rstest::{fixture, rstest};
use serde_json::json;

use super::*;
use crate::domain::ports::MockEngagementCommand;
use crate::domain::{
    AuthorProfile, Comment, CommentId, Error, ErrorCode, Like, PostId, PostText, UserId,
};
use crate::inbound::http::test_utils::{TestPorts, as_user, call_error, call_json, init_api};

#[fixture]
fn user() -> UserId {
    UserId::random()
}

fn ports_with(engagement: MockEngagementCommand) -> TestPorts {
    TestPorts {
        engagement: Arc::new(engagement),
        ..TestPorts::default()
    }
}

#[rstest]
#[actix_web::test]
async fn like_returns_updated_likes(user: UserId) {
    let post_id = PostId::random();
    let other = UserId::random();
    let likes = vec![
        Like {
            user_id: user.clone(),
        },
        Like {
            user_id: other.clone(),
        },
    ];
    let expected_user = user.clone();
    let mut engagement = MockEngagementCommand::new();
    engagement
        .expect_add_like()
        .withf(move |req| req.post_id == post_id && req.user_id == expected_user)
        .times(1)
        .return_once(move |_| Ok(likes));
    let app = init_api(ports_with(engagement)).await;

    let uri = format!("/api/v1/posts/{post_id}/like");
    let body: Vec<LikeResponse> =
        call_json(&app, as_user(test::TestRequest::put().uri(&uri), &user), StatusCode::OK).await;

    let owners: Vec<String> = body.into_iter().map(|like| like.user).collect();
    assert_eq!(owners, vec![user.to_string(), other.to_string()]);
}

#[rstest]
#[actix_web::test]
async fn duplicate_like_is_a_bad_request(user: UserId) {
    let mut engagement = MockEngagementCommand::new();
    engagement
        .expect_add_like()
        .times(1)
        .return_once(|_| Err(Error::conflict("Post already liked.")));
    let app = init_api(ports_with(engagement)).await;

    let uri = format!("/api/v1/posts/{}/like", PostId::random());
    let error = call_error(&app, as_user(test::TestRequest::put().uri(&uri), &user)).await;

    assert_eq!(error.code(), ErrorCode::Conflict);
    assert_eq!(error.message(), "Post already liked.");
}

#[rstest]
#[actix_web::test]
async fn dislike_returns_remaining_likes(user: UserId) {
    let mut engagement = MockEngagementCommand::new();
    engagement
        .expect_remove_like()
        .times(1)
        .return_once(|_| Ok(Vec::new()));
    let app = init_api(ports_with(engagement)).await;

    let uri = format!("/api/v1/posts/{}/dislike", PostId::random());
    let body: Vec<LikeResponse> =
        call_json(&app, as_user(test::TestRequest::put().uri(&uri), &user), StatusCode::OK).await;

    assert!(body.is_empty());
}

#[rstest]
#[actix_web::test]
async fn comment_passes_validated_text(user: UserId) {
    let profile = AuthorProfile::new("Alice", "a.png").expect("valid profile");
    let comment = Comment::new(
        user.clone(),
        &profile,
        PostText::new("nice").expect("valid text"),
        chrono::Utc::now(),
    );
    let comment_id = comment.id;
    let mut engagement = MockEngagementCommand::new();
    engagement
        .expect_add_comment()
        .withf(|req| req.text.as_str() == "nice")
        .times(1)
        .return_once(move |_| Ok(vec![comment]));
    let app = init_api(ports_with(engagement)).await;

    let uri = format!("/api/v1/posts/{}/comments", PostId::random());
    let req = as_user(test::TestRequest::put().uri(&uri), &user).set_json(json!({ "text": "nice" }));
    let body: Vec<CommentResponse> = call_json(&app, req, StatusCode::OK).await;

    let first = body.first().expect("one comment");
    assert_eq!(first.id, comment_id.to_string());
    assert_eq!(first.user, user.to_string());
    assert_eq!(first.name, "Alice");
    assert_eq!(first.avatar, "a.png");
    assert_eq!(first.text, "nice");
}

#[rstest]
#[actix_web::test]
async fn empty_comment_is_rejected_before_the_service(user: UserId) {
    let mut engagement = MockEngagementCommand::new();
    engagement.expect_add_comment().times(0);
    let app = init_api(ports_with(engagement)).await;

    let uri = format!("/api/v1/posts/{}/comments", PostId::random());
    let req = as_user(test::TestRequest::put().uri(&uri), &user).set_json(json!({ "text": "" }));
    let error = call_error(&app, req).await;

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.message(), "Text is required.");
}

#[rstest]
#[actix_web::test]
async fn deleting_someone_elses_comment_is_unauthorized(user: UserId) {
    let post_id = PostId::random();
    let comment_id = CommentId::random();
    let mut engagement = MockEngagementCommand::new();
    engagement
        .expect_remove_comment()
        .withf(move |req| req.post_id == post_id && req.comment_id == comment_id)
        .times(1)
        .return_once(|_| Err(Error::unauthorized("User not authorized.")));
    let app = init_api(ports_with(engagement)).await;

    let uri = format!("/api/v1/posts/{post_id}/comments/{comment_id}");
    let req = as_user(test::TestRequest::delete().uri(&uri), &user);
    let error: Error = call_json(&app, req, StatusCode::UNAUTHORIZED).await;

    assert_eq!(error.message(), "User not authorized.");
}

#[rstest]
#[actix_web::test]
async fn malformed_comment_id_is_comment_not_found(user: UserId) {
    let mut engagement = MockEngagementCommand::new();
    engagement.expect_remove_comment().times(0);
    let app = init_api(ports_with(engagement)).await;

    let uri = format!("/api/v1/posts/{}/comments/abc", PostId::random());
    let error = call_error(&app, as_user(test::TestRequest::delete().uri(&uri), &user)).await;

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "Comment not found.");
}
