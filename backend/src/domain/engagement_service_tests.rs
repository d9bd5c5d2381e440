//! Tests for the engagement service.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use rstest::{fixture, rstest};

use super::EngagementService;
use crate::domain::ports::{
    AddCommentRequest, EngagementCommand, FixtureUserDirectory, LikeRequest, MockPostRepository,
    MockUserDirectory, PostRepositoryError, RemoveCommentRequest,
};
use crate::domain::{
    AuthorProfile, Comment, CommentId, ErrorCode, Post, PostId, PostText, UserId,
};

struct FixtureClock {
    now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.now
    }
}

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53)
        .single()
        .expect("valid timestamp")
}

#[fixture]
fn post() -> Post {
    let profile = AuthorProfile::new("Author", "author.png").expect("valid profile");
    Post::new(
        PostId::random(),
        UserId::random(),
        &profile,
        PostText::new("hello world").expect("valid text"),
        fixed_now(),
    )
}

fn service_with<U>(
    repo: MockPostRepository,
    users: U,
) -> EngagementService<MockPostRepository, U> {
    EngagementService::new(
        Arc::new(repo),
        Arc::new(users),
        Arc::new(FixtureClock { now: fixed_now() }),
    )
}

fn service(repo: MockPostRepository) -> EngagementService<MockPostRepository, FixtureUserDirectory> {
    service_with(repo, FixtureUserDirectory)
}

/// Repository returning `post` on lookup and recording what gets saved.
fn repo_returning(post: Post) -> (MockPostRepository, Arc<Mutex<Vec<(Post, Option<u32>)>>>) {
    let saved = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&saved);
    let mut repo = MockPostRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(post)));
    repo.expect_save().returning(move |post, expected| {
        sink.lock()
            .expect("saved lock")
            .push((post.clone(), expected));
        Ok(())
    });
    (repo, saved)
}

/// Repository returning `post` and refusing any save.
fn repo_without_save(post: Post) -> MockPostRepository {
    let mut repo = MockPostRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(post)));
    repo.expect_save().times(0);
    repo
}

fn like_request(post: &Post, user_id: &UserId) -> LikeRequest {
    LikeRequest {
        post_id: post.id,
        user_id: user_id.clone(),
    }
}

fn comment_on(post: &mut Post, author_id: &UserId) -> CommentId {
    let profile = AuthorProfile::new("Alice", "a.png").expect("valid profile");
    let comment = Comment::new(
        author_id.clone(),
        &profile,
        PostText::new("hello").expect("valid text"),
        fixed_now(),
    );
    let id = comment.id;
    post.add_comment(comment);
    id
}

#[rstest]
#[tokio::test]
async fn add_like_prepends_and_saves_with_loaded_revision(post: Post) {
    let user = UserId::random();
    let request = like_request(&post, &user);
    let (repo, saved) = repo_returning(post);

    let likes = service(repo).add_like(request).await.expect("like ok");

    assert_eq!(likes.len(), 1);
    assert_eq!(likes.first().map(|like| &like.user_id), Some(&user));
    let saved = saved.lock().expect("saved lock");
    let (saved_post, expected) = saved.first().expect("post saved");
    assert_eq!(*expected, Some(1));
    assert_eq!(saved_post.revision, 2);
    assert!(saved_post.is_liked_by(&user));
}

#[rstest]
#[tokio::test]
async fn add_like_twice_conflicts_without_saving(mut post: Post) {
    let user = UserId::random();
    post.add_like(user.clone()).expect("seed like");
    let request = like_request(&post, &user);

    let error = service(repo_without_save(post))
        .add_like(request)
        .await
        .expect_err("duplicate like");

    assert_eq!(error.code(), ErrorCode::Conflict);
    assert_eq!(error.message(), "Post already liked.");
}

#[rstest]
#[tokio::test]
async fn remove_like_without_like_conflicts(post: Post) {
    let request = like_request(&post, &UserId::random());

    let error = service(repo_without_save(post))
        .remove_like(request)
        .await
        .expect_err("no like to remove");

    assert_eq!(error.code(), ErrorCode::Conflict);
    assert_eq!(error.message(), "Post has not been liked yet.");
}

#[rstest]
#[tokio::test]
async fn remove_like_returns_remaining_likes(mut post: Post) {
    let u1 = UserId::random();
    let u2 = UserId::random();
    post.add_like(u1.clone()).expect("u1 likes");
    post.add_like(u2.clone()).expect("u2 likes");
    let request = like_request(&post, &u1);
    let (repo, saved) = repo_returning(post);

    let likes = service(repo).remove_like(request).await.expect("unlike ok");

    let owners: Vec<UserId> = likes.into_iter().map(|like| like.user_id).collect();
    assert_eq!(owners, vec![u2]);
    assert_eq!(saved.lock().expect("saved lock").len(), 1);
}

#[rstest]
#[tokio::test]
async fn engagement_on_missing_post_is_not_found() {
    let mut repo = MockPostRepository::new();
    repo.expect_find_by_id().times(1).return_once(|_| Ok(None));
    repo.expect_save().times(0);

    let error = service(repo)
        .add_like(LikeRequest {
            post_id: PostId::random(),
            user_id: UserId::random(),
        })
        .await
        .expect_err("missing post");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "Post not found");
}

#[rstest]
#[tokio::test]
async fn add_comment_stamps_author_profile_and_clock(post: Post) {
    let user = UserId::random();
    let request = AddCommentRequest {
        post_id: post.id,
        user_id: user.clone(),
        text: PostText::new("nice post").expect("valid text"),
    };
    let (repo, saved) = repo_returning(post);
    let mut users = MockUserDirectory::new();
    users.expect_find_profile().times(1).return_once(|_| {
        Ok(Some(
            AuthorProfile::new("Alice", "a.png").expect("valid profile"),
        ))
    });

    let comments = service_with(repo, users)
        .add_comment(request)
        .await
        .expect("comment ok");

    let comment = comments.first().expect("one comment");
    assert_eq!(comments.len(), 1);
    assert_eq!(comment.author_id, user);
    assert_eq!(comment.author_name, "Alice");
    assert_eq!(comment.author_avatar, "a.png");
    assert_eq!(comment.text.as_str(), "nice post");
    assert_eq!(comment.created_at, fixed_now());
    assert_eq!(saved.lock().expect("saved lock").len(), 1);
}

#[rstest]
#[tokio::test]
async fn add_comment_requires_known_author(post: Post) {
    let request = AddCommentRequest {
        post_id: post.id,
        user_id: UserId::random(),
        text: PostText::new("hi").expect("valid text"),
    };
    let mut users = MockUserDirectory::new();
    users.expect_find_profile().times(1).return_once(|_| Ok(None));

    let error = service_with(repo_without_save(post), users)
        .add_comment(request)
        .await
        .expect_err("unknown author");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "User not found");
}

#[rstest]
#[tokio::test]
async fn remove_comment_by_non_author_is_unauthorized(mut post: Post) {
    let author = UserId::random();
    let comment_id = comment_on(&mut post, &author);
    let request = RemoveCommentRequest {
        post_id: post.id,
        comment_id,
        user_id: UserId::random(),
    };

    let error = service(repo_without_save(post))
        .remove_comment(request)
        .await
        .expect_err("not the author");

    assert_eq!(error.code(), ErrorCode::Unauthorized);
    assert_eq!(error.message(), "User not authorized.");
}

#[rstest]
#[tokio::test]
async fn remove_unknown_comment_is_not_found(post: Post) {
    let request = RemoveCommentRequest {
        post_id: post.id,
        comment_id: CommentId::random(),
        user_id: UserId::random(),
    };

    let error = service(repo_without_save(post))
        .remove_comment(request)
        .await
        .expect_err("unknown comment");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "Comment not found.");
}

#[rstest]
#[tokio::test]
async fn remove_comment_by_author_empties_comments(mut post: Post) {
    let author = UserId::random();
    let comment_id = comment_on(&mut post, &author);
    let request = RemoveCommentRequest {
        post_id: post.id,
        comment_id,
        user_id: author,
    };
    let (repo, _saved) = repo_returning(post);

    let comments = service(repo)
        .remove_comment(request)
        .await
        .expect("author removes comment");

    assert!(comments.is_empty());
}

#[rstest]
#[tokio::test]
async fn stale_save_surfaces_revision_conflict(post: Post) {
    let request = like_request(&post, &UserId::random());
    let mut repo = MockPostRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(post)));
    repo.expect_save()
        .times(1)
        .return_once(|_, _| Err(PostRepositoryError::revision_mismatch(1_u32, 2_u32)));

    let error = service(repo)
        .add_like(request)
        .await
        .expect_err("stale save");

    assert_eq!(error.code(), ErrorCode::Conflict);
    let details = error.details().expect("conflict details");
    assert_eq!(details["code"], "revision_mismatch");
}

#[rstest]
#[tokio::test]
async fn store_failures_are_internal(post: Post) {
    let request = like_request(&post, &UserId::random());
    let mut repo = MockPostRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(post)));
    repo.expect_save()
        .times(1)
        .return_once(|_, _| Err(PostRepositoryError::connection("refused")));

    let error = service(repo)
        .add_like(request)
        .await
        .expect_err("store down");

    assert_eq!(error.code(), ErrorCode::InternalError);
}
