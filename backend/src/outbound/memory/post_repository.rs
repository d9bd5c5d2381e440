//! In-memory `PostRepository` honouring revision checks.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{PostRepository, PostRepositoryError};
use crate::domain::{Post, PostId};

#[derive(Debug, Default)]
struct Store {
    posts: HashMap<PostId, StoredPost>,
    next_sequence: u64,
}

#[derive(Debug)]
struct StoredPost {
    sequence: u64,
    post: Post,
}

/// Mutex-guarded post store.
///
/// Listing orders by creation time, newest first; posts created in the same
/// instant fall back to insertion order.
#[derive(Debug, Default)]
pub struct InMemoryPostRepository {
    store: Mutex<Store>,
}

impl InMemoryPostRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Store>, PostRepositoryError> {
        self.store
            .lock()
            .map_err(|_| PostRepositoryError::connection("in-memory post store is poisoned"))
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_by_id(&self, post_id: &PostId) -> Result<Option<Post>, PostRepositoryError> {
        let store = self.lock()?;
        Ok(store.posts.get(post_id).map(|stored| stored.post.clone()))
    }

    async fn list(&self) -> Result<Vec<Post>, PostRepositoryError> {
        let store = self.lock()?;
        let mut stored: Vec<&StoredPost> = store.posts.values().collect();
        stored.sort_by(|a, b| {
            b.post
                .created_at
                .cmp(&a.post.created_at)
                .then_with(|| b.sequence.cmp(&a.sequence))
        });
        Ok(stored.into_iter().map(|entry| entry.post.clone()).collect())
    }

    async fn save(
        &self,
        post: &Post,
        expected_revision: Option<u32>,
    ) -> Result<(), PostRepositoryError> {
        let mut store = self.lock()?;
        match expected_revision {
            None => {
                if store.posts.contains_key(&post.id) {
                    return Err(PostRepositoryError::query("post already exists"));
                }
                let sequence = store.next_sequence;
                store.next_sequence = sequence.saturating_add(1);
                store.posts.insert(
                    post.id,
                    StoredPost {
                        sequence,
                        post: post.clone(),
                    },
                );
                Ok(())
            }
            Some(expected) => {
                let stored = store
                    .posts
                    .get_mut(&post.id)
                    .ok_or_else(|| PostRepositoryError::post_not_found(post.id.to_string()))?;
                if stored.post.revision != expected {
                    return Err(PostRepositoryError::revision_mismatch(
                        expected,
                        stored.post.revision,
                    ));
                }
                stored.post = post.clone();
                Ok(())
            }
        }
    }

    async fn delete(&self, post_id: &PostId) -> Result<bool, PostRepositoryError> {
        let mut store = self.lock()?;
        Ok(store.posts.remove(post_id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AuthorProfile, PostText, UserId};
    use chrono::{Duration, TimeZone, Utc};
    use rstest::{fixture, rstest};

    fn post_at(offset_secs: i64) -> Post {
        let profile = AuthorProfile::new("Alice", "").expect("valid profile");
        let base = Utc
            .with_ymd_and_hms(2026, 1, 1, 12, 0, 0)
            .single()
            .expect("valid timestamp");
        Post::new(
            PostId::random(),
            UserId::random(),
            &profile,
            PostText::new("hello").expect("valid text"),
            base + Duration::seconds(offset_secs),
        )
    }

    #[fixture]
    fn repo() -> InMemoryPostRepository {
        InMemoryPostRepository::new()
    }

    #[rstest]
    #[tokio::test]
    async fn list_is_newest_first(repo: InMemoryPostRepository) {
        let older = post_at(0);
        let newer = post_at(60);
        repo.save(&older, None).await.expect("insert older");
        repo.save(&newer, None).await.expect("insert newer");

        let ids: Vec<PostId> = repo
            .list()
            .await
            .expect("list")
            .into_iter()
            .map(|post| post.id)
            .collect();

        assert_eq!(ids, vec![newer.id, older.id]);
    }

    #[rstest]
    #[tokio::test]
    async fn same_instant_posts_list_latest_insert_first(repo: InMemoryPostRepository) {
        let first = post_at(0);
        let second = post_at(0);
        repo.save(&first, None).await.expect("insert first");
        repo.save(&second, None).await.expect("insert second");

        let listed = repo.list().await.expect("list");

        assert_eq!(listed.first().map(|post| post.id), Some(second.id));
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_insert_is_rejected(repo: InMemoryPostRepository) {
        let post = post_at(0);
        repo.save(&post, None).await.expect("insert");

        let error = repo.save(&post, None).await.expect_err("duplicate");

        assert!(matches!(error, PostRepositoryError::Query { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn update_with_current_revision_replaces_post(repo: InMemoryPostRepository) {
        let mut post = post_at(0);
        repo.save(&post, None).await.expect("insert");
        post.add_like(UserId::random()).expect("like");
        let expected = post.next_revision();

        repo.save(&post, Some(expected)).await.expect("update");

        let stored = repo.find_by_id(&post.id).await.expect("find").expect("present");
        assert_eq!(stored.revision, 2);
        assert_eq!(stored.likes().len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn stale_update_reports_revision_mismatch(repo: InMemoryPostRepository) {
        let mut post = post_at(0);
        repo.save(&post, None).await.expect("insert");
        let mut rival = post.clone();
        let rival_expected = rival.next_revision();
        repo.save(&rival, Some(rival_expected)).await.expect("rival wins");

        let expected = post.next_revision();
        let error = repo.save(&post, Some(expected)).await.expect_err("stale");

        assert_eq!(error, PostRepositoryError::revision_mismatch(1_u32, 2_u32));
    }

    #[rstest]
    #[tokio::test]
    async fn update_of_deleted_post_is_not_found(repo: InMemoryPostRepository) {
        let mut post = post_at(0);
        repo.save(&post, None).await.expect("insert");
        assert!(repo.delete(&post.id).await.expect("delete"));

        let expected = post.next_revision();
        let error = repo.save(&post, Some(expected)).await.expect_err("gone");

        assert_eq!(error, PostRepositoryError::post_not_found(post.id.to_string()));
        assert!(!repo.delete(&post.id).await.expect("second delete"));
    }
}
