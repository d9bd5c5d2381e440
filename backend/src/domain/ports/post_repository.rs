//! Port for post persistence.
//!
//! The [`PostRepository`] trait stores each post as one record carrying its
//! likes and comments, so a single save persists every engagement change
//! atomically. Adapters support optimistic concurrency via revision checks.

use async_trait::async_trait;

use crate::domain::{Post, PostId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by post repository adapters.
    pub enum PostRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "post repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "post repository query failed: {message}",
        /// Optimistic concurrency check failed.
        RevisionMismatch { expected: u32, actual: u32 } =>
            "revision mismatch: expected {expected}, found {actual}",
        /// The post vanished between load and save.
        PostNotFound { post_id: String } =>
            "post not found: {post_id}",
    }
}

/// Port for post storage and retrieval.
///
/// # Revision Semantics
///
/// - New posts start at revision 1.
/// - Callers bump `post.revision` before saving an update; the repository
///   does not auto-increment.
/// - An update whose `expected_revision` no longer matches the stored
///   revision fails with [`PostRepositoryError::RevisionMismatch`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Fetch a post by identifier.
    ///
    /// Returns `None` if no post exists with the given ID.
    async fn find_by_id(&self, post_id: &PostId) -> Result<Option<Post>, PostRepositoryError>;

    /// Fetch every post, most recently created first.
    async fn list(&self) -> Result<Vec<Post>, PostRepositoryError>;

    /// Save a post with optimistic concurrency check.
    ///
    /// - `expected_revision == None` inserts a new post.
    /// - `expected_revision == Some(n)` updates the stored post only if its
    ///   revision is still `n`.
    async fn save(
        &self,
        post: &Post,
        expected_revision: Option<u32>,
    ) -> Result<(), PostRepositoryError>;

    /// Delete a post by identifier.
    ///
    /// Returns `Ok(true)` if the post was deleted, `Ok(false)` if it didn't
    /// exist.
    async fn delete(&self, post_id: &PostId) -> Result<bool, PostRepositoryError>;
}

/// Fixture implementation for testing without a real store.
///
/// Lookups find nothing and saves are discarded.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePostRepository;

#[async_trait]
impl PostRepository for FixturePostRepository {
    async fn find_by_id(&self, _post_id: &PostId) -> Result<Option<Post>, PostRepositoryError> {
        Ok(None)
    }

    async fn list(&self) -> Result<Vec<Post>, PostRepositoryError> {
        Ok(Vec::new())
    }

    async fn save(
        &self,
        _post: &Post,
        _expected_revision: Option<u32>,
    ) -> Result<(), PostRepositoryError> {
        Ok(())
    }

    async fn delete(&self, _post_id: &PostId) -> Result<bool, PostRepositoryError> {
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[tokio::test]
    async fn fixture_finds_nothing() {
        let repo = FixturePostRepository;
        let found = repo.find_by_id(&PostId::random()).await.expect("lookup");
        assert!(found.is_none());
        assert!(repo.list().await.expect("list").is_empty());
        assert!(!repo.delete(&PostId::random()).await.expect("delete"));
    }

    #[rstest]
    #[case(PostRepositoryError::connection("refused"), "post repository connection failed: refused")]
    #[case(PostRepositoryError::query("syntax"), "post repository query failed: syntax")]
    #[case(PostRepositoryError::revision_mismatch(1_u32, 2_u32), "revision mismatch: expected 1, found 2")]
    #[case(PostRepositoryError::post_not_found("abc"), "post not found: abc")]
    fn errors_render_context(#[case] error: PostRepositoryError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }
}
