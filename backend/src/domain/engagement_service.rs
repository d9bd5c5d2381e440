//! Engagement manager: likes, dislikes and comments on posts.
//!
//! Every operation is one read-modify-persist step: load the post, apply the
//! rule-checked mutation on the aggregate, then save it once with the
//! revision it was loaded at. A concurrent writer that saved first makes the
//! save fail with a revision conflict instead of silently losing an update.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::debug;

use crate::domain::ports::{
    AddCommentRequest, EngagementCommand, LikeRequest, PostRepository, RemoveCommentRequest,
    UserDirectory,
};
use crate::domain::post_service_support::{
    load_post, map_engagement_error, map_post_repository_error, resolve_author,
};
use crate::domain::{Comment, Error, Like, Post};

/// Engagement service implementing [`EngagementCommand`].
#[derive(Clone)]
pub struct EngagementService<R, U> {
    posts: Arc<R>,
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<R, U> EngagementService<R, U> {
    /// Create a new service.
    ///
    /// # Examples
    /// ```
    /// # use std::sync::Arc;
    /// # use mockable::DefaultClock;
    /// use postboard::domain::EngagementService;
    /// use postboard::domain::ports::{FixturePostRepository, FixtureUserDirectory};
    ///
    /// let _service = EngagementService::new(
    ///     Arc::new(FixturePostRepository),
    ///     Arc::new(FixtureUserDirectory),
    ///     Arc::new(DefaultClock),
    /// );
    /// ```
    pub fn new(posts: Arc<R>, users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self {
            posts,
            users,
            clock,
        }
    }
}

impl<R, U> EngagementService<R, U>
where
    R: PostRepository,
    U: UserDirectory,
{
    async fn persist(&self, post: &mut Post) -> Result<(), Error> {
        let expected = post.next_revision();
        self.posts
            .save(post, Some(expected))
            .await
            .map_err(map_post_repository_error)
    }
}

#[async_trait]
impl<R, U> EngagementCommand for EngagementService<R, U>
where
    R: PostRepository,
    U: UserDirectory,
{
    async fn add_like(&self, request: LikeRequest) -> Result<Vec<Like>, Error> {
        let LikeRequest { post_id, user_id } = request;
        let mut post = load_post(self.posts.as_ref(), &post_id).await?;
        post.add_like(user_id.clone()).map_err(|err| {
            debug!(%post_id, %user_id, "duplicate like rejected");
            map_engagement_error(err)
        })?;
        self.persist(&mut post).await?;
        debug!(%post_id, %user_id, likes = post.likes().len(), "post liked");
        Ok(post.likes().to_vec())
    }

    async fn remove_like(&self, request: LikeRequest) -> Result<Vec<Like>, Error> {
        let LikeRequest { post_id, user_id } = request;
        let mut post = load_post(self.posts.as_ref(), &post_id).await?;
        post.remove_like(&user_id).map_err(|err| {
            debug!(%post_id, %user_id, "unlike without like rejected");
            map_engagement_error(err)
        })?;
        self.persist(&mut post).await?;
        debug!(%post_id, %user_id, likes = post.likes().len(), "post unliked");
        Ok(post.likes().to_vec())
    }

    async fn add_comment(&self, request: AddCommentRequest) -> Result<Vec<Comment>, Error> {
        let AddCommentRequest {
            post_id,
            user_id,
            text,
        } = request;
        let mut post = load_post(self.posts.as_ref(), &post_id).await?;
        let author = resolve_author(self.users.as_ref(), &user_id).await?;
        let comment = Comment::new(user_id, &author, text, self.clock.utc());
        let comment_id = comment.id;
        post.add_comment(comment);
        self.persist(&mut post).await?;
        debug!(%post_id, %comment_id, "comment added");
        Ok(post.comments().to_vec())
    }

    async fn remove_comment(&self, request: RemoveCommentRequest) -> Result<Vec<Comment>, Error> {
        let RemoveCommentRequest {
            post_id,
            comment_id,
            user_id,
        } = request;
        let mut post = load_post(self.posts.as_ref(), &post_id).await?;
        post.remove_comment(&comment_id, &user_id).map_err(|err| {
            debug!(%post_id, %comment_id, %user_id, error = %err, "comment removal rejected");
            map_engagement_error(err)
        })?;
        self.persist(&mut post).await?;
        debug!(%post_id, %comment_id, "comment removed");
        Ok(post.comments().to_vec())
    }
}

#[cfg(test)]
#[path = "engagement_service_tests.rs"]
mod engagement_service_tests;
