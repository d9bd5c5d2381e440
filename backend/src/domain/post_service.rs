//! Post lifecycle service: create, list, fetch and delete.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info};

use crate::domain::ports::{
    CreatePostRequest, DeletePostRequest, DeletePostResponse, PostRepository, PostsCommand,
    PostsQuery, UserDirectory,
};
use crate::domain::post_service_support::{load_post, map_post_repository_error, resolve_author};
use crate::domain::{Error, Post, PostId};

/// Post service implementing [`PostsCommand`] and [`PostsQuery`].
#[derive(Clone)]
pub struct PostService<R, U> {
    posts: Arc<R>,
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<R, U> PostService<R, U> {
    /// Create a new service.
    pub fn new(posts: Arc<R>, users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self {
            posts,
            users,
            clock,
        }
    }
}

#[async_trait]
impl<R, U> PostsCommand for PostService<R, U>
where
    R: PostRepository,
    U: UserDirectory,
{
    async fn create_post(&self, request: CreatePostRequest) -> Result<Post, Error> {
        let CreatePostRequest { user_id, text } = request;
        let author = resolve_author(self.users.as_ref(), &user_id).await?;
        let post = Post::new(PostId::random(), user_id, &author, text, self.clock.utc());

        self.posts
            .save(&post, None)
            .await
            .map_err(map_post_repository_error)?;

        debug!(post_id = %post.id, author_id = %post.author_id, "post created");
        Ok(post)
    }

    async fn delete_post(&self, request: DeletePostRequest) -> Result<DeletePostResponse, Error> {
        let DeletePostRequest { post_id, user_id } = request;
        let deleted = self
            .posts
            .delete(&post_id)
            .await
            .map_err(map_post_repository_error)?;

        if deleted {
            info!(%post_id, %user_id, "post deleted");
        } else {
            debug!(%post_id, %user_id, "delete requested for unknown post");
        }
        Ok(DeletePostResponse { deleted })
    }
}

#[async_trait]
impl<R, U> PostsQuery for PostService<R, U>
where
    R: PostRepository,
    U: UserDirectory,
{
    async fn list_posts(&self) -> Result<Vec<Post>, Error> {
        self.posts.list().await.map_err(map_post_repository_error)
    }

    async fn get_post(&self, post_id: &PostId) -> Result<Post, Error> {
        load_post(self.posts.as_ref(), post_id).await
    }
}

#[cfg(test)]
#[path = "post_service_tests.rs"]
mod post_service_tests;
