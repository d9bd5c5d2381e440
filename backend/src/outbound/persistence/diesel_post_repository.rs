//! PostgreSQL-backed `PostRepository` implementation using Diesel ORM.
//!
//! Each post is one row; likes and comments live in JSONB columns so a single
//! conditional `UPDATE ... WHERE revision = $expected` persists an entire
//! engagement change or nothing.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{PostRepository, PostRepositoryError};
use crate::domain::{AuthorProfile, Post, PostId, PostText, UserId};
use crate::query_and_disambiguate;
use crate::query_optional;
use crate::query_vec;
use crate::save_with_revision;

use super::diesel_helpers::{
    HasRevision, cast_revision, cast_revision_for_db, map_diesel_error, map_pool_error,
};
use super::engagement_documents::{
    comments_to_json, json_to_comments, json_to_likes, likes_to_json,
};
use super::models::{NewPostRow, PostEngagementUpdate, PostRow};
use super::pool::DbPool;
use super::schema::posts;

/// Diesel-backed implementation of the `PostRepository` port.
#[derive(Clone)]
pub struct DieselPostRepository {
    pool: DbPool,
}

impl DieselPostRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Rebuild a domain post from its row, validating the stored documents.
fn row_to_post(row: PostRow) -> Result<Post, PostRepositoryError> {
    let PostRow {
        id,
        user_id,
        name,
        avatar,
        text: raw_text,
        likes: raw_likes,
        comments: raw_comments,
        revision,
        created_at,
    } = row;
    let corrupt =
        |message: String| PostRepositoryError::query(format!("post {id} is corrupt: {message}"));

    let profile = AuthorProfile::new(name, avatar).map_err(|err| corrupt(err.to_string()))?;
    let text = PostText::new(raw_text).map_err(|err| corrupt(err.to_string()))?;
    let likes = json_to_likes(raw_likes).map_err(corrupt)?;
    let comments = json_to_comments(raw_comments).map_err(corrupt)?;

    let mut post = Post::new(
        PostId::from_uuid(id),
        UserId::from_uuid(user_id),
        &profile,
        text,
        created_at,
    )
    .with_engagement(likes, comments);
    post.revision = cast_revision(revision);
    Ok(post)
}

impl HasRevision for PostRow {
    fn revision(&self) -> u32 {
        cast_revision(self.revision)
    }
}

/// Explain a zero-row update: either the revision moved on or the post is gone.
async fn handle_post_update_failure<C>(
    conn: &mut C,
    post_id: Uuid,
    expected_revision: u32,
) -> PostRepositoryError
where
    C: diesel_async::AsyncConnection<Backend = diesel::pg::Pg> + Send,
{
    query_and_disambiguate!(
        conn,
        posts::table,
        posts::id.eq(post_id),
        PostRow,
        expected_revision,
        &post_id.to_string()
    )
}

#[async_trait]
impl PostRepository for DieselPostRepository {
    async fn find_by_id(&self, post_id: &PostId) -> Result<Option<Post>, PostRepositoryError> {
        query_optional!(
            self,
            posts::table,
            posts::id.eq(post_id.as_uuid()),
            PostRow,
            row_to_post
        )
    }

    async fn list(&self) -> Result<Vec<Post>, PostRepositoryError> {
        query_vec!(
            self,
            posts::table,
            (posts::created_at.desc(), posts::id.desc()),
            PostRow,
            row_to_post
        )
    }

    async fn save(
        &self,
        post: &Post,
        expected_revision: Option<u32>,
    ) -> Result<(), PostRepositoryError> {
        let post_id = *post.id.as_uuid();
        let likes = likes_to_json(post.likes()).map_err(PostRepositoryError::query)?;
        let comments = comments_to_json(post.comments()).map_err(PostRepositoryError::query)?;
        save_with_revision!(
            self,
            expected_revision,
            insert: {
                table: posts::table,
                new_row: NewPostRow {
                    id: post_id,
                    user_id: *post.author_id.as_uuid(),
                    name: &post.author_name,
                    avatar: &post.author_avatar,
                    text: post.text.as_str(),
                    likes,
                    comments,
                    revision: cast_revision_for_db(post.revision),
                    created_at: post.created_at,
                }
            },
            update(expected): {
                table: posts::table,
                filter: posts::id
                    .eq(post_id)
                    .and(posts::revision.eq(cast_revision_for_db(expected))),
                changeset: PostEngagementUpdate {
                    likes,
                    comments,
                    revision: cast_revision_for_db(post.revision),
                },
                on_zero_rows: |conn, expected| handle_post_update_failure(conn, post_id, expected)
            }
        )
    }

    async fn delete(&self, post_id: &PostId) -> Result<bool, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(posts::table.filter(posts::id.eq(post_id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}
