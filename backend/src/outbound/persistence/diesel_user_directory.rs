//! PostgreSQL-backed `UserDirectory` reading author profiles.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserDirectory, UserDirectoryError};
use crate::domain::{AuthorProfile, UserId};

use super::diesel_helpers::{map_pool_error_message, map_user_directory_diesel_error};
use super::models::UserRow;
use super::pool::DbPool;
use super::schema::users;

/// Diesel-backed implementation of the `UserDirectory` port.
#[derive(Clone)]
pub struct DieselUserDirectory {
    pool: DbPool,
}

impl DieselUserDirectory {
    /// Create a new directory with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for DieselUserDirectory {
    async fn find_profile(
        &self,
        user_id: &UserId,
    ) -> Result<Option<AuthorProfile>, UserDirectoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| UserDirectoryError::connection(map_pool_error_message(err)))?;

        let row: Option<UserRow> = users::table
            .filter(users::id.eq(user_id.as_uuid()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_user_directory_diesel_error)?;

        row.map(|user| {
            AuthorProfile::new(user.name, user.avatar).map_err(|err| {
                UserDirectoryError::query(format!("user {user_id} has an invalid profile: {err}"))
            })
        })
        .transpose()
    }
}
