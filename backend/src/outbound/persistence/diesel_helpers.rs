//! Shared helpers and macros for Diesel repository implementations.
//!
//! This module provides common utilities for database access including:
//! - Error mapping from Diesel errors to port errors
//! - Revision casting between database and domain types
//! - Traits and helpers for optimistic concurrency control
//! - Declarative macros for common query patterns

use tracing::{debug, warn};

use crate::domain::ports::{PostRepositoryError, UserDirectoryError};

use super::pool::PoolError;

/// Extract a readable message from a pool error.
pub fn map_pool_error_message(error: PoolError) -> String {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    }
}

/// Map pool errors to post repository errors.
pub fn map_pool_error(error: PoolError) -> PostRepositoryError {
    PostRepositoryError::connection(map_pool_error_message(error))
}

/// Map Diesel errors to post repository errors.
pub fn map_diesel_error(error: diesel::result::Error) -> PostRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => PostRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => PostRepositoryError::query("database query error"),
        DieselError::DatabaseError(kind, info) => match kind {
            DatabaseErrorKind::ForeignKeyViolation => {
                warn!(
                    message = info.message(),
                    constraint_name = ?info.constraint_name(),
                    "post references an unknown author"
                );
                PostRepositoryError::query("post author does not exist")
            }
            DatabaseErrorKind::UniqueViolation => {
                PostRepositoryError::query("post already exists")
            }
            DatabaseErrorKind::ClosedConnection => {
                PostRepositoryError::connection("database connection error")
            }
            _ => PostRepositoryError::query("database error"),
        },
        _ => PostRepositoryError::query("database error"),
    }
}

/// Map Diesel errors raised by author lookups.
pub fn map_user_directory_diesel_error(error: diesel::result::Error) -> UserDirectoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    debug!(%error, "user directory lookup failed");
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserDirectoryError::connection("database connection error")
        }
        _ => UserDirectoryError::query("database error"),
    }
}

/// Cast database revision (i32) to domain revision (u32).
///
/// Database stores revisions as `i32` but domain uses `u32`. Revisions are
/// always non-negative in practice, enforced by database constraints.
#[expect(
    clippy::cast_sign_loss,
    reason = "revision is always non-negative in database"
)]
pub fn cast_revision(revision: i32) -> u32 {
    revision as u32
}

/// Cast domain revision (u32) to database revision (i32).
#[expect(
    clippy::cast_possible_wrap,
    reason = "revision values are always small positive integers"
)]
pub fn cast_revision_for_db(revision: u32) -> i32 {
    revision as i32
}

/// Trait for database rows that have a revision field.
pub trait HasRevision {
    /// Get the revision as a u32.
    fn revision(&self) -> u32;
}

/// Result of an optimistic update operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateResult {
    /// Update succeeded (one or more rows affected).
    Success,
    /// Update affected zero rows (revision mismatch or record not found).
    ZeroRows,
}

/// Check if an update affected any rows.
pub fn execute_optimistic_update(updated_rows: usize) -> UpdateResult {
    if updated_rows == 0 {
        UpdateResult::ZeroRows
    } else {
        UpdateResult::Success
    }
}

/// Disambiguate update failure by checking if it's a revision mismatch or
/// a missing record.
///
/// `current_result` is the re-read of the record the update targeted.
pub fn disambiguate_update_failure<R>(
    current_result: Result<Option<R>, PostRepositoryError>,
    expected_revision: u32,
    post_id: &str,
) -> PostRepositoryError
where
    R: HasRevision,
{
    match current_result {
        Ok(Some(record)) => {
            PostRepositoryError::revision_mismatch(expected_revision, record.revision())
        }
        Ok(None) => PostRepositoryError::post_not_found(post_id),
        Err(e) => e,
    }
}

/// Macro for query methods that return `Option<T>`.
///
/// Acquires a connection, runs the query and converts the row with a
/// fallible `$converter` returning `Result<T, PostRepositoryError>`.
#[macro_export]
macro_rules! query_optional {
    (
        $self:ident,
        $table:expr,
        $filter:expr,
        $row_type:ty,
        $converter:expr
    ) => {{
        use diesel::prelude::*;
        use diesel_async::RunQueryDsl;
        use $crate::outbound::persistence::diesel_helpers::map_diesel_error;
        use $crate::outbound::persistence::diesel_helpers::map_pool_error;

        let mut conn = $self.pool.get().await.map_err(map_pool_error)?;

        let result: Option<$row_type> = $table
            .filter($filter)
            .select(<$row_type>::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        result.map($converter).transpose()
    }};
}

/// Macro for query methods that return every row as `Vec<T>`.
///
/// Acquires a connection, loads the ordered rows and converts each with a
/// fallible `$converter`; the first conversion error wins.
#[macro_export]
macro_rules! query_vec {
    (
        $self:ident,
        $table:expr,
        $order_by:expr,
        $row_type:ty,
        $converter:expr
    ) => {{
        use diesel::prelude::*;
        use diesel_async::RunQueryDsl;
        use $crate::outbound::persistence::diesel_helpers::map_diesel_error;
        use $crate::outbound::persistence::diesel_helpers::map_pool_error;

        let mut conn = $self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<$row_type> = $table
            .select(<$row_type>::as_select())
            .order_by($order_by)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map($converter).collect()
    }};
}

/// Macro for querying from an existing connection and disambiguating update
/// failures into revision mismatch or not-found.
#[macro_export]
macro_rules! query_and_disambiguate {
    (
        $conn:expr,
        $table:expr,
        $filter:expr,
        $row_type:ty,
        $expected_revision:expr,
        $record_id:expr
    ) => {{
        use diesel::prelude::*;
        use diesel_async::RunQueryDsl;
        use $crate::outbound::persistence::diesel_helpers::disambiguate_update_failure;
        use $crate::outbound::persistence::diesel_helpers::map_diesel_error;

        let current_result = $table
            .filter($filter)
            .select(<$row_type>::as_select())
            .first($conn)
            .await
            .optional()
            .map_err(map_diesel_error);

        disambiguate_update_failure(current_result, $expected_revision, $record_id)
    }};
}

/// Macro for save operations with optimistic concurrency control.
///
/// Handles: acquire connection, insert (if None) or update with revision check
/// (if Some), disambiguate zero-row updates.
#[macro_export]
macro_rules! save_with_revision {
    (
        $self:ident,
        $expected_revision:expr,
        insert: { $($insert_body:tt)* },
        update($expected:ident): { $($update_body:tt)* }
    ) => {{
        use $crate::outbound::persistence::diesel_helpers::map_pool_error;

        let mut conn = $self.pool.get().await.map_err(map_pool_error)?;

        match $expected_revision {
            None => {
                save_with_revision!(@insert conn, { $($insert_body)* })
            }
            Some($expected) => {
                save_with_revision!(@update conn, $expected, { $($update_body)* })
            }
        }
    }};

    (@insert $conn:ident, {
        table: $table:expr,
        new_row: $new_row:expr
    }) => {{
        // `#[allow]` because unused_imports does not fire reliably for glob
        // imports expanded into a scope that already has the prelude.
        #[allow(unused_imports, reason = "prelude may be imported at call site")]
        use diesel::prelude::*;
        use diesel_async::RunQueryDsl;
        use $crate::outbound::persistence::diesel_helpers::map_diesel_error;

        diesel::insert_into($table)
            .values(&$new_row)
            .execute(&mut $conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }};

    (@update $conn:ident, $expected:ident, {
        table: $table:expr,
        filter: $filter:expr,
        changeset: $changeset:expr,
        on_zero_rows: $handler:expr
    }) => {{
        #[allow(unused_imports, reason = "prelude may be imported at call site")]
        use diesel::prelude::*;
        use diesel_async::RunQueryDsl;
        use $crate::outbound::persistence::diesel_helpers::map_diesel_error;
        use $crate::outbound::persistence::diesel_helpers::execute_optimistic_update;
        use $crate::outbound::persistence::diesel_helpers::UpdateResult;

        let changeset = $changeset;
        let updated_rows = diesel::update($table)
            .filter($filter)
            .set(&changeset)
            .execute(&mut $conn)
            .await
            .map_err(map_diesel_error)?;

        match execute_optimistic_update(updated_rows) {
            UpdateResult::ZeroRows => Err($handler(&mut $conn, $expected).await),
            UpdateResult::Success => Ok(()),
        }
    }};
}
