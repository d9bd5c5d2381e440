//! Port resolving users to the public profile stamped on their content.

use async_trait::async_trait;

use crate::domain::{AuthorProfile, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user directory adapters.
    pub enum UserDirectoryError {
        /// Directory connection could not be established.
        Connection { message: String } =>
            "user directory connection failed: {message}",
        /// Lookup failed during execution.
        Query { message: String } =>
            "user directory query failed: {message}",
    }
}

/// Read-only lookup of author profiles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Resolve the display name and avatar for `user_id`.
    ///
    /// Returns `None` when the user is unknown.
    async fn find_profile(
        &self,
        user_id: &UserId,
    ) -> Result<Option<AuthorProfile>, UserDirectoryError>;
}

/// Fixture directory that knows every user as "Fixture User".
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserDirectory;

/// Name reported by [`FixtureUserDirectory`].
pub const FIXTURE_AUTHOR_NAME: &str = "Fixture User";

#[async_trait]
impl UserDirectory for FixtureUserDirectory {
    async fn find_profile(
        &self,
        _user_id: &UserId,
    ) -> Result<Option<AuthorProfile>, UserDirectoryError> {
        AuthorProfile::new(FIXTURE_AUTHOR_NAME, "")
            .map(Some)
            .map_err(|err| UserDirectoryError::query(err.to_string()))
    }
}
