//! In-memory `UserDirectory`.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::ports::{UserDirectory, UserDirectoryError};
use crate::domain::{AuthorProfile, UserId};

/// Directory of author profiles registered at runtime.
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    profiles: RwLock<HashMap<UserId, AuthorProfile>>,
}

impl InMemoryUserDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace the profile for `user_id`.
    ///
    /// # Errors
    ///
    /// Fails only if a previous writer panicked while holding the lock.
    pub fn insert(&self, user_id: UserId, profile: AuthorProfile) -> Result<(), UserDirectoryError> {
        self.profiles
            .write()
            .map_err(|_| UserDirectoryError::connection("in-memory user directory is poisoned"))?
            .insert(user_id, profile);
        Ok(())
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_profile(
        &self,
        user_id: &UserId,
    ) -> Result<Option<AuthorProfile>, UserDirectoryError> {
        let profiles = self
            .profiles
            .read()
            .map_err(|_| UserDirectoryError::connection("in-memory user directory is poisoned"))?;
        Ok(profiles.get(user_id).cloned())
    }
}
