//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports ([`PostsCommand`], [`PostsQuery`], [`EngagementCommand`])
//! are what inbound adapters call. Driven ports ([`PostRepository`],
//! [`UserDirectory`], [`AccessTokenVerifier`]) are what outbound adapters
//! implement.

mod macros;
pub(crate) use macros::define_port_error;

mod access_token_verifier;
mod engagement_command;
mod post_repository;
mod posts_command;
mod posts_query;
mod user_directory;

#[cfg(test)]
pub use access_token_verifier::MockAccessTokenVerifier;
pub use access_token_verifier::{
    AccessTokenVerifier, FixtureAccessTokenVerifier, TokenVerificationError,
};
#[cfg(test)]
pub use engagement_command::MockEngagementCommand;
pub use engagement_command::{
    AddCommentRequest, EngagementCommand, LikeRequest, RemoveCommentRequest,
};
#[cfg(test)]
pub use post_repository::MockPostRepository;
pub use post_repository::{FixturePostRepository, PostRepository, PostRepositoryError};
#[cfg(test)]
pub use posts_command::MockPostsCommand;
pub use posts_command::{CreatePostRequest, DeletePostRequest, DeletePostResponse, PostsCommand};
#[cfg(test)]
pub use posts_query::MockPostsQuery;
pub use posts_query::PostsQuery;
#[cfg(test)]
pub use user_directory::MockUserDirectory;
pub use user_directory::{
    FIXTURE_AUTHOR_NAME, FixtureUserDirectory, UserDirectory, UserDirectoryError,
};
