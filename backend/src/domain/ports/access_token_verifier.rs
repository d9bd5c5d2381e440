//! Port resolving bearer tokens to authenticated users.
//!
//! Verification is CPU-only (signature and expiry checks), so the port is
//! synchronous and may be called directly from middleware.

use crate::domain::UserId;

use super::define_port_error;

define_port_error! {
    /// Reasons a bearer token was rejected.
    pub enum TokenVerificationError {
        /// Signature, structure, or algorithm did not check out.
        Invalid { message: String } => "token is invalid: {message}",
        /// The token's expiry has passed.
        Expired => "token has expired",
        /// The subject claim is not a valid user identifier.
        InvalidSubject { subject: String } => "token subject is not a user id: {subject}",
    }
}

/// Verifies bearer tokens and yields the user they were issued to.
#[cfg_attr(test, mockall::automock)]
pub trait AccessTokenVerifier: Send + Sync {
    /// Verify `token` and return its subject.
    fn verify(&self, token: &str) -> Result<UserId, TokenVerificationError>;
}

/// Fixture verifier that treats the token itself as the user id.
///
/// Lets tests authenticate with `Authorization: Bearer <uuid>` without
/// signing anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAccessTokenVerifier;

impl AccessTokenVerifier for FixtureAccessTokenVerifier {
    fn verify(&self, token: &str) -> Result<UserId, TokenVerificationError> {
        UserId::new(token).map_err(|_| TokenVerificationError::invalid_subject(token))
    }
}
