//! HS256 JWT implementation of [`AccessTokenVerifier`].
//!
//! Tokens carry the user id in `sub` and an `exp` expiry. Nothing else is
//! read, so tokens minted by other services with extra claims still verify.

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::domain::UserId;
use crate::domain::ports::{AccessTokenVerifier, TokenVerificationError};

/// Shortest accepted HS256 secret, in bytes.
pub const MIN_SECRET_LEN: usize = 32;

/// Errors raised while configuring the verifier or minting tokens.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JwtError {
    /// The configured secret is too short to be safe.
    #[error("token secret must be at least {MIN_SECRET_LEN} bytes, got {actual}")]
    WeakSecret { actual: usize },
    /// Signing failed.
    #[error("failed to sign token: {message}")]
    Signing { message: String },
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: i64,
}

/// Verifies and issues HS256 bearer tokens.
pub struct JwtTokenVerifier {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl JwtTokenVerifier {
    /// Build a verifier from a shared secret.
    ///
    /// # Errors
    ///
    /// [`JwtError::WeakSecret`] when the secret is shorter than
    /// [`MIN_SECRET_LEN`].
    ///
    /// # Examples
    /// ```
    /// use std::time::Duration;
    /// use postboard::domain::UserId;
    /// use postboard::domain::ports::AccessTokenVerifier;
    /// use postboard::outbound::auth::JwtTokenVerifier;
    /// use zeroize::Zeroizing;
    ///
    /// let secret = Zeroizing::new(vec![7_u8; 32]);
    /// let verifier = JwtTokenVerifier::new(&secret).expect("strong secret");
    /// let user = UserId::random();
    /// let token = verifier.issue(&user, Duration::from_secs(60)).expect("signed");
    /// assert_eq!(verifier.verify(&token), Ok(user));
    /// ```
    pub fn new(secret: &Zeroizing<Vec<u8>>) -> Result<Self, JwtError> {
        if secret.len() < MIN_SECRET_LEN {
            return Err(JwtError::WeakSecret {
                actual: secret.len(),
            });
        }
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub"]);
        validation.leeway = 0;
        Ok(Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        })
    }

    /// Mint a token for `user_id` that expires after `ttl`.
    ///
    /// # Errors
    ///
    /// [`JwtError::Signing`] if encoding fails.
    pub fn issue(&self, user_id: &UserId, ttl: Duration) -> Result<String, JwtError> {
        let ttl_secs = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
        let claims = Claims {
            sub: user_id.to_string(),
            exp: Utc::now().timestamp().saturating_add(ttl_secs),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(|err| {
            JwtError::Signing {
                message: err.to_string(),
            }
        })
    }
}

impl AccessTokenVerifier for JwtTokenVerifier {
    fn verify(&self, token: &str) -> Result<UserId, TokenVerificationError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation).map_err(|err| {
            match err.kind() {
                ErrorKind::ExpiredSignature => TokenVerificationError::expired(),
                _ => TokenVerificationError::invalid(err.to_string()),
            }
        })?;
        let subject = data.claims.sub;
        UserId::new(&subject).map_err(|_| TokenVerificationError::invalid_subject(subject))
    }
}
