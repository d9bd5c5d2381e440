//! Bearer-token adapters.

mod jwt_token_verifier;

pub use jwt_token_verifier::{JwtError, JwtTokenVerifier, MIN_SECRET_LEN};
