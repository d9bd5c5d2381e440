//! Request middleware.
//!
//! Purpose: Define middleware components for request lifecycle concerns such as
//! tracing and authentication.

pub mod bearer_auth;
pub mod trace;

pub use bearer_auth::{AuthenticatedUser, BearerAuth};
pub use trace::Trace;
