//! Postboard: posts with likes and comments behind bearer-token auth.
//!
//! The crate is laid out hexagonally. [`domain`] holds the post aggregate,
//! the services and the ports; [`inbound`] adapts HTTP onto the driving
//! ports; [`outbound`] implements the driven ports for PostgreSQL, memory
//! and JWTs.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
