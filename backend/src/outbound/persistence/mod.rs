//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the post repository and user directory ports
//! backed by PostgreSQL via `diesel-async` and `bb8` connection pooling.
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types. No engagement rules live here.
//! - **Internal models**: row structs (`models.rs`) and the schema
//!   (`schema.rs`) never leave this module.
//! - **Strongly typed errors**: database failures map to port error types.
//!
//! # Example
//!
//! ```ignore
//! use postboard::outbound::persistence::{DbPool, DieselPostRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/posts")).await?;
//! let repo = DieselPostRepository::new(pool);
//! ```

pub(crate) mod diesel_helpers;
mod diesel_post_repository;
mod diesel_user_directory;
mod engagement_documents;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_post_repository::DieselPostRepository;
pub use diesel_user_directory::DieselUserDirectory;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
