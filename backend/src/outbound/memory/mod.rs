//! Process-local adapters for running without PostgreSQL.
//!
//! State lives behind a mutex and disappears with the process. The server
//! falls back to these when no database URL is configured; integration tests
//! use them to drive the full HTTP stack.

mod post_repository;
mod user_directory;

pub use post_repository::InMemoryPostRepository;
pub use user_directory::InMemoryUserDirectory;
