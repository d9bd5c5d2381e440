//! Shared helpers for the embedded PostgreSQL integration suites.
//!
//! Suites opt out of the cluster with `SKIP_TEST_CLUSTER=1`; otherwise a
//! cluster that fails to start fails the test so CI breakage is not masked.

use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};
use postboard::outbound::persistence::run_migrations;
use tokio::runtime::Runtime;

/// Render a `postgres` error with its SQLSTATE and message.
///
/// `postgres::Error`'s `Display` collapses database errors to `db error`.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };

    let mut summary = format!(
        "postgres error {:?}: {}",
        db_error.code(),
        db_error.message()
    );
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    summary
}

/// True when `SKIP_TEST_CLUSTER` is "1", "true" or "yes" (any case).
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Skip with a marker when allowed, otherwise fail loudly.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}

/// The process-wide embedded cluster.
pub fn shared_cluster() -> Result<&'static ClusterHandle, String> {
    pg_embedded_setup_unpriv::test_support::shared_cluster_handle()
        .map_err(|err| format!("shared cluster: {err:?}"))
}

/// A fresh database with every migration applied. Dropped with the handle.
pub fn migrated_database(runtime: &Runtime) -> Result<TemporaryDatabase, String> {
    let name = format!("postboard_test_{}", uuid::Uuid::new_v4().simple());
    let database = shared_cluster()?
        .temporary_database(name.as_str())
        .map_err(|err| format!("create temporary database: {err:?}"))?;
    let url = database.url().to_string();
    runtime
        .block_on(run_migrations(&url))
        .map_err(|err| err.to_string())?;
    Ok(database)
}
