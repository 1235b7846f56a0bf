//! Embedded PostgreSQL bootstrap for the Diesel adapter suites.
//!
//! Each call provisions a fresh database on the shared cluster and applies
//! the embedded migrations, so suites never see each other's rows. When the
//! cluster cannot start, `SKIP_TEST_CLUSTER=1` turns the failure into a
//! skip instead of a panic.

use pg_embedded_setup_unpriv::test_support::shared_cluster_handle;
use recipe_api::outbound::persistence::run_pending_migrations;
use tokio::runtime::Runtime;
use uuid::Uuid;

/// Returns true when `SKIP_TEST_CLUSTER` is "1", "true" or "yes".
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Prints a skip marker when skipping is allowed, otherwise fails the test.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}

/// Create a migrated database and return its connection URL.
pub fn provision_database(runtime: &Runtime) -> Result<String, String> {
    let cluster = shared_cluster_handle().map_err(|err| format!("cluster: {err:?}"))?;
    let name = format!("test_{}", Uuid::new_v4().simple());
    cluster
        .create_database(name.as_str())
        .map_err(|err| format!("create database {name}: {err:?}"))?;
    let url = cluster.connection().database_url(&name);
    runtime
        .block_on(run_pending_migrations(&url))
        .map_err(|err| err.to_string())?;
    Ok(url)
}
