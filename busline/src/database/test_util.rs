//! Shared test utilities for database unit tests.

use tempfile::tempdir;

use crate::database::{Database, DatabaseConfig};
use crate::RouteDraft;

/// Creates a temporary test database that will be cleaned up automatically.
///
/// # Panics
///
/// Panics if the temporary directory or database cannot be created.
#[must_use]
pub fn create_test_database() -> Database {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");
    let db = Database::open(DatabaseConfig::new(path)).unwrap();

    // Prevent the TempDir from being dropped immediately
    std::mem::forget(dir);

    db
}

/// Creates a draft with a flat price of 10.0.
///
/// # Panics
///
/// Panics if the draft is invalid.
#[must_use]
pub fn draft(
    source: &str,
    destination: &str,
    departure: &str,
    arrival: &str,
    seats: u32,
) -> RouteDraft {
    RouteDraft::new(source, destination, departure, arrival, seats, 10.0).unwrap()
}
