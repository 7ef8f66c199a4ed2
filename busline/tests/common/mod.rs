//! Common test utilities for integration tests.
//!
//! Helpers for building stores with known contents and for recording
//! booking notifications.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use busline::booking::{BookingObserver, ObserverError};
use busline::database::DatabaseConfig;
use busline::store::{MemoryRouteStore, RouteStore, SqliteRouteStore};
use busline::{Route, RouteDraft, RouteId};

/// Creates a path for a database file inside a fresh temporary directory.
///
/// The directory is leaked so it outlives the test's store handles.
#[allow(dead_code)]
pub fn create_test_database_path() -> PathBuf {
    let temp_dir = tempfile::tempdir().unwrap();
    let db_path = temp_dir.path().join("busline.db");
    // Keep the temp_dir alive by forgetting it - this is a test helper
    std::mem::forget(temp_dir);
    db_path
}

/// An initialized SQLite store holding the starter catalog.
#[allow(dead_code)]
pub fn seeded_sqlite_store() -> Arc<SqliteRouteStore> {
    let store = SqliteRouteStore::open(DatabaseConfig::new(create_test_database_path())).unwrap();
    store.initialize().unwrap();
    Arc::new(store)
}

/// An initialized in-memory store holding the starter catalog.
#[allow(dead_code)]
pub fn seeded_memory_store() -> Arc<MemoryRouteStore> {
    let store = MemoryRouteStore::new().unwrap();
    store.initialize().unwrap();
    Arc::new(store)
}

/// A draft arriving at 23:59 with a fixed price of 10.0.
#[allow(dead_code)]
pub fn draft(source: &str, destination: &str, departure: &str, seats: u32) -> RouteDraft {
    RouteDraft::new(source, destination, departure, "23:59", seats, 10.0).unwrap()
}

/// Observer that records every `(route id, seats, available after)` it sees.
#[allow(dead_code)]
pub struct Recorder {
    name: String,
    events: Mutex<Vec<(RouteId, u32, u32)>>,
}

#[allow(dead_code)]
impl Recorder {
    pub fn new(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            events: Mutex::new(Vec::new()),
        })
    }

    pub fn events(&self) -> Vec<(RouteId, u32, u32)> {
        self.events.lock().unwrap().clone()
    }
}

impl BookingObserver for Recorder {
    fn on_booking(&self, route: &Route, seats: u32) -> Result<(), ObserverError> {
        self.events
            .lock()
            .unwrap()
            .push((route.id(), seats, route.available_seats()));
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
