//! Database layer for persistent storage of routes.
//!
//! This module provides a SQLite-based storage layer for the route
//! inventory, including connection management, schema versioning, and
//! CRUD operations. Most callers go through
//! [`SqliteRouteStore`](crate::store::SqliteRouteStore) instead of using
//! [`Database`] directly.
//!
//! # Examples
//!
//! ```no_run
//! use busline::database::{Database, DatabaseConfig};
//! use busline::RouteDraft;
//!
//! let mut db = Database::open(DatabaseConfig::new("/tmp/busline.db")).unwrap();
//!
//! let draft = RouteDraft::new("Bucharest", "Brașov", "08:00", "10:30", 40, 50.0).unwrap();
//! let id = db.insert_route(&draft).unwrap();
//!
//! db.update_available_seats(id, 35).unwrap();
//! for route in Database::list_routes(db.connection()).unwrap() {
//!     println!("{route}");
//! }
//! ```

mod config;
mod connection;
pub mod migrations;
mod operations;
mod schema;
mod transaction;

#[cfg(test)]
pub(crate) mod test_util;

pub use config::{default_data_dir, resolve_data_dir, DatabaseConfig, DATABASE_FILE_NAME};
pub use connection::Database;

pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};
