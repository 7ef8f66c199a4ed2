//! `SQLite`-backed route store.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::database::{Database, DatabaseConfig};
use crate::error::Result;
use crate::route::{Route, RouteDraft, RouteId};

use super::{starter_catalog, RouteStore, SeatClaim};

/// A [`RouteStore`] over a `SQLite` database file.
///
/// A `rusqlite` connection cannot be shared between threads, so the
/// connection sits behind a mutex; each store call holds it for one
/// statement or transaction. [`take_seats`](RouteStore::take_seats) runs
/// in one IMMEDIATE transaction, so stores opened on the same file by
/// different processes never sell the same seat twice.
///
/// # Examples
///
/// ```no_run
/// use busline::database::DatabaseConfig;
/// use busline::store::{RouteStore, SqliteRouteStore};
///
/// let store = SqliteRouteStore::open(DatabaseConfig::new("/tmp/busline.db")).unwrap();
/// store.initialize().unwrap();
/// assert!(!store.get_all().unwrap().is_empty());
/// ```
#[derive(Debug)]
pub struct SqliteRouteStore {
    db: Mutex<Database>,
    seed: Vec<RouteDraft>,
}

impl SqliteRouteStore {
    /// Opens (and if needed creates) the database, seeding the starter
    /// catalog on [`initialize`](RouteStore::initialize).
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn open(config: DatabaseConfig) -> Result<Self> {
        Self::with_seed(config, starter_catalog()?)
    }

    /// Opens the database with a custom seed catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn with_seed(config: DatabaseConfig, seed: Vec<RouteDraft>) -> Result<Self> {
        let db = Database::open(config)?;
        Ok(Self {
            db: Mutex::new(db),
            seed,
        })
    }

    // A panic while holding the connection leaves no half-applied state:
    // every write is its own transaction, rolled back on drop.
    fn db(&self) -> MutexGuard<'_, Database> {
        self.db.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl RouteStore for SqliteRouteStore {
    fn initialize(&self) -> Result<()> {
        let mut db = self.db();
        crate::database::check_schema_compatibility(db.connection())?;
        let inserted = db.seed_if_empty(&self.seed)?;
        if inserted > 0 {
            log::info!(
                "seeded {inserted} starter routes into {}",
                db.config().path.display()
            );
        } else {
            log::debug!("route store already populated; skipping seed");
        }
        Ok(())
    }

    fn get_all(&self) -> Result<Vec<Route>> {
        Database::list_routes(self.db().connection())
    }

    fn get_by_id(&self, id: RouteId) -> Result<Option<Route>> {
        Database::get_route(self.db().connection(), id)
    }

    fn update_available_seats(&self, id: RouteId, seats: u32) -> Result<()> {
        self.db().update_available_seats(id, seats)
    }

    fn take_seats(&self, id: RouteId, seats: u32) -> Result<SeatClaim> {
        self.db().take_seats(id, seats)
    }
}
