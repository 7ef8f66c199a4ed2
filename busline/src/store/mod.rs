//! The persistence facade for the route inventory.
//!
//! [`RouteStore`] is the seam between the catalog/booking logic and the
//! durable medium. Two backends ship with the crate:
//!
//! - [`SqliteRouteStore`]: a `SQLite` file, the production backend
//! - [`MemoryRouteStore`]: a process-local table, for tests and demos
//!
//! Store failures surface as [`Error`](crate::Error) values.

mod memory;
mod seed;
mod sqlite;

pub use memory::MemoryRouteStore;
pub use seed::{starter_catalog, STARTER_ROUTES};
pub use sqlite::SqliteRouteStore;

use crate::error::{Error, Result};
use crate::route::{Route, RouteId};

/// What [`RouteStore::take_seats`] found.
#[derive(Debug, Clone, PartialEq)]
pub enum SeatClaim {
    /// The seats were taken; the route as written.
    Taken(Route),
    /// Too few seats; the route as read, left unchanged.
    Insufficient(Route),
}

impl SeatClaim {
    /// The route carried by either variant.
    #[must_use]
    pub const fn route(&self) -> &Route {
        match self {
            Self::Taken(route) | Self::Insufficient(route) => route,
        }
    }
}

/// Durable mapping from route id to route record.
///
/// Implementations must be safe to share between threads. Bookings go
/// through [`take_seats`], which backends shared between processes must
/// override with a single atomic read-check-write.
///
/// [`take_seats`]: RouteStore::take_seats
pub trait RouteStore: Send + Sync {
    /// Creates the backing storage if absent and seeds the starter catalog
    /// into an empty store.
    ///
    /// Idempotent: an already-populated store is left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be created or written.
    fn initialize(&self) -> Result<()>;

    /// Returns every route, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be read.
    fn get_all(&self) -> Result<Vec<Route>>;

    /// Looks up one route.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be read. A missing route is
    /// `Ok(None)`, not an error.
    fn get_by_id(&self, id: RouteId) -> Result<Option<Route>>;

    /// Unconditionally overwrites the available seat count of a route.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RouteNotFound`](crate::Error::RouteNotFound) if the
    /// id does not exist, or a storage error if the write fails.
    fn update_available_seats(&self, id: RouteId, seats: u32) -> Result<()>;

    /// Takes `seats` seats from route `id` if that many are available.
    ///
    /// The default reads with [`get_by_id`](RouteStore::get_by_id) and
    /// writes with
    /// [`update_available_seats`](RouteStore::update_available_seats). It is
    /// only atomic when the caller serializes access to the route, which
    /// the booking engine does within one process.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RouteNotFound`] if the id does not exist, or a
    /// storage error if the read or the write fails. Nothing is written on
    /// error or on [`SeatClaim::Insufficient`].
    fn take_seats(&self, id: RouteId, seats: u32) -> Result<SeatClaim> {
        let current = self.get_by_id(id)?.ok_or(Error::RouteNotFound { id })?;
        let available = current.available_seats();
        if seats > available {
            return Ok(SeatClaim::Insufficient(current));
        }

        let updated = current.with_available_seats(available - seats)?;
        self.update_available_seats(id, updated.available_seats())?;
        Ok(SeatClaim::Taken(updated))
    }
}
