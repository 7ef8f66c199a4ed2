//! In-memory route store.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{Error, Result};
use crate::route::{Route, RouteDraft, RouteId};

use super::{starter_catalog, RouteStore, SeatClaim};

#[derive(Debug, Default)]
struct Table {
    routes: Vec<Route>,
    next_id: i64,
}

impl Table {
    fn insert(&mut self, draft: RouteDraft) -> Result<RouteId> {
        self.next_id += 1;
        let id = RouteId::new(self.next_id);
        self.routes.push(draft.into_route(id)?);
        Ok(id)
    }
}

/// A [`RouteStore`] that lives only as long as the process.
///
/// Ids are assigned from 1 upwards in insertion order, matching what a
/// fresh `SQLite` table would hand out.
///
/// # Examples
///
/// ```
/// use busline::store::{MemoryRouteStore, RouteStore};
/// use busline::RouteDraft;
///
/// let store = MemoryRouteStore::with_routes(vec![
///     RouteDraft::new("Cluj", "Brașov", "15:00", "19:00", 35, 75.0).unwrap(),
/// ])
/// .unwrap();
///
/// let route = &store.get_all().unwrap()[0];
/// assert_eq!(route.id().value(), 1);
/// ```
#[derive(Debug)]
pub struct MemoryRouteStore {
    table: RwLock<Table>,
    seed: Vec<RouteDraft>,
}

impl MemoryRouteStore {
    /// Creates an empty store that seeds the starter catalog on
    /// [`initialize`](RouteStore::initialize).
    ///
    /// # Errors
    ///
    /// Only fails if the starter catalog is invalid.
    pub fn new() -> Result<Self> {
        Ok(Self {
            table: RwLock::new(Table::default()),
            seed: starter_catalog()?,
        })
    }

    /// Creates a store pre-populated with `drafts`.
    ///
    /// # Errors
    ///
    /// Returns a validation error if a draft is invalid.
    pub fn with_routes(drafts: Vec<RouteDraft>) -> Result<Self> {
        let mut table = Table::default();
        for draft in drafts {
            table.insert(draft)?;
        }
        Ok(Self {
            table: RwLock::new(table),
            seed: Vec::new(),
        })
    }

    /// Appends a route, returning its id.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the draft is invalid.
    pub fn insert(&self, draft: RouteDraft) -> Result<RouteId> {
        self.write().insert(draft)
    }

    fn read(&self) -> RwLockReadGuard<'_, Table> {
        self.table.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Table> {
        self.table.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl RouteStore for MemoryRouteStore {
    fn initialize(&self) -> Result<()> {
        let mut table = self.write();
        if !table.routes.is_empty() {
            return Ok(());
        }
        for draft in &self.seed {
            table.insert(draft.clone())?;
        }
        log::info!("seeded {} starter routes into memory", self.seed.len());
        Ok(())
    }

    fn get_all(&self) -> Result<Vec<Route>> {
        Ok(self.read().routes.clone())
    }

    fn get_by_id(&self, id: RouteId) -> Result<Option<Route>> {
        Ok(self.read().routes.iter().find(|r| r.id() == id).cloned())
    }

    fn update_available_seats(&self, id: RouteId, seats: u32) -> Result<()> {
        let mut table = self.write();
        let slot = table
            .routes
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or(Error::RouteNotFound { id })?;
        // Mirror the SQL CHECK constraint: out-of-range values never land.
        *slot = slot.with_available_seats(seats)?;
        Ok(())
    }

    fn take_seats(&self, id: RouteId, seats: u32) -> Result<SeatClaim> {
        let mut table = self.write();
        let slot = table
            .routes
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or(Error::RouteNotFound { id })?;
        let available = slot.available_seats();
        if seats > available {
            return Ok(SeatClaim::Insufficient(slot.clone()));
        }
        *slot = slot.with_available_seats(available - seats)?;
        Ok(SeatClaim::Taken(slot.clone()))
    }
}
