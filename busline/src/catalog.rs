//! Read-side queries over the route inventory.
//!
//! Every query reads the store afresh; nothing is cached here, so seat
//! counts reflect the most recent committed reservation.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::route::{Route, RouteId};
use crate::store::RouteStore;

/// Query surface over a [`RouteStore`].
///
/// Orderings are deterministic: city names sort by their UTF-8 bytes,
/// routes by departure time, and ties keep store insertion order.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use busline::store::{MemoryRouteStore, RouteStore};
/// use busline::RouteCatalog;
///
/// let store = Arc::new(MemoryRouteStore::new().unwrap());
/// store.initialize().unwrap();
///
/// let catalog = RouteCatalog::new(store);
/// assert_eq!(catalog.list_destinations("Cluj").unwrap(), ["Brașov", "Bucharest"]);
/// ```
#[derive(Clone)]
pub struct RouteCatalog {
    store: Arc<dyn RouteStore>,
}

impl std::fmt::Debug for RouteCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteCatalog").finish_non_exhaustive()
    }
}

impl RouteCatalog {
    /// Creates a catalog over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn RouteStore>) -> Self {
        Self { store }
    }

    /// Distinct source cities, ascending.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn list_source_cities(&self) -> Result<Vec<String>> {
        let cities: BTreeSet<String> = self
            .store
            .get_all()?
            .into_iter()
            .map(|r| r.source_city().to_owned())
            .collect();
        Ok(cities.into_iter().collect())
    }

    /// Distinct destinations reachable from `source`, ascending.
    ///
    /// An unknown source yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn list_destinations(&self, source: &str) -> Result<Vec<String>> {
        let cities: BTreeSet<String> = self
            .store
            .get_all()?
            .into_iter()
            .filter(|r| r.source_city() == source)
            .map(|r| r.destination_city().to_owned())
            .collect();
        Ok(cities.into_iter().collect())
    }

    /// Routes for one exact city pair, ascending by departure.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn find_routes(&self, source: &str, destination: &str) -> Result<Vec<Route>> {
        let mut routes: Vec<Route> = self
            .store
            .get_all()?
            .into_iter()
            .filter(|r| r.source_city() == source && r.destination_city() == destination)
            .collect();
        // sort_by_key is stable, so equal departures keep insertion order.
        routes.sort_by_key(Route::departure);
        Ok(routes)
    }

    /// Every route, by source city then departure time.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn list_all_sorted(&self) -> Result<Vec<Route>> {
        let mut routes = self.store.get_all()?;
        routes.sort_by(|a, b| {
            a.source_city()
                .cmp(b.source_city())
                .then_with(|| a.departure().cmp(&b.departure()))
        });
        Ok(routes)
    }

    /// Fetches one route by id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RouteNotFound`] if the id does not exist, or a
    /// storage error if the store cannot be read.
    pub fn route(&self, id: RouteId) -> Result<Route> {
        self.store
            .get_by_id(id)?
            .ok_or(Error::RouteNotFound { id })
    }
}
