//! The reservation engine.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use serde::Serialize;

use crate::catalog::RouteCatalog;
use crate::error::{Error, Result};
use crate::route::{Route, RouteId};
use crate::store::{RouteStore, SeatClaim};

use super::observer::{BookingObserver, NotifyReport, ObserverRegistry, SubscriptionId};

/// A committed reservation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Booking {
    /// The route as it stands after the reservation.
    pub route: Route,
    /// Seats taken by this reservation.
    pub seats: u32,
    /// `seats * price`.
    pub total_price: f64,
    /// What happened when observers were told.
    pub notifications: NotifyReport,
}

impl Booking {
    /// Seats left on the route after this booking.
    #[must_use]
    pub const fn remaining_seats(&self) -> u32 {
        self.route.available_seats()
    }
}

/// Result of [`BookingEngine::reserve`].
///
/// Running out of seats is an expected outcome, not an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ReserveOutcome {
    /// The seats were taken.
    Reserved(Booking),
    /// The route had fewer seats than requested. Nothing changed.
    InsufficientSeats {
        /// Seats asked for.
        requested: u32,
        /// Seats available at the time of the check.
        available: u32,
    },
}

impl ReserveOutcome {
    /// True for [`ReserveOutcome::Reserved`].
    #[must_use]
    pub const fn is_reserved(&self) -> bool {
        matches!(self, Self::Reserved(_))
    }

    /// Seats available on the route once the call returned.
    #[must_use]
    pub const fn available_seats(&self) -> u32 {
        match self {
            Self::Reserved(booking) => booking.remaining_seats(),
            Self::InsufficientSeats { available, .. } => *available,
        }
    }

    /// The booking, if one was made.
    #[must_use]
    pub fn booking(&self) -> Option<&Booking> {
        match self {
            Self::Reserved(booking) => Some(booking),
            Self::InsufficientSeats { .. } => None,
        }
    }
}

/// One mutex per route, created on first use.
#[derive(Debug, Default)]
struct RouteLocks {
    table: Mutex<HashMap<RouteId, Arc<Mutex<()>>>>,
}

impl RouteLocks {
    fn for_route(&self, id: RouteId) -> Arc<Mutex<()>> {
        let mut table = self.table.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(table.entry(id).or_default())
    }

    /// Drops the entry for an id the store does not know, unless another
    /// caller still holds it.
    fn discard(&self, id: RouteId, lock: Arc<Mutex<()>>) {
        let mut table = self.table.lock().unwrap_or_else(PoisonError::into_inner);
        drop(lock);
        if table.get(&id).is_some_and(|entry| Arc::strong_count(entry) == 1) {
            table.remove(&id);
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.table.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

/// Validates and commits seat reservations, then tells observers.
///
/// `reserve` is atomic per route: the read of the current seat count and
/// the write of the new one happen under that route's lock, so two
/// concurrent bookings for the last seats cannot both succeed. Bookings on
/// different routes never contend.
///
/// The engine is `Send + Sync`; share it behind an `Arc` between sessions.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use busline::store::{MemoryRouteStore, RouteStore};
/// use busline::{BookingEngine, ReserveOutcome, RouteId};
///
/// let store = Arc::new(MemoryRouteStore::new().unwrap());
/// store.initialize().unwrap();
/// let engine = BookingEngine::new(store);
///
/// let outcome = engine.reserve(RouteId::new(1), 5).unwrap();
/// assert_eq!(outcome.available_seats(), 35);
///
/// let outcome = engine.reserve(RouteId::new(1), 40).unwrap();
/// assert!(matches!(outcome, ReserveOutcome::InsufficientSeats { available: 35, .. }));
/// ```
pub struct BookingEngine {
    store: Arc<dyn RouteStore>,
    registry: Arc<ObserverRegistry>,
    locks: RouteLocks,
    cache: RwLock<HashMap<RouteId, Route>>,
}

impl fmt::Debug for BookingEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BookingEngine")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

impl BookingEngine {
    /// Creates an engine with its own empty observer registry.
    #[must_use]
    pub fn new(store: Arc<dyn RouteStore>) -> Self {
        Self::with_registry(store, Arc::new(ObserverRegistry::new()))
    }

    /// Creates an engine that notifies through a shared registry.
    #[must_use]
    pub fn with_registry(store: Arc<dyn RouteStore>, registry: Arc<ObserverRegistry>) -> Self {
        Self {
            store,
            registry,
            locks: RouteLocks::default(),
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Reserves `seats` seats on route `id`.
    ///
    /// The check and the write happen in one
    /// [`RouteStore::take_seats`] call under the route lock, against the
    /// store's current count, never the cache or a caller's snapshot. On
    /// success the cache is updated, and then observers are notified
    /// outside the route lock.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] if `seats` is zero (checked before touching
    ///   the store)
    /// - [`Error::RouteNotFound`] if the route does not exist
    /// - a storage error if the read or the write fails; the cache is left
    ///   as it was and nobody is notified
    pub fn reserve(&self, id: RouteId, seats: u32) -> Result<ReserveOutcome> {
        if seats == 0 {
            return Err(Error::validation("seats", "must be at least 1"));
        }

        let lock = self.locks.for_route(id);
        let claim = {
            let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
            let claim = self.store.take_seats(id, seats);
            if let Ok(claim) = &claim {
                self.remember(claim.route().clone());
            }
            claim
        };
        if matches!(claim, Err(Error::RouteNotFound { .. })) {
            self.locks.discard(id, lock);
        }

        let route = match claim? {
            SeatClaim::Taken(route) => {
                log::debug!(
                    "route {id}: reserved {seats} seat(s), {} remaining",
                    route.available_seats()
                );
                route
            }
            SeatClaim::Insufficient(route) => {
                let available = route.available_seats();
                log::debug!("route {id}: rejected {seats} seat(s), only {available} available");
                return Ok(ReserveOutcome::InsufficientSeats {
                    requested: seats,
                    available,
                });
            }
        };

        let notifications = self.registry.notify(&route, seats);
        Ok(ReserveOutcome::Reserved(Booking {
            total_price: route.total_price(seats),
            route,
            seats,
            notifications,
        }))
    }

    fn remember(&self, route: Route) {
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(route.id(), route);
    }

    /// Loads every route into the cache, returning how many were loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn warm_cache(&self) -> Result<usize> {
        let routes = self.store.get_all()?;
        let count = routes.len();
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        cache.clear();
        cache.extend(routes.into_iter().map(|r| (r.id(), r)));
        Ok(count)
    }

    /// The engine's last known copy of a route.
    ///
    /// Only routes seen by [`warm_cache`](Self::warm_cache) or
    /// [`reserve`](Self::reserve) are present.
    #[must_use]
    pub fn cached_route(&self, id: RouteId) -> Option<Route> {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
    }

    /// Adds a booking observer.
    pub fn subscribe(&self, observer: Arc<dyn BookingObserver>) -> SubscriptionId {
        self.registry.subscribe(observer)
    }

    /// Removes a booking observer. Returns `false` if it was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.registry.unsubscribe(id)
    }

    /// The registry this engine notifies.
    #[must_use]
    pub fn observers(&self) -> &Arc<ObserverRegistry> {
        &self.registry
    }

    /// A catalog over the same store.
    #[must_use]
    pub fn catalog(&self) -> RouteCatalog {
        RouteCatalog::new(Arc::clone(&self.store))
    }
}
