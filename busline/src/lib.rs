#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # busline
//!
//! A bus route inventory with atomic seat reservation.
//!
//! Routes live in a [`RouteStore`](store::RouteStore). The
//! [`RouteCatalog`] answers read-side queries (cities, city pairs, the
//! sorted overview) and the [`BookingEngine`] takes seats, one route at a
//! time, then tells every subscribed [`BookingObserver`].
//!
//! ## Core Types
//!
//! - [`Route`], [`RouteId`] and [`RouteDraft`]: the route record
//! - [`store::SqliteRouteStore`] and [`store::MemoryRouteStore`]: backends
//! - [`BookingEngine`] and [`ReserveOutcome`]: reservations
//! - [`ObserverRegistry`] and [`BookingObserver`]: notifications
//! - [`Error`] and [`Result`]: error handling
//!
//! ## Examples
//!
//! ```
//! use std::sync::Arc;
//! use busline::store::{MemoryRouteStore, RouteStore};
//! use busline::{BookingEngine, RouteId};
//!
//! let store = Arc::new(MemoryRouteStore::new().unwrap());
//! store.initialize().unwrap();
//!
//! let engine = BookingEngine::new(store);
//! let catalog = engine.catalog();
//!
//! let route = &catalog.find_routes("Bucharest", "Brașov").unwrap()[0];
//! let outcome = engine.reserve(route.id(), 5).unwrap();
//! assert_eq!(outcome.available_seats(), 35);
//! ```

pub mod booking;
pub mod catalog;
pub mod config;
pub mod database;
pub mod error;
pub mod logging;
pub mod route;
pub mod store;

// Re-export key types at crate root for convenience
pub use booking::{
    Booking, BookingEngine, BookingEvent, BookingObserver, NotifyReport, ObserverRegistry,
    ReserveOutcome, SubscriptionId,
};
pub use catalog::RouteCatalog;
pub use config::{Config, ConfigBuilder};
pub use database::{Database, DatabaseConfig};
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use route::{Route, RouteDraft, RouteId};
