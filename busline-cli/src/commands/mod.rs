//! CLI command implementations.
//!
//! - `init`: Create and seed the route database
//! - `routes`: Overview of every route
//! - `sources`: Cities with departures
//! - `destinations`: Cities reachable from a source
//! - `find`: Routes for one city pair
//! - `quote`: Price for a number of seats
//! - `book`: Reserve seats on a route
//! - `simulate`: Concurrent booking sessions in one process

pub mod book;
pub mod destinations;
pub mod find;
pub mod init;
pub mod quote;
pub mod routes;
pub mod simulate;
pub mod sources;

pub use book::BookCommand;
pub use destinations::DestinationsCommand;
pub use find::FindCommand;
pub use init::InitCommand;
pub use quote::QuoteCommand;
pub use routes::RoutesCommand;
pub use simulate::SimulateCommand;
pub use sources::SourcesCommand;
