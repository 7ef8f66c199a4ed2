//! Database CRUD operations for routes.
//!
//! Readers take a `&Connection` so they can run inside an existing
//! transaction; writers open their own IMMEDIATE transaction.

use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};

use crate::error::{Error, Result};
use crate::route::{parse_time, Route, RouteDraft, RouteId, TIME_FORMAT};

use super::connection::Database;
use super::schema::{COUNT_ROUTES, INSERT_ROUTE};

const SELECT_ROUTES: &str = r"
    SELECT id, source_city, destination_city, departure_time, arrival_time,
           total_seats, available_seats, price
    FROM routes
    ORDER BY id
";

const SELECT_ROUTE: &str = r"
    SELECT id, source_city, destination_city, departure_time, arrival_time,
           total_seats, available_seats, price
    FROM routes
    WHERE id = ?
";

pub(super) const UPDATE_AVAILABLE_SEATS: &str = r"
    UPDATE routes
    SET available_seats = ?
    WHERE id = ?
";

fn conversion_failure(
    column: usize,
    err: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(err))
}

/// Deserializes a route from a database row.
///
/// Expects row fields in this order: id, `source_city`, `destination_city`,
/// `departure_time`, `arrival_time`, `total_seats`, `available_seats`, price
fn row_to_route(row: &rusqlite::Row<'_>) -> rusqlite::Result<Route> {
    let id: i64 = row.get(0)?;
    let source: String = row.get(1)?;
    let destination: String = row.get(2)?;
    let departure: String = row.get(3)?;
    let arrival: String = row.get(4)?;
    let total_seats: u32 = row.get(5)?;
    let available_seats: u32 = row.get(6)?;
    let price: f64 = row.get(7)?;

    let departure = parse_time(&departure).map_err(|e| conversion_failure(3, e))?;
    let arrival = parse_time(&arrival).map_err(|e| conversion_failure(4, e))?;

    Route::builder(RouteId::new(id), source, destination)
        .departure(departure)
        .arrival(arrival)
        .seats(total_seats)
        .available(available_seats)
        .price(price)
        .build()
        .map_err(|e| conversion_failure(0, e))
}

impl Database {
    /// Lists every route in insertion (id) order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be decoded.
    pub fn list_routes(conn: &Connection) -> Result<Vec<Route>> {
        let mut stmt = conn.prepare(SELECT_ROUTES)?;
        let routes = stmt
            .query_map([], row_to_route)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(routes)
    }

    /// Retrieves a route by id.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(route))` if the route exists
    /// - `Ok(None)` if it doesn't
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_route(conn: &Connection, id: RouteId) -> Result<Option<Route>> {
        let route = conn
            .query_row(SELECT_ROUTE, params![id.value()], row_to_route)
            .optional()?;
        Ok(route)
    }

    /// Counts the stored routes.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_routes(conn: &Connection) -> Result<u64> {
        let count: i64 = conn.query_row(COUNT_ROUTES, [], |row| row.get(0))?;
        u64::try_from(count).map_err(|_| Error::DatabaseCorruption {
            details: format!("negative route count {count}"),
        })
    }

    /// Inserts a route using an existing connection or transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_route_simple(conn: &Connection, draft: &RouteDraft) -> Result<RouteId> {
        conn.execute(
            INSERT_ROUTE,
            params![
                draft.source_city,
                draft.destination_city,
                draft.departure.format(TIME_FORMAT).to_string(),
                draft.arrival.format(TIME_FORMAT).to_string(),
                draft.total_seats,
                draft.price,
            ],
        )?;
        Ok(RouteId::new(conn.last_insert_rowid()))
    }

    /// Inserts a single route in its own transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction or the insert fails.
    pub fn insert_route(&mut self, draft: &RouteDraft) -> Result<RouteId> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let id = Self::insert_route_simple(&tx, draft)?;
        tx.commit()?;
        Ok(id)
    }

    /// Overwrites the available seat count of one route.
    ///
    /// This is an unconditional write: range checks belong to the caller.
    /// The table's CHECK constraint still rejects values outside
    /// `0..=total_seats`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RouteNotFound`] if no route has this id, or a
    /// database error if the update fails.
    pub fn update_available_seats(&mut self, id: RouteId, seats: u32) -> Result<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let rows_affected = tx.execute(UPDATE_AVAILABLE_SEATS, params![seats, id.value()])?;
        if rows_affected == 0 {
            // Dropping the transaction rolls it back
            return Err(Error::RouteNotFound { id });
        }

        tx.commit()?;
        Ok(())
    }
}
