//! Transaction management utilities.
//!
//! Writes that read before they write and must be all-or-nothing.

use rusqlite::{params, TransactionBehavior};

use crate::error::{Error, Result};
use crate::route::{RouteDraft, RouteId};
use crate::store::SeatClaim;

use super::connection::Database;
use super::operations::UPDATE_AVAILABLE_SEATS;

impl Database {
    /// Inserts `drafts` only if the routes table is empty.
    ///
    /// The emptiness check and the inserts share one IMMEDIATE transaction,
    /// so two processes initializing the same file cannot both seed it.
    /// Returns the number of routes inserted (0 when already populated).
    ///
    /// # Errors
    ///
    /// Returns an error if any statement or the commit fails.
    /// Takes `seats` seats from route `id` if that many are available.
    ///
    /// The read, the check and the write share one IMMEDIATE transaction.
    /// Other connections to the same file wait on the write lock (up to the
    /// busy timeout) instead of acting on a stale count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RouteNotFound`] if no route has this id, or a
    /// database error if a statement or the commit fails.
    pub fn take_seats(&mut self, id: RouteId, seats: u32) -> Result<SeatClaim> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let current = Self::get_route(&tx, id)?.ok_or(Error::RouteNotFound { id })?;
        let available = current.available_seats();
        if seats > available {
            // Dropping the transaction rolls it back
            return Ok(SeatClaim::Insufficient(current));
        }

        let updated = current.with_available_seats(available - seats)?;
        tx.execute(
            UPDATE_AVAILABLE_SEATS,
            params![updated.available_seats(), id.value()],
        )?;
        tx.commit()?;
        Ok(SeatClaim::Taken(updated))
    }

    /// Inserts the given drafts in one transaction if the routes table is empty; returns the number inserted.
    pub fn seed_if_empty(&mut self, drafts: &[RouteDraft]) -> Result<usize> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        if Self::count_routes(&tx)? > 0 {
            return Ok(0);
        }

        for draft in drafts {
            Self::insert_route_simple(&tx, draft)?;
        }

        tx.commit()?;
        Ok(drafts.len())
    }
}
