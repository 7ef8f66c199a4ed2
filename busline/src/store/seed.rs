//! The starter route catalog written on first initialization.

use crate::error::Result;
use crate::route::RouteDraft;

/// `(source, destination, departure, arrival, seats, price)` for every
/// route seeded into an empty store.
pub const STARTER_ROUTES: &[(&str, &str, &str, &str, u32, f64)] = &[
    ("Bucharest", "Brașov", "08:00", "10:30", 40, 50.0),
    ("Bucharest", "Brașov", "14:00", "16:30", 40, 50.0),
    ("Bucharest", "Cluj", "07:00", "12:00", 50, 100.0),
    ("Bucharest", "Constanța", "09:00", "11:30", 45, 65.0),
    ("Brașov", "Cluj", "10:00", "14:00", 35, 75.0),
    ("Brașov", "Bucharest", "11:00", "13:30", 40, 50.0),
    ("Cluj", "Bucharest", "08:00", "13:00", 50, 100.0),
    ("Cluj", "Brașov", "15:00", "19:00", 35, 75.0),
    ("Constanța", "Bucharest", "12:00", "14:30", 45, 65.0),
];

/// Builds drafts for the starter catalog.
///
/// # Errors
///
/// Only fails if [`STARTER_ROUTES`] itself contains an invalid entry.
///
/// # Examples
///
/// ```
/// let drafts = busline::store::starter_catalog().unwrap();
/// assert_eq!(drafts.len(), 9);
/// ```
pub fn starter_catalog() -> Result<Vec<RouteDraft>> {
    STARTER_ROUTES
        .iter()
        .map(|&(source, destination, departure, arrival, seats, price)| {
            RouteDraft::new(source, destination, departure, arrival, seats, price)
        })
        .collect()
}
