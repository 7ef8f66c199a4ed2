//! Route types for the bus schedule inventory.
//!
//! This module provides the [`Route`] record, its identifier, a validating
//! builder, and [`RouteDraft`] for routes that have not been persisted yet.

use std::fmt;

use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Display format for departure and arrival times.
pub const TIME_FORMAT: &str = "%H:%M";

/// Unique, immutable identifier of a route.
///
/// # Examples
///
/// ```
/// use busline::RouteId;
///
/// let id = RouteId::new(3);
/// assert_eq!(id.value(), 3);
/// assert_eq!(id.to_string(), "3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteId(i64);

impl RouteId {
    /// Wraps a raw identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the underlying identifier.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl From<i64> for RouteId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parses a wall-clock time in `HH:MM` or `HH:MM:SS` form.
///
/// # Errors
///
/// Returns [`Error::InvalidTime`] if the input is not a valid time of day.
///
/// # Examples
///
/// ```
/// use busline::route::parse_time;
///
/// let t = parse_time("08:30").unwrap();
/// assert_eq!(t.format("%H:%M").to_string(), "08:30");
/// assert!(parse_time("8 o'clock").is_err());
/// ```
pub fn parse_time(value: &str) -> Result<NaiveTime> {
    let trimmed = value.trim();
    NaiveTime::parse_from_str(trimmed, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map_err(|e| Error::InvalidTime {
            value: value.to_string(),
            reason: e.to_string(),
        })
}

/// A scheduled bus service between two cities.
///
/// Everything except the available seat count is immutable over the life
/// of a route. The invariant `available_seats <= total_seats` is enforced
/// at construction and by [`Route::with_available_seats`].
///
/// # Examples
///
/// ```
/// use busline::{Route, RouteId};
/// use busline::route::parse_time;
///
/// let route = Route::builder(RouteId::new(1), "Bucharest", "Brașov")
///     .departure(parse_time("08:00").unwrap())
///     .arrival(parse_time("10:30").unwrap())
///     .seats(40)
///     .price(50.0)
///     .build()
///     .unwrap();
///
/// assert_eq!(route.available_seats(), 40);
/// assert_eq!(route.duration_display(), "02:30");
/// assert!((route.total_price(3) - 150.0).abs() < f64::EPSILON);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    id: RouteId,
    source_city: String,
    destination_city: String,
    departure: NaiveTime,
    arrival: NaiveTime,
    total_seats: u32,
    available_seats: u32,
    price: f64,
}

impl Route {
    /// Starts building a route.
    #[must_use]
    pub fn builder(
        id: RouteId,
        source_city: impl Into<String>,
        destination_city: impl Into<String>,
    ) -> RouteBuilder {
        RouteBuilder::new(id, source_city.into(), destination_city.into())
    }

    /// Returns the route identifier.
    #[must_use]
    pub const fn id(&self) -> RouteId {
        self.id
    }

    /// Returns the source city.
    #[must_use]
    pub fn source_city(&self) -> &str {
        &self.source_city
    }

    /// Returns the destination city.
    #[must_use]
    pub fn destination_city(&self) -> &str {
        &self.destination_city
    }

    /// Returns the departure time.
    #[must_use]
    pub const fn departure(&self) -> NaiveTime {
        self.departure
    }

    /// Returns the arrival time.
    #[must_use]
    pub const fn arrival(&self) -> NaiveTime {
        self.arrival
    }

    /// Returns the seat capacity.
    #[must_use]
    pub const fn total_seats(&self) -> u32 {
        self.total_seats
    }

    /// Returns the number of seats still available.
    #[must_use]
    pub const fn available_seats(&self) -> u32 {
        self.available_seats
    }

    /// Returns the price of one seat.
    #[must_use]
    pub const fn price(&self) -> f64 {
        self.price
    }

    /// Returns the travel time. Never negative.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.arrival - self.departure
    }

    /// Returns the travel time in whole minutes.
    #[must_use]
    pub fn duration_minutes(&self) -> i64 {
        self.duration().num_minutes()
    }

    /// Formats the travel time as `HH:MM`.
    #[must_use]
    pub fn duration_display(&self) -> String {
        let minutes = self.duration_minutes();
        format!("{:02}:{:02}", minutes / 60, minutes % 60)
    }

    /// Price for booking `seats` seats on this route.
    ///
    /// Pure helper; does not check availability.
    #[must_use]
    pub fn total_price(&self, seats: u32) -> f64 {
        f64::from(seats) * self.price
    }

    /// Returns a copy of this route with a different available seat count.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `available` exceeds the capacity.
    pub fn with_available_seats(&self, available: u32) -> Result<Self> {
        if available > self.total_seats {
            return Err(Error::validation(
                "available_seats",
                format!(
                    "{available} exceeds capacity {} of route {}",
                    self.total_seats, self.id
                ),
            ));
        }
        Ok(Self {
            available_seats: available,
            ..self.clone()
        })
    }

    /// Renders the one-line summary shown in route listings.
    #[must_use]
    pub fn display_line(&self, currency: &str) -> String {
        format!(
            "{} → {} | {}-{} | Duration: {} | {} seats available | {:.2} {}",
            self.source_city,
            self.destination_city,
            self.departure.format(TIME_FORMAT),
            self.arrival.format(TIME_FORMAT),
            self.duration_display(),
            self.available_seats,
            self.price,
            currency
        )
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} at {} ({} seats)",
            self.source_city,
            self.destination_city,
            self.departure.format(TIME_FORMAT),
            self.available_seats
        )
    }
}

/// Builder for [`Route`].
///
/// Seat availability defaults to the full capacity when not set.
#[derive(Debug, Clone)]
pub struct RouteBuilder {
    id: RouteId,
    source_city: String,
    destination_city: String,
    departure: NaiveTime,
    arrival: NaiveTime,
    total_seats: u32,
    available_seats: Option<u32>,
    price: f64,
}

impl RouteBuilder {
    fn new(id: RouteId, source_city: String, destination_city: String) -> Self {
        Self {
            id,
            source_city,
            destination_city,
            departure: NaiveTime::MIN,
            arrival: NaiveTime::MIN,
            total_seats: 0,
            available_seats: None,
            price: 0.0,
        }
    }

    /// Sets the departure time.
    #[must_use]
    pub const fn departure(mut self, departure: NaiveTime) -> Self {
        self.departure = departure;
        self
    }

    /// Sets the arrival time.
    #[must_use]
    pub const fn arrival(mut self, arrival: NaiveTime) -> Self {
        self.arrival = arrival;
        self
    }

    /// Sets the seat capacity.
    #[must_use]
    pub const fn seats(mut self, total: u32) -> Self {
        self.total_seats = total;
        self
    }

    /// Sets the available seat count.
    #[must_use]
    pub const fn available(mut self, available: u32) -> Self {
        self.available_seats = Some(available);
        self
    }

    /// Sets the per-seat price.
    #[must_use]
    pub const fn price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    /// Validates and builds the route.
    ///
    /// # Errors
    ///
    /// Returns a validation error if:
    /// - a city name is blank
    /// - arrival is earlier than departure
    /// - available seats exceed the capacity
    /// - the price is negative or not finite
    pub fn build(self) -> Result<Route> {
        if self.source_city.trim().is_empty() {
            return Err(Error::validation("source_city", "must be non-empty"));
        }
        if self.destination_city.trim().is_empty() {
            return Err(Error::validation("destination_city", "must be non-empty"));
        }
        if self.arrival < self.departure {
            return Err(Error::validation(
                "arrival_time",
                format!(
                    "arrival {} is earlier than departure {}",
                    self.arrival.format(TIME_FORMAT),
                    self.departure.format(TIME_FORMAT)
                ),
            ));
        }
        let available = self.available_seats.unwrap_or(self.total_seats);
        if available > self.total_seats {
            return Err(Error::validation(
                "available_seats",
                format!("{available} exceeds capacity {}", self.total_seats),
            ));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(Error::validation(
                "price",
                format!("{} is not a non-negative amount", self.price),
            ));
        }

        Ok(Route {
            id: self.id,
            source_city: self.source_city,
            destination_city: self.destination_city,
            departure: self.departure,
            arrival: self.arrival,
            total_seats: self.total_seats,
            available_seats: available,
            price: self.price,
        })
    }
}

/// A route that has not been assigned an id yet.
///
/// Drafts are what gets inserted into a store; the store hands back the
/// assigned [`RouteId`]. A fresh draft always starts fully available.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteDraft {
    /// Source city.
    pub source_city: String,
    /// Destination city.
    pub destination_city: String,
    /// Departure time.
    pub departure: NaiveTime,
    /// Arrival time.
    pub arrival: NaiveTime,
    /// Seat capacity.
    pub total_seats: u32,
    /// Per-seat price.
    pub price: f64,
}

impl RouteDraft {
    /// Creates a draft from textual times.
    ///
    /// # Errors
    ///
    /// Returns an error if either time fails to parse or the resulting
    /// route would be invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// use busline::RouteDraft;
    ///
    /// let draft = RouteDraft::new("Cluj", "Brașov", "15:00", "19:00", 35, 75.0).unwrap();
    /// assert_eq!(draft.total_seats, 35);
    /// assert!(RouteDraft::new("Cluj", "Brașov", "19:00", "15:00", 35, 75.0).is_err());
    /// ```
    pub fn new(
        source_city: &str,
        destination_city: &str,
        departure: &str,
        arrival: &str,
        total_seats: u32,
        price: f64,
    ) -> Result<Self> {
        let draft = Self {
            source_city: source_city.to_string(),
            destination_city: destination_city.to_string(),
            departure: parse_time(departure)?,
            arrival: parse_time(arrival)?,
            total_seats,
            price,
        };
        // Run the same checks a persisted route would go through.
        draft.clone().into_route(RouteId::new(0))?;
        Ok(draft)
    }

    /// Turns the draft into a fully available route with the given id.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the draft violates a route invariant.
    pub fn into_route(self, id: RouteId) -> Result<Route> {
        Route::builder(id, self.source_city, self.destination_city)
            .departure(self.departure)
            .arrival(self.arrival)
            .seats(self.total_seats)
            .price(self.price)
            .build()
    }
}

#[cfg(test)]
mod proptests;
