//! Error types for the busline library.
//!
//! This module provides the error hierarchy for all route catalog and
//! booking operations, using `thiserror` for ergonomic error handling.
//!
//! Note that running out of seats is *not* an error: it is a normal
//! business outcome reported through
//! [`ReserveOutcome::InsufficientSeats`](crate::booking::ReserveOutcome).

use thiserror::Error;

use crate::route::RouteId;

/// Result type alias for operations that may fail with a busline error.
///
/// # Examples
///
/// ```
/// use busline::{Error, Result};
///
/// fn example_operation() -> Result<u32> {
///     Ok(40)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the busline library.
#[derive(Debug, Error)]
pub enum Error {
    /// The referenced route does not exist.
    #[error("route {id} not found")]
    RouteNotFound {
        /// The id that was looked up.
        id: RouteId,
    },

    /// A precondition on an argument or a field was violated.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field or argument that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// A time of day could not be parsed.
    #[error("invalid time '{value}': {reason}")]
    InvalidTime {
        /// The rejected input.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A non-SQL storage backend failed.
    #[error("storage error: {details}")]
    Storage {
        /// Details about the failure.
        details: String,
    },

    /// A configuration error occurred.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Database corruption was detected.
    #[error("database corruption detected: {details}")]
    DatabaseCorruption {
        /// Details about the corruption.
        details: String,
    },

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The expected schema version.
        expected: i32,
        /// The schema version found in the database.
        found: i32,
    },
}

impl Error {
    /// Check if error indicates a missing route.
    ///
    /// # Examples
    ///
    /// ```
    /// use busline::{Error, RouteId};
    ///
    /// let err = Error::RouteNotFound { id: RouteId::new(7) };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::RouteNotFound { .. })
    }

    /// Check if error originates from the backing store.
    ///
    /// Storage failures abort the current operation; callers decide whether
    /// to retry, alert, or give up.
    ///
    /// # Examples
    ///
    /// ```
    /// use busline::Error;
    ///
    /// let err = Error::Storage { details: "disk unplugged".into() };
    /// assert!(err.is_storage_failure());
    /// ```
    #[must_use]
    pub fn is_storage_failure(&self) -> bool {
        matches!(
            self,
            Self::Database(_) | Self::Storage { .. } | Self::Io(_) | Self::DatabaseCorruption { .. }
        )
    }

    pub(crate) fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}
