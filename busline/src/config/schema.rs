//! Configuration schema definitions.
//!
//! Every field is optional so that partial configs from different sources
//! can be layered; the `effective_*` accessors fill in the defaults.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default SQLite busy timeout in milliseconds.
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5000;

/// Default cap on seats in a single booking.
pub const DEFAULT_MAX_SEATS_PER_BOOKING: u32 = 50;

/// Default currency label shown next to prices.
pub const DEFAULT_CURRENCY: &str = "lei";

/// Complete configuration structure.
///
/// # Examples
///
/// ```
/// use busline::config::Config;
///
/// let config = Config {
///     currency: Some("EUR".to_string()),
///     ..Default::default()
/// };
/// assert_eq!(config.effective_currency(), "EUR");
/// assert_eq!(config.effective_max_seats_per_booking(), 50);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// How long a writer waits for the database lock (milliseconds).
    pub busy_timeout_ms: Option<u64>,

    /// Largest number of seats a single booking may request.
    pub max_seats_per_booking: Option<u32>,

    /// Currency label printed after prices.
    pub currency: Option<String>,

    /// Output format for list commands.
    pub output_format: Option<OutputFormat>,

    /// Disable automatic database initialization.
    pub disable_autoinit: Option<bool>,
}

impl Config {
    /// Busy timeout, defaulting to [`DEFAULT_BUSY_TIMEOUT_MS`].
    #[must_use]
    pub fn effective_busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms.unwrap_or(DEFAULT_BUSY_TIMEOUT_MS))
    }

    /// Seat cap, defaulting to [`DEFAULT_MAX_SEATS_PER_BOOKING`].
    #[must_use]
    pub fn effective_max_seats_per_booking(&self) -> u32 {
        self.max_seats_per_booking
            .unwrap_or(DEFAULT_MAX_SEATS_PER_BOOKING)
    }

    /// Currency label, defaulting to [`DEFAULT_CURRENCY`].
    #[must_use]
    pub fn effective_currency(&self) -> &str {
        self.currency.as_deref().unwrap_or(DEFAULT_CURRENCY)
    }

    /// Output format, defaulting to [`OutputFormat::Table`].
    #[must_use]
    pub fn effective_output_format(&self) -> OutputFormat {
        self.output_format.unwrap_or_default()
    }
}

/// Output format for list commands.
///
/// # Examples
///
/// ```
/// use busline::config::OutputFormat;
///
/// let format: OutputFormat = "json".parse().unwrap();
/// assert_eq!(format, OutputFormat::Json);
/// assert_eq!(format.to_string(), "json");
/// ```
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON output format.
    Json,
    /// CSV output format.
    Csv,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => Err(format!("unknown output format '{s}' (expected table, json or csv)")),
        }
    }
}
