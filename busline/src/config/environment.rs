//! Environment variable handling for configuration overrides.

use std::env;
use std::str::FromStr;

use crate::config::schema::{Config, OutputFormat};
use crate::error::{Error, Result};

/// Handles `BUSLINE_*` environment variable overrides.
///
/// # Examples
///
/// ```no_run
/// use busline::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// # Errors
    ///
    /// Returns an error if a set variable has an unparseable value.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(val) = env::var("BUSLINE_BUSY_TIMEOUT_MS") {
            config.busy_timeout_ms = Some(Self::parse_number("BUSLINE_BUSY_TIMEOUT_MS", &val)?);
        }

        if let Ok(val) = env::var("BUSLINE_MAX_SEATS_PER_BOOKING") {
            config.max_seats_per_booking =
                Some(Self::parse_number("BUSLINE_MAX_SEATS_PER_BOOKING", &val)?);
        }

        if let Ok(currency) = env::var("BUSLINE_CURRENCY") {
            config.currency = Some(currency);
        }

        if let Ok(val) = env::var("BUSLINE_OUTPUT_FORMAT") {
            config.output_format =
                Some(OutputFormat::from_str(&val).map_err(|message| Error::Validation {
                    field: "BUSLINE_OUTPUT_FORMAT".into(),
                    message,
                })?);
        }

        if let Ok(val) = env::var("BUSLINE_DISABLE_AUTOINIT") {
            config.disable_autoinit = Some(Self::parse_bool("BUSLINE_DISABLE_AUTOINIT", &val)?);
        }

        Ok(())
    }

    fn parse_number<T: FromStr>(var: &str, value: &str) -> Result<T> {
        value.trim().parse().map_err(|_| Error::Validation {
            field: var.into(),
            message: "Must be a non-negative integer".into(),
        })
    }

    /// Parse a boolean value from an environment variable.
    ///
    /// Accepts: true/false, 1/0, yes/no, on/off (case-insensitive).
    fn parse_bool(var: &str, value: &str) -> Result<bool> {
        match value.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: var.into(),
                message: format!("Invalid boolean value: {value}"),
            }),
        }
    }
}
