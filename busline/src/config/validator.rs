//! Configuration validation.

use crate::config::schema::Config;
use crate::error::{Error, Result};

/// Validates a merged configuration.
///
/// # Examples
///
/// ```
/// use busline::config::{Config, ConfigValidator};
///
/// ConfigValidator::validate(&Config::default()).unwrap();
///
/// let bad = Config { max_seats_per_booking: Some(0), ..Default::default() };
/// assert!(ConfigValidator::validate(&bad).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first offending field.
    pub fn validate(config: &Config) -> Result<()> {
        if config.busy_timeout_ms == Some(0) {
            return Err(Error::Validation {
                field: "busy_timeout_ms".into(),
                message: "Timeout must be greater than 0".into(),
            });
        }

        if config.max_seats_per_booking == Some(0) {
            return Err(Error::Validation {
                field: "max_seats_per_booking".into(),
                message: "Must allow at least one seat".into(),
            });
        }

        if let Some(ref currency) = config.currency {
            Self::validate_label("currency", currency)?;
        }

        Ok(())
    }

    fn validate_label(field: &str, value: &str) -> Result<()> {
        let trimmed = value.trim();

        if trimmed.is_empty() {
            return Err(Error::Validation {
                field: field.into(),
                message: "Cannot be empty or only whitespace".into(),
            });
        }

        if trimmed.chars().any(char::is_control) {
            return Err(Error::Validation {
                field: field.into(),
                message: "Cannot contain control characters".into(),
            });
        }

        Ok(())
    }
}
