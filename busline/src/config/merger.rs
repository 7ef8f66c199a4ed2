//! Configuration merging and precedence handling.

use crate::config::schema::Config;

/// Layers configurations on top of each other.
///
/// # Examples
///
/// ```
/// use busline::config::{Config, ConfigMerger};
///
/// let low = Config { currency: Some("lei".to_string()), ..Default::default() };
/// let high = Config { currency: Some("EUR".to_string()), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.currency, Some("EUR".to_string()));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge source config into target. Fields set in `source` win.
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.busy_timeout_ms.is_some() {
            target.busy_timeout_ms = source.busy_timeout_ms;
        }

        if source.max_seats_per_booking.is_some() {
            target.max_seats_per_booking = source.max_seats_per_booking;
        }

        if source.currency.is_some() {
            target.currency.clone_from(&source.currency);
        }

        if source.output_format.is_some() {
            target.output_format = source.output_format;
        }

        if source.disable_autoinit.is_some() {
            target.disable_autoinit = source.disable_autoinit;
        }
    }
}
