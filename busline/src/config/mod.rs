//! Configuration system for busline.
//!
//! Settings come from, lowest to highest precedence:
//!
//! 1. Built-in defaults
//! 2. `{data_dir}/config.yaml`
//! 3. Environment variables (`BUSLINE_*`)
//! 4. Programmatic overrides (via [`ConfigBuilder::with_config`])
//!
//! # Examples
//!
//! ```no_run
//! use busline::config::ConfigBuilder;
//!
//! let config = ConfigBuilder::new().build().unwrap();
//! println!("prices in {}", config.effective_currency());
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource, CONFIG_FILE_NAME};
pub use merger::ConfigMerger;
pub use schema::{
    Config, OutputFormat, DEFAULT_BUSY_TIMEOUT_MS, DEFAULT_CURRENCY,
    DEFAULT_MAX_SEATS_PER_BOOKING,
};
pub use validator::ConfigValidator;
