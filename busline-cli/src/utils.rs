//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including data directory resolution, configuration loading, store
//! management, and route output formatting.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use busline::config::OutputFormat;
use busline::database::DATABASE_FILE_NAME;
use busline::store::{RouteStore, SqliteRouteStore};
use busline::{BookingEngine, Config, ConfigBuilder, DatabaseConfig, Route};

use crate::error::CliError;

/// Column headers for CSV output.
const ROUTE_COLUMNS: [&str; 9] = [
    "id",
    "source",
    "destination",
    "departure",
    "arrival",
    "duration",
    "available_seats",
    "total_seats",
    "price",
];

/// Global CLI options shared across all commands.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds).
    pub busy_timeout: Option<u32>,

    /// Disable automatic database initialization.
    pub disable_autoinit: bool,
}

/// Resolve the data directory: `--data-dir` > `BUSLINE_DATA_DIR` > `~/.busline`.
pub fn resolve_data_dir(global: &GlobalOptions) -> Result<PathBuf, CliError> {
    match global.data_dir {
        Some(ref dir) => Ok(dir.clone()),
        None => busline::database::resolve_data_dir().map_err(|e| CliError::Config(e.to_string())),
    }
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Environment variables
/// 2. `config.yaml` in the data directory
/// 3. Built-in defaults
///
/// Global flags are applied on top by the callers that need them.
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let data_dir = resolve_data_dir(global)?;

    ConfigBuilder::new()
        .with_data_dir(&data_dir)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Busy timeout: `--busy-timeout` seconds if given, otherwise the config.
fn busy_timeout(global: &GlobalOptions, config: &Config) -> Duration {
    global.busy_timeout.map_or_else(
        || config.effective_busy_timeout(),
        |seconds| Duration::from_secs(seconds.into()),
    )
}

/// Open the SQLite route store and make sure it is seeded.
///
/// # Errors
///
/// Returns `NoDataDirectory` if the database doesn't exist and auto-init is
/// disabled by flag or configuration.
pub fn open_store(global: &GlobalOptions, config: &Config) -> Result<Arc<SqliteRouteStore>, CliError> {
    let db_path = resolve_data_dir(global)?.join(DATABASE_FILE_NAME);
    let autoinit_disabled = global.disable_autoinit || config.disable_autoinit == Some(true);

    if !db_path.exists() && autoinit_disabled {
        return Err(CliError::NoDataDirectory);
    }

    log::debug!("Opening route database at {}", db_path.display());
    let db_config = DatabaseConfig::new(&db_path).with_busy_timeout(busy_timeout(global, config));
    let store = SqliteRouteStore::open(db_config)?;
    store.initialize()?;
    Ok(Arc::new(store))
}

/// Open the store and wrap it in a booking engine.
pub fn open_engine(global: &GlobalOptions, config: &Config) -> Result<BookingEngine, CliError> {
    let store: Arc<dyn RouteStore> = open_store(global, config)?;
    Ok(BookingEngine::new(store))
}

/// Reject seat counts outside `1..=max_seats_per_booking`.
pub fn check_seat_count(seats: u32, config: &Config) -> Result<(), CliError> {
    let max = config.effective_max_seats_per_booking();
    if seats == 0 || seats > max {
        return Err(CliError::InvalidArguments(format!(
            "--seats must be between 1 and {max}, got {seats}"
        )));
    }
    Ok(())
}

/// Format an amount with its currency label.
pub fn format_price(amount: f64, currency: &str) -> String {
    format!("{amount:.2} {currency}")
}

/// Shorten a path for display.
///
/// If the path is within the home directory, show it as ~/...
/// Otherwise, show the full path.
pub fn shorten_path(path: &Path) -> String {
    if let Some(home) = home::home_dir() {
        if let Ok(relative) = path.strip_prefix(&home) {
            return format!("~/{}", relative.display());
        }
    }
    path.display().to_string()
}

/// Write routes to stdout in the requested format.
pub fn print_routes(routes: &[Route], format: OutputFormat, currency: &str) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_routes(&mut handle, routes, format, currency)
}

/// Write routes to `out` in the requested format.
pub fn write_routes(
    out: &mut dyn Write,
    routes: &[Route],
    format: OutputFormat,
    currency: &str,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Table => {
            for route in routes {
                writeln!(out, "[{}] {}", route.id(), route.display_line(currency))?;
            }
        }
        OutputFormat::Json => {
            let json_data: Vec<serde_json::Value> = routes
                .iter()
                .map(|r| {
                    serde_json::json!({
                        "id": r.id().value(),
                        "source": r.source_city(),
                        "destination": r.destination_city(),
                        "departure": time_of(r.departure()),
                        "arrival": time_of(r.arrival()),
                        "duration_minutes": r.duration_minutes(),
                        "available_seats": r.available_seats(),
                        "total_seats": r.total_seats(),
                        "price": r.price(),
                        "currency": currency,
                    })
                })
                .collect();
            serde_json::to_writer_pretty(&mut *out, &json_data).map_err(io::Error::from)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            writer.write_record(ROUTE_COLUMNS).map_err(csv_error)?;
            for r in routes {
                writer
                    .write_record(&[
                        r.id().to_string(),
                        r.source_city().to_string(),
                        r.destination_city().to_string(),
                        time_of(r.departure()),
                        time_of(r.arrival()),
                        r.duration_display(),
                        r.available_seats().to_string(),
                        r.total_seats().to_string(),
                        format!("{:.2}", r.price()),
                    ])
                    .map_err(csv_error)?;
            }
            writer.flush()?;
        }
    }
    Ok(())
}

fn time_of(time: chrono::NaiveTime) -> String {
    time.format(busline::route::TIME_FORMAT).to_string()
}

/// Convert csv::Error to CliError.
fn csv_error(e: csv::Error) -> CliError {
    CliError::Io(io::Error::new(io::ErrorKind::Other, e))
}
