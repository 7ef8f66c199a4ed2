//! Init command implementation.
//!
//! Creates the data directory and database, seeding the starter catalog if
//! the database is empty.

use std::fs;

use busline::config::CONFIG_FILE_NAME;
use busline::store::RouteStore;
use clap::Args;

use crate::error::CliError;
use crate::utils::{load_configuration, open_store, resolve_data_dir, shorten_path, GlobalOptions};

/// Default configuration written by `init --with-config`.
const DEFAULT_CONFIG: &str = "\
# busline configuration
# busy_timeout_ms: 5000
# max_seats_per_booking: 50
# currency: lei
# output_format: table
";

/// Initialize the busline data directory and database.
#[derive(Args)]
pub struct InitCommand {
    /// Create a commented default configuration file
    #[arg(long)]
    with_config: bool,
}

impl InitCommand {
    /// Execute the init command.
    ///
    /// `--disable-autoinit` is ignored here; initializing is the point.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let data_dir = resolve_data_dir(global)?;
        fs::create_dir_all(&data_dir)?;

        let config_path = data_dir.join(CONFIG_FILE_NAME);
        let config_created = self.with_config && !config_path.exists();
        if config_created {
            fs::write(&config_path, DEFAULT_CONFIG)?;
        }

        let config = load_configuration(global)?;
        let init_global = GlobalOptions {
            disable_autoinit: false,
            ..global.clone()
        };
        let config = busline::Config {
            disable_autoinit: Some(false),
            ..config
        };
        let store = open_store(&init_global, &config)?;
        let routes = store.get_all()?.len();

        if !global.quiet {
            println!("Initialized busline in: {}", shorten_path(&data_dir));
            println!("  - {routes} routes available");
            if config_created {
                println!("  - Created default configuration file");
            } else if self.with_config {
                println!("  - Configuration file already exists (not overwritten)");
            }
        }

        Ok(())
    }
}
