//! Destinations command implementation.

use clap::Args;

use crate::error::CliError;
use crate::utils::{load_configuration, open_engine, GlobalOptions};

/// List cities reachable from a source city.
#[derive(Args)]
pub struct DestinationsCommand {
    /// Source city
    #[arg(long, value_name = "CITY")]
    pub from: String,
}

impl DestinationsCommand {
    /// Execute the destinations command.
    ///
    /// An unknown source prints nothing and still succeeds.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let engine = open_engine(global, &config)?;

        let destinations = engine.catalog().list_destinations(&self.from)?;
        if destinations.is_empty() && !global.quiet {
            eprintln!("No routes depart from {}", self.from);
        }
        for city in destinations {
            println!("{city}");
        }
        Ok(())
    }
}
