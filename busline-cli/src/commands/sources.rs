//! Sources command implementation.

use clap::Args;

use crate::error::CliError;
use crate::utils::{load_configuration, open_engine, GlobalOptions};

/// List cities with at least one departure.
#[derive(Args)]
pub struct SourcesCommand {}

impl SourcesCommand {
    /// Execute the sources command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let engine = open_engine(global, &config)?;

        for city in engine.catalog().list_source_cities()? {
            println!("{city}");
        }
        Ok(())
    }
}
