//! Routes command implementation.
//!
//! Prints every route ordered by source city, then departure time.

use busline::config::OutputFormat;
use clap::Args;

use crate::error::CliError;
use crate::utils::{load_configuration, open_engine, print_routes, GlobalOptions};

/// List all routes.
#[derive(Args)]
pub struct RoutesCommand {
    /// Output format (table, json, csv)
    #[arg(long)]
    pub format: Option<OutputFormat>,
}

impl RoutesCommand {
    /// Execute the routes command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let engine = open_engine(global, &config)?;

        let routes = engine.catalog().list_all_sorted()?;
        let format = self.format.unwrap_or(config.effective_output_format());
        print_routes(&routes, format, config.effective_currency())
    }
}
