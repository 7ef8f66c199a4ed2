//! Find command implementation.

use busline::config::OutputFormat;
use clap::Args;

use crate::error::CliError;
use crate::utils::{load_configuration, open_engine, print_routes, GlobalOptions};

/// Find routes between two cities, earliest departure first.
#[derive(Args)]
pub struct FindCommand {
    /// Source city
    #[arg(long, value_name = "CITY")]
    pub from: String,

    /// Destination city
    #[arg(long, value_name = "CITY")]
    pub to: String,

    /// Output format (table, json, csv)
    #[arg(long)]
    pub format: Option<OutputFormat>,
}

impl FindCommand {
    /// Execute the find command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let engine = open_engine(global, &config)?;

        let routes = engine.catalog().find_routes(&self.from, &self.to)?;
        if routes.is_empty() && !global.quiet {
            eprintln!("No routes from {} to {}", self.from, self.to);
        }

        let format = self.format.unwrap_or(config.effective_output_format());
        print_routes(&routes, format, config.effective_currency())
    }
}
