//! Quote command implementation.

use busline::RouteId;
use clap::Args;

use crate::error::CliError;
use crate::utils::{format_price, load_configuration, open_engine, GlobalOptions};

/// Show the total price for booking seats on a route, without booking.
#[derive(Args)]
pub struct QuoteCommand {
    /// Route id
    #[arg(long, value_name = "ID")]
    pub route: i64,

    /// Number of seats
    #[arg(long, value_name = "N")]
    pub seats: u32,
}

impl QuoteCommand {
    /// Execute the quote command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let engine = open_engine(global, &config)?;

        let route = engine.catalog().route(RouteId::new(self.route))?;
        println!(
            "{}",
            format_price(route.total_price(self.seats), config.effective_currency())
        );

        if !global.quiet && self.seats > route.available_seats() {
            eprintln!(
                "Note: only {} seats are currently available",
                route.available_seats()
            );
        }
        Ok(())
    }
}
