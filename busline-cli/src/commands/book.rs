//! Book command implementation.
//!
//! Reserves seats on one route. The remaining seat count goes to stdout so
//! scripts can capture it; the human summary goes to stderr.

use busline::{ReserveOutcome, RouteId};
use clap::Args;

use crate::error::CliError;
use crate::utils::{check_seat_count, format_price, load_configuration, open_engine, GlobalOptions};

/// Book seats on a route.
#[derive(Args)]
pub struct BookCommand {
    /// Route id
    #[arg(long, value_name = "ID")]
    pub route: i64,

    /// Number of seats
    #[arg(long, value_name = "N")]
    pub seats: u32,
}

impl BookCommand {
    /// Execute the book command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        check_seat_count(self.seats, &config)?;

        let engine = open_engine(global, &config)?;
        match engine.reserve(RouteId::new(self.route), self.seats)? {
            ReserveOutcome::Reserved(booking) => {
                println!("{}", booking.remaining_seats());
                if !global.quiet {
                    eprintln!(
                        "Booked {} seat(s) on {} → {} at {} for {}",
                        booking.seats,
                        booking.route.source_city(),
                        booking.route.destination_city(),
                        booking.route.departure().format(busline::route::TIME_FORMAT),
                        format_price(booking.total_price, config.effective_currency())
                    );
                }
                Ok(())
            }
            ReserveOutcome::InsufficientSeats {
                requested,
                available,
            } => Err(CliError::SemanticFailure(format!(
                "Not enough seats available. Requested: {requested}, Available: {available}"
            ))),
        }
    }
}
