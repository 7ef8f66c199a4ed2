//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::{
    BookCommand, DestinationsCommand, FindCommand, InitCommand, QuoteCommand, RoutesCommand,
    SimulateCommand, SourcesCommand,
};

/// Browse bus routes and book seats.
#[derive(Parser)]
#[command(name = "busline")]
#[command(version, about = "Browse bus routes and book seats", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "BUSLINE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds)
    #[arg(long, value_name = "SECONDS", global = true, env = "BUSLINE_BUSY_TIMEOUT")]
    pub busy_timeout: Option<u32>,

    /// Disable automatic database initialization
    #[arg(long, global = true)]
    pub disable_autoinit: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Create the data directory and seed the route database
    Init(InitCommand),

    /// List every route by source city and departure time
    Routes(RoutesCommand),

    /// List cities with departures
    Sources(SourcesCommand),

    /// List destinations reachable from a city
    Destinations(DestinationsCommand),

    /// Find routes between two cities
    Find(FindCommand),

    /// Price a booking without making it
    Quote(QuoteCommand),

    /// Book seats on a route
    Book(BookCommand),

    /// Run concurrent booking sessions against one route
    Simulate(SimulateCommand),
}
