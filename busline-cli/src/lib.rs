//! Library exports for busline-cli.
//!
//! Exposes the CLI structure so tests and benchmarks can reach it.

pub mod cli;
pub mod commands;
pub mod error;
pub mod utils;

pub use cli::Cli;
