//! Build script for busline-cli.
//!
//! Generates a man page at build time using clap_mangen and places it in
//! OUT_DIR. The command structure is rebuilt here because a build script
//! cannot depend on the crate it builds.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// Keep in sync with src/cli.rs.
fn build_cli() -> Command {
    Command::new("busline")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Browse bus routes and book seats")
        .long_about("Command-line front end for a shared bus route inventory with atomic seat booking")
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .help("Override the data directory location")
                .value_name("PATH")
                .global(true)
                .env("BUSLINE_DATA_DIR"),
        )
        .arg(
            Arg::new("busy-timeout")
                .long("busy-timeout")
                .help("Override the default busy timeout (in seconds)")
                .value_name("SECONDS")
                .global(true)
                .env("BUSLINE_BUSY_TIMEOUT"),
        )
        .arg(
            Arg::new("disable-autoinit")
                .long("disable-autoinit")
                .help("Disable automatic database initialization")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .subcommands(vec![
            Command::new("init")
                .about("Create the data directory and seed the route database")
                .long_about("Create the database if needed and seed the starter route catalog"),
            Command::new("routes")
                .about("List every route by source city and departure time")
                .long_about("Overview of all routes with live seat availability"),
            Command::new("sources")
                .about("List cities with departures")
                .long_about("List every distinct source city in alphabetical order"),
            Command::new("destinations")
                .about("List destinations reachable from a city")
                .long_about("List distinct destination cities for routes leaving --from"),
            Command::new("find")
                .about("Find routes between two cities")
                .long_about("List routes from --from to --to, earliest departure first"),
            Command::new("quote")
                .about("Price a booking without making it")
                .long_about("Print the total price of --seats seats on --route"),
            Command::new("book")
                .about("Book seats on a route")
                .long_about("Atomically reserve --seats seats on --route and print the seats left"),
            Command::new("simulate")
                .about("Run concurrent booking sessions against one route")
                .long_about(
                    "Start --sessions concurrent sessions that each book --seats seats on --route",
                ),
        ])
}

fn main() {
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("busline.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
