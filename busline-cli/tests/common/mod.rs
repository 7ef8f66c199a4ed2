//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with temporary directories
//! - Command builder helpers for common patterns
//! - Facts about the starter route catalog

use assert_cmd::cargo::CommandCargoExt;
use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Environment variables that would leak a developer's setup into tests.
const BUSLINE_ENV_VARS: [&str; 8] = [
    "BUSLINE_DATA_DIR",
    "BUSLINE_BUSY_TIMEOUT",
    "BUSLINE_BUSY_TIMEOUT_MS",
    "BUSLINE_MAX_SEATS_PER_BOOKING",
    "BUSLINE_CURRENCY",
    "BUSLINE_OUTPUT_FORMAT",
    "BUSLINE_DISABLE_AUTOINIT",
    "BUSLINE_LOG_MODE",
];

/// Route 1 in the starter catalog: Bucharest → Brașov at 08:00, 40 seats, 50.00.
#[allow(dead_code)]
pub const BUCHAREST_BRASOV_MORNING: i64 = 1;

/// Route 5 in the starter catalog: Brașov → Cluj at 10:00, 35 seats, 75.00.
#[allow(dead_code)]
pub const BRASOV_CLUJ: i64 = 5;

/// Test environment with isolated data directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Path to the busline data directory
    pub data_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    ///
    /// The data directory is not created; busline creates it on first use.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let data_dir = temp_path.join("busline-data");

        Self {
            temp_dir,
            temp_path,
            data_dir,
        }
    }

    /// Get a bare command builder without `--data-dir`.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("busline").expect("Failed to find busline binary");
        for var in BUSLINE_ENV_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    /// Get a command builder with the data directory pre-configured.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd
    }

    /// Get a `std::process::Command` with the data directory pre-configured.
    ///
    /// Unlike [`command`](Self::command) this can be spawned, for tests that
    /// need several processes running at once.
    pub fn process(&self) -> std::process::Command {
        let mut cmd =
            std::process::Command::cargo_bin("busline").expect("Failed to find busline binary");
        for var in BUSLINE_ENV_VARS {
            cmd.env_remove(var);
        }
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Path of the route database.
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("busline.db")
    }

    /// Run `busline init` quietly.
    pub fn init(&self) {
        self.command().arg("--quiet").arg("init").assert().success();
    }

    /// Write `config.yaml` into the data directory.
    pub fn write_config(&self, contents: &str) {
        std::fs::create_dir_all(&self.data_dir).expect("Failed to create data dir");
        std::fs::write(self.data_dir.join("config.yaml"), contents)
            .expect("Failed to write config");
    }

    /// Book seats and return the remaining count printed on stdout.
    ///
    /// # Panics
    /// Panics if the booking fails.
    pub fn book(&self, route: i64, seats: u32) -> u32 {
        let output = self
            .command()
            .arg("book")
            .arg("--route")
            .arg(route.to_string())
            .arg("--seats")
            .arg(seats.to_string())
            .output()
            .expect("Failed to run book command");

        assert!(
            output.status.success(),
            "Book failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        let stdout = String::from_utf8(output.stdout).expect("Invalid UTF-8 in output");
        stdout
            .trim()
            .parse()
            .expect("Output is not a seat count")
    }

    /// Run a command and return its stdout.
    ///
    /// # Panics
    /// Panics if the command fails.
    pub fn stdout_of(&self, args: &[&str]) -> String {
        let output = self
            .command()
            .args(args)
            .output()
            .expect("Failed to run command");

        assert!(
            output.status.success(),
            "Command {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        String::from_utf8(output.stdout).expect("Invalid UTF-8 in output")
    }

    /// Available seats on `route`, read through `routes --format json`.
    pub fn available_seats(&self, route: i64) -> u64 {
        let stdout = self.stdout_of(&["routes", "--format", "json"]);
        let routes: serde_json::Value = serde_json::from_str(&stdout).expect("Invalid JSON");
        routes
            .as_array()
            .expect("Expected an array")
            .iter()
            .find(|r| r["id"] == route)
            .and_then(|r| r["available_seats"].as_u64())
            .expect("Route missing from listing")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
