//! Simulate command implementation.
//!
//! Runs several booking sessions against one engine at the same time. Every
//! session subscribes its own observer before any session books, so each
//! one hears about every successful booking, including its own.

use std::sync::mpsc::Receiver;
use std::sync::{Arc, Barrier};
use std::thread;

use busline::booking::{BookingEvent, ChannelObserver, ConsoleObserver};
use busline::config::OutputFormat;
use busline::store::{MemoryRouteStore, RouteStore};
use busline::{BookingEngine, ReserveOutcome, RouteId};
use clap::Args;
use serde::Serialize;

use crate::error::CliError;
use crate::utils::{check_seat_count, load_configuration, open_store, GlobalOptions};

/// Upper bound on concurrent sessions.
const MAX_SESSIONS: usize = 256;

/// Run concurrent booking sessions against one route.
#[derive(Args)]
pub struct SimulateCommand {
    /// Route id
    #[arg(long, value_name = "ID")]
    pub route: i64,

    /// Number of concurrent sessions
    #[arg(long, value_name = "N", default_value_t = 4)]
    pub sessions: usize,

    /// Seats each session tries to book
    #[arg(long, value_name = "K", default_value_t = 1)]
    pub seats: u32,

    /// Use a fresh in-memory catalog instead of the database
    #[arg(long)]
    pub in_memory: bool,

    /// Echo every notification to stderr as it is delivered
    #[arg(long)]
    pub watch: bool,

    /// Output format (table or json)
    #[arg(long)]
    pub format: Option<OutputFormat>,
}

/// What one session saw.
#[derive(Debug, Serialize)]
struct SessionReport {
    session: usize,
    booked: bool,
    available_after: u32,
    notifications: usize,
}

/// The whole run.
#[derive(Debug, Serialize)]
struct SimulationReport {
    route: i64,
    seats_per_session: u32,
    successful: usize,
    rejected: usize,
    available_seats: u32,
    total_seats: u32,
    sessions: Vec<SessionReport>,
}

impl SimulateCommand {
    /// Execute the simulate command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        check_seat_count(self.seats, &config)?;
        if self.sessions == 0 || self.sessions > MAX_SESSIONS {
            return Err(CliError::InvalidArguments(format!(
                "--sessions must be between 1 and {MAX_SESSIONS}, got {}",
                self.sessions
            )));
        }

        let store: Arc<dyn RouteStore> = if self.in_memory {
            let store = MemoryRouteStore::new()?;
            store.initialize()?;
            Arc::new(store)
        } else {
            open_store(global, &config)?
        };
        let engine = Arc::new(BookingEngine::new(store));
        log::debug!(
            "Simulating {} session(s) of {} seat(s) on route {}",
            self.sessions,
            self.seats,
            self.route
        );
        let id = RouteId::new(self.route);

        // Fail fast on an unknown route before spawning anything.
        engine.catalog().route(id)?;

        if self.watch {
            engine.subscribe(Arc::new(ConsoleObserver::stderr("watch")));
        }
        let inboxes: Vec<Receiver<BookingEvent>> = (0..self.sessions)
            .map(|i| {
                let (observer, inbox) = ChannelObserver::new(format!("session-{i}"));
                engine.subscribe(Arc::new(observer));
                inbox
            })
            .collect();

        let outcomes = self.run_sessions(&engine, id)?;

        let sessions: Vec<SessionReport> = outcomes
            .iter()
            .zip(&inboxes)
            .enumerate()
            .map(|(i, (outcome, inbox))| SessionReport {
                session: i,
                booked: outcome.is_reserved(),
                available_after: outcome.available_seats(),
                notifications: inbox.try_iter().count(),
            })
            .collect();

        let route = engine.catalog().route(id)?;
        let successful = sessions.iter().filter(|s| s.booked).count();
        let report = SimulationReport {
            route: self.route,
            seats_per_session: self.seats,
            successful,
            rejected: sessions.len() - successful,
            available_seats: route.available_seats(),
            total_seats: route.total_seats(),
            sessions,
        };

        match self.format.unwrap_or(config.effective_output_format()) {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(&report)
                    .map_err(|e| CliError::Io(e.into()))?;
                println!("{json}");
            }
            OutputFormat::Table | OutputFormat::Csv => print_report(&report),
        }
        Ok(())
    }

    fn run_sessions(&self, engine: &Arc<BookingEngine>, id: RouteId) -> Result<Vec<ReserveOutcome>, CliError> {
        let barrier = Arc::new(Barrier::new(self.sessions));
        let seats = self.seats;

        let handles: Vec<_> = (0..self.sessions)
            .map(|_| {
                let engine = Arc::clone(engine);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    engine.reserve(id, seats)
                })
            })
            .collect();

        let mut outcomes = Vec::with_capacity(handles.len());
        for handle in handles {
            let outcome = handle
                .join()
                .map_err(|_| CliError::Io(std::io::Error::other("booking session panicked")))?;
            outcomes.push(outcome?);
        }
        Ok(outcomes)
    }
}

fn print_report(report: &SimulationReport) {
    for s in &report.sessions {
        let result = if s.booked {
            format!(
                "booked {} seat(s), {} left",
                report.seats_per_session, s.available_after
            )
        } else {
            format!(
                "not enough seats (requested {}, available {})",
                report.seats_per_session, s.available_after
            )
        };
        println!(
            "session {}: {result}; {} notification(s)",
            s.session, s.notifications
        );
    }
    println!(
        "route {}: {} booked, {} rejected, {}/{} seats available",
        report.route,
        report.successful,
        report.rejected,
        report.available_seats,
        report.total_seats
    );
}
