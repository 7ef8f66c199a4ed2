//! Integration tests for bookings made by concurrent `busline` processes.
//!
//! Each process is its own session with its own connection, so only the
//! database serializes them.

mod common;

use common::{TestEnv, BRASOV_CLUJ, BUCHAREST_BRASOV_MORNING};
use std::process::{Output, Stdio};

/// Start `count` `book` processes at once and collect their results.
fn book_concurrently(env: &TestEnv, route: i64, seats: u32, count: usize) -> Vec<Output> {
    let children: Vec<_> = (0..count)
        .map(|_| {
            env.process()
                .args(["book", "--route", &route.to_string(), "--seats", &seats.to_string()])
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .spawn()
                .expect("Failed to spawn book command")
        })
        .collect();

    children
        .into_iter()
        .map(|child| child.wait_with_output().expect("Failed to wait for book command"))
        .collect()
}

/// Test only one of several processes gets a whole route.
#[test]
fn test_whole_route_sold_once() {
    let env = TestEnv::new();
    env.init();

    let outputs = book_concurrently(&env, BUCHAREST_BRASOV_MORNING, 40, 8);

    let winners: Vec<&Output> = outputs.iter().filter(|o| o.status.success()).collect();
    assert_eq!(winners.len(), 1, "Exactly one process should book the route");
    assert_eq!(String::from_utf8_lossy(&winners[0].stdout), "0\n");

    for output in outputs.iter().filter(|o| !o.status.success()) {
        assert_eq!(output.status.code(), Some(1));
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(
            stderr.contains("Requested: 40, Available: 0"),
            "Unexpected failure: {stderr}"
        );
    }

    assert_eq!(env.available_seats(BUCHAREST_BRASOV_MORNING), 0);
}

/// Test no update is lost when processes split a route.
#[test]
fn test_partial_bookings_add_up() {
    let env = TestEnv::new();
    env.init();

    let outputs = book_concurrently(&env, BRASOV_CLUJ, 5, 8);

    // 35 seats, 5 per process: exactly 7 fit.
    assert_eq!(outputs.iter().filter(|o| o.status.success()).count(), 7);

    let mut remaining: Vec<u32> = outputs
        .iter()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().parse().unwrap())
        .collect();
    remaining.sort_unstable();
    assert_eq!(remaining, vec![0, 5, 10, 15, 20, 25, 30]);

    assert_eq!(env.available_seats(BRASOV_CLUJ), 0);
}
