//! Observer fan-out through the booking engine.

mod common;

use std::sync::Arc;

use busline::booking::{CallbackObserver, ChannelObserver, ObserverError};
use busline::{BookingEngine, RouteId};

use common::Recorder;

#[test]
fn test_three_observers_then_unsubscribe_middle() {
    let engine = BookingEngine::new(common::seeded_memory_store());
    let first = Recorder::new("first");
    let second = Recorder::new("second");
    let third = Recorder::new("third");

    engine.subscribe(first.clone());
    let second_id = engine.subscribe(second.clone());
    engine.subscribe(third.clone());

    let outcome = engine.reserve(RouteId::new(1), 4).unwrap();
    assert_eq!(outcome.booking().unwrap().notifications.delivered, 3);
    for recorder in [&first, &second, &third] {
        assert_eq!(recorder.events(), vec![(RouteId::new(1), 4, 36)]);
    }

    assert!(engine.unsubscribe(second_id));
    engine.reserve(RouteId::new(1), 1).unwrap();

    assert_eq!(first.events().len(), 2);
    assert_eq!(second.events().len(), 1);
    assert_eq!(third.events().len(), 2);
    assert_eq!(third.events()[1], (RouteId::new(1), 1, 35));
}

#[test]
fn test_observers_hear_every_session() {
    let engine = Arc::new(BookingEngine::new(common::seeded_sqlite_store()));
    let watcher = Recorder::new("watcher");
    engine.subscribe(watcher.clone());

    engine.reserve(RouteId::new(2), 1).unwrap();
    engine.reserve(RouteId::new(7), 2).unwrap();

    let ids: Vec<RouteId> = watcher.events().iter().map(|e| e.0).collect();
    assert_eq!(ids, vec![RouteId::new(2), RouteId::new(7)]);
}

#[test]
fn test_failing_observer_does_not_fail_booking() {
    let engine = BookingEngine::new(common::seeded_memory_store());
    let after = Recorder::new("after");
    engine.subscribe(Arc::new(CallbackObserver::named("flaky", |_, _| {
        Err(ObserverError::new("window closed"))
    })));
    engine.subscribe(after.clone());

    let outcome = engine.reserve(RouteId::new(1), 2).unwrap();
    let report = &outcome.booking().unwrap().notifications;

    assert_eq!(report.delivered, 1);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].observer, "flaky");
    assert_eq!(after.events().len(), 1);
    assert_eq!(
        engine.catalog().route(RouteId::new(1)).unwrap().available_seats(),
        38
    );
}

#[test]
fn test_no_notification_for_rejected_booking() {
    let engine = BookingEngine::new(common::seeded_memory_store());
    let watcher = Recorder::new("watcher");
    engine.subscribe(watcher.clone());

    assert!(!engine.reserve(RouteId::new(1), 41).unwrap().is_reserved());
    assert!(watcher.events().is_empty());
}

#[test]
fn test_channel_observer_across_threads() {
    let engine = Arc::new(BookingEngine::new(common::seeded_memory_store()));
    let (observer, events) = ChannelObserver::new("push");
    engine.subscribe(Arc::new(observer));

    let worker = {
        let engine = Arc::clone(&engine);
        std::thread::spawn(move || {
            for _ in 0..3 {
                engine.reserve(RouteId::new(9), 5).unwrap();
            }
        })
    };
    worker.join().unwrap();

    let received: Vec<u32> = events.try_iter().map(|e| e.route.available_seats()).collect();
    assert_eq!(received, vec![40, 35, 30]);
}

#[test]
fn test_observer_can_query_catalog_during_delivery() {
    let engine = Arc::new(BookingEngine::new(common::seeded_sqlite_store()));
    let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
    {
        let catalog = engine.catalog();
        let seen = Arc::clone(&seen);
        engine.subscribe(Arc::new(CallbackObserver::new(move |route, _| {
            let fresh = catalog
                .route(route.id())
                .map_err(|e| ObserverError::new(e.to_string()))?;
            seen.lock().unwrap().push(fresh.available_seats());
            Ok(())
        })));
    }

    engine.reserve(RouteId::new(6), 10).unwrap();
    assert_eq!(*seen.lock().unwrap(), vec![30]);
}
