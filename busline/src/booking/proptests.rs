use std::sync::Arc;

use proptest::prelude::*;

use super::{BookingEngine, ReserveOutcome};
use crate::route::{RouteDraft, RouteId};
use crate::store::MemoryRouteStore;

fn engine_with_capacity(total: u32) -> BookingEngine {
    let draft = RouteDraft::new("A", "B", "08:00", "09:00", total, 12.5).unwrap();
    BookingEngine::new(Arc::new(MemoryRouteStore::with_routes(vec![draft]).unwrap()))
}

proptest! {
    #[test]
    fn seat_count_stays_in_bounds(
        total in 0u32..60,
        requests in prop::collection::vec(1u32..20, 0..30),
    ) {
        let engine = engine_with_capacity(total);
        let id = RouteId::new(1);
        let mut expected = total;

        for seats in requests {
            match engine.reserve(id, seats).unwrap() {
                ReserveOutcome::Reserved(booking) => {
                    prop_assert!(seats <= expected);
                    expected -= seats;
                    prop_assert_eq!(booking.remaining_seats(), expected);
                }
                ReserveOutcome::InsufficientSeats { requested, available } => {
                    prop_assert!(seats > expected);
                    prop_assert_eq!(requested, seats);
                    prop_assert_eq!(available, expected);
                }
            }
            let route = engine.catalog().route(id).unwrap();
            prop_assert!(route.available_seats() <= route.total_seats());
        }
    }

    #[test]
    fn sequential_reservations_sum(total in 2u32..100, split in 0.0f64..1.0) {
        let engine = engine_with_capacity(total);
        let id = RouteId::new(1);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let c1 = ((f64::from(total - 1) * split) as u32).max(1);
        let c2 = total - c1;

        prop_assert!(engine.reserve(id, c1).unwrap().is_reserved());
        let second = engine.reserve(id, c2).unwrap();
        prop_assert!(second.is_reserved());
        prop_assert_eq!(second.available_seats(), 0);
    }

    #[test]
    fn rejection_reports_pre_call_value(total in 0u32..50, extra in 1u32..50) {
        let engine = engine_with_capacity(total);
        let outcome = engine.reserve(RouteId::new(1), total + extra).unwrap();
        prop_assert_eq!(
            outcome,
            ReserveOutcome::InsufficientSeats { requested: total + extra, available: total }
        );
    }
}
