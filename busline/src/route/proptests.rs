//! Property-based tests for `Route` and `RouteDraft`.

use super::{Route, RouteDraft, RouteId, TIME_FORMAT};
use chrono::NaiveTime;
use proptest::prelude::*;

// Strategy for generating a same-day (departure, arrival) pair
fn schedule_strategy() -> impl Strategy<Value = (NaiveTime, NaiveTime)> {
    (0u32..24 * 60).prop_flat_map(|dep| {
        (Just(dep), dep..24 * 60).prop_map(|(dep, arr)| {
            let departure = NaiveTime::from_hms_opt(dep / 60, dep % 60, 0).unwrap();
            let arrival = NaiveTime::from_hms_opt(arr / 60, arr % 60, 0).unwrap();
            (departure, arrival)
        })
    })
}

fn city_strategy() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{2,10}"
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Duration is never negative for a valid schedule
    #[test]
    fn duration_non_negative((departure, arrival) in schedule_strategy()) {
        let route = Route::builder(RouteId::new(1), "A", "B")
            .departure(departure)
            .arrival(arrival)
            .seats(10)
            .build()
            .unwrap();
        prop_assert!(route.duration_minutes() >= 0);
    }

    // The HH:MM display agrees with the minute count
    #[test]
    fn duration_display_matches_minutes((departure, arrival) in schedule_strategy()) {
        let route = Route::builder(RouteId::new(1), "A", "B")
            .departure(departure)
            .arrival(arrival)
            .build()
            .unwrap();
        let display = route.duration_display();
        let (h, m) = display.split_once(':').unwrap();
        let minutes: i64 = h.parse::<i64>().unwrap() * 60 + m.parse::<i64>().unwrap();
        prop_assert_eq!(minutes, route.duration_minutes());
    }

    // Availability never exceeds capacity after a checked update
    #[test]
    fn with_available_seats_respects_capacity(total in 0u32..500, available in 0u32..1000) {
        let route = Route::builder(RouteId::new(1), "A", "B").seats(total).build().unwrap();
        match route.with_available_seats(available) {
            Ok(updated) => {
                prop_assert!(available <= total);
                prop_assert!(updated.available_seats() <= updated.total_seats());
            }
            Err(_) => prop_assert!(available > total),
        }
    }

    // Total price scales linearly with the seat count
    #[test]
    fn total_price_is_linear(price in 0.0f64..1000.0, seats in 0u32..100) {
        let route = Route::builder(RouteId::new(1), "A", "B").price(price).build().unwrap();
        let expected = f64::from(seats) * price;
        prop_assert!((route.total_price(seats) - expected).abs() < 1e-9);
    }

    // Drafts built from formatted times keep their schedule
    #[test]
    fn draft_preserves_schedule(
        source in city_strategy(),
        destination in city_strategy(),
        (departure, arrival) in schedule_strategy(),
        seats in 0u32..100,
    ) {
        let dep = departure.format(TIME_FORMAT).to_string();
        let arr = arrival.format(TIME_FORMAT).to_string();
        let draft = RouteDraft::new(&source, &destination, &dep, &arr, seats, 10.0).unwrap();
        let route = draft.into_route(RouteId::new(9)).unwrap();
        prop_assert_eq!(route.departure(), departure);
        prop_assert_eq!(route.arrival(), arrival);
        prop_assert_eq!(route.available_seats(), seats);
    }
}
