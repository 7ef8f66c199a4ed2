//! Property-based tests for configuration merging.

use super::merger::ConfigMerger;
use super::schema::{Config, OutputFormat};
use proptest::prelude::*;

fn output_format_strategy() -> impl Strategy<Value = OutputFormat> {
    prop_oneof![
        Just(OutputFormat::Table),
        Just(OutputFormat::Json),
        Just(OutputFormat::Csv),
    ]
}

fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of(1u64..100_000),
        prop::option::of(1u32..500),
        prop::option::of("[a-zA-Z]{1,8}"),
        prop::option::of(output_format_strategy()),
        prop::option::of(any::<bool>()),
    )
        .prop_map(|(timeout, max_seats, currency, format, autoinit)| Config {
            busy_timeout_ms: timeout,
            max_seats_per_booking: max_seats,
            currency,
            output_format: format,
            disable_autoinit: autoinit,
        })
}

proptest! {
    #[test]
    fn higher_precedence_wins_when_set(low in config_strategy(), high in config_strategy()) {
        let mut merged = low.clone();
        ConfigMerger::merge_into(&mut merged, &high);

        prop_assert_eq!(merged.busy_timeout_ms, high.busy_timeout_ms.or(low.busy_timeout_ms));
        prop_assert_eq!(
            merged.max_seats_per_booking,
            high.max_seats_per_booking.or(low.max_seats_per_booking)
        );
        prop_assert_eq!(merged.currency.clone(), high.currency.clone().or(low.currency.clone()));
        prop_assert_eq!(merged.output_format, high.output_format.or(low.output_format));
        prop_assert_eq!(merged.disable_autoinit, high.disable_autoinit.or(low.disable_autoinit));
    }

    #[test]
    fn merging_default_is_identity(config in config_strategy()) {
        let mut merged = config.clone();
        ConfigMerger::merge_into(&mut merged, &Config::default());
        prop_assert_eq!(merged, config);
    }

    #[test]
    fn merge_is_idempotent(low in config_strategy(), high in config_strategy()) {
        let mut once = low;
        ConfigMerger::merge_into(&mut once, &high);
        let mut twice = once.clone();
        ConfigMerger::merge_into(&mut twice, &high);
        prop_assert_eq!(once, twice);
    }
}
