//! Property-based tests for intervals, classification and aggregation.

#![allow(clippy::float_cmp)]

use proptest::prelude::*;
use recall_scoring::{
    DEFAULT_Z, Item, LabelCounts, ResponseLabel, TaskKind, Trial, classify_serial, score_batch,
    wilson_interval,
};

/// Generator for (successes, trials) pairs with trials > 0.
fn frequency_strategy() -> impl Strategy<Value = (u64, u64)> {
    (1u64..=500u64).prop_flat_map(|n| (0u64..=n, Just(n)))
}

/// Items drawn from a small alphabet so repeats and transpositions are common.
fn item_strategy() -> impl Strategy<Value = Item> {
    prop_oneof![
        1 => Just(Item::empty()),
        6 => "[A-F]".prop_map(|s| Item::new(&s)),
        1 => "[X-Z]".prop_map(|s| Item::new(&s)),
    ]
}

fn serial_pair_strategy() -> impl Strategy<Value = (Vec<Item>, Vec<Item>)> {
    (0usize..12).prop_flat_map(|len| {
        (
            prop::collection::vec(item_strategy(), len),
            prop::collection::vec(item_strategy(), len),
        )
    })
}

fn serial_batch_strategy() -> impl Strategy<Value = Vec<Trial>> {
    (1usize..8, 1usize..6).prop_flat_map(|(len, count)| {
        prop::collection::vec(
            (
                prop::collection::vec(item_strategy(), len),
                prop::collection::vec(item_strategy(), len),
            ),
            count,
        )
        .prop_map(|pairs| {
            pairs
                .into_iter()
                .enumerate()
                .map(|(i, (presented, recalled))| {
                    Trial::new(format!("trial_{i:02}.csv"), presented, recalled)
                })
                .collect()
        })
    })
}

proptest! {
    #[test]
    fn interval_bounds_stay_in_unit_range((k, n) in frequency_strategy()) {
        let interval = wilson_interval(k, n, DEFAULT_Z).unwrap();
        let center = interval.center();

        prop_assert!(interval.lower >= 0.0, "lower {} below 0", interval.lower);
        prop_assert!(interval.upper <= 1.0, "upper {} above 1", interval.upper);
        prop_assert!(interval.lower <= center && center <= interval.upper);
    }

    #[test]
    fn interval_contains_observed_proportion((k, n) in frequency_strategy()) {
        let interval = wilson_interval(k, n, DEFAULT_Z).unwrap();
        let p = k as f64 / n as f64;

        prop_assert!(interval.lower <= p + 1e-12 && p <= interval.upper + 1e-12);
    }

    #[test]
    fn interval_is_symmetric_in_successes_and_failures((k, n) in frequency_strategy()) {
        let a = wilson_interval(k, n, DEFAULT_Z).unwrap();
        let b = wilson_interval(n - k, n, DEFAULT_Z).unwrap();

        prop_assert!((a.lower - (1.0 - b.upper)).abs() < 1e-9);
        prop_assert!((a.upper - (1.0 - b.lower)).abs() < 1e-9);
    }

    #[test]
    fn zero_trials_is_never_computable(k in 0u64..100) {
        prop_assert!(wilson_interval(k, 0, DEFAULT_Z).is_none());
    }

    #[test]
    fn label_counts_sum_to_sequence_length((presented, recalled) in serial_pair_strategy()) {
        let classified = classify_serial(&presented, &recalled);
        let counts = LabelCounts::from_responses(&classified);

        prop_assert_eq!(counts.total(), presented.len() as u64);
    }

    #[test]
    fn classification_precedence_holds((presented, recalled) in serial_pair_strategy()) {
        for response in classify_serial(&presented, &recalled) {
            let i = response.position - 1;
            let expected = if recalled[i].is_empty() {
                ResponseLabel::Omission
            } else if recalled[i] == presented[i] {
                ResponseLabel::Correct
            } else if presented.contains(&recalled[i]) {
                ResponseLabel::Transposition
            } else {
                ResponseLabel::Intrusion
            };
            prop_assert_eq!(response.label, expected);
        }
    }

    #[test]
    fn totals_do_not_depend_on_discovery_order(trials in serial_batch_strategy()) {
        let mut reversed = trials.clone();
        reversed.reverse();

        let forward = score_batch(TaskKind::Serial, trials, DEFAULT_Z).unwrap();
        let backward = score_batch(TaskKind::Serial, reversed, DEFAULT_Z).unwrap();

        prop_assert_eq!(forward, backward);
    }

    #[test]
    fn error_proportions_sum_to_one(trials in serial_batch_strategy()) {
        let report = score_batch(TaskKind::Serial, trials, DEFAULT_Z).unwrap();

        for dist in report.errors.unwrap() {
            let sum: f64 = ResponseLabel::ALL
                .iter()
                .filter_map(|label| dist.proportions.get(*label))
                .sum();
            prop_assert!((sum - 1.0).abs() < 1e-9);
            prop_assert_eq!(dist.counts.total(), dist.n_items);
        }
    }

    #[test]
    fn pooled_totals_equal_sum_of_trials(trials in serial_batch_strategy()) {
        let report = score_batch(TaskKind::Free, trials, DEFAULT_Z).unwrap();

        let k: u64 = report.trials.iter().map(|t| t.k_correct).sum();
        let n: u64 = report.trials.iter().map(|t| t.n_items).sum();
        let curve_k: u64 = report.curve.iter().map(|p| p.correct).sum();
        let curve_n: u64 = report.curve.iter().map(|p| p.total).sum();

        prop_assert_eq!(report.global.k_correct_total, k);
        prop_assert_eq!(report.global.n_items_total, n);
        prop_assert_eq!(curve_k, k);
        prop_assert_eq!(curve_n, n);
    }
}
