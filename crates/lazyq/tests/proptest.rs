//! Property-based tests for lazyq using proptest.

use std::cell::Cell;
use std::collections::HashSet;

use lazyq::{from_vec, Dir, Sequence};
use proptest::prelude::*;

// ============================================================================
// Test helpers
// ============================================================================

#[derive(Debug, Clone)]
struct TestItem {
    value: i64,
    name: String,
    active: bool,
}

// Strategy to generate test items
fn test_item_strategy() -> impl Strategy<Value = TestItem> {
    (-50i64..50, "[a-c]{1,3}", any::<bool>()).prop_map(|(value, name, active)| TestItem {
        value,
        name,
        active,
    })
}

fn dir_strategy() -> impl Strategy<Value = Dir> {
    prop_oneof![Just(Dir::Asc), Just(Dir::Desc)]
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// Filter agrees with the standard library and keeps relative order.
    #[test]
    fn filter_matches_std(
        items in prop::collection::vec(any::<i64>(), 0..100),
        threshold in any::<i64>(),
    ) {
        let expected: Vec<i64> = items.iter().copied().filter(|x| *x > threshold).collect();
        let actual = from_vec(items).filter(|x| *x > threshold).to_vec().unwrap();
        prop_assert_eq!(actual, expected);
    }

    /// Map is 1:1 and calls the selector exactly once per element.
    #[test]
    fn map_calls_selector_once_per_element(
        items in prop::collection::vec(any::<i32>(), 0..100),
    ) {
        let calls = Cell::new(0usize);
        let seq = from_vec(items.clone()).map(|x| {
            calls.set(calls.get() + 1);
            i64::from(x) * 2
        });

        let out = seq.to_vec().unwrap();
        prop_assert_eq!(out.len(), items.len());
        prop_assert_eq!(calls.get(), items.len());
    }

    /// skip(n).take(m) is the window [n, n + m).
    #[test]
    fn skip_take_window(
        items in prop::collection::vec(any::<i64>(), 0..100),
        skip in 0usize..120,
        take in 0usize..120,
    ) {
        let expected: Vec<i64> = items.iter().copied().skip(skip).take(take).collect();
        let actual = from_vec(items).skip(skip).take(take).to_vec().unwrap();
        prop_assert_eq!(actual, expected);
    }

    /// Take never pulls more than it yields.
    #[test]
    fn take_pulls_at_most_count(
        items in prop::collection::vec(any::<i64>(), 0..100),
        take in 0usize..50,
    ) {
        let pulled = Cell::new(0usize);
        let seq = from_vec(items.clone())
            .map(|x| {
                pulled.set(pulled.get() + 1);
                x
            })
            .take(take);

        let out = seq.to_vec().unwrap();
        prop_assert_eq!(out.len(), take.min(items.len()));
        prop_assert_eq!(pulled.get(), out.len());
    }

    /// Multi-key ordering equals a stable std sort with the same comparator.
    #[test]
    fn ordering_matches_stable_sort(
        items in prop::collection::vec(test_item_strategy(), 0..60),
        first in dir_strategy(),
        second in dir_strategy(),
    ) {
        let mut expected = items.clone();
        expected.sort_by(|a, b| {
            first
                .apply(a.name.cmp(&b.name))
                .then_with(|| second.apply(a.active.cmp(&b.active)))
        });

        let actual = from_vec(items)
            .order_by(|i| i.name.clone(), first)
            .then_by(|i| i.active, second)
            .to_vec()
            .unwrap();

        let expected_values: Vec<i64> = expected.iter().map(|i| i.value).collect();
        let actual_values: Vec<i64> = actual.iter().map(|i| i.value).collect();
        prop_assert_eq!(actual_values, expected_values);
    }

    /// Ordering is a permutation of its input.
    #[test]
    fn ordering_is_a_permutation(
        items in prop::collection::vec(any::<i64>(), 0..100),
    ) {
        let mut expected = items.clone();
        expected.sort();

        let actual = from_vec(items).order_asc(|x| *x).to_vec().unwrap();
        prop_assert_eq!(actual, expected);
    }

    /// Groups partition the input, have distinct keys, and keep member order.
    #[test]
    fn groups_partition_input(
        items in prop::collection::vec(test_item_strategy(), 0..80),
    ) {
        let groups = from_vec(items.clone())
            .group_by(|i| i.name.clone())
            .to_vec()
            .unwrap();

        let total: usize = groups.iter().map(|g| g.len()).sum();
        prop_assert_eq!(total, items.len());

        let keys: HashSet<&String> = groups.iter().map(|g| g.key()).collect();
        prop_assert_eq!(keys.len(), groups.len());

        for group in &groups {
            let expected: Vec<i64> = items
                .iter()
                .filter(|i| &i.name == group.key())
                .map(|i| i.value)
                .collect();
            let actual: Vec<i64> = group.iter().map(|i| i.value).collect();
            prop_assert_eq!(actual, expected);
        }
    }

    /// Group order is first-seen key order.
    #[test]
    fn group_order_is_first_seen(
        items in prop::collection::vec(0u8..6, 0..80),
    ) {
        let mut seen = Vec::new();
        for item in &items {
            if !seen.contains(item) {
                seen.push(*item);
            }
        }

        let keys: Vec<u8> = from_vec(items)
            .group_by(|x| *x)
            .map(|g| *g.key())
            .to_vec()
            .unwrap();
        prop_assert_eq!(keys, seen);
    }

    /// Two consumptions of a pipeline without captured state agree.
    #[test]
    fn consumptions_are_repeatable(
        items in prop::collection::vec(test_item_strategy(), 0..60),
    ) {
        let seq = from_vec(items)
            .filter(|i| i.active)
            .order_desc(|i| i.value)
            .map(|i| i.name);

        prop_assert_eq!(seq.to_vec().unwrap(), seq.to_vec().unwrap());
    }
}
