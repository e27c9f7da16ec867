//! Property-based tests for grouping and partitioning.

use std::collections::HashMap;

use lambars_ops::prelude::*;
use proptest::prelude::*;

proptest! {
    /// Partition: the two groups together hold exactly the input, the first
    /// group only values the predicate accepts, the second only values it
    /// rejects, each in input order.
    #[test]
    fn prop_partition_splits_by_predicate(
        elements in prop::collection::vec(any::<i16>(), 1..80),
        divisor in 1i16..7,
    ) {
        let accepts = |value: &i16| value % divisor == 0;
        let sequence: PersistentVector<i16> = elements.iter().copied().collect();
        let (matching, rest) = partition(sequence, |value| accepts(value)).computed().unwrap();

        prop_assert!(matching.iter().all(accepts));
        prop_assert!(rest.iter().all(|value| !accepts(value)));
        prop_assert_eq!(matching.len() + rest.len(), elements.len());

        let expected_matching: Vec<i16> = elements.iter().copied().filter(accepts).collect();
        let expected_rest: Vec<i16> = elements.iter().copied().filter(|value| !accepts(value)).collect();
        prop_assert_eq!(matching.into_iter().collect::<Vec<_>>(), expected_matching);
        prop_assert_eq!(rest.into_iter().collect::<Vec<_>>(), expected_rest);
    }

    /// Partition over a set sees each distinct value once.
    #[test]
    fn prop_partition_of_set_covers_members(elements in prop::collection::vec(any::<i8>(), 1..60)) {
        let set: PersistentOrderedSet<i8> = elements.iter().copied().collect();
        let (negative, rest) = partition(set.clone(), |value| *value < 0).computed().unwrap();

        prop_assert_eq!(negative.len() + rest.len(), set.len());
        prop_assert!(negative.iter().chain(rest.iter()).all(|value| set.contains(value)));
    }

    /// Count: the counts sum to the input length and match a plain tally.
    #[test]
    fn prop_count_by_sums_to_length(elements in prop::collection::vec(any::<u8>(), 1..80)) {
        let sequence: PersistentVector<u8> = elements.iter().copied().collect();
        let counts = count_by(sequence, |value| value % 5).computed().unwrap();

        let mut expected: HashMap<u8, usize> = HashMap::new();
        for value in &elements {
            *expected.entry(value % 5).or_default() += 1;
        }

        prop_assert_eq!(counts.values().sum::<usize>(), elements.len());
        for (key, count) in &expected {
            prop_assert_eq!(counts.get(key), Some(count));
        }
    }
}
