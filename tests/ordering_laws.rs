//! Property-based tests for sort-position search.
//!
//! Inserting a value at the reported index keeps a sorted sequence sorted,
//! for ordinary keys as well as null, undefined and NaN.

use lambars_ops::prelude::*;
use proptest::prelude::*;

fn band(value: &Value) -> u8 {
    match value {
        Value::Null => 1,
        Value::Undefined => 2,
        number if number.is_nan() => 3,
        _ => 0,
    }
}

fn is_ordered(values: &[Value]) -> bool {
    values.windows(2).all(|pair| {
        let (left, right) = (band(&pair[0]), band(&pair[1]));
        left < right || (left == right && (left != 0 || pair[0].as_number() <= pair[1].as_number()))
    })
}

fn any_key() -> impl Strategy<Value = Value> {
    prop_oneof![
        4 => (-100.0f64..100.0).prop_map(Value::from),
        1 => Just(Value::Null),
        1 => Just(Value::Undefined),
        1 => Just(Value::from(f64::NAN)),
    ]
}

fn sorted_sequence() -> impl Strategy<Value = Vec<Value>> {
    (
        prop::collection::vec(-100.0f64..100.0, 0..30),
        0usize..3,
        0usize..3,
        0usize..3,
    )
        .prop_map(|(mut numbers, nulls, undefined, nans)| {
            numbers.sort_by(f64::total_cmp);
            numbers
                .into_iter()
                .map(Value::from)
                .chain(std::iter::repeat_n(Value::Null, nulls))
                .chain(std::iter::repeat_n(Value::Undefined, undefined))
                .chain(std::iter::repeat_n(Value::from(f64::NAN), nans))
                .collect()
        })
}

fn inserted(elements: &[Value], index: usize, value: Value) -> Vec<Value> {
    let mut result = elements.to_vec();
    result.insert(index, value);
    result
}

proptest! {
    #[test]
    fn prop_sorted_index_preserves_order(elements in sorted_sequence(), value in any_key()) {
        let sequence: PersistentVector<Value> = elements.iter().cloned().collect();
        let index = sorted_index(sequence, value.clone()).unwrap_or_else(|_| 0);

        prop_assert!(index <= elements.len());
        prop_assert!(is_ordered(&inserted(&elements, index, value)));
    }

    #[test]
    fn prop_sorted_last_index_preserves_order(elements in sorted_sequence(), value in any_key()) {
        let sequence: PersistentVector<Value> = elements.iter().cloned().collect();
        let index = sorted_last_index(sequence, value.clone()).unwrap_or_else(|_| 0);

        prop_assert!(is_ordered(&inserted(&elements, index, value)));
    }

    #[test]
    fn prop_lowest_never_exceeds_highest(elements in sorted_sequence(), value in any_key()) {
        let sequence: PersistentVector<Value> = elements.into_iter().collect();
        let lowest = sorted_index(sequence.clone(), value.clone()).unwrap_or_else(|_| 0);
        let highest = sorted_last_index(sequence, value).unwrap_or_else(|_| 0);

        prop_assert!(lowest <= highest);
    }

    #[test]
    fn prop_matches_partition_point(
        mut elements in prop::collection::vec(any::<i32>(), 1..50),
        value in any::<i32>(),
    ) {
        elements.sort_unstable();
        let sequence: PersistentVector<i32> = elements.iter().copied().collect();

        prop_assert_eq!(
            sorted_index(sequence.clone(), value),
            Guarded::Computed(elements.partition_point(|element| *element < value))
        );
        prop_assert_eq!(
            sorted_last_index(sequence, value),
            Guarded::Computed(elements.partition_point(|element| *element <= value))
        );
    }
}
