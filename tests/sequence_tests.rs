//! Tests for operations that reshape one sequence.

use std::ops::Bound::{self, Excluded, Included, Unbounded};

use lambars_ops::prelude::*;
use rstest::rstest;

fn vector<T: Clone>(elements: impl IntoIterator<Item = T>) -> PersistentVector<T> {
    elements.into_iter().collect()
}

// =============================================================================
// chunk
// =============================================================================

#[rstest]
fn test_chunk_splits_into_runs() {
    let chunks = chunk(vector(['a', 'b', 'c']), 2).computed().unwrap();
    assert_eq!(chunks, vector([vector(['a', 'b']), vector(['c'])]));
}

#[rstest]
#[case(1, vec![vec![1], vec![2], vec![3], vec![4]])]
#[case(3, vec![vec![1, 2, 3], vec![4]])]
#[case(4, vec![vec![1, 2, 3, 4]])]
#[case(10, vec![vec![1, 2, 3, 4]])]
fn test_chunk_sizes(#[case] size: usize, #[case] expected: Vec<Vec<i32>>) {
    let chunks = chunk(vector([1, 2, 3, 4]), size).computed().unwrap();
    let chunks: Vec<Vec<i32>> = chunks.iter().map(|run| run.iter().copied().collect()).collect();
    assert_eq!(chunks, expected);
}

#[rstest]
fn test_chunk_large_sequence_into_singletons() {
    let sequence: PersistentVector<usize> = (0..100_000).collect();
    let chunks = chunk(sequence, 1).computed().unwrap();
    assert_eq!(chunks.len(), 100_000);
    assert_eq!(chunks[0], vector([0]));
    assert_eq!(chunks[99_999], vector([99_999]));
}

#[rstest]
fn test_chunk_of_zero_is_empty() {
    assert_eq!(chunk(vector([1, 2]), 0).computed(), Some(PersistentVector::new()));
}

// =============================================================================
// compact
// =============================================================================

#[rstest]
fn test_compact_removes_falsey_values() {
    let values = vector([
        Value::from(0),
        Value::from(1),
        Value::from(false),
        Value::from(2),
        Value::from(""),
        Value::from(3),
        Value::Null,
        Value::Undefined,
        Value::from(f64::NAN),
        Value::list(Vec::<Value>::new()),
    ]);
    let compacted = compact(values).computed().unwrap();
    assert_eq!(
        compacted,
        vector([
            Value::from(1),
            Value::from(2),
            Value::from(3),
            Value::list(Vec::<Value>::new())
        ])
    );
}

#[rstest]
fn test_compact_on_options() {
    let values = vector([Some(0), None, Some(4)]);
    assert_eq!(compact(values).computed(), Some(vector([Some(4)])));
}

// =============================================================================
// concat
// =============================================================================

#[rstest]
fn test_concat_appends_in_order() {
    let joined = concat(vector([1]), [vector([2, 3]), PersistentVector::new(), vector([4])])
        .computed()
        .unwrap();
    assert_eq!(joined, vector([1, 2, 3, 4]));
}

#[rstest]
fn test_concat_leaves_input_untouched() {
    let original = vector([1, 2]);
    let _ = concat(original.clone(), [vector([3])]);
    assert_eq!(original, vector([1, 2]));
}

// =============================================================================
// difference
// =============================================================================

#[rstest]
fn test_difference_keeps_order_and_duplicates() {
    let kept = difference(vector([3, 1, 2, 1]), [2]).computed().unwrap();
    assert_eq!(kept, vector([3, 1, 1]));
}

#[rstest]
fn test_difference_uses_same_value_zero() {
    let kept = difference(vector([Value::from(f64::NAN), Value::from(-0.0), Value::from(1)]), [
        Value::from(f64::NAN),
        Value::from(0),
    ])
    .computed()
    .unwrap();
    assert_eq!(kept, vector([Value::from(1)]));
}

#[rstest]
fn test_difference_by_compares_keys() {
    let records = vector([("a", 1), ("b", 2), ("c", 3)]);
    let kept = difference_by(records, [("z", 2)], |record| record.1)
        .computed()
        .unwrap();
    assert_eq!(kept, vector([("a", 1), ("c", 3)]));
}

// =============================================================================
// fill
// =============================================================================

#[rstest]
#[case(Unbounded, Unbounded, vec![0, 0, 0])]
#[case(Included(1), Unbounded, vec![1, 0, 0])]
#[case(Unbounded, Excluded(1), vec![0, 2, 3])]
#[case(Included(1), Excluded(10), vec![1, 0, 0])]
#[case(Included(3), Unbounded, vec![1, 2, 3])]
#[case(Included(2), Excluded(1), vec![1, 2, 3])]
fn test_fill_ranges(
    #[case] start: Bound<usize>,
    #[case] end: Bound<usize>,
    #[case] expected: Vec<i32>,
) {
    let filled = fill(vector([1, 2, 3]), 0, (start, end)).computed().unwrap();
    assert_eq!(filled, vector(expected));
}

#[rstest]
fn test_fill_with_plain_range() {
    let filled = fill(vector([4, 6, 8, 10]), 0, 1..3).computed().unwrap();
    assert_eq!(filled, vector([4, 0, 0, 10]));
}

// =============================================================================
// pull_at
// =============================================================================

#[rstest]
fn test_pull_at_picks_in_given_order() {
    let picked = pull_at(vector(['a', 'b', 'c', 'd']), [3, 0, 9]).computed().unwrap();
    assert_eq!(picked, vector([Some('d'), Some('a'), None]));
}

#[rstest]
fn test_pull_at_does_not_remove() {
    let sequence = vector([1, 2, 3]);
    let _ = pull_at(sequence.clone(), [1]);
    assert_eq!(sequence.len(), 3);
}
