//! Unit tests for PersistentOrderedSet.

use lambars_ops::persistent::PersistentOrderedSet;
use rstest::rstest;

fn set(values: impl IntoIterator<Item = i32>) -> PersistentOrderedSet<i32> {
    values.into_iter().collect()
}

fn ordered(set: &PersistentOrderedSet<i32>) -> Vec<i32> {
    set.iter().copied().collect()
}

#[rstest]
fn test_duplicates_collapse_to_first_position() {
    let values = set([3, 1, 3, 2, 1]);
    assert_eq!(values.len(), 3);
    assert_eq!(ordered(&values), vec![3, 1, 2]);
}

#[rstest]
fn test_insert_existing_is_unchanged() {
    let values = set([1, 2]);
    let again = values.insert(1);
    assert_eq!(ordered(&again), vec![1, 2]);
    assert_eq!(ordered(&values.insert(0)), vec![1, 2, 0]);
}

#[rstest]
#[case(vec![1, 2, 3], vec![3, 4], vec![3])]
#[case(vec![5, 4], vec![4, 5], vec![5, 4])]
#[case(vec![1], vec![], vec![])]
fn test_intersection(#[case] left: Vec<i32>, #[case] right: Vec<i32>, #[case] expected: Vec<i32>) {
    assert_eq!(ordered(&set(left).intersection(&set(right))), expected);
}

#[rstest]
fn test_difference_and_union() {
    let left = set([1, 2, 3]);
    let right = set([2, 4]);
    assert_eq!(ordered(&left.difference(&right)), vec![1, 3]);
    assert_eq!(ordered(&left.union(&right)), vec![1, 2, 3, 4]);
}

#[rstest]
fn test_retain() {
    assert_eq!(ordered(&set(0..10).retain(|value| value % 3 == 0)), vec![0, 3, 6, 9]);
}

#[rstest]
fn test_equality_ignores_order() {
    assert_eq!(set([1, 2, 3]), set([3, 2, 1]));
    assert_ne!(set([1, 2]), set([1, 2, 3]));
}

#[rstest]
fn test_contains_borrowed() {
    let words: PersistentOrderedSet<String> = ["a".to_string(), "b".to_string()].into_iter().collect();
    assert!(words.contains("a"));
    assert!(!words.contains("c"));
}
