//! Tests for set-style combination of collections.

use lambars_ops::prelude::*;
use rstest::rstest;

fn vector<T: Clone>(elements: impl IntoIterator<Item = T>) -> PersistentVector<T> {
    elements.into_iter().collect()
}

fn ordered<T: Clone>(set: PersistentOrderedSet<T>) -> Vec<T> {
    set.into_iter().collect()
}

// =============================================================================
// intersection
// =============================================================================

#[rstest]
fn test_intersection_keeps_order_of_first() {
    let common = intersection(vector([2, 1, 3, 2]), [vec![3, 2], vec![1, 2, 3]])
        .computed()
        .unwrap();
    assert_eq!(ordered(common), vec![2, 3]);
}

#[rstest]
fn test_intersection_without_rest_is_uniq() {
    let common = intersection(vector([1, 1, 2]), Vec::<Vec<i32>>::new())
        .computed()
        .unwrap();
    assert_eq!(ordered(common), vec![1, 2]);
}

#[rstest]
fn test_intersection_with_disjoint_is_empty() {
    let common = intersection(vector([1, 2]), [vec![3]]).computed().unwrap();
    assert!(common.is_empty());
}

#[rstest]
fn test_intersection_all_of_nothing_is_empty() {
    assert!(intersection_all(Vec::<Vec<i32>>::new()).is_empty());
}

#[rstest]
fn test_intersection_all_of_several() {
    let common = intersection_all([vec!['a', 'b', 'c'], vec!['c', 'a'], vec!['a', 'c', 'd']]);
    assert_eq!(ordered(common), vec!['a', 'c']);
}

// =============================================================================
// union / uniq
// =============================================================================

#[rstest]
fn test_union_first_seen_order() {
    let all = union(vector([2]), [vec![1, 2], vec![3, 1]]).computed().unwrap();
    assert_eq!(ordered(all), vec![2, 1, 3]);
}

#[rstest]
fn test_uniq_keeps_first_occurrence() {
    let unique = uniq(vector(["b", "a", "b", "c", "a"])).computed().unwrap();
    assert_eq!(ordered(unique), vec!["b", "a", "c"]);
}

#[rstest]
fn test_uniq_treats_nan_as_one_value() {
    let unique = uniq(vector([Value::from(f64::NAN), Value::from(f64::NAN), Value::from(0)]))
        .computed()
        .unwrap();
    assert_eq!(unique.len(), 2);
}

// =============================================================================
// xor
// =============================================================================

#[rstest]
fn test_xor_of_two() {
    let exclusive = xor(vector([2, 1]), [vec![2, 3]]).computed().unwrap();
    assert_eq!(ordered(exclusive), vec![1, 3]);
}

#[rstest]
fn test_xor_counts_collections_not_occurrences() {
    let exclusive = xor(vector([1, 1, 2]), [vec![3, 3]]).computed().unwrap();
    assert_eq!(ordered(exclusive), vec![1, 2, 3]);
}

#[rstest]
fn test_xor_across_three_is_exactly_one() {
    let exclusive = xor(vector([1, 2, 3]), [vec![2, 3, 4], vec![3, 4, 5]])
        .computed()
        .unwrap();
    assert_eq!(ordered(exclusive), vec![1, 5]);
}

#[rstest]
fn test_xor_with_single_collection_is_uniq() {
    let exclusive = xor(vector([4, 4, 5]), Vec::<Vec<i32>>::new()).computed().unwrap();
    assert_eq!(ordered(exclusive), vec![4, 5]);
}
