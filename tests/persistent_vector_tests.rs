//! Unit tests for PersistentVector.

use lambars_ops::persistent::PersistentVector;
use rstest::rstest;

// =============================================================================
// Construction
// =============================================================================

#[rstest]
fn test_new_is_empty() {
    let vector: PersistentVector<i32> = PersistentVector::new();
    assert!(vector.is_empty());
    assert_eq!(vector.len(), 0);
    assert_eq!(vector.first(), None);
    assert_eq!(vector.last(), None);
}

#[rstest]
fn test_singleton() {
    let vector = PersistentVector::singleton("only");
    assert_eq!(vector.len(), 1);
    assert_eq!(vector.first(), vector.last());
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(32)]
#[case(33)]
#[case(1025)]
#[case(40_000)]
fn test_from_iter_preserves_order(#[case] size: usize) {
    let vector: PersistentVector<usize> = (0..size).collect();
    assert_eq!(vector.len(), size);
    assert!(vector.iter().copied().eq(0..size));
    assert!(vector.clone().into_iter().eq(0..size));
}

// =============================================================================
// Access
// =============================================================================

#[rstest]
fn test_get_across_trie_levels() {
    let vector: PersistentVector<usize> = (0..2000).collect();
    for index in [0, 31, 32, 1023, 1024, 1999] {
        assert_eq!(vector.get(index), Some(&index));
        assert_eq!(vector[index], index);
    }
    assert_eq!(vector.get(2000), None);
}

// =============================================================================
// Persistence
// =============================================================================

#[rstest]
fn test_push_back_leaves_original() {
    let original: PersistentVector<i32> = (0..100).collect();
    let pushed = original.push_back(100);
    assert_eq!(original.len(), 100);
    assert_eq!(pushed.len(), 101);
    assert_eq!(pushed.last(), Some(&100));
}

#[rstest]
#[case(5)]
#[case(40)]
#[case(1500)]
fn test_update_leaves_original(#[case] index: usize) {
    let original: PersistentVector<usize> = (0..2000).collect();
    let updated = original.update(index, 0).unwrap();
    assert_eq!(updated.get(index), Some(&0));
    assert_eq!(original.get(index), Some(&index));
}

#[rstest]
fn test_update_out_of_range() {
    let vector: PersistentVector<i32> = (0..3).collect();
    assert!(vector.update(3, 9).is_none());
}

// =============================================================================
// slice / append
// =============================================================================

#[rstest]
#[case(1..3, vec![1, 2])]
#[case(0..0, vec![])]
#[case(4..100, vec![4])]
#[case(9..12, vec![])]
fn test_slice(#[case] range: std::ops::Range<usize>, #[case] expected: Vec<i32>) {
    let vector: PersistentVector<i32> = (0..5).collect();
    assert_eq!(vector.slice(range).into_iter().collect::<Vec<_>>(), expected);
}

#[rstest]
#[case(0)]
#[case(31)]
#[case(32)]
#[case(1000)]
#[case(1055)]
#[case(1099)]
#[case(1100)]
fn test_iter_nth_matches_std(#[case] skip: usize) {
    let elements: Vec<usize> = (0..1100).collect();
    let vector: PersistentVector<usize> = elements.iter().copied().collect();

    let mut iterator = vector.iter();
    let mut expected = elements.iter();
    assert_eq!(iterator.nth(skip), expected.nth(skip));
    assert_eq!(iterator.next(), expected.next());
    assert_eq!(iterator.len(), expected.len());
}

#[rstest]
fn test_iter_nth_within_same_leaf() {
    let vector: PersistentVector<i32> = (0..100).collect();
    let mut iterator = vector.iter();
    assert_eq!(iterator.next(), Some(&0));
    assert_eq!(iterator.nth(3), Some(&4));
    assert_eq!(iterator.nth(30), Some(&35));
    assert_eq!(iterator.nth(1000), None);
    assert_eq!(iterator.next(), None);
}

#[rstest]
fn test_into_iter_nth() {
    let vector: PersistentVector<i32> = (0..100).collect();
    let mut iterator = vector.into_iter();
    assert_eq!(iterator.nth(64), Some(64));
    assert_eq!(iterator.next(), Some(65));
    assert_eq!(iterator.nth(100), None);
}

#[rstest]
fn test_slice_deep_into_large_vector() {
    let vector: PersistentVector<usize> = (0..50_000).collect();
    let tail = vector.slice(49_990..);
    assert_eq!(tail.into_iter().collect::<Vec<_>>(), (49_990..50_000).collect::<Vec<_>>());
}

#[rstest]
fn test_append() {
    let left: PersistentVector<i32> = (0..40).collect();
    let right: PersistentVector<i32> = (40..90).collect();
    let joined = left.append(&right);
    assert!(joined.iter().copied().eq(0..90));
    assert_eq!(left.len(), 40);
}

#[rstest]
fn test_append_to_empty() {
    let right: PersistentVector<i32> = (0..3).collect();
    assert_eq!(PersistentVector::new().append(&right), right);
}

// =============================================================================
// Equality
// =============================================================================

#[rstest]
fn test_equality_is_structural() {
    let built: PersistentVector<i32> = (0..50).collect();
    let pushed = (0..50).fold(PersistentVector::new(), |vector, element| vector.push_back(element));
    assert_eq!(built, pushed);
    assert_ne!(built, pushed.push_back(50));
}

#[rstest]
fn test_debug_lists_elements() {
    let vector: PersistentVector<i32> = (1..=3).collect();
    assert_eq!(format!("{vector:?}"), "[1, 2, 3]");
}
