//! Unit tests for PersistentOrderedMap.

use lambars_ops::persistent::PersistentOrderedMap;
use rstest::rstest;

// =============================================================================
// Insertion order
// =============================================================================

#[rstest]
fn test_iterates_in_insertion_order() {
    let map = PersistentOrderedMap::new()
        .insert("zebra", 1)
        .insert("apple", 2)
        .insert("mango", 3);
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec!["zebra", "apple", "mango"]);
    assert_eq!(map.values().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
}

#[rstest]
fn test_overwrite_keeps_position() {
    let map = PersistentOrderedMap::from_iter([("a", 1), ("b", 2), ("a", 3)]);
    assert_eq!(map.len(), 2);
    assert_eq!(map.into_iter().collect::<Vec<_>>(), vec![("a", 3), ("b", 2)]);
}

#[rstest]
fn test_many_keys() {
    let map: PersistentOrderedMap<u32, u32> = (0..5000).map(|key| (key, key * 2)).collect();
    assert_eq!(map.len(), 5000);
    for key in [0, 31, 32, 1024, 4999] {
        assert_eq!(map.get(&key), Some(&(key * 2)));
    }
    assert!(map.keys().copied().eq(0..5000));
}

// =============================================================================
// Persistence
// =============================================================================

#[rstest]
fn test_insert_leaves_original() {
    let original = PersistentOrderedMap::singleton("a".to_string(), 1);
    let extended = original.insert("b".to_string(), 2);
    assert!(!original.contains_key("b"));
    assert!(extended.contains_key("b"));
    assert_eq!(original.get("a"), Some(&1));
}

#[rstest]
fn test_update_with_counts() {
    let counts = ["x", "y", "x", "x"]
        .into_iter()
        .fold(PersistentOrderedMap::<&str, i32>::new(), |counts, key| {
            counts.update_with(key, 0, |count| count + 1)
        });
    assert_eq!(counts.get("x"), Some(&3));
    assert_eq!(counts.get("y"), Some(&1));
}

#[rstest]
fn test_filter_keeps_order() {
    let map: PersistentOrderedMap<i32, char> = [(3, 'c'), (1, 'a'), (2, 'b')].into_iter().collect();
    let odd = map.filter(|key, _| key % 2 == 1);
    assert_eq!(odd.into_iter().collect::<Vec<_>>(), vec![(3, 'c'), (1, 'a')]);
}

// =============================================================================
// Equality
// =============================================================================

#[rstest]
fn test_equality_ignores_order() {
    let left = PersistentOrderedMap::from_iter([("a", 1), ("b", 2)]);
    let right = PersistentOrderedMap::from_iter([("b", 2), ("a", 1)]);
    assert_eq!(left, right);
    assert_ne!(left, PersistentOrderedMap::from_iter([("a", 1), ("b", 3)]));
    assert_ne!(left, PersistentOrderedMap::singleton("a", 1));
}

#[rstest]
fn test_equal_maps_hash_equally() {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    let hash = |map: &PersistentOrderedMap<&str, i32>| {
        let mut hasher = DefaultHasher::new();
        map.hash(&mut hasher);
        hasher.finish()
    };
    let left = PersistentOrderedMap::from_iter([("a", 1), ("b", 2)]);
    let right = PersistentOrderedMap::from_iter([("b", 2), ("a", 1)]);
    assert_eq!(hash(&left), hash(&right));
}

#[rstest]
fn test_debug_shows_entries_in_order() {
    let map = PersistentOrderedMap::from_iter([("b", 2), ("a", 1)]);
    assert_eq!(format!("{map:?}"), r#"{"b": 2, "a": 1}"#);
}
