//! Persistent (immutable) data structures.
//!
//! The operations in [`crate::ops`] take and return these collections:
//!
//! - [`PersistentVector`]: ordered sequence (32-way radix trie with tail)
//! - [`PersistentOrderedMap`]: key mapping iterating in insertion order
//! - [`PersistentOrderedSet`]: unique values iterating in first-seen order
//!
//! The ordered types are indexed by a crate-private HAMT.
//!
//! # Structural Sharing
//!
//! Every update returns a new version that shares unchanged nodes with the
//! previous one. Cloning any collection is O(1).
//!
//! # Examples
//!
//! ```rust
//! use lambars_ops::persistent::PersistentVector;
//!
//! let vector: PersistentVector<i32> = (0..100).collect();
//! let updated = vector.update(50, 999).unwrap();
//! assert_eq!(vector.get(50), Some(&50));
//! assert_eq!(updated.get(50), Some(&999));
//! ```
//!
//! ```rust
//! use lambars_ops::persistent::PersistentOrderedMap;
//!
//! let map = PersistentOrderedMap::new()
//!     .insert("one".to_string(), 1)
//!     .insert("two".to_string(), 2);
//! let updated = map.insert("one".to_string(), 100);
//! assert_eq!(map.get("one"), Some(&1));
//! assert_eq!(updated.get("one"), Some(&100));
//! ```

// =============================================================================
// Reference Counter Type Alias
// =============================================================================

/// Reference-counted smart pointer type.
///
/// With the `arc` feature this is `std::sync::Arc`, so collections are
/// `Send + Sync` when their elements are. Otherwise it is `std::rc::Rc`.
#[cfg(feature = "arc")]
pub(crate) type ReferenceCounter<T> = std::sync::Arc<T>;

#[cfg(not(feature = "arc"))]
pub(crate) type ReferenceCounter<T> = std::rc::Rc<T>;

mod hashmap;
mod ordered_map;
mod ordered_set;
mod vector;

pub use ordered_map::PersistentOrderedMap;
pub use ordered_map::PersistentOrderedMapIntoIterator;
pub use ordered_map::PersistentOrderedMapIterator;
pub use ordered_set::PersistentOrderedSet;
pub use ordered_set::PersistentOrderedSetIntoIterator;
pub use ordered_set::PersistentOrderedSetIterator;
pub use vector::PersistentVector;
pub use vector::PersistentVectorIntoIterator;
pub use vector::PersistentVectorIterator;

pub(crate) use vector::clamp_range;

#[cfg(feature = "arc")]
mod thread_safety {
    use super::{PersistentOrderedMap, PersistentOrderedSet, PersistentVector};

    static_assertions::assert_impl_all!(PersistentVector<i32>: Send, Sync);
    static_assertions::assert_impl_all!(PersistentOrderedMap<String, i32>: Send, Sync);
    static_assertions::assert_impl_all!(PersistentOrderedSet<String>: Send, Sync);
}

#[cfg(not(feature = "arc"))]
static_assertions::assert_not_impl_any!(PersistentVector<i32>: Send, Sync);

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod reference_counter_tests {
    use super::ReferenceCounter;
    use rstest::rstest;

    #[rstest]
    fn test_reference_counter_strong_count() {
        let reference_counter: ReferenceCounter<i32> = ReferenceCounter::new(42);
        assert_eq!(ReferenceCounter::strong_count(&reference_counter), 1);
        let reference_counter_clone = reference_counter.clone();
        assert_eq!(ReferenceCounter::strong_count(&reference_counter), 2);
        drop(reference_counter_clone);
        assert_eq!(ReferenceCounter::strong_count(&reference_counter), 1);
    }
}
