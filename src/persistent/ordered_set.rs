//! Persistent set that iterates in first-insertion order.
//!
//! [`PersistentOrderedSet`] is a thin layer over
//! [`PersistentOrderedMap`] with unit values. It is the result type of the
//! de-duplicating operations (`uniq`, `union`, `intersection`, `xor`), whose
//! output order is the order in which values were first seen.
//!
//! # Examples
//!
//! ```rust
//! use lambars_ops::persistent::PersistentOrderedSet;
//!
//! let set: PersistentOrderedSet<i32> = [3, 1, 3, 2, 1].into_iter().collect();
//! let values: Vec<i32> = set.iter().copied().collect();
//! assert_eq!(values, vec![3, 1, 2]);
//! ```

use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FromIterator;

use super::ordered_map::{
    PersistentOrderedMap, PersistentOrderedMapIntoIterator, PersistentOrderedMapIterator,
};

/// A persistent set of unique values, iterated in first-insertion order.
///
/// Equality ignores order.
pub struct PersistentOrderedSet<T> {
    map: PersistentOrderedMap<T, ()>,
}

impl<T> Clone for PersistentOrderedSet<T> {
    fn clone(&self) -> Self {
        Self {
            map: self.map.clone(),
        }
    }
}

impl<T> PersistentOrderedSet<T> {
    /// Creates a new empty set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            map: PersistentOrderedMap::new(),
        }
    }

    /// Returns the number of values.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the set has no values.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns an iterator over the values in first-insertion order.
    #[must_use]
    pub fn iter(&self) -> PersistentOrderedSetIterator<'_, T> {
        PersistentOrderedSetIterator {
            entries: self.map.iter(),
        }
    }
}

impl<T: Clone + Hash + Eq> PersistentOrderedSet<T> {
    /// Returns `true` if the set contains `value`.
    #[must_use]
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.contains_key(value)
    }

    /// Returns a new set with `value` added.
    ///
    /// Inserting a value already present returns an equal set with the value
    /// in its original position.
    #[must_use]
    pub fn insert(&self, value: T) -> Self {
        if self.contains(&value) {
            return self.clone();
        }
        Self {
            map: self.map.insert(value, ()),
        }
    }

    /// Returns the values of `self` also present in `other`, in the order of
    /// `self`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_ops::persistent::PersistentOrderedSet;
    ///
    /// let left: PersistentOrderedSet<i32> = [2, 1, 3].into_iter().collect();
    /// let right: PersistentOrderedSet<i32> = [3, 2].into_iter().collect();
    /// let common: Vec<i32> = left.intersection(&right).into_iter().collect();
    /// assert_eq!(common, vec![2, 3]);
    /// ```
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        self.retain(|value| other.contains(value))
    }

    /// Returns the values of `self` not present in `other`, in the order of
    /// `self`.
    #[must_use]
    pub fn difference(&self, other: &Self) -> Self {
        self.retain(|value| !other.contains(value))
    }

    /// Returns every value of `self` followed by the values of `other` not
    /// already present.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        other
            .iter()
            .fold(self.clone(), |set, value| set.insert(value.clone()))
    }

    /// Returns a new set holding the values for which `predicate` holds.
    #[must_use]
    pub fn retain<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&T) -> bool,
    {
        Self {
            map: self.map.filter(|value, ()| predicate(value)),
        }
    }
}

// =============================================================================
// Iterators
// =============================================================================

/// Borrowing iterator over a [`PersistentOrderedSet`].
pub struct PersistentOrderedSetIterator<'a, T> {
    entries: PersistentOrderedMapIterator<'a, T, ()>,
}

impl<'a, T> Iterator for PersistentOrderedSetIterator<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next().map(|(value, ())| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl<T> ExactSizeIterator for PersistentOrderedSetIterator<'_, T> {}

/// Owning iterator over a [`PersistentOrderedSet`].
pub struct PersistentOrderedSetIntoIterator<T> {
    entries: PersistentOrderedMapIntoIterator<T, ()>,
}

impl<T: Clone> Iterator for PersistentOrderedSetIntoIterator<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next().map(|(value, ())| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl<T: Clone> ExactSizeIterator for PersistentOrderedSetIntoIterator<T> {}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Default for PersistentOrderedSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Hash + Eq> FromIterator<T> for PersistentOrderedSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |set, value| set.insert(value))
    }
}

impl<T: Clone> IntoIterator for PersistentOrderedSet<T> {
    type Item = T;
    type IntoIter = PersistentOrderedSetIntoIterator<T>;

    fn into_iter(self) -> Self::IntoIter {
        PersistentOrderedSetIntoIterator {
            entries: self.map.into_iter(),
        }
    }
}

impl<'a, T> IntoIterator for &'a PersistentOrderedSet<T> {
    type Item = &'a T;
    type IntoIter = PersistentOrderedSetIterator<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Clone + Hash + Eq> PartialEq for PersistentOrderedSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.map == other.map
    }
}

impl<T: Clone + Hash + Eq> Eq for PersistentOrderedSet<T> {}

impl<T: Hash> Hash for PersistentOrderedSet<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.map.hash(state);
    }
}

impl<T: fmt::Debug> fmt::Debug for PersistentOrderedSet<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for PersistentOrderedSet<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for PersistentOrderedSet<T>
where
    T: serde::Deserialize<'de> + Clone + Hash + Eq,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let values = <Vec<T> as serde::Deserialize>::deserialize(deserializer)?;
        Ok(values.into_iter().collect())
    }
}
