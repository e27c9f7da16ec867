//! Persistent key mapping that iterates in insertion order.
//!
//! [`PersistentOrderedMap`] pairs a HAMT index (key to slot) with a
//! [`PersistentVector`] of entries. Lookups go through the index; iteration
//! walks the vector, so keys come out in the order they were first inserted.
//! Re-inserting an existing key replaces its value in place.
//!
//! # Examples
//!
//! ```rust
//! use lambars_ops::persistent::PersistentOrderedMap;
//!
//! let map = PersistentOrderedMap::new()
//!     .insert("b", 2)
//!     .insert("a", 1)
//!     .insert("b", 20);
//!
//! let keys: Vec<&&str> = map.keys().collect();
//! assert_eq!(keys, vec![&"b", &"a"]);
//! assert_eq!(map.get("b"), Some(&20));
//! ```

use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FromIterator;

use super::hashmap::{PersistentHashMap, compute_hash};
use super::vector::{PersistentVector, PersistentVectorIntoIterator, PersistentVectorIterator};

/// A persistent map whose iteration order is insertion order.
///
/// Equality and hashing ignore order: two maps are equal when they bind the
/// same keys to equal values.
///
/// # Time Complexity
///
/// | Operation  | Complexity  |
/// |------------|-------------|
/// | `get`      | O(log32 N)  |
/// | `insert`   | O(log32 N)  |
/// | `iter`     | O(N)        |
/// | `len`      | O(1)        |
pub struct PersistentOrderedMap<K, V> {
    index: PersistentHashMap<K, usize>,
    entries: PersistentVector<(K, V)>,
}

impl<K, V> Clone for PersistentOrderedMap<K, V> {
    fn clone(&self) -> Self {
        Self {
            index: self.index.clone(),
            entries: self.entries.clone(),
        }
    }
}

impl<K, V> PersistentOrderedMap<K, V> {
    /// Creates a new empty map.
    #[must_use]
    pub fn new() -> Self {
        Self {
            index: PersistentHashMap::new(),
            entries: PersistentVector::new(),
        }
    }

    /// Returns the number of entries.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map has no entries.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns an iterator over `(key, value)` pairs in insertion order.
    #[must_use]
    pub fn iter(&self) -> PersistentOrderedMapIterator<'_, K, V> {
        PersistentOrderedMapIterator {
            entries: self.entries.iter(),
        }
    }

    /// Returns an iterator over the keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(key, _)| key)
    }

    /// Returns an iterator over the values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, value)| value)
    }
}

impl<K: Clone + Hash + Eq, V: Clone> PersistentOrderedMap<K, V> {
    /// Creates a map containing a single entry.
    #[must_use]
    pub fn singleton(key: K, value: V) -> Self {
        Self::new().insert(key, value)
    }

    /// Returns a reference to the value bound to `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_ops::persistent::PersistentOrderedMap;
    ///
    /// let map = PersistentOrderedMap::singleton("key".to_string(), 1);
    /// assert_eq!(map.get("key"), Some(&1));
    /// assert_eq!(map.get("other"), None);
    /// ```
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = *self.index.get(key)?;
        self.entries.get(slot).map(|(_, value)| value)
    }

    /// Returns `true` if the map binds `key`.
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(key).is_some()
    }

    /// Returns a new map with `key` bound to `value`.
    ///
    /// A new key is appended at the end of the iteration order; an existing
    /// key keeps its position and only its value changes.
    #[must_use]
    pub fn insert(&self, key: K, value: V) -> Self {
        if let Some(&slot) = self.index.get(&key)
            && let Some(entries) = self.entries.update(slot, (key.clone(), value.clone()))
        {
            return Self {
                index: self.index.clone(),
                entries,
            };
        }

        let index = self.index.insert(key.clone(), self.entries.len());
        let entries = self.entries.push_back((key, value));
        debug_assert_eq!(index.len(), entries.len());

        Self { index, entries }
    }

    /// Returns a new map where the value of `key` is replaced by
    /// `updater(current)`, starting from `default` when the key is unbound.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_ops::persistent::PersistentOrderedMap;
    ///
    /// let counts = PersistentOrderedMap::new()
    ///     .update_with("a", 0, |count| count + 1)
    ///     .update_with("a", 0, |count| count + 1);
    /// assert_eq!(counts.get("a"), Some(&2));
    /// ```
    #[must_use]
    pub fn update_with<F>(&self, key: K, default: V, updater: F) -> Self
    where
        F: FnOnce(V) -> V,
    {
        let current = self.get(&key).cloned().unwrap_or(default);
        self.insert(key, updater(current))
    }

    /// Returns a new map holding only the entries for which `predicate`
    /// returns `true`, in their original order.
    #[must_use]
    pub fn filter<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&K, &V) -> bool,
    {
        self.iter()
            .filter(|(key, value)| predicate(key, value))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

// =============================================================================
// Iterators
// =============================================================================

/// Borrowing iterator over a [`PersistentOrderedMap`].
pub struct PersistentOrderedMapIterator<'a, K, V> {
    entries: PersistentVectorIterator<'a, (K, V)>,
}

impl<'a, K, V> Iterator for PersistentOrderedMapIterator<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next().map(|(key, value)| (key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl<K, V> ExactSizeIterator for PersistentOrderedMapIterator<'_, K, V> {}

/// Owning iterator over a [`PersistentOrderedMap`].
pub struct PersistentOrderedMapIntoIterator<K, V> {
    entries: PersistentVectorIntoIterator<(K, V)>,
}

impl<K: Clone, V: Clone> Iterator for PersistentOrderedMapIntoIterator<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl<K: Clone, V: Clone> ExactSizeIterator for PersistentOrderedMapIntoIterator<K, V> {}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, V> Default for PersistentOrderedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone + Hash + Eq, V: Clone> FromIterator<(K, V)> for PersistentOrderedMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |map, (key, value)| map.insert(key, value))
    }
}

impl<K: Clone, V: Clone> IntoIterator for PersistentOrderedMap<K, V> {
    type Item = (K, V);
    type IntoIter = PersistentOrderedMapIntoIterator<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        PersistentOrderedMapIntoIterator {
            entries: self.entries.into_iter(),
        }
    }
}

impl<'a, K, V> IntoIterator for &'a PersistentOrderedMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = PersistentOrderedMapIterator<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Clone + Hash + Eq, V: Clone + PartialEq> PartialEq for PersistentOrderedMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key).is_some_and(|other_value| value == other_value))
    }
}

impl<K: Clone + Hash + Eq, V: Clone + Eq> Eq for PersistentOrderedMap<K, V> {}

/// Order-independent: entry hashes are combined with a commutative sum.
impl<K: Hash, V: Hash> Hash for PersistentOrderedMap<K, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let combined = self
            .iter()
            .fold(0u64, |sum, entry| sum.wrapping_add(compute_hash(&entry)));
        self.len().hash(state);
        combined.hash(state);
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for PersistentOrderedMap<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<K: serde::Serialize, V: serde::Serialize> serde::Serialize for PersistentOrderedMap<K, V> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_map(self.iter())
    }
}

#[cfg(feature = "serde")]
struct PersistentOrderedMapVisitor<K, V> {
    marker: std::marker::PhantomData<(K, V)>,
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::de::Visitor<'de> for PersistentOrderedMapVisitor<K, V>
where
    K: serde::Deserialize<'de> + Clone + Hash + Eq,
    V: serde::Deserialize<'de> + Clone,
{
    type Value = PersistentOrderedMap<K, V>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        let mut map = PersistentOrderedMap::new();
        while let Some((key, value)) = access.next_entry()? {
            map = map.insert(key, value);
        }
        Ok(map)
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::Deserialize<'de> for PersistentOrderedMap<K, V>
where
    K: serde::Deserialize<'de> + Clone + Hash + Eq,
    V: serde::Deserialize<'de> + Clone,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_map(PersistentOrderedMapVisitor {
            marker: std::marker::PhantomData,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_reinsert_keeps_position() {
        let map = PersistentOrderedMap::new()
            .insert('a', 1)
            .insert('b', 2)
            .insert('a', 3);

        let entries: Vec<(char, i32)> = map.into_iter().collect();
        assert_eq!(entries, vec![('a', 3), ('b', 2)]);
    }

    #[rstest]
    fn test_equality_ignores_order() {
        let left: PersistentOrderedMap<char, i32> = [('a', 1), ('b', 2)].into_iter().collect();
        let right: PersistentOrderedMap<char, i32> = [('b', 2), ('a', 1)].into_iter().collect();
        let different: PersistentOrderedMap<char, i32> = [('a', 1), ('b', 3)].into_iter().collect();

        assert_eq!(left, right);
        assert_eq!(compute_hash(&left), compute_hash(&right));
        assert_ne!(left, different);
    }

    #[rstest]
    fn test_filter_preserves_order() {
        let map: PersistentOrderedMap<i32, i32> = (0..10).map(|key| (key, key * key)).collect();
        let even = map.filter(|key, _| key % 2 == 0);
        let keys: Vec<i32> = even.keys().copied().collect();
        assert_eq!(keys, vec![0, 2, 4, 6, 8]);
    }

    #[rstest]
    fn test_debug_format() {
        let map = PersistentOrderedMap::singleton("a", 1);
        assert_eq!(format!("{map:?}"), r#"{"a": 1}"#);
    }
}
