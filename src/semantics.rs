//! Capability traits that give the operations their type-agnostic meaning.
//!
//! Each operation in [`crate::ops`] is generic over its element type and asks
//! only for the capability it needs:
//!
//! | Trait            | Used by                                         |
//! |------------------|-------------------------------------------------|
//! | [`Sentinel`]     | `sorted_index*`, `defaults`                     |
//! | [`SortKey`]      | `sorted_index*`                                 |
//! | [`Truthy`]       | `compact`                                       |
//! | [`Measured`]     | `size`                                          |
//! | [`PathLookup`]   | `at`                                            |
//! | [`DeepDefaults`] | `defaults_deep`                                 |
//! | [`Entries`]      | `count_by`, `group_by`, `key_by`, `partition`   |
//!
//! Implementations are provided for the primitive types, `String`/`str`,
//! `Option`, the persistent collections, and [`Value`].

use std::hash::Hash;

use crate::persistent::{PersistentOrderedMap, PersistentOrderedSet, PersistentVector};
use crate::value::Value;

// =============================================================================
// Sentinel
// =============================================================================

/// Classifies the special values the sort-position search orders last.
///
/// Ordinary values are present, non-null and reflexive, which is what the
/// default methods report.
///
/// # Examples
///
/// ```rust
/// use lambars_ops::semantics::Sentinel;
/// use lambars_ops::value::Value;
///
/// assert!(None::<i32>.is_absent());
/// assert!(Value::Null.is_null());
/// assert!(!f64::NAN.is_reflexive());
/// assert!(3.is_reflexive());
/// ```
pub trait Sentinel {
    /// Returns `true` for a value that was never set.
    fn is_absent(&self) -> bool {
        false
    }

    /// Returns `true` for an explicit null.
    fn is_null(&self) -> bool {
        false
    }

    /// Returns `false` for a value that does not equal itself (NaN).
    fn is_reflexive(&self) -> bool {
        true
    }
}

macro_rules! impl_ordinary_sentinel {
    ($($type:ty),* $(,)?) => {
        $(impl Sentinel for $type {})*
    };
}

impl_ordinary_sentinel!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, str, String,
);

impl Sentinel for f32 {
    fn is_reflexive(&self) -> bool {
        !self.is_nan()
    }
}

impl Sentinel for f64 {
    fn is_reflexive(&self) -> bool {
        !self.is_nan()
    }
}

impl<T: Sentinel> Sentinel for Option<T> {
    fn is_absent(&self) -> bool {
        self.as_ref().is_none_or(Sentinel::is_absent)
    }

    fn is_null(&self) -> bool {
        self.as_ref().is_some_and(Sentinel::is_null)
    }

    fn is_reflexive(&self) -> bool {
        self.as_ref().is_none_or(Sentinel::is_reflexive)
    }
}

impl<T: Sentinel + ?Sized> Sentinel for &T {
    fn is_absent(&self) -> bool {
        (**self).is_absent()
    }

    fn is_null(&self) -> bool {
        (**self).is_null()
    }

    fn is_reflexive(&self) -> bool {
        (**self).is_reflexive()
    }
}

impl Sentinel for Value {
    fn is_absent(&self) -> bool {
        self.is_undefined()
    }

    fn is_null(&self) -> bool {
        Self::is_null(self)
    }

    fn is_reflexive(&self) -> bool {
        !self.is_nan()
    }
}

/// A key the sort-position search can order.
pub trait SortKey: Sentinel + PartialOrd {}

impl<T: Sentinel + PartialOrd + ?Sized> SortKey for T {}

// =============================================================================
// Truthy
// =============================================================================

/// Boolean interpretation of a value.
///
/// Falsey values are absent, null, `false`, zero, NaN and the empty string.
/// Collections are always truthy, even when empty.
pub trait Truthy {
    /// Returns `true` when the value is not falsey.
    fn is_truthy(&self) -> bool;
}

impl Truthy for bool {
    fn is_truthy(&self) -> bool {
        *self
    }
}

macro_rules! impl_integer_truthy {
    ($($type:ty),* $(,)?) => {
        $(impl Truthy for $type {
            fn is_truthy(&self) -> bool {
                *self != 0
            }
        })*
    };
}

impl_integer_truthy!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl Truthy for f32 {
    fn is_truthy(&self) -> bool {
        *self != 0.0 && !self.is_nan()
    }
}

impl Truthy for f64 {
    fn is_truthy(&self) -> bool {
        *self != 0.0 && !self.is_nan()
    }
}

impl Truthy for str {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl Truthy for String {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl<T: Truthy> Truthy for Option<T> {
    fn is_truthy(&self) -> bool {
        self.as_ref().is_some_and(Truthy::is_truthy)
    }
}

impl<T: Truthy + ?Sized> Truthy for &T {
    fn is_truthy(&self) -> bool {
        (**self).is_truthy()
    }
}

impl<T> Truthy for PersistentVector<T> {
    fn is_truthy(&self) -> bool {
        true
    }
}

impl<K, V> Truthy for PersistentOrderedMap<K, V> {
    fn is_truthy(&self) -> bool {
        true
    }
}

impl<T> Truthy for PersistentOrderedSet<T> {
    fn is_truthy(&self) -> bool {
        true
    }
}

impl Truthy for Value {
    fn is_truthy(&self) -> bool {
        match self {
            Self::Undefined | Self::Null => false,
            Self::Bool(boolean) => *boolean,
            Self::Number(number) => number.is_truthy(),
            Self::String(text) => !text.is_empty(),
            Self::List(_) | Self::Map(_) => true,
        }
    }
}

// =============================================================================
// Measured
// =============================================================================

/// Anything with a size.
///
/// Collections report their element count, text its character count and an
/// absent value zero. Scalars have no size.
pub trait Measured {
    /// Returns the size of the value.
    fn measure(&self) -> usize;
}

impl<T> Measured for PersistentVector<T> {
    fn measure(&self) -> usize {
        self.len()
    }
}

impl<K, V> Measured for PersistentOrderedMap<K, V> {
    fn measure(&self) -> usize {
        self.len()
    }
}

impl<T> Measured for PersistentOrderedSet<T> {
    fn measure(&self) -> usize {
        self.len()
    }
}

impl<T> Measured for [T] {
    fn measure(&self) -> usize {
        self.len()
    }
}

impl<T> Measured for Vec<T> {
    fn measure(&self) -> usize {
        self.len()
    }
}

impl Measured for str {
    fn measure(&self) -> usize {
        self.chars().count()
    }
}

impl Measured for String {
    fn measure(&self) -> usize {
        self.as_str().measure()
    }
}

impl<T: Measured> Measured for Option<T> {
    fn measure(&self) -> usize {
        self.as_ref().map_or(0, Measured::measure)
    }
}

impl<T: Measured + ?Sized> Measured for &T {
    fn measure(&self) -> usize {
        (**self).measure()
    }
}

impl Measured for Value {
    fn measure(&self) -> usize {
        match self {
            Self::String(text) => text.measure(),
            Self::List(list) => list.len(),
            Self::Map(map) => map.len(),
            Self::Undefined | Self::Null | Self::Bool(_) | Self::Number(_) => 0,
        }
    }
}

// =============================================================================
// PathLookup
// =============================================================================

/// Splits a property path such as `a[0].b.c` into its segments.
///
/// `.`, `[` and `]` all act as separators and empty segments are dropped.
///
/// # Examples
///
/// ```rust
/// use lambars_ops::semantics::split_path;
///
/// let segments: Vec<&str> = split_path("a[0].b..c]").collect();
/// assert_eq!(segments, vec!["a", "0", "b", "c"]);
/// ```
pub fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.split(['.', '[', ']'])
        .filter(|segment| !segment.is_empty())
}

/// Nested access by a sequence of path segments.
pub trait PathLookup {
    /// The type found at the end of a path.
    type Output;

    /// Follows `segments` from `self`; `None` when any step is missing.
    ///
    /// An empty path yields the root itself.
    fn lookup<'a, I>(&self, segments: I) -> Option<Self::Output>
    where
        I: IntoIterator<Item = &'a str>;

    /// Follows a dotted / bracketed path, see [`split_path`].
    fn lookup_path(&self, path: &str) -> Option<Self::Output> {
        self.lookup(split_path(path))
    }
}

fn descend<'v, 'a, I>(root: &'v Value, segments: I) -> Option<&'v Value>
where
    I: IntoIterator<Item = &'a str>,
{
    segments
        .into_iter()
        .try_fold(root, |current, segment| current.get(segment))
}

impl PathLookup for Value {
    type Output = Self;

    fn lookup<'a, I>(&self, segments: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        descend(self, segments).cloned()
    }
}

impl PathLookup for PersistentOrderedMap<Value, Value> {
    type Output = Value;

    fn lookup<'a, I>(&self, segments: I) -> Option<Value>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut segments = segments.into_iter();
        let Some(first) = segments.next() else {
            return Some(Value::Map(self.clone()));
        };
        let child = self.get(&Value::from(first))?;
        descend(child, segments).cloned()
    }
}

impl PathLookup for PersistentOrderedMap<String, Value> {
    type Output = Value;

    fn lookup<'a, I>(&self, segments: I) -> Option<Value>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut segments = segments.into_iter();
        let Some(first) = segments.next() else {
            return Some(Value::map(
                self.iter().map(|(key, value)| (key.as_str(), value.clone())),
            ));
        };
        let child = self.get(first)?;
        descend(child, segments).cloned()
    }
}

impl PathLookup for PersistentVector<Value> {
    type Output = Value;

    fn lookup<'a, I>(&self, segments: I) -> Option<Value>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut segments = segments.into_iter();
        let Some(first) = segments.next() else {
            return Some(Value::List(self.clone()));
        };
        let child = self.get(first.parse::<usize>().ok()?)?;
        descend(child, segments).cloned()
    }
}

// =============================================================================
// DeepDefaults
// =============================================================================

/// Recursive defaulting, the merge behind `defaults_deep`.
///
/// `self` is the value already present and `source` the default offered for
/// it. Nested maps are merged key by key; elsewhere `source` only replaces an
/// absent value.
pub trait DeepDefaults: Sized {
    /// Returns `self` with the gaps filled from `source`.
    #[must_use]
    fn fill_defaults(&self, source: &Self) -> Self;
}

/// Adds every key of `source` to `target`, recursing into keys present in
/// both.
pub(crate) fn fill_map_defaults<K, V>(
    target: &PersistentOrderedMap<K, V>,
    source: &PersistentOrderedMap<K, V>,
) -> PersistentOrderedMap<K, V>
where
    K: Clone + Hash + Eq,
    V: Clone + DeepDefaults,
{
    source.iter().fold(target.clone(), |merged, (key, offered)| {
        let filled = match merged.get(key) {
            Some(existing) => existing.fill_defaults(offered),
            None => offered.clone(),
        };
        merged.insert(key.clone(), filled)
    })
}

/// Maps merge key by key; lists and scalars are leaves.
impl DeepDefaults for Value {
    fn fill_defaults(&self, source: &Self) -> Self {
        match (self, source) {
            (Self::Map(target), Self::Map(offered)) => Self::Map(fill_map_defaults(target, offered)),
            (Self::Undefined, offered) => offered.clone(),
            (existing, _) => existing.clone(),
        }
    }
}

impl<K, V> DeepDefaults for PersistentOrderedMap<K, V>
where
    K: Clone + Hash + Eq,
    V: Clone + DeepDefaults,
{
    fn fill_defaults(&self, source: &Self) -> Self {
        fill_map_defaults(self, source)
    }
}

impl<T: Clone + DeepDefaults> DeepDefaults for Option<T> {
    fn fill_defaults(&self, source: &Self) -> Self {
        match (self, source) {
            (Some(existing), Some(offered)) => Some(existing.fill_defaults(offered)),
            (None, offered) => offered.clone(),
            (existing, None) => existing.clone(),
        }
    }
}

// =============================================================================
// Entries
// =============================================================================

/// Key/value traversal of a collection.
///
/// Sequences are keyed by position, maps by their own keys.
pub trait Entries {
    /// The entry key.
    type Key;
    /// The entry value.
    type Item;

    /// Iterates `(key, &value)` pairs in collection order.
    fn entries(&self) -> impl Iterator<Item = (Self::Key, &Self::Item)>;
}

impl<T> Entries for PersistentVector<T> {
    type Key = usize;
    type Item = T;

    fn entries(&self) -> impl Iterator<Item = (usize, &T)> {
        self.iter().enumerate()
    }
}

impl<K: Clone, V> Entries for PersistentOrderedMap<K, V> {
    type Key = K;
    type Item = V;

    fn entries(&self) -> impl Iterator<Item = (K, &V)> {
        self.iter().map(|(key, value)| (key.clone(), value))
    }
}

impl<T> Entries for PersistentOrderedSet<T> {
    type Key = usize;
    type Item = T;

    fn entries(&self) -> impl Iterator<Item = (usize, &T)> {
        self.iter().enumerate()
    }
}
