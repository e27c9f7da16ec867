//! Operations that reshape a single ordered sequence.
//!
//! Every function here takes the sequence as its first argument and is
//! guarded: an empty or absent sequence comes back as
//! [`Guarded::Passthrough`] and nothing else is consumed.

use std::hash::Hash;
use std::ops::RangeBounds;

use super::guard::{Guardable, Guarded, guard};
use crate::persistent::{PersistentOrderedSet, PersistentVector, clamp_range};
use crate::semantics::Truthy;

/// Splits `sequence` into runs of `size` elements; the last run may be
/// shorter.
///
/// A `size` of zero yields no runs.
///
/// # Examples
///
/// ```rust
/// use lambars_ops::ops::sequence::chunk;
/// use lambars_ops::persistent::PersistentVector;
///
/// let letters: PersistentVector<char> = ['a', 'b', 'c'].into_iter().collect();
/// let chunks = chunk(letters, 2).computed().unwrap();
/// assert_eq!(chunks.len(), 2);
/// assert_eq!(chunks[1], PersistentVector::singleton('c'));
/// ```
pub fn chunk<I, T>(sequence: I, size: usize) -> Guarded<I, PersistentVector<PersistentVector<T>>>
where
    I: Guardable<Inner = PersistentVector<T>>,
    T: Clone,
{
    guard("chunk", sequence, |sequence| {
        if size == 0 {
            return PersistentVector::new();
        }
        (0..sequence.len())
            .step_by(size)
            .map(|start| sequence.slice(start..start.saturating_add(size)))
            .collect()
    })
}

/// Removes every falsey element.
///
/// See [`Truthy`] for what counts as falsey.
pub fn compact<I, T>(sequence: I) -> Guarded<I, PersistentVector<T>>
where
    I: Guardable<Inner = PersistentVector<T>>,
    T: Truthy + Clone,
{
    guard("compact", sequence, |sequence| {
        sequence.iter().filter(|element| element.is_truthy()).cloned().collect()
    })
}

/// Appends every sequence of `others` to `sequence`, in order.
pub fn concat<I, T, S>(sequence: I, others: S) -> Guarded<I, PersistentVector<T>>
where
    I: Guardable<Inner = PersistentVector<T>>,
    T: Clone,
    S: IntoIterator<Item = PersistentVector<T>>,
{
    guard("concat", sequence, |sequence| {
        others
            .into_iter()
            .fold(sequence, |joined, other| joined.append(&other))
    })
}

/// Keeps the elements of `sequence` that do not occur in `values`.
///
/// # Examples
///
/// ```rust
/// use lambars_ops::ops::sequence::difference;
/// use lambars_ops::persistent::PersistentVector;
///
/// let sequence: PersistentVector<i32> = [2, 1, 2, 3].into_iter().collect();
/// let kept = difference(sequence, [2, 4]).computed().unwrap();
/// assert_eq!(kept, PersistentVector::from_iter([1, 3]));
/// ```
pub fn difference<I, T, V>(sequence: I, values: V) -> Guarded<I, PersistentVector<T>>
where
    I: Guardable<Inner = PersistentVector<T>>,
    T: Clone + Hash + Eq,
    V: IntoIterator<Item = T>,
{
    guard("difference", sequence, |sequence| {
        let excluded: PersistentOrderedSet<T> = values.into_iter().collect();
        sequence
            .iter()
            .filter(|element| !excluded.contains(*element))
            .cloned()
            .collect()
    })
}

/// [`difference`] comparing `key_function` of each element instead of the
/// element itself.
///
/// `key_function` runs once per element of `values` and of `sequence`.
pub fn difference_by<I, T, V, K, F>(
    sequence: I,
    values: V,
    mut key_function: F,
) -> Guarded<I, PersistentVector<T>>
where
    I: Guardable<Inner = PersistentVector<T>>,
    T: Clone,
    V: IntoIterator<Item = T>,
    K: Clone + Hash + Eq,
    F: FnMut(&T) -> K,
{
    guard("difference_by", sequence, |sequence| {
        let excluded: PersistentOrderedSet<K> = values
            .into_iter()
            .map(|value| key_function(&value))
            .collect();
        sequence
            .iter()
            .filter(|element| !excluded.contains(&key_function(element)))
            .cloned()
            .collect()
    })
}

/// Replaces the elements whose positions fall in `range` with `value`.
///
/// The range is clamped to the sequence; an inverted range fills nothing.
///
/// # Examples
///
/// ```rust
/// use lambars_ops::ops::sequence::fill;
/// use lambars_ops::persistent::PersistentVector;
///
/// let sequence: PersistentVector<i32> = [4, 6, 8, 10].into_iter().collect();
/// let filled = fill(sequence, 0, 1..3).computed().unwrap();
/// assert_eq!(filled, PersistentVector::from_iter([4, 0, 0, 10]));
/// ```
pub fn fill<I, T, R>(sequence: I, value: T, range: R) -> Guarded<I, PersistentVector<T>>
where
    I: Guardable<Inner = PersistentVector<T>>,
    T: Clone,
    R: RangeBounds<usize>,
{
    guard("fill", sequence, |sequence| {
        let (start, end) = clamp_range(&range, sequence.len());
        (start..end).fold(sequence, |filled, index| {
            filled.update(index, value.clone()).unwrap_or(filled)
        })
    })
}

/// Picks the elements at `indexes`, in the order given.
///
/// An index past the end yields `None` at that position.
pub fn pull_at<I, T, X>(sequence: I, indexes: X) -> Guarded<I, PersistentVector<Option<T>>>
where
    I: Guardable<Inner = PersistentVector<T>>,
    T: Clone,
    X: IntoIterator<Item = usize>,
{
    guard("pull_at", sequence, |sequence| {
        indexes
            .into_iter()
            .map(|index| sequence.get(index).cloned())
            .collect()
    })
}
