//! Sort-position search.
//!
//! Given a sequence already sorted by some key, these functions find where a
//! new value would be inserted to keep it sorted. Besides ordinary keys the
//! search gives a fixed place to the three special keys reported by
//! [`Sentinel`](crate::semantics::Sentinel):
//!
//! - ordinary keys sort first, in their natural order;
//! - then null keys;
//! - then absent keys;
//! - NaN keys sort last.
//!
//! The lowest variants return the first position at which the value fits,
//! the highest (`*_last_*`) variants the last.
//!
//! # Examples
//!
//! ```rust
//! use lambars_ops::ops::ordering::{sorted_index, sorted_last_index};
//! use lambars_ops::persistent::PersistentVector;
//!
//! let sequence: PersistentVector<i32> = [1, 2, 2, 3].into_iter().collect();
//! assert_eq!(sorted_index(sequence.clone(), 2).computed(), Some(1));
//! assert_eq!(sorted_last_index(sequence, 2).computed(), Some(3));
//! ```

use super::guard::{Guardable, Guarded, guard, try_guard};
use super::infallible;
use crate::persistent::PersistentVector;
use crate::semantics::SortKey;

/// Largest index the search reports.
pub const MAX_ARRAY_INDEX: usize = 4_294_967_294;

/// Decides whether the search continues above a candidate whose key is
/// `computed` while looking for the slot of `target`.
fn moves_low_up<K: SortKey + ?Sized>(computed: &K, target: &K, prefer_highest: bool) -> bool {
    let computed_reflexive = computed.is_reflexive();

    if !target.is_reflexive() {
        prefer_highest || computed_reflexive
    } else if target.is_absent() {
        computed_reflexive && (prefer_highest || !computed.is_absent())
    } else if target.is_null() {
        computed_reflexive && !computed.is_absent() && (prefer_highest || !computed.is_null())
    } else if computed.is_null() || computed.is_absent() || !computed_reflexive {
        false
    } else if prefer_highest {
        computed <= target
    } else {
        computed < target
    }
}

/// Binary search over `[0, length)` driven by a fallible probe.
fn bisect<E, P>(length: usize, mut moves_up: P) -> Result<usize, E>
where
    P: FnMut(usize) -> Result<bool, E>,
{
    let mut low = 0;
    let mut high = length;

    while low < high {
        let middle = low + (high - low) / 2;
        if moves_up(middle)? {
            low = middle + 1;
        } else {
            high = middle;
        }
    }

    Ok(high.min(MAX_ARRAY_INDEX))
}

// =============================================================================
// Unguarded search
// =============================================================================

/// Insertion index of `value` in `sequence`, comparing elements directly.
#[must_use]
pub fn insertion_index<T: SortKey>(
    sequence: &PersistentVector<T>,
    value: &T,
    prefer_highest: bool,
) -> usize {
    infallible(bisect(sequence.len(), |middle| {
        Ok(moves_low_up(&sequence[middle], value, prefer_highest))
    }))
}

/// Insertion index of `value` in `sequence`, comparing `key_function` of
/// each element.
///
/// `key_function` is applied to `value` once, then once per probe.
pub fn insertion_index_by<T, K, F>(
    sequence: &PersistentVector<T>,
    value: &T,
    mut key_function: F,
    prefer_highest: bool,
) -> usize
where
    K: SortKey,
    F: FnMut(&T) -> K,
{
    infallible(try_insertion_index_by(
        sequence,
        value,
        |element| Ok(key_function(element)),
        prefer_highest,
    ))
}

/// [`insertion_index_by`] with a fallible key function.
///
/// # Errors
///
/// Returns the first error produced by `key_function`.
pub fn try_insertion_index_by<T, K, E, F>(
    sequence: &PersistentVector<T>,
    value: &T,
    mut key_function: F,
    prefer_highest: bool,
) -> Result<usize, E>
where
    K: SortKey,
    F: FnMut(&T) -> Result<K, E>,
{
    let target = key_function(value)?;
    bisect(sequence.len(), |middle| {
        key_function(&sequence[middle])
            .map(|computed| moves_low_up(&computed, &target, prefer_highest))
    })
}

// =============================================================================
// Guarded entry points
// =============================================================================

/// Lowest index at which `value` can be inserted to keep `sequence` sorted.
///
/// # Examples
///
/// ```rust
/// use lambars_ops::ops::ordering::sorted_index;
/// use lambars_ops::persistent::PersistentVector;
///
/// let sequence: PersistentVector<Option<i32>> = [Some(1), Some(2), Some(3), Some(1)].into_iter().collect();
/// assert_eq!(sorted_index(sequence, None).computed(), Some(4));
/// ```
pub fn sorted_index<I, T>(sequence: I, value: T) -> Guarded<I, usize>
where
    I: Guardable<Inner = PersistentVector<T>>,
    T: SortKey,
{
    guard("sorted_index", sequence, |sequence| {
        insertion_index(&sequence, &value, false)
    })
}

/// Highest index at which `value` can be inserted to keep `sequence` sorted.
pub fn sorted_last_index<I, T>(sequence: I, value: T) -> Guarded<I, usize>
where
    I: Guardable<Inner = PersistentVector<T>>,
    T: SortKey,
{
    guard("sorted_last_index", sequence, |sequence| {
        insertion_index(&sequence, &value, true)
    })
}

/// Lowest insertion index of `value`, comparing by `key_function`.
///
/// # Examples
///
/// ```rust
/// use lambars_ops::ops::ordering::sorted_index_by;
/// use lambars_ops::persistent::PersistentVector;
///
/// let pairs: PersistentVector<(char, i32)> = [('a', 1), ('b', 2), ('c', 3)].into_iter().collect();
/// let index = sorted_index_by(pairs, ('d', 2), |pair| pair.1);
/// assert_eq!(index.computed(), Some(1));
/// ```
pub fn sorted_index_by<I, T, K, F>(sequence: I, value: T, key_function: F) -> Guarded<I, usize>
where
    I: Guardable<Inner = PersistentVector<T>>,
    K: SortKey,
    F: FnMut(&T) -> K,
{
    guard("sorted_index_by", sequence, |sequence| {
        insertion_index_by(&sequence, &value, key_function, false)
    })
}

/// Highest insertion index of `value`, comparing by `key_function`.
pub fn sorted_last_index_by<I, T, K, F>(
    sequence: I,
    value: T,
    key_function: F,
) -> Guarded<I, usize>
where
    I: Guardable<Inner = PersistentVector<T>>,
    K: SortKey,
    F: FnMut(&T) -> K,
{
    guard("sorted_last_index_by", sequence, |sequence| {
        insertion_index_by(&sequence, &value, key_function, true)
    })
}

/// [`sorted_index_by`] with a fallible key function.
///
/// # Errors
///
/// Returns the first error produced by `key_function`.
pub fn try_sorted_index_by<I, T, K, E, F>(
    sequence: I,
    value: T,
    key_function: F,
) -> Result<Guarded<I, usize>, E>
where
    I: Guardable<Inner = PersistentVector<T>>,
    K: SortKey,
    F: FnMut(&T) -> Result<K, E>,
{
    try_guard("try_sorted_index_by", sequence, |sequence| {
        try_insertion_index_by(&sequence, &value, key_function, false)
    })
}
