//! Set-style combination of several collections.
//!
//! Results are [`PersistentOrderedSet`]s: duplicates collapse and values keep
//! the order in which they were first seen, scanning the first collection
//! before the rest.

use std::hash::Hash;

use super::guard::{Guardable, Guarded, guard};
use crate::persistent::{PersistentOrderedMap, PersistentOrderedSet, PersistentVector};

fn intersect_all<T, R, C>(seed: PersistentOrderedSet<T>, rest: R) -> PersistentOrderedSet<T>
where
    T: Clone + Hash + Eq,
    R: IntoIterator<Item = C>,
    C: IntoIterator<Item = T>,
{
    rest.into_iter().fold(seed, |common, collection| {
        if common.is_empty() {
            return common;
        }
        let other: PersistentOrderedSet<T> = collection.into_iter().collect();
        common.intersection(&other)
    })
}

/// Unique values of `first` that occur in every collection of `rest`.
///
/// # Examples
///
/// ```rust
/// use lambars_ops::ops::combine::intersection;
/// use lambars_ops::persistent::PersistentVector;
///
/// let first: PersistentVector<i32> = [2, 1, 3].into_iter().collect();
/// let common = intersection(first, [vec![1, 2, 3], vec![1, 2]]).computed().unwrap();
/// assert_eq!(common.into_iter().collect::<Vec<_>>(), vec![2, 1]);
/// ```
pub fn intersection<I, T, R, C>(first: I, rest: R) -> Guarded<I, PersistentOrderedSet<T>>
where
    I: Guardable<Inner = PersistentVector<T>>,
    T: Clone + Hash + Eq,
    R: IntoIterator<Item = C>,
    C: IntoIterator<Item = T>,
{
    guard("intersection", first, |first| {
        intersect_all(first.into_iter().collect(), rest)
    })
}

/// Intersection of an arbitrary list of collections.
///
/// There is no distinguished first argument here, so nothing is guarded; an
/// empty list of collections intersects to the empty set.
pub fn intersection_all<T, S, C>(collections: S) -> PersistentOrderedSet<T>
where
    T: Clone + Hash + Eq,
    S: IntoIterator<Item = C>,
    C: IntoIterator<Item = T>,
{
    let mut collections = collections.into_iter();
    collections.next().map_or_else(PersistentOrderedSet::new, |first| {
        intersect_all(first.into_iter().collect(), collections)
    })
}

/// Unique values of `first` and then of each collection in `rest`.
pub fn union<I, T, R, C>(first: I, rest: R) -> Guarded<I, PersistentOrderedSet<T>>
where
    I: Guardable<Inner = PersistentVector<T>>,
    T: Clone + Hash + Eq,
    R: IntoIterator<Item = C>,
    C: IntoIterator<Item = T>,
{
    guard("union", first, |first| {
        first
            .into_iter()
            .chain(rest.into_iter().flatten())
            .collect()
    })
}

/// Unique values of `sequence`, keeping the first occurrence of each.
pub fn uniq<I, T>(sequence: I) -> Guarded<I, PersistentOrderedSet<T>>
where
    I: Guardable<Inner = PersistentVector<T>>,
    T: Clone + Hash + Eq,
{
    guard("uniq", sequence, |sequence| sequence.into_iter().collect())
}

/// Values that occur in exactly one of the collections.
///
/// Repeats inside a single collection count once.
///
/// # Examples
///
/// ```rust
/// use lambars_ops::ops::combine::xor;
/// use lambars_ops::persistent::PersistentVector;
///
/// let first: PersistentVector<i32> = [2, 1].into_iter().collect();
/// let exclusive = xor(first, [vec![2, 3]]).computed().unwrap();
/// assert_eq!(exclusive.into_iter().collect::<Vec<_>>(), vec![1, 3]);
/// ```
pub fn xor<I, T, R, C>(first: I, rest: R) -> Guarded<I, PersistentOrderedSet<T>>
where
    I: Guardable<Inner = PersistentVector<T>>,
    T: Clone + Hash + Eq,
    R: IntoIterator<Item = C>,
    C: IntoIterator<Item = T>,
{
    guard("xor", first, |first| {
        let first: PersistentOrderedSet<T> = first.into_iter().collect();
        let occurrences = rest
            .into_iter()
            .map(|collection| collection.into_iter().collect::<PersistentOrderedSet<T>>())
            .fold(count_members(PersistentOrderedMap::new(), &first), |counts, set| {
                count_members(counts, &set)
            });

        occurrences
            .iter()
            .filter(|(_, count)| **count == 1)
            .map(|(value, _)| value.clone())
            .collect()
    })
}

fn count_members<T>(
    counts: PersistentOrderedMap<T, usize>,
    members: &PersistentOrderedSet<T>,
) -> PersistentOrderedMap<T, usize>
where
    T: Clone + Hash + Eq,
{
    members.iter().fold(counts, |counts, member| {
        counts.update_with(member.clone(), 0, |count| count + 1)
    })
}
