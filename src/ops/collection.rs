//! Grouping, partitioning and sampling over whole collections.
//!
//! The grouping operations accept anything with [`Entries`]: sequences are
//! traversed with their positions as keys, maps with their own keys. The key
//! function or predicate always receives the entry's value.
//!
//! Each grouping operation has a `try_` form whose key function may fail;
//! the first error is returned as is.

use std::convert::Infallible;
use std::hash::Hash;

use rand::Rng;
use rand::seq::SliceRandom;

use super::guard::{Guardable, Guarded, guard, try_guard};
use super::infallible;
use crate::persistent::{PersistentOrderedMap, PersistentVector};
use crate::semantics::{Entries, Measured};

type EntryKey<I> = <<I as Guardable>::Inner as Entries>::Key;
type EntryItem<I> = <<I as Guardable>::Inner as Entries>::Item;

// =============================================================================
// Grouping
// =============================================================================

/// Counts the values of `collection` by the key `key_function` gives them.
///
/// # Examples
///
/// ```rust
/// use lambars_ops::ops::collection::count_by;
/// use lambars_ops::persistent::PersistentVector;
///
/// let readings: PersistentVector<f64> = [6.1, 4.2, 6.3].into_iter().collect();
/// let counts = count_by(readings, |reading| reading.floor() as i64).computed().unwrap();
/// assert_eq!(counts.get(&6), Some(&2));
/// assert_eq!(counts.get(&4), Some(&1));
/// ```
pub fn count_by<I, K, F>(
    collection: I,
    mut key_function: F,
) -> Guarded<I, PersistentOrderedMap<K, usize>>
where
    I: Guardable,
    I::Inner: Entries,
    K: Clone + Hash + Eq,
    F: FnMut(&EntryItem<I>) -> K,
{
    infallible(try_count_by(collection, |value| {
        Ok::<_, Infallible>(key_function(value))
    }))
}

/// [`count_by`] with a fallible key function.
///
/// # Errors
///
/// Returns the first error produced by `key_function`.
pub fn try_count_by<I, K, E, F>(
    collection: I,
    mut key_function: F,
) -> Result<Guarded<I, PersistentOrderedMap<K, usize>>, E>
where
    I: Guardable,
    I::Inner: Entries,
    K: Clone + Hash + Eq,
    F: FnMut(&EntryItem<I>) -> Result<K, E>,
{
    try_guard("count_by", collection, |collection| {
        collection
            .entries()
            .try_fold(PersistentOrderedMap::new(), |counts, (_, value)| {
                let key = key_function(value)?;
                Ok(counts.update_with(key, 0, |count| count + 1))
            })
    })
}

/// Groups the entry keys of `collection` by the key `key_function` gives
/// their values.
///
/// For a sequence the groups hold positions; for a map they hold map keys.
///
/// # Examples
///
/// ```rust
/// use lambars_ops::ops::collection::group_by;
/// use lambars_ops::persistent::PersistentVector;
///
/// let words: PersistentVector<&str> = ["one", "two", "three"].into_iter().collect();
/// let groups = group_by(words, |word| word.len()).computed().unwrap();
/// assert_eq!(groups.get(&3), Some(&PersistentVector::from_iter([0, 1])));
/// assert_eq!(groups.get(&5), Some(&PersistentVector::singleton(2)));
/// ```
pub fn group_by<I, K, F>(
    collection: I,
    mut key_function: F,
) -> Guarded<I, PersistentOrderedMap<K, PersistentVector<EntryKey<I>>>>
where
    I: Guardable,
    I::Inner: Entries,
    EntryKey<I>: Clone,
    K: Clone + Hash + Eq,
    F: FnMut(&EntryItem<I>) -> K,
{
    infallible(try_group_by(collection, |value| {
        Ok::<_, Infallible>(key_function(value))
    }))
}

/// [`group_by`] with a fallible key function.
///
/// # Errors
///
/// Returns the first error produced by `key_function`.
pub fn try_group_by<I, K, E, F>(
    collection: I,
    mut key_function: F,
) -> Result<Guarded<I, PersistentOrderedMap<K, PersistentVector<EntryKey<I>>>>, E>
where
    I: Guardable,
    I::Inner: Entries,
    EntryKey<I>: Clone,
    K: Clone + Hash + Eq,
    F: FnMut(&EntryItem<I>) -> Result<K, E>,
{
    try_guard("group_by", collection, |collection| {
        collection
            .entries()
            .try_fold(PersistentOrderedMap::new(), |groups, (entry_key, value)| {
                let key = key_function(value)?;
                Ok(groups.update_with(key, PersistentVector::new(), |members| {
                    members.push_back(entry_key)
                }))
            })
    })
}

/// Maps the key `key_function` gives each value to that value.
///
/// When several values share a key the last one wins; the key keeps the
/// position where it first appeared.
pub fn key_by<I, K, F>(
    collection: I,
    mut key_function: F,
) -> Guarded<I, PersistentOrderedMap<K, EntryItem<I>>>
where
    I: Guardable,
    I::Inner: Entries,
    EntryItem<I>: Clone,
    K: Clone + Hash + Eq,
    F: FnMut(&EntryItem<I>) -> K,
{
    infallible(try_key_by(collection, |value| {
        Ok::<_, Infallible>(key_function(value))
    }))
}

/// [`key_by`] with a fallible key function.
///
/// # Errors
///
/// Returns the first error produced by `key_function`.
pub fn try_key_by<I, K, E, F>(
    collection: I,
    mut key_function: F,
) -> Result<Guarded<I, PersistentOrderedMap<K, EntryItem<I>>>, E>
where
    I: Guardable,
    I::Inner: Entries,
    EntryItem<I>: Clone,
    K: Clone + Hash + Eq,
    F: FnMut(&EntryItem<I>) -> Result<K, E>,
{
    try_guard("key_by", collection, |collection| {
        collection
            .entries()
            .try_fold(PersistentOrderedMap::new(), |keyed, (_, value)| {
                let key = key_function(value)?;
                Ok(keyed.insert(key, value.clone()))
            })
    })
}

/// Splits the values of `collection` into those `predicate` accepts and
/// those it rejects, both in collection order.
///
/// # Examples
///
/// ```rust
/// use lambars_ops::ops::collection::partition;
/// use lambars_ops::persistent::PersistentVector;
///
/// let numbers: PersistentVector<i32> = (1..=5).collect();
/// let (even, odd) = partition(numbers, |n| n % 2 == 0).computed().unwrap();
/// assert_eq!(even, PersistentVector::from_iter([2, 4]));
/// assert_eq!(odd, PersistentVector::from_iter([1, 3, 5]));
/// ```
#[allow(clippy::type_complexity)]
pub fn partition<I, P>(
    collection: I,
    mut predicate: P,
) -> Guarded<I, (PersistentVector<EntryItem<I>>, PersistentVector<EntryItem<I>>)>
where
    I: Guardable,
    I::Inner: Entries,
    EntryItem<I>: Clone,
    P: FnMut(&EntryItem<I>) -> bool,
{
    infallible(try_partition(collection, |value| {
        Ok::<_, Infallible>(predicate(value))
    }))
}

/// [`partition`] with a fallible predicate.
///
/// # Errors
///
/// Returns the first error produced by `predicate`.
#[allow(clippy::type_complexity)]
pub fn try_partition<I, E, P>(
    collection: I,
    mut predicate: P,
) -> Result<Guarded<I, (PersistentVector<EntryItem<I>>, PersistentVector<EntryItem<I>>)>, E>
where
    I: Guardable,
    I::Inner: Entries,
    EntryItem<I>: Clone,
    P: FnMut(&EntryItem<I>) -> Result<bool, E>,
{
    try_guard("partition", collection, |collection| {
        collection.entries().try_fold(
            (PersistentVector::new(), PersistentVector::new()),
            |(accepted, rejected), (_, value)| {
                if predicate(value)? {
                    Ok((accepted.push_back(value.clone()), rejected))
                } else {
                    Ok((accepted, rejected.push_back(value.clone())))
                }
            },
        )
    })
}

// =============================================================================
// Sampling
// =============================================================================

/// One uniformly chosen element, drawn from the thread-local generator.
pub fn sample<I, T>(sequence: I) -> Guarded<I, T>
where
    I: Guardable<Inner = PersistentVector<T>>,
    T: Clone,
{
    sample_with(sequence, &mut rand::rng())
}

/// [`sample`] drawing from `rng`.
pub fn sample_with<I, T, R>(sequence: I, rng: &mut R) -> Guarded<I, T>
where
    I: Guardable<Inner = PersistentVector<T>>,
    T: Clone,
    R: Rng + ?Sized,
{
    guard("sample", sequence, |sequence| {
        let index = rng.random_range(0..sequence.len());
        sequence[index].clone()
    })
}

/// `count` distinct positions of `sequence` in random order, drawn from the
/// thread-local generator.
///
/// Asking for at least as many elements as the sequence holds returns all of
/// them, shuffled.
pub fn sample_size<I, T>(sequence: I, count: usize) -> Guarded<I, PersistentVector<T>>
where
    I: Guardable<Inner = PersistentVector<T>>,
    T: Clone,
{
    sample_size_with(sequence, count, &mut rand::rng())
}

/// [`sample_size`] drawing from `rng`.
///
/// Runs the first `min(count, len)` steps of a forward Fisher-Yates shuffle.
///
/// # Examples
///
/// ```rust
/// use lambars_ops::ops::collection::sample_size_with;
/// use lambars_ops::persistent::PersistentVector;
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let sequence: PersistentVector<i32> = (0..10).collect();
/// let picked = sample_size_with(sequence, 3, &mut rng).computed().unwrap();
/// assert_eq!(picked.len(), 3);
/// ```
pub fn sample_size_with<I, T, R>(
    sequence: I,
    count: usize,
    rng: &mut R,
) -> Guarded<I, PersistentVector<T>>
where
    I: Guardable<Inner = PersistentVector<T>>,
    T: Clone,
    R: Rng + ?Sized,
{
    guard("sample_size", sequence, |sequence| {
        let length = sequence.len();
        let count = count.min(length);
        let mut pool: Vec<T> = sequence.into_iter().collect();

        for index in 0..count {
            let swap_with = rng.random_range(index..length);
            pool.swap(index, swap_with);
        }

        pool.truncate(count);
        pool.into_iter().collect()
    })
}

/// `sequence` in a uniformly random order, drawn from the thread-local
/// generator.
pub fn shuffle<I, T>(sequence: I) -> Guarded<I, PersistentVector<T>>
where
    I: Guardable<Inner = PersistentVector<T>>,
    T: Clone,
{
    shuffle_with(sequence, &mut rand::rng())
}

/// [`shuffle`] drawing from `rng`.
pub fn shuffle_with<I, T, R>(sequence: I, rng: &mut R) -> Guarded<I, PersistentVector<T>>
where
    I: Guardable<Inner = PersistentVector<T>>,
    T: Clone,
    R: Rng + ?Sized,
{
    guard("shuffle", sequence, |sequence| {
        let mut pool: Vec<T> = sequence.into_iter().collect();
        pool.shuffle(rng);
        pool.into_iter().collect()
    })
}

// =============================================================================
// Size
// =============================================================================

/// Size of `value`: element count for collections, character count for
/// text, zero when absent.
///
/// Not guarded; an empty value simply has size zero.
///
/// # Examples
///
/// ```rust
/// use lambars_ops::ops::collection::size;
/// use lambars_ops::persistent::PersistentVector;
///
/// assert_eq!(size("arst"), 4);
/// assert_eq!(size(&None::<String>), 0);
/// assert_eq!(size(&(0..3).collect::<PersistentVector<i32>>()), 3);
/// ```
pub fn size<M: Measured + ?Sized>(value: &M) -> usize {
    value.measure()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rstest::rstest;

    fn vector<T: Clone>(elements: impl IntoIterator<Item = T>) -> PersistentVector<T> {
        elements.into_iter().collect()
    }

    #[rstest]
    fn test_group_by_over_map_collects_keys() {
        let map: PersistentOrderedMap<&str, i32> =
            [("a", 1), ("b", 2), ("c", 1)].into_iter().collect();
        let groups = group_by(map, |value| *value).computed().unwrap();
        assert_eq!(groups.get(&1), Some(&vector(["a", "c"])));
        assert_eq!(groups.get(&2), Some(&vector(["b"])));
    }

    #[rstest]
    fn test_key_by_last_value_wins() {
        let keyed = key_by(vector([(1, 'a'), (2, 'b'), (1, 'c')]), |pair| pair.0)
            .computed()
            .unwrap();
        let entries: Vec<(i32, (i32, char))> = keyed.into_iter().collect();
        assert_eq!(entries, vec![(1, (1, 'c')), (2, (2, 'b'))]);
    }

    #[rstest]
    fn test_try_count_by_stops_on_error() {
        let mut seen = 0;
        let result = try_count_by(vector([1, 2, 3]), |value| {
            seen += 1;
            if *value == 2 { Err("two") } else { Ok(*value) }
        });
        assert_eq!(result, Err("two"));
        assert_eq!(seen, 2);
    }

    #[rstest]
    #[case(0)]
    #[case(3)]
    #[case(6)]
    #[case(10)]
    fn test_sample_size_is_bounded(#[case] count: usize) {
        let mut rng = StdRng::seed_from_u64(42);
        let picked = sample_size_with(vector(0..6), count, &mut rng).computed().unwrap();
        assert_eq!(picked.len(), count.min(6));
    }

    #[rstest]
    fn test_sample_is_member() {
        let mut rng = StdRng::seed_from_u64(1);
        let sequence = vector([10, 20, 30]);
        let picked = sample_with(sequence.clone(), &mut rng).computed().unwrap();
        assert!(sequence.iter().any(|element| *element == picked));
    }
}
