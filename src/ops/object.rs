//! Key-mapping operations: path access, defaulting, inversion and key
//! selection.

use std::hash::Hash;

use super::guard::{Guardable, Guarded, guard};
use crate::persistent::{PersistentOrderedMap, PersistentOrderedSet, PersistentVector};
use crate::semantics::{DeepDefaults, PathLookup, Sentinel, fill_map_defaults};

/// Values found at each of `paths` below `root`.
///
/// A path is split on `.`, `[` and `]`, so `a[0].b` and `a.0.b` are the
/// same path. A path that leads nowhere yields `None` at its position.
///
/// # Examples
///
/// ```rust
/// use lambars_ops::ops::object::at;
/// use lambars_ops::value::Value;
///
/// let root = Value::map([(
///     "a",
///     Value::list([Value::map([("b", Value::map([("c", 3)]))]), Value::from(4)]),
/// )]);
/// let found = at(root, ["a[0].b.c", "a[1]", "a[9]"]).computed().unwrap();
/// assert_eq!(found[0], Some(Value::from(3)));
/// assert_eq!(found[1], Some(Value::from(4)));
/// assert_eq!(found[2], None);
/// ```
pub fn at<I, P, S>(
    root: I,
    paths: P,
) -> Guarded<I, PersistentVector<Option<<I::Inner as PathLookup>::Output>>>
where
    I: Guardable,
    I::Inner: PathLookup,
    <I::Inner as PathLookup>::Output: Clone,
    P: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    guard("at", root, |root| {
        paths
            .into_iter()
            .map(|path| root.lookup_path(path.as_ref()))
            .collect()
    })
}

/// Adds the entries of each source to `map`, left to right, without
/// replacing a value that is already set.
///
/// A key bound to an absent value counts as unset and takes the next
/// source's value.
///
/// # Examples
///
/// ```rust
/// use lambars_ops::ops::object::defaults;
/// use lambars_ops::persistent::PersistentOrderedMap;
///
/// let map = PersistentOrderedMap::singleton("a", Some(1));
/// let sources = [
///     PersistentOrderedMap::from_iter([("a", Some(3)), ("b", Some(2))]),
///     PersistentOrderedMap::singleton("b", Some(9)),
/// ];
/// let merged = defaults(map, sources).computed().unwrap();
/// assert_eq!(merged.get("a"), Some(&Some(1)));
/// assert_eq!(merged.get("b"), Some(&Some(2)));
/// ```
pub fn defaults<I, K, V, S>(map: I, sources: S) -> Guarded<I, PersistentOrderedMap<K, V>>
where
    I: Guardable<Inner = PersistentOrderedMap<K, V>>,
    K: Clone + Hash + Eq,
    V: Clone + Sentinel,
    S: IntoIterator<Item = PersistentOrderedMap<K, V>>,
{
    guard("defaults", map, |map| {
        sources.into_iter().fold(map, |merged, source| {
            source.iter().fold(merged, |merged, (key, offered)| {
                let is_set = merged.get(key).is_some_and(|existing| !existing.is_absent());
                if is_set {
                    merged
                } else {
                    merged.insert(key.clone(), offered.clone())
                }
            })
        })
    })
}

/// [`defaults`], recursing into values that are maps on both sides.
///
/// Only maps are merged recursively. Lists are leaves: a set list is kept
/// whole and never filled position by position from a longer source list,
/// so `{a: [1]}` with source `{a: [7, 8]}` stays `{a: [1]}`.
///
/// # Examples
///
/// ```rust
/// use lambars_ops::ops::object::defaults_deep;
/// use lambars_ops::persistent::PersistentOrderedMap;
/// use lambars_ops::value::Value;
///
/// let map = PersistentOrderedMap::singleton("a", Value::list([1]));
/// let sources = [PersistentOrderedMap::singleton("a", Value::list([7, 8]))];
/// let merged = defaults_deep(map, sources).computed().unwrap();
/// assert_eq!(merged.get("a"), Some(&Value::list([1])));
/// ```
pub fn defaults_deep<I, K, V, S>(map: I, sources: S) -> Guarded<I, PersistentOrderedMap<K, V>>
where
    I: Guardable<Inner = PersistentOrderedMap<K, V>>,
    K: Clone + Hash + Eq,
    V: Clone + DeepDefaults,
    S: IntoIterator<Item = PersistentOrderedMap<K, V>>,
{
    guard("defaults_deep", map, |map| {
        sources
            .into_iter()
            .fold(map, |merged, source| fill_map_defaults(&merged, &source))
    })
}

/// Swaps keys and values.
///
/// When several keys share a value the last of them wins.
pub fn invert<I, K, V>(map: I) -> Guarded<I, PersistentOrderedMap<V, K>>
where
    I: Guardable<Inner = PersistentOrderedMap<K, V>>,
    K: Clone,
    V: Clone + Hash + Eq,
{
    guard("invert", map, |map| {
        map.iter()
            .map(|(key, value)| (value.clone(), key.clone()))
            .collect()
    })
}

fn select_keys<K, V, P>(
    map: &PersistentOrderedMap<K, V>,
    keep_matching: bool,
    mut predicate: P,
) -> PersistentOrderedMap<K, V>
where
    K: Clone + Hash + Eq,
    V: Clone,
    P: FnMut(&K) -> bool,
{
    map.filter(|key, _| predicate(key) == keep_matching)
}

/// `map` without the entries whose key `predicate` accepts.
///
/// The predicate sees keys only.
pub fn omit_by<I, K, V, P>(map: I, predicate: P) -> Guarded<I, PersistentOrderedMap<K, V>>
where
    I: Guardable<Inner = PersistentOrderedMap<K, V>>,
    K: Clone + Hash + Eq,
    V: Clone,
    P: FnMut(&K) -> bool,
{
    guard("omit_by", map, |map| select_keys(&map, false, predicate))
}

/// Only the entries of `map` whose key `predicate` accepts.
///
/// The predicate sees keys only.
pub fn pick_by<I, K, V, P>(map: I, predicate: P) -> Guarded<I, PersistentOrderedMap<K, V>>
where
    I: Guardable<Inner = PersistentOrderedMap<K, V>>,
    K: Clone + Hash + Eq,
    V: Clone,
    P: FnMut(&K) -> bool,
{
    guard("pick_by", map, |map| select_keys(&map, true, predicate))
}

/// `map` without the keys listed in `props`.
///
/// # Examples
///
/// ```rust
/// use lambars_ops::ops::object::omit;
/// use lambars_ops::persistent::PersistentOrderedMap;
///
/// let map = PersistentOrderedMap::from_iter([("a", 1), ("b", 2), ("c", 3)]);
/// let rest = omit(map, ["a", "c"]).computed().unwrap();
/// assert_eq!(rest, PersistentOrderedMap::singleton("b", 2));
/// ```
pub fn omit<I, K, V, X>(map: I, props: X) -> Guarded<I, PersistentOrderedMap<K, V>>
where
    I: Guardable<Inner = PersistentOrderedMap<K, V>>,
    K: Clone + Hash + Eq,
    V: Clone,
    X: IntoIterator<Item = K>,
{
    guard("omit", map, |map| {
        let props: PersistentOrderedSet<K> = props.into_iter().collect();
        select_keys(&map, false, |key| props.contains(key))
    })
}

/// Only the keys of `map` listed in `props`, in the map's order.
pub fn pick<I, K, V, X>(map: I, props: X) -> Guarded<I, PersistentOrderedMap<K, V>>
where
    I: Guardable<Inner = PersistentOrderedMap<K, V>>,
    K: Clone + Hash + Eq,
    V: Clone,
    X: IntoIterator<Item = K>,
{
    guard("pick", map, |map| {
        let props: PersistentOrderedSet<K> = props.into_iter().collect();
        select_keys(&map, true, |key| props.contains(key))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;
    use rstest::rstest;

    #[rstest]
    fn test_invert_later_key_wins() {
        let map: PersistentOrderedMap<char, i32> =
            [('a', 1), ('b', 1), ('c', 2)].into_iter().collect();
        let inverted = invert(map).computed().unwrap();
        let entries: Vec<(i32, char)> = inverted.into_iter().collect();
        assert_eq!(entries, vec![(1, 'b'), (2, 'c')]);
    }

    #[rstest]
    fn test_defaults_deep_merges_nested_maps() {
        let map = PersistentOrderedMap::singleton("a", Value::map([("a", 1)]));
        let sources = [
            PersistentOrderedMap::singleton("a", Value::map([("a", 2), ("b", 3)])),
            PersistentOrderedMap::singleton("a", Value::map([("a", 3)])),
        ];
        let merged = defaults_deep(map, sources).computed().unwrap();
        assert_eq!(merged.get("a"), Some(&Value::map([("a", 1), ("b", 3)])));
    }

    #[rstest]
    fn test_pick_by_sees_keys() {
        let map: PersistentOrderedMap<&str, i32> =
            [("a", 1), ("b", 2), ("c", 3)].into_iter().collect();
        let picked = pick_by(map, |key| *key != "b").computed().unwrap();
        let keys: Vec<&str> = picked.keys().copied().collect();
        assert_eq!(keys, vec!["a", "c"]);
    }
}
