//! Persistent hash map based on a Hash Array Mapped Trie (HAMT).
//!
//! [`PersistentHashMap`] is the lookup index behind
//! [`PersistentOrderedMap`](super::PersistentOrderedMap) and
//! [`PersistentOrderedSet`](super::PersistentOrderedSet). It only offers what
//! those types need: `get` and `insert`, both O(log32 N).
//!
//! # Internal Structure
//!
//! - 32-way branching, 5 hash bits per level
//! - a bitmap per branch records which slots are occupied
//! - collision nodes hold keys whose 64-bit hashes are identical
//! - every node is shared through [`ReferenceCounter`]

use std::borrow::Borrow;
use std::hash::{Hash, Hasher};

use super::ReferenceCounter;

// =============================================================================
// Constants
// =============================================================================

const BITS_PER_LEVEL: usize = 5;

const MASK: u64 = (1 << BITS_PER_LEVEL) - 1;

// =============================================================================
// Hash computation
// =============================================================================

#[cfg(not(feature = "fxhash"))]
type KeyHasher = std::collections::hash_map::DefaultHasher;

#[cfg(feature = "fxhash")]
type KeyHasher = rustc_hash::FxHasher;

/// Computes the 64-bit hash of a key.
pub(crate) fn compute_hash<K: Hash + ?Sized>(key: &K) -> u64 {
    let mut hasher = KeyHasher::default();
    key.hash(&mut hasher);
    hasher.finish()
}

/// Extracts the slot index of `hash` at `depth`.
#[inline]
const fn hash_index(hash: u64, depth: usize) -> usize {
    ((hash >> (depth * BITS_PER_LEVEL)) & MASK) as usize
}

// =============================================================================
// Node Definition
// =============================================================================

enum Node<K, V> {
    Bitmap {
        bitmap: u32,
        children: ReferenceCounter<[Child<K, V>]>,
    },
    /// Keys sharing one full 64-bit hash.
    Collision {
        hash: u64,
        entries: ReferenceCounter<[(K, V)]>,
    },
}

enum Child<K, V> {
    Entry { hash: u64, key: K, value: V },
    Node(ReferenceCounter<Node<K, V>>),
}

impl<K: Clone, V: Clone> Clone for Child<K, V> {
    fn clone(&self) -> Self {
        match self {
            Self::Entry { hash, key, value } => Self::Entry {
                hash: *hash,
                key: key.clone(),
                value: value.clone(),
            },
            Self::Node(node) => Self::Node(node.clone()),
        }
    }
}

// =============================================================================
// PersistentHashMap Definition
// =============================================================================

/// A persistent hash map without a defined iteration order.
pub(crate) struct PersistentHashMap<K, V> {
    root: ReferenceCounter<Node<K, V>>,
    length: usize,
}

impl<K, V> Clone for PersistentHashMap<K, V> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            length: self.length,
        }
    }
}

impl<K, V> PersistentHashMap<K, V> {
    pub(crate) fn new() -> Self {
        Self {
            root: ReferenceCounter::new(Node::Bitmap {
                bitmap: 0,
                children: ReferenceCounter::from(Vec::new()),
            }),
            length: 0,
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.length
    }
}

impl<K: Clone + Hash + Eq, V: Clone> PersistentHashMap<K, V> {
    /// Returns a reference to the value stored for `key`.
    pub(crate) fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = compute_hash(key);
        let mut node = self.root.as_ref();
        let mut depth = 0;

        loop {
            match node {
                Node::Bitmap { bitmap, children } => {
                    let bit = 1u32 << hash_index(hash, depth);
                    if bitmap & bit == 0 {
                        return None;
                    }
                    let position = (bitmap & (bit - 1)).count_ones() as usize;
                    match &children[position] {
                        Child::Entry {
                            hash: entry_hash,
                            key: entry_key,
                            value,
                        } => {
                            return (*entry_hash == hash && entry_key.borrow() == key)
                                .then_some(value);
                        }
                        Child::Node(subnode) => {
                            node = subnode;
                            depth += 1;
                        }
                    }
                }
                Node::Collision {
                    hash: collision_hash,
                    entries,
                } => {
                    if *collision_hash != hash {
                        return None;
                    }
                    return entries
                        .iter()
                        .find(|(entry_key, _)| entry_key.borrow() == key)
                        .map(|(_, value)| value);
                }
            }
        }
    }

    /// Returns a new map with `key` bound to `value`.
    ///
    /// An existing binding for `key` is replaced.
    pub(crate) fn insert(&self, key: K, value: V) -> Self {
        let hash = compute_hash(&key);
        let (root, added) = Self::insert_into_node(&self.root, hash, key, value, 0);

        Self {
            root: ReferenceCounter::new(root),
            length: if added { self.length + 1 } else { self.length },
        }
    }

    fn insert_into_node(
        node: &Node<K, V>,
        hash: u64,
        key: K,
        value: V,
        depth: usize,
    ) -> (Node<K, V>, bool) {
        match node {
            Node::Bitmap { bitmap, children } => {
                let bit = 1u32 << hash_index(hash, depth);
                let position = (bitmap & (bit - 1)).count_ones() as usize;
                let mut children = children.to_vec();

                if bitmap & bit == 0 {
                    children.insert(position, Child::Entry { hash, key, value });
                    return (
                        Node::Bitmap {
                            bitmap: bitmap | bit,
                            children: ReferenceCounter::from(children),
                        },
                        true,
                    );
                }

                let (child, added) = match &children[position] {
                    Child::Entry {
                        hash: existing_hash,
                        key: existing_key,
                        value: existing_value,
                    } => {
                        if *existing_hash == hash && *existing_key == key {
                            (Child::Entry { hash, key, value }, false)
                        } else {
                            let subnode = Self::split_entries(
                                (*existing_hash, existing_key.clone(), existing_value.clone()),
                                (hash, key, value),
                                depth + 1,
                            );
                            (Child::Node(ReferenceCounter::new(subnode)), true)
                        }
                    }
                    Child::Node(subnode) => {
                        let (subnode, added) =
                            Self::insert_into_node(subnode, hash, key, value, depth + 1);
                        (Child::Node(ReferenceCounter::new(subnode)), added)
                    }
                };

                children[position] = child;
                (
                    Node::Bitmap {
                        bitmap: *bitmap,
                        children: ReferenceCounter::from(children),
                    },
                    added,
                )
            }
            Node::Collision {
                hash: collision_hash,
                entries,
            } => {
                if *collision_hash == hash {
                    let mut entries = entries.to_vec();
                    let added = match entries.iter_mut().find(|(entry_key, _)| *entry_key == key)
                    {
                        Some(entry) => {
                            entry.1 = value;
                            false
                        }
                        None => {
                            entries.push((key, value));
                            true
                        }
                    };
                    return (
                        Node::Collision {
                            hash,
                            entries: ReferenceCounter::from(entries),
                        },
                        added,
                    );
                }

                // Push the collision node one level down next to the new entry.
                let collision = Child::Node(ReferenceCounter::new(Node::Collision {
                    hash: *collision_hash,
                    entries: entries.clone(),
                }));
                let wrapper = Node::Bitmap {
                    bitmap: 1u32 << hash_index(*collision_hash, depth),
                    children: ReferenceCounter::from(vec![collision]),
                };
                Self::insert_into_node(&wrapper, hash, key, value, depth)
            }
        }
    }

    /// Builds the smallest node holding two distinct entries.
    fn split_entries(
        existing: (u64, K, V),
        incoming: (u64, K, V),
        depth: usize,
    ) -> Node<K, V> {
        let (existing_hash, existing_key, existing_value) = existing;
        let (incoming_hash, incoming_key, incoming_value) = incoming;

        if existing_hash == incoming_hash {
            return Node::Collision {
                hash: existing_hash,
                entries: ReferenceCounter::from(vec![
                    (existing_key, existing_value),
                    (incoming_key, incoming_value),
                ]),
            };
        }

        let existing_index = hash_index(existing_hash, depth);
        let incoming_index = hash_index(incoming_hash, depth);

        if existing_index == incoming_index {
            let subnode = Self::split_entries(
                (existing_hash, existing_key, existing_value),
                (incoming_hash, incoming_key, incoming_value),
                depth + 1,
            );
            return Node::Bitmap {
                bitmap: 1u32 << existing_index,
                children: ReferenceCounter::from(vec![Child::Node(ReferenceCounter::new(
                    subnode,
                ))]),
            };
        }

        let existing_entry = Child::Entry {
            hash: existing_hash,
            key: existing_key,
            value: existing_value,
        };
        let incoming_entry = Child::Entry {
            hash: incoming_hash,
            key: incoming_key,
            value: incoming_value,
        };
        let children = if existing_index < incoming_index {
            vec![existing_entry, incoming_entry]
        } else {
            vec![incoming_entry, existing_entry]
        };

        Node::Bitmap {
            bitmap: (1u32 << existing_index) | (1u32 << incoming_index),
            children: ReferenceCounter::from(children),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
