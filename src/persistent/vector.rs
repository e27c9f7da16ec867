//! Persistent (immutable) vector based on a 32-way radix trie.
//!
//! This module provides [`PersistentVector`], the ordered sequence used by
//! every operation in [`crate::ops`].
//!
//! # Overview
//!
//! The layout follows Clojure's `PersistentVector`:
//!
//! - a root trie whose leaves hold up to 32 elements each, and
//! - a tail buffer (up to 32 elements) that absorbs appends.
//!
//! Updates copy only the path from the root to the touched leaf, so every
//! "modified" vector shares all untouched leaves with its predecessor.
//!
//! # Examples
//!
//! ```rust
//! use lambars_ops::persistent::PersistentVector;
//!
//! let vector: PersistentVector<i32> = (1..=3).collect();
//! let updated = vector.update(1, 20).unwrap();
//!
//! assert_eq!(vector.get(1), Some(&2));   // Original unchanged
//! assert_eq!(updated.get(1), Some(&20)); // New version
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FromIterator;
use std::ops::{Bound, Index, RangeBounds};

use super::ReferenceCounter;

// =============================================================================
// Constants
// =============================================================================

/// Bits consumed per trie level.
const BITS_PER_LEVEL: usize = 5;

/// Branching factor (2^5 = 32).
const BRANCHING_FACTOR: usize = 1 << BITS_PER_LEVEL;

/// Bit mask for extracting the index within a node.
const MASK: usize = BRANCHING_FACTOR - 1;

// =============================================================================
// Node Definition
// =============================================================================

/// Internal trie node.
///
/// Branch children are always filled left to right, so a branch never has
/// holes and `children.len()` is the number of occupied slots.
enum Node<T> {
    Branch(Vec<ReferenceCounter<Self>>),
    Leaf(ReferenceCounter<[T]>),
}

impl<T> Node<T> {
    const fn empty_branch() -> Self {
        Self::Branch(Vec::new())
    }
}

// =============================================================================
// PersistentVector Definition
// =============================================================================

/// A persistent (immutable) vector.
///
/// # Time Complexity
///
/// | Operation   | Complexity                  |
/// |-------------|-----------------------------|
/// | `get`       | O(log32 N)                  |
/// | `push_back` | O(log32 N), amortized O(1)  |
/// | `update`    | O(log32 N)                  |
/// | `slice`     | O(log32 N + M), M retained  |
/// | `len`       | O(1)                        |
///
/// # Examples
///
/// ```rust
/// use lambars_ops::persistent::PersistentVector;
///
/// let vector = PersistentVector::new().push_back(1).push_back(2);
/// assert_eq!(vector.len(), 2);
/// assert_eq!(vector.last(), Some(&2));
/// ```
pub struct PersistentVector<T> {
    /// Total number of elements
    length: usize,
    /// Shift of the root level: (depth - 1) * `BITS_PER_LEVEL`
    shift: usize,
    root: ReferenceCounter<Node<T>>,
    /// Elements past the last full leaf
    tail: ReferenceCounter<[T]>,
}

impl<T> Clone for PersistentVector<T> {
    fn clone(&self) -> Self {
        Self {
            length: self.length,
            shift: self.shift,
            root: self.root.clone(),
            tail: self.tail.clone(),
        }
    }
}

impl<T> PersistentVector<T> {
    /// Creates a new empty vector.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_ops::persistent::PersistentVector;
    ///
    /// let vector: PersistentVector<i32> = PersistentVector::new();
    /// assert!(vector.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            length: 0,
            shift: BITS_PER_LEVEL,
            root: ReferenceCounter::new(Node::empty_branch()),
            tail: ReferenceCounter::from(Vec::<T>::new()),
        }
    }

    /// Creates a vector containing a single element.
    #[inline]
    #[must_use]
    pub fn singleton(element: T) -> Self {
        Self {
            length: 1,
            shift: BITS_PER_LEVEL,
            root: ReferenceCounter::new(Node::empty_branch()),
            tail: ReferenceCounter::from(vec![element]),
        }
    }

    /// Returns the number of elements in the vector.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the vector contains no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns the index of the first element stored in the tail buffer.
    #[inline]
    const fn tail_offset(&self) -> usize {
        if self.length < BRANCHING_FACTOR {
            0
        } else {
            ((self.length - 1) >> BITS_PER_LEVEL) << BITS_PER_LEVEL
        }
    }

    /// Returns the leaf (or tail) slice holding `index`.
    ///
    /// `index` must be smaller than `self.length`.
    fn leaf_for(&self, index: usize) -> &[T] {
        if index >= self.tail_offset() {
            return &self.tail;
        }

        let mut node = self.root.as_ref();
        let mut level = self.shift;

        loop {
            match node {
                Node::Branch(children) => match children.get((index >> level) & MASK) {
                    Some(child) => {
                        node = child;
                        level = level.saturating_sub(BITS_PER_LEVEL);
                    }
                    None => return &[],
                },
                Node::Leaf(elements) => return elements,
            }
        }
    }

    /// Returns a reference to the element at the given index.
    ///
    /// Returns `None` if the index is out of bounds.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_ops::persistent::PersistentVector;
    ///
    /// let vector: PersistentVector<i32> = (0..100).collect();
    /// assert_eq!(vector.get(64), Some(&64));
    /// assert_eq!(vector.get(100), None);
    /// ```
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.length {
            return None;
        }
        self.leaf_for(index).get(index & MASK)
    }

    /// Returns a reference to the first element.
    #[inline]
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.get(0)
    }

    /// Returns a reference to the last element.
    ///
    /// The last element always lives in the tail, so this is O(1).
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.tail.last()
    }

    /// Returns an iterator over references to the elements, front to back.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_ops::persistent::PersistentVector;
    ///
    /// let vector: PersistentVector<i32> = (1..=3).collect();
    /// let collected: Vec<&i32> = vector.iter().collect();
    /// assert_eq!(collected, vec![&1, &2, &3]);
    /// ```
    #[must_use]
    pub fn iter(&self) -> PersistentVectorIterator<'_, T> {
        PersistentVectorIterator {
            vector: self,
            index: 0,
            leaf: &[],
        }
    }
}

impl<T: Clone> PersistentVector<T> {
    /// Appends an element to the back of the vector.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_ops::persistent::PersistentVector;
    ///
    /// let vector = PersistentVector::new().push_back(1);
    /// let extended = vector.push_back(2);
    ///
    /// assert_eq!(vector.len(), 1);
    /// assert_eq!(extended.len(), 2);
    /// ```
    #[must_use]
    pub fn push_back(&self, element: T) -> Self {
        if self.tail.len() < BRANCHING_FACTOR {
            let mut tail = self.tail.to_vec();
            tail.push(element);

            return Self {
                length: self.length + 1,
                shift: self.shift,
                root: self.root.clone(),
                tail: ReferenceCounter::from(tail),
            };
        }

        let tail_leaf = ReferenceCounter::new(Node::Leaf(self.tail.clone()));
        let root_overflow = (self.length >> BITS_PER_LEVEL) > (1 << self.shift);

        let (root, shift) = if root_overflow {
            let root = Node::Branch(vec![
                self.root.clone(),
                Self::new_path(self.shift, tail_leaf),
            ]);
            (root, self.shift + BITS_PER_LEVEL)
        } else {
            let root = Self::push_tail(&self.root, self.shift, self.length - 1, tail_leaf);
            (root, self.shift)
        };

        Self {
            length: self.length + 1,
            shift,
            root: ReferenceCounter::new(root),
            tail: ReferenceCounter::from(vec![element]),
        }
    }

    /// Wraps `node` in single-child branches until it sits `level` bits deep.
    fn new_path(level: usize, node: ReferenceCounter<Node<T>>) -> ReferenceCounter<Node<T>> {
        if level == 0 {
            node
        } else {
            ReferenceCounter::new(Node::Branch(vec![Self::new_path(
                level - BITS_PER_LEVEL,
                node,
            )]))
        }
    }

    /// Inserts a full tail leaf as the right-most leaf below `node`.
    fn push_tail(
        node: &ReferenceCounter<Node<T>>,
        level: usize,
        last_index: usize,
        tail_leaf: ReferenceCounter<Node<T>>,
    ) -> Node<T> {
        let Node::Branch(children) = node.as_ref() else {
            return Node::Branch(vec![tail_leaf]);
        };

        let subindex = (last_index >> level) & MASK;
        let mut children = children.clone();

        let inserted = if level == BITS_PER_LEVEL {
            tail_leaf
        } else {
            match children.get(subindex) {
                Some(child) => ReferenceCounter::new(Self::push_tail(
                    child,
                    level - BITS_PER_LEVEL,
                    last_index,
                    tail_leaf,
                )),
                None => Self::new_path(level - BITS_PER_LEVEL, tail_leaf),
            }
        };

        if subindex < children.len() {
            children[subindex] = inserted;
        } else {
            children.push(inserted);
        }
        Node::Branch(children)
    }

    /// Returns a new vector with the element at `index` replaced.
    ///
    /// Returns `None` if the index is out of bounds.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_ops::persistent::PersistentVector;
    ///
    /// let vector: PersistentVector<i32> = (1..=5).collect();
    /// let updated = vector.update(2, 100).unwrap();
    ///
    /// assert_eq!(updated.get(2), Some(&100));
    /// assert_eq!(vector.get(2), Some(&3));
    /// assert!(vector.update(5, 0).is_none());
    /// ```
    #[must_use]
    pub fn update(&self, index: usize, element: T) -> Option<Self> {
        if index >= self.length {
            return None;
        }

        let tail_offset = self.tail_offset();
        if index >= tail_offset {
            let mut tail = self.tail.to_vec();
            tail[index - tail_offset] = element;

            return Some(Self {
                length: self.length,
                shift: self.shift,
                root: self.root.clone(),
                tail: ReferenceCounter::from(tail),
            });
        }

        Some(Self {
            length: self.length,
            shift: self.shift,
            root: ReferenceCounter::new(Self::update_in_node(&self.root, self.shift, index, element)),
            tail: self.tail.clone(),
        })
    }

    fn update_in_node(node: &Node<T>, level: usize, index: usize, element: T) -> Node<T> {
        match node {
            Node::Branch(children) => {
                let subindex = (index >> level) & MASK;
                let mut children = children.clone();
                if let Some(child) = children.get_mut(subindex) {
                    *child = ReferenceCounter::new(Self::update_in_node(
                        child,
                        level.saturating_sub(BITS_PER_LEVEL),
                        index,
                        element,
                    ));
                }
                Node::Branch(children)
            }
            Node::Leaf(elements) => {
                let mut elements = elements.to_vec();
                if let Some(slot) = elements.get_mut(index & MASK) {
                    *slot = element;
                }
                Node::Leaf(ReferenceCounter::from(elements))
            }
        }
    }

    /// Returns a new vector holding the elements in `range`.
    ///
    /// Bounds past the end are clamped, and a start beyond the end yields an
    /// empty vector.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_ops::persistent::PersistentVector;
    ///
    /// let vector: PersistentVector<char> = "abcd".chars().collect();
    /// let middle: Vec<char> = vector.slice(1..3).into_iter().collect();
    /// assert_eq!(middle, vec!['b', 'c']);
    /// assert_eq!(vector.slice(3..10).len(), 1);
    /// ```
    #[must_use]
    pub fn slice<R: RangeBounds<usize>>(&self, range: R) -> Self {
        let (start, end) = clamp_range(&range, self.length);
        if start == 0 && end == self.length {
            return self.clone();
        }
        self.iter().skip(start).take(end - start).cloned().collect()
    }

    /// Returns a new vector with the elements of `other` appended.
    #[must_use]
    pub fn append(&self, other: &Self) -> Self {
        if self.is_empty() {
            return other.clone();
        }
        other
            .iter()
            .fold(self.clone(), |vector, element| vector.push_back(element.clone()))
    }
}

/// Resolves a `RangeBounds` into a clamped `[start, end)` pair for a
/// sequence of `length` elements.
pub(crate) fn clamp_range<R: RangeBounds<usize>>(range: &R, length: usize) -> (usize, usize) {
    let start = match range.start_bound() {
        Bound::Included(&start) => start,
        Bound::Excluded(&start) => start.saturating_add(1),
        Bound::Unbounded => 0,
    };
    let end = match range.end_bound() {
        Bound::Included(&end) => end.saturating_add(1),
        Bound::Excluded(&end) => end,
        Bound::Unbounded => length,
    };
    let end = end.min(length);
    (start.min(end), end)
}

// =============================================================================
// Iterators
// =============================================================================

/// Borrowing iterator over a [`PersistentVector`].
///
/// Walks the trie one leaf at a time, so a full traversal is O(N).
pub struct PersistentVectorIterator<'a, T> {
    vector: &'a PersistentVector<T>,
    index: usize,
    leaf: &'a [T],
}

impl<'a, T> Iterator for PersistentVectorIterator<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.vector.length {
            return None;
        }
        if self.index & MASK == 0 || self.leaf.is_empty() {
            self.leaf = self.vector.leaf_for(self.index);
        }
        let element = self.leaf.get(self.index & MASK);
        self.index += 1;
        element
    }

    /// Jumps straight to the target leaf instead of walking every skipped
    /// element.
    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        let target = self.index.saturating_add(n);
        if target >= self.vector.length {
            self.index = self.vector.length;
            return None;
        }
        if target >> BITS_PER_LEVEL != self.index >> BITS_PER_LEVEL {
            self.leaf = &[];
        }
        self.index = target;
        self.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.vector.length - self.index;
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for PersistentVectorIterator<'_, T> {}

/// Owning iterator over a [`PersistentVector`].
///
/// Elements are cloned out of the shared structure.
pub struct PersistentVectorIntoIterator<T> {
    vector: PersistentVector<T>,
    index: usize,
}

impl<T: Clone> Iterator for PersistentVectorIntoIterator<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.vector.get(self.index).cloned();
        if element.is_some() {
            self.index += 1;
        }
        element
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.index = self.index.saturating_add(n).min(self.vector.length);
        self.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.vector.length - self.index;
        (remaining, Some(remaining))
    }
}

impl<T: Clone> ExactSizeIterator for PersistentVectorIntoIterator<T> {}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Default for PersistentVector<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> FromIterator<T> for PersistentVector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |vector, element| vector.push_back(element))
    }
}

impl<T: Clone> IntoIterator for PersistentVector<T> {
    type Item = T;
    type IntoIter = PersistentVectorIntoIterator<T>;

    fn into_iter(self) -> Self::IntoIter {
        PersistentVectorIntoIterator {
            vector: self,
            index: 0,
        }
    }
}

impl<'a, T> IntoIterator for &'a PersistentVector<T> {
    type Item = &'a T;
    type IntoIter = PersistentVectorIterator<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> Index<usize> for PersistentVector<T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    fn index(&self, index: usize) -> &Self::Output {
        match self.get(index) {
            Some(element) => element,
            None => panic!(
                "index out of bounds: the len is {} but the index is {index}",
                self.length
            ),
        }
    }
}

impl<T: PartialEq> PartialEq for PersistentVector<T> {
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for PersistentVector<T> {}

impl<T: Hash> Hash for PersistentVector<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.length.hash(state);
        for element in self {
            element.hash(state);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for PersistentVector<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for PersistentVector<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for PersistentVector<T>
where
    T: serde::Deserialize<'de> + Clone,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let elements = <Vec<T> as serde::Deserialize>::deserialize(deserializer)?;
        Ok(elements.into_iter().collect())
    }
}

// =============================================================================
// Tests
// =============================================================================
