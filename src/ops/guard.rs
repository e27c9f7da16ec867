//! The empty-input guard shared by every operation.
//!
//! Each operation in this crate assumes a non-degenerate first argument: it
//! takes its size, iterates it, or draws an element from it. Rather than
//! re-check that in every body, operations are written as
//! `guard("name", first, |inner| ...)`. When `first` is empty or absent the
//! body never runs and `first` comes back unchanged as
//! [`Guarded::Passthrough`]; otherwise the body's result is returned as
//! [`Guarded::Computed`].
//!
//! # Examples
//!
//! ```rust
//! use lambars_ops::ops::guard::{Guarded, guard};
//! use lambars_ops::persistent::PersistentVector;
//!
//! let sum = |vector: PersistentVector<i32>| {
//!     guard("sum", vector, |inner| inner.iter().sum::<i32>())
//! };
//!
//! assert_eq!(sum((1..=3).collect()), Guarded::Computed(6));
//! assert!(sum(PersistentVector::new()).is_passthrough());
//!
//! // `Option` carries an absent first argument.
//! let absent: Option<PersistentVector<i32>> = None;
//! assert_eq!(guard("sum", absent, |inner| inner.len()), Guarded::Passthrough(None));
//! ```

use crate::persistent::{PersistentOrderedMap, PersistentOrderedSet, PersistentVector};
use crate::value::Value;

// =============================================================================
// Guardable
// =============================================================================

/// A first argument the guard can inspect.
///
/// `into_inner` must fail exactly when `is_degenerate` holds.
pub trait Guardable: Sized {
    /// What the operation body receives once the argument passed the guard.
    type Inner;

    /// Returns `true` when the value is absent or has no elements.
    fn is_degenerate(&self) -> bool;

    /// Unwraps a non-degenerate value, or hands the degenerate one back.
    ///
    /// # Errors
    ///
    /// Returns `Err(self)` when the value is degenerate.
    fn into_inner(self) -> Result<Self::Inner, Self>;
}

macro_rules! impl_collection_guardable {
    ($collection:ident < $($param:ident),+ >) => {
        impl<$($param),+> Guardable for $collection<$($param),+> {
            type Inner = Self;

            fn is_degenerate(&self) -> bool {
                self.is_empty()
            }

            fn into_inner(self) -> Result<Self, Self> {
                if self.is_empty() { Err(self) } else { Ok(self) }
            }
        }
    };
}

impl_collection_guardable!(PersistentVector<T>);
impl_collection_guardable!(PersistentOrderedSet<T>);
impl_collection_guardable!(PersistentOrderedMap<K, V>);

/// Undefined, null, and empty strings, lists and maps are degenerate.
impl Guardable for Value {
    type Inner = Self;

    fn is_degenerate(&self) -> bool {
        match self {
            Self::Undefined | Self::Null => true,
            Self::String(text) => text.is_empty(),
            Self::List(list) => list.is_empty(),
            Self::Map(map) => map.is_empty(),
            Self::Bool(_) | Self::Number(_) => false,
        }
    }

    fn into_inner(self) -> Result<Self, Self> {
        if self.is_degenerate() {
            Err(self)
        } else {
            Ok(self)
        }
    }
}

/// `None` is the absent argument.
impl<C: Guardable> Guardable for Option<C> {
    type Inner = C::Inner;

    fn is_degenerate(&self) -> bool {
        self.as_ref().is_none_or(Guardable::is_degenerate)
    }

    fn into_inner(self) -> Result<C::Inner, Self> {
        match self {
            Some(collection) => collection.into_inner().map_err(Some),
            None => Err(None),
        }
    }
}

/// Returns `true` when `value` is absent or has no elements.
///
/// This query is never guarded itself.
///
/// # Examples
///
/// ```rust
/// use lambars_ops::ops::guard::is_empty;
/// use lambars_ops::value::Value;
///
/// assert!(is_empty(&Value::Null));
/// assert!(is_empty(&Value::from("")));
/// assert!(!is_empty(&Value::list([0])));
/// assert!(is_empty(&None::<Value>));
/// ```
pub fn is_empty<G: Guardable>(value: &G) -> bool {
    value.is_degenerate()
}

// =============================================================================
// Guarded
// =============================================================================

/// Result of a guarded operation.
///
/// `I` is the type of the operation's first argument, `O` the type the
/// operation computes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Guarded<I, O> {
    /// The first argument was degenerate and is returned unchanged.
    Passthrough(I),
    /// The operation ran and produced this result.
    Computed(O),
}

impl<I, O> Guarded<I, O> {
    /// Returns `true` if the guard short-circuited.
    #[inline]
    pub const fn is_passthrough(&self) -> bool {
        matches!(self, Self::Passthrough(_))
    }

    /// Returns `true` if the operation ran.
    #[inline]
    pub const fn is_computed(&self) -> bool {
        matches!(self, Self::Computed(_))
    }

    /// Returns the computed result, if any.
    #[inline]
    pub fn computed(self) -> Option<O> {
        match self {
            Self::Computed(output) => Some(output),
            Self::Passthrough(_) => None,
        }
    }

    /// Returns the untouched first argument, if the guard short-circuited.
    #[inline]
    pub fn passthrough(self) -> Option<I> {
        match self {
            Self::Passthrough(input) => Some(input),
            Self::Computed(_) => None,
        }
    }

    /// Returns a reference to the computed result, if any.
    #[inline]
    pub const fn computed_ref(&self) -> Option<&O> {
        match self {
            Self::Computed(output) => Some(output),
            Self::Passthrough(_) => None,
        }
    }

    /// Maps the computed result, leaving a passthrough untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_ops::ops::guard::Guarded;
    ///
    /// let computed: Guarded<(), i32> = Guarded::Computed(2);
    /// assert_eq!(computed.map(|n| n * 10), Guarded::Computed(20));
    /// ```
    #[inline]
    pub fn map<P, F>(self, function: F) -> Guarded<I, P>
    where
        F: FnOnce(O) -> P,
    {
        match self {
            Self::Passthrough(input) => Guarded::Passthrough(input),
            Self::Computed(output) => Guarded::Computed(function(output)),
        }
    }

    /// Collapses both cases into one value.
    #[inline]
    pub fn fold<T, P, C>(self, on_passthrough: P, on_computed: C) -> T
    where
        P: FnOnce(I) -> T,
        C: FnOnce(O) -> T,
    {
        match self {
            Self::Passthrough(input) => on_passthrough(input),
            Self::Computed(output) => on_computed(output),
        }
    }

    /// Returns the computed result, or derives one from the passthrough.
    #[inline]
    pub fn unwrap_or_else<F>(self, function: F) -> O
    where
        F: FnOnce(I) -> O,
    {
        self.fold(function, |output| output)
    }
}

impl<T> Guarded<T, T> {
    /// Returns whichever value is present when both sides share a type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_ops::ops::guard::Guarded;
    ///
    /// let passthrough: Guarded<Vec<i32>, Vec<i32>> = Guarded::Passthrough(vec![]);
    /// assert_eq!(passthrough.merge(), Vec::<i32>::new());
    /// ```
    #[inline]
    pub fn merge(self) -> T {
        match self {
            Self::Passthrough(value) | Self::Computed(value) => value,
        }
    }
}

// =============================================================================
// Combinators
// =============================================================================

/// Runs `body` on the unwrapped `first` unless `first` is degenerate.
///
/// `operation` names the caller in the `tracing` event emitted on the
/// passthrough path.
pub fn guard<I, O, F>(operation: &'static str, first: I, body: F) -> Guarded<I, O>
where
    I: Guardable,
    F: FnOnce(I::Inner) -> O,
{
    match first.into_inner() {
        Ok(inner) => Guarded::Computed(body(inner)),
        Err(first) => {
            trace_passthrough(operation);
            Guarded::Passthrough(first)
        }
    }
}

/// [`guard`] for a fallible body.
///
/// # Errors
///
/// Returns the body's error unchanged.
pub fn try_guard<I, O, E, F>(
    operation: &'static str,
    first: I,
    body: F,
) -> Result<Guarded<I, O>, E>
where
    I: Guardable,
    F: FnOnce(I::Inner) -> Result<O, E>,
{
    match first.into_inner() {
        Ok(inner) => body(inner).map(Guarded::Computed),
        Err(first) => {
            trace_passthrough(operation);
            Ok(Guarded::Passthrough(first))
        }
    }
}

#[cfg(feature = "tracing")]
#[inline]
fn trace_passthrough(operation: &'static str) {
    tracing::trace!(operation, "degenerate first argument passed through");
}

#[cfg(not(feature = "tracing"))]
#[inline]
const fn trace_passthrough(_operation: &'static str) {}
