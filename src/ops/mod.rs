//! Guarded transformation operations.
//!
//! Every operation here, apart from [`size`] and [`is_empty`], runs through
//! [`guard`]: when its first argument is empty or absent it returns that
//! argument unchanged as [`Guarded::Passthrough`] without looking at the
//! remaining arguments. Otherwise the result is [`Guarded::Computed`].
//!
//! The operations are grouped by what they work on:
//!
//! - [`ordering`]: sort-position search
//! - [`sequence`]: reshaping one sequence
//! - [`combine`]: set-style combination of several collections
//! - [`collection`]: grouping, partitioning, sampling, size
//! - [`object`]: key mappings
//!
//! # Examples
//!
//! ```rust
//! use lambars_ops::ops::{Guarded, chunk, uniq};
//! use lambars_ops::persistent::PersistentVector;
//!
//! let sequence: PersistentVector<i32> = [1, 2, 1, 3].into_iter().collect();
//! let unique = uniq(sequence).computed().unwrap();
//! assert_eq!(unique.len(), 3);
//!
//! let empty = PersistentVector::<i32>::new();
//! assert_eq!(chunk(empty.clone(), 2), Guarded::Passthrough(empty));
//! ```

use std::convert::Infallible;

pub mod collection;
pub mod combine;
pub mod guard;
pub mod object;
pub mod ordering;
pub mod sequence;

pub use collection::{
    count_by, group_by, key_by, partition, sample, sample_size, sample_size_with, sample_with,
    shuffle, shuffle_with, size, try_count_by, try_group_by, try_key_by, try_partition,
};
pub use combine::{intersection, intersection_all, union, uniq, xor};
pub use guard::{Guardable, Guarded, guard, is_empty, try_guard};
pub use object::{at, defaults, defaults_deep, invert, omit, omit_by, pick, pick_by};
pub use ordering::{
    MAX_ARRAY_INDEX, insertion_index, insertion_index_by, sorted_index, sorted_index_by,
    sorted_last_index, sorted_last_index_by, try_insertion_index_by, try_sorted_index_by,
};
pub use sequence::{chunk, compact, concat, difference, difference_by, fill, pull_at};

/// Unwraps a result that cannot be an error.
pub(crate) fn infallible<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}
