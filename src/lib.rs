//! # lambars-ops
//!
//! Guarded, type-agnostic transformation operations over persistent
//! collections.
//!
//! ## Overview
//!
//! Every operation takes one or more immutable collections and returns a new
//! value, leaving its inputs untouched. The library is built from:
//!
//! - **Persistent Data Structures**: `PersistentVector`, `PersistentOrderedMap`,
//!   `PersistentOrderedSet`, all with O(1) clone and structural sharing
//! - **Value**: a dynamic value with undefined, null, NaN, nested lists and maps
//! - **Semantics**: capability traits (`Sentinel`, `Truthy`, `Measured`,
//!   `PathLookup`, `DeepDefaults`, `Entries`) that give operations their
//!   meaning per element type
//! - **Operations**: sort-position search, sequence reshaping, set
//!   combination, grouping, sampling and key-mapping operations, each behind
//!   the empty-input guard
//!
//! ## Feature Flags
//!
//! - `arc`: share structure through `Arc` so collections are `Send + Sync`
//! - `serde`: `Serialize` / `Deserialize` for collections and `Value`
//! - `fxhash`: hash map indexes with `FxHasher`
//! - `tracing`: emit a `TRACE` event whenever the guard passes an argument
//!   through
//!
//! ## Example
//!
//! ```rust
//! use lambars_ops::prelude::*;
//!
//! let sequence: PersistentVector<i32> = [1, 2, 3].into_iter().collect();
//! assert_eq!(sorted_index(sequence, 2), Guarded::Computed(1));
//!
//! let absent: Option<PersistentVector<i32>> = None;
//! assert_eq!(sorted_index(absent, 2), Guarded::Passthrough(None));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports the collections, `Value`, the capability traits and every
/// operation.
///
/// # Usage
///
/// ```rust
/// use lambars_ops::prelude::*;
/// ```
pub mod prelude {
    pub use crate::ops::*;
    pub use crate::persistent::*;
    pub use crate::semantics::*;
    pub use crate::value::Value;
}

pub mod ops;
pub mod persistent;
pub mod semantics;
pub mod value;
