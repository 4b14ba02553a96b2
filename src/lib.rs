// lib.rs - Main library file
//!
//! A sparse set: an associative container from small unsigned integer keys to
//! values with O(1) insertion, removal and membership tests, dense iteration
//! over the values, and in-place sorting that keeps every key attached to its
//! value.
//!
//! ```
//! use sparse_set::SparseSet;
//!
//! let mut set: SparseSet<&str> = SparseSet::new();
//! set.emplace(2, "two");
//! set.emplace(0, "zero");
//! set.sort();
//! assert_eq!(set.values(), &["two", "zero"]);
//! assert_eq!(set[0], "zero");
//! assert!(set.at(7).is_err());
//! ```

pub mod access;
pub mod config;
pub mod error;
pub mod iter;
pub mod key;
pub mod reorder;
pub mod sparse_set;

#[cfg(test)]
mod proptests;

// Re-export core types for easier access from outside the crate.
pub use config::{SparseSetConfig, ValidationMode};
pub use error::{Result, SparseSetError};
pub use iter::{Entries, EntriesMut, IntoEntries};
pub use key::SparseKey;
pub use sparse_set::SparseSet;

/// Asserts that a sparse set passes its full consistency check, in debug
/// builds only.
#[macro_export]
macro_rules! debug_assert_consistent {
    ($set:expr) => {
        #[cfg(debug_assertions)]
        if let Err(e) = $set.validate() {
            panic!("Sparse set inconsistent: {}", e);
        }
    };
}

/// A "prelude" module for easily importing the most commonly used types.
pub mod prelude {
    pub use crate::{Result, SparseKey, SparseSet, SparseSetConfig, SparseSetError, ValidationMode};
}
