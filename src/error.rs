//error.rs
//! Error types for the sparse set container

use thiserror::Error;

/// Result type alias for sparse set operations
pub type Result<T> = std::result::Result<T, SparseSetError>;

/// Main error type for sparse set operations.
///
/// Keys are carried as `usize` so the error stays independent of the key type;
/// convert back with [`SparseKey::from_index`](crate::SparseKey::from_index).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SparseSetError {
    #[error("Key {key} is not present in the sparse set")]
    OutOfRange { key: usize },

    #[error("Key {key} exceeds the maximum sparse size ({max})")]
    KeyTooLarge { key: usize, max: usize },

    #[error("Invalid sparse resize: requested {requested}, current {current}")]
    InvalidResize { requested: usize, current: usize },

    #[error("Consistency check failed: {details}")]
    ConsistencyViolation { details: String },
}

impl SparseSetError {
    pub fn out_of_range(key: usize) -> Self {
        Self::OutOfRange { key }
    }

    pub fn key_too_large(key: usize, max: usize) -> Self {
        Self::KeyTooLarge { key, max }
    }

    pub fn invalid_resize(requested: usize, current: usize) -> Self {
        Self::InvalidResize { requested, current }
    }

    pub fn consistency_violation(details: impl Into<String>) -> Self {
        Self::ConsistencyViolation {
            details: details.into(),
        }
    }

    /// The offending key of an `OutOfRange` error.
    pub fn missing_key(&self) -> Option<usize> {
        match self {
            Self::OutOfRange { key } => Some(*key),
            _ => None,
        }
    }
}
