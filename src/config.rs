//config.rs
//! Construction-time configuration for a sparse set

use crate::error::{Result, SparseSetError};

/// Controls when the full invariant check runs after structural mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationMode {
    /// Never validate.
    Disabled,
    /// Validate only in builds with `debug_assertions`.
    Debug,
    /// Validate in every build.
    Always,
}

impl Default for ValidationMode {
    fn default() -> Self {
        ValidationMode::Debug
    }
}

impl ValidationMode {
    #[inline]
    pub fn is_active(&self) -> bool {
        match self {
            ValidationMode::Disabled => false,
            ValidationMode::Debug => cfg!(debug_assertions),
            ValidationMode::Always => true,
        }
    }
}

/// Sizing and checking knobs for a sparse set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SparseSetConfig {
    /// Largest key the set accepts. Clamped to the key type's own limit.
    pub max_sparse_size: usize,
    /// Initial length of the sparse array, filled with the sentinel
    pub sparse_size: usize,
    /// Reserved capacity of the dense and packed arrays
    pub dense_capacity: usize,
    pub validation: ValidationMode,
}

impl Default for SparseSetConfig {
    fn default() -> Self {
        Self {
            max_sparse_size: usize::MAX,
            sparse_size: 0,
            dense_capacity: 0,
            validation: ValidationMode::Debug,
        }
    }
}

impl SparseSetConfig {
    /// Keys limited to the `u16` range, for small id spaces
    pub fn compact() -> Self {
        Self {
            max_sparse_size: u16::MAX as usize - 1,
            ..Self::default()
        }
    }

    /// No invariant checking, even in debug builds
    pub fn trusted() -> Self {
        Self {
            validation: ValidationMode::Disabled,
            ..Self::default()
        }
    }

    /// Full invariant checking after every structural mutation, in every build
    pub fn paranoid() -> Self {
        Self {
            validation: ValidationMode::Always,
            ..Self::default()
        }
    }

    pub fn with_max_sparse_size(mut self, max_sparse_size: usize) -> Self {
        self.max_sparse_size = max_sparse_size;
        self
    }

    pub fn with_sparse_size(mut self, sparse_size: usize) -> Self {
        self.sparse_size = sparse_size;
        self
    }

    pub fn with_dense_capacity(mut self, dense_capacity: usize) -> Self {
        self.dense_capacity = dense_capacity;
        self
    }

    pub fn with_validation(mut self, validation: ValidationMode) -> Self {
        self.validation = validation;
        self
    }

    /// Clamps `max_sparse_size` (and the preallocated sparse size) to what the
    /// key type can represent.
    pub(crate) fn clamped(mut self, type_max: usize) -> Self {
        self.max_sparse_size = self.max_sparse_size.min(type_max);
        self.sparse_size = self.sparse_size.min(self.max_sparse_size + 1);
        self
    }

    /// Check if a key fits the configured key space
    pub fn check_key(&self, key: usize) -> Result<()> {
        if key > self.max_sparse_size {
            return Err(SparseSetError::key_too_large(key, self.max_sparse_size));
        }
        Ok(())
    }
}
