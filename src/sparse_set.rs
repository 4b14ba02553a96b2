//sparse_set.rs
//! The sparse set container: storage, invariants and mutation.
//!
//! Three parallel arrays hold the state. `sparse[key]` is the packed slot of
//! `key` (or `K::INVALID`), `dense[slot]` is the key owning `slot`, and
//! `packed[slot]` is its value. Removal swaps the last entry into the hole,
//! so packed order is not stable across erasure.

use crate::config::SparseSetConfig;
use crate::error::{Result, SparseSetError};
use crate::key::SparseKey;
use log::{error, trace};
use rustc_hash::FxHashMap as HashMap;
use std::ops::Range;

#[derive(Debug, Clone)]
pub struct SparseSet<V, K: SparseKey = u32> {
    pub(crate) sparse: Vec<K>,
    pub(crate) dense: Vec<K>,
    pub(crate) packed: Vec<V>,
    pub(crate) config: SparseSetConfig,
}

impl<V, K: SparseKey> Default for SparseSet<V, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, K: SparseKey> SparseSet<V, K> {
    pub fn new() -> Self {
        Self::with_config(SparseSetConfig::default())
    }

    /// Creates a set whose sparse array already covers keys `0..sparse_size`.
    pub fn with_sparse_size(sparse_size: usize) -> Self {
        Self::with_config(SparseSetConfig::default().with_sparse_size(sparse_size))
    }

    pub fn with_capacity(sparse_size: usize, dense_capacity: usize) -> Self {
        Self::with_config(
            SparseSetConfig::default()
                .with_sparse_size(sparse_size)
                .with_dense_capacity(dense_capacity),
        )
    }

    pub fn with_config(config: SparseSetConfig) -> Self {
        let config = config.clamped(K::max_sparse_size());
        Self {
            sparse: vec![K::INVALID; config.sparse_size],
            dense: Vec::with_capacity(config.dense_capacity),
            packed: Vec::with_capacity(config.dense_capacity),
            config,
        }
    }

    #[inline]
    pub fn config(&self) -> &SparseSetConfig {
        &self.config
    }

    /// Number of stored entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.packed.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.packed.is_empty()
    }

    /// Current length of the sparse array (one past the largest key it can map).
    #[inline]
    pub fn sparse_len(&self) -> usize {
        self.sparse.len()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.packed.capacity().min(self.dense.capacity())
    }

    #[inline]
    pub fn sparse_capacity(&self) -> usize {
        self.sparse.capacity()
    }

    /// Largest key this set accepts.
    #[inline]
    pub fn max_sparse_size(&self) -> usize {
        self.config.max_sparse_size
    }

    /// Returns true if `key` currently has a value.
    ///
    /// # Panics
    ///
    /// Panics if `key` is the `K::INVALID` sentinel.
    #[inline]
    pub fn contains(&self, key: K) -> bool {
        self.slot_of(key).is_some()
    }

    #[inline]
    pub(crate) fn slot_of(&self, key: K) -> Option<usize> {
        assert!(
            !key.is_invalid(),
            "the sentinel key {:?} cannot be stored or queried",
            key
        );
        match self.sparse.get(key.to_index()) {
            Some(slot) if !slot.is_invalid() => Some(slot.to_index()),
            _ => None,
        }
    }

    #[inline]
    pub(crate) fn expect_slot(&self, key: K, op: &str) -> usize {
        match self.slot_of(key) {
            Some(slot) => slot,
            None => panic!("{}: key {:?} is not present", op, key),
        }
    }

    /// Checks the preconditions shared by every insertion path.
    pub(crate) fn assert_insertable(&self, key: K, op: &str) {
        assert!(!self.contains(key), "{}: key {:?} is already present", op, key);
        if let Err(e) = self.config.check_key(key.to_index()) {
            panic!("{}: {}", op, e);
        }
    }

    /// Grows the sparse array so that `index` is addressable.
    pub(crate) fn ensure_sparse(&mut self, index: usize) {
        if index >= self.sparse.len() {
            trace!(
                "growing sparse array from {} to {} slots",
                self.sparse.len(),
                index + 1
            );
            self.sparse.resize(index + 1, K::INVALID);
        }
    }

    // --- Insertion ---

    /// Inserts `value` under `key` and returns a reference to it.
    ///
    /// # Panics
    ///
    /// Panics if `key` is already present or exceeds the maximum sparse size.
    #[inline]
    pub fn emplace(&mut self, key: K, value: V) -> &mut V {
        self.emplace_with(key, || value)
    }

    /// Like [`emplace`](Self::emplace), but builds the value only after the
    /// preconditions have been checked.
    pub fn emplace_with<F>(&mut self, key: K, make: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        self.assert_insertable(key, "emplace");
        let value = make();

        let slot = self.packed.len();
        self.ensure_sparse(key.to_index());
        self.sparse[key.to_index()] = K::from_index(slot);
        self.dense.push(key);
        self.packed.push(value);

        self.check_slot(slot);
        &mut self.packed[slot]
    }

    /// Inserts only if `key` is absent. Returns the slot of the value under
    /// `key` and whether an insertion happened.
    #[inline]
    pub fn try_emplace(&mut self, key: K, value: V) -> (usize, bool) {
        self.try_emplace_with(key, || value)
    }

    pub fn try_emplace_with<F>(&mut self, key: K, make: F) -> (usize, bool)
    where
        F: FnOnce() -> V,
    {
        if let Some(slot) = self.slot_of(key) {
            return (slot, false);
        }
        self.emplace_with(key, make);
        (self.packed.len() - 1, true)
    }

    /// Checked form of [`try_emplace`](Self::try_emplace): a key beyond the
    /// maximum sparse size yields `KeyTooLarge` instead of panicking.
    pub fn checked_emplace(&mut self, key: K, value: V) -> Result<(usize, bool)> {
        if let Some(slot) = self.slot_of(key) {
            return Ok((slot, false));
        }
        self.config.check_key(key.to_index())?;
        Ok(self.try_emplace(key, value))
    }

    #[inline]
    pub fn get_or_emplace(&mut self, key: K, value: V) -> &mut V {
        self.get_or_emplace_with(key, || value)
    }

    pub fn get_or_emplace_with<F>(&mut self, key: K, make: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        let (slot, _) = self.try_emplace_with(key, make);
        &mut self.packed[slot]
    }

    // --- Removal ---

    /// Removes `key` by swapping the last entry into its slot.
    ///
    /// # Panics
    ///
    /// Panics if `key` is not present.
    pub fn erase(&mut self, key: K) -> V {
        let slot = self.expect_slot(key, "erase");
        let last = self.packed.len() - 1;
        let moved_key = self.dense[last];

        self.dense.swap_remove(slot);
        let value = self.packed.swap_remove(slot);
        self.sparse[moved_key.to_index()] = K::from_index(slot);
        self.sparse[key.to_index()] = K::INVALID;

        self.check_slot(slot);
        value
    }

    /// Removes the entry at packed `position` and returns the position to
    /// continue a forward walk from. The former last entry now sits there.
    /// If the removed entry was the last one, the returned position equals
    /// `len()`, the end.
    ///
    /// # Panics
    ///
    /// Panics if `position` is out of bounds.
    pub fn erase_at(&mut self, position: usize) -> usize {
        assert!(
            position < self.packed.len(),
            "erase_at: position {} out of bounds (len {})",
            position,
            self.packed.len()
        );
        let key = self.dense[position];
        self.erase(key);
        position
    }

    /// Removes every entry in the packed range. Returns `range.start`.
    pub fn erase_range(&mut self, range: Range<usize>) -> usize {
        assert!(
            range.start <= range.end && range.end <= self.packed.len(),
            "erase_range: range {:?} out of bounds (len {})",
            range,
            self.packed.len()
        );
        // Back to front: each erase refills the slot from the tail, which is
        // never inside the part of the range still to be visited.
        for position in range.clone().rev() {
            self.erase_at(position);
        }
        self.check_all();
        range.start
    }

    /// Removes `key` if present.
    pub fn remove(&mut self, key: K) -> Option<V> {
        if self.contains(key) {
            Some(self.erase(key))
        } else {
            None
        }
    }

    /// Keeps only the entries for which `keep` returns true.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(K, &mut V) -> bool,
    {
        let mut position = 0;
        while position < self.packed.len() {
            if keep(self.dense[position], &mut self.packed[position]) {
                position += 1;
            } else {
                position = self.erase_at(position);
            }
        }
    }

    pub fn clear(&mut self) {
        trace!("clearing sparse set with {} entries", self.packed.len());
        self.sparse.clear();
        self.dense.clear();
        self.packed.clear();
    }

    // --- Capacity ---

    /// Reserves room for `additional` more entries in the dense and packed arrays.
    pub fn reserve(&mut self, additional: usize) {
        trace!("reserving {} dense slots", additional);
        self.dense.reserve(additional);
        self.packed.reserve(additional);
    }

    pub fn reserve_sparse(&mut self, additional: usize) {
        trace!("reserving {} sparse slots", additional);
        self.sparse.reserve(additional);
    }

    /// Grows the sparse array to `sparse_len` slots.
    ///
    /// Fails if `sparse_len` does not exceed the current length or if it would
    /// address keys beyond the maximum sparse size.
    pub fn resize(&mut self, sparse_len: usize) -> Result<()> {
        let current = self.sparse.len();
        if sparse_len <= current || sparse_len > self.config.max_sparse_size + 1 {
            return Err(SparseSetError::invalid_resize(sparse_len, current));
        }
        trace!("resizing sparse array from {} to {} slots", current, sparse_len);
        self.sparse.resize(sparse_len, K::INVALID);
        Ok(())
    }

    pub fn shrink_to_fit(&mut self) {
        trace!(
            "shrinking capacities (sparse {}, dense {})",
            self.sparse.capacity(),
            self.packed.capacity()
        );
        self.sparse.shrink_to_fit();
        self.dense.shrink_to_fit();
        self.packed.shrink_to_fit();
    }

    // --- Consistency ---

    /// Verifies every sparse/dense/packed invariant.
    pub fn validate(&self) -> Result<()> {
        let count = self.packed.len();
        if self.dense.len() != count {
            return Err(SparseSetError::consistency_violation(format!(
                "dense length {} != packed length {}",
                self.dense.len(),
                count
            )));
        }

        let mut first_seen: HashMap<K, usize> = HashMap::default();
        first_seen.reserve(count);
        for (slot, &key) in self.dense.iter().enumerate() {
            if let Some(previous) = first_seen.insert(key, slot) {
                return Err(SparseSetError::consistency_violation(format!(
                    "key {:?} appears at dense slots {} and {}",
                    key, previous, slot
                )));
            }
            match self.sparse.get(key.to_index()) {
                Some(mapped) if mapped.to_index() == slot => {}
                other => {
                    return Err(SparseSetError::consistency_violation(format!(
                        "dense[{}] = {:?} but sparse maps it to {:?}",
                        slot, key, other
                    )))
                }
            }
        }

        let mut mapped = 0;
        for (index, slot) in self.sparse.iter().enumerate() {
            if slot.is_invalid() {
                continue;
            }
            let slot = slot.to_index();
            if slot >= count || self.dense[slot].to_index() != index {
                return Err(SparseSetError::consistency_violation(format!(
                    "sparse[{}] = {} does not point back at key {}",
                    index, slot, index
                )));
            }
            mapped += 1;
        }
        if mapped != count {
            return Err(SparseSetError::consistency_violation(format!(
                "{} sparse entries mapped for {} stored values",
                mapped, count
            )));
        }
        Ok(())
    }

    /// Cheap post-mutation check around a single slot.
    pub(crate) fn check_slot(&self, slot: usize) {
        if !self.config.validation.is_active() {
            return;
        }
        let result = if self.dense.len() != self.packed.len() {
            Err(SparseSetError::consistency_violation(format!(
                "dense length {} != packed length {}",
                self.dense.len(),
                self.packed.len()
            )))
        } else if slot < self.dense.len()
            && self.sparse[self.dense[slot].to_index()].to_index() != slot
        {
            Err(SparseSetError::consistency_violation(format!(
                "sparse[dense[{}]] does not point back at slot {}",
                slot, slot
            )))
        } else {
            Ok(())
        };
        Self::fail_on(result);
    }

    /// Full post-mutation check after operations touching many slots.
    pub(crate) fn check_all(&self) {
        if self.config.validation.is_active() {
            Self::fail_on(self.validate());
        }
    }

    fn fail_on(result: Result<()>) {
        if let Err(e) = result {
            error!("sparse set invariant broken: {}", e);
            panic!("sparse set invariant broken: {}", e);
        }
    }
}
