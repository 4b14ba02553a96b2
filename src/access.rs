// access.rs - Lookup, indexed access and reverse lookup
use crate::error::{Result, SparseSetError};
use crate::key::SparseKey;
use crate::sparse_set::SparseSet;
use std::ops::{Index, IndexMut};

impl<V, K: SparseKey> SparseSet<V, K> {
    #[inline]
    pub fn get(&self, key: K) -> Option<&V> {
        self.slot_of(key).map(|slot| &self.packed[slot])
    }

    #[inline]
    pub fn get_mut(&mut self, key: K) -> Option<&mut V> {
        self.slot_of(key).map(move |slot| &mut self.packed[slot])
    }

    /// Checked access. An absent key yields `OutOfRange` carrying that key,
    /// so callers can populate it and retry.
    #[inline]
    pub fn at(&self, key: K) -> Result<&V> {
        self.get(key)
            .ok_or_else(|| SparseSetError::out_of_range(key.to_index()))
    }

    #[inline]
    pub fn at_mut(&mut self, key: K) -> Result<&mut V> {
        self.get_mut(key)
            .ok_or_else(|| SparseSetError::out_of_range(key.to_index()))
    }

    /// Packed position of the value under `key`, or `None` past the end.
    #[inline]
    pub fn find(&self, key: K) -> Option<usize> {
        self.slot_of(key)
    }

    /// Key owning packed `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position` is out of bounds.
    #[inline]
    pub fn sparse_index(&self, position: usize) -> K {
        assert!(
            position < self.dense.len(),
            "sparse_index: position {} out of bounds (len {})",
            position,
            self.dense.len()
        );
        self.dense[position]
    }

    /// Key owning reverse `position`, counted from the back (`0` is the last
    /// entry), matching positions produced by `iter().rev()`.
    #[inline]
    pub fn sparse_index_rev(&self, position: usize) -> K {
        assert!(
            position < self.dense.len(),
            "sparse_index_rev: position {} out of bounds (len {})",
            position,
            self.dense.len()
        );
        self.dense[self.dense.len() - 1 - position]
    }

    /// Keys in packed order.
    #[inline]
    pub fn keys(&self) -> &[K] {
        &self.dense
    }

    /// Values in packed order.
    #[inline]
    pub fn values(&self) -> &[V] {
        &self.packed
    }

    #[inline]
    pub fn values_mut(&mut self) -> &mut [V] {
        &mut self.packed
    }

    pub fn first(&self) -> Option<(K, &V)> {
        self.dense.first().copied().zip(self.packed.first())
    }

    pub fn last(&self) -> Option<(K, &V)> {
        self.dense.last().copied().zip(self.packed.last())
    }
}

/// Unchecked `[key]` access.
///
/// # Panics
///
/// Panics if `key` is not present.
impl<V, K: SparseKey> Index<K> for SparseSet<V, K> {
    type Output = V;

    #[inline]
    fn index(&self, key: K) -> &V {
        let slot = self.expect_slot(key, "index");
        &self.packed[slot]
    }
}

impl<V, K: SparseKey> IndexMut<K> for SparseSet<V, K> {
    #[inline]
    fn index_mut(&mut self, key: K) -> &mut V {
        let slot = self.expect_slot(key, "index");
        &mut self.packed[slot]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SparseSet<i32> {
        let mut set = SparseSet::new();
        set.emplace(2, 300);
        set.emplace(0, 100);
        set.emplace(1, 200);
        set
    }

    #[test]
    fn test_round_trip() {
        let set = sample();
        assert_eq!(set.len(), 3);
        assert!(set.contains(1));
        assert_eq!(set.at(1), Ok(&200));
        assert_eq!(set[2], 300);
        assert_eq!(set.get(7), None);
    }

    #[test]
    fn test_at_out_of_range_carries_key() {
        let set = sample();
        let err = set.at(99).unwrap_err();
        assert_eq!(err, SparseSetError::OutOfRange { key: 99 });
        assert_eq!(err.missing_key(), Some(99));
    }

    #[test]
    fn test_at_recover_and_retry() {
        let mut set = sample();
        let missing = match set.at(42) {
            Ok(_) => panic!("key 42 should be absent"),
            Err(SparseSetError::OutOfRange { key }) => key,
            Err(e) => panic!("unexpected error: {}", e),
        };
        set.emplace(u32::from_index(missing), 0);
        assert_eq!(set.at(42), Ok(&0));
    }

    #[test]
    fn test_erase_scenario() {
        let mut set = sample();
        set.erase(1);
        assert!(!set.contains(1));
        assert!(set.contains(0));
        assert!(set.contains(2));
        assert_eq!(set.at(2), Ok(&300));
        assert_eq!(set.at(0), Ok(&100));
        assert!(set.at(99).is_err());
    }

    #[test]
    fn test_mutable_access() {
        let mut set = sample();
        set[0] += 1;
        *set.at_mut(1).unwrap() += 2;
        *set.get_mut(2).unwrap() += 3;
        assert_eq!(set.values(), &[303, 101, 202]);
        assert!(set.at_mut(5).is_err());
    }

    #[test]
    #[should_panic(expected = "not present")]
    fn test_index_absent_panics() {
        let set = sample();
        let _ = set[5];
    }

    #[test]
    fn test_find_and_reverse_lookup() {
        let set = sample();
        assert_eq!(set.find(0), Some(1));
        assert_eq!(set.find(9), None);
        assert_eq!(set.sparse_index(0), 2);
        assert_eq!(set.sparse_index(2), 1);
        assert_eq!(set.sparse_index_rev(0), 1);
        assert_eq!(set.sparse_index_rev(2), 2);
        for position in 0..set.len() {
            assert_eq!(set.find(set.sparse_index(position)), Some(position));
        }
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_sparse_index_out_of_bounds_panics() {
        sample().sparse_index(3);
    }

    #[test]
    fn test_first_last() {
        let set = sample();
        assert_eq!(set.first(), Some((2, &300)));
        assert_eq!(set.last(), Some((1, &200)));
        assert_eq!(SparseSet::<i32>::new().first(), None);
    }
}
