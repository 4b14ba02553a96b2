// reorder.rs - Value/label swaps, sorting and sorted insertion
use crate::key::SparseKey;
use crate::sparse_set::SparseSet;
use log::trace;
use smallvec::SmallVec;
use std::cmp::Ordering;

/// Permutations up to this many entries are computed without heap allocation.
const INLINE_PERMUTATION: usize = 64;

impl<V, K: SparseKey> SparseSet<V, K> {
    /// Exchanges the values stored under `a` and `b`. Key mappings stay put.
    ///
    /// # Panics
    ///
    /// Panics if either key is absent or if `a == b`.
    pub fn swap_values(&mut self, a: K, b: K) {
        assert!(a != b, "swap_values: cannot swap key {:?} with itself", a);
        let slot_a = self.expect_slot(a, "swap_values");
        let slot_b = self.expect_slot(b, "swap_values");
        self.packed.swap(slot_a, slot_b);
    }

    /// Returns false instead of panicking when either key is absent or both
    /// keys are the same.
    pub fn try_swap_values(&mut self, a: K, b: K) -> bool {
        if a == b || !self.contains(a) || !self.contains(b) {
            return false;
        }
        self.swap_values(a, b);
        true
    }

    /// Exchanges the dense labels at the slots of `a` and `b` and repoints the
    /// sparse entries to follow them. Values do not move, so afterwards `a`
    /// resolves to what `b` held and vice versa.
    ///
    /// # Panics
    ///
    /// Panics if either key is absent or if `a == b`.
    pub fn swap_elements(&mut self, a: K, b: K) {
        assert!(a != b, "swap_elements: cannot swap key {:?} with itself", a);
        let slot_a = self.expect_slot(a, "swap_elements");
        let slot_b = self.expect_slot(b, "swap_elements");
        self.swap_labels_at(slot_a, slot_b);
        self.check_slot(slot_a);
        self.check_slot(slot_b);
    }

    pub fn try_swap_elements(&mut self, a: K, b: K) -> bool {
        if a == b || !self.contains(a) || !self.contains(b) {
            return false;
        }
        self.swap_elements(a, b);
        true
    }

    #[inline]
    fn swap_labels_at(&mut self, i: usize, j: usize) {
        self.dense.swap(i, j);
        self.sparse[self.dense[i].to_index()] = K::from_index(i);
        self.sparse[self.dense[j].to_index()] = K::from_index(j);
    }

    /// Moves whole entries: both keys keep their values but trade slots.
    #[inline]
    fn swap_slots(&mut self, i: usize, j: usize) {
        self.packed.swap(i, j);
        self.swap_labels_at(i, j);
    }

    /// Sorts entries by value, ascending.
    pub fn sort(&mut self)
    where
        V: Ord,
    {
        self.sort_by(Ord::cmp);
    }

    pub fn sort_by_key<T, F>(&mut self, mut f: F)
    where
        T: Ord,
        F: FnMut(&V) -> T,
    {
        self.sort_by(|a, b| f(a).cmp(&f(b)));
    }

    /// Reorders the packed values into `compare` order; every key keeps
    /// resolving to its own value.
    ///
    /// The permutation is computed over slot indices, then applied in place
    /// by walking its cycles, so each entry moves at most once per cycle step
    /// and no values are cloned.
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&V, &V) -> Ordering,
    {
        let len = self.packed.len();
        if len < 2 {
            return;
        }

        // order[i] is the current slot of the entry that belongs at slot i.
        let mut order: SmallVec<[usize; INLINE_PERMUTATION]> = (0..len).collect();
        let packed = &self.packed;
        order.sort_by(|&a, &b| compare(&packed[a], &packed[b]));

        let mut swaps = 0usize;
        for start in 0..len {
            if order[start] == start {
                continue;
            }
            let mut current = start;
            loop {
                let source = order[current];
                order[current] = current;
                if source == start {
                    break;
                }
                self.swap_slots(current, source);
                swaps += 1;
                current = source;
            }
        }

        trace!("sorted {} entries with {} swaps", len, swaps);
        self.check_all();
    }

    pub fn is_sorted(&self) -> bool
    where
        V: Ord,
    {
        self.is_sorted_by(Ord::cmp)
    }

    pub fn is_sorted_by<F>(&self, mut compare: F) -> bool
    where
        F: FnMut(&V, &V) -> Ordering,
    {
        self.packed
            .windows(2)
            .all(|pair| compare(&pair[0], &pair[1]) != Ordering::Greater)
    }

    /// Inserts `value` at its lower-bound position in an already sorted set,
    /// shifting later entries right by one.
    ///
    /// # Panics
    ///
    /// Panics if `key` is already present or exceeds the maximum sparse size.
    pub fn emplace_sorted(&mut self, key: K, value: V) -> &mut V
    where
        V: Ord,
    {
        self.emplace_sorted_by(key, value, Ord::cmp)
    }

    pub fn emplace_sorted_by<F>(&mut self, key: K, value: V, compare: F) -> &mut V
    where
        F: FnMut(&V, &V) -> Ordering,
    {
        let slot = self.insert_sorted(key, value, compare);
        &mut self.packed[slot]
    }

    /// Shared body of the sorted insertions; returns the slot it filled.
    fn insert_sorted<F>(&mut self, key: K, value: V, mut compare: F) -> usize
    where
        F: FnMut(&V, &V) -> Ordering,
    {
        self.assert_insertable(key, "emplace_sorted");

        let slot = self
            .packed
            .partition_point(|probe| compare(probe, &value) == Ordering::Less);

        self.ensure_sparse(key.to_index());
        self.dense.insert(slot, key);
        self.packed.insert(slot, value);
        for (offset, shifted) in self.dense[slot..].iter().enumerate() {
            self.sparse[shifted.to_index()] = K::from_index(slot + offset);
        }

        self.check_all();
        slot
    }

    /// Sorted insertion that leaves an existing entry untouched. Returns the
    /// slot of the value under `key` and whether an insertion happened.
    pub fn try_emplace_sorted(&mut self, key: K, value: V) -> (usize, bool)
    where
        V: Ord,
    {
        self.try_emplace_sorted_by(key, value, Ord::cmp)
    }

    pub fn try_emplace_sorted_by<F>(&mut self, key: K, value: V, compare: F) -> (usize, bool)
    where
        F: FnMut(&V, &V) -> Ordering,
    {
        if let Some(slot) = self.slot_of(key) {
            return (slot, false);
        }
        (self.insert_sorted(key, value, compare), true)
    }
}
