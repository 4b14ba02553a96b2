// iter.rs - Iteration and bulk construction
use crate::key::SparseKey;
use crate::sparse_set::SparseSet;
use std::iter::{FusedIterator, Zip};
use std::{slice, vec};

/// Iterator over `(key, &value)` pairs in packed order.
#[derive(Debug, Clone)]
pub struct Entries<'a, V, K> {
    inner: Zip<slice::Iter<'a, K>, slice::Iter<'a, V>>,
}

/// Iterator over `(key, &mut value)` pairs in packed order.
#[derive(Debug)]
pub struct EntriesMut<'a, V, K> {
    inner: Zip<slice::Iter<'a, K>, slice::IterMut<'a, V>>,
}

/// Owning iterator over `(key, value)` pairs in packed order.
#[derive(Debug)]
pub struct IntoEntries<V, K> {
    inner: Zip<vec::IntoIter<K>, vec::IntoIter<V>>,
}

impl<'a, V, K: SparseKey> Iterator for Entries<'a, V, K> {
    type Item = (K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(&key, value)| (key, value))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, V, K: SparseKey> DoubleEndedIterator for Entries<'a, V, K> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(&key, value)| (key, value))
    }
}

impl<'a, V, K: SparseKey> ExactSizeIterator for Entries<'a, V, K> {}
impl<'a, V, K: SparseKey> FusedIterator for Entries<'a, V, K> {}

impl<'a, V, K: SparseKey> Iterator for EntriesMut<'a, V, K> {
    type Item = (K, &'a mut V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(&key, value)| (key, value))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, V, K: SparseKey> DoubleEndedIterator for EntriesMut<'a, V, K> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(&key, value)| (key, value))
    }
}

impl<'a, V, K: SparseKey> ExactSizeIterator for EntriesMut<'a, V, K> {}
impl<'a, V, K: SparseKey> FusedIterator for EntriesMut<'a, V, K> {}

impl<V, K: SparseKey> Iterator for IntoEntries<V, K> {
    type Item = (K, V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V, K: SparseKey> DoubleEndedIterator for IntoEntries<V, K> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<V, K: SparseKey> ExactSizeIterator for IntoEntries<V, K> {}
impl<V, K: SparseKey> FusedIterator for IntoEntries<V, K> {}

impl<V, K: SparseKey> SparseSet<V, K> {
    /// Values in packed order.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, V> {
        self.packed.iter()
    }

    #[inline]
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, V> {
        self.packed.iter_mut()
    }

    #[inline]
    pub fn entries(&self) -> Entries<'_, V, K> {
        Entries {
            inner: self.dense.iter().zip(self.packed.iter()),
        }
    }

    /// Keys stay read-only; only values can be changed through this iterator.
    #[inline]
    pub fn entries_mut(&mut self) -> EntriesMut<'_, V, K> {
        EntriesMut {
            inner: self.dense.iter().zip(self.packed.iter_mut()),
        }
    }
}

impl<'a, V, K: SparseKey> IntoIterator for &'a SparseSet<V, K> {
    type Item = &'a V;
    type IntoIter = slice::Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, V, K: SparseKey> IntoIterator for &'a mut SparseSet<V, K> {
    type Item = &'a mut V;
    type IntoIter = slice::IterMut<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<V, K: SparseKey> IntoIterator for SparseSet<V, K> {
    type Item = (K, V);
    type IntoIter = IntoEntries<V, K>;

    fn into_iter(self) -> Self::IntoIter {
        IntoEntries {
            inner: self.dense.into_iter().zip(self.packed),
        }
    }
}

/// Emplaces each pair in sequence order. Repeated keys panic like `emplace`.
impl<V, K: SparseKey> Extend<(K, V)> for SparseSet<V, K> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for (key, value) in iter {
            self.emplace(key, value);
        }
    }
}

impl<V, K: SparseKey> FromIterator<(K, V)> for SparseSet<V, K> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<V, K: SparseKey, const N: usize> From<[(K, V); N]> for SparseSet<V, K> {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}
