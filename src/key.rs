// key.rs - Key types usable as sparse indices
use std::fmt::Debug;
use std::hash::Hash;

/// An unsigned integer type usable as a sparse set key.
///
/// The type's maximum value is reserved as the `INVALID` sentinel meaning
/// "absent", so the largest usable key is `INVALID - 1`.
pub trait SparseKey: Copy + Eq + Ord + Hash + Debug + 'static {
    /// Sentinel stored in the sparse array for keys with no mapping.
    const INVALID: Self;

    fn to_index(self) -> usize;

    fn from_index(index: usize) -> Self;

    /// Largest key (and largest sparse index) the type can represent.
    #[inline]
    fn max_sparse_size() -> usize {
        Self::INVALID.to_index() - 1
    }

    #[inline]
    fn is_invalid(self) -> bool {
        self == Self::INVALID
    }
}

macro_rules! impl_sparse_key {
    ($($t:ty),*) => {
        $(
            impl SparseKey for $t {
                const INVALID: Self = <$t>::MAX;

                #[inline(always)]
                fn to_index(self) -> usize {
                    self as usize
                }

                #[inline(always)]
                fn from_index(index: usize) -> Self {
                    debug_assert!(
                        <$t>::try_from(index).is_ok(),
                        "{index} out of range for {}",
                        stringify!($t)
                    );
                    index as Self
                }
            }
        )*
    };
}

impl_sparse_key!(u8, u16, u32, usize);

#[cfg(target_pointer_width = "64")]
impl_sparse_key!(u64);
