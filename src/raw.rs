use core::alloc::Layout;
use core::marker::PhantomData;
use core::mem;
use core::ptr::{self, NonNull};

use alloc::alloc::{alloc, dealloc};

use crate::error::GrowVecError;

/// Owned block of uninitialized memory with a constructed prefix.
///
/// `RawStorage` is allocation and teardown only: it reserves room for `cap`
/// elements, remembers how many slots at the front hold live values, and on
/// drop destroys exactly those values before releasing the block. It has no
/// notion of growth; `GrowVec` replaces a storage wholesale when it needs a
/// bigger one.
///
/// Invariant: slots `[0, len)` are initialized, slots `[len, cap)` are
/// uninitialized memory that must never be read, cloned, or dropped.
///
/// Zero-sized element types never allocate; their capacity is reported as
/// `usize::MAX` and the pointer stays dangling.
#[derive(Debug)]
pub(crate) struct RawStorage<T> {
    ptr: NonNull<T>,
    cap: usize,
    len: usize,
    _marker: PhantomData<T>,
}

// The block is exclusively owned, so the storage is as thread-safe as `T`.
// SAFETY: no aliasing of the allocation exists outside this value.
unsafe impl<T: Send> Send for RawStorage<T> {}
// SAFETY: shared access only hands out `&T`.
unsafe impl<T: Sync> Sync for RawStorage<T> {}

impl<T> RawStorage<T> {
    /// Empty storage: zero capacity, no heap call.
    pub(crate) const fn new() -> Self {
        Self {
            ptr: NonNull::dangling(),
            cap: 0,
            len: 0,
            _marker: PhantomData,
        }
    }

    /// Reserves room for `cap` elements, all slots uninitialized.
    ///
    /// A capacity of zero (or a zero-sized `T`) performs no heap call.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::CapacityOverflow` if `cap` elements of `T`
    /// cannot be described by a memory layout, and `GrowVecError::OutOfMemory`
    /// if the global allocator returns null. Nothing is left allocated on
    /// either failure.
    pub(crate) fn allocate(cap: usize) -> Result<Self, GrowVecError> {
        if cap == 0 || mem::size_of::<T>() == 0 {
            return Ok(Self::new());
        }

        let layout = Layout::array::<T>(cap)
            .map_err(|_| GrowVecError::CapacityOverflow { elements: cap })?;

        // SAFETY: `cap > 0` and `T` is not zero-sized, so the layout has
        // non-zero size.
        let raw = unsafe { alloc(layout) };
        let Some(ptr) = NonNull::new(raw.cast::<T>()) else {
            return Err(GrowVecError::OutOfMemory {
                bytes: layout.size(),
            });
        };

        Ok(Self {
            ptr,
            cap,
            len: 0,
            _marker: PhantomData,
        })
    }

    /// Start of the block. Dangling (but well-aligned) when nothing is
    /// allocated.
    pub(crate) fn as_ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Number of constructed elements at the front of the block.
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Total slots. `usize::MAX` for zero-sized element types.
    pub(crate) fn capacity(&self) -> usize {
        if mem::size_of::<T>() == 0 {
            usize::MAX
        } else {
            self.cap
        }
    }

    /// Declares the first `len` slots constructed.
    ///
    /// # Safety
    ///
    /// The caller must ensure slots `[0, len)` hold initialized values and
    /// that any element no longer counted has been read out or dropped.
    pub(crate) unsafe fn set_len(&mut self, len: usize) {
        debug_assert!(len <= self.capacity());
        self.len = len;
    }

    /// Transfers the block out, leaving this storage empty and reusable.
    pub(crate) fn take(&mut self) -> Self {
        mem::replace(self, Self::new())
    }
}

impl<T> Drop for RawStorage<T> {
    fn drop(&mut self) {
        // SAFETY: the invariant guarantees `[0, len)` is initialized. A
        // panicking element drop leaks the remainder but cannot double-drop.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.ptr.as_ptr(), self.len));
        }

        if self.cap != 0 && mem::size_of::<T>() != 0 {
            // The layout was validated when the block was allocated.
            if let Ok(layout) = Layout::array::<T>(self.cap) {
                // SAFETY: the block came from `alloc` with this exact layout.
                unsafe { dealloc(self.ptr.as_ptr().cast(), layout) };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_storage_has_no_allocation() {
        let storage: RawStorage<u64> = RawStorage::new();
        assert_eq!(storage.len(), 0);
        assert_eq!(storage.capacity(), 0);
    }

    #[test]
    fn test_zero_capacity_allocate_is_empty() {
        let storage: RawStorage<u64> = RawStorage::allocate(0).unwrap();
        assert_eq!(storage.capacity(), 0);
    }

    #[test]
    fn test_allocate_reports_requested_capacity() {
        let storage: RawStorage<u64> = RawStorage::allocate(12).unwrap();
        assert_eq!(storage.capacity(), 12);
        assert_eq!(storage.len(), 0);
    }

    #[test]
    fn test_zst_storage_never_allocates() {
        let storage: RawStorage<()> = RawStorage::allocate(1024).unwrap();
        assert_eq!(storage.capacity(), usize::MAX);
    }

    #[test]
    fn test_capacity_overflow_is_reported() {
        let result: Result<RawStorage<u64>, _> = RawStorage::allocate(usize::MAX / 2);
        assert_eq!(
            result.unwrap_err(),
            GrowVecError::CapacityOverflow {
                elements: usize::MAX / 2
            }
        );
    }

    #[test]
    fn test_take_resets_source() {
        let mut storage: RawStorage<u64> = RawStorage::allocate(8).unwrap();
        let taken = storage.take();
        assert_eq!(taken.capacity(), 8);
        assert_eq!(storage.capacity(), 0);
        assert_eq!(storage.len(), 0);
    }
}
