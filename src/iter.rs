use core::fmt;
use core::iter::FusedIterator;
use core::mem;
use core::ptr::{self, NonNull};
use core::slice;

use crate::core::GrowVec;
use crate::raw::RawStorage;

/// By-value iterator over a `GrowVec`.
///
/// Owns the backing block: consumed elements are moved out one by one,
/// whatever remains unconsumed is dropped with the iterator, and the block
/// itself is released afterwards.
pub struct IntoIter<T> {
    // Keeps the allocation alive; its length stays 0 so only this iterator
    // drops elements.
    _buf: RawStorage<T>,
    start: *const T,
    end: *const T,
}

// SAFETY: same ownership story as the vector itself.
unsafe impl<T: Send> Send for IntoIter<T> {}
// SAFETY: shared access only hands out `&T`.
unsafe impl<T: Sync> Sync for IntoIter<T> {}

impl<T> IntoIter<T> {
    pub(crate) fn new(vec: GrowVec<T>) -> Self {
        let GrowVec { mut buf } = vec;
        let len = buf.len();
        let start = buf.as_ptr().cast_const();
        // Zero-sized elements have no addresses; the cursor distance is
        // carried in the pointer value instead.
        let end = if mem::size_of::<T>() == 0 {
            start.cast::<u8>().wrapping_add(len).cast::<T>()
        } else {
            // SAFETY: `len` elements fit the allocation.
            unsafe { start.add(len) }
        };
        // SAFETY: element ownership moves to the iterator walk; the storage
        // keeps only the block.
        unsafe { buf.set_len(0) };
        Self {
            _buf: buf,
            start,
            end,
        }
    }

    fn remaining(&self) -> usize {
        if mem::size_of::<T>() == 0 {
            (self.end as usize).wrapping_sub(self.start as usize)
        } else {
            // SAFETY: both pointers are within the same allocation.
            unsafe { self.end.offset_from(self.start) as usize }
        }
    }

    /// The unconsumed elements as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: `[start, end)` holds the initialized, unconsumed range.
        unsafe { slice::from_raw_parts(self.start, self.remaining()) }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        if mem::size_of::<T>() == 0 {
            self.start = self.start.cast::<u8>().wrapping_add(1).cast::<T>();
            // SAFETY: reading a zero-sized value from an aligned dangling
            // pointer is sound.
            Some(unsafe { ptr::read(NonNull::<T>::dangling().as_ptr()) })
        } else {
            // SAFETY: `start < end`, so `start` points at a live element
            // that no other path will touch again.
            unsafe {
                let value = ptr::read(self.start);
                self.start = self.start.add(1);
                Some(value)
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        if mem::size_of::<T>() == 0 {
            self.end = self.end.cast::<u8>().wrapping_sub(1).cast::<T>();
            // SAFETY: as in `next`.
            Some(unsafe { ptr::read(NonNull::<T>::dangling().as_ptr()) })
        } else {
            // SAFETY: `start < end`, so the element before `end` is live
            // and unconsumed.
            unsafe {
                self.end = self.end.sub(1);
                Some(ptr::read(self.end))
            }
        }
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        // Unconsumed elements are dropped here; the storage then releases
        // the block with its length still at zero.
        // SAFETY: `[start, end)` is the initialized, unconsumed range.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                self.start.cast_mut(),
                self.remaining(),
            ));
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}
