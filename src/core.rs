use core::borrow::{Borrow, BorrowMut};
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::ops::{Deref, DerefMut, Index, IndexMut};
use core::ptr;
use core::slice::{self, SliceIndex};

use crate::error::GrowVecError;
use crate::iter::IntoIter;
use crate::raw::RawStorage;

/// A growable array over an owned raw buffer, with fallible allocation.
///
/// Elements at indices `[0, len)` are live and in insertion order; the
/// remaining capacity is uninitialized memory that the public surface never
/// exposes. Every operation that may allocate returns a `Result` instead of
/// aborting, and leaves the vector untouched on failure.
///
/// Any operation that changes capacity replaces the backing block, so raw
/// pointers obtained from [`as_ptr`](Self::as_ptr) are invalidated by it;
/// safe references are protected by the borrow checker as usual.
pub struct GrowVec<T> {
    pub(crate) buf: RawStorage<T>,
}

impl<T> GrowVec<T> {
    /// Creates an empty vector. Does not allocate.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buf: RawStorage::new(),
        }
    }

    /// Creates an empty vector with room for `cap` elements.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::CapacityOverflow` or `GrowVecError::OutOfMemory`
    /// if the allocation cannot be made.
    pub fn with_capacity(cap: usize) -> Result<Self, GrowVecError> {
        Ok(Self {
            buf: RawStorage::allocate(cap)?,
        })
    }

    /// Creates a vector of `count` default values, allocated exactly.
    ///
    /// If a `Default::default()` call panics midway, the elements already
    /// constructed are dropped during unwinding.
    ///
    /// # Errors
    ///
    /// Returns an allocation error; nothing is constructed in that case.
    pub fn with_len(count: usize) -> Result<Self, GrowVecError>
    where
        T: Default,
    {
        let mut vec = Self::with_capacity(count)?;
        for _ in 0..count {
            // SAFETY: capacity is at least `count`, so a free slot exists.
            unsafe { vec.push_unchecked(T::default()) };
        }
        Ok(vec)
    }

    /// Creates a vector of `count` clones of `value`, allocated exactly.
    ///
    /// The last slot takes `value` itself, saving one clone. The rollback
    /// discipline of [`with_len`](Self::with_len) applies.
    ///
    /// # Errors
    ///
    /// Returns an allocation error; nothing is constructed in that case.
    pub fn from_elem(value: T, count: usize) -> Result<Self, GrowVecError>
    where
        T: Clone,
    {
        let mut vec = Self::with_capacity(count)?;
        if count > 0 {
            for _ in 0..count - 1 {
                // SAFETY: capacity is at least `count`.
                unsafe { vec.push_unchecked(value.clone()) };
            }
            // SAFETY: one reserved slot remains.
            unsafe { vec.push_unchecked(value) };
        }
        Ok(vec)
    }

    /// Creates a vector by draining an iterator.
    ///
    /// The lower size hint is used to pre-reserve; unsized single-pass
    /// iterators work at the cost of reallocation along the way.
    ///
    /// # Errors
    ///
    /// Returns the first allocation error; elements produced so far are
    /// dropped with the partial vector.
    pub fn try_from_iter<I>(iter: I) -> Result<Self, GrowVecError>
    where
        I: IntoIterator<Item = T>,
    {
        let mut vec = Self::new();
        vec.try_extend(iter)?;
        Ok(vec)
    }

    /// Creates a vector by cloning a slice, allocated exactly.
    ///
    /// # Errors
    ///
    /// Returns an allocation error; nothing is constructed in that case.
    pub fn try_from_slice(values: &[T]) -> Result<Self, GrowVecError>
    where
        T: Clone,
    {
        let mut vec = Self::with_capacity(values.len())?;
        for value in values {
            // SAFETY: capacity covers the whole slice.
            unsafe { vec.push_unchecked(value.clone()) };
        }
        Ok(vec)
    }

    /// Deep copy: a new vector with its own allocation, sized to `len()`.
    ///
    /// Copying is fallible like every other allocating operation here, which
    /// is why the crate does not implement `Clone`.
    ///
    /// # Errors
    ///
    /// Returns an allocation error; `self` is never affected.
    pub fn try_clone(&self) -> Result<Self, GrowVecError>
    where
        T: Clone,
    {
        Self::try_from_slice(self)
    }

    /// Moves the contents out, leaving `self` empty with zero capacity.
    #[must_use]
    pub fn take(&mut self) -> Self {
        Self {
            buf: self.buf.take(),
        }
    }

    /// Number of live elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.len() == 0
    }

    /// Total slots before the next reallocation. `usize::MAX` for zero-sized
    /// element types, which never allocate.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Pointer to the start of the live range.
    ///
    /// Dangling (but aligned) while nothing is allocated. Invalidated by any
    /// capacity-changing operation.
    #[must_use]
    pub fn as_ptr(&self) -> *const T {
        self.buf.as_ptr()
    }

    /// Mutable pointer to the start of the live range. Same validity rules
    /// as [`as_ptr`](Self::as_ptr).
    #[must_use]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.buf.as_ptr()
    }

    /// The live elements as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: `[0, len)` is initialized and exclusively owned.
        unsafe { slice::from_raw_parts(self.buf.as_ptr(), self.buf.len()) }
    }

    /// The live elements as a mutable slice.
    #[must_use]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: `[0, len)` is initialized and exclusively owned.
        unsafe { slice::from_raw_parts_mut(self.buf.as_ptr(), self.buf.len()) }
    }

    /// Gets a reference to the element at `index`, or `None` when out of
    /// bounds.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    #[must_use]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.as_mut_slice().get_mut(index)
    }

    /// Unchecked access.
    ///
    /// # Safety
    ///
    /// `index` must be less than `len()`; anything else is undefined
    /// behavior. This is the zero-overhead access path, deliberately without
    /// a runtime check.
    #[must_use]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < self.len());
        // SAFETY: the caller guarantees `index < len`.
        unsafe { &*self.buf.as_ptr().add(index) }
    }

    /// Unchecked mutable access.
    ///
    /// # Safety
    ///
    /// Same contract as [`get_unchecked`](Self::get_unchecked).
    #[must_use]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.len());
        // SAFETY: the caller guarantees `index < len`.
        unsafe { &mut *self.buf.as_ptr().add(index) }
    }

    /// First element, or `None` when empty.
    #[must_use]
    pub fn front(&self) -> Option<&T> {
        self.as_slice().first()
    }

    #[must_use]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().first_mut()
    }

    /// Last element, or `None` when empty.
    #[must_use]
    pub fn back(&self) -> Option<&T> {
        self.as_slice().last()
    }

    #[must_use]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().last_mut()
    }

    /// Ensures capacity for at least `new_cap` elements.
    ///
    /// Unlike `std::vec::Vec::reserve`, `new_cap` is an absolute capacity,
    /// not an additional amount. A request at or below the current capacity
    /// is a no-op. Otherwise a fresh block of exactly `new_cap` slots is
    /// allocated, the live elements are moved across in index order, and the
    /// old block is released. This is the single reallocation point for the
    /// whole crate.
    ///
    /// # Errors
    ///
    /// Returns an allocation error; the vector is unchanged in that case.
    pub fn reserve(&mut self, new_cap: usize) -> Result<(), GrowVecError> {
        if new_cap <= self.capacity() {
            return Ok(());
        }

        let mut new_buf = RawStorage::allocate(new_cap)?;
        let len = self.buf.len();
        // SAFETY: distinct blocks, both sized for at least `len`. Ownership
        // of the elements transfers to `new_buf`; zeroing the old length
        // first means no path can drop them twice.
        unsafe {
            self.buf.set_len(0);
            ptr::copy_nonoverlapping(self.buf.as_ptr(), new_buf.as_ptr(), len);
            new_buf.set_len(len);
        }
        self.buf = new_buf;
        Ok(())
    }

    /// Doubling policy: 1 from empty, twice the capacity otherwise.
    fn next_capacity(&self) -> usize {
        let cap = self.capacity();
        if cap == 0 {
            1
        } else {
            cap * 2
        }
    }

    fn grow_for_push(&mut self) -> Result<(), GrowVecError> {
        if self.buf.len() == self.capacity() {
            self.reserve(self.next_capacity())?;
        }
        Ok(())
    }

    /// Appends without checking capacity.
    ///
    /// # Safety
    ///
    /// A free slot at index `len()` must exist.
    unsafe fn push_unchecked(&mut self, value: T) {
        let len = self.buf.len();
        debug_assert!(len < self.buf.capacity());
        // SAFETY: the caller guarantees the slot exists; it is uninitialized
        // by the length invariant.
        unsafe {
            ptr::write(self.buf.as_ptr().add(len), value);
            self.buf.set_len(len + 1);
        }
    }

    /// Appends an element, growing by the doubling policy when full.
    ///
    /// # Errors
    ///
    /// Returns an allocation error; the vector is unchanged and `value` is
    /// dropped with the error.
    pub fn push(&mut self, value: T) -> Result<(), GrowVecError> {
        self.grow_for_push()?;
        // SAFETY: `grow_for_push` secured a free slot.
        unsafe { self.push_unchecked(value) };
        Ok(())
    }

    /// Appends an element constructed in place by `f`, and returns a
    /// reference to it.
    ///
    /// The closure runs only after capacity is secured, writing straight
    /// into the tail slot; no temporary slot is involved and a panicking
    /// closure leaves the vector unchanged.
    ///
    /// # Errors
    ///
    /// Returns an allocation error; `f` is not called in that case.
    pub fn push_with<F>(&mut self, f: F) -> Result<&mut T, GrowVecError>
    where
        F: FnOnce() -> T,
    {
        self.grow_for_push()?;
        let len = self.buf.len();
        // SAFETY: `grow_for_push` secured a free slot at `len`. The length
        // is bumped only after `f` returns, so a panic constructs nothing.
        unsafe {
            ptr::write(self.buf.as_ptr().add(len), f());
            self.buf.set_len(len + 1);
            Ok(&mut *self.buf.as_ptr().add(len))
        }
    }

    /// Removes and returns the last element, or `None` when empty.
    ///
    /// Never reallocates; capacity is retained.
    pub fn pop(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let len = self.buf.len() - 1;
        // SAFETY: the element at `len` is live; shrinking first means it is
        // no longer reachable through the vector once read out.
        unsafe {
            self.buf.set_len(len);
            Some(ptr::read(self.buf.as_ptr().add(len)))
        }
    }

    /// Inserts `value` before position `index`, shifting the tail one slot
    /// toward the end. `index == len()` appends. Returns a reference to the
    /// inserted element at its new location.
    ///
    /// When the vector is full, the shift happens as part of a single
    /// reallocation: the new block is assembled directly in final order
    /// (head, value, tail) rather than moved twice.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::IndexOutOfBounds` if `index > len()`, or an
    /// allocation error. The vector is unchanged on any failure.
    pub fn insert(&mut self, index: usize, value: T) -> Result<&mut T, GrowVecError> {
        let len = self.buf.len();
        if index > len {
            return Err(GrowVecError::IndexOutOfBounds { index, len });
        }

        if len < self.capacity() {
            // SAFETY: one spare slot exists; the overlapping copy moves
            // `[index, len)` up by one, then the vacated slot is written.
            unsafe {
                let base = self.buf.as_ptr();
                ptr::copy(base.add(index), base.add(index + 1), len - index);
                ptr::write(base.add(index), value);
                self.buf.set_len(len + 1);
                Ok(&mut *base.add(index))
            }
        } else {
            let mut new_buf = RawStorage::allocate(self.next_capacity())?;
            // SAFETY: the new block holds at least `len + 1` slots. Element
            // ownership transfers wholesale; the old length is zeroed before
            // any move so no drop path sees a half-owned element.
            unsafe {
                let src = self.buf.as_ptr();
                let dst = new_buf.as_ptr();
                self.buf.set_len(0);
                ptr::copy_nonoverlapping(src, dst, index);
                ptr::write(dst.add(index), value);
                ptr::copy_nonoverlapping(src.add(index), dst.add(index + 1), len - index);
                new_buf.set_len(len + 1);
            }
            self.buf = new_buf;
            // SAFETY: `index` is within the new length.
            unsafe { Ok(&mut *self.buf.as_ptr().add(index)) }
        }
    }

    /// Inserts an element constructed by `f` before position `index`.
    ///
    /// The construction happens first, then the placement logic of
    /// [`insert`](Self::insert).
    ///
    /// # Errors
    ///
    /// Same as [`insert`](Self::insert).
    pub fn insert_with<F>(&mut self, index: usize, f: F) -> Result<&mut T, GrowVecError>
    where
        F: FnOnce() -> T,
    {
        let len = self.buf.len();
        if index > len {
            return Err(GrowVecError::IndexOutOfBounds { index, len });
        }
        self.insert(index, f())
    }

    /// Removes and returns the element at `index`, shifting the tail one
    /// slot toward the front (order-preserving). `None` when `index` is out
    /// of bounds.
    pub fn remove(&mut self, index: usize) -> Option<T> {
        let len = self.buf.len();
        if index >= len {
            return None;
        }
        // SAFETY: the element at `index` is live; after reading it out the
        // overlapping copy closes the gap and the length drops by one.
        unsafe {
            let base = self.buf.as_ptr();
            let value = ptr::read(base.add(index));
            ptr::copy(base.add(index + 1), base.add(index), len - index - 1);
            self.buf.set_len(len - 1);
            Some(value)
        }
    }

    /// Drops every element past `new_len`. Never reallocates; a `new_len`
    /// at or above the current length is a no-op.
    pub fn truncate(&mut self, new_len: usize) {
        let len = self.buf.len();
        if new_len >= len {
            return;
        }
        // SAFETY: shrinking the length before dropping means a panicking
        // element drop cannot lead to a second drop of the same tail.
        unsafe {
            self.buf.set_len(new_len);
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                self.buf.as_ptr().add(new_len),
                len - new_len,
            ));
        }
    }

    /// Grows with default values or shrinks by dropping, until `len()` is
    /// `new_len`. Resizing to the current length changes nothing, including
    /// capacity and the data pointer.
    ///
    /// # Errors
    ///
    /// Returns an allocation error from the growth path; elements appended
    /// before the failure remain.
    pub fn resize(&mut self, new_len: usize) -> Result<(), GrowVecError>
    where
        T: Default,
    {
        if new_len > self.len() {
            while self.len() < new_len {
                self.push_with(T::default)?;
            }
        } else {
            self.truncate(new_len);
        }
        Ok(())
    }

    /// Drops all elements. Capacity is retained.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Appends every element of an iterator, pre-reserving from the lower
    /// size hint.
    ///
    /// # Errors
    ///
    /// Returns the first allocation error; elements appended before the
    /// failure remain, later ones are dropped with the iterator.
    pub fn try_extend<I>(&mut self, iter: I) -> Result<(), GrowVecError>
    where
        I: IntoIterator<Item = T>,
    {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        if lower > 0 {
            let wanted = self
                .len()
                .checked_add(lower)
                .ok_or(GrowVecError::CapacityOverflow { elements: lower })?;
            self.reserve(wanted)?;
        }
        for value in iter {
            self.push(value)?;
        }
        Ok(())
    }

    /// Iterator over the live range.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Mutable iterator over the live range.
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }
}

impl<T> Default for GrowVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deref for GrowVec<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for GrowVec<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, I: SliceIndex<[T]>> Index<I> for GrowVec<T> {
    type Output = I::Output;

    fn index(&self, index: I) -> &Self::Output {
        Index::index(self.as_slice(), index)
    }
}

impl<T, I: SliceIndex<[T]>> IndexMut<I> for GrowVec<T> {
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        IndexMut::index_mut(self.as_mut_slice(), index)
    }
}

impl<T: fmt::Debug> fmt::Debug for GrowVec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_slice(), f)
    }
}

impl<T: PartialEq> PartialEq for GrowVec<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for GrowVec<T> {}

impl<T: PartialEq> PartialEq<[T]> for GrowVec<T> {
    fn eq(&self, other: &[T]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq, const N: usize> PartialEq<[T; N]> for GrowVec<T> {
    fn eq(&self, other: &[T; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: PartialOrd> PartialOrd for GrowVec<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<T: Ord> Ord for GrowVec<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T: Hash> Hash for GrowVec<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Hash::hash(self.as_slice(), state);
    }
}

impl<T> AsRef<[T]> for GrowVec<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AsMut<[T]> for GrowVec<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> Borrow<[T]> for GrowVec<T> {
    fn borrow(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> BorrowMut<[T]> for GrowVec<T> {
    fn borrow_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, const N: usize> TryFrom<[T; N]> for GrowVec<T> {
    type Error = GrowVecError;

    fn try_from(values: [T; N]) -> Result<Self, GrowVecError> {
        Self::try_from_iter(values)
    }
}

impl<T: Clone> TryFrom<&[T]> for GrowVec<T> {
    type Error = GrowVecError;

    fn try_from(values: &[T]) -> Result<Self, GrowVecError> {
        Self::try_from_slice(values)
    }
}

impl<T> IntoIterator for GrowVec<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter::new(self)
    }
}

impl<'a, T> IntoIterator for &'a GrowVec<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut GrowVec<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
