// Copyright (c) 2026 The sevec contributors
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::alloc::Layout;
use core::marker::PhantomData;
use core::mem::MaybeUninit;
use core::ops::{Deref, DerefMut};
use core::ptr;

use crate::config::{DEFAULT_GROWTH_RATE, VectorConfig};
use crate::error::VectorError;
use crate::raw::{RawVector, VectorHeader};

#[cfg(any(test, feature = "test-utils"))]
use crate::raw::VectorBehaviour;

/// Growable vector of `T` on top of [`RawVector`].
///
/// The element width is `size_of::<T>()`; zero-sized types are rejected at
/// compile time. `T: Copy` because elements are moved around as flat bytes
/// and never dropped.
///
/// Every slot below `len()` is initialized through the safe API, so the
/// vector derefs to `[T]`.
///
/// # Example
///
/// ```rust
/// use sevec::{Vector, VectorConfig, VectorError};
///
/// fn example() -> Result<(), VectorError> {
///     let mut vec = Vector::<i32>::create(VectorConfig::default().with_max_size(3))?;
///
///     vec.push(1)?;
///     vec.push(2)?;
///     vec.push(3)?;
///
///     // max_size reached
///     assert_eq!(vec.push(4), Err(VectorError::CapacityExceeded));
///
///     assert_eq!(vec.pop()?, 3);
///     assert_eq!(vec.as_slice(), &[1, 2]);
///     Ok(())
/// }
/// # example().unwrap();
/// ```
pub struct Vector<T> {
    raw: RawVector,
    _marker: PhantomData<T>,
}

impl<T: Copy> Vector<T> {
    const NOT_ZERO_SIZED: () = assert!(
        size_of::<T>() > 0,
        "Vector<T> does not support zero-sized element types"
    );

    fn from_raw(raw: RawVector) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::NOT_ZERO_SIZED;

        Self {
            raw,
            _marker: PhantomData,
        }
    }

    /// Creates an empty, unbounded vector with the default growth rate.
    ///
    /// Nothing is allocated until the first element is added.
    pub fn new() -> Self {
        Self::from_raw(RawVector::unallocated(
            Layout::new::<T>(),
            usize::MAX,
            DEFAULT_GROWTH_RATE,
        ))
    }

    /// Creates an empty, unbounded vector with room for `capacity` elements.
    ///
    /// # Errors
    ///
    /// - [`VectorError::CapacityOverflow`] if the buffer would exceed `isize::MAX` bytes.
    /// - [`VectorError::OutOfMemory`] if the allocation fails.
    pub fn with_capacity(capacity: usize) -> Result<Self, VectorError> {
        Self::create(VectorConfig::default().with_initial_capacity(capacity))
    }

    /// Creates a vector from a full configuration.
    ///
    /// # Errors
    ///
    /// - [`VectorError::CapacityExceeded`] if `initial_capacity > max_size`.
    /// - [`VectorError::CapacityOverflow`] if the buffer would exceed `isize::MAX` bytes.
    /// - [`VectorError::OutOfMemory`] if the allocation fails.
    pub fn create(config: VectorConfig) -> Result<Self, VectorError> {
        RawVector::create(Layout::new::<T>(), config).map(Self::from_raw)
    }

    /// Releases the buffer and consumes the handle.
    ///
    /// ```rust,compile_fail
    /// use sevec::Vector;
    ///
    /// let mut vec = Vector::<u32>::new();
    /// vec.destroy();
    /// vec.push(1);
    /// ```
    pub fn destroy(self) {
        self.raw.destroy();
    }

    /// Injects failures into subsequent allocator calls.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn change_behaviour(&mut self, behaviour: VectorBehaviour) {
        self.raw.change_behaviour(behaviour);
    }

    /// Returns the number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the vector holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the number of allocated slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Returns the maximum number of elements, `usize::MAX` when unbounded.
    #[inline]
    pub fn max_size(&self) -> usize {
        self.raw.max_size()
    }

    /// Returns `true` if the vector was created with a finite `max_size`.
    #[inline]
    pub fn is_bounded(&self) -> bool {
        self.raw.is_bounded()
    }

    /// Returns the growth factor.
    #[inline]
    pub fn growth_rate(&self) -> f32 {
        self.raw.growth_rate()
    }

    /// Returns a copy of the vector's metadata.
    #[inline]
    pub fn header(&self) -> VectorHeader {
        self.raw.header()
    }

    /// Returns the underlying untyped vector.
    #[inline]
    pub fn as_raw(&self) -> &RawVector {
        &self.raw
    }

    /// Returns a pointer to the first element.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.raw.as_ptr().cast()
    }

    /// Returns a mutable pointer to the first element.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.raw.as_mut_ptr().cast()
    }

    /// Returns the elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY (PRECONDITIONS ARE MET): ptr is non-null and aligned for T, slots 0..len are initialized
        unsafe { core::slice::from_raw_parts(self.as_ptr(), self.len()) }
    }

    /// Returns the elements as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        let len = self.len();

        // SAFETY (PRECONDITIONS ARE MET): ptr is non-null and aligned for T, slots 0..len are initialized
        unsafe { core::slice::from_raw_parts_mut(self.as_mut_ptr(), len) }
    }

    /// Sets the length to `new_size`, filling new slots with `value`.
    ///
    /// Shrinking only changes the length; the capacity is kept.
    ///
    /// # Errors
    ///
    /// Same as [`RawVector::resize()`]. On error the vector is unchanged.
    pub fn resize(&mut self, new_size: usize, value: T) -> Result<(), VectorError> {
        let old_size = self.len();
        self.raw.resize(new_size)?;

        let base = self.as_mut_ptr();
        for index in old_size..new_size {
            unsafe {
                // SAFETY (PRECONDITIONS ARE MET): index < new_size <= capacity
                base.add(index).write(value);
            }
        }

        Ok(())
    }

    /// Sets the length to `new_size` without initializing new slots.
    ///
    /// # Safety
    ///
    /// Every slot in `old_len..new_size` must be written before it is read,
    /// including through [`as_slice()`](Self::as_slice) or `Deref`.
    ///
    /// # Errors
    ///
    /// Same as [`RawVector::resize()`].
    pub unsafe fn resize_uninit(&mut self, new_size: usize) -> Result<(), VectorError> {
        self.raw.resize(new_size)
    }

    /// Grows the buffer to exactly `new_capacity` slots.
    ///
    /// # Errors
    ///
    /// Same as [`RawVector::reserve()`].
    pub fn reserve(&mut self, new_capacity: usize) -> Result<(), VectorError> {
        self.raw.reserve(new_capacity)
    }

    /// Shrinks the buffer to exactly `new_capacity` slots, truncating if needed.
    ///
    /// # Errors
    ///
    /// Same as [`RawVector::shrink()`].
    pub fn shrink(&mut self, new_capacity: usize) -> Result<(), VectorError> {
        self.raw.shrink(new_capacity)
    }

    /// Shrinks the capacity down to the current length.
    ///
    /// # Errors
    ///
    /// Same as [`RawVector::shrink()`].
    pub fn shrink_to_fit(&mut self) -> Result<(), VectorError> {
        self.raw.shrink_to_fit()
    }

    /// Sets the length to zero. The capacity is kept.
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns a reference to element `index`.
    ///
    /// # Errors
    ///
    /// [`VectorError::IndexOutOfRange`] if `index >= len`.
    pub fn get(&self, index: usize) -> Result<&T, VectorError> {
        let slot = self.raw.get(index)?;

        // SAFETY (PRECONDITIONS ARE MET): index < len, slot is aligned and initialized
        Ok(unsafe { slot.cast::<T>().as_ref() })
    }

    /// Returns a mutable reference to element `index`.
    ///
    /// # Errors
    ///
    /// [`VectorError::IndexOutOfRange`] if `index >= len`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, VectorError> {
        let slot = self.raw.get(index)?;

        // SAFETY (PRECONDITIONS ARE MET): index < len, slot is aligned and initialized,
        // self is borrowed mutably for the lifetime of the reference
        Ok(unsafe { slot.cast::<T>().as_mut() })
    }

    /// Appends `value` and returns a reference to it.
    ///
    /// # Errors
    ///
    /// Same as [`RawVector::resize()`]. On error the vector is unchanged.
    pub fn push(&mut self, value: T) -> Result<&mut T, VectorError> {
        let slot = self.raw.push(None)?.cast::<T>();

        unsafe {
            // SAFETY (PRECONDITIONS ARE MET): slot is the new last element, aligned and writable
            slot.as_ptr().write(value);
            Ok(&mut *slot.as_ptr())
        }
    }

    /// Appends an uninitialized slot and returns it.
    ///
    /// # Safety
    ///
    /// The slot counts as an element immediately. It must be written before
    /// anything reads it.
    ///
    /// # Errors
    ///
    /// Same as [`push()`](Self::push).
    pub unsafe fn push_uninit(&mut self) -> Result<&mut MaybeUninit<T>, VectorError> {
        let slot = self.raw.push(None)?.cast::<MaybeUninit<T>>();

        // SAFETY (PRECONDITIONS ARE MET): MaybeUninit<T> has no validity requirement
        Ok(unsafe { &mut *slot.as_ptr() })
    }

    /// Appends every element of `items`.
    ///
    /// Either all of them are appended or, on error, none.
    ///
    /// # Errors
    ///
    /// - [`VectorError::CapacityOverflow`] if `len + items.len()` overflows.
    /// - Any error of [`RawVector::resize()`].
    pub fn extend_from_slice(&mut self, items: &[T]) -> Result<(), VectorError> {
        let old_size = self.len();
        let new_size = old_size
            .checked_add(items.len())
            .ok_or(VectorError::CapacityOverflow)?;

        self.raw.resize(new_size)?;

        unsafe {
            // SAFETY (PRECONDITIONS ARE MET): new_size <= capacity, items cannot alias self
            // since self is borrowed mutably
            ptr::copy_nonoverlapping(items.as_ptr(), self.as_mut_ptr().add(old_size), items.len());
        }

        Ok(())
    }

    /// Removes the last element and returns it.
    ///
    /// # Errors
    ///
    /// [`VectorError::Empty`] if the vector has no elements.
    pub fn pop(&mut self) -> Result<T, VectorError> {
        let last = self.len().checked_sub(1).ok_or(VectorError::Empty)?;
        let value = *self.get(last)?;

        self.raw.pop(None)?;

        Ok(value)
    }

    /// Removes the last element without reading it.
    ///
    /// # Errors
    ///
    /// [`VectorError::Empty`] if the vector has no elements.
    pub fn discard_last(&mut self) -> Result<(), VectorError> {
        self.raw.pop(None)
    }

    /// Returns the index of `element`, which must be a reference into this vector.
    ///
    /// # Errors
    ///
    /// [`VectorError::NotAMember`] if `element` does not live in this vector.
    ///
    /// # Example
    ///
    /// ```rust
    /// use sevec::{Vector, VectorError};
    ///
    /// fn example() -> Result<(), VectorError> {
    ///     let mut vec = Vector::<u16>::new();
    ///     vec.extend_from_slice(&[10, 20, 30])?;
    ///
    ///     assert_eq!(vec.index_of(&vec[2])?, 2);
    ///     assert_eq!(vec.index_of(&30), Err(VectorError::NotAMember));
    ///     Ok(())
    /// }
    /// # example().unwrap();
    /// ```
    pub fn index_of(&self, element: &T) -> Result<usize, VectorError> {
        self.raw.index_of(ptr::from_ref(element).cast())
    }
}

impl<T: Copy> Default for Vector<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy> Deref for Vector<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T: Copy> DerefMut for Vector<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<T: Copy + PartialEq> PartialEq for Vector<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Copy + Eq> Eq for Vector<T> {}

impl<T: Copy + core::fmt::Debug> core::fmt::Debug for Vector<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Vector")
            .field("data", &self.as_slice())
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .field("max_size", &self.max_size())
            .field("growth_rate", &self.growth_rate())
            .finish()
    }
}
