// Copyright (c) 2026 The sevec contributors
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use alloc::alloc::{alloc, dealloc, realloc};
use core::alloc::Layout;
use core::mem::MaybeUninit;
use core::ptr::{self, NonNull};

use crate::config::VectorConfig;
use crate::error::VectorError;
use crate::growth::{grow_capacity, max_elements};

/// Test behaviour for injecting allocator failures in `RawVector` operations.
///
/// This is only available with the `test-utils` feature and allows users
/// to exercise `OutOfMemory` paths without exhausting real memory.
///
/// The behaviour is sticky - once set, it remains active until changed.
///
/// # Example
///
/// ```rust
/// // test-utils feature required in dev-dependencies
/// use sevec::{Vector, VectorBehaviour, VectorError};
///
/// fn example() -> Result<(), VectorError> {
///     let mut vec = Vector::<u8>::new();
///     vec.push(1)?;
///
///     // Inject failure
///     vec.change_behaviour(VectorBehaviour::FailAtAlloc);
///     assert_eq!(vec.reserve(64), Err(VectorError::OutOfMemory));
///     assert_eq!(vec.as_slice(), &[1]);
///
///     // Reset to normal behaviour
///     vec.change_behaviour(VectorBehaviour::None);
///     vec.reserve(64)?;
///     Ok(())
/// }
/// # example().unwrap();
/// ```
#[cfg(any(test, feature = "test-utils"))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VectorBehaviour {
    /// Normal behaviour - no injected failures.
    #[default]
    None,
    /// Every call that would reach the allocator fails with `OutOfMemory`.
    FailAtAlloc,
}

/// Snapshot of a vector's metadata.
///
/// Returned by value; it does not track later changes to the vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VectorHeader {
    /// Number of logically present elements.
    pub size: usize,
    /// Number of slots backed by the current allocation.
    pub capacity: usize,
    /// Upper bound on `size` (`usize::MAX` when unbounded).
    pub max_size: usize,
    /// Byte width of one element, padding included.
    pub item_size: usize,
    /// Multiplicative growth factor, always `>= 1.0`.
    pub growth_rate: f32,
}

/// Growable vector of untyped, fixed-size elements.
///
/// The element layout is supplied at runtime. Element `i` lives at byte
/// offset `i * item_size` of a single contiguous allocation of exactly
/// `capacity * item_size` bytes. With `capacity == 0` nothing is allocated.
///
/// Slots created by [`resize()`](Self::resize) or by `push(None)` are
/// not initialized. Access is through raw pointers so that reading them
/// stays the caller's responsibility.
///
/// Any operation that may reallocate can move the buffer; pointers
/// obtained earlier must not be used afterwards.
///
/// # Example
///
/// ```rust
/// use sevec::{RawVector, VectorConfig, VectorError};
///
/// fn example() -> Result<(), VectorError> {
///     let mut vec = RawVector::with_item_size(4, VectorConfig::default())?;
///     vec.push(Some(&7u32.to_ne_bytes()))?;
///
///     let ptr = vec.get(0)?;
///     let mut bytes = [0u8; 4];
///     unsafe { core::ptr::copy_nonoverlapping(ptr.as_ptr(), bytes.as_mut_ptr(), 4) };
///     assert_eq!(u32::from_ne_bytes(bytes), 7);
///     Ok(())
/// }
/// # example().unwrap();
/// ```
pub struct RawVector {
    ptr: NonNull<u8>,
    header: VectorHeader,
    item: Layout,
    #[cfg(any(test, feature = "test-utils"))]
    behaviour: VectorBehaviour,
}

// Safety: RawVector owns its buffer and hands out no shared mutable state.
unsafe impl Send for RawVector {}
unsafe impl Sync for RawVector {}

impl core::fmt::Debug for RawVector {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RawVector")
            .field("len", &self.header.size)
            .field("capacity", &self.header.capacity)
            .field("max_size", &self.header.max_size)
            .field("item_size", &self.header.item_size)
            .field("growth_rate", &self.header.growth_rate)
            .finish_non_exhaustive()
    }
}

#[inline]
fn dangling(align: usize) -> NonNull<u8> {
    NonNull::new(ptr::without_provenance_mut(align)).unwrap_or(NonNull::dangling())
}

impl RawVector {
    /// Builds a vector with no allocation. `item` must be non-zero-sized.
    pub(crate) fn unallocated(item: Layout, max_size: usize, growth_rate: f32) -> Self {
        debug_assert!(item.size() > 0);

        let item = item.pad_to_align();

        Self {
            ptr: dangling(item.align()),
            header: VectorHeader {
                size: 0,
                capacity: 0,
                max_size,
                item_size: item.size(),
                growth_rate,
            },
            item,
            #[cfg(any(test, feature = "test-utils"))]
            behaviour: VectorBehaviour::default(),
        }
    }

    /// Creates a vector whose elements have the given layout.
    ///
    /// The element width is `item.pad_to_align().size()`, so consecutive
    /// elements stay aligned.
    ///
    /// # Errors
    ///
    /// - [`VectorError::InvalidItemSize`] if `item.size() == 0`.
    /// - [`VectorError::CapacityExceeded`] if `initial_capacity > max_size`.
    /// - [`VectorError::CapacityOverflow`] if the initial buffer would be larger
    ///   than `isize::MAX` bytes.
    /// - [`VectorError::OutOfMemory`] if the allocation fails.
    pub fn create(item: Layout, config: VectorConfig) -> Result<Self, VectorError> {
        if item.size() == 0 {
            return Err(VectorError::InvalidItemSize);
        }

        let mut vector = Self::unallocated(
            item,
            config.effective_max_size(),
            config.effective_growth_rate(),
        );
        vector.set_capacity(config.initial_capacity)?;

        Ok(vector)
    }

    /// Creates a vector of byte-aligned elements `item_size` bytes wide.
    ///
    /// # Errors
    ///
    /// Same as [`create()`](Self::create).
    pub fn with_item_size(item_size: usize, config: VectorConfig) -> Result<Self, VectorError> {
        let item =
            Layout::from_size_align(item_size, 1).map_err(|_| VectorError::CapacityOverflow)?;

        Self::create(item, config)
    }

    /// Releases the buffer and consumes the handle.
    ///
    /// Dropping the vector has the same effect; this method only makes the
    /// end of its life explicit. The handle cannot be used afterwards:
    ///
    /// ```rust,compile_fail
    /// use sevec::{RawVector, VectorConfig};
    ///
    /// let vec = RawVector::with_item_size(4, VectorConfig::default()).unwrap();
    /// vec.destroy();
    /// let _ = vec.len();
    /// ```
    pub fn destroy(self) {
        drop(self);
    }

    /// Injects failures into subsequent allocator calls.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn change_behaviour(&mut self, behaviour: VectorBehaviour) {
        self.behaviour = behaviour;
    }

    /// Returns the number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.header.size
    }

    /// Returns `true` if the vector holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.header.size == 0
    }

    /// Returns the number of allocated slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.header.capacity
    }

    /// Returns the maximum number of elements, `usize::MAX` when unbounded.
    #[inline]
    pub fn max_size(&self) -> usize {
        self.header.max_size
    }

    /// Returns `true` if the vector was created with a finite `max_size`.
    #[inline]
    pub fn is_bounded(&self) -> bool {
        self.header.max_size != usize::MAX
    }

    /// Returns the byte width of one element.
    #[inline]
    pub fn item_size(&self) -> usize {
        self.header.item_size
    }

    /// Returns the (padded) layout of one element.
    #[inline]
    pub fn item_layout(&self) -> Layout {
        self.item
    }

    /// Returns the growth factor.
    #[inline]
    pub fn growth_rate(&self) -> f32 {
        self.header.growth_rate
    }

    /// Returns a copy of the vector's metadata.
    #[inline]
    pub fn header(&self) -> VectorHeader {
        self.header
    }

    /// Returns a pointer to the start of the buffer.
    ///
    /// Dangling (but aligned and non-null) when `capacity == 0`.
    #[inline]
    pub fn as_ptr(&self) -> *const u8 {
        self.ptr.as_ptr()
    }

    /// Returns a mutable pointer to the start of the buffer.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut u8 {
        self.ptr.as_ptr()
    }

    /// Sets the number of elements to `new_size`.
    ///
    /// Grows the capacity first if needed. New slots are left
    /// uninitialized; shrinking only changes the length.
    ///
    /// # Errors
    ///
    /// - [`VectorError::CapacityExceeded`] if `new_size > max_size`.
    /// - [`VectorError::CapacityOverflow`] if the buffer would exceed `isize::MAX` bytes.
    /// - [`VectorError::OutOfMemory`] if reallocation fails.
    ///
    /// On error the vector is unchanged.
    pub fn resize(&mut self, new_size: usize) -> Result<(), VectorError> {
        self.ensure_capacity(new_size)?;
        self.header.size = new_size;

        Ok(())
    }

    /// Like [`resize()`](Self::resize), but zero-fills the slots it adds.
    ///
    /// # Errors
    ///
    /// Same as [`resize()`](Self::resize).
    pub fn resize_zeroed(&mut self, new_size: usize) -> Result<(), VectorError> {
        let old_size = self.header.size;
        self.resize(new_size)?;

        if new_size > old_size {
            let stride = self.header.item_size;

            unsafe {
                // SAFETY (PRECONDITIONS ARE MET): slots old_size..new_size are within capacity after resize()
                ptr::write_bytes(
                    self.ptr.as_ptr().add(old_size * stride),
                    0,
                    (new_size - old_size) * stride,
                );
            }
        }

        Ok(())
    }

    /// Grows the buffer to exactly `new_capacity` slots.
    ///
    /// Does nothing if `new_capacity <= capacity`. Existing elements keep
    /// their bytes.
    ///
    /// # Errors
    ///
    /// - [`VectorError::CapacityExceeded`] if `new_capacity > max_size`.
    /// - [`VectorError::CapacityOverflow`] if the buffer would exceed `isize::MAX` bytes.
    /// - [`VectorError::OutOfMemory`] if reallocation fails.
    ///
    /// On error the vector is unchanged.
    pub fn reserve(&mut self, new_capacity: usize) -> Result<(), VectorError> {
        if new_capacity <= self.header.capacity {
            return Ok(());
        }

        self.set_capacity(new_capacity)
    }

    /// Shrinks the buffer to exactly `new_capacity` slots.
    ///
    /// Does nothing if `new_capacity >= capacity`. If `new_capacity < len`,
    /// the elements past `new_capacity` are discarded.
    ///
    /// # Errors
    ///
    /// [`VectorError::OutOfMemory`] if reallocation fails; the vector is
    /// then unchanged.
    pub fn shrink(&mut self, new_capacity: usize) -> Result<(), VectorError> {
        if new_capacity >= self.header.capacity {
            return Ok(());
        }

        self.set_capacity(new_capacity)
    }

    /// Shrinks the capacity down to the current length.
    ///
    /// # Errors
    ///
    /// Same as [`shrink()`](Self::shrink).
    pub fn shrink_to_fit(&mut self) -> Result<(), VectorError> {
        self.shrink(self.header.size)
    }

    /// Sets the length to zero. The capacity is kept.
    pub fn clear(&mut self) {
        self.header.size = 0;
    }

    /// Returns a pointer to element `index`.
    ///
    /// The pointer is valid until the next call that may reallocate.
    ///
    /// # Errors
    ///
    /// [`VectorError::IndexOutOfRange`] if `index >= len`.
    pub fn get(&self, index: usize) -> Result<NonNull<u8>, VectorError> {
        if index >= self.header.size {
            return Err(VectorError::IndexOutOfRange {
                index,
                len: self.header.size,
            });
        }

        // SAFETY (PRECONDITIONS ARE MET): index < size <= capacity, offset stays inside the allocation
        Ok(unsafe { self.ptr.add(index * self.header.item_size) })
    }

    /// Appends one element and returns a pointer to it.
    ///
    /// With `Some(bytes)` the bytes are copied into the new slot; with
    /// `None` the slot is left uninitialized.
    ///
    /// # Errors
    ///
    /// - [`VectorError::ItemSizeMismatch`] if `bytes.len() != item_size`.
    /// - Any error of [`resize()`](Self::resize).
    ///
    /// On error the vector is unchanged.
    pub fn push(&mut self, element: Option<&[u8]>) -> Result<NonNull<u8>, VectorError> {
        let stride = self.header.item_size;

        if let Some(bytes) = element {
            self.check_item_len(bytes.len())?;
        }

        let index = self.header.size;
        let new_size = index.checked_add(1).ok_or(VectorError::CapacityOverflow)?;
        self.resize(new_size)?;

        // SAFETY (PRECONDITIONS ARE MET): index < size after resize(), slot is inside the allocation
        let slot = unsafe { self.ptr.add(index * stride) };

        if let Some(bytes) = element {
            unsafe {
                // SAFETY (PRECONDITIONS ARE MET): bytes.len() == stride, slot has stride writable bytes
                // and cannot overlap a borrowed slice since self is borrowed mutably
                ptr::copy_nonoverlapping(bytes.as_ptr(), slot.as_ptr(), stride);
            }
        }

        Ok(slot)
    }

    /// Removes the last element, copying its bytes into `out` first.
    ///
    /// # Errors
    ///
    /// - [`VectorError::Empty`] if the vector has no elements.
    /// - [`VectorError::ItemSizeMismatch`] if `out.len() != item_size`.
    pub fn pop(&mut self, out: Option<&mut [MaybeUninit<u8>]>) -> Result<(), VectorError> {
        let last = self
            .header
            .size
            .checked_sub(1)
            .ok_or(VectorError::Empty)?;

        if let Some(out) = out {
            self.check_item_len(out.len())?;

            let stride = self.header.item_size;

            unsafe {
                // SAFETY (PRECONDITIONS ARE MET): last < size, out.len() == stride
                ptr::copy_nonoverlapping(
                    self.ptr.as_ptr().add(last * stride),
                    out.as_mut_ptr().cast::<u8>(),
                    stride,
                );
            }
        }

        self.header.size = last;

        Ok(())
    }

    /// Returns the index of the element `ptr` points to.
    ///
    /// # Errors
    ///
    /// [`VectorError::NotAMember`] if `ptr` is outside the live elements or
    /// does not point at the start of an element.
    pub fn index_of(&self, ptr: *const u8) -> Result<usize, VectorError> {
        let stride = self.header.item_size;
        let offset = ptr
            .addr()
            .checked_sub(self.ptr.as_ptr().addr())
            .ok_or(VectorError::NotAMember)?;

        if offset >= self.header.size * stride || offset % stride != 0 {
            return Err(VectorError::NotAMember);
        }

        Ok(offset / stride)
    }

    fn check_item_len(&self, actual: usize) -> Result<(), VectorError> {
        if actual != self.header.item_size {
            return Err(VectorError::ItemSizeMismatch {
                expected: self.header.item_size,
                actual,
            });
        }

        Ok(())
    }

    /// Makes room for at least `required` elements using the growth factor.
    fn ensure_capacity(&mut self, required: usize) -> Result<(), VectorError> {
        if required > self.header.max_size {
            debug_event!(
                required,
                max_size = self.header.max_size,
                "rejected: above max_size"
            );
            return Err(VectorError::CapacityExceeded);
        }

        if required <= self.header.capacity {
            return Ok(());
        }

        let ceiling = self
            .header
            .max_size
            .min(max_elements(self.header.item_size));

        if required > ceiling {
            debug_event!(required, ceiling, "rejected: above addressable capacity");
            return Err(VectorError::CapacityOverflow);
        }

        let new_capacity = grow_capacity(
            self.header.capacity,
            required,
            self.header.growth_rate,
            ceiling,
        );

        match self.reserve(new_capacity) {
            // Grown capacity out of reach, fall back to the exact request.
            Err(VectorError::OutOfMemory) if new_capacity > required => {
                debug_event!(
                    new_capacity,
                    required,
                    "grown capacity not allocatable, retrying exact size"
                );
                self.reserve(required)
            }
            result => result,
        }
    }

    fn buffer_layout(&self, capacity: usize) -> Result<Layout, VectorError> {
        let layout = self
            .header
            .item_size
            .checked_mul(capacity)
            .and_then(|bytes| Layout::from_size_align(bytes, self.item.align()).ok());

        layout.ok_or_else(|| {
            debug_event!(
                capacity,
                item_size = self.header.item_size,
                "rejected: buffer size above isize::MAX"
            );
            VectorError::CapacityOverflow
        })
    }

    /// Moves the buffer to exactly `new_capacity` slots.
    ///
    /// All checks happen before the allocator is called, and the allocator
    /// leaves the old block intact on failure, so an error never mutates
    /// `self`.
    fn set_capacity(&mut self, new_capacity: usize) -> Result<(), VectorError> {
        let old_capacity = self.header.capacity;

        if new_capacity == old_capacity {
            return Ok(());
        }

        if new_capacity > self.header.max_size {
            debug_event!(
                new_capacity,
                max_size = self.header.max_size,
                "rejected: capacity above max_size"
            );
            return Err(VectorError::CapacityExceeded);
        }

        let old_layout = self.buffer_layout(old_capacity)?;
        let new_layout = self.buffer_layout(new_capacity)?;

        #[cfg(any(test, feature = "test-utils"))]
        if matches!(self.behaviour, VectorBehaviour::FailAtAlloc) {
            debug_event!(old_capacity, new_capacity, "injected allocator failure");
            return Err(VectorError::OutOfMemory);
        }

        let new_ptr = if new_capacity == 0 {
            unsafe {
                // SAFETY (PRECONDITIONS ARE MET): old_capacity > 0, ptr was allocated with old_layout
                dealloc(self.ptr.as_ptr(), old_layout);
            }
            Some(dangling(self.item.align()))
        } else if old_capacity == 0 {
            // SAFETY (PRECONDITIONS ARE MET): new_layout has non-zero size (item_size > 0, new_capacity > 0)
            NonNull::new(unsafe { alloc(new_layout) })
        } else {
            // SAFETY (PRECONDITIONS ARE MET): ptr was allocated with old_layout, new size is non-zero
            // and was validated by buffer_layout()
            NonNull::new(unsafe { realloc(self.ptr.as_ptr(), old_layout, new_layout.size()) })
        };

        let Some(new_ptr) = new_ptr else {
            debug_event!(
                old_capacity,
                new_capacity,
                bytes = new_layout.size(),
                "allocator returned null"
            );
            return Err(VectorError::OutOfMemory);
        };

        trace_event!(
            old_capacity,
            new_capacity,
            item_size = self.header.item_size,
            "buffer reallocated"
        );

        self.ptr = new_ptr;
        self.header.capacity = new_capacity;

        if self.header.size > new_capacity {
            self.header.size = new_capacity;
        }

        Ok(())
    }
}

impl Drop for RawVector {
    fn drop(&mut self) {
        if self.header.capacity == 0 {
            return;
        }

        if let Ok(layout) = self.buffer_layout(self.header.capacity) {
            unsafe {
                // SAFETY (PRECONDITIONS ARE MET): capacity > 0, ptr was allocated with this layout
                dealloc(self.ptr.as_ptr(), layout);
            }
        }
    }
}
