// Copyright (c) 2026 The sevec contributors
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for sevec.

use thiserror::Error;

/// Error type for `RawVector` and `Vector` operations.
///
/// Every failing operation leaves the vector exactly as it was before the
/// call: length, capacity and the bytes of existing elements are untouched.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum VectorError {
    /// The allocator could not satisfy the request.
    #[error("Out of memory: allocator failed to provide the requested buffer")]
    OutOfMemory,

    /// The requested size or capacity is above the vector's `max_size`.
    #[error("Capacity exceeded: request is above the vector's max_size")]
    CapacityExceeded,

    /// `pop()` on a vector with no elements.
    #[error("Vector is empty")]
    Empty,

    /// Element access with `index >= len`.
    #[error("Index out of range: index {index} but len is {len}")]
    IndexOutOfRange {
        /// The rejected index.
        index: usize,
        /// Length of the vector at the time of the call.
        len: usize,
    },

    /// `capacity * item_size` does not fit in the address space.
    ///
    /// The limit is `isize::MAX` bytes, the largest allocation Rust allows.
    #[error("Capacity overflow: buffer size would exceed isize::MAX bytes")]
    CapacityOverflow,

    /// The pointer given to `index_of()` is not an element of this vector.
    #[error("Pointer is not a member of this vector")]
    NotAMember,

    /// A `RawVector` was created with a zero-sized element layout.
    #[error("Invalid item size: elements must be at least one byte wide")]
    InvalidItemSize,

    /// A byte slice passed to `RawVector::push()` or `RawVector::pop()`
    /// does not match the element width.
    #[error("Item size mismatch: expected {expected} bytes, got {actual}")]
    ItemSizeMismatch {
        /// Element width of the vector.
        expected: usize,
        /// Length of the slice that was passed in.
        actual: usize,
    },
}
