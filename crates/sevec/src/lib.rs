// Copyright (c) 2026 The sevec contributors
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Growable vector over fixed-size elements with a size cap and a
//! configurable growth factor.
//!
//! Two layers share one implementation:
//!
//! - [`RawVector`]: element layout supplied at runtime, raw pointer access.
//!   Owns both the metadata and the buffer as plain fields.
//! - [`Vector<T>`]: the element type is a type parameter, `item_size` is
//!   `size_of::<T>()`, and access goes through references and slices.
//!
//! # Core Guarantees
//!
//! - **Bounded**: `len() <= capacity() <= max_size()` at all times.
//!   `max_size = 0` at creation means unbounded.
//! - **Amortized growth**: when more room is needed the capacity is
//!   multiplied by `growth_rate` (default `1.6`), with a `+1` step so growth
//!   always makes progress.
//! - **All-or-nothing**: a failing `resize`, `reserve`, `shrink` or `push`
//!   leaves length, capacity and existing element bytes untouched.
//! - **Single owner**: `destroy()` consumes the handle; any reference or
//!   pointer into the buffer is invalidated by reallocation.
//!
//! # Example: Basic Usage
//!
//! ```rust
//! use sevec::{Vector, VectorConfig, VectorError};
//!
//! fn example() -> Result<(), VectorError> {
//!     let mut vec = Vector::<u32>::create(VectorConfig::default())?;
//!
//!     for i in 0..1000 {
//!         vec.push(i)?;
//!     }
//!
//!     assert_eq!(vec.len(), 1000);
//!     assert_eq!(*vec.get(999)?, 999);
//!     assert_eq!(vec.pop()?, 999);
//!     assert_eq!(vec.len(), 999);
//!
//!     vec.destroy();
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! # Example: Size Cap
//!
//! ```rust
//! use sevec::{Vector, VectorConfig, VectorError};
//!
//! fn example() -> Result<(), VectorError> {
//!     let mut vec = Vector::<u8>::create(VectorConfig::default().with_max_size(5))?;
//!
//!     vec.resize(5, 0)?;
//!     assert_eq!(vec.resize(6, 0), Err(VectorError::CapacityExceeded));
//!     assert_eq!(vec.len(), 5);
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! # Features
//!
//! - `tracing`: emits `tracing` events on every reallocation and on
//!   rejected requests.
//! - `test-utils`: exposes [`VectorBehaviour`] to inject allocator failures.

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

extern crate alloc;

#[macro_use]
mod trace;

mod config;
mod error;
mod growth;
mod raw;
mod vector;

#[cfg(test)]
mod tests;

pub use config::{DEFAULT_GROWTH_RATE, VectorConfig};
pub use error::VectorError;
pub use growth::grow_capacity;
pub use raw::{RawVector, VectorHeader};
pub use vector::Vector;

#[cfg(any(test, feature = "test-utils"))]
pub use raw::VectorBehaviour;
