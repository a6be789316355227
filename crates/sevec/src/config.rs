// Copyright (c) 2026 The sevec contributors
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Construction parameters shared by `RawVector` and `Vector`.

/// Growth factor used when none, or an invalid one, is supplied.
pub const DEFAULT_GROWTH_RATE: f32 = 1.6;

/// Creation-time configuration of a vector.
///
/// All three values are fixed once the vector exists.
///
/// # Example
///
/// ```rust
/// use sevec::{Vector, VectorConfig, VectorError};
///
/// fn example() -> Result<(), VectorError> {
///     let config = VectorConfig::default()
///         .with_initial_capacity(8)
///         .with_max_size(64)
///         .with_growth_rate(2.0);
///
///     let vec = Vector::<u32>::create(config)?;
///     assert_eq!(vec.capacity(), 8);
///     assert_eq!(vec.max_size(), 64);
///     Ok(())
/// }
/// # example().unwrap();
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VectorConfig {
    /// Number of slots allocated up front. May be `0`.
    pub initial_capacity: usize,
    /// Upper bound on the number of elements. `0` means unbounded.
    pub max_size: usize,
    /// Multiplicative growth factor. Values below `1.0`, infinity and NaN
    /// fall back to [`DEFAULT_GROWTH_RATE`].
    pub growth_rate: f32,
}

impl Default for VectorConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 0,
            max_size: 0,
            growth_rate: DEFAULT_GROWTH_RATE,
        }
    }
}

impl VectorConfig {
    /// Sets the number of slots allocated on creation.
    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    /// Sets the maximum number of elements (`0` = unbounded).
    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }

    /// Sets the growth factor.
    pub fn with_growth_rate(mut self, growth_rate: f32) -> Self {
        self.growth_rate = growth_rate;
        self
    }

    /// Returns `max_size` with the unbounded sentinel resolved to `usize::MAX`.
    pub fn effective_max_size(&self) -> usize {
        if self.max_size == 0 {
            usize::MAX
        } else {
            self.max_size
        }
    }

    /// Returns `growth_rate`, or [`DEFAULT_GROWTH_RATE`] if it is below `1.0`,
    /// infinite or NaN.
    pub fn effective_growth_rate(&self) -> f32 {
        if self.growth_rate.is_finite() && self.growth_rate >= 1.0 {
            self.growth_rate
        } else {
            DEFAULT_GROWTH_RATE
        }
    }
}
