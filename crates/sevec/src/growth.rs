// Copyright (c) 2026 The sevec contributors
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Capacity arithmetic.

/// Computes the capacity to reserve so that `required` elements fit.
///
/// Starting from `current`, repeatedly applies
/// `c = max(floor(c * growth_rate), c + 1)` until `c >= required`. The `+ 1`
/// step guarantees progress from `0` and for small `c` with a fractional
/// factor. The result is clamped to `ceiling`.
///
/// Returns `current` unchanged when it already satisfies `required`.
///
/// # Preconditions
///
/// `required <= ceiling`, so the clamp never drops below `required`.
///
/// # Example
///
/// ```rust
/// use sevec::grow_capacity;
///
/// // 0 -> 1 -> 2 -> 3 -> 4 -> 6
/// assert_eq!(grow_capacity(0, 5, 1.6, usize::MAX), 6);
/// // Overshoot is clamped to the ceiling.
/// assert_eq!(grow_capacity(0, 5, 1.6, 5), 5);
/// ```
pub fn grow_capacity(current: usize, required: usize, growth_rate: f32, ceiling: usize) -> usize {
    debug_assert!(required <= ceiling);

    let rate = f64::from(growth_rate);
    let mut capacity = current;

    while capacity < required {
        // Float to int casts saturate, so huge products land on usize::MAX.
        let scaled = (capacity as f64 * rate) as usize;
        let next = if scaled > capacity {
            scaled
        } else {
            linear_run_end(capacity, required, rate)
        };

        if next >= ceiling {
            return ceiling;
        }

        capacity = next;
    }

    capacity
}

/// Takes every consecutive `+ 1` step at once.
///
/// The `+ 1` step wins while `c * (rate - 1) < 1`, that is for every
/// `c < 1 / (rate - 1)`. One slot of margin absorbs float rounding at the
/// boundary. With `rate == 1.0` the run never ends and `required` is
/// reached directly.
fn linear_run_end(capacity: usize, required: usize, rate: f64) -> usize {
    let run_end = ((1.0 / (rate - 1.0)) as usize).saturating_sub(1);

    capacity.saturating_add(1).max(run_end.min(required))
}

/// Largest number of `stride`-byte elements a single allocation may hold.
#[inline]
pub(crate) fn max_elements(stride: usize) -> usize {
    debug_assert!(stride > 0);

    isize::MAX as usize / stride
}
