// Copyright (c) 2026 The sevec contributors
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::grow_capacity;
use crate::growth::max_elements;

#[test]
fn test_grows_from_zero() {
    assert_eq!(grow_capacity(0, 1, 1.6, usize::MAX), 1);
}

#[test]
fn test_plus_one_step_for_small_capacities() {
    // 0 -> 1 -> 2 -> 3 -> 4 -> 6
    assert_eq!(grow_capacity(0, 5, 1.6, usize::MAX), 6);
}

#[test]
fn test_rate_one_grows_linearly() {
    assert_eq!(grow_capacity(0, 5, 1.0, usize::MAX), 5);
    assert_eq!(grow_capacity(3, 4, 1.0, usize::MAX), 4);
}

#[test]
fn test_rate_two_doubles() {
    // 0 -> 1 -> 2 -> 4 -> 8
    assert_eq!(grow_capacity(0, 5, 2.0, usize::MAX), 8);
    assert_eq!(grow_capacity(8, 9, 2.0, usize::MAX), 16);
}

#[test]
fn test_large_step_for_large_capacities() {
    // 100 * 1.6 = 160
    assert_eq!(grow_capacity(100, 101, 1.6, usize::MAX), 160);
}

#[test]
fn test_sufficient_capacity_is_returned_unchanged() {
    assert_eq!(grow_capacity(10, 5, 1.6, usize::MAX), 10);
    assert_eq!(grow_capacity(10, 10, 1.6, usize::MAX), 10);
}

#[test]
fn test_overshoot_is_clamped_to_ceiling() {
    // 4 * 1.6 = 6.4 -> 6, above the ceiling of 5
    assert_eq!(grow_capacity(4, 5, 1.6, 5), 5);
    assert_eq!(grow_capacity(0, 5, 1.6, 5), 5);
}

#[test]
fn test_saturates_instead_of_overflowing() {
    let current = 1usize << (usize::BITS - 2);
    assert_eq!(grow_capacity(current, current + 1, 4.0, usize::MAX), usize::MAX);
}

#[test]
fn test_result_always_covers_required() {
    for rate in [1.0f32, 1.1, 1.5, 1.6, 2.0, 3.7] {
        for current in 0..20 {
            for required in 0..100 {
                let capacity = grow_capacity(current, required, rate, usize::MAX);
                assert!(capacity >= required);
                assert!(capacity >= current);
            }
        }
    }
}

#[test]
fn test_rate_one_reaches_large_request_in_one_step() {
    let required = 1usize << 34;

    assert_eq!(grow_capacity(0, required, 1.0, usize::MAX), required);
    assert_eq!(grow_capacity(7, required, 1.0, usize::MAX), required);
    assert_eq!(grow_capacity(3, 4, 1.0, usize::MAX), 4);
}

#[test]
fn test_matches_step_by_step_growth() {
    fn step_by_step(current: usize, required: usize, rate: f32, ceiling: usize) -> usize {
        let mut capacity = current;
        while capacity < required {
            let scaled = (capacity as f64 * f64::from(rate)) as usize;
            capacity = scaled.max(capacity + 1);
            if capacity >= ceiling {
                return ceiling;
            }
        }
        capacity
    }

    for rate in [1.0f32, 1.001, 1.01, 1.1, 1.6, 2.0] {
        for current in [0, 1, 5, 37, 500] {
            for required in [0, 1, 2, 10, 99, 1000, 2500] {
                for ceiling in [usize::MAX, 3000] {
                    assert_eq!(
                        grow_capacity(current, required, rate, ceiling),
                        step_by_step(current, required, rate, ceiling),
                        "rate={rate} current={current} required={required} ceiling={ceiling}"
                    );
                }
            }
        }
    }
}

// =============================================================================
// max_elements()
// =============================================================================

#[test]
fn test_max_elements() {
    assert_eq!(max_elements(1), isize::MAX as usize);
    assert_eq!(max_elements(8), isize::MAX as usize / 8);
}
