// Copyright (c) 2026 The sevec contributors
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::{DEFAULT_GROWTH_RATE, VectorConfig};

#[test]
fn test_default() {
    let config = VectorConfig::default();

    assert_eq!(config.initial_capacity, 0);
    assert_eq!(config.max_size, 0);
    assert_eq!(config.growth_rate, DEFAULT_GROWTH_RATE);
}

#[test]
fn test_with_setters() {
    let config = VectorConfig::default()
        .with_initial_capacity(4)
        .with_max_size(16)
        .with_growth_rate(3.0);

    assert_eq!(config.initial_capacity, 4);
    assert_eq!(config.max_size, 16);
    assert_eq!(config.growth_rate, 3.0);
}

// =============================================================================
// effective_max_size()
// =============================================================================

#[test]
fn test_zero_max_size_means_unbounded() {
    let config = VectorConfig::default().with_max_size(0);
    assert_eq!(config.effective_max_size(), usize::MAX);
}

#[test]
fn test_non_zero_max_size_is_kept() {
    let config = VectorConfig::default().with_max_size(7);
    assert_eq!(config.effective_max_size(), 7);
}

// =============================================================================
// effective_growth_rate()
// =============================================================================

#[test]
fn test_growth_rate_below_one_falls_back_to_default() {
    for rate in [0.0, 0.5, 0.999, -2.0] {
        let config = VectorConfig::default().with_growth_rate(rate);
        assert_eq!(config.effective_growth_rate(), DEFAULT_GROWTH_RATE);
    }
}

#[test]
fn test_growth_rate_nan_falls_back_to_default() {
    let config = VectorConfig::default().with_growth_rate(f32::NAN);
    assert_eq!(config.effective_growth_rate(), DEFAULT_GROWTH_RATE);
}

#[test]
fn test_growth_rate_infinite_falls_back_to_default() {
    for rate in [f32::INFINITY, f32::NEG_INFINITY] {
        let config = VectorConfig::default().with_growth_rate(rate);
        assert_eq!(config.effective_growth_rate(), DEFAULT_GROWTH_RATE);
    }
}

#[test]
fn test_growth_rate_at_least_one_is_kept() {
    for rate in [1.0, 1.25, 2.0, 10.0] {
        let config = VectorConfig::default().with_growth_rate(rate);
        assert_eq!(config.effective_growth_rate(), rate);
    }
}
