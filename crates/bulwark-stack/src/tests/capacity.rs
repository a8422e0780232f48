// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::capacity::{grow_target, shrink_target};

// =============================================================================
// grow_target()
// =============================================================================

#[test]
fn test_grow_target_doubles() {
    assert_eq!(grow_target(16, 2.0), Some(32));
    assert_eq!(grow_target(64, 2.0), Some(128));
}

#[test]
fn test_grow_target_rounds() {
    assert_eq!(grow_target(3, 1.5), Some(5));
    assert_eq!(grow_target(5, 1.5), Some(8));
}

#[test]
fn test_grow_target_always_strictly_larger() {
    assert_eq!(grow_target(1, 1.1), Some(2));
    assert_eq!(grow_target(4, 1.01), Some(5));
}

#[test]
fn test_grow_target_overflow() {
    assert_eq!(grow_target(usize::MAX, 2.0), None);
    assert_eq!(grow_target(usize::MAX / 2 + 1, 2.0), None);
}

// =============================================================================
// shrink_target()
// =============================================================================

#[test]
fn test_shrink_target_inside_band_keeps_capacity() {
    assert_eq!(shrink_target(32, 128, 16, 2.0), None);
    assert_eq!(shrink_target(16, 32, 16, 2.0), None);
}

#[test]
fn test_shrink_target_below_band() {
    assert_eq!(shrink_target(31, 128, 16, 2.0), Some(62));
    assert_eq!(shrink_target(15, 62, 16, 2.0), Some(30));
}

#[test]
fn test_shrink_target_clamped_to_min_capacity() {
    assert_eq!(shrink_target(7, 30, 16, 2.0), Some(16));
    assert_eq!(shrink_target(5, 64, 16, 2.0), Some(16));
}

#[test]
fn test_shrink_target_never_below_min_band() {
    // round(4 * 4) == 16 is not above the minimum.
    assert_eq!(shrink_target(4, 64, 16, 2.0), None);
    assert_eq!(shrink_target(0, 64, 16, 2.0), None);
}

#[test]
fn test_shrink_target_at_min_capacity() {
    assert_eq!(shrink_target(1, 16, 16, 2.0), None);
}
