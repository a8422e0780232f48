// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::salt::{fallback_for_tests, fold};

#[test]
fn test_salt_is_stable_and_non_zero() {
    let first = crate::salt();

    assert_ne!(first, 0);
    assert_eq!(crate::salt(), first);
}

#[test]
fn test_salt_agrees_across_threads() {
    let salts: Vec<u64> = (0..8)
        .map(|_| std::thread::spawn(crate::salt))
        .collect::<Vec<_>>()
        .into_iter()
        .map(|thread| thread.join().expect("Failed to join()"))
        .collect();

    assert!(salts.iter().all(|salt| *salt == crate::salt()));
}

#[test]
fn test_fold_never_returns_zero() {
    assert_ne!(fold(&[0; 8]), 0);
    assert_ne!(fold(&[0xFF; 8]), 0);
}

#[test]
fn test_fallback_is_non_zero() {
    assert_ne!(fallback_for_tests(), 0);
}
