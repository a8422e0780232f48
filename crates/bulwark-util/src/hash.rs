// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Polynomial rolling checksum.

/// Multiplier folded into the accumulator for every byte (prime near 256).
pub const HASH_BASE: u64 = 269;

/// Constant added with every byte so runs of zero bytes still move the state.
pub const HASH_ADD: u64 = 31;

/// Streaming form of [`hash_bytes`].
///
/// Feeding the same bytes in the same order through any sequence of
/// `update*` calls yields the same value as a single [`hash_bytes`] call over
/// their concatenation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Hasher {
    acc: u64,
}

impl Hasher {
    /// Creates a hasher with an empty accumulator.
    #[inline]
    pub const fn new() -> Self {
        Self { acc: 0 }
    }

    /// Folds `bytes` into the accumulator, left to right.
    #[inline]
    pub fn update(&mut self, bytes: &[u8]) -> &mut Self {
        for &byte in bytes {
            self.acc = self
                .acc
                .wrapping_mul(HASH_BASE)
                .wrapping_add(byte as u64)
                .wrapping_add(HASH_ADD);
        }

        self
    }

    /// Folds the native-endian bytes of `value`.
    #[inline]
    pub fn update_u64(&mut self, value: u64) -> &mut Self {
        self.update(&value.to_ne_bytes())
    }

    /// Folds the native-endian bytes of `value`.
    #[inline]
    pub fn update_usize(&mut self, value: usize) -> &mut Self {
        self.update(&value.to_ne_bytes())
    }

    /// Returns the current accumulator.
    #[inline]
    pub const fn finish(&self) -> u64 {
        self.acc
    }
}

/// Computes the checksum of `bytes`.
///
/// `acc = acc * HASH_BASE + byte + HASH_ADD` for every byte, with wrapping
/// 64-bit arithmetic, starting from zero.
#[inline]
pub fn hash_bytes(bytes: &[u8]) -> u64 {
    Hasher::new().update(bytes).finish()
}
