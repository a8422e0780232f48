// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Canary guard.
//!
//! Four sentinel words protect a stack: two inside the control block (first
//! and last field) and two flanking the element buffer. With
//! [`Protections::BIND_ADDRESS`] every sentinel is combined with the control
//! block's address, so raw bytes copied from another instance (or a stale
//! constant) do not pass.

use crate::config::Protections;

/// Base sentinel value ("DIABOLICAL COCOAS").
pub const CANARY: u64 = 0xD1AB_011C_A1C0_C0A5;

/// Value every sentinel of the block at `block_address` must hold.
///
/// Zero when canaries are disabled.
#[inline]
pub(crate) fn expected(block_address: usize, protections: Protections) -> u64 {
    if !protections.contains(Protections::CANARY) {
        return 0;
    }

    if protections.contains(Protections::BIND_ADDRESS) {
        CANARY ^ block_address as u64
    } else {
        CANARY
    }
}

/// Reads a sentinel word.
///
/// # Safety
///
/// `ptr..ptr + 8` must be readable.
#[inline]
pub(crate) unsafe fn read_word(ptr: *const u8) -> u64 {
    // SAFETY: guaranteed by the caller; alignment is not assumed.
    unsafe { ptr.cast::<u64>().read_unaligned() }
}

/// Writes a sentinel word.
///
/// # Safety
///
/// `ptr..ptr + 8` must be writable.
#[inline]
pub(crate) unsafe fn write_word(ptr: *mut u8, value: u64) {
    // SAFETY: guaranteed by the caller; alignment is not assumed.
    unsafe { ptr.cast::<u64>().write_unaligned(value) }
}
