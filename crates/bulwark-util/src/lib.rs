// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Low-level helpers shared by the Bulwark integrity checks.
//!
//! - [`hash_bytes`] / [`Hasher`]: fast, unkeyed, order-sensitive 64-bit checksum.
//!   Not collision resistant; it exists to notice accidental or foreign writes.
//! - [`can_read`] / [`can_read_range`]: decides whether an address is backed by
//!   readable memory without dereferencing it, so wild or stale pointers can be
//!   rejected before any structural check trusts them.
//!
//! # Example
//!
//! ```rust
//! use bulwark_util::{can_read, hash_bytes};
//!
//! let value = 42u64;
//! assert!(can_read(&value as *const u64 as *const u8));
//! assert!(!can_read(core::ptr::null()));
//!
//! assert_ne!(hash_bytes(&[1, 2]), hash_bytes(&[2, 1]));
//! ```

#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

mod hash;
mod probe;

pub use hash::{HASH_ADD, HASH_BASE, Hasher, hash_bytes};
pub use probe::{can_read, can_read_range, page_size};
