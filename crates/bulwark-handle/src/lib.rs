// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Opaque, salted handles to [`Stack<T>`](bulwark_stack::Stack).
//!
//! A [`StackHandle<T>`] is the address of a heap wrapper XORed with a
//! per-process salt. The wrapper surrounds the stack with two canaries bound
//! to the same salt. Every call decodes the handle, probes the decoded
//! address and checks both canaries before forwarding; a handle that does not
//! resolve reports `BAD_PTR` instead of touching memory it does not own.
//!
//! This catches stale, forged and mistyped handles. It is a misuse and
//! corruption detector, not a security mechanism: the salt hides addresses
//! from casual inspection, nothing more.
//!
//! # Example
//!
//! ```rust
//! use bulwark_handle::StackHandle;
//! use bulwark_stack::{ErrorFlags, StackConfig};
//!
//! let handle = StackHandle::<i32>::create(StackConfig::default()).expect("Failed to create(..)");
//!
//! handle.push(1).expect("Failed to push(..)");
//! assert_eq!(handle.pop(), Ok(1));
//!
//! handle.destroy().expect("Failed to destroy()");
//! assert_eq!(handle.check(), ErrorFlags::BAD_PTR);
//! ```

#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

#[cfg(test)]
mod tests;

mod handle;
mod salt;

pub use handle::StackHandle;
pub use salt::salt;
