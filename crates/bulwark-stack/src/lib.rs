// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Growable LIFO stack that proves its own integrity before every operation.
//!
//! [`Stack<T>`] keeps its control block and its element buffer on the heap and
//! surrounds both with sentinels. Before any push, pop or peek it runs a fixed
//! sequence of checks, cheapest first:
//!
//! 1. the control block is readable (`BAD_PTR`, stop)
//! 2. control-block canaries (`DEAD_CANARY`)
//! 3. `size`/`capacity` sanity (`CORRUPTED_SIZE`, `CORRUPTED_CAP`, stop)
//! 4. the buffer is readable (`BAD_DATA_PTR`, stop)
//! 5. buffer canaries (`CORRUPTED_DATA`)
//! 6. structural and data checksums (`WRONG_HASH`, `WRONG_DATA_HASH`)
//! 7. poison scan: live slots are never poison, spare slots always are
//!    (`CORRUPTED_DATA`)
//!
//! Findings accumulate in an [`ErrorFlags`] bitmask, so a caller sees every
//! failure class at once. Any finding blocks the requested mutation.
//!
//! Canaries, checksums and debug info are independent [`Protections`] in the
//! [`StackConfig`].
//!
//! None of this is a security boundary: the checksum is unkeyed and the
//! checks are heuristics meant to catch stray writes early.
//!
//! # Example
//!
//! ```rust
//! use bulwark_stack::{ErrorFlags, Stack, StackConfig};
//!
//! let mut stack = Stack::<i32>::new(StackConfig::default()).expect("Failed to new()");
//!
//! for value in 0..=16 {
//!     stack.push(value).expect("Failed to push(..)");
//! }
//! assert_eq!(stack.capacity(), 32);
//!
//! assert_eq!(stack.pop(), Ok(16));
//! assert_eq!(stack.peek_copy(), Ok(15));
//! assert!(stack.check().is_empty());
//!
//! let mut empty = Stack::<i32>::new(StackConfig::default()).expect("Failed to new()");
//! let error = empty.pop().expect_err("pop on empty stack");
//! assert_eq!(error.flags(), ErrorFlags::EMPTY);
//! ```
//!
//! # Threading
//!
//! A stack has exactly one owner. It is neither `Send` nor `Sync` and does
//! no locking.

#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

#[cfg(test)]
mod tests;

mod block;
mod canary;
mod capacity;
mod check;
mod config;
mod debug_info;
mod dump;
mod element;
mod error;
mod fatal;
mod flags;
mod layout;
mod macros;
mod stack;
mod support;

pub use canary::CANARY;
pub use config::{Protections, StackConfig, StackConfigBuilder};
pub use debug_info::DebugInfo;
pub use element::Element;
pub use error::{ConfigError, StackError};
pub use fatal::abort_on_corruption;
pub use flags::ErrorFlags;
pub use stack::Stack;

#[doc(hidden)]
pub use debug_info::__type_name_of;

#[cfg(any(test, feature = "test-utils"))]
pub use support::test_utils;
