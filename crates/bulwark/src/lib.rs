// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! # Bulwark
//!
//! A growable LIFO stack that proves its own integrity before every
//! operation, for code that shares an address space with unsafe or foreign
//! code it does not fully trust.
//!
//! Each stack guards its control block and its buffer with canaries, keeps
//! checksums of both, fills every unused slot with a poison value and probes
//! memory before reading it. A failed check blocks the operation and reports
//! every failure class found as [`ErrorFlags`].
//!
//! | Crate | Provides |
//! |---|---|
//! | [`stack`] | [`Stack<T>`], configuration, error flags, dumps |
//! | [`handle`] | [`StackHandle<T>`], salted opaque handles |
//! | [`log`] | [`Journal`], the sink registry dumps write to |
//! | [`util`] | memory probe and checksum |
//!
//! ## Quick start
//!
//! ```rust
//! use bulwark::{ErrorFlags, Journal, Stack, StackConfig, stack};
//!
//! let mut numbers: Stack<i64> = stack!("numbers").expect("Failed to construct stack");
//!
//! for value in 0..=64 {
//!     numbers.push(value).expect("Failed to push(..)");
//! }
//! assert_eq!(numbers.capacity(), 128);
//!
//! assert_eq!(numbers.pop(), Ok(64));
//! assert_eq!(numbers.check(), ErrorFlags::NO_ERROR);
//!
//! let mut journal = Journal::new();
//! numbers.dump_checked(&mut journal);
//! ```
//!
//! ## Not a security boundary
//!
//! The checksum is unkeyed and the handle salt only hides addresses. Bulwark
//! detects accidents early; it does not stop an attacker who can write
//! memory.

pub mod support;

pub use bulwark_handle as handle;
pub use bulwark_log as log;
pub use bulwark_stack as stack;
pub use bulwark_util as util;

pub use bulwark_handle::StackHandle;
pub use bulwark_log::{Journal, Level, LevelFilter, Sink, SinkFlags};
pub use bulwark_stack::{
    CANARY, ConfigError, DebugInfo, Element, ErrorFlags, Protections, Stack, StackConfig,
    StackConfigBuilder, StackError, abort_on_corruption, debug_info, stack,
};
