// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! # bulwark_log
//!
//! Leveled diagnostic journal used by Bulwark dumps and by callers that wrap
//! stack operations.
//!
//! A [`Journal`] is an explicit registry object: create it at start-up, pass
//! it by reference to whoever emits diagnostics, and shut it down (or drop it)
//! at the end. There is no global logger state.
//!
//! Each registered [`Sink`] has its own stream, minimum level and
//! [`SinkFlags`]:
//!
//! - `USE_ESCAPE`: colour the level tag with ANSI escape sequences
//! - `USE_HTML`: wrap output in an HTML document (ignored with `USE_ESCAPE`)
//! - `LOG_ALWAYS`: keep writing while the journal is paused
//! - `KEEP_OPEN`: hand the stream back at shutdown instead of closing it
//!
//! ## Example
//!
//! ```rust
//! use bulwark_log::{Journal, Level, LevelFilter, Sink, SinkFlags, log_info};
//!
//! let mut journal = Journal::new();
//! journal
//!     .add_sink(
//!         Sink::new("memory", Vec::<u8>::new())
//!             .with_filter(LevelFilter::Info)
//!             .with_flags(SinkFlags::KEEP_OPEN),
//!     )
//!     .expect("Failed to add_sink(..)");
//!
//! log_info!(journal, "pushed {} values", 65);
//! journal.log(Level::Trace, format_args!("filtered out"));
//!
//! let kept = journal.shutdown();
//! assert_eq!(kept.len(), 1);
//! ```

#![warn(missing_docs)]

#[cfg(test)]
mod tests;

mod error;
mod journal;
mod level;
mod macros;
mod sink;
mod support;

pub use error::LogError;
pub use journal::{Journal, MAX_SINKS};
pub use level::{Level, LevelFilter};
pub use sink::{Sink, SinkFlags};

#[cfg(any(test, feature = "test-utils"))]
pub use support::test_utils;
