// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

/// Writes a formatted message at the given level.
///
/// ```rust
/// use bulwark_log::{Journal, Level, log_message};
///
/// let mut journal = Journal::new();
/// log_message!(journal, Level::Warning, "capacity {} looks odd", 3);
/// ```
#[macro_export]
macro_rules! log_message {
    ($journal:expr, $level:expr, $($arg:tt)+) => {
        $journal.log($level, ::core::format_args!($($arg)+))
    };
}

/// Writes a formatted [`Level::Trace`](crate::Level::Trace) message.
#[macro_export]
macro_rules! log_trace {
    ($journal:expr, $($arg:tt)+) => {
        $crate::log_message!($journal, $crate::Level::Trace, $($arg)+)
    };
}

/// Writes a formatted [`Level::Info`](crate::Level::Info) message.
#[macro_export]
macro_rules! log_info {
    ($journal:expr, $($arg:tt)+) => {
        $crate::log_message!($journal, $crate::Level::Info, $($arg)+)
    };
}

/// Writes a formatted [`Level::Warning`](crate::Level::Warning) message.
#[macro_export]
macro_rules! log_warning {
    ($journal:expr, $($arg:tt)+) => {
        $crate::log_message!($journal, $crate::Level::Warning, $($arg)+)
    };
}

/// Writes a formatted [`Level::Error`](crate::Level::Error) message.
#[macro_export]
macro_rules! log_error {
    ($journal:expr, $($arg:tt)+) => {
        $crate::log_message!($journal, $crate::Level::Error, $($arg)+)
    };
}

/// Writes a formatted [`Level::Fatal`](crate::Level::Fatal) message.
#[macro_export]
macro_rules! log_fatal {
    ($journal:expr, $($arg:tt)+) => {
        $crate::log_message!($journal, $crate::Level::Fatal, $($arg)+)
    };
}
