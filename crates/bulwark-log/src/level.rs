// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

/// Importance of a single message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Step-by-step tracing.
    Trace = 0,
    /// Normal progress.
    Info = 1,
    /// Something looks off but the operation continued.
    Warning = 2,
    /// An operation failed.
    Error = 3,
    /// The process is about to stop.
    Fatal = 4,
}

impl Level {
    /// Tag printed in front of every record.
    pub const fn as_str(self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Fatal => "FATAL",
        }
    }

    pub(crate) const fn ansi_color(self) -> &'static str {
        match self {
            Level::Trace => "\x1b[90m",
            Level::Info => "\x1b[32m",
            Level::Warning => "\x1b[33m",
            Level::Error => "\x1b[31m",
            Level::Fatal => "\x1b[1;31m",
        }
    }

    pub(crate) const fn html_class(self) -> &'static str {
        match self {
            Level::Trace => "log-trace",
            Level::Info => "log-info",
            Level::Warning => "log-warning",
            Level::Error => "log-error",
            Level::Fatal => "log-fatal",
        }
    }
}

impl core::fmt::Display for Level {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Minimum importance a sink accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LevelFilter {
    /// Everything, including [`Level::Trace`].
    #[default]
    All,
    /// [`Level::Info`] and above.
    Info,
    /// [`Level::Warning`] and above.
    Warning,
    /// [`Level::Error`] and above.
    Error,
    /// Only [`Level::Fatal`].
    Fatal,
    /// Nothing.
    Off,
}

impl LevelFilter {
    /// Returns `true` if a message at `level` passes this filter.
    pub const fn allows(self, level: Level) -> bool {
        let min = match self {
            LevelFilter::All => Level::Trace,
            LevelFilter::Info => Level::Info,
            LevelFilter::Warning => Level::Warning,
            LevelFilter::Error => Level::Error,
            LevelFilter::Fatal => Level::Fatal,
            LevelFilter::Off => return false,
        };

        level as u8 >= min as u8
    }
}
