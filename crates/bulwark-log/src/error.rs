// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for bulwark-log.

use thiserror::Error;

/// Errors returned while registering sinks.
#[derive(Debug, Error)]
pub enum LogError {
    /// The journal already holds the maximum number of sinks.
    #[error("journal already holds {max} sinks")]
    TooManySinks {
        /// Sink limit.
        max: usize,
    },

    /// Opening or initializing a sink stream failed.
    #[error("sink I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
