// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for bulwark-stack.

use thiserror::Error;

use crate::flags::ErrorFlags;

/// A stack operation was refused or failed.
///
/// Carries every flag the operation produced.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("stack operation failed: {flags}")]
pub struct StackError {
    flags: ErrorFlags,
}

impl StackError {
    /// Wraps `flags`. Callers should only wrap non-empty sets.
    pub const fn new(flags: ErrorFlags) -> Self {
        Self { flags }
    }

    /// All flags reported by the operation.
    pub const fn flags(&self) -> ErrorFlags {
        self.flags
    }

    /// Returns `true` if every flag in `flags` was reported.
    pub const fn contains(&self, flags: ErrorFlags) -> bool {
        self.flags.contains(flags)
    }
}

impl From<ErrorFlags> for StackError {
    fn from(flags: ErrorFlags) -> Self {
        Self::new(flags)
    }
}

/// Invalid [`StackConfig`](crate::StackConfig) parameters.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// The minimum capacity must be at least one slot.
    #[error("minimum capacity must be non-zero")]
    ZeroMinCapacity,

    /// The growth factor must be finite and greater than one.
    #[error("growth factor must be finite and > 1.0, got {0}")]
    InvalidGrowthFactor(f64),
}
