// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Test utilities re-exported from bulwark-stack and bulwark-log

#[cfg(feature = "test-utils")]
pub mod log {
    pub use bulwark_log::test_utils::*;
}
#[cfg(feature = "test-utils")]
pub mod stack {
    pub use bulwark_stack::test_utils::*;
}
