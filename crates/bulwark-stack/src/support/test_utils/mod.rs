// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Failure and corruption injection for tests.
//!
//! Only available with the `test-utils` feature.

mod behaviour;
mod tamper;

pub use behaviour::StackBehaviour;
pub use tamper::Tamper;
