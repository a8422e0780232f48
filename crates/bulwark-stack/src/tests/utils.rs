// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::{Protections, Stack, StackConfig};

pub(crate) fn config_with(min_capacity: usize, growth_factor: f64) -> StackConfig {
    StackConfig::builder()
        .min_capacity(min_capacity)
        .growth_factor(growth_factor)
        .build()
        .expect("Failed to build()")
}

pub(crate) fn config_protected_by(protections: Protections) -> StackConfig {
    StackConfig::builder()
        .protections(protections)
        .build()
        .expect("Failed to build()")
}

pub(crate) fn filled(count: i32) -> Stack<i32> {
    let mut stack = Stack::new(StackConfig::default()).expect("Failed to new()");

    for value in 0..count {
        stack.push(value).expect("Failed to push(..)");
    }

    stack
}
