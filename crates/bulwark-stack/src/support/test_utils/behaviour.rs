// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

/// Allocation behaviour injected into a [`Stack`](crate::Stack).
///
/// Allocations are counted from construction, or from the last
/// [`Stack::change_behaviour`](crate::Stack::change_behaviour). The behaviour
/// is sticky: it stays active until changed.
///
/// ```rust
/// use bulwark_stack::test_utils::StackBehaviour;
/// use bulwark_stack::{ErrorFlags, Stack, StackConfig};
///
/// let config = StackConfig::builder().min_capacity(1).build().expect("Failed to build()");
/// let mut stack = Stack::<u8>::new(config).expect("Failed to new()");
///
/// stack.push(1).expect("Failed to push(..)");
/// stack.change_behaviour(StackBehaviour::FailAllocations);
///
/// let error = stack.push(2).expect_err("growth must fail");
/// assert_eq!(error.flags(), ErrorFlags::NO_MEMORY);
/// assert_eq!(stack.len(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StackBehaviour {
    /// Normal behaviour - no injected failures.
    #[default]
    None,
    /// Every buffer allocation fails.
    FailAllocations,
    /// The n-th buffer allocation (1-based) fails, the others succeed.
    FailAtNthAllocation(usize),
}

impl StackBehaviour {
    /// Returns `true` if allocation number `count` must fail.
    pub(crate) fn refuses(&self, count: usize) -> bool {
        match *self {
            Self::None => false,
            Self::FailAllocations => true,
            Self::FailAtNthAllocation(n) => n == count,
        }
    }
}
