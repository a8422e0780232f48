// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use bulwark_log::{Journal, Level, log_fatal};

use crate::element::Element;
use crate::flags::ErrorFlags;
use crate::stack::Stack;

/// Exit code used by the fatal path in unit tests.
#[cfg(test)]
pub(crate) const FATAL_EXIT_CODE: i32 = 134;

/// Terminates the process if `flags` reports anything.
///
/// Dumps `stack` at [`Level::Fatal`], shuts `journal` down so file sinks are
/// flushed, then aborts. Returns normally when `flags` is empty.
///
/// ```rust
/// use bulwark_log::Journal;
/// use bulwark_stack::{ErrorFlags, Stack, StackConfig, abort_on_corruption};
///
/// let stack = Stack::<i32>::new(StackConfig::default()).expect("Failed to new()");
/// let mut journal = Journal::new();
///
/// abort_on_corruption(&stack, ErrorFlags::NO_ERROR, &mut journal);
/// ```
pub fn abort_on_corruption<T: Element>(stack: &Stack<T>, flags: ErrorFlags, journal: &mut Journal) {
    if flags.is_empty() {
        return;
    }

    tracing::error!(flags = %flags, "aborting on stack failure");

    log_fatal!(journal, "aborting: {flags}");
    stack.dump(journal, Level::Fatal, flags);
    drop(journal.shutdown());

    terminate();
}

#[cfg(test)]
fn terminate() -> ! {
    std::process::exit(FATAL_EXIT_CODE)
}

#[cfg(not(test))]
fn terminate() -> ! {
    std::process::abort()
}
