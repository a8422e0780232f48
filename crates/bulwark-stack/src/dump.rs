// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Human-readable state dump.
//!
//! Never mutates and never trusts the state it renders: the control block and
//! the buffer are probed before being read, and slots are listed even when
//! the bounds are inconsistent as long as the memory is readable.
//!
//! Slot markers: `*` live slot, `(!)` slot that violates the poison layout.

use bulwark_log::{Journal, Level, log_message};
use bulwark_util::can_read_range;

use crate::block::Block;
use crate::canary;
use crate::check::block_is_readable;
use crate::config::Protections;
use crate::element::Element;
use crate::flags::ErrorFlags;
use crate::stack::Stack;

/// Consecutive unreadable slots listed before the rest are skipped.
const MAX_UNREADABLE_RUN: usize = 16;

/// Upper bound on listed slots when size or capacity cannot be trusted.
const MAX_UNTRUSTED_SLOTS: usize = 256;

impl<T: Element> Stack<T> {
    /// Writes the full state of the stack to `journal` at `level`.
    ///
    /// `flags` is printed as the reason for the dump; pass the result of a
    /// previous [`Stack::check`] or operation.
    pub fn dump(&self, journal: &mut Journal, level: Level, flags: ErrorFlags) {
        let type_name = core::any::type_name::<T>();

        let Some(ptr) = self.block_ptr() else {
            log_message!(journal, level, "Stack<{type_name}> (destroyed) flags: {flags}");
            return;
        };

        let address = ptr.as_ptr() as usize;
        if !block_is_readable(ptr.as_ptr()) {
            log_message!(
                journal,
                level,
                "Stack<{type_name}> [{address:#x}] <unreadable control block> flags: {flags}"
            );
            return;
        }

        // SAFETY: the control block was probed readable.
        let block = unsafe { &*ptr.as_ptr() };
        dump_block(journal, level, flags, type_name, block);
    }

    /// Checks the stack and dumps it: at `Info` when intact, at `Error`
    /// otherwise. Returns the check result.
    pub fn dump_checked(&self, journal: &mut Journal) -> ErrorFlags {
        let flags = self.check();
        let level = if flags.is_empty() {
            Level::Info
        } else {
            Level::Error
        };

        self.dump(journal, level, flags);
        flags
    }
}

fn ok_or_bad(good: bool) -> &'static str {
    if good { "ok" } else { "BAD" }
}

fn dump_block<T: Element>(
    journal: &mut Journal,
    level: Level,
    flags: ErrorFlags,
    type_name: &str,
    block: &Block<T>,
) {
    let address = block.address();

    match block.debug.read() {
        Some(info) if block.has(Protections::DEBUG_INFO) && !info.name.is_empty() => {
            log_message!(
                journal,
                level,
                "Stack<{type_name}> \"{}\" [{address:#x}] from {} at {}:{}",
                info.name,
                info.function,
                info.file,
                info.line
            );
        }
        Some(_) => {
            log_message!(journal, level, "Stack<{type_name}> [{address:#x}]");
        }
        None => {
            log_message!(
                journal,
                level,
                "Stack<{type_name}> [{address:#x}] <unreadable debug info>"
            );
        }
    }

    log_message!(journal, level, "flags: {flags} ({:#05x})", flags.bits());
    log_message!(journal, level, "{{");

    let expected = block.expected_canary();
    if !block.has(Protections::CANARY) {
        log_message!(journal, level, "    canaries         = disabled, expected zero");
    }

    for (label, value) in [("canary_start", block.canary_start), ("canary_end", block.canary_end)] {
        log_message!(
            journal,
            level,
            "    {label:<16} = {value:#018x} (expected {expected:#018x}) {}",
            ok_or_bad(value == expected)
        );
    }

    log_message!(journal, level, "    size             = {}", block.size);
    log_message!(journal, level, "    capacity         = {}", block.capacity);
    log_message!(journal, level, "    min_capacity     = {}", block.min_capacity);
    log_message!(journal, level, "    growth_factor    = {}", block.growth_factor());
    log_message!(journal, level, "    protections      = {:?}", block.protections());
    log_message!(journal, level, "    reallocations    = {}", block.reallocations);
    log_message!(journal, level, "    data             = {:p}", block.data);

    let layout = block.layout();
    let buffer_readable = layout.is_some_and(|layout| {
        !block.data.is_null()
            && can_read_range(layout.base_of(block.data), layout.layout().size())
    });

    if let Some(layout) = layout.filter(|_| buffer_readable) {
        let base = layout.base_of(block.data);
        // SAFETY: the whole buffer was probed readable.
        let (head, tail) = unsafe {
            (
                canary::read_word(base),
                canary::read_word(base.wrapping_add(layout.tail_offset())),
            )
        };

        for (label, value) in [("buffer_head", head), ("buffer_tail", tail)] {
            log_message!(
                journal,
                level,
                "    {label:<16} = {value:#018x} (expected {expected:#018x}) {}",
                ok_or_bad(value == expected)
            );
        }
    }

    if block.has(Protections::HASH) {
        let computed = block.compute_structural_hash();
        log_message!(
            journal,
            level,
            "    structural_hash  = {:#018x} (computed {computed:#018x}) {}",
            block.structural_hash,
            ok_or_bad(computed == block.structural_hash)
        );

        match layout.filter(|_| buffer_readable) {
            Some(layout) => {
                // SAFETY: the whole buffer was probed readable.
                let computed = unsafe { block.compute_data_hash(&layout) };
                log_message!(
                    journal,
                    level,
                    "    data_hash        = {:#018x} (computed {computed:#018x}) {}",
                    block.data_hash,
                    ok_or_bad(computed == block.data_hash)
                );
            }
            None => {
                log_message!(
                    journal,
                    level,
                    "    data_hash        = {:#018x} (buffer unreadable)",
                    block.data_hash
                );
            }
        }
    } else {
        for (label, value) in [("structural_hash", block.structural_hash), ("data_hash", block.data_hash)] {
            log_message!(
                journal,
                level,
                "    {label:<16} = {value:#018x} (disabled, expected zero) {}",
                ok_or_bad(value == 0)
            );
        }
    }

    dump_slots(journal, level, block, buffer_readable);

    log_message!(journal, level, "}}");
}

fn dump_slots<T: Element>(journal: &mut Journal, level: Level, block: &Block<T>, buffer_readable: bool) {
    if block.data.is_null() {
        log_message!(journal, level, "    <no buffer>");
        return;
    }

    log_message!(journal, level, "    {{");

    let trusted = block.size <= block.capacity
        && block.min_capacity != 0
        && block.capacity >= block.min_capacity
        && block.layout().is_some();
    let listed = if trusted {
        block.capacity
    } else {
        block
            .capacity
            .min(block.size.max(block.min_capacity))
            .min(MAX_UNTRUSTED_SLOTS)
    };

    let mut unreadable_run = 0;

    for index in 0..listed {
        let slot = block.data.wrapping_add(index);

        if !buffer_readable && !can_read_range(slot.cast::<u8>(), size_of::<T>()) {
            unreadable_run += 1;
            log_message!(journal, level, "         [{index}] <unreadable>");

            if unreadable_run >= MAX_UNREADABLE_RUN {
                log_message!(
                    journal,
                    level,
                    "        ... {} more slots skipped",
                    block.capacity - index - 1
                );
                log_message!(journal, level, "    }}");
                return;
            }
            continue;
        }
        unreadable_run = 0;

        // SAFETY: the slot was probed readable, directly or with the buffer.
        let value = unsafe { block.read_slot(index) };
        let live = index < block.size;
        let marker = if live { '*' } else { ' ' };
        let warning = if value.is_poison() == live { " (!)" } else { "" };

        if value.is_poison() {
            log_message!(journal, level, "        {marker}[{index}] = POISON{warning}");
        } else {
            log_message!(journal, level, "        {marker}[{index}] = {value}{warning}");
        }
    }

    if listed < block.capacity {
        log_message!(
            journal,
            level,
            "        ... {} more slots not listed",
            block.capacity - listed
        );
    }

    log_message!(journal, level, "    }}");
}
