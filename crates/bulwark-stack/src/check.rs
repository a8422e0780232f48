// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Integrity check.
//!
//! Cheap checks gate expensive ones. Canary and checksum findings accumulate;
//! an unreadable block, untrustworthy bounds or an unreadable buffer stop the
//! check because nothing after them can be evaluated safely.
//!
//! The protection toggles recorded in the block are not trusted on their own:
//! a disabled protection must have left its words zeroed, so clearing a
//! toggle byte is itself reported.

use bulwark_util::can_read_range;

use crate::block::Block;
use crate::canary;
use crate::config::Protections;
use crate::element::Element;
use crate::flags::ErrorFlags;

/// Runs every check against the block at `block` and returns the findings.
pub(crate) fn verify<T: Element>(block: *const Block<T>) -> ErrorFlags {
    if !block_is_readable(block) {
        return ErrorFlags::BAD_PTR;
    }

    // SAFETY: the whole block was probed readable and is suitably aligned;
    // every field is plain data, so any bit pattern is a valid `Block<T>`.
    let block = unsafe { &*block };
    let mut flags = ErrorFlags::empty();

    // Zero without `CANARY`.
    let expected = block.expected_canary();

    if block.canary_start != expected || block.canary_end != expected {
        flags |= ErrorFlags::DEAD_CANARY;
    }

    if block.size > block.capacity {
        flags |= ErrorFlags::CORRUPTED_SIZE;
    }

    let layout = block.layout();
    if block.min_capacity == 0 || block.capacity < block.min_capacity || layout.is_none() {
        flags |= ErrorFlags::CORRUPTED_CAP;
    }

    let Some(layout) = layout else {
        return flags;
    };
    if flags.intersects(ErrorFlags::CORRUPTED_SIZE | ErrorFlags::CORRUPTED_CAP) {
        return flags;
    }

    let base = layout.base_of(block.data);
    if block.data.is_null()
        || (block.data as usize) % align_of::<T>() != 0
        || !can_read_range(base, layout.layout().size())
    {
        return flags | ErrorFlags::BAD_DATA_PTR;
    }

    // SAFETY: the whole buffer, both canaries included, was probed readable.
    let (head, tail) = unsafe {
        (
            canary::read_word(base),
            canary::read_word(base.wrapping_add(layout.tail_offset())),
        )
    };

    if head != expected || tail != expected {
        flags |= ErrorFlags::CORRUPTED_DATA;
    }

    if block.has(Protections::HASH) {
        if block.structural_hash != block.compute_structural_hash() {
            flags |= ErrorFlags::WRONG_HASH;
        }

        // SAFETY: the slot region was probed readable.
        if block.data_hash != unsafe { block.compute_data_hash(&layout) } {
            flags |= ErrorFlags::WRONG_DATA_HASH;
        }
    } else if block.structural_hash != 0 || block.data_hash != 0 {
        flags |= ErrorFlags::WRONG_HASH;
    }

    if !block.has(Protections::DEBUG_INFO) && !block.debug.is_empty() {
        flags |= ErrorFlags::WRONG_HASH;
    }

    // SAFETY: the slot region was probed readable.
    if unsafe { first_poison_violation(block) }.is_some() {
        flags |= ErrorFlags::CORRUPTED_DATA;
    }

    flags
}

/// Index of the first live slot holding poison or spare slot not holding it.
///
/// # Safety
///
/// Slots `[0, capacity)` must be readable.
pub(crate) unsafe fn first_poison_violation<T: Element>(block: &Block<T>) -> Option<usize> {
    (0..block.capacity).find(|&index| {
        // SAFETY: guaranteed by the caller.
        let slot = unsafe { block.read_slot(index) };
        slot.is_poison() != (index >= block.size)
    })
}

pub(crate) fn block_is_readable<T: Element>(block: *const Block<T>) -> bool {
    (block as usize) % align_of::<Block<T>>() == 0
        && can_read_range(block.cast::<u8>(), size_of::<Block<T>>())
}
