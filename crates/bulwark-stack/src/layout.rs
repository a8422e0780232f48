// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Backing buffer layout: `[u64 canary][T; capacity][pad][u64 canary]`.

use std::alloc::Layout;

/// Offsets of the regions of a buffer with a given capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BufferLayout {
    layout: Layout,
    data_offset: usize,
    tail_offset: usize,
    slots_len: usize,
}

impl BufferLayout {
    /// Returns `None` if the buffer size overflows `isize`.
    pub(crate) fn for_capacity<T>(capacity: usize) -> Option<Self> {
        let head = Layout::new::<u64>();
        let slots = Layout::array::<T>(capacity).ok()?;
        let (with_slots, data_offset) = head.extend(slots).ok()?;
        let (full, tail_offset) = with_slots.extend(Layout::new::<u64>()).ok()?;

        Some(Self {
            layout: full.pad_to_align(),
            data_offset,
            tail_offset,
            slots_len: slots.size(),
        })
    }

    /// Allocation layout of the whole buffer.
    pub(crate) fn layout(&self) -> Layout {
        self.layout
    }

    /// Byte offset of slot 0 from the start of the allocation.
    pub(crate) fn data_offset(&self) -> usize {
        self.data_offset
    }

    /// Byte offset of the trailing canary.
    pub(crate) fn tail_offset(&self) -> usize {
        self.tail_offset
    }

    /// Total size of the slot region in bytes.
    pub(crate) fn slots_len(&self) -> usize {
        self.slots_len
    }

    /// Recovers the allocation start from a slot-0 pointer without
    /// dereferencing it.
    pub(crate) fn base_of<T>(&self, data: *mut T) -> *mut u8 {
        data.cast::<u8>().wrapping_sub(self.data_offset)
    }
}
