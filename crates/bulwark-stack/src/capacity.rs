// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Capacity manager.
//!
//! Growth multiplies the capacity by `G`. Shrinking uses a hysteresis band: it
//! triggers only once `capacity > round(size * G^2)` and then targets
//! `round(size * G)`, so alternating push/pop at a boundary never thrashes.
//!
//! Every reallocation builds a fresh buffer (live prefix copied, rest
//! poisoned, canaries written) and wipes the old one before freeing it.
//! Nothing is changed if the new allocation fails.

use std::alloc::dealloc;

use crate::block::Block;
use crate::canary;
use crate::element::Element;
use crate::error::StackError;
use crate::flags::ErrorFlags;
use crate::layout::BufferLayout;
use crate::stack::Stack;

/// Capacity after one growth step, always strictly larger than `capacity`.
pub(crate) fn grow_target(capacity: usize, growth_factor: f64) -> Option<usize> {
    let target = (capacity as f64 * growth_factor).round();

    if !target.is_finite() || target >= usize::MAX as f64 {
        return None;
    }

    let target = target as usize;
    if target > capacity {
        Some(target)
    } else {
        capacity.checked_add(1)
    }
}

/// Capacity to shrink to after a pop, or `None` if the stack stays as is.
pub(crate) fn shrink_target(
    size: usize,
    capacity: usize,
    min_capacity: usize,
    growth_factor: f64,
) -> Option<usize> {
    let trigger = (size as f64 * growth_factor * growth_factor).round();

    if !(capacity as f64 > trigger && trigger > min_capacity as f64) {
        return None;
    }

    let target = ((size as f64 * growth_factor).round() as usize).max(min_capacity);
    (target >= size && target < capacity).then_some(target)
}

/// Fills a freshly allocated buffer: copies `live` slots from `src`, poisons
/// the rest and writes both canaries. Returns the slot-0 pointer.
///
/// # Safety
///
/// `base` must be a live allocation of `layout`, and `src` must hold `live`
/// readable slots not overlapping it. `live <= capacity`.
pub(crate) unsafe fn populate_buffer<T: Element>(
    base: *mut u8,
    layout: &BufferLayout,
    capacity: usize,
    src: *const T,
    live: usize,
    canary_value: u64,
) -> *mut T {
    // SAFETY: all offsets come from `layout`, which describes the allocation.
    unsafe {
        let data = base.add(layout.data_offset()).cast::<T>();

        if live > 0 {
            core::ptr::copy_nonoverlapping(src, data, live);
        }
        for index in live..capacity {
            data.add(index).write(T::POISON);
        }

        canary::write_word(base, canary_value);
        canary::write_word(base.add(layout.tail_offset()), canary_value);

        data
    }
}

/// Wipes and frees the buffer currently owned by `block`.
///
/// # Safety
///
/// `block.data` and `block.capacity` must describe a live buffer allocated by
/// this crate.
pub(crate) unsafe fn release_buffer<T: Element>(block: &mut Block<T>) {
    let Some(layout) = block.layout() else {
        return;
    };
    if block.data.is_null() {
        return;
    }

    let base = layout.base_of(block.data);

    // SAFETY: guaranteed by the caller.
    unsafe {
        core::ptr::write_bytes(base, 0, layout.layout().size());
        dealloc(base, layout.layout());
    }

    block.data = core::ptr::null_mut();
}

impl<T: Element> Stack<T> {
    /// Grows the buffer if the next push would not fit.
    ///
    /// # Errors
    ///
    /// `NO_MEMORY` if the new capacity cannot be computed or allocated; the
    /// stack is left exactly as it was.
    pub(crate) fn ensure_pushable(&mut self, block: &mut Block<T>) -> Result<(), StackError> {
        if block.size < block.capacity {
            return Ok(());
        }

        let target = grow_target(block.capacity, block.growth_factor())
            .ok_or(StackError::new(ErrorFlags::NO_MEMORY))?;

        if self.reallocate(block, target) {
            Ok(())
        } else {
            tracing::warn!(
                capacity = block.capacity,
                target,
                "stack growth failed: allocation refused"
            );
            Err(StackError::new(ErrorFlags::NO_MEMORY))
        }
    }

    /// Shrinks the buffer if the stack fell below the hysteresis band.
    ///
    /// Best-effort: returns `false` if nothing changed, including when the
    /// smaller buffer could not be allocated.
    pub(crate) fn try_shrink(&mut self, block: &mut Block<T>) -> bool {
        let Some(target) = shrink_target(
            block.size,
            block.capacity,
            block.min_capacity,
            block.growth_factor(),
        ) else {
            return false;
        };

        let shrunk = self.reallocate(block, target);
        if !shrunk {
            tracing::debug!(
                capacity = block.capacity,
                target,
                "stack shrink skipped: allocation refused"
            );
        }

        shrunk
    }

    /// Moves the live elements into a new buffer of `new_capacity` slots.
    ///
    /// Hashes are not resealed here; callers seal after their own mutation.
    fn reallocate(&mut self, block: &mut Block<T>, new_capacity: usize) -> bool {
        if new_capacity < block.size {
            return false;
        }

        let Some(layout) = BufferLayout::for_capacity::<T>(new_capacity) else {
            return false;
        };
        let Some(base) = self.allocate(layout.layout()) else {
            return false;
        };

        let canary_value = block.expected_canary();
        let old_capacity = block.capacity;

        // SAFETY: `base` is a fresh allocation of `layout`; the current buffer
        // passed the integrity check and holds `size` live slots.
        let data = unsafe {
            populate_buffer(
                base.as_ptr(),
                &layout,
                new_capacity,
                block.data,
                block.size,
                canary_value,
            )
        };

        // SAFETY: the current buffer was allocated by this crate and verified.
        unsafe { release_buffer(block) };

        block.data = data;
        block.capacity = new_capacity;
        block.reallocations = block.reallocations.wrapping_add(1);

        tracing::debug!(
            from = old_capacity,
            to = new_capacity,
            size = block.size,
            "stack buffer reallocated"
        );

        true
    }
}
