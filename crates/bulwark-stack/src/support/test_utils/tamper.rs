// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::marker::PhantomData;
use core::ptr::NonNull;

use crate::block::Block;
use crate::element::Element;
use crate::stack::Stack;

/// Writes past a stack's checks, the way stray foreign code would.
///
/// None of the setters reseal the checksums unless stated, so a single
/// corruption usually produces a checksum flag alongside its own.
///
/// Every method is a no-op on a destroyed stack.
///
/// Corrupting a stack makes it leak its buffer when dropped.
pub struct Tamper<'a, T: Element> {
    block: Option<NonNull<Block<T>>>,
    _stack: PhantomData<&'a mut Stack<T>>,
}

impl<T: Element> Stack<T> {
    /// Returns a view that can corrupt this stack.
    pub fn tamper(&mut self) -> Tamper<'_, T> {
        Tamper {
            block: self.block_ptr(),
            _stack: PhantomData,
        }
    }
}

impl<T: Element> Tamper<'_, T> {
    fn with_block<R>(&mut self, f: impl FnOnce(&mut Block<T>) -> R) -> Option<R> {
        // SAFETY: the view exclusively borrows the stack that owns the block.
        self.block.map(|ptr| f(unsafe { &mut *ptr.as_ptr() }))
    }

    /// Address of the control block.
    pub fn block_address(&mut self) -> usize {
        self.with_block(|block| block.address()).unwrap_or(0)
    }

    /// Overwrites the leading control canary.
    pub fn set_canary_start(&mut self, value: u64) {
        self.with_block(|block| block.canary_start = value);
    }

    /// Overwrites the trailing control canary.
    pub fn set_canary_end(&mut self, value: u64) {
        self.with_block(|block| block.canary_end = value);
    }

    /// Overwrites the recorded size.
    pub fn set_size(&mut self, size: usize) {
        self.with_block(|block| block.size = size);
    }

    /// Overwrites the recorded capacity.
    ///
    /// Only values below the real capacity, or too large for any buffer
    /// layout, are safe to verify afterwards.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.with_block(|block| block.capacity = capacity);
    }

    /// Overwrites the recorded protection toggles with raw `bits`.
    pub fn set_protections(&mut self, bits: u8) {
        self.with_block(|block| block.protections = bits);
    }

    /// Overwrites the buffer pointer with an arbitrary address.
    pub fn set_data_address(&mut self, address: usize) {
        self.with_block(|block| block.data = address as *mut T);
    }

    /// Flips bits of the structural checksum.
    pub fn corrupt_structural_hash(&mut self) {
        self.with_block(|block| block.structural_hash ^= 0xFF);
    }

    /// Flips bits of the data checksum.
    pub fn corrupt_data_hash(&mut self) {
        self.with_block(|block| block.data_hash ^= 0xFF);
    }

    /// Overwrites the canary in front of slot 0.
    pub fn set_buffer_head_canary(&mut self, value: u64) {
        self.with_buffer_canary(value, false);
    }

    /// Overwrites the canary after the last slot.
    pub fn set_buffer_tail_canary(&mut self, value: u64) {
        self.with_buffer_canary(value, true);
    }

    fn with_buffer_canary(&mut self, value: u64, tail: bool) {
        self.with_block(|block| {
            let Some(layout) = block.layout() else {
                return;
            };

            let base = layout.base_of(block.data);
            let target = if tail {
                base.wrapping_add(layout.tail_offset())
            } else {
                base
            };

            // SAFETY: the buffer described by the untampered layout is ours.
            unsafe { crate::canary::write_word(target, value) };
        });
    }

    /// Stores `value` in slot `index` without touching size or checksums.
    ///
    /// `index` must be below the real capacity.
    pub fn write_slot(&mut self, index: usize, value: T) {
        self.with_block(|block| {
            assert!(index < block.capacity, "slot {index} outside the buffer");
            // SAFETY: the slot lies inside the buffer owned by the stack.
            unsafe { block.write_slot(index, value) };
        });
    }

    /// XORs byte `byte` of slot `index` with `mask`.
    pub fn corrupt_slot_byte(&mut self, index: usize, byte: usize, mask: u8) {
        self.with_block(|block| {
            assert!(index < block.capacity, "slot {index} outside the buffer");
            assert!(byte < size_of::<T>(), "byte {byte} outside the slot");

            let target = block.data.wrapping_add(index).cast::<u8>().wrapping_add(byte);
            // SAFETY: the byte lies inside the buffer owned by the stack.
            unsafe { *target ^= mask };
        });
    }

    /// Recomputes both checksums over the current, possibly corrupted, state.
    ///
    /// Isolates the checks that do not depend on checksums.
    pub fn reseal(&mut self) {
        self.with_block(|block| {
            // SAFETY: callers only reseal while the buffer pointer is genuine.
            unsafe { block.seal() }
        });
    }
}
