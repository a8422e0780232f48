// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Control block.
//!
//! Lives on the heap for its whole life so its address can be bound into the
//! canaries and probed like any other represented address. Every field is a
//! plain integer or pointer: any bit pattern written over it by foreign code
//! can still be read back and judged.

use bulwark_util::Hasher;

use crate::canary;
use crate::config::{Protections, StackConfig};
use crate::debug_info::RawDebugInfo;
use crate::element::Element;
use crate::layout::BufferLayout;

#[repr(C)]
pub(crate) struct Block<T: Element> {
    pub(crate) canary_start: u64,
    pub(crate) data: *mut T,
    pub(crate) size: usize,
    pub(crate) capacity: usize,
    pub(crate) reallocations: u64,
    pub(crate) min_capacity: usize,
    pub(crate) growth_factor_bits: u64,
    pub(crate) protections: u8,
    pub(crate) debug: RawDebugInfo,
    pub(crate) data_hash: u64,
    pub(crate) structural_hash: u64,
    pub(crate) canary_end: u64,
}

impl<T: Element> Block<T> {
    /// A block with no buffer yet. Canaries and hashes are unset.
    pub(crate) fn empty(config: &StackConfig, debug: RawDebugInfo) -> Self {
        Self {
            canary_start: 0,
            data: core::ptr::null_mut(),
            size: 0,
            capacity: 0,
            reallocations: 0,
            min_capacity: config.min_capacity(),
            growth_factor_bits: config.growth_factor().to_bits(),
            protections: config.protections().bits(),
            debug,
            data_hash: 0,
            structural_hash: 0,
            canary_end: 0,
        }
    }

    #[inline]
    pub(crate) fn address(&self) -> usize {
        self as *const Self as usize
    }

    #[inline]
    pub(crate) fn protections(&self) -> Protections {
        Protections::from_bits_retain(self.protections)
    }

    #[inline]
    pub(crate) fn has(&self, protection: Protections) -> bool {
        self.protections().contains(protection)
    }

    #[inline]
    pub(crate) fn growth_factor(&self) -> f64 {
        f64::from_bits(self.growth_factor_bits)
    }

    /// Configuration as currently recorded in the block.
    pub(crate) fn config(&self) -> StackConfig {
        StackConfig::from_block_parts(self.min_capacity, self.growth_factor(), self.protections())
    }

    #[inline]
    pub(crate) fn expected_canary(&self) -> u64 {
        canary::expected(self.address(), self.protections())
    }

    #[inline]
    pub(crate) fn layout(&self) -> Option<BufferLayout> {
        BufferLayout::for_capacity::<T>(self.capacity)
    }

    pub(crate) fn write_control_canaries(&mut self) {
        let expected = self.expected_canary();
        self.canary_start = expected;
        self.canary_end = expected;
    }

    /// Checksum of every field except `structural_hash`.
    pub(crate) fn compute_structural_hash(&self) -> u64 {
        let mut hasher = Hasher::new();

        hasher
            .update_u64(self.canary_start)
            .update_usize(self.data as usize)
            .update_usize(self.size)
            .update_usize(self.capacity)
            .update_u64(self.reallocations)
            .update_usize(self.min_capacity)
            .update_u64(self.growth_factor_bits)
            .update(&[self.protections]);

        for raw in [&self.debug.name, &self.debug.function, &self.debug.file] {
            let [ptr, len] = raw.words();
            hasher.update_usize(ptr).update_usize(len);
        }

        hasher
            .update_u64(self.debug.line)
            .update_u64(self.data_hash)
            .update_u64(self.canary_end)
            .finish()
    }

    /// Checksum of the raw bytes of slots `[0, capacity)`.
    ///
    /// # Safety
    ///
    /// `data` must point to `capacity` readable slots.
    pub(crate) unsafe fn compute_data_hash(&self, layout: &BufferLayout) -> u64 {
        // SAFETY: guaranteed by the caller; `Element` types have no padding.
        let bytes = unsafe { core::slice::from_raw_parts(self.data.cast::<u8>(), layout.slots_len()) };
        bulwark_util::hash_bytes(bytes)
    }

    /// Recomputes both checksums after a legitimate mutation.
    ///
    /// The data hash is part of the structural hash, so it goes first.
    ///
    /// # Safety
    ///
    /// `data` must point to `capacity` readable slots.
    pub(crate) unsafe fn seal(&mut self) {
        if !self.has(Protections::HASH) {
            self.data_hash = 0;
            self.structural_hash = 0;
            return;
        }

        self.data_hash = match self.layout() {
            // SAFETY: guaranteed by the caller.
            Some(layout) => unsafe { self.compute_data_hash(&layout) },
            None => 0,
        };
        self.structural_hash = self.compute_structural_hash();
    }

    /// Reads slot `index` without assuming alignment.
    ///
    /// # Safety
    ///
    /// Slot `index` must be inside a readable buffer.
    #[inline]
    pub(crate) unsafe fn read_slot(&self, index: usize) -> T {
        // SAFETY: guaranteed by the caller; any bit pattern is a valid `T`.
        unsafe { self.data.wrapping_add(index).read_unaligned() }
    }

    /// # Safety
    ///
    /// Slot `index` must be inside a writable buffer.
    #[inline]
    pub(crate) unsafe fn write_slot(&mut self, index: usize, value: T) {
        // SAFETY: guaranteed by the caller.
        unsafe { self.data.wrapping_add(index).write_unaligned(value) }
    }
}
