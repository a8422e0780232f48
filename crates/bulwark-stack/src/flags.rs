// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use bitflags::bitflags;

bitflags! {
    /// Findings of an integrity check or operation.
    ///
    /// Flags accumulate; an empty set means no error.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ErrorFlags: u32 {
        /// Pop or peek on an empty stack.
        const EMPTY           = 0x001;
        /// Allocation failed while constructing or growing.
        const NO_MEMORY       = 0x002;
        /// `size` exceeds `capacity`.
        const CORRUPTED_SIZE  = 0x004;
        /// `capacity` is below the minimum or cannot describe a buffer.
        const CORRUPTED_CAP   = 0x008;
        /// A buffer canary is dead or the poison layout is violated.
        const CORRUPTED_DATA  = 0x010;
        /// A control-block canary is dead.
        const DEAD_CANARY     = 0x020;
        /// The control-block checksum does not match.
        const WRONG_HASH      = 0x040;
        /// The buffer checksum does not match.
        const WRONG_DATA_HASH = 0x080;
        /// The buffer is not readable.
        const BAD_DATA_PTR    = 0x100;
        /// The control block (or the handle wrapping it) is not readable or valid.
        const BAD_PTR         = 0x200;
    }
}

impl ErrorFlags {
    /// No error.
    pub const NO_ERROR: Self = Self::empty();

    /// Handle could not be resolved to a live control block.
    pub const HANDLE: Self = Self::BAD_PTR;

    /// Control-block inconsistencies.
    pub const STRUCTURAL: Self = Self::DEAD_CANARY
        .union(Self::WRONG_HASH)
        .union(Self::CORRUPTED_SIZE)
        .union(Self::CORRUPTED_CAP);

    /// Backing-buffer inconsistencies.
    pub const DATA: Self = Self::BAD_DATA_PTR
        .union(Self::WRONG_DATA_HASH)
        .union(Self::CORRUPTED_DATA);

    /// Failures of a well-formed stack.
    pub const OPERATION: Self = Self::EMPTY.union(Self::NO_MEMORY);

    /// Returns `true` if any handle, structural or data flag is set.
    pub const fn is_corruption(self) -> bool {
        self.intersects(Self::HANDLE.union(Self::STRUCTURAL).union(Self::DATA))
    }
}

impl core::fmt::Display for ErrorFlags {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.is_empty() {
            return f.write_str("NO_ERROR");
        }

        let mut first = true;
        for (name, _) in self.iter_names() {
            if !first {
                f.write_str(" | ")?;
            }
            f.write_str(name)?;
            first = false;
        }

        let unknown = self.bits() & !Self::all().bits();
        if unknown != 0 {
            if !first {
                f.write_str(" | ")?;
            }
            write!(f, "{unknown:#x}")?;
        }

        Ok(())
    }
}
