// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Declaration site of a stack, kept for diagnostics only.

use bulwark_util::can_read_range;

/// Where a stack was declared.
///
/// Usually captured with [`debug_info!`](crate::debug_info) or
/// [`stack!`](crate::stack).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DebugInfo {
    /// Variable or logical name.
    pub name: &'static str,
    /// Path of the declaring function.
    pub function: &'static str,
    /// Declaring source file.
    pub file: &'static str,
    /// Declaring line.
    pub line: u32,
}

impl DebugInfo {
    /// Creates debug info from its parts.
    pub const fn new(
        name: &'static str,
        function: &'static str,
        file: &'static str,
        line: u32,
    ) -> Self {
        Self {
            name,
            function,
            file,
            line,
        }
    }
}

/// Returns the type name of `value`; used to recover the enclosing function
/// path from a nested fn item.
#[doc(hidden)]
pub fn __type_name_of<T>(_: T) -> &'static str {
    core::any::type_name::<T>()
}

/// A `&'static str` stored as plain words so a corrupted control block can be
/// read without materializing an invalid reference.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub(crate) struct RawStr {
    ptr: *const u8,
    len: usize,
}

impl RawStr {
    pub(crate) const EMPTY: Self = Self {
        ptr: core::ptr::null(),
        len: 0,
    };

    pub(crate) const fn from_static(text: &'static str) -> Self {
        Self {
            ptr: text.as_ptr(),
            len: text.len(),
        }
    }

    pub(crate) fn words(&self) -> [usize; 2] {
        [self.ptr as usize, self.len]
    }

    /// Returns the string if its bytes are readable and valid UTF-8.
    pub(crate) fn read(&self) -> Option<&'static str> {
        if self.len == 0 {
            return Some("");
        }

        if !can_read_range(self.ptr, self.len) {
            return None;
        }

        // SAFETY: the range was probed readable; it originates from a
        // `&'static str` unless the block was corrupted, in which case the
        // UTF-8 check below rejects most garbage.
        let bytes = unsafe { core::slice::from_raw_parts(self.ptr, self.len) };
        core::str::from_utf8(bytes).ok()
    }
}

/// [`DebugInfo`] as stored inside the control block.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub(crate) struct RawDebugInfo {
    pub(crate) name: RawStr,
    pub(crate) function: RawStr,
    pub(crate) file: RawStr,
    pub(crate) line: u64,
}

impl RawDebugInfo {
    pub(crate) const EMPTY: Self = Self {
        name: RawStr::EMPTY,
        function: RawStr::EMPTY,
        file: RawStr::EMPTY,
        line: 0,
    };

    pub(crate) const fn from_info(info: &DebugInfo) -> Self {
        Self {
            name: RawStr::from_static(info.name),
            function: RawStr::from_static(info.function),
            file: RawStr::from_static(info.file),
            line: info.line as u64,
        }
    }

    /// Returns `true` if nothing was recorded.
    pub(crate) fn is_empty(&self) -> bool {
        [&self.name, &self.function, &self.file]
            .iter()
            .all(|raw| raw.words() == [0, 0])
            && self.line == 0
    }

    /// Returns the info if every string is still readable.
    pub(crate) fn read(&self) -> Option<DebugInfo> {
        Some(DebugInfo {
            name: self.name.read()?,
            function: self.function.read()?,
            file: self.file.read()?,
            line: u32::try_from(self.line).ok()?,
        })
    }
}
