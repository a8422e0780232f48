// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Readability probe.
//!
//! The kernel is asked to copy one byte from the candidate address into a
//! private pipe. If the address is not backed by readable memory the syscall
//! fails with `EFAULT` instead of faulting the process, so no signal handler
//! is involved and the probe is safe to call from anywhere.
//!
//! Protection is page-granular, so a range is probed once per page it touches.

use core::sync::atomic::{AtomicUsize, Ordering};

/// Fallback when `sysconf(_SC_PAGESIZE)` is unavailable.
const DEFAULT_PAGE_SIZE: usize = 4096;

static PAGE_SIZE: AtomicUsize = AtomicUsize::new(0);

/// Returns the system page size (cached after the first call).
pub fn page_size() -> usize {
    let cached = PAGE_SIZE.load(Ordering::Relaxed);
    if cached != 0 {
        return cached;
    }

    let size = query_page_size();
    PAGE_SIZE.store(size, Ordering::Relaxed);
    size
}

#[cfg(unix)]
fn query_page_size() -> usize {
    let size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };

    if size > 0 {
        size as usize
    } else {
        DEFAULT_PAGE_SIZE
    }
}

#[cfg(not(unix))]
fn query_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

/// Returns `true` if the byte at `ptr` can be read.
///
/// Returns `false` for null without touching memory. Never dereferences
/// `ptr` itself, so wild, unmapped, or `PROT_NONE` addresses are reported
/// instead of crashing the process.
///
/// If the probe pipe cannot be created (e.g. file descriptors are exhausted)
/// the address is reported unreadable.
///
/// On non-Unix targets only the null check is performed.
#[cfg(unix)]
pub fn can_read(ptr: *const u8) -> bool {
    if ptr.is_null() {
        return false;
    }

    let mut fds: [libc::c_int; 2] = [-1, -1];
    if unsafe { libc::pipe(fds.as_mut_ptr()) } != 0 {
        return false;
    }
    let [read_fd, write_fd] = fds;

    // The kernel validates the source address; a bad one yields EFAULT.
    let written = unsafe { libc::write(write_fd, ptr.cast(), 1) };

    if written == 1 {
        let mut drained = 0u8;
        unsafe {
            libc::read(read_fd, (&mut drained as *mut u8).cast(), 1);
        }
    }

    unsafe {
        libc::close(read_fd);
        libc::close(write_fd);
    }

    written == 1
}

/// Returns `true` if the byte at `ptr` can be read.
///
/// Without a probing syscall only null is rejected.
#[cfg(not(unix))]
pub fn can_read(ptr: *const u8) -> bool {
    !ptr.is_null()
}

/// Returns `true` if every byte in `[ptr, ptr + len)` can be read.
///
/// Probes the first byte, one byte in every page the range crosses, and the
/// last byte. A zero-length range only requires `ptr` to be non-null. A range
/// that would wrap the address space is unreadable.
pub fn can_read_range(ptr: *const u8, len: usize) -> bool {
    if ptr.is_null() {
        return false;
    }

    if len == 0 {
        return true;
    }

    let start = ptr as usize;
    let Some(last) = start.checked_add(len - 1) else {
        return false;
    };

    if !can_read(ptr) {
        return false;
    }

    let page = page_size();
    let mut page_start = (start / page + 1).checked_mul(page);

    while let Some(boundary) = page_start.filter(|boundary| *boundary <= last) {
        if !can_read(ptr.wrapping_add(boundary - start)) {
            return false;
        }

        page_start = boundary.checked_add(page);
    }

    can_read(ptr.wrapping_add(last - start))
}
