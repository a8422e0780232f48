// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

#[cfg(test)]
mod can_read_tests {
    use bulwark_util::can_read;

    #[test]
    fn test_null_is_unreadable() {
        assert!(!can_read(core::ptr::null()));
    }

    #[test]
    fn test_stack_value_is_readable() {
        let value = 7u32;

        assert!(can_read(&value as *const u32 as *const u8));
    }

    #[test]
    fn test_heap_value_is_readable() {
        let boxed = Box::new([1u8; 32]);

        assert!(can_read(boxed.as_ptr()));
        assert!(can_read(boxed.as_ptr().wrapping_add(31)));
    }

    #[cfg(unix)]
    #[test]
    fn test_low_address_is_unreadable() {
        assert!(!can_read(1 as *const u8));
        assert!(!can_read(0x10 as *const u8));
    }

    #[cfg(unix)]
    #[test]
    fn test_wild_high_address_is_unreadable() {
        assert!(!can_read(usize::MAX as *const u8));
    }

    #[cfg(unix)]
    #[test]
    fn test_probe_does_not_leak_descriptors() {
        let value = 1u8;

        // Thousands of probes would exhaust a default descriptor limit if the
        // pipe were left open.
        for _ in 0..4096 {
            assert!(can_read(&value));
        }
    }
}

#[cfg(unix)]
mod mapped_pages {
    use bulwark_util::{can_read, page_size};

    fn map_page(prot: libc::c_int) -> *mut u8 {
        let ptr = unsafe {
            libc::mmap(
                core::ptr::null_mut(),
                page_size(),
                prot,
                libc::MAP_PRIVATE | libc::MAP_ANONYMOUS,
                -1,
                0,
            )
        };
        assert_ne!(ptr, libc::MAP_FAILED, "Failed to mmap(..)");

        ptr.cast()
    }

    #[test]
    fn test_readable_page() {
        let page = map_page(libc::PROT_READ);

        assert!(can_read(page));
        assert!(can_read(page.wrapping_add(page_size() - 1)));

        unsafe { libc::munmap(page.cast(), page_size()) };
    }

    #[test]
    fn test_prot_none_page_is_unreadable() {
        let page = map_page(libc::PROT_NONE);

        assert!(!can_read(page));

        unsafe { libc::munmap(page.cast(), page_size()) };
    }

    #[test]
    fn test_unmapped_page_is_unreadable() {
        let page = map_page(libc::PROT_READ | libc::PROT_WRITE);
        unsafe { libc::munmap(page.cast(), page_size()) };

        assert!(!can_read(page));
    }
}
