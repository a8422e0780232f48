// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::marker::PhantomData;
use std::alloc::{Layout, alloc, dealloc};

use bulwark_log::{Journal, Level, log_message};
use bulwark_stack::{CANARY, DebugInfo, Element, ErrorFlags, Stack, StackConfig, StackError};
use bulwark_util::can_read_range;

use crate::salt::salt;

#[repr(C)]
pub(crate) struct Wrapper<T: Element> {
    pub(crate) canary_start: u64,
    pub(crate) stack: Stack<T>,
    pub(crate) canary_end: u64,
}

#[inline]
pub(crate) fn wrapper_canary(salt: u64) -> u64 {
    CANARY ^ salt
}

fn bad_ptr() -> StackError {
    StackError::new(ErrorFlags::BAD_PTR)
}

/// Opaque reference to a heap-allocated [`Stack<T>`].
///
/// Handles are plain values: copying one does not duplicate the stack, and
/// every copy goes stale once [`StackHandle::destroy`] runs through any of
/// them. Using a stale or forged handle reports `BAD_PTR`.
///
/// Handles are bound to the thread that uses them and to the process that
/// created them.
pub struct StackHandle<T: Element> {
    raw: u64,
    _marker: PhantomData<*const T>,
}

impl<T: Element> Clone for StackHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Element> Copy for StackHandle<T> {}

impl<T: Element> PartialEq for StackHandle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<T: Element> Eq for StackHandle<T> {}

impl<T: Element> core::fmt::Debug for StackHandle<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "StackHandle({:#018x})", self.raw)
    }
}

impl<T: Element> StackHandle<T> {
    /// Creates a stack and returns its handle.
    ///
    /// # Errors
    ///
    /// `NO_MEMORY` if the stack or its wrapper cannot be allocated.
    pub fn create(config: StackConfig) -> Result<Self, StackError> {
        Self::wrap(Stack::new(config)?)
    }

    /// Like [`StackHandle::create`], recording where the stack was declared.
    ///
    /// # Errors
    ///
    /// `NO_MEMORY` if the stack or its wrapper cannot be allocated.
    pub fn create_with_debug_info(config: StackConfig, info: DebugInfo) -> Result<Self, StackError> {
        Self::wrap(Stack::with_debug_info(config, info)?)
    }

    fn wrap(stack: Stack<T>) -> Result<Self, StackError> {
        let salt = salt();
        let layout = Layout::new::<Wrapper<T>>();

        // SAFETY: `Wrapper<T>` is never zero-sized.
        let ptr = unsafe { alloc(layout) }.cast::<Wrapper<T>>();
        if ptr.is_null() {
            return Err(StackError::new(ErrorFlags::NO_MEMORY));
        }

        let canary = wrapper_canary(salt);
        // SAFETY: `ptr` is a fresh allocation for exactly one wrapper.
        unsafe {
            ptr.write(Wrapper {
                canary_start: canary,
                stack,
                canary_end: canary,
            });
        }

        Ok(Self::from_raw(ptr as usize as u64 ^ salt))
    }

    /// Rebuilds a handle from [`StackHandle::to_raw`].
    ///
    /// Any value is accepted; one that does not designate a live stack of
    /// this element type reports `BAD_PTR` on use.
    pub const fn from_raw(raw: u64) -> Self {
        Self {
            raw,
            _marker: PhantomData,
        }
    }

    /// Salted representation of the handle.
    pub const fn to_raw(self) -> u64 {
        self.raw
    }

    /// Decodes the handle into its wrapper, or `BAD_PTR`.
    pub(crate) fn resolve(self) -> Result<*mut Wrapper<T>, StackError> {
        let salt = salt();
        let address = usize::try_from(self.raw ^ salt).map_err(|_| bad_ptr())?;
        let ptr = address as *mut Wrapper<T>;

        if address % align_of::<Wrapper<T>>() != 0
            || !can_read_range(ptr.cast::<u8>(), size_of::<Wrapper<T>>())
        {
            return Err(bad_ptr());
        }

        let expected = wrapper_canary(salt);
        // SAFETY: the whole wrapper was probed readable and is aligned; the
        // canaries are plain words.
        let (start, end) = unsafe { ((*ptr).canary_start, (*ptr).canary_end) };

        if start != expected || end != expected {
            tracing::warn!(handle = self.raw, "stack handle does not resolve");
            return Err(bad_ptr());
        }

        Ok(ptr)
    }

    fn with_stack<R>(self, f: impl FnOnce(&mut Stack<T>) -> Result<R, StackError>) -> Result<R, StackError> {
        let ptr = self.resolve()?;
        // SAFETY: the wrapper resolved; handles are used from one thread and
        // no reference into it outlives this call.
        f(unsafe { &mut (*ptr).stack })
    }

    /// Pushes `value` onto the stack. See [`Stack::push`].
    ///
    /// # Errors
    ///
    /// `BAD_PTR` if the handle does not resolve, otherwise as [`Stack::push`].
    pub fn push(self, value: T) -> Result<(), StackError> {
        self.with_stack(|stack| stack.push(value))
    }

    /// Pops the top element. See [`Stack::pop`].
    ///
    /// # Errors
    ///
    /// `BAD_PTR` if the handle does not resolve, otherwise as [`Stack::pop`].
    pub fn pop(self) -> Result<T, StackError> {
        self.with_stack(Stack::pop)
    }

    /// Pops the top element and drops it.
    ///
    /// # Errors
    ///
    /// `BAD_PTR` if the handle does not resolve, otherwise as [`Stack::pop`].
    pub fn pop_discard(self) -> Result<(), StackError> {
        self.with_stack(Stack::pop_discard)
    }

    /// Copies the top element.
    ///
    /// # Errors
    ///
    /// `BAD_PTR` if the handle does not resolve, otherwise as [`Stack::peek`].
    pub fn peek_copy(self) -> Result<T, StackError> {
        self.with_stack(|stack| stack.peek_copy())
    }

    /// Number of stored elements.
    ///
    /// # Errors
    ///
    /// `BAD_PTR` if the handle does not resolve.
    pub fn len(self) -> Result<usize, StackError> {
        self.with_stack(|stack| Ok(stack.len()))
    }

    /// Returns `true` if the stack holds no element.
    ///
    /// # Errors
    ///
    /// `BAD_PTR` if the handle does not resolve.
    pub fn is_empty(self) -> Result<bool, StackError> {
        self.len().map(|len| len == 0)
    }

    /// Runs the full integrity check, `BAD_PTR` if the handle does not
    /// resolve.
    pub fn check(self) -> ErrorFlags {
        match self.resolve() {
            // SAFETY: the wrapper resolved.
            Ok(ptr) => unsafe { (*ptr).stack.check() },
            Err(error) => error.flags(),
        }
    }

    /// Dumps the stack. See [`Stack::dump`].
    pub fn dump(self, journal: &mut Journal, level: Level, flags: ErrorFlags) {
        match self.resolve() {
            // SAFETY: the wrapper resolved.
            Ok(ptr) => unsafe { (*ptr).stack.dump(journal, level, flags) },
            Err(error) => log_message!(
                journal,
                level,
                "StackHandle({:#018x}) does not resolve, flags: {}",
                self.raw,
                flags | error.flags()
            ),
        }
    }

    /// Verifies and tears the stack down, then frees the wrapper.
    ///
    /// The wrapper is wiped before being freed, so every copy of the handle
    /// stops resolving.
    ///
    /// # Errors
    ///
    /// `BAD_PTR` if the handle does not resolve, otherwise as
    /// [`Stack::destroy`].
    pub fn destroy(self) -> Result<(), StackError> {
        let ptr = self.resolve()?;

        // SAFETY: the wrapper resolved and was allocated by `wrap`; the stack
        // is moved out before its storage is wiped and never used in place.
        let mut stack = unsafe {
            let stack = core::ptr::addr_of!((*ptr).stack).read();
            ptr.cast::<u8>().write_bytes(0, size_of::<Wrapper<T>>());
            dealloc(ptr.cast::<u8>(), Layout::new::<Wrapper<T>>());
            stack
        };

        stack.destroy()
    }
}
