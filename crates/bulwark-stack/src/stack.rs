// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Stack engine.

use std::alloc::{Layout, alloc, dealloc};
use std::ptr::NonNull;

use crate::block::Block;
use crate::capacity::{populate_buffer, release_buffer};
use crate::check;
use crate::config::{Protections, StackConfig};
use crate::debug_info::{DebugInfo, RawDebugInfo};
use crate::element::Element;
use crate::error::StackError;
use crate::flags::ErrorFlags;
use crate::layout::BufferLayout;

#[cfg(any(test, feature = "test-utils"))]
use crate::support::test_utils::StackBehaviour;

/// Growable LIFO stack verified before every operation.
///
/// The value itself is only a handle to a heap-allocated control block, so it
/// can be moved freely while the canaries stay bound to a stable address.
///
/// Dropping the stack destroys it: a stack that still passes its integrity
/// check has its buffer wiped and freed, a corrupted one has its buffer
/// leaked rather than handed back to the allocator.
pub struct Stack<T: Element> {
    block: Option<NonNull<Block<T>>>,
    #[cfg(any(test, feature = "test-utils"))]
    behaviour: StackBehaviour,
    #[cfg(any(test, feature = "test-utils"))]
    allocation_count: usize,
}

impl<T: Element> Stack<T> {
    /// Creates an empty stack with `config.min_capacity()` poisoned slots.
    ///
    /// # Errors
    ///
    /// `NO_MEMORY` if the control block or the buffer cannot be allocated.
    pub fn new(config: StackConfig) -> Result<Self, StackError> {
        Self::construct(config, RawDebugInfo::EMPTY)
    }

    /// Like [`Stack::new`], recording where the stack was declared.
    ///
    /// The info is dropped when [`Protections::DEBUG_INFO`] is disabled.
    ///
    /// # Errors
    ///
    /// `NO_MEMORY` if the control block or the buffer cannot be allocated.
    pub fn with_debug_info(config: StackConfig, info: DebugInfo) -> Result<Self, StackError> {
        let debug = if config.has(Protections::DEBUG_INFO) {
            RawDebugInfo::from_info(&info)
        } else {
            RawDebugInfo::EMPTY
        };

        Self::construct(config, debug)
    }

    /// Creates a stack whose allocations follow `behaviour`.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn with_behaviour(
        config: StackConfig,
        behaviour: StackBehaviour,
    ) -> Result<Self, StackError> {
        let mut stack = Self::unbuilt();
        stack.behaviour = behaviour;
        stack.build(config, RawDebugInfo::EMPTY)?;
        Ok(stack)
    }

    /// Changes the allocation behaviour for later operations.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn change_behaviour(&mut self, behaviour: StackBehaviour) {
        self.behaviour = behaviour;
        self.allocation_count = 0;
    }

    fn unbuilt() -> Self {
        Self {
            block: None,
            #[cfg(any(test, feature = "test-utils"))]
            behaviour: StackBehaviour::default(),
            #[cfg(any(test, feature = "test-utils"))]
            allocation_count: 0,
        }
    }

    fn construct(config: StackConfig, debug: RawDebugInfo) -> Result<Self, StackError> {
        let mut stack = Self::unbuilt();
        stack.build(config, debug)?;
        Ok(stack)
    }

    fn build(&mut self, config: StackConfig, debug: RawDebugInfo) -> Result<(), StackError> {
        let no_memory = StackError::new(ErrorFlags::NO_MEMORY);
        let capacity = config.min_capacity();
        let layout = BufferLayout::for_capacity::<T>(capacity).ok_or(no_memory)?;
        let base = self.allocate(layout.layout()).ok_or(no_memory)?;

        let block_layout = Layout::new::<Block<T>>();
        // SAFETY: `Block<T>` is never zero-sized.
        let raw = unsafe { alloc(block_layout) }.cast::<Block<T>>();
        let Some(block_ptr) = NonNull::new(raw) else {
            // SAFETY: `base` was just allocated with this layout and never used.
            unsafe { dealloc(base.as_ptr(), layout.layout()) };
            return Err(no_memory);
        };

        // SAFETY: `block_ptr` is a fresh allocation for exactly one block; the
        // buffer at `base` is a fresh allocation of `layout`.
        unsafe {
            block_ptr.as_ptr().write(Block::empty(&config, debug));

            let block = &mut *block_ptr.as_ptr();
            let canary_value = block.expected_canary();

            block.data = populate_buffer(
                base.as_ptr(),
                &layout,
                capacity,
                core::ptr::null(),
                0,
                canary_value,
            );
            block.capacity = capacity;
            block.write_control_canaries();
            block.seal();
        }

        self.block = Some(block_ptr);
        Ok(())
    }

    /// Allocates a buffer, honouring the injected behaviour under test.
    pub(crate) fn allocate(&mut self, layout: Layout) -> Option<NonNull<u8>> {
        #[cfg(any(test, feature = "test-utils"))]
        {
            self.allocation_count += 1;
            if self.behaviour.refuses(self.allocation_count) {
                return None;
            }
        }

        // SAFETY: buffer layouts always include both canary words.
        NonNull::new(unsafe { alloc(layout) })
    }

    pub(crate) fn block_ptr(&self) -> Option<NonNull<Block<T>>> {
        self.block
    }

    fn block(&self) -> Option<&Block<T>> {
        // SAFETY: the block is owned by `self` until `destroy` takes it.
        self.block.map(|ptr| unsafe { &*ptr.as_ptr() })
    }

    /// Runs the full integrity check.
    ///
    /// Returns every finding; an empty set means the stack is intact. A
    /// destroyed stack reports `BAD_PTR`.
    pub fn check(&self) -> ErrorFlags {
        match self.block {
            Some(ptr) => check::verify(ptr.as_ptr()),
            None => ErrorFlags::BAD_PTR,
        }
    }

    /// Returns the block if it passes the integrity check.
    fn verified(&self) -> Result<NonNull<Block<T>>, StackError> {
        let flags = self.check();

        match self.block {
            Some(ptr) if flags.is_empty() => Ok(ptr),
            _ => {
                tracing::warn!(
                    flags = %flags,
                    name = self.debug_name(),
                    "stack integrity check failed"
                );
                Err(StackError::new(flags))
            }
        }
    }

    fn debug_name(&self) -> &'static str {
        let Some(ptr) = self.block else {
            return "<destroyed>";
        };
        if !check::block_is_readable(ptr.as_ptr()) {
            return "<unreadable>";
        }

        // SAFETY: the block was probed readable.
        let block = unsafe { &*ptr.as_ptr() };
        block.debug.name.read().unwrap_or("<unreadable>")
    }

    /// Pushes `value` on top, growing the buffer if it is full.
    ///
    /// `value` must not be `T::POISON`.
    ///
    /// # Errors
    ///
    /// - Every integrity finding, with the stack left untouched.
    /// - `NO_MEMORY` if growth failed, with the stack left untouched.
    pub fn push(&mut self, value: T) -> Result<(), StackError> {
        let ptr = self.verified()?;
        // SAFETY: the block passed the integrity check and is owned by `self`.
        let block = unsafe { &mut *ptr.as_ptr() };

        self.ensure_pushable(block)?;

        // SAFETY: `size < capacity` after `ensure_pushable`; the buffer is ours.
        unsafe {
            block.write_slot(block.size, value);
            block.size += 1;
            block.seal();
        }

        Ok(())
    }

    /// Removes the top element and returns it.
    ///
    /// The vacated slot is poisoned and the buffer may shrink.
    ///
    /// # Errors
    ///
    /// - Every integrity finding, with the stack left untouched.
    /// - `EMPTY` if there is nothing to pop.
    pub fn pop(&mut self) -> Result<T, StackError> {
        let ptr = self.verified()?;
        // SAFETY: the block passed the integrity check and is owned by `self`.
        let block = unsafe { &mut *ptr.as_ptr() };

        if block.size == 0 {
            return Err(StackError::new(ErrorFlags::EMPTY));
        }

        block.size -= 1;
        // SAFETY: `size` indexes a live slot of the verified buffer.
        let value = unsafe {
            let value = block.read_slot(block.size);
            block.write_slot(block.size, T::POISON);
            value
        };

        self.try_shrink(block);

        // SAFETY: `data` points to `capacity` slots of the current buffer.
        unsafe { block.seal() };

        Ok(value)
    }

    /// Removes the top element without returning it.
    ///
    /// # Errors
    ///
    /// Same as [`Stack::pop`].
    pub fn pop_discard(&mut self) -> Result<(), StackError> {
        self.pop().map(drop)
    }

    /// Pops and returns the value together with the flags of the attempt.
    ///
    /// On failure the value is `T::POISON`, so callers that only look at the
    /// value still see a recognizable sentinel.
    pub fn pop_or_poison(&mut self) -> (T, ErrorFlags) {
        match self.pop() {
            Ok(value) => (value, ErrorFlags::NO_ERROR),
            Err(error) => (T::POISON, error.flags()),
        }
    }

    /// Borrows the top element.
    ///
    /// The borrow ends before the next mutation.
    ///
    /// # Errors
    ///
    /// - Every integrity finding.
    /// - `EMPTY` if the stack is empty.
    pub fn peek(&self) -> Result<&T, StackError> {
        let ptr = self.verified()?;
        // SAFETY: the block passed the integrity check and is owned by `self`.
        let block = unsafe { &*ptr.as_ptr() };

        if block.size == 0 {
            return Err(StackError::new(ErrorFlags::EMPTY));
        }

        // SAFETY: the verified buffer is aligned and slot `size - 1` is live;
        // it cannot change while `self` is borrowed.
        Ok(unsafe { &*block.data.add(block.size - 1) })
    }

    /// Returns a copy of the top element.
    ///
    /// # Errors
    ///
    /// Same as [`Stack::peek`].
    pub fn peek_copy(&self) -> Result<T, StackError> {
        self.peek().copied()
    }

    /// Verifies and tears the stack down.
    ///
    /// An intact buffer is wiped and freed. A buffer that failed any check is
    /// leaked and the flags are returned. The control block is wiped and
    /// freed in both cases. Destroying an already destroyed stack does
    /// nothing; every other operation on it reports `BAD_PTR`.
    ///
    /// # Errors
    ///
    /// Every integrity finding.
    pub fn destroy(&mut self) -> Result<(), StackError> {
        let Some(ptr) = self.block.take() else {
            return Ok(());
        };

        let flags = check::verify(ptr.as_ptr());

        if flags.contains(ErrorFlags::BAD_PTR) {
            tracing::warn!(flags = %flags, "stack destroyed with unreadable control block");
            return Err(StackError::new(flags));
        }

        // SAFETY: the control block is readable and owned by `self`.
        let block = unsafe { &mut *ptr.as_ptr() };

        if flags.is_empty() {
            // SAFETY: the buffer passed the integrity check.
            unsafe { release_buffer(block) };
        } else {
            tracing::warn!(
                flags = %flags,
                name = block.debug.name.read().unwrap_or("<unreadable>"),
                "stack destroyed while corrupted, leaking its buffer"
            );
        }

        // SAFETY: the block was allocated in `build` with this layout and no
        // reference to it survives.
        unsafe {
            ptr.as_ptr().cast::<u8>().write_bytes(0, size_of::<Block<T>>());
            dealloc(ptr.as_ptr().cast::<u8>(), Layout::new::<Block<T>>());
        }

        if flags.is_empty() {
            Ok(())
        } else {
            Err(StackError::new(flags))
        }
    }

    /// Returns `true` once [`Stack::destroy`] ran.
    pub fn is_destroyed(&self) -> bool {
        self.block.is_none()
    }

    /// Number of stored elements, as recorded (not verified).
    pub fn len(&self) -> usize {
        self.block().map_or(0, |block| block.size)
    }

    /// Returns `true` if the stack holds no element.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of slots in the current buffer, as recorded (not verified).
    pub fn capacity(&self) -> usize {
        self.block().map_or(0, |block| block.capacity)
    }

    /// Number of grow and shrink reallocations so far.
    pub fn reallocations(&self) -> u64 {
        self.block().map_or(0, |block| block.reallocations)
    }

    /// Configuration the stack was built with, `None` once destroyed.
    pub fn config(&self) -> Option<StackConfig> {
        self.block().map(Block::config)
    }

    /// Declaration site, if recorded and still readable.
    pub fn debug_info(&self) -> Option<DebugInfo> {
        let block = self.block()?;

        if !block.has(Protections::DEBUG_INFO) || block.debug.name.words()[0] == 0 {
            return None;
        }

        block.debug.read()
    }
}

impl<T: Element> Drop for Stack<T> {
    fn drop(&mut self) {
        let _ = self.destroy();
    }
}

impl<T: Element> core::fmt::Debug for Stack<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Stack")
            .field("element", &core::any::type_name::<T>())
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .field("destroyed", &self.is_destroyed())
            .finish()
    }
}
