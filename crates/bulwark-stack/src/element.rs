// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Element policy: value type, poison marker and display routine.

use core::fmt::Display;

/// A value that can be stored in a [`Stack`](crate::Stack).
///
/// `POISON` marks an empty slot. Storing a value equal to `POISON` is a caller
/// contract violation: the stack does not reject it, and the next integrity
/// check will report the slot as `CORRUPTED_DATA`.
///
/// # Safety
///
/// The buffer is checksummed and scanned as raw bytes, and slots are read back
/// after arbitrary corruption. Implementors must guarantee that:
///
/// - the type is not zero-sized,
/// - the type has no padding bytes,
/// - every bit pattern of `size_of::<Self>()` bytes is a valid value.
pub unsafe trait Element: Copy + PartialEq + Display + 'static {
    /// Marker stored in every slot at or above `len()`.
    const POISON: Self;

    /// Returns `true` if `self` is the poison marker.
    #[inline]
    fn is_poison(&self) -> bool {
        *self == Self::POISON
    }
}

macro_rules! impl_element_signed {
    ($($ty:ty),* $(,)?) => {
        $(
            // SAFETY: primitive integer, no padding, every bit pattern valid.
            unsafe impl Element for $ty {
                const POISON: Self = <$ty>::MIN;
            }
        )*
    };
}

macro_rules! impl_element_unsigned {
    ($($ty:ty),* $(,)?) => {
        $(
            // SAFETY: primitive integer, no padding, every bit pattern valid.
            unsafe impl Element for $ty {
                const POISON: Self = <$ty>::MAX;
            }
        )*
    };
}

impl_element_signed!(i8, i16, i32, i64, i128, isize);
impl_element_unsigned!(u8, u16, u32, u64, u128, usize);

// Floats compare poison by bits: the marker is a NaN, and NaN != NaN.

// SAFETY: primitive float, no padding, every bit pattern valid.
unsafe impl Element for f32 {
    const POISON: Self = f32::from_bits(0x7FA0_0BAD);

    #[inline]
    fn is_poison(&self) -> bool {
        self.to_bits() == Self::POISON.to_bits()
    }
}

// SAFETY: primitive float, no padding, every bit pattern valid.
unsafe impl Element for f64 {
    const POISON: Self = f64::from_bits(0x7FF4_0000_0000_0BAD);

    #[inline]
    fn is_poison(&self) -> bool {
        self.to_bits() == Self::POISON.to_bits()
    }
}
