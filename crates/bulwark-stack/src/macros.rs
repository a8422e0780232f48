// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

/// Captures a [`DebugInfo`](crate::DebugInfo) for the call site.
///
/// ```rust
/// let info = bulwark_stack::debug_info!("numbers");
///
/// assert_eq!(info.name, "numbers");
/// assert!(info.function.ends_with("main"));
/// assert_eq!(info.file, file!());
/// ```
#[macro_export]
macro_rules! debug_info {
    ($name:expr) => {
        $crate::DebugInfo::new(
            $name,
            {
                fn __here() {}
                let path = $crate::__type_name_of(__here);
                path.strip_suffix("::__here").unwrap_or(path)
            },
            ::core::file!(),
            ::core::line!(),
        )
    };
}

/// Constructs a [`Stack`](crate::Stack) that remembers where it was declared.
///
/// `stack!(name)` uses the default configuration; `stack!(name, config)`
/// takes a [`StackConfig`](crate::StackConfig). Expands to a
/// `Result<Stack<T>, StackError>`.
///
/// ```rust
/// use bulwark_stack::{Stack, stack};
///
/// let stack: Stack<u32> = stack!("ids").expect("Failed to construct stack");
///
/// assert_eq!(stack.debug_info().map(|info| info.name), Some("ids"));
/// ```
#[macro_export]
macro_rules! stack {
    ($name:expr) => {
        $crate::stack!($name, $crate::StackConfig::default())
    };
    ($name:expr, $config:expr) => {
        $crate::Stack::with_debug_info($config, $crate::debug_info!($name))
    };
}
