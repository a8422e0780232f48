// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Writers for inspecting journal output in tests.

mod failing_writer;
mod shared_buffer;

pub use failing_writer::FailingWriter;
pub use shared_buffer::SharedBuffer;
