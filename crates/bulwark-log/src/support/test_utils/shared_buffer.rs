// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// In-memory writer whose clones share one buffer.
///
/// Register a clone as a sink stream and read everything written through the
/// original.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns everything written so far as UTF-8 (lossy).
    pub fn contents(&self) -> String {
        let bytes = self.inner.lock().map(|bytes| bytes.clone()).unwrap_or_default();
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Returns `true` if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().map(|bytes| bytes.is_empty()).unwrap_or(true)
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut bytes = self
            .inner
            .lock()
            .map_err(|_| io::Error::other("shared buffer mutex poisoned"))?;
        bytes.extend_from_slice(buf);

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
