// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Journal - registry of sinks with pause/resume and explicit shutdown.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::error::LogError;
use crate::level::{Level, LevelFilter};
use crate::sink::{Sink, SinkFlags};

/// Maximum number of sinks a journal accepts.
pub const MAX_SINKS: usize = 16;

/// Registry of output sinks.
///
/// Messages are formatted once and written to every sink whose filter accepts
/// the level. A failing sink never prevents the others from being written;
/// failures are counted in [`Journal::write_failures`].
///
/// Dropping the journal runs [`Journal::shutdown`].
#[derive(Debug, Default)]
pub struct Journal {
    sinks: Vec<Sink>,
    paused: bool,
    write_failures: usize,
}

impl Journal {
    /// Creates a journal with no sinks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `sink`.
    ///
    /// HTML sinks get their document header written here.
    ///
    /// # Errors
    ///
    /// - [`LogError::TooManySinks`] if [`MAX_SINKS`] sinks are registered.
    /// - [`LogError::Io`] if the HTML header cannot be written; the sink is
    ///   not registered.
    pub fn add_sink(&mut self, mut sink: Sink) -> Result<(), LogError> {
        if self.sinks.len() >= MAX_SINKS {
            return Err(LogError::TooManySinks { max: MAX_SINKS });
        }

        sink.write_header()?;
        self.sinks.push(sink);

        Ok(())
    }

    /// Registers a coloured `stdout` sink accepting [`Level::Info`] and above.
    pub fn add_console_sink(&mut self) -> Result<(), LogError> {
        self.add_sink(
            Sink::new("console", std::io::stdout())
                .with_filter(LevelFilter::Info)
                .with_flags(SinkFlags::USE_ESCAPE | SinkFlags::KEEP_OPEN),
        )
    }

    /// Creates (truncating) the file at `path` and registers it as a sink
    /// accepting every level.
    pub fn add_file_sink(&mut self, path: impl AsRef<Path>) -> Result<(), LogError> {
        let path = path.as_ref();
        let file = File::create(path)?;

        self.add_sink(Sink::new(path.display().to_string(), BufWriter::new(file)))
    }

    /// Writes a message at `level` to every accepting sink.
    pub fn log(&mut self, level: Level, args: core::fmt::Arguments<'_>) {
        let paused = self.paused;

        if !self.sinks.iter().any(|sink| sink.accepts(level, paused)) {
            return;
        }

        let message = args.to_string();

        for sink in self.sinks.iter_mut().filter(|sink| sink.accepts(level, paused)) {
            if sink.write_record(level, &message).is_err() {
                self.write_failures += 1;
            }
        }
    }

    /// Suspends all sinks except those with [`SinkFlags::LOG_ALWAYS`].
    ///
    /// Idempotent.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Undoes [`Journal::pause`].
    ///
    /// Idempotent.
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Returns `true` while the journal is paused.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Number of registered sinks.
    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    /// Number of record, footer or flush writes that failed so far.
    pub fn write_failures(&self) -> usize {
        self.write_failures
    }

    /// Stops the journal.
    ///
    /// Writes HTML closers, flushes every sink, closes owned streams and
    /// returns the sinks flagged [`SinkFlags::KEEP_OPEN`] to the caller.
    /// The journal is empty (and unpaused) afterwards and may be reused.
    pub fn shutdown(&mut self) -> Vec<Sink> {
        let mut kept = Vec::new();

        for mut sink in self.sinks.drain(..) {
            if sink.write_footer().is_err() {
                self.write_failures += 1;
            }

            if sink.keep_open() {
                kept.push(sink);
            }
        }

        self.paused = false;
        kept
    }
}

impl Drop for Journal {
    fn drop(&mut self) {
        let _ = self.shutdown();
    }
}
