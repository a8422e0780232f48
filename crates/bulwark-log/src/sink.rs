// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::io::{self, Write};

use bitflags::bitflags;

use crate::level::{Level, LevelFilter};

bitflags! {
    /// Per-sink output settings.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SinkFlags: u32 {
        /// Colour level tags with ANSI escape sequences.
        const USE_ESCAPE = 0b0001;
        /// Wrap output in an HTML document. Ignored if `USE_ESCAPE` is set.
        const USE_HTML   = 0b0010;
        /// Keep writing while the journal is paused.
        const LOG_ALWAYS = 0b0100;
        /// Return the stream from `Journal::shutdown` instead of closing it.
        const KEEP_OPEN  = 0b1000;
    }
}

/// A named output stream registered with a [`Journal`](crate::Journal).
pub struct Sink {
    name: String,
    stream: Box<dyn Write + Send>,
    filter: LevelFilter,
    flags: SinkFlags,
}

impl core::fmt::Debug for Sink {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Sink")
            .field("name", &self.name)
            .field("filter", &self.filter)
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}

impl Sink {
    /// Creates a sink that accepts every level and has no flags set.
    pub fn new(name: impl Into<String>, stream: impl Write + Send + 'static) -> Self {
        Self {
            name: name.into(),
            stream: Box::new(stream),
            filter: LevelFilter::All,
            flags: SinkFlags::empty(),
        }
    }

    /// Sets the minimum accepted level.
    pub fn with_filter(mut self, filter: LevelFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Sets the output flags.
    pub fn with_flags(mut self, flags: SinkFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Sink name (used as the HTML document title).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Minimum accepted level.
    pub fn filter(&self) -> LevelFilter {
        self.filter
    }

    /// Output flags.
    pub fn flags(&self) -> SinkFlags {
        self.flags
    }

    /// Consumes the sink and returns its stream.
    pub fn into_stream(self) -> Box<dyn Write + Send> {
        self.stream
    }

    pub(crate) fn accepts(&self, level: Level, paused: bool) -> bool {
        if paused && !self.flags.contains(SinkFlags::LOG_ALWAYS) {
            return false;
        }

        self.filter.allows(level)
    }

    pub(crate) fn keep_open(&self) -> bool {
        self.flags.contains(SinkFlags::KEEP_OPEN)
    }

    fn uses_escape(&self) -> bool {
        self.flags.contains(SinkFlags::USE_ESCAPE)
    }

    fn uses_html(&self) -> bool {
        self.flags.contains(SinkFlags::USE_HTML) && !self.uses_escape()
    }

    pub(crate) fn write_header(&mut self) -> io::Result<()> {
        if !self.uses_html() {
            return Ok(());
        }

        write!(
            self.stream,
            "<!DOCTYPE html>\n<html><head><title>{}</title></head>\n<body><pre>\n",
            escape_html(&self.name)
        )?;
        self.stream.flush()
    }

    pub(crate) fn write_footer(&mut self) -> io::Result<()> {
        if self.uses_html() {
            self.stream.write_all(b"</pre></body></html>\n")?;
        }

        self.stream.flush()
    }

    pub(crate) fn write_record(&mut self, level: Level, message: &str) -> io::Result<()> {
        if self.uses_escape() {
            writeln!(
                self.stream,
                "{}[{}]\x1b[0m {}",
                level.ansi_color(),
                level.as_str(),
                message
            )
        } else if self.uses_html() {
            writeln!(
                self.stream,
                "<span class=\"{}\">[{}] {}</span>",
                level.html_class(),
                level.as_str(),
                escape_html(message)
            )
        } else {
            writeln!(self.stream, "[{}] {}", level.as_str(), message)
        }
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());

    for ch in text.chars() {
        match ch {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '&' => escaped.push_str("&amp;"),
            other => escaped.push(other),
        }
    }

    escaped
}
