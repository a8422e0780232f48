// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::test_utils::SharedBuffer;
use crate::{Journal, Level, Sink, SinkFlags};

fn journal_with(flags: SinkFlags) -> (Journal, SharedBuffer) {
    let buffer = SharedBuffer::new();
    let mut journal = Journal::new();

    journal
        .add_sink(Sink::new("stack <dump>", buffer.clone()).with_flags(flags))
        .expect("Failed to add_sink(..)");

    (journal, buffer)
}

// =============================================================================
// plain
// =============================================================================

#[test]
fn test_plain_record_format() {
    let (mut journal, buffer) = journal_with(SinkFlags::empty());

    journal.log(Level::Error, format_args!("size {} > capacity {}", 17, 16));

    assert_eq!(buffer.contents(), "[ERROR] size 17 > capacity 16\n");
}

// =============================================================================
// USE_ESCAPE
// =============================================================================

#[test]
fn test_escape_colours_level_tag() {
    let (mut journal, buffer) = journal_with(SinkFlags::USE_ESCAPE);

    journal.log(Level::Info, format_args!("ok"));

    assert_eq!(buffer.contents(), "\x1b[32m[INFO]\x1b[0m ok\n");
}

#[test]
fn test_escape_takes_precedence_over_html() {
    let (mut journal, buffer) = journal_with(SinkFlags::USE_ESCAPE | SinkFlags::USE_HTML);

    journal.log(Level::Info, format_args!("ok"));
    journal.shutdown();

    let contents = buffer.contents();
    assert!(!contents.contains("<!DOCTYPE html>"));
    assert!(!contents.contains("</pre>"));
    assert!(contents.contains("\x1b[32m[INFO]"));
}

// =============================================================================
// USE_HTML
// =============================================================================

#[test]
fn test_html_header_written_on_registration() {
    let (_journal, buffer) = journal_with(SinkFlags::USE_HTML);

    let contents = buffer.contents();
    assert!(contents.starts_with("<!DOCTYPE html>"));
    assert!(contents.contains("<title>stack &lt;dump&gt;</title>"));
    assert!(contents.ends_with("<body><pre>\n"));
}

#[test]
fn test_html_record_is_escaped() {
    let (mut journal, buffer) = journal_with(SinkFlags::USE_HTML);

    journal.log(Level::Warning, format_args!("a < b && c > d"));

    assert!(buffer.contents().contains(
        "<span class=\"log-warning\">[WARNING] a &lt; b &amp;&amp; c &gt; d</span>\n"
    ));
}

#[test]
fn test_html_closer_written_on_shutdown() {
    let (mut journal, buffer) = journal_with(SinkFlags::USE_HTML);

    journal.shutdown();

    assert!(buffer.contents().ends_with("</pre></body></html>\n"));
}

#[test]
fn test_html_closer_written_on_drop() {
    let (journal, buffer) = journal_with(SinkFlags::USE_HTML);

    drop(journal);

    assert!(buffer.contents().ends_with("</pre></body></html>\n"));
}
