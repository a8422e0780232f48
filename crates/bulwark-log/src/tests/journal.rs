// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::io::Write;

use crate::test_utils::{FailingWriter, SharedBuffer};
use crate::{Journal, Level, LevelFilter, LogError, MAX_SINKS, Sink, SinkFlags};
use crate::{log_error, log_fatal, log_info, log_trace, log_warning};

// =============================================================================
// add_sink()
// =============================================================================

#[test]
fn test_add_sink_counts() {
    let mut journal = Journal::new();

    journal
        .add_sink(Sink::new("a", SharedBuffer::new()))
        .expect("Failed to add_sink(..)");
    journal
        .add_sink(Sink::new("b", SharedBuffer::new()))
        .expect("Failed to add_sink(..)");

    assert_eq!(journal.sink_count(), 2);
}

#[test]
fn test_add_sink_rejects_beyond_max() {
    let mut journal = Journal::new();

    for i in 0..MAX_SINKS {
        journal
            .add_sink(Sink::new(format!("sink-{i}"), SharedBuffer::new()))
            .expect("Failed to add_sink(..)");
    }

    let result = journal.add_sink(Sink::new("overflow", SharedBuffer::new()));

    assert!(matches!(result, Err(LogError::TooManySinks { max: MAX_SINKS })));
    assert_eq!(journal.sink_count(), MAX_SINKS);
}

#[test]
fn test_add_html_sink_with_failing_stream_is_rejected() {
    let mut journal = Journal::new();

    let result = journal.add_sink(Sink::new("broken", FailingWriter).with_flags(SinkFlags::USE_HTML));

    assert!(matches!(result, Err(LogError::Io(_))));
    assert_eq!(journal.sink_count(), 0);
}

#[test]
fn test_add_file_sink_writes_file() {
    let path = std::env::temp_dir().join(format!("bulwark-log-{}.log", std::process::id()));

    let mut journal = Journal::new();
    journal.add_file_sink(&path).expect("Failed to add_file_sink(..)");
    log_trace!(journal, "trace reaches files");
    journal.shutdown();

    let contents = std::fs::read_to_string(&path).expect("Failed to read_to_string(..)");
    let _ = std::fs::remove_file(&path);

    assert_eq!(contents, "[TRACE] trace reaches files\n");
}

#[test]
fn test_add_file_sink_reports_io_error() {
    let mut journal = Journal::new();

    let result = journal.add_file_sink("/nonexistent-bulwark-dir/sub/out.log");

    assert!(matches!(result, Err(LogError::Io(_))));
}

// =============================================================================
// log()
// =============================================================================

#[test]
fn test_log_respects_per_sink_filter() {
    let verbose = SharedBuffer::new();
    let quiet = SharedBuffer::new();
    let mut journal = Journal::new();

    journal
        .add_sink(Sink::new("verbose", verbose.clone()))
        .expect("Failed to add_sink(..)");
    journal
        .add_sink(Sink::new("quiet", quiet.clone()).with_filter(LevelFilter::Error))
        .expect("Failed to add_sink(..)");

    log_info!(journal, "info");
    log_error!(journal, "error");

    assert_eq!(verbose.contents(), "[INFO] info\n[ERROR] error\n");
    assert_eq!(quiet.contents(), "[ERROR] error\n");
}

#[test]
fn test_log_off_filter_writes_nothing() {
    let buffer = SharedBuffer::new();
    let mut journal = Journal::new();

    journal
        .add_sink(Sink::new("off", buffer.clone()).with_filter(LevelFilter::Off))
        .expect("Failed to add_sink(..)");

    log_fatal!(journal, "fatal");

    assert!(buffer.is_empty());
}

#[test]
fn test_failing_sink_does_not_block_others() {
    let buffer = SharedBuffer::new();
    let mut journal = Journal::new();

    journal
        .add_sink(Sink::new("broken", FailingWriter))
        .expect("Failed to add_sink(..)");
    journal
        .add_sink(Sink::new("healthy", buffer.clone()))
        .expect("Failed to add_sink(..)");

    log_warning!(journal, "still delivered");

    assert_eq!(buffer.contents(), "[WARNING] still delivered\n");
    assert_eq!(journal.write_failures(), 1);
}

#[test]
fn test_log_without_sinks_is_noop() {
    let mut journal = Journal::new();

    journal.log(Level::Fatal, format_args!("nobody listens"));

    assert_eq!(journal.write_failures(), 0);
}

// =============================================================================
// pause() / resume()
// =============================================================================

#[test]
fn test_pause_suppresses_all_but_log_always() {
    let regular = SharedBuffer::new();
    let always = SharedBuffer::new();
    let mut journal = Journal::new();

    journal
        .add_sink(Sink::new("regular", regular.clone()))
        .expect("Failed to add_sink(..)");
    journal
        .add_sink(Sink::new("always", always.clone()).with_flags(SinkFlags::LOG_ALWAYS))
        .expect("Failed to add_sink(..)");

    journal.pause();
    log_info!(journal, "while paused");

    assert!(regular.is_empty());
    assert_eq!(always.contents(), "[INFO] while paused\n");
}

#[test]
fn test_pause_and_resume_are_idempotent() {
    let buffer = SharedBuffer::new();
    let mut journal = Journal::new();

    journal
        .add_sink(Sink::new("regular", buffer.clone()))
        .expect("Failed to add_sink(..)");

    journal.pause();
    journal.pause();
    assert!(journal.is_paused());

    journal.resume();
    journal.resume();
    assert!(!journal.is_paused());

    log_info!(journal, "resumed");

    assert_eq!(buffer.contents(), "[INFO] resumed\n");
}

// =============================================================================
// shutdown()
// =============================================================================

#[test]
fn test_shutdown_returns_keep_open_sinks_only() {
    let mut journal = Journal::new();

    journal
        .add_sink(Sink::new("owned", SharedBuffer::new()))
        .expect("Failed to add_sink(..)");
    journal
        .add_sink(Sink::new("kept", SharedBuffer::new()).with_flags(SinkFlags::KEEP_OPEN))
        .expect("Failed to add_sink(..)");

    let kept = journal.shutdown();

    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].name(), "kept");
    assert_eq!(journal.sink_count(), 0);
}

#[test]
fn test_shutdown_resets_pause_and_allows_reuse() {
    let buffer = SharedBuffer::new();
    let mut journal = Journal::new();

    journal.pause();
    let _ = journal.shutdown();
    assert!(!journal.is_paused());

    journal
        .add_sink(Sink::new("again", buffer.clone()))
        .expect("Failed to add_sink(..)");
    log_info!(journal, "reused");

    assert_eq!(buffer.contents(), "[INFO] reused\n");
}

#[test]
fn test_shutdown_counts_failing_flush() {
    let mut journal = Journal::new();

    journal
        .add_sink(Sink::new("broken", FailingWriter))
        .expect("Failed to add_sink(..)");

    let _ = journal.shutdown();

    assert_eq!(journal.write_failures(), 1);
}

#[test]
fn test_kept_sink_stream_is_still_usable() {
    let buffer = SharedBuffer::new();
    let mut journal = Journal::new();

    journal
        .add_sink(Sink::new("kept", buffer.clone()).with_flags(SinkFlags::KEEP_OPEN))
        .expect("Failed to add_sink(..)");

    let mut kept = journal.shutdown();
    let mut stream = kept.remove(0).into_stream();
    stream.write_all(b"after").expect("Failed to write_all(..)");

    assert_eq!(buffer.contents(), "after");
}
