// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::{Level, LevelFilter};

const ALL_LEVELS: [Level; 5] = [
    Level::Trace,
    Level::Info,
    Level::Warning,
    Level::Error,
    Level::Fatal,
];

#[test]
fn test_levels_are_ordered() {
    assert!(Level::Trace < Level::Info);
    assert!(Level::Info < Level::Warning);
    assert!(Level::Warning < Level::Error);
    assert!(Level::Error < Level::Fatal);
}

#[test]
fn test_filter_all_allows_everything() {
    assert!(ALL_LEVELS.iter().all(|level| LevelFilter::All.allows(*level)));
}

#[test]
fn test_filter_off_allows_nothing() {
    assert!(!ALL_LEVELS.iter().any(|level| LevelFilter::Off.allows(*level)));
}

#[test]
fn test_filter_warning_threshold() {
    assert!(!LevelFilter::Warning.allows(Level::Trace));
    assert!(!LevelFilter::Warning.allows(Level::Info));
    assert!(LevelFilter::Warning.allows(Level::Warning));
    assert!(LevelFilter::Warning.allows(Level::Error));
    assert!(LevelFilter::Warning.allows(Level::Fatal));
}

#[test]
fn test_filter_fatal_only() {
    assert!(!LevelFilter::Fatal.allows(Level::Error));
    assert!(LevelFilter::Fatal.allows(Level::Fatal));
}

#[test]
fn test_display_matches_tag() {
    assert_eq!(Level::Warning.to_string(), "WARNING");
    assert_eq!(Level::Fatal.as_str(), "FATAL");
}
