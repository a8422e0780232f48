// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Demo: push 65 integers, pop them in two batches, dump the stack after each
//! phase, then destroy it.
//!
//! ```text
//! stack-demo [LOG_FILE]
//! ```
//!
//! Dumps go to the console and, if given, to `LOG_FILE`. Engine events are
//! printed to stderr according to `RUST_LOG` (default `warn`).

use std::error::Error;

use bulwark::{ErrorFlags, Journal, Stack, StackError, abort_on_corruption, log::log_info, stack};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(numbers: &mut Stack<i32>, journal: &mut Journal) -> Result<(), StackError> {
    for value in 0..65 {
        numbers.push(value)?;
    }
    numbers.dump_checked(journal);

    for _ in 0..16 {
        numbers.pop_discard()?;
    }
    numbers.dump_checked(journal);

    for _ in 0..35 {
        numbers.pop_discard()?;
    }
    numbers.dump_checked(journal);

    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();

    let mut journal = Journal::new();
    journal.add_console_sink()?;
    if let Some(path) = std::env::args_os().nth(1) {
        journal.add_file_sink(path)?;
    }

    log_info!(journal, "Hello, stack!");

    let mut numbers: Stack<i32> = stack!("numbers")?;

    let flags = match run(&mut numbers, &mut journal) {
        Ok(()) => ErrorFlags::NO_ERROR,
        Err(error) => {
            tracing::error!(%error, "demo sequence stopped");
            error.flags()
        }
    };
    abort_on_corruption(&numbers, flags & !ErrorFlags::OPERATION, &mut journal);

    numbers.destroy()?;
    drop(journal.shutdown());

    Ok(())
}
