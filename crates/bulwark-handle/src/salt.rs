// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Per-process handle salt.
//!
//! Drawn once from the OS entropy source and folded through the checksum.
//! Racing first callers agree on one value: a single thread draws it while
//! the others spin until it is published.

use core::sync::atomic::{AtomicU8, AtomicU64, Ordering};

use bulwark_util::Hasher;

/// Initialization state: not yet attempted
const STATE_UNINIT: u8 = 0;
/// Initialization state: in progress by another thread
const STATE_IN_PROGRESS: u8 = 1;
/// Initialization state: completed
const STATE_DONE: u8 = 2;

static INIT_STATE: AtomicU8 = AtomicU8::new(STATE_UNINIT);
static SALT: AtomicU64 = AtomicU64::new(0);

/// Returns the process-wide handle salt, drawing it on first use.
///
/// Never zero.
#[inline]
pub fn salt() -> u64 {
    // Fast path: already initialized
    if INIT_STATE.load(Ordering::Acquire) == STATE_DONE {
        return SALT.load(Ordering::Relaxed);
    }

    init_slow();
    salt()
}

#[cold]
#[inline(never)]
fn init_slow() {
    match INIT_STATE.compare_exchange(
        STATE_UNINIT,
        STATE_IN_PROGRESS,
        Ordering::Acquire,
        Ordering::Relaxed,
    ) {
        Ok(_) => {
            SALT.store(draw_salt(), Ordering::Relaxed);
            INIT_STATE.store(STATE_DONE, Ordering::Release);
        }
        Err(_) => {
            while INIT_STATE.load(Ordering::Acquire) != STATE_DONE {
                core::hint::spin_loop();
            }
        }
    }
}

fn draw_salt() -> u64 {
    let mut entropy = [0u8; 8];

    if let Err(error) = getrandom::fill(&mut entropy) {
        tracing::warn!(%error, "entropy source unavailable, deriving handle salt from process state");
        entropy = fallback_entropy();
    }

    fold(&entropy)
}

fn fallback_entropy() -> [u8; 8] {
    let anchor = &SALT as *const AtomicU64 as u64;
    let pid = u64::from(std::process::id());

    (anchor.rotate_left(17) ^ pid).to_le_bytes()
}

/// Folds raw entropy into a non-zero salt.
pub(crate) fn fold(entropy: &[u8; 8]) -> u64 {
    let mut hasher = Hasher::new();
    let folded = hasher.update(entropy).finish();

    if folded == 0 { bulwark_stack::CANARY } else { folded }
}

#[cfg(test)]
pub(crate) fn fallback_for_tests() -> u64 {
    fold(&fallback_entropy())
}
