// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use super::utils::{config_protected_by, filled};
use crate::{CANARY, ErrorFlags, Protections, Stack};

// =============================================================================
// control canaries
// =============================================================================

#[test]
fn test_dead_canary_start() {
    let mut stack = filled(3);

    stack.tamper().set_canary_start(0);

    assert_eq!(stack.check(), ErrorFlags::DEAD_CANARY | ErrorFlags::WRONG_HASH);
}

#[test]
fn test_dead_canary_end_resealed() {
    let mut stack = filled(3);

    let mut tamper = stack.tamper();
    tamper.set_canary_end(CANARY);
    tamper.reseal();

    assert_eq!(stack.check(), ErrorFlags::DEAD_CANARY);
}

#[test]
fn test_canary_bound_to_block_address() {
    let mut stack = filled(1);

    let mut tamper = stack.tamper();
    let address = tamper.block_address() as u64;
    tamper.set_canary_start(CANARY ^ address);
    tamper.set_canary_end(CANARY ^ address);

    assert!(stack.check().is_empty());
}

#[test]
fn test_unbound_canary_is_plain_constant() {
    let mut stack: Stack<i32> =
        Stack::new(config_protected_by(Protections::CANARY)).expect("Failed to new()");

    stack.tamper().set_canary_start(CANARY);
    assert!(stack.check().is_empty());

    stack.tamper().set_canary_start(CANARY ^ 1);
    assert_eq!(stack.check(), ErrorFlags::DEAD_CANARY);
}

#[test]
fn test_disabled_protections_ignore_corruption() {
    let mut stack: Stack<i32> =
        Stack::new(config_protected_by(Protections::empty())).expect("Failed to new()");
    stack.push(1).expect("Failed to push(..)");

    let mut tamper = stack.tamper();
    tamper.set_canary_start(0);
    tamper.set_buffer_tail_canary(0);
    tamper.write_slot(0, 99);

    assert!(stack.check().is_empty());
}

// =============================================================================
// protection toggles
// =============================================================================

#[test]
fn test_cleared_protections_reported() {
    let mut stack = filled(1);

    let mut tamper = stack.tamper();
    tamper.set_protections(0);
    tamper.write_slot(0, 99);
    tamper.set_canary_start(0);

    let expected = ErrorFlags::DEAD_CANARY | ErrorFlags::CORRUPTED_DATA | ErrorFlags::WRONG_HASH;
    assert_eq!(stack.check(), expected);

    let error = stack.push(2).expect_err("Expected push(..) to fail");
    assert_eq!(error.flags(), expected);
    assert_eq!(stack.len(), 1);
}

#[test]
fn test_cleared_hash_toggle_reported() {
    let mut stack = filled(2);

    stack
        .tamper()
        .set_protections((Protections::all() - Protections::HASH).bits());

    assert_eq!(stack.check(), ErrorFlags::WRONG_HASH);
}

#[test]
fn test_cleared_bind_address_toggle_reported() {
    let mut stack = filled(2);

    stack
        .tamper()
        .set_protections((Protections::all() - Protections::BIND_ADDRESS).bits());

    assert_eq!(
        stack.check(),
        ErrorFlags::DEAD_CANARY | ErrorFlags::CORRUPTED_DATA | ErrorFlags::WRONG_HASH
    );
}

#[test]
fn test_raised_hash_toggle_reported() {
    let mut stack: Stack<i32> = Stack::new(config_protected_by(Protections::CANARY))
        .expect("Failed to new()");
    stack.push(1).expect("Failed to push(..)");

    stack
        .tamper()
        .set_protections((Protections::CANARY | Protections::HASH).bits());

    assert!(stack.check().contains(ErrorFlags::WRONG_HASH));
}

// =============================================================================
// size and capacity
// =============================================================================

#[test]
fn test_size_above_capacity() {
    let mut stack = filled(3);

    stack.tamper().set_size(17);

    assert_eq!(stack.check(), ErrorFlags::CORRUPTED_SIZE);
}

#[test]
fn test_capacity_below_minimum() {
    let mut stack = filled(3);

    stack.tamper().set_capacity(8);

    assert_eq!(stack.check(), ErrorFlags::CORRUPTED_CAP);
}

#[test]
fn test_size_and_capacity_both_reported() {
    let mut stack = filled(3);

    let mut tamper = stack.tamper();
    tamper.set_capacity(2);
    tamper.set_canary_start(0);

    assert_eq!(
        stack.check(),
        ErrorFlags::DEAD_CANARY | ErrorFlags::CORRUPTED_SIZE | ErrorFlags::CORRUPTED_CAP
    );
}

// =============================================================================
// buffer pointer
// =============================================================================

#[test]
fn test_null_buffer() {
    let mut stack = filled(3);

    stack.tamper().set_data_address(0);

    assert_eq!(stack.check(), ErrorFlags::BAD_DATA_PTR);
}

#[test]
fn test_unmapped_buffer() {
    let mut stack = filled(3);

    stack.tamper().set_data_address(0x1000);

    assert_eq!(stack.check(), ErrorFlags::BAD_DATA_PTR);
}

#[test]
fn test_misaligned_buffer() {
    let mut stack = filled(3);

    let address = stack.tamper().block_address();
    stack.tamper().set_data_address(address + 1);

    assert_eq!(stack.check(), ErrorFlags::BAD_DATA_PTR);
}

// =============================================================================
// buffer canaries
// =============================================================================

#[test]
fn test_buffer_head_canary() {
    let mut stack = filled(3);

    stack.tamper().set_buffer_head_canary(0);

    assert_eq!(stack.check(), ErrorFlags::CORRUPTED_DATA);
}

#[test]
fn test_buffer_tail_canary() {
    let mut stack = filled(16);

    stack.tamper().set_buffer_tail_canary(CANARY);

    assert_eq!(stack.check(), ErrorFlags::CORRUPTED_DATA);
}

// =============================================================================
// hashes
// =============================================================================

#[test]
fn test_wrong_structural_hash() {
    let mut stack = filled(3);

    stack.tamper().corrupt_structural_hash();

    assert_eq!(stack.check(), ErrorFlags::WRONG_HASH);
}

#[test]
fn test_wrong_data_hash_also_breaks_structural_hash() {
    let mut stack = filled(3);

    stack.tamper().corrupt_data_hash();

    assert_eq!(stack.check(), ErrorFlags::WRONG_HASH | ErrorFlags::WRONG_DATA_HASH);
}

#[test]
fn test_changed_live_value_breaks_data_hash() {
    let mut stack = filled(3);

    stack.tamper().write_slot(1, 99);

    assert_eq!(stack.check(), ErrorFlags::WRONG_DATA_HASH);
}

// =============================================================================
// poison scan
// =============================================================================

#[test]
fn test_corrupted_poison_byte() {
    let mut stack = filled(3);

    stack.tamper().corrupt_slot_byte(10, 0, 0xFF);

    assert_eq!(stack.check(), ErrorFlags::CORRUPTED_DATA | ErrorFlags::WRONG_DATA_HASH);
}

#[test]
fn test_spare_slot_not_poison_resealed() {
    let mut stack = filled(3);

    let mut tamper = stack.tamper();
    tamper.write_slot(3, 7);
    tamper.reseal();

    assert_eq!(stack.check(), ErrorFlags::CORRUPTED_DATA);
}

#[test]
fn test_live_slot_poison_resealed() {
    let mut stack = filled(3);

    let mut tamper = stack.tamper();
    tamper.write_slot(0, i32::MIN);
    tamper.reseal();

    assert_eq!(stack.check(), ErrorFlags::CORRUPTED_DATA);
}

#[test]
fn test_size_shrunk_behind_back_resealed() {
    let mut stack = filled(3);

    let mut tamper = stack.tamper();
    tamper.set_size(2);
    tamper.reseal();

    // Slot 2 is live data in the spare region now.
    assert_eq!(stack.check(), ErrorFlags::CORRUPTED_DATA);
}
