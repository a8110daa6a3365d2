// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    pending_to_queued   = { Status::Pending, Status::Queued, Status::Queued },
    queued_to_running   = { Status::Queued, Status::Running, Status::Running },
    running_to_completed = { Status::Running, Status::Completed, Status::Completed },
    no_demote_from_completed = { Status::Completed, Status::Running, Status::Completed },
    no_demote_from_error = { Status::Error, Status::Completed, Status::Error },
    cancelled_sticks    = { Status::Cancelled, Status::Running, Status::Cancelled },
    same_status_stays   = { Status::Running, Status::Running, Status::Running },
)]
fn promote(current: Status, candidate: Status, expected: Status) {
    assert_eq!(current.promote(candidate), expected);
}

#[test]
fn terminal_states() {
    assert!(!Status::Pending.is_terminal());
    assert!(!Status::Queued.is_terminal());
    assert!(!Status::Running.is_terminal());
    assert!(Status::Completed.is_terminal());
    assert!(Status::Error.is_terminal());
    assert!(Status::Cancelled.is_terminal());
}

#[test]
fn code_roundtrip() {
    for s in [
        Status::Pending,
        Status::Queued,
        Status::Running,
        Status::Completed,
        Status::Error,
        Status::Cancelled,
    ] {
        assert_eq!(Status::from_code(s.code()), Some(s));
    }
}

#[test]
fn unknown_code_is_none() {
    assert_eq!(Status::from_code(99), None);
}

#[test]
fn serde_is_snake_case() {
    let json = serde_json::to_string(&Status::Running).unwrap();
    assert_eq!(json, "\"running\"");
}
