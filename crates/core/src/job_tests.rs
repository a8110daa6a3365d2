// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::id::SequentialIdGen;

#[test]
fn generated_identifiers_are_unique() {
    let gen = SequentialIdGen::default();
    let a = JobId::generate(&gen);
    let b = JobId::generate(&gen);
    assert_ne!(a, b);
}

#[test]
fn job_serde_roundtrip() {
    let job = Job {
        id: 1,
        identifier: JobId::new("4b1f6e2a-0000-4000-8000-000000000001"),
        batch_id: Some("1234".to_string()),
        status: Status::Running,
        start_time: Utc::now(),
    };
    let json = serde_json::to_string(&job).unwrap();
    let parsed: Job = serde_json::from_str(&json).unwrap();
    assert_eq!(job, parsed);
}

#[test]
fn job_id_display_and_eq_str() {
    let id = JobId::new("abc-123");
    assert_eq!(id.to_string(), "abc-123");
    assert_eq!(id, "abc-123");
}
