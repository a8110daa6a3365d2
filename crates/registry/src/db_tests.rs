// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use ferry_core::id::SequentialIdGen;

fn fresh_id() -> JobId {
    JobId::generate(&SequentialIdGen::default())
}

#[test]
fn add_job_starts_pending() {
    let reg = Registry::in_memory().unwrap();
    let id = fresh_id();
    reg.add_job(&id, Utc::now()).unwrap();
    assert_eq!(reg.get_job_status(&id).unwrap(), Status::Pending);
}

#[test]
fn promote_status_never_demotes() {
    let reg = Registry::in_memory().unwrap();
    let id = fresh_id();
    reg.add_job(&id, Utc::now()).unwrap();

    reg.promote_status(&id, Status::Running).unwrap();
    assert_eq!(reg.get_job_status(&id).unwrap(), Status::Running);

    reg.promote_status(&id, Status::Pending).unwrap();
    assert_eq!(reg.get_job_status(&id).unwrap(), Status::Running);

    reg.promote_status(&id, Status::Completed).unwrap();
    assert_eq!(reg.get_job_status(&id).unwrap(), Status::Completed);
}

#[test]
fn force_status_overrides_monotonic_rule() {
    let reg = Registry::in_memory().unwrap();
    let id = fresh_id();
    reg.add_job(&id, Utc::now()).unwrap();
    reg.promote_status(&id, Status::Completed).unwrap();

    reg.force_status(&id, Status::Cancelled).unwrap();
    assert_eq!(reg.get_job_status(&id).unwrap(), Status::Cancelled);
}

#[test]
fn set_batch_id_round_trips() {
    let reg = Registry::in_memory().unwrap();
    let id = fresh_id();
    reg.add_job(&id, Utc::now()).unwrap();
    assert_eq!(reg.get_job_batch_id(&id).unwrap(), None);

    reg.set_batch_id(&id, "1234").unwrap();
    assert_eq!(reg.get_job_batch_id(&id).unwrap(), Some("1234".to_string()));
}

#[test]
fn unknown_job_is_an_error() {
    let reg = Registry::in_memory().unwrap();
    let err = reg.get_job_status(&JobId::new("missing")).unwrap_err();
    assert!(matches!(err, RegistryError::UnknownJob(_)));
}

#[test]
fn remove_job_deletes_the_row() {
    let reg = Registry::in_memory().unwrap();
    let id = fresh_id();
    reg.add_job(&id, Utc::now()).unwrap();

    reg.remove_job(&id).unwrap();
    assert!(matches!(
        reg.get_job_status(&id).unwrap_err(),
        RegistryError::UnknownJob(_)
    ));
}

#[test]
fn remove_job_on_missing_identifier_is_not_an_error() {
    let reg = Registry::in_memory().unwrap();
    reg.remove_job(&JobId::new("missing")).unwrap();
}

#[test]
fn get_jobs_is_ordered_by_insertion() {
    let reg = Registry::in_memory().unwrap();
    let a = fresh_id();
    let b = fresh_id();
    reg.add_job(&a, Utc::now()).unwrap();
    reg.add_job(&b, Utc::now()).unwrap();

    let jobs = reg.get_jobs().unwrap();
    assert_eq!(jobs.len(), 2);
    assert_eq!(jobs[0].identifier, a);
    assert_eq!(jobs[1].identifier, b);
}
