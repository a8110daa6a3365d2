// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn filenames_match_convention() {
    let dir = tempfile::tempdir().unwrap();
    let id = JobId::new("job-1");
    std::fs::create_dir_all(dir.path().join("job-1")).unwrap();
    let wd = WorkingDir::new(dir.path(), &id);

    assert_eq!(wd.script(), dir.path().join("job-1/script.k"));
    assert_eq!(wd.solution(), dir.path().join("job-1/data.pickle"));
    assert!(!wd.has_started());
    assert!(!wd.has_finished());
}

#[test]
fn resolve_within_accepts_nested_path() {
    let dir = tempfile::tempdir().unwrap();
    let id = JobId::new("job-1");
    std::fs::create_dir_all(dir.path().join("job-1/sub")).unwrap();
    let wd = WorkingDir::new(dir.path(), &id);

    let resolved = wd.resolve_within("sub/out.log").unwrap();
    assert!(resolved.starts_with(dir.path().join("job-1")));
}

#[test]
fn resolve_within_rejects_escape() {
    let dir = tempfile::tempdir().unwrap();
    let id = JobId::new("job-1");
    std::fs::create_dir_all(dir.path().join("job-1")).unwrap();
    let wd = WorkingDir::new(dir.path(), &id);

    assert!(wd.resolve_within("../other/secret").is_none());
}

#[test]
fn sentinel_detection() {
    let dir = tempfile::tempdir().unwrap();
    let id = JobId::new("job-1");
    std::fs::create_dir_all(dir.path().join("job-1")).unwrap();
    let wd = WorkingDir::new(dir.path(), &id);

    std::fs::write(wd.started_sentinel(), b"").unwrap();
    assert!(wd.has_started());
    assert!(!wd.has_finished());

    std::fs::write(wd.finished_sentinel(), b"").unwrap();
    assert!(wd.has_finished());
}
