// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use ferry_core::JobId;

fn working_dir(root: &std::path::Path) -> WorkingDir {
    let id = JobId::new("job-1");
    std::fs::create_dir_all(root.join("job-1")).unwrap();
    WorkingDir::new(root, &id)
}

#[tokio::test]
async fn submit_runs_the_invocation_and_writes_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let wd = working_dir(dir.path());
    let backend = LocalBackend::with_capacity(2);

    let batch_id = backend.submit(&wd, "echo hello").await.unwrap();
    assert!(matches!(batch_id, BatchId::Scheduler(_)));

    tokio::time::sleep(std::time::Duration::from_millis(200)).await;
    let stdout = std::fs::read_to_string(wd.stdout()).unwrap();
    assert_eq!(stdout.trim(), "hello");
}

#[tokio::test]
async fn cancel_unknown_batch_id_is_a_no_op() {
    let backend = LocalBackend::with_capacity(1);
    backend.cancel("not-a-real-pid").await.unwrap();
}

#[tokio::test]
async fn cancel_kills_a_running_process() {
    let dir = tempfile::tempdir().unwrap();
    let wd = working_dir(dir.path());
    let backend = LocalBackend::with_capacity(1);

    let batch_id = backend.submit(&wd, "sleep 30").await.unwrap();
    let pid = batch_id.as_scheduler_id().unwrap().to_string();
    backend.cancel(&pid).await.unwrap();
}
