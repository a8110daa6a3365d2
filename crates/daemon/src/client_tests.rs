// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use ferry_backends::LocalBackend;
use tempfile::tempdir;

fn client_with_exec_path(exec_path: &std::path::Path) -> Client {
    let client = Client::new(
        "local".to_string(),
        Box::new(LocalBackend::new()),
        PathBuf::from("/bin/true"),
    );
    client.set_exec_path(Some(exec_path.to_string_lossy().to_string())).unwrap();
    client.set_rpc_port(12345);
    client
}

#[tokio::test]
async fn start_job_before_set_exec_path_is_not_configured() {
    let client = Client::new("local".to_string(), Box::new(LocalBackend::new()), PathBuf::from("/bin/true"));
    let err = client.start_job(b"print 1".to_vec()).await.unwrap_err();
    assert!(matches!(err, ClientError::NotConfigured));
}

#[tokio::test]
async fn start_job_writes_script_and_registers_a_pending_job() {
    let dir = tempdir().unwrap();
    let client = client_with_exec_path(dir.path());

    let id = client.start_job(b"print 1".to_vec()).await.unwrap();

    let files = client.get_job_file_list(&id).unwrap();
    assert!(files.iter().any(|f| f.name == "script.k"));

    let script = client.get_job_file(&id, "script.k").unwrap();
    assert_eq!(script, b"print 1");
}

#[tokio::test]
async fn get_job_status_reflects_batch_id_as_queued() {
    let dir = tempdir().unwrap();
    let client = client_with_exec_path(dir.path());

    let id = client.start_job(b"print 1".to_vec()).await.unwrap();
    // /bin/true exits immediately without touching sentinels, so the only
    // signal available is that the backend acknowledged submission.
    let status = client.get_job_status(&id).unwrap();
    assert!(status == Status::Queued || status == Status::Pending);
}

#[tokio::test]
async fn finished_sentinel_forces_completed_regardless_of_recorded_status() {
    let dir = tempdir().unwrap();
    let client = client_with_exec_path(dir.path());
    let id = client.start_job(b"print 1".to_vec()).await.unwrap();

    let working_dir = WorkingDir::new(dir.path(), &id);
    std::fs::write(working_dir.finished_sentinel(), b"").unwrap();

    assert_eq!(client.get_job_status(&id).unwrap(), Status::Completed);
}

#[tokio::test]
async fn get_job_solution_before_completion_is_an_error() {
    let dir = tempdir().unwrap();
    let client = client_with_exec_path(dir.path());
    let id = client.start_job(b"print 1".to_vec()).await.unwrap();

    let err = client.get_job_solution(&id).unwrap_err();
    assert!(matches!(err, ClientError::NotCompleted(_)));
}

#[tokio::test]
async fn get_job_file_rejects_path_escape() {
    let dir = tempdir().unwrap();
    let client = client_with_exec_path(dir.path());
    let id = client.start_job(b"print 1".to_vec()).await.unwrap();

    let err = client.get_job_file(&id, "../../etc/passwd").unwrap_err();
    assert!(matches!(err, ClientError::PathEscape(_)));
}

#[tokio::test]
async fn stop_job_on_an_unknown_identifier_is_an_error() {
    let dir = tempdir().unwrap();
    let client = client_with_exec_path(dir.path());
    let err = client.stop_job(&JobId::new("missing")).await.unwrap_err();
    assert!(matches!(err, ClientError::Registry(RegistryError::UnknownJob(_))));
}

#[tokio::test]
async fn stop_job_is_a_no_op_once_completed() {
    let dir = tempdir().unwrap();
    let client = client_with_exec_path(dir.path());
    let id = client.start_job(b"print 1".to_vec()).await.unwrap();

    let working_dir = WorkingDir::new(dir.path(), &id);
    std::fs::write(working_dir.finished_sentinel(), b"").unwrap();
    assert_eq!(client.get_job_status(&id).unwrap(), Status::Completed);

    client.stop_job(&id).await.unwrap();
    assert_eq!(client.get_job_status(&id).unwrap(), Status::Completed);
}
