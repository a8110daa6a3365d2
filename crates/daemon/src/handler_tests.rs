// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use ferry_backends::LocalBackend;
use std::path::PathBuf;
use tempfile::tempdir;

fn client_with_exec_path(exec_path: &std::path::Path) -> Client {
    let client = Client::new(
        "local".to_string(),
        Box::new(LocalBackend::new()),
        PathBuf::from("/bin/true"),
    );
    client.set_rpc_port(1);
    client
        .set_exec_path(Some(exec_path.to_string_lossy().to_string()))
        .unwrap();
    client
}

#[tokio::test]
async fn list_methods_returns_the_client_method_surface() {
    let client = Client::new("local".to_string(), Box::new(LocalBackend::new()), PathBuf::from("/bin/true"));
    let response = handle(&client, Request::ListMethods).await;
    match response {
        Response::ListMethods { value, message } => {
            assert!(message.is_none());
            assert_eq!(value.unwrap(), CLIENT_METHODS.to_vec());
        }
        other => panic!("unexpected response: {other:?}"),
    }
}

#[tokio::test]
async fn start_job_then_get_jobs_round_trips_through_the_wire_dto() {
    let dir = tempdir().unwrap();
    let client = client_with_exec_path(dir.path());

    let start = handle(&client, Request::StartJob { script: b"print 1".to_vec() }).await;
    let identifier = match start {
        Response::StartJob { value: Some(id), message: None } => id,
        other => panic!("unexpected response: {other:?}"),
    };

    let jobs = handle(&client, Request::GetJobs).await;
    match jobs {
        Response::GetJobs { value: Some(jobs), message: None } => {
            assert_eq!(jobs.len(), 1);
            assert_eq!(jobs[0].identifier, identifier);
        }
        other => panic!("unexpected response: {other:?}"),
    }
}

#[tokio::test]
async fn get_job_status_for_unknown_identifier_is_a_pair_not_a_fault() {
    let dir = tempdir().unwrap();
    let client = client_with_exec_path(dir.path());

    let response = handle(&client, Request::GetJobStatus { identifier: "missing".to_string() }).await;
    assert!(!response.is_ok());
    match &response {
        Response::GetJobStatus { value: None, message: Some(_) } => {}
        other => panic!("unexpected response: {other:?}"),
    }
}
