// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use async_trait::async_trait;
use ferry_core::id::SequentialIdGen;
use ferry_core::JobId;
use std::os::unix::process::ExitStatusExt;
use std::process::ExitStatus;
use tempfile::tempdir;
use tokio::net::TcpListener;

struct StubInterpreter {
    result: std::io::Result<ExitStatus>,
}

#[async_trait]
impl Interpreter for StubInterpreter {
    async fn run(&self, _working_dir: &WorkingDir) -> std::io::Result<ExitStatus> {
        match &self.result {
            Ok(status) => Ok(*status),
            Err(e) => Err(std::io::Error::new(e.kind(), e.to_string())),
        }
    }
}

fn working_dir(root: &std::path::Path) -> WorkingDir {
    let id = JobId::generate(&SequentialIdGen::default());
    let dir = WorkingDir::new(root, &id);
    std::fs::create_dir_all(dir.root()).unwrap();
    dir
}

async fn reachable_port() -> u16 {
    let listener = TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        loop {
            if listener.accept().await.is_err() {
                break;
            }
        }
    });
    port
}

#[tokio::test]
async fn touches_both_sentinels_when_the_interpreter_succeeds() {
    let root = tempdir().unwrap();
    let dir = working_dir(root.path());
    let port = reachable_port().await;
    std::fs::write(dir.wrapper_config(), format!("[wrapper]\nport={port}\n")).unwrap();
    let interpreter = StubInterpreter {
        result: Ok(ExitStatus::from_raw(0)),
    };

    run(&dir, &interpreter).await;

    assert!(dir.has_started());
    assert!(dir.has_finished());
}

#[tokio::test]
async fn touches_finished_sentinel_even_when_the_interpreter_errors() {
    let root = tempdir().unwrap();
    let dir = working_dir(root.path());
    let port = reachable_port().await;
    std::fs::write(dir.wrapper_config(), format!("[wrapper]\nport={port}\n")).unwrap();
    let interpreter = StubInterpreter {
        result: Err(std::io::Error::other("no such interpreter")),
    };

    run(&dir, &interpreter).await;

    assert!(dir.has_started());
    assert!(dir.has_finished());
}

#[tokio::test]
async fn missing_client_port_does_not_block_the_sequence() {
    let root = tempdir().unwrap();
    let dir = working_dir(root.path());
    let interpreter = StubInterpreter {
        result: Ok(ExitStatus::from_raw(0)),
    };

    run(&dir, &interpreter).await;

    assert!(dir.has_finished());
}

#[tokio::test]
async fn wait_for_port_returns_once_something_is_listening() {
    let listener = TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        let _ = listener.accept().await;
    });

    wait_for_port(port, Duration::from_millis(10)).await;
}
