// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn reattach_succeeds_against_a_listening_port() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        let _ = listener.accept().await;
    });

    let mut transport = LocalTransport::new(LocalConfig {
        daemon_binary: PathBuf::from("/nonexistent/ferryd"),
        exec_path: None,
        callsign: "site".to_string(),
        reattach_port: Some(port),
    });
    assert!(transport.try_reattach(port).await);
    assert!(transport.is_connected());
}

#[tokio::test]
async fn reattach_fails_against_a_closed_port() {
    let mut transport = LocalTransport::new(LocalConfig {
        daemon_binary: PathBuf::from("/nonexistent/ferryd"),
        exec_path: None,
        callsign: "site".to_string(),
        reattach_port: Some(1),
    });
    assert!(!transport.try_reattach(1).await);
    assert!(!transport.is_connected());
}

#[tokio::test]
async fn connect_surfaces_spawn_failure_when_daemon_binary_is_missing() {
    let mut transport = LocalTransport::new(LocalConfig {
        daemon_binary: PathBuf::from("/nonexistent/ferryd"),
        exec_path: None,
        callsign: "site".to_string(),
        reattach_port: None,
    });
    let err = transport.connect().await.unwrap_err();
    assert!(matches!(err, TransportConnectionError::Io { .. }));
}
