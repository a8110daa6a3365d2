// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::{Request, Response};

#[tokio::test]
async fn request_roundtrips_over_a_pipe() {
    let (mut client, mut server) = tokio::io::duplex(4096);

    let req = Request::GetJobFile {
        identifier: "job-1".to_string(),
        relative_path: "out.log".to_string(),
    };
    write_request(&mut client, &req).await.unwrap();

    let decoded = read_request(&mut server, DEFAULT_TIMEOUT).await.unwrap();
    match decoded {
        Request::GetJobFile {
            identifier,
            relative_path,
        } => {
            assert_eq!(identifier, "job-1");
            assert_eq!(relative_path, "out.log");
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn response_roundtrips_over_a_pipe() {
    let (mut client, mut server) = tokio::io::duplex(4096);

    let resp = Response::GetJobStatus {
        value: Some("completed".to_string()),
        message: None,
    };
    write_response(&mut server, &resp, DEFAULT_TIMEOUT)
        .await
        .unwrap();

    let decoded = read_response(&mut client, DEFAULT_TIMEOUT).await.unwrap();
    assert!(decoded.is_ok());
}

#[tokio::test]
async fn read_message_reports_connection_closed_on_eof() {
    let (client, mut server) = tokio::io::duplex(4096);
    drop(client);
    let err = read_message(&mut server).await.unwrap_err();
    assert!(matches!(err, ProtocolError::ConnectionClosed));
}

#[test]
fn oversized_message_is_rejected_at_encode_time() {
    let huge = vec![0u8; MAX_MESSAGE_SIZE + 1];
    let req = Request::StartJob { script: huge };
    let err = encode(&req).unwrap_err();
    assert!(matches!(err, ProtocolError::MessageTooLarge { .. }));
}
