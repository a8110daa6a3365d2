// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn reads_port_line() {
    let mut input = std::io::Cursor::new(b"50123\n=EOF=\n".to_vec());
    let handshake = read_handshake(&mut input).await.unwrap();
    assert_eq!(handshake, Handshake::Port(50123));
}

#[tokio::test]
async fn reads_error_with_diagnostics() {
    let mut input = std::io::Cursor::new(b"error\nbad callsign\ntry again\n=EOF=\n".to_vec());
    let handshake = read_handshake(&mut input).await.unwrap();
    assert_eq!(
        handshake,
        Handshake::Error("bad callsign\ntry again".to_string())
    );
}

#[tokio::test]
async fn unparsable_first_line_is_treated_as_error() {
    let mut input = std::io::Cursor::new(b"not-a-port\n=EOF=\n".to_vec());
    let handshake = read_handshake(&mut input).await.unwrap();
    assert_eq!(handshake, Handshake::Error("not-a-port".to_string()));
}

#[tokio::test]
async fn eof_without_sentinel_is_an_error() {
    let mut input = std::io::Cursor::new(b"error\nconnection reset".to_vec());
    let handshake = read_handshake(&mut input).await.unwrap();
    assert_eq!(handshake, Handshake::Error("connection reset".to_string()));
}
