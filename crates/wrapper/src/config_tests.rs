// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tempfile::tempdir;

#[test]
fn reads_the_port_out_of_the_wrapper_section() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("wrapper.ini");
    std::fs::write(&path, "[wrapper]\nport=54321\n").unwrap();
    assert_eq!(read_client_port(&path), Some(54321));
}

#[test]
fn missing_file_is_none() {
    let dir = tempdir().unwrap();
    assert_eq!(read_client_port(&dir.path().join("wrapper.ini")), None);
}

#[test]
fn malformed_contents_are_none() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("wrapper.ini");
    std::fs::write(&path, "not an ini file").unwrap();
    assert_eq!(read_client_port(&path), None);
}
