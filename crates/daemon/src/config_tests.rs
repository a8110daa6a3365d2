// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tempfile::tempdir;

#[test]
fn client_config_round_trips_per_callsign() {
    let dir = tempdir().unwrap();
    ClientConfig::write(dir.path(), "local", 4321).unwrap();
    assert_eq!(ClientConfig::read(dir.path(), "local"), Some(4321));
}

#[test]
fn client_config_read_missing_callsign_is_none() {
    let dir = tempdir().unwrap();
    assert_eq!(ClientConfig::read(dir.path(), "ozstar"), None);
}

#[test]
fn wrapper_config_writes_ini_section() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("wrapper.ini");
    write_wrapper_config(&path, 9001).unwrap();
    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents, "[wrapper]\nport=9001\n");
}
