// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tempfile::tempdir;

#[test]
fn set_then_get_round_trips() {
    let dir = tempdir().unwrap();
    ApiConfig::set(dir.path(), "slurm", "key", "-----BEGIN-----").unwrap();
    assert_eq!(
        ApiConfig::get(dir.path(), "slurm", "key"),
        Some("-----BEGIN-----".to_string())
    );
}

#[test]
fn generic_ssh_session_keys_multiple_hosts_independently() {
    let dir = tempdir().unwrap();
    ApiConfig::set(dir.path(), "ssh", "hosta.example.com", "key-a").unwrap();
    ApiConfig::set(dir.path(), "ssh", "hostb.example.com", "key-b").unwrap();
    assert_eq!(ApiConfig::get(dir.path(), "ssh", "hosta.example.com"), Some("key-a".to_string()));
    assert_eq!(ApiConfig::get(dir.path(), "ssh", "hostb.example.com"), Some("key-b".to_string()));
}

#[test]
fn get_on_missing_tag_or_key_is_none() {
    let dir = tempdir().unwrap();
    assert_eq!(ApiConfig::get(dir.path(), "slurm", "key"), None);
    ApiConfig::set(dir.path(), "slurm", "key", "x").unwrap();
    assert_eq!(ApiConfig::get(dir.path(), "slurm", "other"), None);
}

#[test]
fn remove_drops_the_key_and_empty_section() {
    let dir = tempdir().unwrap();
    ApiConfig::set(dir.path(), "slurm", "key", "x").unwrap();
    ApiConfig::remove(dir.path(), "slurm", "key").unwrap();
    assert_eq!(ApiConfig::get(dir.path(), "slurm", "key"), None);
}

#[test]
fn remove_on_unset_key_is_not_an_error() {
    let dir = tempdir().unwrap();
    ApiConfig::remove(dir.path(), "slurm", "key").unwrap();
}
