// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `api.toml`: per-session (or, for the generic `ssh` session, per-host)
//! SSH private keys, read by a driver's [`ferry_transport::SshTransport`]
//! and written only by `set-ssh-key`/`remove-ssh-key`. Whole-file
//! read-modify-write, matching the single-writer policy every other
//! configuration file in this system follows.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

type Section = BTreeMap<String, String>;
type Document = BTreeMap<String, Section>;

pub struct ApiConfig;

impl ApiConfig {
    fn path(config_dir: &Path) -> PathBuf {
        config_dir.join("ferry").join("api.toml")
    }

    fn load(config_dir: &Path) -> Document {
        std::fs::read_to_string(Self::path(config_dir))
            .ok()
            .and_then(|body| toml::from_str(&body).ok())
            .unwrap_or_default()
    }

    fn save(config_dir: &Path, document: &Document) -> io::Result<()> {
        let path = Self::path(config_dir);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let body = toml::to_string(document).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, body)
    }

    /// Read a key's value out of `[tag]`.
    pub fn get(config_dir: &Path, tag: &str, key: &str) -> Option<String> {
        Self::load(config_dir).get(tag)?.get(key).cloned()
    }

    /// Write `key = value` into `[tag]`, creating the section if needed.
    pub fn set(config_dir: &Path, tag: &str, key: &str, value: &str) -> io::Result<()> {
        let mut document = Self::load(config_dir);
        document
            .entry(tag.to_string())
            .or_default()
            .insert(key.to_string(), value.to_string());
        Self::save(config_dir, &document)
    }

    /// Drop `key` from `[tag]`, and the section itself if it's now empty.
    /// Not an error if the key (or the section) was never set.
    pub fn remove(config_dir: &Path, tag: &str, key: &str) -> io::Result<()> {
        let mut document = Self::load(config_dir);
        if let Some(section) = document.get_mut(tag) {
            section.remove(key);
            if section.is_empty() {
                document.remove(tag);
            }
        }
        Self::save(config_dir, &document)
    }
}

#[cfg(test)]
#[path = "api_config_tests.rs"]
mod tests;
