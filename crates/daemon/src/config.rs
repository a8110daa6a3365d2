// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-user and per-job configuration files.
//!
//! `ClientConfig` is the user-level "last bound port" cache a driver reads
//! on reattach (`client.toml`, one file per callsign, whole-file
//! read-modify-write — concurrent clients against the same callsign are
//! not supported, matching the single-writer config policy). `WrapperConfig`
//! is the per-job file a wrapper reads to find its client's RPC port; its
//! format is fixed by the on-disk contract wrappers are built against, so
//! it is written by hand rather than through the `toml` crate.

use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub port: u16,
}

impl ClientConfig {
    fn path_for(config_dir: &Path, callsign: &str) -> PathBuf {
        config_dir.join("ferry").join(format!("{callsign}-client.toml"))
    }

    pub fn write(config_dir: &Path, callsign: &str, port: u16) -> io::Result<()> {
        let path = Self::path_for(config_dir, callsign);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let body = toml::to_string(&ClientConfig { port })
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, body)
    }

    pub fn read(config_dir: &Path, callsign: &str) -> Option<u16> {
        let path = Self::path_for(config_dir, callsign);
        let body = std::fs::read_to_string(path).ok()?;
        let config: ClientConfig = toml::from_str(&body).ok()?;
        Some(config.port)
    }
}

/// `wrapper.ini` contents: `[wrapper]\nport=<int>\n`, read by a wrapper
/// process to discover its client's RPC endpoint.
pub fn write_wrapper_config(path: &Path, client_port: u16) -> io::Result<()> {
    std::fs::write(path, format!("[wrapper]\nport={client_port}\n"))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
