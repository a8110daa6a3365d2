// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use russh::keys::PrivateKey;
use std::sync::Arc;

/// Where to find the private key used to authenticate, mirroring a
/// site's stored credentials rather than a developer's local `~/.ssh`.
#[derive(Clone)]
pub enum KeySource {
    /// Try every identity the running SSH agent offers.
    Agent,
    /// A PEM-encoded private key pulled from the out-of-band key store
    /// (see `set_ssh_key`), rather than a path on disk.
    Pem {
        pem: Arc<str>,
        passphrase: Option<Arc<str>>,
    },
}

impl KeySource {
    pub fn from_pem(pem: impl Into<Arc<str>>) -> Self {
        Self::Pem {
            pem: pem.into(),
            passphrase: None,
        }
    }

    pub(crate) fn decode(&self) -> Result<Vec<PrivateKey>, russh::keys::Error> {
        match self {
            KeySource::Agent => Ok(Vec::new()),
            KeySource::Pem { pem, passphrase } => {
                let key = russh::keys::decode_secret_key(pem, passphrase.as_deref())?;
                Ok(vec![key])
            }
        }
    }
}

#[derive(Clone)]
pub struct SshConfig {
    pub host: String,
    pub ssh_port: u16,
    pub username: String,
    pub key_source: KeySource,
    pub python_path: String,
    pub client_entry: String,
    pub exec_path: String,
    pub env_file: Option<String>,
    pub callsign: String,
    pub is_generic: bool,
}

impl SshConfig {
    pub fn username_or_current_user(username: Option<String>) -> String {
        username.unwrap_or_else(whoami::username)
    }

    /// The bootstrap command executed on the remote side when no reattach
    /// port is available.
    pub fn spawn_command(&self) -> String {
        let source = self
            .env_file
            .as_ref()
            .map(|f| format!("source {f} && "))
            .unwrap_or_default();
        format!(
            "mkdir -p {exec_path} && cd {exec_path} && {source}{python} -m {entry} {callsign}",
            exec_path = self.exec_path,
            source = source,
            python = self.python_path,
            entry = self.client_entry,
            callsign = self.callsign,
        )
    }

    pub fn login_command(&self) -> String {
        format!("bash --login -c \"{}\"", self.spawn_command().replace('"', "\\\""))
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
