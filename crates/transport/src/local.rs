// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Same-host client: spawns (or reattaches to) a client daemon over a
//! plain loopback `TcpStream`, no SSH involved.

use crate::handshake::{read_handshake, Handshake};
use crate::transport::Transport;
use async_trait::async_trait;
use ferry_core::error::{TransportConnectionError, TransportError, TransportTerminateError};
use ferry_proto::wire::{read_response, write_request, DEFAULT_TIMEOUT};
use ferry_proto::{Request, Response};
use std::path::PathBuf;
use tokio::io::BufReader;
use tokio::net::TcpStream;
use tokio::process::{Child, Command};

pub struct LocalConfig {
    pub daemon_binary: PathBuf,
    pub exec_path: Option<PathBuf>,
    pub callsign: String,
    /// If set, attempt to reattach to a daemon already listening on this
    /// port before spawning a new one.
    pub reattach_port: Option<u16>,
}

pub struct LocalTransport {
    config: LocalConfig,
    stream: Option<TcpStream>,
    child: Option<Child>,
    port: Option<u16>,
}

impl LocalTransport {
    pub fn new(config: LocalConfig) -> Self {
        Self {
            config,
            stream: None,
            child: None,
            port: None,
        }
    }

    async fn try_reattach(&mut self, port: u16) -> bool {
        match TcpStream::connect(("127.0.0.1", port)).await {
            Ok(stream) => {
                self.stream = Some(stream);
                self.port = Some(port);
                true
            }
            Err(_) => false,
        }
    }

    async fn spawn_fresh(&mut self) -> Result<(), TransportConnectionError> {
        let mut cmd = Command::new(&self.config.daemon_binary);
        cmd.arg(&self.config.callsign);
        if let Some(exec_path) = &self.config.exec_path {
            cmd.arg("--exec-path").arg(exec_path);
        }
        cmd.stdout(std::process::Stdio::piped());
        cmd.stderr(std::process::Stdio::piped());

        let mut child = cmd.spawn().map_err(|e| TransportConnectionError::Io {
            host: "localhost".to_string(),
            source: e,
        })?;

        let stdout = child
            .stdout
            .take()
            .expect("piped stdout is always present");
        let mut reader = BufReader::new(stdout);
        let handshake = read_handshake(&mut reader)
            .await
            .map_err(|e| TransportConnectionError::Io {
                host: "localhost".to_string(),
                source: e,
            })?;

        match handshake {
            Handshake::Port(port) => {
                let stream = TcpStream::connect(("127.0.0.1", port)).await.map_err(|e| {
                    TransportConnectionError::Io {
                        host: "localhost".to_string(),
                        source: e,
                    }
                })?;
                self.stream = Some(stream);
                self.port = Some(port);
                self.child = Some(child);
                Ok(())
            }
            Handshake::Error(message) => Err(TransportConnectionError::BadHandshake(message)),
        }
    }
}

#[async_trait]
impl Transport for LocalTransport {
    async fn connect(&mut self) -> Result<(), TransportConnectionError> {
        if let Some(port) = self.config.reattach_port {
            if self.try_reattach(port).await {
                return Ok(());
            }
        }
        self.spawn_fresh().await?;

        let exec_path = self
            .config
            .exec_path
            .as_ref()
            .map(|p| p.to_string_lossy().to_string());
        let response = self
            .call(Request::SetExecPath { exec_path })
            .await
            .map_err(|e| TransportConnectionError::BadHandshake(e.to_string()))?;
        if let Some(message) = crate::transport::message_to_error(&response) {
            return Err(TransportConnectionError::BadHandshake(message));
        }
        Ok(())
    }

    async fn call(&mut self, request: Request) -> Result<Response, TransportError> {
        let stream = self.stream.as_mut().ok_or(ferry_core::error::DatabaseNotConfigured)?;
        write_request(stream, &request)
            .await
            .map_err(|e| TransportError::Connection(TransportConnectionError::BadHandshake(e.to_string())))?;
        read_response(stream, DEFAULT_TIMEOUT)
            .await
            .map_err(|e| TransportError::Connection(TransportConnectionError::BadHandshake(e.to_string())))
    }

    async fn terminate(&mut self) -> Result<(), TransportTerminateError> {
        if self.stream.is_some() {
            let _ = self.call(Request::Terminate).await;
        }
        self.stream = None;
        if let Some(mut child) = self.child.take() {
            let _ = child.start_kill();
        }
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.stream.is_some()
    }
}

#[cfg(test)]
#[path = "local_transport_tests.rs"]
mod tests;
