// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! SSH-backed transport: bootstraps a client daemon on a remote host over
//! an interactive login shell, then proxies RPC traffic through a
//! local-forward tunnel so the rest of the driver never needs to know the
//! connection isn't a plain loopback `TcpStream`.

use std::sync::Arc;

use russh::client::{self, Handle};
use russh::keys::PrivateKeyWithHashAlg;

use crate::handshake::{Handshake, HandshakeReader};
use crate::transport::Transport;
use async_trait::async_trait;
use ferry_core::error::{TransportConnectionError, TransportError, TransportTerminateError};
use ferry_proto::wire::{read_response, write_request, DEFAULT_TIMEOUT};
use ferry_proto::{Request, Response};
use tokio::net::TcpStream;

use super::config::{KeySource, SshConfig};
use super::handler::ClientHandler;
use super::tunnel::ForwardTunnel;

pub struct SshTransport {
    config: SshConfig,
    session: Option<Arc<Handle<ClientHandler>>>,
    tunnel: Option<ForwardTunnel>,
    rpc: Option<TcpStream>,
    /// Set once we know the remote client's RPC port, whether from a fresh
    /// spawn's handshake or a caller-supplied reattach value.
    remote_port: Option<u16>,
}

impl SshTransport {
    pub fn new(config: SshConfig) -> Self {
        Self {
            config,
            session: None,
            tunnel: None,
            rpc: None,
            remote_port: None,
        }
    }

    async fn open_session(&self) -> Result<Handle<ClientHandler>, TransportConnectionError> {
        let russh_config = Arc::new(client::Config::default());
        let mut session = client::connect(
            russh_config,
            (self.config.host.as_str(), self.config.ssh_port),
            ClientHandler,
        )
        .await
        .map_err(|e| TransportConnectionError::Io {
            host: self.config.host.clone(),
            source: std::io::Error::other(e.to_string()),
        })?;

        self.authenticate(&mut session).await?;
        Ok(session)
    }

    async fn authenticate(
        &self,
        session: &mut Handle<ClientHandler>,
    ) -> Result<(), TransportConnectionError> {
        let auth_failed = || TransportConnectionError::AuthenticationFailed {
            host: self.config.host.clone(),
            username: self.config.username.clone(),
        };

        match &self.config.key_source {
            KeySource::Agent => {
                // Agent-based auth is intentionally out of scope here: sites
                // are configured with an explicit PEM, not a forwarded
                // agent socket. Surface the same error shape a rejected key
                // would produce.
                Err(auth_failed())
            }
            KeySource::Pem { .. } => {
                let keys = self
                    .config
                    .key_source
                    .decode()
                    .map_err(|_| auth_failed())?;
                let key = keys.into_iter().next().ok_or_else(auth_failed)?;
                let result = session
                    .authenticate_publickey(&self.config.username, PrivateKeyWithHashAlg::new(Arc::new(key), None))
                    .await
                    .map_err(|_| auth_failed())?;
                if result.success() {
                    Ok(())
                } else {
                    Err(auth_failed())
                }
            }
        }
    }

    /// Reattach path: open a local-forward tunnel to a known remote port
    /// and probe liveness with `system.listMethods` over the RPC handle
    /// itself, rather than a bare TCP connect — a listening port on a
    /// shared login node doesn't by itself mean the expected client is
    /// still behind it.
    async fn try_reattach(&mut self, remote_port: u16) -> bool {
        let Ok(session) = self.open_session().await else {
            return false;
        };
        let session = Arc::new(session);
        let Ok(tunnel) = ForwardTunnel::spawn(session.clone(), remote_port).await else {
            return false;
        };
        let Ok(stream) = TcpStream::connect(("127.0.0.1", tunnel.local_port)).await else {
            tunnel.close();
            return false;
        };

        self.session = Some(session);
        self.rpc = Some(stream);
        self.remote_port = Some(remote_port);
        self.tunnel = Some(tunnel);

        match self.call(Request::ListMethods).await {
            Ok(resp) if resp.is_ok() => true,
            _ => {
                self.session = None;
                self.rpc = None;
                self.tunnel = None;
                self.remote_port = None;
                false
            }
        }
    }

    async fn spawn_fresh(&mut self) -> Result<(), TransportConnectionError> {
        let session = self.open_session().await?;

        let mut channel = session
            .channel_open_session()
            .await
            .map_err(|e| TransportConnectionError::Io {
                host: self.config.host.clone(),
                source: std::io::Error::other(e.to_string()),
            })?;
        channel
            .exec(true, self.config.login_command())
            .await
            .map_err(|e| TransportConnectionError::Io {
                host: self.config.host.clone(),
                source: std::io::Error::other(e.to_string()),
            })?;

        let handshake = read_channel_handshake(&mut channel).await;
        let remote_port = match handshake {
            Handshake::Port(port) => port,
            Handshake::Error(message) => return Err(TransportConnectionError::BadHandshake(message)),
        };

        let session = Arc::new(session);
        let tunnel = ForwardTunnel::spawn(session.clone(), remote_port)
            .await
            .map_err(|e| TransportConnectionError::Io {
                host: self.config.host.clone(),
                source: e,
            })?;
        let stream =
            TcpStream::connect(("127.0.0.1", tunnel.local_port))
                .await
                .map_err(|e| TransportConnectionError::Io {
                    host: self.config.host.clone(),
                    source: e,
                })?;

        self.session = Some(session);
        self.rpc = Some(stream);
        self.remote_port = Some(remote_port);
        self.tunnel = Some(tunnel);
        Ok(())
    }
}

async fn read_channel_handshake(channel: &mut russh::Channel<client::Msg>) -> Handshake {
    let mut reader = HandshakeReader::new();
    let mut pending = String::new();
    loop {
        match channel.wait().await {
            Some(russh::ChannelMsg::Data { data }) => {
                pending.push_str(&String::from_utf8_lossy(&data));
                while let Some(idx) = pending.find('\n') {
                    let line = pending[..idx].trim_end_matches('\r').to_string();
                    pending.drain(..=idx);
                    if let Some(handshake) = reader.push_line(line) {
                        return handshake;
                    }
                }
            }
            Some(russh::ChannelMsg::Eof) | Some(russh::ChannelMsg::Close) | None => {
                return reader.finish();
            }
            _ => {}
        }
    }
}

#[async_trait]
impl Transport for SshTransport {
    async fn connect(&mut self) -> Result<(), TransportConnectionError> {
        if let Some(port) = self.remote_port {
            if self.try_reattach(port).await {
                return Ok(());
            }
        }
        self.spawn_fresh().await?;

        let response = self
            .call(Request::SetExecPath {
                exec_path: Some(self.config.exec_path.clone()),
            })
            .await
            .map_err(|e| TransportConnectionError::BadHandshake(e.to_string()))?;
        if let Some(message) = crate::transport::message_to_error(&response) {
            return Err(TransportConnectionError::BadHandshake(message));
        }
        Ok(())
    }

    async fn call(&mut self, request: Request) -> Result<Response, TransportError> {
        let stream = self
            .rpc
            .as_mut()
            .ok_or(ferry_core::error::DatabaseNotConfigured)?;
        write_request(stream, &request).await.map_err(|e| {
            TransportError::Connection(TransportConnectionError::BadHandshake(e.to_string()))
        })?;
        read_response(stream, DEFAULT_TIMEOUT).await.map_err(|e| {
            TransportError::Connection(TransportConnectionError::BadHandshake(e.to_string()))
        })
    }

    async fn terminate(&mut self) -> Result<(), TransportTerminateError> {
        // A fault tearing down an already-gone client isn't a failure: the
        // caller's goal (no client left running) is satisfied either way.
        if self.rpc.is_some() {
            let _ = self.call(Request::Terminate).await;
        }
        if let Some(tunnel) = self.tunnel.take() {
            tunnel.close();
        }
        if let Some(session) = self.session.take() {
            let _ = session
                .disconnect(russh::Disconnect::ByApplication, "session ended", "en")
                .await;
        }
        self.rpc = None;
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.rpc.is_some()
    }
}
