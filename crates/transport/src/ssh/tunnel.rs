// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Local-forward tunnel: a loopback listener whose connections are pumped
//! over `direct-tcpip` channels to `(localhost, remote_port)` on the far
//! side of an SSH connection, so a driver on this host can dial a client
//! daemon that only ever bound a loopback port on the remote host.

use std::sync::Arc;

use russh::client::Handle;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use super::handler::ClientHandler;

const CHUNK_SIZE: usize = 1024;

pub struct ForwardTunnel {
    pub local_port: u16,
    shutdown: tokio::sync::watch::Sender<bool>,
}

impl ForwardTunnel {
    pub async fn spawn(
        session: Arc<Handle<ClientHandler>>,
        remote_port: u16,
    ) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let local_port = listener.local_addr()?.port();
        let (shutdown, mut shutdown_rx) = tokio::sync::watch::channel(false);

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = shutdown_rx.changed() => break,
                    accepted = listener.accept() => {
                        let Ok((stream, _)) = accepted else { break };
                        let session = session.clone();
                        tokio::spawn(async move {
                            if let Err(e) = pump_one(session, stream, remote_port).await {
                                tracing::debug!(error = %e, "forward tunnel connection ended");
                            }
                        });
                    }
                }
            }
        });

        Ok(Self {
            local_port,
            shutdown,
        })
    }

    pub fn close(&self) {
        let _ = self.shutdown.send(true);
    }
}

async fn pump_one(
    session: Arc<Handle<ClientHandler>>,
    mut local: TcpStream,
    remote_port: u16,
) -> Result<(), russh::Error> {
    let channel = session
        .channel_open_direct_tcpip("localhost", remote_port as u32, "127.0.0.1", 0)
        .await?;
    let mut remote = channel.into_stream();

    let mut local_buf = [0u8; CHUNK_SIZE];
    let mut remote_buf = [0u8; CHUNK_SIZE];
    loop {
        tokio::select! {
            n = local.read(&mut local_buf) => {
                match n {
                    Ok(0) | Err(_) => break,
                    Ok(n) => {
                        if remote.write_all(&local_buf[..n]).await.is_err() {
                            break;
                        }
                    }
                }
            }
            n = remote.read(&mut remote_buf) => {
                match n {
                    Ok(0) | Err(_) => break,
                    Ok(n) => {
                        if local.write_all(&remote_buf[..n]).await.is_err() {
                            break;
                        }
                    }
                }
            }
        }
    }
    Ok(())
}
