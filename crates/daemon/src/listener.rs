// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The RPC accept loop: one task reads requests off a fresh `TcpStream`,
//! dispatches through [`crate::handler`], and writes the response back.
//! `terminate` stops the loop from accepting new connections; in-flight
//! RPCs are allowed to finish.

use std::sync::Arc;

use ferry_proto::wire::{read_request, write_response, ProtocolError, DEFAULT_TIMEOUT};
use ferry_proto::Request;
use thiserror::Error;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Notify;
use tracing::{debug, info};

use crate::client::Client;

#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

pub struct Listener {
    socket: TcpListener,
    client: Arc<Client>,
    shutdown: Arc<Notify>,
}

impl Listener {
    /// Binds a loopback TCP socket on a random port and records that port
    /// on `client`, so `start_job` can tell wrappers where to dial back to.
    pub async fn bind(client: Arc<Client>) -> std::io::Result<Self> {
        let socket = TcpListener::bind(("127.0.0.1", 0)).await?;
        let port = socket.local_addr()?.port();
        client.set_rpc_port(port);
        Ok(Self {
            socket,
            client,
            shutdown: Arc::new(Notify::new()),
        })
    }

    pub fn port(&self) -> std::io::Result<u16> {
        Ok(self.socket.local_addr()?.port())
    }

    pub async fn run(self) {
        loop {
            tokio::select! {
                _ = self.shutdown.notified() => {
                    info!("client RPC loop shutting down");
                    break;
                }
                accepted = self.socket.accept() => {
                    let Ok((stream, _)) = accepted else { continue };
                    let client = self.client.clone();
                    let shutdown = self.shutdown.clone();
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(stream, &client, &shutdown).await {
                            debug!(error = %e, "RPC connection ended");
                        }
                    });
                }
            }
        }
    }
}

async fn handle_connection(
    mut stream: TcpStream,
    client: &Client,
    shutdown: &Notify,
) -> Result<(), ConnectionError> {
    let request = read_request(&mut stream, DEFAULT_TIMEOUT).await?;
    let is_terminate = matches!(request, Request::Terminate);
    let response = crate::handler::handle(client, request).await;
    write_response(&mut stream, &response, DEFAULT_TIMEOUT).await?;
    if is_terminate {
        shutdown.notify_waiters();
    }
    Ok(())
}

#[cfg(test)]
#[path = "listener_tests.rs"]
mod tests;
