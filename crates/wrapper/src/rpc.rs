// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The wrapper's own RPC endpoint: a loopback listener a client dials back
//! into to cancel a running job or probe liveness. It answers only
//! [`ferry_proto::WRAPPER_METHODS`] — anything else is a [`Response::Fault`].

use std::sync::Arc;

use ferry_proto::wire::{read_request, write_response, ProtocolError, DEFAULT_TIMEOUT};
use ferry_proto::{Request, Response, WRAPPER_METHODS};
use thiserror::Error;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Notify;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

pub struct Listener {
    socket: TcpListener,
    shutdown: Arc<Notify>,
}

impl Listener {
    pub async fn bind() -> std::io::Result<Self> {
        let socket = TcpListener::bind(("127.0.0.1", 0)).await?;
        Ok(Self {
            socket,
            shutdown: Arc::new(Notify::new()),
        })
    }

    pub fn port(&self) -> std::io::Result<u16> {
        Ok(self.socket.local_addr()?.port())
    }

    /// A handle that, when notified, stops the accept loop. Held by the
    /// bootstrap step that drives the interpreter, so it can shut the
    /// listener down once the job finishes even if no `terminate` arrives.
    pub fn shutdown_handle(&self) -> Arc<Notify> {
        self.shutdown.clone()
    }

    pub async fn run(self) {
        loop {
            tokio::select! {
                _ = self.shutdown.notified() => {
                    debug!("wrapper RPC loop shutting down");
                    break;
                }
                accepted = self.socket.accept() => {
                    let Ok((stream, _)) = accepted else { continue };
                    let shutdown = self.shutdown.clone();
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(stream, &shutdown).await {
                            debug!(error = %e, "wrapper RPC connection ended");
                        }
                    });
                }
            }
        }
    }
}

async fn handle_connection(mut stream: TcpStream, shutdown: &Notify) -> Result<(), ConnectionError> {
    let request = read_request(&mut stream, DEFAULT_TIMEOUT).await?;
    let response = dispatch(request, shutdown);
    write_response(&mut stream, &response, DEFAULT_TIMEOUT).await?;
    Ok(())
}

fn dispatch(request: Request, shutdown: &Notify) -> Response {
    match request {
        Request::Terminate => {
            shutdown.notify_waiters();
            Response::Terminate { message: None }
        }
        Request::ListMethods => Response::ListMethods {
            value: Some(WRAPPER_METHODS.iter().map(|s| s.to_string()).collect()),
            message: None,
        },
        other => Response::Fault {
            message: format!("wrapper endpoint does not implement {}", other.method_name()),
        },
    }
}

#[cfg(test)]
#[path = "rpc_tests.rs"]
mod tests;
