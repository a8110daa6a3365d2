// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The seam a driver's session holds onto: something that can reach a
//! client daemon's RPC endpoint, wherever it lives.

use async_trait::async_trait;
use ferry_core::error::{TransportConnectionError, TransportError, TransportTerminateError};
use ferry_proto::{Request, Response};

#[async_trait]
pub trait Transport: Send + Sync {
    /// Reattach to an already-running client if possible, otherwise spawn
    /// (or remotely launch) a fresh one. Returns once the RPC handle is
    /// usable and `set_exec_path` has been pushed.
    async fn connect(&mut self) -> Result<(), TransportConnectionError>;

    /// Issue one RPC call and return its raw pair-form reply. Callers that
    /// want a typed error translate the reply themselves (see
    /// `response_to_result` below) — the transport doesn't interpret method
    /// semantics, only ferries bytes.
    async fn call(&mut self, request: Request) -> Result<Response, TransportError>;

    /// Tear down the connection and ask the remote client to shut down.
    /// Tolerates a client that's already gone: a disconnected peer is not
    /// a failure here, since the caller's goal (no client left running)
    /// is already satisfied.
    async fn terminate(&mut self) -> Result<(), TransportTerminateError>;

    fn is_connected(&self) -> bool;
}

/// Turn a pair-form [`Response`] into a typed result, applying the uniform
/// rule: a message present means failure regardless of which variant.
pub fn message_to_error(response: &Response) -> Option<String> {
    if response.is_ok() {
        None
    } else {
        Some(response.message().unwrap_or("unknown error").to_string())
    }
}

#[cfg(test)]
#[path = "transport_tests.rs"]
mod tests;
