// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ties the wrapper's pieces into the bootstrap sequence a job's working
//! directory expects: wait for the client to be reachable, stand up the
//! wrapper's own RPC endpoint, touch `started`, run the interpreter, touch
//! `finished` no matter what the interpreter did, then let the RPC endpoint
//! stop. Every step is best-effort past this point — a wrapper that can't
//! log or can't touch a sentinel still has to let the job finish.

use std::path::Path;
use std::time::Duration;

use ferry_core::WorkingDir;
use tokio::net::TcpStream;
use tracing::{error, info, warn};

use crate::config::read_client_port;
use crate::interpreter::Interpreter;
use crate::rpc::Listener;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Blocks until a TCP listener answers on `127.0.0.1:port`. Used to wait for
/// the client daemon that spawned this job to have its RPC endpoint up
/// before the wrapper starts announcing itself.
pub async fn wait_for_port(port: u16, poll_interval: Duration) {
    while TcpStream::connect(("127.0.0.1", port)).await.is_err() {
        tokio::time::sleep(poll_interval).await;
    }
}

fn touch(path: &Path) -> std::io::Result<()> {
    std::fs::File::create(path)?;
    Ok(())
}

/// Runs the full bootstrap sequence for one job. Never returns an error:
/// every failure along the way is logged and the sequence keeps going, so
/// that `finished` is always touched and the process can always exit 0.
pub async fn run(working_dir: &WorkingDir, interpreter: &dyn Interpreter) {
    match read_client_port(&working_dir.wrapper_config()) {
        Some(port) => wait_for_port(port, POLL_INTERVAL).await,
        None => warn!("wrapper.ini has no client port; skipping reachability wait"),
    }

    let listener = match Listener::bind().await {
        Ok(listener) => listener,
        Err(e) => {
            error!(error = %e, "failed to bind wrapper RPC endpoint");
            return;
        }
    };
    let shutdown = listener.shutdown_handle();
    tokio::spawn(listener.run());

    if let Err(e) = touch(&working_dir.started_sentinel()) {
        error!(error = %e, "failed to touch started sentinel");
    }

    info!("starting interpreter");
    match interpreter.run(working_dir).await {
        Ok(status) if status.success() => info!("interpreter completed"),
        Ok(status) => warn!(code = ?status.code(), "interpreter exited with a non-zero status"),
        Err(e) => error!(error = %e, "failed to run interpreter"),
    }

    if let Err(e) = touch(&working_dir.finished_sentinel()) {
        error!(error = %e, "failed to touch finished sentinel");
    }

    shutdown.notify_waiters();
}

#[cfg(test)]
#[path = "bootstrap_tests.rs"]
mod tests;
