// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Rotating `client.log`: size-based rotation performed once at startup,
//! matching `RotatingFileHandler(maxBytes=10*1024*1024, backupCount=5)`
//! from the system this crate is modeled on.

use std::path::Path;

pub const MAX_LOG_SIZE: u64 = 10 * 1024 * 1024;
pub const MAX_ROTATED_LOGS: u32 = 5;

/// Rotate `client.log` if it exceeds [`MAX_LOG_SIZE`]: shifts
/// `client.log` → `client.log.1` → … → `client.log.5`, dropping the
/// oldest. Best-effort: rotation failures never block startup.
pub fn rotate_log_if_needed(log_path: &Path) {
    let size = match std::fs::metadata(log_path) {
        Ok(m) => m.len(),
        Err(_) => return,
    };
    if size < MAX_LOG_SIZE {
        return;
    }

    let log_str = log_path.display().to_string();
    for i in (1..MAX_ROTATED_LOGS).rev() {
        let from = format!("{log_str}.{i}");
        let to = format!("{log_str}.{}", i + 1);
        let _ = std::fs::rename(&from, &to);
    }
    let _ = std::fs::rename(log_path, format!("{log_str}.1"));
}

/// Sets up a non-blocking rotating file writer for `tracing`. Returns the
/// guard; dropping it flushes and stops the background writer thread.
pub fn setup_logging(
    log_path: &Path,
) -> std::io::Result<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    rotate_log_if_needed(log_path);

    let dir = log_path
        .parent()
        .ok_or_else(|| std::io::Error::other("log path has no parent directory"))?;
    let file_name = log_path
        .file_name()
        .ok_or_else(|| std::io::Error::other("log path has no file name"))?;
    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(non_blocking))
        .init();

    Ok(guard)
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
