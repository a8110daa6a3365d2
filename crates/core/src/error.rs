// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error taxonomy shared across the transport, registry, and backend layers.
//!
//! RPC handlers on the client side never raise these through the wire —
//! they return a `(null, message)` pair (see `ferry-proto`). The transport
//! is what converts such a pair back into one of the typed errors below, so
//! driver callers get a real `std::error::Error` to match on.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportConnectionError {
    #[error("failed to connect to {host}: {source}")]
    Io {
        host: String,
        #[source]
        source: std::io::Error,
    },
    #[error("authentication failed for {username}@{host}")]
    AuthenticationFailed { host: String, username: String },
    #[error("handshake did not produce a usable port: {0}")]
    BadHandshake(String),
    #[error("timed out waiting for the remote client to start")]
    Timeout,
}

#[derive(Debug, Error)]
#[error("failed to terminate session: {0}")]
pub struct TransportTerminateError(pub String);

#[derive(Debug, Error)]
#[error("start_job failed: {0}")]
pub struct TransportStartJobError(pub String);

#[derive(Debug, Error)]
#[error("stop_job failed: {0}")]
pub struct TransportStopJobError(pub String);

#[derive(Debug, Error)]
#[error("update_job_parameters failed: {0}")]
pub struct TransportUpdateJobParametersError(pub String);

#[derive(Debug, Error)]
#[error("get_jobs failed: {0}")]
pub struct TransportGetJobsError(pub String);

#[derive(Debug, Error)]
#[error("get_job_status failed: {0}")]
pub struct TransportGetJobStatusError(pub String);

#[derive(Debug, Error)]
#[error("get_job_solution failed: {0}")]
pub struct TransportGetJobSolutionError(pub String);

#[derive(Debug, Error)]
#[error("get_job_file failed: {0}")]
pub struct TransportGetJobFileError(pub String);

#[derive(Debug, Error)]
#[error("get_job_file_list failed: {0}")]
pub struct TransportGetJobFileListError(pub String);

#[derive(Debug, Error)]
#[error("all transport operations require set_exec_path first")]
pub struct DatabaseNotConfigured;

/// Top-level error enum used by driver-facing transport methods.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error(transparent)]
    Connection(#[from] TransportConnectionError),
    #[error(transparent)]
    Terminate(#[from] TransportTerminateError),
    #[error(transparent)]
    StartJob(#[from] TransportStartJobError),
    #[error(transparent)]
    StopJob(#[from] TransportStopJobError),
    #[error(transparent)]
    UpdateJobParameters(#[from] TransportUpdateJobParametersError),
    #[error(transparent)]
    GetJobs(#[from] TransportGetJobsError),
    #[error(transparent)]
    GetJobStatus(#[from] TransportGetJobStatusError),
    #[error(transparent)]
    GetJobSolution(#[from] TransportGetJobSolutionError),
    #[error(transparent)]
    GetJobFile(#[from] TransportGetJobFileError),
    #[error(transparent)]
    GetJobFileList(#[from] TransportGetJobFileListError),
    #[error(transparent)]
    DatabaseNotConfigured(#[from] DatabaseNotConfigured),
}

/// Client-side persistent registry failures.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("registry unavailable: {0}")]
    Unavailable(String),
    #[error("sqlite error: {0}")]
    Sqlite(String),
    #[error("unknown job identifier: {0}")]
    UnknownJob(String),
}

/// Submission-backend failures (local pool, Slurm, HTCondor).
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("failed to launch job: {0}")]
    Launch(String),
    #[error("failed to cancel job {batch_id}: {source}")]
    Cancel {
        batch_id: String,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse batch id from scheduler output: {0:?}")]
    UnparsableBatchId(String),
    #[error("scheduler command exited with status {status}: {stderr}")]
    NonZeroExit { status: i32, stderr: String },
}

/// Catch-all for `ferry-core` internal failures (path resolution, sentinel
/// I/O) that don't belong to a more specific taxonomy above.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("path escapes working directory: {0}")]
    PathEscape(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
