// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! RPC method calls exchanged with a client daemon, plus the minimal subset
//! a wrapper's own endpoint answers (`Terminate`, `ListMethods`).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "method", content = "args")]
pub enum Request {
    SetExecPath { exec_path: Option<String> },
    SetServer { host: String, port: u16 },
    StartJob { script: Vec<u8> },
    StopJob { identifier: String },
    GetJobs,
    GetJobStatus { identifier: String },
    GetJobSolution { identifier: String },
    GetJobFile { identifier: String, relative_path: String },
    GetJobFileList { identifier: String },
    Terminate,
    ListMethods,
}

impl Request {
    /// The RPC method name, matching the dialect's `system.listMethods`
    /// naming convention.
    pub fn method_name(&self) -> &'static str {
        match self {
            Request::SetExecPath { .. } => "set_exec_path",
            Request::SetServer { .. } => "set_server",
            Request::StartJob { .. } => "start_job",
            Request::StopJob { .. } => "stop_job",
            Request::GetJobs => "get_jobs",
            Request::GetJobStatus { .. } => "get_job_status",
            Request::GetJobSolution { .. } => "get_job_solution",
            Request::GetJobFile { .. } => "get_job_file",
            Request::GetJobFileList { .. } => "get_job_file_list",
            Request::Terminate => "terminate",
            Request::ListMethods => "system.listMethods",
        }
    }
}

/// Methods implemented by a client daemon's RPC endpoint.
pub const CLIENT_METHODS: &[&str] = &[
    "set_exec_path",
    "set_server",
    "start_job",
    "stop_job",
    "get_jobs",
    "get_job_status",
    "get_job_solution",
    "get_job_file",
    "get_job_file_list",
    "terminate",
    "system.listMethods",
];

/// Methods implemented by a per-job wrapper's own endpoint. A wrapper
/// answers only enough to let the client signal cancellation and probe
/// liveness; everything else is a protocol error.
pub const WRAPPER_METHODS: &[&str] = &["terminate", "system.listMethods"];

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
