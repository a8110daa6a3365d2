// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! RPC replies.
//!
//! Handlers never raise across the wire: every variant carries both a value
//! slot and a message slot, and a failure is represented as `value: None`
//! with `message: Some(..)` rather than a distinct error channel. The
//! transport on the calling side is what turns a failed pair into one of
//! `ferry_core::error`'s typed errors.

use crate::dto::{JobFileEntry, JobSummary};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "method", content = "reply")]
pub enum Response {
    SetExecPath { message: Option<String> },
    SetServer { message: Option<String> },
    StartJob { value: Option<String>, message: Option<String> },
    StopJob { value: Option<bool>, message: Option<String> },
    GetJobs { value: Option<Vec<JobSummary>>, message: Option<String> },
    GetJobStatus { value: Option<String>, message: Option<String> },
    GetJobSolution { value: Option<Vec<u8>>, message: Option<String> },
    GetJobFile { value: Option<Vec<u8>>, message: Option<String> },
    GetJobFileList { value: Option<Vec<JobFileEntry>>, message: Option<String> },
    Terminate { message: Option<String> },
    ListMethods { value: Option<Vec<String>>, message: Option<String> },
    /// A method fault crossing the RPC dialect's native error channel
    /// (malformed request, unknown method) rather than a handler-level
    /// failure. Translated generically by the transport.
    Fault { message: String },
}

impl Response {
    /// True if this reply represents success (a value is present, or the
    /// method's contract is value-less and no message was set).
    pub fn is_ok(&self) -> bool {
        match self {
            Response::SetExecPath { message }
            | Response::SetServer { message }
            | Response::Terminate { message } => message.is_none(),
            Response::StartJob { message, .. }
            | Response::StopJob { message, .. }
            | Response::GetJobs { message, .. }
            | Response::GetJobStatus { message, .. }
            | Response::GetJobSolution { message, .. }
            | Response::GetJobFile { message, .. }
            | Response::GetJobFileList { message, .. }
            | Response::ListMethods { message, .. } => message.is_none(),
            Response::Fault { .. } => false,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Response::SetExecPath { message }
            | Response::SetServer { message }
            | Response::Terminate { message } => message.as_deref(),
            Response::StartJob { message, .. }
            | Response::StopJob { message, .. }
            | Response::GetJobs { message, .. }
            | Response::GetJobStatus { message, .. }
            | Response::GetJobSolution { message, .. }
            | Response::GetJobFile { message, .. }
            | Response::GetJobFileList { message, .. }
            | Response::ListMethods { message, .. } => message.as_deref(),
            Response::Fault { message } => Some(message.as_str()),
        }
    }
}

#[cfg(test)]
#[path = "response_tests.rs"]
mod tests;
