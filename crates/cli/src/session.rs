// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The driver-facing handle: one [`Session`] per callsign, wrapping
//! whichever [`Transport`] that callsign resolves to. Mirrors
//! `AbstractClient`'s public surface (`start_job`, `get_jobs`, ...) but as
//! a thin translation layer — all the real state lives in the client
//! daemon this talks to.

use ferry_core::error::{
    TransportConnectionError, TransportError, TransportGetJobFileError,
    TransportGetJobFileListError, TransportGetJobSolutionError, TransportGetJobStatusError,
    TransportGetJobsError, TransportStartJobError, TransportStopJobError,
    TransportTerminateError,
};
use ferry_core::Status;
use ferry_proto::dto::{JobFileEntry, JobSummary};
use ferry_proto::{Request, Response};
use ferry_transport::{message_to_error, Transport};

pub struct Session {
    transport: Box<dyn Transport>,
}

impl Session {
    pub fn new(transport: Box<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn connect(&mut self) -> Result<(), TransportConnectionError> {
        self.transport.connect().await
    }

    pub fn is_connected(&self) -> bool {
        self.transport.is_connected()
    }

    pub async fn start_job(&mut self, script: Vec<u8>) -> Result<String, TransportError> {
        match self.transport.call(Request::StartJob { script }).await? {
            Response::StartJob { value: Some(id), message: None } => Ok(id),
            other => Err(TransportStartJobError(failure_message(&other)).into()),
        }
    }

    pub async fn stop_job(&mut self, identifier: impl Into<String>) -> Result<(), TransportError> {
        let identifier = identifier.into();
        match self.transport.call(Request::StopJob { identifier }).await? {
            Response::StopJob { message: None, .. } => Ok(()),
            other => Err(TransportStopJobError(failure_message(&other)).into()),
        }
    }

    pub async fn get_jobs(&mut self) -> Result<Vec<JobSummary>, TransportError> {
        match self.transport.call(Request::GetJobs).await? {
            Response::GetJobs { value: Some(jobs), message: None } => Ok(jobs),
            other => Err(TransportGetJobsError(failure_message(&other)).into()),
        }
    }

    pub async fn get_job_status(&mut self, identifier: impl Into<String>) -> Result<Status, TransportError> {
        let identifier = identifier.into();
        match self.transport.call(Request::GetJobStatus { identifier }).await? {
            Response::GetJobStatus { value: Some(status), message: None } => {
                parse_status(&status).ok_or_else(|| TransportGetJobStatusError(format!("unrecognized status {status:?}")).into())
            }
            other => Err(TransportGetJobStatusError(failure_message(&other)).into()),
        }
    }

    pub async fn get_job_solution(&mut self, identifier: impl Into<String>) -> Result<Vec<u8>, TransportError> {
        let identifier = identifier.into();
        match self.transport.call(Request::GetJobSolution { identifier }).await? {
            Response::GetJobSolution { value: Some(bytes), message: None } => Ok(bytes),
            other => Err(TransportGetJobSolutionError(failure_message(&other)).into()),
        }
    }

    pub async fn get_job_file(
        &mut self,
        identifier: impl Into<String>,
        relative_path: impl Into<String>,
    ) -> Result<Vec<u8>, TransportError> {
        let identifier = identifier.into();
        let relative_path = relative_path.into();
        match self.transport.call(Request::GetJobFile { identifier, relative_path }).await? {
            Response::GetJobFile { value: Some(bytes), message: None } => Ok(bytes),
            other => Err(TransportGetJobFileError(failure_message(&other)).into()),
        }
    }

    pub async fn get_job_file_list(&mut self, identifier: impl Into<String>) -> Result<Vec<JobFileEntry>, TransportError> {
        let identifier = identifier.into();
        match self.transport.call(Request::GetJobFileList { identifier }).await? {
            Response::GetJobFileList { value: Some(files), message: None } => Ok(files),
            other => Err(TransportGetJobFileListError(failure_message(&other)).into()),
        }
    }

    pub async fn terminate(&mut self) -> Result<(), TransportTerminateError> {
        self.transport.terminate().await
    }
}

fn failure_message(response: &Response) -> String {
    message_to_error(response)
        .unwrap_or_else(|| "handler returned an unexpected empty reply".to_string())
}

fn parse_status(s: &str) -> Option<Status> {
    match s {
        "pending" => Some(Status::Pending),
        "queued" => Some(Status::Queued),
        "running" => Some(Status::Running),
        "completed" => Some(Status::Completed),
        "error" => Some(Status::Error),
        "cancelled" => Some(Status::Cancelled),
        _ => None,
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
