// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dispatches an RPC [`Request`] to the [`Client`] and turns the result
//! into a pair-form [`Response`]. Handlers never let an error cross the
//! wire as a fault — every failure becomes `(None, Some(message))` after
//! being logged, matching the propagation policy every other client RPC
//! method follows.

use ferry_core::JobId;
use ferry_proto::dto::{JobFileEntry, JobSummary};
use ferry_proto::{Request, Response, CLIENT_METHODS};

use crate::client::Client;

pub async fn handle(client: &Client, request: Request) -> Response {
    match request {
        Request::SetExecPath { exec_path } => {
            let message = log_err("set_exec_path", client.set_exec_path(exec_path));
            Response::SetExecPath { message }
        }
        Request::SetServer { host, port } => {
            client.set_server(host, port);
            Response::SetServer { message: None }
        }
        Request::StartJob { script } => match client.start_job(script).await {
            Ok(id) => Response::StartJob {
                value: Some(id.to_string()),
                message: None,
            },
            Err(e) => Response::StartJob {
                value: None,
                message: Some(log_and_render("start_job", e)),
            },
        },
        Request::StopJob { identifier } => {
            let id = JobId::new(identifier);
            match client.stop_job(&id).await {
                Ok(()) => Response::StopJob {
                    value: Some(true),
                    message: None,
                },
                Err(e) => Response::StopJob {
                    value: None,
                    message: Some(log_and_render("stop_job", e)),
                },
            }
        }
        Request::GetJobs => match client.get_jobs() {
            Ok(jobs) => Response::GetJobs {
                value: Some(jobs.iter().map(JobSummary::from).collect()),
                message: None,
            },
            Err(e) => Response::GetJobs {
                value: None,
                message: Some(log_and_render("get_jobs", e)),
            },
        },
        Request::GetJobStatus { identifier } => {
            let id = JobId::new(identifier);
            match client.get_job_status(&id) {
                Ok(status) => Response::GetJobStatus {
                    value: Some(status.to_string()),
                    message: None,
                },
                Err(e) => Response::GetJobStatus {
                    value: None,
                    message: Some(log_and_render("get_job_status", e)),
                },
            }
        }
        Request::GetJobSolution { identifier } => {
            let id = JobId::new(identifier);
            match client.get_job_solution(&id) {
                Ok(bytes) => Response::GetJobSolution {
                    value: Some(bytes),
                    message: None,
                },
                Err(e) => Response::GetJobSolution {
                    value: None,
                    message: Some(log_and_render("get_job_solution", e)),
                },
            }
        }
        Request::GetJobFile { identifier, relative_path } => {
            let id = JobId::new(identifier);
            match client.get_job_file(&id, &relative_path) {
                Ok(bytes) => Response::GetJobFile {
                    value: Some(bytes),
                    message: None,
                },
                Err(e) => Response::GetJobFile {
                    value: None,
                    message: Some(log_and_render("get_job_file", e)),
                },
            }
        }
        Request::GetJobFileList { identifier } => {
            let id = JobId::new(identifier);
            match client.get_job_file_list(&id) {
                Ok(files) => Response::GetJobFileList {
                    value: Some(files.iter().map(JobFileEntry::from).collect()),
                    message: None,
                },
                Err(e) => Response::GetJobFileList {
                    value: None,
                    message: Some(log_and_render("get_job_file_list", e)),
                },
            }
        }
        Request::Terminate => Response::Terminate { message: None },
        Request::ListMethods => Response::ListMethods {
            value: Some(CLIENT_METHODS.iter().map(|s| s.to_string()).collect()),
            message: None,
        },
    }
}

fn log_err(method: &str, result: Result<(), crate::client::ClientError>) -> Option<String> {
    result.err().map(|e| log_and_render(method, e))
}

fn log_and_render(method: &str, err: crate::client::ClientError) -> String {
    tracing::error!(method, error = %err, "RPC handler failed");
    err.to_string()
}

#[cfg(test)]
#[path = "handler_tests.rs"]
mod tests;
