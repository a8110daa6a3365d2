// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The client's in-process state: the execution root, the persistent
//! registry, and the submission backend for this site. Mirrors
//! `AbstractClient`'s shape (`exec_path`, `db`, a backend reference) but
//! collapses the class-hierarchy-per-site design into one struct holding a
//! `dyn Backend`.

use chrono::Utc;
use ferry_core::error::{BackendError, RegistryError};
use ferry_core::id::{IdGen, UuidIdGen};
use ferry_core::{Job, JobFile, JobId, Status, WorkingDir};
use ferry_registry::Registry;
use parking_lot::Mutex;
use std::path::PathBuf;
use thiserror::Error;

use crate::config::write_wrapper_config;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("exec_path is not configured; call set_exec_path first")]
    NotConfigured,
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("path `{0}` escapes the job's working directory")]
    PathEscape(String),
    #[error("job {0} has not completed")]
    NotCompleted(String),
    #[error("job {0} has no solution file")]
    NoSolution(String),
}

/// State that only exists once `set_exec_path` has run.
struct Configured {
    exec_path: PathBuf,
    registry: Registry,
    /// Kept alive only for a caller-supplied-nothing exec path: dropping it
    /// removes the directory on orderly shutdown, while a crash leaves it
    /// behind for postmortem (it's simply never dropped).
    _scoped_dir: Option<tempfile::TempDir>,
}

pub struct Client {
    callsign: String,
    backend: Box<dyn ferry_backends::Backend>,
    wrapper_binary: PathBuf,
    id_gen: Box<dyn IdGen>,
    state: Mutex<Option<Configured>>,
    rpc_port: Mutex<Option<u16>>,
}

impl Client {
    pub fn new(callsign: String, backend: Box<dyn ferry_backends::Backend>, wrapper_binary: PathBuf) -> Self {
        Self {
            callsign,
            backend,
            wrapper_binary,
            id_gen: Box::new(UuidIdGen),
            state: Mutex::new(None),
            rpc_port: Mutex::new(None),
        }
    }

    #[cfg(any(test, feature = "test-support"))]
    pub fn with_id_gen(mut self, id_gen: Box<dyn IdGen>) -> Self {
        self.id_gen = id_gen;
        self
    }

    pub fn callsign(&self) -> &str {
        &self.callsign
    }

    /// Record the port this client's own RPC listener bound to, so
    /// `start_job` can tell each wrapper where to dial back to for
    /// `terminate`.
    pub fn set_rpc_port(&self, port: u16) {
        *self.rpc_port.lock() = Some(port);
    }

    /// `set_exec_path`: a path creates (idempotently) the directory; no
    /// path creates a scoped temporary directory released on orderly
    /// shutdown.
    pub fn set_exec_path(&self, path: Option<String>) -> Result<(), ClientError> {
        let (exec_path, scoped_dir) = match path {
            Some(p) => {
                let exec_path = PathBuf::from(p);
                std::fs::create_dir_all(&exec_path)?;
                (exec_path, None)
            }
            None => {
                let dir = tempfile::TempDir::new()?;
                let exec_path = dir.path().to_path_buf();
                (exec_path, Some(dir))
            }
        };
        let registry = Registry::open(exec_path.join("db.sqlite3"))?;
        *self.state.lock() = Some(Configured {
            exec_path,
            registry,
            _scoped_dir: scoped_dir,
        });
        Ok(())
    }

    /// Vestigial in this architecture: the original system used it to hand
    /// the client its own RPC server handle for `terminate` (a side effect
    /// of registering the whole instance for dynamic reflection). Our RPC
    /// surface is an explicit method registry instead, so the client
    /// already owns its listener; this is kept only so the wire method
    /// list matches the spec's client method surface.
    pub fn set_server(&self, _host: String, _port: u16) {}

    fn require_state(&self) -> Result<(), ClientError> {
        if self.state.lock().is_some() {
            Ok(())
        } else {
            Err(ClientError::NotConfigured)
        }
    }

    fn working_dir(&self, identifier: &JobId) -> Result<WorkingDir, ClientError> {
        let guard = self.state.lock();
        let configured = guard.as_ref().ok_or(ClientError::NotConfigured)?;
        Ok(WorkingDir::new(&configured.exec_path, identifier))
    }

    pub async fn start_job(&self, script: Vec<u8>) -> Result<JobId, ClientError> {
        self.require_state()?;
        let identifier = JobId::generate(self.id_gen.as_ref());
        let working_dir = self.working_dir(&identifier)?;
        std::fs::create_dir_all(working_dir.root())?;
        std::fs::write(working_dir.script(), &script)?;

        let rpc_port = self.rpc_port.lock().unwrap_or(0);
        write_wrapper_config(&working_dir.wrapper_config(), rpc_port)?;

        {
            let guard = self.state.lock();
            let configured = guard.as_ref().ok_or(ClientError::NotConfigured)?;
            configured.registry.add_job(&identifier, Utc::now())?;
        }

        let wrapper_invocation = self.wrapper_binary.to_string_lossy().to_string();
        match self.backend.submit(&working_dir, &wrapper_invocation).await {
            Ok(batch_id) => {
                if let Some(scheduler_id) = batch_id.as_scheduler_id() {
                    let guard = self.state.lock();
                    if let Some(configured) = guard.as_ref() {
                        configured.registry.set_batch_id(&identifier, scheduler_id)?;
                    }
                }
                Ok(identifier)
            }
            Err(e) => {
                // Best-effort cleanup: the driver sees a clean failure
                // rather than a half-submitted row.
                let guard = self.state.lock();
                if let Some(configured) = guard.as_ref() {
                    let _ = configured.registry.remove_job(&identifier);
                }
                drop(guard);
                let _ = std::fs::remove_dir_all(working_dir.root());
                Err(e.into())
            }
        }
    }

    pub fn get_jobs(&self) -> Result<Vec<Job>, ClientError> {
        self.require_state()?;
        let guard = self.state.lock();
        let configured = guard.as_ref().ok_or(ClientError::NotConfigured)?;
        Ok(configured.registry.get_jobs()?)
    }

    /// Reads the stored status, then reconciles it against the filesystem
    /// sentinels a wrapper writes without ever calling back over RPC.
    pub fn get_job_status(&self, identifier: &JobId) -> Result<Status, ClientError> {
        self.require_state()?;
        let working_dir = self.working_dir(identifier)?;
        let guard = self.state.lock();
        let configured = guard.as_ref().ok_or(ClientError::NotConfigured)?;
        let job = configured.registry.get_job(identifier)?;

        if working_dir.has_finished() {
            configured.registry.force_status(identifier, Status::Completed)?;
            return Ok(Status::Completed);
        }
        if job.status.is_terminal() {
            return Ok(job.status);
        }

        let candidate = if working_dir.has_started() {
            Status::Running
        } else if job.batch_id.is_some() {
            Status::Queued
        } else {
            Status::Pending
        };
        Ok(configured.registry.promote_status(identifier, candidate)?)
    }

    pub fn get_job_solution(&self, identifier: &JobId) -> Result<Vec<u8>, ClientError> {
        self.require_state()?;
        let status = self.get_job_status(identifier)?;
        if status != Status::Completed {
            return Err(ClientError::NotCompleted(identifier.to_string()));
        }
        let working_dir = self.working_dir(identifier)?;
        std::fs::read(working_dir.solution())
            .map_err(|_| ClientError::NoSolution(identifier.to_string()))
    }

    pub fn get_job_file(&self, identifier: &JobId, relative_path: &str) -> Result<Vec<u8>, ClientError> {
        self.require_state()?;
        // Confirm the job exists before touching the filesystem so an
        // unknown identifier reports that, not a spurious path escape.
        {
            let guard = self.state.lock();
            let configured = guard.as_ref().ok_or(ClientError::NotConfigured)?;
            configured.registry.get_job(identifier)?;
        }
        let working_dir = self.working_dir(identifier)?;
        let resolved = working_dir
            .resolve_within(relative_path)
            .ok_or_else(|| ClientError::PathEscape(relative_path.to_string()))?;
        Ok(std::fs::read(resolved)?)
    }

    pub fn get_job_file_list(&self, identifier: &JobId) -> Result<Vec<JobFile>, ClientError> {
        self.require_state()?;
        {
            let guard = self.state.lock();
            let configured = guard.as_ref().ok_or(ClientError::NotConfigured)?;
            configured.registry.get_job(identifier)?;
        }
        let working_dir = self.working_dir(identifier)?;
        let mut files = Vec::new();
        walk(working_dir.root(), working_dir.root(), &mut files)?;
        Ok(files)
    }

    pub async fn stop_job(&self, identifier: &JobId) -> Result<(), ClientError> {
        self.require_state()?;
        let job = {
            let guard = self.state.lock();
            let configured = guard.as_ref().ok_or(ClientError::NotConfigured)?;
            configured.registry.get_job(identifier)?
        };
        if job.status.is_terminal() {
            return Ok(());
        }
        if let Some(batch_id) = &job.batch_id {
            self.backend.cancel(batch_id).await?;
        }
        let guard = self.state.lock();
        let configured = guard.as_ref().ok_or(ClientError::NotConfigured)?;
        configured.registry.force_status(identifier, Status::Cancelled)?;
        Ok(())
    }
}

fn walk(root: &std::path::Path, dir: &std::path::Path, out: &mut Vec<JobFile>) -> std::io::Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let metadata = entry.metadata()?;
        if metadata.is_dir() {
            walk(root, &path, out)?;
            continue;
        }
        let relative = path
            .strip_prefix(root)
            .unwrap_or(&path)
            .to_string_lossy()
            .to_string();
        out.push(JobFile::from_metadata(relative, &metadata)?);
    }
    Ok(())
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
