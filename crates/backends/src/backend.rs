// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The submission-adapter seam: one implementation per execution site
//! (local process pool, Slurm, HTCondor).

use async_trait::async_trait;
use ferry_core::error::BackendError;
use ferry_core::WorkingDir;

/// Handle returned by a successful submission. Local submissions don't have
/// a scheduler-assigned id; everything else does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchId {
    Local,
    Scheduler(String),
}

impl BatchId {
    pub fn as_scheduler_id(&self) -> Option<&str> {
        match self {
            BatchId::Local => None,
            BatchId::Scheduler(id) => Some(id.as_str()),
        }
    }
}

/// Submits a job's working directory to an execution site and can later
/// cancel it. `wrapper_invocation` is the shell command line that starts
/// the wrapper binary for this job, run with the job's working directory
/// as its current directory; backends differ only in *how* that line gets
/// run (child process, `sbatch`, `condor_submit`), never in what it is.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn submit(
        &self,
        working_dir: &WorkingDir,
        wrapper_invocation: &str,
    ) -> Result<BatchId, BackendError>;

    async fn cancel(&self, batch_id: &str) -> Result<(), BackendError>;
}
