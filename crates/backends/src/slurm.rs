// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Slurm submission: writes `submit.sh`, hands it to `sbatch`, and parses
//! the job id back out of stdout.

use crate::backend::{Backend, BatchId};
use crate::subprocess::{run_with_timeout, SCHEDULER_COMMAND_TIMEOUT};
use async_trait::async_trait;
use ferry_core::error::BackendError;
use ferry_core::WorkingDir;
use tokio::process::Command;

const SBATCH_DIRECTIVES: &str = "\
#SBATCH --time=01:00:00
#SBATCH --mem=16G
#SBATCH --nodes=1
#SBATCH --ntasks-per-node=1
";

pub struct SlurmBackend {
    sbatch: String,
    scancel: String,
}

impl SlurmBackend {
    pub fn new() -> Self {
        Self {
            sbatch: "sbatch".to_string(),
            scancel: "scancel".to_string(),
        }
    }

    /// Override the scheduler binaries, for tests that stand in fake
    /// `sbatch`/`scancel` scripts.
    pub fn with_binaries(sbatch: impl Into<String>, scancel: impl Into<String>) -> Self {
        Self {
            sbatch: sbatch.into(),
            scancel: scancel.into(),
        }
    }
}

impl Default for SlurmBackend {
    fn default() -> Self {
        Self::new()
    }
}

pub fn render_submit_script(wrapper_invocation: &str, env_file: Option<&str>) -> String {
    let mut script = String::from("#!/bin/bash\n");
    script.push_str(SBATCH_DIRECTIVES);
    script.push('\n');
    if let Some(env_file) = env_file {
        script.push_str(&format!("source \"{env_file}\"\n"));
    }
    script.push_str(wrapper_invocation);
    script.push('\n');
    script
}

fn parse_job_id(stdout: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(stdout);
    text.split_whitespace().last().map(str::to_string)
}

#[async_trait]
impl Backend for SlurmBackend {
    async fn submit(
        &self,
        working_dir: &WorkingDir,
        wrapper_invocation: &str,
    ) -> Result<BatchId, BackendError> {
        let has_env = working_dir.env_file().exists();
        let script = render_submit_script(
            wrapper_invocation,
            has_env.then_some(".env"),
        );
        std::fs::write(working_dir.submit_script(), script)
            .map_err(|e| BackendError::Launch(e.to_string()))?;

        let mut cmd = Command::new(&self.sbatch);
        cmd.arg(working_dir.submit_script());
        cmd.current_dir(working_dir.root());

        let output = run_with_timeout(cmd, SCHEDULER_COMMAND_TIMEOUT, "sbatch")
            .await
            .map_err(BackendError::Launch)?;

        if !output.status.success() {
            return Err(BackendError::NonZeroExit {
                status: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            });
        }

        let job_id = parse_job_id(&output.stdout)
            .ok_or_else(|| BackendError::UnparsableBatchId(String::from_utf8_lossy(&output.stdout).to_string()))?;
        Ok(BatchId::Scheduler(job_id))
    }

    async fn cancel(&self, batch_id: &str) -> Result<(), BackendError> {
        let mut cmd = Command::new(&self.scancel);
        cmd.arg(batch_id);
        let output = run_with_timeout(cmd, SCHEDULER_COMMAND_TIMEOUT, "scancel")
            .await
            .map_err(BackendError::Launch)?;
        if !output.status.success() {
            return Err(BackendError::NonZeroExit {
                status: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "slurm_tests.rs"]
mod tests;
