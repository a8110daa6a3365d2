// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTCondor submission: writes a `submit.sh` executable and a matching
//! submit description, then shells out to `condor_submit`/`condor_rm`
//! rather than binding the Python `Schedd.submit`/`act` API directly.

use crate::backend::{Backend, BatchId};
use crate::subprocess::{run_with_timeout, SCHEDULER_COMMAND_TIMEOUT};
use async_trait::async_trait;
use ferry_core::error::BackendError;
use ferry_core::WorkingDir;
use tokio::process::Command;

pub struct CondorBackend {
    condor_submit: String,
    condor_rm: String,
}

impl CondorBackend {
    pub fn new() -> Self {
        Self {
            condor_submit: "condor_submit".to_string(),
            condor_rm: "condor_rm".to_string(),
        }
    }

    pub fn with_binaries(condor_submit: impl Into<String>, condor_rm: impl Into<String>) -> Self {
        Self {
            condor_submit: condor_submit.into(),
            condor_rm: condor_rm.into(),
        }
    }
}

impl Default for CondorBackend {
    fn default() -> Self {
        Self::new()
    }
}

pub fn render_submit_description(wrapper_invocation: &str, has_env: bool) -> String {
    let mut cmd = String::new();
    if has_env {
        cmd.push_str("source \".env\" && ");
    }
    cmd.push_str(wrapper_invocation);
    format!(
        "executable = /bin/bash\n\
         arguments = -lc \"{cmd}\"\n\
         output = out.log\n\
         error = out.err\n\
         should_transfer_files = NO\n\
         queue\n"
    )
}

/// `condor_submit` prints `... submitted to cluster N.` on success; the
/// cluster id is the final whitespace-delimited token before the period.
fn parse_cluster_id(stdout: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(stdout);
    let line = text.lines().last()?;
    let token = line.trim().trim_end_matches('.').split_whitespace().last()?;
    Some(token.to_string())
}

#[async_trait]
impl Backend for CondorBackend {
    async fn submit(
        &self,
        working_dir: &WorkingDir,
        wrapper_invocation: &str,
    ) -> Result<BatchId, BackendError> {
        let has_env = working_dir.env_file().exists();
        let submit_desc = render_submit_description(wrapper_invocation, has_env);
        std::fs::write(working_dir.submit_script(), submit_desc)
            .map_err(|e| BackendError::Launch(e.to_string()))?;

        let mut cmd = Command::new(&self.condor_submit);
        cmd.arg(working_dir.submit_script());
        cmd.current_dir(working_dir.root());

        let output = run_with_timeout(cmd, SCHEDULER_COMMAND_TIMEOUT, "condor_submit")
            .await
            .map_err(BackendError::Launch)?;

        if !output.status.success() {
            return Err(BackendError::NonZeroExit {
                status: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            });
        }

        let cluster_id = parse_cluster_id(&output.stdout).ok_or_else(|| {
            BackendError::UnparsableBatchId(String::from_utf8_lossy(&output.stdout).to_string())
        })?;
        Ok(BatchId::Scheduler(cluster_id))
    }

    async fn cancel(&self, batch_id: &str) -> Result<(), BackendError> {
        let mut cmd = Command::new(&self.condor_rm);
        cmd.arg(batch_id);
        let output = run_with_timeout(cmd, SCHEDULER_COMMAND_TIMEOUT, "condor_rm")
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
#[path = "condor_tests.rs"]
mod tests;
