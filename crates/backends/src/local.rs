// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Local execution: a bounded pool of child processes, sized to the host's
//! CPU count so a burst of `start_job` calls can't oversubscribe the
//! machine. Jobs beyond the pool's capacity queue until a slot frees up.

use crate::backend::{Backend, BatchId};
use async_trait::async_trait;
use ferry_core::error::BackendError;
use ferry_core::WorkingDir;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::process::Stdio;
use std::sync::Arc;
use tokio::process::Child;
use tokio::sync::{Mutex as AsyncMutex, Semaphore};

type ChildHandle = Arc<AsyncMutex<Child>>;

pub struct LocalBackend {
    semaphore: Arc<Semaphore>,
    children: Arc<Mutex<HashMap<String, ChildHandle>>>,
}

impl LocalBackend {
    pub fn new() -> Self {
        Self::with_capacity(num_cpus())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(capacity.max(1))),
            children: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl Default for LocalBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

#[async_trait]
impl Backend for LocalBackend {
    async fn submit(
        &self,
        working_dir: &WorkingDir,
        wrapper_invocation: &str,
    ) -> Result<BatchId, BackendError> {
        let permit = self
            .semaphore
            .clone()
            .try_acquire_owned()
            .map_err(|_| BackendError::Launch("local pool at capacity".to_string()))?;

        let stdout = std::fs::File::create(working_dir.stdout())
            .map_err(|e| BackendError::Launch(e.to_string()))?;
        let stderr = std::fs::File::create(working_dir.stderr())
            .map_err(|e| BackendError::Launch(e.to_string()))?;

        let child = tokio::process::Command::new("bash")
            .arg("-lc")
            .arg(wrapper_invocation)
            .current_dir(working_dir.root())
            .stdout(Stdio::from(stdout))
            .stderr(Stdio::from(stderr))
            .spawn()
            .map_err(|e| BackendError::Launch(e.to_string()))?;

        let pid = child
            .id()
            .ok_or_else(|| BackendError::Launch("child exited before reporting a pid".to_string()))?
            .to_string();

        let handle: ChildHandle = Arc::new(AsyncMutex::new(child));
        self.children.lock().insert(pid.clone(), handle.clone());

        // Release this job's pool slot (and drop its bookkeeping entry) only
        // once the child actually exits, so the pool bound reflects jobs
        // genuinely running rather than jobs merely launched.
        let children = self.children.clone();
        let reap_key = pid.clone();
        tokio::spawn(async move {
            let _ = handle.lock().await.wait().await;
            children.lock().remove(&reap_key);
            drop(permit);
        });

        Ok(BatchId::Scheduler(pid))
    }

    async fn cancel(&self, batch_id: &str) -> Result<(), BackendError> {
        let handle = self.children.lock().get(batch_id).cloned();
        let Some(handle) = handle else {
            return Ok(());
        };
        let result = handle
            .lock()
            .await
            .kill()
            .await
            .map_err(|e| BackendError::Cancel {
                batch_id: batch_id.to_string(),
                source: e,
            });
        result
    }
}

#[cfg(test)]
#[path = "local_tests.rs"]
mod tests;
