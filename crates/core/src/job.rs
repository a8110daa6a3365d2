// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job identity and the registry row shape.

use crate::status::Status;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

crate::define_id! {
    /// UUIDv4 identifier for a single job run, unique within an execution root.
    pub struct JobId;
}

impl JobId {
    /// Generate a fresh identifier using the given ID generator.
    pub fn generate(gen: &dyn crate::id::IdGen) -> Self {
        JobId(gen.next())
    }
}

/// A job as tracked by the client's persistent registry.
///
/// `id` is the registry's autoincrement row number (insertion order);
/// `identifier` is the UUID the driver sees. `batch_id` is the scheduler's
/// handle (Slurm job ID, Condor cluster ID, or local pool task handle) and
/// may be absent until the backend acknowledges submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: i64,
    pub identifier: JobId,
    pub batch_id: Option<String>,
    pub status: Status,
    pub start_time: DateTime<Utc>,
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
