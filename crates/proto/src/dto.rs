// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wire-shaped data transfer objects, mirroring `ferry-core` types but
//! independent of them so the wire format doesn't change shape just because
//! an internal field gets renamed.

use chrono::{DateTime, Utc};
use ferry_core::{Job, JobFile};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSummary {
    pub identifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_id: Option<String>,
    pub status: String,
    pub start_time: DateTime<Utc>,
}

impl From<&Job> for JobSummary {
    fn from(job: &Job) -> Self {
        Self {
            identifier: job.identifier.to_string(),
            batch_id: job.batch_id.clone(),
            status: job.status.to_string(),
            start_time: job.start_time,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobFileEntry {
    pub name: String,
    pub size: u64,
    pub mtime: DateTime<Utc>,
}

impl From<&JobFile> for JobFileEntry {
    fn from(file: &JobFile) -> Self {
        Self {
            name: file.name.clone(),
            size: file.size,
            mtime: file.mtime,
        }
    }
}

#[cfg(test)]
#[path = "dto_tests.rs"]
mod tests;
