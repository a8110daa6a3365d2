// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Entries reported by `get_job_file_list`, derived on demand by walking a
//! job's working directory. Never persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::SystemTime;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobFile {
    pub name: String,
    pub size: u64,
    pub mtime: DateTime<Utc>,
}

impl JobFile {
    pub fn from_metadata(name: String, metadata: &std::fs::Metadata) -> std::io::Result<Self> {
        let modified: SystemTime = metadata.modified()?;
        Ok(Self {
            name,
            size: metadata.len(),
            mtime: DateTime::<Utc>::from(modified),
        })
    }
}

#[cfg(test)]
#[path = "job_file_tests.rs"]
mod tests;
