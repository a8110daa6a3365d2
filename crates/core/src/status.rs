// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job lifecycle status.
//!
//! Ordering is monotonic: `Pending < Queued < Running < Completed`, with
//! `Error` and `Cancelled` as terminal failure states that rank above
//! `Completed` so that, once recorded, nothing can demote them. Status only
//! ever moves forward — see [`Status::promote`].

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Pending,
    Queued,
    Running,
    Completed,
    Error,
    Cancelled,
}

impl Status {
    /// True if no further transition is possible.
    pub fn is_terminal(self) -> bool {
        matches!(self, Status::Completed | Status::Error | Status::Cancelled)
    }

    /// Adopt `candidate` only if it is strictly further along than `self`.
    /// Never demotes — this is the only way callers should move a job's
    /// recorded status forward.
    pub fn promote(self, candidate: Status) -> Status {
        if candidate > self {
            candidate
        } else {
            self
        }
    }

    /// Numeric code as stored in the registry's `status` column.
    pub fn code(self) -> i64 {
        match self {
            Status::Pending => 0,
            Status::Queued => 1,
            Status::Running => 2,
            Status::Completed => 3,
            Status::Error => 4,
            Status::Cancelled => 5,
        }
    }

    pub fn from_code(code: i64) -> Option<Status> {
        match code {
            0 => Some(Status::Pending),
            1 => Some(Status::Queued),
            2 => Some(Status::Running),
            3 => Some(Status::Completed),
            4 => Some(Status::Error),
            5 => Some(Status::Cancelled),
            _ => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Status::Pending => "pending",
            Status::Queued => "queued",
            Status::Running => "running",
            Status::Completed => "completed",
            Status::Error => "error",
            Status::Cancelled => "cancelled",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
