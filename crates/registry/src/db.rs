// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! sqlite-backed job registry.
//!
//! One table, `jobs`, matching the on-disk contract a driver's transport
//! can rely on across client restarts. Status updates go through
//! [`Registry::promote_status`], which never demotes a job's recorded
//! status — the same monotonic rule as [`ferry_core::Status::promote`],
//! just enforced across a write instead of in memory.

use chrono::{DateTime, TimeZone, Utc};
use ferry_core::error::RegistryError;
use ferry_core::{Job, JobId, Status};
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

fn sqlite_err(e: rusqlite::Error) -> RegistryError {
    RegistryError::Sqlite(e.to_string())
}

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS jobs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    identifier TEXT UNIQUE NOT NULL,
    batch_id TEXT,
    status INTEGER NOT NULL,
    start_time TIMESTAMP NOT NULL DEFAULT (unixepoch())
);
"#;

pub struct Registry {
    conn: Mutex<Connection>,
}

impl Registry {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let conn = Connection::open(path).map_err(sqlite_err)?;
        conn.execute_batch(SCHEMA).map_err(sqlite_err)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn in_memory() -> Result<Self, RegistryError> {
        let conn = Connection::open_in_memory().map_err(sqlite_err)?;
        conn.execute_batch(SCHEMA).map_err(sqlite_err)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Insert a fresh job row with status `Pending`, returning its
    /// autoincrement row id.
    pub fn add_job(
        &self,
        identifier: &JobId,
        start_time: DateTime<Utc>,
    ) -> Result<i64, RegistryError> {
        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO jobs (identifier, batch_id, status, start_time) VALUES (?1, NULL, ?2, ?3)",
            params![identifier.as_str(), Status::Pending.code(), start_time.timestamp()],
        )
        .map_err(sqlite_err)?;
        Ok(conn.last_insert_rowid())
    }

    pub fn set_batch_id(&self, identifier: &JobId, batch_id: &str) -> Result<(), RegistryError> {
        let conn = self.conn.lock();
        let changed = conn
            .execute(
                "UPDATE jobs SET batch_id = ?1 WHERE identifier = ?2",
                params![batch_id, identifier.as_str()],
            )
            .map_err(sqlite_err)?;
        if changed == 0 {
            return Err(RegistryError::UnknownJob(identifier.to_string()));
        }
        Ok(())
    }

    /// Apply `candidate` via [`Status::promote`] and persist the result.
    /// Never demotes a job already recorded as further along.
    pub fn promote_status(
        &self,
        identifier: &JobId,
        candidate: Status,
    ) -> Result<Status, RegistryError> {
        let conn = self.conn.lock();
        let current_code: i64 = conn
            .query_row(
                "SELECT status FROM jobs WHERE identifier = ?1",
                params![identifier.as_str()],
                |row| row.get(0),
            )
            .optional()
            .map_err(sqlite_err)?
            .ok_or_else(|| RegistryError::UnknownJob(identifier.to_string()))?;
        let current = Status::from_code(current_code)
            .ok_or_else(|| RegistryError::Sqlite(format!("corrupt status code {current_code}")))?;
        let next = current.promote(candidate);
        if next != current {
            conn.execute(
                "UPDATE jobs SET status = ?1 WHERE identifier = ?2",
                params![next.code(), identifier.as_str()],
            )
            .map_err(sqlite_err)?;
        }
        Ok(next)
    }

    /// Force a job's status unconditionally, bypassing the monotonic
    /// promotion rule. Used only where an on-disk sentinel is itself the
    /// authority on job completion, regardless of whatever status was last
    /// recorded.
    pub fn force_status(&self, identifier: &JobId, status: Status) -> Result<(), RegistryError> {
        let conn = self.conn.lock();
        let changed = conn
            .execute(
                "UPDATE jobs SET status = ?1 WHERE identifier = ?2",
                params![status.code(), identifier.as_str()],
            )
            .map_err(sqlite_err)?;
        if changed == 0 {
            return Err(RegistryError::UnknownJob(identifier.to_string()));
        }
        Ok(())
    }

    pub fn get_job_status(&self, identifier: &JobId) -> Result<Status, RegistryError> {
        Ok(self.get_job(identifier)?.status)
    }

    pub fn get_job_batch_id(&self, identifier: &JobId) -> Result<Option<String>, RegistryError> {
        Ok(self.get_job(identifier)?.batch_id)
    }

    pub fn get_job(&self, identifier: &JobId) -> Result<Job, RegistryError> {
        let conn = self.conn.lock();
        conn.query_row(
            "SELECT id, identifier, batch_id, status, start_time FROM jobs WHERE identifier = ?1",
            params![identifier.as_str()],
            row_to_job,
        )
        .optional()
        .map_err(sqlite_err)?
        .ok_or_else(|| RegistryError::UnknownJob(identifier.to_string()))
    }

    /// Best-effort removal of a job row, used when a submission fails after
    /// the row was already inserted. Not an error if the row is already gone.
    pub fn remove_job(&self, identifier: &JobId) -> Result<(), RegistryError> {
        let conn = self.conn.lock();
        conn.execute(
            "DELETE FROM jobs WHERE identifier = ?1",
            params![identifier.as_str()],
        )
        .map_err(sqlite_err)?;
        Ok(())
    }

    pub fn get_jobs(&self) -> Result<Vec<Job>, RegistryError> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare("SELECT id, identifier, batch_id, status, start_time FROM jobs ORDER BY id")
            .map_err(sqlite_err)?;
        let rows = stmt.query_map([], row_to_job).map_err(sqlite_err)?;
        let mut jobs = Vec::new();
        for row in rows {
            jobs.push(row.map_err(sqlite_err)?);
        }
        Ok(jobs)
    }
}

fn row_to_job(row: &rusqlite::Row<'_>) -> rusqlite::Result<Job> {
    let identifier: String = row.get(1)?;
    let batch_id: Option<String> = row.get(2)?;
    let status_code: i64 = row.get(3)?;
    let start_time_epoch: i64 = row.get(4)?;
    let status = Status::from_code(status_code).unwrap_or(Status::Pending);
    let start_time = Utc
        .timestamp_opt(start_time_epoch, 0)
        .single()
        .unwrap_or_else(Utc::now);
    Ok(Job {
        id: row.get(0)?,
        identifier: JobId::new(identifier),
        batch_id,
        status,
        start_time,
    })
}

#[cfg(test)]
#[path = "db_tests.rs"]
mod tests;
