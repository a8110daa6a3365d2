// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The script interpreter is an opaque callable: something that consumes
//! `script.k` and writes `data.pickle`, with no contract on what happens
//! in between. This crate never looks inside it — it just runs the
//! configured command with the job's working directory as its own, and
//! captures its stdio into `out.log`/`out.err`.

use async_trait::async_trait;
use ferry_core::WorkingDir;
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};

#[async_trait]
pub trait Interpreter: Send + Sync {
    async fn run(&self, working_dir: &WorkingDir) -> std::io::Result<ExitStatus>;
}

/// Runs an external command against `script.k`, inheriting the working
/// directory as both its `cwd` and the home of `out.log`/`out.err`.
pub struct ExternalInterpreter {
    command: PathBuf,
}

impl ExternalInterpreter {
    pub fn new(command: impl Into<PathBuf>) -> Self {
        Self { command: command.into() }
    }
}

#[async_trait]
impl Interpreter for ExternalInterpreter {
    async fn run(&self, working_dir: &WorkingDir) -> std::io::Result<ExitStatus> {
        let stdout = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(working_dir.stdout())?;
        let stderr = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(working_dir.stderr())?;

        tokio::process::Command::new(&self.command)
            .arg(working_dir.script())
            .current_dir(working_dir.root())
            .stdout(Stdio::from(stdout))
            .stderr(Stdio::from(stderr))
            .status()
            .await
    }
}

#[cfg(test)]
#[path = "interpreter_tests.rs"]
mod tests;
