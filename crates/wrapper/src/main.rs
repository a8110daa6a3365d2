// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ferry-wrap`: spawned by a client's backend with its working directory
//! already current (the process's own `chdir`, done by the backend before
//! exec). Finds its identity from that directory's name, runs the
//! bootstrap sequence, and always exits 0 — `finished` is the only signal
//! a driver is meant to read.

use std::path::PathBuf;

use ferry_core::{JobId, WorkingDir};
use ferry_wrapper::{bootstrap, logging, ExternalInterpreter};

const DEFAULT_INTERPRETER: &str = "finesse";
const INTERPRETER_ENV_VAR: &str = "FERRY_INTERPRETER";

fn current_working_dir() -> std::io::Result<WorkingDir> {
    let cwd = std::env::current_dir()?;
    let identifier = cwd
        .file_name()
        .ok_or_else(|| std::io::Error::other("working directory has no final path component"))?
        .to_string_lossy()
        .to_string();
    let exec_root = cwd.parent().map(PathBuf::from).unwrap_or(cwd.clone());
    Ok(WorkingDir::new(exec_root, &JobId::new(identifier)))
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let working_dir = match current_working_dir() {
        Ok(wd) => wd,
        Err(e) => {
            eprintln!("ferry-wrap: {e}");
            return std::process::ExitCode::SUCCESS;
        }
    };

    let _guard = match logging::setup_logging(&working_dir.root().join("wrapper.log")) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("ferry-wrap: failed to set up logging: {e}");
            None
        }
    };

    let command = std::env::var(INTERPRETER_ENV_VAR).unwrap_or_else(|_| DEFAULT_INTERPRETER.to_string());
    let interpreter = ExternalInterpreter::new(command);

    bootstrap::run(&working_dir, &interpreter).await;

    std::process::ExitCode::SUCCESS
}
