// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Environment capture for batch submissions.
//!
//! Slurm and HTCondor jobs run in a scheduler-managed shell, not the one
//! that called `start_job`, so the caller's process environment is
//! snapshotted to a `KEY="value"` file and sourced by `submit.sh` before the
//! wrapper is invoked.

use std::io::Write;
use std::path::Path;

/// True for names `bash -x` would export as a variable rather than a
/// shell function (`BASH_FUNC_foo%%` and similar carry a `(` in the name).
fn is_exportable(key: &str) -> bool {
    !key.contains('(')
}

pub fn write_environment(path: impl AsRef<Path>) -> std::io::Result<()> {
    write_environment_from(path, std::env::vars())
}

fn write_environment_from(
    path: impl AsRef<Path>,
    vars: impl IntoIterator<Item = (String, String)>,
) -> std::io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    let mut entries: Vec<(String, String)> = vars.into_iter().filter(|(k, _)| is_exportable(k)).collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    for (key, value) in entries {
        writeln!(file, "{key}=\"{value}\"")?;
    }
    Ok(())
}

/// Test-only entry point taking an explicit snapshot instead of the real
/// process environment, so capture filtering can be exercised deterministically.
#[cfg(any(test, feature = "test-support"))]
pub fn write_environment_map(
    path: impl AsRef<Path>,
    vars: &std::collections::HashMap<String, String>,
) -> std::io::Result<()> {
    write_environment_from(path, vars.iter().map(|(k, v)| (k.clone(), v.clone())))
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
