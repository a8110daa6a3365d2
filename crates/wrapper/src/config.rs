// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reads `wrapper.ini`, the one file a client writes by hand rather than
//! through `toml`: `[wrapper]\nport=<int>\n`. Parsed by hand to match.

use std::path::Path;

pub fn read_client_port(path: &Path) -> Option<u16> {
    let body = std::fs::read_to_string(path).ok()?;
    body.lines()
        .find_map(|line| line.strip_prefix("port="))
        .and_then(|value| value.trim().parse().ok())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
