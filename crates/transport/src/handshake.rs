// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A freshly spawned client daemon writes a single handshake to its
//! stdout before it opens its RPC listener: the first line is either a
//! decimal port or the literal `error`; an `error` first line is followed
//! by diagnostic lines, and the block always ends with a line reading
//! exactly `=EOF=`.
//!
//! Argument and callsign validation happens before the daemon binds its
//! listener, so a malformed invocation always produces the `error` form —
//! a caller never sees a port line for an invocation that can't actually
//! serve requests.

pub const EOF_SENTINEL: &str = "=EOF=";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Handshake {
    Port(u16),
    Error(String),
}

#[derive(Debug, Clone)]
pub struct HandshakeReader {
    lines: Vec<String>,
}

impl HandshakeReader {
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Feed one more line of output. Returns the handshake once the EOF
    /// sentinel has been seen.
    pub fn push_line(&mut self, line: String) -> Option<Handshake> {
        if line == EOF_SENTINEL {
            return Some(self.finish());
        }
        self.lines.push(line);
        None
    }

    /// Force completion without having seen the EOF sentinel — used when
    /// the underlying stream closed first (e.g. a dropped SSH channel).
    pub fn finish(&self) -> Handshake {
        match self.lines.first() {
            Some(first) if first == "error" => {
                Handshake::Error(self.lines[1..].join("\n"))
            }
            Some(first) => match first.trim().parse::<u16>() {
                Ok(port) => Handshake::Port(port),
                Err(_) => Handshake::Error(self.lines.join("\n")),
            },
            None => Handshake::Error(String::new()),
        }
    }
}

impl Default for HandshakeReader {
    fn default() -> Self {
        Self::new()
    }
}

pub async fn read_handshake<R>(reader: &mut R) -> std::io::Result<Handshake>
where
    R: tokio::io::AsyncBufRead + Unpin,
{
    use tokio::io::AsyncBufReadExt;

    let mut state = HandshakeReader::new();
    let mut line = String::new();
    loop {
        line.clear();
        let n = reader.read_line(&mut line).await?;
        if n == 0 {
            return Ok(state.finish());
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).to_string();
        if let Some(handshake) = state.push_line(trimmed) {
            return Ok(handshake);
        }
    }
}

#[cfg(test)]
#[path = "handshake_tests.rs"]
mod tests;
