// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Reaching a client daemon: same-host over a bare `TcpStream`
//! ([`LocalTransport`]), or on a remote site over an SSH-bootstrapped
//! local-forward tunnel ([`SshTransport`]).

mod handshake;
mod local;
mod ssh;
mod transport;

pub use handshake::{Handshake, HandshakeReader};
pub use local::{LocalConfig, LocalTransport};
pub use ssh::{KeySource, SshConfig, SshTransport};
pub use transport::{message_to_error, Transport};
