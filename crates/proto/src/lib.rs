// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ferry-proto: the RPC dialect spoken between a driver's transport, a
//! client daemon, and a job's wrapper.
//!
//! Wire framing (`wire`) is a 4-byte length prefix plus a JSON payload.
//! Every [`Response`] carries a value slot and a message slot rather than
//! raising: a handler that fails returns `value: None, message: Some(..)`,
//! and the transport on the calling side is responsible for turning that
//! pair into a typed [`ferry_core::error`].

pub mod dto;
pub mod request;
pub mod response;
pub mod wire;

pub use dto::{JobFileEntry, JobSummary};
pub use request::{Request, CLIENT_METHODS, WRAPPER_METHODS};
pub use response::Response;
pub use wire::ProtocolError;
