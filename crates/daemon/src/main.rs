// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ferryd`: the per-site client daemon.
//!
//! Invocation: `ferryd <callsign> [--exec-path <path>]`. Argument and
//! callsign validation happen before the RPC listener binds, so a bad
//! invocation always produces the handshake's `error` form — never a port
//! line for a process that can't actually serve requests.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use ferry_daemon::{Client, SiteKind};

const EOF_SENTINEL: &str = "=EOF=";

fn print_handshake_error(message: &str) {
    println!("error");
    for line in message.lines() {
        println!("{line}");
    }
    println!("{EOF_SENTINEL}");
    let _ = std::io::stdout().flush();
}

fn wrapper_binary_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|d| d.join("ferry-wrap")))
        .unwrap_or_else(|| PathBuf::from("ferry-wrap"))
}

fn log_path(callsign: &str) -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("ferry")
        .join(format!("{callsign}-client.log"))
}

fn config_dir() -> PathBuf {
    dirs::config_dir().unwrap_or_else(std::env::temp_dir)
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let args: Vec<String> = std::env::args().collect();

    if let Some(flag) = args.get(1) {
        match flag.as_str() {
            "--version" | "-V" => {
                println!("ferryd {}", env!("CARGO_PKG_VERSION"));
                return std::process::ExitCode::SUCCESS;
            }
            "--help" | "-h" => {
                println!("ferryd {}", env!("CARGO_PKG_VERSION"));
                println!("Per-site job client. Invoked by a driver's transport, not directly.");
                println!();
                println!("USAGE:");
                println!("    ferryd <callsign> [--exec-path <path>]");
                return std::process::ExitCode::SUCCESS;
            }
            _ => {}
        }
    }

    if args.len() < 2 {
        print_handshake_error("Incorrect number of parameters");
        return std::process::ExitCode::FAILURE;
    }

    let callsign = args[1].clone();
    let Some(site) = SiteKind::from_callsign(&callsign) else {
        print_handshake_error(&format!("Session type {callsign} does not exist."));
        return std::process::ExitCode::FAILURE;
    };

    let mut exec_path: Option<String> = None;
    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--exec-path" => {
                let Some(value) = args.get(i + 1) else {
                    print_handshake_error("--exec-path requires a value");
                    return std::process::ExitCode::FAILURE;
                };
                exec_path = Some(value.clone());
                i += 2;
            }
            other => {
                print_handshake_error(&format!("unrecognized argument: {other}"));
                return std::process::ExitCode::FAILURE;
            }
        }
    }

    let _log_guard = match ferry_daemon::logging::setup_logging(&log_path(&callsign)) {
        Ok(guard) => Some(guard),
        Err(_) => None,
    };

    let client = Arc::new(Client::new(callsign.clone(), site.build_backend(), wrapper_binary_path()));
    if let Some(path) = exec_path {
        if let Err(e) = client.set_exec_path(Some(path)) {
            print_handshake_error(&e.to_string());
            return std::process::ExitCode::FAILURE;
        }
    }

    let listener = match ferry_daemon::listener::Listener::bind(client).await {
        Ok(listener) => listener,
        Err(e) => {
            print_handshake_error(&e.to_string());
            return std::process::ExitCode::FAILURE;
        }
    };
    let port = match listener.port() {
        Ok(port) => port,
        Err(e) => {
            print_handshake_error(&e.to_string());
            return std::process::ExitCode::FAILURE;
        }
    };
    let _ = ferry_daemon::config::ClientConfig::write(&config_dir(), &callsign, port);

    println!("{port}");
    println!("{EOF_SENTINEL}");
    let _ = std::io::stdout().flush();

    tracing::info!(callsign, port, "client started");
    listener.run().await;
    std::process::ExitCode::SUCCESS
}
