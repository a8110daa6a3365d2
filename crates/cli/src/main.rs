// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ferry`: SSH key management for execution sites. The only CLI surface
//! this system exposes directly — everything else is the `Session` API,
//! used programmatically by a driver.

use clap::{Parser, Subcommand};
use ferry_cli::keys;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ferry", version, about = "SSH key management for ferry execution sites")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Configure the SSH private key used to connect to a session
    #[command(name = "set-ssh-key")]
    SetSshKey {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Remove a previously configured SSH key
    #[command(name = "remove-ssh-key")]
    RemoveSshKey {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

fn config_dir() -> PathBuf {
    dirs::config_dir().unwrap_or_else(std::env::temp_dir)
}

fn main() {
    let cli = Cli::parse();
    let code = match cli.command {
        Commands::SetSshKey { args } => keys::set_ssh_key(&config_dir(), &args),
        Commands::RemoveSshKey { args } => keys::remove_ssh_key(&config_dir(), &args),
    };
    std::process::exit(code);
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
