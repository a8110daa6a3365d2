// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `set-ssh-key`/`remove-ssh-key`: the only CLI surface this system
//! specifies. A session either uses an SSH transport or it doesn't; the
//! generic `ssh` session keys by host instead of by session name, since
//! one `ssh` session can reach any number of machines.

use crate::api_config::ApiConfig;
use std::path::Path;

const KNOWN_CALLSIGNS: &[&str] = &["local", "ssh", "slurm", "condor"];

fn uses_ssh_transport(callsign: &str) -> bool {
    matches!(callsign, "ssh" | "slurm" | "condor")
}

fn is_generic(callsign: &str) -> bool {
    callsign == "ssh"
}

const SET_SSH_KEY_USAGE: &str = "\nUsage:\n\n\
1)  set-ssh-key <session> <private-key-path>\n\
        eg. set-ssh-key slurm ~/keys/my_cluster_key.pem\n\n\
2)  set-ssh-key ssh <host-name-or-ip> <private-key-path>\n\
        eg. set-ssh-key ssh myvm.hpc.example.edu ~/keys/my_vm_key.pem\n";

const REMOVE_SSH_KEY_USAGE: &str = "\nUsage:\n\n\
1)  remove-ssh-key <session>\n\
        eg. remove-ssh-key slurm\n\n\
2)  remove-ssh-key ssh <host-name-or-ip>\n\
        eg. remove-ssh-key ssh myvm.hpc.example.edu\n";

/// Returns the process exit code: 0 on success, 1 on any argument or
/// lookup error.
pub fn set_ssh_key(config_dir: &Path, args: &[String]) -> i32 {
    let Some(session) = args.first() else {
        println!("{SET_SSH_KEY_USAGE}");
        return 1;
    };
    if !KNOWN_CALLSIGNS.contains(&session.as_str()) {
        println!("{session} is not a valid session name.");
        return 1;
    }
    if !uses_ssh_transport(session) {
        println!("{session} is not a session that utilises an SSH Transport.");
        return 1;
    }

    let generic = is_generic(session);
    if args.len() != if generic { 3 } else { 2 } {
        println!("{SET_SSH_KEY_USAGE}");
        return 1;
    }

    let key_path = Path::new(if generic { &args[2] } else { &args[1] });
    if !key_path.exists() {
        println!("{} does not exist.", key_path.display());
        return 1;
    }
    let key = match std::fs::read_to_string(key_path) {
        Ok(key) => key,
        Err(e) => {
            println!("failed to read {}: {e}", key_path.display());
            return 1;
        }
    };

    let result = if generic {
        ApiConfig::set(config_dir, session, &args[1], &key)
    } else {
        ApiConfig::set(config_dir, session, "key", &key)
    };
    if let Err(e) = result {
        println!("failed to update configuration: {e}");
        return 1;
    }

    println!("SSH key for session {session} updated successfully.");
    0
}

/// Returns the process exit code: 0 on success, 1 on any argument or
/// lookup error.
pub fn remove_ssh_key(config_dir: &Path, args: &[String]) -> i32 {
    let Some(session) = args.first() else {
        println!("{REMOVE_SSH_KEY_USAGE}");
        return 1;
    };
    if !KNOWN_CALLSIGNS.contains(&session.as_str()) {
        println!("{session} is not a valid session name.");
        return 1;
    }
    if !uses_ssh_transport(session) {
        println!("{session} is not a session that utilises an SSH Transport.");
        return 1;
    }

    let generic = is_generic(session);
    if args.len() != if generic { 2 } else { 1 } {
        println!("{REMOVE_SSH_KEY_USAGE}");
        return 1;
    }

    let result = if generic {
        ApiConfig::remove(config_dir, session, &args[1])
    } else {
        ApiConfig::remove(config_dir, session, "key")
    };
    if let Err(e) = result {
        println!("failed to update configuration: {e}");
        return 1;
    }

    println!("SSH key for session {session} removed successfully.");
    0
}

#[cfg(test)]
#[path = "keys_tests.rs"]
mod tests;
