// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn parses_set_ssh_key_with_three_positional_args() {
    let cli = Cli::try_parse_from(["ferry", "set-ssh-key", "ssh", "host.example.edu", "/tmp/key"]).unwrap();
    let Commands::SetSshKey { args } = cli.command else { panic!("wrong variant") };
    assert_eq!(args, vec!["ssh", "host.example.edu", "/tmp/key"]);
}

#[test]
fn parses_remove_ssh_key_with_one_positional_arg() {
    let cli = Cli::try_parse_from(["ferry", "remove-ssh-key", "slurm"]).unwrap();
    let Commands::RemoveSshKey { args } = cli.command else { panic!("wrong variant") };
    assert_eq!(args, vec!["slurm"]);
}

#[test]
fn rejects_an_unknown_subcommand() {
    assert!(Cli::try_parse_from(["ferry", "bogus"]).is_err());
}
