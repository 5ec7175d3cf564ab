// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::prelude::*;

#[test]
fn help_lists_subcommands() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("Usage:")
        .stdout_has("run")
        .stdout_has("args")
        .stdout_has("settings");
}

#[test]
fn run_help_lists_options() {
    cli()
        .args(&["run", "--help"])
        .passes()
        .stdout_has("--input")
        .stdout_has("--compression")
        .stdout_has("--yes")
        .stdout_lacks("--no-quick");
}

#[test]
fn version_is_reported() {
    cli().args(&["--version"]).passes().stdout_has("tav 0.2");
}

#[test]
fn unknown_subcommand_is_a_usage_error() {
    cli().args(&["encode"]).exits(2).stderr_has("Usage:");
}

#[test]
fn bad_compression_is_rejected() {
    let sandbox = Sandbox::new();
    sandbox.cli().args(&["args", "-c", "tiny"]).exits(2).stderr_has("tiny");
}

#[test]
fn settings_requires_a_subcommand() {
    cli().args(&["settings"]).fails().stderr_has("Usage:");
}
