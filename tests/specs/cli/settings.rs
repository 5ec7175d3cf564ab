// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::prelude::*;

#[test]
fn path_points_into_config_dir() {
    let sandbox = Sandbox::new();
    let out = sandbox.cli().args(&["settings", "path"]).passes();
    assert_eq!(out.stdout().trim(), sandbox.settings_file().display().to_string());
}

#[test]
fn show_without_file_prints_defaults() {
    let sandbox = Sandbox::new();
    sandbox
        .cli()
        .args(&["settings", "show"])
        .passes()
        .stdout_has("standard")
        .stdout_has("nvenc")
        .stdout_has("7200s (2h)");
    assert!(!sandbox.settings_file().exists());
}

#[test]
fn set_persists_for_later_commands() {
    let sandbox = Sandbox::new();
    sandbox
        .cli()
        .args(&["settings", "set", "-i", "/videos/in", "-o", "/videos/out", "-m", "restart"])
        .args(&["--timeout", "600", "--quick"])
        .passes();

    let out = sandbox.cli().args(&["settings", "show", "-o", "json"]).passes();
    let doc: serde_json::Value = serde_json::from_str(&out.stdout()).unwrap();
    assert_eq!(doc["input_dir"], "/videos/in");
    assert_eq!(doc["output_dir"], "/videos/out");
    assert_eq!(doc["mode"], "restart");
    assert_eq!(doc["timeout_secs"], 600);
    assert_eq!(doc["quick"], true);
}

#[test]
fn custom_encoder_is_written_to_file() {
    let sandbox = Sandbox::new();
    sandbox.cli().args(&["settings", "set", "--custom-encoder", "av1_qsv"]).passes();

    let text = std::fs::read_to_string(sandbox.settings_file()).unwrap();
    assert!(text.contains("encoder = \"custom\""), "{text}");
    assert!(text.contains("custom_encoder = \"av1_qsv\""), "{text}");
    sandbox.cli().args(&["settings", "show"]).passes().stdout_has("custom (av1_qsv)");
}

#[test]
fn reset_restores_defaults() {
    let sandbox = Sandbox::new();
    sandbox.cli().args(&["settings", "set", "-c", "quality", "--debug"]).passes();
    sandbox.cli().args(&["settings", "reset"]).passes().stdout_has("Settings reset:");
    sandbox
        .cli()
        .args(&["settings", "show"])
        .passes()
        .stdout_has("standard")
        .stdout_lacks("quality");
}

#[test]
fn malformed_file_falls_back_to_defaults() {
    let sandbox = Sandbox::new();
    std::fs::create_dir_all(sandbox.config_dir()).unwrap();
    std::fs::write(sandbox.settings_file(), "[paths\ninput_dir = ").unwrap();
    sandbox.cli().args(&["settings", "show"]).passes().stdout_has("7200s (2h)");
}
