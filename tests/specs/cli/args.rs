// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::prelude::*;

#[test]
fn prints_worker_command_line() {
    let sandbox = Sandbox::new();
    sandbox
        .cli()
        .env("TAV_WORKER_PATH", "/opt/tav/TransAV1_CUI")
        .args(&["args", "-i", "/in", "-o", "/out"])
        .passes()
        .stdout_has("/opt/tav/TransAV1_CUI -s /in -o /out -hwopt")
        .stdout_has("-hwenc av1_nvenc")
        .stdout_has("-timeout 7200")
        .stdout_lacks("-restart");
}

#[test]
fn json_lists_argv() {
    let sandbox = Sandbox::new();
    let out = sandbox
        .cli()
        .env("TAV_WORKER_PATH", "/opt/tav/TransAV1_CUI")
        .args(&["args", "-i", "/in", "-o", "/out", "-e", "cpu", "-m", "force", "--json"])
        .passes();
    let doc: serde_json::Value = serde_json::from_str(&out.stdout()).unwrap();
    assert_eq!(doc["worker"], "/opt/tav/TransAV1_CUI");
    let argv: Vec<&str> = doc["args"].as_array().unwrap().iter().map(|a| a.as_str().unwrap()).collect();
    assert_eq!(&argv[..4], ["-s", "/in", "-o", "/out"]);
    assert!(argv.windows(2).any(|w| w == ["-cpuenc", "libsvtav1"]));
    assert!(argv.contains(&"-force"));
}

#[test]
fn does_not_save_settings() {
    let sandbox = Sandbox::new();
    sandbox.cli().args(&["args", "-i", "/in", "-o", "/out"]).passes();
    assert!(!sandbox.settings_file().exists());
}

#[test]
fn incomplete_options_only_warn() {
    let sandbox = Sandbox::new();
    sandbox
        .cli()
        .args(&["args"])
        .passes()
        .stderr_has("input directory is required")
        .stdout_has("-timeout 7200");
}
