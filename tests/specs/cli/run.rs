// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::prelude::*;

fn dirs(sandbox: &Sandbox) -> (String, String) {
    (sandbox.mkdir("in"), sandbox.mkdir("out"))
}

#[test]
fn streams_worker_output_and_succeeds() {
    let sandbox = Sandbox::new();
    let worker = sandbox.worker(r#"echo "encoding $*"; echo done"#);
    let (input, output) = dirs(&sandbox);

    sandbox
        .cli()
        .env("TAV_WORKER_PATH", &worker.display().to_string())
        .args(&["run", "-i", &input, "-o", &output])
        .passes()
        .stdout_has(&format!("encoding -s {input} -o {output}"))
        .stdout_has("done")
        .stdout_has("[tav] worker started (pid")
        .stdout_has("Finished");
}

#[test]
fn worker_exit_code_is_propagated() {
    let sandbox = Sandbox::new();
    let worker = sandbox.worker("echo broken 1>&2; exit 3");
    let (input, output) = dirs(&sandbox);

    sandbox
        .cli()
        .env("TAV_WORKER_PATH", &worker.display().to_string())
        .args(&["run", "-i", &input, "-o", &output])
        .exits(3)
        .stdout_has("[stderr] broken")
        .stderr_has("exited with code 3");
}

#[test]
fn quiet_failure_prints_last_output() {
    let sandbox = Sandbox::new();
    let worker = sandbox.worker("echo step one; echo step two; exit 4");
    let (input, output) = dirs(&sandbox);

    sandbox
        .cli()
        .env("TAV_WORKER_PATH", &worker.display().to_string())
        .args(&["run", "-q", "-i", &input, "-o", &output])
        .exits(4)
        .stdout_lacks("step one")
        .stderr_has("Last output:")
        .stderr_has("step two");
}

#[test]
fn missing_worker_fails_to_start() {
    let sandbox = Sandbox::new();
    let (input, output) = dirs(&sandbox);
    let missing = sandbox.path().join("nowhere").join("TransAV1_CUI");

    sandbox
        .cli()
        .env("TAV_WORKER_PATH", &missing.display().to_string())
        .args(&["run", "-i", &input, "-o", &output])
        .exits(1)
        .stderr_has("worker executable not found");
}

#[test]
fn missing_input_is_a_usage_error() {
    let sandbox = Sandbox::new();
    let worker = sandbox.worker("exit 0");
    sandbox
        .cli()
        .env("TAV_WORKER_PATH", &worker.display().to_string())
        .args(&["run", "-o", "/tmp/out"])
        .exits(2)
        .stderr_has("input directory is required");
}

#[test]
fn force_without_terminal_needs_yes() {
    let sandbox = Sandbox::new();
    let worker = sandbox.worker("echo wiped");
    let (input, output) = dirs(&sandbox);
    let path = worker.display().to_string();

    sandbox
        .cli()
        .env("TAV_WORKER_PATH", &path)
        .args(&["run", "-m", "force", "-i", &input, "-o", &output])
        .exits(2)
        .stderr_has("--yes");

    sandbox
        .cli()
        .env("TAV_WORKER_PATH", &path)
        .args(&["run", "-y", "-m", "force", "-i", &input, "-o", &output])
        .passes()
        .stdout_has("wiped");
}

#[test]
fn run_remembers_options() {
    let sandbox = Sandbox::new();
    let worker = sandbox.worker("exit 0");
    let (input, output) = dirs(&sandbox);

    sandbox
        .cli()
        .env("TAV_WORKER_PATH", &worker.display().to_string())
        .args(&["run", "-c", "quality", "-i", &input, "-o", &output])
        .passes();

    sandbox
        .cli()
        .args(&["settings", "show"])
        .passes()
        .stdout_has("quality")
        .stdout_has(&input);
}

#[test]
fn no_save_leaves_settings_untouched() {
    let sandbox = Sandbox::new();
    let worker = sandbox.worker("exit 0");
    let (input, output) = dirs(&sandbox);

    sandbox
        .cli()
        .env("TAV_WORKER_PATH", &worker.display().to_string())
        .args(&["run", "--no-save", "-i", &input, "-o", &output])
        .passes();
    assert!(!sandbox.settings_file().exists());
}
