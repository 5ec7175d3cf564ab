// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Helpers shared by the specs: a sandboxed `tav` invocation and fluent
//! assertions on its output.

use std::path::{Path, PathBuf};
use std::process::Output;
use std::sync::OnceLock;
use tempfile::TempDir;

/// Path to the `tav` binary, building it once if this test run did not.
fn tav_binary() -> &'static Path {
    static BIN: OnceLock<PathBuf> = OnceLock::new();
    BIN.get_or_init(|| {
        let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        let target = std::env::var_os("CARGO_TARGET_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| root.join("target"));
        let bin = target.join("debug").join(format!("tav{}", std::env::consts::EXE_SUFFIX));
        let cargo = std::env::var_os("CARGO").unwrap_or_else(|| "cargo".into());
        let status = std::process::Command::new(cargo)
            .args(["build", "--quiet", "-p", "tav", "--bin", "tav"])
            .current_dir(&root)
            .status()
            .expect("failed to run cargo build");
        assert!(status.success(), "building tav failed");
        bin
    })
}

/// Isolated config and state directories for one spec.
pub struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self { dir: TempDir::new().unwrap() }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn config_dir(&self) -> PathBuf {
        self.path().join("config")
    }

    pub fn state_dir(&self) -> PathBuf {
        self.path().join("state")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.config_dir().join("settings.toml")
    }

    /// Create a directory inside the sandbox and return its path as a string.
    pub fn mkdir(&self, name: &str) -> String {
        let dir = self.path().join(name);
        std::fs::create_dir_all(&dir).unwrap();
        dir.display().to_string()
    }

    /// Write an executable shell script standing in for the worker.
    #[cfg(unix)]
    pub fn worker(&self, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;
        let path = self.path().join("TransAV1_CUI");
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    pub fn cli(&self) -> CliBuilder {
        cli()
            .env("TAV_CONFIG_DIR", &self.config_dir().display().to_string())
            .env("TAV_STATE_DIR", &self.state_dir().display().to_string())
    }
}

/// Start building a `tav` invocation.
pub fn cli() -> CliBuilder {
    CliBuilder { args: Vec::new(), envs: vec![("NO_COLOR".into(), "1".into())] }
}

pub struct CliBuilder {
    args: Vec<String>,
    envs: Vec<(String, String)>,
}

impl CliBuilder {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|a| a.to_string()));
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    fn output(self) -> Output {
        let mut cmd = assert_cmd::Command::new(tav_binary());
        for key in ["TAV_CONFIG_DIR", "TAV_STATE_DIR", "TAV_WORKER_PATH", "TAV_LOG", "COLOR"] {
            cmd.env_remove(key);
        }
        cmd.args(&self.args).envs(self.envs).write_stdin("");
        cmd.output().unwrap()
    }

    /// Run and require exit code 0.
    pub fn passes(self) -> RunAssert {
        self.exits(0)
    }

    /// Run and require a non-zero exit code.
    pub fn fails(self) -> RunAssert {
        let out = RunAssert { output: self.output() };
        assert!(!out.output.status.success(), "expected failure\n{}", out.describe());
        out
    }

    pub fn exits(self, code: i32) -> RunAssert {
        let out = RunAssert { output: self.output() };
        assert_eq!(out.output.status.code(), Some(code), "unexpected exit\n{}", out.describe());
        out
    }
}

pub struct RunAssert {
    output: Output,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(self.stdout().contains(needle), "stdout lacks {needle:?}\n{}", self.describe());
        self
    }

    pub fn stdout_lacks(self, needle: &str) -> Self {
        assert!(!self.stdout().contains(needle), "stdout has {needle:?}\n{}", self.describe());
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(self.stderr().contains(needle), "stderr lacks {needle:?}\n{}", self.describe());
        self
    }

    fn describe(&self) -> String {
        format!(
            "status: {:?}\n--- stdout ---\n{}\n--- stderr ---\n{}",
            self.output.status.code(),
            self.stdout(),
            self.stderr()
        )
    }
}
