// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker command-line assembly.
//!
//! An [`ArgumentProvider`] turns a [`Configuration`] into the ordered
//! flag/value pairs the worker understands. Providers are pure: the same
//! configuration always yields the same arguments.

use crate::config::{Compression, Configuration, Encoder, RunMode};
use std::ffi::OsString;
use std::fmt;

/// Hardware encoder selected by [`Encoder::Nvenc`].
pub const NVENC_ENCODER: &str = "av1_nvenc";

/// Software encoder selected by [`Encoder::Cpu`].
pub const CPU_ENCODER: &str = "libsvtav1";

/// One flag with its optional value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerArg {
    pub flag: &'static str,
    pub value: Option<OsString>,
}

impl WorkerArg {
    pub fn switch(flag: &'static str) -> Self {
        Self { flag, value: None }
    }

    pub fn with_value(flag: &'static str, value: impl Into<OsString>) -> Self {
        Self { flag, value: Some(value.into()) }
    }
}

impl fmt::Display for WorkerArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{} {}", self.flag, quote_for_display(&value.to_string_lossy())),
            None => f.write_str(self.flag),
        }
    }
}

/// Builds worker arguments from a configuration.
pub trait ArgumentProvider: Send + Sync + 'static {
    fn arguments(&self, config: &Configuration) -> Vec<WorkerArg>;
}

/// Flatten flag/value pairs into argv order.
pub fn to_argv(args: &[WorkerArg]) -> Vec<OsString> {
    let mut argv = Vec::with_capacity(args.len() * 2);
    for arg in args {
        argv.push(OsString::from(arg.flag));
        if let Some(value) = &arg.value {
            argv.push(value.clone());
        }
    }
    argv
}

/// Render arguments as a single human-readable command line.
pub fn display_command_line(args: &[WorkerArg]) -> String {
    args.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ")
}

fn quote_for_display(value: &str) -> String {
    if !value.is_empty() && !value.chars().any(|c| c.is_whitespace() || c == '"') {
        return value.to_string();
    }
    format!("\"{}\"", value.replace('"', "\\\""))
}

/// Argument layout of the `TransAV1_CUI` worker.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransAv1Args;

impl TransAv1Args {
    /// Encoder options (`-hwopt`, `-cpuopt`) for a compression tier.
    pub fn encoder_options(compression: Compression) -> (&'static str, &'static str) {
        match compression {
            Compression::Size => ("-cq 30 -preset p6", "-crf 30 -preset 8"),
            Compression::Standard => ("-cq 25 -preset p5", "-crf 28 -preset 7"),
            Compression::Quality => ("-cq 20 -preset p4", "-crf 25 -preset 6"),
        }
    }
}

impl ArgumentProvider for TransAv1Args {
    fn arguments(&self, config: &Configuration) -> Vec<WorkerArg> {
        let mut args = vec![
            WorkerArg::with_value("-s", config.input_dir.as_os_str()),
            WorkerArg::with_value("-o", config.output_dir.as_os_str()),
        ];
        if let Some(dir) = config.effective_ffmpeg_dir() {
            args.push(WorkerArg::with_value("-ffmpegdir", dir.as_os_str()));
        }

        let (hw_opts, cpu_opts) = Self::encoder_options(config.compression);
        args.push(WorkerArg::with_value("-hwopt", hw_opts));
        args.push(WorkerArg::with_value("-cpuopt", cpu_opts));

        match &config.encoder {
            Encoder::Nvenc => args.push(WorkerArg::with_value("-hwenc", NVENC_ENCODER)),
            Encoder::Cpu => args.push(WorkerArg::with_value("-cpuenc", CPU_ENCODER)),
            // CPU fallback stays at the worker's default
            Encoder::Custom(name) if !name.trim().is_empty() => {
                args.push(WorkerArg::with_value("-hwenc", name.trim()))
            }
            Encoder::Custom(_) => {}
        }

        match config.mode {
            RunMode::Normal => {}
            RunMode::Restart => args.push(WorkerArg::switch("-restart")),
            RunMode::ForceStart => args.push(WorkerArg::switch("-force")),
        }

        if config.quick {
            args.push(WorkerArg::switch("-quick"));
        }
        args.push(WorkerArg::with_value("-timeout", config.timeout_secs.to_string()));
        if config.debug {
            args.push(WorkerArg::switch("-debug"));
        }
        args
    }
}

#[cfg(test)]
#[path = "args_tests.rs"]
mod tests;
