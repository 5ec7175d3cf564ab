// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-invocation overrides of the saved options.

use clap::Args;
use std::path::PathBuf;
use tav_core::{Compression, Configuration, Encoder, RunMode};

#[derive(Args, Debug, Default, Clone)]
pub struct OptionArgs {
    /// Directory with the source videos
    #[arg(long, short = 'i', value_name = "DIR")]
    pub input: Option<PathBuf>,

    /// Directory for the encoded output
    #[arg(long, short = 'o', value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Directory containing ffmpeg/ffprobe (empty string clears it)
    #[arg(long, value_name = "DIR")]
    pub ffmpeg_dir: Option<String>,

    /// Size/quality trade-off: size, standard, quality
    #[arg(long, short = 'c', value_name = "TIER")]
    pub compression: Option<Compression>,

    /// Encoder to try first
    #[arg(long, short = 'e', value_parser = [Encoder::NVENC_KEYWORD, Encoder::CPU_KEYWORD, Encoder::CUSTOM_KEYWORD])]
    pub encoder: Option<String>,

    /// ffmpeg encoder name for the custom encoder (implies --encoder custom)
    #[arg(long, value_name = "NAME")]
    pub custom_encoder: Option<String>,

    /// What to do with existing output: normal, restart, force
    #[arg(long, short = 'm', value_name = "MODE")]
    pub mode: Option<RunMode>,

    /// Quick mode
    #[arg(long, overrides_with = "no_quick")]
    pub quick: bool,
    #[arg(long, hide = true, overrides_with = "quick")]
    pub no_quick: bool,

    /// Per-file timeout in seconds (0 disables)
    #[arg(long, short = 't', value_name = "SECS")]
    pub timeout: Option<u32>,

    /// Ask the worker for debug output
    #[arg(long, overrides_with = "no_debug")]
    pub debug: bool,
    #[arg(long, hide = true, overrides_with = "debug")]
    pub no_debug: bool,

    /// Show worker output while it runs
    #[arg(long, overrides_with = "hide_log")]
    pub show_log: bool,
    /// Hide worker output while it runs
    #[arg(long, overrides_with = "show_log")]
    pub hide_log: bool,
}

impl OptionArgs {
    /// Layer these overrides onto `config`.
    pub fn apply(self, mut config: Configuration) -> anyhow::Result<Configuration> {
        if let Some(dir) = self.input {
            config.input_dir = dir;
        }
        if let Some(dir) = self.output {
            config.output_dir = dir;
        }
        if let Some(dir) = self.ffmpeg_dir {
            config.ffmpeg_dir = Some(dir).filter(|d| !d.trim().is_empty()).map(PathBuf::from);
        }
        if let Some(compression) = self.compression {
            config.compression = compression;
        }

        let encoder = match (self.encoder.as_deref(), self.custom_encoder) {
            (Some(keyword), custom) => {
                let name = custom.or_else(|| config.encoder.custom_name().map(str::to_string));
                Some(Encoder::from_parts(keyword, name.as_deref())?)
            }
            (None, Some(name)) => Some(Encoder::Custom(name)),
            (None, None) => None,
        };
        if let Some(encoder) = encoder {
            config.encoder = encoder;
        }

        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if let Some(quick) = flag(self.quick, self.no_quick) {
            config.quick = quick;
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }
        if let Some(debug) = flag(self.debug, self.no_debug) {
            config.debug = debug;
        }
        if let Some(show) = flag(self.show_log, self.hide_log) {
            config.show_log = show;
        }
        Ok(config)
    }
}

fn flag(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (false, true) => Some(false),
        (false, false) => None,
    }
}

#[cfg(test)]
#[path = "options_tests.rs"]
mod tests;
