// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::color;
use clap::ValueEnum;
use std::path::Path;
use tav_core::Configuration;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// `(label, value)` rows describing a configuration, in display order.
pub fn configuration_rows(config: &Configuration) -> Vec<(&'static str, String)> {
    vec![
        ("input_dir", display_path(&config.input_dir)),
        ("output_dir", display_path(&config.output_dir)),
        ("ffmpeg_dir", config.effective_ffmpeg_dir().map_or_else(|| "-".to_string(), display_path)),
        ("compression", config.compression.to_string()),
        ("encoder", config.encoder.to_string()),
        ("mode", config.mode.to_string()),
        ("quick", config.quick.to_string()),
        ("timeout", format_timeout(config.timeout_secs)),
        ("debug", config.debug.to_string()),
        ("show_log", config.show_log.to_string()),
    ]
}

pub fn print_configuration(config: &Configuration, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            for (label, value) in configuration_rows(config) {
                println!("{} {}", color::context(&format!("{label:<12}")), color::literal(&value));
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(config)?),
    }
    Ok(())
}

fn display_path(path: &Path) -> String {
    if path.as_os_str().is_empty() {
        "-".to_string()
    } else {
        path.display().to_string()
    }
}

/// `7200s (2h)`, or `none` for zero.
pub fn format_timeout(secs: u32) -> String {
    if secs == 0 {
        return "none".to_string();
    }
    let (h, m, s) = (secs / 3600, secs % 3600 / 60, secs % 60);
    let human = match (h, m, s) {
        (0, 0, s) => format!("{s}s"),
        (0, m, 0) => format!("{m}m"),
        (0, m, s) => format!("{m}m{s}s"),
        (h, 0, 0) => format!("{h}h"),
        (h, m, _) => format!("{h}h{m}m"),
    };
    format!("{secs}s ({human})")
}

/// Format an elapsed duration as `1h02m03s` / `2m03s` / `3s`.
pub fn format_elapsed(elapsed: std::time::Duration) -> String {
    let secs = elapsed.as_secs();
    let (h, m, s) = (secs / 3600, secs % 3600 / 60, secs % 60);
    if h > 0 {
        format!("{h}h{m:02}m{s:02}s")
    } else if m > 0 {
        format!("{m}m{s:02}s")
    } else {
        format!("{s}s")
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
