// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-chosen options for one encoder run.
//!
//! A [`Configuration`] is an immutable snapshot: the settings store produces
//! one, the controller may override fields, and the supervisor receives it by
//! value at start time.

use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default per-file timeout handed to the worker, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u32 = 7200;

/// Largest accepted timeout (one day).
pub const MAX_TIMEOUT_SECS: u32 = 86_400;

/// A keyword did not name any variant of the target enum.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} keyword: {value:?}")]
pub struct UnknownKeyword {
    pub kind: &'static str,
    pub value: String,
}

/// Size/quality trade-off tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    /// Favor smaller output files
    Size,
    #[default]
    Standard,
    /// Favor visual quality
    Quality,
}

crate::keyword_enum! {
    Compression {
        Size => "size",
        Standard => "standard",
        Quality => "quality",
    }
}

/// Which encoder the worker should try first.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "name")]
pub enum Encoder {
    /// NVIDIA hardware AV1 encoder
    #[default]
    Nvenc,
    /// SVT-AV1 software encoder
    Cpu,
    /// Any ffmpeg encoder name typed by the user
    Custom(String),
}

impl Encoder {
    pub const NVENC_KEYWORD: &'static str = "nvenc";
    pub const CPU_KEYWORD: &'static str = "cpu";
    pub const CUSTOM_KEYWORD: &'static str = "custom";

    /// Keyword for the encoder choice, without the custom name.
    pub fn keyword(&self) -> &'static str {
        match self {
            Encoder::Nvenc => Self::NVENC_KEYWORD,
            Encoder::Cpu => Self::CPU_KEYWORD,
            Encoder::Custom(_) => Self::CUSTOM_KEYWORD,
        }
    }

    /// Rebuild an encoder from its keyword and the (optional) custom name.
    ///
    /// The custom name is only consulted when the keyword selects the custom
    /// encoder.
    pub fn from_parts(keyword: &str, custom: Option<&str>) -> Result<Self, UnknownKeyword> {
        let keyword = keyword.trim();
        if keyword.eq_ignore_ascii_case(Self::NVENC_KEYWORD) {
            Ok(Encoder::Nvenc)
        } else if keyword.eq_ignore_ascii_case(Self::CPU_KEYWORD) {
            Ok(Encoder::Cpu)
        } else if keyword.eq_ignore_ascii_case(Self::CUSTOM_KEYWORD) {
            Ok(Encoder::Custom(custom.unwrap_or_default().to_string()))
        } else {
            Err(UnknownKeyword { kind: "Encoder", value: keyword.to_string() })
        }
    }

    pub fn custom_name(&self) -> Option<&str> {
        match self {
            Encoder::Custom(name) => Some(name),
            _ => None,
        }
    }
}

impl std::fmt::Display for Encoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Encoder::Custom(name) => write!(f, "custom ({})", name),
            other => f.write_str(other.keyword()),
        }
    }
}

/// How the worker treats an existing output directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RunMode {
    #[default]
    Normal,
    /// Remove failure markers and empty outputs before starting
    Restart,
    /// Wipe the output directory before starting
    ForceStart,
}

crate::keyword_enum! {
    RunMode {
        Normal => "normal",
        Restart => "restart",
        ForceStart => "force",
    }
}

/// Immutable snapshot of everything the user chose for a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Configuration {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub ffmpeg_dir: Option<PathBuf>,
    pub compression: Compression,
    pub encoder: Encoder,
    pub mode: RunMode,
    pub quick: bool,
    pub timeout_secs: u32,
    pub debug: bool,
    /// Controller-side only: whether worker output is shown live
    pub show_log: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::new(),
            output_dir: PathBuf::new(),
            ffmpeg_dir: None,
            compression: Compression::default(),
            encoder: Encoder::default(),
            mode: RunMode::default(),
            quick: false,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            debug: false,
            show_log: true,
        }
    }
}

/// Reasons a configuration cannot be handed to the worker.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("input directory is required")]
    MissingInputDir,
    #[error("output directory is required")]
    MissingOutputDir,
    #[error("input and output directories must differ: {0}")]
    SameDirectories(PathBuf),
    #[error("custom encoder name is required when the custom encoder is selected")]
    MissingCustomEncoder,
    #[error("timeout must be between 0 and {max} seconds, got {0}", max = MAX_TIMEOUT_SECS)]
    TimeoutOutOfRange(u32),
}

impl Configuration {
    crate::setters! {
        into {
            input_dir: PathBuf,
            output_dir: PathBuf,
        }
        set {
            compression: Compression,
            encoder: Encoder,
            mode: RunMode,
            quick: bool,
            timeout_secs: u32,
            debug: bool,
            show_log: bool,
        }
        option {
            ffmpeg_dir: PathBuf,
        }
    }

    /// Check the fields the worker cannot run without.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if is_blank(&self.input_dir) {
            return Err(ConfigError::MissingInputDir);
        }
        if is_blank(&self.output_dir) {
            return Err(ConfigError::MissingOutputDir);
        }
        if self.input_dir == self.output_dir {
            return Err(ConfigError::SameDirectories(self.input_dir.clone()));
        }
        if let Encoder::Custom(name) = &self.encoder {
            if name.trim().is_empty() {
                return Err(ConfigError::MissingCustomEncoder);
            }
        }
        if self.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::TimeoutOutOfRange(self.timeout_secs));
        }
        Ok(())
    }

    /// The ffmpeg directory, ignoring a blank value.
    pub fn effective_ffmpeg_dir(&self) -> Option<&Path> {
        self.ffmpeg_dir.as_deref().filter(|p| !is_blank(p))
    }
}

pub(crate) fn is_blank(path: &Path) -> bool {
    path.as_os_str().to_string_lossy().trim().is_empty()
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
