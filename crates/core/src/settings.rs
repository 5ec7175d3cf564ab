// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Persistence of the user's last-used options.
//!
//! Loading never fails: anything missing or unparseable falls back to the
//! [`Configuration`] default for that field.

use crate::config::{is_blank, Compression, Configuration, Encoder, RunMode, MAX_TIMEOUT_SECS};
use parking_lot::Mutex;
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use toml::{Table, Value};

/// File name of the settings document inside the config directory.
pub const SETTINGS_FILE: &str = "settings.toml";

/// Errors from saving settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode settings: {0}")]
    Encode(#[from] toml::ser::Error),
}

/// Key/value store for the last-used [`Configuration`].
pub trait SettingsStore: Send + Sync {
    fn load(&self) -> Configuration;
    fn save(&self, config: &Configuration) -> Result<(), SettingsError>;
}

/// Settings kept in a TOML file.
#[derive(Debug, Clone)]
pub struct FileSettings {
    path: PathBuf,
}

impl FileSettings {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Settings file in the resolved config directory.
    pub fn in_config_dir() -> Result<Self, crate::env::EnvError> {
        Ok(Self::new(crate::env::config_dir()?.join(SETTINGS_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for FileSettings {
    fn load(&self) -> Configuration {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Configuration::default(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to read settings, using defaults");
                return Configuration::default();
            }
        };
        match text.parse::<Table>() {
            Ok(table) => from_table(&table),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "malformed settings, using defaults");
                Configuration::default()
            }
        }
    }

    fn save(&self, config: &Configuration) -> Result<(), SettingsError> {
        let text = to_toml(config)?;
        let io_err = |source| SettingsError::Io { path: self.path.clone(), source };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        std::fs::write(&self.path, text).map_err(io_err)?;
        tracing::debug!(path = %self.path.display(), "settings saved");
        Ok(())
    }
}

/// In-memory store for tests and throwaway runs.
#[derive(Debug, Default)]
pub struct MemorySettings {
    saved: Mutex<Option<Configuration>>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(config: Configuration) -> Self {
        Self { saved: Mutex::new(Some(config)) }
    }
}

impl SettingsStore for MemorySettings {
    fn load(&self) -> Configuration {
        self.saved.lock().clone().unwrap_or_default()
    }

    fn save(&self, config: &Configuration) -> Result<(), SettingsError> {
        *self.saved.lock() = Some(config.clone());
        Ok(())
    }
}

#[derive(Serialize)]
struct Document<'a> {
    paths: PathsSection<'a>,
    options: OptionsSection<'a>,
    view: ViewSection,
}

#[derive(Serialize)]
struct PathsSection<'a> {
    input_dir: &'a Path,
    output_dir: &'a Path,
    #[serde(skip_serializing_if = "Option::is_none")]
    ffmpeg_dir: Option<&'a Path>,
}

#[derive(Serialize)]
struct OptionsSection<'a> {
    compression: &'static str,
    encoder: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    custom_encoder: Option<&'a str>,
    mode: &'static str,
    quick: bool,
    timeout: u32,
    debug: bool,
}

#[derive(Serialize)]
struct ViewSection {
    show_log: bool,
}

/// Render a configuration as a settings document.
pub fn to_toml(config: &Configuration) -> Result<String, SettingsError> {
    let doc = Document {
        paths: PathsSection {
            input_dir: &config.input_dir,
            output_dir: &config.output_dir,
            ffmpeg_dir: config.effective_ffmpeg_dir(),
        },
        options: OptionsSection {
            compression: config.compression.as_str(),
            encoder: config.encoder.keyword(),
            custom_encoder: config.encoder.custom_name(),
            mode: config.mode.as_str(),
            quick: config.quick,
            timeout: config.timeout_secs,
            debug: config.debug,
        },
        view: ViewSection { show_log: config.show_log },
    };
    Ok(toml::to_string(&doc)?)
}

/// Build a configuration from a parsed settings document, field by field.
pub fn from_table(table: &Table) -> Configuration {
    let defaults = Configuration::default();
    let paths = section(table, "paths");
    let options = section(table, "options");
    let view = section(table, "view");

    let encoder = lookup(options, "encoder")
        .and_then(Value::as_str)
        .and_then(|keyword| {
            let custom = lookup(options, "custom_encoder").and_then(Value::as_str);
            Encoder::from_parts(keyword, custom).ok()
        })
        .unwrap_or(defaults.encoder);

    Configuration {
        input_dir: path_value(paths, "input_dir").unwrap_or(defaults.input_dir),
        output_dir: path_value(paths, "output_dir").unwrap_or(defaults.output_dir),
        ffmpeg_dir: path_value(paths, "ffmpeg_dir").filter(|p| !is_blank(p)),
        compression: keyword_value::<Compression>(options, "compression")
            .unwrap_or(defaults.compression),
        encoder,
        mode: keyword_value::<RunMode>(options, "mode").unwrap_or(defaults.mode),
        quick: lookup(options, "quick").and_then(lenient_bool).unwrap_or(defaults.quick),
        timeout_secs: lookup(options, "timeout")
            .and_then(lenient_timeout)
            .unwrap_or(defaults.timeout_secs),
        debug: lookup(options, "debug").and_then(lenient_bool).unwrap_or(defaults.debug),
        show_log: lookup(view, "show_log").and_then(lenient_bool).unwrap_or(defaults.show_log),
    }
}

fn section<'a>(table: &'a Table, name: &str) -> Option<&'a Table> {
    table.get(name).and_then(Value::as_table)
}

fn lookup<'a>(section: Option<&'a Table>, key: &str) -> Option<&'a Value> {
    section.and_then(|s| s.get(key))
}

fn path_value(section: Option<&Table>, key: &str) -> Option<PathBuf> {
    lookup(section, key).and_then(Value::as_str).map(PathBuf::from)
}

fn keyword_value<T: std::str::FromStr>(section: Option<&Table>, key: &str) -> Option<T> {
    lookup(section, key).and_then(Value::as_str).and_then(|s| s.parse().ok())
}

/// Accepts `true`/`false`, `"true"`/`"false"`, `"1"`/`"0"` and `1`/`0`.
pub fn lenient_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Boolean(b) => Some(*b),
        Value::Integer(1) => Some(true),
        Value::Integer(0) => Some(false),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn lenient_timeout(value: &Value) -> Option<u32> {
    let secs = match value {
        Value::Integer(n) => *n,
        Value::String(s) => s.trim().parse::<i64>().ok()?,
        _ => return None,
    };
    u32::try_from(secs).ok().filter(|s| *s <= MAX_TIMEOUT_SECS)
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
