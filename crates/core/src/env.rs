// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Environment lookup failures
#[derive(Debug, Error)]
pub enum EnvError {
    #[error("could not determine configuration directory")]
    NoConfigDir,
    #[error("could not determine state directory")]
    NoStateDir,
}

/// Resolve config directory: TAV_CONFIG_DIR > XDG_CONFIG_HOME/tav > platform config dir
pub fn config_dir() -> Result<PathBuf, EnvError> {
    if let Some(dir) = non_empty_var("TAV_CONFIG_DIR") {
        return Ok(PathBuf::from(dir));
    }
    if let Some(xdg) = non_empty_var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg).join("tav"));
    }
    dirs::config_dir().map(|d| d.join("tav")).ok_or(EnvError::NoConfigDir)
}

/// Resolve state directory: TAV_STATE_DIR > XDG_STATE_HOME/tav > ~/.local/state/tav
pub fn state_dir() -> Result<PathBuf, EnvError> {
    if let Some(dir) = non_empty_var("TAV_STATE_DIR") {
        return Ok(PathBuf::from(dir));
    }
    if let Some(xdg) = non_empty_var("XDG_STATE_HOME") {
        return Ok(PathBuf::from(xdg).join("tav"));
    }
    let home = dirs::home_dir().ok_or(EnvError::NoStateDir)?;
    Ok(home.join(".local/state/tav"))
}

/// Explicit worker executable, bypassing the lookup next to our own binary.
pub fn worker_path() -> Option<PathBuf> {
    non_empty_var("TAV_WORKER_PATH").map(PathBuf::from)
}

/// Grace period between the interrupt and the forced kill.
pub fn grace_period() -> Option<Duration> {
    duration_ms("TAV_GRACE_MS")
}

/// How long to wait for the exit to be observed after a kill.
pub fn kill_wait() -> Option<Duration> {
    duration_ms("TAV_KILL_WAIT_MS")
}

/// Periodic log flush interval.
pub fn flush_interval() -> Option<Duration> {
    duration_ms("TAV_FLUSH_MS")
}

/// Diagnostic log filter: TAV_LOG > RUST_LOG
pub fn log_filter() -> Option<String> {
    non_empty_var("TAV_LOG").or_else(|| non_empty_var("RUST_LOG"))
}

fn duration_ms(key: &str) -> Option<Duration> {
    non_empty_var(key).and_then(|s| s.trim().parse::<u64>().ok()).map(Duration::from_millis)
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
