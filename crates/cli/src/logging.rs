// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Diagnostic logging for the `tav` binary.
//!
//! Diagnostics go to `<state_dir>/tav.log` so they never mix with the worker
//! output printed on stdout. When the file cannot be opened, warnings go to
//! stderr instead.

use std::fs::{File, OpenOptions};
use std::path::PathBuf;
use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE: &str = "tav.log";

const DEFAULT_FILTER: &str = "info";

#[derive(Debug, Error)]
pub enum LogInitError {
    #[error(transparent)]
    Env(#[from] tav_core::EnvError),
    #[error("failed to open log file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Install the global subscriber. Keep the guard alive until exit so
/// buffered lines are written.
pub fn init() -> Option<WorkerGuard> {
    match open_log_file() {
        Ok(file) => {
            let (writer, guard) = tracing_appender::non_blocking(file);
            let installed = tracing_subscriber::fmt()
                .with_env_filter(filter())
                .with_ansi(false)
                .with_writer(writer)
                .try_init();
            installed.ok().map(|()| guard)
        }
        Err(e) => {
            let (writer, guard) = tracing_appender::non_blocking(std::io::stderr());
            let installed = tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::new("warn"))
                .with_target(false)
                .with_writer(writer)
                .try_init();
            tracing::warn!(error = %e, "file logging unavailable");
            installed.ok().map(|()| guard)
        }
    }
}

/// `TAV_LOG` > `RUST_LOG` > `info`; an unparseable filter falls back to the default.
pub fn filter() -> EnvFilter {
    let spec = tav_core::env::log_filter().unwrap_or_else(|| DEFAULT_FILTER.to_string());
    EnvFilter::try_new(&spec).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

pub fn log_path() -> Result<PathBuf, LogInitError> {
    Ok(tav_core::env::state_dir()?.join(LOG_FILE))
}

fn open_log_file() -> Result<File, LogInitError> {
    let path = log_path()?;
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .map_err(|source| LogInitError::Io { path: path.clone(), source })?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|source| LogInitError::Io { path, source })
}
