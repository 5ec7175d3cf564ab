// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker executable lookup.

use crate::StartError;
use std::path::{Path, PathBuf};

/// Base name of the worker executable.
pub const WORKER_BINARY: &str = "TransAV1_CUI";

/// Platform file name of the worker (`TransAV1_CUI.exe` on Windows).
pub fn worker_file_name() -> String {
    format!("{WORKER_BINARY}{}", std::env::consts::EXE_SUFFIX)
}

/// `TAV_WORKER_PATH` when set, otherwise the worker next to our own executable.
///
/// The returned path may not exist; [`check_executable`] decides that at start.
pub fn find_worker_binary() -> PathBuf {
    if let Some(path) = tav_core::env::worker_path() {
        return path;
    }
    let name = worker_file_name();
    match std::env::current_exe() {
        Ok(exe) => match exe.parent() {
            Some(dir) => dir.join(&name),
            None => PathBuf::from(name),
        },
        Err(e) => {
            tracing::debug!(error = %e, "current executable unknown; using bare worker name");
            PathBuf::from(name)
        }
    }
}

pub fn check_executable(path: &Path) -> Result<(), StartError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(StartError::MissingExecutable { path: path.to_path_buf() })
    }
}

#[cfg(test)]
#[path = "locate_tests.rs"]
mod tests;
