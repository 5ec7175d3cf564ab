// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::session::SessionId;
use std::path::PathBuf;
use thiserror::Error;

/// Reasons `start` refused to launch a worker. Never retried.
#[derive(Debug, Error)]
pub enum StartError {
    #[error("a worker is already running (session {0})")]
    AlreadyRunning(SessionId),
    #[error("supervisor has shut down")]
    ShutDown,
    #[error("worker executable not found: {}", path.display())]
    MissingExecutable { path: PathBuf },
    #[error("failed to spawn {}: {source}", path.display())]
    SpawnFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from signalling a worker process.
#[derive(Debug, Error)]
pub enum SignalError {
    #[error("worker has already exited")]
    AlreadyExited,
    #[error("graceful interrupt is not supported on this platform")]
    Unsupported,
    #[error("failed to signal process group {pgid}: {source}")]
    Os {
        pgid: i32,
        #[source]
        source: std::io::Error,
    },
}
