// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process-handle abstraction used by the termination protocol.

mod child;
#[cfg(test)]
pub(crate) mod fake;

pub use child::ChildWorker;

use crate::SignalError;
use async_trait::async_trait;
use std::time::Duration;

/// A running worker that can be signalled and awaited.
#[async_trait]
pub trait WorkerProcess: Send + Sync {
    fn pid(&self) -> Option<u32>;

    /// Ask the worker to stop (SIGINT to its process group on Unix).
    fn interrupt(&self) -> Result<(), SignalError>;

    /// Kill the worker unconditionally.
    fn kill(&self) -> Result<(), SignalError>;

    fn has_exited(&self) -> bool;

    /// Wait for exit. Returns the exit code or the unavailable sentinel.
    async fn wait(&self) -> i32;

    /// Like [`WorkerProcess::wait`], giving up after `timeout`.
    async fn wait_timeout(&self, timeout: Duration) -> Option<i32> {
        tokio::time::timeout(timeout, self.wait()).await.ok()
    }
}
