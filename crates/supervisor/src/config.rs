// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;
use std::time::Duration;

/// Default wait between the graceful interrupt and the forced kill.
pub const DEFAULT_GRACE_PERIOD: Duration = Duration::from_secs(5);

/// Default wait for the exit to be observed after a kill.
pub const DEFAULT_KILL_WAIT: Duration = Duration::from_secs(5);

/// Default periodic flush interval.
pub const DEFAULT_FLUSH_INTERVAL: Duration = Duration::from_millis(250);

/// Pending characters that wake the flusher before its next tick.
pub const DEFAULT_FLUSH_THRESHOLD: usize = 16 * 1024;

/// Default wait for both output streams to close after the process exits.
pub const DEFAULT_DRAIN_TIMEOUT: Duration = Duration::from_secs(2);

/// Tunables for one [`crate::Supervisor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupervisorConfig {
    pub worker_path: PathBuf,
    pub grace_period: Duration,
    pub kill_wait: Duration,
    pub flush_interval: Duration,
    pub flush_threshold: usize,
    pub drain_timeout: Duration,
}

impl SupervisorConfig {
    pub fn new(worker_path: impl Into<PathBuf>) -> Self {
        Self {
            worker_path: worker_path.into(),
            grace_period: DEFAULT_GRACE_PERIOD,
            kill_wait: DEFAULT_KILL_WAIT,
            flush_interval: DEFAULT_FLUSH_INTERVAL,
            flush_threshold: DEFAULT_FLUSH_THRESHOLD,
            drain_timeout: DEFAULT_DRAIN_TIMEOUT,
        }
    }

    /// Locate the worker and apply `TAV_*` duration overrides.
    pub fn from_env() -> Self {
        let mut config = Self::new(crate::locate::find_worker_binary());
        if let Some(grace) = tav_core::env::grace_period() {
            config.grace_period = grace;
        }
        if let Some(wait) = tav_core::env::kill_wait() {
            config.kill_wait = wait;
        }
        if let Some(interval) = tav_core::env::flush_interval().filter(|d| !d.is_zero()) {
            config.flush_interval = interval;
        }
        config
    }

    tav_core::setters! {
        into {
            worker_path: PathBuf,
        }
        set {
            grace_period: Duration,
            kill_wait: Duration,
            flush_interval: Duration,
            flush_threshold: usize,
            drain_timeout: Duration,
        }
    }

    /// Upper bound on how long a full stop may take.
    pub fn stop_budget(&self) -> Duration {
        self.grace_period + self.kill_wait + self.drain_timeout
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
