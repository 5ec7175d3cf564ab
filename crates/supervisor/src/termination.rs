// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Graceful-then-forceful termination of one worker.
//!
//! ```text
//! Running -> interrupt -> GracefulWait -(exit)-> Exited
//!                              |
//!                          (timeout) -> kill -> Forced -(exit)-> Exited
//!                                                  |
//!                                             (kill_wait) -> Unconfirmed
//! ```

use crate::process::WorkerProcess;
use crate::SignalError;
use std::time::Duration;

/// Time limits for the protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminationPolicy {
    pub grace: Duration,
    pub kill_wait: Duration,
}

/// Phase entered by the protocol, reported as it happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationPhase {
    /// Interrupt sent (or not deliverable); waiting out the grace period
    Graceful,
    /// Grace period expired; kill sent
    Forced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationResult {
    Exited { code: i32, forced: bool },
    /// Exit was not observed within `kill_wait` after the kill
    Unconfirmed,
}

/// Drive `worker` to exit.
pub async fn terminate<F>(
    worker: &dyn WorkerProcess,
    policy: TerminationPolicy,
    mut on_phase: F,
) -> TerminationResult
where
    F: FnMut(TerminationPhase) + Send,
{
    let pid = worker.pid();
    if worker.has_exited() {
        let code = worker.wait().await;
        return TerminationResult::Exited { code, forced: false };
    }

    on_phase(TerminationPhase::Graceful);
    match worker.interrupt() {
        Ok(()) => tracing::debug!(pid, "interrupt sent"),
        Err(SignalError::Unsupported) => {
            tracing::info!(pid, "graceful interrupt unavailable; waiting out grace period")
        }
        Err(SignalError::AlreadyExited) => tracing::info!(pid, "worker exited before interrupt"),
        Err(e) => tracing::warn!(pid, error = %e, "failed to interrupt worker"),
    }

    if let Some(code) = worker.wait_timeout(policy.grace).await {
        return TerminationResult::Exited { code, forced: false };
    }

    on_phase(TerminationPhase::Forced);
    if let Err(e) = worker.kill() {
        tracing::info!(pid, error = %e, "kill did not apply");
    }
    match worker.wait_timeout(policy.kill_wait).await {
        Some(code) => TerminationResult::Exited { code, forced: true },
        None => {
            tracing::warn!(pid, "worker exit not observed after kill");
            TerminationResult::Unconfirmed
        }
    }
}

#[cfg(test)]
#[path = "termination_tests.rs"]
mod tests;
