// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Notifications from the supervisor to its controller.

use std::fmt;
use tokio::sync::mpsc;

/// Exit code reported when the real one cannot be retrieved (e.g. the worker
/// was killed by a signal).
pub const EXIT_CODE_UNAVAILABLE: i32 = -1;

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Process exit was observed
    Exited { code: i32 },
    /// Exit could not be confirmed
    Failed { reason: String },
}

impl SessionOutcome {
    /// Exit code, or [`EXIT_CODE_UNAVAILABLE`] for failures.
    pub fn exit_code(&self) -> i32 {
        match self {
            SessionOutcome::Exited { code } => *code,
            SessionOutcome::Failed { .. } => EXIT_CODE_UNAVAILABLE,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SessionOutcome::Exited { code: 0 })
    }
}

impl fmt::Display for SessionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionOutcome::Exited { code: EXIT_CODE_UNAVAILABLE } => {
                f.write_str("exited (code unavailable)")
            }
            SessionOutcome::Exited { code } => write!(f, "exited with code {code}"),
            SessionOutcome::Failed { reason } => write!(f, "failed: {reason}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SupervisorEvent {
    /// Newly flushed log text, one or more `\n`-terminated lines
    LogBatch(String),
    /// Terminal event, exactly once per session
    SessionEnded(SessionOutcome),
}

/// Sending half of the ordered event channel.
#[derive(Debug, Clone)]
pub struct EventSink {
    tx: mpsc::UnboundedSender<SupervisorEvent>,
}

impl EventSink {
    pub(crate) fn send(&self, event: SupervisorEvent) {
        if self.tx.send(event).is_err() {
            tracing::debug!("event stream closed; dropping supervisor event");
        }
    }
}

/// Receiving half of the ordered event channel, consumed by the controller.
#[derive(Debug)]
pub struct EventStream {
    rx: mpsc::UnboundedReceiver<SupervisorEvent>,
}

impl EventStream {
    /// Next event, or `None` once the supervisor is gone.
    pub async fn recv(&mut self) -> Option<SupervisorEvent> {
        self.rx.recv().await
    }

    pub fn try_recv(&mut self) -> Option<SupervisorEvent> {
        self.rx.try_recv().ok()
    }
}

pub(crate) fn channel() -> (EventSink, EventStream) {
    let (tx, rx) = mpsc::unbounded_channel();
    (EventSink { tx }, EventStream { rx })
}
