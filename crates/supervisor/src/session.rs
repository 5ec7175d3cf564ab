// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker session records and lifecycle states.

use crate::event::SessionOutcome;
use crate::process::WorkerProcess;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Monotonic per-supervisor session number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// `Idle -> Starting -> Running -> StoppingGraceful -> StoppingForced -> Exited | Failed`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    /// Spawned, readers and monitor being registered; only seen under the
    /// slot lock inside `start`
    Starting,
    Running,
    StoppingGraceful,
    StoppingForced,
    Exited,
    Failed,
}

impl SessionState {
    pub fn is_active(self) -> bool {
        matches!(
            self,
            SessionState::Starting
                | SessionState::Running
                | SessionState::StoppingGraceful
                | SessionState::StoppingForced
        )
    }

    pub fn is_stopping(self) -> bool {
        matches!(self, SessionState::StoppingGraceful | SessionState::StoppingForced)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, SessionState::Exited | SessionState::Failed)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SessionState::Idle => "idle",
            SessionState::Starting => "starting",
            SessionState::Running => "running",
            SessionState::StoppingGraceful => "stopping",
            SessionState::StoppingForced => "killing",
            SessionState::Exited => "exited",
            SessionState::Failed => "failed",
        })
    }
}

/// The one active run of the worker. Owned by the supervisor's slot.
pub(crate) struct WorkerSession {
    pub id: SessionId,
    pub pid: Option<u32>,
    pub started_at: DateTime<Utc>,
    pub state: SessionState,
    pub last_error: Option<String>,
    pub worker: Arc<dyn WorkerProcess>,
    /// Cancelled once the terminal event has been sent
    pub ended: CancellationToken,
}

impl WorkerSession {
    /// Consume the session into its terminal summary.
    pub fn finish(self, outcome: &SessionOutcome) -> SessionSummary {
        let (state, exit_code, last_error) = match outcome {
            SessionOutcome::Exited { code } => (SessionState::Exited, Some(*code), self.last_error),
            SessionOutcome::Failed { reason } => {
                (SessionState::Failed, None, Some(reason.clone()))
            }
        };
        SessionSummary {
            id: self.id,
            pid: self.pid,
            started_at: self.started_at,
            ended_at: Utc::now(),
            state,
            exit_code,
            last_error,
        }
    }
}

/// What is kept about the last finished session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub id: SessionId,
    pub pid: Option<u32>,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub state: SessionState,
    pub exit_code: Option<i32>,
    pub last_error: Option<String>,
}

#[derive(Default)]
pub(crate) struct Slot {
    pub current: Option<WorkerSession>,
    pub last: Option<SessionSummary>,
}

/// Status-only view of a started session.
#[derive(Clone)]
pub struct SessionHandle {
    id: SessionId,
    pid: Option<u32>,
    started_at: DateTime<Utc>,
    slot: Arc<Mutex<Slot>>,
}

impl SessionHandle {
    pub(crate) fn new(
        id: SessionId,
        pid: Option<u32>,
        started_at: DateTime<Utc>,
        slot: Arc<Mutex<Slot>>,
    ) -> Self {
        Self { id, pid, started_at, slot }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn pid(&self) -> Option<u32> {
        self.pid
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn state(&self) -> SessionState {
        let slot = self.slot.lock();
        if let Some(current) = slot.current.as_ref().filter(|s| s.id == self.id) {
            return current.state;
        }
        match slot.last.as_ref().filter(|s| s.id == self.id) {
            Some(summary) => summary.state,
            // superseded before we looked; it must have finished
            None => SessionState::Exited,
        }
    }

    pub fn is_active(&self) -> bool {
        self.state().is_active()
    }

    /// Exit code once the session has exited.
    pub fn exit_code(&self) -> Option<i32> {
        let slot = self.slot.lock();
        slot.last.as_ref().filter(|s| s.id == self.id).and_then(|s| s.exit_code)
    }
}

impl fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionHandle").field("id", &self.id).field("pid", &self.pid).finish()
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
