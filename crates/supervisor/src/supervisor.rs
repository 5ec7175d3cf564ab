// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The process supervisor: at most one worker, its output, and its shutdown.
//!
//! Every read or mutation of the session slot goes through one lock that is
//! never held across an `.await`. Lock order is slot, then log buffer.

use crate::config::SupervisorConfig;
use crate::event::{self, EventSink, EventStream, SessionOutcome, SupervisorEvent};
use crate::log::{LogAggregator, LIFECYCLE_PREFIX, STDERR_PREFIX};
use crate::process::{ChildWorker, WorkerProcess};
use crate::session::{SessionHandle, SessionId, SessionState, SessionSummary, Slot, WorkerSession};
use crate::termination::{self, TerminationPhase, TerminationPolicy, TerminationResult};
use crate::StartError;
use chrono::Utc;
use parking_lot::Mutex;
use std::process::Stdio;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tav_core::{display_command_line, to_argv, ArgumentProvider, Configuration};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// What `request_stop` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopRequest {
    /// Termination launched in the background
    Initiated,
    /// A stop is already under way
    AlreadyStopping,
    /// Nothing to stop
    NotRunning,
}

/// Controller-facing supervisor of the worker process.
///
/// Must be created inside a Tokio runtime: construction starts the periodic
/// log flusher.
pub struct Supervisor {
    inner: Arc<Inner>,
}

struct Inner {
    config: SupervisorConfig,
    provider: Box<dyn ArgumentProvider>,
    slot: Arc<Mutex<Slot>>,
    log: Arc<LogAggregator>,
    sink: EventSink,
    next_id: AtomicU64,
    flusher_cancel: CancellationToken,
    flusher: Mutex<Option<JoinHandle<()>>>,
}

impl Supervisor {
    pub fn new(config: SupervisorConfig, provider: impl ArgumentProvider) -> (Self, EventStream) {
        let (sink, stream) = event::channel();
        let log = Arc::new(LogAggregator::new(config.flush_threshold));
        let flusher_cancel = CancellationToken::new();
        let flusher = tokio::spawn(Arc::clone(&log).run_flusher(
            sink.clone(),
            config.flush_interval,
            flusher_cancel.clone(),
        ));
        let inner = Inner {
            config,
            provider: Box::new(provider),
            slot: Arc::new(Mutex::new(Slot::default())),
            log,
            sink,
            next_id: AtomicU64::new(1),
            flusher_cancel,
            flusher: Mutex::new(Some(flusher)),
        };
        (Self { inner: Arc::new(inner) }, stream)
    }

    pub fn config(&self) -> &SupervisorConfig {
        &self.inner.config
    }

    /// Start the worker for `config`. Rejected while another session is active.
    pub fn start(&self, config: &Configuration) -> Result<SessionHandle, StartError> {
        let inner = &self.inner;
        let mut slot = inner.slot.lock();
        if inner.flusher_cancel.is_cancelled() {
            tracing::info!("start rejected; supervisor shut down");
            return Err(StartError::ShutDown);
        }
        if let Some(current) = &slot.current {
            tracing::info!(session = %current.id, "start rejected; worker already running");
            inner.lifecycle(format_args!("start ignored: session {} is still running", current.id));
            return Err(StartError::AlreadyRunning(current.id));
        }

        let args = inner.provider.arguments(config);
        let exe = inner.config.worker_path.clone();
        if let Err(e) = crate::locate::check_executable(&exe) {
            tracing::warn!(path = %exe.display(), "worker executable missing");
            inner.lifecycle(format_args!("{e}"));
            inner.log.deliver(&inner.sink, None);
            return Err(e);
        }

        // pre-start milestone: earlier output goes out before the new session's
        inner.log.deliver(&inner.sink, None);
        inner.log.reset();

        let id = SessionId(inner.next_id.fetch_add(1, Ordering::Relaxed));
        inner.lifecycle(format_args!(
            "session {id} starting: {} {}",
            exe.display(),
            display_command_line(&args)
        ));

        let mut command = Command::new(&exe);
        command
            .args(to_argv(&args))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        #[cfg(unix)]
        command.process_group(0);
        #[cfg(windows)]
        command.creation_flags(CREATE_NO_WINDOW);

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(source) => {
                tracing::error!(session = %id, path = %exe.display(), error = %source, "failed to spawn worker");
                inner.lifecycle(format_args!("failed to start worker: {source}"));
                inner.log.deliver(&inner.sink, None);
                return Err(StartError::SpawnFailed { path: exe, source });
            }
        };

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let worker: Arc<dyn WorkerProcess> = Arc::new(ChildWorker::watch(child));
        let pid = worker.pid();
        let started_at = Utc::now();

        let mut readers = Vec::with_capacity(2);
        if let Some(out) = stdout {
            readers.push(tokio::spawn(pump_lines(out, "", Arc::clone(&inner.log), id)));
        }
        if let Some(err) = stderr {
            readers.push(tokio::spawn(pump_lines(err, STDERR_PREFIX, Arc::clone(&inner.log), id)));
        }

        let ended = CancellationToken::new();
        tokio::spawn(Arc::clone(inner).monitor(id, Arc::clone(&worker), readers));

        slot.current = Some(WorkerSession {
            id,
            pid,
            started_at,
            state: SessionState::Starting,
            last_error: None,
            worker,
            ended,
        });

        tracing::info!(session = %id, pid, "worker started");
        match pid {
            Some(pid) => inner.lifecycle(format_args!("worker started (pid {pid})")),
            None => inner.lifecycle(format_args!("worker started")),
        }
        // post-start milestone, still under the slot lock so it cannot trail
        // the session's terminal event
        inner.log.deliver(&inner.sink, None);
        if let Some(session) = slot.current.as_mut() {
            session.state = SessionState::Running;
        }

        Ok(SessionHandle::new(id, pid, started_at, Arc::clone(&inner.slot)))
    }

    /// Begin stopping the active worker without waiting for it.
    pub fn request_stop(&self) -> StopRequest {
        let inner = &self.inner;
        let (id, worker) = {
            let mut slot = inner.slot.lock();
            match slot.current.as_mut() {
                None => {
                    tracing::info!("stop requested with no worker running");
                    inner.lifecycle(format_args!("stop requested, but no worker is running"));
                    return StopRequest::NotRunning;
                }
                Some(session) if session.state.is_stopping() => {
                    tracing::debug!(session = %session.id, "stop already in progress");
                    return StopRequest::AlreadyStopping;
                }
                Some(session) if session.worker.has_exited() => {
                    tracing::info!(session = %session.id, "stop requested after worker exited");
                    inner.lifecycle(format_args!("stop requested, but the worker already exited"));
                    return StopRequest::NotRunning;
                }
                Some(session) => {
                    session.state = SessionState::StoppingGraceful;
                    (session.id, Arc::clone(&session.worker))
                }
            }
        };
        tracing::info!(session = %id, "stop requested");
        tokio::spawn(Arc::clone(inner).run_termination(id, worker));
        StopRequest::Initiated
    }

    /// Stop any active worker, wait for its terminal event, flush, and stop
    /// the periodic flusher. Bounded by [`SupervisorConfig::stop_budget`].
    ///
    /// Terminal: later `start` calls fail with [`StartError::ShutDown`].
    pub async fn shutdown(&self) {
        let inner = &self.inner;
        let pending = {
            let mut slot = inner.slot.lock();
            slot.current.as_mut().map(|session| {
                let launch = !session.state.is_stopping();
                if launch {
                    session.state = SessionState::StoppingGraceful;
                }
                (session.id, Arc::clone(&session.worker), session.ended.clone(), launch)
            })
        };

        if let Some((id, worker, ended, launch)) = pending {
            tracing::info!(session = %id, "shutdown: stopping worker");
            inner.lifecycle(format_args!("shutting down; stopping session {id}"));
            let budget = inner.config.stop_budget();
            let finished = async {
                if launch {
                    Arc::clone(inner).run_termination(id, worker).await;
                }
                ended.cancelled().await;
            };
            if tokio::time::timeout(budget, finished).await.is_err() {
                tracing::warn!(session = %id, "worker did not report exit during shutdown");
                inner.finish(
                    id,
                    SessionOutcome::Failed { reason: "worker did not exit during shutdown".into() },
                );
            }
        }

        inner.log.deliver(&inner.sink, None);
        inner.flusher_cancel.cancel();
        let flusher = inner.flusher.lock().take();
        if let Some(handle) = flusher {
            if let Err(e) = handle.await {
                tracing::warn!(error = %e, "log flusher task failed");
            }
        }
    }

    /// Current session state, `Idle` when nothing is active.
    pub fn state(&self) -> SessionState {
        self.inner.slot.lock().current.as_ref().map_or(SessionState::Idle, |s| s.state)
    }

    pub fn is_active(&self) -> bool {
        self.state().is_active()
    }

    pub fn last_session(&self) -> Option<SessionSummary> {
        self.inner.slot.lock().last.clone()
    }
}

impl Drop for Supervisor {
    fn drop(&mut self) {
        self.inner.flusher_cancel.cancel();
    }
}

impl Inner {
    fn lifecycle(&self, message: std::fmt::Arguments<'_>) {
        self.log.write(&format!("{LIFECYCLE_PREFIX}{message}"));
    }

    fn policy(&self) -> TerminationPolicy {
        TerminationPolicy { grace: self.config.grace_period, kill_wait: self.config.kill_wait }
    }

    /// Natural-exit path: wait for the process, then for its streams to drain.
    async fn monitor(
        self: Arc<Self>,
        id: SessionId,
        worker: Arc<dyn WorkerProcess>,
        mut readers: Vec<JoinHandle<()>>,
    ) {
        let code = worker.wait().await;
        let drain = async {
            for reader in readers.iter_mut() {
                if let Err(e) = reader.await {
                    tracing::warn!(session = %id, error = %e, "output reader task failed");
                }
            }
        };
        if tokio::time::timeout(self.config.drain_timeout, drain).await.is_err() {
            tracing::warn!(session = %id, "output streams still open after worker exit");
            for reader in &readers {
                reader.abort();
            }
            self.lifecycle(format_args!("output streams still open after exit; detaching"));
        }
        self.finish(id, SessionOutcome::Exited { code });
    }

    async fn run_termination(self: Arc<Self>, id: SessionId, worker: Arc<dyn WorkerProcess>) {
        let grace = self.config.grace_period;
        let result = termination::terminate(worker.as_ref(), self.policy(), |phase| {
            self.enter_phase(id, phase, grace)
        })
        .await;
        match result {
            TerminationResult::Exited { code, forced } => {
                tracing::info!(session = %id, code, forced, "worker stopped");
            }
            TerminationResult::Unconfirmed => {
                self.finish(
                    id,
                    SessionOutcome::Failed { reason: "worker did not exit after kill".into() },
                );
            }
        }
    }

    fn enter_phase(&self, id: SessionId, phase: TerminationPhase, grace: std::time::Duration) {
        let mut slot = self.slot.lock();
        let Some(session) = slot.current.as_mut().filter(|s| s.id == id) else {
            return;
        };
        match phase {
            TerminationPhase::Graceful => {
                session.state = SessionState::StoppingGraceful;
                self.lifecycle(format_args!("stopping worker (waiting up to {grace:?})"));
            }
            TerminationPhase::Forced => {
                session.state = SessionState::StoppingForced;
                session.last_error = Some(format!("worker ignored interrupt for {grace:?}"));
                tracing::warn!(session = %id, "grace period expired; killing worker");
                self.lifecycle(format_args!("worker did not stop within {grace:?}; killing"));
            }
        }
    }

    /// Report the session's end exactly once. Later callers find the slot
    /// empty (or holding a newer session) and do nothing.
    fn finish(&self, id: SessionId, outcome: SessionOutcome) {
        let mut slot = self.slot.lock();
        if slot.current.as_ref().map(|s| s.id) != Some(id) {
            tracing::debug!(session = %id, "session already finished");
            return;
        }
        let Some(session) = slot.current.take() else {
            return;
        };
        let ended = session.ended.clone();
        slot.last = Some(session.finish(&outcome));

        tracing::info!(session = %id, outcome = %outcome, "session ended");
        self.lifecycle(format_args!("worker {outcome}"));
        // post-exit milestone and the terminal event, in one step
        self.log.deliver(&self.sink, Some(SupervisorEvent::SessionEnded(outcome)));
        drop(slot);
        ended.cancel();
    }
}

/// Forward every non-empty line of `stream` into the log.
async fn pump_lines<R>(stream: R, prefix: &'static str, log: Arc<LogAggregator>, id: SessionId)
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(stream);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                if line.trim().is_empty() {
                    continue;
                }
                if prefix.is_empty() {
                    log.write(&line);
                } else {
                    log.write(&format!("{prefix}{line}"));
                }
            }
            Err(e) => {
                tracing::warn!(session = %id, error = %e, "failed to read worker output");
                log.write(&format!("{LIFECYCLE_PREFIX}failed to read worker output: {e}"));
                break;
            }
        }
    }
}

#[cfg(all(test, unix))]
#[path = "supervisor_tests.rs"]
mod tests;
