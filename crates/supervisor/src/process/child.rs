// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! [`WorkerProcess`] over a spawned `tokio::process::Child`.

use super::WorkerProcess;
use crate::event::EXIT_CODE_UNAVAILABLE;
use crate::SignalError;
use async_trait::async_trait;
use std::process::ExitStatus;
use tokio::process::Child;
use tokio::sync::{mpsc, watch};

/// Handle to a spawned worker.
///
/// A reaper task owns the `Child`: it waits for exit, serves kill requests,
/// and publishes the exit code to every waiter.
#[derive(Debug)]
pub struct ChildWorker {
    pid: Option<u32>,
    kill_tx: mpsc::UnboundedSender<()>,
    exit_rx: watch::Receiver<Option<i32>>,
}

impl ChildWorker {
    /// Take ownership of `child` and start reaping it. Requires a Tokio runtime.
    pub fn watch(child: Child) -> Self {
        let pid = child.id();
        let (kill_tx, kill_rx) = mpsc::unbounded_channel();
        let (exit_tx, exit_rx) = watch::channel(None);
        tokio::spawn(reap(child, pid, kill_rx, exit_tx));
        Self { pid, kill_tx, exit_rx }
    }
}

async fn reap(
    mut child: Child,
    pid: Option<u32>,
    mut kill_rx: mpsc::UnboundedReceiver<()>,
    exit_tx: watch::Sender<Option<i32>>,
) {
    let code = loop {
        tokio::select! {
            status = child.wait() => {
                break match status {
                    Ok(status) => exit_code(status),
                    Err(e) => {
                        tracing::warn!(pid, error = %e, "failed to retrieve worker exit status");
                        EXIT_CODE_UNAVAILABLE
                    }
                };
            }
            Some(()) = kill_rx.recv() => {
                if let Err(e) = child.start_kill() {
                    tracing::info!(pid, error = %e, "kill skipped; worker already exited");
                }
            }
        }
    };
    tracing::debug!(pid, code, "worker reaped");
    let _ = exit_tx.send(Some(code));
}

fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(EXIT_CODE_UNAVAILABLE)
}

#[async_trait]
impl WorkerProcess for ChildWorker {
    fn pid(&self) -> Option<u32> {
        self.pid
    }

    #[cfg(unix)]
    fn interrupt(&self) -> Result<(), SignalError> {
        signal_group(self, nix::sys::signal::Signal::SIGINT)
    }

    #[cfg(not(unix))]
    fn interrupt(&self) -> Result<(), SignalError> {
        Err(SignalError::Unsupported)
    }

    fn kill(&self) -> Result<(), SignalError> {
        if self.has_exited() {
            return Err(SignalError::AlreadyExited);
        }
        #[cfg(unix)]
        if let Err(e) = signal_group(self, nix::sys::signal::Signal::SIGKILL) {
            tracing::info!(pid = self.pid, error = %e, "group kill failed");
        }
        self.kill_tx.send(()).map_err(|_| SignalError::AlreadyExited)
    }

    fn has_exited(&self) -> bool {
        self.exit_rx.borrow().is_some()
    }

    async fn wait(&self) -> i32 {
        let mut rx = self.exit_rx.clone();
        let published = rx.wait_for(Option::is_some).await.map(|code| *code);
        match published {
            Ok(Some(code)) => code,
            // reaper dropped without publishing
            Ok(None) | Err(_) => EXIT_CODE_UNAVAILABLE,
        }
    }
}

/// Signal the worker's process group. The worker leads its own group.
#[cfg(unix)]
fn signal_group(worker: &ChildWorker, signal: nix::sys::signal::Signal) -> Result<(), SignalError> {
    use nix::errno::Errno;
    use nix::unistd::Pid;

    if worker.has_exited() {
        return Err(SignalError::AlreadyExited);
    }
    let pgid = worker.pid.and_then(|p| i32::try_from(p).ok()).ok_or(SignalError::AlreadyExited)?;
    match nix::sys::signal::killpg(Pid::from_raw(pgid), signal) {
        Ok(()) => Ok(()),
        Err(Errno::ESRCH) => Err(SignalError::AlreadyExited),
        Err(errno) => Err(SignalError::Os { pgid, source: errno.into() }),
    }
}
