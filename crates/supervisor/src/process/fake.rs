// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scripted [`WorkerProcess`] for termination tests.

use super::WorkerProcess;
use crate::event::EXIT_CODE_UNAVAILABLE;
use crate::SignalError;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::watch;

/// Exit code a fake reports when it honours an interrupt.
pub const INTERRUPTED_CODE: i32 = 130;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    /// Exit as soon as the signal arrives
    Exit,
    /// Keep running
    Ignore,
    /// Signal cannot be delivered on this "platform"
    Unsupported,
}

pub struct FakeWorker {
    on_interrupt: Reaction,
    on_kill: Reaction,
    interrupts: AtomicUsize,
    kills: AtomicUsize,
    exit_tx: watch::Sender<Option<i32>>,
}

impl FakeWorker {
    pub fn new(on_interrupt: Reaction, on_kill: Reaction) -> Self {
        let (exit_tx, _) = watch::channel(None);
        Self {
            on_interrupt,
            on_kill,
            interrupts: AtomicUsize::new(0),
            kills: AtomicUsize::new(0),
            exit_tx,
        }
    }

    /// Simulate the worker exiting on its own.
    pub fn exit(&self, code: i32) {
        self.exit_tx.send_replace(Some(code));
    }

    pub fn interrupts(&self) -> usize {
        self.interrupts.load(Ordering::SeqCst)
    }

    pub fn kills(&self) -> usize {
        self.kills.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WorkerProcess for FakeWorker {
    fn pid(&self) -> Option<u32> {
        Some(4242)
    }

    fn interrupt(&self) -> Result<(), SignalError> {
        if self.has_exited() {
            return Err(SignalError::AlreadyExited);
        }
        self.interrupts.fetch_add(1, Ordering::SeqCst);
        match self.on_interrupt {
            Reaction::Exit => self.exit(INTERRUPTED_CODE),
            Reaction::Ignore => {}
            Reaction::Unsupported => return Err(SignalError::Unsupported),
        }
        Ok(())
    }

    fn kill(&self) -> Result<(), SignalError> {
        if self.has_exited() {
            return Err(SignalError::AlreadyExited);
        }
        self.kills.fetch_add(1, Ordering::SeqCst);
        if self.on_kill == Reaction::Exit {
            self.exit(EXIT_CODE_UNAVAILABLE);
        }
        Ok(())
    }

    fn has_exited(&self) -> bool {
        self.exit_tx.borrow().is_some()
    }

    async fn wait(&self) -> i32 {
        let mut rx = self.exit_tx.subscribe();
        let published = rx.wait_for(Option::is_some).await.map(|code| *code);
        match published {
            Ok(Some(code)) => code,
            Ok(None) | Err(_) => EXIT_CODE_UNAVAILABLE,
        }
    }
}
