// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::sanitize;
use crate::event::{EventSink, SupervisorEvent};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Shortest tick the periodic flusher runs at.
pub const MIN_FLUSH_INTERVAL: Duration = Duration::from_millis(1);

#[derive(Debug, Default)]
struct Pending {
    text: String,
    chars: usize,
}

/// Thread-safe buffer between output producers and the event channel.
#[derive(Debug)]
pub struct LogAggregator {
    pending: Mutex<Pending>,
    threshold: usize,
    wake: Notify,
}

impl LogAggregator {
    pub fn new(threshold: usize) -> Self {
        Self { pending: Mutex::new(Pending::default()), threshold, wake: Notify::new() }
    }

    /// Append one sanitized chunk as a line. Blank chunks are ignored.
    pub fn write(&self, chunk: &str) {
        let Some(line) = sanitize(chunk) else {
            return;
        };
        let crossed = {
            let mut pending = self.pending.lock();
            pending.chars += line.chars().count() + 1;
            pending.text.push_str(&line);
            pending.text.push('\n');
            pending.chars >= self.threshold
        };
        if crossed {
            self.wake.notify_one();
        }
    }

    /// Drain everything pending. Empty when nothing was written.
    pub fn flush(&self) -> String {
        let mut pending = self.pending.lock();
        pending.chars = 0;
        std::mem::take(&mut pending.text)
    }

    /// Discard pending text.
    pub fn reset(&self) {
        let mut pending = self.pending.lock();
        pending.text.clear();
        pending.chars = 0;
    }

    pub fn pending_chars(&self) -> usize {
        self.pending.lock().chars
    }

    /// Flush into `sink`, then send `trailing`, both under the buffer lock so
    /// no concurrent flush can slip a batch between them.
    pub(crate) fn deliver(&self, sink: &EventSink, trailing: Option<SupervisorEvent>) {
        let mut pending = self.pending.lock();
        if !pending.text.is_empty() {
            pending.chars = 0;
            sink.send(SupervisorEvent::LogBatch(std::mem::take(&mut pending.text)));
        }
        if let Some(event) = trailing {
            sink.send(event);
        }
    }

    /// Periodic flusher: delivers on every tick and whenever the threshold is
    /// crossed, until `cancel` fires. `interval` is raised to
    /// [`MIN_FLUSH_INTERVAL`].
    pub(crate) async fn run_flusher(
        self: Arc<Self>,
        sink: EventSink,
        interval: Duration,
        cancel: CancellationToken,
    ) {
        let mut ticker = tokio::time::interval(interval.max(MIN_FLUSH_INTERVAL));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {}
                _ = self.wake.notified() => {}
            }
            self.deliver(&sink, None);
        }
        tracing::debug!("log flusher stopped");
    }
}

#[cfg(test)]
#[path = "aggregator_tests.rs"]
mod tests;
