// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker output buffering.
//!
//! Producers call [`LogAggregator::write`] from any task; batches reach the
//! controller as [`crate::SupervisorEvent::LogBatch`] and are retained on the
//! consumer side by a bounded [`LogView`].

mod aggregator;
mod sanitize;
mod view;

pub use aggregator::{LogAggregator, MIN_FLUSH_INTERVAL};
pub use sanitize::sanitize;
pub use view::{LogView, DEFAULT_HARD_CAP, DEFAULT_KEEP};

/// Prefix for lines read from the worker's stderr.
pub const STDERR_PREFIX: &str = "[stderr] ";

/// Prefix for lines the supervisor writes about the session lifecycle.
pub const LIFECYCLE_PREFIX: &str = "[tav] ";
