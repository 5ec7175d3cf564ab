// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tav-supervisor: lifecycle, output capture and termination of the TransAV1 worker

mod config;
mod error;
mod event;
pub mod locate;
pub mod log;
pub mod process;
mod session;
mod supervisor;
pub mod termination;

pub use config::SupervisorConfig;
pub use error::{SignalError, StartError};
pub use event::{EventSink, EventStream, SessionOutcome, SupervisorEvent, EXIT_CODE_UNAVAILABLE};
pub use log::{LogAggregator, LogView};
pub use session::{SessionHandle, SessionId, SessionState, SessionSummary};
pub use supervisor::{StopRequest, Supervisor};
