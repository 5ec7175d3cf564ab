// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tav-core: configuration, worker arguments and settings for the TransAV1 supervisor

pub mod macros;

pub mod args;
pub mod config;
pub mod env;
pub mod settings;

pub use args::{display_command_line, to_argv, ArgumentProvider, TransAv1Args, WorkerArg};
pub use config::{
    Compression, ConfigError, Configuration, Encoder, RunMode, UnknownKeyword,
    DEFAULT_TIMEOUT_SECS, MAX_TIMEOUT_SECS,
};
pub use env::EnvError;
pub use settings::{FileSettings, MemorySettings, SettingsError, SettingsStore};
