// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error type that carries a process exit code.
//!
//! Commands return `ExitError` instead of calling `std::process::exit()`
//! directly, so `main()` owns termination and the log guard is flushed.

use std::fmt;
use tav_supervisor::EXIT_CODE_UNAVAILABLE;

/// Exit code for configuration and usage problems.
pub const USAGE_EXIT_CODE: i32 = 2;

#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    pub message: String,
}

impl ExitError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }

    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(USAGE_EXIT_CODE, message)
    }

    /// Mirror the worker's exit code. An unavailable code becomes 1; the
    /// message is empty because the outcome was already printed.
    pub fn from_worker_code(code: i32) -> Self {
        let code = if code == EXIT_CODE_UNAVAILABLE { 1 } else { code };
        Self::new(code, String::new())
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ExitError {}

#[cfg(test)]
#[path = "exit_error_tests.rs"]
mod tests;
