// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

mod args;
mod help;
#[cfg(unix)]
mod run;
mod settings;
