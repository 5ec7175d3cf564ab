// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

/// Clean one raw output chunk for display.
///
/// Drops control characters except `\n` and `\r`, trims trailing line
/// terminators, and returns `None` when nothing visible is left.
pub fn sanitize(chunk: &str) -> Option<String> {
    let cleaned: String =
        chunk.chars().filter(|c| !c.is_control() || matches!(c, '\n' | '\r')).collect();
    let trimmed = cleaned.trim_end_matches(['\r', '\n']);
    if trimmed.trim().is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
#[path = "sanitize_tests.rs"]
mod tests;
