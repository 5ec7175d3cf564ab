// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

/// Retained characters that trigger truncation.
pub const DEFAULT_HARD_CAP: usize = 1_000_000;

/// Characters kept after truncation.
pub const DEFAULT_KEEP: usize = 800_000;

/// Bounded, consumer-side record of delivered log text.
///
/// Once retained text exceeds the hard cap the oldest text is dropped down to
/// the keep watermark, cut forward to the next line start. Newest text always
/// stays verbatim.
#[derive(Debug, Clone)]
pub struct LogView {
    text: String,
    chars: usize,
    hard_cap: usize,
    keep: usize,
}

impl Default for LogView {
    fn default() -> Self {
        Self::with_limits(DEFAULT_HARD_CAP, DEFAULT_KEEP)
    }
}

impl LogView {
    pub fn new() -> Self {
        Self::default()
    }

    /// `keep` is clamped to `hard_cap`.
    pub fn with_limits(hard_cap: usize, keep: usize) -> Self {
        Self { text: String::new(), chars: 0, hard_cap, keep: keep.min(hard_cap) }
    }

    /// Append a delivered batch. Returns true when older text was dropped.
    pub fn append(&mut self, batch: &str) -> bool {
        self.text.push_str(batch);
        self.chars += batch.chars().count();
        if self.chars <= self.hard_cap {
            return false;
        }
        self.truncate();
        true
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len_chars(&self) -> usize {
        self.chars
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The last `n` lines.
    pub fn tail(&self, n: usize) -> Vec<&str> {
        let lines: Vec<&str> = self.text.lines().collect();
        lines[lines.len().saturating_sub(n)..].to_vec()
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.chars = 0;
    }

    fn truncate(&mut self) {
        let excess = self.chars - self.keep;
        let cut = match self.text.char_indices().nth(excess) {
            Some((byte, _)) => byte,
            None => self.text.len(),
        };
        let start = if self.text[..cut].ends_with('\n') {
            cut
        } else {
            // a single line longer than `keep` is cut mid-line
            match self.text[cut..].find('\n') {
                Some(i) if cut + i + 1 < self.text.len() => cut + i + 1,
                _ => cut,
            }
        };
        self.text.drain(..start);
        self.chars = self.text.chars().count();
    }
}

#[cfg(test)]
#[path = "view_tests.rs"]
mod tests;
