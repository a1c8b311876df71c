// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! URL detection under a cell, for Ctrl+Click open-link behavior.
//!
//! Expands over the word-char set around the clicked cell, then checks the
//! span for a recognized scheme (`www.` is promoted to `https://`). Trailing
//! sentence punctuation that the word-char set happens to admit (`.`, `?`,
//! `#`, ...) is trimmed so "see https://example.com." opens cleanly.

use crate::core::screen_buffer::ScreenBuffer;

use super::selection::is_word_char;

const SCHEMES: &[&str] = &["https://", "http://", "file://", "ftp://"];

/// Extract the URL under visible cell (x, y), if any.
#[must_use]
pub fn extract_url_at(buffer: &ScreenBuffer, x: usize, y: usize) -> Option<String> {
    if x >= buffer.cols() || y >= buffer.rows() {
        return None;
    }
    if !is_word_char(buffer.cell_with_scrollback(x, y).ch) {
        return None;
    }

    // Expand to the word-char span around the click.
    let mut start = x;
    while start > 0 && is_word_char(buffer.cell_with_scrollback(start - 1, y).ch) {
        start -= 1;
    }
    let mut end = x;
    while end + 1 < buffer.cols() && is_word_char(buffer.cell_with_scrollback(end + 1, y).ch) {
        end += 1;
    }

    let span: String = (start..=end)
        .map(|col| buffer.cell_with_scrollback(col, y).ch)
        .collect();

    let trimmed = span.trim_end_matches(['.', ',', ';', ':', '!', '?', '#']);
    if trimmed.is_empty() {
        return None;
    }

    if SCHEMES.iter().any(|scheme| trimmed.starts_with(scheme)) {
        return Some(trimmed.to_string());
    }
    if trimmed.starts_with("www.") && trimmed.len() > 4 {
        return Some(format!("https://{trimmed}"));
    }
    None
}
