// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Plain-text and regex search over the visible grid and scrollback.
//!
//! Rows are addressed the way the buffer's `row_text` addresses them:
//! `-scrollback_used..-1` for history, `0..rows` for the visible grid. Each
//! row is reconstructed as one char per column, so match columns equal char
//! offsets.
//!
//! Plain-text matching advances by one cell after each hit, so overlapping
//! matches are all reported. Regex matching uses the `regex` crate; patterns
//! relying on backreferences or lookaround (ECMAScript extensions the crate
//! does not support) are reported as invalid rather than silently
//! misbehaving.

use regex::RegexBuilder;

use crate::core::screen_buffer::ScreenBuffer;

/// One search hit. `y` is negative for scrollback rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchMatch {
    /// Column of the first matched cell.
    pub x: usize,
    /// Row: `-scrollback_used..-1` = scrollback, `0..rows` = visible.
    pub y: isize,
    /// Match length in cells.
    pub len: usize,
}

/// Search failure modes.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("invalid regex pattern: {0}")]
    InvalidPattern(String),
}

/// Result of one search pass.
#[derive(Debug, Default)]
pub struct SearchResult {
    pub matches: Vec<SearchMatch>,
    pub error: Option<SearchError>,
}

impl SearchResult {
    #[must_use]
    pub fn is_valid(&self) -> bool { self.error.is_none() }
}

/// Stateless search over a screen buffer.
#[derive(Debug)]
pub struct SearchEngine;

impl SearchEngine {
    /// Search `buffer` for `query`.
    ///
    /// Row order is oldest-first: scrollback from `-used`, then the visible
    /// rows. An empty query matches nothing; an invalid regex yields a
    /// result with `error` set and no matches.
    #[must_use]
    pub fn search(
        buffer: &ScreenBuffer,
        query: &str,
        use_regex: bool,
        case_sensitive: bool,
        include_scrollback: bool,
    ) -> SearchResult {
        let mut result = SearchResult::default();
        if query.is_empty() {
            return result;
        }

        let regex = if use_regex {
            match RegexBuilder::new(query)
                .case_insensitive(!case_sensitive)
                .build()
            {
                Ok(regex) => Some(regex),
                Err(err) => {
                    tracing::warn!("invalid search pattern {query:?}: {err}");
                    result.error = Some(SearchError::InvalidPattern(err.to_string()));
                    return result;
                }
            }
        } else {
            None
        };

        let start_row = if include_scrollback {
            -(buffer.scrollback_used() as isize)
        } else {
            0
        };
        let end_row = buffer.rows() as isize;

        for row in start_row..end_row {
            let line = buffer.row_text(row);
            if line.is_empty() {
                continue;
            }
            match &regex {
                Some(regex) => search_line_regex(&line, regex, row, &mut result.matches),
                None => {
                    search_line_plain(&line, query, case_sensitive, row, &mut result.matches);
                }
            }
        }

        tracing::debug!(
            "search {query:?} found {} matches over rows {start_row}..{end_row}",
            result.matches.len()
        );
        result
    }
}

fn search_line_regex(line: &str, regex: &regex::Regex, row: isize, out: &mut Vec<SearchMatch>) {
    for found in regex.find_iter(line) {
        // Byte offsets -> cell columns. One char per cell makes char counts
        // exactly column counts.
        let x = line[..found.start()].chars().count();
        let len = found.as_str().chars().count();
        if len > 0 {
            out.push(SearchMatch { x, y: row, len });
        }
    }
}

fn search_line_plain(
    line: &str,
    query: &str,
    case_sensitive: bool,
    row: isize,
    out: &mut Vec<SearchMatch>,
) {
    let haystack: Vec<char> = line.chars().collect();
    let needle: Vec<char> = query.chars().collect();
    if needle.len() > haystack.len() {
        return;
    }

    let fold = |ch: char| {
        if case_sensitive {
            ch
        } else {
            ch.to_lowercase().next().unwrap_or(ch)
        }
    };

    let mut x = 0;
    while x + needle.len() <= haystack.len() {
        let hit = haystack[x..x + needle.len()]
            .iter()
            .zip(needle.iter())
            .all(|(&h, &n)| fold(h) == fold(n));
        if hit {
            out.push(SearchMatch {
                x,
                y: row,
                len: needle.len(),
            });
        }
        // Advance by one to report overlapping matches.
        x += 1;
    }
}

/// Search state for a pane: query, matches, and the active match cursor.
///
/// `next`/`previous` wrap around the match list.
#[derive(Debug, Default)]
pub struct SearchController {
    query: String,
    matches: Vec<SearchMatch>,
    current: Option<usize>,
    error: Option<SearchError>,
}

impl SearchController {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Run a search and reset the active match to the first hit.
    pub fn run(
        &mut self,
        buffer: &ScreenBuffer,
        query: &str,
        use_regex: bool,
        case_sensitive: bool,
        include_scrollback: bool,
    ) {
        let result =
            SearchEngine::search(buffer, query, use_regex, case_sensitive, include_scrollback);
        self.query = query.to_string();
        self.matches = result.matches;
        self.error = result.error;
        self.current = if self.matches.is_empty() { None } else { Some(0) };
    }

    /// Advance to the next match, wrapping at the end.
    pub fn next(&mut self) -> Option<SearchMatch> {
        let current = self.current?;
        let next = (current + 1) % self.matches.len();
        self.current = Some(next);
        Some(self.matches[next])
    }

    /// Step back to the previous match, wrapping at the start.
    pub fn previous(&mut self) -> Option<SearchMatch> {
        let current = self.current?;
        let previous = (current + self.matches.len() - 1) % self.matches.len();
        self.current = Some(previous);
        Some(self.matches[previous])
    }

    #[must_use]
    pub fn current_match(&self) -> Option<SearchMatch> {
        self.current.map(|i| self.matches[i])
    }

    #[must_use]
    pub fn matches(&self) -> &[SearchMatch] { &self.matches }

    #[must_use]
    pub fn match_count(&self) -> usize { self.matches.len() }

    #[must_use]
    pub fn query(&self) -> &str { &self.query }

    #[must_use]
    pub fn error(&self) -> Option<&SearchError> { self.error.as_ref() }

    pub fn clear(&mut self) { *self = Self::default(); }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn buffer_with(rows: &[&str]) -> ScreenBuffer {
        let cols = rows.iter().map(|r| r.len()).max().unwrap_or(1).max(1);
        let mut buf = ScreenBuffer::new(cols, rows.len().max(1), 50);
        for (y, row) in rows.iter().enumerate() {
            buf.set_cursor_pos(0, y);
            buf.write_str(row);
        }
        buf
    }

    #[test]
    fn test_plain_search_positions() {
        let buf = buffer_with(&["error: failed", "ok", "error again"]);
        let result = SearchEngine::search(&buf, "error", false, true, false);
        assert!(result.is_valid());
        assert_eq!(
            result.matches,
            vec![
                SearchMatch { x: 0, y: 0, len: 5 },
                SearchMatch { x: 0, y: 2, len: 5 },
            ]
        );
    }

    #[test]
    fn test_case_insensitive_plain_search() {
        let buf = buffer_with(&["Warning WARNING warning"]);
        let result = SearchEngine::search(&buf, "warning", false, false, false);
        assert_eq!(result.matches.len(), 3);

        let sensitive = SearchEngine::search(&buf, "warning", false, true, false);
        assert_eq!(sensitive.matches.len(), 1);
        assert_eq!(sensitive.matches[0].x, 16);
    }

    #[test]
    fn test_overlapping_plain_matches() {
        let buf = buffer_with(&["aaaa"]);
        let result = SearchEngine::search(&buf, "aa", false, true, false);
        let xs: Vec<usize> = result.matches.iter().map(|m| m.x).collect();
        assert_eq!(xs, vec![0, 1, 2]);
    }

    #[test]
    fn test_regex_search() {
        let buf = buffer_with(&["exit code 17", "exit code 0"]);
        let result = SearchEngine::search(&buf, r"code \d+", true, true, false);
        assert_eq!(result.matches.len(), 2);
        assert_eq!(result.matches[0].x, 5);
        assert_eq!(result.matches[0].len, 7);
    }

    #[test]
    fn test_invalid_regex_reports_error() {
        let buf = buffer_with(&["text"]);
        let result = SearchEngine::search(&buf, "(unclosed", true, true, false);
        assert!(!result.is_valid());
        assert!(result.matches.is_empty());
        assert!(matches!(result.error, Some(SearchError::InvalidPattern(_))));
    }

    #[test]
    fn test_scrollback_rows_have_negative_y() {
        // 2 rows visible; earlier lines scroll into history.
        let mut buf = ScreenBuffer::new(10, 2, 50);
        buf.write_str("needle\r\nfiller\r\nfiller\r\nfiller\r\n");
        assert!(buf.scrollback_used() > 0);

        let with = SearchEngine::search(&buf, "needle", false, true, true);
        assert_eq!(with.matches.len(), 1);
        assert!(with.matches[0].y < 0);

        let without = SearchEngine::search(&buf, "needle", false, true, false);
        assert!(without.matches.is_empty());
    }

    #[test]
    fn test_empty_query_matches_nothing() {
        let buf = buffer_with(&["anything"]);
        let result = SearchEngine::search(&buf, "", false, true, true);
        assert!(result.matches.is_empty());
        assert!(result.is_valid());
    }

    #[test]
    fn test_controller_navigation_wraps() {
        let buf = buffer_with(&["x x x"]);
        let mut controller = SearchController::new();
        controller.run(&buf, "x", false, true, false);
        assert_eq!(controller.match_count(), 3);
        assert_eq!(controller.current_match().unwrap().x, 0);

        assert_eq!(controller.next().unwrap().x, 2);
        assert_eq!(controller.next().unwrap().x, 4);
        assert_eq!(controller.next().unwrap().x, 0, "wraps forward");
        assert_eq!(controller.previous().unwrap().x, 4, "wraps backward");

        controller.clear();
        assert_eq!(controller.match_count(), 0);
        assert!(controller.next().is_none());
    }
}
