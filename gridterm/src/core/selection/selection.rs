// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Mouse-driven selection and text extraction.
//!
//! Coordinates are visible-grid cells; reads go through
//! `cell_with_scrollback` so a selection made while scrolled up extracts
//! the rows the user is looking at.
//!
//! Extraction normalizes anchor/focus into reading order. Line mode: the
//! first row runs from the start column to the right edge, middle rows are
//! full, the last row runs from the left edge to the end column. Rectangle
//! mode uses the same column span on every row. Trailing spaces are trimmed
//! per row before each newline and once more at the very end.

use crate::core::screen_buffer::ScreenBuffer;

/// One cell coordinate in the visible grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionPos {
    pub x: usize,
    pub y: usize,
}

impl SelectionPos {
    #[must_use]
    pub fn new(x: usize, y: usize) -> Self { Self { x, y } }
}

/// Selection state for one pane.
#[derive(Debug, Default)]
pub struct Selection {
    anchor: SelectionPos,
    focus: SelectionPos,
    selecting: bool,
    has_selection: bool,
    rectangle: bool,
}

impl Selection {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Begin a drag at `pos`; `rectangle` selects column-block mode.
    pub fn start(&mut self, pos: SelectionPos, rectangle: bool) {
        self.anchor = pos;
        self.focus = pos;
        self.selecting = true;
        self.has_selection = false;
        self.rectangle = rectangle;
    }

    /// Extend the drag to `pos`.
    pub fn extend(&mut self, pos: SelectionPos) {
        self.focus = pos;
        if self.anchor != self.focus {
            self.has_selection = true;
        }
    }

    /// Finish the drag; a zero-length drag (a plain click) selects nothing.
    pub fn end(&mut self) {
        self.selecting = false;
        if self.anchor != self.focus {
            self.has_selection = true;
        }
    }

    pub fn clear(&mut self) { *self = Self::default(); }

    #[must_use]
    pub fn is_selecting(&self) -> bool { self.selecting }

    #[must_use]
    pub fn has_selection(&self) -> bool { self.has_selection }

    #[must_use]
    pub fn is_rectangle(&self) -> bool { self.rectangle }

    #[must_use]
    pub fn anchor(&self) -> SelectionPos { self.anchor }

    #[must_use]
    pub fn focus(&self) -> SelectionPos { self.focus }

    /// Extract the selected text from `buffer`. Empty when nothing is
    /// selected.
    #[must_use]
    pub fn selected_text(&self, buffer: &ScreenBuffer) -> String {
        if !self.has_selection {
            return String::new();
        }

        let start_y = self.anchor.y.min(self.focus.y);
        let end_y = self.anchor.y.max(self.focus.y);
        let cols = buffer.cols();
        let mut text = String::new();

        if self.rectangle {
            let start_x = self.anchor.x.min(self.focus.x);
            let end_x = self.anchor.x.max(self.focus.x).min(cols - 1);
            for y in start_y..=end_y {
                for x in start_x..=end_x {
                    text.push(buffer.cell_with_scrollback(x, y).ch);
                }
                if y < end_y {
                    trim_trailing_spaces(&mut text);
                    text.push('\n');
                }
            }
        } else {
            // Reading order decides which end supplies the start column.
            let (start_x, end_x) = if (self.anchor.y, self.anchor.x)
                <= (self.focus.y, self.focus.x)
            {
                (self.anchor.x, self.focus.x)
            } else {
                (self.focus.x, self.anchor.x)
            };
            for y in start_y..=end_y {
                let row_start = if y == start_y { start_x } else { 0 };
                let row_end = if y == end_y { end_x.min(cols - 1) } else { cols - 1 };
                for x in row_start..=row_end {
                    text.push(buffer.cell_with_scrollback(x, y).ch);
                }
                if y < end_y {
                    trim_trailing_spaces(&mut text);
                    text.push('\n');
                }
            }
        }

        trim_trailing_spaces(&mut text);
        text
    }

    /// Double-click: select the word (or URL) under the cell. Clicking
    /// whitespace clears the selection.
    pub fn select_word(&mut self, buffer: &ScreenBuffer, x: usize, y: usize) {
        let cell = buffer.cell_with_scrollback(x, y);
        if cell.is_blank() {
            self.clear();
            return;
        }

        let cols = buffer.cols();
        let mut start_x = x;
        let mut end_x = x;
        while start_x > 0 && is_word_char(buffer.cell_with_scrollback(start_x - 1, y).ch) {
            start_x -= 1;
        }
        while end_x + 1 < cols && is_word_char(buffer.cell_with_scrollback(end_x + 1, y).ch) {
            end_x += 1;
        }

        self.anchor = SelectionPos::new(start_x, y);
        self.focus = SelectionPos::new(end_x, y);
        self.has_selection = start_x != end_x;
        self.selecting = false;
        self.rectangle = false;
    }

    /// Triple-click: select the entire visible row.
    pub fn select_line(&mut self, buffer: &ScreenBuffer, y: usize) {
        self.anchor = SelectionPos::new(0, y);
        self.focus = SelectionPos::new(buffer.cols() - 1, y);
        self.has_selection = true;
        self.selecting = false;
        self.rectangle = false;
    }

    /// Select every visible cell.
    pub fn select_all(&mut self, buffer: &ScreenBuffer) {
        self.anchor = SelectionPos::new(0, 0);
        self.focus = SelectionPos::new(buffer.cols() - 1, buffer.rows() - 1);
        self.has_selection = true;
        self.selecting = false;
        self.rectangle = false;
    }
}

/// Word characters for double-click selection: alphanumerics, `_`, `-`, and
/// the URL-safe set so a double-click grabs a full URL.
#[must_use]
pub fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric()
        || matches!(
            ch,
            '_' | '-' | '/' | ':' | '.' | '@' | '?' | '=' | '&' | '%' | '+' | '#' | '~'
        )
}

fn trim_trailing_spaces(text: &mut String) {
    while text.ends_with(' ') {
        text.pop();
    }
}
