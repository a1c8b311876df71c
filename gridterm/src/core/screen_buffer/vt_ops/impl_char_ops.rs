// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Character writing, insertion, deletion, and erasure.
//!
//! `write_char` is the hot path: every printable codepoint the parser decodes
//! lands here, as do the C0 controls the parser routes through the buffer
//! (LF, CR, TAB, BS). The wrap rule at the last column depends on DECAWM:
//!
//! ```text
//! DECAWM on (default):            DECAWM off:
//!   write at col 9 of 10            write at col 9 of 10
//!   cursor -> (0, y+1)              cursor sticks at col 9
//!   scroll when y passes the        subsequent writes overwrite
//!   bottom of the scroll region     the last column
//! ```
//!
//! Scrolling triggered by a wrap feeds scrollback only when no explicit
//! scroll region is set; an explicit region discards its top row instead.

use miette::miette;

use crate::core::cell::Cell;
use crate::core::screen_buffer::ScreenBuffer;

impl ScreenBuffer {
    /// Write one codepoint at the cursor using the current attributes and
    /// hyperlink scope, then advance the cursor.
    ///
    /// Control characters are routed instead of written: LF -> [`Self::new_line`],
    /// CR -> column 0, TAB -> next tab stop, BS -> one column left.
    pub fn write_char(&mut self, ch: char) {
        match ch {
            '\n' => {
                self.new_line();
                return;
            }
            '\r' => {
                self.carriage_return();
                return;
            }
            '\t' => {
                self.tab();
                return;
            }
            '\u{8}' => {
                self.backspace();
                return;
            }
            _ => {}
        }

        let attr = self.current_attr;
        let hyperlink = self.current_hyperlink;
        if let Some(cell) = self.cell_mut(self.cursor_x, self.cursor_y) {
            cell.ch = ch;
            cell.attr = attr;
            cell.hyperlink = hyperlink;
        }

        self.cursor_x += 1;
        if self.cursor_x >= self.cols {
            if self.auto_wrap {
                self.cursor_x = 0;
                self.cursor_y += 1;
                let bottom = self.scroll_region_bottom();
                if self.cursor_y > bottom {
                    if self.has_explicit_scroll_region() {
                        self.scroll_region_up(1);
                    } else {
                        self.scroll_up(1);
                    }
                    self.cursor_y = bottom;
                }
            } else {
                self.cursor_x = self.cols - 1;
            }
        }
        self.dirty = true;
    }

    /// Write every char of `text` through [`Self::write_char`].
    pub fn write_str(&mut self, text: &str) {
        for ch in text.chars() {
            self.write_char(ch);
        }
    }

    /// LF: move down one line, scrolling when the cursor passes the bottom of
    /// the scroll region. Column is unchanged (the parser adds CR in LNM).
    pub fn new_line(&mut self) {
        self.cursor_y += 1;
        let bottom = self.scroll_region_bottom();
        if self.cursor_y > bottom {
            if self.has_explicit_scroll_region() {
                self.scroll_region_up(1);
            } else {
                self.scroll_up(1);
            }
            self.cursor_y = bottom;
        }
        self.dirty = true;
    }

    /// CR: column 0.
    pub fn carriage_return(&mut self) {
        self.cursor_x = 0;
        self.dirty = true;
    }

    /// TAB: advance to the next tab stop, capped at the last column.
    pub fn tab(&mut self) {
        self.cursor_x = self
            .tab_stops
            .next_stop(self.cursor_x)
            .unwrap_or(self.cols - 1)
            .min(self.cols - 1);
        self.dirty = true;
    }

    /// BS: one column left, stopping at column 0.
    pub fn backspace(&mut self) {
        if self.cursor_x > 0 {
            self.cursor_x -= 1;
            self.dirty = true;
        }
    }

    /// ICH - insert `n` blank cells at the cursor; cells to the right shift
    /// right, cells pushed past the last column are lost.
    ///
    /// # Errors
    /// Returns an error if the cursor row is out of range (cannot happen
    /// while the cursor invariant holds).
    pub fn insert_chars_at_cursor(&mut self, n: usize) -> miette::Result<()> {
        let y = self.cursor_y;
        if y >= self.rows {
            return Err(miette!("cursor row {y} outside grid"));
        }
        let n = n.max(1).min(self.cols - self.cursor_x);
        let start = self.cell_index(0, y);
        let row = &mut self.grid[start..start + self.cols];
        row[self.cursor_x..].rotate_right(n);
        let blank = Cell::blank_with(self.current_attr);
        for cell in &mut row[self.cursor_x..self.cursor_x + n] {
            *cell = blank;
        }
        self.dirty = true;
        Ok(())
    }

    /// DCH - delete `n` cells at the cursor; cells to the right shift left,
    /// blanks fill the end of the line.
    ///
    /// # Errors
    /// Returns an error if the cursor row is out of range (cannot happen
    /// while the cursor invariant holds).
    pub fn delete_chars_at_cursor(&mut self, n: usize) -> miette::Result<()> {
        let y = self.cursor_y;
        if y >= self.rows {
            return Err(miette!("cursor row {y} outside grid"));
        }
        let n = n.max(1).min(self.cols - self.cursor_x);
        let start = self.cell_index(0, y);
        let row = &mut self.grid[start..start + self.cols];
        row[self.cursor_x..].rotate_left(n);
        let blank = Cell::blank_with(self.current_attr);
        for cell in &mut row[self.cols - n..] {
            *cell = blank;
        }
        self.dirty = true;
        Ok(())
    }

    /// ECH - erase `n` cells starting at the cursor in place; no shifting.
    ///
    /// # Errors
    /// Returns an error if the cursor row is out of range (cannot happen
    /// while the cursor invariant holds).
    pub fn erase_chars_at_cursor(&mut self, n: usize) -> miette::Result<()> {
        let y = self.cursor_y;
        if y >= self.rows {
            return Err(miette!("cursor row {y} outside grid"));
        }
        let n = n.max(1);
        let blank = Cell::blank_with(self.current_attr);
        let end = (self.cursor_x + n).min(self.cols);
        for x in self.cursor_x..end {
            let idx = self.cell_index(x, y);
            self.grid[idx] = blank;
        }
        self.dirty = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn row_string(buf: &ScreenBuffer, y: usize) -> String {
        (0..buf.cols()).map(|x| buf.cell(x, y).ch).collect()
    }

    #[test]
    fn test_hello_scenario() {
        // Feed "Hi\r\n" to an 80x24 buffer; row 0 == "Hi", cursor at (0, 1).
        let mut buf = ScreenBuffer::new(80, 24, 100);
        buf.write_str("Hi\r\n");
        assert_eq!(&row_string(&buf, 0)[..2], "Hi");
        assert_eq!(buf.cursor(), (0, 1));
    }

    #[test]
    fn test_wrap_at_last_column() {
        let mut buf = ScreenBuffer::new(4, 3, 0);
        buf.write_str("abcde");
        assert_eq!(row_string(&buf, 0), "abcd");
        assert_eq!(buf.cell(0, 1).ch, 'e');
        assert_eq!(buf.cursor(), (1, 1));
    }

    #[test]
    fn test_wrap_suppressed_without_decawm() {
        let mut buf = ScreenBuffer::new(4, 3, 0);
        buf.set_auto_wrap(false);
        buf.write_str("abcdef");
        // 'd', then 'e', then 'f' all land on the last column.
        assert_eq!(row_string(&buf, 0), "abcf");
        assert_eq!(buf.cursor(), (3, 0));
    }

    #[test]
    fn test_wrap_scroll_feeds_scrollback_without_region() {
        let mut buf = ScreenBuffer::new(2, 2, 10);
        buf.write_str("abcdef");
        // The wrap is eager: filling row 1 scrolls immediately, so both "ab"
        // and "cd" have already been evicted and "ef" sits on row 0.
        assert_eq!(buf.scrollback_used(), 2);
        assert_eq!(buf.row_text(-2), "ab");
        assert_eq!(buf.row_text(-1), "cd");
        assert_eq!(row_string(&buf, 0), "ef");
        assert_eq!(row_string(&buf, 1), "  ");
        assert_eq!(buf.cursor(), (0, 1));
    }

    #[test]
    fn test_wrap_scroll_discards_with_region() {
        let mut buf = ScreenBuffer::new(2, 3, 10);
        buf.set_scroll_region(0, 1);
        buf.write_str("abcdef");
        assert_eq!(buf.scrollback_used(), 0, "explicit region never evicts");
    }

    #[test]
    fn test_tab_advances_to_stop() {
        let mut buf = ScreenBuffer::new(20, 2, 0);
        buf.write_str("ab\t");
        assert_eq!(buf.cursor(), (8, 0));
        buf.write_char('\t');
        assert_eq!(buf.cursor(), (16, 0));
        buf.write_char('\t');
        // No further stop: cap at last column.
        assert_eq!(buf.cursor(), (19, 0));
    }

    #[test]
    fn test_backspace_stops_at_zero() {
        let mut buf = ScreenBuffer::new(10, 2, 0);
        buf.write_char('\u{8}');
        assert_eq!(buf.cursor(), (0, 0));
        buf.write_str("ab");
        buf.write_char('\u{8}');
        assert_eq!(buf.cursor(), (1, 0));
    }

    #[test]
    fn test_insert_chars_shifts_right() {
        let mut buf = ScreenBuffer::new(6, 1, 0);
        buf.write_str("abcdef");
        buf.set_cursor_pos(2, 0);
        buf.insert_chars_at_cursor(2).unwrap();
        assert_eq!(row_string(&buf, 0), "ab  cd");
    }

    #[test]
    fn test_delete_chars_shifts_left() {
        let mut buf = ScreenBuffer::new(6, 1, 0);
        buf.write_str("abcdef");
        buf.set_cursor_pos(1, 0);
        buf.delete_chars_at_cursor(2).unwrap();
        assert_eq!(row_string(&buf, 0), "adef  ");
    }

    #[test]
    fn test_erase_chars_in_place() {
        let mut buf = ScreenBuffer::new(6, 1, 0);
        buf.write_str("abcdef");
        buf.set_cursor_pos(2, 0);
        buf.erase_chars_at_cursor(3).unwrap();
        assert_eq!(row_string(&buf, 0), "ab   f");
    }

    #[test]
    fn test_erase_past_end_is_clamped() {
        let mut buf = ScreenBuffer::new(4, 1, 0);
        buf.write_str("abcd");
        buf.set_cursor_pos(2, 0);
        buf.erase_chars_at_cursor(99).unwrap();
        assert_eq!(row_string(&buf, 0), "ab  ");
    }

    #[test]
    fn test_cursor_always_in_bounds_after_writes() {
        let mut buf = ScreenBuffer::new(3, 2, 4);
        for ch in "xyz\t\r\nabcdefghij\u{8}\u{8}\u{8}\u{8}".chars() {
            buf.write_char(ch);
            let (x, y) = buf.cursor();
            assert!(x < buf.cols() && y < buf.rows());
        }
    }

    #[test]
    fn test_hyperlink_stamping() {
        let mut buf = ScreenBuffer::new(10, 2, 0);
        let id = buf.add_hyperlink("https://example.com", None);
        buf.write_str("link");
        buf.clear_current_hyperlink();
        buf.write_str("rest");

        assert_eq!(buf.cell(0, 0).hyperlink, Some(id));
        assert_eq!(buf.cell(3, 0).hyperlink, Some(id));
        assert_eq!(buf.cell(4, 0).hyperlink, None);
        assert_eq!(buf.hyperlink_uri(id), Some("https://example.com"));
    }
}
