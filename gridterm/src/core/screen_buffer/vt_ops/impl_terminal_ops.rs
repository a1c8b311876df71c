// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Whole-buffer operations: clear, resize, and the alternate buffer swap.
//!
//! The alternate buffer is swap-based: the inactive grid is parked in
//! `alt_grid` and exchanged with the active one on mode 47/1047/1049. The
//! alternate grid never has scrollback; mode 1049's extra cursor/attr
//! save-restore semantics live in the parser (they belong to the mode, not
//! the grid).
//!
//! Resize policy (no reflow): content from the overlapping
//! `min(old, new)` rows x cols region is copied cell-for-cell, the cursor is
//! clamped, the scroll-region bottom is clamped (an invalid top resets the
//! region), and tab stops past the new width are dropped. Scrollback rows are
//! left at their historical width. Downstream shells repaint on resize, so
//! truncation of over-wide lines is acceptable.

use crate::core::cell::Cell;
use crate::core::screen_buffer::{ScreenBuffer, TabStops};

impl ScreenBuffer {
    /// Clear the active grid and home the cursor. Scrollback is retained;
    /// use [`Self::clear_scrollback`] for ED 3.
    pub fn clear(&mut self) {
        tracing::debug!("clear() alt={} rows={}", self.using_alt, self.rows);
        let blank = Cell::BLANK;
        for cell in &mut self.grid {
            *cell = blank;
        }
        self.cursor_x = 0;
        self.cursor_y = 0;
        self.hyperlinks.clear();
        self.current_hyperlink = None;
        self.dirty = true;
    }

    /// Drop all scrollback rows and reset the view offset (ED 3).
    pub fn clear_scrollback(&mut self) {
        self.scrollback.clear();
        self.scroll_offset = 0;
        self.dirty = true;
    }

    /// Switch between the primary and alternate grid.
    ///
    /// Swap-based: the current grid is parked and the other takes its place.
    /// No scrollback is recorded while the alternate grid is active.
    pub fn use_alternate_buffer(&mut self, use_alt: bool) {
        if use_alt == self.using_alt {
            return;
        }
        if self.alt_grid.len() != self.grid.len() {
            self.alt_grid = vec![Cell::BLANK; self.cols * self.rows];
        }
        std::mem::swap(&mut self.grid, &mut self.alt_grid);
        self.using_alt = use_alt;
        tracing::debug!("alternate buffer {}", if use_alt { "entered" } else { "left" });
        self.dirty = true;
    }

    /// Resize to `cols x rows`, preserving the overlapping content region of
    /// both grids. See the module docs for the full policy.
    pub fn resize(&mut self, cols: usize, rows: usize) {
        let cols = cols.max(1);
        let rows = rows.max(1);
        if cols == self.cols && rows == self.rows {
            return;
        }
        tracing::info!(
            "resize {}x{} -> {}x{} alt={}",
            self.cols,
            self.rows,
            cols,
            rows,
            self.using_alt
        );

        let old_cols = self.cols;
        let old_rows = self.rows;
        let copy_rows = old_rows.min(rows);
        let copy_cols = old_cols.min(cols);

        let resize_grid = |grid: &mut Vec<Cell>| {
            if grid.is_empty() {
                return;
            }
            let mut next = vec![Cell::BLANK; cols * rows];
            for y in 0..copy_rows {
                for x in 0..copy_cols {
                    next[y * cols + x] = grid[y * old_cols + x];
                }
            }
            *grid = next;
        };
        resize_grid(&mut self.grid);
        resize_grid(&mut self.alt_grid);

        self.cols = cols;
        self.rows = rows;
        self.clamp_cursor();

        // Preserve a TUI app's region across the resize; only clamp what no
        // longer fits. An invalid top invalidates the whole region.
        if let Some(bottom) = self.scroll_bottom
            && bottom >= rows
        {
            self.scroll_bottom = Some(rows - 1);
        }
        if self.scroll_top >= rows {
            self.scroll_top = 0;
            self.scroll_bottom = None;
        }

        self.tab_stops.truncate(cols);
        self.dirty = true;
    }

    /// RIS-grade reset: clear both grids and scrollback, restore default
    /// attributes, modes, tab stops, palette, and region.
    pub fn reset(&mut self) {
        self.clear();
        self.clear_scrollback();
        self.alt_grid.clear();
        self.using_alt = false;
        self.current_attr = crate::core::cell::Attributes::default();
        self.cursor_visible = true;
        self.auto_wrap = true;
        self.reset_scroll_region();
        self.tab_stops = TabStops::new(self.cols);
        self.palette.reset();
        self.prompt_markers.clear();
        self.dirty = true;
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
    fn test_clear_homes_cursor_and_blanks_grid() {
        let mut buf = ScreenBuffer::new(4, 2, 10);
        buf.write_str("abcd efg");
        buf.clear();
        assert_eq!(buf.cursor(), (0, 0));
        assert_eq!(row_string(&buf, 0), "    ");
        assert_eq!(row_string(&buf, 1), "    ");
    }

    #[test]
    fn test_alt_buffer_preserves_primary_content() {
        // Scenario: enter alt, write, leave; primary grid unchanged.
        let mut buf = ScreenBuffer::new(4, 2, 10);
        buf.write_str("main");

        buf.use_alternate_buffer(true);
        assert!(buf.is_using_alternate_buffer());
        assert_eq!(row_string(&buf, 0), "    ", "alt starts blank");
        buf.set_cursor_pos(0, 0);
        buf.write_str("X");

        buf.use_alternate_buffer(false);
        assert_eq!(row_string(&buf, 0), "main");
    }

    #[test]
    fn test_alt_buffer_no_scrollback() {
        let mut buf = ScreenBuffer::new(2, 2, 10);
        buf.use_alternate_buffer(true);
        buf.write_str("abcdefgh");
        assert_eq!(buf.scrollback_used(), 0);
    }

    #[test]
    fn test_resize_preserves_overlap() {
        let mut buf = ScreenBuffer::new(4, 3, 10);
        buf.write_str("abcd");
        buf.set_cursor_pos(0, 1);
        buf.write_str("efgh");

        buf.resize(6, 2);
        assert_eq!(row_string(&buf, 0), "abcd  ");
        assert_eq!(row_string(&buf, 1), "efgh  ");

        buf.resize(2, 2);
        assert_eq!(row_string(&buf, 0), "ab");
    }

    #[test]
    fn test_resize_clamps_cursor_and_region() {
        let mut buf = ScreenBuffer::new(10, 10, 0);
        buf.set_cursor_pos(9, 9);
        buf.set_scroll_region(2, 8);
        buf.resize(5, 5);
        assert_eq!(buf.cursor(), (4, 4));
        assert_eq!(buf.scroll_region_top(), 2);
        assert_eq!(buf.scroll_region_bottom(), 4);

        // Shrinking past the region top resets the region entirely.
        buf.resize(5, 2);
        assert!(!buf.has_explicit_scroll_region());
    }

    #[test]
    fn test_resize_resizes_inactive_alt_grid_too() {
        let mut buf = ScreenBuffer::new(4, 2, 0);
        buf.use_alternate_buffer(true);
        buf.write_str("alt!");
        buf.use_alternate_buffer(false);

        buf.resize(6, 3);
        buf.use_alternate_buffer(true);
        assert_eq!(row_string(&buf, 0), "alt!  ");
    }

    #[test]
    fn test_resize_is_noop_for_same_size() {
        let mut buf = ScreenBuffer::new(4, 2, 0);
        buf.write_str("stay");
        buf.clear_dirty();
        buf.resize(4, 2);
        assert!(!buf.is_dirty());
        assert_eq!(row_string(&buf, 0), "stay");
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut buf = ScreenBuffer::new(4, 2, 10);
        buf.write_str("abcdefgh");
        buf.set_scroll_region(0, 0);
        buf.set_auto_wrap(false);
        buf.set_cursor_visible(false);
        buf.reset();

        assert_eq!(buf.cursor(), (0, 0));
        assert_eq!(buf.scrollback_used(), 0);
        assert!(buf.auto_wrap());
        assert!(buf.is_cursor_visible());
        assert!(!buf.has_explicit_scroll_region());
        assert!(!buf.is_using_alternate_buffer());
    }
}
