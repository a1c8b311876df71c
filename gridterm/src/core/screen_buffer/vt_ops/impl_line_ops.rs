// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Line clearing and IL/DL insertion/deletion.
//!
//! IL and DL compose with the scroll region: inserting at the cursor is a
//! region-scroll-down of a region temporarily narrowed to start at the
//! cursor row, deleting is the symmetric region-scroll-up. Both are no-ops
//! when the cursor sits outside the scroll region.

use crate::core::cell::Cell;
use crate::core::screen_buffer::ScreenBuffer;

impl ScreenBuffer {
    /// Clear an entire row to blanks.
    pub fn clear_line(&mut self, y: usize) {
        if y >= self.rows {
            return;
        }
        self.clear_line_range(y, 0, self.cols - 1);
    }

    /// Clear columns `[x0, x1]` (inclusive) of row `y`.
    pub fn clear_line_range(&mut self, y: usize, x0: usize, x1: usize) {
        if y >= self.rows {
            return;
        }
        let x0 = x0.min(self.cols - 1);
        let x1 = x1.min(self.cols - 1);
        let blank = Cell::BLANK;
        for x in x0..=x1 {
            let idx = self.cell_index(x, y);
            self.grid[idx] = blank;
        }
        self.dirty = true;
    }

    /// Clear a `width x height` rectangle with top-left corner (x, y).
    pub fn clear_rect(&mut self, x: usize, y: usize, width: usize, height: usize) {
        if width == 0 || height == 0 {
            return;
        }
        for dy in 0..height {
            let row = y + dy;
            if row >= self.rows {
                break;
            }
            self.clear_line_range(row, x, x + width - 1);
        }
    }

    /// IL - insert `n` blank lines at the cursor row. Rows from the cursor to
    /// the bottom of the scroll region shift down; rows pushed past the
    /// region bottom are lost. No-op outside the scroll region.
    pub fn insert_lines_at_cursor(&mut self, n: usize) {
        let y = self.cursor_y;
        let bottom = self.scroll_region_bottom();
        if y < self.scroll_top || y > bottom {
            return;
        }
        let n = n.max(1).min(bottom - y + 1);

        // Narrow the region to [cursor, bottom], scroll down, restore.
        let saved_top = self.scroll_top;
        let saved_bottom = self.scroll_bottom;
        self.scroll_top = y;
        self.scroll_bottom = Some(bottom);
        self.scroll_region_down(n);
        self.scroll_top = saved_top;
        self.scroll_bottom = saved_bottom;
    }

    /// DL - delete `n` lines at the cursor row. Rows below shift up into the
    /// gap; blank rows appear at the bottom of the scroll region. No-op
    /// outside the scroll region.
    pub fn delete_lines_at_cursor(&mut self, n: usize) {
        let y = self.cursor_y;
        let bottom = self.scroll_region_bottom();
        if y < self.scroll_top || y > bottom {
            return;
        }
        let n = n.max(1).min(bottom - y + 1);

        let saved_top = self.scroll_top;
        let saved_bottom = self.scroll_bottom;
        self.scroll_top = y;
        self.scroll_bottom = Some(bottom);
        self.scroll_region_up(n);
        self.scroll_top = saved_top;
        self.scroll_bottom = saved_bottom;
    }
}
