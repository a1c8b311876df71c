// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Scrolling and the scroll region (DECSTBM).
//!
//! Two families with deliberately different eviction behavior:
//!
//! - [`ScreenBuffer::scroll_up`] / [`ScreenBuffer::scroll_down`] move the
//!   whole grid. On the primary buffer, rows scrolled off the top are pushed
//!   into the scrollback ring.
//! - [`ScreenBuffer::scroll_region_up`] / [`ScreenBuffer::scroll_region_down`]
//!   move rows strictly inside `[scroll_top, scroll_bottom]` and clear the
//!   freed rows. Nothing ever reaches scrollback from a region scroll.
//!
//! Keeping these separate is a correctness invariant: a TUI app with a
//! region set (vim's status line, tmux panes) must not pollute the user's
//! scroll history.

use crate::core::cell::Cell;
use crate::core::screen_buffer::ScreenBuffer;

impl ScreenBuffer {
    /// Scroll the whole grid up by `lines`, evicting the top rows into
    /// scrollback (primary buffer only) and clearing the bottom rows.
    pub fn scroll_up(&mut self, lines: usize) {
        if lines == 0 {
            return;
        }
        let lines = lines.min(self.rows);
        tracing::trace!(
            "scroll_up({lines}) alt={} region=[{},{}]",
            self.using_alt,
            self.scroll_top,
            self.scroll_region_bottom()
        );

        if !self.using_alt {
            for y in 0..lines {
                let start = self.cell_index(0, y);
                let row = self.grid[start..start + self.cols].to_vec();
                self.scrollback.push_row(row);
            }
        }

        self.grid.rotate_left(lines * self.cols);
        let blank = Cell::BLANK;
        let tail = self.grid.len() - lines * self.cols;
        for cell in &mut self.grid[tail..] {
            *cell = blank;
        }
        self.dirty = true;
    }

    /// Scroll the whole grid down by `lines`, clearing the top rows. No
    /// scrollback interaction in either direction.
    pub fn scroll_down(&mut self, lines: usize) {
        if lines == 0 {
            return;
        }
        let lines = lines.min(self.rows);
        self.grid.rotate_right(lines * self.cols);
        let blank = Cell::BLANK;
        for cell in &mut self.grid[..lines * self.cols] {
            *cell = blank;
        }
        self.dirty = true;
    }

    /// Scroll rows within the scroll region up by `lines`; freed rows at the
    /// region bottom are cleared. The evicted top rows are discarded.
    pub fn scroll_region_up(&mut self, lines: usize) {
        if lines == 0 {
            return;
        }
        let top = self.scroll_top;
        let bottom = self.scroll_region_bottom();
        let height = bottom - top + 1;
        let lines = lines.min(height);
        tracing::trace!("scroll_region_up({lines}) region=[{top},{bottom}]");

        let start = self.cell_index(0, top);
        let end = self.cell_index(0, bottom) + self.cols;
        self.grid[start..end].rotate_left(lines * self.cols);
        let blank = Cell::BLANK;
        for cell in &mut self.grid[end - lines * self.cols..end] {
            *cell = blank;
        }
        self.dirty = true;
    }

    /// Scroll rows within the scroll region down by `lines`; freed rows at
    /// the region top are cleared.
    pub fn scroll_region_down(&mut self, lines: usize) {
        if lines == 0 {
            return;
        }
        let top = self.scroll_top;
        let bottom = self.scroll_region_bottom();
        let height = bottom - top + 1;
        let lines = lines.min(height);

        let start = self.cell_index(0, top);
        let end = self.cell_index(0, bottom) + self.cols;
        self.grid[start..end].rotate_right(lines * self.cols);
        let blank = Cell::BLANK;
        for cell in &mut self.grid[start..start + lines * self.cols] {
            *cell = blank;
        }
        self.dirty = true;
    }

    /// DECSTBM - set the scroll region. Invalid bounds reset to full screen.
    pub fn set_scroll_region(&mut self, top: usize, bottom: usize) {
        if top >= self.rows || bottom < top || bottom >= self.rows {
            tracing::debug!(
                "set_scroll_region({top}, {bottom}) invalid for {} rows, resetting",
                self.rows
            );
            self.reset_scroll_region();
            return;
        }
        self.scroll_top = top;
        self.scroll_bottom = Some(bottom);
        tracing::debug!("scroll region set to [{top},{bottom}]");
    }

    /// Return to full-screen scrolling (scrollback eviction re-enabled).
    pub fn reset_scroll_region(&mut self) {
        self.scroll_top = 0;
        self.scroll_bottom = None;
    }
}
