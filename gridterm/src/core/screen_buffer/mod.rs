// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Screen buffer: the terminal's cell grid plus everything that scrolls,
//! saves, or annotates it.
//!
//! # Architecture Overview
//!
//! ```text
//! ╭──────────────────╮   write_char / scroll / clear   ╭───────────────────╮
//! │ VT State Machine │────────────────────────────────▶│ ScreenBuffer      │
//! ╰──────────────────╯                                 │  primary grid     │
//!                                                      │  alternate grid   │
//!          front-end reads cells / cursor / dirty ◀────│  scrollback ring  │
//!                                                      │  tab stops        │
//!                                                      │  palette + links  │
//!                                                      │  prompt markers   │
//!                                                      ╰───────────────────╯
//! ```
//!
//! Two grids exist: the primary (with scrollback) and the alternate
//! (full-screen apps, no scrollback). `using_alt` says which one is active;
//! the inactive grid is parked in `alt_grid` and swapped in wholesale.
//!
//! The scroll *region* is a pair `[scroll_top, scroll_bottom]`; the bottom is
//! an `Option` where `None` means "full screen". The distinction is a
//! correctness invariant, not a convenience: full-screen scrolls feed evicted
//! rows into scrollback, explicit-region scrolls discard them.
//!
//! Mutating operation families live in [`vt_ops`] as `impl_*` files; this
//! module holds state, accessors, and the read-side view (including the
//! scrollback-aware cell lookup used while the user has scrolled up).

// Attach.
pub mod prompt_markers;
pub mod scrollback;
pub mod tab_stops;
pub mod vt_ops;

// Re-export.
pub use prompt_markers::*;
pub use scrollback::*;
pub use tab_stops::*;

use crate::core::cell::{Attributes, Cell, HyperlinkId, HyperlinkTable, Palette, Rgb};

/// Default scrollback depth when the host does not configure one.
pub const DEFAULT_SCROLLBACK_LINES: usize = 10_000;

/// Terminal screen buffer with scrollback.
///
/// Coordinates are 0-indexed; the VT protocol's 1-indexed coordinates are
/// converted by the parser before they reach this type. Invariants upheld by
/// every mutator: `cursor_x < cols`, `cursor_y < rows`, and (when explicit)
/// `scroll_top <= scroll_bottom < rows`.
#[derive(Debug)]
pub struct ScreenBuffer {
    pub(crate) cols: usize,
    pub(crate) rows: usize,

    /// Active grid, row-major `cols * rows` cells.
    pub(crate) grid: Vec<Cell>,
    /// The inactive counterpart grid (alternate when `!using_alt`, primary
    /// when `using_alt`). Allocated lazily on first alt-buffer entry.
    pub(crate) alt_grid: Vec<Cell>,
    pub(crate) using_alt: bool,

    pub(crate) scrollback: ScrollbackRing,
    /// Scrollback view offset: 0 = live, k = viewing k lines back.
    pub(crate) scroll_offset: usize,

    pub(crate) cursor_x: usize,
    pub(crate) cursor_y: usize,
    pub(crate) cursor_visible: bool,
    pub(crate) current_attr: Attributes,

    /// DECAWM. Consulted by `write_char` when the cursor passes the last
    /// column: wrap when set, stick at the last column when clear.
    pub(crate) auto_wrap: bool,

    pub(crate) scroll_top: usize,
    /// `None` = no explicit region (full screen, scrollback eviction on).
    pub(crate) scroll_bottom: Option<usize>,

    pub(crate) tab_stops: TabStops,
    pub(crate) palette: Palette,
    pub(crate) hyperlinks: HyperlinkTable,
    pub(crate) current_hyperlink: Option<HyperlinkId>,
    pub(crate) prompt_markers: PromptMarkers,

    pub(crate) dirty: bool,
}

static BLANK_CELL: Cell = Cell::BLANK;

impl ScreenBuffer {
    /// Create a buffer of `cols x rows` with the given scrollback capacity.
    /// Dimensions are clamped to at least 1x1.
    #[must_use]
    pub fn new(cols: usize, rows: usize, scrollback_lines: usize) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        tracing::info!(
            "ScreenBuffer created: {}x{} with {} scrollback lines",
            cols,
            rows,
            scrollback_lines
        );
        Self {
            cols,
            rows,
            grid: vec![Cell::BLANK; cols * rows],
            alt_grid: Vec::new(),
            using_alt: false,
            scrollback: ScrollbackRing::new(scrollback_lines),
            scroll_offset: 0,
            cursor_x: 0,
            cursor_y: 0,
            cursor_visible: true,
            current_attr: Attributes::default(),
            auto_wrap: true,
            scroll_top: 0,
            scroll_bottom: None,
            tab_stops: TabStops::new(cols),
            palette: Palette::new(),
            hyperlinks: HyperlinkTable::new(),
            current_hyperlink: None,
            prompt_markers: PromptMarkers::new(),
            dirty: true,
        }
    }

    // ========================================================================
    // Dimensions & cursor
    // ========================================================================

    #[must_use]
    pub fn cols(&self) -> usize { self.cols }

    #[must_use]
    pub fn rows(&self) -> usize { self.rows }

    #[must_use]
    pub fn cursor(&self) -> (usize, usize) { (self.cursor_x, self.cursor_y) }

    #[must_use]
    pub fn cursor_x(&self) -> usize { self.cursor_x }

    #[must_use]
    pub fn cursor_y(&self) -> usize { self.cursor_y }

    /// Move the cursor, clamping into `[0,cols) x [0,rows)`.
    pub fn set_cursor_pos(&mut self, x: usize, y: usize) {
        self.cursor_x = x.min(self.cols - 1);
        self.cursor_y = y.min(self.rows - 1);
        self.dirty = true;
    }

    pub(crate) fn clamp_cursor(&mut self) {
        self.cursor_x = self.cursor_x.min(self.cols - 1);
        self.cursor_y = self.cursor_y.min(self.rows - 1);
    }

    #[must_use]
    pub fn is_cursor_visible(&self) -> bool { self.cursor_visible }

    pub fn set_cursor_visible(&mut self, visible: bool) {
        self.cursor_visible = visible;
        self.dirty = true;
    }

    // ========================================================================
    // Attributes & modes the buffer owns
    // ========================================================================

    #[must_use]
    pub fn current_attr(&self) -> Attributes { self.current_attr }

    pub fn set_current_attr(&mut self, attr: Attributes) { self.current_attr = attr; }

    #[must_use]
    pub fn auto_wrap(&self) -> bool { self.auto_wrap }

    pub fn set_auto_wrap(&mut self, enabled: bool) { self.auto_wrap = enabled; }

    // ========================================================================
    // Dirty tracking
    // ========================================================================

    #[must_use]
    pub fn is_dirty(&self) -> bool { self.dirty }

    pub fn clear_dirty(&mut self) { self.dirty = false; }

    pub fn mark_dirty(&mut self) { self.dirty = true; }

    // ========================================================================
    // Cell access
    // ========================================================================

    #[inline]
    pub(crate) fn cell_index(&self, x: usize, y: usize) -> usize { y * self.cols + x }

    /// Cell at (x, y) in the live grid; the blank sentinel when out of range.
    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> &Cell {
        if x >= self.cols || y >= self.rows {
            return &BLANK_CELL;
        }
        &self.grid[self.cell_index(x, y)]
    }

    pub(crate) fn cell_mut(&mut self, x: usize, y: usize) -> Option<&mut Cell> {
        if x >= self.cols || y >= self.rows {
            return None;
        }
        self.dirty = true;
        let idx = self.cell_index(x, y);
        Some(&mut self.grid[idx])
    }

    /// Cell at (x, y) as seen through the scrollback view offset.
    ///
    /// With offset k, visible row y maps to scrollback line
    /// `used - k + y` when that lands inside the ring; rows past the ring
    /// fall through to the live grid.
    #[must_use]
    pub fn cell_with_scrollback(&self, x: usize, y: usize) -> &Cell {
        if x >= self.cols || y >= self.rows {
            return &BLANK_CELL;
        }
        if self.scroll_offset > 0 {
            let used = self.scrollback.used() as isize;
            let line = used - self.scroll_offset as isize + y as isize;
            if line >= 0 && line < used {
                #[allow(clippy::cast_sign_loss)]
                return self.scrollback.cell(x, line as usize);
            }
        }
        &self.grid[self.cell_index(x, y)]
    }

    /// Reconstruct the text of one row as a `String`, one char per column.
    ///
    /// Negative rows address scrollback: `-1` is the newest retained line,
    /// `-used` the oldest. Out-of-range rows yield an empty string. The view
    /// offset is NOT applied; this is absolute addressing for search.
    #[must_use]
    pub fn row_text(&self, row: isize) -> String {
        if row < 0 {
            let used = self.scrollback.used() as isize;
            let line = used + row;
            if line < 0 || line >= used {
                return String::new();
            }
            #[allow(clippy::cast_sign_loss)]
            let line = line as usize;
            (0..self.cols)
                .map(|x| self.scrollback.cell(x, line).ch)
                .collect()
        } else {
            #[allow(clippy::cast_sign_loss)]
            let y = row as usize;
            if y >= self.rows {
                return String::new();
            }
            (0..self.cols).map(|x| self.cell(x, y).ch).collect()
        }
    }

    // ========================================================================
    // Scrollback view
    // ========================================================================

    #[must_use]
    pub fn scrollback_used(&self) -> usize { self.scrollback.used() }

    #[must_use]
    pub fn scroll_offset(&self) -> usize { self.scroll_offset }

    /// Set the view offset, clamped to `[0, scrollback_used]`.
    pub fn set_scroll_offset(&mut self, offset: usize) {
        self.scroll_offset = offset.min(self.scrollback.used());
        self.dirty = true;
    }

    /// Return to the live view.
    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = 0;
        self.dirty = true;
    }

    // ========================================================================
    // Scroll region
    // ========================================================================

    #[must_use]
    pub fn scroll_region_top(&self) -> usize { self.scroll_top }

    /// Bottom of the scroll region, resolving the full-screen sentinel.
    #[must_use]
    pub fn scroll_region_bottom(&self) -> usize {
        self.scroll_bottom.unwrap_or(self.rows - 1)
    }

    /// Whether DECSTBM has established an explicit region.
    #[must_use]
    pub fn has_explicit_scroll_region(&self) -> bool { self.scroll_bottom.is_some() }

    // ========================================================================
    // Alternate buffer
    // ========================================================================

    #[must_use]
    pub fn is_using_alternate_buffer(&self) -> bool { self.using_alt }

    // ========================================================================
    // Palette
    // ========================================================================

    #[must_use]
    pub fn palette(&self) -> &Palette { &self.palette }

    #[must_use]
    pub fn palette_color(&self, index: u8) -> Rgb { self.palette.color(index) }

    /// OSC 4 set: override a palette slot and mark it modified.
    pub fn set_palette_color(&mut self, index: u8, rgb: Rgb) {
        self.palette.set_color(index, rgb);
        self.dirty = true;
    }

    /// OSC 10/11 theme retint: only touches the slot when unmodified.
    pub fn set_theme_slot(&mut self, index: u8, rgb: Rgb) {
        if !self.palette.is_modified(index) {
            self.palette.set_color_unmodified(index, rgb);
            self.dirty = true;
        }
    }

    // ========================================================================
    // Hyperlinks
    // ========================================================================

    /// Open a hyperlink scope; cells written from now on carry the id.
    pub fn add_hyperlink(&mut self, uri: &str, params_id: Option<&str>) -> HyperlinkId {
        let id = self.hyperlinks.add(uri, params_id);
        self.current_hyperlink = Some(id);
        id
    }

    /// Close the open hyperlink scope.
    pub fn clear_current_hyperlink(&mut self) { self.current_hyperlink = None; }

    #[must_use]
    pub fn current_hyperlink(&self) -> Option<HyperlinkId> { self.current_hyperlink }

    #[must_use]
    pub fn hyperlink_uri(&self, id: HyperlinkId) -> Option<&str> {
        self.hyperlinks.uri(id)
    }

    // ========================================================================
    // Tab stops
    // ========================================================================

    /// HTS - set a tab stop at the cursor column.
    pub fn set_tab_stop_at_cursor(&mut self) { self.tab_stops.set(self.cursor_x); }

    /// TBC 0 - clear the tab stop at the cursor column.
    pub fn clear_tab_stop_at_cursor(&mut self) { self.tab_stops.clear(self.cursor_x); }

    /// TBC 3 - clear every tab stop.
    pub fn clear_all_tab_stops(&mut self) { self.tab_stops.clear_all(); }

    #[must_use]
    pub fn tab_stops(&self) -> &TabStops { &self.tab_stops }

    // ========================================================================
    // Prompt markers (OSC 133)
    // ========================================================================

    /// OSC 133;A - record a prompt at the cursor's absolute line.
    pub fn mark_prompt_start(&mut self) {
        let absolute_line = self.scrollback.used() + self.cursor_y;
        tracing::debug!("OSC 133;A - prompt start at line {}", absolute_line);
        self.prompt_markers.mark_prompt_start(absolute_line);
    }

    /// OSC 133;B.
    pub fn mark_input_start(&mut self) { self.prompt_markers.mark_input_start(); }

    /// OSC 133;C.
    pub fn mark_command_start(&mut self) { self.prompt_markers.mark_command_start(); }

    /// OSC 133;D - annotate the latest prompt with the command's exit code.
    pub fn mark_command_end(&mut self, exit_code: Option<i32>) {
        tracing::debug!("OSC 133;D - command end, exit code: {:?}", exit_code);
        self.prompt_markers.mark_command_end(exit_code);
    }

    #[must_use]
    pub fn previous_prompt_line(&self, from: usize) -> Option<usize> {
        self.prompt_markers.previous_prompt_line(from)
    }

    #[must_use]
    pub fn next_prompt_line(&self, from: usize) -> Option<usize> {
        self.prompt_markers.next_prompt_line(from)
    }

    #[must_use]
    pub fn prompt_markers(&self) -> &PromptMarkers { &self.prompt_markers }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_new_buffer_state() {
        let buf = ScreenBuffer::new(80, 24, 100);
        assert_eq!(buf.cols(), 80);
        assert_eq!(buf.rows(), 24);
        assert_eq!(buf.cursor(), (0, 0));
        assert!(buf.is_cursor_visible());
        assert!(buf.is_dirty());
        assert!(!buf.has_explicit_scroll_region());
        assert_eq!(buf.scroll_region_bottom(), 23);
        assert!(buf.cell(0, 0).is_blank());
    }

    #[test]
    fn test_cursor_clamping() {
        let mut buf = ScreenBuffer::new(10, 5, 0);
        buf.set_cursor_pos(100, 100);
        assert_eq!(buf.cursor(), (9, 4));
    }

    #[test]
    fn test_out_of_range_cell_is_blank_sentinel() {
        let buf = ScreenBuffer::new(4, 2, 0);
        assert!(buf.cell(10, 10).is_blank());
        assert!(buf.cell_with_scrollback(10, 10).is_blank());
    }

    #[test]
    fn test_scroll_offset_clamped_to_used() {
        let mut buf = ScreenBuffer::new(4, 2, 10);
        buf.set_scroll_offset(5);
        assert_eq!(buf.scroll_offset(), 0); // nothing in scrollback yet

        buf.write_str("a\r\nb\r\nc\r\nd\r\n");
        let used = buf.scrollback_used();
        assert!(used > 0);
        buf.set_scroll_offset(999);
        assert_eq!(buf.scroll_offset(), used);
        buf.scroll_to_bottom();
        assert_eq!(buf.scroll_offset(), 0);
    }

    #[test]
    fn test_cell_with_scrollback_maps_into_ring() {
        let mut buf = ScreenBuffer::new(4, 2, 10);
        // Push the "ab" row (and one blank row) into scrollback.
        buf.write_str("ab\r\n\r\n\r\n");
        let used = buf.scrollback_used();
        assert!(used >= 2);

        // Scrolled all the way back, visible row 0 is the oldest ring row.
        buf.set_scroll_offset(used);
        assert_eq!(buf.cell_with_scrollback(0, 0).ch, 'a');
        assert_eq!(buf.cell_with_scrollback(1, 0).ch, 'b');

        // Live view bypasses the ring.
        buf.scroll_to_bottom();
        assert!(buf.cell_with_scrollback(0, 0).is_blank());
    }

    #[test]
    fn test_row_text_negative_rows() {
        let mut buf = ScreenBuffer::new(4, 2, 10);
        buf.write_str("ab\r\ncd\r\nef\r\n");
        // Oldest scrollback row should start with 'a'.
        let used = buf.scrollback_used() as isize;
        assert!(buf.row_text(-used).starts_with("ab"));
        assert_eq!(buf.row_text(-(used + 1)), "");
    }

    #[test]
    fn test_prompt_marker_absolute_lines() {
        let mut buf = ScreenBuffer::new(10, 2, 10);
        buf.mark_prompt_start();
        buf.write_str("one\r\ntwo\r\nthree\r\n");
        buf.mark_prompt_start();
        let markers = buf.prompt_markers().markers();
        assert_eq!(markers[0].absolute_line, 0);
        assert_eq!(
            markers[1].absolute_line,
            buf.scrollback_used() + buf.cursor_y()
        );
    }
}
