// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Scrolling: SU/SD and the index pair (ESC D / ESC M).
//!
//! All four operate on the scroll region. With no explicit region set the
//! region spans the full screen, but a region scroll still never evicts into
//! scrollback - only the buffer's own line-feed path does that.

use crate::core::screen_buffer::ScreenBuffer;
use crate::core::vt_parser::VtParser;

/// SU (`CSI n S`) - scroll the region contents up n lines.
pub(crate) fn scroll_up(parser: &mut VtParser, buf: &mut ScreenBuffer) {
    let count = usize::from(parser.param_non_zero(0));
    buf.scroll_region_up(count);
}

/// SD (`CSI n T`) - scroll the region contents down n lines.
pub(crate) fn scroll_down(parser: &mut VtParser, buf: &mut ScreenBuffer) {
    let count = usize::from(parser.param_non_zero(0));
    buf.scroll_region_down(count);
}

/// ESC D (IND) - cursor down one line; scrolls when exactly at the region
/// bottom.
pub(crate) fn index(buf: &mut ScreenBuffer) {
    let (x, y) = buf.cursor();
    if y == buf.scroll_region_bottom() {
        buf.scroll_region_up(1);
    } else {
        buf.set_cursor_pos(x, y + 1);
    }
}

/// ESC M (RI) - cursor up one line; scrolls when exactly at the region top.
pub(crate) fn reverse_index(buf: &mut ScreenBuffer) {
    let (x, y) = buf.cursor();
    if y == buf.scroll_region_top() {
        buf.scroll_region_down(1);
    } else {
        buf.set_cursor_pos(x, y.saturating_sub(1));
    }
}
