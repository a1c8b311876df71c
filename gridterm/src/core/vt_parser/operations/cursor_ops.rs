// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Cursor movement and the three saved-cursor slots.
//!
//! Origin mode (DECOM) changes the meaning of every vertical movement:
//! absolute rows become region-relative and movement clamps to the scroll
//! region instead of the screen. The helpers here centralize those bounds.
//!
//! The save/restore story is deliberately three separate slots that never
//! alias:
//!
//! | Slot | Saves | Sequences |
//! |------|-------|-----------|
//! | DECSC | position + attributes + origin + auto-wrap | `ESC 7` / `ESC 8` |
//! | CSI | position only | `CSI s` / `CSI u` |
//! | 1049 | position + attributes + origin + auto-wrap | mode 1049 set/reset |

use crate::core::screen_buffer::ScreenBuffer;
use crate::core::vt_parser::VtParser;
use crate::core::vt_parser::state::SavedCursor;

/// Lowest row the cursor may reach going up (origin-mode aware).
fn vertical_min(parser: &VtParser, buf: &ScreenBuffer) -> usize {
    if parser.modes.origin_mode {
        buf.scroll_region_top()
    } else {
        0
    }
}

/// Highest row the cursor may reach going down (origin-mode aware).
fn vertical_max(parser: &VtParser, buf: &ScreenBuffer) -> usize {
    if parser.modes.origin_mode {
        buf.scroll_region_bottom()
    } else {
        buf.rows() - 1
    }
}

/// CUU - cursor up n, stopping at the origin-mode top.
pub(crate) fn cursor_up(parser: &mut VtParser, buf: &mut ScreenBuffer) {
    let count = usize::from(parser.param_non_zero(0));
    let (x, y) = buf.cursor();
    let min_y = vertical_min(parser, buf);
    buf.set_cursor_pos(x, y.saturating_sub(count).max(min_y));
}

/// CUD - cursor down n, stopping at the origin-mode bottom.
pub(crate) fn cursor_down(parser: &mut VtParser, buf: &mut ScreenBuffer) {
    let count = usize::from(parser.param_non_zero(0));
    let (x, y) = buf.cursor();
    let max_y = vertical_max(parser, buf);
    buf.set_cursor_pos(x, (y + count).min(max_y));
}

/// CUF - cursor forward n, clamped to the last column.
pub(crate) fn cursor_forward(parser: &mut VtParser, buf: &mut ScreenBuffer) {
    let count = usize::from(parser.param_non_zero(0));
    let (x, y) = buf.cursor();
    buf.set_cursor_pos((x + count).min(buf.cols() - 1), y);
}

/// CUB - cursor backward n, clamped to column 0.
pub(crate) fn cursor_backward(parser: &mut VtParser, buf: &mut ScreenBuffer) {
    let count = usize::from(parser.param_non_zero(0));
    let (x, y) = buf.cursor();
    buf.set_cursor_pos(x.saturating_sub(count), y);
}

/// CNL - start of line, n rows down.
pub(crate) fn cursor_next_line(parser: &mut VtParser, buf: &mut ScreenBuffer) {
    let count = usize::from(parser.param_non_zero(0));
    let (_, y) = buf.cursor();
    let max_y = vertical_max(parser, buf);
    buf.set_cursor_pos(0, (y + count).min(max_y));
}

/// CPL - start of line, n rows up.
pub(crate) fn cursor_prev_line(parser: &mut VtParser, buf: &mut ScreenBuffer) {
    let count = usize::from(parser.param_non_zero(0));
    let (_, y) = buf.cursor();
    let min_y = vertical_min(parser, buf);
    buf.set_cursor_pos(0, y.saturating_sub(count).max(min_y));
}

/// CHA - column absolute (1-indexed on the wire).
pub(crate) fn cursor_column(parser: &mut VtParser, buf: &mut ScreenBuffer) {
    let col = usize::from(parser.param_non_zero(0)) - 1;
    let (_, y) = buf.cursor();
    buf.set_cursor_pos(col, y);
}

/// VPA - row absolute; region-relative and region-clamped in origin mode.
pub(crate) fn cursor_row(parser: &mut VtParser, buf: &mut ScreenBuffer) {
    let mut row = usize::from(parser.param_non_zero(0)) - 1;
    if parser.modes.origin_mode {
        let top = buf.scroll_region_top();
        let bottom = buf.scroll_region_bottom();
        row = (row + top).clamp(top, bottom);
    }
    let (x, _) = buf.cursor();
    buf.set_cursor_pos(x, row);
}

/// CUP / HVP - absolute position; row is region-relative in origin mode.
pub(crate) fn cursor_position(parser: &mut VtParser, buf: &mut ScreenBuffer) {
    let mut row = usize::from(parser.param_non_zero(0)) - 1;
    let col = usize::from(parser.param_non_zero(1)) - 1;
    if parser.modes.origin_mode {
        let top = buf.scroll_region_top();
        let bottom = buf.scroll_region_bottom();
        row = (row + top).clamp(top, bottom);
    }
    buf.set_cursor_pos(col, row);
}

/// ESC 7 (DECSC) - snapshot position, attributes, origin mode, auto-wrap.
pub(crate) fn save_cursor_decsc(parser: &mut VtParser, buf: &ScreenBuffer) {
    let (x, y) = buf.cursor();
    parser.saved_cursor = Some(SavedCursor {
        x,
        y,
        attr: buf.current_attr(),
        origin_mode: parser.modes.origin_mode,
        auto_wrap: buf.auto_wrap(),
    });
}

/// ESC 8 (DECRC) - restore the DECSC snapshot; no-op when none exists.
pub(crate) fn restore_cursor_decsc(parser: &mut VtParser, buf: &mut ScreenBuffer) {
    if let Some(saved) = parser.saved_cursor {
        buf.set_cursor_pos(saved.x, saved.y);
        buf.set_current_attr(saved.attr);
        buf.set_auto_wrap(saved.auto_wrap);
        parser.modes.origin_mode = saved.origin_mode;
    }
}

/// CSI s (SCP) - save position only, in the slot CSI u restores.
pub(crate) fn save_cursor_csi(parser: &mut VtParser, buf: &ScreenBuffer) {
    parser.saved_cursor_csi = Some(buf.cursor());
}

/// CSI u (RCP) - restore the CSI s position; no-op when none exists.
pub(crate) fn restore_cursor_csi(parser: &mut VtParser, buf: &mut ScreenBuffer) {
    if let Some((x, y)) = parser.saved_cursor_csi {
        buf.set_cursor_pos(x, y);
    }
}
