// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Erase-in-display / erase-in-line and IL / DL.
//!
//! ED and EL are composed from the buffer's line-clearing primitives exactly
//! as the wire protocol describes them; ED 3 additionally drops the
//! scrollback ring. IL and DL delegate to the buffer, which narrows the
//! scroll region around the cursor for the shift.

use crate::core::screen_buffer::ScreenBuffer;
use crate::core::vt_parser::VtParser;

/// ED (`CSI n J`) - erase in display.
///
/// 0 = cursor to end, 1 = start to cursor, 2 = everything, 3 = everything
/// plus scrollback.
pub(crate) fn erase_in_display(parser: &mut VtParser, buf: &mut ScreenBuffer) {
    let mode = parser.param_or(0, 0);
    let (x, y) = buf.cursor();
    match mode {
        0 => {
            buf.clear_line_range(y, x, buf.cols() - 1);
            for row in y + 1..buf.rows() {
                buf.clear_line(row);
            }
        }
        1 => {
            for row in 0..y {
                buf.clear_line(row);
            }
            buf.clear_line_range(y, 0, x);
        }
        2 => buf.clear(),
        3 => {
            buf.clear();
            buf.clear_scrollback();
        }
        other => tracing::debug!("ED with unknown selector {other}"),
    }
}

/// EL (`CSI n K`) - erase in line. 0 = cursor to end, 1 = start to cursor,
/// 2 = whole line. The cursor does not move.
pub(crate) fn erase_in_line(parser: &mut VtParser, buf: &mut ScreenBuffer) {
    let mode = parser.param_or(0, 0);
    let (x, y) = buf.cursor();
    match mode {
        0 => buf.clear_line_range(y, x, buf.cols() - 1),
        1 => buf.clear_line_range(y, 0, x),
        2 => buf.clear_line(y),
        other => tracing::debug!("EL with unknown selector {other}"),
    }
}

/// IL (`CSI n L`) - insert blank lines at the cursor row.
pub(crate) fn insert_lines(parser: &mut VtParser, buf: &mut ScreenBuffer) {
    let count = usize::from(parser.param_non_zero(0));
    buf.insert_lines_at_cursor(count);
}

/// DL (`CSI n M`) - delete lines at the cursor row.
pub(crate) fn delete_lines(parser: &mut VtParser, buf: &mut ScreenBuffer) {
    let count = usize::from(parser.param_non_zero(0));
    buf.delete_lines_at_cursor(count);
}
