// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! DECSTBM - top/bottom scroll margins.

use crate::core::screen_buffer::ScreenBuffer;
use crate::core::vt_parser::VtParser;

/// `CSI top ; bottom r` - set the scroll region and home the cursor.
///
/// A missing/zero bottom means the last row; `CSI r` alone resets to the full
/// screen. The home position honors origin mode: region top when set,
/// absolute (0,0) otherwise.
pub(crate) fn set_margins(parser: &mut VtParser, buf: &mut ScreenBuffer) {
    let top = usize::from(parser.param_non_zero(0)) - 1;
    let bottom_param = parser.param_or(1, 0);
    let bottom = if bottom_param == 0 {
        buf.rows() - 1
    } else {
        usize::from(bottom_param) - 1
    };

    tracing::debug!("DECSTBM: region [{top},{bottom}] of {} rows", buf.rows());
    buf.set_scroll_region(top, bottom);

    if parser.modes.origin_mode {
        let home = buf.scroll_region_top();
        buf.set_cursor_pos(0, home);
    } else {
        buf.set_cursor_pos(0, 0);
    }
}
