// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Terminal-level operations: RIS, tab clear, cursor style.

use crate::core::screen_buffer::ScreenBuffer;
use crate::core::vt_parser::VtParser;
use crate::core::vt_parser::state::{CursorStyle, TerminalModes};

/// ESC c (RIS) - reset to initial state: both grids, scrollback, attributes,
/// tab stops, palette, and the parser's mode flags and save slots. Host
/// wiring (clipboard, OSC 52 policy, theme overrides) survives.
pub(crate) fn hard_reset(parser: &mut VtParser, buf: &mut ScreenBuffer) {
    tracing::debug!("RIS: full terminal reset");
    buf.reset();
    parser.modes = TerminalModes::default();
    parser.saved_cursor = None;
    parser.saved_cursor_csi = None;
    parser.saved_cursor_1049 = None;
    parser.last_printed = None;
}

/// TBC (`CSI n g`) - 0 clears the stop at the cursor, 3 clears all.
pub(crate) fn tab_clear(parser: &mut VtParser, buf: &mut ScreenBuffer) {
    match parser.param_or(0, 0) {
        0 => buf.clear_tab_stop_at_cursor(),
        3 => buf.clear_all_tab_stops(),
        other => tracing::debug!("TBC {other}: unhandled selector"),
    }
}

/// DECSCUSR (`CSI n SP q`) - cursor style. 0/1 blinking block, 2 steady
/// block, 3/4 underline, 5/6 bar; out-of-range selects the default.
pub(crate) fn set_cursor_style(parser: &mut VtParser) {
    let (style, blink) = match parser.param_or(0, 0) {
        0 | 1 => (CursorStyle::BlinkingBlock, true),
        2 => (CursorStyle::SteadyBlock, false),
        3 => (CursorStyle::BlinkingUnderline, true),
        4 => (CursorStyle::SteadyUnderline, false),
        5 => (CursorStyle::BlinkingBar, true),
        6 => (CursorStyle::SteadyBar, false),
        _ => (CursorStyle::BlinkingBlock, true),
    };
    parser.modes.cursor_style = style;
    parser.modes.cursor_blink = blink;
    tracing::debug!("DECSCUSR: cursor style {style} blink={blink}");
}
