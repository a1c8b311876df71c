// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Device queries: DA, DSR, XTWINOPS, XTVERSION, DECRQM, Kitty keyboard.
//!
//! Every handler here answers a question by queueing a [`DeviceResponse`] on
//! the actions value; nothing touches the grid. See
//! [`protocols::dsr_codes`](crate::core::vt_parser::protocols::dsr_codes)
//! for the wire formats.

use crate::core::screen_buffer::ScreenBuffer;
use crate::core::vt_parser::VtParser;
use crate::core::vt_parser::actions::VtActions;
use crate::core::vt_parser::protocols::csi_codes;
use crate::core::vt_parser::protocols::dsr_codes::{DeviceResponse, ModeStatus};
use crate::core::vt_parser::state::MouseMode;

/// DA (`CSI c` / `CSI > c`) - identify the terminal.
pub(crate) fn device_attributes(parser: &VtParser, actions: &mut VtActions) {
    if parser.has_private_marker(b'>') {
        actions.respond(DeviceResponse::SecondaryAttributes);
    } else {
        actions.respond(DeviceResponse::PrimaryAttributes);
    }
}

/// DSR (`CSI 5 n` / `CSI 6 n`) - status / cursor position report.
///
/// The cursor report is 1-based and, under origin mode, relative to the
/// scroll region top.
pub(crate) fn status_report(parser: &VtParser, buf: &ScreenBuffer, actions: &mut VtActions) {
    match parser.param_or(0, 0) {
        5 => actions.respond(DeviceResponse::StatusOk),
        6 => {
            let (x, mut y) = buf.cursor();
            if parser.modes.origin_mode {
                y = y.saturating_sub(buf.scroll_region_top());
            }
            actions.respond(DeviceResponse::CursorPosition {
                row: y + 1,
                col: x + 1,
            });
        }
        other => tracing::debug!("DSR {other}: unsupported status request"),
    }
}

/// XTWINOPS (`CSI Ps t`) - only the size queries 14/18/19 are answered;
/// title push/pop (22/23) is acknowledged and ignored; actual window
/// manipulation is out of scope for the model.
pub(crate) fn window_ops(parser: &VtParser, buf: &ScreenBuffer, actions: &mut VtActions) {
    let op = parser.param_or(0, 0);
    let (rows, cols) = (buf.rows(), buf.cols());
    match op {
        14 => actions.respond(DeviceResponse::TextAreaPixels { rows, cols }),
        18 => actions.respond(DeviceResponse::TextAreaChars { rows, cols }),
        19 => actions.respond(DeviceResponse::ScreenChars { rows, cols }),
        22 | 23 => tracing::debug!("XTWINOPS {op}: title stack ignored"),
        other => tracing::debug!("XTWINOPS {other}: unhandled operation"),
    }
}

/// XTVERSION (`CSI > q`) - terminal name and version.
pub(crate) fn terminal_version(actions: &mut VtActions) {
    actions.respond(DeviceResponse::TerminalVersion);
}

/// DECRQM (`CSI ? Ps $ p`) - report whether a private mode is set, reset, or
/// unknown to this terminal.
pub(crate) fn report_mode(parser: &VtParser, buf: &ScreenBuffer, actions: &mut VtActions) {
    let mode = parser.param_or(0, 0);
    let modes = &parser.modes;
    let status = match mode {
        csi_codes::MODE_DECCKM_APP_CURSOR => {
            ModeStatus::from_flag(modes.application_cursor_keys)
        }
        csi_codes::MODE_DECOM_ORIGIN => ModeStatus::from_flag(modes.origin_mode),
        csi_codes::MODE_DECAWM_AUTO_WRAP => ModeStatus::from_flag(buf.auto_wrap()),
        csi_codes::MODE_CURSOR_BLINK => ModeStatus::from_flag(modes.cursor_blink),
        csi_codes::MODE_DECTCEM_CURSOR_VISIBLE => {
            ModeStatus::from_flag(buf.is_cursor_visible())
        }
        csi_codes::MODE_ALT_BUFFER_47
        | csi_codes::MODE_ALT_BUFFER_1047
        | csi_codes::MODE_ALT_BUFFER_1049 => {
            ModeStatus::from_flag(buf.is_using_alternate_buffer())
        }
        csi_codes::MODE_MOUSE_X10 => {
            ModeStatus::from_flag(modes.mouse_mode == MouseMode::X10)
        }
        csi_codes::MODE_MOUSE_NORMAL => {
            ModeStatus::from_flag(modes.mouse_mode == MouseMode::Normal)
        }
        csi_codes::MODE_MOUSE_ALL => {
            ModeStatus::from_flag(modes.mouse_mode == MouseMode::All)
        }
        csi_codes::MODE_FOCUS_REPORTING => ModeStatus::from_flag(modes.focus_reporting),
        csi_codes::MODE_MOUSE_SGR => ModeStatus::from_flag(modes.sgr_mouse),
        csi_codes::MODE_BRACKETED_PASTE => ModeStatus::from_flag(modes.bracketed_paste),
        csi_codes::MODE_SYNCHRONIZED_OUTPUT => {
            ModeStatus::from_flag(modes.synchronized_output)
        }
        _ => ModeStatus::NotRecognized,
    };
    tracing::debug!("DECRQM: mode {mode} -> {:?}", status);
    actions.respond(DeviceResponse::ModeReport { mode, status });
}

/// Kitty keyboard protocol (`CSI > u` push, `CSI < u` pop, `CSI ? u` query).
///
/// The enhanced protocol is not implemented; push/pop are acknowledged
/// silently and the query reports no flags so applications fall back to
/// legacy encoding.
pub(crate) fn kitty_keyboard(parser: &VtParser, actions: &mut VtActions) {
    if parser.has_private_marker(b'>') {
        tracing::debug!("kitty keyboard: push flags={}", parser.param_or(0, 0));
    } else if parser.has_private_marker(b'<') {
        tracing::debug!("kitty keyboard: pop");
    } else if parser.has_private_marker(b'?') {
        actions.respond(DeviceResponse::KittyKeyboardFlags);
    }
}
