// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! SM / RM mode handling, private (`CSI ? Ps h/l`) and ANSI (`CSI Ps h/l`).
//!
//! Mode effects fall into three groups:
//!
//! - flags on [`TerminalModes`] (DECCKM, bracketed paste, mouse modes, ...)
//! - buffer state (DECTCEM cursor visibility, DECAWM auto-wrap, the
//!   alternate-screen trio 47/1047/1049)
//! - compound transitions: DECOM homes the cursor on every change, and mode
//!   1049 performs the save-switch-clear / switch-restore dance with its own
//!   dedicated cursor slot (never shared with DECSC).
//!
//! Legacy mouse encodings 1005/1015 are accepted and ignored in favor of SGR
//! (1006); 2026 is tracked as a flag only (the renderer is frame-based);
//! 2027 is acknowledged. Unknown modes are logged and ignored.
//!
//! [`TerminalModes`]: crate::core::vt_parser::TerminalModes

use crate::core::screen_buffer::ScreenBuffer;
use crate::core::vt_parser::VtParser;
use crate::core::vt_parser::protocols::csi_codes;
use crate::core::vt_parser::state::{MouseMode, SavedCursor};

/// Handle `CSI [?] Ps ... h` (set = true) / `l` (set = false) for every
/// parameter in the sequence.
pub(crate) fn set_mode(parser: &mut VtParser, buf: &mut ScreenBuffer, set: bool) {
    let private = parser.has_private_marker(b'?');
    let modes: Vec<u16> = parser.params_slice().to_vec();
    for mode in modes {
        if private {
            set_private_mode(parser, buf, mode, set);
        } else {
            set_ansi_mode(parser, mode, set);
        }
    }
}

#[allow(clippy::too_many_lines)]
fn set_private_mode(parser: &mut VtParser, buf: &mut ScreenBuffer, mode: u16, set: bool) {
    match mode {
        csi_codes::MODE_DECCKM_APP_CURSOR => {
            parser.modes.application_cursor_keys = set;
            tracing::debug!("DECCKM: application cursor keys {set}");
        }
        csi_codes::MODE_DECOM_ORIGIN => {
            parser.modes.origin_mode = set;
            // Origin changes home the cursor: region top when entering,
            // absolute origin when leaving.
            if set {
                let top = buf.scroll_region_top();
                buf.set_cursor_pos(0, top);
            } else {
                buf.set_cursor_pos(0, 0);
            }
            tracing::debug!("DECOM: origin mode {set}");
        }
        csi_codes::MODE_DECAWM_AUTO_WRAP => {
            buf.set_auto_wrap(set);
            tracing::debug!("DECAWM: auto-wrap {set}");
        }
        csi_codes::MODE_CURSOR_BLINK => {
            parser.modes.cursor_blink = set;
        }
        csi_codes::MODE_DECTCEM_CURSOR_VISIBLE => {
            buf.set_cursor_visible(set);
            tracing::debug!("DECTCEM: cursor {}", if set { "visible" } else { "hidden" });
        }
        csi_codes::MODE_ALT_BUFFER_47 | csi_codes::MODE_ALT_BUFFER_1047 => {
            buf.use_alternate_buffer(set);
        }
        csi_codes::MODE_ALT_BUFFER_1049 => apply_mode_1049(parser, buf, set),
        csi_codes::MODE_BRACKETED_PASTE => {
            parser.modes.bracketed_paste = set;
            tracing::debug!("bracketed paste {set}");
        }
        csi_codes::MODE_MOUSE_X10 => {
            parser.modes.mouse_mode = if set { MouseMode::X10 } else { MouseMode::None };
        }
        csi_codes::MODE_MOUSE_NORMAL => {
            parser.modes.mouse_mode = if set { MouseMode::Normal } else { MouseMode::None };
        }
        csi_codes::MODE_MOUSE_ALL => {
            parser.modes.mouse_mode = if set { MouseMode::All } else { MouseMode::None };
        }
        csi_codes::MODE_MOUSE_SGR => {
            parser.modes.sgr_mouse = set;
        }
        csi_codes::MODE_FOCUS_REPORTING => {
            parser.modes.focus_reporting = set;
        }
        csi_codes::MODE_MOUSE_UTF8 | csi_codes::MODE_MOUSE_URXVT => {
            // Legacy encodings; accepted but SGR (1006) is the one we honor.
            tracing::debug!("legacy mouse encoding mode {mode} {set} (ignored)");
        }
        csi_codes::MODE_SYNCHRONIZED_OUTPUT => {
            // Flag only - the renderer is already frame-based.
            parser.modes.synchronized_output = set;
        }
        csi_codes::MODE_GRAPHEME_CLUSTERING => {
            tracing::debug!("grapheme cluster mode {set} (acknowledged)");
        }
        _ => {
            tracing::debug!("unknown private mode {mode} ({})", if set { 'h' } else { 'l' });
        }
    }
}

fn set_ansi_mode(parser: &mut VtParser, mode: u16, set: bool) {
    match mode {
        csi_codes::MODE_IRM_INSERT => {
            parser.modes.insert_mode = set;
            tracing::debug!("IRM: insert mode {set}");
        }
        csi_codes::MODE_LNM_LINE_FEED => {
            parser.modes.line_feed_new_line = set;
            tracing::debug!("LNM: line feed/new line {set}");
        }
        _ => {
            tracing::debug!("unknown ANSI mode {mode} ({})", if set { 'h' } else { 'l' });
        }
    }
}

/// Mode 1049: alternate screen with an independent cursor save slot.
fn apply_mode_1049(parser: &mut VtParser, buf: &mut ScreenBuffer, set: bool) {
    if set {
        // Save to the dedicated 1049 slot - NOT the DECSC slot, so an
        // application using both cannot corrupt either.
        let (x, y) = buf.cursor();
        parser.saved_cursor_1049 = Some(SavedCursor {
            x,
            y,
            attr: buf.current_attr(),
            origin_mode: parser.modes.origin_mode,
            auto_wrap: buf.auto_wrap(),
        });
        buf.use_alternate_buffer(true);
        buf.clear();
        buf.set_cursor_pos(0, 0);
        buf.reset_scroll_region();
        parser.modes.origin_mode = false;
        tracing::debug!("mode 1049: entered alt buffer, cursor saved at ({x},{y})");
    } else {
        buf.use_alternate_buffer(false);
        if let Some(saved) = parser.saved_cursor_1049 {
            buf.set_cursor_pos(saved.x, saved.y);
            buf.set_current_attr(saved.attr);
            buf.set_auto_wrap(saved.auto_wrap);
            parser.modes.origin_mode = saved.origin_mode;
            tracing::debug!(
                "mode 1049: left alt buffer, cursor restored to ({},{})",
                saved.x,
                saved.y
            );
        } else {
            tracing::debug!("mode 1049: left alt buffer, nothing saved");
        }
    }
}
