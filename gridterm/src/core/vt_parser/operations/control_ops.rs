// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! C0 control execution.
//!
//! Controls execute wherever they appear - in Ground or in the middle of a
//! CSI sequence - and are routed through the buffer's `write_char` so the
//! cursor rules live in one place. Only CR/LF/TAB/BS are meaningful; other
//! C0 bytes are dropped.

use crate::core::screen_buffer::ScreenBuffer;
use crate::core::vt_parser::VtParser;
use crate::core::vt_parser::protocols::esc_codes;

/// Execute a C0 control byte in place.
pub(crate) fn execute_control(parser: &mut VtParser, buf: &mut ScreenBuffer, byte: u8) {
    match byte {
        esc_codes::LINE_FEED => {
            buf.write_char('\n');
            // LNM: line feed implies carriage return.
            if parser.modes.line_feed_new_line {
                buf.carriage_return();
            }
        }
        esc_codes::CARRIAGE_RETURN => buf.write_char('\r'),
        esc_codes::TAB => buf.write_char('\t'),
        esc_codes::BACKSPACE => buf.write_char('\u{8}'),
        _ => {
            tracing::trace!("dropping unhandled C0 byte {byte:#04x}");
        }
    }
}

/// ESC E (NEL) - next line.
pub(crate) fn next_line(parser: &mut VtParser, buf: &mut ScreenBuffer) {
    execute_control(parser, buf, esc_codes::LINE_FEED);
}
