// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Printable output and character editing (ICH / DCH / ECH / REP).
//!
//! See [`ScreenBuffer::write_char`] and the `impl_char_ops` buffer file for
//! the semantics these shims delegate to.
//!
//! [`ScreenBuffer::write_char`]: crate::ScreenBuffer::write_char

use crate::core::screen_buffer::ScreenBuffer;
use crate::core::vt_parser::VtParser;

/// Print one decoded codepoint at the cursor.
///
/// In IRM insert mode a blank is inserted first so the print shifts instead
/// of overwriting. The printed char is remembered for REP.
pub(crate) fn print_char(parser: &mut VtParser, buf: &mut ScreenBuffer, ch: char) {
    if parser.modes.insert_mode && !ch.is_control() {
        let result = buf.insert_chars_at_cursor(1);
        debug_assert!(result.is_ok(), "IRM insert failed at {:?}", buf.cursor());
    }
    buf.write_char(ch);
    if !ch.is_control() {
        parser.last_printed = Some(ch);
    }
}

/// REP (`CSI n b`) - repeat the preceding printable character n times.
pub(crate) fn repeat_preceding(parser: &mut VtParser, buf: &mut ScreenBuffer) {
    let Some(ch) = parser.last_printed else {
        tracing::debug!("REP with no preceding printable character");
        return;
    };
    let count = parser.param_non_zero(0);
    for _ in 0..count {
        print_char(parser, buf, ch);
    }
}

/// ICH (`CSI n @`) - insert n blanks at the cursor, shifting right.
pub(crate) fn insert_chars(parser: &mut VtParser, buf: &mut ScreenBuffer) {
    let count = usize::from(parser.param_non_zero(0));
    let result = buf.insert_chars_at_cursor(count);
    debug_assert!(
        result.is_ok(),
        "failed to insert {count} chars at {:?}",
        buf.cursor()
    );
}

/// DCH (`CSI n P`) - delete n characters at the cursor, shifting left.
pub(crate) fn delete_chars(parser: &mut VtParser, buf: &mut ScreenBuffer) {
    let count = usize::from(parser.param_non_zero(0));
    let result = buf.delete_chars_at_cursor(count);
    debug_assert!(
        result.is_ok(),
        "failed to delete {count} chars at {:?}",
        buf.cursor()
    );
}

/// ECH (`CSI n X`) - erase n characters in place.
pub(crate) fn erase_chars(parser: &mut VtParser, buf: &mut ScreenBuffer) {
    let count = usize::from(parser.param_non_zero(0));
    let result = buf.erase_chars_at_cursor(count);
    debug_assert!(
        result.is_ok(),
        "failed to erase {count} chars at {:?}",
        buf.cursor()
    );
}
