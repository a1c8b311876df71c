// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! ED / EL / IL / DL conformance.

use pretty_assertions::assert_eq;

use crate::core::vt_parser::conformance_tests::test_fixtures_vt_parser::TestTerminal;

/// 5x4 grid with rows "aaaa", "bbbb", "cccc", "dddd" (one spare column so
/// the eager wrap never fires while filling).
fn filled_terminal() -> TestTerminal {
    let mut term = TestTerminal::new(5, 4);
    term.process("aaaa\r\nbbbb\r\ncccc\r\ndddd\x1b[1;1H");
    term
}

#[test]
fn test_el_variants() {
    let mut term = filled_terminal();
    term.process("\x1b[2;3H\x1b[K"); // cursor to (2,1), erase to end
    assert_eq!(term.row_string(1), "bb   ");

    term.process("\x1b[3;3H\x1b[1K"); // erase start..=cursor
    assert_eq!(term.row_string(2), "   c ");

    term.process("\x1b[4;2H\x1b[2K"); // whole line
    assert_eq!(term.row_string(3), "     ");

    // EL never moves the cursor.
    assert_eq!(term.cursor(), (1, 3));
}

#[test]
fn test_ed_cursor_to_end() {
    let mut term = filled_terminal();
    term.process("\x1b[2;3H\x1b[J");
    assert_eq!(term.row_trimmed(0), "aaaa");
    assert_eq!(term.row_trimmed(1), "bb");
    assert_eq!(term.row_trimmed(2), "");
    assert_eq!(term.row_trimmed(3), "");
}

#[test]
fn test_ed_start_to_cursor() {
    let mut term = filled_terminal();
    term.process("\x1b[3;2H\x1b[1J");
    assert_eq!(term.row_trimmed(0), "");
    assert_eq!(term.row_trimmed(1), "");
    assert_eq!(term.row_string(2), "  cc ");
    assert_eq!(term.row_trimmed(3), "dddd");
}

#[test]
fn test_ed_all_homes_cursor() {
    let mut term = filled_terminal();
    term.process("\x1b[3;3H\x1b[2J");
    for y in 0..4 {
        assert_eq!(term.row_trimmed(y), "");
    }
    assert_eq!(term.cursor(), (0, 0));
}

#[test]
fn test_ed_3_also_clears_scrollback() {
    let mut term = TestTerminal::new(8, 2);
    term.process("one\r\ntwo\r\nthree\r\nfour\r\n");
    assert!(term.buf.scrollback_used() > 0);
    term.process("\x1b[3J");
    assert_eq!(term.buf.scrollback_used(), 0);

    // Plain ED 2 keeps scrollback.
    term.process("five\r\nsix\r\nseven\r\n");
    let used = term.buf.scrollback_used();
    assert!(used > 0);
    term.process("\x1b[2J");
    assert_eq!(term.buf.scrollback_used(), used);
}

#[test]
fn test_il_inserts_at_cursor_row() {
    let mut term = filled_terminal();
    term.process("\x1b[2;1H\x1b[L");
    assert_eq!(term.row_trimmed(0), "aaaa");
    assert_eq!(term.row_trimmed(1), "");
    assert_eq!(term.row_trimmed(2), "bbbb");
    assert_eq!(term.row_trimmed(3), "cccc");
}

#[test]
fn test_dl_deletes_at_cursor_row() {
    let mut term = filled_terminal();
    term.process("\x1b[2;1H\x1b[2M");
    assert_eq!(term.row_trimmed(0), "aaaa");
    assert_eq!(term.row_trimmed(1), "dddd");
    assert_eq!(term.row_trimmed(2), "");
    assert_eq!(term.row_trimmed(3), "");
}

#[test]
fn test_il_dl_confined_to_scroll_region() {
    let mut term = filled_terminal();
    // Region rows 2..=3 (1-based).
    term.process("\x1b[2;3r");
    // Cursor inside the region; insert pushes the region bottom row out but
    // leaves row 4 (outside) alone.
    term.process("\x1b[2;1H\x1b[L");
    assert_eq!(term.row_trimmed(0), "aaaa");
    assert_eq!(term.row_trimmed(1), "");
    assert_eq!(term.row_trimmed(2), "bbbb");
    assert_eq!(term.row_trimmed(3), "dddd", "row outside region untouched");

    // Cursor outside the region: IL is a no-op.
    term.process("\x1b[4;1H\x1b[L");
    assert_eq!(term.row_trimmed(3), "dddd");
}
