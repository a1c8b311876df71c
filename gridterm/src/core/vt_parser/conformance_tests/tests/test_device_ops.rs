// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Device query conformance: DA, DSR, XTWINOPS, XTVERSION, DECRQM, Kitty.

use test_case::test_case;

use crate::core::vt_parser::conformance_tests::test_fixtures_vt_parser::TestTerminal;

#[test]
fn test_primary_and_secondary_da() {
    let mut term = TestTerminal::new_80x24();
    let actions = term.process("\x1b[c");
    assert_eq!(actions.responses, vec!["\x1b[?62;1;2;4;6;9;15;18;21;22c"]);

    let actions = term.process("\x1b[>c");
    assert_eq!(actions.responses, vec!["\x1b[>41;380;0c"]);

    // CSI 0 c is also a primary DA request.
    let actions = term.process("\x1b[0c");
    assert_eq!(actions.responses, vec!["\x1b[?62;1;2;4;6;9;15;18;21;22c"]);
}

#[test]
fn test_dsr_status_and_cursor_report() {
    let mut term = TestTerminal::new_80x24();
    let actions = term.process("\x1b[5n");
    assert_eq!(actions.responses, vec!["\x1b[0n"]);

    let actions = term.process("\x1b[4;9H\x1b[6n");
    assert_eq!(actions.responses, vec!["\x1b[4;9R"]);
}

#[test]
fn test_dsr_cursor_report_is_origin_relative() {
    let mut term = TestTerminal::new_80x24();
    term.process("\x1b[5;10r\x1b[?6h\x1b[2;3H");
    let actions = term.process("\x1b[6n");
    // Cursor is at absolute row 6 but reports region-relative row 2.
    assert_eq!(actions.responses, vec!["\x1b[2;3R"]);
}

#[test_case(b"\x1b[14t".as_slice(), "\x1b[4;384;640t"; "pixel size")]
#[test_case(b"\x1b[18t".as_slice(), "\x1b[8;24;80t"; "char size")]
#[test_case(b"\x1b[19t".as_slice(), "\x1b[9;24;80t"; "screen size")]
fn test_xtwinops_size_queries(bytes: &[u8], expected: &str) {
    let mut term = TestTerminal::new_80x24();
    let actions = term.process(bytes);
    assert_eq!(actions.responses, vec![expected.to_string()]);
}

#[test]
fn test_xtwinops_title_stack_is_silent() {
    let mut term = TestTerminal::new_80x24();
    let actions = term.process("\x1b[22;0t\x1b[23;0t\x1b[1t");
    assert!(actions.responses.is_empty());
}

#[test]
fn test_xtversion() {
    let mut term = TestTerminal::new_80x24();
    let actions = term.process("\x1b[>q");
    assert_eq!(actions.responses, vec!["\x1bP>|TerminalDX12 1.0\x1b\\"]);
}

#[test]
fn test_decrqm_reports_mode_state() {
    let mut term = TestTerminal::new_80x24();
    // Bracketed paste off -> status 2.
    let actions = term.process("\x1b[?2004$p");
    assert_eq!(actions.responses, vec!["\x1b[?2004;2$y"]);

    term.process("\x1b[?2004h");
    let actions = term.process("\x1b[?2004$p");
    assert_eq!(actions.responses, vec!["\x1b[?2004;1$y"]);

    // Unknown mode -> status 0.
    let actions = term.process("\x1b[?31337$p");
    assert_eq!(actions.responses, vec!["\x1b[?31337;0$y"]);
}

#[test]
fn test_decrqm_alt_buffer_state() {
    let mut term = TestTerminal::new_80x24();
    term.process("\x1b[?1049h");
    let actions = term.process("\x1b[?1049$p");
    assert_eq!(actions.responses, vec!["\x1b[?1049;1$y"]);
}

#[test]
fn test_kitty_keyboard_query_and_push_pop() {
    let mut term = TestTerminal::new_80x24();
    let actions = term.process("\x1b[?u");
    assert_eq!(actions.responses, vec!["\x1b[?0u"]);

    // Push and pop are acknowledged silently.
    let actions = term.process("\x1b[>1u\x1b[<u");
    assert!(actions.responses.is_empty());
    assert!(term.parser.is_ground());
}

#[test]
fn test_plain_csi_u_is_cursor_restore() {
    let mut term = TestTerminal::new_80x24();
    term.process("\x1b[3;3H\x1b[s\x1b[H");
    term.process("\x1b[u");
    assert_eq!(term.cursor(), (2, 2));
}

#[test]
fn test_responses_preserve_generation_order() {
    let mut term = TestTerminal::new_80x24();
    let actions = term.process("\x1b[5n\x1b[c\x1b[6n");
    assert_eq!(
        actions.responses,
        vec![
            "\x1b[0n".to_string(),
            "\x1b[?62;1;2;4;6;9;15;18;21;22c".to_string(),
            "\x1b[1;1R".to_string(),
        ]
    );
}
