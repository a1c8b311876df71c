// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Direct ESC selectors and the C0 controls the machine executes in place.

// C0 controls.

/// BEL terminates OSC strings.
pub const BEL: u8 = 0x07;
pub const BACKSPACE: u8 = 0x08;
pub const TAB: u8 = 0x09;
pub const LINE_FEED: u8 = 0x0A;
pub const CARRIAGE_RETURN: u8 = 0x0D;
pub const ESC: u8 = 0x1B;

/// C1 String Terminator; also ends OSC strings.
pub const C1_ST: u8 = 0x9C;

// ESC selector bytes.

/// ESC [ - Control Sequence Introducer.
pub const CSI_INTRODUCER: u8 = b'[';
/// ESC ] - Operating System Command.
pub const OSC_INTRODUCER: u8 = b']';
/// ESC 7 (DECSC) - save cursor, attributes, origin mode and auto-wrap.
pub const DECSC_SAVE_CURSOR: u8 = b'7';
/// ESC 8 (DECRC) - restore the DECSC snapshot.
pub const DECRC_RESTORE_CURSOR: u8 = b'8';
/// ESC D (IND) - index: down one line, scroll up at the region bottom.
pub const IND_INDEX: u8 = b'D';
/// ESC M (RI) - reverse index: up one line, scroll down at the region top.
pub const RI_REVERSE_INDEX: u8 = b'M';
/// ESC E (NEL) - next line.
pub const NEL_NEXT_LINE: u8 = b'E';
/// ESC c (RIS) - reset to initial state.
pub const RIS_RESET: u8 = b'c';
/// ESC H (HTS) - set a tab stop at the cursor column.
pub const HTS_SET_TAB: u8 = b'H';
/// ESC = (DECKPAM) - keypad application mode.
pub const DECKPAM_KEYPAD_APP: u8 = b'=';
/// ESC > (DECKPNM) - keypad numeric mode.
pub const DECKPNM_KEYPAD_NUMERIC: u8 = b'>';
/// ESC \ (ST) - string terminator, a no-op on its own.
pub const ST_STRING_TERMINATOR: u8 = b'\\';
