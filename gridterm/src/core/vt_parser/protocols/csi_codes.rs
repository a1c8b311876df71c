// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! CSI final bytes and SGR parameter values.
//!
//! A CSI sequence is `ESC [ params intermediate? final`. The final byte in
//! `0x40..=0x7E` selects the operation; these constants name every final the
//! dispatcher routes. SGR (`m`) parameters get their own table since the SGR
//! handler walks them as a little language of its own (`38;5;N`, `38;2;R;G;B`).

// Cursor movement.

/// CUU - cursor up.
pub const CUU_CURSOR_UP: u8 = b'A';
/// CUD - cursor down.
pub const CUD_CURSOR_DOWN: u8 = b'B';
/// CUF - cursor forward.
pub const CUF_CURSOR_FORWARD: u8 = b'C';
/// CUB - cursor backward.
pub const CUB_CURSOR_BACKWARD: u8 = b'D';
/// CNL - cursor to start of line, n down.
pub const CNL_CURSOR_NEXT_LINE: u8 = b'E';
/// CPL - cursor to start of line, n up.
pub const CPL_CURSOR_PREV_LINE: u8 = b'F';
/// CHA - cursor column absolute.
pub const CHA_CURSOR_COLUMN: u8 = b'G';
/// VPA - cursor row absolute.
pub const VPA_CURSOR_ROW: u8 = b'd';
/// CUP - cursor position.
pub const CUP_CURSOR_POSITION: u8 = b'H';
/// HVP - cursor position (legacy alias of CUP).
pub const HVP_CURSOR_POSITION: u8 = b'f';

// Erasure.

/// ED - erase in display.
pub const ED_ERASE_DISPLAY: u8 = b'J';
/// EL - erase in line.
pub const EL_ERASE_LINE: u8 = b'K';
/// ECH - erase characters in place.
pub const ECH_ERASE_CHAR: u8 = b'X';

// Character editing.

/// DCH - delete characters, shifting the rest left.
pub const DCH_DELETE_CHAR: u8 = b'P';
/// ICH - insert blank characters, shifting the rest right.
pub const ICH_INSERT_CHAR: u8 = b'@';
/// REP - repeat the preceding printable character.
pub const REP_REPEAT_CHAR: u8 = b'b';

// Line editing.

/// IL - insert blank lines at the cursor.
pub const IL_INSERT_LINE: u8 = b'L';
/// DL - delete lines at the cursor.
pub const DL_DELETE_LINE: u8 = b'M';

// Scrolling.

/// SU - scroll up within the region.
pub const SU_SCROLL_UP: u8 = b'S';
/// SD - scroll down within the region.
pub const SD_SCROLL_DOWN: u8 = b'T';

// State & modes.

/// SGR - select graphic rendition.
pub const SGR_SET_GRAPHICS: u8 = b'm';
/// DA - device attributes (primary; `>` prefix selects secondary).
pub const DA_DEVICE_ATTRIBUTES: u8 = b'c';
/// SM - set mode (`?` prefix selects DEC private modes).
pub const SM_SET_MODE: u8 = b'h';
/// RM - reset mode.
pub const RM_RESET_MODE: u8 = b'l';
/// DECSTBM - set top/bottom scroll margins.
pub const DECSTBM_SET_MARGINS: u8 = b'r';
/// DSR - device status report.
pub const DSR_DEVICE_STATUS: u8 = b'n';
/// SCP - save cursor position (non-DECSC slot).
pub const SCP_SAVE_CURSOR: u8 = b's';
/// RCP - restore cursor position; also the Kitty-keyboard final with a
/// `>` / `<` / `?` marker.
pub const RCP_RESTORE_CURSOR: u8 = b'u';
/// XTWINOPS - window manipulation / size queries.
pub const XTWINOPS_WINDOW_OPS: u8 = b't';
/// TBC - tab clear.
pub const TBC_TAB_CLEAR: u8 = b'g';
/// DECSCUSR (`SP q`) / XTVERSION (`> q`).
pub const Q_CURSOR_STYLE_OR_VERSION: u8 = b'q';
/// DECRQM (`$ p`) - request mode state.
pub const P_MODE_REQUEST: u8 = b'p';

// SGR parameter values.

pub const SGR_RESET: u16 = 0;
pub const SGR_BOLD: u16 = 1;
pub const SGR_DIM: u16 = 2;
pub const SGR_ITALIC: u16 = 3;
pub const SGR_UNDERLINE: u16 = 4;
pub const SGR_BLINK_SLOW: u16 = 5;
pub const SGR_BLINK_RAPID: u16 = 6;
pub const SGR_INVERSE: u16 = 7;
pub const SGR_HIDDEN: u16 = 8;
pub const SGR_STRIKETHROUGH: u16 = 9;
pub const SGR_DOUBLE_UNDERLINE: u16 = 21;
pub const SGR_RESET_BOLD_DIM: u16 = 22;
pub const SGR_RESET_ITALIC: u16 = 23;
pub const SGR_RESET_UNDERLINE: u16 = 24;
pub const SGR_RESET_BLINK: u16 = 25;
pub const SGR_RESET_INVERSE: u16 = 27;
pub const SGR_RESET_HIDDEN: u16 = 28;
pub const SGR_RESET_STRIKETHROUGH: u16 = 29;
pub const SGR_FG_BASE: u16 = 30; // 30-37
pub const SGR_FG_EXTENDED: u16 = 38;
pub const SGR_FG_DEFAULT: u16 = 39;
pub const SGR_BG_BASE: u16 = 40; // 40-47
pub const SGR_BG_EXTENDED: u16 = 48;
pub const SGR_BG_DEFAULT: u16 = 49;
pub const SGR_FG_BRIGHT_BASE: u16 = 90; // 90-97
pub const SGR_BG_BRIGHT_BASE: u16 = 100; // 100-107

/// Extended-color sub-selector: `38;5;N` palette form.
pub const SGR_COLOR_MODE_PALETTE: u16 = 5;
/// Extended-color sub-selector: `38;2;R;G;B` true-color form.
pub const SGR_COLOR_MODE_RGB: u16 = 2;

// DEC private mode numbers (CSI ? Ps h / l).

pub const MODE_DECCKM_APP_CURSOR: u16 = 1;
pub const MODE_DECOM_ORIGIN: u16 = 6;
pub const MODE_DECAWM_AUTO_WRAP: u16 = 7;
pub const MODE_CURSOR_BLINK: u16 = 12;
pub const MODE_DECTCEM_CURSOR_VISIBLE: u16 = 25;
pub const MODE_ALT_BUFFER_47: u16 = 47;
pub const MODE_ALT_BUFFER_1047: u16 = 1047;
pub const MODE_ALT_BUFFER_1049: u16 = 1049;
pub const MODE_MOUSE_X10: u16 = 1000;
pub const MODE_MOUSE_NORMAL: u16 = 1002;
pub const MODE_MOUSE_ALL: u16 = 1003;
pub const MODE_FOCUS_REPORTING: u16 = 1004;
pub const MODE_MOUSE_UTF8: u16 = 1005;
pub const MODE_MOUSE_SGR: u16 = 1006;
pub const MODE_MOUSE_URXVT: u16 = 1015;
pub const MODE_BRACKETED_PASTE: u16 = 2004;
pub const MODE_SYNCHRONIZED_OUTPUT: u16 = 2026;
pub const MODE_GRAPHEME_CLUSTERING: u16 = 2027;

// ANSI (non-private) mode numbers (CSI Ps h / l).

pub const MODE_IRM_INSERT: u16 = 4;
pub const MODE_LNM_LINE_FEED: u16 = 20;
