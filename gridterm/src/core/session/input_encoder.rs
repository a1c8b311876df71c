// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Encoders for the write side of the PTY: keyboard, mouse, paste, focus.
//!
//! The front-end hands raw input events to these helpers and writes the
//! returned bytes to the session. Formats:
//!
//! - **Keys**: Win32 input mode, `ESC [ Vk ; Sc ; Uc ; Kd ; Cs ; Rc _`
//!   (virtual key, scan code, unicode char, key-down flag, control-state
//!   mask, repeat count).
//! - **Mouse**: SGR (`ESC [ < Cb ; Cx ; Cy M|m`) when mode 1006 is on,
//!   legacy `ESC [ M (Cb+32)(Cx+32)(Cy+32)` otherwise, clamped to 255.
//!   Motion adds 32 to Cb; X10 mode drops releases entirely.
//! - **Paste**: wrapped in `ESC [ 200 ~` / `ESC [ 201 ~` under bracketed
//!   paste.
//! - **Arrows/focus**: DECCKM selects SS3 (`ESC O A`) over CSI (`ESC [ A`);
//!   focus reporting sends `CSI I` / `CSI O`.

use crate::core::vt_parser::{MouseMode, TerminalModes};

// Win32 control-state mask bits (console API values).

pub const RIGHT_ALT_PRESSED: u16 = 0x0001;
pub const LEFT_ALT_PRESSED: u16 = 0x0002;
pub const RIGHT_CTRL_PRESSED: u16 = 0x0004;
pub const LEFT_CTRL_PRESSED: u16 = 0x0008;
pub const SHIFT_PRESSED: u16 = 0x0010;
pub const ENHANCED_KEY: u16 = 0x0100;

/// A raw key event from the front-end, in Win32 console terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub virtual_key: u16,
    pub scan_code: u16,
    /// Unicode character produced by the key, 0 when none.
    pub unicode_char: u32,
    pub key_down: bool,
    /// Bitmask of the `*_PRESSED` constants.
    pub control_state: u16,
    pub repeat_count: u16,
}

impl KeyEvent {
    /// A plain key-down event with no modifiers.
    #[must_use]
    pub fn down(virtual_key: u16, unicode_char: u32) -> Self {
        Self {
            virtual_key,
            scan_code: 0,
            unicode_char,
            key_down: true,
            control_state: 0,
            repeat_count: 1,
        }
    }
}

/// Encode a key event in Win32 input mode.
#[must_use]
pub fn encode_win32_key(event: &KeyEvent) -> String {
    format!(
        "\x1b[{};{};{};{};{};{}_",
        event.virtual_key,
        event.scan_code,
        event.unicode_char,
        u8::from(event.key_down),
        event.control_state,
        event.repeat_count
    )
}

/// Mouse buttons in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left = 0,
    Middle = 1,
    Right = 2,
}

/// Encode a mouse event for the active reporting mode.
///
/// `col`/`row` are 0-indexed cell coordinates; `None` when no reporting mode
/// is active or the mode drops the event (X10 releases).
#[must_use]
pub fn encode_mouse(
    modes: &TerminalModes,
    button: MouseButton,
    pressed: bool,
    motion: bool,
    col: usize,
    row: usize,
) -> Option<Vec<u8>> {
    if !modes.mouse_reporting_enabled() {
        return None;
    }

    // 1-based for the wire.
    let col = col + 1;
    let row = row + 1;

    if modes.sgr_mouse {
        let mut cb = button as usize;
        if motion {
            cb += 32;
        }
        let terminator = if pressed { 'M' } else { 'm' };
        return Some(format!("\x1b[<{cb};{col};{row}{terminator}").into_bytes());
    }

    // Legacy encoding. X10 reports presses only.
    if !pressed && modes.mouse_mode == MouseMode::X10 {
        return None;
    }
    let mut cb = button as usize;
    if motion {
        cb += 32;
    }
    if !pressed {
        cb += 3;
    }
    #[allow(clippy::cast_possible_truncation)]
    let encode = |value: usize| value.min(255) as u8;
    Some(vec![
        0x1b,
        b'[',
        b'M',
        encode(cb + 32),
        encode(col + 32),
        encode(row + 32),
    ])
}

/// Encode pasted text, bracketing it when mode 2004 is set.
#[must_use]
pub fn encode_paste(text: &str, modes: &TerminalModes) -> Vec<u8> {
    if modes.bracketed_paste {
        let mut bytes = Vec::with_capacity(text.len() + 12);
        bytes.extend_from_slice(b"\x1b[200~");
        bytes.extend_from_slice(text.as_bytes());
        bytes.extend_from_slice(b"\x1b[201~");
        bytes
    } else {
        text.as_bytes().to_vec()
    }
}

/// Arrow keys, encoded per DECCKM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowKey {
    Up,
    Down,
    Right,
    Left,
}

impl ArrowKey {
    fn final_byte(self) -> u8 {
        match self {
            ArrowKey::Up => b'A',
            ArrowKey::Down => b'B',
            ArrowKey::Right => b'C',
            ArrowKey::Left => b'D',
        }
    }
}

/// Encode an arrow key: `ESC O x` in application cursor mode, `ESC [ x`
/// otherwise.
#[must_use]
pub fn encode_arrow(key: ArrowKey, modes: &TerminalModes) -> Vec<u8> {
    let introducer = if modes.application_cursor_keys {
        b'O'
    } else {
        b'['
    };
    vec![0x1b, introducer, key.final_byte()]
}

/// Encode a focus change when focus reporting (mode 1004) is active.
#[must_use]
pub fn encode_focus(gained: bool, modes: &TerminalModes) -> Option<&'static [u8]> {
    if !modes.focus_reporting {
        return None;
    }
    Some(if gained { b"\x1b[I" } else { b"\x1b[O" })
}
