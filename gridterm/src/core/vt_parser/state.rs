// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Parser state: the sequence-recognition machine's working storage and the
//! semantic mode flags escape sequences toggle.
//!
//! The byte-level machine is an enum over states with per-state handlers
//! (see the parent module); this file holds the data those handlers share:
//! the bounded CSI parameter list, the capped OSC accumulator constant, the
//! UTF-8 accumulator, and [`TerminalModes`].

use smallvec::SmallVec;

use crate::core::cell::Attributes;

/// Where the sequence machine is between bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum SequenceState {
    /// Plain text; UTF-8 decoding is active.
    #[default]
    Ground,
    /// ESC seen, selector byte pending.
    Escape,
    /// `ESC [` seen; private markers are only valid here.
    CsiEntry,
    /// Collecting CSI parameter digits.
    CsiParam,
    /// Intermediate byte seen; only the final byte may follow.
    CsiIntermediate,
    /// `ESC ]` seen; accumulating until BEL / ST.
    OscString,
}

/// Hard cap on retained CSI parameters; extras are dropped.
pub(crate) const MAX_PARAMS: usize = 16;

/// Cap on the OSC accumulator. Overflow discards the sequence and returns
/// the machine to Ground.
pub(crate) const MAX_OSC_BYTES: usize = 4096;

/// Bounded CSI parameter list with in-progress digit accumulation.
///
/// Empty slots (`;;`) default to 0 per the protocol; values saturate at
/// `u16::MAX` instead of overflowing.
#[derive(Debug, Default)]
pub(crate) struct CsiParams {
    values: SmallVec<[u16; MAX_PARAMS]>,
    current: Option<u32>,
}

impl CsiParams {
    pub fn clear(&mut self) {
        self.values.clear();
        self.current = None;
    }

    /// Accumulate one ASCII digit into the in-progress parameter.
    pub fn push_digit(&mut self, digit: u8) {
        let current = self.current.unwrap_or(0);
        self.current = Some(
            current
                .saturating_mul(10)
                .saturating_add(u32::from(digit))
                .min(u32::from(u16::MAX)),
        );
    }

    /// `;` - commit the in-progress parameter (empty commits 0).
    pub fn break_param(&mut self) {
        self.commit(self.current.unwrap_or(0));
        self.current = None;
    }

    /// Commit any trailing in-progress parameter before dispatch.
    pub fn finish(&mut self) {
        if let Some(value) = self.current.take() {
            self.commit(value);
        }
    }

    fn commit(&mut self, value: u32) {
        if self.values.len() < MAX_PARAMS {
            #[allow(clippy::cast_possible_truncation)]
            self.values.push(value as u16);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize { self.values.len() }

    /// Parameter `index`, or `default` when absent.
    #[must_use]
    pub fn nth_or(&self, index: usize, default: u16) -> u16 {
        self.values.get(index).copied().unwrap_or(default)
    }

    /// Parameter `index` with the VT "missing or zero means one" rule.
    #[must_use]
    pub fn nth_non_zero(&self, index: usize) -> u16 { self.nth_or(index, 1).max(1) }

    #[must_use]
    pub fn as_slice(&self) -> &[u16] { &self.values }
}

/// Incremental UTF-8 decoder for Ground-state bytes.
///
/// Escape sequences are pure 7-bit, so the accumulator only runs in Ground.
/// A bad continuation byte resets the accumulator and the offending byte is
/// reprocessed as a fresh byte; an invalid lead byte is skipped.
#[derive(Debug, Default)]
pub(crate) struct Utf8Accumulator {
    needed: u8,
    received: u8,
    bytes: [u8; 4],
}

impl Utf8Accumulator {
    #[must_use]
    pub fn pending(&self) -> bool { self.needed > 0 }

    /// Begin a multi-byte sequence from its lead byte.
    pub fn begin(&mut self, lead: u8, total: u8) {
        self.bytes[0] = lead;
        self.needed = total;
        self.received = 1;
    }

    /// Feed a continuation byte; returns the decoded scalar when complete.
    /// The caller must have checked `pending()` and the `10xxxxxx` shape.
    pub fn push_continuation(&mut self, byte: u8) -> Option<u32> {
        self.bytes[self.received as usize] = byte;
        self.received += 1;
        if self.received < self.needed {
            return None;
        }
        let codepoint = match self.needed {
            2 => (u32::from(self.bytes[0] & 0x1F) << 6) | u32::from(self.bytes[1] & 0x3F),
            3 => {
                (u32::from(self.bytes[0] & 0x0F) << 12)
                    | (u32::from(self.bytes[1] & 0x3F) << 6)
                    | u32::from(self.bytes[2] & 0x3F)
            }
            _ => {
                (u32::from(self.bytes[0] & 0x07) << 18)
                    | (u32::from(self.bytes[1] & 0x3F) << 12)
                    | (u32::from(self.bytes[2] & 0x3F) << 6)
                    | u32::from(self.bytes[3] & 0x3F)
            }
        };
        self.reset();
        Some(codepoint)
    }

    pub fn reset(&mut self) {
        self.needed = 0;
        self.received = 0;
    }
}

/// Cursor snapshot for DECSC / mode-1049 save slots.
#[derive(Debug, Clone, Copy)]
pub struct SavedCursor {
    pub x: usize,
    pub y: usize,
    pub attr: Attributes,
    pub origin_mode: bool,
    pub auto_wrap: bool,
}

/// Mouse reporting mode (DEC private modes 1000/1002/1003).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MouseMode {
    #[default]
    None,
    /// Mode 1000 - button presses only; releases are dropped.
    X10,
    /// Mode 1002 - press/release plus motion while a button is held.
    Normal,
    /// Mode 1003 - all motion.
    All,
}

/// Cursor shape requested via DECSCUSR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum_macros::Display)]
pub enum CursorStyle {
    #[default]
    BlinkingBlock,
    SteadyBlock,
    BlinkingUnderline,
    SteadyUnderline,
    BlinkingBar,
    SteadyBar,
}

/// Host policy gating OSC 52 clipboard access.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    serde::Serialize,
    serde::Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
)]
pub enum Osc52Policy {
    /// No clipboard access (default).
    #[default]
    Disabled,
    ReadOnly,
    WriteOnly,
    ReadWrite,
}

impl Osc52Policy {
    #[must_use]
    pub fn allows_read(self) -> bool {
        matches!(self, Osc52Policy::ReadOnly | Osc52Policy::ReadWrite)
    }

    #[must_use]
    pub fn allows_write(self) -> bool {
        matches!(self, Osc52Policy::WriteOnly | Osc52Policy::ReadWrite)
    }
}

/// Semantic flags toggled by modes and simple escapes.
///
/// DECAWM lives on the screen buffer (its `write_char` consults it); origin
/// mode lives here because only cursor-addressing sequences consult it.
#[derive(Debug, Clone)]
pub struct TerminalModes {
    /// DECCKM (mode 1) - arrow keys send SS3 instead of CSI sequences.
    pub application_cursor_keys: bool,
    /// DECOM (mode 6) - cursor addressing is relative to the scroll region.
    pub origin_mode: bool,
    /// Mode 2004 - pastes are wrapped in `CSI 200~` / `CSI 201~`.
    pub bracketed_paste: bool,
    /// IRM (mode 4) - printing inserts instead of overwriting.
    pub insert_mode: bool,
    /// LNM (mode 20) - LF implies CR.
    pub line_feed_new_line: bool,
    /// DECKPAM / DECKPNM (ESC = / ESC >).
    pub keypad_application: bool,
    /// Mode 12 plus DECSCUSR blink selection.
    pub cursor_blink: bool,
    pub cursor_style: CursorStyle,
    pub mouse_mode: MouseMode,
    /// Mode 1006 - SGR mouse encoding.
    pub sgr_mouse: bool,
    /// Mode 1004 - report focus in/out as `CSI I` / `CSI O`.
    pub focus_reporting: bool,
    /// Mode 2026 - flag only; the renderer is already frame-based.
    pub synchronized_output: bool,
}

impl Default for TerminalModes {
    fn default() -> Self {
        Self {
            application_cursor_keys: false,
            origin_mode: false,
            bracketed_paste: false,
            insert_mode: false,
            line_feed_new_line: false,
            keypad_application: false,
            cursor_blink: true,
            cursor_style: CursorStyle::default(),
            mouse_mode: MouseMode::default(),
            sgr_mouse: false,
            focus_reporting: false,
            synchronized_output: false,
        }
    }
}

impl TerminalModes {
    #[must_use]
    pub fn mouse_reporting_enabled(&self) -> bool {
        self.mouse_mode != MouseMode::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_digit_accumulation() {
        let mut params = CsiParams::default();
        params.push_digit(1);
        params.push_digit(2);
        params.break_param();
        params.push_digit(3);
        params.finish();
        assert_eq!(params.len(), 2);
        assert_eq!(params.nth_or(0, 0), 12);
        assert_eq!(params.nth_or(1, 0), 3);
    }

    #[test]
    fn test_params_empty_slots_default_zero() {
        let mut params = CsiParams::default();
        params.break_param(); // ";" with nothing before it
        params.push_digit(5);
        params.finish();
        assert_eq!(params.nth_or(0, 9), 0);
        assert_eq!(params.nth_or(1, 9), 5);
        // Missing-or-zero means one.
        assert_eq!(params.nth_non_zero(0), 1);
        assert_eq!(params.nth_non_zero(5), 1);
    }

    #[test]
    fn test_params_saturate_and_cap() {
        let mut params = CsiParams::default();
        for _ in 0..10 {
            params.push_digit(9);
        }
        params.finish();
        assert_eq!(params.nth_or(0, 0), u16::MAX);

        let mut params = CsiParams::default();
        for _ in 0..(MAX_PARAMS + 5) {
            params.push_digit(1);
            params.break_param();
        }
        params.finish();
        assert_eq!(params.len(), MAX_PARAMS);
    }

    #[test]
    fn test_utf8_two_byte() {
        let mut utf8 = Utf8Accumulator::default();
        utf8.begin(0xC3, 2);
        assert!(utf8.pending());
        let cp = utf8.push_continuation(0xA9).unwrap();
        assert_eq!(char::from_u32(cp), Some('é'));
        assert!(!utf8.pending());
    }

    #[test]
    fn test_utf8_four_byte() {
        let mut utf8 = Utf8Accumulator::default();
        utf8.begin(0xF0, 4);
        assert_eq!(utf8.push_continuation(0x9F), None);
        assert_eq!(utf8.push_continuation(0x92), None);
        let cp = utf8.push_continuation(0xA9).unwrap();
        assert_eq!(char::from_u32(cp), Some('💩'));
    }

    #[test]
    fn test_osc52_policy_gates() {
        assert!(!Osc52Policy::Disabled.allows_read());
        assert!(!Osc52Policy::Disabled.allows_write());
        assert!(Osc52Policy::ReadOnly.allows_read());
        assert!(!Osc52Policy::ReadOnly.allows_write());
        assert!(Osc52Policy::WriteOnly.allows_write());
        assert!(Osc52Policy::ReadWrite.allows_read());
        assert!(Osc52Policy::ReadWrite.allows_write());
    }
}
