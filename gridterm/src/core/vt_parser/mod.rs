// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! VT100/ANSI/xterm escape-sequence state machine.
//!
//! # Architecture Overview
//!
//! ```text
//! PTY bytes ──▶ UTF-8 decode (Ground only) ──▶ print ──▶ ScreenBuffer
//!      │
//!      ╰─ ESC ──▶ ┌────────────────────────────────────────────┐
//!                 │ Escape ─ '[' ─▶ CsiEntry ─▶ CsiParam ─▶ ... │
//!                 │        ─ ']' ─▶ OscString                   │
//!                 │        ─ else ─▶ direct ESC dispatch        │
//!                 └────────────────────────────────────────────┘
//!                                  │ final byte
//!                                  ▼
//!                     operations::* shims ──▶ ScreenBuffer impl_* ops
//!                                  │
//!                                  ╰──▶ VtActions (device responses, OSC events)
//! ```
//!
//! The machine is an enum over states with per-state byte handlers. Rules the
//! handlers enforce:
//!
//! - Escape sequences are 7-bit: while outside Ground, bytes feed the machine
//!   directly and the UTF-8 accumulator is untouched.
//! - Private markers (`?`, `>`, `!`, `<`) are valid only immediately after
//!   `ESC [`; once a parameter digit has been seen they abort the sequence.
//! - C0 controls encountered mid-sequence execute in place (CR/LF/TAB/BS are
//!   routed through the buffer) without aborting the sequence - except ESC,
//!   which aborts and restarts.
//! - OSC strings end on BEL, `ESC \`, or C1 ST (0x9C); an accumulator past
//!   4096 bytes discards the sequence and returns to Ground.
//! - Malformed input never escapes as an error: unknown sequences are logged
//!   and dropped, and the machine re-synchronizes on the next byte.
//!
//! # Dispatch layering
//!
//! Recognition lives here; semantics live in [`operations`] shims that parse
//! parameters and delegate to `ScreenBuffer` methods (grid effects) or flip
//! [`TerminalModes`] flags (mode effects). Responses to queries are queued on
//! [`VtActions`] - processing is synchronous, single-threaded, and never
//! writes to the PTY directly.
//!
//! # Serialization contract
//!
//! `process_input` must be externally serialized with every other mutation of
//! the same (parser, buffer) pair. The session guarantees this by owning
//! both and pumping PTY output on one thread.

// Attach.
pub mod actions;
pub mod operations;
pub mod protocols;
pub mod state;

#[cfg(test)]
pub mod conformance_tests;

// Re-export.
pub use actions::*;
pub use protocols::dsr_codes::{
    DeviceResponse, ModeStatus, PRIMARY_DA_RESPONSE, SECONDARY_DA_RESPONSE,
    TERMINAL_NAME_AND_VERSION,
};
pub use state::{CursorStyle, MouseMode, Osc52Policy, SavedCursor, TerminalModes};

use std::sync::Arc;

use crate::core::cell::Rgb;
use crate::core::screen_buffer::ScreenBuffer;

use self::protocols::{csi_codes, esc_codes};
use self::state::{CsiParams, MAX_OSC_BYTES, SequenceState, Utf8Accumulator};

/// The escape-sequence parser for one terminal session.
///
/// Owns the sequence-recognition state, the semantic mode flags, and the
/// three independent saved-cursor slots (DECSC, CSI s/u, mode 1049). One
/// parser is paired with one [`ScreenBuffer`] for the life of a session.
pub struct VtParser {
    state: SequenceState,
    params: CsiParams,
    intermediate: Option<u8>,
    osc_buf: Vec<u8>,
    utf8: Utf8Accumulator,

    pub(crate) modes: TerminalModes,
    /// DECSC / DECRC slot (ESC 7 / ESC 8).
    pub(crate) saved_cursor: Option<SavedCursor>,
    /// CSI s / CSI u slot - position only, never shared with DECSC.
    pub(crate) saved_cursor_csi: Option<(usize, usize)>,
    /// Mode 1049 slot - independent of both of the above.
    pub(crate) saved_cursor_1049: Option<SavedCursor>,

    /// Last printable the parser wrote; REP (`CSI b`) repeats it.
    pub(crate) last_printed: Option<char>,

    pub(crate) clipboard: Option<Arc<dyn Clipboard>>,
    pub(crate) osc52_policy: Osc52Policy,
    /// OSC 10/11 theme overrides; `None` falls back to palette slots 7/0.
    pub(crate) theme_fg: Option<Rgb>,
    pub(crate) theme_bg: Option<Rgb>,
}

impl std::fmt::Debug for VtParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VtParser")
            .field("state", &self.state)
            .field("modes", &self.modes)
            .field("osc52_policy", &self.osc52_policy)
            .field("clipboard", &self.clipboard.is_some())
            .finish_non_exhaustive()
    }
}

impl Default for VtParser {
    fn default() -> Self { Self::new() }
}

impl VtParser {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: SequenceState::Ground,
            params: CsiParams::default(),
            intermediate: None,
            osc_buf: Vec::new(),
            utf8: Utf8Accumulator::default(),
            modes: TerminalModes::default(),
            saved_cursor: None,
            saved_cursor_csi: None,
            saved_cursor_1049: None,
            last_printed: None,
            clipboard: None,
            osc52_policy: Osc52Policy::default(),
            theme_fg: None,
            theme_bg: None,
        }
    }

    // ========================================================================
    // Host configuration
    // ========================================================================

    /// Wire the process-wide clipboard for OSC 52. The [`Osc52Policy`] gate
    /// is checked before every access; leave the default `Disabled` policy in
    /// place until the host has decided one.
    pub fn set_clipboard(&mut self, clipboard: Arc<dyn Clipboard>) {
        self.clipboard = Some(clipboard);
    }

    pub fn set_osc52_policy(&mut self, policy: Osc52Policy) {
        self.osc52_policy = policy;
    }

    #[must_use]
    pub fn osc52_policy(&self) -> Osc52Policy { self.osc52_policy }

    #[must_use]
    pub fn modes(&self) -> &TerminalModes { &self.modes }

    /// Whether the machine is between sequences (invariant after any input
    /// ending in a complete sequence terminator).
    #[must_use]
    pub fn is_ground(&self) -> bool { self.state == SequenceState::Ground }

    // ========================================================================
    // Byte processing
    // ========================================================================

    /// Consume `bytes`, updating `buf` and returning the queued side effects
    /// (device responses to forward to the PTY, OSC events for the host).
    ///
    /// Processing is synchronous; callers must serialize this with every
    /// other access to the same parser/buffer pair.
    pub fn process_input(&mut self, buf: &mut ScreenBuffer, bytes: &[u8]) -> VtActions {
        let mut actions = VtActions::default();
        let mut i = 0;
        while i < bytes.len() {
            let byte = bytes[i];

            // Escape sequences are always 7-bit: bypass UTF-8 decoding.
            if self.state != SequenceState::Ground {
                self.advance_sequence(byte, buf, &mut actions);
                i += 1;
                continue;
            }

            if self.utf8.pending() {
                if byte & 0xC0 == 0x80 {
                    if let Some(codepoint) = self.utf8.push_continuation(byte) {
                        self.print_codepoint(codepoint, buf);
                    }
                    i += 1;
                } else {
                    // Bad continuation: resync and reprocess this byte fresh.
                    self.utf8.reset();
                }
                continue;
            }

            match byte {
                0x00..=0x7F => self.process_ground_byte(byte, buf, &mut actions),
                0xC0..=0xDF => self.utf8.begin(byte, 2),
                0xE0..=0xEF => self.utf8.begin(byte, 3),
                0xF0..=0xF7 => self.utf8.begin(byte, 4),
                _ => {
                    tracing::trace!("dropping invalid UTF-8 lead byte {byte:#04x}");
                }
            }
            i += 1;
        }
        actions
    }

    fn process_ground_byte(
        &mut self,
        byte: u8,
        buf: &mut ScreenBuffer,
        _actions: &mut VtActions,
    ) {
        if byte == esc_codes::ESC {
            self.state = SequenceState::Escape;
            self.reset_sequence_state();
        } else if byte >= 0x20 {
            operations::char_ops::print_char(self, buf, byte as char);
        } else {
            operations::control_ops::execute_control(self, buf, byte);
        }
    }

    fn print_codepoint(&mut self, codepoint: u32, buf: &mut ScreenBuffer) {
        // Surrogates / out-of-range decode results are dropped; the stream
        // resynchronizes on the next byte.
        if let Some(ch) = char::from_u32(codepoint) {
            operations::char_ops::print_char(self, buf, ch);
        }
    }

    // ========================================================================
    // Sequence states
    // ========================================================================

    fn advance_sequence(&mut self, byte: u8, buf: &mut ScreenBuffer, actions: &mut VtActions) {
        match self.state {
            SequenceState::Ground => unreachable!("ground handled in process_input"),
            SequenceState::Escape => self.handle_escape(byte, buf, actions),
            SequenceState::CsiEntry => self.handle_csi_entry(byte, buf, actions),
            SequenceState::CsiParam => self.handle_csi_param(byte, buf, actions),
            SequenceState::CsiIntermediate => {
                self.handle_csi_intermediate(byte, buf, actions);
            }
            SequenceState::OscString => self.handle_osc_string(byte, buf, actions),
        }
    }

    fn handle_escape(&mut self, byte: u8, buf: &mut ScreenBuffer, actions: &mut VtActions) {
        self.state = SequenceState::Ground;
        match byte {
            esc_codes::CSI_INTRODUCER => self.state = SequenceState::CsiEntry,
            esc_codes::OSC_INTRODUCER => {
                self.osc_buf.clear();
                self.state = SequenceState::OscString;
            }
            esc_codes::RI_REVERSE_INDEX => operations::scroll_ops::reverse_index(buf),
            esc_codes::IND_INDEX => operations::scroll_ops::index(buf),
            esc_codes::NEL_NEXT_LINE => operations::control_ops::next_line(self, buf),
            esc_codes::RIS_RESET => operations::terminal_ops::hard_reset(self, buf),
            esc_codes::DECSC_SAVE_CURSOR => operations::cursor_ops::save_cursor_decsc(self, buf),
            esc_codes::DECRC_RESTORE_CURSOR => {
                operations::cursor_ops::restore_cursor_decsc(self, buf);
            }
            esc_codes::HTS_SET_TAB => buf.set_tab_stop_at_cursor(),
            esc_codes::DECKPAM_KEYPAD_APP => {
                self.modes.keypad_application = true;
                tracing::debug!("DECKPAM: keypad application mode");
            }
            esc_codes::DECKPNM_KEYPAD_NUMERIC => {
                self.modes.keypad_application = false;
                tracing::debug!("DECKPNM: keypad numeric mode");
            }
            esc_codes::ST_STRING_TERMINATOR => {}
            _ => {
                tracing::debug!("ignoring unknown ESC selector {:?}", byte as char);
            }
        }
        let _ = actions;
    }

    fn handle_csi_entry(&mut self, byte: u8, buf: &mut ScreenBuffer, actions: &mut VtActions) {
        match byte {
            esc_codes::ESC => {
                self.state = SequenceState::Escape;
                self.reset_sequence_state();
            }
            0x00..=0x1F => operations::control_ops::execute_control(self, buf, byte),
            b'0'..=b'9' => {
                self.params.push_digit(byte - b'0');
                self.state = SequenceState::CsiParam;
            }
            b';' => {
                self.params.break_param();
                self.state = SequenceState::CsiParam;
            }
            // Private markers - ONLY valid immediately after `ESC [`.
            b'?' | b'>' | b'!' | b'<' => {
                self.intermediate = Some(byte);
                self.state = SequenceState::CsiParam;
            }
            0x20..=0x2F => {
                self.intermediate = Some(byte);
                self.state = SequenceState::CsiIntermediate;
            }
            0x40..=0x7E => {
                self.dispatch_csi(byte, buf, actions);
                self.state = SequenceState::Ground;
            }
            _ => self.state = SequenceState::Ground,
        }
    }

    fn handle_csi_param(&mut self, byte: u8, buf: &mut ScreenBuffer, actions: &mut VtActions) {
        match byte {
            esc_codes::ESC => {
                self.state = SequenceState::Escape;
                self.reset_sequence_state();
            }
            0x00..=0x1F => operations::control_ops::execute_control(self, buf, byte),
            b'0'..=b'9' => self.params.push_digit(byte - b'0'),
            b';' => self.params.break_param(),
            0x20..=0x2F => {
                self.params.finish();
                self.intermediate = Some(byte);
                self.state = SequenceState::CsiIntermediate;
            }
            0x40..=0x7E => {
                self.dispatch_csi(byte, buf, actions);
                self.state = SequenceState::Ground;
            }
            // Includes a private marker after a digit: reject and abort.
            _ => self.state = SequenceState::Ground,
        }
    }

    fn handle_csi_intermediate(
        &mut self,
        byte: u8,
        buf: &mut ScreenBuffer,
        actions: &mut VtActions,
    ) {
        match byte {
            esc_codes::ESC => {
                self.state = SequenceState::Escape;
                self.reset_sequence_state();
            }
            0x00..=0x1F => operations::control_ops::execute_control(self, buf, byte),
            0x40..=0x7E => {
                self.dispatch_csi(byte, buf, actions);
                self.state = SequenceState::Ground;
            }
            0x80..=0xFF => self.state = SequenceState::Ground,
            // Further intermediates: latest one wins.
            _ => self.intermediate = Some(byte),
        }
    }

    fn handle_osc_string(&mut self, byte: u8, buf: &mut ScreenBuffer, actions: &mut VtActions) {
        match byte {
            esc_codes::BEL => {
                self.dispatch_osc(buf, actions);
                self.state = SequenceState::Ground;
            }
            esc_codes::ESC => {
                // ST arrives as `ESC \`; dispatch now, let Escape state eat
                // the backslash (or start whatever sequence follows).
                self.dispatch_osc(buf, actions);
                self.state = SequenceState::Escape;
                self.reset_sequence_state();
            }
            esc_codes::C1_ST => {
                self.dispatch_osc(buf, actions);
                self.state = SequenceState::Ground;
            }
            _ => {
                self.osc_buf.push(byte);
                if self.osc_buf.len() > MAX_OSC_BYTES {
                    tracing::debug!("OSC accumulator overflow, discarding sequence");
                    self.osc_buf.clear();
                    self.state = SequenceState::Ground;
                }
            }
        }
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    #[allow(clippy::too_many_lines)]
    fn dispatch_csi(&mut self, final_byte: u8, buf: &mut ScreenBuffer, actions: &mut VtActions) {
        self.params.finish();
        tracing::trace!(
            "CSI dispatch: final={:?} intermediate={:?} params={}",
            final_byte as char,
            self.intermediate.map(|b| b as char),
            self.params.len()
        );

        match final_byte {
            // Cursor movement.
            csi_codes::CUU_CURSOR_UP => operations::cursor_ops::cursor_up(self, buf),
            csi_codes::CUD_CURSOR_DOWN => operations::cursor_ops::cursor_down(self, buf),
            csi_codes::CUF_CURSOR_FORWARD => operations::cursor_ops::cursor_forward(self, buf),
            csi_codes::CUB_CURSOR_BACKWARD => operations::cursor_ops::cursor_backward(self, buf),
            csi_codes::CNL_CURSOR_NEXT_LINE => {
                operations::cursor_ops::cursor_next_line(self, buf);
            }
            csi_codes::CPL_CURSOR_PREV_LINE => {
                operations::cursor_ops::cursor_prev_line(self, buf);
            }
            csi_codes::CHA_CURSOR_COLUMN => operations::cursor_ops::cursor_column(self, buf),
            csi_codes::VPA_CURSOR_ROW => operations::cursor_ops::cursor_row(self, buf),
            csi_codes::CUP_CURSOR_POSITION | csi_codes::HVP_CURSOR_POSITION => {
                operations::cursor_ops::cursor_position(self, buf);
            }

            // Erasure.
            csi_codes::ED_ERASE_DISPLAY => operations::line_ops::erase_in_display(self, buf),
            csi_codes::EL_ERASE_LINE => operations::line_ops::erase_in_line(self, buf),
            csi_codes::ECH_ERASE_CHAR => operations::char_ops::erase_chars(self, buf),

            // Character editing.
            csi_codes::DCH_DELETE_CHAR => operations::char_ops::delete_chars(self, buf),
            csi_codes::ICH_INSERT_CHAR => operations::char_ops::insert_chars(self, buf),
            csi_codes::REP_REPEAT_CHAR => operations::char_ops::repeat_preceding(self, buf),

            // Line editing.
            csi_codes::IL_INSERT_LINE => operations::line_ops::insert_lines(self, buf),
            csi_codes::DL_DELETE_LINE => operations::line_ops::delete_lines(self, buf),

            // Scrolling.
            csi_codes::SU_SCROLL_UP => operations::scroll_ops::scroll_up(self, buf),
            csi_codes::SD_SCROLL_DOWN => operations::scroll_ops::scroll_down(self, buf),

            // Graphics.
            csi_codes::SGR_SET_GRAPHICS => operations::sgr_ops::set_graphics_rendition(self, buf),

            // Modes.
            csi_codes::SM_SET_MODE => operations::mode_ops::set_mode(self, buf, true),
            csi_codes::RM_RESET_MODE => operations::mode_ops::set_mode(self, buf, false),

            // Margins.
            csi_codes::DECSTBM_SET_MARGINS => operations::margin_ops::set_margins(self, buf),

            // Device queries.
            csi_codes::DA_DEVICE_ATTRIBUTES => {
                operations::device_ops::device_attributes(self, actions);
            }
            csi_codes::DSR_DEVICE_STATUS => {
                operations::device_ops::status_report(self, buf, actions);
            }
            csi_codes::XTWINOPS_WINDOW_OPS => {
                operations::device_ops::window_ops(self, buf, actions);
            }

            // Cursor save/restore, Kitty keyboard.
            csi_codes::SCP_SAVE_CURSOR => operations::cursor_ops::save_cursor_csi(self, buf),
            csi_codes::RCP_RESTORE_CURSOR => match self.intermediate {
                Some(b'>' | b'<' | b'?') => {
                    operations::device_ops::kitty_keyboard(self, actions);
                }
                _ => operations::cursor_ops::restore_cursor_csi(self, buf),
            },

            // Tab stops.
            csi_codes::TBC_TAB_CLEAR => operations::terminal_ops::tab_clear(self, buf),

            // DECSCUSR / XTVERSION.
            csi_codes::Q_CURSOR_STYLE_OR_VERSION => match self.intermediate {
                Some(b' ') => operations::terminal_ops::set_cursor_style(self),
                Some(b'>') => operations::device_ops::terminal_version(actions),
                _ => {
                    tracing::debug!("CSI q without a recognized intermediate, ignored");
                }
            },

            // DECRQM.
            csi_codes::P_MODE_REQUEST => {
                if self.intermediate == Some(b'$') {
                    operations::device_ops::report_mode(self, buf, actions);
                } else {
                    tracing::debug!("CSI p without $ intermediate, ignored");
                }
            }

            _ => {
                tracing::warn!(
                    "unhandled CSI final {:?} (intermediate {:?})",
                    final_byte as char,
                    self.intermediate.map(|b| b as char)
                );
            }
        }
    }

    fn dispatch_osc(&mut self, buf: &mut ScreenBuffer, actions: &mut VtActions) {
        let payload = String::from_utf8_lossy(&self.osc_buf).into_owned();
        self.osc_buf.clear();
        operations::osc_ops::dispatch_osc(self, buf, actions, &payload);
    }

    fn reset_sequence_state(&mut self) {
        self.params.clear();
        self.intermediate = None;
    }

    // ========================================================================
    // Parameter helpers used by the operations shims
    // ========================================================================

    pub(crate) fn param_or(&self, index: usize, default: u16) -> u16 {
        self.params.nth_or(index, default)
    }

    pub(crate) fn param_non_zero(&self, index: usize) -> u16 {
        self.params.nth_non_zero(index)
    }

    pub(crate) fn params_slice(&self) -> &[u16] { self.params.as_slice() }

    pub(crate) fn has_private_marker(&self, marker: u8) -> bool {
        self.intermediate == Some(marker)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn buffer() -> ScreenBuffer { ScreenBuffer::new(10, 4, 10) }

    #[test]
    fn test_plain_text_reaches_buffer() {
        let mut parser = VtParser::new();
        let mut buf = buffer();
        let actions = parser.process_input(&mut buf, b"hey");
        assert!(actions.is_empty());
        assert_eq!(buf.cell(0, 0).ch, 'h');
        assert_eq!(buf.cell(2, 0).ch, 'y');
        assert_eq!(buf.cursor(), (3, 0));
        assert!(parser.is_ground());
    }

    #[test]
    fn test_utf8_across_chunk_boundary() {
        let mut parser = VtParser::new();
        let mut buf = buffer();
        // "é" = 0xC3 0xA9 split across two process_input calls.
        parser.process_input(&mut buf, &[0xC3]);
        parser.process_input(&mut buf, &[0xA9]);
        assert_eq!(buf.cell(0, 0).ch, 'é');
    }

    #[test]
    fn test_invalid_continuation_reprocesses_byte() {
        let mut parser = VtParser::new();
        let mut buf = buffer();
        // Lead byte expecting a continuation, followed by plain 'A': the 'A'
        // must not be swallowed.
        parser.process_input(&mut buf, &[0xC3, b'A']);
        assert_eq!(buf.cell(0, 0).ch, 'A');
    }

    #[test]
    fn test_invalid_lead_byte_skipped() {
        let mut parser = VtParser::new();
        let mut buf = buffer();
        parser.process_input(&mut buf, &[0xFF, b'B']);
        assert_eq!(buf.cell(0, 0).ch, 'B');
    }

    #[test]
    fn test_sequence_split_across_chunks() {
        let mut parser = VtParser::new();
        let mut buf = buffer();
        parser.process_input(&mut buf, b"\x1b[3");
        assert!(!parser.is_ground());
        parser.process_input(&mut buf, b";4H");
        assert!(parser.is_ground());
        assert_eq!(buf.cursor(), (3, 2));
    }

    #[test]
    fn test_private_marker_rejected_after_digits() {
        let mut parser = VtParser::new();
        let mut buf = buffer();
        // `CSI 1 ? 25 h` is malformed: the `?` after a digit aborts. The
        // trailing bytes print as plain text once back in Ground... except
        // they are digits/letters which print.
        parser.process_input(&mut buf, b"\x1b[1?25h");
        assert!(parser.is_ground());
        // Cursor visibility untouched by the aborted sequence.
        assert!(buf.is_cursor_visible());
    }

    #[test]
    fn test_c0_mid_sequence_executes_in_place() {
        let mut parser = VtParser::new();
        let mut buf = buffer();
        // CR arrives in the middle of a CUP sequence; it must execute (column
        // to 0) without killing the sequence.
        parser.process_input(&mut buf, b"ab\x1b[2\r;2H");
        assert_eq!(buf.cursor(), (1, 1), "CUP still lands");
    }

    #[test]
    fn test_esc_mid_sequence_restarts() {
        let mut parser = VtParser::new();
        let mut buf = buffer();
        parser.process_input(&mut buf, b"\x1b[2;\x1b[4;5H");
        assert!(parser.is_ground());
        assert_eq!(buf.cursor(), (4, 3), "second sequence wins");
    }

    #[test]
    fn test_osc_overflow_discards_and_returns_to_ground() {
        let mut parser = VtParser::new();
        let mut buf = buffer();
        let mut blob = b"\x1b]0;".to_vec();
        blob.extend(std::iter::repeat_n(b'x', MAX_OSC_BYTES + 10));
        let actions = parser.process_input(&mut buf, &blob);
        assert!(parser.is_ground());
        assert!(actions.osc_events.is_empty());
    }

    #[test]
    fn test_unknown_csi_is_ignored() {
        let mut parser = VtParser::new();
        let mut buf = buffer();
        parser.process_input(&mut buf, b"\x1b[99y");
        assert!(parser.is_ground());
        assert_eq!(buf.cursor(), (0, 0));
    }

    #[test]
    fn test_del_between_sequences_is_harmless() {
        let mut parser = VtParser::new();
        let mut buf = buffer();
        parser.process_input(&mut buf, b"\x1b[2;2H\x7f");
        // DEL is written like any printable here; cursor advanced by 1.
        assert_eq!(buf.cursor(), (2, 1));
    }
}
