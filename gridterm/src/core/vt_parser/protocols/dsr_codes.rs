// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Device responses: everything the terminal sends back to the application.
//!
//! Applications interrogate the terminal (DA, DSR, XTWINOPS, DECRQM, OSC
//! color queries, ...) and expect the reply on their stdin. [`DeviceResponse`]
//! is the typed builder for those replies; `Display` renders the complete
//! escape-prefixed byte string, and the session forwards it to the PTY writer
//! in the order the parser generated it.
//!
//! ## Wire formats
//!
//! | Query | Response |
//! |-------|----------|
//! | `CSI c` | `CSI ? 62;1;2;4;6;9;15;18;21;22 c` |
//! | `CSI > c` | `CSI > 41;380;0 c` |
//! | `CSI 5 n` | `CSI 0 n` |
//! | `CSI 6 n` | `CSI row ; col R` (1-based, origin-relative in DECOM) |
//! | `CSI 14 t` | `CSI 4 ; px-height ; px-width t` |
//! | `CSI 18 t` / `CSI 19 t` | `CSI 8/9 ; rows ; cols t` |
//! | `CSI > q` | `DCS > \| TerminalDX12 1.0 ST` |
//! | `CSI ? Ps $ p` | `CSI ? Ps ; status $ y` |
//! | `CSI ? u` | `CSI ? 0 u` |
//! | `OSC 4 ; i ; ?` | `OSC 4 ; i ; rgb:RRRR/GGGG/BBBB BEL` |
//! | `OSC 10/11 ; ?` | `OSC 10/11 ; rgb:RRRR/GGGG/BBBB BEL` |
//! | `OSC 52 ; c ; ?` | `OSC 52 ; c ; base64 BEL` |

use std::fmt::{self, Display};

use crate::core::cell::Rgb;

/// Primary DA reply: VT220-class with the feature list applications probe
/// for (132 cols, printer, selective erase, sixel-absent, NRCS, ...).
pub const PRIMARY_DA_RESPONSE: &str = "\x1b[?62;1;2;4;6;9;15;18;21;22c";

/// Secondary DA reply: reports as xterm patch 380.
pub const SECONDARY_DA_RESPONSE: &str = "\x1b[>41;380;0c";

/// XTVERSION reply payload.
pub const TERMINAL_NAME_AND_VERSION: &str = "TerminalDX12 1.0";

/// Estimated cell width in pixels for XTWINOPS 14.
pub const CELL_PIXEL_WIDTH: usize = 8;
/// Estimated cell height in pixels for XTWINOPS 14.
pub const CELL_PIXEL_HEIGHT: usize = 16;

/// DECRQM status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeStatus {
    NotRecognized,
    Set,
    Reset,
}

impl ModeStatus {
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            ModeStatus::NotRecognized => 0,
            ModeStatus::Set => 1,
            ModeStatus::Reset => 2,
        }
    }

    /// Status for a recognized boolean mode.
    #[must_use]
    pub fn from_flag(set: bool) -> Self {
        if set { ModeStatus::Set } else { ModeStatus::Reset }
    }
}

/// A reply the terminal owes the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceResponse {
    /// `CSI c` -> primary device attributes.
    PrimaryAttributes,
    /// `CSI > c` -> secondary device attributes.
    SecondaryAttributes,
    /// `CSI 5 n` -> terminal OK.
    StatusOk,
    /// `CSI 6 n` -> cursor position report; row/col are 1-based.
    CursorPosition { row: usize, col: usize },
    /// `CSI 14 t` -> text area size in pixels.
    TextAreaPixels { rows: usize, cols: usize },
    /// `CSI 18 t` -> text area size in cells.
    TextAreaChars { rows: usize, cols: usize },
    /// `CSI 19 t` -> screen size in cells.
    ScreenChars { rows: usize, cols: usize },
    /// `CSI > q` -> terminal name and version as a DCS string.
    TerminalVersion,
    /// `CSI ? Ps $ p` -> DECRQM mode report.
    ModeReport { mode: u16, status: ModeStatus },
    /// `CSI ? u` -> Kitty keyboard flags (none supported).
    KittyKeyboardFlags,
    /// `OSC 4 ; i ; ?` -> palette entry as 16-bit-per-channel rgb.
    PaletteColor { index: u8, rgb: Rgb },
    /// `OSC 10 ; ?` -> default foreground.
    DefaultForeground { rgb: Rgb },
    /// `OSC 11 ; ?` -> default background.
    DefaultBackground { rgb: Rgb },
    /// `OSC 52 ; c ; ?` -> clipboard contents, base64-encoded.
    ClipboardContents { selection: String, base64: String },
}

/// Scale an 8-bit channel to the 16-bit `rgb:` notation (0xAB -> 0xABAB).
fn scale16(channel: u8) -> u16 { u16::from(channel) * 257 }

impl Display for DeviceResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceResponse::PrimaryAttributes => write!(f, "{PRIMARY_DA_RESPONSE}"),
            DeviceResponse::SecondaryAttributes => write!(f, "{SECONDARY_DA_RESPONSE}"),
            DeviceResponse::StatusOk => write!(f, "\x1b[0n"),
            DeviceResponse::CursorPosition { row, col } => {
                write!(f, "\x1b[{row};{col}R")
            }
            DeviceResponse::TextAreaPixels { rows, cols } => write!(
                f,
                "\x1b[4;{};{}t",
                rows * CELL_PIXEL_HEIGHT,
                cols * CELL_PIXEL_WIDTH
            ),
            DeviceResponse::TextAreaChars { rows, cols } => {
                write!(f, "\x1b[8;{rows};{cols}t")
            }
            DeviceResponse::ScreenChars { rows, cols } => {
                write!(f, "\x1b[9;{rows};{cols}t")
            }
            DeviceResponse::TerminalVersion => {
                write!(f, "\x1bP>|{TERMINAL_NAME_AND_VERSION}\x1b\\")
            }
            DeviceResponse::ModeReport { mode, status } => {
                write!(f, "\x1b[?{mode};{}$y", status.code())
            }
            DeviceResponse::KittyKeyboardFlags => write!(f, "\x1b[?0u"),
            DeviceResponse::PaletteColor { index, rgb } => write!(
                f,
                "\x1b]4;{index};rgb:{:04x}/{:04x}/{:04x}\x07",
                scale16(rgb.r),
                scale16(rgb.g),
                scale16(rgb.b)
            ),
            DeviceResponse::DefaultForeground { rgb } => write!(
                f,
                "\x1b]10;rgb:{:04x}/{:04x}/{:04x}\x07",
                scale16(rgb.r),
                scale16(rgb.g),
                scale16(rgb.b)
            ),
            DeviceResponse::DefaultBackground { rgb } => write!(
                f,
                "\x1b]11;rgb:{:04x}/{:04x}/{:04x}\x07",
                scale16(rgb.r),
                scale16(rgb.g),
                scale16(rgb.b)
            ),
            DeviceResponse::ClipboardContents { selection, base64 } => {
                write!(f, "\x1b]52;{selection};{base64}\x07")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_da_and_dsr_formats() {
        assert_eq!(
            DeviceResponse::PrimaryAttributes.to_string(),
            "\x1b[?62;1;2;4;6;9;15;18;21;22c"
        );
        assert_eq!(
            DeviceResponse::SecondaryAttributes.to_string(),
            "\x1b[>41;380;0c"
        );
        assert_eq!(DeviceResponse::StatusOk.to_string(), "\x1b[0n");
        assert_eq!(
            DeviceResponse::CursorPosition { row: 5, col: 10 }.to_string(),
            "\x1b[5;10R"
        );
    }

    #[test]
    fn test_window_ops_use_cell_size_estimate() {
        assert_eq!(
            DeviceResponse::TextAreaPixels { rows: 24, cols: 80 }.to_string(),
            "\x1b[4;384;640t"
        );
        assert_eq!(
            DeviceResponse::TextAreaChars { rows: 24, cols: 80 }.to_string(),
            "\x1b[8;24;80t"
        );
        assert_eq!(
            DeviceResponse::ScreenChars { rows: 24, cols: 80 }.to_string(),
            "\x1b[9;24;80t"
        );
    }

    #[test]
    fn test_xtversion_is_a_dcs_string() {
        assert_eq!(
            DeviceResponse::TerminalVersion.to_string(),
            "\x1bP>|TerminalDX12 1.0\x1b\\"
        );
    }

    #[test]
    fn test_mode_report() {
        assert_eq!(
            DeviceResponse::ModeReport {
                mode: 2004,
                status: ModeStatus::Set
            }
            .to_string(),
            "\x1b[?2004;1$y"
        );
        assert_eq!(ModeStatus::from_flag(false), ModeStatus::Reset);
        assert_eq!(ModeStatus::NotRecognized.code(), 0);
    }

    #[test]
    fn test_palette_color_is_16_bit_per_channel() {
        let response = DeviceResponse::PaletteColor {
            index: 1,
            rgb: Rgb::new(0xCD, 0x31, 0x31),
        };
        assert_eq!(response.to_string(), "\x1b]4;1;rgb:cdcd/3131/3131\x07");
    }

    #[test]
    fn test_clipboard_response() {
        let response = DeviceResponse::ClipboardContents {
            selection: "c".into(),
            base64: "aGVsbG8=".into(),
        };
        assert_eq!(response.to_string(), "\x1b]52;c;aGVsbG8=\x07");
    }
}
