// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! SGR (Select Graphic Rendition) - `CSI ... m`.
//!
//! The parameter list is a little language walked left to right: most values
//! toggle one attribute, but 38/48 consume a sub-sequence (`;5;N` palette or
//! `;2;R;G;B` true color). An empty list means a single 0 (full reset).
//!
//! Palette selections keep full 256-color fidelity in the cell - `38;5;203`
//! stores `Palette(203)`. Folding to a 16-color display, if the renderer
//! needs it, happens at render time via
//! [`nearest_basic_color`](crate::nearest_basic_color).

use crate::core::cell::{AttrFlags, ColorRef, UnderlineStyle};
use crate::core::screen_buffer::ScreenBuffer;
use crate::core::vt_parser::VtParser;
use crate::core::vt_parser::protocols::csi_codes as sgr;

/// Apply every SGR parameter in the sequence to the buffer's current
/// attributes.
#[allow(clippy::too_many_lines)]
pub(crate) fn set_graphics_rendition(parser: &mut VtParser, buf: &mut ScreenBuffer) {
    let params = parser.params_slice();
    let mut attr = buf.current_attr();

    if params.is_empty() {
        attr.reset();
        buf.set_current_attr(attr);
        return;
    }

    let mut i = 0;
    while i < params.len() {
        let param = params[i];
        match param {
            sgr::SGR_RESET => attr.reset(),
            sgr::SGR_BOLD => attr.flags.insert(AttrFlags::BOLD),
            sgr::SGR_DIM => attr.flags.insert(AttrFlags::DIM),
            sgr::SGR_ITALIC => attr.flags.insert(AttrFlags::ITALIC),
            sgr::SGR_UNDERLINE => {
                attr.underline = UnderlineStyle::Single;
                attr.flags.insert(AttrFlags::UNDERLINE);
            }
            sgr::SGR_BLINK_SLOW | sgr::SGR_BLINK_RAPID => {
                attr.flags.insert(AttrFlags::BLINK);
            }
            sgr::SGR_INVERSE => attr.flags.insert(AttrFlags::INVERSE),
            sgr::SGR_HIDDEN => attr.flags.insert(AttrFlags::HIDDEN),
            sgr::SGR_STRIKETHROUGH => attr.flags.insert(AttrFlags::STRIKETHROUGH),
            sgr::SGR_DOUBLE_UNDERLINE => {
                attr.underline = UnderlineStyle::Double;
                attr.flags.insert(AttrFlags::UNDERLINE);
            }
            sgr::SGR_RESET_BOLD_DIM => {
                attr.flags.remove(AttrFlags::BOLD | AttrFlags::DIM);
            }
            sgr::SGR_RESET_ITALIC => attr.flags.remove(AttrFlags::ITALIC),
            sgr::SGR_RESET_UNDERLINE => {
                attr.underline = UnderlineStyle::None;
                attr.flags.remove(AttrFlags::UNDERLINE);
            }
            sgr::SGR_RESET_BLINK => attr.flags.remove(AttrFlags::BLINK),
            sgr::SGR_RESET_INVERSE => attr.flags.remove(AttrFlags::INVERSE),
            sgr::SGR_RESET_HIDDEN => attr.flags.remove(AttrFlags::HIDDEN),
            sgr::SGR_RESET_STRIKETHROUGH => {
                attr.flags.remove(AttrFlags::STRIKETHROUGH);
            }
            30..=37 => {
                #[allow(clippy::cast_possible_truncation)]
                {
                    attr.fg = ColorRef::Palette((param - sgr::SGR_FG_BASE) as u8);
                }
            }
            90..=97 => {
                #[allow(clippy::cast_possible_truncation)]
                {
                    attr.fg = ColorRef::Palette((param - sgr::SGR_FG_BRIGHT_BASE + 8) as u8);
                }
            }
            40..=47 => {
                #[allow(clippy::cast_possible_truncation)]
                {
                    attr.bg = ColorRef::Palette((param - sgr::SGR_BG_BASE) as u8);
                }
            }
            100..=107 => {
                #[allow(clippy::cast_possible_truncation)]
                {
                    attr.bg = ColorRef::Palette((param - sgr::SGR_BG_BRIGHT_BASE + 8) as u8);
                }
            }
            sgr::SGR_FG_EXTENDED => {
                if let Some((color, consumed)) = parse_extended_color(&params[i + 1..]) {
                    attr.fg = color;
                    i += consumed;
                }
            }
            sgr::SGR_BG_EXTENDED => {
                if let Some((color, consumed)) = parse_extended_color(&params[i + 1..]) {
                    attr.bg = color;
                    i += consumed;
                }
            }
            sgr::SGR_FG_DEFAULT => attr.fg = ColorRef::DEFAULT_FG,
            sgr::SGR_BG_DEFAULT => attr.bg = ColorRef::DEFAULT_BG,
            other => tracing::trace!("ignoring SGR parameter {other}"),
        }
        i += 1;
    }

    buf.set_current_attr(attr);
}

/// Parse the sub-sequence after a 38/48: `5;N` or `2;R;G;B`. Returns the
/// color and how many parameters were consumed.
fn parse_extended_color(rest: &[u16]) -> Option<(ColorRef, usize)> {
    match rest.first()? {
        &sgr::SGR_COLOR_MODE_PALETTE => {
            let index = *rest.get(1)?;
            #[allow(clippy::cast_possible_truncation)]
            Some((ColorRef::Palette(index.min(255) as u8), 2))
        }
        &sgr::SGR_COLOR_MODE_RGB => {
            #[allow(clippy::cast_possible_truncation)]
            let channel = |value: u16| value.min(255) as u8;
            let r = channel(*rest.get(1)?);
            let g = channel(*rest.get(2)?);
            let b = channel(*rest.get(3)?);
            Some((ColorRef::TrueColor { r, g, b }, 4))
        }
        _ => None,
    }
}
