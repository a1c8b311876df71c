// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! SGR attribute state: boolean flags, underline style, and the fg/bg color
//! pair. [`Attributes`] is a plain value type with structural equality; the
//! current attributes live on the screen buffer and are baked into each cell
//! as it is written.

use bitflags::bitflags;

use super::color::ColorRef;

bitflags! {
    /// Boolean SGR attributes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct AttrFlags: u8 {
        const BOLD          = 0b0000_0001;
        const DIM           = 0b0000_0010;
        const ITALIC        = 0b0000_0100;
        const INVERSE       = 0b0000_1000;
        const STRIKETHROUGH = 0b0001_0000;
        const UNDERLINE     = 0b0010_0000;
        const BLINK         = 0b0100_0000;
        const HIDDEN        = 0b1000_0000;
    }
}

/// Underline rendering style, set by SGR 4 (single) and SGR 21 (double).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnderlineStyle {
    #[default]
    None,
    Single,
    Double,
}

/// Complete SGR state for one cell.
///
/// Defaults match the VT convention of palette slot 7 (white) on slot 0
/// (black). SGR 0 resets to exactly this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attributes {
    pub fg: ColorRef,
    pub bg: ColorRef,
    pub flags: AttrFlags,
    pub underline: UnderlineStyle,
}

impl Attributes {
    /// Default foreground palette slot.
    pub const DEFAULT_FG: u8 = 7;
    /// Default background palette slot.
    pub const DEFAULT_BG: u8 = 0;

    /// The reset state: default fg/bg, no flags, no underline.
    pub const DEFAULT: Attributes = Attributes {
        fg: ColorRef::Palette(Self::DEFAULT_FG),
        bg: ColorRef::Palette(Self::DEFAULT_BG),
        flags: AttrFlags::empty(),
        underline: UnderlineStyle::None,
    };

    /// Reset every field to the default state (SGR 0).
    pub fn reset(&mut self) { *self = Self::DEFAULT; }

    #[must_use]
    pub fn is_bold(&self) -> bool { self.flags.contains(AttrFlags::BOLD) }

    #[must_use]
    pub fn is_inverse(&self) -> bool { self.flags.contains(AttrFlags::INVERSE) }
}

impl Default for Attributes {
    fn default() -> Self { Self::DEFAULT }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_attributes() {
        let attr = Attributes::default();
        assert_eq!(attr.fg, ColorRef::Palette(7));
        assert_eq!(attr.bg, ColorRef::Palette(0));
        assert!(attr.flags.is_empty());
        assert_eq!(attr.underline, UnderlineStyle::None);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut attr = Attributes::default();
        attr.fg = ColorRef::TrueColor { r: 1, g: 2, b: 3 };
        attr.flags = AttrFlags::BOLD | AttrFlags::BLINK;
        attr.underline = UnderlineStyle::Double;

        attr.reset();
        assert_eq!(attr, Attributes::default());
    }

    #[test]
    fn test_flag_independence() {
        // SGR 22 must be able to clear BOLD and DIM without touching the rest.
        let mut flags = AttrFlags::BOLD | AttrFlags::DIM | AttrFlags::ITALIC;
        flags.remove(AttrFlags::BOLD | AttrFlags::DIM);
        assert_eq!(flags, AttrFlags::ITALIC);
    }
}
