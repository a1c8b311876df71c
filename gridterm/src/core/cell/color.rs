// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Color references and the default color tables.
//!
//! Cells store a [`ColorRef`]: either an index into the session's 256-entry
//! palette or a direct 24-bit color from SGR `38;2;R;G;B`. Palette indices are
//! stored losslessly - `38;5;203` keeps `203` in the cell. Renderers limited
//! to 16 colors can fold indices down with [`nearest_basic_color`], which
//! preserves the dominant-channel mapping the renderer expects.

/// A 24-bit RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self { Self { r, g, b } }
}

/// Color reference stored in a cell: palette slot or direct true color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorRef {
    /// Index into the 256-entry palette (0-15 standard, 16-231 color cube,
    /// 232-255 gray ramp).
    Palette(u8),
    /// Direct 24-bit color from SGR 38;2 / 48;2.
    TrueColor { r: u8, g: u8, b: u8 },
}

impl ColorRef {
    /// Default foreground reference (palette slot 7).
    pub const DEFAULT_FG: ColorRef = ColorRef::Palette(7);
    /// Default background reference (palette slot 0).
    pub const DEFAULT_BG: ColorRef = ColorRef::Palette(0);
}

/// The standard 16 ANSI colors (slots 0-15) used when the palette entry has
/// not been overridden via OSC 4.
pub const STANDARD_16: [Rgb; 16] = [
    Rgb::new(0, 0, 0),       // Black
    Rgb::new(205, 49, 49),   // Red
    Rgb::new(13, 188, 121),  // Green
    Rgb::new(229, 229, 16),  // Yellow
    Rgb::new(36, 114, 200),  // Blue
    Rgb::new(188, 63, 188),  // Magenta
    Rgb::new(17, 168, 205),  // Cyan
    Rgb::new(229, 229, 229), // White
    Rgb::new(102, 102, 102), // Bright Black
    Rgb::new(241, 76, 76),   // Bright Red
    Rgb::new(35, 209, 139),  // Bright Green
    Rgb::new(245, 245, 67),  // Bright Yellow
    Rgb::new(59, 142, 234),  // Bright Blue
    Rgb::new(214, 112, 214), // Bright Magenta
    Rgb::new(41, 184, 219),  // Bright Cyan
    Rgb::new(255, 255, 255), // Bright White
];

/// Compute the canonical RGB value for a 256-color palette index.
///
/// - 0-15: [`STANDARD_16`]
/// - 16-231: 6x6x6 color cube, each channel in steps of 51
/// - 232-255: 24-step gray ramp from 8 to 238
#[must_use]
pub fn default_palette_rgb(index: u8) -> Rgb {
    match index {
        0..=15 => STANDARD_16[index as usize],
        16..=231 => {
            let idx = index as usize - 16;
            let r = (idx / 36) * 51;
            let g = ((idx / 6) % 6) * 51;
            let b = (idx % 6) * 51;
            #[allow(clippy::cast_possible_truncation)]
            Rgb::new(r as u8, g as u8, b as u8)
        }
        232..=255 => {
            let gray = (index as usize - 232) * 10 + 8;
            #[allow(clippy::cast_possible_truncation)]
            Rgb::new(gray as u8, gray as u8, gray as u8)
        }
    }
}

/// Fold a 256-color palette index down to the nearest of the 16 basic slots.
///
/// Render-side helper for displays limited to the basic palette. Gray-ramp
/// entries map to black/gray/white by brightness; cube entries map by
/// dominant channel with a bright/dark split at cube level 3.
#[must_use]
pub fn nearest_basic_color(index: u8) -> u8 {
    if index < 16 {
        return index;
    }
    if index >= 232 {
        let gray = (u32::from(index) - 232) * 255 / 23;
        return if gray < 64 {
            0 // Black
        } else if gray < 192 {
            8 // Gray
        } else {
            7 // White
        };
    }
    let idx = u32::from(index) - 16;
    let (r, g, b) = (idx / 36, (idx % 36) / 6, idx % 6);
    #[allow(clippy::cast_possible_truncation)]
    let pick = |dark: u32, bright: u32, level: u32| -> u8 {
        (if level > 3 { bright } else { dark }) as u8
    };
    if r > g && r > b {
        pick(1, 9, r) // Red
    } else if g > r && g > b {
        pick(2, 10, g) // Green
    } else if b > r && b > g {
        pick(4, 12, b) // Blue
    } else if r == g && r > b {
        pick(3, 11, r) // Yellow
    } else if r == b && r > g {
        pick(5, 13, r) // Magenta
    } else if g == b && g > r {
        pick(6, 14, g) // Cyan
    } else if r > 2 {
        15 // Bright White
    } else {
        7 // White/Gray
    }
}
