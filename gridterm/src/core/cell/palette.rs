// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The 256-entry session palette.
//!
//! Entries start at their canonical values ([`default_palette_rgb`]) and are
//! individually overridable via OSC 4. The `modified` bit records overrides
//! so theme changes (OSC 10/11) can skip entries an application has already
//! customized, and so a reset can restore exactly the touched slots.

use super::color::{Rgb, default_palette_rgb};

/// One palette slot: current RGB value plus an override marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteEntry {
    pub rgb: Rgb,
    pub modified: bool,
}

/// 256-entry color palette with per-slot override tracking.
#[derive(Debug, Clone)]
pub struct Palette {
    entries: [PaletteEntry; 256],
}

impl Palette {
    #[must_use]
    pub fn new() -> Self {
        let mut entries = [PaletteEntry {
            rgb: Rgb::new(0, 0, 0),
            modified: false,
        }; 256];
        for (i, entry) in entries.iter_mut().enumerate() {
            #[allow(clippy::cast_possible_truncation)]
            {
                entry.rgb = default_palette_rgb(i as u8);
            }
        }
        Self { entries }
    }

    /// Current RGB value of a slot (override or canonical).
    #[must_use]
    pub fn color(&self, index: u8) -> Rgb { self.entries[index as usize].rgb }

    /// Whether a slot has been overridden via OSC 4.
    #[must_use]
    pub fn is_modified(&self, index: u8) -> bool {
        self.entries[index as usize].modified
    }

    /// Override a slot (OSC 4 set). Marks the slot modified.
    pub fn set_color(&mut self, index: u8, rgb: Rgb) {
        self.entries[index as usize] = PaletteEntry {
            rgb,
            modified: true,
        };
    }

    /// Update a slot without marking it modified.
    ///
    /// Used by OSC 10/11 theme changes, which only retint slots that no
    /// application has explicitly claimed.
    pub fn set_color_unmodified(&mut self, index: u8, rgb: Rgb) {
        self.entries[index as usize] = PaletteEntry {
            rgb,
            modified: false,
        };
    }

    /// Restore every overridden slot to its canonical value.
    pub fn reset(&mut self) {
        for (i, entry) in self.entries.iter_mut().enumerate() {
            if entry.modified {
                #[allow(clippy::cast_possible_truncation)]
                {
                    entry.rgb = default_palette_rgb(i as u8);
                }
                entry.modified = false;
            }
        }
    }
}

impl Default for Palette {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_palette_matches_canonical_table() {
        let palette = Palette::new();
        assert_eq!(palette.color(1), Rgb::new(205, 49, 49));
        assert_eq!(palette.color(21), default_palette_rgb(21));
        assert_eq!(palette.color(250), default_palette_rgb(250));
        assert!(!palette.is_modified(1));
    }

    #[test]
    fn test_set_color_marks_modified() {
        let mut palette = Palette::new();
        palette.set_color(1, Rgb::new(10, 20, 30));
        assert_eq!(palette.color(1), Rgb::new(10, 20, 30));
        assert!(palette.is_modified(1));
        assert!(!palette.is_modified(2));
    }

    #[test]
    fn test_reset_restores_only_modified_slots() {
        let mut palette = Palette::new();
        palette.set_color(100, Rgb::new(1, 1, 1));
        palette.reset();
        assert_eq!(palette.color(100), default_palette_rgb(100));
        assert!(!palette.is_modified(100));
    }

    #[test]
    fn test_theme_retint_does_not_claim_slot() {
        let mut palette = Palette::new();
        palette.set_color_unmodified(7, Rgb::new(200, 200, 200));
        assert_eq!(palette.color(7), Rgb::new(200, 200, 200));
        assert!(!palette.is_modified(7));
    }
}
