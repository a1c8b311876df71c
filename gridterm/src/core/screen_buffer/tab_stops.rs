// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Tab stop set.
//!
//! Fresh buffers carry a stop every 8 columns. `HTS` (ESC H) adds a stop at
//! the cursor column, `TBC 0` removes the stop at the cursor, `TBC 3` clears
//! all. On a shrink-resize, stops at or past the new width are dropped.

use std::collections::BTreeSet;

/// Column positions that TAB advances to.
#[derive(Debug, Clone)]
pub struct TabStops {
    stops: BTreeSet<usize>,
}

impl TabStops {
    /// Default stops: every 8th column within `cols`.
    #[must_use]
    pub fn new(cols: usize) -> Self {
        let stops = (0..cols).step_by(8).collect();
        Self { stops }
    }

    /// Next stop strictly after `col`, if any.
    #[must_use]
    pub fn next_stop(&self, col: usize) -> Option<usize> {
        self.stops.range(col + 1..).next().copied()
    }

    /// Set a stop at `col` (HTS).
    pub fn set(&mut self, col: usize) { self.stops.insert(col); }

    /// Remove the stop at `col` if present (TBC 0).
    pub fn clear(&mut self, col: usize) { self.stops.remove(&col); }

    /// Remove every stop (TBC 3).
    pub fn clear_all(&mut self) { self.stops.clear(); }

    /// Drop stops at or past `cols` (resize policy).
    pub fn truncate(&mut self, cols: usize) {
        self.stops.retain(|&stop| stop < cols);
    }

    #[must_use]
    pub fn contains(&self, col: usize) -> bool { self.stops.contains(&col) }
}
