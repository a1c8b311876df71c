// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Pane management for one tab: the tree plus focus, zoom, and divider-drag
//! state.
//!
//! Focus navigation is circular over the leaf order. (Deliberate for now;
//! geometric navigation would need the layout rects and is noted as future
//! work in `DESIGN.md`.)

use super::pane_tree::{
    DIVIDER_SIZE, DividerHit, PaneNode, PaneRect, SplitDirection,
};
use crate::core::session::SessionId;

/// An in-progress divider drag.
#[derive(Debug, Clone, Copy)]
struct DividerDrag {
    split_index: usize,
    direction: SplitDirection,
    /// Mouse position along the drag axis when the drag started.
    start_pos: i32,
    start_ratio: f32,
    /// Resizable span of the split (bounds minus the divider itself).
    span: i32,
}

/// Pane tree + focus + zoom + divider-resize state for one tab.
#[derive(Debug, Default)]
pub struct PaneManager {
    root: Option<PaneNode>,
    focused: Option<SessionId>,
    zoomed: bool,
    drag: Option<DividerDrag>,
    last_layout: PaneRect,
}

impl PaneManager {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Install the root pane for the tab's first session.
    pub fn initialize(&mut self, session: SessionId) {
        self.root = Some(PaneNode::leaf(session));
        self.focused = Some(session);
        self.zoomed = false;
    }

    #[must_use]
    pub fn root(&self) -> Option<&PaneNode> { self.root.as_ref() }

    #[must_use]
    pub fn focused_session(&self) -> Option<SessionId> { self.focused }

    pub fn set_focus(&mut self, session: SessionId) {
        if self.leaf_sessions().contains(&session) {
            self.focused = Some(session);
        }
    }

    #[must_use]
    pub fn leaf_sessions(&self) -> Vec<SessionId> {
        let mut leaves = Vec::new();
        if let Some(root) = &self.root {
            root.leaf_sessions(&mut leaves);
        }
        leaves
    }

    #[must_use]
    pub fn has_multiple_panes(&self) -> bool { self.leaf_sessions().len() > 1 }

    // ========================================================================
    // Structure
    // ========================================================================

    /// Split the focused pane; the new session takes the second slot and the
    /// focus.
    pub fn split_focused(&mut self, direction: SplitDirection, new_session: SessionId) -> bool {
        let Some(focused) = self.focused else {
            return false;
        };
        let Some(root) = self.root.as_mut() else {
            return false;
        };
        if root.split_leaf(focused, direction, new_session) {
            self.focused = Some(new_session);
            self.relayout();
            true
        } else {
            false
        }
    }

    /// Close the focused pane, collapsing its parent split. Returns the
    /// closed session id; focus moves to the first remaining leaf. Closing
    /// the last pane clears the tree.
    pub fn close_focused(&mut self) -> Option<SessionId> {
        let focused = self.focused?;
        let root = self.root.as_mut()?;

        if root.session_id() == Some(focused) {
            // Root is the last leaf.
            self.root = None;
            self.focused = None;
            self.zoomed = false;
            return Some(focused);
        }

        if !root.close_leaf(focused) {
            return None;
        }
        self.focused = self.leaf_sessions().first().copied();
        self.zoomed = false;
        self.relayout();
        Some(focused)
    }

    // ========================================================================
    // Focus navigation (circular over leaf order)
    // ========================================================================

    pub fn focus_next(&mut self) { self.focus_step(1); }

    pub fn focus_previous(&mut self) { self.focus_step(-1); }

    fn focus_step(&mut self, step: isize) {
        let leaves = self.leaf_sessions();
        if leaves.len() <= 1 {
            return;
        }
        let Some(focused) = self.focused else {
            self.focused = leaves.first().copied();
            return;
        };
        let Some(index) = leaves.iter().position(|&s| s == focused) else {
            self.focused = leaves.first().copied();
            return;
        };
        let len = leaves.len() as isize;
        let next = (index as isize + step).rem_euclid(len) as usize;
        self.focused = Some(leaves[next]);
    }

    // ========================================================================
    // Layout & hit testing
    // ========================================================================

    /// Recompute pane bounds for the given window area. When zoomed, the
    /// focused pane takes the whole area after the normal layout pass.
    pub fn update_layout(&mut self, width: i32, height: i32, tab_bar_height: i32) {
        self.last_layout = PaneRect::new(0, tab_bar_height, width, height - tab_bar_height);
        self.relayout();
    }

    fn relayout(&mut self) {
        let area = self.last_layout;
        if area.width <= 0 || area.height <= 0 {
            return;
        }
        if let Some(root) = self.root.as_mut() {
            root.layout(area);
            if self.zoomed
                && let Some(focused) = self.focused
            {
                root.set_leaf_bounds(focused, area);
            }
        }
    }

    #[must_use]
    pub fn find_pane_at(&self, x: i32, y: i32) -> Option<SessionId> {
        if self.zoomed {
            // Only the focused pane is visible while zoomed.
            return self.focused;
        }
        self.root.as_ref()?.find_pane_at(x, y)
    }

    #[must_use]
    pub fn pane_bounds(&self, session: SessionId) -> Option<PaneRect> {
        self.root.as_ref()?.leaf_bounds(session)
    }

    // ========================================================================
    // Zoom
    // ========================================================================

    /// Toggle zoom on the focused pane. Only meaningful with multiple panes.
    pub fn toggle_zoom(&mut self) {
        if !self.has_multiple_panes() {
            self.zoomed = false;
            return;
        }
        self.zoomed = !self.zoomed;
        self.relayout();
        tracing::debug!("pane zoom {}", if self.zoomed { "on" } else { "off" });
    }

    #[must_use]
    pub fn is_zoomed(&self) -> bool { self.zoomed }

    // ========================================================================
    // Divider resize
    // ========================================================================

    #[must_use]
    pub fn find_divider_at(&self, x: i32, y: i32) -> Option<DividerHit> {
        if self.zoomed {
            return None;
        }
        self.root.as_ref()?.find_divider_at(x, y)
    }

    /// Begin dragging the divider under (x, y). Returns `false` when there
    /// is none.
    pub fn start_divider_resize(&mut self, x: i32, y: i32) -> bool {
        let Some(hit) = self.find_divider_at(x, y) else {
            return false;
        };
        let (start_pos, span) = match hit.direction {
            SplitDirection::Horizontal => (x, hit.bounds.width - DIVIDER_SIZE),
            SplitDirection::Vertical => (y, hit.bounds.height - DIVIDER_SIZE),
        };
        if span <= 0 {
            return false;
        }
        self.drag = Some(DividerDrag {
            split_index: hit.split_index,
            direction: hit.direction,
            start_pos,
            start_ratio: hit.ratio,
            span,
        });
        true
    }

    /// Update the drag with the current mouse position along the drag axis
    /// (x for horizontal splits, y for vertical).
    pub fn update_divider_resize(&mut self, pos: i32) {
        let Some(drag) = self.drag else { return };
        #[allow(clippy::cast_precision_loss)]
        let delta = (pos - drag.start_pos) as f32 / drag.span as f32;
        if let Some(root) = self.root.as_mut()
            && root.set_split_ratio(drag.split_index, drag.start_ratio + delta)
        {
            self.relayout();
        }
    }

    pub fn end_divider_resize(&mut self) { self.drag = None; }

    #[must_use]
    pub fn is_resizing_divider(&self) -> bool { self.drag.is_some() }

    #[must_use]
    pub fn resize_direction(&self) -> Option<SplitDirection> {
        self.drag.map(|d| d.direction)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sid(n: u32) -> SessionId { SessionId(n) }

    fn manager_with_three_panes() -> PaneManager {
        let mut manager = PaneManager::new();
        manager.initialize(sid(1));
        manager.update_layout(104, 104, 0);
        manager.split_focused(SplitDirection::Horizontal, sid(2));
        manager.set_focus(sid(1));
        manager.split_focused(SplitDirection::Vertical, sid(3));
        manager
    }

    #[test]
    fn test_split_moves_focus_to_new_pane() {
        let mut manager = PaneManager::new();
        manager.initialize(sid(1));
        manager.update_layout(104, 50, 0);
        assert!(manager.split_focused(SplitDirection::Horizontal, sid(2)));
        assert_eq!(manager.focused_session(), Some(sid(2)));
        assert_eq!(manager.leaf_sessions(), vec![sid(1), sid(2)]);
    }

    #[test]
    fn test_circular_focus_navigation() {
        let mut manager = manager_with_three_panes();
        manager.set_focus(sid(1));
        manager.focus_next();
        assert_eq!(manager.focused_session(), Some(sid(3)));
        manager.focus_next();
        assert_eq!(manager.focused_session(), Some(sid(2)));
        manager.focus_next();
        assert_eq!(manager.focused_session(), Some(sid(1)), "wraps");
        manager.focus_previous();
        assert_eq!(manager.focused_session(), Some(sid(2)), "wraps backward");
    }

    #[test]
    fn test_close_focused_collapses_and_refocuses() {
        let mut manager = manager_with_three_panes();
        manager.set_focus(sid(3));
        assert_eq!(manager.close_focused(), Some(sid(3)));
        assert_eq!(manager.leaf_sessions(), vec![sid(1), sid(2)]);
        assert!(manager.focused_session().is_some());
    }

    #[test]
    fn test_close_last_pane_clears_tree() {
        let mut manager = PaneManager::new();
        manager.initialize(sid(1));
        assert_eq!(manager.close_focused(), Some(sid(1)));
        assert!(manager.root().is_none());
        assert_eq!(manager.focused_session(), None);
        assert_eq!(manager.close_focused(), None);
    }

    #[test]
    fn test_find_pane_at_uses_layout() {
        let mut manager = PaneManager::new();
        manager.initialize(sid(1));
        manager.update_layout(104, 50, 0);
        manager.split_focused(SplitDirection::Horizontal, sid(2));

        assert_eq!(manager.find_pane_at(5, 5), Some(sid(1)));
        assert_eq!(manager.find_pane_at(100, 5), Some(sid(2)));
    }

    #[test]
    fn test_tab_bar_offset_applies() {
        let mut manager = PaneManager::new();
        manager.initialize(sid(1));
        manager.update_layout(100, 100, 20);
        assert_eq!(
            manager.pane_bounds(sid(1)),
            Some(PaneRect::new(0, 20, 100, 80))
        );
    }

    #[test]
    fn test_zoom_gives_focused_pane_full_area() {
        let mut manager = PaneManager::new();
        manager.initialize(sid(1));
        manager.update_layout(104, 50, 0);
        manager.split_focused(SplitDirection::Horizontal, sid(2));

        manager.toggle_zoom();
        assert!(manager.is_zoomed());
        assert_eq!(
            manager.pane_bounds(sid(2)),
            Some(PaneRect::new(0, 0, 104, 50))
        );
        assert_eq!(manager.find_pane_at(5, 5), Some(sid(2)));

        manager.toggle_zoom();
        assert!(!manager.is_zoomed());
        assert_eq!(manager.find_pane_at(5, 5), Some(sid(1)));
    }

    #[test]
    fn test_zoom_requires_multiple_panes() {
        let mut manager = PaneManager::new();
        manager.initialize(sid(1));
        manager.toggle_zoom();
        assert!(!manager.is_zoomed());
    }

    #[test]
    fn test_divider_drag_updates_ratio() {
        let mut manager = PaneManager::new();
        manager.initialize(sid(1));
        manager.update_layout(104, 50, 0);
        manager.split_focused(SplitDirection::Horizontal, sid(2));

        // Divider sits at x=50..54.
        assert!(manager.start_divider_resize(51, 25));
        assert!(manager.is_resizing_divider());
        assert_eq!(manager.resize_direction(), Some(SplitDirection::Horizontal));

        manager.update_divider_resize(71); // +20 of a 100 span -> ratio 0.7
        manager.end_divider_resize();
        assert!(!manager.is_resizing_divider());

        let first = manager.pane_bounds(sid(1)).unwrap();
        assert_eq!(first.width, 70);
    }

    #[test]
    fn test_divider_drag_outside_divider_fails() {
        let mut manager = PaneManager::new();
        manager.initialize(sid(1));
        manager.update_layout(104, 50, 0);
        manager.split_focused(SplitDirection::Horizontal, sid(2));
        assert!(!manager.start_divider_resize(5, 5));
    }
}
