// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Tab registry: the ordered tab list and the active-tab cursor.
//!
//! Closing rules: closing the active tab (or
//! one before it) pulls the active index back one, clamped into range;
//! closing the last remaining tab signals the host to exit. Switching to a
//! tab clears its aggregated activity indicator.

use crate::core::config::SessionConfig;
use crate::core::tabs::tab::{Tab, TabId};

/// Outcome of [`TabRegistry::close_tab`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabCloseOutcome {
    /// Tab closed; others remain.
    Closed,
    /// The last tab closed - the application should exit.
    ClosedLast,
    NotFound,
}

/// Ordered set of tabs with monotonic ids.
#[derive(Debug, Default)]
pub struct TabRegistry {
    tabs: Vec<Tab>,
    active_index: Option<usize>,
    next_tab_id: u32,
}

impl TabRegistry {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    // ========================================================================
    // Create / close / switch
    // ========================================================================

    /// Create a tab with one started session. Returns `None` (and creates
    /// nothing) when the shell fails to start.
    pub fn create_tab(&mut self, config: &SessionConfig) -> Option<TabId> {
        let tab_id = TabId(self.next_tab_id);
        self.next_tab_id += 1;

        let mut tab = Tab::new(tab_id);
        tab.create_session(config)?;
        self.tabs.push(tab);
        if self.active_index.is_none() {
            self.active_index = Some(0);
        }
        tracing::info!("created tab {} (total {})", tab_id.0, self.tabs.len());
        Some(tab_id)
    }

    /// Stop and remove a tab, adjusting the active index.
    pub fn close_tab(&mut self, id: TabId) -> TabCloseOutcome {
        let Some(closed_index) = self.tabs.iter().position(|t| t.id() == id) else {
            tracing::warn!("close_tab: tab {} not found", id.0);
            return TabCloseOutcome::NotFound;
        };

        self.tabs[closed_index].stop_all();
        self.tabs.remove(closed_index);
        tracing::info!("closed tab {} (remaining {})", id.0, self.tabs.len());

        if self.tabs.is_empty() {
            self.active_index = None;
            return TabCloseOutcome::ClosedLast;
        }

        if let Some(active) = self.active_index {
            let new_active = if closed_index <= active {
                active.saturating_sub(1)
            } else {
                active
            };
            self.active_index = Some(new_active.min(self.tabs.len() - 1));
        }
        TabCloseOutcome::Closed
    }

    /// Close whichever tab is active.
    pub fn close_active_tab(&mut self) -> TabCloseOutcome {
        match self.active_tab().map(Tab::id) {
            Some(id) => self.close_tab(id),
            None => TabCloseOutcome::NotFound,
        }
    }

    /// Make `id` active, clearing its activity indicator. Returns `false`
    /// when the tab does not exist.
    pub fn switch_to(&mut self, id: TabId) -> bool {
        let Some(index) = self.tabs.iter().position(|t| t.id() == id) else {
            tracing::warn!("switch_to: tab {} not found", id.0);
            return false;
        };
        if self.active_index != Some(index) {
            self.active_index = Some(index);
            self.tabs[index].clear_activity();
            tracing::debug!("switched to tab {}", id.0);
        }
        true
    }

    /// Cycle to the next tab, wrapping.
    pub fn next_tab(&mut self) {
        if self.tabs.len() <= 1 {
            return;
        }
        if let Some(active) = self.active_index {
            let next = (active + 1) % self.tabs.len();
            let id = self.tabs[next].id();
            self.switch_to(id);
        }
    }

    /// Cycle to the previous tab, wrapping.
    pub fn previous_tab(&mut self) {
        if self.tabs.len() <= 1 {
            return;
        }
        if let Some(active) = self.active_index {
            let previous = (active + self.tabs.len() - 1) % self.tabs.len();
            let id = self.tabs[previous].id();
            self.switch_to(id);
        }
    }

    // ========================================================================
    // Access
    // ========================================================================

    #[must_use]
    pub fn active_tab(&self) -> Option<&Tab> {
        self.active_index.map(|i| &self.tabs[i])
    }

    pub fn active_tab_mut(&mut self) -> Option<&mut Tab> {
        self.active_index.map(|i| &mut self.tabs[i])
    }

    #[must_use]
    pub fn tab(&self, id: TabId) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id() == id)
    }

    pub fn tab_mut(&mut self, id: TabId) -> Option<&mut Tab> {
        self.tabs.iter_mut().find(|t| t.id() == id)
    }

    #[must_use]
    pub fn tabs(&self) -> &[Tab] { &self.tabs }

    #[must_use]
    pub fn len(&self) -> usize { self.tabs.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.tabs.is_empty() }

    /// Drain PTY output for every session in every tab (background tabs
    /// keep accumulating activity).
    pub fn drain_all(&mut self) -> bool {
        let mut processed = false;
        for tab in &mut self.tabs {
            processed |= tab.drain_all();
        }
        processed
    }
}

#[cfg(all(test, unix))]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn cat_config() -> SessionConfig {
        SessionConfig {
            cols: 20,
            rows: 5,
            scrollback_lines: 10,
            shell: "cat".into(),
            ..SessionConfig::default()
        }
    }

    fn registry_with_tabs(n: usize) -> (TabRegistry, Vec<TabId>) {
        let mut registry = TabRegistry::new();
        let ids = (0..n)
            .map(|_| registry.create_tab(&cat_config()).expect("cat starts"))
            .collect();
        (registry, ids)
    }

    #[tokio::test]
    async fn test_create_makes_first_tab_active() {
        let (mut registry, ids) = registry_with_tabs(2);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.active_tab().unwrap().id(), ids[0]);
        registry.close_tab(ids[0]);
        registry.close_tab(ids[1]);
    }

    #[tokio::test]
    async fn test_switch_clears_activity() {
        let (mut registry, ids) = registry_with_tabs(2);
        {
            let tab = registry.tab_mut(ids[1]).unwrap();
            let sid = tab.sessions()[0].id();
            tab.session_mut(sid).unwrap().process_output_bytes(b"bg work");
        }
        assert!(registry.tab(ids[1]).unwrap().has_activity());
        assert!(registry.switch_to(ids[1]));
        assert!(!registry.tab(ids[1]).unwrap().has_activity());

        registry.close_tab(ids[0]);
        registry.close_tab(ids[1]);
    }

    #[tokio::test]
    async fn test_next_previous_wrap() {
        let (mut registry, ids) = registry_with_tabs(3);
        assert_eq!(registry.active_tab().unwrap().id(), ids[0]);
        registry.next_tab();
        assert_eq!(registry.active_tab().unwrap().id(), ids[1]);
        registry.previous_tab();
        registry.previous_tab();
        assert_eq!(registry.active_tab().unwrap().id(), ids[2], "wraps");
        for id in ids {
            registry.close_tab(id);
        }
    }

    #[tokio::test]
    async fn test_close_adjusts_active_index() {
        let (mut registry, ids) = registry_with_tabs(3);
        registry.switch_to(ids[2]);

        // Closing a tab before the active one pulls the index back.
        assert_eq!(registry.close_tab(ids[0]), TabCloseOutcome::Closed);
        assert_eq!(registry.active_tab().unwrap().id(), ids[2]);

        // Closing the active tab falls back to its predecessor.
        assert_eq!(registry.close_tab(ids[2]), TabCloseOutcome::Closed);
        assert_eq!(registry.active_tab().unwrap().id(), ids[1]);

        assert_eq!(registry.close_tab(ids[1]), TabCloseOutcome::ClosedLast);
        assert!(registry.is_empty());
        assert!(registry.active_tab().is_none());
    }

    #[tokio::test]
    async fn test_close_unknown_tab() {
        let (mut registry, ids) = registry_with_tabs(1);
        assert_eq!(registry.close_tab(TabId(99)), TabCloseOutcome::NotFound);
        registry.close_tab(ids[0]);
    }
}
