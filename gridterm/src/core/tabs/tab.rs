// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! One tab: a set of sessions arranged by a [`PaneManager`].

use crate::core::config::SessionConfig;
use crate::core::pane::{PaneManager, SplitDirection};
use crate::core::session::{SessionId, TerminalSession};

/// Identifier of a tab within the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TabId(pub u32);

/// A tab owns its sessions and their pane arrangement.
#[derive(Debug)]
pub struct Tab {
    id: TabId,
    title: String,
    sessions: Vec<TerminalSession>,
    pane_manager: PaneManager,
    next_session_id: u32,
}

impl Tab {
    #[must_use]
    pub fn new(id: TabId) -> Self {
        tracing::debug!("tab {} created", id.0);
        Self {
            id,
            title: format!("Tab {}", id.0),
            sessions: Vec::new(),
            pane_manager: PaneManager::new(),
            next_session_id: 0,
        }
    }

    #[must_use]
    pub fn id(&self) -> TabId { self.id }

    #[must_use]
    pub fn title(&self) -> &str { &self.title }

    pub fn set_title(&mut self, title: impl Into<String>) { self.title = title.into(); }

    // ========================================================================
    // Sessions
    // ========================================================================

    /// Create and start a session. The first session initializes the pane
    /// tree and donates its title to the tab. Returns `None` when the shell
    /// fails to start.
    pub fn create_session(&mut self, config: &SessionConfig) -> Option<SessionId> {
        let session_id = SessionId(self.next_session_id);
        self.next_session_id += 1;

        let mut session = TerminalSession::new(session_id, config);
        if !session.start() {
            tracing::error!("tab {}: failed to start session {session_id}", self.id.0);
            return None;
        }

        if self.sessions.is_empty() {
            self.title = session.title().to_string();
            self.pane_manager.initialize(session_id);
        }
        self.sessions.push(session);
        tracing::info!("tab {}: created {session_id}", self.id.0);
        Some(session_id)
    }

    /// Split the focused pane with a freshly started session.
    pub fn split(&mut self, direction: SplitDirection, config: &SessionConfig) -> Option<SessionId> {
        if self.sessions.is_empty() {
            return self.create_session(config);
        }
        let session_id = self.create_session(config)?;
        if !self.pane_manager.split_focused(direction, session_id) {
            // No focused pane to split; drop the orphaned session.
            self.remove_session(session_id);
            return None;
        }
        Some(session_id)
    }

    /// Close the focused pane and stop its session. Returns the closed
    /// session id; the tab is empty (and should be closed) when no sessions
    /// remain.
    pub fn close_focused_pane(&mut self) -> Option<SessionId> {
        let closed = self.pane_manager.close_focused()?;
        self.remove_session(closed);
        Some(closed)
    }

    fn remove_session(&mut self, id: SessionId) {
        if let Some(index) = self.sessions.iter().position(|s| s.id() == id) {
            let mut session = self.sessions.remove(index);
            session.stop();
        }
    }

    #[must_use]
    pub fn session(&self, id: SessionId) -> Option<&TerminalSession> {
        self.sessions.iter().find(|s| s.id() == id)
    }

    pub fn session_mut(&mut self, id: SessionId) -> Option<&mut TerminalSession> {
        self.sessions.iter_mut().find(|s| s.id() == id)
    }

    #[must_use]
    pub fn sessions(&self) -> &[TerminalSession] { &self.sessions }

    pub fn sessions_mut(&mut self) -> &mut [TerminalSession] { &mut self.sessions }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.sessions.is_empty() }

    /// The session owning the focused pane.
    pub fn focused_session_mut(&mut self) -> Option<&mut TerminalSession> {
        let focused = self.pane_manager.focused_session()?;
        self.session_mut(focused)
    }

    // ========================================================================
    // Panes
    // ========================================================================

    #[must_use]
    pub fn pane_manager(&self) -> &PaneManager { &self.pane_manager }

    pub fn pane_manager_mut(&mut self) -> &mut PaneManager { &mut self.pane_manager }

    // ========================================================================
    // Output pump & activity
    // ========================================================================

    /// Drain PTY output for every session. Returns `true` when anything was
    /// processed.
    pub fn drain_all(&mut self) -> bool {
        let mut processed = false;
        for session in &mut self.sessions {
            processed |= session.drain_output();
        }
        processed
    }

    /// Activity aggregated over the tab's sessions.
    #[must_use]
    pub fn has_activity(&self) -> bool {
        self.sessions.iter().any(TerminalSession::has_activity)
    }

    pub fn clear_activity(&mut self) {
        for session in &mut self.sessions {
            session.clear_activity();
        }
    }

    /// Stop every session (tab close).
    pub fn stop_all(&mut self) {
        for session in &mut self.sessions {
            session.stop();
        }
    }
}
