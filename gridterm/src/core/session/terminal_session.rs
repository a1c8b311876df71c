// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Per-pane composition of screen buffer + parser + PTY.
//!
//! # Wiring
//!
//! ```text
//! PTY reader task ──channel──▶ drain_output() ──▶ VtParser ──▶ ScreenBuffer
//!                                   │
//!                                   ├─ device responses ──▶ PTY writer
//!                                   ├─ OSC titles ──▶ session title
//!                                   ├─ output seen ──▶ activity flag
//!                                   └─ Exit event ──▶ latched exit code
//! ```
//!
//! `drain_output` is the single mutator: the host calls it from one thread
//! (typically its frame loop), which serializes every parser/buffer mutation
//! and guarantees no reader ever observes a half-applied escape sequence.
//! Device responses are queued during the parse and written to the PTY only
//! after `process_input` returns, in generation order - a response can never
//! trigger a synchronous re-entrant read.
//!
//! # Resize ordering
//!
//! `resize` updates the screen buffer immediately (the next frame must draw
//! at the new size) and the PTY in the same call. Hosts that want to defer
//! the PTY side by a frame use [`resize_screen_buffer`] / [`resize_pty`]
//! with a [`ResizeCoordinator`].
//!
//! [`resize_screen_buffer`]: TerminalSession::resize_screen_buffer
//! [`resize_pty`]: TerminalSession::resize_pty
//! [`ResizeCoordinator`]: super::resize_coordinator::ResizeCoordinator

use std::sync::Arc;

use crate::core::config::SessionConfig;
use crate::core::pty::{PtyOutputEvent, PtySession};
use crate::core::screen_buffer::ScreenBuffer;
use crate::core::vt_parser::{Clipboard, Osc52Policy, OscEvent, VtParser};

/// Identifier of one terminal session within its tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(pub u32);

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "session-{}", self.0)
    }
}

/// One interactive terminal: a shell on a PTY, parsed into a screen buffer.
#[derive(Debug)]
pub struct TerminalSession {
    id: SessionId,
    buffer: ScreenBuffer,
    parser: VtParser,
    pty: PtySession,
    shell: String,
    title: String,
    /// Set whenever output arrives; tab UI uses it to flag background work.
    has_activity: bool,
    exit_code: Option<u32>,
}

impl TerminalSession {
    #[must_use]
    pub fn new(id: SessionId, config: &SessionConfig) -> Self {
        let mut parser = VtParser::new();
        parser.set_osc52_policy(config.osc52_policy);
        tracing::debug!(
            "{id} created: {}x{} shell={:?}",
            config.cols,
            config.rows,
            config.shell
        );
        Self {
            id,
            buffer: ScreenBuffer::new(config.cols, config.rows, config.scrollback_lines),
            parser,
            pty: PtySession::new(),
            shell: config.shell.clone(),
            title: shell_basename(&config.shell),
            has_activity: false,
            exit_code: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> SessionId { self.id }

    #[must_use]
    pub fn title(&self) -> &str { &self.title }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Start the shell. Returns `false` on spawn failure.
    #[allow(clippy::cast_possible_truncation)]
    pub fn start(&mut self) -> bool {
        let cols = self.buffer.cols().min(u16::MAX as usize) as u16;
        let rows = self.buffer.rows().min(u16::MAX as usize) as u16;
        let shell = self.shell.clone();
        if !self.pty.start(&shell, cols, rows) {
            tracing::error!("{}: failed to start shell {shell:?}", self.id);
            return false;
        }
        tracing::info!("{}: started shell {shell:?}", self.id);
        true
    }

    /// Stop the child process; idempotent.
    pub fn stop(&mut self) { self.pty.stop(); }

    /// Stop and join the PTY's background tasks.
    pub async fn shutdown(&mut self) { self.pty.shutdown().await; }

    #[must_use]
    pub fn is_running(&self) -> bool { self.pty.is_running() }

    /// Exit code latched from the PTY monitor, once the child has exited and
    /// its event has been drained.
    #[must_use]
    pub fn exit_code(&self) -> Option<u32> { self.exit_code }

    #[must_use]
    pub fn has_exited(&self) -> bool { self.exit_code.is_some() }

    // ========================================================================
    // Output pump (the single mutator)
    // ========================================================================

    /// Drain all pending PTY output through the parser. Returns `true` when
    /// anything was processed (i.e. a redraw may be needed).
    ///
    /// Must be called from the one thread that owns this session; this is
    /// what serializes parser/buffer access.
    pub fn drain_output(&mut self) -> bool {
        let mut processed = false;
        while let Some(event) = self.pty.try_recv_output() {
            match event {
                PtyOutputEvent::Output(bytes) => {
                    let actions = self.parser.process_input(&mut self.buffer, &bytes);
                    // Forward device responses in generation order. The PTY
                    // writer only enqueues; it cannot re-enter the parser.
                    for response in &actions.responses {
                        if !self.pty.write_input(response.as_bytes()) {
                            tracing::debug!("{}: dropped device response", self.id);
                        }
                    }
                    for event in actions.osc_events {
                        match event {
                            OscEvent::SetTitle(title) => {
                                tracing::debug!("{}: title -> {title:?}", self.id);
                                self.title = title;
                            }
                        }
                    }
                    self.has_activity = true;
                    processed = true;
                }
                PtyOutputEvent::Exit(code) => {
                    tracing::info!("{}: child exited with code {code}", self.id);
                    self.exit_code = Some(code);
                    processed = true;
                }
            }
        }
        processed
    }

    // ========================================================================
    // Input
    // ========================================================================

    /// Write encoded input bytes to the child. `false` when the pipe is
    /// closed.
    pub fn write_input(&mut self, bytes: &[u8]) -> bool {
        self.pty.write_input(bytes)
    }

    // ========================================================================
    // Resize
    // ========================================================================

    /// Resize buffer and PTY together.
    pub fn resize(&mut self, cols: usize, rows: usize) {
        self.resize_screen_buffer(cols, rows);
        self.resize_pty(cols, rows);
    }

    /// Resize only the screen buffer (immediate, so the next frame draws at
    /// the new size).
    pub fn resize_screen_buffer(&mut self, cols: usize, rows: usize) {
        self.buffer.resize(cols, rows);
    }

    /// Resize only the PTY (may be deferred a frame by the host).
    #[allow(clippy::cast_possible_truncation)]
    pub fn resize_pty(&mut self, cols: usize, rows: usize) {
        self.pty
            .resize(cols.min(u16::MAX as usize) as u16, rows.min(u16::MAX as usize) as u16);
    }

    // ========================================================================
    // Clipboard / activity / views
    // ========================================================================

    /// Forward the host clipboard to the parser for OSC 52. The policy gate
    /// stays wherever [`SessionConfig::osc52_policy`] put it.
    ///
    /// [`SessionConfig::osc52_policy`]: crate::core::config::SessionConfig
    pub fn set_clipboard(&mut self, clipboard: Arc<dyn Clipboard>) {
        self.parser.set_clipboard(clipboard);
    }

    pub fn set_osc52_policy(&mut self, policy: Osc52Policy) {
        self.parser.set_osc52_policy(policy);
    }

    #[must_use]
    pub fn has_activity(&self) -> bool { self.has_activity }

    pub fn clear_activity(&mut self) { self.has_activity = false; }

    #[must_use]
    pub fn buffer(&self) -> &ScreenBuffer { &self.buffer }

    pub fn buffer_mut(&mut self) -> &mut ScreenBuffer { &mut self.buffer }

    #[must_use]
    pub fn parser(&self) -> &VtParser { &self.parser }

    pub fn parser_mut(&mut self) -> &mut VtParser { &mut self.parser }

    /// Feed bytes directly through the parser, as if they had arrived from
    /// the PTY. Responses are forwarded to the PTY as usual. Primarily for
    /// hosts replaying recorded output and for tests.
    pub fn process_output_bytes(&mut self, bytes: &[u8]) {
        let actions = self.parser.process_input(&mut self.buffer, bytes);
        for response in &actions.responses {
            let _unused = self.pty.write_input(response.as_bytes());
        }
        for event in actions.osc_events {
            match event {
                OscEvent::SetTitle(title) => self.title = title,
            }
        }
        self.has_activity = true;
    }
}

/// Session title defaults to the shell's file name.
fn shell_basename(shell: &str) -> String {
    let program = shell.split_whitespace().next().unwrap_or(shell);
    program
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(program)
        .to_string()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn test_config() -> SessionConfig {
        SessionConfig {
            cols: 20,
            rows: 5,
            scrollback_lines: 50,
            ..SessionConfig::default()
        }
    }

    #[test]
    fn test_title_defaults_to_shell_basename() {
        let config = SessionConfig {
            shell: "/usr/bin/fish --login".into(),
            ..test_config()
        };
        let session = TerminalSession::new(SessionId(1), &config);
        assert_eq!(session.title(), "fish");
    }

    #[test]
    fn test_process_output_updates_buffer_and_activity() {
        let mut session = TerminalSession::new(SessionId(1), &test_config());
        assert!(!session.has_activity());
        session.process_output_bytes(b"Hi\r\n");
        assert!(session.has_activity());
        assert_eq!(session.buffer().cell(0, 0).ch, 'H');
        assert_eq!(session.buffer().cursor(), (0, 1));

        session.clear_activity();
        assert!(!session.has_activity());
    }

    #[test]
    fn test_osc_title_is_surfaced() {
        let mut session = TerminalSession::new(SessionId(1), &test_config());
        session.process_output_bytes(b"\x1b]0;build: running\x07");
        assert_eq!(session.title(), "build: running");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_shell_round_trip() {
        let config = SessionConfig {
            shell: "cat".into(),
            ..test_config()
        };
        let mut session = TerminalSession::new(SessionId(7), &config);
        assert!(session.start());
        assert!(session.write_input(b"marker\n"));
        assert!(session.write_input(&[0x04])); // EOT: cat exits

        let deadline = tokio::time::Instant::now() + tokio::time::Duration::from_secs(5);
        while !session.has_exited() && tokio::time::Instant::now() < deadline {
            session.drain_output();
            tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;
        }

        let row: String = (0..session.buffer().cols())
            .map(|x| session.buffer().cell(x, 0).ch)
            .collect();
        assert!(row.contains("marker"), "row 0 was {row:?}");
        assert!(session.has_exited());
        session.shutdown().await;
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_device_response_round_trip() {
        // Inject a DSR query as if the child had sent it. The parser queues
        // `ESC[1;1R`, the session writes it to the PTY, and `cat` echoes it
        // back - so output must arrive even though we typed nothing.
        let config = SessionConfig {
            shell: "cat".into(),
            ..test_config()
        };
        let mut session = TerminalSession::new(SessionId(8), &config);
        assert!(session.start());
        session.process_output_bytes(b"\x1b[6n");
        session.clear_activity();

        let deadline = tokio::time::Instant::now() + tokio::time::Duration::from_secs(5);
        while !session.has_activity() && tokio::time::Instant::now() < deadline {
            session.drain_output();
            tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;
        }
        assert!(
            session.has_activity(),
            "echoed DSR response never came back through the PTY"
        );
        session.stop();
        session.shutdown().await;
    }
}
