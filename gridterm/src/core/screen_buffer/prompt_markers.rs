// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! OSC 133 shell-integration markers.
//!
//! Shells with semantic-prompt integration emit `OSC 133 ; A` at each prompt
//! start and `OSC 133 ; D ; exit` when a command finishes. The buffer records
//! prompt positions as *absolute* lines (scrollback rows consumed so far plus
//! the cursor row) so the markers stay valid as content scrolls off screen,
//! enabling jump-to-previous/next-prompt navigation in the front-end.

/// Which semantic zone the cursor is currently writing into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SemanticZone {
    #[default]
    None,
    /// Between OSC 133;A and 133;B - the shell is printing its prompt.
    Prompt,
    /// Between OSC 133;B and 133;C - the user is typing.
    Input,
    /// Between OSC 133;C and 133;D - command output.
    Output,
}

/// One recorded prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptMarker {
    /// Absolute line (scrollback rows consumed + cursor row at mark time).
    pub absolute_line: usize,
    /// Exit code from the matching OSC 133;D, once seen.
    pub exit_code: Option<i32>,
}

/// Ordered list of prompt markers, oldest first.
#[derive(Debug, Default)]
pub struct PromptMarkers {
    markers: Vec<PromptMarker>,
    zone: SemanticZone,
}

impl PromptMarkers {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// OSC 133;A - record a prompt at `absolute_line`.
    pub fn mark_prompt_start(&mut self, absolute_line: usize) {
        self.zone = SemanticZone::Prompt;
        self.markers.push(PromptMarker {
            absolute_line,
            exit_code: None,
        });
    }

    /// OSC 133;B - user input begins.
    pub fn mark_input_start(&mut self) { self.zone = SemanticZone::Input; }

    /// OSC 133;C - command output begins.
    pub fn mark_command_start(&mut self) { self.zone = SemanticZone::Output; }

    /// OSC 133;D - command finished; annotate the most recent prompt.
    pub fn mark_command_end(&mut self, exit_code: Option<i32>) {
        self.zone = SemanticZone::None;
        if let Some(last) = self.markers.last_mut() {
            last.exit_code = exit_code;
        }
    }

    /// Greatest marker line strictly less than `from`.
    #[must_use]
    pub fn previous_prompt_line(&self, from: usize) -> Option<usize> {
        self.markers
            .iter()
            .rev()
            .find(|marker| marker.absolute_line < from)
            .map(|marker| marker.absolute_line)
    }

    /// Smallest marker line strictly greater than `from`.
    #[must_use]
    pub fn next_prompt_line(&self, from: usize) -> Option<usize> {
        self.markers
            .iter()
            .find(|marker| marker.absolute_line > from)
            .map(|marker| marker.absolute_line)
    }

    #[must_use]
    pub fn zone(&self) -> SemanticZone { self.zone }

    #[must_use]
    pub fn markers(&self) -> &[PromptMarker] { &self.markers }

    pub fn clear(&mut self) {
        self.markers.clear();
        self.zone = SemanticZone::None;
    }
}
