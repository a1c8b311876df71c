// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Side effects a parse pass produces beyond buffer mutation.
//!
//! `process_input` mutates the screen buffer directly but must not write to
//! the PTY or talk to the host mid-parse (a synchronous write could trigger a
//! reentrant read). Instead every device response and host-visible OSC event
//! is queued on a [`VtActions`] value the session drains after the call, in
//! generation order.

use super::protocols::dsr_codes::DeviceResponse;

/// Host-visible events extracted from OSC sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OscEvent {
    /// OSC 0/1/2 - window/tab title request. The core records it; surfacing
    /// is up to the host.
    SetTitle(String),
}

/// Process-wide clipboard access for OSC 52, supplied by the host.
///
/// The parser only calls these after the configured [`Osc52Policy`] admits
/// the direction, so a host may wire the real clipboard and rely on the
/// policy gate. Never wire a clipboard before the policy is decided.
///
/// [`Osc52Policy`]: super::state::Osc52Policy
pub trait Clipboard: Send + Sync {
    /// Read the clipboard; `None` when unavailable.
    fn read_text(&self) -> Option<String>;
    /// Replace the clipboard contents.
    fn write_text(&self, text: &str);
}

/// Accumulated side effects of one `process_input` call.
#[derive(Debug, Default)]
pub struct VtActions {
    /// Complete device-response byte strings (ESC-prefixed), in the order
    /// they were generated. The session writes them to the PTY.
    pub responses: Vec<String>,
    /// OSC events for the host (titles).
    pub osc_events: Vec<OscEvent>,
}

impl VtActions {
    /// Queue a device response.
    pub fn respond(&mut self, response: DeviceResponse) {
        self.responses.push(response.to_string());
    }

    /// Queue a host-visible OSC event.
    pub fn notify(&mut self, event: OscEvent) { self.osc_events.push(event); }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.responses.is_empty() && self.osc_events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_responses_keep_generation_order() {
        let mut actions = VtActions::default();
        actions.respond(DeviceResponse::StatusOk);
        actions.respond(DeviceResponse::CursorPosition { row: 1, col: 1 });
        assert_eq!(actions.responses, vec!["\x1b[0n", "\x1b[1;1R"]);
        assert!(!actions.is_empty());
    }
}
