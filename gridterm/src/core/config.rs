// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Host-delivered session configuration.
//!
//! The core owns no configuration file format; profiles live with the host,
//! which hands each new session a [`SessionConfig`] as a structured value
//! (the serde derives exist so hosts can persist these however they like).

use serde::{Deserialize, Serialize};

use super::screen_buffer::DEFAULT_SCROLLBACK_LINES;
use super::vt_parser::Osc52Policy;

/// Settings for one terminal session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Initial grid width.
    pub cols: usize,
    /// Initial grid height.
    pub rows: usize,
    /// Scrollback ring capacity (primary buffer only).
    pub scrollback_lines: usize,
    /// OSC 52 clipboard policy. Stays `Disabled` unless the host opts in.
    pub osc52_policy: Osc52Policy,
    /// Shell command line to spawn (whitespace-split).
    pub shell: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cols: 80,
            rows: 24,
            scrollback_lines: DEFAULT_SCROLLBACK_LINES,
            osc52_policy: Osc52Policy::default(),
            shell: default_shell(),
        }
    }
}

/// Platform default shell, overridable via `$SHELL`.
#[must_use]
pub fn default_shell() -> String {
    if cfg!(windows) {
        "powershell.exe".to_string()
    } else {
        std::env::var("SHELL").unwrap_or_else(|_| "/bin/sh".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.cols, 80);
        assert_eq!(config.rows, 24);
        assert_eq!(config.scrollback_lines, DEFAULT_SCROLLBACK_LINES);
        assert_eq!(config.osc52_policy, Osc52Policy::Disabled);
        assert!(!config.shell.is_empty());
    }

    #[test]
    fn test_round_trips_through_json() {
        let config = SessionConfig {
            cols: 120,
            rows: 40,
            scrollback_lines: 500,
            osc52_policy: Osc52Policy::ReadWrite,
            shell: "/bin/zsh".into(),
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: SessionConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.cols, 120);
        assert_eq!(back.osc52_policy, Osc52Policy::ReadWrite);
        assert_eq!(back.shell, "/bin/zsh");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let back: SessionConfig = serde_json::from_str(r#"{"cols": 132}"#).unwrap();
        assert_eq!(back.cols, 132);
        assert_eq!(back.rows, 24);
        assert_eq!(back.osc52_policy, Osc52Policy::Disabled);
    }
}
