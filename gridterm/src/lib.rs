// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # gridterm
//!
//! A terminal emulator *model*: everything between the byte stream a child
//! shell writes to its pseudo-terminal and the grid of styled cells a
//! rasterizing front-end paints. Rendering, windowing and font concerns stay
//! outside this crate; it exposes a read-side view of the screen state and a
//! write-side channel for encoded keyboard / mouse / clipboard input.
//!
//! # Architecture Overview
//!
//! ```text
//! ╭─────────────────╮    ╭───────────────╮    ╭─────────────────╮    ╭──────────────╮
//! │ Child Process   │───▶│ PTY Master    │───▶│ VT State Machine│───▶│ ScreenBuffer │
//! │ (vim, bash...)  │    │ (byte stream) │    │ (Ground/CSI/OSC)│    │ (grid +      │
//! ╰─────────────────╯    ╰───────────────╯    ╰─────────────────╯    │  scrollback) │
//!        ▲                                            │              ╰──────────────╯
//!        │                                            │                      │
//!        │              device responses              ▼                      ▼
//!        ╰──────────────(DA/DSR/OSC 52/...)─── TerminalSession ──▶ front-end read view
//! ```
//!
//! # Core Components
//!
//! - [`core::cell`]: grid cells, SGR attributes, 256-color palette, hyperlinks
//! - [`core::screen_buffer`]: primary + alternate grid, scrollback ring,
//!   scroll regions, tab stops, OSC 133 prompt markers
//! - [`core::vt_parser`]: VT100/ANSI/xterm escape-sequence state machine
//! - [`core::pty`]: child process + pseudo-terminal I/O
//! - [`core::session`]: per-pane composition of buffer + parser + PTY, plus
//!   keyboard/mouse wire encoders
//! - [`core::selection`]: range/rectangle selection and plain/regex search
//! - [`core::pane`]: binary tree of splits
//! - [`core::tabs`]: tab registry
//!
//! All mutators of one session's (buffer, parser) pair must be serialized by
//! the caller; the PTY reader communicates through a channel that the session
//! drains on its own thread. See the [`core::session`] docs for the
//! concurrency contract.

// Attach.
pub mod core;

// Re-export.
pub use crate::core::cell::*;
pub use crate::core::config::*;
pub use crate::core::log_support::*;
pub use crate::core::pane::*;
pub use crate::core::pty::*;
pub use crate::core::screen_buffer::*;
pub use crate::core::selection::*;
pub use crate::core::session::*;
pub use crate::core::tabs::*;
pub use crate::core::vt_parser::*;
