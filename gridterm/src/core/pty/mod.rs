// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! PTY support: a child process bridged to the terminal model through a
//! pseudo-terminal pair and two background tasks (reader + exit monitor).

// Attach.
pub mod pty_session;
pub mod pty_types;

// Re-export.
pub use pty_session::*;
pub use pty_types::*;
