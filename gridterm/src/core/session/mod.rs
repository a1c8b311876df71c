// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Session glue: one pane's screen buffer + parser + PTY, the write-side
//! input encoders, and resize coordination.

// Attach.
pub mod input_encoder;
pub mod resize_coordinator;
pub mod terminal_session;

// Re-export.
pub use input_encoder::*;
pub use resize_coordinator::*;
pub use terminal_session::*;
