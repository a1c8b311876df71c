// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Protocol constants and outgoing sequence builders.
//!
//! Three families mirror the three sequence categories the parser consumes:
//! [`csi_codes`] (final bytes and SGR parameter values), [`esc_codes`]
//! (single-selector escapes), and [`osc_codes`] (OSC numeric types). The
//! fourth module, [`dsr_codes`], is the outgoing direction: every device
//! response the terminal can send back to the application, as a typed builder
//! instead of hand-assembled escape strings.

// Attach.
pub mod csi_codes;
pub mod dsr_codes;
pub mod esc_codes;
pub mod osc_codes;

// Re-export.
pub use dsr_codes::*;
