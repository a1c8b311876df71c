// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! VT100/ANSI/xterm conformance tests.
//!
//! These exercise the complete pipeline - raw bytes through
//! [`VtParser::process_input`] into the screen buffer - rather than any one
//! layer, using the same public surface a session uses. Organized by
//! operation family, mirroring the `operations/` shims.
//!
//! [`VtParser::process_input`]: crate::VtParser::process_input

// Attach.
pub mod test_fixtures_vt_parser;
pub mod tests;
