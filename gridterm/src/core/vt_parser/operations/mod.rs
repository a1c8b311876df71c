// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Thin shim layer between sequence recognition and buffer semantics.
//!
//! Each file translates one family of sequences: it reads parameters off the
//! parser, applies defaults and 1-to-0-indexed conversion, and delegates to
//! `ScreenBuffer` methods or flips parser mode flags. Business logic and its
//! unit tests live in the buffer's `vt_ops/impl_*` files; end-to-end behavior
//! is covered by the conformance tests. The shims themselves carry no direct
//! unit tests - they are pure delegation.

// Attach.
pub mod char_ops;
pub mod control_ops;
pub mod cursor_ops;
pub mod device_ops;
pub mod line_ops;
pub mod margin_ops;
pub mod mode_ops;
pub mod osc_ops;
pub mod scroll_ops;
pub mod sgr_ops;
pub mod terminal_ops;
