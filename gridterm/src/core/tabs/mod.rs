// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Tabs: each owns a pane tree and its sessions; the registry owns the tabs.

// Attach.
pub mod registry;
pub mod tab;

// Re-export.
pub use registry::*;
pub use tab::*;
