// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Logging bootstrap.
//!
//! The core logs through `tracing` and never installs a subscriber on its
//! own - logging is an injected, process-wide concern. Hosts that don't have
//! their own subscriber can call [`try_initialize_logging`] once at startup;
//! repeated calls (or calls after the host installed a subscriber) are
//! harmless no-ops.

use tracing_subscriber::EnvFilter;

/// Install a stderr `fmt` subscriber filtered by `RUST_LOG` (default:
/// `warn`, `gridterm=info`). Returns `false` when a global subscriber is
/// already set.
pub fn try_initialize_logging() -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,gridterm=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
