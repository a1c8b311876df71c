// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Core type aliases, constants, and events for PTY operations.

use portable_pty::{MasterPty, SlavePty};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

/// Buffer size for reading PTY output (4KB stack allocation).
pub const READ_BUFFER_SIZE: usize = 4096;

/// Type alias for the controller half of a PTY (master).
///
/// The parent process reads child output from and writes input to this half.
pub type Controller = Box<dyn MasterPty + Send>;

/// Type alias for the controlled half of a PTY (slave).
///
/// The child process uses this half for stdin/stdout/stderr.
pub type Controlled = Box<dyn SlavePty + Send>;

/// Type alias for a spawned child process in a PTY.
pub type ControlledChild = Box<dyn portable_pty::Child + Send + Sync>;

/// Events posted by the PTY's background tasks.
///
/// Consumers drain these on their own thread; the reader and monitor tasks
/// never touch parser or buffer state directly.
#[derive(Debug)]
pub enum PtyOutputEvent {
    /// A chunk of child output, in arbitrary read-sized pieces.
    Output(Vec<u8>),
    /// The child exited with the given status code.
    Exit(u32),
}

/// Sender half for PTY output events.
pub type OutputEventSender = UnboundedSender<PtyOutputEvent>;

/// Receiver half for PTY output events.
pub type OutputEventReceiver = UnboundedReceiver<PtyOutputEvent>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_buffer_size_constant() {
        assert_eq!(READ_BUFFER_SIZE, 4096);
    }

    /// Compile-time validation that the PTY type aliases are correctly
    /// defined and usable as function parameters.
    #[test]
    fn validate_pty_type_aliases_compile() {
        #[allow(dead_code)]
        fn check_controller(_: Controller) {}
        #[allow(dead_code)]
        fn check_controlled(_: Controlled) {}
        #[allow(dead_code)]
        fn check_controlled_child(_: ControlledChild) {}
    }
}
