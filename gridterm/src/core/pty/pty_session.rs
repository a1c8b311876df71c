// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! One child process wired to a pseudo-terminal.
//!
//! # Task layout
//!
//! ```text
//! start()
//!   ├─ opens the PTY pair, spawns the child on the controlled half
//!   ├─ reader task (blocking): controller reads ──▶ PtyOutputEvent::Output
//!   └─ monitor task (blocking): child.wait() ──▶ PtyOutputEvent::Exit
//!
//! write_input() ──▶ controller writer (keyboard/mouse/device responses)
//! resize()      ──▶ controller.resize(PtySize)
//! stop()        ──▶ kill child, drop controller+writer (reader unblocks), idempotent
//! ```
//!
//! The reader posts raw chunks to an unbounded channel; it never touches the
//! parser. The consumer (the terminal session) drains the channel on its own
//! single mutator thread, which is what keeps parser/buffer access
//! serialized. Bytes from one PTY are delivered in read order.
//!
//! # Failure semantics
//!
//! `start` returns `false` on any setup failure, with no side effects beyond
//! a log line. The reader exits silently on EOF/closed-pipe and logs other
//! errors. `write_input` reports a closed pipe as `false` - never an error.

use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use miette::miette;
use portable_pty::{CommandBuilder, PtySize, native_pty_system};
use tokio::sync::mpsc::unbounded_channel;
use tokio::task::JoinHandle;

use super::pty_types::{
    Controller, OutputEventReceiver, OutputEventSender, PtyOutputEvent, READ_BUFFER_SIZE,
};

/// A child process attached to a host-managed pseudo-terminal.
pub struct PtySession {
    controller: Option<Controller>,
    writer: Option<Box<dyn Write + Send>>,
    child_killer: Option<Box<dyn portable_pty::ChildKiller + Send + Sync>>,
    output_rx: Option<OutputEventReceiver>,
    reader_task: Option<JoinHandle<()>>,
    monitor_task: Option<JoinHandle<()>>,
    running: Arc<AtomicBool>,
    stopped: bool,
}

impl std::fmt::Debug for PtySession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PtySession")
            .field("running", &self.is_running())
            .field("stopped", &self.stopped)
            .finish_non_exhaustive()
    }
}

impl Default for PtySession {
    fn default() -> Self { Self::new() }
}

impl PtySession {
    #[must_use]
    pub fn new() -> Self {
        Self {
            controller: None,
            writer: None,
            child_killer: None,
            output_rx: None,
            reader_task: None,
            monitor_task: None,
            running: Arc::new(AtomicBool::new(false)),
            stopped: false,
        }
    }

    /// Spawn `cmdline` (whitespace-split into program + args) attached to a
    /// fresh `cols x rows` pseudo-terminal and launch the reader and monitor
    /// tasks.
    ///
    /// Returns `false` on failure with no side effects beyond logging.
    pub fn start(&mut self, cmdline: &str, cols: u16, rows: u16) -> bool {
        match self.start_impl(cmdline, cols, rows) {
            Ok(()) => true,
            Err(err) => {
                tracing::error!("PTY start failed for {cmdline:?}: {err:?}");
                false
            }
        }
    }

    fn start_impl(&mut self, cmdline: &str, cols: u16, rows: u16) -> miette::Result<()> {
        if self.controller.is_some() {
            return Err(miette!("PTY session already started"));
        }

        let mut words = cmdline.split_whitespace();
        let program = words.next().ok_or_else(|| miette!("empty command line"))?;
        let mut command = CommandBuilder::new(program);
        command.args(words);

        let portable_pty::PtyPair { master, slave } = native_pty_system()
            .openpty(PtySize {
                rows,
                cols,
                pixel_width: 0,
                pixel_height: 0,
            })
            .map_err(|e| miette!("failed to open PTY pair: {e}"))?;

        let mut child = slave
            .spawn_command(command)
            .map_err(|e| miette!("failed to spawn {program:?}: {e}"))?;

        // Drop the controlled half: the child holds its own handles and
        // keeping ours would stop EOF from reaching the reader.
        drop(slave);

        let mut reader = master
            .try_clone_reader()
            .map_err(|e| miette!("failed to clone PTY reader: {e}"))?;
        let writer = master
            .take_writer()
            .map_err(|e| miette!("failed to take PTY writer: {e}"))?;
        let killer = child.clone_killer();

        let (event_tx, event_rx) = unbounded_channel::<PtyOutputEvent>();
        let running = Arc::new(AtomicBool::new(true));

        let reader_tx: OutputEventSender = event_tx.clone();
        let reader_task = tokio::task::spawn_blocking(move || {
            let mut read_buffer = [0u8; READ_BUFFER_SIZE];
            loop {
                match reader.read(&mut read_buffer) {
                    // EOF or closed pipe: exit silently.
                    Ok(0) => break,
                    Ok(n) => {
                        if reader_tx
                            .send(PtyOutputEvent::Output(read_buffer[..n].to_vec()))
                            .is_err()
                        {
                            break; // receiver gone
                        }
                    }
                    Err(err) => {
                        tracing::debug!("PTY reader exiting: {err}");
                        break;
                    }
                }
            }
        });

        let monitor_running = running.clone();
        let monitor_task = tokio::task::spawn_blocking(move || {
            let exit_code = match child.wait() {
                Ok(status) => status.exit_code(),
                Err(err) => {
                    tracing::warn!("PTY child wait failed: {err}");
                    1
                }
            };
            monitor_running.store(false, Ordering::SeqCst);
            let _unused = event_tx.send(PtyOutputEvent::Exit(exit_code));
            tracing::debug!("PTY child exited with code {exit_code}");
        });

        self.controller = Some(master);
        self.writer = Some(writer);
        self.child_killer = Some(killer);
        self.output_rx = Some(event_rx);
        self.reader_task = Some(reader_task);
        self.monitor_task = Some(monitor_task);
        self.running = running;
        self.stopped = false;

        tracing::info!("PTY started: {cmdline:?} at {cols}x{rows}");
        Ok(())
    }

    /// Whether the child process is still alive.
    #[must_use]
    pub fn is_running(&self) -> bool { self.running.load(Ordering::SeqCst) }

    /// Write raw bytes (keyboard, mouse, device responses) to the child.
    /// Returns `false` when the pipe is closed or was never opened.
    pub fn write_input(&mut self, bytes: &[u8]) -> bool {
        let Some(writer) = self.writer.as_mut() else {
            return false;
        };
        match writer.write_all(bytes).and_then(|()| writer.flush()) {
            Ok(()) => true,
            Err(err) => {
                tracing::debug!("PTY write failed: {err}");
                false
            }
        }
    }

    /// Forward new cell dimensions to the pseudo-terminal (SIGWINCH-side).
    pub fn resize(&mut self, cols: u16, rows: u16) {
        if let Some(controller) = &self.controller {
            if let Err(err) = controller.resize(PtySize {
                rows,
                cols,
                pixel_width: 0,
                pixel_height: 0,
            }) {
                tracing::warn!("PTY resize to {cols}x{rows} failed: {err}");
            }
        }
    }

    /// Drain one pending output event without blocking.
    pub fn try_recv_output(&mut self) -> Option<PtyOutputEvent> {
        self.output_rx.as_mut()?.try_recv().ok()
    }

    /// Stop the session: terminate the child and close the PTY handles so
    /// the reader unblocks. Idempotent and safe to call from any thread that
    /// owns the session.
    pub fn stop(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;
        tracing::debug!("PTY stop requested");

        if let Some(mut killer) = self.child_killer.take()
            && self.is_running()
        {
            let _unused = killer.kill();
        }
        // Closing the controller wakes the blocked reader with EOF.
        self.writer = None;
        self.controller = None;
    }

    /// Stop and join the reader and monitor tasks.
    pub async fn shutdown(&mut self) {
        self.stop();
        if let Some(task) = self.reader_task.take() {
            let _unused = task.await;
        }
        if let Some(task) = self.monitor_task.take() {
            let _unused = task.await;
        }
    }
}

impl Drop for PtySession {
    fn drop(&mut self) { self.stop(); }
}
