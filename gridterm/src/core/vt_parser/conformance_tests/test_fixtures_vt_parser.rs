// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Shared fixtures for the conformance tests.

use crate::core::screen_buffer::ScreenBuffer;
use crate::core::vt_parser::{VtActions, VtParser};

/// A parser/buffer pair sized like the tests expect.
pub struct TestTerminal {
    pub parser: VtParser,
    pub buf: ScreenBuffer,
}

impl TestTerminal {
    /// Standard 80x24 terminal with scrollback.
    pub fn new_80x24() -> Self {
        Self {
            parser: VtParser::new(),
            buf: ScreenBuffer::new(80, 24, 1000),
        }
    }

    /// Small terminal for scroll-sensitive tests.
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            parser: VtParser::new(),
            buf: ScreenBuffer::new(cols, rows, 100),
        }
    }

    /// Feed bytes through the full pipeline.
    pub fn process(&mut self, bytes: impl AsRef<[u8]>) -> VtActions {
        self.parser.process_input(&mut self.buf, bytes.as_ref())
    }

    /// Row contents as a string, one char per column.
    pub fn row_string(&self, y: usize) -> String {
        (0..self.buf.cols()).map(|x| self.buf.cell(x, y).ch).collect()
    }

    /// Row contents with trailing blanks trimmed.
    pub fn row_trimmed(&self, y: usize) -> String {
        self.row_string(y).trim_end().to_string()
    }

    pub fn cursor(&self) -> (usize, usize) { self.buf.cursor() }
}
