// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Conformance test files, one per operation family.

pub mod test_device_ops;
pub mod test_line_ops;
