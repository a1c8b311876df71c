// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! OSC numeric types handled by the parser.
//!
//! An OSC sequence is `ESC ] Ps ; Pt (BEL | ST)`. `Ps` selects the command;
//! everything after the first `;` is command-specific payload.

/// OSC 0 - set window title and icon name.
pub const OSC_TITLE_AND_ICON: &str = "0";
/// OSC 1 - set icon name.
pub const OSC_ICON: &str = "1";
/// OSC 2 - set window title.
pub const OSC_TITLE: &str = "2";
/// OSC 4 - get/set a 256-palette entry.
pub const OSC_PALETTE: &str = "4";
/// OSC 8 - hyperlink scope.
pub const OSC_HYPERLINK: &str = "8";
/// OSC 10 - default foreground color.
pub const OSC_DEFAULT_FG: &str = "10";
/// OSC 11 - default background color.
pub const OSC_DEFAULT_BG: &str = "11";
/// OSC 52 - clipboard access (policy-gated).
pub const OSC_CLIPBOARD: &str = "52";
/// OSC 133 - shell-integration prompt markers.
pub const OSC_SHELL_INTEGRATION: &str = "133";

/// Payload marker that turns a set into a query (`?` for OSC 4/10/11/52).
pub const OSC_QUERY: &str = "?";
