// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! OSC (Operating System Command) handling.
//!
//! Payload grammar is `Ps ; Pt`: a numeric selector, then command-specific
//! text. Handled selectors:
//!
//! | Ps | Command |
//! |----|---------|
//! | 0/1/2 | window title - surfaced to the host, otherwise a no-op |
//! | 4 | get/set 256-palette entries (`i;spec` pairs, `?` queries) |
//! | 8 | hyperlink scope (`params;uri`, empty uri closes) |
//! | 10/11 | default fg/bg get/set; retints palette slots 7/0 when unclaimed |
//! | 52 | clipboard read/write, gated by [`Osc52Policy`] before any callback |
//! | 133 | shell-integration prompt markers (A/B/C/D[;exit]) |
//!
//! Color specs accept `#RRGGBB` and X11 `rgb:R/G/B` with 1-4 hex digits per
//! channel.
//!
//! [`Osc52Policy`]: crate::core::vt_parser::Osc52Policy

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::core::cell::Rgb;
use crate::core::screen_buffer::ScreenBuffer;
use crate::core::vt_parser::VtParser;
use crate::core::vt_parser::actions::{OscEvent, VtActions};
use crate::core::vt_parser::protocols::dsr_codes::DeviceResponse;
use crate::core::vt_parser::protocols::osc_codes;
use crate::core::vt_parser::state::Osc52Policy;

/// Route a complete OSC payload to its handler.
pub(crate) fn dispatch_osc(
    parser: &mut VtParser,
    buf: &mut ScreenBuffer,
    actions: &mut VtActions,
    payload: &str,
) {
    let Some((selector, value)) = payload.split_once(';') else {
        // No payload after the selector: nothing any handler could use.
        if !payload.is_empty() {
            tracing::debug!("OSC {payload}: missing payload, ignored");
        }
        return;
    };

    match selector {
        osc_codes::OSC_TITLE_AND_ICON | osc_codes::OSC_ICON | osc_codes::OSC_TITLE => {
            actions.notify(OscEvent::SetTitle(value.to_string()));
        }
        osc_codes::OSC_PALETTE => handle_palette(buf, actions, value),
        osc_codes::OSC_HYPERLINK => handle_hyperlink(buf, value),
        osc_codes::OSC_DEFAULT_FG => handle_theme_color(parser, buf, actions, value, true),
        osc_codes::OSC_DEFAULT_BG => handle_theme_color(parser, buf, actions, value, false),
        osc_codes::OSC_CLIPBOARD => handle_clipboard(parser, actions, value),
        osc_codes::OSC_SHELL_INTEGRATION => handle_shell_integration(buf, value),
        other => tracing::debug!("OSC {other}: unhandled command"),
    }
}

/// OSC 4 - `i;spec` pairs; `?` as spec queries the entry.
fn handle_palette(buf: &mut ScreenBuffer, actions: &mut VtActions, value: &str) {
    let mut parts = value.split(';');
    while let Some(index_str) = parts.next() {
        let Ok(index) = index_str.trim().parse::<u16>() else {
            tracing::debug!("OSC 4: invalid palette index {index_str:?}");
            return;
        };
        if index > 255 {
            tracing::debug!("OSC 4: palette index {index} out of range");
            return;
        }
        #[allow(clippy::cast_possible_truncation)]
        let index = index as u8;

        let Some(spec) = parts.next() else {
            tracing::debug!("OSC 4: missing color spec for index {index}");
            return;
        };

        if spec == osc_codes::OSC_QUERY {
            actions.respond(DeviceResponse::PaletteColor {
                index,
                rgb: buf.palette_color(index),
            });
        } else if let Some(rgb) = parse_color_spec(spec) {
            buf.set_palette_color(index, rgb);
            tracing::debug!(
                "OSC 4: palette[{index}] = #{:02x}{:02x}{:02x}",
                rgb.r,
                rgb.g,
                rgb.b
            );
        }
    }
}

/// OSC 8 - `params;uri`. A non-empty uri opens a hyperlink scope, an empty
/// one closes it. `id=` inside the colon-separated params names the link.
fn handle_hyperlink(buf: &mut ScreenBuffer, value: &str) {
    let Some((params, uri)) = value.split_once(';') else {
        return;
    };

    let link_id = params
        .split(':')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "id")
        .map(|(_, id)| id);

    if uri.is_empty() {
        buf.clear_current_hyperlink();
        tracing::debug!("OSC 8: hyperlink scope closed");
    } else {
        let id = buf.add_hyperlink(uri, link_id);
        tracing::debug!("OSC 8: hyperlink {id:?} -> {uri}");
    }
}

/// OSC 10/11 - default foreground/background. Queries answer with the
/// current override (or the palette slot when none); sets record the
/// override and retint the matching palette slot if unmodified.
fn handle_theme_color(
    parser: &mut VtParser,
    buf: &mut ScreenBuffer,
    actions: &mut VtActions,
    value: &str,
    foreground: bool,
) {
    let slot = if foreground { 7 } else { 0 };
    if value == osc_codes::OSC_QUERY {
        let rgb = if foreground {
            parser.theme_fg.unwrap_or_else(|| buf.palette_color(slot))
        } else {
            parser.theme_bg.unwrap_or_else(|| buf.palette_color(slot))
        };
        actions.respond(if foreground {
            DeviceResponse::DefaultForeground { rgb }
        } else {
            DeviceResponse::DefaultBackground { rgb }
        });
        return;
    }

    if let Some(rgb) = parse_color_spec(value) {
        if foreground {
            parser.theme_fg = Some(rgb);
        } else {
            parser.theme_bg = Some(rgb);
        }
        buf.set_theme_slot(slot, rgb);
        tracing::debug!(
            "OSC {}: default {} = #{:02x}{:02x}{:02x}",
            if foreground { 10 } else { 11 },
            if foreground { "fg" } else { "bg" },
            rgb.r,
            rgb.g,
            rgb.b
        );
    }
}

/// OSC 52 - clipboard. `selection;?` reads, `selection;base64` writes.
/// The policy gate runs before the clipboard collaborator is ever touched.
fn handle_clipboard(parser: &mut VtParser, actions: &mut VtActions, value: &str) {
    let policy = parser.osc52_policy;
    if policy == Osc52Policy::Disabled {
        tracing::debug!("OSC 52: blocked by policy (Disabled)");
        return;
    }

    let Some((selection, data)) = value.split_once(';') else {
        tracing::debug!("OSC 52: malformed payload (no selection separator)");
        return;
    };

    if data == osc_codes::OSC_QUERY {
        if !policy.allows_read() {
            tracing::debug!("OSC 52: clipboard read blocked by policy");
            return;
        }
        if let Some(clipboard) = &parser.clipboard {
            let contents = clipboard.read_text().unwrap_or_default();
            actions.respond(DeviceResponse::ClipboardContents {
                selection: selection.to_string(),
                base64: BASE64.encode(contents.as_bytes()),
            });
            tracing::debug!("OSC 52: clipboard read, {} bytes", contents.len());
        }
    } else if !data.is_empty() {
        if !policy.allows_write() {
            tracing::debug!("OSC 52: clipboard write blocked by policy");
            return;
        }
        match BASE64.decode(data.as_bytes()) {
            Ok(decoded) => {
                let text = String::from_utf8_lossy(&decoded);
                if let Some(clipboard) = &parser.clipboard
                    && !text.is_empty()
                {
                    clipboard.write_text(&text);
                    tracing::debug!("OSC 52: clipboard write, {} bytes", text.len());
                }
            }
            Err(err) => tracing::debug!("OSC 52: invalid base64 payload: {err}"),
        }
    }
}

/// OSC 133 - shell integration. `A` prompt start, `B` input start, `C`
/// command start, `D[;exit]` command end.
fn handle_shell_integration(buf: &mut ScreenBuffer, value: &str) {
    match value.chars().next() {
        Some('A') => buf.mark_prompt_start(),
        Some('B') => buf.mark_input_start(),
        Some('C') => buf.mark_command_start(),
        Some('D') => {
            let exit_code = value
                .split_once(';')
                .and_then(|(_, code)| code.trim().parse::<i32>().ok());
            buf.mark_command_end(exit_code);
        }
        other => tracing::debug!("OSC 133: unknown marker {other:?}"),
    }
}

/// Parse `#RRGGBB` or X11 `rgb:R/G/B` (1-4 hex digits per channel, scaled
/// down to 8 bits).
pub(crate) fn parse_color_spec(spec: &str) -> Option<Rgb> {
    if let Some(hex) = spec.strip_prefix('#') {
        if hex.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        return Some(Rgb::new(r, g, b));
    }

    if let Some(rgb) = spec.strip_prefix("rgb:") {
        let mut channels = rgb.split('/');
        let r = parse_hex_channel(channels.next()?)?;
        let g = parse_hex_channel(channels.next()?)?;
        let b = parse_hex_channel(channels.next()?)?;
        if channels.next().is_some() {
            return None;
        }
        return Some(Rgb::new(r, g, b));
    }

    None
}

/// Scale a 1-4 hex digit channel value to 8 bits.
fn parse_hex_channel(text: &str) -> Option<u8> {
    if text.is_empty() || text.len() > 4 {
        return None;
    }
    let value = u32::from_str_radix(text, 16).ok()?;
    #[allow(clippy::cast_possible_truncation)]
    let scaled = match text.len() {
        1 => value * 17,
        2 => value,
        3 => value >> 4,
        _ => value >> 8,
    } as u8;
    Some(scaled)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_hash_spec() {
        assert_eq!(parse_color_spec("#ff8000"), Some(Rgb::new(255, 128, 0)));
        assert_eq!(parse_color_spec("#ff80"), None);
        assert_eq!(parse_color_spec("#gg8000"), None);
    }

    #[test]
    fn test_parse_x11_spec_scales_channels() {
        assert_eq!(parse_color_spec("rgb:ff/80/00"), Some(Rgb::new(255, 128, 0)));
        assert_eq!(
            parse_color_spec("rgb:ffff/8080/0000"),
            Some(Rgb::new(255, 128, 0))
        );
        assert_eq!(parse_color_spec("rgb:f/8/0"), Some(Rgb::new(255, 136, 0)));
        assert_eq!(parse_color_spec("rgb:ff/80"), None);
        assert_eq!(parse_color_spec("rgb:ff/80/00/00"), None);
    }
}
