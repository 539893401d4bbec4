//! Legacy xterm-style keyboard encoding: turns a [`KeyEvent`] into the byte
//! sequence a DEC/xterm-compatible application expects to read from its
//! input stream.

use crate::key::{Action, Key, KeyEvent};

/// How a Unicode code point with no more specific encoding falls back to
/// bytes (rule 8): mask to 7-bit ASCII, truncate to a single Latin-1 byte,
/// or encode as UTF-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodepointEncoding {
    Ascii7Bit,
    Latin1,
    Utf8,
}

/// Encodes key events against the terminal's current addressing modes.
/// Cursor-key mode (DECCKM), keypad-application mode (DECKPAM), and
/// linefeed/newline mode (LNM) all change which bytes a given key produces,
/// so the host updates these fields as the corresponding `Vte` modes change.
pub struct KeyEncoder {
    pub cursor_key_application: bool,
    pub keypad_application: bool,
    pub line_feed_new_line: bool,
    pub codepoint_encoding: CodepointEncoding,
}

impl Default for KeyEncoder {
    fn default() -> Self {
        Self {
            cursor_key_application: false,
            keypad_application: false,
            line_feed_new_line: false,
            codepoint_encoding: CodepointEncoding::Utf8,
        }
    }
}

impl KeyEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encode a single key event, if it produces any output at all.
    pub fn encode(&self, event: &KeyEvent) -> Option<Vec<u8>> {
        if !matches!(event.action, Action::Press | Action::Repeat) {
            return None;
        }

        let payload = self.encode_legacy(event)?;

        // Rule 1: ALT prepends a bare ESC to whatever else the key produced.
        if event.mods.alt() {
            let mut out = Vec::with_capacity(payload.len() + 1);
            out.push(0x1b);
            out.extend_from_slice(&payload);
            Some(out)
        } else {
            Some(payload)
        }
    }

    fn encode_legacy(&self, event: &KeyEvent) -> Option<Vec<u8>> {
        if event.mods.ctrl() {
            if let Some(bytes) = encode_ctrl(event) {
                return Some(bytes);
            }
        }

        if let Some(bytes) = self.encode_named(event) {
            return Some(bytes);
        }

        if let Some(bytes) = self.encode_cursor_key(event) {
            return Some(bytes);
        }

        if let Some(bytes) = self.encode_keypad(event) {
            return Some(bytes);
        }

        if let Some(bytes) = pc_style_function_key(event.key, event.mods.shift()) {
            return Some(bytes);
        }

        if let Some(c) = event.codepoint {
            return self.encode_codepoint(c);
        }

        None
    }

    /// Rule 4: named keys with a single fixed encoding (plus Return/KP-Enter,
    /// whose encoding depends on the current linefeed/keypad mode).
    fn encode_named(&self, event: &KeyEvent) -> Option<Vec<u8>> {
        let bytes: &[u8] = match event.key {
            Key::Backspace => b"\x08",
            Key::Tab if event.mods.shift() => b"\x1b[Z", // ISO-Left-Tab
            Key::Tab => b"\x09",
            Key::Escape => b"\x1b",
            Key::Enter => {
                return Some(if self.line_feed_new_line { b"\r\n".to_vec() } else { b"\r".to_vec() });
            }
            Key::KPEnter if self.keypad_application => b"\x1bOM",
            Key::KPEnter => {
                return Some(if self.line_feed_new_line { b"\r\n".to_vec() } else { b"\r".to_vec() });
            }
            Key::Insert => b"\x1b[2~",
            Key::Delete => b"\x1b[3~",
            Key::PageUp => b"\x1b[5~",
            Key::PageDown => b"\x1b[6~",
            _ => return None,
        };

        Some(bytes.to_vec())
    }

    /// Rule 5: arrows and Home/End, gated by CTRL and DECCKM.
    fn encode_cursor_key(&self, event: &KeyEvent) -> Option<Vec<u8>> {
        let letter = match event.key {
            Key::Up => 'A',
            Key::Down => 'B',
            Key::Right => 'C',
            Key::Left => 'D',
            Key::Home => 'H',
            Key::End => 'F',
            _ => return None,
        };

        if event.mods.ctrl() {
            Some(format!("\x1b[1;5{letter}").into_bytes())
        } else if self.cursor_key_application {
            Some(format!("\x1bO{letter}").into_bytes())
        } else {
            Some(format!("\x1b[{letter}").into_bytes())
        }
    }

    /// Rule 6: numeric keypad, application mode vs. literal character.
    fn encode_keypad(&self, event: &KeyEvent) -> Option<Vec<u8>> {
        if !event.key.is_keypad() {
            return None;
        }

        if !self.keypad_application {
            return event.key.char().map(|c| c.to_string().into_bytes());
        }

        let letter = match event.key {
            Key::KP0 => 'p',
            Key::KP1 => 'q',
            Key::KP2 => 'r',
            Key::KP3 => 's',
            Key::KP4 => 't',
            Key::KP5 => 'u',
            Key::KP6 => 'v',
            Key::KP7 => 'w',
            Key::KP8 => 'x',
            Key::KP9 => 'y',
            Key::KPSubtract => 'm',
            Key::KPSeparator => 'l',
            Key::KPDecimal => 'n',
            Key::KPDivide => 'j',
            Key::KPMultiply => 'o',
            Key::KPAdd => 'k',
            _ => return None,
        };

        Some(format!("\x1bO{letter}").into_bytes())
    }

    /// Rule 8: no more specific mapping matched; fall back to the code
    /// point the host's input-method layer produced, if any.
    fn encode_codepoint(&self, c: char) -> Option<Vec<u8>> {
        match self.codepoint_encoding {
            CodepointEncoding::Ascii7Bit => {
                let byte = if c.is_ascii() { c as u8 } else { b'?' };
                Some(vec![byte])
            }
            CodepointEncoding::Latin1 => Some(vec![c as u32 as u8]),
            CodepointEncoding::Utf8 => {
                let mut buf = [0u8; 4];
                Some(c.encode_utf8(&mut buf).as_bytes().to_vec())
            }
        }
    }
}

/// Rule 3: CTRL branch, using the ASCII-fallback symbol when present so the
/// mapping is invariant to keyboard layout.
fn encode_ctrl(event: &KeyEvent) -> Option<Vec<u8>> {
    let source = match event.ascii_fallback {
        Some(ascii) => ascii as char,
        None => event.key.char()?,
    };

    let byte = match source.to_ascii_lowercase() {
        ' ' | '2' => 0x00,
        c @ 'a'..='z' => c as u8 - b'a' + 1,
        '3' | '[' | '{' => 0x1b,
        '4' | '\\' | '|' => 0x1c,
        '5' | ']' | '}' => 0x1d,
        '6' | '`' | '~' => 0x1e,
        '7' | '/' | '?' => 0x1f,
        '8' => 0x7f,
        _ => return None,
    };

    Some(vec![byte])
}

/// Rule 7: the xterm "PC-style function key" table for F1-F20. F1-F4 and
/// F5-F10 have dedicated shifted sequences; F11-F20 instead append a `;2`
/// modifier parameter.
fn pc_style_function_key(key: Key, shift: bool) -> Option<Vec<u8>> {
    let (unshifted, shifted): (&str, &str) = match key {
        Key::F1 => ("\x1bOP", "\x1b[23~"),
        Key::F2 => ("\x1bOQ", "\x1b[24~"),
        Key::F3 => ("\x1bOR", "\x1b[25~"),
        Key::F4 => ("\x1bOS", "\x1b[26~"),
        Key::F5 => ("\x1b[15~", "\x1b[28~"),
        Key::F6 => ("\x1b[17~", "\x1b[29~"),
        Key::F7 => ("\x1b[18~", "\x1b[31~"),
        Key::F8 => ("\x1b[19~", "\x1b[32~"),
        Key::F9 => ("\x1b[20~", "\x1b[33~"),
        Key::F10 => ("\x1b[21~", "\x1b[34~"),
        Key::F11 => return Some(f11_plus(23, shift)),
        Key::F12 => return Some(f11_plus(24, shift)),
        Key::F13 => return Some(f11_plus(25, shift)),
        Key::F14 => return Some(f11_plus(26, shift)),
        Key::F15 => return Some(f11_plus(28, shift)),
        Key::F16 => return Some(f11_plus(29, shift)),
        Key::F17 => return Some(f11_plus(31, shift)),
        Key::F18 => return Some(f11_plus(32, shift)),
        Key::F19 => return Some(f11_plus(33, shift)),
        Key::F20 => return Some(f11_plus(34, shift)),
        _ => return None,
    };

    Some((if shift { shifted } else { unshifted }).as_bytes().to_vec())
}

fn f11_plus(code: u16, shift: bool) -> Vec<u8> {
    if shift {
        format!("\x1b[{code};2~").into_bytes()
    } else {
        format!("\x1b[{code}~").into_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::{Action, Mods};

    fn press(key: Key) -> KeyEvent {
        KeyEvent { action: Action::Press, key, ..KeyEvent::DEFAULT }
    }

    #[test]
    fn keypad_digit_is_literal_outside_application_mode() {
        let encoder = KeyEncoder::new();

        assert_eq!(encoder.encode(&press(Key::KP5)), Some(b"5".to_vec()));
    }

    #[test]
    fn keypad_digit_is_ss3_inside_application_mode() {
        let mut encoder = KeyEncoder::new();
        encoder.keypad_application = true;

        assert_eq!(encoder.encode(&press(Key::KP5)), Some(b"\x1bOu".to_vec()));
    }

    #[test]
    fn non_keypad_key_falls_through_to_codepoint_not_keypad_char() {
        let encoder = KeyEncoder::new();

        let event = KeyEvent {
            mods: Mods::SHIFT,
            codepoint: Some('A'),
            ..press(Key::A)
        };

        // Before the `is_keypad` gate, `encode_keypad` would intercept this
        // via `Key::A.char()` and return lowercase "a", losing the shift.
        assert_eq!(encoder.encode(&event), Some(b"A".to_vec()));
    }

    #[test]
    fn shifted_digit_uses_codepoint_not_digit_char() {
        let encoder = KeyEncoder::new();

        let event = KeyEvent {
            mods: Mods::SHIFT,
            codepoint: Some('!'),
            ..press(Key::One)
        };

        assert_eq!(encoder.encode(&event), Some(b"!".to_vec()));
    }

    #[test]
    fn unshifted_digit_uses_codepoint() {
        let encoder = KeyEncoder::new();

        let event = KeyEvent { codepoint: Some('1'), ..press(Key::One) };

        assert_eq!(encoder.encode(&event), Some(b"1".to_vec()));
    }

    #[test]
    fn non_keypad_key_without_codepoint_produces_nothing() {
        let encoder = KeyEncoder::new();

        assert_eq!(encoder.encode(&press(Key::One)), None);
    }
}
