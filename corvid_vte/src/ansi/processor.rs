//! The command interpreter (C4): maps parser dispatches onto a [`Handler`]
//! and onto outbound byte sequences (device attributes, status reports,
//! keyboard encoding echo). `Vte<H>` is the crate's top-level type - it
//! owns the parser, the handler, and every piece of state the interpreter
//! needs that doesn't belong to the screen itself.

use log::debug;

use crate::param::Params;
use crate::Executor;

use super::c0;
use super::charset::CharsetState;
use super::handler::{
    Attributes, Charset, CharsetIndex, Color, Direction, Handler, LineClearMode, Mode,
    PrivateMode, Position, Rgb, ScreenClearMode, TabClearMode,
};
use super::handler::Attribute as Sgr;
use super::palette::{Palette, PaletteName};

#[derive(Debug, Clone, Copy)]
struct Modes {
    cursor_keys: bool,
    keypad_application: bool,
    auto_wrap: bool,
    origin: bool,
    local_echo: bool,
    use_c1: bool,
    tite_inhibit: bool,
    lf_nl_mode: bool,
}

impl Default for Modes {
    fn default() -> Self {
        Self {
            cursor_keys: false,
            keypad_application: false,
            auto_wrap: true,
            origin: false,
            local_echo: false,
            use_c1: false,
            tite_inhibit: false,
            lf_nl_mode: false,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct SavedCursor {
    position: Position,
    attributes: Attributes,
    gl: CharsetIndex,
    gr: CharsetIndex,
    auto_wrap: bool,
    origin: bool,
}

impl Default for SavedCursor {
    fn default() -> Self {
        Self {
            position: Position::default(),
            attributes: Attributes::default(),
            gl: CharsetIndex::G0,
            gr: CharsetIndex::G1,
            auto_wrap: true,
            origin: false,
        }
    }
}

/// Everything the interpreter owns besides the parser itself. Kept as a
/// distinct field from `Parser` on [`Vte`] so `Parser::advance` can borrow
/// this half mutably without re-borrowing the whole struct (see
/// `Vte::input`).
struct Interp<H: Handler> {
    handler: H,
    charset: CharsetState,
    palette: Palette,
    attributes: Attributes,
    modes: Modes,
    saved: SavedCursor,
    alt_screen: bool,
    alt_cursor: Position,
    write_cb: Box<dyn FnMut(&[u8])>,
    bell_cb: Option<Box<dyn FnMut()>>,
    osc_cb: Option<Box<dyn FnMut(&[&[u8]], bool)>>,
    input_depth: u32,
    pending_output: Vec<u8>,
}

impl<H: Handler> Interp<H> {
    fn new(handler: H, write_cb: Box<dyn FnMut(&[u8])>) -> Self {
        Self {
            handler,
            charset: CharsetState::default(),
            palette: Palette::default(),
            attributes: Attributes::default(),
            modes: Modes::default(),
            saved: SavedCursor::default(),
            alt_screen: false,
            alt_cursor: Position::default(),
            write_cb,
            bell_cb: None,
            osc_cb: None,
            input_depth: 0,
            pending_output: Vec::new(),
        }
    }

    fn soft_reset(&mut self) {
        self.charset.reset();
        self.attributes = Attributes::default();
        self.modes = Modes::default();
        self.saved = SavedCursor::default();
        self.handler.reset_state();
    }

    fn emit(&mut self, bytes: &[u8]) {
        self.pending_output.extend_from_slice(bytes);
    }

    fn decsc_save(&mut self) {
        self.saved = SavedCursor {
            position: self.handler.cursor_position(),
            attributes: self.attributes,
            gl: self.charset.gl(),
            gr: self.charset.gr(),
            auto_wrap: self.modes.auto_wrap,
            origin: self.modes.origin,
        };
    }

    fn decsc_restore(&mut self) {
        let saved = self.saved;

        self.handler.set_cursor_position(saved.position);

        self.attributes = saved.attributes;
        self.replay_attributes();

        self.charset.invoke_gl(saved.gl);
        self.charset.invoke_gr(saved.gr);
        self.handler.invoke_charset_gl(saved.gl);
        self.handler.invoke_charset_gr(saved.gr);

        self.modes.auto_wrap = saved.auto_wrap;
        self.modes.origin = saved.origin;
        self.handler.set_private_mode(PrivateMode::AutoWrap, saved.auto_wrap);
        self.handler.set_private_mode(PrivateMode::Origin, saved.origin);
    }

    /// Push the full current attribute state back to the handler, e.g.
    /// after DECRC restores a snapshot taken by DECSC.
    fn replay_attributes(&mut self) {
        self.handler.reset_state();

        let a = self.attributes;

        if a.bold {
            self.handler.set_attribute(Sgr::Bold);
        }
        if a.italic {
            self.handler.set_attribute(Sgr::Italic);
        }
        if a.underline {
            self.handler.set_attribute(Sgr::Underline);
        }
        if a.blink {
            self.handler.set_attribute(Sgr::BlinkSlow);
        }
        if a.reverse {
            self.handler.set_attribute(Sgr::Reverse);
        }
        if a.foreground != Color::Default {
            self.handler.set_attribute(Sgr::Foreground(a.foreground));
        }
        if a.background != Color::Default {
            self.handler.set_attribute(Sgr::Background(a.background));
        }
    }

    fn reset_attributes(&mut self) {
        self.attributes = Attributes::default();
        self.handler.reset_state();
    }

    fn set_indexed_foreground(&mut self, index: u8) {
        let rgb = self.palette.resolve_with_bold(index, self.attributes.bold);
        self.attributes.foreground = Color::Rgb(rgb);
        self.handler.set_attribute(Sgr::Foreground(Color::Rgb(rgb)));
    }

    fn set_indexed_background(&mut self, index: u8) {
        let rgb = self.palette.resolve(index);
        self.attributes.background = Color::Rgb(rgb);
        self.handler.set_attribute(Sgr::Background(Color::Rgb(rgb)));
    }

    fn set_rgb_foreground(&mut self, rgb: Rgb) {
        self.attributes.foreground = Color::Rgb(rgb);
        self.handler.set_attribute(Sgr::Foreground(Color::Rgb(rgb)));
    }

    fn set_rgb_background(&mut self, rgb: Rgb) {
        self.attributes.background = Color::Rgb(rgb);
        self.handler.set_attribute(Sgr::Background(Color::Rgb(rgb)));
    }

    /// SGR (`CSI m`): a left-to-right sequence of subcommands, one per
    /// semicolon-separated parameter.
    fn sgr(&mut self, params: &Params) {
        let tokens: Vec<Option<u16>> = params.iter().collect();

        if tokens.is_empty() {
            self.reset_attributes();
            return;
        }

        let mut i = 0;
        while i < tokens.len() {
            let code = tokens[i].unwrap_or(0);

            match code {
                0 => self.reset_attributes(),
                1 => {
                    self.attributes.bold = true;
                    self.handler.set_attribute(Sgr::Bold);
                }
                22 => {
                    self.attributes.bold = false;
                    self.handler.set_attribute(Sgr::CancelBold);
                }
                3 => {
                    self.attributes.italic = true;
                    self.handler.set_attribute(Sgr::Italic);
                }
                23 => {
                    self.attributes.italic = false;
                    self.handler.set_attribute(Sgr::CancelItalic);
                }
                4 => {
                    self.attributes.underline = true;
                    self.handler.set_attribute(Sgr::Underline);
                }
                24 => {
                    self.attributes.underline = false;
                    self.handler.set_attribute(Sgr::CancelUnderline);
                }
                5 => {
                    self.attributes.blink = true;
                    self.handler.set_attribute(Sgr::BlinkSlow);
                }
                25 => {
                    self.attributes.blink = false;
                    self.handler.set_attribute(Sgr::CancelBlink);
                }
                7 => {
                    self.attributes.reverse = true;
                    self.handler.set_attribute(Sgr::Reverse);
                }
                27 => {
                    self.attributes.reverse = false;
                    self.handler.set_attribute(Sgr::CancelReverse);
                }
                30..=37 => self.set_indexed_foreground((code - 30) as u8),
                39 => {
                    self.attributes.foreground = Color::Default;
                    self.handler.set_attribute(Sgr::Foreground(Color::Default));
                }
                40..=47 => self.set_indexed_background((code - 40) as u8),
                49 => {
                    self.attributes.background = Color::Default;
                    self.handler.set_attribute(Sgr::Background(Color::Default));
                }
                90..=97 => self.set_indexed_foreground((code - 90) as u8 + 8),
                100..=107 => self.set_indexed_background((code - 100) as u8 + 8),
                38 | 48 => {
                    let mode = tokens.get(i + 1).copied().flatten().unwrap_or(0);

                    match mode {
                        5 => {
                            let index = tokens.get(i + 2).copied().flatten().unwrap_or(0) as u8;

                            if code == 38 {
                                self.set_indexed_foreground(index);
                            } else {
                                self.set_indexed_background(index);
                            }

                            i += 2;
                        }
                        2 => {
                            let r = tokens.get(i + 2).copied().flatten().unwrap_or(0) as u8;
                            let g = tokens.get(i + 3).copied().flatten().unwrap_or(0) as u8;
                            let b = tokens.get(i + 4).copied().flatten().unwrap_or(0) as u8;
                            let rgb = Rgb { r, g, b };

                            if code == 38 {
                                self.set_rgb_foreground(rgb);
                            } else {
                                self.set_rgb_background(rgb);
                            }

                            i += 4;
                        }
                        other => {
                            debug!("[unhandled] sgr extended color mode={other}");
                        }
                    }
                }
                other => debug!("[unhandled] sgr subcommand={other}"),
            }

            i += 1;
        }
    }

    /// Apply an ANSI mode (`CSI h`/`CSI l`, no `?` marker), updating any
    /// interpreter-local state the mode affects before forwarding it to
    /// the handler.
    fn apply_mode(&mut self, mode: Mode, enabled: bool) {
        match mode {
            Mode::LineFeedNewLine => self.modes.lf_nl_mode = enabled,
            Mode::SendReceive => self.modes.local_echo = !enabled,
            Mode::KeyboardAction | Mode::Insert | Mode::Unknown(_) => {}
        }

        self.handler.set_mode(mode, enabled);
    }

    fn apply_private_mode(&mut self, mode: PrivateMode, enabled: bool) {
        match mode {
            PrivateMode::CursorKeys => {
                self.modes.cursor_keys = enabled;
                self.handler.set_private_mode(mode, enabled);
            }
            // DECCOLM (80/132 column mode) is explicitly ignored (spec.md §4.4.3).
            PrivateMode::ColumnMode => {}
            PrivateMode::Origin => {
                self.modes.origin = enabled;
                self.handler.set_private_mode(mode, enabled);
            }
            PrivateMode::AutoWrap => {
                self.modes.auto_wrap = enabled;
                self.handler.set_private_mode(mode, enabled);
            }
            PrivateMode::AutoRepeat
            | PrivateMode::BlinkingCursor
            | PrivateMode::ShowCursor
            | PrivateMode::ReverseVideo => {
                self.handler.set_private_mode(mode, enabled);
            }
            PrivateMode::TiteInhibit => self.modes.tite_inhibit = enabled,
            PrivateMode::AlternateScreen => {
                if self.modes.tite_inhibit {
                    return;
                }

                if enabled && !self.alt_screen {
                    self.alt_cursor = self.handler.cursor_position();
                    self.alt_screen = true;
                    self.handler.set_private_mode(mode, true);
                } else if !enabled && self.alt_screen {
                    self.alt_screen = false;
                    self.handler.set_private_mode(mode, false);
                    self.handler.set_cursor_position(self.alt_cursor);
                }
            }
            PrivateMode::AlternateScreenSaveCursor => {
                if self.modes.tite_inhibit {
                    return;
                }

                if enabled && !self.alt_screen {
                    self.alt_screen = true;
                    self.handler.set_private_mode(mode, true);
                    self.handler.clear_screen(ScreenClearMode::All, false);
                } else if !enabled && self.alt_screen {
                    self.alt_screen = false;
                    self.handler.set_private_mode(mode, false);
                }
            }
            PrivateMode::SaveCursor => {
                if self.modes.tite_inhibit {
                    return;
                }

                if enabled {
                    self.saved.position = self.handler.cursor_position();
                } else {
                    self.handler.set_cursor_position(self.saved.position);
                }
            }
            PrivateMode::SwapScreenAndSetRestoreCursor => {
                if self.modes.tite_inhibit {
                    return;
                }

                if enabled && !self.alt_screen {
                    self.decsc_save();
                    self.alt_cursor = self.handler.cursor_position();
                    self.alt_screen = true;
                    self.handler.set_private_mode(mode, true);
                    self.handler.clear_screen(ScreenClearMode::All, false);
                } else if !enabled && self.alt_screen {
                    self.alt_screen = false;
                    self.handler.set_private_mode(mode, false);
                    self.decsc_restore();
                }
            }
            PrivateMode::Unknown(_) => self.handler.set_private_mode(mode, enabled),
        }
    }

    fn dsr_cpr(&mut self) {
        let pos = self.handler.cursor_position();
        let row = pos.line + 1;
        let col = pos.column + 1;

        if row > 9999 || col > 9999 {
            self.emit(b"\x1b[0;0R");
        } else {
            self.emit(format!("\x1b[{row};{col}R").as_bytes());
        }
    }

    fn csi_dispatch(&mut self, params: &Params, intermediates: &[u8], ignore: bool, action: char) {
        if ignore {
            debug!("[ignored] csi intermediates={intermediates:?} action={action}");
            return;
        }

        match intermediates {
            [] => self.csi_dispatch_plain(params, action),
            [b'?'] => self.csi_dispatch_private(params, action),
            // DECSTR/DECRQM ('!'/'$') and DECSCL ('p' bare) need the final
            // byte, not just the intermediate; handled below.
            [b'!'] | [b'$'] => {}
            [b'>'] => match action {
                'c' => self.emit(b"\x1b[>1;1;0c"), // secondary DA
                'p' => {}                          // XTMODKEYS, not modeled
                _ => self.handler.unhandled_csi(params, intermediates, action),
            },
            _ => self.handler.unhandled_csi(params, intermediates, action),
        }

        if action == 'p' {
            match intermediates {
                [b'!'] | [b'$'] => self.soft_reset(),
                [] => {
                    let level = params.get(0, 61);
                    self.modes.use_c1 = level >= 62 && params.get(1, 0) == 1;
                }
                _ => {}
            }
        }
    }

    fn csi_dispatch_plain(&mut self, params: &Params, action: char) {
        match action {
            'A' => self.handler.move_cursor(Direction::Up, params.get_nonzero(0, 1) as usize, false),
            'B' | 'e' => {
                self.handler.move_cursor(Direction::Down, params.get_nonzero(0, 1) as usize, false)
            }
            'C' => self.handler.move_cursor(Direction::Right, params.get_nonzero(0, 1) as usize, false),
            'D' => self.handler.move_cursor(Direction::Left, params.get_nonzero(0, 1) as usize, false),
            'G' => self.handler.set_cursor_column(params.get_nonzero(0, 1) as usize - 1),
            'd' => self.handler.set_cursor_line(params.get_nonzero(0, 1) as usize - 1),
            'H' | 'f' => {
                let row = params.get_nonzero(0, 1) as usize;
                let col = params.get_nonzero(1, 1) as usize;
                self.handler.set_cursor_position(Position { line: row - 1, column: col - 1 });
            }
            'Z' => self.handler.back_tab(params.get_nonzero(0, 1) as usize),
            'I' => self.handler.put_tab(params.get_nonzero(0, 1) as usize),
            'J' => self.handler.clear_screen(screen_clear_mode(params.get(0, 0)), false),
            'K' => self.handler.clear_line(line_clear_mode(params.get(0, 0)), false),
            'X' => self.handler.erase_chars(params.get_nonzero(0, 1) as usize),
            'S' => self.handler.scroll_up(params.get_nonzero(0, 1) as usize),
            'T' => self.handler.scroll_down(params.get_nonzero(0, 1) as usize),
            'L' => self.handler.insert_blank_lines(params.get_nonzero(0, 1) as usize),
            'M' => self.handler.delete_lines(params.get_nonzero(0, 1) as usize),
            '@' => self.handler.insert_blank_chars(params.get_nonzero(0, 1) as usize),
            'P' => self.handler.delete_chars(params.get_nonzero(0, 1) as usize),
            'r' => {
                let top = params.get_nonzero(0, 1) as usize - 1;
                let bottom = params.get(1, 0);
                let bottom = (bottom != 0).then(|| bottom as usize - 1);
                self.handler.set_scrolling_region(top, bottom);
            }
            'g' => match params.get(0, 0) {
                0 => self.handler.clear_tab_stop(TabClearMode::Current),
                3 => self.handler.clear_tab_stop(TabClearMode::All),
                _ => {}
            },
            'h' | 'l' => {
                let enabled = action == 'h';
                for param in params.iter() {
                    self.apply_mode(Mode::from_raw(param.unwrap_or(0)), enabled);
                }
            }
            'm' => self.sgr(params),
            'c' => self.emit(b"\x1b[?60;1;6;9;15c"),
            'n' => match params.get(0, 0) {
                5 => self.emit(b"\x1b[0n"),
                6 => self.dsr_cpr(),
                _ => {}
            },
            'p' => {} // handled in csi_dispatch (needs intermediates too)
            _ => self.handler.unhandled_csi(params, &[], action),
        }
    }

    fn csi_dispatch_private(&mut self, params: &Params, action: char) {
        match action {
            'h' | 'l' => {
                let enabled = action == 'h';
                for param in params.iter() {
                    self.apply_private_mode(PrivateMode::from_raw(param.unwrap_or(0)), enabled);
                }
            }
            'J' => self.handler.clear_screen(screen_clear_mode(params.get(0, 0)), true),
            'K' => self.handler.clear_line(line_clear_mode(params.get(0, 0)), true),
            '>' => self.emit(b"\x1b[>1;1;0c"),
            _ => self.handler.unhandled_csi(params, b"?", action),
        }
    }

    fn esc_dispatch(&mut self, intermediates: &[u8], ignore: bool, byte: u8) {
        if ignore {
            debug!("[ignored] esc intermediates={intermediates:?} byte={byte:02x}");
            return;
        }

        match intermediates {
            [] => self.esc_dispatch_plain(byte),
            [b' '] => match byte {
                b'F' => self.modes.use_c1 = false,
                b'G' => self.modes.use_c1 = true,
                _ => self.handler.unhandled_esc(intermediates, byte),
            },
            [marker] if matches!(marker, b'(' | b')' | b'*' | b'+') => {
                let index = match marker {
                    b'(' => CharsetIndex::G0,
                    b')' => CharsetIndex::G1,
                    b'*' => CharsetIndex::G2,
                    _ => CharsetIndex::G3,
                };

                let charset = match byte {
                    b'B' => Charset::Ascii,
                    b'0' => Charset::DecSpecial,
                    b'<' => Charset::DecSupplemental,
                    // National replacement charsets fall back to ASCII (spec.md §4.3/§9).
                    _ => Charset::Ascii,
                };

                self.charset.designate(index, charset);
                self.handler.set_charset(index, charset);
            }
            _ => self.handler.unhandled_esc(intermediates, byte),
        }
    }

    fn esc_dispatch_plain(&mut self, byte: u8) {
        match byte {
            b'D' => self.handler.linefeed(),
            b'E' => self.handler.newline(),
            b'H' => self.handler.set_tab_stop(),
            b'M' => self.handler.move_cursor(Direction::Up, 1, false),
            b'N' => {
                self.charset.single_shift(CharsetIndex::G2);
                self.handler.single_shift(CharsetIndex::G2);
            }
            b'O' => {
                self.charset.single_shift(CharsetIndex::G3);
                self.handler.single_shift(CharsetIndex::G3);
            }
            b'Z' => self.emit(b"\x1b[?60;1;6;9;15c"),
            b'~' => {
                self.charset.invoke_gr(CharsetIndex::G1);
                self.handler.invoke_charset_gr(CharsetIndex::G1);
            }
            b'n' => {
                self.charset.invoke_gl(CharsetIndex::G2);
                self.handler.invoke_charset_gl(CharsetIndex::G2);
            }
            b'}' => {
                self.charset.invoke_gr(CharsetIndex::G2);
                self.handler.invoke_charset_gr(CharsetIndex::G2);
            }
            b'o' => {
                self.charset.invoke_gl(CharsetIndex::G3);
                self.handler.invoke_charset_gl(CharsetIndex::G3);
            }
            b'|' => {
                self.charset.invoke_gr(CharsetIndex::G3);
                self.handler.invoke_charset_gr(CharsetIndex::G3);
            }
            b'=' => {
                self.modes.keypad_application = true;
                self.handler.set_keypad_application_mode(true);
            }
            b'>' => {
                self.modes.keypad_application = false;
                self.handler.set_keypad_application_mode(false);
            }
            b'7' => self.decsc_save(),
            b'8' => self.decsc_restore(),
            b'c' => self.hard_reset(),
            _ => self.handler.unhandled_esc(&[], byte),
        }
    }

    /// RIS: soft reset plus erase screen, clear scrollback, and home the cursor.
    fn hard_reset(&mut self) {
        self.soft_reset();
        self.handler.clear_screen(ScreenClearMode::All, false);
        self.handler.clear_scrollback();
        self.handler.set_cursor_position(Position::default());
    }

    fn execute(&mut self, byte: u8) {
        match byte {
            c0::NUL | c0::CAN => {}
            c0::ENQ => self.emit(&[0x06]),
            c0::BEL => {
                if let Some(cb) = &mut self.bell_cb {
                    cb();
                }
            }
            c0::BS => self.handler.move_cursor(Direction::Left, 1, false),
            c0::HT => self.handler.put_tab(1),
            c0::LF | c0::VT | c0::FF => {
                if self.modes.lf_nl_mode {
                    self.handler.newline();
                } else {
                    self.handler.linefeed();
                }
            }
            c0::CR => self.handler.carriage_return(),
            c0::SO => {
                self.charset.invoke_gl(CharsetIndex::G1);
                self.handler.invoke_charset_gl(CharsetIndex::G1);
            }
            c0::SI => {
                self.charset.invoke_gl(CharsetIndex::G0);
                self.handler.invoke_charset_gl(CharsetIndex::G0);
            }
            // SUB prints the VT100 error glyph rather than executing a control function.
            c0::SUB => self.handler.put_char('¿'),
            // The source treats 0x1F as a second DEL rather than US; preserved verbatim
            // (spec.md §9 Open Question) rather than "corrected" to ECMA-48.
            0x1F | c0::DEL => {}
            c0::c1::IND => self.handler.linefeed(),
            c0::c1::NEL => self.handler.newline(),
            c0::c1::HTS => self.handler.set_tab_stop(),
            c0::c1::RI => self.handler.move_cursor(Direction::Up, 1, false),
            c0::c1::SS2 => {
                self.charset.single_shift(CharsetIndex::G2);
                self.handler.single_shift(CharsetIndex::G2);
            }
            c0::c1::SS3 => {
                self.charset.single_shift(CharsetIndex::G3);
                self.handler.single_shift(CharsetIndex::G3);
            }
            c0::c1::DECID => self.emit(b"\x1b[?60;1;6;9;15c"),
            _ => debug!("[unhandled] execute byte={byte:02x}"),
        }
    }
}

fn screen_clear_mode(arg: u16) -> ScreenClearMode {
    match arg {
        1 => ScreenClearMode::Above,
        2 => ScreenClearMode::All,
        3 => ScreenClearMode::Saved,
        _ => ScreenClearMode::Below,
    }
}

fn line_clear_mode(arg: u16) -> LineClearMode {
    match arg {
        1 => LineClearMode::Left,
        2 => LineClearMode::All,
        _ => LineClearMode::Right,
    }
}

impl<H: Handler> Executor for Interp<H> {
    fn print(&mut self, c: char) {
        let translated = self.charset.translate(c);
        self.handler.put_char(translated);
    }

    fn execute(&mut self, byte: u8) {
        Interp::execute(self, byte);
    }

    fn put(&mut self, _byte: u8) {
        // DCS payloads are discarded by default (spec.md §4.4.5 placeholder).
    }

    fn hook(&mut self, _params: &Params, _intermediates: &[u8], _ignore: bool, _action: char) {}

    fn unhook(&mut self) {}

    fn osc_dispatch(&mut self, params: &[&[u8]], bell_terminated: bool) {
        if let Some(cb) = &mut self.osc_cb {
            cb(params, bell_terminated);
        }
    }

    fn esc_dispatch(&mut self, intermediates: &[u8], ignore: bool, byte: u8) {
        Interp::esc_dispatch(self, intermediates, ignore, byte);
    }

    fn csi_dispatch(&mut self, params: &Params, intermediates: &[u8], ignore: bool, action: char) {
        Interp::csi_dispatch(self, params, intermediates, ignore, action);
    }
}

/// The crate's top-level type: owns the parser and an externally supplied
/// [`Handler`] (the screen), and is the entry point for both directions of
/// traffic (`input` for PTY output, `handle_keyboard` for encoded key
/// bytes).
pub struct Vte<H: Handler> {
    parser: crate::Parser,
    interp: Interp<H>,
}

impl<H: Handler> Vte<H> {
    pub fn new(handler: H, write_cb: impl FnMut(&[u8]) + 'static) -> Self {
        Self { parser: crate::Parser::new(), interp: Interp::new(handler, Box::new(write_cb)) }
    }

    /// Soft reset: parser, modes, attributes, character sets. Does not
    /// touch the screen.
    pub fn reset(&mut self) {
        self.parser = crate::Parser::new();
        self.interp.soft_reset();
    }

    /// Soft reset, plus erase screen, clear scrollback, and home the cursor.
    pub fn hard_reset(&mut self) {
        self.reset();
        self.interp.handler.clear_screen(ScreenClearMode::All, false);
        self.interp.handler.clear_scrollback();
        self.interp.handler.set_cursor_position(Position::default());
    }

    /// Feed PTY output through the parser.
    pub fn input(&mut self, bytes: &[u8]) {
        self.interp.input_depth += 1;

        let Vte { parser, interp } = self;
        parser.advance(interp, bytes);

        self.interp.input_depth -= 1;

        self.flush_pending();
    }

    /// Inject already-encoded keyboard bytes (see `corvid_input::KeyEncoder`),
    /// honoring local echo exactly as PTY-originated writes do. Returns
    /// whether anything was actually emitted.
    pub fn handle_keyboard(&mut self, bytes: &[u8]) -> bool {
        if bytes.is_empty() {
            return false;
        }

        self.interp.emit(bytes);
        self.flush_pending();

        true
    }

    fn flush_pending(&mut self) {
        if self.interp.pending_output.is_empty() {
            return;
        }

        let bytes = std::mem::take(&mut self.interp.pending_output);
        (self.interp.write_cb)(&bytes);

        if self.interp.modes.local_echo && self.interp.input_depth == 0 {
            self.input(&bytes);
        }
    }

    pub fn set_palette(&mut self, name: PaletteName) {
        self.interp.palette = Palette::named(name);
    }

    pub fn set_custom_palette(&mut self, entries: &[Rgb; 18]) {
        self.interp.palette = Palette::custom(entries);
    }

    pub fn set_bell_cb(&mut self, cb: impl FnMut() + 'static) {
        self.interp.bell_cb = Some(Box::new(cb));
    }

    pub fn set_osc_cb(&mut self, cb: impl FnMut(&[&[u8]], bool) + 'static) {
        self.interp.osc_cb = Some(Box::new(cb));
    }

    pub fn default_attribute(&self) -> Attributes {
        self.interp.attributes
    }

    pub fn handler(&self) -> &H {
        &self.interp.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.interp.handler
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[derive(Default)]
    struct MockHandler {
        cursor: Position,
        private_modes: Vec<(PrivateMode, bool)>,
        cleared: Vec<(ScreenClearMode, bool)>,
    }

    impl Handler for MockHandler {
        fn move_cursor(&mut self, direction: Direction, count: usize, _reset_column: bool) {
            match direction {
                Direction::Up => self.cursor.line = self.cursor.line.saturating_sub(count),
                Direction::Down => self.cursor.line += count,
                Direction::Left => self.cursor.column = self.cursor.column.saturating_sub(count),
                Direction::Right => self.cursor.column += count,
            }
        }

        fn put_char(&mut self, _c: char) {}
        fn newline(&mut self) {}
        fn carriage_return(&mut self) {}
        fn linefeed(&mut self) {}

        fn cursor_position(&self) -> Position {
            self.cursor
        }

        fn set_cursor_position(&mut self, position: Position) {
            self.cursor = position;
        }

        fn set_private_mode(&mut self, mode: PrivateMode, enabled: bool) {
            self.private_modes.push((mode, enabled));
        }

        fn clear_screen(&mut self, mode: ScreenClearMode, selective: bool) {
            self.cleared.push((mode, selective));
        }
    }

    fn vte_with_output() -> (Vte<MockHandler>, Rc<RefCell<Vec<u8>>>) {
        let output = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&output);

        let vte = Vte::new(MockHandler::default(), move |bytes: &[u8]| {
            sink.borrow_mut().extend_from_slice(bytes);
        });

        (vte, output)
    }

    #[test]
    fn dsr_6_reports_one_based_cursor_position() {
        let (mut vte, output) = vte_with_output();
        vte.handler_mut().cursor = Position { line: 4, column: 9 };

        vte.input(b"\x1b[6n");

        assert_eq!(output.borrow().as_slice(), b"\x1b[5;10R");
    }

    #[test]
    fn sgr_with_absent_params_resets_like_explicit_zero() {
        let (mut vte, _output) = vte_with_output();

        vte.input(b"\x1b[1m");
        assert!(vte.default_attribute().bold);

        vte.input(b"\x1b[m");
        assert!(!vte.default_attribute().bold, "bare CSI m should reset like SGR 0");

        vte.input(b"\x1b[1m");
        assert!(vte.default_attribute().bold);

        vte.input(b"\x1b[0m");
        assert!(!vte.default_attribute().bold);
    }

    #[test]
    fn reverse_video_private_mode_reaches_handler() {
        let (mut vte, _output) = vte_with_output();

        vte.input(b"\x1b[?5h");
        assert!(vte.handler().private_modes.contains(&(PrivateMode::ReverseVideo, true)));

        vte.input(b"\x1b[?5l");
        assert!(vte.handler().private_modes.contains(&(PrivateMode::ReverseVideo, false)));
    }

    #[test]
    fn alt_screen_1049_is_symmetric() {
        let (mut vte, _output) = vte_with_output();
        vte.handler_mut().cursor = Position { line: 3, column: 7 };

        vte.input(b"\x1b[?1049h");

        assert!(vte
            .handler()
            .private_modes
            .contains(&(PrivateMode::SwapScreenAndSetRestoreCursor, true)));
        assert!(vte.handler().cleared.contains(&(ScreenClearMode::All, false)));

        vte.handler_mut().cursor = Position { line: 10, column: 20 };

        vte.input(b"\x1b[?1049l");

        assert!(vte
            .handler()
            .private_modes
            .contains(&(PrivateMode::SwapScreenAndSetRestoreCursor, false)));
        assert_eq!(vte.handler().cursor, Position { line: 3, column: 7 });
    }
}
