//! The contract between the command interpreter and whatever owns the
//! actual screen storage. None of the types here know how a grid is laid
//! out in memory; they only describe what happened.

use crate::param::Params;

pub type Column = usize;
pub type Line = usize;

#[derive(Debug, Default, Eq, PartialEq, Copy, Clone, Hash)]
pub struct Position {
    pub line: Line,
    pub column: Column,
}

/// Cursor motion relative to its current position.
#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// One of the four designatable character set slots (ISO 2022).
#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash)]
pub enum CharsetIndex {
    G0,
    G1,
    G2,
    G3,
}

/// A character set that can be designated into a [`CharsetIndex`] slot.
#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash)]
pub enum Charset {
    Ascii,
    DecSpecial,
    DecSupplemental,
}

impl Charset {
    /// Map a GL/GR byte through this charset's substitution table.
    ///
    /// Only `DecSpecial` actually changes anything; everything else is
    /// the identity mapping, matching the spec's "ASCII/DEC-special/
    /// DEC-supplemental beyond which we fall back to ASCII" scope.
    pub fn map(self, c: char) -> char {
        match self {
            Charset::Ascii => c,
            Charset::DecSpecial => dec_special_graphics(c),
            Charset::DecSupplemental => c,
        }
    }
}

/// The DEC Special Graphics line-drawing substitution table (VT100).
fn dec_special_graphics(c: char) -> char {
    match c {
        '_' => ' ',
        '`' => '◆',
        'a' => '▒',
        'b' => '␉',
        'c' => '␌',
        'd' => '␍',
        'e' => '␊',
        'f' => '°',
        'g' => '±',
        'h' => '␤',
        'i' => '␋',
        'j' => '┘',
        'k' => '┐',
        'l' => '┌',
        'm' => '└',
        'n' => '┼',
        'o' => '⎺',
        'p' => '⎻',
        'q' => '─',
        'r' => '⎼',
        's' => '⎽',
        't' => '├',
        'u' => '┤',
        'v' => '┴',
        'w' => '┬',
        'x' => '│',
        'y' => '≤',
        'z' => '≥',
        '{' => 'π',
        '|' => '≠',
        '}' => '£',
        '~' => '·',
        other => other,
    }
}

/// An indexed or true-color color, as produced by SGR.
#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash, Default)]
pub enum Color {
    #[default]
    Default,
    Named(NamedColor),
    Indexed(u8),
    Rgb(Rgb),
}

#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// The logical, un-resolved color slots a terminal always has, distinct
/// from the 256-entry indexed palette.
#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash)]
pub enum NamedColor {
    Foreground,
    Background,
    Cursor,
}

/// A single graphic rendition attribute as set or reset by SGR.
#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash)]
pub enum Attribute {
    Reset,
    Bold,
    Dim,
    Italic,
    Underline,
    DoubleUnderline,
    BlinkSlow,
    BlinkFast,
    Reverse,
    Hidden,
    Strikeout,
    CancelBold,
    CancelBoldDim,
    CancelItalic,
    CancelUnderline,
    CancelBlink,
    CancelReverse,
    CancelHidden,
    CancelStrikeout,
    Foreground(Color),
    Background(Color),
    UnderlineColor(Color),
}

/// The full current graphic-rendition state, as tracked by the command
/// interpreter and returned by `Vte::default_attribute`/`Vte::attributes`.
#[derive(Debug, Default, Eq, PartialEq, Copy, Clone, Hash)]
pub struct Attributes {
    pub bold: bool,
    pub dim: bool,
    pub italic: bool,
    pub underline: bool,
    pub double_underline: bool,
    pub blink: bool,
    pub reverse: bool,
    pub hidden: bool,
    pub strikeout: bool,
    pub protect: bool,
    pub foreground: Color,
    pub background: Color,
}

/// An ANSI mode settable via `CSI h` / `CSI l`.
#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash)]
pub enum Mode {
    /// KAM - Keyboard Action Mode.
    KeyboardAction,
    /// IRM - Insert Mode.
    Insert,
    /// SRM - Send/Receive (local echo) Mode.
    SendReceive,
    /// LNM - Line Feed / New Line Mode.
    LineFeedNewLine,
    Unknown(u16),
}

impl Mode {
    pub fn from_raw(raw: u16) -> Self {
        match raw {
            2 => Self::KeyboardAction,
            4 => Self::Insert,
            12 => Self::SendReceive,
            20 => Self::LineFeedNewLine,
            other => Self::Unknown(other),
        }
    }
}

/// A DEC private mode settable via `CSI ? h` / `CSI ? l`.
#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash)]
pub enum PrivateMode {
    /// DECCKM - cursor keys send application sequences.
    CursorKeys,
    /// DECCOLM - 80/132 column mode.
    ColumnMode,
    /// DECOM - origin mode, cursor addressing relative to scroll region.
    Origin,
    /// DECSCNM - inverse video, swaps the default foreground/background.
    ReverseVideo,
    /// DECAWM - autowrap.
    AutoWrap,
    /// DECARM - autorepeat.
    AutoRepeat,
    /// Blinking cursor.
    BlinkingCursor,
    /// DECTCEM - cursor visibility.
    ShowCursor,
    /// Alternate screen buffer, legacy (mode 47).
    AlternateScreen,
    /// Alternate screen buffer, saving the cursor on entry (mode 1047).
    AlternateScreenSaveCursor,
    /// Save/restore cursor alongside alternate screen swap (mode 1048).
    SaveCursor,
    /// Swap to alternate screen, save cursor, and clear on entry (mode 1049).
    SwapScreenAndSetRestoreCursor,
    /// xterm's "tite inhibit" - suppress alternate screen entirely.
    TiteInhibit,
    Unknown(u16),
}

impl PrivateMode {
    pub fn from_raw(raw: u16) -> Self {
        match raw {
            1 => Self::CursorKeys,
            3 => Self::ColumnMode,
            5 => Self::ReverseVideo,
            6 => Self::Origin,
            7 => Self::AutoWrap,
            8 => Self::AutoRepeat,
            12 => Self::BlinkingCursor,
            25 => Self::ShowCursor,
            47 => Self::AlternateScreen,
            1047 => Self::AlternateScreenSaveCursor,
            1048 => Self::SaveCursor,
            1049 => Self::SwapScreenAndSetRestoreCursor,
            1070 => Self::TiteInhibit,
            other => Self::Unknown(other),
        }
    }
}

/// Mode for clearing the screen, relative to the cursor.
#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash)]
pub enum ScreenClearMode {
    Below,
    Above,
    All,
    Saved,
}

/// Mode for clearing a line, relative to the cursor.
#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash)]
pub enum LineClearMode {
    Right,
    Left,
    All,
}

/// Mode for clearing tab stops.
#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash)]
pub enum TabClearMode {
    Current,
    All,
}

/// The screen-facing half of the command interpreter's output.
///
/// Implementors own the actual cell storage; the interpreter only ever
/// calls through this trait to describe what a control sequence did.
/// Every method has an obvious no-op default where that's sound, since
/// a real terminal will only ever implement the subset it cares about.
pub trait Handler {
    fn move_cursor(&mut self, direction: Direction, count: usize, reset_column: bool);
    fn put_char(&mut self, c: char);

    fn newline(&mut self);
    fn carriage_return(&mut self);
    fn linefeed(&mut self);

    /// Current on-screen cursor position, 0-based. Needed for CPR (`CSI 6n`).
    fn cursor_position(&self) -> Position;

    fn set_cursor_position(&mut self, position: Position) {
        let _ = position;
    }
    fn set_cursor_line(&mut self, line: Line) {
        let _ = line;
    }
    fn set_cursor_column(&mut self, column: Column) {
        let _ = column;
    }

    fn set_charset(&mut self, index: CharsetIndex, charset: Charset) {
        let _ = (index, charset);
    }
    fn invoke_charset_gl(&mut self, index: CharsetIndex) {
        let _ = index;
    }
    fn invoke_charset_gr(&mut self, index: CharsetIndex) {
        let _ = index;
    }
    fn single_shift(&mut self, index: CharsetIndex) {
        let _ = index;
    }

    fn set_mode(&mut self, mode: Mode, enabled: bool) {
        let _ = (mode, enabled);
    }
    fn set_private_mode(&mut self, mode: PrivateMode, enabled: bool) {
        let _ = (mode, enabled);
    }

    fn set_attribute(&mut self, attribute: Attribute) {
        let _ = attribute;
    }
    fn reset_state(&mut self) {}

    fn set_scrolling_region(&mut self, top: usize, bottom: Option<usize>) {
        let _ = (top, bottom);
    }
    fn scroll_up(&mut self, count: usize) {
        let _ = count;
    }
    fn scroll_down(&mut self, count: usize) {
        let _ = count;
    }
    fn insert_blank_lines(&mut self, count: usize) {
        let _ = count;
    }
    fn delete_lines(&mut self, count: usize) {
        let _ = count;
    }
    fn insert_blank_chars(&mut self, count: usize) {
        let _ = count;
    }
    fn delete_chars(&mut self, count: usize) {
        let _ = count;
    }
    fn erase_chars(&mut self, count: usize) {
        let _ = count;
    }

    fn put_tab(&mut self, count: usize) {
        let _ = count;
    }
    fn back_tab(&mut self, count: usize) {
        let _ = count;
    }
    fn set_tab_stop(&mut self) {}
    fn clear_tab_stop(&mut self, mode: TabClearMode) {
        let _ = mode;
    }

    /// `selective` is set for DECSED/DECSEL (the `?` private forms), which
    /// must preserve cells previously marked protected (DECSCA).
    fn clear_screen(&mut self, mode: ScreenClearMode, selective: bool) {
        let _ = (mode, selective);
    }
    fn clear_line(&mut self, mode: LineClearMode, selective: bool) {
        let _ = (mode, selective);
    }
    fn clear_scrollback(&mut self) {}

    fn set_keypad_application_mode(&mut self, enabled: bool) {
        let _ = enabled;
    }

    /// Fallback for any final escape/CSI byte this handler doesn't
    /// otherwise recognize, so unknown sequences are at least visible
    /// in logs rather than silently vanishing.
    fn unhandled_csi(&mut self, params: &Params, intermediates: &[u8], action: char) {
        let _ = (params, intermediates, action);
    }
    fn unhandled_esc(&mut self, intermediates: &[u8], byte: u8) {
        let _ = (intermediates, byte);
    }
}
