use corvid_vte::ansi::handler::{Color, NamedColor};

/// A single on-screen character cell.
///
/// Tracks the same graphic-rendition attributes as `corvid_vte::ansi::handler::
/// Attributes`; this mirrors rather than reuses that type because the screen
/// also needs to represent "no character printed yet" (`char: None`), which
/// has no SGR equivalent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub char: Option<char>,
    pub foreground: Color,
    pub background: Color,
    pub bold: bool,
    pub dim: bool,
    pub italic: bool,
    pub underline: bool,
    pub double_underline: bool,
    pub blink: bool,
    pub inverse: bool,
    pub hidden: bool,
    pub strikeout: bool,
    pub protect: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            char: None,
            background: Color::Named(NamedColor::Background),
            foreground: Color::Named(NamedColor::Foreground),
            bold: false,
            dim: false,
            italic: false,
            underline: false,
            double_underline: false,
            blink: false,
            inverse: false,
            hidden: false,
            strikeout: false,
            protect: false,
        }
    }
}

impl Cell {
    /// Copy every rendition attribute from `template`, leaving `char` alone.
    pub fn apply_template(&mut self, template: &Cell) {
        self.background = template.background;
        self.foreground = template.foreground;
        self.bold = template.bold;
        self.dim = template.dim;
        self.italic = template.italic;
        self.underline = template.underline;
        self.double_underline = template.double_underline;
        self.blink = template.blink;
        self.inverse = template.inverse;
        self.hidden = template.hidden;
        self.strikeout = template.strikeout;
        self.protect = template.protect;
    }
}
