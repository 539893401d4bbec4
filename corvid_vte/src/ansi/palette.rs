//! The 256-entry indexed color table and SGR color resolution.
//!
//! Entries 0-15 are the named ANSI colors and come from whichever named
//! palette is selected; 16-231 are the 6x6x6 color cube; 232-255 are a
//! 24-step grayscale ramp. Both ranges beyond 16 are fixed by convention
//! and never change with the palette.

use super::handler::Rgb;

const CUBE_LEVELS: [u8; 6] = [0x00, 0x5F, 0x87, 0xAF, 0xD7, 0xFF];

/// One of the built-in named 16-color palettes, or `Custom` for a
/// host-installed one (`Vte::set_custom_palette`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaletteName {
    #[default]
    Default,
    Custom,
    Solarized,
    SolarizedBlack,
    SolarizedWhite,
    SoftBlack,
    Base16Dark,
    Base16Light,
}

impl PaletteName {
    fn ansi16(self) -> [Rgb; 16] {
        match self {
            PaletteName::Default | PaletteName::Custom => DEFAULT_ANSI16,
            PaletteName::Solarized => SOLARIZED_ANSI16,
            PaletteName::SolarizedBlack => SOLARIZED_BLACK_ANSI16,
            PaletteName::SolarizedWhite => SOLARIZED_WHITE_ANSI16,
            PaletteName::SoftBlack => SOFT_BLACK_ANSI16,
            PaletteName::Base16Dark => BASE16_DARK_ANSI16,
            PaletteName::Base16Light => BASE16_LIGHT_ANSI16,
        }
    }

    fn default_fg_bg(self) -> (Rgb, Rgb) {
        match self {
            PaletteName::Solarized | PaletteName::SolarizedBlack | PaletteName::SolarizedWhite => {
                (rgb(0x83, 0x94, 0x96), rgb(0x00, 0x2B, 0x36))
            }
            _ => (rgb(0xE5, 0xE5, 0xE5), rgb(0x00, 0x00, 0x00)),
        }
    }
}

const fn rgb(r: u8, g: u8, b: u8) -> Rgb {
    Rgb { r, g, b }
}

#[rustfmt::skip]
const DEFAULT_ANSI16: [Rgb; 16] = [
    rgb(0x00, 0x00, 0x00), rgb(0xCD, 0x00, 0x00), rgb(0x00, 0xCD, 0x00), rgb(0xCD, 0xCD, 0x00),
    rgb(0x00, 0x00, 0xEE), rgb(0xCD, 0x00, 0xCD), rgb(0x00, 0xCD, 0xCD), rgb(0xE5, 0xE5, 0xE5),
    rgb(0x7F, 0x7F, 0x7F), rgb(0xFF, 0x00, 0x00), rgb(0x00, 0xFF, 0x00), rgb(0xFF, 0xFF, 0x00),
    rgb(0x5C, 0x5C, 0xFF), rgb(0xFF, 0x00, 0xFF), rgb(0x00, 0xFF, 0xFF), rgb(0xFF, 0xFF, 0xFF),
];

#[rustfmt::skip]
const SOLARIZED_ANSI16: [Rgb; 16] = [
    rgb(0x07, 0x36, 0x42), rgb(0xDC, 0x32, 0x2F), rgb(0x85, 0x99, 0x00), rgb(0xB5, 0x89, 0x00),
    rgb(0x26, 0x8B, 0xD2), rgb(0xD3, 0x36, 0x82), rgb(0x2A, 0xA1, 0x98), rgb(0xEE, 0xE8, 0xD5),
    rgb(0x00, 0x2B, 0x36), rgb(0xCB, 0x4B, 0x16), rgb(0x58, 0x6E, 0x75), rgb(0x65, 0x7B, 0x83),
    rgb(0x83, 0x94, 0x96), rgb(0x6C, 0x71, 0xC4), rgb(0x93, 0xA1, 0xA1), rgb(0xFD, 0xF6, 0xE3),
];

#[rustfmt::skip]
const SOLARIZED_BLACK_ANSI16: [Rgb; 16] = {
    let mut palette = SOLARIZED_ANSI16;
    palette[0] = rgb(0x00, 0x00, 0x00);
    palette[8] = rgb(0x00, 0x00, 0x00);
    palette
};

#[rustfmt::skip]
const SOLARIZED_WHITE_ANSI16: [Rgb; 16] = {
    let mut palette = SOLARIZED_ANSI16;
    palette[7] = rgb(0xFF, 0xFF, 0xFF);
    palette[15] = rgb(0xFF, 0xFF, 0xFF);
    palette
};

#[rustfmt::skip]
const SOFT_BLACK_ANSI16: [Rgb; 16] = {
    let mut palette = DEFAULT_ANSI16;
    palette[0] = rgb(0x1A, 0x1A, 0x1A);
    palette[8] = rgb(0x4D, 0x4D, 0x4D);
    palette
};

#[rustfmt::skip]
const BASE16_DARK_ANSI16: [Rgb; 16] = [
    rgb(0x18, 0x18, 0x18), rgb(0xAB, 0x46, 0x42), rgb(0xA1, 0xB5, 0x6C), rgb(0xF7, 0xCA, 0x88),
    rgb(0x7C, 0xAF, 0xC2), rgb(0xBA, 0x8B, 0xAF), rgb(0x86, 0xC1, 0xB9), rgb(0xD8, 0xD8, 0xD8),
    rgb(0x58, 0x58, 0x58), rgb(0xAB, 0x46, 0x42), rgb(0xA1, 0xB5, 0x6C), rgb(0xF7, 0xCA, 0x88),
    rgb(0x7C, 0xAF, 0xC2), rgb(0xBA, 0x8B, 0xAF), rgb(0x86, 0xC1, 0xB9), rgb(0xF8, 0xF8, 0xF8),
];

#[rustfmt::skip]
const BASE16_LIGHT_ANSI16: [Rgb; 16] = [
    rgb(0xF8, 0xF8, 0xF8), rgb(0xAB, 0x46, 0x42), rgb(0xA1, 0xB5, 0x6C), rgb(0xF7, 0xCA, 0x88),
    rgb(0x7C, 0xAF, 0xC2), rgb(0xBA, 0x8B, 0xAF), rgb(0x86, 0xC1, 0xB9), rgb(0x58, 0x58, 0x58),
    rgb(0xD8, 0xD8, 0xD8), rgb(0xAB, 0x46, 0x42), rgb(0xA1, 0xB5, 0x6C), rgb(0xF7, 0xCA, 0x88),
    rgb(0x7C, 0xAF, 0xC2), rgb(0xBA, 0x8B, 0xAF), rgb(0x86, 0xC1, 0xB9), rgb(0x18, 0x18, 0x18),
];

/// A resolved 256-entry indexed color table, plus the FOREGROUND/
/// BACKGROUND entries that round the spec's 18-entry palette out, and any
/// per-index overrides installed by OSC 4/104.
#[derive(Debug, Clone)]
pub struct Palette {
    entries: [Rgb; 256],
    named: PaletteName,
    foreground: Rgb,
    background: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self::named(PaletteName::Default)
    }
}

impl Palette {
    pub fn named(named: PaletteName) -> Self {
        let mut entries = [Rgb::default(); 256];

        entries[..16].copy_from_slice(&named.ansi16());

        for (i, entry) in entries.iter_mut().enumerate().skip(16).take(216) {
            let cube_index = i - 16;
            let r = cube_index / 36;
            let g = (cube_index / 6) % 6;
            let b = cube_index % 6;

            *entry = rgb(CUBE_LEVELS[r], CUBE_LEVELS[g], CUBE_LEVELS[b]);
        }

        for (i, entry) in entries.iter_mut().enumerate().skip(232) {
            let level = ((i - 232) * 10 + 8) as u8;
            *entry = rgb(level, level, level);
        }

        let (foreground, background) = named.default_fg_bg();

        Self { entries, named, foreground, background }
    }

    /// Install a host-supplied 18-entry palette (16 ANSI colors, then
    /// FOREGROUND, then BACKGROUND), per spec.md §6.
    pub fn custom(entries: &[Rgb; 18]) -> Self {
        let mut palette = Self::named(PaletteName::Custom);

        palette.entries[..16].copy_from_slice(&entries[..16]);
        palette.foreground = entries[16];
        palette.background = entries[17];

        palette
    }

    pub fn resolve(&self, index: u8) -> Rgb {
        self.entries[index as usize]
    }

    pub fn foreground(&self) -> Rgb {
        self.foreground
    }

    pub fn background(&self) -> Rgb {
        self.background
    }

    pub fn set(&mut self, index: u8, color: Rgb) {
        self.entries[index as usize] = color;
    }

    /// Reset one palette entry (or, with `None`, the whole palette) back
    /// to its procedural/named value, discarding any OSC 4/104 override.
    pub fn reset(&mut self, index: Option<u8>) {
        match index {
            Some(index) if (index as usize) < 16 => {
                self.entries[index as usize] = self.named.ansi16()[index as usize];
            }
            Some(index) => self.entries[index as usize] = Self::named(self.named).entries[index as usize],
            None => *self = Self::named(self.named),
        }
    }

    /// Apply the bold-promotion rule: a bold SGR attribute brightens an
    /// indexed color drawn from the low half of the 16-color palette.
    pub fn resolve_with_bold(&self, index: u8, bold: bool) -> Rgb {
        let index = if bold && index < 8 { index + 8 } else { index };
        self.resolve(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_corner_is_black() {
        let palette = Palette::default();
        assert_eq!(palette.resolve(16), rgb(0, 0, 0));
    }

    #[test]
    fn grayscale_ramp_first_step() {
        let palette = Palette::default();
        assert_eq!(palette.resolve(232), rgb(8, 8, 8));
    }

    #[test]
    fn bold_promotes_low_palette_entries() {
        let palette = Palette::default();
        assert_eq!(palette.resolve_with_bold(1, true), palette.resolve(9));
        assert_eq!(palette.resolve_with_bold(9, true), palette.resolve(9));
    }

    #[test]
    fn custom_overrides_all_entries() {
        let mut entries = [Rgb::default(); 18];
        entries[1] = rgb(1, 2, 3);
        entries[16] = rgb(9, 9, 9);

        let palette = Palette::custom(&entries);
        assert_eq!(palette.resolve(1), rgb(1, 2, 3));
        assert_eq!(palette.foreground(), rgb(9, 9, 9));
        assert_eq!(palette.resolve(2), Palette::default().resolve(2));
    }
}
