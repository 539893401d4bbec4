//! ISO 2022 character-set designation and invocation.
//!
//! Four slots (G0-G3) can each be designated a character set; GL and GR
//! point at whichever slot is currently active for the low (0x21-0x7E)
//! and high (0xA1-0xFE) halves of the code table, and SS2/SS3 override
//! the next single character only. We only model the sets this terminal
//! actually needs: ASCII, DEC Special Graphics (line drawing), and DEC
//! Supplemental - anything else designated falls back to ASCII, matching
//! national-replacement-charset support being out of scope.

use super::handler::{Charset, CharsetIndex};

#[derive(Debug, Clone, Copy)]
pub struct CharsetState {
    g: [Charset; 4],
    gl: CharsetIndex,
    gr: CharsetIndex,
    single_shift: Option<CharsetIndex>,
}

impl Default for CharsetState {
    fn default() -> Self {
        Self {
            g: [Charset::Ascii; 4],
            gl: CharsetIndex::G0,
            gr: CharsetIndex::G1,
            single_shift: None,
        }
    }
}

impl CharsetState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn designate(&mut self, index: CharsetIndex, charset: Charset) {
        self.g[slot(index)] = charset;
    }

    pub fn invoke_gl(&mut self, index: CharsetIndex) {
        self.gl = index;
    }

    pub fn invoke_gr(&mut self, index: CharsetIndex) {
        self.gr = index;
    }

    pub fn gl(&self) -> CharsetIndex {
        self.gl
    }

    pub fn gr(&self) -> CharsetIndex {
        self.gr
    }

    /// SS2/SS3 affect only the very next printed character.
    pub fn single_shift(&mut self, index: CharsetIndex) {
        self.single_shift = Some(index);
    }

    /// Translate a character through whichever charset is currently in
    /// effect, consuming any pending single shift.
    ///
    /// GL covers 0x21-0x7E, GR covers 0xA1-0xFE; everything else (space,
    /// DEL, NBSP, and anything outside the 8-bit range) passes through
    /// unchanged regardless of which charsets are designated.
    pub fn translate(&mut self, c: char) -> char {
        let code = c as u32;

        let index = match self.single_shift.take() {
            Some(index) => index,
            None => match code {
                0x21..=0x7E => self.gl,
                0xA1..=0xFE => self.gr,
                _ => return c,
            },
        };

        self.g[slot(index)].map(c)
    }
}

fn slot(index: CharsetIndex) -> usize {
    match index {
        CharsetIndex::G0 => 0,
        CharsetIndex::G1 => 1,
        CharsetIndex::G2 => 2,
        CharsetIndex::G3 => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_is_identity() {
        let mut state = CharsetState::default();
        assert_eq!(state.translate('q'), 'q');
    }

    #[test]
    fn dec_special_graphics_maps_line_drawing() {
        let mut state = CharsetState::default();
        state.designate(CharsetIndex::G0, Charset::DecSpecial);
        assert_eq!(state.translate('q'), '─');
    }

    #[test]
    fn single_shift_applies_once() {
        let mut state = CharsetState::default();
        state.designate(CharsetIndex::G2, Charset::DecSpecial);
        state.single_shift(CharsetIndex::G2);

        assert_eq!(state.translate('q'), '─');
        assert_eq!(state.translate('q'), 'q');
    }
}
