//! Fixed-width bitmap fonts
//!
//! Glyphs are stored column by column, one byte per column, with bit 0 as
//! the top row. Only fonts up to 8 pixels tall are supported.

/// A fixed-width bitmap font
#[derive(Debug, Clone, Copy)]
pub struct Font {
    /// Glyph width in columns
    pub width: u8,
    /// Glyph height in rows (max 8)
    pub height: u8,
    /// First character covered by the table
    pub first_char: u8,
    /// Number of consecutive characters covered
    pub char_count: u8,
    glyphs: &'static [u8],
}

impl Font {
    /// Column bytes for `ch`, or `None` if the font does not cover it
    pub fn glyph(&self, ch: char) -> Option<&'static [u8]> {
        let code = u32::from(ch);
        let first = u32::from(self.first_char);
        if code < first || code >= first + u32::from(self.char_count) {
            return None;
        }

        let width = self.width as usize;
        let start = (code - first) as usize * width;
        self.glyphs.get(start..start + width)
    }

    /// Width in pixels of `text` including inter-glyph spacing
    pub fn text_width(&self, text: &str) -> u16 {
        let n = text.chars().count() as u16;
        if n == 0 {
            0
        } else {
            n * (self.width as u16 + 1) - 1
        }
    }
}

/// Compact digits-only font used for setting values
pub const NUMBER_FONT_3X5: Font = Font {
    width: 3,
    height: 5,
    first_char: b'0',
    char_count: 10,
    glyphs: &[
        0x1F, 0x11, 0x1F, // 0
        0x11, 0x1F, 0x10, // 1
        0x1D, 0x15, 0x16, // 2
        0x15, 0x15, 0x1E, // 3
        0x07, 0x04, 0x1E, // 4
        0x17, 0x15, 0x19, // 5
        0x1F, 0x14, 0x1C, // 6
        0x01, 0x1D, 0x03, // 7
        0x1F, 0x15, 0x1F, // 8
        0x07, 0x05, 0x1F, // 9
    ],
};

/// General label font covering space through 'Z'
pub const LABEL_FONT_5X7: Font = Font {
    width: 5,
    height: 7,
    first_char: b' ',
    char_count: 59,
    glyphs: &[
        0x00, 0x00, 0x00, 0x00, 0x00, // ' '
        0x00, 0x00, 0x5F, 0x00, 0x00, // !
        0x00, 0x07, 0x00, 0x07, 0x00, // "
        0x14, 0x7F, 0x14, 0x7F, 0x14, // #
        0x24, 0x2A, 0x7F, 0x2A, 0x12, // $
        0x23, 0x13, 0x08, 0x64, 0x62, // %
        0x36, 0x49, 0x55, 0x22, 0x50, // &
        0x00, 0x05, 0x03, 0x00, 0x00, // '
        0x00, 0x1C, 0x22, 0x41, 0x00, // (
        0x00, 0x41, 0x22, 0x1C, 0x00, // )
        0x08, 0x2A, 0x1C, 0x2A, 0x08, // *
        0x08, 0x08, 0x3E, 0x08, 0x08, // +
        0x00, 0x50, 0x30, 0x00, 0x00, // ,
        0x08, 0x08, 0x08, 0x08, 0x08, // -
        0x00, 0x60, 0x60, 0x00, 0x00, // .
        0x20, 0x10, 0x08, 0x04, 0x02, // /
        0x3E, 0x51, 0x49, 0x45, 0x3E, // 0
        0x00, 0x42, 0x7F, 0x40, 0x00, // 1
        0x42, 0x61, 0x51, 0x49, 0x46, // 2
        0x21, 0x41, 0x45, 0x4B, 0x31, // 3
        0x18, 0x14, 0x12, 0x7F, 0x10, // 4
        0x27, 0x45, 0x45, 0x45, 0x39, // 5
        0x3C, 0x4A, 0x49, 0x49, 0x30, // 6
        0x01, 0x71, 0x09, 0x05, 0x03, // 7
        0x36, 0x49, 0x49, 0x49, 0x36, // 8
        0x06, 0x49, 0x49, 0x29, 0x1E, // 9
        0x00, 0x36, 0x36, 0x00, 0x00, // :
        0x00, 0x56, 0x36, 0x00, 0x00, // ;
        0x00, 0x08, 0x14, 0x22, 0x41, // <
        0x14, 0x14, 0x14, 0x14, 0x14, // =
        0x41, 0x22, 0x14, 0x08, 0x00, // >
        0x02, 0x01, 0x51, 0x09, 0x06, // ?
        0x32, 0x49, 0x79, 0x41, 0x3E, // @
        0x7E, 0x11, 0x11, 0x11, 0x7E, // A
        0x7F, 0x49, 0x49, 0x49, 0x36, // B
        0x3E, 0x41, 0x41, 0x41, 0x22, // C
        0x7F, 0x41, 0x41, 0x22, 0x1C, // D
        0x7F, 0x49, 0x49, 0x49, 0x41, // E
        0x7F, 0x09, 0x09, 0x01, 0x01, // F
        0x3E, 0x41, 0x41, 0x51, 0x32, // G
        0x7F, 0x08, 0x08, 0x08, 0x7F, // H
        0x00, 0x41, 0x7F, 0x41, 0x00, // I
        0x20, 0x40, 0x41, 0x3F, 0x01, // J
        0x7F, 0x08, 0x14, 0x22, 0x41, // K
        0x7F, 0x40, 0x40, 0x40, 0x40, // L
        0x7F, 0x02, 0x04, 0x02, 0x7F, // M
        0x7F, 0x04, 0x08, 0x10, 0x7F, // N
        0x3E, 0x41, 0x41, 0x41, 0x3E, // O
        0x7F, 0x09, 0x09, 0x09, 0x06, // P
        0x3E, 0x41, 0x51, 0x21, 0x5E, // Q
        0x7F, 0x09, 0x19, 0x29, 0x46, // R
        0x46, 0x49, 0x49, 0x49, 0x31, // S
        0x01, 0x01, 0x7F, 0x01, 0x01, // T
        0x3F, 0x40, 0x40, 0x40, 0x3F, // U
        0x1F, 0x20, 0x40, 0x20, 0x1F, // V
        0x7F, 0x20, 0x18, 0x20, 0x7F, // W
        0x63, 0x14, 0x08, 0x14, 0x63, // X
        0x03, 0x04, 0x78, 0x04, 0x03, // Y
        0x61, 0x51, 0x49, 0x45, 0x43, // Z
    ],
};
