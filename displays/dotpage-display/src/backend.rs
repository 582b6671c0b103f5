//! Display surface trait
//!
//! Defines the interface between the page/menu logic and the panel.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::DrawTarget;

use crate::font::Font;

/// Panel width in pixels
pub const PANEL_WIDTH: u8 = 32;

/// Panel height in pixels
pub const PANEL_HEIGHT: u8 = 32;

/// Pixel write operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PixelOp {
    /// Light the pixel
    On,
    /// Blank the pixel
    Off,
    /// Invert the pixel (used for the progress bar)
    Toggle,
}

impl PixelOp {
    /// Operation that sets a pixel to the given state
    pub fn from_lit(lit: bool) -> Self {
        if lit {
            PixelOp::On
        } else {
            PixelOp::Off
        }
    }
}

/// Monochrome dot-matrix surface
///
/// Coordinates outside the panel are ignored. Implementations also act as an
/// `embedded-graphics` draw target so primitives can be drawn directly.
pub trait DisplaySurface: DrawTarget<Color = BinaryColor> {
    /// Apply `op` to the pixel at (x, y)
    fn set_pixel(&mut self, x: u8, y: u8, op: PixelOp);

    /// Blank every pixel
    fn clear_screen(&mut self);

    /// Set the panel brightness (1-255)
    fn set_brightness(&mut self, level: u8);

    /// Draw `text` with its top-left corner at (x, y)
    ///
    /// Each glyph occupies `font.width` columns followed by one blank
    /// spacing column. Characters missing from the font still advance the
    /// cursor so column alignment is preserved.
    fn draw_string(&mut self, x: u8, y: u8, text: &str, font: &Font) {
        let mut cursor = x as u16;

        for ch in text.chars() {
            if cursor >= PANEL_WIDTH as u16 {
                break;
            }

            if let Some(glyph) = font.glyph(ch) {
                for (col, bits) in glyph.iter().enumerate() {
                    let px = cursor + col as u16;
                    if px >= PANEL_WIDTH as u16 {
                        break;
                    }
                    for row in 0..font.height {
                        let lit = bits & (1 << row) != 0;
                        self.set_pixel(px as u8, y.saturating_add(row), PixelOp::from_lit(lit));
                    }
                }
            }

            cursor += font.width as u16 + 1;
        }
    }
}
