//! Panel framebuffer
//!
//! One bit per pixel, one `u32` per row (bit `x` is column `x`). The
//! scan-out driver reads rows from here; the core writes through
//! [`DisplaySurface`].

use core::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::{DrawTarget, OriginDimensions, Pixel, Size};

use crate::backend::{DisplaySurface, PixelOp, PANEL_HEIGHT, PANEL_WIDTH};

/// Brightness the panel starts at before settings are loaded
pub const DEFAULT_BRIGHTNESS: u8 = 127;

/// 32x32 one-bit framebuffer
#[derive(Clone, PartialEq, Eq)]
pub struct Framebuffer {
    rows: [u32; PANEL_HEIGHT as usize],
    brightness: u8,
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Framebuffer {
    /// Create a blank framebuffer
    pub const fn new() -> Self {
        Self {
            rows: [0; PANEL_HEIGHT as usize],
            brightness: DEFAULT_BRIGHTNESS,
        }
    }

    /// Whether the pixel at (x, y) is lit
    pub fn pixel(&self, x: u8, y: u8) -> bool {
        if x >= PANEL_WIDTH || y >= PANEL_HEIGHT {
            return false;
        }
        self.rows[y as usize] & (1 << x) != 0
    }

    /// Bitmask of row `y`
    pub fn row(&self, y: u8) -> u32 {
        self.rows.get(y as usize).copied().unwrap_or(0)
    }

    /// All rows, top to bottom
    pub fn rows(&self) -> &[u32; PANEL_HEIGHT as usize] {
        &self.rows
    }

    /// Current brightness
    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Number of lit pixels
    pub fn lit_count(&self) -> u32 {
        self.rows.iter().map(|r| r.count_ones()).sum()
    }

    /// Check if nothing is lit
    pub fn is_blank(&self) -> bool {
        self.rows.iter().all(|&r| r == 0)
    }
}

impl DisplaySurface for Framebuffer {
    fn set_pixel(&mut self, x: u8, y: u8, op: PixelOp) {
        if x >= PANEL_WIDTH || y >= PANEL_HEIGHT {
            return;
        }
        let row = &mut self.rows[y as usize];
        let mask = 1u32 << x;
        match op {
            PixelOp::On => *row |= mask,
            PixelOp::Off => *row &= !mask,
            PixelOp::Toggle => *row ^= mask,
        }
    }

    fn clear_screen(&mut self) {
        self.rows = [0; PANEL_HEIGHT as usize];
    }

    fn set_brightness(&mut self, level: u8) {
        self.brightness = level;
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        Size::new(PANEL_WIDTH as u32, PANEL_HEIGHT as u32)
    }
}

impl DrawTarget for Framebuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let (Ok(x), Ok(y)) = (u8::try_from(point.x), u8::try_from(point.y)) {
                self.set_pixel(x, y, PixelOp::from_lit(color.is_on()));
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for Framebuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "Framebuffer(brightness={})", self.brightness)?;
        for row in &self.rows {
            for x in 0..PANEL_WIDTH {
                f.write_str(if row & (1 << x) != 0 { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Framebuffer {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "Framebuffer[lit={}, brightness={}]",
            self.lit_count(),
            self.brightness
        );
    }
}
