//! Page records
//!
//! A page file starts with a 1025-byte record: a hold-time multiplier
//! byte followed by 1024 pixel bytes in row-major order, one byte per
//! pixel. Only a byte equal to 1 lights its pixel. Anything after the
//! record is ignored.

use dotpage_display::{DisplaySurface, PixelOp};

use crate::scheduler::BAR_STEPS;
use crate::traits::StorageCatalog;

/// Pixels per page side
pub const PAGE_SIDE: usize = 32;

/// Bytes of pixel data
pub const PAGE_PIXELS: usize = PAGE_SIDE * PAGE_SIDE;

/// Bytes in a full record (multiplier plus pixels)
pub const PAGE_RECORD_LEN: usize = PAGE_PIXELS + 1;

const MULTIPLIER_OFFSET: usize = 0;
const PIXELS_OFFSET: usize = 1;
const PIXEL_ON: u8 = 1;

/// Buffer for one page record
#[derive(Clone)]
pub struct PageRecord {
    bytes: [u8; PAGE_RECORD_LEN],
}

impl Default for PageRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl PageRecord {
    /// Blank record with a multiplier of zero
    pub const fn new() -> Self {
        Self {
            bytes: [0; PAGE_RECORD_LEN],
        }
    }

    /// Build a record from raw bytes, zero-padding a short input
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut record = Self::new();
        let n = data.len().min(PAGE_RECORD_LEN);
        record.bytes[..n].copy_from_slice(&data[..n]);
        record
    }

    /// Read the named page into this buffer
    ///
    /// A file shorter than a record leaves the missing tail zeroed.
    /// Returns the number of bytes actually read.
    pub fn load<S: StorageCatalog + ?Sized>(
        &mut self,
        storage: &mut S,
        name: &str,
    ) -> Result<usize, crate::traits::StorageError> {
        self.bytes = [0; PAGE_RECORD_LEN];
        let n = storage.read_record(name, &mut self.bytes)?;
        Ok(n.min(PAGE_RECORD_LEN))
    }

    /// Whether pixel (x, y) is lit
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        x < PAGE_SIDE && y < PAGE_SIDE && self.bytes[PIXELS_OFFSET + y * PAGE_SIDE + x] == PIXEL_ON
    }

    /// Hold-time multiplier byte
    pub fn multiplier(&self) -> u8 {
        self.bytes[MULTIPLIER_OFFSET]
    }

    /// Raw record bytes
    pub fn as_bytes(&self) -> &[u8; PAGE_RECORD_LEN] {
        &self.bytes
    }

    /// Draw every pixel, overwriting whatever was on the panel
    pub fn render<D: DisplaySurface + ?Sized>(&self, display: &mut D) {
        for y in 0..PAGE_SIDE {
            for x in 0..PAGE_SIDE {
                display.set_pixel(x as u8, y as u8, PixelOp::from_lit(self.pixel(x, y)));
            }
        }
    }
}

/// Length of one progress-bar step for a page
///
/// The base hold time is split into [`BAR_STEPS`] equal steps and scaled
/// by the page's multiplier, so the whole wait lasts roughly
/// `page_hold_ms * multiplier`.
pub fn hold_step_ms(page_hold_ms: u16, multiplier: u8) -> u32 {
    (page_hold_ms as u32 / BAR_STEPS as u32) * multiplier as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use dotpage_display::Framebuffer;

    #[test]
    fn test_hold_step() {
        assert_eq!(hold_step_ms(320, 5), 50);
        assert_eq!(hold_step_ms(1000, 1), 31);
        assert_eq!(hold_step_ms(31, 10), 0);
        assert_eq!(hold_step_ms(9990, 255), 312 * 255);
    }

    #[test]
    fn test_render_diagonal() {
        let mut data = [0u8; PAGE_RECORD_LEN];
        data[0] = 3;
        for i in 0..PAGE_SIDE {
            data[1 + i * PAGE_SIDE + i] = 1;
        }
        // Only exactly 1 counts as lit
        data[1 + 5] = 0xFF;
        let record = PageRecord::from_bytes(&data);

        let mut fb = Framebuffer::new();
        fb.set_pixel(5, 0, PixelOp::On);
        record.render(&mut fb);

        assert_eq!(fb.lit_count(), 32);
        for i in 0..PAGE_SIDE as u8 {
            assert!(fb.pixel(i, i));
        }
        assert!(!fb.pixel(5, 0));
        assert_eq!(record.multiplier(), 3);
    }

    #[test]
    fn test_short_record_zero_padded() {
        let record = PageRecord::from_bytes(&[7, 1, 1, 1]);
        assert_eq!(record.multiplier(), 7);
        assert!(record.pixel(2, 0));
        assert!(!record.pixel(3, 0));
        assert!(!record.pixel(31, 31));
    }

    #[test]
    fn test_pixel_out_of_bounds() {
        let record = PageRecord::from_bytes(&[1; PAGE_RECORD_LEN]);
        assert!(record.pixel(31, 31));
        assert!(!record.pixel(32, 0));
    }
}
