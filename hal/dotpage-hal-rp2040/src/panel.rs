//! Dot-matrix panel scan-out
//!
//! The framebuffer lives in a static [`PanelBuffer`] guarded by a
//! critical-section mutex. The main loop draws into it through a
//! [`PanelSurface`]; a high-priority task runs [`PanelDriver::refresh`],
//! which snapshots the buffer once per phase, shifts the phase bytes out
//! over SPI, latches them and holds output-enable for a slice of the phase
//! proportional to the brightness.

use core::cell::RefCell;
use core::convert::Infallible;

use dotpage_display::scan::on_time_us;
use dotpage_display::{
    phase_bytes, DisplaySurface, Framebuffer, PixelOp, PANEL_HEIGHT, PANEL_WIDTH, SCAN_PHASES,
};
use dotpage_hal::OutputPin;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_time::Timer;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::{DrawTarget, OriginDimensions, Pixel, Size};
use embedded_hal::spi::SpiBus;

/// Length of one scan phase (a full frame is four phases, 125 Hz)
pub const PHASE_PERIOD_US: u32 = 2_000;

type Rows = [u32; PANEL_HEIGHT as usize];

/// Framebuffer shared between the drawing code and the scan-out task
pub struct PanelBuffer {
    frame: Mutex<CriticalSectionRawMutex, RefCell<Framebuffer>>,
}

impl Default for PanelBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl PanelBuffer {
    pub const fn new() -> Self {
        Self {
            frame: Mutex::new(RefCell::new(Framebuffer::new())),
        }
    }

    fn with<R>(&self, f: impl FnOnce(&mut Framebuffer) -> R) -> R {
        self.frame.lock(|frame| f(&mut frame.borrow_mut()))
    }

    /// Copy of the rows and brightness for one scan phase
    pub fn snapshot(&self) -> (Rows, u8) {
        self.with(|fb| (*fb.rows(), fb.brightness()))
    }
}

/// [`DisplaySurface`] drawing into a shared [`PanelBuffer`]
#[derive(Clone, Copy)]
pub struct PanelSurface {
    buffer: &'static PanelBuffer,
}

impl PanelSurface {
    pub fn new(buffer: &'static PanelBuffer) -> Self {
        Self { buffer }
    }
}

impl DisplaySurface for PanelSurface {
    fn set_pixel(&mut self, x: u8, y: u8, op: PixelOp) {
        self.buffer.with(|fb| fb.set_pixel(x, y, op));
    }

    fn clear_screen(&mut self) {
        self.buffer.with(|fb| fb.clear_screen());
    }

    fn set_brightness(&mut self, level: u8) {
        self.buffer.with(|fb| fb.set_brightness(level));
    }
}

impl OriginDimensions for PanelSurface {
    fn size(&self) -> Size {
        Size::new(PANEL_WIDTH as u32, PANEL_HEIGHT as u32)
    }
}

impl DrawTarget for PanelSurface {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for pixel in pixels {
            self.buffer.with(|fb| fb.draw_iter(core::iter::once(pixel)))?;
        }
        Ok(())
    }
}

/// Row-select, latch and output-enable lines of the panel
pub struct PanelPins<P> {
    pub row_a: P,
    pub row_b: P,
    pub latch: P,
    /// Active high: the drivers light while this is set
    pub enable: P,
}

/// Scan-out driver for the two chained 32x16 modules
pub struct PanelDriver<S, P> {
    spi: S,
    pins: PanelPins<P>,
    phase: u8,
}

impl<S, P> PanelDriver<S, P>
where
    S: SpiBus<u8>,
    P: OutputPin,
{
    pub fn new(spi: S, mut pins: PanelPins<P>) -> Self {
        pins.enable.set_low();
        pins.latch.set_low();
        Self {
            spi,
            pins,
            phase: 0,
        }
    }

    /// Scan `buffer` out forever
    pub async fn refresh(&mut self, buffer: &PanelBuffer) -> ! {
        loop {
            let (rows, brightness) = buffer.snapshot();
            self.scan_phase(&rows, brightness).await;
        }
    }

    async fn scan_phase(&mut self, rows: &Rows, brightness: u8) {
        let bytes = phase_bytes(rows, self.phase);

        // A failed transfer only costs one phase of one frame
        let _ = self.spi.write(&bytes);
        let _ = self.spi.flush();

        self.pins.enable.set_low();
        self.pins.row_a.set_state(self.phase & 0x01 != 0);
        self.pins.row_b.set_state(self.phase & 0x02 != 0);
        self.pins.latch.set_high();
        self.pins.latch.set_low();

        let on_us = on_time_us(brightness, PHASE_PERIOD_US);
        if on_us > 0 {
            self.pins.enable.set_high();
            Timer::after_micros(on_us as u64).await;
            self.pins.enable.set_low();
        }
        if on_us < PHASE_PERIOD_US {
            Timer::after_micros((PHASE_PERIOD_US - on_us) as u64).await;
        }

        self.phase = (self.phase + 1) % SCAN_PHASES;
    }
}
