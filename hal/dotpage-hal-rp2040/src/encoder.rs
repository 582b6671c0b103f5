//! Interrupt-driven quadrature encoder counter
//!
//! A task waits on edges of both encoder pins and feeds the levels to the
//! core's [`QuadratureDecoder`]; the running count lives in an atomic so
//! the main loop can read and rewrite it at any time.

use dotpage_core::encoder::QuadratureDecoder;
use dotpage_core::traits::EncoderPosition;
use embassy_futures::select::select;
use embassy_rp::gpio::Input;
use portable_atomic::{AtomicI32, Ordering};

/// Shared raw encoder count (four ticks per detent)
pub struct EncoderCounter {
    position: AtomicI32,
}

impl Default for EncoderCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl EncoderCounter {
    pub const fn new() -> Self {
        Self {
            position: AtomicI32::new(0),
        }
    }

    /// Current raw count
    pub fn get(&self) -> i32 {
        self.position.load(Ordering::Relaxed)
    }

    /// Overwrite the raw count
    pub fn set(&self, position: i32) {
        self.position.store(position, Ordering::Relaxed);
    }

    /// Apply a decoded tick
    pub fn add(&self, delta: i32) {
        self.position.fetch_add(delta, Ordering::Relaxed);
    }

    /// Decode edges from `a`/`b` into this counter forever
    pub async fn track(&self, mut a: Input<'_>, mut b: Input<'_>) -> ! {
        let mut decoder = QuadratureDecoder::new(a.is_high(), b.is_high());

        loop {
            select(a.wait_for_any_edge(), b.wait_for_any_edge()).await;

            let delta = decoder.update(a.is_high(), b.is_high());
            if delta != 0 {
                self.add(delta as i32);
            }
        }
    }
}

impl EncoderPosition for &'static EncoderCounter {
    fn read(&self) -> i32 {
        self.get()
    }

    fn write(&mut self, position: i32) {
        self.set(position);
    }
}
