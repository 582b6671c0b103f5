//! Millisecond clock over the embassy time driver

use dotpage_core::traits::Clock;
use embassy_time::Instant;

/// [`Clock`] reading the embassy uptime counter
///
/// Wraps after about 49 days; the core compares timestamps with wrapping
/// arithmetic.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_ms(&self) -> u32 {
        Instant::now().as_millis() as u32
    }
}
