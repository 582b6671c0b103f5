//! Monotonic millisecond clock

/// Millisecond time source
///
/// The counter wraps; compare instants with `wrapping_sub`.
pub trait Clock {
    /// Milliseconds since boot
    fn now_ms(&self) -> u32;
}

/// Spin until `ms` milliseconds have passed on `clock`
pub fn busy_wait<C: Clock + ?Sized>(clock: &C, ms: u32) {
    let start = clock.now_ms();
    while clock.now_ms().wrapping_sub(start) < ms {}
}
