//! User input traits

/// Classified button gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    /// Short press and release
    Click,
    /// Press held past the long-press threshold (fires once per hold)
    LongPress,
}

/// Source of button gestures, polled from the main loop
pub trait InputSource {
    /// Return the next pending gesture, if any
    fn poll(&mut self) -> Option<InputEvent>;
}

/// Shared quadrature position counter
///
/// The board updates the count asynchronously; the core reads it and
/// occasionally re-biases it when entering or leaving a menu edit.
pub trait EncoderPosition {
    /// Current position in raw ticks
    fn read(&self) -> i32;

    /// Overwrite the position
    fn write(&mut self, position: i32);
}
