//! Single-button gesture classifier
//!
//! Turns the raw level of the encoder push switch into click and
//! long-press gestures. The level is debounced first; a press released
//! before the long-press threshold is a click, and a press held past it
//! reports one long press and then nothing until release.

use dotpage_hal::InputPin;

use crate::traits::{Clock, InputEvent, InputSource};

/// Button timing thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonTiming {
    /// Level must be stable this long before it counts
    pub debounce_ms: u32,
    /// Hold time that turns a press into a long press
    pub long_press_ms: u32,
}

impl Default for ButtonTiming {
    fn default() -> Self {
        Self {
            debounce_ms: 50,
            long_press_ms: 800,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Released,
    Pressed { since_ms: u32 },
    Held,
}

/// Debouncing click/long-press state machine
#[derive(Debug, Clone)]
pub struct ButtonClassifier {
    timing: ButtonTiming,
    raw: bool,
    raw_since_ms: u32,
    stable: bool,
    phase: Phase,
}

impl ButtonClassifier {
    /// Create a classifier with the button released
    pub fn new(timing: ButtonTiming) -> Self {
        Self {
            timing,
            raw: false,
            raw_since_ms: 0,
            stable: false,
            phase: Phase::Released,
        }
    }

    /// Feed the current level and time, returning a gesture if one completed
    pub fn update(&mut self, pressed: bool, now_ms: u32) -> Option<InputEvent> {
        if pressed != self.raw {
            self.raw = pressed;
            self.raw_since_ms = now_ms;
        }

        if self.raw != self.stable
            && now_ms.wrapping_sub(self.raw_since_ms) >= self.timing.debounce_ms
        {
            self.stable = self.raw;
        }

        match (self.phase, self.stable) {
            (Phase::Released, true) => {
                self.phase = Phase::Pressed { since_ms: now_ms };
                None
            }
            (Phase::Pressed { since_ms }, true) => {
                if now_ms.wrapping_sub(since_ms) >= self.timing.long_press_ms {
                    self.phase = Phase::Held;
                    Some(InputEvent::LongPress)
                } else {
                    None
                }
            }
            (Phase::Pressed { .. }, false) => {
                self.phase = Phase::Released;
                Some(InputEvent::Click)
            }
            (Phase::Held, false) => {
                self.phase = Phase::Released;
                None
            }
            (Phase::Released, false) | (Phase::Held, true) => None,
        }
    }

    /// Whether a debounced press is in progress
    pub fn is_pressed(&self) -> bool {
        self.stable
    }
}

/// Active-low push switch read through a pin and classified on poll
pub struct Button<P, C> {
    pin: P,
    clock: C,
    classifier: ButtonClassifier,
}

impl<P: InputPin, C: Clock> Button<P, C> {
    pub fn new(pin: P, clock: C, timing: ButtonTiming) -> Self {
        Self {
            pin,
            clock,
            classifier: ButtonClassifier::new(timing),
        }
    }
}

impl<P: InputPin, C: Clock> InputSource for Button<P, C> {
    fn poll(&mut self) -> Option<InputEvent> {
        let pressed = self.pin.is_low();
        self.classifier.update(pressed, self.clock.now_ms())
    }
}
