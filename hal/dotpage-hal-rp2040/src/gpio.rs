//! GPIO wrappers
//!
//! Thin newtypes so embassy-rp pins can be handed to the core through the
//! `dotpage-hal` pin traits.

use embassy_rp::gpio::{Input, Output};

/// Digital input implementing [`dotpage_hal::InputPin`]
pub struct RpInput<'d>(Input<'d>);

impl<'d> RpInput<'d> {
    pub fn new(pin: Input<'d>) -> Self {
        Self(pin)
    }
}

impl dotpage_hal::InputPin for RpInput<'_> {
    fn is_high(&self) -> bool {
        self.0.is_high()
    }
}

/// Digital output implementing [`dotpage_hal::OutputPin`]
pub struct RpOutput<'d>(Output<'d>);

impl<'d> RpOutput<'d> {
    pub fn new(pin: Output<'d>) -> Self {
        Self(pin)
    }
}

impl dotpage_hal::OutputPin for RpOutput<'_> {
    fn set_high(&mut self) {
        self.0.set_high();
    }

    fn set_low(&mut self) {
        self.0.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.0.is_set_high()
    }
}
