//! PWM piezo buzzer
//!
//! Tones are square waves at 50% duty from one PWM slice. Playback blocks
//! for the tone's duration, matching how the core sequences cues.

use dotpage_core::traits::{Annunciator, REST};
use embassy_rp::clocks::clk_sys_freq;
use embassy_rp::pwm::{Config, Pwm};
use embassy_time::{block_for, Duration};
use fixed::traits::ToFixed;

/// Integer clock divider for the buzzer slice
///
/// With a 125 MHz system clock this leaves a 1.95 MHz counter, enough
/// range to reach 30 Hz within the 16-bit TOP register.
pub const PWM_DIVIDER: u8 = 64;

/// Piezo driven from a PWM output
pub struct PwmBuzzer<'d> {
    pwm: Pwm<'d>,
}

impl<'d> PwmBuzzer<'d> {
    /// Take a PWM output; it is kept silent until a tone plays
    pub fn new(mut pwm: Pwm<'d>) -> Self {
        pwm.set_config(&silent_config());
        Self { pwm }
    }

    fn silence(&mut self) {
        self.pwm.set_config(&silent_config());
    }
}

impl Annunciator for PwmBuzzer<'_> {
    fn tone(&mut self, freq_hz: u16, duration_ms: u16) {
        if freq_hz == REST {
            self.silence();
        } else {
            self.pwm.set_config(&tone_config(clk_sys_freq(), freq_hz));
        }

        block_for(Duration::from_millis(duration_ms as u64));
        self.silence();
    }
}

fn silent_config() -> Config {
    let mut config = Config::default();
    config.divider = PWM_DIVIDER.to_fixed();
    config.compare_a = 0;
    config
}

/// PWM configuration producing `freq_hz` from a `sys_hz` system clock
fn tone_config(sys_hz: u32, freq_hz: u16) -> Config {
    let counter_hz = sys_hz / PWM_DIVIDER as u32;
    let top = (counter_hz / (freq_hz.max(1) as u32)).saturating_sub(1);
    let top = top.min(u16::MAX as u32) as u16;

    let mut config = silent_config();
    config.top = top;
    config.compare_a = top / 2;
    config
}
