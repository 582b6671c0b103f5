//! Piezo tone output

/// Rest (no sound) frequency
pub const REST: u16 = 0;

/// C2 in Hz, used by the fault alarm
pub const NOTE_C2: u16 = 65;

/// C3 in Hz, used for UI feedback
pub const NOTE_C3: u16 = 131;

/// Blocking tone generator
pub trait Annunciator {
    /// Sound `freq_hz` for `duration_ms`, returning when the tone ends
    ///
    /// A frequency of [`REST`] stays silent for the duration.
    fn tone(&mut self, freq_hz: u16, duration_ms: u16);
}

/// One note of a cue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tone {
    pub freq_hz: u16,
    pub duration_ms: u16,
}

impl Tone {
    pub const fn new(freq_hz: u16, duration_ms: u16) -> Self {
        Self {
            freq_hz,
            duration_ms,
        }
    }

    pub const fn rest(duration_ms: u16) -> Self {
        Self::new(REST, duration_ms)
    }
}

/// Short click on every button press
pub const CLICK: [Tone; 1] = [Tone::new(NOTE_C3, 10)];

/// Double chirp on menu open and close
pub const CHIRP: [Tone; 3] = [Tone::new(NOTE_C3, 10), Tone::rest(5), Tone::new(NOTE_C3, 10)];

/// One period of the fault alarm
pub const ALARM: [Tone; 4] = [
    Tone::new(NOTE_C2, 100),
    Tone::rest(50),
    Tone::new(NOTE_C2, 100),
    Tone::rest(150),
];

/// Play `tones` in order
pub fn play<A: Annunciator + ?Sized>(annunciator: &mut A, tones: &[Tone]) {
    for t in tones {
        annunciator.tone(t.freq_hz, t.duration_ms);
    }
}
