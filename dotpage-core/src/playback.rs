//! Playback position
//!
//! Playback walks catalog slots `1..len` in order and wraps back to 1.
//! Slot 0 is never shown. While paused, the encoder picks the slot
//! directly instead.

use crate::encoder::{detent, floor_mod};

/// First slot playback visits
pub const FIRST_SLOT: usize = 1;

/// Current slot and pause flag
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PlaybackState {
    current_index: usize,
    paused: bool,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackState {
    pub const fn new() -> Self {
        Self {
            current_index: FIRST_SLOT,
            paused: false,
        }
    }

    /// Slot to show next
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Move to the next slot, wrapping past the end back to the first
    pub fn advance(&mut self, catalog_len: usize) {
        self.current_index += 1;
        if self.current_index >= catalog_len {
            self.current_index = FIRST_SLOT;
        }
    }

    /// Select the slot under the encoder while paused
    ///
    /// Does nothing when there are no playable slots.
    pub fn track_encoder(&mut self, position: i32, catalog_len: usize) {
        let slots = catalog_len.saturating_sub(FIRST_SLOT);
        if slots == 0 {
            return;
        }
        let slots = i32::try_from(slots).unwrap_or(i32::MAX);
        self.current_index = floor_mod(detent(position), slots) as usize + FIRST_SLOT;
    }

    /// Pull the index back into range after the catalog changed size
    pub fn clamp(&mut self, catalog_len: usize) {
        if self.current_index < FIRST_SLOT || self.current_index >= catalog_len {
            self.current_index = FIRST_SLOT;
        }
    }
}
