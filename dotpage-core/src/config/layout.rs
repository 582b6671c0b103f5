//! Settings layout in the persistent store
//!
//! Three fields at fixed offsets from [`SETTINGS_BASE`]:
//!
//! | Offset | Size | Field                        |
//! |--------|------|------------------------------|
//! | +0     | 2    | page hold ms, little endian  |
//! | +2     | 1    | bar position ordinal         |
//! | +3     | 1    | brightness                   |
//!
//! Each field is validated on load on its own; a field that is out of
//! range (including an erased `0xFF` cell) leaves the default in place.

use dotpage_hal::{PersistentStore, StoreError};

use super::settings::{BarPosition, Settings, MAX_PAGE_HOLD_MS};

/// Start of the settings block
pub const SETTINGS_BASE: u16 = 350;

pub const PAGE_HOLD_OFFSET: u16 = SETTINGS_BASE;
pub const BAR_POSITION_OFFSET: u16 = SETTINGS_BASE + 2;
pub const BRIGHTNESS_OFFSET: u16 = SETTINGS_BASE + 3;

/// Bytes covered by the settings block
pub const SETTINGS_LEN: u16 = 4;

/// Writes the device accepts over its lifetime
pub const MAX_SETTINGS_WRITES: u16 = 80;

/// Which fields were accepted from the store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LoadReport {
    pub page_hold: bool,
    pub bar_position: bool,
    pub brightness: bool,
}

impl Settings {
    /// Overwrite fields with valid stored values
    ///
    /// Unreadable or invalid fields keep their current value.
    pub fn load<S: PersistentStore + ?Sized>(&mut self, store: &mut S) -> LoadReport {
        let mut report = LoadReport::default();

        if let Ok(ms) = store.read_u16(PAGE_HOLD_OFFSET) {
            if ms <= MAX_PAGE_HOLD_MS {
                self.page_hold_ms = ms;
                report.page_hold = true;
            }
        }

        if let Ok(ordinal) = store.read_u8(BAR_POSITION_OFFSET) {
            if let Some(bar) = BarPosition::from_ordinal(ordinal) {
                self.bar_position = bar;
                report.bar_position = true;
            }
        }

        if let Ok(level) = store.read_u8(BRIGHTNESS_OFFSET) {
            if level >= 1 {
                self.brightness = level;
                report.brightness = true;
            }
        }

        report
    }

    /// Write every field to the store
    ///
    /// All three writes are attempted; the first error is returned.
    pub fn save<S: PersistentStore + ?Sized>(&self, store: &mut S) -> Result<(), StoreError> {
        let hold = store.write_u16(PAGE_HOLD_OFFSET, self.page_hold_ms);
        let bar = store.write_u8(BAR_POSITION_OFFSET, self.bar_position.ordinal());
        let brightness = store.write_u8(BRIGHTNESS_OFFSET, self.brightness);
        hold.and(bar).and(brightness)
    }
}
