//! User settings and the rows that edit them

/// Largest page hold time the menu can produce
pub const MAX_PAGE_HOLD_MS: u16 = 9990;

/// Page hold time is edited in steps of this many milliseconds
pub const PAGE_HOLD_STEP_MS: u16 = 10;

/// Brightness used until settings are loaded
pub const DEFAULT_BRIGHTNESS: u8 = dotpage_display::screen::DEFAULT_BRIGHTNESS;

/// Where the progress bar is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BarPosition {
    /// No progress bar
    None,
    /// Bottom row of the panel
    #[default]
    Bottom,
    /// Top row of the panel
    Top,
}

impl BarPosition {
    /// Decode a stored ordinal
    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        match ordinal {
            0 => Some(BarPosition::None),
            1 => Some(BarPosition::Bottom),
            2 => Some(BarPosition::Top),
            _ => None,
        }
    }

    /// Ordinal used in the store and shown in the menu
    pub fn ordinal(self) -> u8 {
        match self {
            BarPosition::None => 0,
            BarPosition::Bottom => 1,
            BarPosition::Top => 2,
        }
    }

    /// Panel row the bar is drawn on
    pub fn row(self) -> Option<u8> {
        match self {
            BarPosition::None => None,
            BarPosition::Bottom => Some(dotpage_display::PANEL_HEIGHT - 1),
            BarPosition::Top => Some(0),
        }
    }
}

/// Persisted user settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Settings {
    /// Base display time per page, scaled by each page's multiplier
    pub page_hold_ms: u16,
    /// Progress bar placement
    pub bar_position: BarPosition,
    /// Panel brightness (1-255)
    pub brightness: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            page_hold_ms: 1000,
            bar_position: BarPosition::Bottom,
            brightness: DEFAULT_BRIGHTNESS,
        }
    }
}

/// One editable line of the settings menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingRow {
    /// "SP": page hold time in tens of milliseconds
    PageHold,
    /// "TB": progress bar position ordinal
    BarPosition,
    /// "BR": brightness
    Brightness,
}

/// Number of menu rows
pub const SETTING_ROWS: u8 = 3;

impl SettingRow {
    /// Rows in display order
    pub const ALL: [SettingRow; SETTING_ROWS as usize] = [
        SettingRow::PageHold,
        SettingRow::BarPosition,
        SettingRow::Brightness,
    ];

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    pub fn index(self) -> u8 {
        match self {
            SettingRow::PageHold => 0,
            SettingRow::BarPosition => 1,
            SettingRow::Brightness => 2,
        }
    }

    /// Two-letter label shown in the menu
    pub fn label(self) -> &'static str {
        match self {
            SettingRow::PageHold => "SP",
            SettingRow::BarPosition => "TB",
            SettingRow::Brightness => "BR",
        }
    }

    /// Number of distinct values the encoder cycles through while editing
    pub fn range(self) -> i32 {
        match self {
            SettingRow::PageHold => 1000,
            SettingRow::BarPosition => 3,
            SettingRow::Brightness => 255,
        }
    }
}

impl Settings {
    /// Value of `row` in the units the editor works in (`0..row.range()`)
    pub fn current_value(&self, row: SettingRow) -> i32 {
        match row {
            SettingRow::PageHold => (self.page_hold_ms / PAGE_HOLD_STEP_MS) as i32,
            SettingRow::BarPosition => self.bar_position.ordinal() as i32,
            SettingRow::Brightness => self.brightness as i32 - 1,
        }
    }

    /// Number shown next to the label of `row`
    pub fn display_value(&self, row: SettingRow) -> i32 {
        match row {
            SettingRow::Brightness => self.brightness as i32,
            _ => self.current_value(row),
        }
    }

    /// Store an edited value for `row`
    ///
    /// `value` is an encoder index in `0..row.range()`; out-of-range values
    /// are clamped. Brightness is stored one higher so it never reaches 0.
    pub fn apply(&mut self, row: SettingRow, value: i32) {
        let value = value.clamp(0, row.range() - 1);
        match row {
            SettingRow::PageHold => {
                let ms = value as u32 * PAGE_HOLD_STEP_MS as u32;
                self.page_hold_ms = ms.min(MAX_PAGE_HOLD_MS as u32) as u16;
            }
            SettingRow::BarPosition => {
                self.bar_position = BarPosition::from_ordinal(value as u8).unwrap_or_default();
            }
            SettingRow::Brightness => {
                self.brightness = (value + 1).clamp(1, 255) as u8;
            }
        }
    }
}
