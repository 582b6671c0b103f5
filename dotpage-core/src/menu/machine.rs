//! Menu state machine
//!
//! Long press opens and closes the menu. While open, turning the encoder
//! scrolls between rows; a click starts editing the selected row, and
//! turning then changes its value live. A second click returns to
//! scrolling. Closing resets the menu and asks for the settings to be
//! persisted.

use crate::config::{SettingRow, Settings, SETTING_ROWS};
use crate::encoder::{detent_index, position_for};

/// Menu mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuMode {
    /// Menu hidden, playback running
    #[default]
    Closed,
    /// Encoder moves the row selection
    Scrolling,
    /// Encoder changes the value of a row
    Editing(SettingRow),
}

/// Events the menu reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuEvent {
    Click,
    LongPress,
    /// Encoder position sampled from the main loop
    Encoder(i32),
}

/// Work the device must do after a transition
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MenuEffects {
    /// Overwrite the encoder position
    pub rebias: Option<i32>,
    /// Store a new value for a row
    pub edit: Option<(SettingRow, i32)>,
    /// Redraw the menu overlay
    pub redraw: bool,
    /// Menu was just opened
    pub opened: bool,
    /// Menu was just closed; blank the panel and persist settings
    pub closed: bool,
}

/// Menu state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MenuController {
    mode: MenuMode,
    selected_row: u8,
    pending_value: i32,
}

impl MenuController {
    pub const fn new() -> Self {
        Self {
            mode: MenuMode::Closed,
            selected_row: 0,
            pending_value: 0,
        }
    }

    pub fn mode(&self) -> MenuMode {
        self.mode
    }

    pub fn is_open(&self) -> bool {
        self.mode != MenuMode::Closed
    }

    /// Whether the encoder currently moves the selection
    pub fn is_scrolling(&self) -> bool {
        self.mode == MenuMode::Scrolling
    }

    /// Row being edited, if any
    pub fn editing_row(&self) -> Option<SettingRow> {
        match self.mode {
            MenuMode::Editing(row) => Some(row),
            _ => None,
        }
    }

    /// Highlighted row index
    pub fn selected_row(&self) -> u8 {
        self.selected_row
    }

    /// Value last produced by the editor
    pub fn pending_value(&self) -> i32 {
        self.pending_value
    }

    /// Process an event and return the effects to apply
    pub fn transition(&mut self, event: MenuEvent, settings: &Settings) -> MenuEffects {
        use MenuEvent::*;
        use MenuMode::*;

        let mut fx = MenuEffects::default();

        match (self.mode, event) {
            (Closed, LongPress) => {
                self.mode = Scrolling;
                self.selected_row = 0;
                fx.opened = true;
                fx.redraw = true;
            }
            (Scrolling | Editing(_), LongPress) => {
                *self = Self::new();
                fx.closed = true;
            }

            (Scrolling, Click) => {
                let row = SettingRow::from_index(self.selected_row).unwrap_or(SettingRow::PageHold);
                self.mode = Editing(row);
                self.pending_value = settings.current_value(row);
                fx.rebias = Some(position_for(self.pending_value));
                fx.redraw = true;
            }
            (Editing(_), Click) => {
                self.mode = Scrolling;
                fx.rebias = Some(position_for(self.selected_row as i32));
                fx.redraw = true;
            }

            (Scrolling, Encoder(position)) => {
                let row = detent_index(position, SETTING_ROWS as i32) as u8;
                if row != self.selected_row {
                    self.selected_row = row;
                    fx.redraw = true;
                }
            }
            (Editing(row), Encoder(position)) => {
                let value = detent_index(position, row.range());
                if value != self.pending_value {
                    self.pending_value = value;
                    fx.edit = Some((row, value));
                    fx.redraw = true;
                }
            }

            // Clicks and turns while closed belong to playback
            (Closed, Click | Encoder(_)) => {}
        }

        fx
    }
}
