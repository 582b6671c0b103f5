//! Menu overlay drawing

use core::fmt::Write;

use dotpage_display::{DisplaySurface, LABEL_FONT_5X7, NUMBER_FONT_3X5};
use heapless::String;

use crate::config::{SettingRow, Settings};

/// Column of the two-letter labels
const LABEL_X: u8 = 0;
/// Column of the numeric values
const VALUE_X: u8 = 14;
/// Column of the row indicator
const ARROW_X: u8 = 27;
/// Vertical pitch between rows
const ROW_PITCH: u8 = 8;

/// Draw the full menu
///
/// The selected row gets an indicator: `<` while its value is being
/// edited, `(` while scrolling.
pub fn render_menu<D: DisplaySurface + ?Sized>(
    display: &mut D,
    settings: &Settings,
    selected_row: u8,
    editing: bool,
) {
    display.clear_screen();

    for row in SettingRow::ALL {
        let y = row.index() * ROW_PITCH;
        display.draw_string(LABEL_X, y, row.label(), &LABEL_FONT_5X7);

        let mut value: String<8> = String::new();
        let _ = write!(value, "{}", settings.display_value(row));
        display.draw_string(VALUE_X, y + 1, &value, &NUMBER_FONT_3X5);
    }

    let arrow = if editing { "<" } else { "(" };
    display.draw_string(
        ARROW_X,
        selected_row.saturating_mul(ROW_PITCH),
        arrow,
        &LABEL_FONT_5X7,
    );
}
