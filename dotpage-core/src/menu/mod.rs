//! Settings menu
//!
//! A three-row overlay for page hold time, progress bar position and
//! brightness. The state machine is pure: it takes an event and returns
//! the effects the device should carry out.

pub mod machine;
pub mod render;

pub use machine::{MenuController, MenuEffects, MenuEvent, MenuMode};
pub use render::render_menu;
