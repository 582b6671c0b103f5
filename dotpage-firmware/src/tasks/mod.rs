//! Tasks on the high-priority executor
//!
//! The playback loop in `main` blocks while it busy-waits, so everything
//! that must keep running alongside it is spawned on the interrupt
//! executor.

mod encoder;
mod panel;

pub use encoder::encoder_task;
pub use panel::panel_task;
