//! Page hold scheduling
//!
//! Holding a page is a busy-polled wait split into progress-bar steps.
//! Input keeps being serviced for the whole wait, and the wait gives up
//! on the remaining time of each step as soon as playback is paused or
//! the menu opens.

pub mod wait;

pub use wait::{TimedWait, WaitHost, WaitOutcome, BAR_STEPS};
