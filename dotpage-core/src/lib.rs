//! Board-agnostic core logic for the Dotpage dot-matrix page player
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (storage, input, tones, clock)
//! - Page catalog enumeration and page record rendering
//! - Interruptible timed wait with progress bar
//! - Settings menu state machine and persisted settings
//! - Boot sequence, playback loop and fault handling
//!
//! Everything is driven synchronously by polling: the only concurrent
//! writer is the encoder counter, which boards publish through an atomic.

#![no_std]
#![deny(unsafe_code)]

pub mod button;
pub mod catalog;
pub mod config;
pub mod device;
pub mod encoder;
pub mod fault;
pub mod menu;
pub mod page;
pub mod playback;
pub mod scheduler;
pub mod traits;

pub use device::{Board, Device, Peripherals};
pub use fault::Fault;
