//! Dotpage Hardware Abstraction Layer
//!
//! This crate defines the low-level hardware traits that the chip-specific
//! HAL implements and that the core logic consumes. Keeping them here lets
//! the playback and menu logic run unchanged on the host under test.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  dotpage-core / dotpage-firmware        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  dotpage-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ dotpage-hal-  │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`flash::PersistentStore`] - Byte-addressed settings storage

#![no_std]
#![deny(unsafe_code)]

pub mod flash;
pub mod gpio;

// Re-export key traits at crate root for convenience
pub use flash::{BudgetedStore, MemoryStore, PersistentStore, StoreError};
pub use gpio::{InputPin, OutputPin};
