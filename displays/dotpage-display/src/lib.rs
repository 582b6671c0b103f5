//! Display abstraction for the Dotpage dot-matrix panel
//!
//! This crate provides:
//! - `DisplaySurface` trait: pixel operations plus "draw string at origin"
//! - `Font` type and the two built-in glyph tables (numeric and label)
//! - `Framebuffer`: a 32x32 one-bit buffer that the panel driver scans out
//! - Scan-out byte ordering for the chained 32x16 modules
//!
//! # Architecture
//!
//! The core logic only ever talks to a `DisplaySurface`. On the device the
//! surface is a `Framebuffer` shared with the scan-out task; under test the
//! same `Framebuffer` is inspected directly.

#![no_std]

pub mod backend;
pub mod font;
pub mod scan;
pub mod screen;

// Re-export key types
pub use backend::{DisplaySurface, PixelOp, PANEL_HEIGHT, PANEL_WIDTH};
pub use font::{Font, LABEL_FONT_5X7, NUMBER_FONT_3X5};
pub use scan::{phase_bytes, PHASE_BYTES, SCAN_PHASES};
pub use screen::Framebuffer;
