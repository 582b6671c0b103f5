//! RP2040-specific HAL for the DMD page player firmware
//!
//! This crate provides RP2040 implementations of the `dotpage-hal` and
//! `dotpage-core` hardware traits:
//!
//! - GPIO wrappers (implement `dotpage_hal::InputPin` / `OutputPin`)
//! - Flash-backed settings store (implements `dotpage_hal::PersistentStore`)
//! - SD card page catalog over SPI (implements `StorageCatalog`)
//! - Interrupt-driven quadrature encoder counter
//! - PWM piezo buzzer (implements `Annunciator`)
//! - Panel scan-out driver and the shared framebuffer it reads

#![no_std]

pub mod buzzer;
pub mod clock;
pub mod encoder;
pub mod flash;
pub mod gpio;
pub mod panel;
pub mod sd;

pub use buzzer::PwmBuzzer;
pub use clock::EmbassyClock;
pub use encoder::EncoderCounter;
pub use flash::FlashEeprom;
pub use gpio::{RpInput, RpOutput};
pub use panel::{PanelBuffer, PanelDriver, PanelPins, PanelSurface};
pub use sd::{FixedTimeSource, SdCatalog};
