//! Pico board wiring
//!
//! Names the concrete peripheral types the core drives on this board.
//!
//! | Function        | Pins                                     |
//! |-----------------|------------------------------------------|
//! | SD card (SPI0)  | SCK 18, MOSI 19, MISO 16, CS 17          |
//! | Panel (SPI1)    | SCK 10, MOSI 11, A 12, B 13, LAT 14, OE 15 |
//! | Encoder         | A 3, B 2, button 4                       |
//! | Buzzer (PWM3 A) | 22                                       |

use dotpage_core::button::Button;
use dotpage_core::Board;
use dotpage_hal::BudgetedStore;
use dotpage_hal_rp2040::{
    EmbassyClock, EncoderCounter, FixedTimeSource, FlashEeprom, PanelDriver, PanelSurface,
    PwmBuzzer, RpInput, RpOutput, SdCatalog,
};
use embassy_rp::gpio::Output;
use embassy_rp::peripherals::{SPI0, SPI1};
use embassy_rp::spi::{Blocking, Spi};
use embassy_time::Delay;
use embedded_hal_bus::spi::ExclusiveDevice;
use embedded_sdmmc::SdCard;

/// SPI clock for the SD card
///
/// Cards must be initialised at 400 kHz or less.
pub const SD_SPI_HZ: u32 = 400_000;

/// SPI clock for the panel shift registers
pub const PANEL_SPI_HZ: u32 = 4_000_000;

pub type SdSpi = ExclusiveDevice<Spi<'static, SPI0, Blocking>, Output<'static>, Delay>;
pub type PanelSpi = Spi<'static, SPI1, Blocking>;
pub type Panel = PanelDriver<PanelSpi, RpOutput<'static>>;

/// Raspberry Pi Pico driving two P10 modules
pub struct PicoBoard;

impl Board for PicoBoard {
    type Storage = SdCatalog<SdCard<SdSpi, Delay>, FixedTimeSource>;
    type Display = PanelSurface;
    type Store = BudgetedStore<FlashEeprom<'static>>;
    type Encoder = &'static EncoderCounter;
    type Input = Button<RpInput<'static>, EmbassyClock>;
    type Annunciator = PwmBuzzer<'static>;
    type Clock = EmbassyClock;
}
