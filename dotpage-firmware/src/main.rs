//! Dotpage - DMD Page Player Firmware
//!
//! Main firmware binary for an RP2040 driving a 32x32 dot-matrix panel
//! built from two P10 modules. Pages are read from the root of an SD card
//! and cycled on the panel; a rotary encoder pauses playback, picks pages
//! and edits the stored settings.

#![no_std]
#![no_main]

use defmt::*;
use dotpage_core::button::{Button, ButtonTiming};
use dotpage_core::config::MAX_SETTINGS_WRITES;
use dotpage_core::{Device, Peripherals};
use dotpage_hal::BudgetedStore;
use dotpage_hal_rp2040::{
    EmbassyClock, EncoderCounter, FixedTimeSource, FlashEeprom, PanelBuffer, PanelDriver,
    PanelPins, PanelSurface, PwmBuzzer, RpInput, RpOutput, SdCatalog,
};
use embassy_executor::{InterruptExecutor, Spawner};
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_rp::pwm::{self, Pwm};
use embassy_rp::spi::{self, Spi};
use embassy_time::Delay;
use embedded_hal_bus::spi::ExclusiveDevice;
use embedded_sdmmc::SdCard;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use crate::board::{PicoBoard, PANEL_SPI_HZ, SD_SPI_HZ};

mod board;
mod tasks;

// Executor for the panel scan and encoder tasks; preempts the main loop
static EXECUTOR_HIGH: InterruptExecutor = InterruptExecutor::new();

#[interrupt]
unsafe fn SWI_IRQ_1() {
    EXECUTOR_HIGH.on_interrupt()
}

// Shared between the main loop and the high-priority tasks
static PANEL_BUFFER: PanelBuffer = PanelBuffer::new();
static ENCODER: EncoderCounter = EncoderCounter::new();

// The device holds the catalog and page buffer; keep it out of the main future
static DEVICE: StaticCell<Device<PicoBoard>> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Dotpage firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Panel scan-out and encoder decoding run at interrupt priority so the
    // blocking playback loop cannot starve them
    interrupt::SWI_IRQ_1.set_priority(Priority::P2);
    let high_spawner = EXECUTOR_HIGH.start(interrupt::SWI_IRQ_1);

    let mut panel_config = spi::Config::default();
    panel_config.frequency = PANEL_SPI_HZ;
    let panel_spi = Spi::new_blocking_txonly(p.SPI1, p.PIN_10, p.PIN_11, panel_config);
    let panel = PanelDriver::new(
        panel_spi,
        PanelPins {
            row_a: RpOutput::new(Output::new(p.PIN_12, Level::Low)),
            row_b: RpOutput::new(Output::new(p.PIN_13, Level::Low)),
            latch: RpOutput::new(Output::new(p.PIN_14, Level::Low)),
            enable: RpOutput::new(Output::new(p.PIN_15, Level::Low)),
        },
    );
    high_spawner.spawn(unwrap!(tasks::panel_task(panel, &PANEL_BUFFER)));
    info!("Panel initialized");

    let encoder_a = Input::new(p.PIN_3, Pull::Up);
    let encoder_b = Input::new(p.PIN_2, Pull::Up);
    high_spawner.spawn(unwrap!(tasks::encoder_task(encoder_a, encoder_b, &ENCODER)));
    info!("Encoder initialized");

    // Settings image from flash; a failed read leaves it erased
    let mut eeprom = FlashEeprom::new(p.FLASH, p.DMA_CH0);
    if let Err(e) = eeprom.load().await {
        warn!("Settings flash unreadable ({}), using defaults", e);
    }
    let store = BudgetedStore::new(eeprom, MAX_SETTINGS_WRITES);

    let mut sd_config = spi::Config::default();
    sd_config.frequency = SD_SPI_HZ;
    let sd_spi = Spi::new_blocking(p.SPI0, p.PIN_18, p.PIN_19, p.PIN_16, sd_config);
    let sd_cs = Output::new(p.PIN_17, Level::High);
    let sd_device = unwrap!(ExclusiveDevice::new(sd_spi, sd_cs, Delay));
    let storage = SdCatalog::new(SdCard::new(sd_device, Delay), FixedTimeSource);
    info!("SD card interface initialized");

    let buzzer = PwmBuzzer::new(Pwm::new_output_a(
        p.PWM_SLICE3,
        p.PIN_22,
        pwm::Config::default(),
    ));

    let button = Button::new(
        RpInput::new(Input::new(p.PIN_4, Pull::Up)),
        EmbassyClock,
        ButtonTiming::default(),
    );

    let device = DEVICE.init(Device::new(Peripherals {
        storage,
        display: PanelSurface::new(&PANEL_BUFFER),
        store,
        encoder: &ENCODER,
        input: button,
        annunciator: buzzer,
        clock: EmbassyClock,
    }));

    if let Err(fault) = device.boot() {
        device.halt(fault);
    }
    info!("Boot complete, {} catalog slots", device.catalog().len());

    let fault = device.run();
    device.halt(fault)
}
