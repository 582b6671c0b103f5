//! Device aggregate
//!
//! Owns every peripheral and all mutable application state, and runs the
//! boot sequence and the playback loop on top of them. Nothing here knows
//! which board it runs on; boards supply a [`Board`] type naming their
//! peripheral implementations.

use dotpage_display::{DisplaySurface, PixelOp, LABEL_FONT_5X7, PANEL_HEIGHT, PANEL_WIDTH};
use dotpage_hal::PersistentStore;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::{Point, Primitive};
use embedded_graphics::primitives::{Line, PrimitiveStyle};
use embedded_graphics::Drawable;

use crate::catalog::Catalog;
use crate::config::{SettingRow, Settings};
use crate::fault::{self, Fault};
use crate::menu::{render_menu, MenuController, MenuEffects, MenuEvent};
use crate::page::{hold_step_ms, PageRecord};
use crate::playback::{PlaybackState, FIRST_SLOT};
use crate::scheduler::{TimedWait, WaitHost};
use crate::traits::{
    busy_wait, play, Annunciator, Clock, EncoderPosition, InputEvent, InputSource,
    StorageCatalog, CHIRP, CLICK,
};

/// Delay between rows of the boot wipe
pub const WIPE_STEP_MS: u32 = 10;

/// Peripheral types a board provides
pub trait Board {
    type Storage: StorageCatalog;
    type Display: DisplaySurface;
    type Store: PersistentStore;
    type Encoder: EncoderPosition;
    type Input: InputSource;
    type Annunciator: Annunciator;
    type Clock: Clock;
}

/// Every peripheral the device drives
pub struct Peripherals<B: Board> {
    pub storage: B::Storage,
    pub display: B::Display,
    pub store: B::Store,
    pub encoder: B::Encoder,
    pub input: B::Input,
    pub annunciator: B::Annunciator,
    pub clock: B::Clock,
}

/// Everything the timed wait may touch while it polls
struct Context<B: Board> {
    hw: Peripherals<B>,
    settings: Settings,
    catalog: Catalog,
    playback: PlaybackState,
    menu: MenuController,
    record: PageRecord,
}

/// The page player
pub struct Device<B: Board> {
    ctx: Context<B>,
    wait: TimedWait,
}

impl<B: Board> Device<B> {
    /// Take ownership of the peripherals; nothing is touched until [`boot`](Self::boot)
    pub fn new(hw: Peripherals<B>) -> Self {
        Self {
            ctx: Context {
                hw,
                settings: Settings::default(),
                catalog: Catalog::new(),
                playback: PlaybackState::new(),
                menu: MenuController::new(),
                record: PageRecord::new(),
            },
            wait: TimedWait::new(),
        }
    }

    /// Load settings, mount storage and build the catalog
    ///
    /// Shows the loading screen at each stage and finishes with the wipe
    /// animation. Any storage failure is returned as the fault to halt on.
    pub fn boot(&mut self) -> Result<(), Fault> {
        let ctx = &mut self.ctx;

        ctx.hw.display.set_brightness(ctx.settings.brightness);
        let _report = ctx.settings.load(&mut ctx.hw.store);
        ctx.hw.display.set_brightness(ctx.settings.brightness);

        #[cfg(feature = "defmt")]
        defmt::info!("settings: {} (loaded {})", ctx.settings, _report);

        ctx.show_loading("33%");
        ctx.hw.storage.init().map_err(|_| Fault::StorageInit)?;

        ctx.show_loading("67%");
        ctx.catalog = Catalog::enumerate(&mut ctx.hw.storage)?;
        ctx.playback.clamp(ctx.catalog.len());

        ctx.show_loading("100%");
        ctx.wipe();

        #[cfg(feature = "defmt")]
        defmt::info!("boot complete, {} pages", ctx.catalog.page_count());

        Ok(())
    }

    /// Visit one catalog slot
    ///
    /// A page slot is loaded, drawn and held for its hold time; any other
    /// slot just services input once. Afterwards playback moves on unless
    /// paused. While the menu is open, or when there is nothing to play,
    /// only input is serviced.
    pub fn step(&mut self) -> Result<(), Fault> {
        let len = self.ctx.catalog.len();
        if self.ctx.menu.is_open() || len <= FIRST_SLOT {
            self.ctx.service();
            return Ok(());
        }

        self.ctx.playback.clamp(len);
        let index = self.ctx.playback.current_index();

        if self.ctx.catalog.is_page(index) {
            self.ctx.show_page(index)?;
            self.hold_page();
        } else {
            #[cfg(feature = "defmt")]
            defmt::trace!("slot {} is not a page", index);
            self.ctx.service();
        }

        if !self.ctx.playback.is_paused() {
            self.ctx.playback.advance(len);
        }
        Ok(())
    }

    /// Play forever, returning only on a fault
    pub fn run(&mut self) -> Fault {
        loop {
            if let Err(fault) = self.step() {
                return fault;
            }
        }
    }

    /// Show `fault` and sound the alarm until power-off
    pub fn halt(&mut self, fault: Fault) -> ! {
        #[cfg(feature = "defmt")]
        defmt::error!("fault {} (code {})", fault, fault.code());

        let hw = &mut self.ctx.hw;
        fault::halt(&mut hw.display, &mut hw.annunciator, fault)
    }

    /// Hold the page that was just drawn
    fn hold_page(&mut self) {
        let hold_ms = self.ctx.settings.page_hold_ms;
        if hold_ms == 0 {
            // Manual mode: the page stays until the next visit
            self.ctx.service();
            return;
        }
        let step_ms = hold_step_ms(hold_ms, self.ctx.record.multiplier());
        let _outcome = self.wait.run(&mut self.ctx, step_ms);
        #[cfg(feature = "defmt")]
        if _outcome.interrupted {
            defmt::debug!("hold cut short after {} steps", _outcome.completed_steps);
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.ctx.settings
    }

    pub fn catalog(&self) -> &Catalog {
        &self.ctx.catalog
    }

    pub fn playback(&self) -> &PlaybackState {
        &self.ctx.playback
    }

    pub fn menu(&self) -> &MenuController {
        &self.ctx.menu
    }

    pub fn peripherals(&self) -> &Peripherals<B> {
        &self.ctx.hw
    }

    pub fn peripherals_mut(&mut self) -> &mut Peripherals<B> {
        &mut self.ctx.hw
    }

    /// Give the peripherals back
    pub fn into_peripherals(self) -> Peripherals<B> {
        self.ctx.hw
    }
}

impl<B: Board> Context<B> {
    fn show_loading(&mut self, percent: &str) {
        let display = &mut self.hw.display;
        display.clear_screen();
        display.draw_string(0, 1, "LOAD", &LABEL_FONT_5X7);
        display.draw_string(0, 17, percent, &LABEL_FONT_5X7);
    }

    /// Fill the panel one row at a time, top to bottom
    fn wipe(&mut self) {
        let style = PrimitiveStyle::with_stroke(BinaryColor::On, 1);
        let right = PANEL_WIDTH as i32 - 1;
        for y in 0..PANEL_HEIGHT as i32 {
            // The panel draw target is infallible
            Line::new(Point::new(0, y), Point::new(right, y))
                .into_styled(style)
                .draw(&mut self.hw.display)
                .ok();
            busy_wait(&self.hw.clock, WIPE_STEP_MS);
        }
    }

    /// Read the page in slot `index` and draw it
    fn show_page(&mut self, index: usize) -> Result<(), Fault> {
        let name = self.catalog.name(index).ok_or(Fault::PageOpen)?;

        match self.record.load(&mut self.hw.storage, name) {
            Ok(_len) => {
                #[cfg(feature = "defmt")]
                defmt::trace!("page {} '{}' ({} bytes)", index, name, _len);
            }
            Err(_err) => {
                #[cfg(feature = "defmt")]
                defmt::error!("page {} '{}' failed: {}", index, name, _err);
                return Err(Fault::PageOpen);
            }
        }

        self.record.render(&mut self.hw.display);
        Ok(())
    }

    /// Poll input once and react to it
    fn service(&mut self) {
        if let Some(event) = self.hw.input.poll() {
            self.dispatch(event);
        }

        let position = self.hw.encoder.read();
        if self.playback.is_paused() {
            self.playback.track_encoder(position, self.catalog.len());
        } else if self.menu.is_open() {
            let fx = self.menu.transition(MenuEvent::Encoder(position), &self.settings);
            self.apply(fx);
        }
    }

    fn dispatch(&mut self, event: InputEvent) {
        match event {
            InputEvent::Click => {
                play(&mut self.hw.annunciator, &CLICK);
                if self.menu.is_open() {
                    let fx = self.menu.transition(MenuEvent::Click, &self.settings);
                    self.apply(fx);
                } else {
                    self.playback.toggle_pause();
                    #[cfg(feature = "defmt")]
                    defmt::debug!("paused: {}", self.playback.is_paused());
                }
            }
            InputEvent::LongPress => {
                if self.playback.is_paused() {
                    return;
                }
                play(&mut self.hw.annunciator, &CHIRP);
                let fx = self.menu.transition(MenuEvent::LongPress, &self.settings);
                self.apply(fx);
            }
        }
    }

    fn apply(&mut self, fx: MenuEffects) {
        if let Some(position) = fx.rebias {
            self.hw.encoder.write(position);
        }

        if let Some((row, value)) = fx.edit {
            self.settings.apply(row, value);
            if row == SettingRow::Brightness {
                self.hw.display.set_brightness(self.settings.brightness);
            }
        }

        #[cfg(feature = "defmt")]
        if fx.opened {
            defmt::debug!("menu opened");
        }

        if fx.closed {
            #[cfg(feature = "defmt")]
            defmt::debug!("menu closed, saving {}", self.settings);

            self.hw.display.clear_screen();
            // A refused write keeps the old value on the next boot
            if let Err(_err) = self.settings.save(&mut self.hw.store) {
                #[cfg(feature = "defmt")]
                defmt::warn!("settings not saved: {}", _err);
            }
        }

        if fx.redraw {
            render_menu(
                &mut self.hw.display,
                &self.settings,
                self.menu.selected_row(),
                self.menu.editing_row().is_some(),
            );
        }
    }
}

impl<B: Board> WaitHost for Context<B> {
    fn now_ms(&self) -> u32 {
        self.hw.clock.now_ms()
    }

    fn service(&mut self) {
        Context::service(self);
    }

    fn interrupted(&self) -> bool {
        self.playback.is_paused() || self.menu.is_open()
    }

    fn progress(&mut self, step: u8) {
        if let Some(row) = self.settings.bar_position.row() {
            self.hw.display.set_pixel(step, row, PixelOp::Toggle);
        }
    }
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;
    use core::convert::Infallible;

    use dotpage_display::{Font, Framebuffer, PixelOp};
    use dotpage_hal::{BudgetedStore, MemoryStore};
    use embedded_graphics::prelude::{DrawTarget, OriginDimensions, Pixel, Size};
    use heapless::{Deque, String, Vec};

    use super::*;
    use crate::config::{BarPosition, MAX_SETTINGS_WRITES};
    use crate::page::{PAGE_RECORD_LEN, PAGE_SIDE};
    use crate::traits::{DirEntry, StorageError, Tone};

    // ---- mock board ----

    struct MockStorage {
        entries: &'static [(&'static str, bool)],
        multiplier: u8,
        init_result: Result<(), StorageError>,
        list_result: Result<(), StorageError>,
        fail_open: bool,
        reads: Vec<String<17>, 16>,
    }

    impl MockStorage {
        fn new(entries: &'static [(&'static str, bool)]) -> Self {
            Self {
                entries,
                multiplier: 1,
                init_result: Ok(()),
                list_result: Ok(()),
                fail_open: false,
                reads: Vec::new(),
            }
        }
    }

    impl StorageCatalog for MockStorage {
        fn init(&mut self) -> Result<(), StorageError> {
            self.init_result
        }

        fn list_root(&mut self, visit: &mut dyn FnMut(DirEntry<'_>)) -> Result<(), StorageError> {
            for &(name, is_dir) in self.entries {
                visit(DirEntry { name, is_dir });
            }
            self.list_result
        }

        fn read_record(&mut self, name: &str, buffer: &mut [u8]) -> Result<usize, StorageError> {
            if self.fail_open {
                return Err(StorageError::Open);
            }
            let mut logged = String::new();
            let _ = logged.push_str(name);
            let _ = self.reads.push(logged);

            // Diagonal page, first column of the file name's length
            buffer[0] = self.multiplier;
            for i in 0..PAGE_SIDE {
                buffer[1 + i * PAGE_SIDE + i] = 1;
            }
            buffer[1 + name.len() * PAGE_SIDE] = 1;
            Ok(PAGE_RECORD_LEN)
        }
    }

    /// Framebuffer that counts writes and records drawn text
    #[derive(Default)]
    struct Panel {
        fb: Framebuffer,
        writes: u32,
        texts: Vec<String<8>, 32>,
    }

    impl OriginDimensions for Panel {
        fn size(&self) -> Size {
            self.fb.size()
        }
    }

    impl DrawTarget for Panel {
        type Color = BinaryColor;
        type Error = Infallible;

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            self.writes += 1;
            self.fb.draw_iter(pixels)
        }
    }

    impl DisplaySurface for Panel {
        fn set_pixel(&mut self, x: u8, y: u8, op: PixelOp) {
            self.writes += 1;
            self.fb.set_pixel(x, y, op);
        }

        fn clear_screen(&mut self) {
            self.writes += 1;
            self.fb.clear_screen();
        }

        fn set_brightness(&mut self, level: u8) {
            self.fb.set_brightness(level);
        }

        fn draw_string(&mut self, x: u8, y: u8, text: &str, font: &Font) {
            let mut logged = String::new();
            let _ = logged.push_str(text);
            let _ = self.texts.push(logged);
            self.writes += 1;
            self.fb.draw_string(x, y, text, font);
        }
    }

    #[derive(Default)]
    struct Knob {
        position: i32,
        writes: Vec<i32, 16>,
    }

    impl EncoderPosition for Knob {
        fn read(&self) -> i32 {
            self.position
        }

        fn write(&mut self, position: i32) {
            self.position = position;
            let _ = self.writes.push(position);
        }
    }

    #[derive(Default)]
    struct Script {
        events: Deque<InputEvent, 16>,
    }

    impl Script {
        fn push(&mut self, event: InputEvent) {
            let _ = self.events.push_back(event);
        }
    }

    impl InputSource for Script {
        fn poll(&mut self) -> Option<InputEvent> {
            self.events.pop_front()
        }
    }

    #[derive(Default)]
    struct Buzzer {
        tones: Vec<Tone, 64>,
    }

    impl Annunciator for Buzzer {
        fn tone(&mut self, freq_hz: u16, duration_ms: u16) {
            let _ = self.tones.push(Tone::new(freq_hz, duration_ms));
        }
    }

    /// Advances one millisecond per read
    #[derive(Default)]
    struct TickClock {
        now: Cell<u32>,
    }

    impl Clock for TickClock {
        fn now_ms(&self) -> u32 {
            let now = self.now.get();
            self.now.set(now.wrapping_add(1));
            now
        }
    }

    type Store = BudgetedStore<MemoryStore<512>>;

    struct Mock;

    impl Board for Mock {
        type Storage = MockStorage;
        type Display = Panel;
        type Store = Store;
        type Encoder = Knob;
        type Input = Script;
        type Annunciator = Buzzer;
        type Clock = TickClock;
    }

    const SCENARIO: &[(&str, bool)] = &[("VOL.TXT", false), ("A.DMD", false), ("B.dmd", false)];

    fn peripherals(storage: MockStorage, store: Store) -> Peripherals<Mock> {
        Peripherals {
            storage,
            display: Panel::default(),
            store,
            encoder: Knob::default(),
            input: Script::default(),
            annunciator: Buzzer::default(),
            clock: TickClock::default(),
        }
    }

    fn fresh_store() -> Store {
        BudgetedStore::new(MemoryStore::new(), MAX_SETTINGS_WRITES)
    }

    fn booted(entries: &'static [(&'static str, bool)]) -> Device<Mock> {
        let mut device = Device::new(peripherals(MockStorage::new(entries), fresh_store()));
        device.boot().unwrap();
        device
    }

    fn now(device: &Device<Mock>) -> u32 {
        device.peripherals().clock.now.get()
    }

    // ---- boot ----

    #[test]
    fn test_boot_builds_catalog_and_wipes() {
        let device = booted(SCENARIO);
        assert_eq!(device.catalog().len(), 3);
        assert_eq!(device.catalog().page_count(), 2);
        assert_eq!(device.playback().current_index(), 1);
        assert_eq!(device.settings().page_hold_ms, 1000);
        assert_eq!(device.settings().bar_position, BarPosition::Bottom);

        let panel = &device.peripherals().display.fb;
        assert_eq!(panel.lit_count(), 32 * 32);
        // Erased brightness cell reads back as full brightness
        assert_eq!(panel.brightness(), 255);
        // 32 rows 10 ms apart
        assert!(now(&device) >= 320);
    }

    fn drawn_texts(device: &Device<Mock>) -> Vec<&str, 32> {
        device
            .peripherals()
            .display
            .texts
            .iter()
            .map(|s| s.as_str())
            .collect()
    }

    #[test]
    fn test_boot_shows_loading_progress() {
        let device = booted(SCENARIO);
        assert_eq!(
            drawn_texts(&device).as_slice(),
            &["LOAD", "33%", "LOAD", "67%", "LOAD", "100%"]
        );
    }

    #[test]
    fn test_boot_progress_stops_at_failed_stage() {
        let mut storage = MockStorage::new(SCENARIO);
        storage.init_result = Err(StorageError::Init);
        let mut device = Device::new(peripherals(storage, fresh_store()));
        assert_eq!(device.boot(), Err(Fault::StorageInit));
        assert_eq!(drawn_texts(&device).as_slice(), &["LOAD", "33%"]);

        let mut storage = MockStorage::new(SCENARIO);
        storage.list_result = Err(StorageError::Enumerate);
        let mut device = Device::new(peripherals(storage, fresh_store()));
        assert_eq!(device.boot(), Err(Fault::CatalogEnumeration));
        assert_eq!(
            drawn_texts(&device).as_slice(),
            &["LOAD", "33%", "LOAD", "67%"]
        );
    }

    #[test]
    fn test_boot_applies_stored_settings() {
        let mut image = MemoryStore::<512>::new();
        image.write_u16(350, 450).unwrap();
        image.write_u8(352, 2).unwrap();
        image.write_u8(353, 200).unwrap();

        let store = BudgetedStore::new(image, MAX_SETTINGS_WRITES);
        let mut device = Device::new(peripherals(MockStorage::new(SCENARIO), store));
        device.boot().unwrap();

        assert_eq!(device.settings().page_hold_ms, 450);
        assert_eq!(device.settings().bar_position, BarPosition::Top);
        assert_eq!(device.peripherals().display.fb.brightness(), 200);
    }

    #[test]
    fn test_boot_faults() {
        let mut storage = MockStorage::new(SCENARIO);
        storage.init_result = Err(StorageError::Init);
        let mut device = Device::new(peripherals(storage, fresh_store()));
        assert_eq!(device.boot(), Err(Fault::StorageInit));

        let mut storage = MockStorage::new(SCENARIO);
        storage.list_result = Err(StorageError::OpenRoot);
        let mut device = Device::new(peripherals(storage, fresh_store()));
        assert_eq!(device.boot(), Err(Fault::RootListing));

        let mut storage = MockStorage::new(SCENARIO);
        storage.list_result = Err(StorageError::Enumerate);
        let mut device = Device::new(peripherals(storage, fresh_store()));
        assert_eq!(device.boot(), Err(Fault::CatalogEnumeration));
    }

    // ---- playback ----

    #[test]
    fn test_playback_order_skips_slot_zero() {
        let mut device = booted(SCENARIO);
        device.peripherals_mut().storage.multiplier = 0;

        for _ in 0..5 {
            device.step().unwrap();
        }

        let reads = &device.peripherals().storage.reads;
        let names: Vec<&str, 8> = reads.iter().map(|s| s.as_str()).collect();
        assert_eq!(names.as_slice(), &["A.DMD", "B.dmd", "A.DMD", "B.dmd", "A.DMD"]);
        assert_eq!(device.playback().current_index(), 2);
    }

    #[test]
    fn test_page_is_drawn_with_bar() {
        let mut device = booted(SCENARIO);
        device.step().unwrap();

        let fb = &device.peripherals().display.fb;
        // Page diagonal plus the marker row for "A.DMD" (5 characters)
        assert!(fb.pixel(3, 3));
        assert!(fb.pixel(0, 5));
        // Bottom bar fully inverted after a completed hold
        for x in 0..32u8 {
            assert_eq!(fb.pixel(x, 31), x != 31);
        }
    }

    #[test]
    fn test_hold_time_scales_with_multiplier() {
        let mut device = booted(SCENARIO);
        device.peripherals_mut().storage.multiplier = 5;

        let start = now(&device);
        device.step().unwrap();
        let elapsed = now(&device) - start;

        // 32 steps of (1000 / 32) * 5 ms; the first step had the boot
        // wipe counted against it
        assert!(elapsed >= 31 * 155, "elapsed {}", elapsed);
        assert!(elapsed <= 32 * 155 + 64, "elapsed {}", elapsed);
    }

    #[test]
    fn test_zero_hold_does_not_wait() {
        let mut image = MemoryStore::<512>::new();
        image.write_u16(350, 0).unwrap();
        let store = BudgetedStore::new(image, MAX_SETTINGS_WRITES);
        let mut device = Device::new(peripherals(MockStorage::new(SCENARIO), store));
        device.boot().unwrap();
        device.peripherals_mut().storage.multiplier = 200;

        let start = now(&device);
        device.step().unwrap();
        assert!(now(&device) - start < 5);
        assert_eq!(device.peripherals().storage.reads.len(), 1);
        assert_eq!(device.playback().current_index(), 2);
    }

    #[test]
    fn test_non_page_slot_has_no_effect() {
        const ENTRIES: &[(&str, bool)] = &[
            ("VOL.TXT", false),
            ("README.TXT", false),
            ("PICS", true),
            ("A.DMD", false),
        ];
        let mut device = booted(ENTRIES);
        let writes = device.peripherals().display.writes;
        let start = now(&device);

        device.step().unwrap();
        device.step().unwrap();

        assert_eq!(device.peripherals().display.writes, writes);
        assert!(device.peripherals().storage.reads.is_empty());
        assert!(now(&device) - start < 5);
        assert_eq!(device.playback().current_index(), 3);
    }

    #[test]
    fn test_open_failure_is_fault() {
        let mut device = booted(SCENARIO);
        device.peripherals_mut().storage.fail_open = true;
        assert_eq!(device.step(), Err(Fault::PageOpen));
        assert_eq!(device.run(), Fault::PageOpen);
    }

    #[test]
    fn test_empty_catalog_only_services_input() {
        const ENTRIES: &[(&str, bool)] = &[("A.DMD", false)];
        let mut device = booted(ENTRIES);
        device.peripherals_mut().input.push(InputEvent::Click);
        device.step().unwrap();
        assert!(device.playback().is_paused());
        assert!(device.peripherals().storage.reads.is_empty());
    }

    // ---- input ----

    #[test]
    fn test_click_pauses_and_encoder_selects() {
        const ENTRIES: &[(&str, bool)] = &[
            ("VOL.TXT", false),
            ("A.DMD", false),
            ("B.DMD", false),
            ("C.DMD", false),
            ("D.DMD", false),
        ];
        let mut device = booted(ENTRIES);
        device.peripherals_mut().input.push(InputEvent::Click);
        device.step().unwrap();

        assert!(device.playback().is_paused());
        assert_eq!(device.peripherals().annunciator.tones.as_slice(), &CLICK);

        // Two detents forward selects slot 3
        device.peripherals_mut().encoder.position = 8;
        device.step().unwrap();
        assert_eq!(device.playback().current_index(), 3);
        device.step().unwrap();
        assert_eq!(device.playback().current_index(), 3);

        // Backwards past zero wraps to the last slot
        device.peripherals_mut().encoder.position = -4;
        device.step().unwrap();
        assert_eq!(device.playback().current_index(), 4);

        let reads = &device.peripherals().storage.reads;
        assert_eq!(reads.last().map(|s| s.as_str()), Some("C.DMD"));
    }

    #[test]
    fn test_pause_interrupts_hold() {
        let mut device = booted(SCENARIO);
        device.peripherals_mut().storage.multiplier = 255;
        device.peripherals_mut().input.push(InputEvent::Click);

        let start = now(&device);
        device.step().unwrap();

        assert!(device.playback().is_paused());
        assert!(now(&device) - start < 200);
        // Paused playback does not advance on its own
        assert_eq!(device.playback().current_index(), 1);
    }

    #[test]
    fn test_long_press_ignored_while_paused() {
        let mut device = booted(SCENARIO);
        device.peripherals_mut().input.push(InputEvent::Click);
        device.step().unwrap();
        device.peripherals_mut().input.push(InputEvent::LongPress);
        device.step().unwrap();

        assert!(!device.menu().is_open());
        assert_eq!(device.peripherals().annunciator.tones.len(), 1);
    }

    // ---- menu ----

    fn open_menu(device: &mut Device<Mock>) {
        device.peripherals_mut().input.push(InputEvent::LongPress);
        device.step().unwrap();
        assert!(device.menu().is_open());
    }

    #[test]
    fn test_menu_opens_with_chirp_and_stops_playback() {
        let mut device = booted(SCENARIO);
        device.peripherals_mut().storage.multiplier = 255;
        open_menu(&mut device);

        assert_eq!(device.peripherals().annunciator.tones.as_slice(), &CHIRP);

        let reads = device.peripherals().storage.reads.len();
        for _ in 0..10 {
            device.step().unwrap();
        }
        assert_eq!(device.peripherals().storage.reads.len(), reads);

        let mut expected = Framebuffer::new();
        render_menu(&mut expected, device.settings(), 0, false);
        assert_eq!(
            device.peripherals().display.fb.rows(),
            expected.rows()
        );
    }

    #[test]
    fn test_menu_edit_and_persist() {
        let mut device = booted(SCENARIO);
        open_menu(&mut device);

        // Scroll to brightness and start editing
        device.peripherals_mut().encoder.position = 8;
        device.step().unwrap();
        assert_eq!(device.menu().selected_row(), 2);

        device.peripherals_mut().input.push(InputEvent::Click);
        device.step().unwrap();
        assert_eq!(device.menu().editing_row(), Some(SettingRow::Brightness));
        assert_eq!(device.peripherals().encoder.position, 254 * 4);

        // Turn to brightness 200, applied live
        device.peripherals_mut().encoder.position = 199 * 4;
        device.step().unwrap();
        assert_eq!(device.settings().brightness, 200);
        assert_eq!(device.peripherals().display.fb.brightness(), 200);

        // Leave edit mode, encoder re-seeded to the row
        device.peripherals_mut().input.push(InputEvent::Click);
        device.step().unwrap();
        assert_eq!(device.peripherals().encoder.position, 8);
        assert!(device.menu().is_scrolling());

        // Scroll to hold time and set 450 ms
        device.peripherals_mut().encoder.position = 0;
        device.step().unwrap();
        device.peripherals_mut().input.push(InputEvent::Click);
        device.step().unwrap();
        assert_eq!(device.peripherals().encoder.position, 100 * 4);
        device.peripherals_mut().encoder.position = 45 * 4;
        device.step().unwrap();
        assert_eq!(device.settings().page_hold_ms, 450);

        // Close: panel cleared, settings written
        device.peripherals_mut().input.push(InputEvent::LongPress);
        device.step().unwrap();
        assert!(!device.menu().is_open());
        assert_eq!(device.peripherals().store.writes(), 3);

        // Settings survive a reboot
        let hw = device.into_peripherals();
        let mut rebooted = Device::new(peripherals(MockStorage::new(SCENARIO), hw.store));
        rebooted.boot().unwrap();
        assert_eq!(rebooted.settings().page_hold_ms, 450);
        assert_eq!(rebooted.settings().brightness, 200);
        assert_eq!(rebooted.peripherals().display.fb.brightness(), 200);
    }

    #[test]
    fn test_exhausted_budget_keeps_old_settings() {
        let mut image = MemoryStore::<512>::new();
        image.write_u16(350, 2000).unwrap();
        let store = BudgetedStore::new(image, 0);
        let mut device = Device::new(peripherals(MockStorage::new(SCENARIO), store));
        device.boot().unwrap();

        open_menu(&mut device);
        device.peripherals_mut().input.push(InputEvent::Click);
        device.step().unwrap();
        device.peripherals_mut().encoder.position = 4 * 4;
        device.step().unwrap();
        assert_eq!(device.settings().page_hold_ms, 40);
        device.peripherals_mut().input.push(InputEvent::LongPress);
        device.step().unwrap();

        let store = &device.peripherals().store;
        assert_eq!(store.writes(), 0);
        assert_eq!(&store.inner().as_bytes()[350..352], &2000u16.to_le_bytes());
    }

    #[test]
    fn test_menu_close_resumes_playback() {
        let mut device = booted(SCENARIO);
        open_menu(&mut device);
        device.peripherals_mut().input.push(InputEvent::LongPress);
        device.step().unwrap();

        // Close chirp follows the open chirp
        assert_eq!(device.peripherals().annunciator.tones.len(), 6);

        device.peripherals_mut().storage.multiplier = 0;
        device.step().unwrap();
        assert_eq!(device.peripherals().storage.reads.len(), 2);
    }

    #[test]
    fn test_bar_top_and_none() {
        for (bar, row) in [(BarPosition::Top, Some(0u8)), (BarPosition::None, None)] {
            let mut image = MemoryStore::<512>::new();
            image.write_u8(352, bar.ordinal()).unwrap();
            let store = BudgetedStore::new(image, MAX_SETTINGS_WRITES);
            let mut device = Device::new(peripherals(MockStorage::new(SCENARIO), store));
            device.boot().unwrap();
            device.step().unwrap();

            let fb = &device.peripherals().display.fb;
            match row {
                // Column 0 is both diagonal and bar: inverted to off
                Some(y) => {
                    assert!(!fb.pixel(0, y));
                    assert!(fb.pixel(1, y));
                }
                None => {
                    assert!(fb.pixel(0, 0));
                    assert!(!fb.pixel(1, 0));
                    assert!(!fb.pixel(1, 31));
                }
            }
        }
    }
}
