//! Flash-backed settings store for RP2040
//!
//! The RP2040 has no EEPROM, so the settings region is kept as a RAM image
//! that mirrors a small EEPROM and is persisted as a single item with
//! sequential-storage in the last sectors of flash. Sequential-storage
//! takes care of wear leveling across those sectors.
//!
//! Implements `PersistentStore` from `dotpage-hal`.

use core::ops::Range;

use dotpage_hal::{MemoryStore, PersistentStore, StoreError};
use embassy_rp::dma::Channel;
use embassy_rp::flash::{Async, Flash, ERASE_SIZE};
use embassy_rp::peripherals::FLASH;
use embassy_rp::Peri;
use sequential_storage::cache::NoCache;
use sequential_storage::map;

/// Flash storage configuration
pub const FLASH_SIZE: usize = 2 * 1024 * 1024; // 2MB flash on the Pico
pub const SETTINGS_PARTITION_SIZE: usize = 4 * ERASE_SIZE; // 16KB
pub const SETTINGS_PARTITION_START: usize = FLASH_SIZE - SETTINGS_PARTITION_SIZE;

/// Flash range for the settings partition
pub const SETTINGS_RANGE: Range<u32> = (SETTINGS_PARTITION_START as u32)..(FLASH_SIZE as u32);

/// Size of the emulated EEPROM
pub const IMAGE_SIZE: usize = 512;

/// Key under which the image is stored
const IMAGE_KEY: u8 = 0;

/// Scratch space for one stored item (image plus item header)
const ITEM_BUFFER_SIZE: usize = IMAGE_SIZE + 64;

/// EEPROM emulation on the RP2040 flash
pub struct FlashEeprom<'d> {
    flash: Flash<'d, FLASH, Async, FLASH_SIZE>,
    image: MemoryStore<IMAGE_SIZE>,
}

impl<'d> FlashEeprom<'d> {
    /// Create a store with a blank image
    ///
    /// Call [`load`](Self::load) before reading settings.
    pub fn new(flash: Peri<'d, FLASH>, dma: Peri<'d, impl Channel>) -> Self {
        Self {
            flash: Flash::new(flash, dma),
            image: MemoryStore::new(),
        }
    }

    /// Pull the persisted image from flash
    ///
    /// A partition that has never been written leaves the image erased.
    pub async fn load(&mut self) -> Result<(), StoreError> {
        let mut data_buffer = [0u8; ITEM_BUFFER_SIZE];

        let result = map::fetch_item::<u8, &[u8], _>(
            &mut self.flash,
            SETTINGS_RANGE,
            &mut NoCache::new(),
            &mut data_buffer,
            &IMAGE_KEY,
        )
        .await;

        match result {
            Ok(Some(data)) => {
                let len = data.len().min(IMAGE_SIZE);
                self.image.as_bytes_mut()[..len].copy_from_slice(&data[..len]);
                Ok(())
            }
            Ok(None) => Ok(()),
            Err(_) => Err(StoreError::Medium),
        }
    }

    async fn persist(&mut self) -> Result<(), StoreError> {
        let mut data_buffer = [0u8; ITEM_BUFFER_SIZE];
        let image: &[u8] = self.image.as_bytes();

        map::store_item(
            &mut self.flash,
            SETTINGS_RANGE,
            &mut NoCache::new(),
            &mut data_buffer,
            &IMAGE_KEY,
            &image,
        )
        .await
        .map_err(|_| StoreError::Medium)
    }
}

impl PersistentStore for FlashEeprom<'_> {
    fn read(&mut self, offset: u16, buffer: &mut [u8]) -> Result<(), StoreError> {
        self.image.read(offset, buffer)
    }

    fn write(&mut self, offset: u16, data: &[u8]) -> Result<(), StoreError> {
        let previous = self.image.clone();
        self.image.write(offset, data)?;

        // Settings writes only happen when the menu closes, so blocking the
        // main loop on the flash program is acceptable
        if let Err(e) = embassy_futures::block_on(self.persist()) {
            self.image = previous;
            return Err(e);
        }
        Ok(())
    }
}
