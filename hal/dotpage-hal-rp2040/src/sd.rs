//! SD card page catalog
//!
//! Reads the root directory of the first FAT volume through
//! `embedded-sdmmc`. Only raw handles are kept so nothing borrows the
//! volume manager between calls.

use dotpage_core::traits::{DirEntry, StorageCatalog, StorageError};
use embedded_sdmmc::{
    BlockDevice, Mode, RawDirectory, RawFile, RawVolume, ShortFileName, TimeSource, Timestamp,
    VolumeIdx, VolumeManager,
};
use heapless::String;

/// Longest 8.3 name including the dot
const SHORT_NAME_LEN: usize = 12;

/// Fixed timestamp source; the player never writes to the card
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedTimeSource;

impl TimeSource for FixedTimeSource {
    fn get_timestamp(&self) -> Timestamp {
        // 2026-01-01 00:00:00
        Timestamp {
            year_since_1970: 56,
            zero_indexed_month: 0,
            zero_indexed_day: 0,
            hours: 0,
            minutes: 0,
            seconds: 0,
        }
    }
}

/// Root-directory catalog over an SD block device
pub struct SdCatalog<D, T>
where
    D: BlockDevice,
    T: TimeSource,
{
    volume_mgr: VolumeManager<D, T>,
    volume: Option<RawVolume>,
}

impl<D, T> SdCatalog<D, T>
where
    D: BlockDevice,
    T: TimeSource,
{
    pub fn new(device: D, time_source: T) -> Self {
        Self {
            volume_mgr: VolumeManager::new(device, time_source),
            volume: None,
        }
    }

    fn root(&mut self, error: StorageError) -> Result<RawDirectory, StorageError> {
        let volume = self.volume.ok_or(StorageError::Init)?;
        self.volume_mgr.open_root_dir(volume).map_err(|_| error)
    }

    fn read_fully(&mut self, file: RawFile, buffer: &mut [u8]) -> Result<usize, StorageError> {
        let mut total = 0;
        while total < buffer.len() {
            let read_now = self
                .volume_mgr
                .read(file, &mut buffer[total..])
                .map_err(|_| StorageError::Read)?;
            if read_now == 0 {
                break;
            }
            total += read_now;
        }
        Ok(total)
    }
}

impl<D, T> StorageCatalog for SdCatalog<D, T>
where
    D: BlockDevice,
    T: TimeSource,
{
    fn init(&mut self) -> Result<(), StorageError> {
        // The card itself is brought up lazily by the first volume access
        let volume = self
            .volume_mgr
            .open_raw_volume(VolumeIdx(0))
            .map_err(|_| StorageError::Init)?;
        self.volume = Some(volume);
        Ok(())
    }

    fn list_root(&mut self, visit: &mut dyn FnMut(DirEntry<'_>)) -> Result<(), StorageError> {
        let dir = self.root(StorageError::OpenRoot)?;

        let listed = self.volume_mgr.iterate_dir(dir, |entry| {
            if entry.attributes.is_volume() {
                return;
            }
            let name = short_file_name_to_string(&entry.name);
            visit(DirEntry {
                name: name.as_str(),
                is_dir: entry.attributes.is_directory(),
            });
        });

        let _ = self.volume_mgr.close_dir(dir);
        listed.map_err(|_| StorageError::Enumerate)
    }

    fn read_record(&mut self, name: &str, buffer: &mut [u8]) -> Result<usize, StorageError> {
        let dir = self.root(StorageError::Open)?;

        let file = match self.volume_mgr.open_file_in_dir(dir, name, Mode::ReadOnly) {
            Ok(file) => file,
            Err(_) => {
                let _ = self.volume_mgr.close_dir(dir);
                return Err(StorageError::Open);
            }
        };

        let result = self.read_fully(file, buffer);

        let _ = self.volume_mgr.close_file(file);
        let _ = self.volume_mgr.close_dir(dir);
        result
    }
}

fn short_file_name_to_string(name: &ShortFileName) -> String<SHORT_NAME_LEN> {
    let mut out = String::new();

    for &byte in name.base_name() {
        if out.push(byte as char).is_err() {
            return out;
        }
    }

    let ext = name.extension();
    if !ext.is_empty() {
        let _ = out.push('.');
        for &byte in ext {
            if out.push(byte as char).is_err() {
                break;
            }
        }
    }

    out
}
