//! Removable storage traits

/// Errors from the storage medium
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// Card or filesystem could not be brought up
    Init,
    /// Root directory could not be opened
    OpenRoot,
    /// Listing the root directory failed part way
    Enumerate,
    /// Named file could not be opened
    Open,
    /// Reading an open file failed
    Read,
}

/// One root directory entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirEntry<'a> {
    pub name: &'a str,
    pub is_dir: bool,
}

/// Flat view of a FAT card's root directory
pub trait StorageCatalog {
    /// Bring up the card and mount the first volume
    fn init(&mut self) -> Result<(), StorageError>;

    /// Call `visit` for every root entry in directory order
    fn list_root(&mut self, visit: &mut dyn FnMut(DirEntry<'_>)) -> Result<(), StorageError>;

    /// Read the start of the named root file into `buffer`
    ///
    /// Returns the number of bytes read, which is less than the buffer
    /// length when the file is shorter.
    fn read_record(&mut self, name: &str, buffer: &mut [u8]) -> Result<usize, StorageError>;
}
