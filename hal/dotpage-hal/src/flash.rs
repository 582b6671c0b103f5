//! Persistent settings storage abstractions
//!
//! The settings live at fixed byte offsets inside a small reserved region,
//! EEPROM style. Chip HALs back the region with whatever non-volatile
//! memory they have; [`BudgetedStore`] caps the number of writes a store
//! will ever accept so a misbehaving UI cannot wear the medium out.

/// Errors from persistent store operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// Access falls outside the store's region
    OutOfRange,
    /// The store refused the write because its write budget is spent
    WriteBudgetExhausted,
    /// The backing medium reported a failure
    Medium,
}

/// Byte-addressed persistent store
///
/// Offsets are absolute within the store; callers pick the region they
/// reserve. A write either lands completely or not at all.
pub trait PersistentStore {
    /// Fill `buffer` with the bytes stored at `offset..offset + buffer.len()`
    fn read(&mut self, offset: u16, buffer: &mut [u8]) -> Result<(), StoreError>;

    /// Store `data` at `offset..offset + data.len()`
    fn write(&mut self, offset: u16, data: &[u8]) -> Result<(), StoreError>;

    /// Read a single byte
    fn read_u8(&mut self, offset: u16) -> Result<u8, StoreError> {
        let mut buf = [0u8; 1];
        self.read(offset, &mut buf)?;
        Ok(buf[0])
    }

    /// Read a little-endian 16-bit word
    fn read_u16(&mut self, offset: u16) -> Result<u16, StoreError> {
        let mut buf = [0u8; 2];
        self.read(offset, &mut buf)?;
        Ok(u16::from_le_bytes(buf))
    }

    /// Write a single byte
    fn write_u8(&mut self, offset: u16, value: u8) -> Result<(), StoreError> {
        self.write(offset, &[value])
    }

    /// Write a little-endian 16-bit word
    fn write_u16(&mut self, offset: u16, value: u16) -> Result<(), StoreError> {
        self.write(offset, &value.to_le_bytes())
    }
}

/// RAM-backed store of `N` bytes
///
/// Erased cells read as `0xFF`, like a blank EEPROM. Used as the working
/// image by flash-backed stores and as a stand-in under test.
#[derive(Debug, Clone)]
pub struct MemoryStore<const N: usize> {
    bytes: [u8; N],
}

impl<const N: usize> Default for MemoryStore<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> MemoryStore<N> {
    /// Create an erased store
    pub const fn new() -> Self {
        Self { bytes: [0xFF; N] }
    }

    /// Raw image
    pub fn as_bytes(&self) -> &[u8; N] {
        &self.bytes
    }

    /// Mutable raw image, for loading from a backing medium
    pub fn as_bytes_mut(&mut self) -> &mut [u8; N] {
        &mut self.bytes
    }

    fn range(offset: u16, len: usize) -> Result<core::ops::Range<usize>, StoreError> {
        let start = offset as usize;
        let end = start.checked_add(len).ok_or(StoreError::OutOfRange)?;
        if end > N {
            return Err(StoreError::OutOfRange);
        }
        Ok(start..end)
    }
}

impl<const N: usize> PersistentStore for MemoryStore<N> {
    fn read(&mut self, offset: u16, buffer: &mut [u8]) -> Result<(), StoreError> {
        let range = Self::range(offset, buffer.len())?;
        buffer.copy_from_slice(&self.bytes[range]);
        Ok(())
    }

    fn write(&mut self, offset: u16, data: &[u8]) -> Result<(), StoreError> {
        let range = Self::range(offset, data.len())?;
        self.bytes[range].copy_from_slice(data);
        Ok(())
    }
}

/// Store wrapper that refuses writes once a fixed budget is spent
///
/// Every accepted `write` call costs one unit regardless of length. Reads
/// are never limited.
#[derive(Debug)]
pub struct BudgetedStore<S> {
    inner: S,
    max_writes: u16,
    writes: u16,
}

impl<S: PersistentStore> BudgetedStore<S> {
    /// Wrap `inner`, allowing at most `max_writes` writes
    pub fn new(inner: S, max_writes: u16) -> Self {
        Self {
            inner,
            max_writes,
            writes: 0,
        }
    }

    /// Number of writes accepted so far
    pub fn writes(&self) -> u16 {
        self.writes
    }

    /// Writes still allowed
    pub fn remaining(&self) -> u16 {
        self.max_writes.saturating_sub(self.writes)
    }

    /// Access the wrapped store
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: PersistentStore> PersistentStore for BudgetedStore<S> {
    fn read(&mut self, offset: u16, buffer: &mut [u8]) -> Result<(), StoreError> {
        self.inner.read(offset, buffer)
    }

    fn write(&mut self, offset: u16, data: &[u8]) -> Result<(), StoreError> {
        if self.writes >= self.max_writes {
            return Err(StoreError::WriteBudgetExhausted);
        }
        self.inner.write(offset, data)?;
        self.writes += 1;
        Ok(())
    }
}
