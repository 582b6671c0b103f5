//! Root directory catalog
//!
//! The catalog is a snapshot of the card's root directory taken once at
//! boot. Every entry takes a slot, in directory order: files keep their
//! (truncated) name and directories get an empty name so they are never
//! shown. Playback skips slot 0 and only shows slots whose name ends in
//! the page suffix.

use heapless::{String, Vec};

use crate::fault::Fault;
use crate::traits::{DirEntry, StorageCatalog};

/// Maximum catalog slots; entries past this are dropped
pub const MAX_PAGES: usize = 250;

/// Longest stored name; longer names are cut
pub const MAX_NAME_LEN: usize = 17;

/// Suffix of page files, compared without regard to ASCII case
pub const PAGE_SUFFIX: &str = ".DMD";

/// Stored entry name
pub type EntryName = String<MAX_NAME_LEN>;

/// Whether `name` is a page file
pub fn is_page_name(name: &str) -> bool {
    let name = name.as_bytes();
    let suffix = PAGE_SUFFIX.as_bytes();
    name.len() >= suffix.len() && name[name.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
}

/// Ordered list of root directory entries
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<EntryName, MAX_PAGES>,
    dropped: u16,
}

impl Catalog {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            dropped: 0,
        }
    }

    /// List the storage root into a new catalog
    pub fn enumerate<S: StorageCatalog + ?Sized>(storage: &mut S) -> Result<Self, Fault> {
        let mut catalog = Self::new();
        storage
            .list_root(&mut |entry: DirEntry<'_>| {
                catalog.push(entry);
            })
            .map_err(Fault::from_listing)?;

        #[cfg(feature = "defmt")]
        defmt::info!(
            "catalog: {} entries, {} dropped",
            catalog.len(),
            catalog.dropped
        );

        Ok(catalog)
    }

    /// Append an entry, returning false if the catalog is full
    pub fn push(&mut self, entry: DirEntry<'_>) -> bool {
        let mut name = EntryName::new();
        if !entry.is_dir {
            for ch in entry.name.chars() {
                if name.push(ch).is_err() {
                    break;
                }
            }
        }

        if self.entries.push(name).is_err() {
            self.dropped = self.dropped.saturating_add(1);
            return false;
        }
        true
    }

    /// Number of slots in use
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries that did not fit
    pub fn dropped(&self) -> u16 {
        self.dropped
    }

    /// Name stored in slot `index`
    pub fn name(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(|n| n.as_str())
    }

    /// Whether slot `index` holds a page file
    pub fn is_page(&self, index: usize) -> bool {
        self.name(index).is_some_and(is_page_name)
    }

    /// Number of slots playback cycles through (all but slot 0)
    pub fn playable_slots(&self) -> usize {
        self.len().saturating_sub(1)
    }

    /// Number of page files past slot 0
    pub fn page_count(&self) -> usize {
        self.entries
            .iter()
            .skip(1)
            .filter(|n| is_page_name(n.as_str()))
            .count()
    }
}
