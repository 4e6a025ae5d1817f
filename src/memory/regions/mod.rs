//! Memory region enumeration for Linux processes
//!
//! Regions are listed either through the `pmap` utility or by reading
//! `/proc/<pid>/maps`, then filtered down to the read-write, non-library
//! extents worth scanning.

pub mod enumerator;
pub mod filter;

pub use enumerator::{
    parse_pmap_output, parse_proc_maps, PmapSource, ProcMapsSource, RegionSource, SourceKind,
};
pub use filter::{is_read_write, is_scannable, is_shared_library};

use crate::core::types::Address;
use serde::{Deserialize, Serialize};

/// A contiguous scannable extent of a process's address space
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    /// Absolute start address
    pub base: Address,
    /// Size in bytes
    pub size: u64,
    /// Permission string, only used for eligibility
    pub mode: String,
    /// Mapping label (path, `[ anon ]`, `[stack]`...), empty for anonymous rows
    pub mapping: String,
    /// Resident set size in KiB, when the source reports it
    pub rss_kb: Option<u64>,
    /// Dirty pages in KiB, when the source reports it
    pub dirty_kb: Option<u64>,
}

impl Region {
    /// Creates a region without resident/dirty accounting
    pub fn new(base: Address, size: u64, mode: impl Into<String>, mapping: impl Into<String>) -> Self {
        Region {
            base,
            size,
            mode: mode.into(),
            mapping: mapping.into(),
            rss_kb: None,
            dirty_kb: None,
        }
    }

    /// First address past the end of the region
    pub fn end(&self) -> Address {
        Address::new(self.base.as_u64().saturating_add(self.size))
    }

    /// Checks if an address lies within the region
    pub fn contains(&self, address: Address) -> bool {
        address >= self.base && address < self.end()
    }

    /// Size in KiB as pmap reports it
    pub fn size_kb(&self) -> u64 {
        self.size / 1024
    }
}
