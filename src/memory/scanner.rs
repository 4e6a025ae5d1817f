//! Value scanning: first scan over regions, narrowing over prior results

use super::accessor::MemoryAccess;
use super::regions::Region;
use crate::core::types::{Address, MatchSet, MemoryResult, Width};
use tracing::{debug, trace};

/// Ordered candidate addresses, in scan-insertion order
///
/// `Empty` means the next scan walks every region. `Populated` means the
/// next scan re-tests only the stored addresses. Narrowing down to nothing
/// falls back to `Empty`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ResultStore {
    #[default]
    Empty,
    Populated(Vec<Address>),
}

impl ResultStore {
    fn from_addresses(addresses: Vec<Address>) -> Self {
        if addresses.is_empty() {
            ResultStore::Empty
        } else {
            ResultStore::Populated(addresses)
        }
    }

    pub fn addresses(&self) -> &[Address] {
        match self {
            ResultStore::Empty => &[],
            ResultStore::Populated(addresses) => addresses,
        }
    }

    pub fn len(&self) -> usize {
        self.addresses().len()
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ResultStore::Empty)
    }

    /// Address stored at `index`
    pub fn get(&self, index: usize) -> Option<Address> {
        self.addresses().get(index).copied()
    }

    /// Drops every result, returning to first-scan mode
    pub fn clear(&mut self) {
        *self = ResultStore::Empty;
    }
}

/// Appends `base + i` for every offset `i` whose window matches the query
///
/// The window slides one byte at a time with no alignment assumption.
/// Offsets closer than one window to the end of `data` are never tested.
pub fn scan_buffer(base: Address, data: &[u8], query: &MatchSet, out: &mut Vec<Address>) -> usize {
    let before = out.len();
    let size = query.width().bytes();

    out.extend(
        data.windows(size)
            .enumerate()
            .filter(|(_, window)| query.matches(window))
            .map(|(offset, _)| base.offset(offset)),
    );

    out.len() - before
}

/// Bytes read per call when walking a region
pub const DEFAULT_CHUNK_SIZE: usize = 1 << 20;

/// Memory scanner bound to one address space
pub struct MemoryScanner<'a, M: MemoryAccess + ?Sized> {
    memory: &'a M,
    chunk_size: usize,
}

impl<'a, M: MemoryAccess + ?Sized> MemoryScanner<'a, M> {
    /// Create a new memory scanner
    pub fn new(memory: &'a M) -> Self {
        Self::with_chunk_size(memory, DEFAULT_CHUNK_SIZE)
    }

    /// Scanner reading regions `chunk_size` bytes at a time
    ///
    /// The size is raised to at least one 64-bit window.
    pub fn with_chunk_size(memory: &'a M, chunk_size: usize) -> Self {
        MemoryScanner {
            memory,
            chunk_size: chunk_size.max(Width::W64.bytes()),
        }
    }

    /// Runs one scan step and returns the next store
    ///
    /// An empty store triggers a first scan over `regions`; a populated one is
    /// narrowed. Matching is the same [`MatchSet::matches`] in both states.
    pub fn advance(
        &self,
        store: &ResultStore,
        regions: &[Region],
        query: &MatchSet,
    ) -> MemoryResult<ResultStore> {
        let next = match store {
            ResultStore::Empty => self.first_scan(regions, query)?,
            ResultStore::Populated(addresses) => self.narrow(addresses, query),
        };
        Ok(ResultStore::from_addresses(next))
    }

    /// Scans every region from scratch
    ///
    /// A short read truncates the scanned extent of that region; a zero read
    /// skips it. An error from the handle aborts the pass.
    pub fn first_scan(&self, regions: &[Region], query: &MatchSet) -> MemoryResult<Vec<Address>> {
        let mut results = Vec::new();

        for region in regions {
            let found = self.scan_region(region, query, &mut results)?;
            debug!(base = %region.base, found, "scanned region");
        }

        Ok(results)
    }

    /// Reads one region in chunks and appends its matches to `out`
    ///
    /// Consecutive chunks overlap by one window minus a byte, so a value
    /// straddling a chunk edge is found exactly once. Reading stops at the
    /// first short transfer.
    pub fn scan_region(
        &self,
        region: &Region,
        query: &MatchSet,
        out: &mut Vec<Address>,
    ) -> MemoryResult<usize> {
        let overlap = query.width().bytes() - 1;
        let capacity = usize::try_from(region.size)
            .map_or(self.chunk_size, |size| size.min(self.chunk_size));
        let mut buffer = vec![0u8; capacity];
        let mut offset = 0u64;
        let mut found = 0;

        while offset < region.size {
            let remaining = region.size - offset;
            let wanted =
                usize::try_from(remaining).map_or(buffer.len(), |r| r.min(buffer.len()));
            let start = Address::new(region.base.as_u64().saturating_add(offset));

            let n = self.memory.read_at(start, &mut buffer[..wanted])?;
            found += scan_buffer(start, &buffer[..n], query, out);

            if n < wanted {
                debug!(
                    base = %region.base,
                    requested = region.size,
                    returned = offset + n as u64,
                    "short region read"
                );
                break;
            }
            if wanted as u64 == remaining {
                break;
            }
            offset += (wanted - overlap) as u64;
        }

        Ok(found)
    }

    /// Re-tests stored addresses, keeping those that still match
    ///
    /// Reads exactly one window per address. Failed or short reads drop the
    /// address. Survivors keep their relative order.
    pub fn narrow(&self, addresses: &[Address], query: &MatchSet) -> Vec<Address> {
        let size = query.width().bytes();
        let mut window = [0u8; 8];
        let window = &mut window[..size];

        addresses
            .iter()
            .copied()
            .filter(|&address| match self.memory.read_at(address, window) {
                Ok(n) if n == size => query.matches(window),
                Ok(_) => false,
                Err(e) => {
                    trace!(%address, error = %e, "dropping unreadable result");
                    false
                }
            })
            .collect()
    }
}
