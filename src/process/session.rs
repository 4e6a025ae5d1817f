//! The live scanning session attached to one process

use crate::config::Config;
use crate::core::types::{Address, EncodedValue, MatchSet, MemoryError, MemoryResult, ProcessId, Width};
use crate::memory::regions::{Region, RegionSource};
use crate::memory::{MemoryAccess, MemoryScanner, PatchWriter, ProcMemory, ResultStore};
use std::fmt;
use tracing::{info, warn};

/// Which pass a scan ran
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    First,
    Narrow,
}

impl fmt::Display for ScanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanMode::First => f.write_str("first scan"),
            ScanMode::Narrow => f.write_str("narrowing scan"),
        }
    }
}

/// Outcome of one scan step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanSummary {
    pub mode: ScanMode,
    pub before: usize,
    pub after: usize,
}

/// Scanning context: memory handle, width, regions and results
///
/// The session owns the memory handle for its whole lifetime; dropping the
/// session releases it.
pub struct Session<M = ProcMemory> {
    pid: ProcessId,
    name: String,
    memory: M,
    source: Box<dyn RegionSource>,
    width: Width,
    regions: Vec<Region>,
    results: ResultStore,
}

impl Session<ProcMemory> {
    /// Opens `/proc/<pid>/mem` and enumerates regions as configured
    pub fn attach(pid: ProcessId, name: impl Into<String>, config: &Config) -> MemoryResult<Self> {
        let memory = ProcMemory::open(pid)?;
        let source = config.regions.source.build(&config.regions.pmap_program);
        let session = Session::new(pid, memory, source)?
            .with_name(name)
            .with_width(config.scanner.width().unwrap_or_default());

        info!(
            pid,
            name = %session.name,
            regions = session.regions.len(),
            "attached to process"
        );
        Ok(session)
    }
}

impl<M: MemoryAccess> Session<M> {
    /// Builds a session over an already opened address space
    ///
    /// Fails when the initial region enumeration fails.
    pub fn new(pid: ProcessId, memory: M, source: Box<dyn RegionSource>) -> MemoryResult<Self> {
        let regions = source.enumerate(pid)?;

        Ok(Session {
            pid,
            name: pid.to_string(),
            memory,
            source,
            width: Width::default(),
            regions,
            results: ResultStore::Empty,
        })
    }

    /// Sets the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the starting width
    pub fn with_width(mut self, width: Width) -> Self {
        self.width = width;
        self
    }

    pub fn pid(&self) -> ProcessId {
        self.pid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Active scan width
    pub fn width(&self) -> Width {
        self.width
    }

    /// Current scannable regions, in enumeration order
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Current result addresses, in insertion order
    pub fn results(&self) -> &[Address] {
        self.results.addresses()
    }

    pub fn result_store(&self) -> &ResultStore {
        &self.results
    }

    /// Scans for `text` at the active width
    ///
    /// Runs a first scan when there are no results and narrows otherwise.
    /// A query with no encoding at this width leaves the results untouched
    /// and fails with [`MemoryError::ParseFailed`].
    pub fn scan(&mut self, text: &str) -> MemoryResult<ScanSummary> {
        let query = MatchSet::parse(text, self.width);
        if query.is_empty() {
            return Err(MemoryError::parse_failed(text.trim(), self.width.bits()));
        }

        let mode = if self.results.is_empty() {
            ScanMode::First
        } else {
            ScanMode::Narrow
        };
        let before = self.results.len();

        let scanner = MemoryScanner::new(&self.memory);
        self.results = scanner.advance(&self.results, &self.regions, &query)?;

        let summary = ScanSummary {
            mode,
            before,
            after: self.results.len(),
        };
        info!(
            query = query.text(),
            width = self.width.bits(),
            encodings = query.len(),
            before,
            after = summary.after,
            "{}",
            mode
        );
        Ok(summary)
    }

    /// Drops every result; the next scan is a first scan
    pub fn clear_results(&mut self) {
        self.results.clear();
    }

    /// Changes the active width; values other than 8/16/32/64 are ignored
    ///
    /// Stored results are kept and are re-read at the new width on the next
    /// narrowing scan. Returns whether the width was applied.
    pub fn set_width(&mut self, bits: u32) -> bool {
        match Width::from_bits(bits) {
            Some(width) => {
                self.width = width;
                true
            }
            None => false,
        }
    }

    /// Writes `text` over result `index` at the active width
    pub fn patch(&self, index: usize, text: &str) -> MemoryResult<EncodedValue> {
        PatchWriter::new(&self.memory).patch(&self.results, index, text, self.width)
    }

    /// Reads up to `length` raw bytes at `address`
    pub fn read_raw(&self, address: Address, length: usize) -> MemoryResult<Vec<u8>> {
        self.memory.read(address, length)
    }

    /// Re-enumerates regions, replacing the list wholesale
    ///
    /// On failure the previous list is kept.
    pub fn reload_regions(&mut self) -> MemoryResult<usize> {
        match self.source.enumerate(self.pid) {
            Ok(regions) => {
                self.regions = regions;
                info!(pid = self.pid, regions = self.regions.len(), "reloaded regions");
                Ok(self.regions.len())
            }
            Err(e) => {
                warn!(pid = self.pid, error = %e, "region reload failed, keeping previous list");
                Err(e)
            }
        }
    }
}
