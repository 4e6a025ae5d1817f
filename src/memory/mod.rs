//! Memory operations module for reading, scanning and patching process memory
//!
//! This module provides:
//! - Positioned access to `/proc/<pid>/mem`
//! - Region enumeration and eligibility filtering
//! - First-scan and narrowing value scans
//! - Patching of scan results

pub mod accessor;
pub mod regions;
pub mod scanner;
pub mod writer;

pub use accessor::{MemoryAccess, ProcMemory};
pub use regions::{PmapSource, ProcMapsSource, Region, RegionSource, SourceKind};
pub use scanner::{scan_buffer, MemoryScanner, ResultStore, DEFAULT_CHUNK_SIZE};
pub use writer::PatchWriter;
