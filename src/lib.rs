//! memscan: live memory scanner and patcher for Linux processes
//!
//! Attach to a running process, scan its writable memory for a value of
//! unknown type, narrow the candidates across repeated scans, then patch
//! the survivors.

pub mod config;
pub mod console;
pub mod core;
pub mod memory;
pub mod process;

// Re-export main types from core module
pub use self::core::types::{
    Address, EncodedValue, Encoding, MatchSet, MemoryError, MemoryResult, ProcessId, Width,
};
pub use memory::{MemoryAccess, ProcMemory, Region, ResultStore};
pub use process::Session;
