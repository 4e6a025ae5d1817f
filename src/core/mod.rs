//! Core module containing fundamental types for memscan
//!
//! This module provides the foundational building blocks used throughout
//! the scanner: addresses, widths, value encodings and error types.

pub mod types;

pub use types::{
    Address, EncodedValue, Encoding, MatchSet, MemoryError, MemoryResult, ProcessId, Width,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");

// Process memory is reached through /proc/<pid>/mem with positioned file I/O
#[cfg(not(unix))]
compile_error!("memscan only supports Unix platforms with a /proc filesystem");
