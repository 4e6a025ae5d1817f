//! Custom error types for memscan

use std::fmt;
use thiserror::Error;

/// Main error type for scanning, patching and attach operations
#[derive(Error, Debug)]
pub enum MemoryError {
    #[error("Process not found: {0}")]
    ProcessNotFound(String),

    #[error("Failed to attach to process {pid}: {reason}")]
    AttachFailed { pid: u32, reason: String },

    #[error("Region enumeration failed: {0}")]
    EnumerationFailed(String),

    #[error("Value '{text}' has no encoding at {width} bits")]
    ParseFailed { text: String, width: u32 },

    #[error("Invalid memory address: {0}")]
    InvalidAddress(String),

    #[error("Failed to read memory at {address}: {reason}")]
    ReadFailed { address: String, reason: String },

    #[error("Failed to write memory at {address}: {reason}")]
    WriteFailed { address: String, reason: String },

    #[error("Partial write at {address}: expected {expected} bytes, wrote {actual}")]
    PartialWrite {
        address: String,
        expected: usize,
        actual: usize,
    },

    #[error("Result index {index} out of range ({len} results)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("No scan results to write to")]
    EmptyResults,
}

/// Result type alias for memory operations
pub type MemoryResult<T> = Result<T, MemoryError>;

impl MemoryError {
    /// Creates an attach failure for a process
    pub fn attach_failed(pid: u32, reason: impl Into<String>) -> Self {
        MemoryError::AttachFailed {
            pid,
            reason: reason.into(),
        }
    }

    /// Creates a read failed error
    pub fn read_failed(address: impl fmt::Display, reason: impl Into<String>) -> Self {
        MemoryError::ReadFailed {
            address: address.to_string(),
            reason: reason.into(),
        }
    }

    /// Creates a write failed error
    pub fn write_failed(address: impl fmt::Display, reason: impl Into<String>) -> Self {
        MemoryError::WriteFailed {
            address: address.to_string(),
            reason: reason.into(),
        }
    }

    /// Creates a parse failure for a value at the given width in bits
    pub fn parse_failed(text: impl Into<String>, width: u32) -> Self {
        MemoryError::ParseFailed {
            text: text.into(),
            width,
        }
    }

    /// Whether the error leaves the session usable
    ///
    /// Attach and initial enumeration failures are fatal; everything else is
    /// reported to the operator and the session continues.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            MemoryError::ProcessNotFound(_) | MemoryError::AttachFailed { .. }
        )
    }
}
