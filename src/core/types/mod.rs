//! Core type definitions for memscan
//!
//! Address wrappers, scan widths, value encodings and the error type used
//! throughout the crate.

mod address;
mod error;
mod value;
mod width;

pub use address::Address;
pub use error::{MemoryError, MemoryResult};
pub use value::{is_fractional_literal, EncodedValue, Encoding, MatchSet};
pub use width::Width;

pub type ProcessId = u32;
