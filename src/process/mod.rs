//! Process attachment for Linux
//!
//! This module resolves process names to PIDs and holds the scanning
//! [`Session`] bound to one attached process.

pub mod resolver;
pub mod session;

pub use resolver::{parse_pidof_output, PidResolver};
pub use session::{ScanMode, ScanSummary, Session};
