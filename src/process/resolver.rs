//! Process name to PID resolution through `pidof`

use crate::core::types::{MemoryError, MemoryResult, ProcessId};
use std::process::Command;
use tracing::{debug, warn};

/// Resolves process names using an external `pidof`-style utility
#[derive(Debug, Clone)]
pub struct PidResolver {
    program: String,
}

impl PidResolver {
    pub fn new(program: impl Into<String>) -> Self {
        PidResolver {
            program: program.into(),
        }
    }

    /// Returns the PID of the process called `name`
    ///
    /// When several processes share the name, the first PID printed wins.
    pub fn resolve(&self, name: &str) -> MemoryResult<ProcessId> {
        let output = Command::new(&self.program)
            .arg(name)
            .output()
            .map_err(|e| {
                MemoryError::ProcessNotFound(format!("{name} (failed to run {}: {e})", self.program))
            })?;

        if !output.status.success() {
            return Err(MemoryError::ProcessNotFound(name.to_string()));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let pids = parse_pidof_output(&stdout);
        match pids.as_slice() {
            [] => Err(MemoryError::ProcessNotFound(name.to_string())),
            [pid] => {
                debug!(name, pid, "resolved process");
                Ok(*pid)
            }
            [pid, others @ ..] => {
                warn!(name, pid, others = others.len(), "several processes match, using the first");
                Ok(*pid)
            }
        }
    }
}

impl Default for PidResolver {
    fn default() -> Self {
        PidResolver::new("pidof")
    }
}

/// Extracts every PID from whitespace-separated `pidof` output
pub fn parse_pidof_output(text: &str) -> Vec<ProcessId> {
    text.split_whitespace()
        .filter_map(|token| token.parse().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_pid() {
        assert_eq!(parse_pidof_output("4242\n"), vec![4242]);
    }

    #[test]
    fn test_parse_multiple_pids() {
        assert_eq!(parse_pidof_output("31 17 5\n"), vec![31, 17, 5]);
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_pidof_output("").is_empty());
        assert!(parse_pidof_output("  \n").is_empty());
    }

    #[test]
    fn test_missing_program_is_not_found() {
        let resolver = PidResolver::new("/nonexistent/memscan-pidof");
        let err = resolver.resolve("demo").unwrap_err();
        assert!(matches!(err, MemoryError::ProcessNotFound(_)));
        assert!(!err.is_recoverable());
    }
}
