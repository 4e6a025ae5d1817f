//! Region enumeration from `pmap -xq` or `/proc/<pid>/maps`

use super::filter::is_scannable;
use super::Region;
use crate::core::types::{Address, MemoryError, MemoryResult, ProcessId};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tracing::{debug, warn};

/// Produces the ordered list of scannable regions of a process
pub trait RegionSource {
    fn enumerate(&self, pid: ProcessId) -> MemoryResult<Vec<Region>>;
}

/// Which region listing to read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceKind {
    #[default]
    Pmap,
    ProcMaps,
}

impl SourceKind {
    /// Builds the configured source
    pub fn build(&self, pmap_program: &str) -> Box<dyn RegionSource> {
        match self {
            SourceKind::Pmap => Box::new(PmapSource::new(pmap_program)),
            SourceKind::ProcMaps => Box::new(ProcMapsSource::default()),
        }
    }
}

/// Lists regions by running the `pmap` utility in extended, quiet mode
#[derive(Debug, Clone)]
pub struct PmapSource {
    program: String,
}

impl PmapSource {
    pub fn new(program: impl Into<String>) -> Self {
        PmapSource {
            program: program.into(),
        }
    }
}

impl Default for PmapSource {
    fn default() -> Self {
        PmapSource::new("pmap")
    }
}

impl RegionSource for PmapSource {
    fn enumerate(&self, pid: ProcessId) -> MemoryResult<Vec<Region>> {
        let output = Command::new(&self.program)
            .arg("-xq")
            .arg(pid.to_string())
            .output()
            .map_err(|e| {
                MemoryError::EnumerationFailed(format!("failed to run {}: {}", self.program, e))
            })?;

        if !output.status.success() {
            return Err(MemoryError::EnumerationFailed(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let text = String::from_utf8(output.stdout).map_err(|e| {
            MemoryError::EnumerationFailed(format!("unreadable {} output: {}", self.program, e))
        })?;

        let regions = parse_pmap_output(&text);
        debug!(pid, count = regions.len(), "enumerated regions via pmap");
        Ok(regions)
    }
}

/// Lists regions by reading the kernel's maps file directly
#[derive(Debug, Clone)]
pub struct ProcMapsSource {
    proc_root: PathBuf,
}

impl ProcMapsSource {
    /// Reads `<proc_root>/<pid>/maps` instead of `/proc/<pid>/maps`
    pub fn with_root(proc_root: impl Into<PathBuf>) -> Self {
        ProcMapsSource {
            proc_root: proc_root.into(),
        }
    }
}

impl Default for ProcMapsSource {
    fn default() -> Self {
        ProcMapsSource::with_root("/proc")
    }
}

impl RegionSource for ProcMapsSource {
    fn enumerate(&self, pid: ProcessId) -> MemoryResult<Vec<Region>> {
        let path = self.proc_root.join(pid.to_string()).join("maps");
        let text = fs::read_to_string(&path).map_err(|e| {
            MemoryError::EnumerationFailed(format!("failed to read {}: {}", path.display(), e))
        })?;

        let regions = parse_proc_maps(&text);
        debug!(pid, count = regions.len(), "enumerated regions via maps");
        Ok(regions)
    }
}

/// Parses `pmap -xq` output into the scannable regions it lists
///
/// Rows are `Address Kbytes RSS Dirty Mode [Mapping...]`. The mapping label
/// may be missing, a single path, or a bracketed name split over several
/// fields (`[ anon ]`); all shapes normalise to one [`Region`]. Rows that
/// are not read-write, or that map a shared library, are dropped silently.
/// Eligible rows with a malformed address or size are skipped with a warning.
pub fn parse_pmap_output(text: &str) -> Vec<Region> {
    text.lines()
        .filter_map(|line| match parse_pmap_line(line) {
            Ok(region) => region,
            Err(reason) => {
                warn!(line, %reason, "skipping pmap row");
                None
            }
        })
        .collect()
}

fn parse_pmap_line(line: &str) -> Result<Option<Region>, String> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 5 {
        return Ok(None);
    }

    let mode = fields[4];
    let mapping = fields[5..].join(" ");
    if !is_scannable(mode, &mapping) {
        return Ok(None);
    }

    let base = Address::parse_hex(fields[0]).map_err(|e| e.to_string())?;
    let kbytes: u64 = fields[1]
        .parse()
        .map_err(|e| format!("invalid size '{}': {}", fields[1], e))?;

    Ok(Some(Region {
        base,
        size: kbytes.saturating_mul(1024),
        mode: mode.to_string(),
        mapping,
        rss_kb: fields[2].parse().ok(),
        dirty_kb: fields[3].parse().ok(),
    }))
}

/// Parses the contents of `/proc/<pid>/maps` into scannable regions
///
/// Rows are `start-end perms offset dev inode [pathname]`. The same
/// eligibility policy as [`parse_pmap_output`] applies.
pub fn parse_proc_maps(text: &str) -> Vec<Region> {
    text.lines()
        .filter_map(|line| match parse_maps_line(line) {
            Ok(region) => region,
            Err(reason) => {
                warn!(line, %reason, "skipping maps row");
                None
            }
        })
        .collect()
}

fn parse_maps_line(line: &str) -> Result<Option<Region>, String> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 5 {
        return Ok(None);
    }

    let mode = fields[1];
    let mapping = fields[5..].join(" ");
    if !is_scannable(mode, &mapping) {
        return Ok(None);
    }

    let (start, end) = fields[0]
        .split_once('-')
        .ok_or_else(|| format!("malformed range '{}'", fields[0]))?;
    let start = Address::parse_hex(start).map_err(|e| e.to_string())?;
    let end = Address::parse_hex(end).map_err(|e| e.to_string())?;
    if end <= start {
        return Err(format!("empty range '{}'", fields[0]));
    }

    Ok(Some(Region::new(
        start,
        end.as_u64() - start.as_u64(),
        mode,
        mapping,
    )))
}
