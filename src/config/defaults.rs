//! Default configuration values for memscan

use crate::memory::regions::SourceKind;
use serde::{Deserialize, Serialize};

/// Default configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigDefaults {
    pub scanner: ScannerDefaults,
    pub regions: RegionDefaults,
    pub process: ProcessDefaults,
    pub logging: LoggingDefaults,
}

/// Default scanner configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerDefaults {
    pub default_width: u32,
    pub print_limit: usize,
    pub preview_bytes: usize,
}

/// Default region enumeration configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionDefaults {
    pub source: SourceKind,
    pub pmap_program: String,
}

/// Default process resolution configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessDefaults {
    pub pidof_program: String,
}

/// Default logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingDefaults {
    pub level: String,
}

/// Returns the default configuration
pub fn default_config() -> ConfigDefaults {
    ConfigDefaults {
        scanner: ScannerDefaults {
            default_width: 32,
            print_limit: 10,
            preview_bytes: 8,
        },
        regions: RegionDefaults {
            source: SourceKind::Pmap,
            pmap_program: "pmap".to_string(),
        },
        process: ProcessDefaults {
            pidof_program: "pidof".to_string(),
        },
        logging: LoggingDefaults {
            level: "info".to_string(),
        },
    }
}
