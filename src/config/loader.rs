//! Configuration loader for memscan
//!
//! Handles loading configuration from TOML files and merging with defaults.

use super::defaults::default_config;
use crate::core::types::Width;
use crate::memory::regions::SourceKind;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "memscan.toml";

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_scanner")]
    pub scanner: ScannerConfig,

    #[serde(default = "default_regions")]
    pub regions: RegionConfig,

    #[serde(default = "default_process")]
    pub process: ProcessConfig,

    #[serde(default = "default_logging")]
    pub logging: LoggingConfig,
}

/// Scanner configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerConfig {
    /// Width in bits a new session starts with
    #[serde(default = "default_width")]
    pub default_width: u32,
    /// Results shown by `print`
    #[serde(default = "default_print_limit")]
    pub print_limit: usize,
    /// Bytes shown next to each printed result
    #[serde(default = "default_preview_bytes")]
    pub preview_bytes: usize,
}

impl ScannerConfig {
    /// The configured starting width, if it is a valid one
    pub fn width(&self) -> Option<Width> {
        Width::from_bits(self.default_width)
    }
}

/// Region enumeration configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionConfig {
    #[serde(default = "default_source")]
    pub source: SourceKind,
    #[serde(default = "default_pmap_program")]
    pub pmap_program: String,
}

/// Process resolution configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessConfig {
    #[serde(default = "default_pidof_program")]
    pub pidof_program: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Configuration loader
pub struct ConfigLoader {
    config_path: PathBuf,
}

impl ConfigLoader {
    /// Creates a new configuration loader
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        ConfigLoader {
            config_path: path.as_ref().to_path_buf(),
        }
    }

    /// Loads configuration from file
    pub fn load(&self) -> Result<Config, ConfigError> {
        if !self.config_path.exists() {
            return Err(ConfigError::FileNotFound(
                self.config_path.display().to_string(),
            ));
        }

        let contents = fs::read_to_string(&self.config_path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Loads configuration, or returns defaults if the file doesn't exist
    ///
    /// A file that exists but fails to parse is still an error.
    pub fn load_or_default(&self) -> Result<Config, ConfigError> {
        match self.load() {
            Err(ConfigError::FileNotFound(_)) => Ok(Config::default()),
            other => other,
        }
    }

    /// Saves configuration to file
    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(config)?;
        fs::write(&self.config_path, contents)?;
        Ok(())
    }
}

/// Loads configuration from the default location
pub fn load_config() -> Result<Config, ConfigError> {
    ConfigLoader::new(DEFAULT_CONFIG_FILE).load_or_default()
}

// Default functions for serde
fn default_scanner() -> ScannerConfig {
    let defaults = default_config();
    ScannerConfig {
        default_width: defaults.scanner.default_width,
        print_limit: defaults.scanner.print_limit,
        preview_bytes: defaults.scanner.preview_bytes,
    }
}

fn default_regions() -> RegionConfig {
    let defaults = default_config();
    RegionConfig {
        source: defaults.regions.source,
        pmap_program: defaults.regions.pmap_program,
    }
}

fn default_process() -> ProcessConfig {
    ProcessConfig {
        pidof_program: default_config().process.pidof_program,
    }
}

fn default_logging() -> LoggingConfig {
    LoggingConfig {
        level: default_config().logging.level,
    }
}

// Individual field defaults
fn default_width() -> u32 {
    default_config().scanner.default_width
}

fn default_print_limit() -> usize {
    default_config().scanner.print_limit
}

fn default_preview_bytes() -> usize {
    default_config().scanner.preview_bytes
}

fn default_source() -> SourceKind {
    default_config().regions.source
}

fn default_pmap_program() -> String {
    default_config().regions.pmap_program
}

fn default_pidof_program() -> String {
    default_config().process.pidof_program
}

fn default_log_level() -> String {
    default_config().logging.level
}

impl Default for Config {
    fn default() -> Self {
        Config {
            scanner: default_scanner(),
            regions: default_regions(),
            process: default_process(),
            logging: default_logging(),
        }
    }
}
