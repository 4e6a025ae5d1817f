//! Configuration validator for memscan
//!
//! Validates configuration values to ensure they are within acceptable ranges.

use super::loader::{Config, ConfigError, LoggingConfig, ProcessConfig, RegionConfig, ScannerConfig};

/// Largest preview accepted next to a printed result
const MAX_PREVIEW_BYTES: usize = 64;

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates the entire configuration
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        Self::validate_scanner(&config.scanner)?;
        Self::validate_regions(&config.regions)?;
        Self::validate_process(&config.process)?;
        Self::validate_logging(&config.logging)?;
        Ok(())
    }

    /// Validates scanner configuration
    fn validate_scanner(scanner: &ScannerConfig) -> Result<(), ConfigError> {
        if scanner.width().is_none() {
            return Err(ConfigError::Invalid(format!(
                "Scanner width {} must be one of 8, 16, 32, 64",
                scanner.default_width
            )));
        }

        if scanner.print_limit == 0 {
            return Err(ConfigError::Invalid(
                "Print limit must be at least 1".to_string(),
            ));
        }

        if scanner.preview_bytes == 0 || scanner.preview_bytes > MAX_PREVIEW_BYTES {
            return Err(ConfigError::Invalid(format!(
                "Preview bytes must be between 1 and {}",
                MAX_PREVIEW_BYTES
            )));
        }

        Ok(())
    }

    /// Validates region enumeration configuration
    fn validate_regions(regions: &RegionConfig) -> Result<(), ConfigError> {
        if regions.pmap_program.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "pmap program cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Validates process resolution configuration
    fn validate_process(process: &ProcessConfig) -> Result<(), ConfigError> {
        if process.pidof_program.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "pidof program cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Validates logging configuration
    fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error", "off"];
        if !valid_levels.contains(&logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::Invalid(format!(
                "Invalid log level: {}. Must be one of: {:?}",
                logging.level, valid_levels
            )));
        }

        Ok(())
    }
}

/// Validates a configuration
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    ConfigValidator::validate(config)
}
