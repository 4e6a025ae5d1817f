//! Configuration module for memscan
//!
//! Provides configuration loading, validation, and default settings.

mod defaults;
mod loader;
mod validator;

pub use defaults::{default_config, ConfigDefaults};
pub use loader::{load_config, ConfigLoader, DEFAULT_CONFIG_FILE};
pub use validator::{validate_config, ConfigValidator};

// Re-export the main configuration structures
pub use loader::{Config, LoggingConfig, ProcessConfig, RegionConfig, ScannerConfig};

// Configuration-related error type
pub use loader::ConfigError;

/// Configuration result type
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_from_io() {
        use std::io;
        let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let config_error: ConfigError = io_error.into();
        assert!(matches!(config_error, ConfigError::Io(_)));
    }

    #[test]
    fn test_load_config_export() {
        // Falls back to defaults when memscan.toml is absent
        let result: ConfigResult<Config> = load_config();
        assert!(result.is_ok());
    }
}
