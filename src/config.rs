//! Configuration management for planbox
//!
//! Settings are read from environment variables with sensible defaults.
//! Command-line flags override whatever is loaded here.
//!
//! # Environment Variables
//!
//! - `PLANBOX_LOG_LEVEL`: Logging level (trace|debug|info|warn|error) - default: "info"
//! - `PLANBOX_LOG_JSON`: Emit JSON log lines (true|false) - default: "false"
//! - `PLANBOX_FORMAT`: Output format (dockerfile|json|yaml|human) - default: "dockerfile"
//!
//! # Example
//!
//! ```no_run
//! use planbox::PlanboxConfig;
//!
//! let config = PlanboxConfig::from_env().expect("Invalid configuration");
//! println!("{}", config.log_level);
//! ```

use crate::cli::output::OutputFormat;
use std::env;
use thiserror::Error;

const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_FORMAT: &str = "dockerfile";

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    /// Failed to parse configuration value
    #[error("Failed to parse {field}: {error}")]
    ParseError { field: String, error: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanboxConfig {
    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Use JSON log output
    pub log_json: bool,

    /// Default output format for the CLI
    pub format: OutputFormat,
}

impl Default for PlanboxConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_json: false,
            format: OutputFormat::Dockerfile,
        }
    }
}

impl PlanboxConfig {
    /// Loads configuration from `PLANBOX_*` environment variables and validates it
    pub fn from_env() -> Result<Self, ConfigError> {
        let log_level = env::var("PLANBOX_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        let log_json = match env::var("PLANBOX_LOG_JSON") {
            Ok(value) => value
                .trim()
                .to_lowercase()
                .parse::<bool>()
                .map_err(|e| ConfigError::ParseError {
                    field: "PLANBOX_LOG_JSON".to_string(),
                    error: e.to_string(),
                })?,
            Err(_) => false,
        };

        let format_str = env::var("PLANBOX_FORMAT").unwrap_or_else(|_| DEFAULT_FORMAT.to_string());
        let format = format_str
            .parse::<OutputFormat>()
            .map_err(|error| ConfigError::ParseError {
                field: "PLANBOX_FORMAT".to_string(),
                error,
            })?;

        let config = Self {
            log_level,
            log_json,
            format,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(ConfigError::ValidationFailed(format!(
                "Invalid log level: {}. Valid options: {}",
                self.log_level,
                VALID_LOG_LEVELS.join(", ")
            )));
        }
        Ok(())
    }
}
