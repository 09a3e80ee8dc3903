//! Configuration management for dockter
//!
//! Settings come from environment variables with sensible defaults. Command
//! line flags override them.
//!
//! # Environment Variables
//!
//! - `DOCKTER_LOG_LEVEL`: Logging level - default: "info"
//! - `DOCKTER_LOG_JSON`: JSON log output (true|false) - default: "false"
//! - `DOCKTER_PYTHON_VERSION`: Python major version (2|3) - default: "3"
//! - `DOCKTER_HEADER`: Write the generated-by header (true|false) - default: "true"
//! - `DOCKTER_BUILD_TIMEOUT`: Image build timeout in seconds - default: "600"
//! - `DOCKTER_IMAGE_TAG`: Tag for built images - default: derived from the folder name
//!
//! # Example
//!
//! ```no_run
//! use dockter::DockterConfig;
//!
//! let config = DockterConfig::default();
//! config.validate().expect("Invalid configuration");
//! let python = config.python_version().expect("validated above");
//! ```

use crate::generator::PythonVersion;
use std::env;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_PYTHON_VERSION: u8 = 3;
const DEFAULT_HEADER: bool = true;
const DEFAULT_BUILD_TIMEOUT_SECS: u64 = 600;
const MAX_BUILD_TIMEOUT_SECS: u64 = 6 * 60 * 60;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unsupported Python version: {0}. Valid options: 2, 3")]
    UnsupportedPythonVersion(u8),

    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

#[derive(Debug, Clone)]
pub struct DockterConfig {
    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Emit logs as JSON
    pub log_json: bool,

    /// Python major version selector
    pub python_version: u8,

    /// Write the generated-by header into Dockerfiles
    pub include_header: bool,

    /// Image build timeout in seconds
    pub build_timeout_secs: u64,

    /// Tag for built images
    pub image_tag: Option<String>,
}

impl Default for DockterConfig {
    /// Loads from `DOCKTER_*` environment variables, falling back to defaults
    /// for anything missing or unparseable
    fn default() -> Self {
        let log_level = env::var("DOCKTER_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        let log_json = env::var("DOCKTER_LOG_JSON")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(false);

        let python_version = env::var("DOCKTER_PYTHON_VERSION")
            .ok()
            .and_then(|v| v.trim().parse::<u8>().ok())
            .unwrap_or(DEFAULT_PYTHON_VERSION);

        let include_header = env::var("DOCKTER_HEADER")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(DEFAULT_HEADER);

        let build_timeout_secs = env::var("DOCKTER_BUILD_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_BUILD_TIMEOUT_SECS);

        let image_tag = env::var("DOCKTER_IMAGE_TAG")
            .ok()
            .filter(|tag| !tag.trim().is_empty());

        Self {
            log_level,
            log_json,
            python_version,
            include_header,
            build_timeout_secs,
            image_tag,
        }
    }
}

impl DockterConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.python_version()?;

        if self.build_timeout_secs == 0 {
            return Err(ConfigError::ValidationFailed(
                "Build timeout must be at least 1 second".to_string(),
            ));
        }
        if self.build_timeout_secs > MAX_BUILD_TIMEOUT_SECS {
            return Err(ConfigError::ValidationFailed(
                "Build timeout cannot exceed 6 hours".to_string(),
            ));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        Ok(())
    }

    pub fn python_version(&self) -> Result<PythonVersion, ConfigError> {
        PythonVersion::from_major(self.python_version)
            .ok_or(ConfigError::UnsupportedPythonVersion(self.python_version))
    }

    pub fn build_timeout(&self) -> Duration {
        Duration::from_secs(self.build_timeout_secs)
    }
}

impl fmt::Display for DockterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Dockter Configuration:")?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        writeln!(f, "  JSON Logs: {}", self.log_json)?;
        writeln!(f, "  Python Version: {}", self.python_version)?;
        writeln!(f, "  Header: {}", self.include_header)?;
        writeln!(f, "  Build Timeout: {}s", self.build_timeout_secs)?;
        if let Some(ref tag) = self.image_tag {
            writeln!(f, "  Image Tag: {}", tag)?;
        }
        Ok(())
    }
}
