//! Structured logging setup for dockter
//!
//! Wraps the `tracing` ecosystem. Output always goes to stderr so a
//! Dockerfile printed to stdout can be piped straight into a file. Level and
//! format come from [`DockterConfig`] (`DOCKTER_LOG_LEVEL`,
//! `DOCKTER_LOG_JSON`) unless command line flags override them; `RUST_LOG`
//! replaces the whole filter when set.
//!
//! # Example
//!
//! ```no_run
//! use dockter::util::logging::{init_logging, LoggingConfig};
//! use dockter::DockterConfig;
//!
//! let config = DockterConfig::default();
//! init_logging(LoggingConfig::from_flags(None, false, false, &config));
//!
//! use tracing::{debug, info};
//!
//! info!("Generating Dockerfile");
//! debug!(folder = "/work/analysis", "Binding project folder");
//! ```

use crate::config::DockterConfig;
use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

/// Directives applied when `RUST_LOG` is not set, to keep the Docker client
/// stack quiet
const QUIET_DEPENDENCIES: &[&str] = &["bollard=warn", "hyper=warn", "hyper_util=warn", "h2=warn"];

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum log level to display
    pub level: Level,

    /// Use JSON output format
    pub use_json: bool,

    /// Include the module target (e.g., dockter::generator) in logs
    pub include_target: bool,

    /// Include file and line number information
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            use_json: false,
            include_target: true,
            include_location: false,
        }
    }
}

impl LoggingConfig {
    /// JSON output with location metadata, for CI and log collectors
    pub fn production() -> Self {
        Self {
            level: Level::INFO,
            use_json: true,
            include_target: true,
            include_location: true,
        }
    }

    /// Debug level with file and line, for `--verbose`
    pub fn development() -> Self {
        Self {
            level: Level::DEBUG,
            use_json: false,
            include_target: true,
            include_location: true,
        }
    }

    /// Combines command line flags with the configured level and format.
    ///
    /// `--log-level` wins over `-v`/`-q`, which win over `DOCKTER_LOG_LEVEL`.
    /// An invalid configured level is reported by [`DockterConfig::validate`];
    /// logging just starts at INFO so that error can be seen.
    pub fn from_flags(
        log_level: Option<&str>,
        verbose: bool,
        quiet: bool,
        config: &DockterConfig,
    ) -> Self {
        let preset = if config.log_json {
            Self::production()
        } else if verbose {
            Self::development()
        } else {
            Self::default()
        };

        let level = match log_level {
            Some(flag) => parse_level(flag),
            None if verbose => Some(Level::DEBUG),
            None if quiet => Some(Level::ERROR),
            None => parse_level(&config.log_level),
        };

        Self {
            level: level.unwrap_or(Level::INFO),
            ..preset
        }
    }
}

/// Parses a log level, case-insensitively
///
/// ```
/// use dockter::util::logging::parse_level;
/// use tracing::Level;
///
/// assert_eq!(parse_level("debug"), Some(Level::DEBUG));
/// assert_eq!(parse_level("WARN"), Some(Level::WARN));
/// assert_eq!(parse_level("loud"), None);
/// ```
pub fn parse_level(level_str: &str) -> Option<Level> {
    match level_str.to_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

fn build_filter(level: Level) -> EnvFilter {
    let mut filter = EnvFilter::from_default_env();

    if env::var("RUST_LOG").is_err() {
        let directives = std::iter::once(format!("dockter={}", level))
            .chain(QUIET_DEPENDENCIES.iter().map(|d| d.to_string()));
        for directive in directives {
            if let Ok(directive) = directive.parse() {
                filter = filter.add_directive(directive);
            }
        }
    }

    filter
}

/// Installs the global subscriber. Only the first call has any effect.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = build_filter(config.level);

        if config.use_json {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_writer(std::io::stderr)
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location),
                )
                .init();
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location),
                )
                .init();
        }
    });
}
