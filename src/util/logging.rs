//! Structured logging setup for php-compat
//!
//! Buildpack output is read by people watching a build, so the default is
//! plain console output on stderr. JSON output is available for platforms
//! that collect structured logs.
//!
//! # Configuration
//!
//! - `PHP_COMPAT_LOG_LEVEL` - Log level (trace, debug, info, warn, error)
//! - `PHP_COMPAT_LOG_JSON` - Use JSON output (true/false)
//! - `BP_DEBUG` - Any truthy value switches to debug level, as other
//!   buildpacks in the family do
//! - `RUST_LOG` - Standard Rust log filtering
//!
//! # Example
//!
//! ```no_run
//! use php_compat::util::logging;
//!
//! logging::init_logging(logging::LoggingConfig::from_env());
//!
//! tracing::info!("Migrating legacy options");
//! ```

use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_LEVEL_ENV: &str = "PHP_COMPAT_LOG_LEVEL";
pub const LOG_JSON_ENV: &str = "PHP_COMPAT_LOG_JSON";
pub const BP_DEBUG_ENV: &str = "BP_DEBUG";

/// Ensures logging is only initialized once
static INIT: Once = Once::new();

/// Configuration for logging initialization
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum log level to display
    pub level: Level,

    /// Use JSON output format
    pub use_json: bool,

    /// Include the module target (e.g., php_compat::detect) in logs
    pub include_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            use_json: false,
            include_target: false,
        }
    }
}

impl LoggingConfig {
    pub fn with_level(level: Level) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }

    /// Reads `PHP_COMPAT_LOG_LEVEL`, `BP_DEBUG` and `PHP_COMPAT_LOG_JSON`.
    ///
    /// An explicit level wins over `BP_DEBUG`.
    pub fn from_env() -> Self {
        let level = match env::var(LOG_LEVEL_ENV) {
            Ok(level_str) => parse_level(&level_str),
            Err(_) if is_truthy(env::var(BP_DEBUG_ENV).ok().as_deref()) => Level::DEBUG,
            Err(_) => Level::INFO,
        };

        let use_json = env::var(LOG_JSON_ENV)
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(false);

        Self {
            level,
            use_json,
            ..Default::default()
        }
    }
}

fn is_truthy(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_lowercase()).as_deref(),
        Some("1" | "true" | "yes")
    )
}

/// Parses a log level from a string
///
/// Returns `Level::INFO` for anything it does not recognize.
///
/// ```
/// use php_compat::util::logging::parse_level;
/// use tracing::Level;
///
/// assert_eq!(parse_level("debug"), Level::DEBUG);
/// assert_eq!(parse_level("INFO"), Level::INFO);
/// assert_eq!(parse_level("invalid"), Level::INFO);
/// ```
pub fn parse_level(level_str: &str) -> Level {
    match level_str.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => {
            eprintln!(
                "Invalid log level '{}', defaulting to INFO. Valid levels: trace, debug, info, warn, error",
                level_str
            );
            Level::INFO
        }
    }
}

/// Initializes the logging system with the provided configuration
///
/// Only the first call has any effect.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = if env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new(format!("php_compat={}", config.level))
        };

        if config.use_json {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_target(config.include_target)
                        .with_writer(std::io::stderr),
                )
                .init();
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .without_time()
                        .with_target(config.include_target)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    });
}
