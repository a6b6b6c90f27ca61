//! Utility modules for php-compat

pub mod logging;

pub use logging::{init_logging, LoggingConfig};
