//! Reporting of detect and build events

mod handler;
mod logging;

pub use handler::{MigrationEvent, MigrationHandler, NoOpHandler, RecordingHandler, Severity};
pub use logging::LoggingHandler;
