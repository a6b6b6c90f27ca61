//! Logging-based migration handler

use super::{MigrationEvent, MigrationHandler, Severity};
use tracing::{debug, error, info, warn};

/// Handler that reports migration events using tracing
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingHandler;

impl MigrationHandler for LoggingHandler {
    fn on_event(&self, event: &MigrationEvent) {
        if let MigrationEvent::OptionsLoaded { path, legacy } = event {
            debug!(path = %path, legacy, "{}", event);
            return;
        }

        match event.severity() {
            Severity::Error => error!("{}", event),
            Severity::Warning => warn!("{}", event),
            Severity::Info => info!("{}", event),
        }
    }
}
