//! Migration handler trait and events

use std::fmt;
use std::sync::Mutex;

/// How loudly an event should be reported to the person running the build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// Events emitted while detecting or migrating a legacy app
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationEvent {
    /// Options were read, either from options.json or from defaults
    OptionsLoaded { path: String, legacy: bool },

    /// The app still ships a `.extensions` folder
    ExtensionsFolderPresent,

    /// `COMPOSER_VERSION` was `latest`
    ComposerLatestIgnored,

    /// Custom web server config snippets were found
    CustomServerConfig {
        server: String,
        dir: String,
        count: usize,
    },

    /// A web app has no WEBDIR and relied on files being moved into it
    WebDirMissing { web_dir: String },

    /// composer.json exists, vendor is left where composer puts it
    VendorNotMoved,

    /// Config snippets copied into their new location
    SnippetsMigrated {
        kind: String,
        count: usize,
        destination: String,
    },

    /// PHP_EXTENSIONS / ZEND_EXTENSIONS written to an ini snippet
    ExtensionsMigrated {
        extensions: usize,
        zend_extensions: usize,
        path: String,
    },

    /// ADDITIONAL_PREPROCESS_CMDS written to a profile script
    AdditionalCommandsMigrated { count: usize, path: String },

    BuildpackYmlWritten { path: String },
}

impl MigrationEvent {
    pub fn severity(&self) -> Severity {
        match self {
            MigrationEvent::ExtensionsFolderPresent
            | MigrationEvent::CustomServerConfig { .. }
            | MigrationEvent::WebDirMissing { .. } => Severity::Error,
            MigrationEvent::ComposerLatestIgnored | MigrationEvent::VendorNotMoved => {
                Severity::Warning
            }
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for MigrationEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MigrationEvent::OptionsLoaded { path, legacy } => {
                if *legacy {
                    write!(f, "Loaded legacy options from {}", path)
                } else {
                    write!(f, "No legacy options at {}, using defaults", path)
                }
            }
            MigrationEvent::ExtensionsFolderPresent => write!(
                f,
                "Use of .extensions folder has been removed. Please remove this folder from your application."
            ),
            MigrationEvent::ComposerLatestIgnored => write!(
                f,
                "Specifying a version of 'latest' is no longer supported. The default version of the php-composer-cnb will be used instead."
            ),
            MigrationEvent::CustomServerConfig { server, dir, count } => write!(
                f,
                "Found {} {} configuration files under `.bp-config/{}`. Customizing {} configuration in this manner is no longer supported. Please migrate your configuration, see the Migration guide for more details.",
                count, server, dir, server
            ),
            MigrationEvent::WebDirMissing { .. } => write!(
                f,
                "WEBDIR doesn't exist, we no longer move files into WEBDIR. Please create WEBDIR and push your app again."
            ),
            MigrationEvent::VendorNotMoved => {
                write!(f, "The vendor directory is no longer migrated to LIBDIR.")
            }
            MigrationEvent::SnippetsMigrated {
                kind,
                count,
                destination,
            } => write!(f, "Migrated {} {} snippets to `{}`", count, kind, destination),
            MigrationEvent::ExtensionsMigrated {
                extensions,
                zend_extensions,
                path,
            } => write!(
                f,
                "Migrated {} extensions and {} zend extensions to {}",
                extensions, zend_extensions, path
            ),
            MigrationEvent::AdditionalCommandsMigrated { count, path } => {
                write!(f, "Migrated {} additional commands to {}", count, path)
            }
            MigrationEvent::BuildpackYmlWritten { path } => write!(f, "Wrote {}", path),
        }
    }
}

/// Trait for handling events raised during detect and build
pub trait MigrationHandler: Send + Sync {
    fn on_event(&self, event: &MigrationEvent);
}

/// No-op handler that ignores all events
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpHandler;

impl MigrationHandler for NoOpHandler {
    fn on_event(&self, _event: &MigrationEvent) {}
}

/// Handler that keeps every event in memory, in order
#[derive(Debug, Default)]
pub struct RecordingHandler {
    events: Mutex<Vec<MigrationEvent>>,
}

impl RecordingHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<MigrationEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Rendered messages of every recorded event
    pub fn messages(&self) -> Vec<String> {
        self.events().iter().map(ToString::to_string).collect()
    }

    pub fn contains(&self, event: &MigrationEvent) -> bool {
        self.events().contains(event)
    }
}

impl MigrationHandler for RecordingHandler {
    fn on_event(&self, event: &MigrationEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_handler() {
        let handler = NoOpHandler;
        handler.on_event(&MigrationEvent::VendorNotMoved);
    }

    #[test]
    fn test_recording_handler_keeps_order() {
        let handler = RecordingHandler::new();
        handler.on_event(&MigrationEvent::ComposerLatestIgnored);
        handler.on_event(&MigrationEvent::VendorNotMoved);

        assert_eq!(
            handler.events(),
            vec![MigrationEvent::ComposerLatestIgnored, MigrationEvent::VendorNotMoved]
        );
        assert!(handler.contains(&MigrationEvent::VendorNotMoved));
    }

    #[test]
    fn test_custom_server_config_message() {
        let event = MigrationEvent::CustomServerConfig {
            server: "HTTPD".to_string(),
            dir: "httpd".to_string(),
            count: 1,
        };
        assert_eq!(
            event.to_string(),
            "Found 1 HTTPD configuration files under `.bp-config/httpd`. Customizing HTTPD configuration in this manner is no longer supported. Please migrate your configuration, see the Migration guide for more details."
        );
        assert_eq!(event.severity(), Severity::Error);
    }

    #[test]
    fn test_severity() {
        assert_eq!(MigrationEvent::VendorNotMoved.severity(), Severity::Warning);
        assert_eq!(MigrationEvent::ExtensionsFolderPresent.severity(), Severity::Error);
        assert_eq!(
            MigrationEvent::BuildpackYmlWritten {
                path: "/app/buildpack.yml".to_string()
            }
            .severity(),
            Severity::Info
        );
    }
}
