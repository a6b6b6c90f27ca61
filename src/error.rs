//! Error types for the detect and build phases

use std::path::PathBuf;
use thiserror::Error;

/// Failures raised while detecting or migrating a legacy PHP application
#[derive(Debug, Error)]
pub enum CompatError {
    /// Legacy configuration exists that can no longer be migrated automatically
    #[error("migration failure")]
    MigrationFailure,

    /// The app relied on files being moved into WEBDIR
    #[error("files no longer moved into WEBDIR")]
    WebDirMissing,

    #[error("you cannot have both `.bp-config/options.json` and `buildpack.yml`")]
    ConflictingConfig,

    #[error("failed to parse {path:?}: {source}")]
    InvalidOptions {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse buildpack plan {path:?}: {source}")]
    InvalidPlan {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize buildpack.yml: {0}")]
    YamlSerialize(#[from] serde_yaml::Error),

    #[error("failed to serialize build plan: {0}")]
    PlanSerialize(#[from] toml::ser::Error),

    #[error(transparent)]
    Fs(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, CompatError>;
