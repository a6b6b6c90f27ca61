//! Runtime configuration assembled from the process and platform environment

use crate::fs::{FileSystem, FileType};
use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Overrides the composer.json location, migrated to `composer.json_path`
pub const COMPOSER_PATH_ENV: &str = "COMPOSER_PATH";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Application root {0:?} does not exist")]
    AppRootMissing(PathBuf),

    #[error("Application root {0:?} is not a directory")]
    AppRootNotDirectory(PathBuf),

    #[error("Failed to read platform environment {path:?}: {error}")]
    PlatformEnv { path: PathBuf, error: String },
}

/// Variables the platform hands over as files under `<platform>/env`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformEnv {
    vars: BTreeMap<String, String>,
}

impl PlatformEnv {
    pub fn load(fs: &dyn FileSystem, platform_dir: &Path) -> Result<Self, ConfigError> {
        let env_dir = platform_dir.join("env");
        let mut vars = BTreeMap::new();
        if !fs.is_dir(&env_dir) {
            return Ok(Self { vars });
        }

        let entries = fs.read_dir(&env_dir).map_err(|e| ConfigError::PlatformEnv {
            path: env_dir.clone(),
            error: e.to_string(),
        })?;

        for entry in entries.into_iter().filter(|e| e.file_type() == FileType::File) {
            let value = fs
                .read_to_string(entry.path())
                .map_err(|e| ConfigError::PlatformEnv {
                    path: entry.path().to_path_buf(),
                    error: e.to_string(),
                })?;
            vars.insert(entry.name, value.trim_end_matches('\n').to_string());
        }

        Ok(Self { vars })
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }
}

/// Inputs shared by the detect and build phases
#[derive(Debug, Clone)]
pub struct CompatConfig {
    pub app_root: PathBuf,
    pub composer_path: Option<String>,
}

impl CompatConfig {
    /// Process environment wins over the platform environment.
    pub fn load(
        fs: &dyn FileSystem,
        app_root: PathBuf,
        platform_dir: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        let platform_env = match platform_dir {
            Some(dir) => PlatformEnv::load(fs, dir)?,
            None => PlatformEnv::default(),
        };

        let composer_path = env::var(COMPOSER_PATH_ENV)
            .ok()
            .or_else(|| platform_env.get(COMPOSER_PATH_ENV).map(str::to_string));

        let config = Self {
            app_root,
            composer_path,
        };
        config.validate(fs)?;
        Ok(config)
    }

    pub fn new(app_root: impl Into<PathBuf>) -> Self {
        Self {
            app_root: app_root.into(),
            composer_path: None,
        }
    }

    pub fn with_composer_path(mut self, path: impl Into<String>) -> Self {
        self.composer_path = Some(path.into());
        self
    }

    pub fn validate(&self, fs: &dyn FileSystem) -> Result<(), ConfigError> {
        if !fs.exists(&self.app_root) {
            return Err(ConfigError::AppRootMissing(self.app_root.clone()));
        }
        if !fs.is_dir(&self.app_root) {
            return Err(ConfigError::AppRootNotDirectory(self.app_root.clone()));
        }
        Ok(())
    }
}
