//! Build plan documents exchanged with the buildpack lifecycle
//!
//! Detect writes a [`BuildPlan`] naming what this buildpack provides and
//! what the app requires. Build reads back the resolved [`BuildpackPlan`]
//! to decide whether the compat contributor should run.

use crate::error::{CompatError, Result};
use crate::fs::FileSystem;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name this buildpack provides and requires in the build plan
pub const LAYER: &str = "php-compat";

pub const LAUNCH_KEY: &str = "launch";
pub const VERSION_SOURCE_KEY: &str = "version-source";
/// Tells the php buildpack the version came from app configuration
pub const BUILDPACK_YML_SOURCE: &str = "buildpack.yml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildPlan {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub provides: Vec<Provided>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requires: Vec<Required>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provided {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Required {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
    #[serde(default, skip_serializing_if = "toml::Table::is_empty")]
    pub metadata: toml::Table,
}

impl Required {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: String::new(),
            metadata: toml::Table::new(),
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_metadata(mut self, key: &str, value: impl Into<toml::Value>) -> Self {
        self.metadata.insert(key.to_string(), value.into());
        self
    }

    /// Marks the dependency as needed in the launch image
    pub fn for_launch(self) -> Self {
        self.with_metadata(LAUNCH_KEY, true)
    }
}

impl BuildPlan {
    /// Plan that provides and requires only this buildpack
    pub fn for_layer() -> Self {
        Self {
            provides: vec![Provided {
                name: LAYER.to_string(),
            }],
            requires: vec![Required::new(LAYER)],
        }
    }

    pub fn require(&mut self, required: Required) {
        self.requires.push(required);
    }

    pub fn requirement(&self, name: &str) -> Option<&Required> {
        self.requires.iter().find(|r| r.name == name)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    pub fn write(&self, fs: &dyn FileSystem, path: &Path) -> Result<()> {
        fs.write_file(path, &self.to_toml()?)?;
        Ok(())
    }
}

/// Entries resolved for this buildpack by the lifecycle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildpackPlan {
    #[serde(default)]
    pub entries: Vec<BuildpackPlanEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildpackPlanEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
    #[serde(default, skip_serializing_if = "toml::Table::is_empty")]
    pub metadata: toml::Table,
}

impl BuildpackPlan {
    pub fn with_entry(name: impl Into<String>) -> Self {
        Self {
            entries: vec![BuildpackPlanEntry {
                name: name.into(),
                version: String::new(),
                metadata: toml::Table::new(),
            }],
        }
    }

    pub fn from_toml(path: &Path, contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|source| CompatError::InvalidPlan {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reads the plan file; a missing file is an empty plan.
    pub fn load(fs: &dyn FileSystem, path: &Path) -> Result<Self> {
        if !fs.is_file(path) {
            return Ok(Self::default());
        }
        let contents = fs.read_to_string(path)?;
        Self::from_toml(path, &contents)
    }

    pub fn has(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }
}
