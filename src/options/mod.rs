//! Legacy options loading and `buildpack.yml` output

mod buildpack_yml;
mod legacy;
mod version;

pub use buildpack_yml::{ComposerOptions, HttpdOptions, NginxOptions, Options, PhpOptions};
pub use legacy::{LegacyCommand, LegacyCommands, LegacyOptions};
pub use version::{translate_php_version, PHP_DEFAULT_TOKEN};

use crate::error::{CompatError, Result};
use crate::fs::FileSystem;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const BP_CONFIG_DIR: &str = ".bp-config";
pub const OPTIONS_JSON: &str = "options.json";
pub const BUILDPACK_YML: &str = "buildpack.yml";
pub const DEFAULT_WEB_DIR: &str = "htdocs";
pub const DEFAULT_WEB_SERVER: &str = "httpd";

pub fn options_json_path(app_root: &Path) -> PathBuf {
    app_root.join(BP_CONFIG_DIR).join(OPTIONS_JSON)
}

pub fn buildpack_yml_path(app_root: &Path) -> PathBuf {
    app_root.join(BUILDPACK_YML)
}

/// Loads `.bp-config/options.json`, or defaults when the app has none.
pub fn load_options_json(fs: &dyn FileSystem, app_root: &Path) -> Result<Options> {
    let path = options_json_path(app_root);
    if !fs.is_file(&path) {
        debug!(path = %path.display(), "No legacy options file, using defaults");
        return Ok(Options::with_defaults());
    }

    let contents = fs.read_to_string(&path)?;
    let legacy = LegacyOptions::from_json(&contents)
        .map_err(|source| CompatError::InvalidOptions { path: path.clone(), source })?;

    debug!(path = %path.display(), "Loaded legacy options");
    Ok(Options::from(legacy))
}

/// Writes `buildpack.yml`, refusing to clobber one the app already has.
pub fn write_buildpack_yml(fs: &dyn FileSystem, app_root: &Path, options: &Options) -> Result<PathBuf> {
    let path = buildpack_yml_path(app_root);
    if fs.exists(&path) {
        return Err(CompatError::ConflictingConfig);
    }

    let yaml = options.to_yaml()?;
    fs.write_file(&path, &yaml)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MockFileSystem;

    #[test]
    fn test_load_without_options_json() {
        let fs = MockFileSystem::new();
        let options = load_options_json(&fs, fs.root()).unwrap();
        assert_eq!(options.php.webserver, "httpd");
        assert!(options.php.version.is_empty());
    }

    #[test]
    fn test_load_translates_version_token() {
        let fs = MockFileSystem::new();
        fs.add_file(".bp-config/options.json", r#"{"PHP_VERSION": "{PHP_73_LATEST}"}"#);

        let options = load_options_json(&fs, fs.root()).unwrap();
        assert_eq!(options.php.version, "7.3.*");
    }

    #[test]
    fn test_load_php_default_is_empty() {
        let fs = MockFileSystem::new();
        fs.add_file(".bp-config/options.json", r#"{"PHP_VERSION": "{PHP_DEFAULT}"}"#);

        let options = load_options_json(&fs, fs.root()).unwrap();
        assert!(options.php.version.is_empty());
    }

    #[test]
    fn test_load_malformed_json() {
        let fs = MockFileSystem::new();
        fs.add_file(".bp-config/options.json", "{ not json");

        let err = load_options_json(&fs, fs.root()).unwrap_err();
        assert!(matches!(err, CompatError::InvalidOptions { .. }));
    }

    #[test]
    fn test_write_buildpack_yml() {
        let fs = MockFileSystem::new();
        let mut options = Options::with_defaults();
        options.httpd.version = "2.4.39".to_string();

        let path = write_buildpack_yml(&fs, fs.root(), &options).unwrap();
        assert_eq!(path, PathBuf::from("/app/buildpack.yml"));

        let written = Options::from_yaml(&fs.read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, options);
    }

    #[test]
    fn test_write_refuses_existing_buildpack_yml() {
        let fs = MockFileSystem::new();
        fs.add_file("buildpack.yml", "php:\n  version: 7.4.*\n");

        let err = write_buildpack_yml(&fs, fs.root(), &Options::with_defaults()).unwrap_err();
        assert!(matches!(err, CompatError::ConflictingConfig));
        assert_eq!(
            fs.read_to_string(Path::new("/app/buildpack.yml")).unwrap(),
            "php:\n  version: 7.4.*\n"
        );
    }
}
