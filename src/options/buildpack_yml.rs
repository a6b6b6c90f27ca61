//! The `buildpack.yml` document consumed by the current PHP buildpacks

use super::legacy::LegacyOptions;
use super::version::translate_php_version;
use super::{DEFAULT_WEB_DIR, DEFAULT_WEB_SERVER};
use serde::{Deserialize, Serialize};

/// Options for the whole PHP buildpack family
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    #[serde(default, skip_serializing_if = "HttpdOptions::is_empty")]
    pub httpd: HttpdOptions,
    #[serde(default, skip_serializing_if = "PhpOptions::is_empty")]
    pub php: PhpOptions,
    #[serde(default, skip_serializing_if = "NginxOptions::is_empty")]
    pub nginx: NginxOptions,
    #[serde(default, skip_serializing_if = "ComposerOptions::is_empty")]
    pub composer: ComposerOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhpOptions {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub webserver: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub serveradmin: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub script: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub webdirectory: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub libdirectory: String,

    /// Migrated into an ini snippet, never written to buildpack.yml
    #[serde(skip)]
    pub extensions: Vec<String>,
    #[serde(skip)]
    pub zend_extensions: Vec<String>,
    /// Migrated into a `.profile.d` script
    #[serde(skip)]
    pub additional_commands: Vec<String>,
}

impl PhpOptions {
    pub fn is_empty(&self) -> bool {
        self.webserver.is_empty()
            && self.version.is_empty()
            && self.serveradmin.is_empty()
            && self.script.is_empty()
            && self.webdirectory.is_empty()
            && self.libdirectory.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpdOptions {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
}

impl HttpdOptions {
    pub fn is_empty(&self) -> bool {
        self.version.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NginxOptions {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
}

impl NginxOptions {
    pub fn is_empty(&self) -> bool {
        self.version.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposerOptions {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub json_path: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub install_options: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub install_global: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub vendor_directory: String,
}

impl ComposerOptions {
    pub fn is_empty(&self) -> bool {
        self.version.is_empty()
            && self.json_path.is_empty()
            && self.install_options.is_empty()
            && self.install_global.is_empty()
            && self.vendor_directory.is_empty()
    }
}

impl Options {
    /// Options used when the app carries no options.json
    pub fn with_defaults() -> Self {
        let mut options = Options::default();
        options.apply_defaults();
        options
    }

    pub fn apply_defaults(&mut self) {
        if self.php.webserver.is_empty() {
            self.php.webserver = DEFAULT_WEB_SERVER.to_string();
        }
    }

    /// WEBDIR, falling back to the legacy default of `htdocs`
    pub fn effective_web_dir(&self) -> &str {
        if self.php.webdirectory.is_empty() {
            DEFAULT_WEB_DIR
        } else {
            &self.php.webdirectory
        }
    }

    pub fn to_yaml(&self) -> serde_yaml::Result<String> {
        serde_yaml::to_string(self)
    }

    pub fn from_yaml(yaml: &str) -> serde_yaml::Result<Self> {
        serde_yaml::from_str(yaml)
    }
}

impl From<LegacyOptions> for Options {
    fn from(legacy: LegacyOptions) -> Self {
        let mut options = Options {
            httpd: HttpdOptions {
                version: legacy.httpd_version,
            },
            php: PhpOptions {
                webserver: legacy.web_server,
                version: translate_php_version(&legacy.php_version),
                serveradmin: legacy.admin_email,
                script: legacy.app_start_cmd,
                webdirectory: legacy.web_dir,
                libdirectory: legacy.lib_dir,
                extensions: legacy.php_extensions,
                zend_extensions: legacy.zend_extensions,
                additional_commands: legacy.additional_commands.to_lines(),
            },
            nginx: NginxOptions {
                version: legacy.nginx_version,
            },
            composer: ComposerOptions {
                version: legacy.composer_version,
                json_path: String::new(),
                install_options: legacy.composer_install_options,
                install_global: legacy.composer_install_global,
                vendor_directory: legacy.composer_vendor_dir,
            },
        };
        options.apply_defaults();
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_legacy_renames_fields() {
        let legacy = LegacyOptions::from_json(
            r#"{
                "WEB_SERVER": "nginx",
                "PHP_VERSION": "{PHP_72_LATEST}",
                "ADMIN_EMAIL": "admin@example.com",
                "APP_START_CMD": "worker.php",
                "WEBDIR": "public",
                "LIBDIR": "lib",
                "PHP_EXTENSIONS": ["bz2"],
                "NGINX_VERSION": "1.14.3",
                "COMPOSER_VENDOR_DIR": "vendor"
            }"#,
        )
        .unwrap();

        let options = Options::from(legacy);
        assert_eq!(options.php.webserver, "nginx");
        assert_eq!(options.php.version, "7.2.*");
        assert_eq!(options.php.serveradmin, "admin@example.com");
        assert_eq!(options.php.script, "worker.php");
        assert_eq!(options.php.webdirectory, "public");
        assert_eq!(options.php.libdirectory, "lib");
        assert_eq!(options.php.extensions, vec!["bz2"]);
        assert_eq!(options.nginx.version, "1.14.3");
        assert_eq!(options.composer.vendor_directory, "vendor");
    }

    #[test]
    fn test_defaults_web_server_to_httpd() {
        let options = Options::from(LegacyOptions::default());
        assert_eq!(options.php.webserver, "httpd");
        assert_eq!(Options::with_defaults().php.webserver, "httpd");
    }

    #[test]
    fn test_effective_web_dir() {
        let mut options = Options::default();
        assert_eq!(options.effective_web_dir(), "htdocs");

        options.php.webdirectory = "public".to_string();
        assert_eq!(options.effective_web_dir(), "public");
    }

    #[test]
    fn test_yaml_layout() {
        let mut options = Options::with_defaults();
        options.php.version = "7.3.*".to_string();
        options.php.extensions = vec!["bz2".to_string()];
        options.composer.json_path = "app/composer.json".to_string();
        options.composer.install_options = vec!["--no-dev".to_string()];

        let yaml = options.to_yaml().unwrap();
        let value: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();

        assert_eq!(value["php"]["webserver"].as_str(), Some("httpd"));
        assert_eq!(value["php"]["version"].as_str(), Some("7.3.*"));
        assert_eq!(value["composer"]["json_path"].as_str(), Some("app/composer.json"));
        assert_eq!(value["composer"]["install_options"][0].as_str(), Some("--no-dev"));
        assert!(value.get("httpd").is_none());
        assert!(value.get("nginx").is_none());
        assert!(!yaml.contains("extensions"));
        assert!(!yaml.contains("bz2"));
    }

    #[test]
    fn test_yaml_read_back() {
        let options = Options {
            httpd: HttpdOptions {
                version: "2.3.49".to_string(),
            },
            php: PhpOptions {
                version: "7.3.10".to_string(),
                webserver: "standalone".to_string(),
                ..Default::default()
            },
            nginx: NginxOptions {
                version: "1.14.9".to_string(),
            },
            composer: ComposerOptions {
                version: "1.8.9".to_string(),
                ..Default::default()
            },
        };

        let yaml = options.to_yaml().unwrap();
        assert_eq!(Options::from_yaml(&yaml).unwrap(), options);
    }
}
