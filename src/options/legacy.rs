//! The legacy `.bp-config/options.json` document

use serde::{Deserialize, Deserializer};

fn deserialize_null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::deserialize(deserializer)?.unwrap_or_default())
}

/// A preprocess command, written either as a single string or as an argv list
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum LegacyCommand {
    Line(String),
    Argv(Vec<String>),
}

impl LegacyCommand {
    pub fn to_line(&self) -> String {
        match self {
            LegacyCommand::Line(line) => line.clone(),
            LegacyCommand::Argv(argv) => argv.join(" "),
        }
    }
}

/// `ADDITIONAL_PREPROCESS_CMDS` accepts a bare string or a list of commands
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum LegacyCommands {
    Single(String),
    Many(Vec<LegacyCommand>),
}

impl Default for LegacyCommands {
    fn default() -> Self {
        LegacyCommands::Many(Vec::new())
    }
}

impl LegacyCommands {
    /// One line per command; blank commands are dropped.
    pub fn to_lines(&self) -> Vec<String> {
        let lines = match self {
            LegacyCommands::Single(line) => vec![line.clone()],
            LegacyCommands::Many(commands) => commands.iter().map(LegacyCommand::to_line).collect(),
        };
        lines
            .into_iter()
            .filter(|line| !line.trim().is_empty())
            .collect()
    }
}

/// Flat view of every options.json key this buildpack still understands.
///
/// Unknown keys are ignored and `null` reads as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LegacyOptions {
    #[serde(rename = "WEB_SERVER", default, deserialize_with = "deserialize_null_default")]
    pub web_server: String,
    #[serde(rename = "PHP_VERSION", default, deserialize_with = "deserialize_null_default")]
    pub php_version: String,
    #[serde(rename = "ADMIN_EMAIL", default, deserialize_with = "deserialize_null_default")]
    pub admin_email: String,
    #[serde(rename = "APP_START_CMD", default, deserialize_with = "deserialize_null_default")]
    pub app_start_cmd: String,
    #[serde(rename = "WEBDIR", default, deserialize_with = "deserialize_null_default")]
    pub web_dir: String,
    #[serde(rename = "LIBDIR", default, deserialize_with = "deserialize_null_default")]
    pub lib_dir: String,
    #[serde(rename = "PHP_EXTENSIONS", default, deserialize_with = "deserialize_null_default")]
    pub php_extensions: Vec<String>,
    #[serde(rename = "ZEND_EXTENSIONS", default, deserialize_with = "deserialize_null_default")]
    pub zend_extensions: Vec<String>,
    #[serde(
        rename = "ADDITIONAL_PREPROCESS_CMDS",
        default,
        deserialize_with = "deserialize_null_default"
    )]
    pub additional_commands: LegacyCommands,
    #[serde(rename = "HTTPD_VERSION", default, deserialize_with = "deserialize_null_default")]
    pub httpd_version: String,
    #[serde(rename = "NGINX_VERSION", default, deserialize_with = "deserialize_null_default")]
    pub nginx_version: String,
    #[serde(rename = "COMPOSER_VERSION", default, deserialize_with = "deserialize_null_default")]
    pub composer_version: String,
    #[serde(
        rename = "COMPOSER_INSTALL_OPTIONS",
        default,
        deserialize_with = "deserialize_null_default"
    )]
    pub composer_install_options: Vec<String>,
    #[serde(
        rename = "COMPOSER_INSTALL_GLOBAL",
        default,
        deserialize_with = "deserialize_null_default"
    )]
    pub composer_install_global: Vec<String>,
    #[serde(rename = "COMPOSER_VENDOR_DIR", default, deserialize_with = "deserialize_null_default")]
    pub composer_vendor_dir: String,
}

impl LegacyOptions {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
