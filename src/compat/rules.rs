//! Rules deciding whether a legacy app can be migrated automatically

use crate::error::{CompatError, Result};
use crate::fs::FileSystem;
use crate::options::{Options, BP_CONFIG_DIR};
use crate::progress::{MigrationEvent, MigrationHandler};
use std::path::Path;
use tracing::debug;

/// Everything a rule may look at
pub struct RuleContext<'a> {
    pub app_root: &'a Path,
    pub fs: &'a dyn FileSystem,
    pub options: &'a Options,
    pub handler: &'a dyn MigrationHandler,
}

pub trait MigrationRule: Send + Sync {
    fn name(&self) -> &'static str;
    fn check(&self, ctx: &RuleContext<'_>) -> Result<()>;
}

/// Fails when `.bp-config/<dir>` carries web server config snippets
pub struct CustomServerConfigRule {
    server: &'static str,
    dir: &'static str,
    extension: &'static str,
}

impl CustomServerConfigRule {
    pub const HTTPD: Self = Self::new("HTTPD", "httpd", "conf");
    pub const NGINX: Self = Self::new("Nginx", "nginx", "conf");

    pub const fn new(server: &'static str, dir: &'static str, extension: &'static str) -> Self {
        Self {
            server,
            dir,
            extension,
        }
    }
}

impl MigrationRule for CustomServerConfigRule {
    fn name(&self) -> &'static str {
        "CustomServerConfig"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Result<()> {
        let config_dir = ctx.app_root.join(BP_CONFIG_DIR).join(self.dir);
        let count = ctx
            .fs
            .walk_files(&config_dir)?
            .iter()
            .filter(|path| {
                path.extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| e == self.extension)
            })
            .count();

        if count == 0 {
            return Ok(());
        }

        ctx.handler.on_event(&MigrationEvent::CustomServerConfig {
            server: self.server.to_string(),
            dir: self.dir.to_string(),
            count,
        });
        Err(CompatError::MigrationFailure)
    }
}

/// Fails when a web app expects its files to be moved into a WEBDIR that does not exist
pub struct WebDirRule;

impl MigrationRule for WebDirRule {
    fn name(&self) -> &'static str {
        "WebDir"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Result<()> {
        let web_dir = ctx.options.effective_web_dir();
        if ctx.fs.is_dir(&ctx.app_root.join(web_dir)) {
            return Ok(());
        }

        // only an index.php at the root makes this a web app
        if !ctx.fs.is_file(&ctx.app_root.join("index.php")) {
            return Ok(());
        }

        ctx.handler.on_event(&MigrationEvent::WebDirMissing {
            web_dir: web_dir.to_string(),
        });
        Err(CompatError::WebDirMissing)
    }
}

pub struct RuleSet {
    rules: Vec<Box<dyn MigrationRule>>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(rules: Vec<Box<dyn MigrationRule>>) -> Self {
        Self { rules }
    }

    /// Runs every rule so each problem gets reported, then returns the first failure.
    pub fn check(&self, ctx: &RuleContext<'_>) -> Result<()> {
        let mut first_failure = None;
        for rule in &self.rules {
            if let Err(e) = rule.check(ctx) {
                debug!(rule = rule.name(), error = %e, "Rule failed");
                first_failure.get_or_insert(e);
            }
        }

        match first_failure {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            rules: vec![
                Box::new(CustomServerConfigRule::HTTPD),
                Box::new(CustomServerConfigRule::NGINX),
                Box::new(WebDirRule),
            ],
        }
    }
}
