use super::migrations::{migrate_additional_commands, migrate_extensions, SnippetMigration};
use super::rules::{RuleContext, RuleSet};
use crate::buildplan::{BuildpackPlan, LAYER};
use crate::config::CompatConfig;
use crate::error::{CompatError, Result};
use crate::fs::FileSystem;
use crate::options::{
    buildpack_yml_path, load_options_json, options_json_path, write_buildpack_yml, Options,
};
use crate::progress::{MigrationEvent, MigrationHandler};
use std::path::PathBuf;
use tracing::debug;

/// What a successful contribution left behind in the app directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContributionReport {
    pub buildpack_yml: PathBuf,
    pub extensions_ini: Option<PathBuf>,
    pub additional_commands: Option<PathBuf>,
    pub snippets_migrated: usize,
}

/// Migrates a legacy app to `buildpack.yml` during the build phase
pub struct Contributor<'a> {
    app_root: PathBuf,
    composer_path: Option<String>,
    fs: &'a dyn FileSystem,
    handler: &'a dyn MigrationHandler,
    rules: RuleSet,
}

impl<'a> Contributor<'a> {
    /// Returns `None` unless the buildpack plan asks for this layer.
    pub fn new(
        plan: &BuildpackPlan,
        config: &CompatConfig,
        fs: &'a dyn FileSystem,
        handler: &'a dyn MigrationHandler,
    ) -> Option<Self> {
        if !plan.has(LAYER) {
            return None;
        }

        Some(Self {
            app_root: config.app_root.clone(),
            composer_path: config.composer_path.clone(),
            fs,
            handler,
            rules: RuleSet::default(),
        })
    }

    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    pub fn contribute(&self) -> Result<ContributionReport> {
        if self.fs.exists(&buildpack_yml_path(&self.app_root)) {
            return Err(CompatError::ConflictingConfig);
        }

        let options = self.load_options()?;

        self.rules.check(&RuleContext {
            app_root: &self.app_root,
            fs: self.fs,
            options: &options,
            handler: self.handler,
        })?;

        if self.fs.is_file(&self.app_root.join("composer.json")) {
            self.handler.on_event(&MigrationEvent::VendorNotMoved);
        }

        let mut snippets_migrated = 0;
        for migration in SnippetMigration::ALL {
            snippets_migrated += migration.migrate(self.fs, &self.app_root, self.handler)?;
        }

        let extensions_ini = self.migrate_extensions(&options)?;
        let additional_commands = self.migrate_additional_commands(&options)?;

        let buildpack_yml = write_buildpack_yml(self.fs, &self.app_root, &options)?;
        self.handler.on_event(&MigrationEvent::BuildpackYmlWritten {
            path: buildpack_yml.display().to_string(),
        });

        Ok(ContributionReport {
            buildpack_yml,
            extensions_ini,
            additional_commands,
            snippets_migrated,
        })
    }

    /// Loads options.json and applies the build-time overrides.
    pub fn load_options(&self) -> Result<Options> {
        let path = options_json_path(&self.app_root);
        let mut options = load_options_json(self.fs, &self.app_root)?;
        self.handler.on_event(&MigrationEvent::OptionsLoaded {
            path: path.display().to_string(),
            legacy: self.fs.is_file(&path),
        });

        if options.composer.version.eq_ignore_ascii_case("latest") {
            options.composer.version.clear();
            self.handler.on_event(&MigrationEvent::ComposerLatestIgnored);
        }

        if let Some(composer_path) = &self.composer_path {
            debug!(composer_path = %composer_path, "Migrating COMPOSER_PATH");
            options.composer.json_path = composer_path.clone();
        }

        Ok(options)
    }

    pub fn migrate_extensions(&self, options: &Options) -> Result<Option<PathBuf>> {
        migrate_extensions(self.fs, &self.app_root, options, self.handler)
    }

    pub fn migrate_additional_commands(&self, options: &Options) -> Result<Option<PathBuf>> {
        migrate_additional_commands(self.fs, &self.app_root, options, self.handler)
    }
}
