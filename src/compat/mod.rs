//! The build phase: migrate a legacy app or fail with instructions

mod contributor;
pub mod migrations;
pub mod rules;

pub use contributor::{ContributionReport, Contributor};
pub use migrations::{
    extensions_ini, migrate_additional_commands, migrate_extensions, SnippetMigration,
    ADDITIONAL_COMMANDS_SCRIPT, EXTENSIONS_INI,
};
pub use rules::{CustomServerConfigRule, MigrationRule, RuleContext, RuleSet, WebDirRule};

use crate::buildplan::BuildpackPlan;
use crate::config::CompatConfig;
use crate::error::Result;
use crate::fs::FileSystem;
use crate::progress::MigrationHandler;
use tracing::info;

/// Exit code reported by the build phase when migration fails
pub const BUILD_FAILURE_CODE: i32 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    /// The plan did not include this layer
    Skipped,
    Contributed(ContributionReport),
}

pub fn run_build(
    plan: &BuildpackPlan,
    config: &CompatConfig,
    fs: &dyn FileSystem,
    handler: &dyn MigrationHandler,
) -> Result<BuildOutcome> {
    match Contributor::new(plan, config, fs, handler) {
        Some(contributor) => Ok(BuildOutcome::Contributed(contributor.contribute()?)),
        None => {
            info!("php-compat not in buildpack plan, skipping");
            Ok(BuildOutcome::Skipped)
        }
    }
}
