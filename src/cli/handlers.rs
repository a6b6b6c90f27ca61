//! Subcommand handlers, each returning the process exit code

use super::commands::{BuildArgs, DetectArgs};
use crate::buildplan::BuildpackPlan;
use crate::compat::{run_build, BuildOutcome, BUILD_FAILURE_CODE};
use crate::config::CompatConfig;
use crate::detect::{run_detect, DetectOutcome, FAIL_STATUS_CODE, PASS_STATUS_CODE};
use crate::fs::RealFileSystem;
use crate::progress::LoggingHandler;
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

fn resolve_app_root(app_root: Option<&Path>) -> anyhow::Result<PathBuf> {
    match app_root {
        Some(path) => Ok(path.to_path_buf()),
        None => Ok(env::current_dir()?),
    }
}

pub fn handle_detect(args: &DetectArgs) -> i32 {
    let fs = RealFileSystem::new();

    let app_root = match resolve_app_root(args.app_root.as_deref()) {
        Ok(path) => path,
        Err(e) => {
            error!("Failed to determine application directory: {}", e);
            return FAIL_STATUS_CODE;
        }
    };

    let config = match CompatConfig::load(&fs, app_root, Some(&args.platform_dir)) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return FAIL_STATUS_CODE;
        }
    };

    debug!(app_root = %config.app_root.display(), "Running detect");

    match run_detect(&config, &fs, &LoggingHandler) {
        Ok(DetectOutcome::Pass(plan)) => {
            if let Err(e) = plan.write(&fs, &args.plan_path) {
                error!("Failed to write build plan: {}", e);
                return FAIL_STATUS_CODE;
            }
            debug!(requires = plan.requires.len(), "Detect passed");
            PASS_STATUS_CODE
        }
        Ok(DetectOutcome::Fail) => FAIL_STATUS_CODE,
        Err(e) => {
            error!("{}", e);
            FAIL_STATUS_CODE
        }
    }
}

pub fn handle_build(args: &BuildArgs) -> i32 {
    let fs = RealFileSystem::new();

    let app_root = match resolve_app_root(args.app_root.as_deref()) {
        Ok(path) => path,
        Err(e) => {
            error!("Failed to determine application directory: {}", e);
            return BUILD_FAILURE_CODE;
        }
    };

    let config = match CompatConfig::load(&fs, app_root, Some(&args.platform_dir)) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return BUILD_FAILURE_CODE;
        }
    };

    let plan = match BuildpackPlan::load(&fs, &args.plan_path) {
        Ok(plan) => plan,
        Err(e) => {
            error!("{}", e);
            return BUILD_FAILURE_CODE;
        }
    };

    debug!(
        app_root = %config.app_root.display(),
        layers = %args.layers_dir.display(),
        "Running build"
    );

    match run_build(&plan, &config, &fs, &LoggingHandler) {
        Ok(BuildOutcome::Contributed(report)) => {
            info!(
                snippets = report.snippets_migrated,
                "Migrated legacy configuration to {}",
                report.buildpack_yml.display()
            );
            0
        }
        Ok(BuildOutcome::Skipped) => 0,
        Err(e) => {
            error!("{}", e);
            BUILD_FAILURE_CODE
        }
    }
}
