//! The detect phase: decide participation and build the plan
//!
//! Detection passes for any app except those still carrying a `.extensions`
//! folder, or those that already moved to `buildpack.yml`. The plan always
//! provides and requires `php-compat`, and asks for `php` and a web server
//! when the legacy options say so.

use crate::buildplan::{BuildPlan, Required, BUILDPACK_YML_SOURCE, VERSION_SOURCE_KEY};
use crate::config::CompatConfig;
use crate::error::Result;
use crate::fs::FileSystem;
use crate::options::{
    buildpack_yml_path, load_options_json, options_json_path, Options, BP_CONFIG_DIR,
};
use crate::progress::{MigrationEvent, MigrationHandler};
use tracing::debug;

pub const PASS_STATUS_CODE: i32 = 0;
pub const FAIL_STATUS_CODE: i32 = 100;

pub const EXTENSIONS_DIR: &str = ".extensions";

/// Web servers shipped as their own buildpacks; `php-server` and the rest need none
const WEB_SERVERS: [&str; 2] = ["httpd", "nginx"];

#[derive(Debug, Clone, PartialEq)]
pub enum DetectOutcome {
    Pass(BuildPlan),
    Fail,
}

impl DetectOutcome {
    pub fn status_code(&self) -> i32 {
        match self {
            DetectOutcome::Pass(_) => PASS_STATUS_CODE,
            DetectOutcome::Fail => FAIL_STATUS_CODE,
        }
    }
}

pub fn run_detect(
    config: &CompatConfig,
    fs: &dyn FileSystem,
    handler: &dyn MigrationHandler,
) -> Result<DetectOutcome> {
    let app_root = &config.app_root;

    if fs.exists(&app_root.join(EXTENSIONS_DIR)) {
        handler.on_event(&MigrationEvent::ExtensionsFolderPresent);
        return Ok(DetectOutcome::Fail);
    }

    let has_options_json = fs.is_file(&options_json_path(app_root));
    if fs.exists(&buildpack_yml_path(app_root)) && !has_options_json {
        debug!("buildpack.yml present without options.json, nothing to migrate");
        return Ok(DetectOutcome::Fail);
    }

    debug!(
        bp_config = fs.is_dir(&app_root.join(BP_CONFIG_DIR)),
        composer_path_set = config.composer_path.is_some(),
        "Legacy configuration markers"
    );

    let options = load_options_json(fs, app_root)?;
    Ok(DetectOutcome::Pass(build_plan(config, fs, &options)))
}

/// Requirements implied by the legacy options and the app layout
pub fn build_plan(config: &CompatConfig, fs: &dyn FileSystem, options: &Options) -> BuildPlan {
    let mut plan = BuildPlan::for_layer();

    if !options.php.version.is_empty() {
        plan.require(
            Required::new("php")
                .with_version(options.php.version.clone())
                .for_launch()
                .with_metadata(VERSION_SOURCE_KEY, BUILDPACK_YML_SOURCE),
        );
    }

    let web_server = options.php.webserver.as_str();
    let index = config
        .app_root
        .join(options.effective_web_dir())
        .join("index.php");
    if WEB_SERVERS.contains(&web_server) && fs.is_file(&index) {
        plan.require(Required::new(web_server).for_launch());
    }

    plan
}
