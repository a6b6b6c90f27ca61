//! php-compat - migration shim for legacy PHP buildpack configuration
//!
//! Apps written for the older PHP buildpack configure it through
//! `.bp-config/options.json`, `.extensions/`, and snippet folders under
//! `.bp-config`. The current PHP buildpacks read `buildpack.yml` instead.
//! This crate runs as a buildpack of its own: detect builds a plan from the
//! legacy options, and build translates them into `buildpack.yml` or fails
//! with instructions when the old configuration can't be carried over.
//!
//! # Example
//!
//! ```no_run
//! use php_compat::buildplan::BuildpackPlan;
//! use php_compat::compat::run_build;
//! use php_compat::config::CompatConfig;
//! use php_compat::fs::RealFileSystem;
//! use php_compat::progress::LoggingHandler;
//!
//! let fs = RealFileSystem::new();
//! let config = CompatConfig::new("/workspace");
//! let plan = BuildpackPlan::with_entry(php_compat::buildplan::LAYER);
//!
//! match run_build(&plan, &config, &fs, &LoggingHandler) {
//!     Ok(outcome) => println!("{:?}", outcome),
//!     Err(e) => eprintln!("build failed: {}", e),
//! }
//! ```
//!
//! # Project Structure
//!
//! - [`detect`]: participation and build plan requirements
//! - [`compat`]: the build-phase contributor, its rules and file migrations
//! - [`options`]: legacy options.json and buildpack.yml documents
//! - [`buildplan`]: plan files exchanged with the lifecycle

pub mod buildplan;
pub mod cli;
pub mod compat;
pub mod config;
pub mod detect;
pub mod error;
pub mod fs;
pub mod options;
pub mod progress;
pub mod util;

pub use buildplan::{BuildPlan, BuildpackPlan, LAYER};
pub use compat::{run_build, BuildOutcome, ContributionReport, Contributor};
pub use config::{CompatConfig, ConfigError};
pub use detect::{run_detect, DetectOutcome};
pub use error::CompatError;
pub use fs::{FileSystem, MockFileSystem, RealFileSystem};
pub use options::{load_options_json, write_buildpack_yml, Options};
pub use util::{init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
