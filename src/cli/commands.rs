use clap::{Parser, Subcommand};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Migrates legacy PHP buildpack configuration to buildpack.yml
#[derive(Parser, Debug)]
#[command(
    name = "php-compat",
    about = "Migrates legacy PHP buildpack configuration to buildpack.yml",
    version,
    long_about = "php-compat runs as the detect and build executables of a buildpack. \
                  It translates `.bp-config/options.json` into `buildpack.yml` and fails \
                  the build with migration instructions when legacy configuration can no \
                  longer be carried over.\n\n\
                  Installed as `bin/detect` or `bin/build`, it behaves like the matching \
                  subcommand."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug output")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Decide whether the app needs migrating and write the build plan",
        long_about = "Fails when the app ships a `.extensions` folder or already uses \
                      buildpack.yml without options.json. Otherwise passes and writes the \
                      build plan requirements to PLAN.\n\n\
                      Exit codes: 0 pass, 100 fail."
    )]
    Detect(DetectArgs),

    #[command(
        about = "Migrate legacy options to buildpack.yml",
        long_about = "Loads `.bp-config/options.json`, checks for configuration that can no \
                      longer be migrated, copies PHP config snippets, and writes buildpack.yml."
    )]
    Build(BuildArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct DetectArgs {
    #[arg(
        long,
        value_name = "DIR",
        help = "Application directory (defaults to current directory)"
    )]
    pub app_root: Option<PathBuf>,

    #[arg(value_name = "PLATFORM", help = "Platform directory")]
    pub platform_dir: PathBuf,

    #[arg(value_name = "PLAN", help = "Build plan file to write")]
    pub plan_path: PathBuf,
}

#[derive(Parser, Debug, Clone)]
pub struct BuildArgs {
    #[arg(
        long,
        value_name = "DIR",
        help = "Application directory (defaults to current directory)"
    )]
    pub app_root: Option<PathBuf>,

    #[arg(value_name = "LAYERS", help = "Layers directory")]
    pub layers_dir: PathBuf,

    #[arg(value_name = "PLATFORM", help = "Platform directory")]
    pub platform_dir: PathBuf,

    #[arg(value_name = "PLAN", help = "Buildpack plan file to read")]
    pub plan_path: PathBuf,
}

/// Rewrites `bin/detect ARGS` into `php-compat detect ARGS` (same for build).
pub fn multicall_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut args: Vec<OsString> = args.into_iter().collect();
    let invoked_as = args
        .first()
        .and_then(|arg0| Path::new(arg0).file_name())
        .and_then(|name| name.to_str())
        .map(str::to_string);

    if let Some(name @ ("detect" | "build")) = invoked_as.as_deref() {
        args.insert(1, OsString::from(name));
    }
    args
}
