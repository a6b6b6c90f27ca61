use php_compat::cli::commands::{multicall_args, CliArgs, Commands};
use php_compat::cli::handlers::{handle_build, handle_detect};
use php_compat::util::logging::{init_logging, parse_level, LoggingConfig};
use php_compat::{NAME, VERSION};

use clap::Parser;
use std::env;
use std::process;
use tracing::{debug, Level};

fn main() {
    let args = CliArgs::parse_from(multicall_args(env::args_os()));
    init_logging(logging_config_from_args(&args));

    debug!("{} v{} starting", NAME, VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match &args.command {
        Commands::Detect(detect_args) => handle_detect(detect_args),
        Commands::Build(build_args) => handle_build(build_args),
    };

    process::exit(exit_code);
}

fn logging_config_from_args(args: &CliArgs) -> LoggingConfig {
    let mut config = LoggingConfig::from_env();
    if let Some(level_str) = &args.log_level {
        config.level = parse_level(level_str);
    } else if args.verbose {
        config.level = Level::DEBUG;
    } else if args.quiet {
        config.level = Level::ERROR;
    }
    config
}
