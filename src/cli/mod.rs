pub mod commands;
pub mod logging;
pub mod types;

use std::path::PathBuf;

use clap::Parser;

use crate::cli::types::{BuildArgs, Cli, Commands};

/// Run the command-line interface and return the process exit code
pub fn run() -> i32 {
    let cli = Cli::parse();
    let project_root = cli.source.clone().unwrap_or_else(|| PathBuf::from("."));

    match cli.command {
        Some(Commands::Build(args)) => {
            logging::init_logging(logging::level_for(cli.debug || args.verbose, args.quiet));
            commands::handle_build_command(&args, project_root)
        }
        Some(Commands::Clean) => {
            logging::init_logging(logging::level_for(cli.debug, false));
            commands::handle_clean_command(&project_root)
        }
        None => {
            logging::init_logging(logging::level_for(cli.debug, false));
            commands::handle_build_command(&BuildArgs::default(), project_root)
        }
    }
}
