//! fob-mixins - inject mixins into Vue single file components.
//!
//! Parses arguments, sets up logging and colors, and dispatches to the
//! command implementations.

use clap::Parser;
use fob_mixins_cli::{cli, commands, error, logger, ui};
use miette::Result;

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    let root = args.root.as_path();
    let config = args.config.as_deref();

    let result = match args.command {
        cli::Command::Check(check_args) => commands::check_execute(check_args, root, config),
        cli::Command::Transform(transform_args) => {
            commands::transform_execute(transform_args, root, config)
        }
        cli::Command::Build(build_args) => commands::build_execute(build_args, root, config),
    };

    // Convert CLI errors to miette diagnostics for error reporting
    result.map_err(error::cli_error_to_miette)
}
