//! Command-line interface definition for fob-mixins.
//!
//! # Command Structure
//!
//! - `fob-mixins check` - List components matched by the rules
//! - `fob-mixins transform <FILE>` - Print or write one rewritten component
//! - `fob-mixins build --out-dir <DIR>` - Rewrite every matching component

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// fob-mixins - inject mixins into Vue single file components
#[derive(Parser, Debug)]
#[command(
    name = "fob-mixins",
    version,
    about = "Inject mixins into Vue single file components",
    long_about = "Rewrites the <script> block of every component matched by a rule so that\n\
                  the rule's mixin modules are imported and merged into the component's\n\
                  `mixins` option."
)]
pub struct Cli {
    /// Project root; rule patterns and mixin paths are relative to it
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Config file (fob-mixins.toml, fob-mixins.json or package.json),
    /// relative to the root unless absolute
    ///
    /// When omitted, the root is searched for fob-mixins.toml, then
    /// fob-mixins.json, then a `vueMixins` field in package.json.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the components each rule applies to
    Check(CheckArgs),

    /// Rewrite a single component
    Transform(TransformArgs),

    /// Rewrite every matching component into an output directory
    Build(BuildArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct CheckArgs {}

#[derive(Args, Debug, Clone)]
pub struct TransformArgs {
    /// Component file to transform
    pub file: PathBuf,

    /// Write the result here instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct BuildArgs {
    /// Output directory, relative to the root unless absolute
    #[arg(short, long, default_value = "dist")]
    pub out_dir: PathBuf,
}
