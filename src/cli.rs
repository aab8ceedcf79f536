//! CLI argument parsing for the asset validator.
//!
//! Every flag is optional; a bare `assetval validate` checks the project in
//! the current directory with Flutter defaults.
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Root CLI entrypoint.
#[derive(Parser, Debug)]
#[command(
    name = "assetval",
    version,
    about = "Cross-check Flutter asset declarations against disk and source usage",
    after_help = "Examples:\n  assetval validate\n  assetval validate --project ../my_app --verbose\n  assetval validate --json --strict",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    Validate(ValidateArgs),
}

/// Validate command inputs.
#[derive(Parser, Debug)]
#[command(about = "Report missing and unused assets declared in pubspec.yaml")]
pub struct ValidateArgs {
    /// Project root; when repeated, the first one is validated (default: current directory)
    #[arg(long = "project", value_name = "DIR")]
    pub projects: Vec<PathBuf>,

    /// Manifest path relative to the project root (default: pubspec.yaml)
    #[arg(long, value_name = "REL")]
    pub manifest: Option<String>,

    /// Source file extension to scan for references (repeatable, default: dart)
    #[arg(long = "extension", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Directory name never scanned (repeatable, default: node_modules)
    #[arg(long, value_name = "DIR")]
    pub exclude: Vec<String>,

    /// Emit machine-readable JSON instead of the text report
    #[arg(long)]
    pub json: bool,

    /// Exit with status 1 when missing or unused assets are found
    #[arg(long)]
    pub strict: bool,

    /// Show scan progress on stderr
    #[arg(long)]
    pub verbose: bool,
}
