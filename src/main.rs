use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;
mod config;
mod manifest;
mod placement;
mod report;
mod sink;
mod usage;
mod workflow;

use cli::{Command, RootArgs};

/// Environment variable holding a `tracing` filter directive.
const LOG_ENV: &str = "ASSETVAL_LOG";

fn main() -> Result<ExitCode> {
    init_tracing();
    let args = RootArgs::parse();

    match args.command {
        Command::Validate(args) => workflow::run_validate(args),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
