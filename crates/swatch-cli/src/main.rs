//! `swatch` binary entry point.

use anyhow::{Result, anyhow};
use clap::Parser;
use swatch_cli::Cli;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let result = swatch_cli::run(cli);
    if let Err(err) = &result {
        tracing::debug!(error = ?err, "Command failed");
        eprintln!("error: {err}");
    }
    std::process::exit(swatch_cli::exit_code(&result));
}

fn init_logging(verbose: u8) -> Result<()> {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("failed to initialise logging: {e}"))
}
