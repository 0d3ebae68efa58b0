//! jaxrs - Entry Point
//!
//! Binary entry point for inspecting provider discovery. Lives in the
//! `jaxrs` facade crate next to the library it drives.

use clap::Parser;
use jaxrs::cli::{Cli, run};
use jaxrs_infrastructure::logging::init_logging;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.load_config()?;
    init_logging(&config.logging)?;

    tracing::debug!(command = ?cli.command, "Running command");
    run(&cli.command, &config, &mut std::io::stdout().lock())
}
