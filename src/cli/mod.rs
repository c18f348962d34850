//! apdepack CLI - command-line front end for `aPLib` decompression

pub mod commands;

use clap::Parser;
use commands::Commands;

#[derive(Parser)]
#[command(name = "apdepack")]
#[command(version, about = "Decompress aPLib-packed files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Run the apdepack CLI
pub fn run_cli() -> anyhow::Result<()> {
    // Setup logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    cli.command.execute()?;

    Ok(())
}
