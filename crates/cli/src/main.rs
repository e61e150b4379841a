mod commands;
mod discover;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::MapCommand;
use tracing_subscriber::EnvFilter;

/// hfrmap - RangeSeries to config mapping tool
#[derive(Debug, Parser)]
#[command(
    name = "hfrmap",
    version,
    about = "Associate RangeSeries data files with the site config active when they were recorded"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Build and persist the RangeSeries to config mapping for a site
    Map(MapCommand),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Map(cmd) => cmd.execute()?,
    };

    std::process::exit(exit_code);
}
