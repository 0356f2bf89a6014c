//! Development tasks for the keeper casting engine
//!
//! This binary provides development utilities using the cargo-xtask pattern.
//! Run with: `cargo xtask <command>`

mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{CheckCatalog, Replay};

/// Development tasks for the keeper casting engine
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tools for keeper powers", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Validate a power catalog and print its price table
    CheckCatalog(CheckCatalog),

    /// Replay a scenario's cast script and print every outcome
    Replay(Replay),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::CheckCatalog(cmd) => cmd.execute(),
        Command::Replay(cmd) => cmd.execute(),
    }
}
