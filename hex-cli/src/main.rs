//! Hex CLI
//!
//! Commands:
//! - play: Play a game of Hex in the terminal

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use hex_cli::play;

#[derive(Parser)]
#[command(name = "hex")]
#[command(about = "Hex board game with alpha-beta and Monte-Carlo engines")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game of Hex
    Play(play::PlayArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play::run(args),
    }
}
