//! Noughts - terminal tic-tac-toe against the computer.

#![warn(missing_docs)]

use anyhow::Result;
use clap::Parser;
use noughts::{Cli, Command, GameConfig, run_play, run_watch};
use std::time::Duration;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr so the board on stdout stays readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play(args) => play(args).await,
        Command::Watch {
            x,
            o,
            seed,
            delay_ms,
        } => run_watch(x, o, seed, Duration::from_millis(delay_ms)).await,
    }
}

/// Run an interactive game
#[instrument(skip_all)]
async fn play(args: noughts::PlayArgs) -> Result<()> {
    let config = GameConfig::load(args.config.as_deref())?.with_overrides(&args);
    info!(?config, "Starting game");
    run_play(config).await
}
