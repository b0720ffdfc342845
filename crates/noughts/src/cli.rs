//! Command-line interface for noughts.

use clap::{Args, Parser, Subcommand};
use noughts_tictactoe::{Difficulty, Mark};
use std::path::PathBuf;

/// Noughts - tic-tac-toe against a minimax computer opponent
#[derive(Parser, Debug)]
#[command(name = "noughts")]
#[command(about = "Terminal tic-tac-toe with a computer opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a game in the terminal
    Play(PlayArgs),

    /// Watch the computer play both sides
    Watch {
        /// Difficulty for X
        #[arg(long, default_value = "high")]
        x: Difficulty,

        /// Difficulty for O
        #[arg(long, default_value = "high")]
        o: Difficulty,

        /// Seed for random moves
        #[arg(long)]
        seed: Option<u64>,

        /// Pause between moves in milliseconds
        #[arg(long, default_value = "500")]
        delay_ms: u64,
    },
}

/// Flags for an interactive game. Unset flags fall back to the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct PlayArgs {
    /// Computer difficulty (low, medium, high)
    #[arg(short, long)]
    pub difficulty: Option<Difficulty>,

    /// Mark the computer plays (X or O). Turns off two-player mode from the
    /// config file.
    #[arg(long, conflicts_with = "two_player")]
    pub computer: Option<Mark>,

    /// Two humans, no computer
    #[arg(long)]
    pub two_player: bool,

    /// Pause before the computer moves, in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Seed for the computer's random moves
    #[arg(long)]
    pub seed: Option<u64>,

    /// Path to a TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
