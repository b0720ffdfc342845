//! Noughts - terminal tic-tac-toe
//!
//! Thin front-end over [`noughts_tictactoe`]: reads moves from the terminal,
//! prints the board, and plays the computer's replies after a short pause.
//!
//! # Architecture
//!
//! - **Config**: TOML file with command-line overrides
//! - **Scheduler**: cancellable delayed wake-up for the computer's move
//! - **App**: the interactive loop and the watch mode

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod app;
mod cli;
mod config;
mod scheduler;

pub use app::{App, Flow, Input, InputError, run_play, run_watch, watch_game};
pub use cli::{Cli, Command, PlayArgs};
pub use config::{ConfigError, DEFAULT_CONFIG_FILE, GameConfig};
pub use scheduler::{OpponentScheduler, Wake};
