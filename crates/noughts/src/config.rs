//! Game configuration: TOML file, then command-line overrides.

use crate::cli::PlayArgs;
use derive_getters::Getters;
use derive_more::{Display, Error};
use noughts_tictactoe::{Difficulty, Mark, SessionSettings};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "noughts.toml";

/// Settings for an interactive game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Strength of the computer opponent.
    #[serde(default)]
    difficulty: Difficulty,

    /// Mark the computer plays.
    #[serde(default = "default_computer")]
    computer: Option<Mark>,

    /// Two humans share the terminal; no computer.
    #[serde(default)]
    two_player: bool,

    /// Pause before the computer moves, in milliseconds.
    #[serde(default = "default_delay_ms")]
    opponent_delay_ms: u64,

    /// Seed for the computer's random choices.
    #[serde(default)]
    seed: Option<u64>,
}

fn default_computer() -> Option<Mark> {
    Some(Mark::O)
}

fn default_delay_ms() -> u64 {
    500
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            computer: default_computer(),
            two_player: false,
            opponent_delay_ms: default_delay_ms(),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(difficulty = %config.difficulty, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if given, else [`DEFAULT_CONFIG_FILE`] if it exists,
    /// else the defaults.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::from_file(DEFAULT_CONFIG_FILE),
            None => {
                debug!("No config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Applies command-line flags on top of the loaded values.
    #[instrument(skip(self))]
    pub fn with_overrides(mut self, args: &PlayArgs) -> Self {
        if let Some(difficulty) = args.difficulty {
            self.difficulty = difficulty;
        }
        if let Some(computer) = args.computer {
            self.computer = Some(computer);
            self.two_player = false;
        }
        if args.two_player {
            self.two_player = true;
        }
        if let Some(delay) = args.delay_ms {
            self.opponent_delay_ms = delay;
        }
        if let Some(seed) = args.seed {
            self.seed = Some(seed);
        }
        self
    }

    /// Pause before the computer moves.
    pub fn opponent_delay(&self) -> Duration {
        Duration::from_millis(self.opponent_delay_ms)
    }

    /// Session settings for a new game.
    pub fn session_settings(&self) -> SessionSettings {
        let computer = if self.two_player { None } else { self.computer };
        let settings = SessionSettings::default()
            .with_difficulty(self.difficulty)
            .with_computer(computer);
        match self.seed {
            Some(seed) => settings.with_seed(seed),
            None => settings,
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
