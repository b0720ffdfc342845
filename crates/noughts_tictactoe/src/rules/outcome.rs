//! Game outcome, derived from the board on demand.

use super::super::{Board, Mark};
use super::{check_winner, is_full};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Where a game stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    /// Moves can still be made.
    InProgress,
    /// A mark completed a line.
    Win(Mark),
    /// The board is full with no line.
    Draw,
}

impl GameOutcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Mark> {
        match self {
            GameOutcome::Win(mark) => Some(*mark),
            _ => None,
        }
    }

    /// Returns true once no further moves are accepted.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameOutcome::InProgress)
    }
}

impl std::fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameOutcome::InProgress => write!(f, "In progress"),
            GameOutcome::Win(mark) => write!(f, "Player {} wins!", mark),
            GameOutcome::Draw => write!(f, "It's a draw!"),
        }
    }
}

/// Evaluates the board: a won line first, then a full board, else in progress.
#[instrument(skip(board))]
pub fn evaluate_outcome(board: &Board) -> GameOutcome {
    if let Some(mark) = check_winner(board) {
        GameOutcome::Win(mark)
    } else if is_full(board) {
        GameOutcome::Draw
    } else {
        GameOutcome::InProgress
    }
}
