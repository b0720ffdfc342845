//! Moves and the errors raised when one cannot be made.

use super::{Mark, Position};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

/// A move in tic-tac-toe: a mark placed at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct Move {
    /// The mark being placed.
    pub mark: Mark,
    /// The position where the mark is placed.
    pub position: Position,
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.mark, self.position.label())
    }
}

/// A move request the rules reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum IllegalMove {
    /// The cell index is not in `0..9`.
    #[display("Cell {} is off the board", _0)]
    OutOfRange(#[error(not(source))] usize),

    /// The square at the position already holds a mark.
    #[display("Square {} is already occupied", _0)]
    Occupied(#[error(not(source))] Position),

    /// The game already has a winner or is drawn.
    #[display("Game is already over")]
    GameOver,
}

/// The opponent was asked to move on a board with nothing left to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("No legal move available")]
pub struct NoLegalMove;
