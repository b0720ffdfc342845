//! Core domain types for tic-tac-toe.

use super::action::IllegalMove;
use super::position::Position;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Number of cells on the board.
pub const CELLS: usize = 9;

/// Mark placed by a player.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Mark {
    /// Mark X (moves first).
    X,
    /// Mark O (moves second).
    O,
}

impl Mark {
    /// Returns the other mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square holding a mark.
    Occupied(Mark),
}

/// 3x3 tic-tac-toe board.
///
/// The board is a plain value: [`Board::apply_move`] returns a new board
/// and leaves the receiver untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; CELLS],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; CELLS],
        }
    }

    /// Builds a board from squares in row-major order.
    pub fn from_squares(squares: [Square; CELLS]) -> Self {
        Self { squares }
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square; CELLS] {
        &self.squares
    }

    /// Number of non-empty squares.
    pub fn occupied(&self) -> usize {
        self.squares.iter().filter(|s| **s != Square::Empty).count()
    }

    /// Writes a square without any rule checks.
    ///
    /// Used by the search to place and undo hypothetical marks on its own
    /// copy of the board.
    pub(crate) fn set(&mut self, pos: Position, square: Square) {
        self.squares[pos.to_index()] = square;
    }

    /// Every empty cell index, in ascending order.
    pub fn legal_moves(&self) -> Vec<usize> {
        self.squares
            .iter()
            .enumerate()
            .filter(|(_, s)| **s == Square::Empty)
            .map(|(i, _)| i)
            .collect()
    }

    /// Returns a copy of this board with `mark` placed at `cell`.
    ///
    /// # Errors
    ///
    /// - [`IllegalMove::OutOfRange`] if `cell` is not in `0..9`
    /// - [`IllegalMove::Occupied`] if the cell already holds a mark
    /// - [`IllegalMove::GameOver`] if the board already shows a win or a draw
    #[instrument(skip(self), fields(board = %self))]
    pub fn apply_move(&self, cell: usize, mark: Mark) -> Result<Board, IllegalMove> {
        let pos = Position::from_index(cell).ok_or(IllegalMove::OutOfRange(cell))?;

        if !self.is_empty(pos) {
            return Err(IllegalMove::Occupied(pos));
        }

        if super::rules::evaluate_outcome(self).is_terminal() {
            return Err(IllegalMove::GameOver);
        }

        let mut next = *self;
        next.set(pos, Square::Occupied(mark));
        Ok(next)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Board {
    /// Renders the grid with 1-based labels on empty cells.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                match self.squares[pos] {
                    Square::Empty => write!(f, "{}", pos + 1)?,
                    Square::Occupied(mark) => write!(f, "{}", mark)?,
                }
                if col < 2 {
                    write!(f, "|")?;
                }
            }
            if row < 2 {
                write!(f, "\n-+-+-\n")?;
            }
        }
        Ok(())
    }
}

/// Creates the empty board a new game starts from.
#[instrument]
pub fn new_game() -> Board {
    Board::new()
}
