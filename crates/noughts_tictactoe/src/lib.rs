//! Tic-tac-toe rules engine and computer opponent.
//!
//! # Architecture
//!
//! - **Rules**: board, legal moves, win and draw detection
//! - **Opponent**: random play at low difficulty, exhaustive minimax at high
//! - **Session**: one caller-owned game with turn order and history
//!
//! # Example
//!
//! ```
//! use noughts_tictactoe::{Difficulty, GameOutcome, Mark, Session, SessionSettings};
//!
//! let mut session = Session::new(
//!     SessionSettings::default()
//!         .with_difficulty(Difficulty::High)
//!         .with_seed(1),
//! );
//! session.play(0).unwrap();
//! let (cell, outcome) = session.play_computer().unwrap();
//! assert_eq!(cell, 4);
//! assert_eq!(outcome, GameOutcome::InProgress);
//! assert_eq!(session.to_move(), Mark::X);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
pub mod invariants;
pub mod opponent;
mod position;
pub mod rules;
mod session;
mod types;

pub use action::{IllegalMove, Move, NoLegalMove};
pub use opponent::minimax::{ScoredMove, best_move};
pub use opponent::{Difficulty, choose_move};
pub use position::Position;
pub use rules::{GameOutcome, WINNING_LINES, evaluate_outcome};
pub use session::{Session, SessionError, SessionSettings};
pub use types::{Board, CELLS, Mark, Square, new_game};

/// Every empty cell index on `board`, ascending.
pub fn legal_moves(board: &Board) -> Vec<usize> {
    board.legal_moves()
}

/// Returns `board` with `mark` placed at `cell`.
///
/// # Errors
///
/// See [`Board::apply_move`].
pub fn apply_move(board: &Board, cell: usize, mark: Mark) -> Result<Board, IllegalMove> {
    board.apply_move(cell, mark)
}
