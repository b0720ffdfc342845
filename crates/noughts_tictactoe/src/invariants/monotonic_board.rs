//! Monotonic board invariant: squares never change once set.

use super::Invariant;
use crate::{Board, Session, Square};

/// Invariant: replaying the history onto an empty board, never writing an
/// occupied square, reproduces the current board.
pub struct MonotonicBoardInvariant;

impl Invariant<Session> for MonotonicBoardInvariant {
    fn holds(session: &Session) -> bool {
        let mut reconstructed = Board::new();

        for mov in session.history() {
            if !reconstructed.is_empty(mov.position) {
                return false;
            }
            reconstructed.set(mov.position, Square::Occupied(mov.mark));
        }

        reconstructed == *session.board()
    }

    fn description() -> &'static str {
        "Board squares are monotonic (never overwritten)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Mark, Move, Position, SessionSettings};

    #[test]
    fn test_multiple_moves_hold() {
        let mut session = Session::new(SessionSettings::two_player());
        for cell in [0, 4, 2, 6] {
            session.play(cell).unwrap();
        }
        assert!(MonotonicBoardInvariant::holds(&session));
    }

    #[test]
    fn test_overwritten_square_violates() {
        let mut session = Session::new(SessionSettings::two_player());
        session.play(4).unwrap();
        session.history.push(Move::new(Mark::O, Position::Center));
        assert!(!MonotonicBoardInvariant::holds(&session));
    }
}
