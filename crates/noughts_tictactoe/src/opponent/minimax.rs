//! Exhaustive minimax search for the computer opponent.
//!
//! Scores are always read from O's side: O is the maximizer and X the
//! minimizer, whichever mark the search was started for. A line for X is
//! -10, a line for O is +10, a full board is 0. There is no depth
//! discount, no pruning and no memoization; the 3x3 tree is small enough
//! to walk in full.

use crate::rules::has_won;
use crate::{Board, Mark, Position, Square};
use tracing::{debug, instrument};

/// Mark whose wins score positive.
pub const MAXIMIZER: Mark = Mark::O;

/// Mark whose wins score negative.
pub const MINIMIZER: Mark = Mark::X;

/// Score of a board won by [`MAXIMIZER`].
pub const WIN_SCORE: i32 = 10;

/// Score of a board won by [`MINIMIZER`].
pub const LOSS_SCORE: i32 = -WIN_SCORE;

/// Score of a full board with no line.
pub const DRAW_SCORE: i32 = 0;

/// A candidate cell together with its minimax score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredMove {
    /// Cell index (0-8).
    pub cell: usize,
    /// Guaranteed score under optimal play from both sides.
    pub score: i32,
}

/// Finds the best cell for `to_move`.
///
/// Returns `None` when the board has no empty cell or is already won.
/// Ties keep the first cell in ascending index order.
#[instrument(skip(board), fields(board = %board))]
pub fn best_move(board: &Board, to_move: Mark) -> Option<ScoredMove> {
    if has_won(board, MINIMIZER) || has_won(board, MAXIMIZER) {
        return None;
    }

    let mut scratch = *board;
    let best = search(&mut scratch, to_move).1;
    debug_assert_eq!(scratch, *board, "search must restore the board");

    if let Some(best) = best {
        debug!(cell = best.cell, score = best.score, ?to_move, "Search finished");
    }
    best
}

/// Scores `board` with `to_move` to play.
///
/// Returns the score and, if the board was not terminal, the move that
/// achieves it. Every placement is undone before returning.
fn search(board: &mut Board, to_move: Mark) -> (i32, Option<ScoredMove>) {
    if has_won(board, MINIMIZER) {
        return (LOSS_SCORE, None);
    }
    if has_won(board, MAXIMIZER) {
        return (WIN_SCORE, None);
    }

    let cells = board.legal_moves();
    if cells.is_empty() {
        return (DRAW_SCORE, None);
    }

    let mut best: Option<ScoredMove> = None;
    for cell in cells {
        let pos = Position::ALL[cell];
        board.set(pos, Square::Occupied(to_move));
        let (score, _) = search(board, to_move.opponent());
        board.set(pos, Square::Empty);

        let better = match best {
            None => true,
            Some(current) if to_move == MAXIMIZER => score > current.score,
            Some(current) => score < current.score,
        };
        if better {
            best = Some(ScoredMove { cell, score });
        }
    }

    // `cells` was non-empty, so a candidate was recorded.
    let score = best.map_or(DRAW_SCORE, |m| m.score);
    (score, best)
}
