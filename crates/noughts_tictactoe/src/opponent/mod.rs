//! Computer opponent.
//!
//! [`choose_move`] picks a cell for the side to move. Low and Medium play a
//! uniformly random empty cell; High runs the exhaustive search in
//! [`minimax`].

pub mod minimax;

use crate::action::NoLegalMove;
use crate::rules::evaluate_outcome;
use crate::{Board, Mark};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// How hard the computer plays.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    /// Random empty cell.
    #[default]
    #[serde(alias = "easy")]
    #[strum(to_string = "low", serialize = "easy")]
    Low,
    /// Currently plays exactly like [`Difficulty::Low`].
    Medium,
    /// Optimal play by minimax.
    #[serde(alias = "hard")]
    #[strum(to_string = "high", serialize = "hard")]
    High,
}

/// Picks a cell for `to_move` on `board`.
///
/// # Errors
///
/// Returns [`NoLegalMove`] if the board has no empty cell or the game on it
/// is already decided.
#[instrument(skip(board, rng), fields(board = %board))]
pub fn choose_move<R>(
    board: &Board,
    to_move: Mark,
    difficulty: Difficulty,
    rng: &mut R,
) -> Result<usize, NoLegalMove>
where
    R: Rng + ?Sized,
{
    let cells = board.legal_moves();
    if cells.is_empty() || evaluate_outcome(board).is_terminal() {
        warn!(?to_move, "Opponent asked to move on a finished board");
        return Err(NoLegalMove);
    }

    let cell = match difficulty {
        Difficulty::Low | Difficulty::Medium => random_move(&cells, rng)?,
        Difficulty::High => minimax::best_move(board, to_move)
            .map(|best| best.cell)
            .ok_or(NoLegalMove)?,
    };

    debug!(cell, ?to_move, %difficulty, "Opponent chose cell");
    Ok(cell)
}

/// Uniformly random element of `cells`.
fn random_move<R>(cells: &[usize], rng: &mut R) -> Result<usize, NoLegalMove>
where
    R: Rng + ?Sized,
{
    cells.choose(rng).copied().ok_or(NoLegalMove)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Square;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    fn board(cells: &str) -> Board {
        let mut squares = [Square::Empty; 9];
        for (i, c) in cells.chars().enumerate() {
            squares[i] = match c {
                'X' => Square::Occupied(Mark::X),
                'O' => Square::Occupied(Mark::O),
                _ => Square::Empty,
            };
        }
        Board::from_squares(squares)
    }

    #[test]
    fn test_difficulty_parse() {
        assert_eq!("low".parse::<Difficulty>().unwrap(), Difficulty::Low);
        assert_eq!("Easy".parse::<Difficulty>().unwrap(), Difficulty::Low);
        assert_eq!("medium".parse::<Difficulty>().unwrap(), Difficulty::Medium);
        assert_eq!("HARD".parse::<Difficulty>().unwrap(), Difficulty::High);
        assert!("impossible".parse::<Difficulty>().is_err());
        assert_eq!(Difficulty::High.to_string(), "high");
        assert_eq!(Difficulty::default(), Difficulty::Low);
    }

    #[test]
    fn test_sole_cell_at_every_difficulty() {
        let position = board("XOXXOOOX.");
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for difficulty in [Difficulty::Low, Difficulty::Medium, Difficulty::High] {
            assert_eq!(choose_move(&position, Mark::X, difficulty, &mut rng), Ok(8));
        }
    }

    #[test]
    fn test_full_board_has_no_move() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let position = board("XOXXOOOXX");
        for difficulty in [Difficulty::Low, Difficulty::Medium, Difficulty::High] {
            assert_eq!(
                choose_move(&position, Mark::O, difficulty, &mut rng),
                Err(NoLegalMove)
            );
        }
    }

    #[test]
    fn test_won_board_has_no_move() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let position = board("XXXOO....");
        assert_eq!(
            choose_move(&position, Mark::O, Difficulty::Low, &mut rng),
            Err(NoLegalMove)
        );
    }

    #[test]
    fn test_random_move_is_legal_and_varied() {
        let position = board("X...O....");
        let legal: HashSet<_> = position.legal_moves().into_iter().collect();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut seen = HashSet::new();
        for _ in 0..200 {
            let cell = choose_move(&position, Mark::X, Difficulty::Low, &mut rng).unwrap();
            assert!(legal.contains(&cell));
            seen.insert(cell);
        }
        assert_eq!(seen, legal);
    }

    #[test]
    fn test_random_move_reproducible_from_seed() {
        let position = Board::new();
        let picks = |seed| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            (0..10)
                .map(|_| choose_move(&position, Mark::X, Difficulty::Medium, &mut rng).unwrap())
                .collect::<Vec<_>>()
        };
        assert_eq!(picks(3), picks(3));
    }

    #[test]
    fn test_medium_picks_match_low() {
        for layout in [".........", "X...O....", "XO.OX....", "XOXOO.X.."] {
            let position = board(layout);
            for seed in 0..20 {
                let mut low_rng = ChaCha8Rng::seed_from_u64(seed);
                let mut medium_rng = ChaCha8Rng::seed_from_u64(seed);
                for _ in 0..5 {
                    let low = choose_move(&position, Mark::X, Difficulty::Low, &mut low_rng);
                    let medium =
                        choose_move(&position, Mark::X, Difficulty::Medium, &mut medium_rng);
                    assert_eq!(low, medium, "layout {layout}, seed {seed}");
                }
            }
        }
    }

    #[test]
    fn test_high_blocks_instead_of_random() {
        let position = board("XX..O....");
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(choose_move(&position, Mark::O, Difficulty::High, &mut rng), Ok(2));
    }
}
