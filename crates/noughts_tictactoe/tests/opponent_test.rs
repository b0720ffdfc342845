//! Computer opponent scenarios.

use noughts_tictactoe::rules::has_won;
use noughts_tictactoe::{
    Board, Difficulty, GameOutcome, Mark, NoLegalMove, Session, SessionSettings, Square,
    best_move, choose_move, evaluate_outcome, legal_moves,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

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

/// True if `mark` to move on `board` has a cell after which the opponent
/// cannot win on the next move.
fn has_safe_move(board: &Board, mark: Mark) -> bool {
    legal_moves(board).into_iter().any(|cell| !allows_immediate_loss(board, cell, mark))
}

fn allows_immediate_loss(board: &Board, cell: usize, mark: Mark) -> bool {
    let after = board.apply_move(cell, mark).unwrap();
    if has_won(&after, mark) {
        return false;
    }
    legal_moves(&after).into_iter().any(|reply| {
        has_won(&after.apply_move(reply, mark.opponent()).unwrap(), mark.opponent())
    })
}

#[test]
fn test_empty_board_best_is_draw() {
    let best = best_move(&Board::new(), Mark::O).unwrap();
    assert_eq!(best.score, 0);

    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let cell = choose_move(&Board::new(), Mark::O, Difficulty::High, &mut rng).unwrap();
    assert_eq!(cell, best.cell);
    let after = Board::new().apply_move(cell, Mark::O).unwrap();
    assert_eq!(best_move(&after, Mark::X).unwrap().score, 0);
}

#[test]
fn test_sole_remaining_cell() {
    let position = board("OXOOXXX.O");
    assert_eq!(evaluate_outcome(&position), GameOutcome::InProgress);
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    for difficulty in [Difficulty::Low, Difficulty::Medium, Difficulty::High] {
        assert_eq!(choose_move(&position, Mark::X, difficulty, &mut rng), Ok(7));
    }
}

#[test]
fn test_no_move_on_full_board() {
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    assert_eq!(
        choose_move(&board("XOXXOOOXX"), Mark::O, Difficulty::High, &mut rng),
        Err(NoLegalMove)
    );
}

#[test]
fn test_high_o_never_walks_into_immediate_loss() {
    // Every position after X's first two moves and O's first reply.
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    for x1 in 0..9 {
        let b1 = Board::new().apply_move(x1, Mark::X).unwrap();
        let o1 = choose_move(&b1, Mark::O, Difficulty::High, &mut rng).unwrap();
        let b2 = b1.apply_move(o1, Mark::O).unwrap();
        for x2 in legal_moves(&b2) {
            let b3 = b2.apply_move(x2, Mark::X).unwrap();
            if evaluate_outcome(&b3).is_terminal() || !has_safe_move(&b3, Mark::O) {
                continue;
            }
            let o2 = choose_move(&b3, Mark::O, Difficulty::High, &mut rng).unwrap();
            assert!(
                !allows_immediate_loss(&b3, o2, Mark::O),
                "O played {o2} on\n{b3}\nand left X a win"
            );
        }
    }
}

#[test]
fn test_high_o_never_loses_to_random_x() {
    for seed in 0..20 {
        let mut session = Session::new(
            SessionSettings::default()
                .with_difficulty(Difficulty::High)
                .with_seed(seed),
        );
        while !session.outcome().is_terminal() {
            let difficulty = if session.to_move() == Mark::X {
                Difficulty::Low
            } else {
                Difficulty::High
            };
            session.play_computer_with(difficulty).unwrap();
        }
        assert_ne!(session.outcome(), GameOutcome::Win(Mark::X), "seed {seed}");
    }
}

#[test]
fn test_perfect_play_draws() {
    let mut session = Session::new(
        SessionSettings::two_player()
            .with_difficulty(Difficulty::High)
            .with_seed(0),
    );
    while !session.outcome().is_terminal() {
        session.play_computer().unwrap();
    }
    assert_eq!(session.outcome(), GameOutcome::Draw);
}
