//! Rules engine scenarios and properties over reachable boards.

use noughts_tictactoe::{
    Board, GameOutcome, IllegalMove, Mark, Position, Square, apply_move, evaluate_outcome,
    legal_moves, new_game,
};
use proptest::prelude::*;

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

/// Plays `picks` as indices into the legal moves of each turn, stopping at
/// a finished game. Returns every board along the way.
fn play_out(picks: &[usize]) -> Vec<Board> {
    let mut current = new_game();
    let mut mark = Mark::X;
    let mut seen = vec![current];
    for pick in picks {
        if evaluate_outcome(&current).is_terminal() {
            break;
        }
        let cells = legal_moves(&current);
        let cell = cells[pick % cells.len()];
        current = apply_move(&current, cell, mark).expect("legal move");
        mark = mark.opponent();
        seen.push(current);
    }
    seen
}

#[test]
fn test_top_row_win() {
    let before = board("XX.OO....");
    let after = apply_move(&before, 2, Mark::X).unwrap();
    assert_eq!(evaluate_outcome(&after), GameOutcome::Win(Mark::X));
}

#[test]
fn test_full_board_draw() {
    assert_eq!(evaluate_outcome(&board("XOXXOOOXX")), GameOutcome::Draw);
}

#[test]
fn test_rejections_leave_board_unchanged() {
    let before = board("X...O....");
    let snapshot = before;

    assert_eq!(apply_move(&before, 0, Mark::O), Err(IllegalMove::Occupied(Position::TopLeft)));
    assert_eq!(apply_move(&before, 4, Mark::X), Err(IllegalMove::Occupied(Position::Center)));
    assert_eq!(apply_move(&before, 9, Mark::X), Err(IllegalMove::OutOfRange(9)));
    assert_eq!(apply_move(&before, usize::MAX, Mark::X), Err(IllegalMove::OutOfRange(usize::MAX)));
    assert_eq!(before, snapshot);
}

#[test]
fn test_finished_game_rejects_moves() {
    let drawn = board("XOXXOOOXX");
    assert_eq!(apply_move(&drawn, 0, Mark::X), Err(IllegalMove::Occupied(Position::TopLeft)));

    let won = board("OOO.XX.X.");
    assert_eq!(apply_move(&won, 3, Mark::X), Err(IllegalMove::GameOver));
}

#[test]
fn test_board_serializes() {
    let position = board("X...O....");
    let json = serde_json::to_string(&position).unwrap();
    let back: Board = serde_json::from_str(&json).unwrap();
    assert_eq!(back, position);
}

proptest! {
    #[test]
    fn prop_never_two_winners(picks in prop::collection::vec(0usize..9, 0..9)) {
        for b in play_out(&picks) {
            let x = noughts_tictactoe::rules::has_won(&b, Mark::X);
            let o = noughts_tictactoe::rules::has_won(&b, Mark::O);
            prop_assert!(!(x && o));
        }
    }

    #[test]
    fn prop_legal_moves_complement_occupied(picks in prop::collection::vec(0usize..9, 0..9)) {
        for b in play_out(&picks) {
            prop_assert_eq!(legal_moves(&b).len() + b.occupied(), 9);
            let cells = legal_moves(&b);
            prop_assert!(cells.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn prop_occupied_cells_always_rejected(picks in prop::collection::vec(0usize..9, 1..9)) {
        let boards = play_out(&picks);
        let last = boards[boards.len() - 1];
        for (cell, square) in last.squares().iter().enumerate() {
            if *square != Square::Empty {
                prop_assert!(apply_move(&last, cell, Mark::X).is_err());
                prop_assert!(apply_move(&last, cell, Mark::O).is_err());
            }
        }
    }
}
