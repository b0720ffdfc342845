//! Alternating turn invariant: marks alternate X, O, X, O, ...

use super::Invariant;
use crate::{Mark, Session};

/// Invariant: history starts with X, never repeats a mark back to back, and
/// the side to move follows from the history length.
pub struct AlternatingTurnInvariant;

impl Invariant<Session> for AlternatingTurnInvariant {
    fn holds(session: &Session) -> bool {
        let history = session.history();

        if history.first().is_some_and(|first| first.mark != Mark::X) {
            return false;
        }

        if history.windows(2).any(|pair| pair[0].mark == pair[1].mark) {
            return false;
        }

        let expected_next = if history.len() % 2 == 0 {
            Mark::X
        } else {
            Mark::O
        };
        session.to_move() == expected_next
    }

    fn description() -> &'static str {
        "Marks alternate turns (X, O, X, O, ...)"
    }
}
