//! History consistency invariant: history length matches occupied squares.

use super::Invariant;
use crate::Session;

/// Invariant: every occupied square has exactly one move in the history.
pub struct HistoryConsistentInvariant;

impl Invariant<Session> for HistoryConsistentInvariant {
    fn holds(session: &Session) -> bool {
        session.history().len() == session.board().occupied()
    }

    fn description() -> &'static str {
        "History length equals occupied squares"
    }
}
