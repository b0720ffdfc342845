//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](super::Board). Rules are kept apart from
//! board storage so the search and the session share one definition of a
//! finished game.

pub mod draw;
pub mod outcome;
pub mod win;

pub use draw::is_full;
pub use outcome::{GameOutcome, evaluate_outcome};
pub use win::{WINNING_LINES, check_winner, has_won};
