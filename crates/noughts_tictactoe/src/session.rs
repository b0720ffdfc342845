//! A single game owned by its caller.
//!
//! [`Session`] holds the board, the side to move, the move history and the
//! computer opponent's settings. Front-ends feed cell indices in and read
//! the board and outcome back out.

use crate::action::{IllegalMove, Move, NoLegalMove};
use crate::invariants::{InvariantSet, SessionInvariants};
use crate::opponent::{Difficulty, choose_move};
use crate::rules::{GameOutcome, evaluate_outcome};
use crate::{Board, Mark, Position};
use derive_more::{Display, Error, From};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// How a session is set up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Strength of the computer opponent.
    pub difficulty: Difficulty,
    /// Mark played by the computer, `None` for two human players.
    pub computer: Option<Mark>,
    /// Seed for the opponent's random choices, `None` to seed from the OS.
    pub seed: Option<u64>,
}

impl SessionSettings {
    /// Two human players, no computer.
    pub fn two_player() -> Self {
        Self {
            computer: None,
            ..Self::default()
        }
    }

    /// Sets the difficulty.
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Sets the computer's mark.
    pub fn with_computer(mut self, computer: Option<Mark>) -> Self {
        self.computer = computer;
        self
    }

    /// Fixes the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for SessionSettings {
    /// Human plays X against a low-difficulty computer playing O.
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            computer: Some(Mark::O),
            seed: None,
        }
    }
}

/// Error returned by session operations.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum SessionError {
    /// The rules reject the move.
    #[display("Illegal move: {}", _0)]
    Illegal(IllegalMove),

    /// The computer was asked to move on a finished board.
    #[display("{}", _0)]
    NoLegalMove(NoLegalMove),

    /// A mark tried to move out of turn.
    #[display("It's not {}'s turn, waiting for {}", got, expected)]
    #[from(ignore)]
    WrongTurn {
        /// Mark whose turn it is.
        expected: Mark,
        /// Mark that tried to move.
        got: Mark,
    },

    /// A human move arrived while the computer is to move.
    #[display("Waiting for the computer to move")]
    #[from(ignore)]
    ComputerTurn,

    /// A post-move check failed.
    #[display("Invariant violation: {}", _0)]
    #[from(ignore)]
    InvariantViolation(#[error(not(source))] String),
}

/// One game of tic-tac-toe with an optional computer opponent.
#[derive(Debug, Clone)]
pub struct Session {
    board: Board,
    to_move: Mark,
    pub(crate) history: Vec<Move>,
    difficulty: Difficulty,
    computer: Option<Mark>,
    generation: u64,
    rng: ChaCha8Rng,
}

impl Session {
    /// Creates a session with an empty board and X to move.
    #[instrument]
    pub fn new(settings: SessionSettings) -> Self {
        let rng = match settings.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        info!(
            difficulty = %settings.difficulty,
            computer = ?settings.computer,
            "Creating new game session"
        );
        Self {
            board: Board::new(),
            to_move: Mark::X,
            history: Vec::new(),
            difficulty: settings.difficulty,
            computer: settings.computer,
            generation: 0,
            rng,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the mark to move next.
    pub fn to_move(&self) -> Mark {
        self.to_move
    }

    /// Returns the move history of the current game.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Returns the opponent difficulty.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Returns the computer's mark, if any.
    pub fn computer(&self) -> Option<Mark> {
        self.computer
    }

    /// Identifies the current game; bumped on every reset.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Evaluates the current board.
    pub fn outcome(&self) -> GameOutcome {
        evaluate_outcome(&self.board)
    }

    /// True if the game is running and the computer is to move.
    pub fn computer_to_move(&self) -> bool {
        self.computer == Some(self.to_move) && !self.outcome().is_terminal()
    }

    /// Plays `cell` for the side to move.
    ///
    /// # Errors
    ///
    /// - [`SessionError::Illegal`] for an off-board or occupied cell, or a finished game
    /// - [`SessionError::ComputerTurn`] if the computer is to move
    #[instrument(skip(self), fields(to_move = %self.to_move))]
    pub fn play(&mut self, cell: usize) -> Result<GameOutcome, SessionError> {
        if self.outcome().is_terminal() {
            warn!(cell, "Move after game over");
            return Err(IllegalMove::GameOver.into());
        }
        if self.computer == Some(self.to_move) {
            warn!(cell, "Human move during computer's turn");
            return Err(SessionError::ComputerTurn);
        }
        self.play_as(cell, self.to_move)
    }

    /// Plays `cell` for `mark`, which must be the side to move.
    ///
    /// # Errors
    ///
    /// - [`SessionError::WrongTurn`] if `mark` is not to move
    /// - [`SessionError::Illegal`] if the rules reject the cell
    /// - [`SessionError::InvariantViolation`] in debug builds, if the move
    ///   would break a session invariant; the session is left as it was
    #[instrument(skip(self))]
    pub fn play_as(&mut self, cell: usize, mark: Mark) -> Result<GameOutcome, SessionError> {
        if mark != self.to_move {
            warn!(expected = %self.to_move, got = %mark, "Mark tried to move out of turn");
            return Err(SessionError::WrongTurn {
                expected: self.to_move,
                got: mark,
            });
        }

        let next = self.board.apply_move(cell, mark).map_err(|e| {
            warn!(cell, error = %e, "Invalid move");
            e
        })?;
        // `apply_move` accepted the index, so it names a position.
        let position = Position::ALL[cell];

        let played = Move::new(mark, position);
        if cfg!(debug_assertions) {
            let mut staged = self.clone();
            staged.commit(next, played);
            staged.check_invariants()?;
        }
        self.commit(next, played);

        let outcome = self.outcome();
        debug!(cell, %mark, ?outcome, "Move applied");
        if outcome.is_terminal() {
            info!(%outcome, moves = self.history.len(), "Game over");
        }
        Ok(outcome)
    }

    /// Lets the computer choose and play a cell for the side to move.
    ///
    /// Returns the cell played and the resulting outcome.
    ///
    /// # Errors
    ///
    /// [`SessionError::NoLegalMove`] if the game is already over.
    #[instrument(skip(self))]
    pub fn play_computer(&mut self) -> Result<(usize, GameOutcome), SessionError> {
        self.play_computer_with(self.difficulty)
    }

    /// Like [`Session::play_computer`] with an explicit difficulty.
    #[instrument(skip(self))]
    pub fn play_computer_with(
        &mut self,
        difficulty: Difficulty,
    ) -> Result<(usize, GameOutcome), SessionError> {
        let mark = self.to_move;
        let cell = choose_move(&self.board, mark, difficulty, &mut self.rng)?;
        let outcome = self.play_as(cell, mark)?;
        Ok((cell, outcome))
    }

    /// Starts a new game: empty board, X to move, next generation.
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.history.clear();
        self.to_move = Mark::X;
        self.generation = self.generation.wrapping_add(1);
        info!(generation = self.generation, "Game reset");
    }

    /// Changes the difficulty and starts a new game.
    #[instrument(skip(self))]
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.reset();
    }

    fn commit(&mut self, board: Board, played: Move) {
        self.board = board;
        self.to_move = played.mark.opponent();
        self.history.push(played);
    }

    fn check_invariants(&self) -> Result<(), SessionError> {
        SessionInvariants::check_all(self).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            warn!(%descriptions, "Session invariants violated");
            SessionError::InvariantViolation(descriptions)
        })
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionSettings::default())
    }
}
