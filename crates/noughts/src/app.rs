//! Terminal game loop.
//!
//! Reads commands from stdin, prints the board to stdout, and plays the
//! computer's moves when the scheduler wakes the loop.

use crate::config::GameConfig;
use crate::scheduler::{OpponentScheduler, Wake};
use anyhow::Result;
use derive_more::{Display, Error};
use noughts_tictactoe::{
    Difficulty, GameOutcome, Mark, Position, Session, SessionError, SessionSettings,
};
use std::io::Write;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

const HELP: &str = "\
Commands:
  1-9                  place your mark (cells are numbered on the board)
  new | reset          start a new game
  difficulty <level>   low, medium or high (starts a new game)
  help                 show this message
  quit                 leave";

/// A line of user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Place a mark at a cell index (0-8).
    Cell(usize),
    /// Start a new game.
    NewGame,
    /// Change difficulty and start a new game.
    Difficulty(Difficulty),
    /// Print the command list.
    Help,
    /// Leave the program.
    Quit,
}

/// Input that is not a command.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Unrecognized input: {}", input)]
pub struct InputError {
    /// The offending text.
    pub input: String,
}

impl Input {
    /// Parses a line of user input.
    #[instrument]
    pub fn parse(line: &str) -> Result<Self, InputError> {
        let line = line.trim();
        let err = || InputError {
            input: line.to_string(),
        };
        let mut words = line.split_whitespace();
        let first = words.next().ok_or_else(err)?.to_lowercase();

        let input = match first.as_str() {
            "new" | "reset" | "restart" => Input::NewGame,
            "help" | "?" => Input::Help,
            "quit" | "exit" | "q" => Input::Quit,
            "difficulty" | "level" => {
                let level = words.next().ok_or_else(err)?;
                Input::Difficulty(level.parse().map_err(|_| err())?)
            }
            _ => {
                let pos = Position::from_label_or_number(line).ok_or_else(err)?;
                Input::Cell(pos.to_index())
            }
        };
        Ok(input)
    }
}

/// Whether the loop keeps going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep reading input.
    Continue,
    /// Stop the loop.
    Quit,
}

/// Interactive game state plus where to print it.
pub struct App<W: Write> {
    session: Session,
    scheduler: OpponentScheduler,
    out: W,
}

impl<W: Write> App<W> {
    /// Creates the app and the receiver computer wakes arrive on.
    #[instrument(skip(out))]
    pub fn new(
        settings: SessionSettings,
        delay: Duration,
        out: W,
    ) -> (Self, mpsc::UnboundedReceiver<Wake>) {
        let (scheduler, rx) = OpponentScheduler::new(delay);
        let app = Self {
            session: Session::new(settings),
            scheduler,
            out,
        };
        (app, rx)
    }

    /// Returns the session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Returns the output sink.
    pub fn out(&self) -> &W {
        &self.out
    }

    /// True while a computer move is waiting on its delay.
    pub fn computer_pending(&self) -> bool {
        self.scheduler.is_pending()
    }

    /// Prints the opening board and schedules the computer if it moves first.
    pub fn start(&mut self) -> Result<()> {
        writeln!(
            self.out,
            "Tic-tac-toe, difficulty {}. Type 'help' for commands.",
            self.session.difficulty()
        )?;
        self.render()?;
        self.schedule_computer();
        Ok(())
    }

    /// Handles one line of input.
    #[instrument(skip(self))]
    pub fn handle_line(&mut self, line: &str) -> Result<Flow> {
        if line.trim().is_empty() {
            return Ok(Flow::Continue);
        }
        match Input::parse(line) {
            Ok(input) => self.handle(input),
            Err(e) => {
                writeln!(self.out, "{}. Type 'help' for commands.", e)?;
                Ok(Flow::Continue)
            }
        }
    }

    /// Handles a parsed input.
    #[instrument(skip(self))]
    pub fn handle(&mut self, input: Input) -> Result<Flow> {
        match input {
            Input::Cell(cell) => self.human_move(cell)?,
            Input::NewGame => self.new_game()?,
            Input::Difficulty(difficulty) => {
                self.scheduler.cancel();
                self.session.set_difficulty(difficulty);
                writeln!(self.out, "Difficulty set to {}. New game.", difficulty)?;
                self.render()?;
                self.schedule_computer();
            }
            Input::Help => writeln!(self.out, "{}", HELP)?,
            Input::Quit => {
                self.scheduler.cancel();
                return Ok(Flow::Quit);
            }
        }
        Ok(Flow::Continue)
    }

    /// Plays the computer's move if the wake belongs to the current game.
    #[instrument(skip(self))]
    pub fn on_wake(&mut self, wake: Wake) -> Result<()> {
        if wake.generation != self.session.generation() || !self.session.computer_to_move() {
            debug!(
                wake = wake.generation,
                current = self.session.generation(),
                "Ignoring stale computer wake"
            );
            return Ok(());
        }

        match self.session.play_computer() {
            Ok((cell, outcome)) => {
                let position = Position::ALL[cell];
                writeln!(self.out, "Computer plays {} ({}).", cell + 1, position)?;
                self.render()?;
                self.report(outcome)?;
            }
            Err(e) => {
                warn!(error = %e, "Computer could not move");
                writeln!(self.out, "{}", e)?;
            }
        }
        Ok(())
    }

    fn human_move(&mut self, cell: usize) -> Result<()> {
        match self.session.play(cell) {
            Ok(outcome) => {
                self.render()?;
                if !self.report(outcome)? {
                    self.schedule_computer();
                }
            }
            Err(SessionError::ComputerTurn) => {
                writeln!(self.out, "Wait for the computer to move.")?;
            }
            Err(e) => writeln!(self.out, "{}", e)?,
        }
        Ok(())
    }

    fn new_game(&mut self) -> Result<()> {
        self.scheduler.cancel();
        self.session.reset();
        writeln!(self.out, "New game.")?;
        self.render()?;
        self.schedule_computer();
        Ok(())
    }

    fn schedule_computer(&mut self) {
        if self.session.computer_to_move() {
            self.scheduler.schedule(self.session.generation());
        }
    }

    fn render(&mut self) -> Result<()> {
        writeln!(self.out, "\n{}\n", self.session.board())?;
        if !self.session.outcome().is_terminal() {
            writeln!(self.out, "Current player: {}", self.session.to_move())?;
        }
        self.out.flush()?;
        Ok(())
    }

    /// Prints the result of a finished game. Returns true if it finished.
    fn report(&mut self, outcome: GameOutcome) -> Result<bool> {
        if outcome.is_terminal() {
            writeln!(self.out, "{} Type 'new' to play again.", outcome)?;
            return Ok(true);
        }
        Ok(false)
    }
}

/// Runs an interactive game on stdin and stdout.
#[instrument(skip(config))]
pub async fn run_play(config: GameConfig) -> Result<()> {
    let (mut app, mut wakes) = App::new(
        config.session_settings(),
        config.opponent_delay(),
        std::io::stdout(),
    );
    app.start()?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    info!("Input closed");
                    break;
                };
                if app.handle_line(&line)? == Flow::Quit {
                    break;
                }
            }
            Some(wake) = wakes.recv() => app.on_wake(wake)?,
        }
    }

    Ok(())
}

/// Lets the computer play both sides, printing each move.
#[instrument]
pub async fn run_watch(
    x: Difficulty,
    o: Difficulty,
    seed: Option<u64>,
    delay: Duration,
) -> Result<()> {
    let mut settings = SessionSettings::two_player();
    if let Some(seed) = seed {
        settings = settings.with_seed(seed);
    }
    let mut session = Session::new(settings);
    let mut out = std::io::stdout();

    let outcome = watch_game(&mut session, x, o, &mut out, delay).await?;
    info!(%outcome, "Watched game finished");
    Ok(())
}

/// Plays `session` to the end with each side at its difficulty.
pub async fn watch_game<W: Write>(
    session: &mut Session,
    x: Difficulty,
    o: Difficulty,
    out: &mut W,
    delay: Duration,
) -> Result<GameOutcome> {
    writeln!(out, "X ({}) vs O ({})\n\n{}", x, o, session.board())?;
    loop {
        let mark = session.to_move();
        let difficulty = if mark == Mark::X { x } else { o };
        tokio::time::sleep(delay).await;

        let (cell, outcome) = session.play_computer_with(difficulty)?;
        writeln!(out, "\n{} plays {}\n\n{}", mark, cell + 1, session.board())?;
        if outcome.is_terminal() {
            writeln!(out, "\n{}", outcome)?;
            return Ok(outcome);
        }
    }
}
