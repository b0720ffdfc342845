//! Deferred computer moves.
//!
//! The computer's move is not computed right away: a timer task sleeps for
//! the presentation delay and then wakes the game loop, which computes and
//! applies the move itself. Each wake carries the session generation it was
//! scheduled for, and a reset cancels the pending timer.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, instrument};

/// Signal that the computer's presentation delay has elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wake {
    /// Session generation the move was scheduled for.
    pub generation: u64,
}

/// Schedules at most one pending computer move.
#[derive(Debug)]
pub struct OpponentScheduler {
    delay: Duration,
    tx: mpsc::UnboundedSender<Wake>,
    pending: Option<JoinHandle<()>>,
}

impl OpponentScheduler {
    /// Creates a scheduler and the receiver its wakes arrive on.
    #[instrument]
    pub fn new(delay: Duration) -> (Self, mpsc::UnboundedReceiver<Wake>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            delay,
            tx,
            pending: None,
        };
        (scheduler, rx)
    }

    /// Wakes the game loop after the delay. Replaces any pending wake.
    #[instrument(skip(self), fields(delay = ?self.delay))]
    pub fn schedule(&mut self, generation: u64) {
        self.cancel();

        let delay = self.delay;
        let tx = self.tx.clone();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // The receiver is gone only when the game loop has exited.
            let _ = tx.send(Wake { generation });
        }));
        debug!("Computer move scheduled");
    }

    /// Cancels the pending wake. Returns true if one was still waiting.
    #[instrument(skip(self))]
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                debug!("Pending computer move cancelled");
                true
            }
            _ => false,
        }
    }

    /// True while a wake is scheduled but not yet sent.
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for OpponentScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}
