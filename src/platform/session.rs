//! Session lifecycle
//!
//! A session owns one round and one scheduler. Input is buffered between
//! ticks and snapshotted when the timer fires; exactly one step commits
//! per fire.

use crate::error::Result;
use crate::sim::tick::{Game, TickReport};

use super::clock::Scheduler;

pub struct Session<G: Game, S: Scheduler> {
    game: G,
    scheduler: S,
    input: G::Input,
    running: bool,
}

impl<G: Game, S: Scheduler> Session<G, S> {
    pub fn new(game: G, scheduler: S) -> Self {
        Self {
            game,
            scheduler,
            input: G::Input::default(),
            running: false,
        }
    }

    /// Schedule the first tick at the round's current cadence
    pub fn start(&mut self) {
        self.running = true;
        self.scheduler.schedule_next(self.game.tick_interval());
        log::debug!("Session started ({:?} per tick)", self.game.tick_interval());
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Buffer input for the next tick
    pub fn set_input(&mut self, input: G::Input) {
        self.input = input;
    }

    pub fn input(&self) -> &G::Input {
        &self.input
    }

    /// Run one step. Called when the scheduler's deadline elapses.
    ///
    /// Returns `Ok(None)` after `stop` or once the round is over. An error
    /// stops the session before it is returned.
    pub fn fire(&mut self) -> Result<Option<TickReport>> {
        if !self.running {
            return Ok(None);
        }
        let input = self.input.clone();
        G::clear_one_shot(&mut self.input);

        let report = match self.game.tick(&input) {
            Ok(report) => report,
            Err(e) => {
                log::error!("Tick failed, stopping session: {e}");
                self.stop();
                return Err(e);
            }
        };

        if self.game.phase().is_terminal() {
            log::info!(
                "Round over: {} with score {}",
                self.game.phase().as_str(),
                self.game.score()
            );
            self.stop();
        } else {
            self.scheduler.schedule_next(report.next_delay);
        }
        Ok(Some(report))
    }

    /// Cancel the pending tick; later fires do nothing
    pub fn stop(&mut self) {
        self.running = false;
        self.scheduler.cancel();
    }

    /// Replace the round with a fresh one and start ticking again
    pub fn restart(&mut self) -> Result<()> {
        self.scheduler.cancel();
        self.game.restart()?;
        self.input = G::Input::default();
        self.start();
        Ok(())
    }

    /// Clone of the current round for renderers
    pub fn snapshot(&self) -> G {
        self.game.clone()
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}
