//! Fixed-step driver contract
//!
//! Both games advance through `Game::tick`. `step` is the value-in,
//! value-out form: it never touches the input round.

use std::time::Duration;

use serde::Serialize;

use super::state::{GameEvent, Phase};
use crate::error::Result;

/// What one tick produced
#[derive(Debug, Clone, Serialize)]
pub struct TickReport {
    /// Tick counter after this step
    pub tick: u64,
    pub events: Vec<GameEvent>,
    /// Delay the scheduler should wait before the next step
    pub next_delay: Duration,
}

impl TickReport {
    pub fn has(&self, tag: &str) -> bool {
        self.events.iter().any(|e| e.tag() == tag)
    }
}

/// A round that can be stepped by the scheduler
pub trait Game: Clone {
    /// Snapshot of held inputs consulted once at the start of a tick
    type Input: Clone + Default + std::fmt::Debug;

    /// Advance exactly one step
    fn tick(&mut self, input: &Self::Input) -> Result<TickReport>;

    fn phase(&self) -> Phase;

    fn score(&self) -> i64;

    fn level(&self) -> u32;

    /// Delay before the next step at the current level
    fn tick_interval(&self) -> Duration;

    /// Discard the round and start over from the same config
    fn restart(&mut self) -> Result<()>;

    /// Clear edge-triggered inputs once a tick has consumed them
    fn clear_one_shot(_input: &mut Self::Input) {}
}

/// Advance a copy of `state` by one tick
pub fn step<G: Game>(state: &G, input: &G::Input) -> Result<(G, TickReport)> {
    let mut next = state.clone();
    let report = next.tick(input)?;
    Ok((next, report))
}
