//! Score ledger and lives
//!
//! Score only moves through `ScoreEvent` deltas; there is no setter.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Every event that changes the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreEvent {
    /// Classic snake food
    FoodEaten,
    /// Spelling snake correct letter
    GridLetter,
    /// Spelling snake word bonus
    WordBonus,
    /// Shooter correct letter hit
    ShotCorrect,
    /// Shooter wrong letter hit
    ShotWrong,
    /// Shooter item pickup
    ItemPickup,
}

impl ScoreEvent {
    pub fn delta(self) -> i64 {
        match self {
            ScoreEvent::FoodEaten => SCORE_FOOD,
            ScoreEvent::GridLetter => SCORE_LETTER,
            ScoreEvent::WordBonus => SCORE_WORD_BONUS,
            ScoreEvent::ShotCorrect => SCORE_CORRECT,
            ScoreEvent::ShotWrong => SCORE_WRONG,
            ScoreEvent::ItemPickup => SCORE_ITEM,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreLedger {
    score: i64,
}

impl ScoreLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    /// Apply one event, returning the delta
    pub fn apply(&mut self, event: ScoreEvent) -> i64 {
        let delta = event.delta();
        self.score += delta;
        delta
    }
}

/// Remaining lives, bounded by a ceiling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lives {
    current: u8,
    ceiling: u8,
}

impl Lives {
    pub fn new(start: u8, ceiling: u8) -> Self {
        Self {
            current: start.min(ceiling),
            ceiling,
        }
    }

    pub fn current(&self) -> u8 {
        self.current
    }

    pub fn at_ceiling(&self) -> bool {
        self.current >= self.ceiling
    }

    pub fn is_out(&self) -> bool {
        self.current == 0
    }

    /// Lose one life. Returns true only when this took the last one;
    /// losing at zero is a no-op.
    pub fn lose(&mut self) -> bool {
        if self.is_out() {
            return false;
        }
        self.current -= 1;
        self.is_out()
    }

    /// Gain one life up to the ceiling. Returns whether it counted.
    pub fn gain(&mut self) -> bool {
        if self.at_ceiling() {
            return false;
        }
        self.current += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_word_total() {
        let mut ledger = ScoreLedger::new();
        for _ in 0..3 {
            ledger.apply(ScoreEvent::GridLetter);
        }
        ledger.apply(ScoreEvent::WordBonus);
        assert_eq!(ledger.score(), 80);
    }

    #[test]
    fn shooter_mixed_events() {
        let mut ledger = ScoreLedger::new();
        let mut lives = Lives::new(MAX_LIVES, LIVES_CEILING);
        ledger.apply(ScoreEvent::ShotCorrect);
        assert_eq!(ledger.apply(ScoreEvent::ShotWrong), -50);
        lives.lose();
        ledger.apply(ScoreEvent::ItemPickup);
        assert_eq!(ledger.score(), 100);
        assert_eq!(lives.current(), 2);
    }

    #[test]
    fn score_can_go_negative() {
        let mut ledger = ScoreLedger::new();
        ledger.apply(ScoreEvent::ShotWrong);
        assert_eq!(ledger.score(), -50);
    }

    #[test]
    fn lives_are_capped() {
        let mut lives = Lives::new(3, 5);
        assert!(lives.gain());
        assert!(lives.gain());
        assert!(!lives.gain());
        assert_eq!(lives.current(), 5);
        assert!(lives.at_ceiling());
    }

    #[test]
    fn last_life_reports_out() {
        let mut lives = Lives::new(2, 5);
        assert!(!lives.lose());
        assert!(lives.lose());
        assert!(!lives.lose());
        assert_eq!(lives.current(), 0);
    }

    #[test]
    fn single_life_is_out_exactly_once() {
        let mut lives = Lives::new(1, 5);
        assert!(lives.lose());
        assert!(lives.is_out());
        assert!(!lives.lose());
        assert!(!lives.lose());
        assert_eq!(lives.current(), 0);
    }
}
