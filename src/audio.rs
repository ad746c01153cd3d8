//! Sound cues
//!
//! The simulation never plays audio. Each tick's events map to named cues a
//! front end can turn into sounds; the headless runner just logs them.

use serde::{Deserialize, Serialize};

use crate::sim::state::{GameEvent, ItemKind};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    /// Classic food or a correct letter
    Eat,
    /// A letter nobody needed
    Wrong,
    /// Word spelled
    WordComplete,
    /// Next puzzle or faster level
    LevelUp,
    /// Bullet fired
    Shoot,
    /// Hint item collected
    Hint,
    /// Life item collected
    ExtraLife,
    /// Life lost to a hit
    Hurt,
    /// Wall or self collision
    Crash,
    GameOver,
    /// Last puzzle done
    Victory,
}

impl SoundCue {
    /// Cue for `event`, if it makes a sound
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        let cue = match event {
            GameEvent::FoodEaten { .. } | GameEvent::AteCorrect { .. } => SoundCue::Eat,
            GameEvent::AteWrong { .. } => SoundCue::Wrong,
            GameEvent::WordComplete { .. } => SoundCue::WordComplete,
            GameEvent::LevelUp { .. } => SoundCue::LevelUp,
            GameEvent::Shot => SoundCue::Shoot,
            GameEvent::ItemCollected {
                kind: ItemKind::Hint,
            } => SoundCue::Hint,
            GameEvent::ItemCollected {
                kind: ItemKind::Life,
            } => SoundCue::ExtraLife,
            GameEvent::PlayerHit { .. } => SoundCue::Hurt,
            GameEvent::CollisionFatal { .. } => SoundCue::Crash,
            GameEvent::GameOver => SoundCue::GameOver,
            GameEvent::Victory | GameEvent::AllClear => SoundCue::Victory,
            GameEvent::PuzzleAdvanced { .. }
            | GameEvent::LetterMissed { .. }
            | GameEvent::LifeLost { .. }
            | GameEvent::Cleared => return None,
        };
        Some(cue)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SoundCue::Eat => "eat",
            SoundCue::Wrong => "wrong",
            SoundCue::WordComplete => "word-complete",
            SoundCue::LevelUp => "level-up",
            SoundCue::Shoot => "shoot",
            SoundCue::Hint => "hint",
            SoundCue::ExtraLife => "extra-life",
            SoundCue::Hurt => "hurt",
            SoundCue::Crash => "crash",
            SoundCue::GameOver => "game-over",
            SoundCue::Victory => "victory",
        }
    }
}

/// Cues for a whole tick, in event order, without repeats
pub fn cues_for(events: &[GameEvent]) -> Vec<SoundCue> {
    let mut cues = Vec::new();
    for cue in events.iter().filter_map(SoundCue::for_event) {
        if !cues.contains(&cue) {
            cues.push(cue);
        }
    }
    cues
}
