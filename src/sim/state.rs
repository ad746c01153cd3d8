//! Shared entity, phase and event types
//!
//! Round structs live in `snake` and `shooter`; the pieces both games (and
//! the scheduler, renderer and audio collaborators) agree on live here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::grid::GridPos;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Active gameplay
    Playing,
    /// Word spelled, more puzzles remain (shooter only, auto-advances)
    Cleared,
    /// Round lost; only `restart` leaves it
    GameOver,
    /// Spelling snake finished the last puzzle
    Victory,
    /// Shooter finished the last puzzle
    AllClear,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::GameOver | Phase::Victory | Phase::AllClear)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Playing => "playing",
            Phase::Cleared => "cleared",
            Phase::GameOver => "gameOver",
            Phase::Victory => "victory",
            Phase::AllClear => "allclear",
        }
    }
}

/// A food cell on the snake board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Food {
    pub pos: GridPos,
    /// `None` for classic plain food
    pub letter: Option<char>,
    /// Carries the letter the snake needs next
    pub correct: bool,
}

impl Food {
    pub fn letter(pos: GridPos, letter: char, correct: bool) -> Self {
        Self {
            pos,
            letter: Some(letter),
            correct,
        }
    }

    pub fn plain(pos: GridPos) -> Self {
        Self {
            pos,
            letter: None,
            correct: true,
        }
    }
}

/// Player bullet (travels straight up)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    pub pos: Vec2,
}

/// A letter falling toward the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallingLetter {
    pub id: u32,
    pub pos: Vec2,
    pub ch: char,
    /// Came off the correct queue
    pub needed: bool,
    pub color: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    /// Shows the puzzle hint for a while
    Hint,
    /// One extra life, up to the ceiling
    Life,
}

/// A falling pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: u32,
    pub pos: Vec2,
    pub kind: ItemKind,
}

/// Why a round ended badly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FatalCause {
    Wall,
    SelfCollision,
    WrongLetter,
    OutOfLives,
}

/// Events emitted by a tick for audio/UI collaborators
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Classic snake ate plain food
    FoodEaten { pos: GridPos },
    /// A needed letter was eaten or shot; `position` is its answer index
    AteCorrect { letter: char, position: usize },
    /// A letter nobody needed was eaten or shot
    AteWrong { letter: char },
    WordComplete { puzzle: usize },
    LevelUp { level: u32 },
    /// Next puzzle loaded (index into the play order)
    PuzzleAdvanced { puzzle: usize },
    Shot,
    ItemCollected { kind: ItemKind },
    /// A letter fell off the bottom
    LetterMissed { letter: char, requeued: bool },
    /// A letter struck the player
    PlayerHit { letter: char, requeued: bool },
    LifeLost { remaining: u8 },
    CollisionFatal { cause: FatalCause },
    Cleared,
    GameOver,
    Victory,
    AllClear,
}

impl GameEvent {
    /// Stable tag for collaborators
    pub fn tag(&self) -> &'static str {
        match self {
            GameEvent::FoodEaten { .. } => "food-eaten",
            GameEvent::AteCorrect { .. } => "ate-correct",
            GameEvent::AteWrong { .. } => "ate-wrong",
            GameEvent::WordComplete { .. } => "word-complete",
            GameEvent::LevelUp { .. } => "level-up",
            GameEvent::PuzzleAdvanced { .. } => "puzzle-advanced",
            GameEvent::Shot => "shot",
            GameEvent::ItemCollected { .. } => "item-collected",
            GameEvent::LetterMissed { .. } => "letter-missed",
            GameEvent::PlayerHit { .. } => "player-hit",
            GameEvent::LifeLost { .. } => "life-lost",
            GameEvent::CollisionFatal { .. } => "collision-fatal",
            GameEvent::Cleared => "cleared",
            GameEvent::GameOver => "game-over",
            GameEvent::Victory => "victory",
            GameEvent::AllClear => "allclear",
        }
    }
}
