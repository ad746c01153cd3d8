//! Letter Arcade - simulation core for a small collection of grid and
//! shooter word games
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, spawning, phases)
//! - `platform`: Tick scheduling and session lifecycle
//! - `config`: Data-driven round configuration and puzzle lists
//! - `error`: Configuration and spawn-invariant errors
//! - `audio`: Sound cues derived from tick events

pub mod audio;
pub mod config;
pub mod error;
pub mod platform;
pub mod sim;

pub use config::{Puzzle, ShooterConfig, SnakeConfig, SnakeMode, TimingConfig};
pub use error::{ConfigError, EngineError};

/// Game configuration constants
pub mod consts {
    /// Letters the spawners draw from
    pub const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

    /// Spelling snake board
    pub const GRID_SIZE: u32 = 25;
    pub const CELL_SIZE: f32 = 24.0;
    pub const SNAKE_START: (i32, i32) = (12, 12);
    pub const BASE_TICK_MS: u64 = 150;
    pub const TICK_DECREASE_MS: u64 = 5;
    pub const MIN_TICK_MS: u64 = 80;
    /// Foods on the board at once (one correct, the rest decoys)
    pub const FOOD_COUNT: usize = 3;

    /// Classic snake board
    pub const CLASSIC_GRID_SIZE: u32 = 20;
    pub const CLASSIC_CELL_SIZE: f32 = 20.0;
    pub const CLASSIC_START: (i32, i32) = (10, 10);
    pub const CLASSIC_TICK_MS: u64 = 120;

    /// Grid scoring
    pub const SCORE_LETTER: i64 = 10;
    pub const SCORE_FOOD: i64 = 10;
    pub const SCORE_WORD_BONUS: i64 = 50;

    /// Snake presentation timers (ticks)
    pub const SHAKE_TICKS: u32 = 10;
    pub const GLOW_FADE_PER_TICK: f32 = 0.05;

    /// Shooter field (pixels)
    pub const CANVAS_W: f32 = 600.0;
    pub const CANVAS_H: f32 = 500.0;
    pub const PLAYER_W: f32 = 36.0;
    pub const PLAYER_H: f32 = 28.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const BULLET_W: f32 = 4.0;
    pub const BULLET_H: f32 = 12.0;
    pub const BULLET_SPEED: f32 = 7.0;
    pub const LETTER_SIZE: f32 = 28.0;
    pub const LETTER_FALL_SPEED: f32 = 1.2;
    pub const ITEM_SIZE: f32 = 24.0;
    pub const ITEM_FALL_SPEED: f32 = 1.0;

    /// Shooter timing (ticks at ~60 Hz)
    pub const FRAME_MS: u64 = 16;
    pub const SHOOT_INTERVAL: u32 = 12;
    pub const SPAWN_INTERVAL: u32 = 45;
    pub const CLEAR_DELAY: u32 = 90;
    pub const HINT_DURATION: u32 = 180;
    pub const INVINCIBLE_DURATION: u32 = 90;

    /// Shooter spawn odds
    pub const CORRECT_RATIO: f64 = 0.35;
    pub const ITEM_SPAWN_CHANCE: f64 = 0.004;

    /// Shooter scoring and lives
    pub const SCORE_CORRECT: i64 = 100;
    pub const SCORE_WRONG: i64 = -50;
    pub const SCORE_ITEM: i64 = 50;
    pub const MAX_LIVES: u8 = 3;
    pub const LIVES_CEILING: u8 = 5;

    /// Particle gravity (added to vy every tick)
    pub const PARTICLE_GRAVITY: f32 = 0.05;

    /// Rejection-sampling cap before falling back to an exhaustive scan
    pub const MAX_SPAWN_ATTEMPTS: u32 = 64;
}
