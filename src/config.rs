//! Round configuration and puzzle lists
//!
//! Loaded once at startup (JSON) or built from defaults that reproduce the
//! classic arcade tuning. Every round constructor validates its config first.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// A hint and the word it asks for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Puzzle {
    pub hint: String,
    pub answer: String,
}

impl Puzzle {
    pub fn new(hint: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            hint: hint.into(),
            answer: answer.into(),
        }
    }

    /// Answer as an ordered list of required characters
    pub fn letters(&self) -> Vec<char> {
        self.answer.chars().collect()
    }
}

/// Built-in puzzle list used when no file is supplied
pub fn default_puzzles() -> Vec<Puzzle> {
    [
        ("Opposite of night", "DAY"),
        ("A pet that barks", "DOG"),
        ("Frozen water", "ICE"),
        ("Opposite of cold", "HOT"),
        ("You write with this", "PEN"),
        ("A pet that meows", "CAT"),
        ("Comes from a hen", "EGG"),
        ("King of the jungle", "LION"),
        ("You read this", "BOOK"),
        ("It shines at night", "MOON"),
        ("Planet we live on", "EARTH"),
        ("A yellow fruit", "BANANA"),
    ]
    .into_iter()
    .map(|(hint, answer)| Puzzle::new(hint, answer))
    .collect()
}

/// Which grid game a snake round plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SnakeMode {
    /// Plain food, no puzzles
    Classic,
    /// Eat the answer's letters in order
    #[default]
    Spelling,
}

impl SnakeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SnakeMode::Classic => "classic",
            SnakeMode::Spelling => "spelling",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" | "snake" => Some(SnakeMode::Classic),
            "spelling" | "english" => Some(SnakeMode::Spelling),
            _ => None,
        }
    }
}

/// Tick cadence parameters consumed by the difficulty controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingConfig {
    pub base_tick_ms: u64,
    pub tick_decrease_ms: u64,
    pub min_tick_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            base_tick_ms: BASE_TICK_MS,
            tick_decrease_ms: TICK_DECREASE_MS,
            min_tick_ms: MIN_TICK_MS,
        }
    }
}

impl TimingConfig {
    /// Fixed cadence that never speeds up
    pub fn constant(ms: u64) -> Self {
        Self {
            base_tick_ms: ms,
            tick_decrease_ms: 0,
            min_tick_ms: ms,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_tick_ms == 0 {
            return Err(ConfigError::NonPositive {
                field: "base_tick_ms",
            });
        }
        if self.min_tick_ms == 0 {
            return Err(ConfigError::NonPositive {
                field: "min_tick_ms",
            });
        }
        Ok(())
    }
}

/// Grid snake configuration (classic and spelling)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SnakeConfig {
    pub mode: SnakeMode,
    pub grid_width: u32,
    pub grid_height: u32,
    /// Pixel size of one cell, used only to place particles
    pub cell_size: f32,
    /// Head position of a fresh snake
    pub start: (i32, i32),
    /// Foods on the board per letter (one correct, the rest decoys)
    pub food_count: usize,
    pub alphabet: String,
    pub timing: TimingConfig,
    pub seed: u64,
    pub puzzles: Vec<Puzzle>,
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            mode: SnakeMode::Spelling,
            grid_width: GRID_SIZE,
            grid_height: GRID_SIZE,
            cell_size: CELL_SIZE,
            start: SNAKE_START,
            food_count: FOOD_COUNT,
            alphabet: ALPHABET.to_string(),
            timing: TimingConfig::default(),
            seed: 0,
            puzzles: default_puzzles(),
        }
    }
}

impl SnakeConfig {
    /// The classic 20x20 snake with plain food
    pub fn classic() -> Self {
        Self {
            mode: SnakeMode::Classic,
            grid_width: CLASSIC_GRID_SIZE,
            grid_height: CLASSIC_GRID_SIZE,
            cell_size: CLASSIC_CELL_SIZE,
            start: CLASSIC_START,
            food_count: 1,
            timing: TimingConfig::constant(CLASSIC_TICK_MS),
            puzzles: Vec::new(),
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_puzzles(mut self, puzzles: Vec<Puzzle>) -> Self {
        self.puzzles = puzzles;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_width == 0 {
            return Err(ConfigError::NonPositive {
                field: "grid_width",
            });
        }
        if self.grid_height == 0 {
            return Err(ConfigError::NonPositive {
                field: "grid_height",
            });
        }
        if self.cell_size <= 0.0 {
            return Err(ConfigError::NonPositive { field: "cell_size" });
        }
        let (sx, sy) = self.start;
        if sx < 0 || sy < 0 || sx >= self.grid_width as i32 || sy >= self.grid_height as i32 {
            return Err(ConfigError::out_of_range(
                "start",
                format!(
                    "({sx}, {sy}) is outside the {}x{} grid",
                    self.grid_width, self.grid_height
                ),
            ));
        }
        self.timing.validate()?;

        if self.mode == SnakeMode::Spelling {
            if self.food_count == 0 {
                return Err(ConfigError::NonPositive {
                    field: "food_count",
                });
            }
            validate_puzzles(&self.puzzles, &self.alphabet)?;
        }
        Ok(())
    }
}

/// Word shooter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShooterConfig {
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub player_width: f32,
    pub player_height: f32,
    pub player_speed: f32,
    pub bullet_width: f32,
    pub bullet_height: f32,
    pub bullet_speed: f32,
    pub letter_size: f32,
    pub letter_fall_speed: f32,
    pub item_size: f32,
    pub item_fall_speed: f32,
    /// Ticks between shots while fire is held
    pub shoot_interval: u32,
    /// Ticks between letter spawns
    pub spawn_interval: u32,
    /// Ticks the cleared banner holds before the next puzzle
    pub clear_delay: u32,
    pub hint_duration: u32,
    pub invincible_duration: u32,
    /// Chance a spawned letter comes from the correct queue
    pub correct_ratio: f64,
    /// Per-tick chance of an item spawn
    pub item_spawn_chance: f64,
    pub max_lives: u8,
    pub lives_ceiling: u8,
    pub frame_ms: u64,
    pub alphabet: String,
    /// Shuffle puzzle order at the start of every run
    pub shuffle_puzzles: bool,
    pub seed: u64,
    pub puzzles: Vec<Puzzle>,
}

impl Default for ShooterConfig {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_W,
            canvas_height: CANVAS_H,
            player_width: PLAYER_W,
            player_height: PLAYER_H,
            player_speed: PLAYER_SPEED,
            bullet_width: BULLET_W,
            bullet_height: BULLET_H,
            bullet_speed: BULLET_SPEED,
            letter_size: LETTER_SIZE,
            letter_fall_speed: LETTER_FALL_SPEED,
            item_size: ITEM_SIZE,
            item_fall_speed: ITEM_FALL_SPEED,
            shoot_interval: SHOOT_INTERVAL,
            spawn_interval: SPAWN_INTERVAL,
            clear_delay: CLEAR_DELAY,
            hint_duration: HINT_DURATION,
            invincible_duration: INVINCIBLE_DURATION,
            correct_ratio: CORRECT_RATIO,
            item_spawn_chance: ITEM_SPAWN_CHANCE,
            max_lives: MAX_LIVES,
            lives_ceiling: LIVES_CEILING,
            frame_ms: FRAME_MS,
            alphabet: ALPHABET.to_string(),
            shuffle_puzzles: true,
            seed: 0,
            puzzles: default_puzzles(),
        }
    }
}

impl ShooterConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_puzzles(mut self, puzzles: Vec<Puzzle>) -> Self {
        self.puzzles = puzzles;
        self
    }

    /// The shooter runs at a fixed frame rate
    pub fn timing(&self) -> TimingConfig {
        TimingConfig::constant(self.frame_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("canvas_width", self.canvas_width),
            ("canvas_height", self.canvas_height),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("bullet_width", self.bullet_width),
            ("bullet_height", self.bullet_height),
            ("bullet_speed", self.bullet_speed),
            ("letter_size", self.letter_size),
            ("letter_fall_speed", self.letter_fall_speed),
            ("item_size", self.item_size),
            ("item_fall_speed", self.item_fall_speed),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { field });
            }
        }
        if self.spawn_interval == 0 {
            return Err(ConfigError::NonPositive {
                field: "spawn_interval",
            });
        }
        if self.frame_ms == 0 {
            return Err(ConfigError::NonPositive { field: "frame_ms" });
        }
        if self.max_lives == 0 {
            return Err(ConfigError::NonPositive { field: "max_lives" });
        }
        if self.lives_ceiling < self.max_lives {
            return Err(ConfigError::out_of_range(
                "lives_ceiling",
                format!(
                    "ceiling {} is below starting lives {}",
                    self.lives_ceiling, self.max_lives
                ),
            ));
        }
        for (field, p) in [
            ("correct_ratio", self.correct_ratio),
            ("item_spawn_chance", self.item_spawn_chance),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(ConfigError::out_of_range(field, format!("{p} is not a probability")));
            }
        }
        // Letters spawn in [letter_size, width - letter_size)
        if self.canvas_width <= self.letter_size * 2.0
            || self.canvas_width <= self.item_size * 2.0
        {
            return Err(ConfigError::out_of_range(
                "canvas_width",
                "too narrow for falling letters",
            ));
        }
        validate_puzzles(&self.puzzles, &self.alphabet)?;
        // Decoys are drawn from letters no answer position needs
        for (index, puzzle) in self.puzzles.iter().enumerate() {
            if self.alphabet.chars().all(|c| puzzle.answer.contains(c)) {
                return Err(ConfigError::out_of_range(
                    "alphabet",
                    format!("puzzle {index} uses every letter, leaving no decoys"),
                ));
            }
        }
        Ok(())
    }
}

fn validate_puzzles(puzzles: &[Puzzle], alphabet: &str) -> Result<(), ConfigError> {
    if puzzles.is_empty() {
        return Err(ConfigError::EmptyPuzzleList);
    }
    for (index, puzzle) in puzzles.iter().enumerate() {
        if puzzle.answer.is_empty() {
            return Err(ConfigError::EmptyAnswer { index });
        }
        if let Some(ch) = puzzle.answer.chars().find(|c| !alphabet.contains(*c)) {
            return Err(ConfigError::CharacterOutsideAlphabet { index, ch });
        }
    }
    Ok(())
}

/// Parse any config (or a bare puzzle list) from JSON
pub fn from_json_str<T: DeserializeOwned>(json: &str) -> Result<T, ConfigError> {
    serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
}

/// Read and parse a JSON config file
pub fn load<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, ConfigError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::Parse(format!("{}: {e}", path.display())))?;
    let config = from_json_str(&json)?;
    log::info!("Loaded config from {}", path.display());
    Ok(config)
}
