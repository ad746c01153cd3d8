//! Grid snake round: classic food and spelling-by-eating
//!
//! Per tick: commit the buffered turn, move the head, resolve wall/self/food
//! collisions, score, respawn food, evaluate the phase, advance particles.

use std::sync::Arc;
use std::time::Duration;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::cell_hit;
use super::difficulty::tick_interval;
use super::grid::{Direction, GridPos, Snake};
use super::ledger::{ScoreEvent, ScoreLedger};
use super::particles::{
    PALETTE_CONFETTI, PALETTE_CORRECT, PALETTE_WRONG, ParticleSystem, RING_BURST,
};
use super::spawn::{spawn_letter_foods, spawn_plain_food};
use super::state::{FatalCause, Food, GameEvent, Phase};
use super::tick::{Game, TickReport};
use crate::config::{Puzzle, SnakeConfig, SnakeMode};
use crate::consts::{GLOW_FADE_PER_TICK, SHAKE_TICKS};
use crate::error::Result;

/// Input for one snake tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnakeInput {
    /// Requested direction, if any key was pressed since the last tick
    pub turn: Option<Direction>,
}

impl SnakeInput {
    pub fn turn(dir: Direction) -> Self {
        Self { turn: Some(dir) }
    }
}

/// Complete snake round state
#[derive(Debug, Clone, Serialize)]
pub struct SnakeRound {
    #[serde(skip)]
    config: Arc<SnakeConfig>,
    #[serde(skip)]
    rng: Pcg32,
    #[serde(skip)]
    alphabet: Vec<char>,
    pub mode: SnakeMode,
    pub snake: Snake,
    pub foods: Vec<Food>,
    /// Index into the puzzle list (spelling only)
    pub puzzle_index: usize,
    /// Next answer position to eat
    pub letter_index: usize,
    pub eaten: Vec<char>,
    pub level: u32,
    pub phase: Phase,
    ledger: ScoreLedger,
    pub time_ticks: u64,
    /// Screen shake ticks left after a crash
    pub shake_ticks: u32,
    /// Board glow after a correct letter, fades to 0
    pub glow: f32,
    pub particles: ParticleSystem,
}

impl SnakeRound {
    /// Validate `config` and build the first round
    pub fn new(config: SnakeConfig) -> Result<Self> {
        config.validate()?;
        let rng = Pcg32::seed_from_u64(config.seed);
        Self::fresh(Arc::new(config), rng)
    }

    fn fresh(config: Arc<SnakeConfig>, rng: Pcg32) -> Result<Self> {
        let start = GridPos::from(config.start);
        let mut round = Self {
            alphabet: config.alphabet.chars().collect(),
            mode: config.mode,
            snake: Snake::new(start, Direction::Right),
            foods: Vec::new(),
            puzzle_index: 0,
            letter_index: 0,
            eaten: Vec::new(),
            level: 1,
            phase: Phase::Playing,
            ledger: ScoreLedger::new(),
            time_ticks: 0,
            shake_ticks: 0,
            glow: 0.0,
            particles: ParticleSystem::new(),
            config,
            rng,
        };
        round.foods = round.spawn_foods()?;
        log::info!(
            "Snake round started: mode={}, grid={}x{}",
            round.mode.as_str(),
            round.config.grid_width,
            round.config.grid_height
        );
        Ok(round)
    }

    pub fn config(&self) -> &SnakeConfig {
        &self.config
    }

    pub fn score(&self) -> i64 {
        self.ledger.score()
    }

    pub fn puzzle(&self) -> Option<&Puzzle> {
        match self.mode {
            SnakeMode::Classic => None,
            SnakeMode::Spelling => self.config.puzzles.get(self.puzzle_index),
        }
    }

    /// Letter the snake must eat next
    pub fn target_letter(&self) -> Option<char> {
        self.puzzle()
            .and_then(|p| p.answer.chars().nth(self.letter_index))
    }

    fn spawn_foods(&mut self) -> Result<Vec<Food>> {
        let (w, h) = (self.config.grid_width, self.config.grid_height);
        match self.target_letter() {
            Some(target) => spawn_letter_foods(
                &mut self.rng,
                w,
                h,
                self.snake.cells(),
                target,
                self.config.food_count,
                &self.alphabet,
            ),
            None if self.mode == SnakeMode::Classic => {
                Ok(vec![spawn_plain_food(&mut self.rng, w, h, self.snake.cells())?])
            }
            None => Ok(Vec::new()),
        }
    }

    /// Load `index` without a delay, keeping the body
    fn advance_puzzle(&mut self, index: usize) -> Result<()> {
        self.puzzle_index = index;
        self.letter_index = 0;
        self.eaten.clear();
        self.glow = 0.0;
        self.shake_ticks = 0;
        self.level += 1;
        self.foods = self.spawn_foods()?;
        log::info!(
            "Puzzle {} loaded at level {} (tick {}ms)",
            index + 1,
            self.level,
            self.tick_interval().as_millis()
        );
        Ok(())
    }

    fn cell_center(&self, pos: GridPos) -> Vec2 {
        pos.center(self.config.cell_size)
    }

    fn fail(&mut self, cause: FatalCause, events: &mut Vec<GameEvent>) {
        self.phase = Phase::GameOver;
        self.shake_ticks = SHAKE_TICKS;
        events.push(GameEvent::CollisionFatal { cause });
        events.push(GameEvent::GameOver);
        log::info!("Game over ({cause:?}) with score {}", self.score());
    }

    fn move_snake(&mut self, events: &mut Vec<GameEvent>) -> Result<()> {
        let head = self.snake.next_head();
        if !head.in_bounds(self.config.grid_width, self.config.grid_height) {
            self.fail(FatalCause::Wall, events);
            return Ok(());
        }
        if self.snake.contains(head) {
            self.fail(FatalCause::SelfCollision, events);
            return Ok(());
        }

        self.snake.push_head(head);
        let Some(idx) = cell_hit(head, self.foods.iter().map(|f| &f.pos)) else {
            self.snake.pop_tail();
            return Ok(());
        };

        match self.mode {
            SnakeMode::Classic => {
                self.ledger.apply(ScoreEvent::FoodEaten);
                events.push(GameEvent::FoodEaten { pos: head });
                self.foods = self.spawn_foods()?;
                Ok(())
            }
            SnakeMode::Spelling => self.eat_letter(idx, head, events),
        }
    }

    fn eat_letter(&mut self, idx: usize, head: GridPos, events: &mut Vec<GameEvent>) -> Result<()> {
        let food = self.foods.remove(idx);
        let center = self.cell_center(head);
        let (Some(letter), Some(target)) = (food.letter, self.target_letter()) else {
            return Ok(());
        };

        if letter != target {
            // Length is preserved on a wrong bite
            self.snake.pop_tail();
            self.particles
                .burst(&mut self.rng, center, &PALETTE_WRONG, 20, RING_BURST);
            events.push(GameEvent::AteWrong { letter });
            self.fail(FatalCause::WrongLetter, events);
            return Ok(());
        }

        let position = self.letter_index;
        self.letter_index += 1;
        self.eaten.push(letter);
        self.ledger.apply(ScoreEvent::GridLetter);
        self.glow = 0.8;
        self.particles
            .burst(&mut self.rng, center, &PALETTE_CORRECT, 12, RING_BURST);
        events.push(GameEvent::AteCorrect { letter, position });

        let answer_len = self.puzzle().map_or(0, |p| p.answer.chars().count());
        if self.letter_index < answer_len {
            self.foods = self.spawn_foods()?;
            return Ok(());
        }

        self.ledger.apply(ScoreEvent::WordBonus);
        events.push(GameEvent::WordComplete {
            puzzle: self.puzzle_index,
        });
        let board = Vec2::new(
            self.config.grid_width as f32,
            self.config.grid_height as f32,
        ) * self.config.cell_size;
        for _ in 0..3 {
            let origin = Vec2::new(
                self.rng.random::<f32>() * board.x,
                self.rng.random::<f32>() * board.y,
            );
            self.particles
                .burst(&mut self.rng, origin, &PALETTE_CONFETTI, 8, RING_BURST);
        }

        let next = self.puzzle_index + 1;
        if next >= self.config.puzzles.len() {
            self.phase = Phase::Victory;
            self.foods.clear();
            events.push(GameEvent::Victory);
            log::info!("All puzzles spelled, final score {}", self.score());
        } else {
            self.advance_puzzle(next)?;
            events.push(GameEvent::LevelUp { level: self.level });
            events.push(GameEvent::PuzzleAdvanced { puzzle: next });
        }
        Ok(())
    }
}

impl Game for SnakeRound {
    type Input = SnakeInput;

    fn tick(&mut self, input: &SnakeInput) -> Result<TickReport> {
        self.time_ticks += 1;
        let mut events = Vec::new();

        // Presentation timers
        self.glow = (self.glow - GLOW_FADE_PER_TICK).max(0.0);
        self.shake_ticks = self.shake_ticks.saturating_sub(1);

        if self.phase == Phase::Playing {
            if let Some(dir) = input.turn {
                if !self.snake.steer(dir) {
                    log::warn!(
                        "Ignored reversal {dir:?} while heading {:?}",
                        self.snake.direction()
                    );
                }
            }
            self.move_snake(&mut events)?;
        }

        self.particles.advance();

        Ok(TickReport {
            tick: self.time_ticks,
            events,
            next_delay: self.tick_interval(),
        })
    }

    fn phase(&self) -> Phase {
        self.phase
    }

    fn score(&self) -> i64 {
        self.ledger.score()
    }

    fn level(&self) -> u32 {
        self.level
    }

    fn tick_interval(&self) -> Duration {
        tick_interval(self.level, &self.config.timing)
    }

    fn restart(&mut self) -> Result<()> {
        let rng = self.rng.clone();
        *self = Self::fresh(Arc::clone(&self.config), rng)?;
        Ok(())
    }

    fn clear_one_shot(input: &mut SnakeInput) {
        input.turn = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::sim::tick::step;
    use proptest::prelude::*;

    fn spelling(answers: &[&str]) -> SnakeRound {
        let puzzles = answers.iter().map(|a| Puzzle::new("hint", *a)).collect();
        SnakeRound::new(SnakeConfig::default().with_seed(42).with_puzzles(puzzles)).unwrap()
    }

    /// Put a single letter directly ahead of the head
    fn place_ahead(round: &mut SnakeRound, letter: char) {
        let pos = round.snake.peek_head(round.snake.direction());
        let correct = round.target_letter() == Some(letter);
        round.foods = vec![Food::letter(pos, letter, correct)];
    }

    #[test]
    fn spells_cat_and_moves_on() {
        let mut round = spelling(&["CAT", "DOG"]);
        assert_eq!(round.snake.head(), GridPos::new(12, 12));
        assert_eq!(round.tick_interval(), Duration::from_millis(150));

        let mut all_events = Vec::new();
        for letter in ['C', 'A', 'T'] {
            place_ahead(&mut round, letter);
            let report = round.tick(&SnakeInput::default()).unwrap();
            assert_eq!(round.phase, Phase::Playing);
            all_events.extend(report.events);
        }

        assert_eq!(round.score(), 80);
        assert_eq!(round.level, 2);
        assert_eq!(round.puzzle_index, 1);
        assert_eq!(round.letter_index, 0);
        assert!(round.eaten.is_empty());
        assert_eq!(round.snake.len(), 4);
        assert_eq!(round.snake.head(), GridPos::new(15, 12));
        assert_eq!(round.target_letter(), Some('D'));
        assert_eq!(round.tick_interval(), Duration::from_millis(145));
        assert!(all_events.contains(&GameEvent::WordComplete { puzzle: 0 }));
        assert!(all_events.contains(&GameEvent::LevelUp { level: 2 }));
        assert!(!all_events.contains(&GameEvent::GameOver));
        // Fresh food for the new word
        assert_eq!(round.foods.iter().filter(|f| f.correct).count(), 1);
        assert!(round.foods.iter().all(|f| !round.snake.contains(f.pos)));
    }

    #[test]
    fn wrong_letter_ends_the_round() {
        let mut round = spelling(&["DOG", "CAT"]);
        for letter in ['D', 'O'] {
            place_ahead(&mut round, letter);
            round.tick(&SnakeInput::default()).unwrap();
            assert_eq!(round.phase, Phase::Playing);
        }
        let len = round.snake.len();
        place_ahead(&mut round, 'X');
        let report = round.tick(&SnakeInput::default()).unwrap();

        assert_eq!(round.phase, Phase::GameOver);
        assert_eq!(round.eaten, vec!['D', 'O']);
        assert_eq!(round.score(), 20);
        assert_eq!(round.snake.len(), len);
        assert!(report.events.contains(&GameEvent::AteWrong { letter: 'X' }));
        assert!(report.events.contains(&GameEvent::CollisionFatal {
            cause: FatalCause::WrongLetter
        }));
        assert_eq!(round.shake_ticks, SHAKE_TICKS);
    }

    #[test]
    fn last_word_is_victory() {
        let mut round = spelling(&["OX"]);
        for letter in ['O', 'X'] {
            place_ahead(&mut round, letter);
            round.tick(&SnakeInput::default()).unwrap();
        }
        assert_eq!(round.phase, Phase::Victory);
        assert_eq!(round.score(), 70);
        assert!(round.foods.is_empty());

        // Terminal: nothing moves any more
        let head = round.snake.head();
        let report = round.tick(&SnakeInput::turn(Direction::Up)).unwrap();
        assert!(report.events.is_empty());
        assert_eq!(round.snake.head(), head);
    }

    #[test]
    fn wall_collision_keeps_score() {
        let mut config = SnakeConfig::default().with_seed(3);
        config.start = (24, 5);
        let mut round = SnakeRound::new(config).unwrap();
        round.foods.clear();
        let before = round.score();
        let report = round.tick(&SnakeInput::default()).unwrap();
        assert_eq!(round.phase, Phase::GameOver);
        assert_eq!(round.score(), before);
        assert!(report.events.contains(&GameEvent::CollisionFatal {
            cause: FatalCause::Wall
        }));

        let mut config = SnakeConfig::default().with_seed(3);
        config.start = (0, 5);
        let mut round = SnakeRound::new(config).unwrap();
        round.foods.clear();
        round.tick(&SnakeInput::turn(Direction::Up)).unwrap();
        round.tick(&SnakeInput::turn(Direction::Left)).unwrap();
        assert_eq!(round.phase, Phase::GameOver);
    }

    #[test]
    fn self_collision() {
        let mut round = spelling(&["CAT"]);
        round.foods.clear();
        round.snake = Snake::from_cells(
            [
                GridPos::new(5, 5),
                GridPos::new(4, 5),
                GridPos::new(4, 6),
                GridPos::new(5, 6),
                GridPos::new(6, 6),
            ],
            Direction::Right,
        );
        round.tick(&SnakeInput::turn(Direction::Down)).unwrap();
        assert_eq!(round.phase, Phase::GameOver);
    }

    #[test]
    fn reversal_input_is_ignored() {
        let mut round = spelling(&["CAT"]);
        round.foods.clear();
        round.tick(&SnakeInput::turn(Direction::Left)).unwrap();
        assert_eq!(round.phase, Phase::Playing);
        assert_eq!(round.snake.head(), GridPos::new(13, 12));
    }

    #[test]
    fn classic_food_grows_and_scores() {
        let mut round = SnakeRound::new(SnakeConfig::classic().with_seed(9)).unwrap();
        assert_eq!(round.foods.len(), 1);
        assert_eq!(round.tick_interval(), Duration::from_millis(120));
        let ahead = round.snake.peek_head(Direction::Right);
        round.foods = vec![Food::plain(ahead)];

        let report = round.tick(&SnakeInput::default()).unwrap();
        assert_eq!(report.events, vec![GameEvent::FoodEaten { pos: ahead }]);
        assert_eq!(round.score(), 10);
        assert_eq!(round.snake.len(), 2);
        assert_eq!(round.foods.len(), 1);
        assert!(!round.snake.contains(round.foods[0].pos));
        assert_eq!(round.level, 1);
    }

    #[test]
    fn step_leaves_input_untouched() {
        let round = spelling(&["CAT"]);
        let (next, report) = step(&round, &SnakeInput::turn(Direction::Down)).unwrap();
        assert_eq!(round.time_ticks, 0);
        assert_eq!(round.snake.head(), GridPos::new(12, 12));
        assert_eq!(next.time_ticks, 1);
        assert_eq!(report.tick, 1);
        assert_eq!(next.snake.head(), GridPos::new(12, 13));
    }

    #[test]
    fn same_seed_same_run() {
        let inputs = [
            SnakeInput::turn(Direction::Down),
            SnakeInput::default(),
            SnakeInput::turn(Direction::Left),
            SnakeInput::default(),
        ];
        let mut a = spelling(&["CAT", "DOG"]);
        let mut b = spelling(&["CAT", "DOG"]);
        for input in &inputs {
            a.tick(input).unwrap();
            b.tick(input).unwrap();
        }
        assert_eq!(a.foods, b.foods);
        assert_eq!(a.snake.head(), b.snake.head());
    }

    #[test]
    fn restart_resets_round() {
        let mut round = spelling(&["CAT", "DOG"]);
        round.foods.clear();
        for _ in 0..20 {
            round.tick(&SnakeInput::default()).unwrap();
        }
        assert_eq!(round.phase, Phase::GameOver);
        round.restart().unwrap();
        assert_eq!(round.phase, Phase::Playing);
        assert_eq!(round.score(), 0);
        assert_eq!(round.level, 1);
        assert_eq!(round.snake.len(), 1);
        assert_eq!(round.foods.len(), 3);
    }

    #[test]
    fn board_too_small_for_foods() {
        let mut config = SnakeConfig::default();
        config.grid_width = 2;
        config.grid_height = 1;
        config.start = (0, 0);
        let err = SnakeRound::new(config).unwrap_err();
        assert!(matches!(err, EngineError::InvariantViolation { .. }));
    }

    proptest! {
        #[test]
        fn length_grows_only_on_matching_bites(
            seed in any::<u64>(),
            turns in proptest::collection::vec(proptest::option::of(0usize..4), 1..200),
        ) {
            let config = SnakeConfig::default()
                .with_seed(seed)
                .with_puzzles(vec![Puzzle::new("a", "ABCDEFGHIJ"), Puzzle::new("b", "KLMNOP")]);
            let mut round = SnakeRound::new(config).unwrap();
            for turn in turns {
                let input = SnakeInput { turn: turn.map(|i| Direction::ALL[i]) };
                let before = round.snake.len();
                let report = round.tick(&input).unwrap();
                let after = round.snake.len();
                let grew = report.events.iter().any(|e| matches!(e, GameEvent::AteCorrect { .. }));
                if grew {
                    prop_assert_eq!(after, before + 1);
                } else {
                    prop_assert_eq!(after, before);
                }
                for food in &round.foods {
                    prop_assert!(!round.snake.contains(food.pos));
                }
                if round.phase.is_terminal() {
                    break;
                }
            }
        }
    }
}
