//! Word shooter round
//!
//! Letters fall; the player shoots the ones the answer still needs, in any
//! order. Resolution order per tick is bullets vs items, bullets vs letters,
//! then letters vs player. Anything consumed in one pass is gone for the
//! next.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::difficulty::tick_interval;
use super::ledger::{Lives, ScoreEvent, ScoreLedger};
use super::particles::{
    PALETTE_HINT, PALETTE_LIFE, PALETTE_SHOT_CORRECT, PALETTE_SHOT_WRONG, ParticleSystem,
    SCATTER_BURST,
};
use super::spawn::{pick_falling_letter, pick_item_kind, random_column, shuffled};
use super::state::{Bullet, FallingLetter, FatalCause, GameEvent, Item, ItemKind, Phase};
use super::tick::{Game, TickReport};
use crate::config::{Puzzle, ShooterConfig};
use crate::error::Result;

/// Letter tints, picked at random per letter
pub const LETTER_COLORS: [u32; 8] = [
    0x3fb950, 0xfbbf24, 0xf97583, 0x58a6ff, 0xa855f7, 0xff7b72, 0x79c0ff, 0xd2a8ff,
];

/// Held inputs for one shooter tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShooterInput {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

/// Complete shooter round state
#[derive(Debug, Clone, Serialize)]
pub struct ShooterRound {
    #[serde(skip)]
    config: Arc<ShooterConfig>,
    #[serde(skip)]
    rng: Pcg32,
    #[serde(skip)]
    alphabet: Vec<char>,
    /// Play order (indices into the configured puzzles)
    pub order: Vec<usize>,
    /// Position in `order`
    pub cursor: usize,
    pub answer: Vec<char>,
    /// One flag per answer position
    pub collected: Vec<bool>,
    pub correct_queue: VecDeque<char>,
    pub player_x: f32,
    pub bullets: Vec<Bullet>,
    pub letters: Vec<FallingLetter>,
    pub items: Vec<Item>,
    pub particles: ParticleSystem,
    pub phase: Phase,
    ledger: ScoreLedger,
    pub lives: Lives,
    pub level: u32,
    pub spawn_timer: u32,
    pub shoot_cooldown: u32,
    pub clear_timer: u32,
    pub hint_timer: u32,
    pub invincible_timer: u32,
    /// Hint text while a hint item is active
    pub hint: Option<String>,
    pub time_ticks: u64,
    next_id: u32,
}

impl ShooterRound {
    /// Validate `config` and build the first round
    pub fn new(config: ShooterConfig) -> Result<Self> {
        config.validate()?;
        let rng = Pcg32::seed_from_u64(config.seed);
        Ok(Self::fresh(Arc::new(config), rng))
    }

    fn fresh(config: Arc<ShooterConfig>, mut rng: Pcg32) -> Self {
        let mut order: Vec<usize> = (0..config.puzzles.len()).collect();
        if config.shuffle_puzzles {
            order = shuffled(&mut rng, order);
        }
        let lives = Lives::new(config.max_lives, config.lives_ceiling);
        let mut round = Self {
            alphabet: config.alphabet.chars().collect(),
            order,
            cursor: 0,
            answer: Vec::new(),
            collected: Vec::new(),
            correct_queue: VecDeque::new(),
            player_x: config.canvas_width / 2.0,
            bullets: Vec::new(),
            letters: Vec::new(),
            items: Vec::new(),
            particles: ParticleSystem::new(),
            phase: Phase::Playing,
            ledger: ScoreLedger::new(),
            lives,
            level: 1,
            spawn_timer: 0,
            shoot_cooldown: 0,
            clear_timer: 0,
            hint_timer: 0,
            invincible_timer: 0,
            hint: None,
            time_ticks: 0,
            next_id: 1,
            config,
            rng,
        };
        round.start_puzzle(0);
        log::info!("Shooter round started with {} puzzles", round.order.len());
        round
    }

    pub fn config(&self) -> &ShooterConfig {
        &self.config
    }

    pub fn score(&self) -> i64 {
        self.ledger.score()
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.config.puzzles[self.order[self.cursor]]
    }

    /// Reset everything puzzle-scoped; score, lives and level stay
    fn start_puzzle(&mut self, cursor: usize) {
        self.cursor = cursor;
        self.answer = self.puzzle().letters();
        self.collected = vec![false; self.answer.len()];
        self.correct_queue = shuffled(&mut self.rng, self.answer.clone()).into();
        self.player_x = self.config.canvas_width / 2.0;
        self.bullets.clear();
        self.letters.clear();
        self.items.clear();
        self.particles.clear();
        self.phase = Phase::Playing;
        self.spawn_timer = 0;
        self.shoot_cooldown = 0;
        self.clear_timer = 0;
        self.hint_timer = 0;
        self.invincible_timer = 0;
        self.hint = None;
    }

    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Does some uncollected position still want `ch`?
    pub fn is_needed(&self, ch: char) -> bool {
        self.answer
            .iter()
            .zip(&self.collected)
            .any(|(c, done)| *c == ch && !done)
    }

    fn needed_letters(&self) -> HashSet<char> {
        self.answer
            .iter()
            .zip(&self.collected)
            .filter(|(_, done)| !**done)
            .map(|(c, _)| *c)
            .collect()
    }

    fn requeue_if_needed(&mut self, ch: char) -> bool {
        if self.is_needed(ch) {
            self.correct_queue.push_back(ch);
            true
        } else {
            false
        }
    }

    pub fn player_box(&self) -> Aabb {
        let c = &self.config;
        Aabb::new(
            Vec2::new(self.player_x, c.canvas_height - 4.0 - c.player_height / 2.0),
            Vec2::new(c.player_width, c.player_height),
        )
    }

    pub fn bullet_box(&self, bullet: &Bullet) -> Aabb {
        Aabb::new(
            bullet.pos,
            Vec2::new(self.config.bullet_width, self.config.bullet_height),
        )
    }

    pub fn letter_box(&self, letter: &FallingLetter) -> Aabb {
        Aabb::square(letter.pos, self.config.letter_size)
    }

    pub fn item_box(&self, item: &Item) -> Aabb {
        Aabb::square(item.pos, self.config.item_size)
    }

    fn burst(&mut self, origin: Vec2, palette: &[u32], count: usize) {
        self.particles
            .burst(&mut self.rng, origin, palette, count, SCATTER_BURST);
    }

    fn lose_life(&mut self, events: &mut Vec<GameEvent>) {
        if self.lives.is_out() {
            return;
        }
        let out = self.lives.lose();
        events.push(GameEvent::LifeLost {
            remaining: self.lives.current(),
        });
        if out {
            self.phase = Phase::GameOver;
            events.push(GameEvent::CollisionFatal {
                cause: FatalCause::OutOfLives,
            });
            events.push(GameEvent::GameOver);
            log::info!("Out of lives with score {}", self.score());
        }
    }

    fn tick_playing(&mut self, input: &ShooterInput, events: &mut Vec<GameEvent>) -> Result<()> {
        let config = Arc::clone(&self.config);

        // Player
        let half = config.player_width / 2.0;
        if input.left {
            self.player_x = (self.player_x - config.player_speed).max(half);
        }
        if input.right {
            self.player_x = (self.player_x + config.player_speed).min(config.canvas_width - half);
        }

        // Shooting
        self.shoot_cooldown = self.shoot_cooldown.saturating_sub(1);
        if input.fire && self.shoot_cooldown == 0 {
            let id = self.next_entity_id();
            self.bullets.push(Bullet {
                id,
                pos: Vec2::new(
                    self.player_x,
                    config.canvas_height - config.player_height - 8.0,
                ),
            });
            self.shoot_cooldown = config.shoot_interval;
            events.push(GameEvent::Shot);
        }

        for bullet in &mut self.bullets {
            bullet.pos.y -= config.bullet_speed;
        }
        self.bullets.retain(|b| b.pos.y >= -config.bullet_height);

        // Letter spawn
        self.spawn_timer += 1;
        if self.spawn_timer >= config.spawn_interval {
            self.spawn_timer = 0;
            self.spawn_letter()?;
        }

        // Item spawn
        if self.rng.random_bool(config.item_spawn_chance) {
            if let Some(kind) = pick_item_kind(&mut self.rng, &self.lives, self.hint_timer > 0) {
                let x = random_column(&mut self.rng, config.canvas_width, config.item_size);
                let id = self.next_entity_id();
                self.items.push(Item {
                    id,
                    pos: Vec2::new(x, -config.item_size),
                    kind,
                });
                log::debug!("Spawned {kind:?} item at x={x:.0}");
            }
        }

        for item in &mut self.items {
            item.pos.y += config.item_fall_speed;
        }
        self.items
            .retain(|it| it.pos.y <= config.canvas_height + config.item_size);

        // Hint display
        self.hint_timer = self.hint_timer.saturating_sub(1);
        if self.hint_timer == 0 {
            self.hint = None;
        }

        // Letters fall; misses go back on the queue
        for letter in &mut self.letters {
            letter.pos.y += config.letter_fall_speed;
        }
        let (gone, falling): (Vec<_>, Vec<_>) = std::mem::take(&mut self.letters)
            .into_iter()
            .partition(|l| l.pos.y > config.canvas_height + config.letter_size);
        self.letters = falling;
        for letter in gone {
            let requeued = self.requeue_if_needed(letter.ch);
            events.push(GameEvent::LetterMissed {
                letter: letter.ch,
                requeued,
            });
        }

        self.invincible_timer = self.invincible_timer.saturating_sub(1);

        self.resolve_bullet_items(events);
        self.resolve_bullet_letters(events);
        if self.phase == Phase::Playing && self.invincible_timer == 0 {
            self.resolve_player_hit(events);
        }
        Ok(())
    }

    fn spawn_letter(&mut self) -> Result<()> {
        let needed = self.needed_letters();
        let (ch, from_queue) = pick_falling_letter(
            &mut self.rng,
            &mut self.correct_queue,
            self.config.correct_ratio,
            &self.alphabet,
            &needed,
        )?;
        let x = random_column(&mut self.rng, self.config.canvas_width, self.config.letter_size);
        let color = LETTER_COLORS[self.rng.random_range(0..LETTER_COLORS.len())];
        let id = self.next_entity_id();
        self.letters.push(FallingLetter {
            id,
            pos: Vec2::new(x, -self.config.letter_size),
            ch,
            needed: from_queue,
            color,
        });
        Ok(())
    }

    fn resolve_bullet_items(&mut self, events: &mut Vec<GameEvent>) {
        let mut b = 0;
        while b < self.bullets.len() {
            let bbox = self.bullet_box(&self.bullets[b]);
            let hit = self
                .items
                .iter()
                .position(|it| self.item_box(it).overlaps(&bbox));
            let Some(i) = hit else {
                b += 1;
                continue;
            };
            self.bullets.remove(b);
            let item = self.items.remove(i);
            self.collect_item(&item, events);
        }
    }

    fn collect_item(&mut self, item: &Item, events: &mut Vec<GameEvent>) {
        self.ledger.apply(ScoreEvent::ItemPickup);
        match item.kind {
            ItemKind::Hint => {
                self.hint = Some(self.puzzle().hint.clone());
                self.hint_timer = self.config.hint_duration;
                self.burst(item.pos, &PALETTE_HINT, 10);
            }
            ItemKind::Life => {
                self.lives.gain();
                self.burst(item.pos, &PALETTE_LIFE, 10);
            }
        }
        events.push(GameEvent::ItemCollected { kind: item.kind });
    }

    fn resolve_bullet_letters(&mut self, events: &mut Vec<GameEvent>) {
        let mut b = 0;
        while b < self.bullets.len() && self.phase == Phase::Playing {
            let bbox = self.bullet_box(&self.bullets[b]);
            let hit = self
                .letters
                .iter()
                .position(|l| self.letter_box(l).overlaps(&bbox));
            let Some(i) = hit else {
                b += 1;
                continue;
            };
            self.bullets.remove(b);
            let letter = self.letters.remove(i);
            self.shoot_letter(&letter, events);
        }
    }

    fn shoot_letter(&mut self, letter: &FallingLetter, events: &mut Vec<GameEvent>) {
        let slot = self
            .answer
            .iter()
            .zip(&self.collected)
            .position(|(c, done)| *c == letter.ch && !done);

        let Some(position) = slot else {
            self.ledger.apply(ScoreEvent::ShotWrong);
            self.burst(letter.pos, &PALETTE_SHOT_WRONG, 8);
            events.push(GameEvent::AteWrong { letter: letter.ch });
            self.lose_life(events);
            return;
        };

        self.collected[position] = true;
        self.ledger.apply(ScoreEvent::ShotCorrect);
        self.burst(letter.pos, &PALETTE_SHOT_CORRECT, 12);
        events.push(GameEvent::AteCorrect {
            letter: letter.ch,
            position,
        });

        if self.collected.iter().all(|c| *c) {
            events.push(GameEvent::WordComplete {
                puzzle: self.cursor,
            });
            if self.cursor + 1 >= self.order.len() {
                self.phase = Phase::AllClear;
                events.push(GameEvent::AllClear);
                log::info!("All puzzles cleared, final score {}", self.score());
            } else {
                self.phase = Phase::Cleared;
                self.clear_timer = self.config.clear_delay;
                events.push(GameEvent::Cleared);
            }
        }
    }

    fn resolve_player_hit(&mut self, events: &mut Vec<GameEvent>) {
        let pbox = self.player_box();
        let hit = self
            .letters
            .iter()
            .position(|l| self.letter_box(l).overlaps(&pbox));
        let Some(i) = hit else {
            return;
        };
        let letter = self.letters.remove(i);
        self.invincible_timer = self.config.invincible_duration;
        self.burst(letter.pos, &PALETTE_SHOT_WRONG, 10);
        let requeued = self.requeue_if_needed(letter.ch);
        events.push(GameEvent::PlayerHit {
            letter: letter.ch,
            requeued,
        });
        self.lose_life(events);
    }

    fn advance_puzzle(&mut self, events: &mut Vec<GameEvent>) {
        let next = self.cursor + 1;
        self.level += 1;
        self.start_puzzle(next);
        events.push(GameEvent::LevelUp { level: self.level });
        events.push(GameEvent::PuzzleAdvanced { puzzle: next });
        log::info!(
            "Puzzle {}/{} (score {}, lives {})",
            next + 1,
            self.order.len(),
            self.score(),
            self.lives.current()
        );
    }
}

impl Game for ShooterRound {
    type Input = ShooterInput;

    fn tick(&mut self, input: &ShooterInput) -> Result<TickReport> {
        self.time_ticks += 1;
        let mut events = Vec::new();

        match self.phase {
            Phase::Playing => self.tick_playing(input, &mut events)?,
            Phase::Cleared => {
                self.clear_timer = self.clear_timer.saturating_sub(1);
                if self.clear_timer == 0 {
                    self.advance_puzzle(&mut events);
                }
            }
            _ => {}
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
        tick_interval(self.level, &self.config.timing())
    }

    fn restart(&mut self) -> Result<()> {
        let rng = self.rng.clone();
        *self = Self::fresh(Arc::clone(&self.config), rng);
        Ok(())
    }
}
