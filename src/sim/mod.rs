//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per scheduler fire, no wall time
//! - Seeded RNG only
//! - Stable iteration order (insertion order, ids for shooter entities)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod difficulty;
pub mod grid;
pub mod ledger;
pub mod particles;
pub mod shooter;
pub mod snake;
pub mod spawn;
pub mod state;
pub mod tick;

pub use autopilot::{shooter_intents, snake_intents};
pub use collision::{Aabb, cell_hit};
pub use difficulty::tick_interval;
pub use grid::{Direction, GridPos, Snake};
pub use ledger::{Lives, ScoreEvent, ScoreLedger};
pub use particles::{Particle, ParticleSystem};
pub use shooter::{ShooterInput, ShooterRound};
pub use snake::{SnakeInput, SnakeRound};
pub use state::{Bullet, FallingLetter, FatalCause, Food, GameEvent, Item, ItemKind, Phase};
pub use tick::{Game, TickReport, step};
