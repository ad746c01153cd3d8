//! Presentational particles
//!
//! Particles never feed back into gameplay. They keep animating in every
//! phase, including terminal ones.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::PARTICLE_GRAVITY;

/// Maximum live particles
pub const MAX_PARTICLES: usize = 256;

/// Snake correct-letter sparkle
pub const PALETTE_CORRECT: [u32; 4] = [0x44ff44, 0x88ff88, 0xffff44, 0xffdd00];
/// Snake wrong-letter burst
pub const PALETTE_WRONG: [u32; 4] = [0xff4444, 0xff6666, 0xff0000, 0xcc0000];
/// Word complete confetti
pub const PALETTE_CONFETTI: [u32; 6] = [0xff4444, 0x44ff44, 0x4444ff, 0xffff44, 0xff44ff, 0x44ffff];
pub const PALETTE_SHOT_CORRECT: [u32; 1] = [0x3fb950];
pub const PALETTE_SHOT_WRONG: [u32; 1] = [0xf85149];
pub const PALETTE_HINT: [u32; 1] = [0xa855f7];
pub const PALETTE_LIFE: [u32; 1] = [0xec4899];

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: u32,
    /// Ticks left
    pub life: f32,
    /// Starting budget, for alpha/size falloff
    pub max_life: f32,
    pub size: f32,
}

impl Particle {
    /// Fade factor in [0, 1]
    pub fn alpha(&self) -> f32 {
        (self.life / self.max_life).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BurstShape {
    /// Evenly spaced angles with a little jitter
    Ring,
    /// Uniformly random angles
    Scatter,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BurstSpec {
    pub shape: BurstShape,
    pub life_min: f32,
    pub life_jitter: f32,
    pub max_life: f32,
}

/// Grid games: 30-50 tick ring
pub const RING_BURST: BurstSpec = BurstSpec {
    shape: BurstShape::Ring,
    life_min: 30.0,
    life_jitter: 20.0,
    max_life: 50.0,
};

/// Shooter: 20-35 tick scatter
pub const SCATTER_BURST: BurstSpec = BurstSpec {
    shape: BurstShape::Scatter,
    life_min: 20.0,
    life_jitter: 15.0,
    max_life: 35.0,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Emit `count` particles from `origin`. Silently truncated at
    /// `MAX_PARTICLES`.
    pub fn burst<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        origin: Vec2,
        palette: &[u32],
        count: usize,
        spec: BurstSpec,
    ) {
        if palette.is_empty() {
            return;
        }
        for i in 0..count {
            if self.particles.len() >= MAX_PARTICLES {
                break;
            }
            let angle = match spec.shape {
                BurstShape::Ring => {
                    TAU * i as f32 / count as f32 + (rng.random::<f32>() - 0.5) * 0.5
                }
                BurstShape::Scatter => rng.random::<f32>() * TAU,
            };
            let speed = 1.0 + rng.random::<f32>() * 3.0;
            self.particles.push(Particle {
                pos: origin,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                life: spec.life_min + rng.random::<f32>() * spec.life_jitter,
                max_life: spec.max_life,
                color: palette[rng.random_range(0..palette.len())],
                size: 2.0 + rng.random::<f32>() * 3.0,
            });
        }
    }

    /// Advance one tick and drop expired particles
    pub fn advance(&mut self) {
        for particle in self.particles.iter_mut() {
            particle.pos += particle.vel;
            particle.vel.y += PARTICLE_GRAVITY;
            particle.life -= 1.0;
        }
        self.particles.retain(|p| p.life > 0.0);
    }
}
