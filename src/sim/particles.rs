//! Cosmetic particle bursts
//!
//! Particles never feed back into gameplay; they draw from their own RNG stream.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::surface::Rgb;

/// Maximum live particles
pub const MAX_PARTICLES: usize = 256;

/// Downward pull on particles per tick
const PARTICLE_GRAVITY: f32 = 0.1;

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: Rgb,
    /// Ticks left
    pub life: u32,
    pub max_life: u32,
}

impl Particle {
    /// Remaining life in [0, 1], for fading
    pub fn alpha(&self) -> f32 {
        if self.max_life == 0 {
            0.0
        } else {
            self.life as f32 / self.max_life as f32
        }
    }
}

/// Spawn `count` particles flying out of `origin`, biased upward
pub fn burst<R: Rng>(
    particles: &mut Vec<Particle>,
    rng: &mut R,
    origin: Vec2,
    color: Rgb,
    count: usize,
) {
    for _ in 0..count {
        if particles.len() >= MAX_PARTICLES {
            break;
        }
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        let speed: f32 = rng.random_range(2.0..=8.0);
        let vel = Vec2::new(angle.cos(), angle.sin()) * speed - Vec2::new(0.0, 2.0);
        let life: u32 = rng.random_range(30..=60);
        particles.push(Particle {
            pos: origin,
            vel,
            color,
            life,
            max_life: life,
        });
    }
}

/// Advance all particles one tick and drop the expired ones
pub fn update(particles: &mut Vec<Particle>) {
    particles.retain(|p| p.life > 0);
    for p in particles.iter_mut() {
        p.pos += p.vel;
        p.vel.y += PARTICLE_GRAVITY;
        p.life -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::surface::GREEN;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_burst_and_decay() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut particles = Vec::new();
        burst(&mut particles, &mut rng, Vec2::new(100.0, 100.0), GREEN, 5);
        assert_eq!(particles.len(), 5);
        assert!(particles.iter().all(|p| (30..=60).contains(&p.life)));

        for _ in 0..62 {
            update(&mut particles);
        }
        assert!(particles.is_empty());
    }

    #[test]
    fn test_burst_respects_cap() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut particles = Vec::new();
        burst(&mut particles, &mut rng, Vec2::ZERO, GREEN, MAX_PARTICLES + 50);
        assert_eq!(particles.len(), MAX_PARTICLES);
    }

    #[test]
    fn test_alpha_fades() {
        let p = Particle {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            color: GREEN,
            life: 15,
            max_life: 30,
        };
        assert_eq!(p.alpha(), 0.5);
    }
}
