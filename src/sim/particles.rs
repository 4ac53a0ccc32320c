//! Explosion fragments
//!
//! A slice bursts the fruit into a fixed number of fragments that fly out
//! radially, fall under normal gravity and fade linearly over their lifetime.
//! Fragments are visual only and never affect gameplay.

use std::f64::consts::TAU;

use glam::DVec3;
use rand::Rng;

use super::kinematics::Body;
use crate::tuning::Tuning;

/// A single explosion fragment
#[derive(Debug, Clone)]
pub struct Particle {
    pub body: Body,
    /// 0xRRGGBB, inherited from the fruit
    pub color: u32,
    pub size: f64,
    pub created_at_ms: f64,
    pub lifetime_ms: f64,
}

impl Particle {
    pub fn age_ms(&self, now_ms: f64) -> f64 {
        (now_ms - self.created_at_ms).max(0.0)
    }

    /// Linear fade from 1 at birth to 0 at end of life
    pub fn opacity(&self, now_ms: f64) -> f64 {
        (1.0 - self.age_ms(now_ms) / self.lifetime_ms).clamp(0.0, 1.0)
    }

    pub fn is_expired(&self, now_ms: f64) -> bool {
        now_ms - self.created_at_ms > self.lifetime_ms
    }
}

/// Owns every live fragment
#[derive(Debug, Clone, Default)]
pub struct ParticleField {
    pub particles: Vec<Particle>,
}

impl ParticleField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Burst at `origin`, returns the number of fragments created
    pub fn spawn_explosion<R: Rng>(
        &mut self,
        origin: DVec3,
        color: u32,
        now_ms: f64,
        tuning: &Tuning,
        rng: &mut R,
    ) -> usize {
        let count = tuning.explosion_particles;
        self.particles.reserve(count);

        for _ in 0..count {
            let speed = rng.random_range(tuning.particle_speed_min..=tuning.particle_speed_max);
            let angle = rng.random::<f64>() * TAU;
            let lift = rng.random_range(-tuning.particle_lift_max..=tuning.particle_lift_max);

            let vel = DVec3::new(angle.cos() * speed, lift, angle.sin() * speed);
            let spin = DVec3::new(
                rng.random::<f64>() * tuning.particle_spin_max,
                rng.random::<f64>() * tuning.particle_spin_max,
                rng.random::<f64>() * tuning.particle_spin_max,
            );

            self.particles.push(Particle {
                body: Body::new(origin, vel, spin),
                color,
                size: rng.random_range(0.3..=0.7),
                created_at_ms: now_ms,
                lifetime_ms: rng.random_range(
                    tuning.particle_lifetime_min_ms..=tuning.particle_lifetime_max_ms,
                ),
            });
        }

        count
    }

    /// Advance fragments and drop the expired ones
    pub fn integrate(&mut self, dt: f64, now_ms: f64, gravity: f64) {
        for particle in &mut self.particles {
            particle.body.step(gravity, dt);
        }
        self.particles.retain(|p| !p.is_expired(now_ms));
    }
}
