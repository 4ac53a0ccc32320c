//! Spawn scheduling and the difficulty ramp
//!
//! One fruit per interval; every spawn shrinks the interval by a fixed step
//! down to a floor. The interval only goes back up on session start.

use rand::Rng;

use crate::tuning::{Tuning, Viewport};

/// Where a new fruit enters the play area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRequest {
    /// Horizontal world position at the bottom boundary
    pub x: f64,
}

/// Decides when and where to spawn
#[derive(Debug, Clone)]
pub struct SpawnScheduler {
    interval_ms: f64,
    last_spawn_ms: f64,
    decrement_ms: f64,
    min_interval_ms: f64,
}

impl SpawnScheduler {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            interval_ms: tuning.spawn_interval_ms,
            last_spawn_ms: 0.0,
            decrement_ms: tuning.spawn_interval_decrement_ms,
            min_interval_ms: tuning.min_spawn_interval_ms,
        }
    }

    /// Current inter-spawn interval (ms)
    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    pub fn last_spawn_ms(&self) -> f64 {
        self.last_spawn_ms
    }

    /// Back to the session-start interval. The host clock is measured from
    /// page load, so the last spawn time starts at zero.
    pub fn reset(&mut self, tuning: &Tuning) {
        *self = Self::new(tuning);
    }

    /// Fire a spawn if the interval has elapsed
    pub fn tick<R: Rng>(
        &mut self,
        now_ms: f64,
        viewport: &Viewport,
        tuning: &Tuning,
        rng: &mut R,
    ) -> Option<SpawnRequest> {
        if now_ms - self.last_spawn_ms <= self.interval_ms {
            return None;
        }

        let range = viewport.spawn_range(tuning);
        let x = rng.random::<f64>() * range - range / 2.0;

        self.last_spawn_ms = now_ms;
        self.interval_ms = (self.interval_ms - self.decrement_ms).max(self.min_interval_ms);

        Some(SpawnRequest { x })
    }
}
