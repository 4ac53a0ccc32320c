//! Fruit Slash - A fruit slicing arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, slicing, particles, session state)
//! - `tuning`: Data-driven game balance
//! - `view`: Snapshot handed to the display collaborator each frame

pub mod sim;
pub mod tuning;
pub mod view;

pub use tuning::{Tuning, TuningError, Viewport};
pub use view::Snapshot;

use glam::{DVec2, DVec3};

/// Game configuration constants
pub mod consts {
    /// Downward acceleration on fruit (units/s²), lighter than Earth for floaty arcs
    pub const FRUIT_GRAVITY: f64 = 8.0;
    /// Downward acceleration on explosion fragments (units/s²)
    pub const PARTICLE_GRAVITY: f64 = 9.8;

    /// Fruit spawn height and the line below which fruit are lost
    pub const BOTTOM_BOUNDARY: f64 = -10.0;

    /// Gesture point to fruit center distance that counts as a hit
    pub const SLICE_RADIUS: f64 = 3.0;
    /// Minimum gesture speed (normalized units/s) for a slice
    pub const SPEED_THRESHOLD: f64 = 30.0;
    /// Speed forced on press so a tap can slice immediately
    pub const PRESS_SPEED: f64 = 100.0;
    /// Floor for the time between two gesture samples (seconds)
    pub const MIN_SAMPLE_DT: f64 = 0.016;

    /// Session defaults
    pub const DEFAULT_LIVES: u32 = 5;
    pub const DEFAULT_SPAWN_INTERVAL_MS: f64 = 1500.0;
    /// Difficulty ramp: interval shrinks by this much per spawn
    pub const SPAWN_INTERVAL_DECREMENT_MS: f64 = 50.0;
    /// Difficulty ramp floor
    pub const MIN_SPAWN_INTERVAL_MS: f64 = 200.0;

    /// Horizontal spawn ranges (world units)
    pub const DESKTOP_SPAWN_RANGE: f64 = 24.0;
    pub const CONSTRAINED_SPAWN_RANGE: f64 = 14.0;
    /// Constrained viewports narrower than `NARROW_VIEWPORT_PX` use this range
    pub const NARROW_SPAWN_RANGE: f64 = 11.0;
    pub const NARROW_VIEWPORT_PX: f64 = 500.0;

    /// Explosion fan-out
    pub const EXPLOSION_PARTICLES: usize = 12;

    /// Blade trail fade time
    pub const TRAIL_LIFETIME_MS: f64 = 350.0;

    /// Largest frame delta fed to the integrators (tab stalls, debugger pauses)
    pub const MAX_FRAME_DT: f64 = 0.1;

    /// Gesture space [0,1]² maps onto this world window
    pub const WORLD_WIDTH: f64 = 40.0;
    pub const WORLD_HEIGHT: f64 = 15.0;
}

/// Map a normalized gesture point (x right, y down, both in [0,1]) to world space
#[inline]
pub fn gesture_to_world(p: DVec3) -> DVec2 {
    use consts::{WORLD_HEIGHT, WORLD_WIDTH};
    DVec2::new(
        p.x * WORLD_WIDTH - WORLD_WIDTH / 2.0,
        (0.5 - p.y) * WORLD_HEIGHT,
    )
}

/// Inverse of [`gesture_to_world`]
#[inline]
pub fn world_to_gesture(p: DVec2) -> DVec3 {
    use consts::{WORLD_HEIGHT, WORLD_WIDTH};
    DVec3::new(
        (p.x + WORLD_WIDTH / 2.0) / WORLD_WIDTH,
        0.5 - p.y / WORLD_HEIGHT,
        0.0,
    )
}
