//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Host timestamps only, no wall clock
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod fruit;
pub mod gesture;
pub mod input;
pub mod kinematics;
pub mod particles;
pub mod slice;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod trail;

pub use autopilot::Autopilot;
pub use fruit::{Fruit, FruitField, FruitKind};
pub use gesture::{GestureSample, GestureState, GestureTracker, SliceSegment};
pub use input::{pointer_down, pointer_leave, pointer_move, pointer_up};
pub use kinematics::Body;
pub use particles::{Particle, ParticleField};
pub use slice::find_hits;
pub use spawn::{SpawnRequest, SpawnScheduler};
pub use state::{GameEvent, GameState, SessionPhase};
pub use tick::{end_session, frame, resolve_slices, start_session};
pub use trail::{BladeTrail, TrailSegment};
