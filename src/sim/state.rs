//! Game state and core simulation types
//!
//! Everything a session needs lives in [`GameState`]; the frame step and the
//! input handlers take it by `&mut`, so a session is a pure function of its
//! seed, its inputs and the timestamps it is fed.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::fruit::{FruitField, FruitKind};
use super::gesture::GestureTracker;
use super::particles::ParticleField;
use super::spawn::SpawnScheduler;
use super::trail::BladeTrail;
use crate::tuning::{Tuning, Viewport};

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Nothing has started yet
    Idle,
    /// Frame loop running
    Active,
    /// Lives ran out; only a restart leaves this phase
    Ended,
}

/// Notifications for the display and HUD collaborators, drained by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    SessionStarted { lives: u32 },
    SessionEnded { final_score: u64 },
    ScoreChanged { score: u64 },
    LivesChanged { lives: u32 },
    FruitSpawned { id: u32, kind: FruitKind },
    FruitSliced { id: u32, kind: FruitKind },
    FruitMissed { id: u32 },
    /// Blade stroke in normalized screen coordinates
    TrailSegment { x1: f64, y1: f64, x2: f64, y2: f64 },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub tuning: Tuning,
    pub viewport: Viewport,
    pub phase: SessionPhase,
    pub score: u64,
    pub lives: u32,
    /// Score frozen at the end of the last session
    pub final_score: Option<u64>,
    /// Frames stepped this session
    pub frame_count: u64,
    /// Host timestamp of the previous frame
    pub(crate) last_frame_ms: Option<f64>,
    pub spawner: SpawnScheduler,
    pub fruits: FruitField,
    pub particles: ParticleField,
    pub trail: BladeTrail,
    pub gesture: GestureTracker,
    pub(crate) events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create an idle game with default tuning on a desktop viewport
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default(), Viewport::desktop())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning, viewport: Viewport) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            viewport,
            phase: SessionPhase::Idle,
            score: 0,
            lives: tuning.lives,
            final_score: None,
            frame_count: 0,
            last_frame_ms: None,
            spawner: SpawnScheduler::new(&tuning),
            fruits: FruitField::new(),
            particles: ParticleField::new(),
            trail: BladeTrail::new(tuning.trail_lifetime_ms),
            gesture: GestureTracker::new(tuning.speed_threshold, tuning.press_speed),
            events: Vec::new(),
            next_id: 1,
            tuning,
        }
    }

    pub fn is_active(&self) -> bool {
        self.phase == SessionPhase::Active
    }

    /// Current inter-spawn interval (ms)
    pub fn spawn_interval_ms(&self) -> f64 {
        self.spawner.interval_ms()
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take every event emitted since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Peek at pending events without consuming them
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle() {
        let state = GameState::new(1);
        assert_eq!(state.phase, SessionPhase::Idle);
        assert!(!state.is_active());
        assert_eq!(state.lives, 5);
        assert_eq!(state.score, 0);
        assert_eq!(state.spawn_interval_ms(), 1500.0);
        assert!(state.fruits.is_empty());
    }

    #[test]
    fn test_entity_ids_increase() {
        let mut state = GameState::new(1);
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert!(b > a);
    }

    #[test]
    fn test_events_drain_once() {
        let mut state = GameState::new(1);
        state.emit(GameEvent::ScoreChanged { score: 3 });
        assert_eq!(state.pending_events().len(), 1);
        let events = state.drain_events();
        assert_eq!(events, vec![GameEvent::ScoreChanged { score: 3 }]);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_event_json_shape() {
        let json = serde_json::to_string(&GameEvent::SessionEnded { final_score: 42 }).unwrap();
        assert_eq!(json, r#"{"type":"SessionEnded","final_score":42}"#);
    }
}
