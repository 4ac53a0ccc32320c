//! Per-frame snapshot for the display collaborator
//!
//! The renderer gets a full snapshot every frame instead of a diff; the live
//! sets are small (a few dozen fruit, a few hundred fragments).

use serde::{Deserialize, Serialize};

use crate::sim::{FruitKind, GameState, SessionPhase};

/// A fruit as the renderer needs it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FruitView {
    pub id: u32,
    pub kind: FruitKind,
    pub color: u32,
    pub radius: f64,
    pub pos: [f64; 3],
    pub rotation: [f64; 3],
    pub alive: bool,
}

/// An explosion fragment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleView {
    pub color: u32,
    pub size: f64,
    pub pos: [f64; 3],
    pub rotation: [f64; 3],
    pub opacity: f64,
}

/// A blade stroke in normalized screen coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrailView {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub opacity: f64,
}

/// Everything visible at one instant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: SessionPhase,
    pub score: u64,
    pub lives: u32,
    pub fruits: Vec<FruitView>,
    pub particles: Vec<ParticleView>,
    pub trails: Vec<TrailView>,
}

impl Snapshot {
    pub fn capture(state: &GameState, now_ms: f64) -> Self {
        let fruits = state
            .fruits
            .fruits
            .iter()
            .map(|f| FruitView {
                id: f.id,
                kind: f.kind,
                color: f.kind.color(),
                radius: f.kind.radius(),
                pos: f.body.pos.to_array(),
                rotation: f.body.rotation.to_array(),
                alive: !f.sliced,
            })
            .collect();

        let particles = state
            .particles
            .particles
            .iter()
            .map(|p| ParticleView {
                color: p.color,
                size: p.size,
                pos: p.body.pos.to_array(),
                rotation: p.body.rotation.to_array(),
                opacity: p.opacity(now_ms),
            })
            .collect();

        let trails = state
            .trail
            .segments
            .iter()
            .map(|s| TrailView {
                x1: s.start.x,
                y1: s.start.y,
                x2: s.end.x,
                y2: s.end.y,
                opacity: state.trail.opacity(s, now_ms),
            })
            .collect();

        Self {
            phase: state.phase,
            score: state.score,
            lives: state.lives,
            fruits,
            particles,
            trails,
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{frame, pointer_down, start_session};

    #[test]
    fn test_snapshot_reflects_state() {
        let mut state = GameState::new(5);
        start_session(&mut state);
        frame(&mut state, 0.0);
        frame(&mut state, 1600.0);

        let snap = Snapshot::capture(&state, 1600.0);
        assert_eq!(snap.phase, SessionPhase::Active);
        assert_eq!(snap.lives, 5);
        assert_eq!(snap.fruits.len(), 1);
        assert!(snap.fruits[0].alive);
        assert_eq!(snap.fruits[0].color, snap.fruits[0].kind.color());
    }

    #[test]
    fn test_snapshot_includes_effects() {
        let mut state = GameState::new(5);
        start_session(&mut state);
        frame(&mut state, 0.0);
        frame(&mut state, 1600.0);

        // Tap straight on the fruit that just spawned
        let pos = state.fruits.fruits[0].pos().truncate();
        let g = crate::world_to_gesture(pos);
        pointer_down(&mut state, g.x, g.y, 1600);

        let snap = Snapshot::capture(&state, 1600.0);
        assert_eq!(snap.score, 1);
        assert!(snap.fruits.is_empty());
        assert_eq!(snap.particles.len(), 12);
        assert!(snap.particles.iter().all(|p| p.opacity == 1.0));
        assert_eq!(snap.trails.len(), 1);
        assert_eq!(snap.trails[0].opacity, 1.0);

        let json = snap.to_json();
        assert!(json.contains("\"score\":1"));
        assert!(json.contains("\"phase\":\"Active\""));
    }
}
