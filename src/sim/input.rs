//! Pointer event entry points
//!
//! The host calls these from its event callbacks, between frames. Positions
//! are normalized to the canvas ([0,1], y down) and timestamps must come from
//! the same clock as the frame timestamps.
//!
//! The tracker always follows the pointer; segments, trail strokes and slices
//! only happen while a session is active. A cutting sample is resolved right
//! away instead of waiting for the next frame.

use super::gesture::{GestureSample, SliceSegment};
use super::state::{GameEvent, GameState};
use super::tick::resolve_slices;

/// Button/touch went down
pub fn pointer_down(state: &mut GameState, x: f64, y: f64, timestamp_ms: i64) -> Option<SliceSegment> {
    let segment = state.gesture.press(GestureSample::new(x, y, timestamp_ms));
    cut(state, segment, timestamp_ms)
}

/// Pointer moved (held or not)
pub fn pointer_move(state: &mut GameState, x: f64, y: f64, timestamp_ms: i64) -> Option<SliceSegment> {
    let engaged = state.gesture.state().engaged;
    let segment = state
        .gesture
        .on_sample(GestureSample::new(x, y, timestamp_ms), engaged);
    cut(state, segment, timestamp_ms)
}

/// Button/touch released
pub fn pointer_up(state: &mut GameState) {
    state.gesture.release();
}

/// Pointer left the canvas; treated as a release
pub fn pointer_leave(state: &mut GameState) {
    state.gesture.release();
}

fn cut(state: &mut GameState, segment: Option<SliceSegment>, timestamp_ms: i64) -> Option<SliceSegment> {
    if !state.is_active() {
        return None;
    }
    let segment = segment?;
    let now_ms = timestamp_ms as f64;

    state.trail.push(segment.from, segment.to, now_ms);
    state.emit(GameEvent::TrailSegment {
        x1: segment.from.x,
        y1: segment.from.y,
        x2: segment.to.x,
        y2: segment.to.y,
    });
    resolve_slices(state, now_ms);

    Some(segment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::fruit::{Fruit, FruitKind};
    use crate::sim::kinematics::Body;
    use crate::sim::tick::start_session;
    use glam::DVec3;

    fn add_fruit(state: &mut GameState, x: f64, y: f64) {
        let id = state.next_entity_id();
        state.fruits.push(Fruit {
            id,
            kind: FruitKind::Lime,
            body: Body::new(DVec3::new(x, y, 0.0), DVec3::ZERO, DVec3::ZERO),
            sliced: false,
        });
    }

    #[test]
    fn test_tap_slices_immediately() {
        let mut state = GameState::new(1);
        start_session(&mut state);
        add_fruit(&mut state, 0.0, 0.0);
        state.drain_events();

        let seg = pointer_down(&mut state, 0.5, 0.5, 100).unwrap();
        assert!(seg.is_point());
        assert_eq!(state.score, 1);
        assert_eq!(state.particles.len(), 12);
        assert_eq!(state.trail.len(), 1);

        let events = state.drain_events();
        assert!(matches!(events[0], GameEvent::TrailSegment { .. }));
        assert!(events.contains(&GameEvent::ScoreChanged { score: 1 }));
    }

    #[test]
    fn test_input_ignored_when_idle() {
        let mut state = GameState::new(1);
        add_fruit(&mut state, 0.0, 0.0);

        assert!(pointer_down(&mut state, 0.5, 0.5, 0).is_none());
        assert_eq!(state.score, 0);
        assert!(state.trail.is_empty());
        assert!(state.drain_events().is_empty());
        // Tracker still follows the pointer
        assert!(state.gesture.state().engaged);
    }

    #[test]
    fn test_fast_swipe_cuts_and_slow_drag_does_not() {
        let mut state = GameState::new(1);
        start_session(&mut state);

        pointer_down(&mut state, 0.0, 0.9, 0);
        // Slow drag: 0.05 units in 50 ms
        assert!(pointer_move(&mut state, 0.05, 0.9, 50).is_none());
        // Fast swipe: 0.6 units in 10 ms, floored to 16 ms
        let seg = pointer_move(&mut state, 0.65, 0.9, 60).unwrap();
        assert_eq!(seg.from, DVec3::new(0.05, 0.9, 0.0));
        assert_eq!(seg.to, DVec3::new(0.65, 0.9, 0.0));
    }

    #[test]
    fn test_release_and_leave_stop_cutting() {
        let mut state = GameState::new(1);
        start_session(&mut state);
        add_fruit(&mut state, 0.0, 0.0);

        pointer_down(&mut state, 0.0, 0.0, 0);
        pointer_up(&mut state);
        assert!(pointer_move(&mut state, 0.5, 0.5, 1).is_none());
        assert_eq!(state.score, 0);

        pointer_down(&mut state, 0.0, 0.0, 100);
        pointer_leave(&mut state);
        assert!(pointer_move(&mut state, 0.5, 0.5, 101).is_none());
        assert_eq!(state.score, 0);
        assert_eq!(state.fruits.len(), 1);
    }
}
