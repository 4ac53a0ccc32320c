//! Pointer gesture tracking
//!
//! Pointer samples arrive from the host between frames. The tracker keeps one
//! [`GestureState`] and turns each sample into an optional slice segment.
//!
//! Rules:
//! - speed is recomputed from every sample, never accumulated
//! - the sample delta is floored to [`MIN_SAMPLE_DT`] so back-to-back or
//!   duplicate samples cannot produce unbounded speeds
//! - a press forces the speed high so holding still on a fruit slices it

use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

use crate::consts::MIN_SAMPLE_DT;
use crate::gesture_to_world;

/// One pointer reading in normalized screen coordinates ([0,1], y down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSample {
    pub pos: DVec3,
    pub timestamp_ms: i64,
}

impl GestureSample {
    pub fn new(x: f64, y: f64, timestamp_ms: i64) -> Self {
        Self {
            pos: DVec3::new(x, y, 0.0),
            timestamp_ms,
        }
    }
}

/// Latest pointer state, read by the slice detector
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GestureState {
    pub current: DVec3,
    pub previous: DVec3,
    /// Normalized units per second
    pub speed: f64,
    pub engaged: bool,
    /// Timestamp of the last accepted sample
    pub last_sample_ms: Option<i64>,
}

/// A gesture stroke that is fast enough to cut
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliceSegment {
    /// Normalized coordinates
    pub from: DVec3,
    pub to: DVec3,
}

impl SliceSegment {
    /// Endpoints in world space
    pub fn to_world(&self) -> (DVec2, DVec2) {
        (gesture_to_world(self.from), gesture_to_world(self.to))
    }

    pub fn is_point(&self) -> bool {
        self.from == self.to
    }
}

/// Turns raw pointer samples into slice segments
#[derive(Debug, Clone)]
pub struct GestureTracker {
    state: GestureState,
    speed_threshold: f64,
    press_speed: f64,
}

impl GestureTracker {
    pub fn new(speed_threshold: f64, press_speed: f64) -> Self {
        Self {
            state: GestureState::default(),
            speed_threshold,
            press_speed,
        }
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GestureState {
        &mut self.state
    }

    /// Whether the current state qualifies as a slice
    pub fn is_slicing(&self) -> bool {
        self.state.engaged && self.state.speed > self.speed_threshold
    }

    /// The stroke from the previous to the current sample, if it cuts
    pub fn active_segment(&self) -> Option<SliceSegment> {
        self.is_slicing().then_some(SliceSegment {
            from: self.state.previous,
            to: self.state.current,
        })
    }

    /// Ingest a sample with the current engagement flag
    pub fn on_sample(&mut self, sample: GestureSample, engaged: bool) -> Option<SliceSegment> {
        let dt_secs = match self.state.last_sample_ms {
            Some(last) => sample.timestamp_ms.saturating_sub(last) as f64 / 1000.0,
            None => 0.0,
        };
        let dt_secs = dt_secs.max(MIN_SAMPLE_DT);

        let delta = (sample.pos - self.state.current).truncate();
        self.state.speed = delta.length() / dt_secs;
        self.state.previous = self.state.current;
        self.state.current = sample.pos;
        self.state.engaged = engaged;
        self.state.last_sample_ms = Some(sample.timestamp_ms);

        self.active_segment()
    }

    /// Press: engage at the sample point and emit a zero-length segment there
    pub fn press(&mut self, sample: GestureSample) -> Option<SliceSegment> {
        self.state.current = sample.pos;
        self.state.previous = sample.pos;
        self.state.speed = self.press_speed;
        self.state.engaged = true;
        self.state.last_sample_ms = Some(sample.timestamp_ms);

        self.active_segment()
    }

    /// Release or pointer-leave: stop slicing
    pub fn release(&mut self) {
        self.state.engaged = false;
    }

    /// Forget everything (session restart)
    pub fn reset(&mut self) {
        self.state = GestureState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{PRESS_SPEED, SPEED_THRESHOLD};

    fn tracker() -> GestureTracker {
        GestureTracker::new(SPEED_THRESHOLD, PRESS_SPEED)
    }

    #[test]
    fn test_press_emits_point_segment() {
        let mut t = tracker();
        let seg = t.press(GestureSample::new(0.3, 0.6, 1000)).unwrap();
        assert!(seg.is_point());
        assert_eq!(seg.to, DVec3::new(0.3, 0.6, 0.0));
        assert_eq!(t.state().speed, PRESS_SPEED);
        assert!(t.state().engaged);
    }

    #[test]
    fn test_speed_uses_floored_dt() {
        let mut t = tracker();
        t.press(GestureSample::new(0.0, 0.0, 1000));
        // Same timestamp: dt floors to 16 ms, 0.8 / 0.016 = 50
        let seg = t.on_sample(GestureSample::new(0.8, 0.0, 1000), true);
        assert!((t.state().speed - 50.0).abs() < 1e-9);
        assert!(seg.is_some());

        // Out-of-order timestamp also floors
        t.on_sample(GestureSample::new(0.8, 0.16, 900), true);
        assert!((t.state().speed - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_speed_recomputed_not_accumulated() {
        let mut t = tracker();
        t.press(GestureSample::new(0.5, 0.5, 0));
        t.on_sample(GestureSample::new(0.5, 0.5, 100), true);
        assert_eq!(t.state().speed, 0.0);
        assert!(t.active_segment().is_none());
    }

    #[test]
    fn test_previous_tracks_last_current() {
        let mut t = tracker();
        t.on_sample(GestureSample::new(0.1, 0.1, 0), false);
        t.on_sample(GestureSample::new(0.2, 0.3, 50), false);
        assert_eq!(t.state().previous, DVec3::new(0.1, 0.1, 0.0));
        assert_eq!(t.state().current, DVec3::new(0.2, 0.3, 0.0));
    }

    #[test]
    fn test_slow_stroke_does_not_cut() {
        let mut t = tracker();
        t.press(GestureSample::new(0.0, 0.5, 0));
        // 0.1 units in 100 ms = 1 unit/s
        let seg = t.on_sample(GestureSample::new(0.1, 0.5, 100), true);
        assert!(seg.is_none());
    }

    #[test]
    fn test_disengaged_never_cuts() {
        let mut t = tracker();
        let seg = t.on_sample(GestureSample::new(0.0, 0.0, 0), false);
        assert!(seg.is_none());
        let seg = t.on_sample(GestureSample::new(1.0, 1.0, 1), false);
        assert!(t.state().speed > SPEED_THRESHOLD);
        assert!(seg.is_none());
    }

    #[test]
    fn test_release_stops_slicing() {
        let mut t = tracker();
        t.press(GestureSample::new(0.5, 0.5, 0));
        assert!(t.is_slicing());
        t.release();
        assert!(!t.is_slicing());
        assert!(t.active_segment().is_none());
    }

    #[test]
    fn test_extreme_timestamps_do_not_overflow() {
        let mut t = tracker();
        t.on_sample(GestureSample::new(0.0, 0.0, i64::MIN), true);
        // Huge gap: speed collapses to zero instead of overflowing
        t.on_sample(GestureSample::new(0.5, 0.5, i64::MAX), true);
        assert!(t.state().speed < 1e-9);

        // Huge backwards jump floors like any out-of-order sample
        t.on_sample(GestureSample::new(0.5, 0.66, i64::MIN), true);
        assert!((t.state().speed - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_segment_world_endpoints() {
        let seg = SliceSegment {
            from: DVec3::new(0.5, 0.5, 0.0),
            to: DVec3::new(1.0, 0.0, 0.0),
        };
        let (a, b) = seg.to_world();
        assert_eq!(a, DVec2::ZERO);
        assert_eq!(b, DVec2::new(20.0, 7.5));
    }
}
