//! Slice detection
//!
//! Point test: every unsliced fruit within the slice radius of the latest
//! gesture point is hit, provided the gesture is engaged and fast enough.
//! Only the newest sample is tested, so a very fast stroke can pass over a
//! fruit between two samples without cutting it.

use glam::DVec2;

use super::fruit::Fruit;
use super::gesture::GestureState;
use crate::gesture_to_world;
use crate::tuning::Tuning;

/// Whether the gesture can cut anything at all
#[inline]
pub fn gesture_qualifies(gesture: &GestureState, tuning: &Tuning) -> bool {
    gesture.engaged && gesture.speed > tuning.speed_threshold
}

/// Distance test between a fruit and a world-space gesture point
#[inline]
pub fn within_reach(fruit: &Fruit, point: DVec2, radius: f64) -> bool {
    fruit.pos().truncate().distance(point) < radius
}

/// Ids of every fruit the gesture cuts this pass (spawn order)
pub fn find_hits(fruits: &[Fruit], gesture: &GestureState, tuning: &Tuning) -> Vec<u32> {
    if !gesture_qualifies(gesture, tuning) {
        return Vec::new();
    }

    let point = gesture_to_world(gesture.current);
    fruits
        .iter()
        .filter(|f| !f.sliced && within_reach(f, point, tuning.slice_radius))
        .map(|f| f.id)
        .collect()
}
