//! Demo player
//!
//! Swipes through the most endangered visible fruit (the lowest one) every
//! reaction period. It only sees fruit inside the visible window, so as the spawn
//! interval shrinks below its reaction time it starts losing lives.

use glam::DVec2;

use super::gesture::GestureSample;
use super::input::{pointer_down, pointer_move, pointer_up};
use super::state::GameState;
use crate::consts::WORLD_HEIGHT;
use crate::world_to_gesture;

/// Per-axis distance of the stroke start from the target, in normalized units.
/// Both samples share a timestamp, so the stroke speed is
/// `0.45 * sqrt(2) / MIN_SAMPLE_DT`, about 40 units/s.
const SWEEP_OFFSET: f64 = 0.45;

/// Scripted swiper used by the headless demo and by tests
#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Minimum time between swipes
    pub reaction_ms: f64,
    last_swipe_ms: Option<f64>,
}

impl Autopilot {
    pub fn new(reaction_ms: f64) -> Self {
        Self {
            reaction_ms,
            last_swipe_ms: None,
        }
    }

    /// Id of the fruit the bot would go for right now
    pub fn pick_target(state: &GameState) -> Option<u32> {
        let half_height = WORLD_HEIGHT / 2.0;
        state
            .fruits
            .fruits
            .iter()
            .filter(|f| !f.sliced && f.pos().y.abs() <= half_height)
            .min_by(|a, b| {
                a.pos()
                    .y
                    .partial_cmp(&b.pos().y)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(a.id.cmp(&b.id))
            })
            .map(|f| f.id)
    }

    /// Engaged stroke ending on `target` (normalized coordinates). The start
    /// point stays on the canvas and out of slice reach of the target.
    pub fn sweep_through(target: DVec2, timestamp_ms: i64) -> [GestureSample; 2] {
        let away = |v: f64| if v < 0.5 { v + SWEEP_OFFSET } else { v - SWEEP_OFFSET };
        [
            GestureSample::new(away(target.x), away(target.y), timestamp_ms),
            GestureSample::new(target.x, target.y, timestamp_ms),
        ]
    }

    /// Swipe through the target if the bot is ready. Returns the fruit it went for.
    pub fn act(&mut self, state: &mut GameState, now_ms: f64) -> Option<u32> {
        if !state.is_active() {
            return None;
        }
        if let Some(last) = self.last_swipe_ms {
            if now_ms - last < self.reaction_ms {
                return None;
            }
        }

        let target = Self::pick_target(state)?;
        let pos = state.fruits.get(target)?.pos().truncate();
        let g = world_to_gesture(pos);

        let [from, to] = Self::sweep_through(g.truncate(), now_ms as i64);

        pointer_up(state);
        pointer_down(state, from.pos.x, from.pos.y, from.timestamp_ms);
        pointer_move(state, to.pos.x, to.pos.y, to.timestamp_ms);
        pointer_up(state);
        self.last_swipe_ms = Some(now_ms);
        Some(target)
    }
}
