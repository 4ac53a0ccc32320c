//! Blade trail: short-lived strokes left behind by a cutting gesture

use glam::DVec3;

/// One stroke of the blade (normalized screen coordinates)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailSegment {
    pub start: DVec3,
    pub end: DVec3,
    pub created_at_ms: f64,
}

/// Fading strokes, oldest first
#[derive(Debug, Clone)]
pub struct BladeTrail {
    pub segments: Vec<TrailSegment>,
    lifetime_ms: f64,
}

impl BladeTrail {
    pub fn new(lifetime_ms: f64) -> Self {
        Self {
            segments: Vec::new(),
            lifetime_ms,
        }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn clear(&mut self) {
        self.segments.clear();
    }

    pub fn push(&mut self, start: DVec3, end: DVec3, now_ms: f64) {
        self.segments.push(TrailSegment {
            start,
            end,
            created_at_ms: now_ms,
        });
    }

    /// Drop strokes older than the trail lifetime
    pub fn update(&mut self, now_ms: f64) {
        let lifetime = self.lifetime_ms;
        self.segments.retain(|s| now_ms - s.created_at_ms <= lifetime);
    }

    pub fn opacity(&self, segment: &TrailSegment, now_ms: f64) -> f64 {
        let age = (now_ms - segment.created_at_ms).max(0.0);
        (1.0 - age / self.lifetime_ms).clamp(0.0, 1.0)
    }
}
