//! Kinematics primitives shared by fruit and explosion fragments
//!
//! Semi-implicit Euler: velocity is updated from gravity first, then position
//! advances with the new velocity. Spin is visual only.

use glam::DVec3;

/// Linear and angular motion of a body
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Body {
    pub pos: DVec3,
    pub vel: DVec3,
    /// Angular velocity per axis (rad/s)
    pub spin: DVec3,
    /// Accumulated orientation (Euler angles, rad)
    pub rotation: DVec3,
}

impl Body {
    pub fn new(pos: DVec3, vel: DVec3, spin: DVec3) -> Self {
        Self {
            pos,
            vel,
            spin,
            rotation: DVec3::ZERO,
        }
    }

    /// Advance in the XY plane only (z stays put)
    #[inline]
    pub fn step_planar(&mut self, gravity: f64, dt: f64) {
        self.vel.y -= gravity * dt;
        self.pos.x += self.vel.x * dt;
        self.pos.y += self.vel.y * dt;
        self.rotation += self.spin * dt;
    }

    /// Advance on all three axes
    #[inline]
    pub fn step(&mut self, gravity: f64, dt: f64) {
        self.vel.y -= gravity * dt;
        self.pos += self.vel * dt;
        self.rotation += self.spin * dt;
    }
}

/// Clamp a frame delta into something the integrators can use
#[inline]
pub fn sanitize_dt(dt: f64, max_dt: f64) -> f64 {
    if dt.is_finite() { dt.clamp(0.0, max_dt) } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_planar_step_keeps_z() {
        let mut body = Body::new(
            DVec3::new(0.0, 0.0, 2.0),
            DVec3::new(1.0, 0.0, 5.0),
            DVec3::ZERO,
        );
        body.step_planar(8.0, 0.5);
        assert_eq!(body.pos.z, 2.0);
        assert_eq!(body.vel.y, -4.0);
        assert_eq!(body.pos.y, -2.0);
        assert_eq!(body.pos.x, 0.5);
    }

    #[test]
    fn test_full_step_moves_z() {
        let mut body = Body::new(DVec3::ZERO, DVec3::new(0.0, 0.0, 4.0), DVec3::ZERO);
        body.step(9.8, 0.25);
        assert_eq!(body.pos.z, 1.0);
    }

    #[test]
    fn test_spin_accumulates() {
        let mut body = Body::new(DVec3::ZERO, DVec3::ZERO, DVec3::new(1.0, 2.0, 3.0));
        body.step_planar(0.0, 0.5);
        body.step_planar(0.0, 0.5);
        assert_eq!(body.rotation, DVec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_sanitize_dt() {
        assert_eq!(sanitize_dt(-0.5, 0.1), 0.0);
        assert_eq!(sanitize_dt(0.05, 0.1), 0.05);
        assert_eq!(sanitize_dt(3.0, 0.1), 0.1);
        assert_eq!(sanitize_dt(f64::NAN, 0.1), 0.0);
    }
}
