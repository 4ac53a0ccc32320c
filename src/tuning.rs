//! Game balance and viewport configuration
//!
//! Every gameplay constant lives in [`Tuning`] so hosts can override balance
//! from a JSON file without recompiling. Missing fields fall back to the
//! defaults in [`crate::consts`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Data-driven game balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Session ===
    /// Lives at session start
    pub lives: u32,
    /// Spawn interval at session start (ms)
    pub spawn_interval_ms: f64,
    /// Interval reduction applied after every spawn (ms)
    pub spawn_interval_decrement_ms: f64,
    /// Interval never drops below this (ms)
    pub min_spawn_interval_ms: f64,

    // === Spawning ===
    /// Horizontal spawn span on desktop viewports
    pub desktop_spawn_range: f64,
    /// Horizontal spawn span on constrained (mobile) viewports
    pub constrained_spawn_range: f64,
    /// Launch speed range (upward)
    pub launch_speed_min: f64,
    pub launch_speed_max: f64,
    /// Horizontal drift, drawn from [-max, max)
    pub launch_drift_max: f64,
    /// Per-axis fruit spin, drawn from [0, max) rad/s
    pub fruit_spin_max: f64,

    // === Physics ===
    pub fruit_gravity: f64,
    pub particle_gravity: f64,
    pub bottom_boundary: f64,

    // === Slicing ===
    pub slice_radius: f64,
    pub speed_threshold: f64,
    pub press_speed: f64,

    // === Explosions ===
    pub explosion_particles: usize,
    pub particle_speed_min: f64,
    pub particle_speed_max: f64,
    /// Vertical kick, drawn from [-max, max)
    pub particle_lift_max: f64,
    /// Per-axis fragment spin, drawn from [0, max) rad/s
    pub particle_spin_max: f64,
    pub particle_lifetime_min_ms: f64,
    pub particle_lifetime_max_ms: f64,

    // === Blade trail ===
    pub trail_lifetime_ms: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            lives: DEFAULT_LIVES,
            spawn_interval_ms: DEFAULT_SPAWN_INTERVAL_MS,
            spawn_interval_decrement_ms: SPAWN_INTERVAL_DECREMENT_MS,
            min_spawn_interval_ms: MIN_SPAWN_INTERVAL_MS,

            desktop_spawn_range: DESKTOP_SPAWN_RANGE,
            constrained_spawn_range: CONSTRAINED_SPAWN_RANGE,
            launch_speed_min: 10.0,
            launch_speed_max: 20.0,
            launch_drift_max: 0.75,
            // 0.08 rad per frame at 60 Hz
            fruit_spin_max: 4.8,

            fruit_gravity: FRUIT_GRAVITY,
            particle_gravity: PARTICLE_GRAVITY,
            bottom_boundary: BOTTOM_BOUNDARY,

            slice_radius: SLICE_RADIUS,
            speed_threshold: SPEED_THRESHOLD,
            press_speed: PRESS_SPEED,

            explosion_particles: EXPLOSION_PARTICLES,
            particle_speed_min: 8.0,
            particle_speed_max: 16.0,
            particle_lift_max: 3.0,
            // 0.2 rad per frame at 60 Hz
            particle_spin_max: 12.0,
            particle_lifetime_min_ms: 800.0,
            particle_lifetime_max_ms: 1200.0,

            trail_lifetime_ms: TRAIL_LIFETIME_MS,
        }
    }
}

/// Reasons a tuning file is rejected
#[derive(Debug)]
pub enum TuningError {
    /// The file is not valid JSON for [`Tuning`]
    Parse(serde_json::Error),
    /// A field is outside its meaningful range
    Invalid { field: &'static str, reason: &'static str },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Parse(e) => write!(f, "Tuning parse error: {e}"),
            TuningError::Invalid { field, reason } => {
                write!(f, "Invalid tuning value `{field}`: {reason}")
            }
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Parse(e) => Some(e),
            TuningError::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}

impl Tuning {
    /// Parse and validate a tuning file
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Parse a tuning file, logging and falling back to defaults on failure
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => {
                log::info!("Loaded tuning overrides");
                tuning
            }
            Err(e) => {
                log::warn!("{e}; using default tuning");
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> String {
        // Plain struct of numbers, serialization cannot fail
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Check every field is in a range the simulation can work with
    pub fn validate(&self) -> Result<(), TuningError> {
        fn positive(field: &'static str, v: f64) -> Result<(), TuningError> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(TuningError::Invalid {
                    field,
                    reason: "must be a positive number",
                })
            }
        }
        // Symmetric or one-sided draw bounds; zero disables the effect
        fn non_negative(field: &'static str, v: f64) -> Result<(), TuningError> {
            if v.is_finite() && v >= 0.0 {
                Ok(())
            } else {
                Err(TuningError::Invalid {
                    field,
                    reason: "must be a non-negative number",
                })
            }
        }
        fn ordered(field: &'static str, lo: f64, hi: f64) -> Result<(), TuningError> {
            if lo <= hi {
                Ok(())
            } else {
                Err(TuningError::Invalid {
                    field,
                    reason: "minimum exceeds maximum",
                })
            }
        }

        if self.lives == 0 {
            return Err(TuningError::Invalid {
                field: "lives",
                reason: "must be at least 1",
            });
        }
        if self.explosion_particles == 0 {
            return Err(TuningError::Invalid {
                field: "explosion_particles",
                reason: "must be at least 1",
            });
        }

        positive("spawn_interval_ms", self.spawn_interval_ms)?;
        positive("min_spawn_interval_ms", self.min_spawn_interval_ms)?;
        let decrement = self.spawn_interval_decrement_ms;
        if decrement.is_nan() || decrement < 0.0 {
            return Err(TuningError::Invalid {
                field: "spawn_interval_decrement_ms",
                reason: "must not be negative",
            });
        }
        ordered(
            "min_spawn_interval_ms",
            self.min_spawn_interval_ms,
            self.spawn_interval_ms,
        )?;

        positive("desktop_spawn_range", self.desktop_spawn_range)?;
        positive("constrained_spawn_range", self.constrained_spawn_range)?;
        positive("launch_speed_min", self.launch_speed_min)?;
        ordered("launch_speed_max", self.launch_speed_min, self.launch_speed_max)?;
        non_negative("launch_drift_max", self.launch_drift_max)?;
        non_negative("fruit_spin_max", self.fruit_spin_max)?;

        positive("fruit_gravity", self.fruit_gravity)?;
        positive("particle_gravity", self.particle_gravity)?;
        positive("slice_radius", self.slice_radius)?;
        positive("speed_threshold", self.speed_threshold)?;
        if self.press_speed <= self.speed_threshold {
            return Err(TuningError::Invalid {
                field: "press_speed",
                reason: "must exceed speed_threshold so taps can slice",
            });
        }

        ordered(
            "particle_speed_max",
            self.particle_speed_min,
            self.particle_speed_max,
        )?;
        non_negative("particle_lift_max", self.particle_lift_max)?;
        non_negative("particle_spin_max", self.particle_spin_max)?;
        positive("particle_lifetime_min_ms", self.particle_lifetime_min_ms)?;
        ordered(
            "particle_lifetime_max_ms",
            self.particle_lifetime_min_ms,
            self.particle_lifetime_max_ms,
        )?;
        positive("trail_lifetime_ms", self.trail_lifetime_ms)?;

        Ok(())
    }
}

/// What the host knows about the screen, consulted at spawn time
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Small/mobile viewport: fruit spawn in a narrower band
    pub constrained: bool,
    /// Explicit spawn range, wins over the tuning ranges when set
    pub spawn_range_override: Option<f64>,
}

impl Viewport {
    pub fn desktop() -> Self {
        Self::default()
    }

    /// Classify a screen. Very narrow mobile screens get an even tighter band.
    pub fn from_screen(is_mobile: bool, width_px: f64) -> Self {
        let spawn_range_override = (is_mobile && width_px < NARROW_VIEWPORT_PX)
            .then_some(NARROW_SPAWN_RANGE);
        Self {
            constrained: is_mobile,
            spawn_range_override,
        }
    }

    /// Horizontal spawn span for this viewport
    pub fn spawn_range(&self, tuning: &Tuning) -> f64 {
        match self.spawn_range_override {
            Some(range) if range > 0.0 => range,
            _ if self.constrained => tuning.constrained_spawn_range,
            _ => tuning.desktop_spawn_range,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.lives, 5);
        assert_eq!(tuning.spawn_interval_ms, 1500.0);
        assert_eq!(tuning.explosion_particles, 12);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "lives": 3, "slice_radius": 2.5 }"#).unwrap();
        assert_eq!(tuning.lives, 3);
        assert_eq!(tuning.slice_radius, 2.5);
        assert_eq!(tuning.fruit_gravity, FRUIT_GRAVITY);
        assert_eq!(tuning.min_spawn_interval_ms, MIN_SPAWN_INTERVAL_MS);
    }

    #[test]
    fn test_json_round_trip() {
        let tuning = Tuning {
            lives: 7,
            ..Default::default()
        };
        let back = Tuning::from_json(&tuning.to_json()).unwrap();
        assert_eq!(back, tuning);
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Tuning::from_json("{ lives: ").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_rejects_invalid_values() {
        let err = Tuning::from_json(r#"{ "lives": 0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "lives", .. }));

        let err = Tuning::from_json(r#"{ "fruit_gravity": -1.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "fruit_gravity",
                ..
            }
        ));

        let err = Tuning::from_json(r#"{ "min_spawn_interval_ms": 2000.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "min_spawn_interval_ms",
                ..
            }
        ));

        let err = Tuning::from_json(r#"{ "press_speed": 10.0 }"#).unwrap_err();
        assert!(err.to_string().contains("press_speed"));
    }

    #[test]
    fn test_rejects_bad_draw_ranges() {
        let cases = [
            (r#"{ "launch_drift_max": -1.0 }"#, "launch_drift_max"),
            (r#"{ "fruit_spin_max": -0.5 }"#, "fruit_spin_max"),
            (r#"{ "particle_lift_max": -2.0 }"#, "particle_lift_max"),
            (r#"{ "particle_spin_max": -3.0 }"#, "particle_spin_max"),
            (
                r#"{ "particle_lifetime_min_ms": 1500.0, "particle_lifetime_max_ms": 900.0 }"#,
                "particle_lifetime_max_ms",
            ),
            (
                r#"{ "particle_speed_min": 20.0, "particle_speed_max": 10.0 }"#,
                "particle_speed_max",
            ),
        ];
        for (json, expected) in cases {
            match Tuning::from_json(json) {
                Err(TuningError::Invalid { field, .. }) => assert_eq!(field, expected, "{json}"),
                other => panic!("{json} should be rejected, got {other:?}"),
            }
        }

        // Zero spread is a valid way to switch the effect off
        let flat = Tuning::from_json(r#"{ "launch_drift_max": 0.0, "particle_lift_max": 0.0 }"#);
        assert!(flat.is_ok());
    }

    #[test]
    fn test_zero_drift_session_runs() {
        use crate::sim::{GameState, frame, start_session};

        let tuning = Tuning::from_json(r#"{ "launch_drift_max": 0.0 }"#).unwrap();
        let mut state = GameState::with_tuning(3, tuning, Viewport::desktop());
        start_session(&mut state);
        frame(&mut state, 0.0);
        frame(&mut state, 1600.0);
        assert_eq!(state.fruits.len(), 1);
        assert_eq!(state.fruits.fruits[0].body.vel.x, 0.0);
    }

    #[test]
    fn test_fallback_to_defaults() {
        let tuning = Tuning::from_json_or_default("not json");
        assert_eq!(tuning, Tuning::default());
    }

    #[test]
    fn test_viewport_spawn_range() {
        let tuning = Tuning::default();
        assert_eq!(Viewport::desktop().spawn_range(&tuning), 24.0);

        let mobile = Viewport::from_screen(true, 800.0);
        assert!(mobile.constrained);
        assert_eq!(mobile.spawn_range(&tuning), 14.0);

        let narrow = Viewport::from_screen(true, 360.0);
        assert_eq!(narrow.spawn_range(&tuning), 11.0);

        // Narrow desktop windows are not constrained
        let small_desktop = Viewport::from_screen(false, 360.0);
        assert_eq!(small_desktop.spawn_range(&tuning), 24.0);
    }
}
