//! Falling fruit and their physics
//!
//! Fruit launch upward from the bottom boundary, arc under a light gravity and
//! are lost when they fall back below it.

use glam::DVec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::kinematics::Body;
use super::spawn::SpawnRequest;
use crate::tuning::Tuning;

/// Fruit varieties (shape + colour for the renderer)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FruitKind {
    Apple,
    Orange,
    Lime,
    Peach,
    /// Torus-shaped
    PlumRing,
    /// Cone-shaped
    BerryCone,
}

impl FruitKind {
    pub const ALL: [FruitKind; 6] = [
        FruitKind::Apple,
        FruitKind::Orange,
        FruitKind::Lime,
        FruitKind::Peach,
        FruitKind::PlumRing,
        FruitKind::BerryCone,
    ];

    /// 0xRRGGBB
    pub fn color(&self) -> u32 {
        match self {
            FruitKind::Apple => 0xff0000,
            FruitKind::Orange => 0xff7f00,
            FruitKind::Lime => 0x00cc00,
            FruitKind::Peach => 0xffccaa,
            FruitKind::PlumRing => 0x9900ff,
            FruitKind::BerryCone => 0xff6699,
        }
    }

    /// Visual radius in world units
    pub fn radius(&self) -> f64 {
        match self {
            FruitKind::Apple => 1.8,
            FruitKind::Orange => 1.6,
            FruitKind::Lime => 2.0,
            FruitKind::Peach => 1.5,
            FruitKind::PlumRing => 1.2,
            FruitKind::BerryCone => 1.2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FruitKind::Apple => "apple",
            FruitKind::Orange => "orange",
            FruitKind::Lime => "lime",
            FruitKind::Peach => "peach",
            FruitKind::PlumRing => "plum_ring",
            FruitKind::BerryCone => "berry_cone",
        }
    }
}

/// A live fruit
#[derive(Debug, Clone)]
pub struct Fruit {
    pub id: u32,
    pub kind: FruitKind,
    pub body: Body,
    pub sliced: bool,
}

impl Fruit {
    /// Build a fruit for a spawn request: bottom edge, always launched upward
    pub fn launch<R: Rng>(id: u32, request: SpawnRequest, tuning: &Tuning, rng: &mut R) -> Self {
        let kind = FruitKind::ALL[rng.random_range(0..FruitKind::ALL.len())];

        let drift = tuning.launch_drift_max;
        let vel = DVec3::new(
            rng.random_range(-drift..=drift),
            rng.random_range(tuning.launch_speed_min..=tuning.launch_speed_max),
            0.0,
        );
        let spin = DVec3::new(
            rng.random::<f64>() * tuning.fruit_spin_max,
            rng.random::<f64>() * tuning.fruit_spin_max,
            rng.random::<f64>() * tuning.fruit_spin_max,
        );

        Self {
            id,
            kind,
            body: Body::new(
                DVec3::new(request.x, tuning.bottom_boundary, 0.0),
                vel,
                spin,
            ),
            sliced: false,
        }
    }

    pub fn pos(&self) -> DVec3 {
        self.body.pos
    }
}

/// Owns the live fruit (stable iteration order: spawn order)
#[derive(Debug, Clone, Default)]
pub struct FruitField {
    pub fruits: Vec<Fruit>,
}

impl FruitField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.fruits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fruits.is_empty()
    }

    pub fn clear(&mut self) {
        self.fruits.clear();
    }

    pub fn push(&mut self, fruit: Fruit) {
        self.fruits.push(fruit);
    }

    pub fn get(&self, id: u32) -> Option<&Fruit> {
        self.fruits.iter().find(|f| f.id == id)
    }

    /// Advance every fruit, then drop those below the bottom boundary.
    ///
    /// Ids of dropped fruit that were never sliced are appended to `missed`.
    pub fn integrate(&mut self, dt: f64, tuning: &Tuning, missed: &mut Vec<u32>) {
        for fruit in &mut self.fruits {
            fruit.body.step_planar(tuning.fruit_gravity, dt);
        }

        let bottom = tuning.bottom_boundary;
        self.fruits.retain(|fruit| {
            if fruit.body.pos.y < bottom {
                if !fruit.sliced {
                    missed.push(fruit.id);
                }
                false
            } else {
                true
            }
        });
    }

    /// Drop sliced fruit (their explosions are already queued)
    pub fn remove_sliced(&mut self) {
        self.fruits.retain(|f| !f.sliced);
    }
}
