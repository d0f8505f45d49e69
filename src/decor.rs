//! Seeded sparkle field drawn around the carousel.
//!
//! Particle placement is rolled once from a seed; after that the field is a
//! pure function of time and never touches scroll state.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// One decorative particle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sparkle {
    pub position: Vec3,
    /// Twinkle phase offset in radians.
    pub phase: f32,
    /// Twinkle rate in radians per second.
    pub speed: f32,
}

/// A fixed set of sparkles inside an axis-aligned box centered on the origin.
#[derive(Clone, Debug)]
pub struct SparkleField {
    sparkles: Vec<Sparkle>,
}

impl SparkleField {
    /// Scatter `count` sparkles inside `half_size` around the origin.
    pub fn new(seed: u64, count: usize, half_size: Vec3) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let half = half_size.abs();
        let sparkles = (0..count)
            .map(|_| Sparkle {
                position: Vec3::new(
                    symmetric(&mut rng, half.x),
                    symmetric(&mut rng, half.y),
                    symmetric(&mut rng, half.z),
                ),
                phase: rng.gen_range(0.0..TAU),
                speed: rng.gen_range(0.5..2.5),
            })
            .collect();
        Self { sparkles }
    }

    pub fn sparkles(&self) -> &[Sparkle] {
        &self.sparkles
    }

    pub fn len(&self) -> usize {
        self.sparkles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sparkles.is_empty()
    }

    /// Brightness of sparkle `index` at `time` seconds, in `[0, 1]`.
    pub fn intensity(&self, index: usize, time: f32) -> f32 {
        self.sparkles
            .get(index)
            .map(|s| 0.5 + 0.5 * (time * s.speed + s.phase).sin())
            .unwrap_or(0.0)
    }
}

fn symmetric(rng: &mut StdRng, half: f32) -> f32 {
    if half > 0.0 {
        rng.gen_range(-half..=half)
    } else {
        0.0
    }
}
