//! Spawn context for particle (re)initialization.
//!
//! Every random draw a simulation makes goes through one [`SpawnContext`],
//! seeded from the simulation seed, so a whole run is reproducible.

use glam::DVec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Canvas extent particles spawn into. The origin is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether `position` lies inside `[0, width] × [0, height]`.
    pub fn contains(&self, position: DVec2) -> bool {
        position.x >= 0.0 && position.x <= self.width && position.y >= 0.0 && position.y <= self.height
    }
}

/// Canvas size as a fraction of the viewport, rounded down to whole pixels
/// and never smaller than 1×1.
pub fn viewport_canvas_size(viewport_width: f64, viewport_height: f64, fraction: f64) -> (u32, u32) {
    let w = (viewport_width * fraction).floor().max(1.0);
    let h = (viewport_height * fraction).floor().max(1.0);
    (w as u32, h as u32)
}

/// Random source with helpers for spawning particles.
#[derive(Debug, Clone)]
pub struct SpawnContext {
    rng: SmallRng,
}

impl SpawnContext {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Random f64 between 0.0 and 1.0.
    #[inline]
    pub fn random(&mut self) -> f64 {
        self.rng.gen()
    }

    /// Random f64 in `[min, max)`. Returns `min` for an empty range.
    #[inline]
    pub fn random_range(&mut self, min: f64, max: f64) -> f64 {
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..max)
    }

    /// Uniform point within the bounds.
    pub fn random_in_bounds(&mut self, bounds: Bounds) -> DVec2 {
        DVec2::new(
            self.random_range(0.0, bounds.width),
            self.random_range(0.0, bounds.height),
        )
    }

    /// Uniform integer age in `[0, max_age]`, both ends inclusive.
    pub fn random_age(&mut self, max_age: u32) -> u32 {
        self.rng.gen_range(0..=max_age)
    }

    /// Uniform hue in `[0, 360)` degrees.
    pub fn random_hue(&mut self) -> f64 {
        self.random_range(0.0, 360.0)
    }
}
