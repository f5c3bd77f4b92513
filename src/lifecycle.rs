//! Particle lifetime policy.
//!
//! Particles are never removed. Once a particle's age exceeds `max_age`
//! it is recycled: a fresh position and a fresh random age.

use crate::spawn::SpawnContext;
use serde::{Deserialize, Serialize};

/// Frames a particle lives by default (25 seconds at 60 fps).
pub const DEFAULT_MAX_AGE: u32 = 60 * 25;

/// Lifetime configuration shared by every particle of a simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lifecycle {
    /// Age, in frames, after which a particle respawns.
    pub max_age: u32,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self {
            max_age: DEFAULT_MAX_AGE,
        }
    }
}

impl Lifecycle {
    pub fn new(max_age: u32) -> Self {
        Self { max_age }
    }

    /// A particle is expired once its age is strictly greater than `max_age`.
    #[inline]
    pub fn is_expired(&self, age: u32) -> bool {
        age > self.max_age
    }

    /// Starting age for a new or recycled particle.
    ///
    /// Random ages stagger respawns so the population never recycles in lockstep.
    pub fn spawn_age(&self, spawn: &mut SpawnContext) -> u32 {
        spawn.random_age(self.max_age)
    }
}
