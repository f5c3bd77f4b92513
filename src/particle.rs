//! Flow-field particle and its per-frame transition.
//!
//! [`Particle::step`] is the whole state machine: follow the field one unit,
//! age by one, and respawn if the lifetime is exceeded. It does no drawing;
//! the returned [`Step`] carries everything a renderer needs.

use crate::field::{map_range, NoiseField};
use crate::lifecycle::Lifecycle;
use crate::spawn::{Bounds, SpawnContext};
use glam::DVec2;
use std::f64::consts::TAU;

/// Position plus age in frames. Position is not bounded; only respawn
/// brings a particle back onto the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: DVec2,
    pub age: u32,
}

/// Read-only inputs for one frame of particle updates.
#[derive(Debug, Clone, Copy)]
pub struct StepContext<'a> {
    pub field: &'a NoiseField,
    pub bounds: Bounds,
    pub lifecycle: Lifecycle,
    /// Elapsed seconds.
    pub time: f64,
    /// Global hue offset in degrees.
    pub color_bias: f64,
}

/// Result of advancing a particle by one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub particle: Particle,
    /// Heading followed this frame, in radians.
    pub heading: f64,
    /// Drawing hue in degrees, `[0, 360)`.
    pub hue: f64,
    pub respawned: bool,
}

impl Particle {
    pub const fn new(position: DVec2, age: u32) -> Self {
        Self { position, age }
    }

    /// Fresh particle at a random position with a random age.
    pub fn spawn(bounds: Bounds, lifecycle: &Lifecycle, spawn: &mut SpawnContext) -> Self {
        Self {
            position: spawn.random_in_bounds(bounds),
            age: lifecycle.spawn_age(spawn),
        }
    }

    /// Advance one frame.
    pub fn step(self, ctx: &StepContext<'_>, spawn: &mut SpawnContext) -> Step {
        let heading = ctx.field.heading_at(self.position, ctx.bounds, ctx.time);
        let moved = Particle {
            position: self.position + DVec2::from_angle(heading),
            age: self.age.saturating_add(1),
        };
        let hue = heading_hue(heading, ctx.color_bias);

        if ctx.lifecycle.is_expired(moved.age) {
            Step {
                particle: Particle::spawn(ctx.bounds, &ctx.lifecycle, spawn),
                heading,
                hue,
                respawned: true,
            }
        } else {
            Step {
                particle: moved,
                heading,
                hue,
                respawned: false,
            }
        }
    }
}

/// Drawing hue for a heading: `bias + map(heading, 0, 2π, -60, 60)`, wrapped
/// to `[0, 360)`.
#[inline]
pub fn heading_hue(heading: f64, color_bias: f64) -> f64 {
    (color_bias + map_range(heading, 0.0, TAU, -60.0, 60.0)).rem_euclid(360.0)
}
