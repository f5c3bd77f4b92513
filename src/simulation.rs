//! Flow-field simulation builder and per-frame state.
//!
//! ```
//! use driftfield::prelude::*;
//!
//! let mut canvas = PixelCanvas::new(320, 240).unwrap();
//! let mut flow = FlowField::new()
//!     .with_particle_count(200)
//!     .with_seed(7)
//!     .build(Bounds::new(320.0, 240.0));
//!
//! flow.setup(&mut canvas);
//! flow.update(1.0 / 60.0, &mut canvas);
//! assert_eq!(flow.particles().len(), 200);
//! ```

use crate::canvas::Canvas;
use crate::config::FlowConfig;
use crate::field::{FieldConfig, NoiseField};
use crate::lifecycle::Lifecycle;
use crate::particle::{Particle, StepContext};
use crate::sketch::{FrameContext, Sketch};
use crate::spawn::{viewport_canvas_size, Bounds, SpawnContext};
use crate::visuals::FlowStyle;

/// Seconds per full rotation of the global hue by default (9°/s).
pub const DEFAULT_HUE_PERIOD: f64 = 40.0;

/// Global hue offset after `elapsed` seconds: `(t · 360 / period) mod 360`.
#[inline]
pub fn color_bias_at(elapsed: f64, period: f64) -> f64 {
    (elapsed * (360.0 / period)).rem_euclid(360.0)
}

/// Builder for a flow-field simulation.
#[derive(Debug, Clone)]
pub struct FlowField {
    particle_count: usize,
    seed: u32,
    lifecycle: Lifecycle,
    field: FieldConfig,
    style: FlowStyle,
    hue_period: f64,
    canvas_fraction: f64,
}

impl Default for FlowField {
    fn default() -> Self {
        Self::new()
    }
}

impl FlowField {
    /// 1000 particles, seed 1234, 1500-frame lifetime, 40 s hue rotation.
    pub fn new() -> Self {
        Self {
            particle_count: 1000,
            seed: 1234,
            lifecycle: Lifecycle::default(),
            field: FieldConfig::default(),
            style: FlowStyle::default(),
            hue_period: DEFAULT_HUE_PERIOD,
            canvas_fraction: 0.75,
        }
    }

    pub fn from_config(config: &FlowConfig) -> Self {
        Self::new()
            .with_particle_count(config.particle_count)
            .with_seed(config.seed)
            .with_lifecycle(Lifecycle::new(config.max_age))
            .with_field_config(config.field)
            .with_style(config.style)
            .with_hue_period(config.hue_period_secs)
    }

    pub fn with_particle_count(mut self, count: usize) -> Self {
        self.particle_count = count;
        self
    }

    /// Seed for both the noise field and every random draw.
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_lifecycle(mut self, lifecycle: Lifecycle) -> Self {
        self.lifecycle = lifecycle;
        self
    }

    pub fn with_field_config(mut self, field: FieldConfig) -> Self {
        self.field = field;
        self
    }

    pub fn with_style(mut self, style: FlowStyle) -> Self {
        self.style = style;
        self
    }

    /// Seconds per full hue rotation. Non-positive values keep the default.
    pub fn with_hue_period(mut self, secs: f64) -> Self {
        if secs > 0.0 {
            self.hue_period = secs;
        }
        self
    }

    /// Fraction of the viewport the canvas occupies after a resize.
    pub fn with_canvas_fraction(mut self, fraction: f64) -> Self {
        if fraction > 0.0 {
            self.canvas_fraction = fraction;
        }
        self
    }

    /// Spawn the particles and pick the starting hue.
    pub fn build(self, bounds: Bounds) -> FlowFieldState {
        let mut spawn = SpawnContext::new(u64::from(self.seed));
        let color_bias = spawn.random_hue();
        let particles = (0..self.particle_count)
            .map(|_| Particle::spawn(bounds, &self.lifecycle, &mut spawn))
            .collect();

        FlowFieldState {
            particles,
            field: NoiseField::with_config(self.seed, self.field),
            lifecycle: self.lifecycle,
            style: self.style,
            bounds,
            color_bias,
            hue_period: self.hue_period,
            canvas_fraction: self.canvas_fraction,
            spawn,
        }
    }

    /// [`build`](Self::build) and paint the starting background in one go.
    pub fn start(self, bounds: Bounds, canvas: &mut dyn Canvas) -> FlowFieldState {
        let mut state = self.build(bounds);
        state.setup(canvas);
        state
    }
}

/// A running flow-field simulation.
///
/// Owns every particle and the global hue; nothing else mutates them.
#[derive(Debug, Clone)]
pub struct FlowFieldState {
    particles: Vec<Particle>,
    field: NoiseField,
    lifecycle: Lifecycle,
    style: FlowStyle,
    bounds: Bounds,
    color_bias: f64,
    hue_period: f64,
    canvas_fraction: f64,
    spawn: SpawnContext,
}

impl FlowFieldState {
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Current global hue offset in degrees.
    pub fn color_bias(&self) -> f64 {
        self.color_bias
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn field(&self) -> &NoiseField {
        &self.field
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn style(&self) -> &FlowStyle {
        &self.style
    }

    /// Paint the opaque starting background and set the point size.
    pub fn setup(&mut self, canvas: &mut dyn Canvas) {
        canvas.fill_background(self.style.initial_background(self.color_bias));
        canvas.set_stroke_weight(self.style.stroke_weight);
    }

    /// One frame at `elapsed` seconds: fade, rotate the hue, move and draw
    /// every particle. Returns how many particles respawned.
    pub fn update(&mut self, elapsed: f64, canvas: &mut dyn Canvas) -> usize {
        // The wash uses last frame's bias
        canvas.fill_background(self.style.wash(self.color_bias));

        self.color_bias = color_bias_at(elapsed, self.hue_period);

        let ctx = StepContext {
            field: &self.field,
            bounds: self.bounds,
            lifecycle: self.lifecycle,
            time: elapsed,
            color_bias: self.color_bias,
        };

        let mut respawned = 0;
        for particle in self.particles.iter_mut() {
            let step = particle.step(&ctx, &mut self.spawn);
            *particle = step.particle;
            respawned += usize::from(step.respawned);

            canvas.set_stroke(Some(self.style.particle_paint.rgba(step.hue, 1.0)));
            canvas.point(particle.position.x, particle.position.y);
        }
        respawned
    }

    /// Adopt a new canvas size. Particles keep their positions; only
    /// respawns use the new bounds.
    pub fn resize(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }
}

impl Sketch for FlowFieldState {
    fn setup(&mut self, canvas: &mut dyn Canvas) {
        FlowFieldState::setup(self, canvas);
    }

    fn draw(&mut self, frame: &FrameContext, canvas: &mut dyn Canvas) {
        self.update(frame.elapsed, canvas);
    }

    fn on_resize(&mut self, viewport_width: f64, viewport_height: f64) -> Option<(u32, u32)> {
        let (w, h) = viewport_canvas_size(viewport_width, viewport_height, self.canvas_fraction);
        self.resize(Bounds::new(w as f64, h as f64));
        Some((w, h))
    }
}
