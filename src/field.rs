//! Seeded noise field that steers particles.
//!
//! The field samples octave-summed Perlin noise at
//! `(k·x/w, k·y/h, c·t)` and turns the `[0, 1]` sample into a heading.
//! The heading range is `[-2π, 2π]` rather than `[-π, π]`: the doubled range
//! makes neighbouring particles curl more strongly and is part of the look.
//!
//! ```
//! use driftfield::field::NoiseField;
//! use driftfield::spawn::Bounds;
//! use glam::DVec2;
//!
//! let field = NoiseField::new(1234);
//! let bounds = Bounds::new(800.0, 600.0);
//! let a = field.heading_at(DVec2::new(10.0, 20.0), bounds, 1.5);
//! let b = field.heading_at(DVec2::new(10.0, 20.0), bounds, 1.5);
//! assert_eq!(a.to_bits(), b.to_bits());
//! ```

use crate::spawn::Bounds;
use glam::DVec2;
use noise::{NoiseFn, Perlin};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Unclamped linear remap of `value` from `[in_min, in_max]` to `[out_min, out_max]`.
#[inline]
pub fn map_range(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    out_min + (value - in_min) / (in_max - in_min) * (out_max - out_min)
}

/// Sampling parameters for a [`NoiseField`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Noise periods across the canvas width/height.
    pub spatial_scale: f64,
    /// Noise units advanced per second of elapsed time.
    pub temporal_scale: f64,
    /// Number of summed octaves.
    pub octaves: u32,
    /// Amplitude multiplier applied per octave.
    pub falloff: f64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            spatial_scale: 3.0,
            temporal_scale: 1.0 / 25.0,
            octaves: 4,
            falloff: 0.5,
        }
    }
}

impl FieldConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_spatial_scale(mut self, scale: f64) -> Self {
        self.spatial_scale = scale;
        self
    }

    pub fn with_temporal_scale(mut self, scale: f64) -> Self {
        self.temporal_scale = scale;
        self
    }

    /// Set octave count and per-octave falloff. At least one octave is always sampled.
    pub fn with_detail(mut self, octaves: u32, falloff: f64) -> Self {
        self.octaves = octaves.max(1);
        self.falloff = falloff;
        self
    }
}

/// Deterministic, seeded scalar noise mapped to headings.
#[derive(Clone)]
pub struct NoiseField {
    noise: Perlin,
    seed: u32,
    config: FieldConfig,
}

impl std::fmt::Debug for NoiseField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoiseField")
            .field("seed", &self.seed)
            .field("config", &self.config)
            .finish()
    }
}

impl NoiseField {
    /// Field with the default sampling parameters.
    pub fn new(seed: u32) -> Self {
        Self::with_config(seed, FieldConfig::default())
    }

    pub fn with_config(seed: u32, config: FieldConfig) -> Self {
        Self {
            noise: Perlin::new(seed),
            seed,
            config,
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Raw octave-summed sample in `[0, 1]` at noise-space coordinates.
    pub fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        let octaves = self.config.octaves.max(1);
        let mut total = 0.0;
        let mut weight = 0.0;
        let mut amplitude = 0.5;
        let mut frequency = 1.0;

        for _ in 0..octaves {
            let n = self.noise.get([x * frequency, y * frequency, z * frequency]);
            total += amplitude * (n * 0.5 + 0.5);
            weight += amplitude;
            amplitude *= self.config.falloff;
            frequency *= 2.0;
        }

        if weight <= 0.0 {
            return 0.5;
        }
        (total / weight).clamp(0.0, 1.0)
    }

    /// Sample in `[0, 1]` for a canvas position at elapsed time `t` (seconds).
    pub fn sample_at(&self, position: DVec2, bounds: Bounds, t: f64) -> f64 {
        let k = self.config.spatial_scale;
        self.sample(
            k * position.x / bounds.width,
            k * position.y / bounds.height,
            self.config.temporal_scale * t,
        )
    }

    /// Heading in radians, in `[-2π, 2π]`.
    pub fn heading_at(&self, position: DVec2, bounds: Bounds, t: f64) -> f64 {
        sample_to_heading(self.sample_at(position, bounds, t))
    }
}

/// Linear map of a `[0, 1]` sample onto `[-2π, 2π]`.
#[inline]
pub fn sample_to_heading(sample: f64) -> f64 {
    map_range(sample, 0.0, 1.0, -TAU, TAU)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_range() {
        assert_eq!(map_range(0.5, 0.0, 1.0, 0.0, 10.0), 5.0);
        assert_eq!(map_range(2.0, 0.0, 1.0, 0.0, 10.0), 20.0);
        assert_eq!(map_range(0.0, 0.0, 1.0, 1.0, 0.0), 1.0);
    }

    #[test]
    fn test_sample_to_heading_range() {
        assert!((sample_to_heading(0.0) + TAU).abs() < 1e-12);
        assert!((sample_to_heading(1.0) - TAU).abs() < 1e-12);
        assert!(sample_to_heading(0.5).abs() < 1e-12);
    }

    #[test]
    fn test_heading_is_pure() {
        let field = NoiseField::new(1234);
        let bounds = Bounds::new(640.0, 480.0);
        let p = DVec2::new(123.4, 56.7);
        let a = field.heading_at(p, bounds, 12.5);
        let b = field.heading_at(p, bounds, 12.5);
        assert_eq!(a.to_bits(), b.to_bits());

        let other = NoiseField::new(1234);
        assert_eq!(other.heading_at(p, bounds, 12.5).to_bits(), a.to_bits());
    }

    #[test]
    fn test_seed_changes_field() {
        let bounds = Bounds::new(640.0, 480.0);
        let a = NoiseField::new(1);
        let b = NoiseField::new(2);
        let differs = (0..32).any(|i| {
            let p = DVec2::new(i as f64 * 17.3, i as f64 * 9.1);
            a.heading_at(p, bounds, 0.3) != b.heading_at(p, bounds, 0.3)
        });
        assert!(differs);
    }

    #[test]
    fn test_sample_stays_in_unit_range() {
        let field = NoiseField::new(99);
        for i in 0..500 {
            let v = field.sample(i as f64 * 0.137, i as f64 * 0.291, i as f64 * 0.05);
            assert!((0.0..=1.0).contains(&v), "sample {} out of range", v);
        }
    }

    #[test]
    fn test_field_is_coherent() {
        let field = NoiseField::new(7);
        let a = field.sample(0.31, 0.47, 0.2);
        let b = field.sample(0.3101, 0.4701, 0.2);
        assert!((a - b).abs() < 0.01);
    }

    #[test]
    fn test_spatial_scale_changes_heading() {
        let bounds = Bounds::new(640.0, 480.0);
        let coarse = NoiseField::new(1234);
        let fine = NoiseField::with_config(1234, FieldConfig::new().with_spatial_scale(12.0));
        assert_eq!(fine.config().spatial_scale, 12.0);
        let differs = (1..32).any(|i| {
            let p = DVec2::new(i as f64 * 17.3, i as f64 * 9.1);
            coarse.heading_at(p, bounds, 0.3) != fine.heading_at(p, bounds, 0.3)
        });
        assert!(differs);
    }

    #[test]
    fn test_zero_temporal_scale_freezes_field() {
        let bounds = Bounds::new(640.0, 480.0);
        let field = NoiseField::with_config(5, FieldConfig::new().with_temporal_scale(0.0));
        let p = DVec2::new(100.0, 200.0);
        assert_eq!(
            field.heading_at(p, bounds, 0.0).to_bits(),
            field.heading_at(p, bounds, 37.5).to_bits()
        );
    }

    #[test]
    fn test_detail_keeps_one_octave() {
        let config = FieldConfig::new().with_detail(0, 0.5);
        assert_eq!(config.octaves, 1);
    }
}
