//! Visual configuration for the flow field: how particles and the fading
//! background wash are painted.

use crate::color::{Hsl, LinearRgb, Oklch, Rgba};
use serde::{Deserialize, Serialize};

/// How a hue becomes a drawable color.
///
/// Particles only choose a hue; the paint supplies the remaining two
/// components of the polar color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Paint {
    /// HSL with fixed saturation and lightness (both `[0, 1]`).
    Hsl { saturation: f64, lightness: f64 },
    /// Oklch with fixed lightness and chroma.
    Oklch { lightness: f64, chroma: f64 },
}

impl Default for Paint {
    fn default() -> Self {
        Paint::Hsl {
            saturation: 0.6,
            lightness: 0.6,
        }
    }
}

impl Paint {
    /// Color at `hue` degrees. Oklch results may be out of gamut.
    pub fn color(&self, hue: f64) -> LinearRgb {
        match *self {
            Paint::Hsl {
                saturation,
                lightness,
            } => Hsl::new(hue, saturation, lightness).to_linear_rgb(),
            Paint::Oklch { lightness, chroma } => Oklch::new(lightness, chroma, hue).to_linear_rgb(),
        }
    }

    pub fn rgba(&self, hue: f64, alpha: f32) -> Rgba {
        self.color(hue).to_rgba(alpha)
    }
}

/// Rendering style of a flow-field sketch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowStyle {
    pub particle_paint: Paint,
    /// Paint of the background; its hue is chosen per frame.
    pub wash_paint: Paint,
    /// Opacity of the per-frame wash. Lower values leave longer trails.
    pub wash_alpha: f32,
    /// Point diameter in pixels.
    pub stroke_weight: f64,
}

impl Default for FlowStyle {
    fn default() -> Self {
        Self {
            particle_paint: Paint::default(),
            wash_paint: Paint::Hsl {
                saturation: 0.25,
                lightness: 0.10,
            },
            wash_alpha: 0.02,
            stroke_weight: 4.0,
        }
    }
}

impl FlowStyle {
    pub fn with_particle_paint(mut self, paint: Paint) -> Self {
        self.particle_paint = paint;
        self
    }

    pub fn with_wash_alpha(mut self, alpha: f32) -> Self {
        self.wash_alpha = alpha.clamp(0.0, 1.0);
        self
    }

    pub fn with_stroke_weight(mut self, weight: f64) -> Self {
        self.stroke_weight = weight.max(0.0);
        self
    }

    /// Translucent wash in the complement of `color_bias`.
    pub fn wash(&self, color_bias: f64) -> Rgba {
        self.wash_paint
            .rgba((color_bias + 180.0).rem_euclid(360.0), self.wash_alpha)
    }

    /// Opaque fill used once at setup, at the bias itself.
    pub fn initial_background(&self, color_bias: f64) -> Rgba {
        self.wash_paint.rgba(color_bias, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paint_matches_hsl() {
        let c = Paint::default().color(200.0);
        let expected = Hsl::new(200.0, 0.6, 0.6).to_linear_rgb();
        assert_eq!(c, expected);
    }

    #[test]
    fn test_oklch_paint() {
        let paint = Paint::Oklch {
            lightness: 0.7,
            chroma: 0.1,
        };
        assert_eq!(paint.color(30.0), Oklch::new(0.7, 0.1, 30.0).to_linear_rgb());
    }

    #[test]
    fn test_wash_uses_complement() {
        let style = FlowStyle::default();
        let wash = style.wash(10.0);
        let complement = style.wash_paint.rgba(190.0, 0.02);
        assert_eq!(wash, complement);
        assert!((wash.a - 0.02).abs() < 1e-6);
    }

    #[test]
    fn test_initial_background_is_opaque() {
        let style = FlowStyle::default();
        assert_eq!(style.initial_background(42.0).a, 1.0);
    }

    #[test]
    fn test_wash_alpha_is_clamped() {
        assert_eq!(FlowStyle::default().with_wash_alpha(2.0).wash_alpha, 1.0);
        assert_eq!(FlowStyle::default().with_wash_alpha(-0.5).wash_alpha, 0.0);
        let style = FlowStyle::default().with_wash_alpha(2.0);
        assert_eq!(style.wash(0.0).a, 1.0);
    }

    #[test]
    fn test_stroke_weight_not_negative() {
        assert_eq!(FlowStyle::default().with_stroke_weight(-3.0).stroke_weight, 0.0);
        assert_eq!(FlowStyle::default().with_stroke_weight(1.5).stroke_weight, 1.5);
    }

    #[test]
    fn test_particle_paint_setter() {
        let paint = Paint::Oklch {
            lightness: 0.7,
            chroma: 0.1,
        };
        let style = FlowStyle::default().with_particle_paint(paint);
        assert_eq!(style.particle_paint.rgba(30.0, 1.0), paint.rgba(30.0, 1.0));
        assert_ne!(style.particle_paint, Paint::default());
    }

    #[test]
    fn test_paint_json_tag() {
        let json = r#"{"mode":"oklch","lightness":0.75,"chroma":0.12}"#;
        let paint: Paint = serde_json::from_str(json).unwrap();
        assert_eq!(
            paint,
            Paint::Oklch {
                lightness: 0.75,
                chroma: 0.12
            }
        );
    }
}
