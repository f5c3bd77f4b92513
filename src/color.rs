//! Color model: Oklch → Oklab → linear RGB, plus the HSL mode used for washes.
//!
//! The perceptual path follows Björn Ottosson's Oklab approximation. The two
//! mixing matrices below are fitted constants and must not be tuned; changing
//! any digit changes the rendered palette.
//!
//! # Example
//!
//! ```
//! use driftfield::color::{LinearRgb, Oklch};
//!
//! let rgb: LinearRgb = Oklch::new(0.8, 0.1, 240.0).into();
//! if rgb.is_in_gamut() {
//!     let _drawable = rgb.to_rgba(1.0);
//! }
//! ```
//!
//! Reference: <https://bottosson.github.io/posts/oklab/>

use bytemuck::{Pod, Zeroable};
use glam::{DMat3, DVec3};
use serde::{Deserialize, Serialize};

/// Oklab `(L, a, b)` → nonlinear cone response `(l', m', s')`.
///
/// Columns are the coefficients of `L`, `a` and `b` respectively.
pub const OKLAB_TO_LMS: DMat3 = DMat3::from_cols(
    DVec3::new(1.0, 1.0, 1.0),
    DVec3::new(0.3963377774, -0.1055613458, -0.0894841775),
    DVec3::new(0.2158037573, -0.0638541728, -1.2914855480),
);

/// Linear cone response `(l, m, s)` → linear RGB.
///
/// Columns are the coefficients of `l`, `m` and `s` respectively.
pub const LMS_TO_LINEAR_RGB: DMat3 = DMat3::from_cols(
    DVec3::new(4.0767416621, -1.2684380046, -0.0041960863),
    DVec3::new(-3.3077115913, 2.6097574011, -0.7034186147),
    DVec3::new(0.2309699292, -0.3413193965, 1.7076147010),
);

/// Polar perceptual color.
///
/// - `l`: lightness, 0.0 (black) to 1.0 (white)
/// - `c`: chroma, 0.0 (grey) up to roughly 0.4 for the most saturated colors
/// - `h`: hue angle in degrees; any value is accepted, the trigonometry wraps it
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Oklch {
    pub l: f64,
    pub c: f64,
    pub h: f64,
}

impl Oklch {
    pub const fn new(l: f64, c: f64, h: f64) -> Self {
        Self { l, c, h }
    }

    /// Polar → Cartesian: `a = C·cos(h)`, `b = C·sin(h)` with `h` in degrees.
    #[inline]
    pub fn to_oklab(self) -> Oklab {
        let h_rad = self.h * std::f64::consts::PI / 180.0;
        Oklab {
            l: self.l,
            a: self.c * h_rad.cos(),
            b: self.c * h_rad.sin(),
        }
    }

    #[inline]
    pub fn to_linear_rgb(self) -> LinearRgb {
        self.to_oklab().to_linear_rgb()
    }

    /// Same color with a different hue.
    pub fn with_hue(self, h: f64) -> Self {
        Self { h, ..self }
    }
}

/// Cartesian perceptual color.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Oklab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl Oklab {
    /// Oklab → linear RGB.
    ///
    /// Mix into cone space, cube each component, then mix into RGB.
    pub fn to_linear_rgb(self) -> LinearRgb {
        let lms_ = OKLAB_TO_LMS * DVec3::new(self.l, self.a, self.b);
        let lms = lms_ * lms_ * lms_;
        let rgb = LMS_TO_LINEAR_RGB * lms;
        LinearRgb::new(rgb.x, rgb.y, rgb.z)
    }

    /// Cartesian → polar. Hue is normalized to `[0, 360)`; achromatic
    /// colors report hue 0.
    pub fn to_oklch(self) -> Oklch {
        let c = self.a.hypot(self.b);
        let h = self.b.atan2(self.a).to_degrees().rem_euclid(360.0);
        Oklch { l: self.l, c, h }
    }
}

impl From<Oklch> for Oklab {
    fn from(lch: Oklch) -> Self {
        lch.to_oklab()
    }
}

impl From<Oklab> for Oklch {
    fn from(lab: Oklab) -> Self {
        lab.to_oklch()
    }
}

impl From<Oklab> for LinearRgb {
    fn from(lab: Oklab) -> Self {
        lab.to_linear_rgb()
    }
}

impl From<Oklch> for LinearRgb {
    fn from(lch: Oklch) -> Self {
        lch.to_linear_rgb()
    }
}

/// Linear display color. Channels are nominally in `[0, 1]`; anything
/// outside that range is out of gamut.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LinearRgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// True when a single channel value cannot be displayed.
#[inline]
pub fn channel_out_of_range(v: f64) -> bool {
    v < 0.0 || v > 1.0
}

impl LinearRgb {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// True when every channel lies in `[0, 1]`.
    #[inline]
    pub fn is_in_gamut(&self) -> bool {
        !(channel_out_of_range(self.r) || channel_out_of_range(self.g) || channel_out_of_range(self.b))
    }

    pub fn clamped(self) -> Self {
        Self::new(self.r.clamp(0.0, 1.0), self.g.clamp(0.0, 1.0), self.b.clamp(0.0, 1.0))
    }

    /// Drawable color. Out-of-gamut channels are clamped here, at draw time.
    pub fn to_rgba(self, alpha: f32) -> Rgba {
        let c = self.clamped();
        Rgba::new(c.r as f32, c.g as f32, c.b as f32, alpha.clamp(0.0, 1.0))
    }
}

/// HSL color with hue in degrees and saturation/lightness in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    /// Convert to RGB. Hue wraps, so -30 and 330 are the same color.
    pub fn to_linear_rgb(self) -> LinearRgb {
        let h = self.h.rem_euclid(360.0) / 60.0;
        let s = self.s.clamp(0.0, 1.0);
        let l = self.l.clamp(0.0, 1.0);

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let m = l - c / 2.0;

        let (r, g, b) = match h as u32 % 6 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        LinearRgb::new(r + m, g + m, b + m)
    }
}

impl From<Hsl> for LinearRgb {
    fn from(hsl: Hsl) -> Self {
        hsl.to_linear_rgb()
    }
}

/// Straight-alpha pixel value as stored by [`PixelCanvas`](crate::canvas::PixelCanvas).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque grey.
    pub const fn gray(v: f32) -> Self {
        Self::new(v, v, v, 1.0)
    }

    /// Composite `self` over `dst` (source-over, straight alpha).
    #[inline]
    pub fn over(self, dst: Rgba) -> Rgba {
        let sa = self.a;
        if sa >= 1.0 {
            return self;
        }
        if sa <= 0.0 {
            return dst;
        }
        let dw = dst.a * (1.0 - sa);
        let out_a = sa + dw;
        if out_a <= 0.0 {
            return Rgba::TRANSPARENT;
        }
        Rgba {
            r: (self.r * sa + dst.r * dw) / out_a,
            g: (self.g * sa + dst.g * dw) / out_a,
            b: (self.b * sa + dst.b * dw) / out_a,
            a: out_a,
        }
    }
}
