//! # driftfield - generative flow fields and an Oklch palette picker
//!
//! Two small sketches drawn onto a software canvas:
//!
//! - a **flow field**: particles drift along headings read from a 3-D noise
//!   field, leaving trails that slowly fade under a translucent wash while
//!   the global hue rotates;
//! - a **palette picker**: a lightness × chroma swatch in the Oklch color
//!   space beside a clickable hue bar, redrawn only when the hue changes.
//!
//! ## Quick Start
//!
//! ```
//! use driftfield::prelude::*;
//!
//! let bounds = Bounds::new(240.0, 180.0);
//! let flow = FlowField::new()
//!     .with_particle_count(300)
//!     .with_seed(42)
//!     .build(bounds);
//!
//! let canvas = PixelCanvas::new(240, 180).unwrap();
//! let mut runner = Runner::new(flow, canvas, Time::fixed_step(1.0 / 60.0));
//! runner.run_frames(30);
//!
//! let (_flow, canvas) = runner.into_parts();
//! let image = canvas.to_image().unwrap();
//! assert_eq!(image.dimensions(), (240, 180));
//! ```
//!
//! ## Core Concepts
//!
//! ### Sketches
//!
//! A [`Sketch`] is set up once, then drawn per frame through the [`Canvas`]
//! trait. Looping sketches (the flow field) draw every frame; the picker draws
//! once and then only after a click changes the hue. [`Runner`] is the
//! headless host: it owns a [`PixelCanvas`], a [`Time`] and an [`Input`] queue.
//!
//! ### Color
//!
//! Colors are computed in f64 and clamped to the displayable range only when
//! handed to the canvas:
//!
//! | Type | Meaning |
//! |------|---------|
//! | [`Oklch`] | polar perceptual color (lightness, chroma, hue) |
//! | [`Oklab`] | rectangular perceptual color |
//! | [`LinearRgb`] | linear-light sRGB, may be out of gamut |
//! | [`Hsl`] | hue / saturation / lightness |
//! | [`Rgba`] | canvas pixel, `f32` straight alpha |
//!
//! ### Configuration
//!
//! [`SketchConfig`] loads from JSON with every field optional.

pub mod canvas;
pub mod color;
pub mod config;
pub mod error;
pub mod field;
pub mod input;
pub mod lifecycle;
pub mod particle;
pub mod picker;
pub mod simulation;
pub mod sketch;
pub mod spawn;
pub mod time;
pub mod visuals;

pub use canvas::{Canvas, PixelCanvas};
pub use color::{Hsl, LinearRgb, Oklab, Oklch, Rgba};
pub use config::{FlowConfig, SketchConfig};
pub use error::{Result, SketchError};
pub use field::{FieldConfig, NoiseField};
pub use glam::DVec2;
pub use input::{HostEvent, Input, MouseButton};
pub use lifecycle::Lifecycle;
pub use particle::Particle;
pub use picker::{PalettePicker, PickerLayout};
pub use simulation::{FlowField, FlowFieldState};
pub use sketch::{FrameContext, Runner, Sketch};
pub use spawn::{Bounds, SpawnContext};
pub use time::Time;
pub use visuals::{FlowStyle, Paint};

/// Convenient imports for typical usage.
///
/// ```
/// use driftfield::prelude::*;
/// ```
pub mod prelude {
    pub use crate::canvas::{Canvas, PixelCanvas};
    pub use crate::color::{Hsl, LinearRgb, Oklab, Oklch, Rgba};
    pub use crate::config::{FlowConfig, SketchConfig};
    pub use crate::field::{FieldConfig, NoiseField};
    pub use crate::input::{Input, MouseButton};
    pub use crate::lifecycle::Lifecycle;
    pub use crate::particle::Particle;
    pub use crate::picker::{PalettePicker, PickerLayout};
    pub use crate::simulation::{FlowField, FlowFieldState};
    pub use crate::sketch::{FrameContext, Runner, Sketch};
    pub use crate::spawn::Bounds;
    pub use crate::time::Time;
    pub use crate::visuals::{FlowStyle, Paint};
    pub use crate::DVec2;
}
