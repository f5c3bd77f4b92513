//! Oklch palette picker.
//!
//! Two views of the same color model: a lightness × chroma swatch at the
//! selected hue, and a vertical hue bar. Clicking the bar selects a hue and
//! asks for exactly one redraw; nothing renders continuously.
//!
//! ```text
//!  em ┌──────────────┐      ┌──┐
//!     │ L=1          │      │h0│
//!     │   swatch     │      │  │ hue bar
//!     │ L=0  C→0.38  │      │h360
//!     └──────────────┘      └──┘
//! ```

use crate::canvas::Canvas;
use crate::color::{LinearRgb, Oklch, Rgba};
use crate::field::map_range;
use crate::sketch::{FrameContext, Sketch};
use tracing::trace;

/// Chroma at the right edge of the swatch.
pub const SWATCH_MAX_CHROMA: f64 = 0.38;
/// Lightness of the hue bar.
pub const HUE_BAR_LIGHTNESS: f64 = 0.8;
/// Chroma of the hue bar.
pub const HUE_BAR_CHROMA: f64 = 0.38;
/// Hue selected when the picker starts.
pub const DEFAULT_HUE: f64 = 240.0;

/// Axis-aligned rectangle in canvas pixels, edges inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Hit test including all four edges.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }
}

/// Geometry of the picker, everything measured in multiples of `em`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickerLayout {
    pub em: f64,
    pub width: f64,
    pub height: f64,
    pub swatch: Rect,
    pub hue_bar: Rect,
}

impl PickerLayout {
    /// Layout for a 12em × 10em canvas.
    pub fn new(em: f64) -> Self {
        let width = 12.0 * em;
        let height = 10.0 * em;
        let bottom = height - em;
        Self {
            em,
            width,
            height,
            swatch: Rect::new(em, em, bottom, bottom),
            hue_bar: Rect::new(width - 2.0 * em, em, width - em, bottom),
        }
    }

    /// Layout scaled to a viewport: `em = min(50, round(viewport_width / 25))`,
    /// at least 1.
    pub fn for_viewport_width(viewport_width: f64) -> Self {
        let em = (viewport_width / 25.0).round().clamp(1.0, 50.0);
        Self::new(em)
    }

    /// Canvas size in whole pixels.
    pub fn canvas_size(&self) -> (u32, u32) {
        (self.width as u32, self.height as u32)
    }
}

/// Hue picker state and renderer.
#[derive(Debug, Clone)]
pub struct PalettePicker {
    layout: PickerLayout,
    hue: f64,
    needs_redraw: bool,
}

impl PalettePicker {
    pub fn new(layout: PickerLayout) -> Self {
        Self {
            layout,
            hue: DEFAULT_HUE,
            needs_redraw: true,
        }
    }

    /// Start with a specific hue, wrapped to `[0, 360)`.
    pub fn with_hue(mut self, hue: f64) -> Self {
        self.hue = hue.rem_euclid(360.0);
        self
    }

    pub fn layout(&self) -> &PickerLayout {
        &self.layout
    }

    /// Currently selected hue in degrees.
    pub fn hue(&self) -> f64 {
        self.hue
    }

    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    /// Hue for a vertical position on the bar: top → 0, bottom → 360.
    pub fn hue_at(&self, y: f64) -> f64 {
        let bar = self.layout.hue_bar;
        map_range(y, bar.top, bar.bottom, 0.0, 360.0)
    }

    /// Vertical position of the selected-hue marker.
    pub fn marker_y(&self) -> f64 {
        let bar = self.layout.hue_bar;
        map_range(self.hue, 0.0, 360.0, bar.top, bar.bottom)
    }

    /// Handle a click. Only clicks inside the hue bar change the hue.
    /// Returns `true` when a redraw is needed.
    pub fn on_click(&mut self, x: f64, y: f64) -> bool {
        if !self.layout.hue_bar.contains(x, y) {
            trace!(x, y, "click outside hue bar ignored");
            return false;
        }
        self.hue = self.hue_at(y);
        self.needs_redraw = true;
        true
    }

    /// Swatch color at a pixel: x → chroma `[0, 0.38]`, y → lightness `[1, 0]`.
    pub fn swatch_color(&self, x: f64, y: f64) -> LinearRgb {
        let s = self.layout.swatch;
        let l = map_range(y, s.top, s.bottom, 1.0, 0.0);
        let c = map_range(x, s.left, s.right, 0.0, SWATCH_MAX_CHROMA);
        Oklch::new(l, c, self.hue).to_linear_rgb()
    }

    /// Number of leading in-gamut pixels on swatch row `y`, stopping at the
    /// first out-of-gamut pixel.
    pub fn swatch_row_extent(&self, y: f64) -> usize {
        let s = self.layout.swatch;
        let mut count = 0;
        let mut x = s.left;
        while x <= s.right {
            if !self.swatch_color(x, y).is_in_gamut() {
                break;
            }
            count += 1;
            x += 1.0;
        }
        count
    }

    /// Same quantity as [`swatch_row_extent`](Self::swatch_row_extent) computed
    /// without the early exit: the count of pixels before the first
    /// out-of-gamut pixel, checking every pixel of the row.
    pub fn swatch_row_extent_exhaustive(&self, y: f64) -> usize {
        let s = self.layout.swatch;
        let columns = (s.width().floor() as usize) + 1;
        let inside: Vec<bool> = (0..columns)
            .map(|i| self.swatch_color(s.left + i as f64, y).is_in_gamut())
            .collect();
        inside.iter().position(|ok| !ok).unwrap_or(columns)
    }

    fn render_swatch(&self, canvas: &mut dyn Canvas) {
        let s = self.layout.swatch;

        canvas.set_stroke(None);
        canvas.set_fill(Some(Rgba::gray(0.25)));
        canvas.fill_rect(s.left, s.top, s.width(), s.height());

        canvas.set_stroke_weight(1.0);
        let mut y = s.top;
        while y <= s.bottom {
            let mut x = s.left;
            while x <= s.right {
                let rgb = self.swatch_color(x, y);
                if !rgb.is_in_gamut() {
                    break;
                }
                canvas.set_stroke(Some(rgb.to_rgba(1.0)));
                canvas.point(x, y);
                x += 1.0;
            }
            y += 1.0;
        }
    }

    fn render_hue_bar(&self, canvas: &mut dyn Canvas) {
        let bar = self.layout.hue_bar;

        canvas.set_stroke_weight(1.0);
        let mut y = bar.top;
        while y < bar.bottom {
            let h = self.hue_at(y);
            let rgb = Oklch::new(HUE_BAR_LIGHTNESS, HUE_BAR_CHROMA, h).to_linear_rgb();
            canvas.set_stroke(Some(rgb.to_rgba(1.0)));
            canvas.line(bar.left, y, bar.right, y);
            y += 1.0;
        }

        let marker = self.marker_y();
        canvas.set_stroke(Some(Rgba::WHITE));
        canvas.line(bar.left, marker, bar.right, marker);
    }

    /// Full redraw. Clears the pending-redraw flag.
    pub fn render(&mut self, canvas: &mut dyn Canvas) {
        canvas.fill_background(Rgba::BLACK);
        self.render_swatch(canvas);
        self.render_hue_bar(canvas);
        self.needs_redraw = false;
    }
}

impl Sketch for PalettePicker {
    fn setup(&mut self, canvas: &mut dyn Canvas) {
        canvas.set_stroke(None);
    }

    fn draw(&mut self, _frame: &FrameContext, canvas: &mut dyn Canvas) {
        self.render(canvas);
    }

    fn on_click(&mut self, x: f64, y: f64) -> bool {
        PalettePicker::on_click(self, x, y)
    }

    fn is_looping(&self) -> bool {
        false
    }
}
