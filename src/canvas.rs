//! Drawing primitives and a software raster that implements them.
//!
//! Sketches draw through the [`Canvas`] trait only, so any host that can set
//! a stroke, plot points and lines, and fill rectangles can run them.
//! [`PixelCanvas`] is the in-process host used by the CLI, tests and
//! benchmarks.

use crate::color::Rgba;
use crate::error::{Result, SketchError};
use image::error::{ImageError, ParameterError, ParameterErrorKind};
use image::{DynamicImage, ImageFormat, Rgba32FImage, RgbaImage};
use std::path::Path;

/// Host drawing surface.
///
/// State-machine style: stroke and fill persist until changed. `None`
/// disables stroking or filling.
pub trait Canvas {
    /// Size in pixels.
    fn size(&self) -> (u32, u32);

    /// Resize the surface. Existing contents are discarded.
    fn resize(&mut self, width: u32, height: u32);

    fn set_stroke(&mut self, color: Option<Rgba>);

    /// Point diameter and line thickness in pixels.
    fn set_stroke_weight(&mut self, weight: f64);

    fn set_fill(&mut self, color: Option<Rgba>);

    /// Plot a point with the current stroke.
    fn point(&mut self, x: f64, y: f64);

    /// Draw a line segment with the current stroke.
    fn line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64);

    /// Composite `color` over the whole surface. An alpha below 1 leaves a
    /// fraction of the previous frame visible.
    fn fill_background(&mut self, color: Rgba);

    /// Fill a rectangle with the current fill.
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
}

/// Software canvas storing straight-alpha `f32` pixels, row-major.
#[derive(Debug, Clone)]
pub struct PixelCanvas {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
    stroke: Option<Rgba>,
    fill: Option<Rgba>,
    stroke_weight: f64,
}

impl PixelCanvas {
    /// New transparent canvas. Both dimensions must be non-zero.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(SketchError::InvalidCanvasSize { width, height });
        }
        Ok(Self {
            width,
            height,
            pixels: vec![Rgba::TRANSPARENT; width as usize * height as usize],
            stroke: Some(Rgba::BLACK),
            fill: Some(Rgba::WHITE),
            stroke_weight: 1.0,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Raw pixel memory, four native-endian `f32` per pixel.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[self.index(x, y)])
    }

    pub fn stroke_weight(&self) -> f64 {
        self.stroke_weight
    }

    /// Quantize to 8 bits per channel. Values are written as-is, with no
    /// transfer curve.
    pub fn to_image(&self) -> Result<RgbaImage> {
        let raw: Vec<f32> = bytemuck::cast_slice(&self.pixels).to_vec();
        let buffer = Rgba32FImage::from_raw(self.width, self.height, raw).ok_or_else(|| {
            ImageError::Parameter(ParameterError::from_kind(ParameterErrorKind::DimensionMismatch))
        })?;
        Ok(DynamicImage::ImageRgba32F(buffer).into_rgba8())
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        self.to_image()?
            .save_with_format(path.as_ref(), ImageFormat::Png)?;
        Ok(())
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    #[inline]
    fn blend(&mut self, x: i64, y: i64, color: Rgba) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let i = self.index(x as u32, y as u32);
        self.pixels[i] = color.over(self.pixels[i]);
    }

    fn stamp(&mut self, x: f64, y: f64, color: Rgba) {
        if !(x.is_finite() && y.is_finite()) {
            return;
        }
        let weight = self.stroke_weight;
        if weight <= 1.0 {
            self.blend(x.floor() as i64, y.floor() as i64, color);
            return;
        }

        // Disc: pixels whose centers fall inside the radius
        let r = weight / 2.0;
        let r2 = r * r;
        let y_min = (y - r).floor() as i64;
        let y_max = (y + r).ceil() as i64;
        let x_min = (x - r).floor() as i64;
        let x_max = (x + r).ceil() as i64;
        for py in y_min..=y_max {
            let dy = py as f64 + 0.5 - y;
            for px in x_min..=x_max {
                let dx = px as f64 + 0.5 - x;
                if dx * dx + dy * dy <= r2 {
                    self.blend(px, py, color);
                }
            }
        }
    }
}

impl Canvas for PixelCanvas {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        let width = width.max(1);
        let height = height.max(1);
        self.width = width;
        self.height = height;
        self.pixels = vec![Rgba::TRANSPARENT; width as usize * height as usize];
    }

    fn set_stroke(&mut self, color: Option<Rgba>) {
        self.stroke = color;
    }

    fn set_stroke_weight(&mut self, weight: f64) {
        self.stroke_weight = weight.max(0.0);
    }

    fn set_fill(&mut self, color: Option<Rgba>) {
        self.fill = color;
    }

    fn point(&mut self, x: f64, y: f64) {
        if let Some(color) = self.stroke {
            self.stamp(x, y, color);
        }
    }

    fn line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64) {
        let Some(color) = self.stroke else {
            return;
        };
        let length = (x1 - x0).hypot(y1 - y0);
        if !length.is_finite() {
            return;
        }
        let steps = length.ceil().max(1.0) as u32;
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            self.stamp(x0 + (x1 - x0) * t, y0 + (y1 - y0) * t, color);
        }
    }

    fn fill_background(&mut self, color: Rgba) {
        if color.a >= 1.0 {
            self.pixels.fill(color);
            return;
        }
        for p in self.pixels.iter_mut() {
            *p = color.over(*p);
        }
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let Some(color) = self.fill else {
            return;
        };
        let (left, right) = if width < 0.0 { (x + width, x) } else { (x, x + width) };
        let (top, bottom) = if height < 0.0 { (y + height, y) } else { (y, y + height) };

        let x0 = left.round().max(0.0) as i64;
        let x1 = right.round().min(self.width as f64) as i64;
        let y0 = top.round().max(0.0) as i64;
        let y1 = bottom.round().min(self.height as f64) as i64;
        for py in y0..y1 {
            for px in x0..x1 {
                self.blend(px, py, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_size_rejected() {
        assert!(matches!(
            PixelCanvas::new(0, 4),
            Err(SketchError::InvalidCanvasSize { width: 0, height: 4 })
        ));
    }

    #[test]
    fn test_point_single_pixel() {
        let mut canvas = PixelCanvas::new(4, 4).unwrap();
        canvas.set_stroke(Some(Rgba::WHITE));
        canvas.point(2.7, 1.2);
        assert_eq!(canvas.pixel(2, 1), Some(Rgba::WHITE));
        assert_eq!(canvas.pixel(1, 1), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_weighted_point_is_disc() {
        let mut canvas = PixelCanvas::new(16, 16).unwrap();
        canvas.set_stroke(Some(Rgba::WHITE));
        canvas.set_stroke_weight(4.0);
        canvas.point(8.0, 8.0);
        let lit = canvas.pixels().iter().filter(|p| p.a > 0.0).count();
        // 4x4 block of centers within radius 2 of (8, 8)
        assert!((12..=16).contains(&lit), "lit = {}", lit);
        assert_eq!(canvas.pixel(8, 8), Some(Rgba::WHITE));
        assert_eq!(canvas.pixel(0, 0), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_points_outside_are_clipped() {
        let mut canvas = PixelCanvas::new(4, 4).unwrap();
        canvas.set_stroke(Some(Rgba::WHITE));
        canvas.set_stroke_weight(4.0);
        canvas.point(-100.0, 3.0);
        canvas.point(f64::NAN, 1.0);
        assert!(canvas.pixels().iter().all(|p| *p == Rgba::TRANSPARENT));
    }

    #[test]
    fn test_no_stroke_draws_nothing() {
        let mut canvas = PixelCanvas::new(4, 4).unwrap();
        canvas.set_stroke(None);
        canvas.point(1.0, 1.0);
        canvas.line(0.0, 0.0, 3.0, 3.0);
        assert!(canvas.pixels().iter().all(|p| *p == Rgba::TRANSPARENT));
    }

    #[test]
    fn test_horizontal_line() {
        let mut canvas = PixelCanvas::new(8, 4).unwrap();
        canvas.set_stroke(Some(Rgba::WHITE));
        canvas.line(1.0, 2.0, 6.0, 2.0);
        for x in 1..=6 {
            assert_eq!(canvas.pixel(x, 2), Some(Rgba::WHITE));
        }
        assert_eq!(canvas.pixel(7, 2), Some(Rgba::TRANSPARENT));
        assert_eq!(canvas.pixel(3, 1), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_background_wash_fades() {
        let mut canvas = PixelCanvas::new(2, 2).unwrap();
        canvas.fill_background(Rgba::WHITE);
        canvas.fill_background(Rgba::new(0.0, 0.0, 0.0, 0.5));
        let p = canvas.pixel(0, 0).unwrap();
        assert!((p.r - 0.5).abs() < 1e-6);
        assert!((p.a - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_fill_rect() {
        let mut canvas = PixelCanvas::new(10, 10).unwrap();
        canvas.set_fill(Some(Rgba::gray(0.25)));
        canvas.fill_rect(2.0, 3.0, 4.0, 2.0);
        assert_eq!(canvas.pixel(2, 3), Some(Rgba::gray(0.25)));
        assert_eq!(canvas.pixel(5, 4), Some(Rgba::gray(0.25)));
        assert_eq!(canvas.pixel(6, 4), Some(Rgba::TRANSPARENT));
        assert_eq!(canvas.pixel(2, 5), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_translucent_fill_over_transparent() {
        let mut canvas = PixelCanvas::new(1, 1).unwrap();
        canvas.fill_background(Rgba::new(1.0, 0.0, 0.0, 0.5));
        assert_eq!(canvas.pixel(0, 0), Some(Rgba::new(1.0, 0.0, 0.0, 0.5)));
    }

    #[test]
    fn test_repeated_wash_keeps_color() {
        let wash = Rgba::new(0.075, 0.117, 0.125, 0.02);
        let mut canvas = PixelCanvas::new(3, 3).unwrap();
        canvas.fill_background(Rgba::WHITE);
        canvas.resize(2, 2);
        for _ in 0..60 {
            canvas.fill_background(wash);
        }
        let p = canvas.pixel(1, 1).unwrap();
        assert!((p.r - wash.r).abs() < 1e-5, "{:?}", p);
        assert!((p.g - wash.g).abs() < 1e-5, "{:?}", p);
        assert!((p.b - wash.b).abs() < 1e-5, "{:?}", p);
        let expected_a = 1.0 - 0.98f32.powi(60);
        assert!((p.a - expected_a).abs() < 1e-4, "{:?}", p);
    }

    #[test]
    fn test_resize_clears() {
        let mut canvas = PixelCanvas::new(2, 2).unwrap();
        canvas.fill_background(Rgba::WHITE);
        canvas.resize(3, 5);
        assert_eq!(canvas.size(), (3, 5));
        assert_eq!(canvas.pixels().len(), 15);
        assert!(canvas.pixels().iter().all(|p| *p == Rgba::TRANSPARENT));
    }

    #[test]
    fn test_to_image_quantizes() {
        let mut canvas = PixelCanvas::new(2, 1).unwrap();
        canvas.fill_background(Rgba::new(1.0, 0.5, 0.0, 1.0));
        let img = canvas.to_image().unwrap();
        let px = img.get_pixel(1, 0);
        assert_eq!(px.0[0], 255);
        assert!(px.0[1] == 127 || px.0[1] == 128);
        assert_eq!(px.0[2], 0);
        assert_eq!(px.0[3], 255);
    }

    #[test]
    fn test_to_image_after_resize() {
        let mut canvas = PixelCanvas::new(2, 2).unwrap();
        canvas.resize(5, 3);
        canvas.fill_background(Rgba::new(0.0, 0.0, 1.0, 0.5));
        let img = canvas.to_image().unwrap();
        assert_eq!(img.dimensions(), (5, 3));
        assert_eq!(img.get_pixel(4, 2).0[2], 255);
        assert!(img.get_pixel(4, 2).0[3] == 127 || img.get_pixel(4, 2).0[3] == 128);
    }

    #[test]
    fn test_as_bytes_len() {
        let canvas = PixelCanvas::new(3, 2).unwrap();
        assert_eq!(canvas.as_bytes().len(), 3 * 2 * 16);
    }
}
