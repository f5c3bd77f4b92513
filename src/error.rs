//! Error types for driftfield.
//!
//! The simulation and color code is total and never fails. Errors only come
//! from the host side: allocating a canvas, encoding images, and reading
//! configuration.

use std::fmt;

/// Errors that can occur while hosting or exporting a sketch.
#[derive(Debug)]
pub enum SketchError {
    /// Reading or writing a file failed.
    Io(std::io::Error),
    /// Encoding the canvas as an image failed.
    Image(image::ImageError),
    /// A configuration document could not be parsed.
    Config(serde_json::Error),
    /// A canvas dimension was zero.
    InvalidCanvasSize { width: u32, height: u32 },
}

/// Convenience alias used by the host-facing API.
pub type Result<T> = std::result::Result<T, SketchError>;

impl fmt::Display for SketchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SketchError::Io(e) => write!(f, "I/O error: {}", e),
            SketchError::Image(e) => write!(f, "Failed to encode image: {}", e),
            SketchError::Config(e) => write!(f, "Invalid sketch configuration: {}", e),
            SketchError::InvalidCanvasSize { width, height } => {
                write!(f, "Canvas must be at least 1x1 pixels, got {}x{}", width, height)
            }
        }
    }
}

impl std::error::Error for SketchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SketchError::Io(e) => Some(e),
            SketchError::Image(e) => Some(e),
            SketchError::Config(e) => Some(e),
            SketchError::InvalidCanvasSize { .. } => None,
        }
    }
}

impl From<std::io::Error> for SketchError {
    fn from(e: std::io::Error) -> Self {
        SketchError::Io(e)
    }
}

impl From<image::ImageError> for SketchError {
    fn from(e: image::ImageError) -> Self {
        SketchError::Image(e)
    }
}

impl From<serde_json::Error> for SketchError {
    fn from(e: serde_json::Error) -> Self {
        SketchError::Config(e)
    }
}
