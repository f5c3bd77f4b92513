//! JSON configuration for the flow-field sketch.
//!
//! Every field has a default, so a config file only needs the values it
//! changes:
//!
//! ```
//! use driftfield::config::SketchConfig;
//!
//! let config = SketchConfig::from_json_str(r#"{ "flow": { "particle_count": 250 } }"#).unwrap();
//! assert_eq!(config.flow.particle_count, 250);
//! assert_eq!(config.flow.max_age, 1500);
//! ```

use crate::error::Result;
use crate::field::FieldConfig;
use crate::lifecycle::DEFAULT_MAX_AGE;
use crate::simulation::DEFAULT_HUE_PERIOD;
use crate::spawn::{viewport_canvas_size, Bounds};
use crate::visuals::FlowStyle;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SketchConfig {
    /// Simulated viewport width in pixels.
    pub viewport_width: f64,
    /// Simulated viewport height in pixels.
    pub viewport_height: f64,
    /// Fraction of each viewport dimension the canvas takes.
    pub canvas_fraction: f64,
    pub flow: FlowConfig,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            viewport_width: 1280.0,
            viewport_height: 720.0,
            canvas_fraction: 0.75,
            flow: FlowConfig::default(),
        }
    }
}

impl SketchConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Canvas size in pixels for the configured viewport.
    pub fn canvas_size(&self) -> (u32, u32) {
        viewport_canvas_size(self.viewport_width, self.viewport_height, self.canvas_fraction)
    }

    pub fn canvas_bounds(&self) -> Bounds {
        let (w, h) = self.canvas_size();
        Bounds::new(w as f64, h as f64)
    }
}

/// Flow-field parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    pub particle_count: usize,
    pub seed: u32,
    /// Frames a particle lives before respawning.
    pub max_age: u32,
    /// Seconds per full rotation of the global hue.
    pub hue_period_secs: f64,
    pub field: FieldConfig,
    pub style: FlowStyle,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            particle_count: 1000,
            seed: 1234,
            max_age: DEFAULT_MAX_AGE,
            hue_period_secs: DEFAULT_HUE_PERIOD,
            field: FieldConfig::default(),
            style: FlowStyle::default(),
        }
    }
}
