//! Sketch lifecycle and the headless host that drives it.
//!
//! A [`Sketch`] is set up once and then drawn frame by frame. Looping sketches
//! draw every frame; the others draw on the first frame and afterwards only
//! when an input event asks for a redraw.

use crate::canvas::{Canvas, PixelCanvas};
use crate::input::{HostEvent, Input};
use crate::time::Time;
use tracing::{debug, trace};

/// Per-frame timing handed to [`Sketch::draw`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    /// Seconds since the run started.
    pub elapsed: f64,
    /// Seconds since the previous frame.
    pub delta: f64,
    /// Frame number, starting at 1.
    pub frame: u64,
}

/// Something a host can draw.
pub trait Sketch {
    /// One-time initialization before the first frame.
    fn setup(&mut self, canvas: &mut dyn Canvas);

    /// Update state and render one frame.
    fn draw(&mut self, frame: &FrameContext, canvas: &mut dyn Canvas);

    /// Pointer click in canvas coordinates. Returns `true` when the sketch
    /// must be redrawn.
    fn on_click(&mut self, _x: f64, _y: f64) -> bool {
        false
    }

    /// Viewport resized. Returns the new canvas size if the canvas should change.
    fn on_resize(&mut self, _viewport_width: f64, _viewport_height: f64) -> Option<(u32, u32)> {
        None
    }

    /// Whether `draw` runs every frame.
    fn is_looping(&self) -> bool {
        true
    }
}

/// Headless host: owns the canvas, the clock and the input queue.
pub struct Runner<S: Sketch> {
    sketch: S,
    canvas: PixelCanvas,
    time: Time,
    input: Input,
    started: bool,
    frames_drawn: u64,
}

impl<S: Sketch> Runner<S> {
    pub fn new(sketch: S, canvas: PixelCanvas, time: Time) -> Self {
        Self {
            sketch,
            canvas,
            time,
            input: Input::new(),
            started: false,
            frames_drawn: 0,
        }
    }

    /// Queue events here; they are delivered at the start of the next frame.
    pub fn input_mut(&mut self) -> &mut Input {
        &mut self.input
    }

    pub fn sketch(&self) -> &S {
        &self.sketch
    }

    pub fn sketch_mut(&mut self) -> &mut S {
        &mut self.sketch
    }

    pub fn canvas(&self) -> &PixelCanvas {
        &self.canvas
    }

    pub fn time(&self) -> &Time {
        &self.time
    }

    /// Number of frames on which `draw` actually ran.
    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    /// Run one host frame. Returns whether the sketch drew.
    pub fn step(&mut self) -> bool {
        let mut redraw = false;
        if !self.started {
            let (w, h) = self.canvas.size();
            debug!(width = w, height = h, "setting up sketch");
            self.sketch.setup(&mut self.canvas);
            self.started = true;
            redraw = true;
        }

        let (elapsed, delta) = self.time.update();

        for event in self.input.drain() {
            match event {
                HostEvent::Click { position, button } => {
                    let changed = self.sketch.on_click(position.x, position.y);
                    trace!(x = position.x, y = position.y, ?button, changed, "click");
                    redraw |= changed;
                }
                HostEvent::Resize { width, height } => {
                    if let Some((w, h)) = self.sketch.on_resize(width, height) {
                        debug!(width = w, height = h, "resizing canvas");
                        self.canvas.resize(w, h);
                        redraw = true;
                    }
                }
            }
        }

        if !(self.sketch.is_looping() || redraw) {
            return false;
        }

        let frame = FrameContext {
            elapsed,
            delta,
            frame: self.time.frame(),
        };
        self.sketch.draw(&frame, &mut self.canvas);
        self.frames_drawn += 1;
        true
    }

    /// Run `frames` host frames. Returns how many of them drew.
    pub fn run_frames(&mut self, frames: u64) -> u64 {
        let before = self.frames_drawn;
        for _ in 0..frames {
            self.step();
        }
        let drawn = self.frames_drawn - before;
        debug!(frames, drawn, elapsed = self.time.elapsed(), fps = self.time.fps(), "run finished");
        drawn
    }

    /// Consume the runner, returning the sketch and the final canvas.
    pub fn into_parts(self) -> (S, PixelCanvas) {
        (self.sketch, self.canvas)
    }
}
