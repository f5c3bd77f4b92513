//! Frame clock for sketches.
//!
//! Sketches read elapsed seconds, never frame counts, so animation speed
//! does not depend on frame rate. Two modes:
//!
//! - [`Time::new`]: wall clock, elapsed seconds since creation.
//! - [`Time::fixed_step`]: every update advances exactly `dt` seconds. Used for
//!   headless rendering and tests, where output must be reproducible.
//!
//! ```
//! use driftfield::time::Time;
//!
//! let mut time = Time::fixed_step(0.5);
//! time.update();
//! time.update();
//! assert_eq!(time.elapsed(), 1.0);
//! assert_eq!(time.frame(), 2);
//! ```

use std::time::{Duration, Instant};

/// Elapsed time, frame delta, frame count and a periodically refreshed FPS.
#[derive(Debug)]
pub struct Time {
    /// When the timer was created.
    start: Instant,
    /// When the last frame occurred.
    last_frame: Instant,
    /// Total elapsed time in seconds.
    elapsed_secs: f64,
    /// Time since last frame in seconds.
    delta_secs: f64,
    /// Total frames since start.
    frame_count: u64,
    /// Calculated FPS (updated periodically).
    fps: f64,
    fps_frame_count: u64,
    fps_update_time: Instant,
    fps_update_interval: Duration,
    /// Deterministic step, if any.
    fixed_step: Option<f64>,
}

impl Time {
    /// Wall-clock timer starting from now.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: now,
            elapsed_secs: 0.0,
            delta_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_millis(500),
            fixed_step: None,
        }
    }

    /// Deterministic timer: each update advances `dt` seconds.
    pub fn fixed_step(dt: f64) -> Self {
        Self {
            fixed_step: Some(dt.max(0.0)),
            ..Self::new()
        }
    }

    /// Advance one frame. Call once per frame.
    ///
    /// Returns `(elapsed, delta)` in seconds.
    pub fn update(&mut self) -> (f64, f64) {
        let now = Instant::now();

        match self.fixed_step {
            Some(dt) => {
                self.delta_secs = dt;
                self.frame_count += 1;
                self.elapsed_secs = self.frame_count as f64 * dt;
            }
            None => {
                self.delta_secs = now.duration_since(self.last_frame).as_secs_f64();
                self.elapsed_secs = now.duration_since(self.start).as_secs_f64();
                self.frame_count += 1;
            }
        }
        self.last_frame = now;

        let fps_elapsed = now.duration_since(self.fps_update_time);
        if fps_elapsed >= self.fps_update_interval {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f64 / fps_elapsed.as_secs_f64();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
        }

        (self.elapsed_secs, self.delta_secs)
    }

    /// Total elapsed time in seconds since start.
    #[inline]
    pub fn elapsed(&self) -> f64 {
        self.elapsed_secs
    }

    /// Time since last frame in seconds.
    #[inline]
    pub fn delta(&self) -> f64 {
        self.delta_secs
    }

    /// Total frames since start.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Measured frames per second of real time.
    #[inline]
    pub fn fps(&self) -> f64 {
        self.fps
    }

    pub fn is_fixed_step(&self) -> bool {
        self.fixed_step.is_some()
    }

    /// Reset to the initial state, keeping the mode.
    pub fn reset(&mut self) {
        let fixed_step = self.fixed_step;
        *self = Self::new();
        self.fixed_step = fixed_step;
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_time_new() {
        let time = Time::new();
        assert_eq!(time.frame(), 0);
        assert_eq!(time.elapsed(), 0.0);
        assert!(!time.is_fixed_step());
    }

    #[test]
    fn test_time_update() {
        let mut time = Time::new();
        thread::sleep(Duration::from_millis(10));
        let (elapsed, delta) = time.update();

        assert!(elapsed > 0.0);
        assert!(delta > 0.0);
        assert_eq!(time.frame(), 1);
    }

    #[test]
    fn test_fixed_step() {
        let mut time = Time::fixed_step(1.0 / 60.0);
        for _ in 0..120 {
            time.update();
        }
        assert!((time.elapsed() - 2.0).abs() < 1e-12);
        assert!((time.delta() - 1.0 / 60.0).abs() < 1e-12);
    }

    #[test]
    fn test_reset_keeps_mode() {
        let mut time = Time::fixed_step(0.25);
        time.update();
        time.reset();
        assert_eq!(time.frame(), 0);
        assert!(time.is_fixed_step());
        time.update();
        assert_eq!(time.elapsed(), 0.25);
    }
}
