//! Host input events.
//!
//! A host pushes pointer and resize events as they arrive; the
//! [`Runner`](crate::sketch::Runner) drains them once per frame, before
//! drawing, and hands each to the sketch.

use glam::DVec2;
use std::collections::VecDeque;

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// An event delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    /// Pointer click in canvas pixel coordinates.
    Click { position: DVec2, button: MouseButton },
    /// Viewport (not canvas) size changed.
    Resize { width: f64, height: f64 },
}

/// Pending events plus the last known pointer position.
#[derive(Debug, Default)]
pub struct Input {
    pending: VecDeque<HostEvent>,
    mouse_position: DVec2,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a left click at `(x, y)`.
    pub fn click(&mut self, x: f64, y: f64) {
        self.push(HostEvent::Click {
            position: DVec2::new(x, y),
            button: MouseButton::Left,
        });
    }

    /// Queue a viewport resize.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.push(HostEvent::Resize { width, height });
    }

    pub fn push(&mut self, event: HostEvent) {
        if let HostEvent::Click { position, .. } = event {
            self.mouse_position = position;
        }
        self.pending.push_back(event);
    }

    /// Last pointer position seen in a click.
    pub fn mouse_position(&self) -> DVec2 {
        self.mouse_position
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Take every pending event in arrival order.
    pub fn drain(&mut self) -> impl Iterator<Item = HostEvent> + '_ {
        self.pending.drain(..)
    }
}
