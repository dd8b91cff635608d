//! Paint controller module
//!
//! Turns touch events into body spawns and emitter updates. The controller
//! is single-threaded and never reads a clock: every event carries the
//! host's monotonic timestamp, which keeps sessions reproducible.

pub mod body;
pub mod controller;
pub mod emitter;
pub mod limiter;
pub mod mode;
pub mod path;

pub use body::{BodyHandle, BodySpec, FadeAction, FadeSchedule, FadeTimeline, Material};
pub use controller::PaintController;
pub use emitter::EmissionState;
pub use limiter::RateLimiter;
pub use mode::{Camera, InteractionMode, LabelStyle, ModeToggle};
pub use path::{DragPath, interpolate};

use glam::Vec2;

/// Stage of a touch gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Began,
    Moved,
    Ended,
    Cancelled,
}

/// A touch callback from the host, in scene coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct TouchEvent {
    pub phase: TouchPhase,
    /// Only the first point is used
    pub points: Vec<Vec2>,
    /// Monotonic seconds
    pub timestamp: f64,
}

impl TouchEvent {
    pub fn new(phase: TouchPhase, point: Vec2, timestamp: f64) -> Self {
        Self {
            phase,
            points: vec![point],
            timestamp,
        }
    }

    pub fn began(point: Vec2, timestamp: f64) -> Self {
        Self::new(TouchPhase::Began, point, timestamp)
    }

    pub fn moved(point: Vec2, timestamp: f64) -> Self {
        Self::new(TouchPhase::Moved, point, timestamp)
    }

    pub fn ended(point: Vec2, timestamp: f64) -> Self {
        Self::new(TouchPhase::Ended, point, timestamp)
    }

    pub fn cancelled(timestamp: f64) -> Self {
        Self {
            phase: TouchPhase::Cancelled,
            points: Vec::new(),
            timestamp,
        }
    }

    /// The touch the controller acts on
    pub fn primary(&self) -> Option<Vec2> {
        self.points.first().copied()
    }
}
