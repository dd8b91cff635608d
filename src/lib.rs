//! Gravity Paint - touch painting with marbles and ink
//!
//! Core modules:
//! - `paint`: Paint controller (modes, drag spacing, rate limiting, fades)
//! - `engine`: Traits for the physics/render engine and label renderer
//! - `settings`: Data-driven tuning loaded from JSON

pub mod engine;
pub mod paint;
pub mod settings;

pub use engine::{LabelRenderer, Recorder, SceneEngine};
pub use paint::{InteractionMode, PaintController, TouchEvent, TouchPhase};
pub use settings::{MovePolicy, Settings};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Scene configuration constants
pub mod consts {
    /// Distance between bodies laid down along a drag
    pub const SPAWN_SPACING: f32 = 12.0;
    /// Smallest spacing settings may ask for
    pub const MIN_SPAWN_SPACING: f32 = 1.0;
    /// Most points filled in for a single drag sample
    pub const MAX_PATH_STEPS: usize = 4096;
    /// Minimum seconds between rate-limited spawns (50 ms)
    pub const MIN_SPAWN_INTERVAL: f64 = 0.05;
    /// Ink emitter birth rate while a finger is down (particles/s)
    pub const INK_BIRTH_RATE: f32 = 220.0;

    /// Body radius range
    pub const BODY_RADIUS_MIN: f32 = 6.0;
    pub const BODY_RADIUS_MAX: f32 = 12.0;
    /// Live body cap before the oldest are removed early
    pub const MAX_BODIES: usize = 600;

    /// World
    pub const GRAVITY_Y: f32 = -9.8;
    pub const EDGE_FRICTION: f32 = 0.2;
    pub const SCENE_WIDTH: f32 = 750.0;
    pub const SCENE_HEIGHT: f32 = 1334.0;
}

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size.abs() / 2.0;
        Self::new(center - half, center + half)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    /// Inclusive containment test
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }
}
