//! Continuous ink emitter state
//!
//! The engine owns the particles; the controller only moves the source and
//! switches its birth rate on and off.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Where the ink source sits and how fast it emits
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmissionState {
    pub position: Vec2,
    birth_rate: f32,
}

impl Default for EmissionState {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            birth_rate: 0.0,
        }
    }
}

impl EmissionState {
    /// Particles per second
    pub fn birth_rate(&self) -> f32 {
        self.birth_rate
    }

    /// Set birth rate, clamped to be non-negative (NaN becomes 0)
    pub fn set_birth_rate(&mut self, rate: f32) {
        self.birth_rate = if rate > 0.0 { rate } else { 0.0 };
    }

    pub fn is_emitting(&self) -> bool {
        self.birth_rate > 0.0
    }

    /// Move the source and start emitting
    pub fn start(&mut self, position: Vec2, rate: f32) {
        self.position = position;
        self.set_birth_rate(rate);
    }

    pub fn stop(&mut self) {
        self.birth_rate = 0.0;
    }
}
