//! Drag path sampling
//!
//! A gesture keeps only its last sample. New samples further than the spawn
//! spacing from it are filled in with evenly spaced points so fast strokes
//! leave a continuous trail of bodies instead of isolated dots.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::MAX_PATH_STEPS;

/// Evenly spaced points between `last` and `next`.
///
/// Returns `floor(d / spacing)` points, where `d` is the distance between the
/// two samples. The points exclude `last` and the final one is exactly `next`.
/// Returns nothing when `d < spacing` or `spacing` is not positive. At most
/// `MAX_PATH_STEPS` points are produced; longer jumps are spread over that many.
pub fn interpolate(last: Vec2, next: Vec2, spacing: f32) -> Vec<Vec2> {
    if spacing.is_nan() || spacing <= 0.0 {
        return Vec::new();
    }

    let delta = next - last;
    let dist = delta.length();
    if dist.is_nan() || dist < spacing {
        return Vec::new();
    }

    let steps = ((dist / spacing).floor() as usize).clamp(1, MAX_PATH_STEPS);
    (1..=steps)
        .map(|i| {
            if i == steps {
                next
            } else {
                let t = i as f32 / steps as f32;
                last + delta * t
            }
        })
        .collect()
}

/// Last sampled point of the current gesture
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DragPath {
    last: Option<Vec2>,
}

impl DragPath {
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Last recorded sample, if a gesture is in progress
    pub fn last(&self) -> Option<Vec2> {
        self.last
    }

    /// Start a gesture at `point`
    pub fn begin(&mut self, point: Vec2) {
        self.last = Some(point);
    }

    /// Overwrite the stored sample without spawning
    pub fn record(&mut self, point: Vec2) {
        self.last = Some(point);
    }

    /// Points to spawn for a new sample under the spacing policy.
    ///
    /// Without a previous sample the new point itself is returned and stored.
    /// Otherwise the sample only advances when at least one point is produced.
    pub fn advance(&mut self, point: Vec2, spacing: f32) -> Vec<Vec2> {
        match self.last {
            None => {
                self.last = Some(point);
                vec![point]
            }
            Some(last) => {
                let points = interpolate(last, point, spacing);
                if !points.is_empty() {
                    self.last = Some(point);
                }
                points
            }
        }
    }

    /// Forget the sample (touch up / cancel)
    pub fn clear(&mut self) {
        self.last = None;
    }
}
