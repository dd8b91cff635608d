//! Spawn rate limiting for continuous drags

use serde::{Deserialize, Serialize};

/// Allows at most one spawn per `min_interval` seconds.
///
/// Timestamps are monotonic seconds supplied by the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimiter {
    min_interval: f64,
    last_spawn: Option<f64>,
}

impl RateLimiter {
    pub fn new(min_interval: f64) -> Self {
        Self {
            min_interval: min_interval.max(0.0),
            last_spawn: None,
        }
    }

    pub fn min_interval(&self) -> f64 {
        self.min_interval
    }

    /// Returns true and stamps `now` if enough time has passed since the last spawn
    pub fn try_acquire(&mut self, now: f64) -> bool {
        let ready = match self.last_spawn {
            None => true,
            Some(last) => now - last >= self.min_interval,
        };
        if ready {
            self.last_spawn = Some(now);
        }
        ready
    }

    /// Record a spawn that happened outside the limiter (e.g. on touch down)
    pub fn stamp(&mut self, now: f64) {
        self.last_spawn = Some(now);
    }

    pub fn reset(&mut self) {
        self.last_spawn = None;
    }
}
