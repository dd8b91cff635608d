//! Spawned bodies and their fade-out schedule
//!
//! Bodies are owned by the engine once created. The controller only keeps
//! their handles in a [`FadeTimeline`] so it can fade and remove them later
//! and answer how many are alive.

use std::collections::VecDeque;

use glam::{Vec2, Vec4};
use serde::{Deserialize, Serialize};

/// Opaque handle the engine returns for a created body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyHandle(pub u64);

/// Surface properties handed to the physics engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub restitution: f32,
    pub friction: f32,
    pub linear_damping: f32,
    pub angular_damping: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            restitution: 0.8,
            friction: 0.05,
            linear_damping: 0.05,
            angular_damping: 0.05,
        }
    }
}

/// Everything the engine needs to create one circle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodySpec {
    pub position: Vec2,
    pub radius: f32,
    pub fill: Vec4,
    pub stroke: Vec4,
    pub material: Material,
}

/// Wait, then fade, then remove
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FadeSchedule {
    /// Seconds the body stays fully visible
    pub delay: f64,
    /// Seconds spent fading to transparent
    pub duration: f64,
}

impl Default for FadeSchedule {
    fn default() -> Self {
        Self {
            delay: 8.0,
            duration: 1.5,
        }
    }
}

impl FadeSchedule {
    /// Alpha at `elapsed` seconds after spawn, or None once the body is due for removal
    pub fn alpha_at(&self, elapsed: f64) -> Option<f32> {
        if elapsed < self.delay {
            return Some(1.0);
        }
        let into_fade = elapsed - self.delay;
        if self.duration <= 0.0 || into_fade >= self.duration {
            return None;
        }
        Some((1.0 - into_fade / self.duration) as f32)
    }
}

/// Engine-side effect produced by advancing the timeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FadeAction {
    SetAlpha(BodyHandle, f32),
    Remove(BodyHandle),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Entry {
    handle: BodyHandle,
    spawned_at: f64,
    /// Last alpha pushed to the engine
    alpha: f32,
    /// Cancelled entries are tracked but never faded or removed
    scheduled: bool,
}

/// Registry of live bodies ordered by spawn time (oldest first)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FadeTimeline {
    schedule: FadeSchedule,
    entries: VecDeque<Entry>,
}

impl FadeTimeline {
    pub fn new(schedule: FadeSchedule) -> Self {
        Self {
            schedule,
            entries: VecDeque::new(),
        }
    }

    /// Number of bodies the controller still tracks
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Start tracking a freshly spawned body
    pub fn insert(&mut self, handle: BodyHandle, now: f64) {
        self.entries.push_back(Entry {
            handle,
            spawned_at: now,
            alpha: 1.0,
            scheduled: true,
        });
    }

    /// Drop the oldest body, returning its handle so the caller can remove it
    pub fn evict_oldest(&mut self) -> Option<BodyHandle> {
        self.entries.pop_front().map(|e| e.handle)
    }

    /// Keep a body on screen indefinitely. Returns false if it isn't tracked
    /// or was already cancelled.
    pub fn cancel(&mut self, handle: BodyHandle) -> bool {
        match self.entries.iter_mut().find(|e| e.handle == handle) {
            Some(entry) if entry.scheduled => {
                entry.scheduled = false;
                true
            }
            _ => false,
        }
    }

    /// Advance to `now`, returning the alpha updates and removals to apply
    pub fn advance(&mut self, now: f64) -> Vec<FadeAction> {
        let schedule = self.schedule;
        let mut actions = Vec::new();

        self.entries.retain_mut(|entry| {
            if !entry.scheduled {
                return true;
            }
            match schedule.alpha_at(now - entry.spawned_at) {
                Some(alpha) => {
                    if alpha != entry.alpha {
                        entry.alpha = alpha;
                        actions.push(FadeAction::SetAlpha(entry.handle, alpha));
                    }
                    true
                }
                None => {
                    actions.push(FadeAction::Remove(entry.handle));
                    false
                }
            }
        });

        actions
    }
}
