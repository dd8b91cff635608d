//! Scene settings and tuning
//!
//! Loaded from an optional JSON file. Any field missing from the file keeps
//! its default, so a settings file only needs the values it changes.

use std::path::Path;

use glam::{Vec2, Vec4};
use serde::{Deserialize, Serialize};

use crate::Rect;
use crate::consts::*;
use crate::paint::body::{FadeSchedule, Material};
use crate::paint::mode::{Camera, InteractionMode, LabelStyle, ModeToggle};

/// How touch-move events turn into spawns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovePolicy {
    /// Fill the drag path with bodies `spawn_spacing` apart
    Spacing,
    /// Follow with the emitter and drop at most one body per `min_spawn_interval`
    RateLimited,
    /// Follow with the emitter only
    EmitterOnly,
}

impl MovePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovePolicy::Spacing => "spacing",
            MovePolicy::RateLimited => "rate-limited",
            MovePolicy::EmitterOnly => "emitter-only",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "spacing" | "spaced" => Some(MovePolicy::Spacing),
            "rate-limited" | "ratelimited" | "rate" => Some(MovePolicy::RateLimited),
            "emitter-only" | "emitter" => Some(MovePolicy::EmitterOnly),
            _ => None,
        }
    }
}

/// Physics world the scene is set up with
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldSettings {
    pub gravity: Vec2,
    /// Scene frame; an edge loop is placed around it
    pub bounds: Rect,
    pub edge_friction: f32,
    pub background: Vec4,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, GRAVITY_Y),
            bounds: Rect::from_center_size(Vec2::ZERO, Vec2::new(SCENE_WIDTH, SCENE_HEIGHT)),
            edge_friction: EDGE_FRICTION,
            background: Vec4::new(0.0, 0.0, 0.0, 1.0),
        }
    }
}

/// Per-body appearance, material and lifetime
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BodySettings {
    pub radius_min: f32,
    pub radius_max: f32,
    /// Fill in Marbles mode
    pub marble_fill: Vec4,
    /// Fill in Ink mode
    pub droplet_fill: Vec4,
    pub stroke: Vec4,
    pub material: Material,
    pub fade: FadeSchedule,
    /// Oldest bodies are removed early past this count
    pub max_bodies: usize,
}

impl Default for BodySettings {
    fn default() -> Self {
        Self {
            radius_min: BODY_RADIUS_MIN,
            radius_max: BODY_RADIUS_MAX,
            marble_fill: Vec4::new(0.0, 0.48, 1.0, 1.0),
            droplet_fill: Vec4::new(0.1, 0.1, 0.45, 1.0),
            stroke: Vec4::ZERO,
            material: Material::default(),
            fade: FadeSchedule::default(),
            max_bodies: MAX_BODIES,
        }
    }
}

/// Template for the continuous ink emitter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitterSettings {
    /// Seconds each particle lives
    pub lifetime: f32,
    pub lifetime_range: f32,
    /// Random offset around the emitter position
    pub position_range: Vec2,
    pub speed: f32,
    pub speed_range: f32,
    /// Radians
    pub emission_angle: f32,
    pub emission_angle_range: f32,
    pub alpha: f32,
    /// Alpha change per second
    pub alpha_speed: f32,
    pub scale: f32,
    /// Scale change per second
    pub scale_speed: f32,
    pub color: Vec4,
    pub rotation_range: f32,
    pub rotation_speed: f32,
}

impl Default for EmitterSettings {
    fn default() -> Self {
        Self {
            lifetime: 1.2,
            lifetime_range: 0.4,
            position_range: Vec2::new(6.0, 6.0),
            speed: 60.0,
            speed_range: 40.0,
            emission_angle: std::f32::consts::FRAC_PI_2,
            emission_angle_range: std::f32::consts::TAU,
            alpha: 0.9,
            alpha_speed: -0.75,
            scale: 0.35,
            scale_speed: -0.2,
            color: Vec4::new(0.1, 0.1, 0.45, 1.0),
            rotation_range: std::f32::consts::PI,
            rotation_speed: 1.5,
        }
    }
}

/// Everything the paint controller is configured with
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed for body radii
    pub seed: u64,
    pub initial_mode: InteractionMode,
    /// Distance between interpolated bodies along a drag
    pub spawn_spacing: f32,
    /// Seconds between rate-limited spawns
    pub min_spawn_interval: f64,
    /// Emitter birth rate while ink is flowing (particles/s)
    pub ink_birth_rate: f32,
    pub marbles_move: MovePolicy,
    pub ink_move: MovePolicy,
    pub body: BodySettings,
    pub emitter: EmitterSettings,
    pub world: WorldSettings,
    pub toggle: ModeToggle,
    pub camera: Camera,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0,
            initial_mode: InteractionMode::Marbles,
            spawn_spacing: SPAWN_SPACING,
            min_spawn_interval: MIN_SPAWN_INTERVAL,
            ink_birth_rate: INK_BIRTH_RATE,
            marbles_move: MovePolicy::Spacing,
            ink_move: MovePolicy::RateLimited,
            body: BodySettings::default(),
            emitter: EmitterSettings::default(),
            world: WorldSettings::default(),
            toggle: ModeToggle::new(
                Rect::from_center_size(
                    Vec2::new(0.0, SCENE_HEIGHT / 2.0 - 80.0),
                    Vec2::new(220.0, 56.0),
                ),
                LabelStyle::default(),
            ),
            camera: Camera::default(),
        }
    }
}

impl Settings {
    /// Parse settings from JSON
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read settings {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings.sanitized()
            }
            Err(e) => {
                log::warn!("Invalid settings {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Repair values the controller can't work with
    pub fn sanitized(mut self) -> Self {
        if !self.spawn_spacing.is_finite() || self.spawn_spacing <= 0.0 {
            log::warn!(
                "spawn_spacing {} must be positive, using {}",
                self.spawn_spacing,
                SPAWN_SPACING
            );
            self.spawn_spacing = SPAWN_SPACING;
        } else if self.spawn_spacing < MIN_SPAWN_SPACING {
            log::warn!(
                "spawn_spacing {} is too small, using {}",
                self.spawn_spacing,
                MIN_SPAWN_SPACING
            );
            self.spawn_spacing = MIN_SPAWN_SPACING;
        }
        if !self.min_spawn_interval.is_finite() {
            log::warn!(
                "min_spawn_interval {} is not finite, using {}",
                self.min_spawn_interval,
                MIN_SPAWN_INTERVAL
            );
            self.min_spawn_interval = MIN_SPAWN_INTERVAL;
        } else if self.min_spawn_interval < 0.0 {
            log::warn!("min_spawn_interval {} is negative, using 0", self.min_spawn_interval);
            self.min_spawn_interval = 0.0;
        }
        if !self.ink_birth_rate.is_finite() {
            log::warn!(
                "ink_birth_rate {} is not finite, using {}",
                self.ink_birth_rate,
                INK_BIRTH_RATE
            );
            self.ink_birth_rate = INK_BIRTH_RATE;
        } else if self.ink_birth_rate < 0.0 {
            log::warn!("ink_birth_rate {} is negative, using 0", self.ink_birth_rate);
            self.ink_birth_rate = 0.0;
        }

        let body = &mut self.body;
        if !body.radius_min.is_finite() || body.radius_min <= 0.0 {
            log::warn!("radius_min {} is invalid, using {}", body.radius_min, BODY_RADIUS_MIN);
            body.radius_min = BODY_RADIUS_MIN;
        }
        if !body.radius_max.is_finite() || body.radius_max <= 0.0 {
            log::warn!("radius_max {} is invalid, using {}", body.radius_max, BODY_RADIUS_MAX);
            body.radius_max = BODY_RADIUS_MAX;
        }
        if body.radius_min > body.radius_max {
            log::warn!(
                "radius range {}..{} is inverted, swapping",
                body.radius_min,
                body.radius_max
            );
            std::mem::swap(&mut body.radius_min, &mut body.radius_max);
        }

        let fade = &mut body.fade;
        let defaults = FadeSchedule::default();
        if !fade.delay.is_finite() || fade.delay < 0.0 {
            log::warn!("fade delay {} is invalid, using {}", fade.delay, defaults.delay);
            fade.delay = defaults.delay;
        }
        if !fade.duration.is_finite() || fade.duration < 0.0 {
            log::warn!("fade duration {} is invalid, using {}", fade.duration, defaults.duration);
            fade.duration = defaults.duration;
        }

        self
    }
}
