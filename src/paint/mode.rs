//! Interaction modes and the on-screen mode toggle
//!
//! Everything that differs between Marbles and Ink is answered here, one
//! method per concern, so the controller never branches on the mode itself.

use glam::{Vec2, Vec4};
use serde::{Deserialize, Serialize};

use crate::Rect;
use crate::settings::{MovePolicy, Settings};

/// How touches are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InteractionMode {
    /// Discrete bodies that fall and settle
    #[default]
    Marbles,
    /// Continuous spray plus the occasional droplet
    Ink,
}

impl InteractionMode {
    pub fn toggled(self) -> Self {
        match self {
            InteractionMode::Marbles => InteractionMode::Ink,
            InteractionMode::Ink => InteractionMode::Marbles,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionMode::Marbles => "Marbles",
            InteractionMode::Ink => "Ink",
        }
    }

    /// Text shown on the toggle
    pub fn label(&self) -> String {
        format!("Mode: {}", self.as_str())
    }

    /// Whether this mode moves and runs the continuous emitter
    pub fn drives_emitter(&self) -> bool {
        match self {
            InteractionMode::Marbles => false,
            InteractionMode::Ink => true,
        }
    }

    /// Touch-move policy configured for this mode
    pub fn move_policy(&self, settings: &Settings) -> MovePolicy {
        match self {
            InteractionMode::Marbles => settings.marbles_move,
            InteractionMode::Ink => settings.ink_move,
        }
    }

    /// Fill color for bodies spawned in this mode
    pub fn body_fill(&self, settings: &Settings) -> Vec4 {
        match self {
            InteractionMode::Marbles => settings.body.marble_fill,
            InteractionMode::Ink => settings.body.droplet_fill,
        }
    }
}

/// Maps scene coordinates into the overlay the toggle lives in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub position: Vec2,
    pub scale: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            scale: 1.0,
        }
    }
}

impl Camera {
    /// Convert a scene point to camera (overlay) space
    pub fn to_overlay(&self, scene_point: Vec2) -> Vec2 {
        let scale = if self.scale.abs() > f32::EPSILON {
            self.scale
        } else {
            1.0
        };
        (scene_point - self.position) / scale
    }
}

/// Style passed to the label renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelStyle {
    pub font_name: String,
    pub font_size: f32,
    pub color: Vec4,
    pub background: Vec4,
    /// Padding around the text inside the rendered image
    pub padding: f32,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            font_name: "AvenirNext-Bold".to_string(),
            font_size: 18.0,
            color: Vec4::ONE,
            background: Vec4::new(0.0, 0.0, 0.0, 0.5),
            padding: 8.0,
        }
    }
}

/// Fixed-position label that flips the interaction mode when tapped
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModeToggle {
    /// Hit region in overlay space
    pub bounds: Rect,
    pub style: LabelStyle,
}

impl ModeToggle {
    pub fn new(bounds: Rect, style: LabelStyle) -> Self {
        Self { bounds, style }
    }

    /// Hit test a scene point against the toggle
    pub fn hit(&self, camera: &Camera, scene_point: Vec2) -> bool {
        self.bounds.contains(camera.to_overlay(scene_point))
    }
}
