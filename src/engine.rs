//! Host engine interfaces
//!
//! The physics solver, particle renderer and text rasterizer live outside
//! this crate. The controller talks to them through these traits.

use glam::Vec2;

use crate::paint::body::{BodyHandle, BodySpec};
use crate::paint::mode::LabelStyle;
use crate::settings::{EmitterSettings, WorldSettings};

/// Physics world, bodies and the continuous emitter
pub trait SceneEngine {
    /// Gravity, boundary edge loop and background
    fn configure_world(&mut self, world: &WorldSettings);

    /// Particle template for the continuous emitter
    fn configure_emitter(&mut self, emitter: &EmitterSettings);

    /// Move the emitter and set how many particles it emits per second
    fn set_emitter(&mut self, position: Vec2, birth_rate: f32);

    /// Create a circular body and add it to the scene
    fn spawn_body(&mut self, spec: &BodySpec) -> BodyHandle;

    fn set_body_alpha(&mut self, handle: BodyHandle, alpha: f32);

    fn remove_body(&mut self, handle: BodyHandle);
}

/// Turns label text into a displayable image
pub trait LabelRenderer {
    fn render_label(&mut self, text: &str, style: &LabelStyle);
}

/// A single recorded engine call
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
    ConfigureWorld,
    ConfigureEmitter,
    SetEmitter { position: Vec2, birth_rate: f32 },
    SpawnBody { handle: BodyHandle, spec: BodySpec },
    SetBodyAlpha { handle: BodyHandle, alpha: f32 },
    RemoveBody { handle: BodyHandle },
    RenderLabel { text: String },
}

/// Engine that records every call and keeps a body list.
///
/// Used headless by the demo binary and in tests.
#[derive(Debug, Default)]
pub struct Recorder {
    pub calls: Vec<EngineCall>,
    /// Live bodies in creation order
    pub bodies: Vec<(BodyHandle, BodySpec)>,
    pub emitter_position: Vec2,
    pub birth_rate: f32,
    pub label: Option<String>,
    next_handle: u64,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Positions of every body spawned so far, including removed ones
    pub fn spawned_positions(&self) -> Vec<Vec2> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                EngineCall::SpawnBody { spec, .. } => Some(spec.position),
                _ => None,
            })
            .collect()
    }

    pub fn spawn_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, EngineCall::SpawnBody { .. }))
            .count()
    }

    /// Forget recorded calls, keeping scene state
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }
}

impl SceneEngine for Recorder {
    fn configure_world(&mut self, world: &WorldSettings) {
        log::debug!(
            "world: gravity={:?} bounds={:?} edge_friction={}",
            world.gravity,
            world.bounds,
            world.edge_friction
        );
        self.calls.push(EngineCall::ConfigureWorld);
    }

    fn configure_emitter(&mut self, emitter: &EmitterSettings) {
        log::debug!(
            "emitter template: lifetime={}±{} speed={}±{}",
            emitter.lifetime,
            emitter.lifetime_range,
            emitter.speed,
            emitter.speed_range
        );
        self.calls.push(EngineCall::ConfigureEmitter);
    }

    fn set_emitter(&mut self, position: Vec2, birth_rate: f32) {
        self.emitter_position = position;
        self.birth_rate = birth_rate;
        self.calls.push(EngineCall::SetEmitter {
            position,
            birth_rate,
        });
    }

    fn spawn_body(&mut self, spec: &BodySpec) -> BodyHandle {
        self.next_handle += 1;
        let handle = BodyHandle(self.next_handle);
        self.bodies.push((handle, *spec));
        self.calls.push(EngineCall::SpawnBody {
            handle,
            spec: *spec,
        });
        handle
    }

    fn set_body_alpha(&mut self, handle: BodyHandle, alpha: f32) {
        self.calls.push(EngineCall::SetBodyAlpha { handle, alpha });
    }

    fn remove_body(&mut self, handle: BodyHandle) {
        self.bodies.retain(|(h, _)| *h != handle);
        self.calls.push(EngineCall::RemoveBody { handle });
    }
}

impl LabelRenderer for Recorder {
    fn render_label(&mut self, text: &str, style: &LabelStyle) {
        log::debug!("label '{}' ({} {}pt)", text, style.font_name, style.font_size);
        self.label = Some(text.to_string());
        self.calls.push(EngineCall::RenderLabel {
            text: text.to_string(),
        });
    }
}
