//! Paint controller
//!
//! Owns the interaction mode and per-gesture state, and decides where bodies
//! are spawned and where the ink emitter sits.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::body::{BodyHandle, BodySpec, FadeAction, FadeTimeline};
use super::emitter::EmissionState;
use super::limiter::RateLimiter;
use super::mode::InteractionMode;
use super::path::DragPath;
use super::{TouchEvent, TouchPhase};
use crate::engine::{LabelRenderer, SceneEngine};
use crate::settings::{MovePolicy, Settings};

/// Drives a [`SceneEngine`] from touch input
pub struct PaintController<E> {
    engine: E,
    settings: Settings,
    mode: InteractionMode,
    path: DragPath,
    emission: EmissionState,
    limiter: RateLimiter,
    timeline: FadeTimeline,
    rng: Pcg32,
    /// Current gesture started on the mode toggle; its moves are ignored
    on_toggle: bool,
}

impl<E: SceneEngine + LabelRenderer> PaintController<E> {
    /// Set up the scene and render the initial mode label
    pub fn new(settings: Settings, mut engine: E) -> Self {
        let settings = settings.sanitized();

        engine.configure_world(&settings.world);
        engine.configure_emitter(&settings.emitter);

        let emission = EmissionState::default();
        engine.set_emitter(emission.position, emission.birth_rate());

        let mode = settings.initial_mode;
        engine.render_label(&mode.label(), &settings.toggle.style);

        log::info!(
            "Paint controller ready: mode={} spacing={} marbles_move={} ink_move={}",
            mode.as_str(),
            settings.spawn_spacing,
            settings.marbles_move.as_str(),
            settings.ink_move.as_str()
        );

        Self {
            limiter: RateLimiter::new(settings.min_spawn_interval),
            timeline: FadeTimeline::new(settings.body.fade),
            rng: Pcg32::seed_from_u64(settings.seed),
            engine,
            mode,
            path: DragPath::new(),
            emission,
            on_toggle: false,
            settings,
        }
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn emission(&self) -> &EmissionState {
        &self.emission
    }

    /// Last drag sample of the active gesture
    pub fn drag_sample(&self) -> Option<Vec2> {
        self.path.last()
    }

    /// Bodies spawned and not yet removed
    pub fn body_count(&self) -> usize {
        self.timeline.len()
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn into_engine(self) -> E {
        self.engine
    }

    /// Dispatch a host touch event
    pub fn touch(&mut self, event: &TouchEvent) {
        match event.phase {
            TouchPhase::Began => match event.primary() {
                Some(point) => self.touch_began(point, event.timestamp),
                None => log::trace!("touch began without a point"),
            },
            TouchPhase::Moved => match event.primary() {
                Some(point) => self.touch_moved(point, event.timestamp),
                None => log::trace!("touch moved without a point"),
            },
            TouchPhase::Ended => self.touch_ended(),
            TouchPhase::Cancelled => self.touch_cancelled(),
        }
    }

    pub fn touch_began(&mut self, point: Vec2, now: f64) {
        // Toggle wins over painting
        if self.settings.toggle.hit(&self.settings.camera, point) {
            self.on_toggle = true;
            self.path.clear();
            self.toggle_mode();
            return;
        }
        self.on_toggle = false;

        if self.mode.drives_emitter() {
            self.emission.start(point, self.settings.ink_birth_rate);
            self.push_emitter();
        }

        self.spawn_body(point, now);
        self.limiter.stamp(now);
        self.path.begin(point);

        log::debug!("touch began at {:?} ({})", point, self.mode.as_str());
    }

    pub fn touch_moved(&mut self, point: Vec2, now: f64) {
        if self.on_toggle {
            return;
        }

        if self.mode.drives_emitter() {
            self.emission.position = point;
            self.push_emitter();
        }

        match self.mode.move_policy(&self.settings) {
            MovePolicy::Spacing => {
                for p in self.path.advance(point, self.settings.spawn_spacing) {
                    self.spawn_body(p, now);
                }
            }
            MovePolicy::RateLimited => {
                self.path.record(point);
                if self.limiter.try_acquire(now) {
                    self.spawn_body(point, now);
                }
            }
            MovePolicy::EmitterOnly => self.path.record(point),
        }
    }

    pub fn touch_ended(&mut self) {
        self.finish_gesture();
    }

    pub fn touch_cancelled(&mut self) {
        self.finish_gesture();
    }

    fn finish_gesture(&mut self) {
        self.on_toggle = false;
        self.path.clear();
        self.limiter.reset();
        if self.mode.drives_emitter() {
            self.stop_emitter();
        }
    }

    /// Flip between Marbles and Ink and regenerate the label
    pub fn toggle_mode(&mut self) {
        self.set_mode(self.mode.toggled());
    }

    pub fn set_mode(&mut self, mode: InteractionMode) {
        if mode == self.mode {
            return;
        }
        self.stop_emitter();
        self.mode = mode;
        self.engine.render_label(&mode.label(), &self.settings.toggle.style);
        log::info!("Mode: {}", mode.as_str());
    }

    /// Create one body at `point` and schedule its fade-out
    pub fn spawn_body(&mut self, point: Vec2, now: f64) -> BodyHandle {
        let body = &self.settings.body;
        let radius = self.rng.random_range(body.radius_min..=body.radius_max);
        let spec = BodySpec {
            position: point,
            radius,
            fill: self.mode.body_fill(&self.settings),
            stroke: body.stroke,
            material: body.material,
        };

        let handle = self.engine.spawn_body(&spec);
        self.timeline.insert(handle, now);

        // max_bodies == 0 means uncapped
        let cap = self.settings.body.max_bodies;
        while cap > 0 && self.timeline.len() > cap {
            match self.timeline.evict_oldest() {
                Some(oldest) => self.engine.remove_body(oldest),
                None => break,
            }
        }

        handle
    }

    /// Per-frame hook: advance body fades and remove expired bodies
    pub fn update(&mut self, now: f64) {
        for action in self.timeline.advance(now) {
            match action {
                FadeAction::SetAlpha(handle, alpha) => self.engine.set_body_alpha(handle, alpha),
                FadeAction::Remove(handle) => self.engine.remove_body(handle),
            }
        }
    }

    /// Keep a body on screen instead of fading it out
    pub fn cancel_fade(&mut self, handle: BodyHandle) -> bool {
        self.timeline.cancel(handle)
    }

    fn stop_emitter(&mut self) {
        if self.emission.is_emitting() {
            self.emission.stop();
            self.push_emitter();
        }
    }

    fn push_emitter(&mut self) {
        self.engine.set_emitter(self.emission.position, self.emission.birth_rate());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{EngineCall, Recorder};
    use crate::paint::body::FadeSchedule;

    fn controller(settings: Settings) -> PaintController<Recorder> {
        let mut c = PaintController::new(settings, Recorder::new());
        c.engine_mut().clear_calls();
        c
    }

    fn toggle_point(c: &PaintController<Recorder>) -> Vec2 {
        c.settings().toggle.bounds.center()
    }

    fn ink_settings() -> Settings {
        Settings {
            initial_mode: InteractionMode::Ink,
            ..Default::default()
        }
    }

    #[test]
    fn test_new_sets_up_scene() {
        let c = PaintController::new(Settings::default(), Recorder::new());
        let calls = &c.engine().calls;
        assert_eq!(calls[0], EngineCall::ConfigureWorld);
        assert_eq!(calls[1], EngineCall::ConfigureEmitter);
        assert_eq!(c.engine().birth_rate, 0.0);
        assert_eq!(c.engine().label.as_deref(), Some("Mode: Marbles"));
        assert_eq!(c.body_count(), 0);
    }

    #[test]
    fn test_marbles_begin_spawns_one_body() {
        let mut c = controller(Settings::default());
        let p = Vec2::new(10.0, 20.0);
        c.touch_began(p, 0.0);

        assert_eq!(c.engine().spawned_positions(), vec![p]);
        assert_eq!(c.drag_sample(), Some(p));
        // Marbles never touches the emitter
        assert!(!c
            .engine()
            .calls
            .iter()
            .any(|call| matches!(call, EngineCall::SetEmitter { .. })));
    }

    #[test]
    fn test_ink_begin_starts_emitter_and_spawns() {
        let mut c = controller(ink_settings());
        let p = Vec2::new(-40.0, 5.0);
        c.touch_began(p, 0.0);

        assert_eq!(c.emission().birth_rate(), 220.0);
        assert_eq!(c.engine().birth_rate, 220.0);
        assert_eq!(c.engine().emitter_position, p);
        assert_eq!(c.engine().spawn_count(), 1);
    }

    #[test]
    fn test_spacing_example() {
        let mut c = controller(Settings::default());
        c.touch_began(Vec2::ZERO, 0.0);
        c.touch_moved(Vec2::new(36.0, 0.0), 0.016);

        let spawned = c.engine().spawned_positions();
        assert_eq!(spawned.len(), 4);
        assert!((spawned[1] - Vec2::new(12.0, 0.0)).length() < 1e-4);
        assert!((spawned[2] - Vec2::new(24.0, 0.0)).length() < 1e-4);
        assert_eq!(spawned[3], Vec2::new(36.0, 0.0));
        assert_eq!(c.drag_sample(), Some(Vec2::new(36.0, 0.0)));
    }

    #[test]
    fn test_short_moves_accumulate() {
        let mut c = controller(Settings::default());
        c.touch_began(Vec2::ZERO, 0.0);
        c.touch_moved(Vec2::new(5.0, 0.0), 0.01);
        c.touch_moved(Vec2::new(10.0, 0.0), 0.02);
        assert_eq!(c.engine().spawn_count(), 1);
        assert_eq!(c.drag_sample(), Some(Vec2::ZERO));

        c.touch_moved(Vec2::new(13.0, 0.0), 0.03);
        assert_eq!(c.engine().spawn_count(), 2);
        assert_eq!(c.drag_sample(), Some(Vec2::new(13.0, 0.0)));
    }

    #[test]
    fn test_move_without_begin_spawns_immediately() {
        let mut c = controller(Settings::default());
        let p = Vec2::new(50.0, 50.0);
        c.touch_moved(p, 0.0);
        assert_eq!(c.engine().spawned_positions(), vec![p]);
        assert_eq!(c.drag_sample(), Some(p));
    }

    #[test]
    fn test_toggle_tap_never_spawns() {
        for settings in [Settings::default(), ink_settings()] {
            let mut c = controller(settings);
            let start = c.mode();
            let tp = toggle_point(&c);

            c.touch_began(tp, 0.0);
            assert_eq!(c.engine().spawn_count(), 0);
            assert_eq!(c.mode(), start.toggled());

            // Dragging off the toggle doesn't paint either
            c.touch_moved(tp + Vec2::new(0.0, -200.0), 0.1);
            assert_eq!(c.engine().spawn_count(), 0);
            c.touch_ended();
        }
    }

    #[test]
    fn test_toggle_twice_restores_mode_and_label() {
        let mut c = controller(Settings::default());
        let tp = toggle_point(&c);

        c.touch_began(tp, 0.0);
        c.touch_ended();
        assert_eq!(c.mode(), InteractionMode::Ink);
        assert_eq!(c.engine().label.as_deref(), Some("Mode: Ink"));

        c.touch_began(tp, 1.0);
        c.touch_ended();
        assert_eq!(c.mode(), InteractionMode::Marbles);
        assert_eq!(c.engine().label.as_deref(), Some("Mode: Marbles"));
    }

    #[test]
    fn test_ink_birth_rate_lifecycle() {
        let mut c = controller(ink_settings());
        c.touch_began(Vec2::ZERO, 0.0);
        for i in 1..=10 {
            c.touch_moved(Vec2::new(i as f32 * 3.0, 0.0), i as f64 * 0.01);
        }

        let rates: Vec<(Vec2, f32)> = c
            .engine()
            .calls
            .iter()
            .filter_map(|call| match call {
                EngineCall::SetEmitter {
                    position,
                    birth_rate,
                } => Some((*position, *birth_rate)),
                _ => None,
            })
            .collect();
        assert_eq!(rates.len(), 11);
        assert!(rates.iter().all(|(_, rate)| *rate == 220.0));
        assert_eq!(rates.last().unwrap().0, Vec2::new(30.0, 0.0));

        c.touch_ended();
        assert_eq!(c.emission().birth_rate(), 0.0);
        assert_eq!(c.engine().birth_rate, 0.0);
        assert_eq!(c.drag_sample(), None);
    }

    #[test]
    fn test_rate_limited_spawns_once_per_interval() {
        let settings = Settings {
            initial_mode: InteractionMode::Ink,
            ink_move: MovePolicy::RateLimited,
            min_spawn_interval: 0.5,
            ..Default::default()
        };
        let mut c = controller(settings);
        c.touch_began(Vec2::ZERO, 0.0);

        // 16 moves, one every 0.125 s, up to t = 2.0
        for i in 1..=16 {
            c.touch_moved(Vec2::new(i as f32, 0.0), i as f64 * 0.125);
        }

        // Touch down + spawns at 0.5, 1.0, 1.5, 2.0
        assert_eq!(c.engine().spawn_count(), 5);
    }

    #[test]
    fn test_emitter_only_moves_spawn_nothing() {
        let settings = Settings {
            initial_mode: InteractionMode::Ink,
            ink_move: MovePolicy::EmitterOnly,
            ..Default::default()
        };
        let mut c = controller(settings);
        c.touch_began(Vec2::ZERO, 0.0);
        c.touch_moved(Vec2::new(100.0, 0.0), 0.5);
        c.touch_moved(Vec2::new(200.0, 0.0), 1.0);

        assert_eq!(c.engine().spawn_count(), 1);
        assert_eq!(c.engine().emitter_position, Vec2::new(200.0, 0.0));
        assert_eq!(c.drag_sample(), Some(Vec2::new(200.0, 0.0)));
    }

    #[test]
    fn test_end_is_idempotent() {
        let mut c = controller(ink_settings());
        c.touch_ended();
        c.touch_cancelled();
        assert!(c.engine().calls.is_empty());

        c.touch_began(Vec2::ZERO, 0.0);
        c.touch_cancelled();
        c.engine_mut().clear_calls();
        c.touch_ended();
        assert!(c.engine().calls.is_empty());
        assert_eq!(c.drag_sample(), None);
    }

    #[test]
    fn test_touch_event_without_points_is_noop() {
        let mut c = controller(Settings::default());
        let empty = TouchEvent {
            phase: TouchPhase::Began,
            points: Vec::new(),
            timestamp: 0.0,
        };
        c.touch(&empty);
        assert!(c.engine().calls.is_empty());
        assert_eq!(c.drag_sample(), None);
    }

    #[test]
    fn test_touch_event_uses_first_point() {
        let mut c = controller(Settings::default());
        let event = TouchEvent {
            phase: TouchPhase::Began,
            points: vec![Vec2::new(1.0, 1.0), Vec2::new(99.0, 99.0)],
            timestamp: 0.0,
        };
        c.touch(&event);
        assert_eq!(c.engine().spawned_positions(), vec![Vec2::new(1.0, 1.0)]);

        c.touch(&TouchEvent::cancelled(0.1));
        assert_eq!(c.drag_sample(), None);
    }

    #[test]
    fn test_bodies_fade_and_are_removed() {
        let mut settings = Settings::default();
        settings.body.fade = FadeSchedule {
            delay: 1.0,
            duration: 1.0,
        };
        let mut c = controller(settings);
        let handle = c.spawn_body(Vec2::ZERO, 0.0);
        let kept = c.spawn_body(Vec2::new(20.0, 0.0), 0.0);
        assert!(c.cancel_fade(kept));

        c.update(1.5);
        assert!(c.engine().calls.contains(&EngineCall::SetBodyAlpha {
            handle,
            alpha: 0.5
        }));

        c.update(2.0);
        assert!(c.engine().calls.contains(&EngineCall::RemoveBody { handle }));
        assert_eq!(c.body_count(), 1);
        assert_eq!(c.engine().bodies.len(), 1);
        assert_eq!(c.engine().bodies[0].0, kept);
    }

    #[test]
    fn test_body_cap_removes_oldest() {
        let mut settings = Settings::default();
        settings.body.max_bodies = 3;
        let mut c = controller(settings);

        let first = c.spawn_body(Vec2::ZERO, 0.0);
        for i in 1..5 {
            c.spawn_body(Vec2::new(i as f32, 0.0), 0.0);
        }

        assert_eq!(c.body_count(), 3);
        assert_eq!(c.engine().bodies.len(), 3);
        assert!(c.engine().calls.contains(&EngineCall::RemoveBody { handle: first }));
    }

    #[test]
    fn test_body_spec_follows_settings() {
        let mut c = controller(Settings::default());
        for i in 0..50 {
            c.spawn_body(Vec2::new(i as f32, 0.0), 0.0);
        }
        let settings = c.settings().clone();
        for (_, spec) in &c.engine().bodies {
            assert!(spec.radius >= settings.body.radius_min);
            assert!(spec.radius <= settings.body.radius_max);
            assert_eq!(spec.fill, settings.body.marble_fill);
            assert_eq!(spec.material, settings.body.material);
        }

        c.toggle_mode();
        let handle = c.spawn_body(Vec2::ZERO, 0.0);
        let spec = c
            .engine()
            .bodies
            .iter()
            .find(|(h, _)| *h == handle)
            .map(|(_, spec)| *spec)
            .unwrap();
        assert_eq!(spec.fill, settings.body.droplet_fill);
    }

    #[test]
    fn test_same_seed_same_radii() {
        let radii = |seed: u64| {
            let settings = Settings {
                seed,
                ..Default::default()
            };
            let mut c = controller(settings);
            c.touch_began(Vec2::ZERO, 0.0);
            c.touch_moved(Vec2::new(120.0, 0.0), 0.1);
            c.into_engine()
                .bodies
                .iter()
                .map(|(_, spec)| spec.radius)
                .collect::<Vec<_>>()
        };
        assert_eq!(radii(7), radii(7));
        assert_eq!(radii(7).len(), 11);
    }

    #[test]
    fn test_tiny_spacing_from_config_is_bounded() {
        let settings = Settings::from_json(r#"{ "spawn_spacing": 1e-30 }"#).unwrap();
        let mut c = controller(settings);
        c.touch_began(Vec2::ZERO, 0.0);
        c.touch_moved(Vec2::new(100.0, 0.0), 0.016);

        // Spacing is raised to the minimum of 1 unit
        assert_eq!(c.engine().spawn_count(), 101);
        assert_eq!(c.drag_sample(), Some(Vec2::new(100.0, 0.0)));
    }

    #[test]
    fn test_infinite_radius_from_config_spawns() {
        let settings = Settings::from_json(r#"{ "body": { "radius_max": 1e39 } }"#).unwrap();
        let mut c = controller(settings);
        c.touch_began(Vec2::ZERO, 0.0);

        let (_, spec) = c.engine().bodies[0];
        assert!(spec.radius.is_finite());
        assert!(spec.radius <= crate::consts::BODY_RADIUS_MAX);
    }

    #[test]
    fn test_toggle_mid_ink_stops_emitter() {
        let mut c = controller(ink_settings());
        c.touch_began(Vec2::ZERO, 0.0);
        assert!(c.emission().is_emitting());

        c.set_mode(InteractionMode::Marbles);
        assert!(!c.emission().is_emitting());
        assert_eq!(c.engine().birth_rate, 0.0);
    }
}
