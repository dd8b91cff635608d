//! Gravity Paint entry point
//!
//! Without a host engine attached this runs a scripted headless session
//! against the recording engine and logs what would have been drawn.
//!
//! Usage: `gravity-paint [settings.json] [ink-move-policy]`
//!
//! The policy is one of `spacing`, `rate-limited` or `emitter-only`.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::PathBuf;

    use glam::Vec2;
    use gravity_paint::{MovePolicy, PaintController, Recorder, Settings, TouchEvent};

    env_logger::init();
    log::info!("Gravity Paint (headless) starting...");

    let mut args = std::env::args().skip(1);
    let mut settings = match args.next().map(PathBuf::from) {
        Some(path) => Settings::load(&path),
        None => Settings::default(),
    };
    if let Some(policy) = args.next() {
        match MovePolicy::from_str(&policy) {
            Some(policy) => settings.ink_move = policy,
            None => log::warn!(
                "Unknown move policy '{}', keeping {}",
                policy,
                settings.ink_move.as_str()
            ),
        }
    }

    const FRAME: f64 = 1.0 / 60.0;
    let mut controller = PaintController::new(settings, Recorder::new());
    let mut now = 0.0;

    // Marbles: a diagonal stroke sampled once per frame
    controller.touch(&TouchEvent::began(Vec2::new(-200.0, 200.0), now));
    for i in 1..=30 {
        now += FRAME;
        let p = Vec2::new(-200.0 + i as f32 * 13.0, 200.0 - i as f32 * 7.0);
        controller.touch(&TouchEvent::moved(p, now));
        controller.update(now);
    }
    controller.touch(&TouchEvent::ended(Vec2::new(190.0, -10.0), now));
    log::info!("Marble stroke: {} bodies", controller.body_count());

    // Tap the toggle to switch to ink
    let toggle = controller.settings().toggle.bounds.center();
    controller.touch(&TouchEvent::began(toggle, now));
    controller.touch(&TouchEvent::ended(toggle, now));

    // Ink: a slow circle
    now += FRAME;
    controller.touch(&TouchEvent::began(Vec2::new(150.0, 0.0), now));
    for i in 1..=120 {
        now += FRAME;
        let angle = i as f32 / 120.0 * std::f32::consts::TAU;
        let p = Vec2::new(angle.cos(), angle.sin()) * 150.0;
        controller.touch(&TouchEvent::moved(p, now));
        controller.update(now);
    }
    controller.touch(&TouchEvent::ended(Vec2::new(150.0, 0.0), now));
    log::info!(
        "Ink circle: {} bodies, birth rate now {}",
        controller.body_count(),
        controller.emission().birth_rate()
    );

    // Let everything fade out
    while controller.body_count() > 0 && now < 60.0 {
        now += FRAME;
        controller.update(now);
    }

    let engine = controller.into_engine();
    log::info!(
        "Session done at t={:.2}s: {} spawned, {} engine calls, {} bodies left",
        now,
        engine.spawn_count(),
        engine.calls.len(),
        engine.bodies.len()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The host engine drives PaintController directly on wasm
}
