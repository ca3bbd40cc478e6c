mod common;

use common::*;
use glam::{Vec2, Vec3};
use hero_core::{
    DetailVariant, HeroConfig, HeroError, QualityTier, SurfaceRect, Viewport, ViewportClass,
};
use std::time::Duration;

fn square_rect() -> SurfaceRect {
    SurfaceRect {
        left: 0.0,
        top: 0.0,
        width: 100.0,
        height: 100.0,
    }
}

#[test]
fn mount_schedules_exactly_one_frame() {
    let (engine, log) = mount_default();
    assert!(engine.is_mounted());
    assert_eq!(engine.host().requested, 1);
    assert!(engine.has_pending_frame());
    assert_eq!(engine.scene().candles().len(), 12);
    // Initial quality and size pushed to the renderer.
    assert_eq!(log.borrow().quality.len(), 1);
    assert_eq!(log.borrow().resizes.len(), 1);
}

#[test]
fn each_tick_renders_then_reschedules() {
    let (mut engine, log) = mount_default();
    run_ticks(&mut engine, Duration::ZERO, 5, 16);
    assert_eq!(log.borrow().frames, 5);
    assert_eq!(engine.host().requested, 6);
    assert!(engine.has_pending_frame());
}

#[test]
fn idle_session_uses_the_idle_bob_amplitude() {
    let config = HeroConfig {
        object_count: 12,
        ..HeroConfig::default()
    };
    let (mut engine, _) = mount_with(config, desktop_viewport());
    let mut now = Duration::ZERO;
    let mut last = None;
    for _ in 0..1000 {
        now += ms(16);
        last = engine.on_frame(now);
    }
    let report = last.expect("engine still mounted");
    assert!(!report.input.pointer_moving);
    assert_eq!(report.bob_amplitude, engine.config().motion.bob_amplitude_idle);
    assert!(report.bob_amplitude < engine.config().motion.bob_amplitude_moving);
}

#[test]
fn pointer_activity_expires_after_quiet_period() {
    let (mut engine, _) = mount_default();
    engine.on_pointer_move(Vec2::new(30.0, 30.0), square_rect(), ms(100));

    let report = engine.on_frame(ms(116)).unwrap();
    assert!(report.input.pointer_moving);
    assert_eq!(report.bob_amplitude, engine.config().motion.bob_amplitude_moving);

    let report = engine.on_frame(ms(301)).unwrap();
    assert!(!report.input.pointer_moving);
}

#[test]
fn camera_rig_eases_toward_pointer_target() {
    let (mut engine, _) = mount_default();
    let rect = SurfaceRect {
        left: 0.0,
        top: 0.0,
        width: 200.0,
        height: 100.0,
    };
    // Normalized (0.5, -0.3).
    engine.on_pointer_move(Vec2::new(150.0, 65.0), rect, ms(5));
    let p = engine.input().pointer;
    assert!((p.x - 0.5).abs() < 1e-5);
    assert!((p.y + 0.3).abs() < 1e-5);

    engine.on_frame(ms(16));
    let target_x = 0.5 * engine.config().motion.camera_sensitivity_x;
    let x = engine.scene().rig.position.x;
    assert!(x > 0.0);
    assert!(x < target_x);
    let expected = target_x * engine.config().motion.camera_inertia;
    assert!((x - expected).abs() < 1e-4);
}

#[test]
fn detail_distance_ignores_rig_sway() {
    let config = HeroConfig {
        quality_hint: Some(QualityTier::Reduced),
        ..HeroConfig::default()
    };
    let (mut engine, _) = mount_with(config, desktop_viewport());
    let rect = SurfaceRect {
        left: 0.0,
        top: 0.0,
        width: 200.0,
        height: 100.0,
    };
    engine.on_pointer_move(Vec2::new(200.0, 0.0), rect, ms(5));
    run_ticks(&mut engine, Duration::ZERO, 10, 16);

    let rig = &engine.scene().rig;
    assert!(rig.position.length() > 0.1);
    assert_eq!(rig.lod_origin(), rig.camera.offset);
    for candle in engine.scene().candles() {
        let distance = candle.position().distance(rig.camera.offset);
        assert_eq!(candle.detail(), engine.quality().detail_for(distance));
    }
}

#[test]
fn fast_scroll_is_absorbed_over_many_ticks() {
    let (mut engine, _) = mount_default();
    engine.on_scroll(1000.0, 2000.0, 1000.0);
    assert_eq!(engine.input().scroll.target, 1.0);

    let k = engine.config().motion.scroll_inertia;
    let mut now = Duration::ZERO;
    let mut ticks = 0u32;
    loop {
        now += ms(16);
        let report = engine.on_frame(now).unwrap();
        ticks += 1;
        if ticks == 1 {
            assert!(report.input.scroll.current < 1.0);
            assert!((report.input.scroll.current - k).abs() < 1e-6);
        }
        if (1.0 - report.input.scroll.current).abs() < 0.01 {
            break;
        }
        assert!(ticks < 10_000);
    }
    assert!(ticks as f32 > 1.0 / k);
    assert!((ticks as f32) < 10.0 / k);
}

#[test]
fn held_input_converges_without_overshoot() {
    let mut config = HeroConfig::default();
    config.motion.bob_amplitude_moving = 0.0;
    config.motion.bob_amplitude_idle = 0.0;
    let (mut engine, _) = mount_with(config, desktop_viewport());
    engine.on_pointer_move(Vec2::new(80.0, 30.0), square_rect(), Duration::ZERO);

    let motion = engine.config().motion.clone();
    let p = engine.input().pointer;
    let vsign = motion.vertical_sign();
    let rig_target = Vec3::new(
        p.x * motion.camera_sensitivity_x,
        vsign * p.y * motion.camera_sensitivity_y,
        0.0,
    );
    let targets: Vec<Vec3> = engine
        .scene()
        .candles()
        .iter()
        .map(|c| {
            let base = c.base_position();
            let df = c.distance_factor();
            base + Vec3::new(
                p.x * df * motion.pointer_gain_x,
                vsign * p.y * df * motion.pointer_gain_y,
                -p.x.abs() * 0.4 * (base.x / 6.0),
            )
        })
        .collect();
    let tilt_target = Vec2::new(-p.y * 0.05, p.x * 0.05);

    let gaps = |engine: &TestEngine| -> Vec<f32> {
        let mut out = Vec::new();
        out.extend((rig_target - engine.scene().rig.position).to_array());
        for (c, t) in engine.scene().candles().iter().zip(&targets) {
            out.extend((*t - c.position()).to_array());
            out.extend((tilt_target - c.rotation()).to_array());
        }
        out
    };

    let mut prev = gaps(&engine);
    let mut now = Duration::ZERO;
    for _ in 0..1000 {
        now += ms(16);
        engine.on_frame(now);
        let next = gaps(&engine);
        for (g, pg) in next.iter().zip(&prev) {
            assert!(g.abs() <= pg.abs() + 1e-5, "gap grew: {pg} -> {g}");
            assert!(g * pg >= 0.0 || g.abs() < 1e-4, "overshoot: {pg} -> {g}");
        }
        prev = next;
    }
    for g in prev {
        assert!(g.abs() < 1e-4);
    }
}

#[test]
fn sustained_low_frame_rate_downgrades_once() {
    let config = HeroConfig {
        quality_hint: Some(QualityTier::Full),
        ..HeroConfig::default()
    };
    let (mut engine, log) = mount_with(config, Viewport::new(1280.0, 720.0, 2.0));
    assert_eq!(engine.quality().params().pixel_ratio, 2.0);

    let mut changes = Vec::new();
    let mut now = Duration::ZERO;
    // 25 fps for 1.2 s.
    for _ in 0..30 {
        now += ms(40);
        if let Some(change) = engine.on_frame(now).and_then(|r| r.quality_change) {
            changes.push(change);
        }
    }
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].from, QualityTier::Full);
    assert_eq!(changes[0].to, QualityTier::Reduced);
    assert_eq!(engine.quality().tier(), QualityTier::Reduced);

    let log = log.borrow();
    let last = log.quality.last().unwrap();
    assert_eq!(last.pixel_ratio, 1.0);
    assert!(last.force_low_detail);
    assert_eq!(log.resizes.last().unwrap().1, 1.0);
    assert!(engine
        .scene()
        .candles()
        .iter()
        .all(|c| c.detail() == DetailVariant::Low));
    assert_eq!(engine.scene().fog.density, engine.config().quality.fog_density_reduced);
}

#[test]
fn recovered_frame_rate_restores_full_quality() {
    let config = HeroConfig {
        quality_hint: Some(QualityTier::Full),
        ..HeroConfig::default()
    };
    let (mut engine, _) = mount_with(config, Viewport::new(1280.0, 720.0, 3.0));
    let window_end = run_ticks(&mut engine, Duration::ZERO, 25, 40);
    assert_eq!(window_end, ms(1000));
    assert_eq!(engine.quality().tier(), QualityTier::Reduced);

    // 60 fps window.
    for i in 1..=60u64 {
        engine.on_frame(window_end + Duration::from_micros(i * 1_000_000 / 60));
    }
    assert_eq!(engine.quality().tier(), QualityTier::Full);
    assert!(!engine.quality().is_degraded());
    let params = engine.quality().params();
    assert_eq!(params.pixel_ratio, 2.0);
    assert_eq!(params.fog_density, engine.config().quality.fog_density_full);
    assert!(engine
        .scene()
        .candles()
        .iter()
        .all(|c| c.detail() == DetailVariant::High));
}

#[test]
fn teardown_twice_cancels_once() {
    let (mut engine, log) = mount_default();
    run_ticks(&mut engine, Duration::ZERO, 3, 16);

    assert!(engine.teardown());
    assert!(!engine.teardown());

    assert_eq!(engine.host().cancelled.len(), 1);
    assert_eq!(engine.host().detached, 1);
    assert_eq!(log.borrow().released, 1);
    assert!(engine.renderer().is_none());
}

#[test]
fn nothing_is_scheduled_after_teardown() {
    let (mut engine, log) = mount_default();
    run_ticks(&mut engine, Duration::ZERO, 2, 16);
    engine.teardown();
    let requested = engine.host().requested;

    // A callback that raced teardown must not run or reschedule.
    assert!(engine.on_frame(ms(100)).is_none());
    assert!(engine.on_frame(ms(116)).is_none());
    assert_eq!(engine.host().requested, requested);
    assert!(!engine.has_pending_frame());
    assert!(!engine.host().listeners_active());
    assert_eq!(log.borrow().frames, 2);
}

#[test]
fn events_after_teardown_are_ignored() {
    let (mut engine, log) = mount_default();
    engine.teardown();
    let resizes = log.borrow().resizes.len();

    engine.on_resize(Viewport::new(400.0, 900.0, 3.0));
    engine.on_pointer_move(Vec2::new(10.0, 10.0), square_rect(), ms(5));
    engine.on_scroll(500.0, 2000.0, 1000.0);

    assert_eq!(engine.viewport(), desktop_viewport());
    assert_eq!(engine.input().pointer, Vec2::ZERO);
    assert_eq!(engine.input().scroll.target, 0.0);
    assert_eq!(log.borrow().resizes.len(), resizes);
}

#[test]
fn resize_updates_aspect_without_rebuilding() {
    let (mut engine, log) = mount_default();
    let before: Vec<Vec3> = engine
        .scene()
        .candles()
        .iter()
        .map(|c| c.base_position())
        .collect();

    engine.on_resize(Viewport::new(600.0, 900.0, 1.0));
    assert!((engine.scene().rig.camera.aspect - 600.0 / 900.0).abs() < 1e-6);
    let (viewport, _) = *log.borrow().resizes.last().unwrap();
    assert_eq!(viewport.width, 600.0);

    let after: Vec<Vec3> = engine
        .scene()
        .candles()
        .iter()
        .map(|c| c.base_position())
        .collect();
    assert_eq!(before, after);
    assert_eq!(engine.config().viewport_class, ViewportClass::Desktop);
}

#[test]
fn lost_context_stops_the_engine() {
    let (mut engine, log) = mount_default();
    log.borrow_mut().fail_with = Some(HeroError::ContextLost("device lost".into()));
    engine.on_frame(ms(16));

    assert!(!engine.is_mounted());
    assert!(!engine.has_pending_frame());
    assert_eq!(log.borrow().released, 1);
    assert!(engine.on_frame(ms(32)).is_none());
}

#[test]
fn transient_surface_error_skips_one_frame() {
    let (mut engine, log) = mount_default();
    log.borrow_mut().fail_with = Some(HeroError::Surface("timeout".into()));
    engine.on_frame(ms(16));
    assert!(engine.is_mounted());
    assert!(engine.has_pending_frame());

    log.borrow_mut().fail_with = None;
    assert!(engine.on_frame(ms(32)).is_some());
    assert_eq!(log.borrow().frames, 2);
}

#[test]
fn particles_follow_elapsed_time() {
    let (mut engine, _) = mount_default();
    let now = run_ticks(&mut engine, Duration::ZERO, 600, 16);
    let t = now.as_secs_f32();
    let particles = &engine.scene().particles;
    for i in [0, 57, particles.len() - 1] {
        let expected = particles.original_position(i) + hero_core::drift(i, t);
        assert!((particles.position(i) - expected).length() < 1e-4);
    }
}
