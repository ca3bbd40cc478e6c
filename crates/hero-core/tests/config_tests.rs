use hero_core::{HeroConfig, QualityTuning, Viewport, ViewportClass};

#[test]
fn viewport_class_uses_the_mobile_breakpoint() {
    assert_eq!(ViewportClass::from_width(767.0), ViewportClass::Mobile);
    assert_eq!(ViewportClass::from_width(768.0), ViewportClass::Desktop);
    assert_eq!(Viewport::new(375.0, 812.0, 3.0).class(), ViewportClass::Mobile);
}

#[test]
fn viewport_sizes_never_collapse() {
    let v = Viewport::new(0.0, 0.0, 2.0);
    assert_eq!(v.aspect(), 1.0);
    assert_eq!(v.physical_size(2.0), (1, 1));
    assert_eq!(Viewport::new(640.0, 360.0, 2.0).physical_size(1.5), (960, 540));
}

#[test]
fn per_class_defaults() {
    let desktop = HeroConfig::for_viewport(ViewportClass::Desktop);
    assert_eq!(desktop.object_count, 12);
    assert_eq!(desktop.spread, 14.0);
    assert_eq!(desktop.motion.bob_amplitude_idle, 0.1);

    let mobile = HeroConfig::for_viewport(ViewportClass::Mobile);
    assert_eq!(mobile.object_count, 8);
    assert_eq!(mobile.spread, 8.0);
    assert_eq!(mobile.motion.scroll_sensitivity, 0.3);
    assert_eq!(mobile.motion.bob_amplitude_moving, 0.15);
}

#[test]
fn zero_object_count_is_clamped_up() {
    let config = HeroConfig {
        object_count: 0,
        ..HeroConfig::default()
    }
    .sanitized();
    assert_eq!(config.object_count, 1);

    let config = HeroConfig {
        object_count: 10_000,
        ..HeroConfig::default()
    }
    .sanitized();
    assert_eq!(config.object_count, 64);
}

#[test]
fn unusable_numbers_fall_back_to_defaults() {
    let mut config = HeroConfig::for_viewport(ViewportClass::Mobile);
    config.spread = f32::NAN;
    config.motion.position_inertia = 0.0;
    config.motion.camera_inertia = 4.0;
    config.motion.scroll_inertia = -0.3;
    config.motion.lod_distance = f32::INFINITY;
    let config = config.sanitized();

    assert_eq!(config.spread, 8.0);
    assert_eq!(config.motion.position_inertia, 0.06);
    assert_eq!(config.motion.camera_inertia, 1.0);
    assert_eq!(config.motion.scroll_inertia, 0.08);
    assert_eq!(config.motion.lod_distance, 15.0);
}

#[test]
fn inverted_thresholds_are_repaired() {
    let config = HeroConfig {
        quality: QualityTuning {
            downgrade_below_fps: 45.0,
            upgrade_above_fps: 20.0,
            window_ms: 0,
            ..QualityTuning::default()
        },
        ..HeroConfig::default()
    }
    .sanitized();
    assert!(config.quality.upgrade_above_fps >= config.quality.downgrade_below_fps);
    assert_eq!(config.quality.window_ms, 1000);
}

#[test]
fn sane_config_is_untouched() {
    let config = HeroConfig::default();
    assert_eq!(config.clone().sanitized(), config);
}

#[test]
fn options_fill_gaps_from_the_detected_class() {
    use hero_core::HeroOptions;

    let options = HeroOptions {
        seed: Some(9),
        ..HeroOptions::default()
    };
    let config = options.resolve(ViewportClass::Mobile);
    assert_eq!(config.object_count, 8);
    assert_eq!(config.spread, 8.0);
    assert_eq!(config.seed, Some(9));

    let options = HeroOptions {
        viewport_class: Some(ViewportClass::Desktop),
        object_count: Some(5),
        ..HeroOptions::default()
    };
    let config = options.resolve(ViewportClass::Mobile);
    assert_eq!(config.viewport_class, ViewportClass::Desktop);
    assert_eq!(config.object_count, 5);
    assert_eq!(config.motion.camera_height, 3.5);
}

#[test]
fn partial_motion_keeps_the_class_defaults() {
    use hero_core::HeroOptions;

    let options: HeroOptions =
        serde_json::from_str(r#"{"motion":{"cameraInertia":0.1},"quality":{"windowMs":500}}"#)
            .unwrap();
    let config = options.resolve(ViewportClass::Mobile);
    assert_eq!(config.motion.camera_inertia, 0.1);
    assert_eq!(config.motion.camera_height, 2.5);
    assert_eq!(config.motion.bob_amplitude_moving, 0.15);
    assert_eq!(config.motion.scroll_sensitivity, 0.3);
    assert_eq!(config.quality.window_ms, 500);
    assert_eq!(config.quality.downgrade_below_fps, 30.0);

    let untouched = HeroOptions::default().resolve(ViewportClass::Mobile);
    assert_eq!(untouched, HeroConfig::for_viewport(ViewportClass::Mobile));
}

#[test]
fn starting_tier_prefers_the_hint() {
    use hero_core::QualityTier;

    let mut config = HeroConfig::default();
    assert_eq!(config.starting_tier(2.0), QualityTier::Full);
    assert_eq!(config.starting_tier(1.0), QualityTier::Reduced);
    config.quality_hint = Some(QualityTier::Full);
    assert_eq!(config.starting_tier(1.0), QualityTier::Full);
}
