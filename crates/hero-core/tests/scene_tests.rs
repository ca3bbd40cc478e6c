use hero_core::{
    drift, row_x, CandleId, DetailVariant, HeroConfig, ParticleBuffer, Pattern, Scene, Shape,
    Trend, ViewportClass, DRIFT_AMPLITUDE,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn build(config: &HeroConfig, seed: u64) -> Scene {
    let mut rng = StdRng::seed_from_u64(seed);
    Scene::build(config, 16.0 / 9.0, 0.028, &mut rng)
}

#[test]
fn same_seed_builds_same_scene() {
    let config = HeroConfig::default();
    let a = build(&config, 11);
    let b = build(&config, 11);
    assert_eq!(a.candles(), b.candles());
    assert_eq!(a.particles.positions(), b.particles.positions());

    let c = build(&config, 12);
    assert_ne!(a.particles.positions(), c.particles.positions());
}

#[test]
fn candles_are_spread_symmetrically_and_pushed_back_at_the_edges() {
    let config = HeroConfig::default();
    let scene = build(&config, 3);
    let candles = scene.candles();
    assert_eq!(candles.len(), 12);

    let n = candles.len();
    for i in 0..n {
        let x = candles[i].base_position().x;
        let mirror = candles[n - 1 - i].base_position().x;
        assert!((x + mirror).abs() < 1e-5);
        assert!((x - row_x(i, n, config.spread)).abs() < 1e-6);
    }
    for candle in candles {
        let base = candle.base_position();
        let expected = -base.x.abs() * 0.1;
        assert!((base.z - expected).abs() <= 0.4 + 1e-6);
        assert_eq!(base.y, 0.0);
        assert!((0.0..std::f32::consts::TAU).contains(&candle.bob_phase()));
    }
}

#[test]
fn patterns_round_robin_and_colors_alternate() {
    let scene = build(&HeroConfig::default(), 5);
    for (i, candle) in scene.candles().iter().enumerate() {
        assert_eq!(candle.pattern(), Pattern::ALL[i % 5]);
        assert_eq!(candle.body_height(), candle.pattern().body_height(i));
        let trend = if i % 2 == 0 { Trend::Bullish } else { Trend::Bearish };
        assert_eq!(candle.trend(), trend);
    }
    assert_eq!(Pattern::Hammer.body_height(0), 0.7);
}

#[test]
fn mobile_defaults_build_a_smaller_row() {
    let config = HeroConfig::for_viewport(ViewportClass::Mobile);
    let scene = build(&config, 1);
    assert_eq!(scene.candles().len(), 8);
    assert_eq!(scene.rig.camera.offset.y, 2.5);
    assert!(scene.candle(CandleId(7)).is_some());
    assert!(scene.candle(CandleId(8)).is_none());
}

#[test]
fn exactly_one_representation_is_visible() {
    let scene = build(&HeroConfig::default(), 9);
    let candle = &scene.candles()[0];
    assert_eq!(candle.detail(), DetailVariant::High);
    let high = candle.parts();
    assert_eq!(high.len(), 3);
    assert!(high.iter().all(|p| p.shape != Shape::LowPoly));
    assert_eq!(high.iter().filter(|p| p.shape == Shape::Body).count(), 1);
    assert_eq!(high.iter().filter(|p| p.shape == Shape::Wick).count(), 2);
}

#[test]
fn particle_positions_are_original_plus_bounded_offset() {
    let mut rng = StdRng::seed_from_u64(21);
    let mut particles = ParticleBuffer::generate(200, &mut rng);
    assert_eq!(particles.len(), 200);
    assert_eq!(particles.colors().len(), 600);

    for t in [0.0f32, 1.5, 60.0, 3_600.0, 86_400.0] {
        particles.advance(t);
        for i in 0..particles.len() {
            let offset = particles.position(i) - particles.original_position(i);
            assert!((offset - drift(i, t)).length() < 1e-3);
            assert!(offset.x.abs() <= DRIFT_AMPLITUDE.x + 1e-3);
            assert!(offset.y.abs() <= DRIFT_AMPLITUDE.y + 1e-3);
            assert!(offset.z.abs() <= DRIFT_AMPLITUDE.z + 1e-3);
        }
        assert!((0.0..std::f32::consts::TAU).contains(&particles.spin()));
    }
}

#[test]
fn advancing_twice_to_the_same_time_is_idempotent() {
    let mut rng = StdRng::seed_from_u64(4);
    let mut particles = ParticleBuffer::generate(32, &mut rng);
    particles.advance(12.5);
    let first = particles.positions().to_vec();
    particles.advance(400.0);
    particles.advance(12.5);
    assert_eq!(first, particles.positions());
}

#[test]
fn backdrop_has_grid_and_wall_lines() {
    let scene = build(&HeroConfig::default(), 2);
    // 51 grid lines per axis plus 20 wall lines, two vertices each.
    assert_eq!(scene.backdrop.lines.len(), 51 * 4 + 20 * 2);
    assert_eq!(scene.backdrop.panel_center.z, -25.0);
    assert!(scene.fog.density > 0.0);
}
