//! The per-frame animation engine.
//!
//! `HeroEngine` owns one scene, one input sampler, one quality controller and
//! the lifecycle guard around its host. Hosts feed it events and frame
//! callbacks; it never touches the DOM or the GPU directly.

use crate::candle::DetailVariant;
use crate::config::{HeroConfig, Viewport};
use crate::constants::*;
use crate::ease::{ease_vec2, ease_vec3};
use crate::error::HeroError;
use crate::input::{normalize_pointer, normalize_scroll, InputSampler, InputState, SurfaceRect};
use crate::lifecycle::{FrameHost, Lifecycle};
use crate::quality::{QualityChange, QualityController, QualityParams};
use crate::scene::Scene;
use glam::{Vec2, Vec3};
use rand::Rng;
use std::time::Duration;

/// Drawing backend driven by the engine.
pub trait Renderer {
    /// Resize the drawing surface to `viewport` at `pixel_ratio`.
    fn resize(&mut self, viewport: &Viewport, pixel_ratio: f32);

    fn apply_quality(&mut self, params: &QualityParams);

    /// Draw one frame. Fatal errors stop the engine.
    fn render(&mut self, scene: &Scene) -> Result<(), HeroError>;

    /// Release every GPU resource owned by the renderer.
    fn release(self)
    where
        Self: Sized;
}

/// What one tick did; mostly useful to tests and debug logging.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameReport {
    pub elapsed: Duration,
    pub input: InputState,
    pub bob_amplitude: f32,
    pub quality_change: Option<QualityChange>,
}

pub struct HeroEngine<H: FrameHost, R: Renderer> {
    config: HeroConfig,
    viewport: Viewport,
    scene: Scene,
    input: InputSampler,
    quality: QualityController,
    lifecycle: Lifecycle<H>,
    renderer: Option<R>,
    started: Duration,
}

impl<H: FrameHost, R: Renderer> HeroEngine<H, R> {
    /// Build the scene, configure the renderer and schedule the first frame.
    pub fn mount(
        config: HeroConfig,
        viewport: Viewport,
        host: H,
        renderer: R,
        now: Duration,
        rng: &mut impl Rng,
    ) -> Self {
        let config = config.sanitized();
        let tier = config.starting_tier(viewport.device_pixel_ratio);
        let quality = QualityController::new(
            tier,
            viewport.device_pixel_ratio,
            config.quality.clone(),
            config.motion.lod_distance,
            now,
        );
        let scene = Scene::build(
            &config,
            viewport.aspect(),
            quality.params().fog_density,
            rng,
        );
        log::info!(
            "[engine] mounted: {} candles, {:?} viewport, {:?} tier",
            scene.candles().len(),
            config.viewport_class,
            tier
        );

        let mut engine = Self {
            config,
            viewport,
            scene,
            input: InputSampler::new(),
            quality,
            lifecycle: Lifecycle::new(host),
            renderer: Some(renderer),
            started: now,
        };
        engine.apply_quality();
        engine.lifecycle.schedule();
        engine
    }

    pub fn config(&self) -> &HeroConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn input(&self) -> &InputState {
        self.input.state()
    }

    pub fn quality(&self) -> &QualityController {
        &self.quality
    }

    pub fn host(&self) -> &H {
        self.lifecycle.host()
    }

    pub fn renderer(&self) -> Option<&R> {
        self.renderer.as_ref()
    }

    pub fn is_mounted(&self) -> bool {
        self.lifecycle.is_mounted()
    }

    pub fn has_pending_frame(&self) -> bool {
        self.lifecycle.has_pending_frame()
    }

    pub fn on_pointer_move(&mut self, client: Vec2, rect: SurfaceRect, now: Duration) {
        if !self.is_mounted() {
            return;
        }
        self.input.pointer_moved(normalize_pointer(client, rect), now);
    }

    pub fn on_scroll(&mut self, scroll_y: f32, document_height: f32, viewport_height: f32) {
        if !self.is_mounted() {
            return;
        }
        self.input
            .scrolled(normalize_scroll(scroll_y, document_height, viewport_height));
    }

    /// Update aspect ratio and surface size in place; the scene is kept.
    pub fn on_resize(&mut self, viewport: Viewport) {
        if !self.is_mounted() {
            return;
        }
        self.viewport = viewport;
        self.scene.rig.camera.aspect = viewport.aspect();
        self.quality.set_device_pixel_ratio(viewport.device_pixel_ratio);
        let pixel_ratio = self.quality.params().pixel_ratio;
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.resize(&self.viewport, pixel_ratio);
        }
    }

    /// Run one tick. Returns `None` when the engine is no longer mounted.
    pub fn on_frame(&mut self, now: Duration) -> Option<FrameReport> {
        if !self.lifecycle.frame_fired() {
            return None;
        }

        let elapsed = now.saturating_sub(self.started);
        let t = elapsed.as_secs_f32();
        let motion = &self.config.motion;

        let input = self
            .input
            .refresh(now, motion.pointer_stop(), motion.scroll_inertia);
        let p = input.pointer;
        let s = input.scroll.current;
        let vsign = motion.vertical_sign();

        let rig_target = Vec3::new(
            p.x * motion.camera_sensitivity_x,
            vsign * p.y * motion.camera_sensitivity_y,
            0.0,
        );
        self.scene.rig.position =
            ease_vec3(self.scene.rig.position, rig_target, motion.camera_inertia);
        let lod_origin = self.scene.rig.lod_origin();

        let bob_amplitude = motion.bob_amplitude(input.pointer_moving);
        let tilt_target = Vec2::new(
            -p.y * TILT_POINTER + s * TILT_SCROLL_X,
            p.x * TILT_POINTER + s * TILT_SCROLL_Y,
        );
        for candle in self.scene.candles_mut() {
            let base = candle.base_position();
            let df = candle.distance_factor();
            let depth_weight = base.x / DEPTH_REFERENCE_X;
            let bob = (t * motion.bob_speed + candle.bob_phase()).sin() * bob_amplitude;
            let target = base
                + Vec3::new(
                    p.x * df * motion.pointer_gain_x,
                    vsign * p.y * df * motion.pointer_gain_y
                        + s * motion.scroll_sensitivity * df
                        + bob,
                    (-p.x.abs() * POINTER_DEPTH_PULL + s * SCROLL_DEPTH_GAIN) * depth_weight,
                );
            candle.set_position(ease_vec3(candle.position(), target, motion.position_inertia));
            candle.set_rotation(ease_vec2(
                candle.rotation(),
                tilt_target,
                motion.rotation_inertia,
            ));
            let distance = candle.position().distance(lod_origin);
            candle.set_detail(self.quality.detail_for(distance));
        }

        let quality_change = self.quality.on_frame(now);
        if quality_change.is_some() {
            self.apply_quality();
        }

        self.scene.particles.advance(t);

        if let Some(renderer) = self.renderer.as_mut() {
            if let Err(err) = renderer.render(&self.scene) {
                if err.is_fatal() {
                    log::error!("[engine] render failed, tearing down: {err}");
                    self.teardown();
                } else {
                    log::warn!("[engine] frame skipped: {err}");
                }
            }
        }
        self.lifecycle.schedule();

        Some(FrameReport {
            elapsed,
            input,
            bob_amplitude,
            quality_change,
        })
    }

    /// Cancel the pending frame, detach inputs and release the renderer.
    ///
    /// Returns false when called again after a completed teardown.
    pub fn teardown(&mut self) -> bool {
        if !self.lifecycle.teardown() {
            return false;
        }
        if let Some(renderer) = self.renderer.take() {
            renderer.release();
        }
        log::debug!("[engine] torn down");
        true
    }

    /// Push the controller's current parameters into scene and renderer.
    fn apply_quality(&mut self) {
        let params = self.quality.params();
        self.scene.fog.density = params.fog_density;
        self.scene.shadows = params.shadows;

        let lod_origin = self.scene.rig.lod_origin();
        for candle in self.scene.candles_mut() {
            let detail = if params.force_low_detail {
                DetailVariant::Low
            } else {
                self.quality.detail_for(candle.position().distance(lod_origin))
            };
            candle.set_detail(detail);
        }

        if let Some(renderer) = self.renderer.as_mut() {
            renderer.apply_quality(&params);
            renderer.resize(&self.viewport, params.pixel_ratio);
        }
    }
}
