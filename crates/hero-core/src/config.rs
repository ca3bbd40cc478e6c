//! Engine configuration.
//!
//! `HeroConfig` is what the mounting page hands to the engine. Every tuning
//! constant is exposed so a page can adjust the feel without rebuilding, and
//! `sanitized` turns whatever arrives into something the engine can run with.

use crate::constants::*;
use crate::ease::sanitize_factor;
use crate::quality::{initial_tier, QualityTier};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ViewportClass {
    Mobile,
    Desktop,
}

impl ViewportClass {
    pub fn from_width(css_width: f32) -> Self {
        if css_width < MOBILE_BREAKPOINT_PX {
            ViewportClass::Mobile
        } else {
            ViewportClass::Desktop
        }
    }
}

/// Size of the render surface in CSS pixels plus the device pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub device_pixel_ratio: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32, device_pixel_ratio: f32) -> Self {
        Self {
            width,
            height,
            device_pixel_ratio,
        }
    }

    pub fn aspect(&self) -> f32 {
        if self.width > 0.0 && self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }

    pub fn class(&self) -> ViewportClass {
        ViewportClass::from_width(self.width)
    }

    /// Backing-store size for a given pixel ratio, never zero.
    pub fn physical_size(&self, pixel_ratio: f32) -> (u32, u32) {
        let w = (self.width.max(0.0) * pixel_ratio).round() as u32;
        let h = (self.height.max(0.0) * pixel_ratio).round() as u32;
        (w.max(1), h.max(1))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MotionTuning {
    pub position_inertia: f32,
    pub rotation_inertia: f32,
    pub camera_inertia: f32,
    pub scroll_inertia: f32,
    pub camera_sensitivity_x: f32,
    pub camera_sensitivity_y: f32,
    pub pointer_gain_x: f32,
    pub pointer_gain_y: f32,
    pub scroll_sensitivity: f32,
    pub bob_amplitude_moving: f32,
    pub bob_amplitude_idle: f32,
    pub bob_speed: f32,
    pub pointer_stop_ms: u64,
    pub vertical_invert: bool,
    pub lod_distance: f32,
    pub camera_height: f32,
}

impl MotionTuning {
    pub fn for_viewport(class: ViewportClass) -> Self {
        let mobile = class == ViewportClass::Mobile;
        Self {
            position_inertia: POSITION_INERTIA,
            rotation_inertia: ROTATION_INERTIA,
            camera_inertia: CAMERA_INERTIA,
            scroll_inertia: SCROLL_INERTIA,
            camera_sensitivity_x: CAMERA_SENSITIVITY_X,
            camera_sensitivity_y: CAMERA_SENSITIVITY_Y,
            pointer_gain_x: POINTER_GAIN_X,
            pointer_gain_y: POINTER_GAIN_Y,
            scroll_sensitivity: if mobile {
                MOBILE_SCROLL_SENSITIVITY
            } else {
                DESKTOP_SCROLL_SENSITIVITY
            },
            bob_amplitude_moving: if mobile {
                MOBILE_BOB_MOVING
            } else {
                DESKTOP_BOB_MOVING
            },
            bob_amplitude_idle: if mobile {
                MOBILE_BOB_IDLE
            } else {
                DESKTOP_BOB_IDLE
            },
            bob_speed: BOB_SPEED,
            pointer_stop_ms: POINTER_STOP_MS,
            vertical_invert: true,
            lod_distance: LOD_DISTANCE,
            camera_height: if mobile {
                MOBILE_CAMERA_HEIGHT
            } else {
                DESKTOP_CAMERA_HEIGHT
            },
        }
    }

    pub fn pointer_stop(&self) -> Duration {
        Duration::from_millis(self.pointer_stop_ms)
    }

    /// Idle-bob amplitude for the current pointer activity.
    pub fn bob_amplitude(&self, pointer_moving: bool) -> f32 {
        if pointer_moving {
            self.bob_amplitude_moving
        } else {
            self.bob_amplitude_idle
        }
    }

    /// +1 or -1 applied to the pointer's vertical axis.
    pub fn vertical_sign(&self) -> f32 {
        if self.vertical_invert {
            -1.0
        } else {
            1.0
        }
    }
}

impl Default for MotionTuning {
    fn default() -> Self {
        Self::for_viewport(ViewportClass::Desktop)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QualityTuning {
    pub downgrade_below_fps: f32,
    pub upgrade_above_fps: f32,
    pub window_ms: u64,
    pub fog_density_full: f32,
    pub fog_density_reduced: f32,
    pub max_pixel_ratio: f32,
    pub high_dpr_threshold: f32,
}

impl QualityTuning {
    pub fn window(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }
}

impl Default for QualityTuning {
    fn default() -> Self {
        Self {
            downgrade_below_fps: FPS_DOWNGRADE_BELOW,
            upgrade_above_fps: FPS_UPGRADE_ABOVE,
            window_ms: FPS_WINDOW_MS,
            fog_density_full: FOG_DENSITY_FULL,
            fog_density_reduced: FOG_DENSITY_REDUCED,
            max_pixel_ratio: MAX_PIXEL_RATIO,
            high_dpr_threshold: HIGH_DPR_THRESHOLD,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeroConfig {
    pub object_count: usize,
    pub spread: f32,
    pub viewport_class: ViewportClass,
    /// Forces the starting tier instead of the viewport/DPR heuristic.
    pub quality_hint: Option<QualityTier>,
    pub particle_count: usize,
    /// Fixed seed for placement jitter, bob phases and particles.
    pub seed: Option<u64>,
    pub motion: MotionTuning,
    pub quality: QualityTuning,
}

impl HeroConfig {
    pub fn for_viewport(class: ViewportClass) -> Self {
        let mobile = class == ViewportClass::Mobile;
        Self {
            object_count: if mobile {
                MOBILE_OBJECT_COUNT
            } else {
                DESKTOP_OBJECT_COUNT
            },
            spread: if mobile { MOBILE_SPREAD } else { DESKTOP_SPREAD },
            viewport_class: class,
            quality_hint: None,
            particle_count: PARTICLE_COUNT,
            seed: None,
            motion: MotionTuning::for_viewport(class),
            quality: QualityTuning::default(),
        }
    }

    /// Tier the engine starts in: the hint when given, else the device heuristic.
    pub fn starting_tier(&self, device_pixel_ratio: f32) -> QualityTier {
        self.quality_hint.unwrap_or_else(|| {
            initial_tier(self.viewport_class, device_pixel_ratio, &self.quality)
        })
    }

    /// Clamp anything that would stop the hero from rendering.
    ///
    /// Bad values are replaced with a warning, never rejected.
    pub fn sanitized(mut self) -> Self {
        let defaults = HeroConfig::for_viewport(self.viewport_class);

        let count = self.object_count.clamp(MIN_OBJECT_COUNT, MAX_OBJECT_COUNT);
        if count != self.object_count {
            log::warn!(
                "[config] object_count {} clamped to {}",
                self.object_count,
                count
            );
            self.object_count = count;
        }
        if self.particle_count > MAX_PARTICLE_COUNT {
            log::warn!(
                "[config] particle_count {} clamped to {}",
                self.particle_count,
                MAX_PARTICLE_COUNT
            );
            self.particle_count = MAX_PARTICLE_COUNT;
        }
        if !(self.spread.is_finite() && self.spread > 0.0) {
            log::warn!("[config] spread {} replaced with {}", self.spread, defaults.spread);
            self.spread = defaults.spread;
        }

        let m = &mut self.motion;
        let dm = &defaults.motion;
        m.position_inertia = sanitize_factor(m.position_inertia, dm.position_inertia);
        m.rotation_inertia = sanitize_factor(m.rotation_inertia, dm.rotation_inertia);
        m.camera_inertia = sanitize_factor(m.camera_inertia, dm.camera_inertia);
        m.scroll_inertia = sanitize_factor(m.scroll_inertia, dm.scroll_inertia);
        for (value, fallback) in [
            (&mut m.camera_sensitivity_x, dm.camera_sensitivity_x),
            (&mut m.camera_sensitivity_y, dm.camera_sensitivity_y),
            (&mut m.pointer_gain_x, dm.pointer_gain_x),
            (&mut m.pointer_gain_y, dm.pointer_gain_y),
            (&mut m.scroll_sensitivity, dm.scroll_sensitivity),
            (&mut m.bob_amplitude_moving, dm.bob_amplitude_moving),
            (&mut m.bob_amplitude_idle, dm.bob_amplitude_idle),
            (&mut m.bob_speed, dm.bob_speed),
            (&mut m.lod_distance, dm.lod_distance),
            (&mut m.camera_height, dm.camera_height),
        ] {
            if !value.is_finite() {
                *value = fallback;
            }
        }

        let q = &mut self.quality;
        let dq = &defaults.quality;
        if !(q.downgrade_below_fps.is_finite() && q.downgrade_below_fps >= 0.0) {
            q.downgrade_below_fps = dq.downgrade_below_fps;
        }
        if !q.upgrade_above_fps.is_finite() {
            q.upgrade_above_fps = dq.upgrade_above_fps;
        }
        if q.upgrade_above_fps < q.downgrade_below_fps {
            log::warn!(
                "[config] upgrade threshold {} below downgrade threshold {}; using {}",
                q.upgrade_above_fps,
                q.downgrade_below_fps,
                q.downgrade_below_fps
            );
            q.upgrade_above_fps = q.downgrade_below_fps;
        }
        if q.window_ms == 0 {
            q.window_ms = dq.window_ms;
        }
        if !(q.max_pixel_ratio.is_finite() && q.max_pixel_ratio >= 1.0) {
            q.max_pixel_ratio = dq.max_pixel_ratio;
        }
        for (value, fallback) in [
            (&mut q.fog_density_full, dq.fog_density_full),
            (&mut q.fog_density_reduced, dq.fog_density_reduced),
            (&mut q.high_dpr_threshold, dq.high_dpr_threshold),
        ] {
            if !(value.is_finite() && *value >= 0.0) {
                *value = fallback;
            }
        }
        self
    }
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self::for_viewport(ViewportClass::Desktop)
    }
}

/// Options object passed by the mounting page.
///
/// Every field is optional; missing ones come from the defaults of the
/// resolved viewport class rather than from the desktop defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeroOptions {
    pub object_count: Option<usize>,
    pub spread: Option<f32>,
    pub viewport_class: Option<ViewportClass>,
    pub quality_hint: Option<QualityTier>,
    pub particle_count: Option<usize>,
    pub seed: Option<u64>,
    pub motion: MotionOverrides,
    pub quality: QualityOverrides,
}

impl HeroOptions {
    /// Overlay the options on the defaults for `detected` (or the class the
    /// options name explicitly).
    pub fn resolve(self, detected: ViewportClass) -> HeroConfig {
        let class = self.viewport_class.unwrap_or(detected);
        let defaults = HeroConfig::for_viewport(class);
        HeroConfig {
            object_count: self.object_count.unwrap_or(defaults.object_count),
            spread: self.spread.unwrap_or(defaults.spread),
            viewport_class: class,
            quality_hint: self.quality_hint,
            particle_count: self.particle_count.unwrap_or(defaults.particle_count),
            seed: self.seed,
            motion: self.motion.apply_to(defaults.motion),
            quality: self.quality.apply_to(defaults.quality),
        }
    }
}

/// Copies every field that is `Some` in the overrides onto the base value.
macro_rules! overlay {
    ($overrides:expr, $base:ident, $($field:ident),+ $(,)?) => {
        $(if let Some(v) = $overrides.$field {
            $base.$field = v;
        })+
    };
}

/// Partial `MotionTuning` as sent by the page; unset fields keep the
/// per-class defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MotionOverrides {
    pub position_inertia: Option<f32>,
    pub rotation_inertia: Option<f32>,
    pub camera_inertia: Option<f32>,
    pub scroll_inertia: Option<f32>,
    pub camera_sensitivity_x: Option<f32>,
    pub camera_sensitivity_y: Option<f32>,
    pub pointer_gain_x: Option<f32>,
    pub pointer_gain_y: Option<f32>,
    pub scroll_sensitivity: Option<f32>,
    pub bob_amplitude_moving: Option<f32>,
    pub bob_amplitude_idle: Option<f32>,
    pub bob_speed: Option<f32>,
    pub pointer_stop_ms: Option<u64>,
    pub vertical_invert: Option<bool>,
    pub lod_distance: Option<f32>,
    pub camera_height: Option<f32>,
}

impl MotionOverrides {
    pub fn apply_to(&self, mut base: MotionTuning) -> MotionTuning {
        overlay!(
            self,
            base,
            position_inertia,
            rotation_inertia,
            camera_inertia,
            scroll_inertia,
            camera_sensitivity_x,
            camera_sensitivity_y,
            pointer_gain_x,
            pointer_gain_y,
            scroll_sensitivity,
            bob_amplitude_moving,
            bob_amplitude_idle,
            bob_speed,
            pointer_stop_ms,
            vertical_invert,
            lod_distance,
            camera_height,
        );
        base
    }
}

/// Partial `QualityTuning`; unset fields keep the defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QualityOverrides {
    pub downgrade_below_fps: Option<f32>,
    pub upgrade_above_fps: Option<f32>,
    pub window_ms: Option<u64>,
    pub fog_density_full: Option<f32>,
    pub fog_density_reduced: Option<f32>,
    pub max_pixel_ratio: Option<f32>,
    pub high_dpr_threshold: Option<f32>,
}

impl QualityOverrides {
    pub fn apply_to(&self, mut base: QualityTuning) -> QualityTuning {
        overlay!(
            self,
            base,
            downgrade_below_fps,
            upgrade_above_fps,
            window_ms,
            fog_density_full,
            fog_density_reduced,
            max_pixel_ratio,
            high_dpr_threshold,
        );
        base
    }
}
