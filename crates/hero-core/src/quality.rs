//! Adaptive quality.
//!
//! Frame rate is sampled over fixed windows. At the end of each window the
//! controller may move one step between the two tiers; the gap between the
//! downgrade and upgrade thresholds keeps it from flapping.

use crate::candle::DetailVariant;
use crate::config::{QualityTuning, ViewportClass};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QualityTier {
    Full,
    Reduced,
}

/// Starting tier from static device information.
pub fn initial_tier(class: ViewportClass, device_pixel_ratio: f32, tuning: &QualityTuning) -> QualityTier {
    match class {
        ViewportClass::Mobile => QualityTier::Reduced,
        ViewportClass::Desktop if device_pixel_ratio > tuning.high_dpr_threshold => QualityTier::Full,
        ViewportClass::Desktop => QualityTier::Reduced,
    }
}

/// Pure transition function for one completed sampling window.
pub fn next_tier(tier: QualityTier, fps: f32, tuning: &QualityTuning) -> Option<QualityTier> {
    match tier {
        QualityTier::Full if fps < tuning.downgrade_below_fps => Some(QualityTier::Reduced),
        QualityTier::Reduced if fps > tuning.upgrade_above_fps => Some(QualityTier::Full),
        _ => None,
    }
}

/// Rendering parameters derived from the quality state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QualityParams {
    pub pixel_ratio: f32,
    pub fog_density: f32,
    pub shadows: bool,
    pub antialias: bool,
    /// Every candle draws its low-detail representation.
    pub force_low_detail: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QualityChange {
    pub from: QualityTier,
    pub to: QualityTier,
    pub fps: f32,
}

/// Counts frames and reports the rate once per window.
#[derive(Clone, Debug)]
pub struct FpsSampler {
    window: Duration,
    window_start: Duration,
    frames: u32,
}

impl FpsSampler {
    pub fn new(start: Duration, window: Duration) -> Self {
        Self {
            window,
            window_start: start,
            frames: 0,
        }
    }

    /// Count one frame; returns the rounded rate when a window completes.
    pub fn record(&mut self, now: Duration) -> Option<f32> {
        self.frames += 1;
        let elapsed = now.saturating_sub(self.window_start);
        if elapsed < self.window {
            return None;
        }
        let fps = (self.frames as f64 / elapsed.as_secs_f64()).round() as f32;
        self.frames = 0;
        self.window_start = now;
        Some(fps)
    }
}

#[derive(Clone, Debug)]
pub struct QualityController {
    tier: QualityTier,
    initial: QualityTier,
    /// Set by a runtime downgrade; cleared by the next upgrade.
    degraded: bool,
    device_pixel_ratio: f32,
    sampler: FpsSampler,
    tuning: QualityTuning,
    lod_distance: f32,
}

impl QualityController {
    pub fn new(
        initial: QualityTier,
        device_pixel_ratio: f32,
        tuning: QualityTuning,
        lod_distance: f32,
        now: Duration,
    ) -> Self {
        Self {
            tier: initial,
            initial,
            degraded: false,
            device_pixel_ratio,
            sampler: FpsSampler::new(now, tuning.window()),
            tuning,
            lod_distance,
        }
    }

    pub fn tier(&self) -> QualityTier {
        self.tier
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    pub fn set_device_pixel_ratio(&mut self, dpr: f32) {
        if dpr.is_finite() && dpr > 0.0 {
            self.device_pixel_ratio = dpr;
        }
    }

    pub fn params(&self) -> QualityParams {
        let full = self.tier == QualityTier::Full;
        QualityParams {
            pixel_ratio: if full {
                self.device_pixel_ratio.min(self.tuning.max_pixel_ratio).max(1.0)
            } else {
                1.0
            },
            fog_density: if self.degraded {
                self.tuning.fog_density_reduced
            } else {
                self.tuning.fog_density_full
            },
            shadows: full,
            antialias: self.initial == QualityTier::Full,
            force_low_detail: self.degraded,
        }
    }

    /// Representation a candle at `camera_distance` should show.
    pub fn detail_for(&self, camera_distance: f32) -> DetailVariant {
        if self.degraded {
            DetailVariant::Low
        } else if self.tier != QualityTier::Full && camera_distance > self.lod_distance {
            DetailVariant::Low
        } else {
            DetailVariant::High
        }
    }

    /// Count a frame and apply at most one tier change per completed window.
    pub fn on_frame(&mut self, now: Duration) -> Option<QualityChange> {
        let fps = self.sampler.record(now)?;
        let to = next_tier(self.tier, fps, &self.tuning)?;
        let change = QualityChange {
            from: self.tier,
            to,
            fps,
        };
        self.tier = to;
        self.degraded = to == QualityTier::Reduced;
        log::info!("[quality] {:?} -> {:?} at {} fps", change.from, change.to, fps);
        Some(change)
    }
}
