//! Scene construction.
//!
//! Everything is generated once at mount: camera rig, lights, backdrop,
//! particles and the candle row. Afterwards only transforms, detail variants
//! and particle positions change.

use crate::camera::{Camera, CameraRig};
use crate::candle::{Candle, CandleId};
use crate::color::{hex_rgb, hex_rgba};
use crate::config::HeroConfig;
use crate::constants::{DEPTH_FALLOFF, PLACEMENT_JITTER};
use crate::geometry::{floor_grid, vertical_lines, LineVertex};
use crate::particles::ParticleBuffer;
use glam::{Vec2, Vec3};
use rand::Rng;
use std::f32::consts::TAU;

#[derive(Clone, Debug, PartialEq)]
pub struct Lighting {
    pub key_direction: Vec3,
    pub key_color: [f32; 3],
    pub key_intensity: f32,
    pub sky_color: [f32; 3],
    pub ground_color: [f32; 3],
    pub hemi_intensity: f32,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            key_direction: Vec3::new(6.0, 10.0, 8.0).normalize(),
            key_color: hex_rgb(0xffffff),
            key_intensity: 1.0,
            sky_color: hex_rgb(0x334466),
            ground_color: hex_rgb(0x050505),
            hemi_intensity: 0.6,
        }
    }
}

/// Exponential-squared fog.
#[derive(Clone, Debug, PartialEq)]
pub struct Fog {
    pub color: [f32; 3],
    pub density: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Backdrop {
    pub panel_center: Vec3,
    pub panel_size: Vec2,
    pub panel_color: [f32; 4],
    /// Line list (pairs of vertices): floor grid plus vertical wall lines.
    pub lines: Vec<LineVertex>,
    /// Height of the floor plane; blob shadows sit just above it.
    pub floor_y: f32,
}

impl Backdrop {
    pub fn holographic() -> Self {
        let floor_y = -2.0;
        let mut lines = floor_grid(
            50.0,
            50,
            floor_y,
            hex_rgba(0x00ffff, 0.1),
            hex_rgba(0x004444, 0.1),
        );
        lines.extend(vertical_lines(20, 2.0, -25.0, 20.0, hex_rgba(0x00ffff, 0.05)));
        Self {
            panel_center: Vec3::new(0.0, 0.0, -25.0),
            panel_size: Vec2::new(100.0, 60.0),
            panel_color: hex_rgba(0x00e0ff, 0.03),
            lines,
            floor_y,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Scene {
    pub rig: CameraRig,
    pub lighting: Lighting,
    pub fog: Fog,
    pub backdrop: Backdrop,
    pub particles: ParticleBuffer,
    pub shadows: bool,
    candles: Vec<Candle>,
}

/// Horizontal anchor of candle `index` in a row of `count` across `spread`.
pub fn row_x(index: usize, count: usize, spread: f32) -> f32 {
    let count = count.max(1) as f32;
    (index as f32 - (count - 1.0) / 2.0) * (spread / (count / 2.0))
}

impl Scene {
    /// Build the full scene for a sanitized configuration.
    pub fn build(config: &HeroConfig, aspect: f32, fog_density: f32, rng: &mut impl Rng) -> Self {
        let rig = CameraRig::new(Camera::new(config.motion.camera_height, aspect));

        let count = config.object_count.max(1);
        let candles = (0..count)
            .map(|i| {
                let x = row_x(i, count, config.spread);
                let jitter = rng.gen::<f32>() * PLACEMENT_JITTER * 2.0 - PLACEMENT_JITTER;
                let z = -x.abs() * DEPTH_FALLOFF + jitter;
                Candle::new(i, Vec3::new(x, 0.0, z), rng.gen_range(0.0..TAU))
            })
            .collect::<Vec<_>>();

        let particles = ParticleBuffer::generate(config.particle_count, rng);
        log::debug!(
            "[scene] built {} candles, {} particles",
            candles.len(),
            particles.len()
        );

        Self {
            rig,
            lighting: Lighting::default(),
            fog: Fog {
                color: [0.0, 0.0, 0.0],
                density: fog_density,
            },
            backdrop: Backdrop::holographic(),
            particles,
            shadows: false,
            candles,
        }
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn candle(&self, id: CandleId) -> Option<&Candle> {
        self.candles.get(id.0)
    }

    pub(crate) fn candles_mut(&mut self) -> &mut [Candle] {
        &mut self.candles
    }

    pub fn candle_ids(&self) -> impl Iterator<Item = CandleId> {
        (0..self.candles.len()).map(CandleId)
    }
}
