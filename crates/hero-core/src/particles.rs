//! Point cloud drifting around the candles.
//!
//! Displayed positions are always recomputed from the stored originals plus a
//! bounded periodic offset, so nothing accumulates over a long session.

use crate::color::hsl_to_rgb;
use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

pub const CLOUD_EXTENT: Vec3 = Vec3::new(50.0, 20.0, 30.0);
pub const DRIFT_AMPLITUDE: Vec3 = Vec3::new(2.0, 1.0, 3.0);
pub const SPIN_PER_SEC: f32 = 0.06;
pub const POINT_SIZE: f32 = 0.1;

/// Periodic offset of particle `index` at `t` seconds.
#[inline]
pub fn drift(index: usize, t: f32) -> Vec3 {
    let i = index as f32;
    Vec3::new(
        (t + i * 0.1).sin() * DRIFT_AMPLITUDE.x,
        (t + i * 0.05).cos() * DRIFT_AMPLITUDE.y,
        (t * 0.5 + i * 0.02).sin() * DRIFT_AMPLITUDE.z,
    )
}

#[derive(Clone, Debug, Default)]
pub struct ParticleBuffer {
    positions: Vec<f32>,
    original: Vec<f32>,
    colors: Vec<f32>,
    sizes: Vec<f32>,
    spin: f32,
}

impl ParticleBuffer {
    pub fn generate(count: usize, rng: &mut impl Rng) -> Self {
        let mut positions = Vec::with_capacity(count * 3);
        let mut colors = Vec::with_capacity(count * 3);
        let mut sizes = Vec::with_capacity(count);
        for _ in 0..count {
            positions.push((rng.gen::<f32>() - 0.5) * CLOUD_EXTENT.x);
            positions.push(rng.gen::<f32>() * CLOUD_EXTENT.y);
            positions.push((rng.gen::<f32>() - 0.5) * CLOUD_EXTENT.z);
            colors.extend_from_slice(&hsl_to_rgb(0.6 + rng.gen::<f32>() * 0.2, 0.8, 0.6));
            sizes.push(rng.gen::<f32>() * 3.0 + 1.0);
        }
        Self {
            original: positions.clone(),
            positions,
            colors,
            sizes,
            spin: 0.0,
        }
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Flat xyz buffer of displayed positions.
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    pub fn sizes(&self) -> &[f32] {
        &self.sizes
    }

    pub fn position(&self, index: usize) -> Vec3 {
        Vec3::from_slice(&self.positions[index * 3..index * 3 + 3])
    }

    pub fn original_position(&self, index: usize) -> Vec3 {
        Vec3::from_slice(&self.original[index * 3..index * 3 + 3])
    }

    /// Rotation of the whole cloud around Y, in [0, TAU).
    pub fn spin(&self) -> f32 {
        self.spin
    }

    /// Recompute every displayed position for elapsed time `t` (seconds).
    pub fn advance(&mut self, t: f32) {
        for (i, (out, orig)) in self
            .positions
            .chunks_exact_mut(3)
            .zip(self.original.chunks_exact(3))
            .enumerate()
        {
            let d = drift(i, t);
            out[0] = orig[0] + d.x;
            out[1] = orig[1] + d.y;
            out[2] = orig[2] + d.z;
        }
        self.spin = (t * SPIN_PER_SEC).rem_euclid(TAU);
    }
}
