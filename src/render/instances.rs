// Packing of scene state into per-instance GPU data.
//
// Pure CPU code: no wgpu types, so it is exercised by host-side tests.

use crate::constants::*;
use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3};
use hero_core::{Backdrop, Candle, ParticleBuffer, Scene, Shape, BODY_WIDTH, POINT_SIZE};
use std::f32::consts::FRAC_PI_2;
use std::ops::Range;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct MeshInstance {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
    /// x: emissive strength
    pub params: [f32; 4],
}

impl MeshInstance {
    pub fn new(model: Mat4, color: [f32; 4], emissive: f32) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            color,
            params: [emissive, 0.0, 0.0, 0.0],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct PointInstance {
    /// xyz: world position, w: sprite size in world units
    pub center_size: [f32; 4],
    pub color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SceneUniforms {
    pub view_proj: [[f32; 4]; 4],
    /// xyz: eye, w: fog density
    pub eye_fog: [f32; 4],
    /// xyz: direction towards the key light, w: intensity
    pub key_dir: [f32; 4],
    pub key_color: [f32; 4],
    /// rgb: hemisphere sky colour, w: hemisphere intensity
    pub sky_color: [f32; 4],
    pub ground_color: [f32; 4],
    pub fog_color: [f32; 4],
    pub cam_right: [f32; 4],
    pub cam_up: [f32; 4],
}

pub fn scene_uniforms(scene: &Scene) -> SceneUniforms {
    let eye = scene.rig.eye();
    let view = scene.rig.view_matrix();
    let right = view.row(0).truncate();
    let up = view.row(1).truncate();
    let light = &scene.lighting;
    SceneUniforms {
        view_proj: scene.rig.view_projection().to_cols_array_2d(),
        eye_fog: [eye.x, eye.y, eye.z, scene.fog.density],
        key_dir: light.key_direction.extend(light.key_intensity).to_array(),
        key_color: rgb1(light.key_color),
        sky_color: [
            light.sky_color[0],
            light.sky_color[1],
            light.sky_color[2],
            light.hemi_intensity,
        ],
        ground_color: rgb1(light.ground_color),
        fog_color: rgb1(scene.fog.color),
        cam_right: right.extend(0.0).to_array(),
        cam_up: up.extend(0.0).to_array(),
    }
}

fn rgb1(c: [f32; 3]) -> [f32; 4] {
    [c[0], c[1], c[2], 1.0]
}

/// Shared unit mesh a batch of instances is drawn with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MeshKind {
    Body,
    Wick,
    LowPoly,
    Panel,
    Shadow,
}

impl From<Shape> for MeshKind {
    fn from(shape: Shape) -> Self {
        match shape {
            Shape::Body => MeshKind::Body,
            Shape::Wick => MeshKind::Wick,
            Shape::LowPoly => MeshKind::LowPoly,
        }
    }
}

impl MeshKind {
    pub const OPAQUE: [MeshKind; 3] = [MeshKind::Body, MeshKind::Wick, MeshKind::LowPoly];

    pub fn is_opaque(self) -> bool {
        Self::OPAQUE.contains(&self)
    }
}

pub fn panel_instance(backdrop: &Backdrop) -> MeshInstance {
    let model = Mat4::from_scale_rotation_translation(
        backdrop.panel_size.extend(1.0),
        Quat::IDENTITY,
        backdrop.panel_center,
    );
    MeshInstance::new(model, backdrop.panel_color, 0.0)
}

/// Soft dark disc on the floor under `candle`; fades as the candle rises.
pub fn shadow_instance(candle: &Candle, floor_y: f32) -> MeshInstance {
    let pos = candle.position();
    let height = (pos.y - floor_y).max(0.0);
    let alpha = SHADOW_ALPHA * (1.0 - height / SHADOW_FADE_HEIGHT).clamp(0.0, 1.0);
    let size = BODY_WIDTH * SHADOW_SCALE;
    let model = Mat4::from_scale_rotation_translation(
        Vec3::new(size, size, 1.0),
        Quat::from_rotation_x(-FRAC_PI_2),
        Vec3::new(pos.x, floor_y + SHADOW_LIFT, pos.z),
    );
    MeshInstance::new(model, [0.0, 0.0, 0.0, alpha], 0.0)
}

/// Displayed particle positions, rotated by the cloud's spin.
pub fn particle_instances(particles: &ParticleBuffer, out: &mut Vec<PointInstance>) {
    let spin = Quat::from_rotation_y(particles.spin());
    let colors = particles.colors();
    let sizes = particles.sizes();
    out.extend((0..particles.len()).map(|i| {
        let p = spin * particles.position(i);
        PointInstance {
            center_size: [p.x, p.y, p.z, sizes[i] * POINT_SIZE],
            color: [
                colors[i * 3],
                colors[i * 3 + 1],
                colors[i * 3 + 2],
                PARTICLE_OPACITY,
            ],
        }
    }));
}

/// Per-frame instance data, grouped into contiguous draws.
#[derive(Debug, Default)]
pub struct FrameBatches {
    pub meshes: Vec<MeshInstance>,
    pub draws: Vec<(MeshKind, Range<u32>)>,
    pub points: Vec<PointInstance>,
}

impl FrameBatches {
    /// Refill from `scene`, reusing the allocations of the previous frame.
    pub fn collect(&mut self, scene: &Scene) {
        self.meshes.clear();
        self.draws.clear();
        self.points.clear();

        for kind in MeshKind::OPAQUE {
            let start = self.meshes.len() as u32;
            for candle in scene.candles() {
                let transform = candle.transform();
                for part in candle.parts() {
                    if MeshKind::from(part.shape) == kind {
                        self.meshes.push(MeshInstance::new(
                            transform * part.local,
                            part.color,
                            part.emissive,
                        ));
                    }
                }
            }
            self.close_draw(kind, start);
        }

        let start = self.meshes.len() as u32;
        self.meshes.push(panel_instance(&scene.backdrop));
        self.close_draw(MeshKind::Panel, start);

        if scene.shadows {
            let start = self.meshes.len() as u32;
            let floor_y = scene.backdrop.floor_y;
            self.meshes
                .extend(scene.candles().iter().map(|c| shadow_instance(c, floor_y)));
            self.close_draw(MeshKind::Shadow, start);
        }

        particle_instances(&scene.particles, &mut self.points);
    }

    fn close_draw(&mut self, kind: MeshKind, start: u32) {
        let end = self.meshes.len() as u32;
        if end > start {
            self.draws.push((kind, start..end));
        }
    }

    pub fn draw_of(&self, kind: MeshKind) -> Option<Range<u32>> {
        self.draws
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, range)| range.clone())
    }
}

/// Surface size for a requested backing size, kept within `1..=max_dimension`
/// on both axes.
pub fn surface_extent(width: u32, height: u32, max_dimension: u32) -> (u32, u32) {
    let max = max_dimension.max(1);
    (width.clamp(1, max), height.clamp(1, max))
}
