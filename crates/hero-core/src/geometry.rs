//! Procedural geometry.
//!
//! All meshes are unit-sized and centered on the origin; per-instance model
//! matrices scale and place them. Built once at startup, never at runtime.

use bytemuck::{Pod, Zeroable};
use std::f32::consts::TAU;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
}

impl Mesh {
    fn push_quad(&mut self, corners: [[f32; 3]; 4], normal: [f32; 3]) {
        let base = self.vertices.len() as u16;
        for position in corners {
            self.vertices.push(Vertex { position, normal });
        }
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// 1x1x1 box with flat per-face normals.
pub fn unit_box() -> Mesh {
    let h = 0.5;
    let mut m = Mesh::default();
    // +X, -X, +Y, -Y, +Z, -Z
    m.push_quad(
        [[h, -h, h], [h, -h, -h], [h, h, -h], [h, h, h]],
        [1.0, 0.0, 0.0],
    );
    m.push_quad(
        [[-h, -h, -h], [-h, -h, h], [-h, h, h], [-h, h, -h]],
        [-1.0, 0.0, 0.0],
    );
    m.push_quad(
        [[-h, h, h], [h, h, h], [h, h, -h], [-h, h, -h]],
        [0.0, 1.0, 0.0],
    );
    m.push_quad(
        [[-h, -h, -h], [h, -h, -h], [h, -h, h], [-h, -h, h]],
        [0.0, -1.0, 0.0],
    );
    m.push_quad(
        [[-h, -h, h], [h, -h, h], [h, h, h], [-h, h, h]],
        [0.0, 0.0, 1.0],
    );
    m.push_quad(
        [[h, -h, -h], [-h, -h, -h], [-h, h, -h], [h, h, -h]],
        [0.0, 0.0, -1.0],
    );
    m
}

/// Capped cylinder of diameter 1 and height 1 around the Y axis.
pub fn unit_cylinder(segments: u16) -> Mesh {
    let segments = segments.max(3);
    let r = 0.5;
    let h = 0.5;
    let mut m = Mesh::default();

    // side: segments + 1 columns so the seam gets its own vertices
    for i in 0..=segments {
        let a = i as f32 / segments as f32 * TAU;
        let (s, c) = a.sin_cos();
        let normal = [c, 0.0, s];
        m.vertices.push(Vertex {
            position: [c * r, -h, s * r],
            normal,
        });
        m.vertices.push(Vertex {
            position: [c * r, h, s * r],
            normal,
        });
    }
    for i in 0..segments {
        let b = i * 2;
        m.indices
            .extend_from_slice(&[b, b + 1, b + 3, b, b + 3, b + 2]);
    }

    // caps
    for (y, ny) in [(h, 1.0), (-h, -1.0)] {
        let center = m.vertices.len() as u16;
        m.vertices.push(Vertex {
            position: [0.0, y, 0.0],
            normal: [0.0, ny, 0.0],
        });
        for i in 0..segments {
            let a = i as f32 / segments as f32 * TAU;
            let (s, c) = a.sin_cos();
            m.vertices.push(Vertex {
                position: [c * r, y, s * r],
                normal: [0.0, ny, 0.0],
            });
        }
        for i in 0..segments {
            let a = center + 1 + i;
            let b = center + 1 + (i + 1) % segments;
            if ny > 0.0 {
                m.indices.extend_from_slice(&[center, b, a]);
            } else {
                m.indices.extend_from_slice(&[center, a, b]);
            }
        }
    }
    m
}

/// 1x1 quad in the XY plane facing +Z.
pub fn unit_quad() -> Mesh {
    let h = 0.5;
    let mut m = Mesh::default();
    m.push_quad(
        [[-h, -h, 0.0], [h, -h, 0.0], [h, h, 0.0], [-h, h, 0.0]],
        [0.0, 0.0, 1.0],
    );
    m
}

/// Square floor grid in the XZ plane, like a classic editor grid helper.
///
/// The two center lines use `center_color`, every other line `line_color`.
pub fn floor_grid(
    size: f32,
    divisions: u32,
    y: f32,
    center_color: [f32; 4],
    line_color: [f32; 4],
) -> Vec<LineVertex> {
    let divisions = divisions.max(1);
    let half = size * 0.5;
    let step = size / divisions as f32;
    let center = divisions / 2;
    let mut out = Vec::with_capacity((divisions as usize + 1) * 4);
    for i in 0..=divisions {
        let k = -half + i as f32 * step;
        let color = if divisions % 2 == 0 && i == center {
            center_color
        } else {
            line_color
        };
        out.push(LineVertex {
            position: [-half, y, k],
            color,
        });
        out.push(LineVertex {
            position: [half, y, k],
            color,
        });
        out.push(LineVertex {
            position: [k, y, -half],
            color,
        });
        out.push(LineVertex {
            position: [k, y, half],
            color,
        });
    }
    out
}

/// Evenly spaced vertical lines centered on x = 0.
pub fn vertical_lines(
    count: u32,
    spacing: f32,
    z: f32,
    height: f32,
    color: [f32; 4],
) -> Vec<LineVertex> {
    let half = count as f32 / 2.0;
    (0..count)
        .flat_map(|i| {
            let x = (i as f32 - half) * spacing;
            [
                LineVertex {
                    position: [x, 0.0, z],
                    color,
                },
                LineVertex {
                    position: [x, height, z],
                    color,
                },
            ]
        })
        .collect()
}
