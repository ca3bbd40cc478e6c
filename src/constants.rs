// Rendering constants for the WebGPU front-end.
//
// Kept free of wgpu/web-sys types so host-side tests can include this file.

// Background behind the scene; matches the fog colour.
pub const CLEAR_COLOR: [f64; 4] = [0.0, 0.0, 0.0, 1.0];

// Sample count used when the session starts at full quality.
pub const MSAA_SAMPLES: u32 = 4;

// Tessellation of the shared unit meshes
pub const WICK_SEGMENTS: u16 = 6;
pub const LOW_POLY_SEGMENTS: u16 = 8;

// Blob shadows on the floor plane
pub const SHADOW_LIFT: f32 = 0.01; // keeps the blob above the grid lines
pub const SHADOW_SCALE: f32 = 1.8; // blob diameter relative to the body width
pub const SHADOW_ALPHA: f32 = 0.45;
pub const SHADOW_FADE_HEIGHT: f32 = 4.0; // blob vanishes this far above the floor

// Particles
pub const PARTICLE_OPACITY: f32 = 0.8;

// Instance buffers start at this many elements and grow by doubling.
pub const INITIAL_INSTANCE_CAPACITY: usize = 64;
