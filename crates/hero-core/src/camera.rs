//! Camera types shared with the renderer.
//!
//! These types avoid referencing platform-specific APIs. The pointer moves the
//! rig; the camera's own offset and projection parameters stay fixed for the
//! session apart from the aspect ratio.

use crate::constants::{CAMERA_DISTANCE, CAMERA_FAR, CAMERA_FOV_DEG, CAMERA_NEAR};
use glam::{Mat4, Vec3};

/// Right-handed perspective camera looking down -Z from `offset`.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    /// Position relative to the rig.
    pub offset: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(height: f32, aspect: f32) -> Self {
        Self {
            offset: Vec3::new(0.0, height, CAMERA_DISTANCE),
            aspect,
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect.max(1e-3), self.znear, self.zfar)
    }
}

/// Parent transform carrying the camera.
#[derive(Clone, Debug, PartialEq)]
pub struct CameraRig {
    pub position: Vec3,
    pub camera: Camera,
}

impl CameraRig {
    pub fn new(camera: Camera) -> Self {
        Self {
            position: Vec3::ZERO,
            camera,
        }
    }

    /// World-space camera position.
    pub fn eye(&self) -> Vec3 {
        self.position + self.camera.offset
    }

    /// Point detail distances are measured from: the camera's position inside
    /// the rig, ignoring the rig's own sway.
    pub fn lod_origin(&self) -> Vec3 {
        self.camera.offset
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.eye(), Vec3::NEG_Z, Vec3::Y)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.camera.projection_matrix() * self.view_matrix()
    }
}
