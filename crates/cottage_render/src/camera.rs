//! Perspective camera
//!
//! The camera is a position plus a look-at target. Whoever currently drives it
//! (the fly-through or the orbit controls) writes whole positions; the target
//! is updated by the orbit controls.

use cottage_input::CameraControl;
use cottage_math::{mat4, Mat4, Vec3};

/// Perspective camera looking at a target point
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera3D {
    /// Eye position in world space
    pub position: Vec3,
    /// Point the camera looks at
    pub target: Vec3,
    /// World up direction
    pub up: Vec3,
    /// Vertical field of view in radians
    pub fov_y: f32,
    /// Near clip distance
    pub near: f32,
    /// Far clip distance
    pub far: f32,
}

impl Default for Camera3D {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera3D {
    /// Create a camera at the house overview vantage point
    pub fn new() -> Self {
        Self {
            position: Vec3::new(20.0, 15.0, 30.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_y: 75f32.to_radians(),
            near: 0.1,
            far: 1000.0,
        }
    }

    /// Builder: set position
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Builder: set target
    pub fn with_target(mut self, target: Vec3) -> Self {
        self.target = target;
        self
    }

    /// Builder: set vertical field of view in degrees
    pub fn with_fov_degrees(mut self, fov: f32) -> Self {
        self.fov_y = fov.clamp(1.0, 179.0).to_radians();
        self
    }

    /// Builder: set clip planes
    pub fn with_clip(mut self, near: f32, far: f32) -> Self {
        self.near = near.max(1e-4);
        self.far = far.max(self.near * 2.0);
        self
    }

    /// Unit vector from the eye toward the target
    pub fn forward(&self) -> Vec3 {
        let dir = (self.target - self.position).normalized();
        if dir == Vec3::ZERO {
            -Vec3::Z
        } else {
            dir
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        mat4::look_at(self.position, self.position + self.forward(), self.up)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        mat4::perspective(self.fov_y, aspect.max(1e-4), self.near, self.far)
    }

    /// Projection * view
    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        mat4::mul(self.projection_matrix(aspect), self.view_matrix())
    }
}

impl CameraControl for Camera3D {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    fn fov_y(&self) -> f32 {
        self.fov_y
    }
}
