//! 3D Transform (position, rotation, scale)
//!
//! A Transform represents the placement of an entity in the scene.

use cottage_math::{mat4, Mat4, Vec3};
use serde::{Serialize, Deserialize};

/// Position, Euler rotation and per-axis scale
///
/// Rotation is stored as Euler angles in radians, applied in XYZ order.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Position in world space
    pub position: Vec3,
    /// Euler angles (radians), XYZ order
    #[serde(default)]
    pub rotation: Vec3,
    /// Per-axis scale
    #[serde(default = "unit_scale")]
    pub scale: Vec3,
}

fn unit_scale() -> Vec3 {
    Vec3::ONE
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// Create an identity transform (no translation, rotation, or scale change)
    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }

    /// Create a transform with just a position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::identity()
        }
    }

    /// Create a transform with position and Euler rotation
    pub fn from_position_rotation(position: Vec3, rotation: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale: Vec3::ONE,
        }
    }

    /// Builder: set Euler rotation
    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builder: set scale
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Rotation-only matrix
    #[inline]
    pub fn rotation_matrix(&self) -> Mat4 {
        mat4::rotation_xyz(self.rotation)
    }

    /// Full model matrix: translate * rotate * scale
    pub fn to_matrix(&self) -> Mat4 {
        mat4::mul(
            mat4::translation(self.position),
            mat4::mul(self.rotation_matrix(), mat4::scale(self.scale)),
        )
    }

    /// Transform a point from local space to world space
    ///
    /// Applies scale, then rotation, then translation.
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        let scaled = p.component_mul(self.scale);
        mat4::transform_vector(&self.rotation_matrix(), scaled) + self.position
    }

    /// Transform a surface normal from local space to world space
    ///
    /// Divides by scale before rotating (inverse-transpose for diagonal scale).
    /// Axes with zero scale keep their component untouched.
    pub fn transform_normal(&self, n: Vec3) -> Vec3 {
        let inv = |c: f32, s: f32| if s.abs() > 1e-10 { c / s } else { c };
        let scaled = Vec3::new(inv(n.x, self.scale.x), inv(n.y, self.scale.y), inv(n.z, self.scale.z));
        mat4::transform_vector(&self.rotation_matrix(), scaled).normalized()
    }

    /// Translate the transform by an offset
    pub fn translate(&mut self, offset: Vec3) {
        self.position += offset;
    }
}
