//! 3D Mathematics Library
//!
//! Small, dependency-light math types for the cottage scene.
//!
//! - [`Vec3`] - 3D vector with x, y, z components
//! - [`Mat4`] - column-major 4x4 matrix plus projection/view helpers
//! - [`Lerp`] - values that can be linearly interpolated (used by tweens)

mod vec3;
pub mod mat4;

pub use vec3::Vec3;
pub use mat4::Mat4;

/// A value that can be linearly interpolated
pub trait Lerp: Copy {
    /// Interpolate from `self` toward `other`; `t = 0` must return `self` unchanged
    fn lerp(self, other: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    #[inline]
    fn lerp(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Lerp for Vec3 {
    #[inline]
    fn lerp(self, other: Self, t: f32) -> Self {
        Vec3::lerp(self, other, t)
    }
}
