//! GPU-compatible data types for the mesh pipeline
//!
//! These types are designed to match the shader layouts exactly.
//! All types derive Pod and Zeroable for safe GPU buffer operations.

use bytemuck::{Pod, Zeroable};
use cottage_math::mat4;

/// A world-space vertex with a flat material color
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    /// Position in world space
    pub position: [f32; 3],
    /// Surface normal for lighting
    pub normal: [f32; 3],
    /// RGBA color from the entity material
    pub color: [f32; 4],
}

impl MeshVertex {
    pub fn new(position: [f32; 3], normal: [f32; 3], color: [f32; 4]) -> Self {
        Self { position, normal, color }
    }
}

/// Per-frame uniforms
/// Layout: 112 bytes total (must match mesh.wgsl SceneUniforms)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct SceneUniforms {
    /// Projection * view (64 bytes)
    pub view_projection: [[f32; 4]; 4],
    /// Direction toward the sun (normalized) + padding (16 bytes)
    pub sun_direction: [f32; 3],
    pub _padding0: f32,
    /// Sun color premultiplied by intensity + padding (16 bytes)
    pub sun_color: [f32; 3],
    pub _padding1: f32,
    /// Ambient color premultiplied by intensity + padding (16 bytes)
    pub ambient_color: [f32; 3],
    pub _padding2: f32,
}

impl Default for SceneUniforms {
    fn default() -> Self {
        Self {
            view_projection: mat4::IDENTITY,
            sun_direction: [0.0, 1.0, 0.0],
            _padding0: 0.0,
            sun_color: [0.8, 0.8, 0.8],
            _padding1: 0.0,
            ambient_color: [0.6, 0.6, 0.6],
            _padding2: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;

    #[test]
    fn test_mesh_vertex_size() {
        // 3 floats position + 3 floats normal + 4 floats color = 40 bytes
        assert_eq!(size_of::<MeshVertex>(), 40);
    }

    #[test]
    fn test_scene_uniforms_size() {
        // 16 floats matrix + 3 * (3 floats + 1 padding) = 28 floats = 112 bytes
        assert_eq!(size_of::<SceneUniforms>(), 112);
    }

    #[test]
    fn test_alignment() {
        assert_eq!(std::mem::align_of::<MeshVertex>(), 4);
        assert_eq!(std::mem::align_of::<SceneUniforms>(), 4);
    }
}
