//! Serializable mesh templates
//!
//! MeshTemplate stores the construction parameters of a primitive so scene
//! files can describe geometry without embedding vertex data.
//!
//! All meshes are created in **local space** centered at the origin.
//! The entity transform is used to position them in world space.

use serde::{Serialize, Deserialize};

use crate::mesh::Mesh;

/// Serializable primitive description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MeshTemplate {
    /// Axis-aligned box
    Cuboid {
        width: f32,
        height: f32,
        depth: f32,
    },
    /// Rectangle in the XY plane facing +Z
    Plane {
        width: f32,
        height: f32,
    },
    /// Cone along Y with the apex up
    Cone {
        radius: f32,
        height: f32,
        radial_segments: u32,
    },
    /// Cylinder or frustum along Y
    Cylinder {
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        radial_segments: u32,
    },
    /// UV sphere
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },
}

impl MeshTemplate {
    /// Build the mesh described by this template
    pub fn create_mesh(&self) -> Mesh {
        match *self {
            MeshTemplate::Cuboid { width, height, depth } => Mesh::cuboid(width, height, depth),
            MeshTemplate::Plane { width, height } => Mesh::plane(width, height),
            MeshTemplate::Cone { radius, height, radial_segments } => {
                Mesh::cone(radius, height, radial_segments)
            }
            MeshTemplate::Cylinder { radius_top, radius_bottom, height, radial_segments } => {
                Mesh::cylinder(radius_top, radius_bottom, height, radial_segments)
            }
            MeshTemplate::Sphere { radius, width_segments, height_segments } => {
                Mesh::sphere(radius, width_segments, height_segments)
            }
        }
    }

    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        MeshTemplate::Cuboid { width, height, depth }
    }

    pub fn plane(width: f32, height: f32) -> Self {
        MeshTemplate::Plane { width, height }
    }

    pub fn cone(radius: f32, height: f32, radial_segments: u32) -> Self {
        MeshTemplate::Cone { radius, height, radial_segments }
    }

    pub fn cylinder(radius_top: f32, radius_bottom: f32, height: f32, radial_segments: u32) -> Self {
        MeshTemplate::Cylinder { radius_top, radius_bottom, height, radial_segments }
    }

    pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        MeshTemplate::Sphere { radius, width_segments, height_segments }
    }
}
