//! Renderable geometry - bridges World/Entity to GPU buffers
//!
//! Entity meshes are transformed to world space on the CPU and packed into two
//! batches: opaque and transparent. The transparent batch is drawn second with
//! blending on and depth writes off.

use cottage_core::{Entity, World};
use crate::pipeline::MeshVertex;

/// Vertices and indices for one draw call
#[derive(Clone, Debug, Default)]
pub struct GeometryBatch {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl GeometryBatch {
    fn with_capacity(vertex_capacity: usize, index_capacity: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_capacity),
            indices: Vec::with_capacity(index_capacity),
        }
    }

    fn push_entity(&mut self, entity: &Entity) {
        let mesh = &entity.mesh;
        let offset = self.vertices.len() as u32;
        let color = entity.material.base_color;

        for (p, n) in mesh.positions.iter().zip(&mesh.normals) {
            let world_pos = entity.transform.transform_point(*p);
            let world_normal = entity.transform.transform_normal(*n);
            self.vertices.push(MeshVertex::new(
                world_pos.to_array(),
                world_normal.to_array(),
                color,
            ));
        }
        self.indices.extend(mesh.indices.iter().map(|i| i + offset));
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }
}

/// GPU-ready geometry collected from entities
#[derive(Clone, Debug, Default)]
pub struct RenderableGeometry {
    pub opaque: GeometryBatch,
    pub transparent: GeometryBatch,
}

impl RenderableGeometry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect geometry from all entities in a world
    pub fn from_world(world: &World) -> Self {
        let (mut opaque_v, mut opaque_i, mut trans_v, mut trans_i) = (0, 0, 0, 0);
        for entity in world.iter() {
            if entity.material.is_transparent() {
                trans_v += entity.mesh.vertex_count();
                trans_i += entity.mesh.indices.len();
            } else {
                opaque_v += entity.mesh.vertex_count();
                opaque_i += entity.mesh.indices.len();
            }
        }

        let mut result = Self {
            opaque: GeometryBatch::with_capacity(opaque_v, opaque_i),
            transparent: GeometryBatch::with_capacity(trans_v, trans_i),
        };
        for entity in world.iter() {
            result.add_entity(entity);
        }
        result
    }

    /// Add an entity's geometry to the matching batch
    pub fn add_entity(&mut self, entity: &Entity) {
        if entity.material.is_transparent() {
            self.transparent.push_entity(entity);
        } else {
            self.opaque.push_entity(entity);
        }
    }

    pub fn clear(&mut self) {
        self.opaque.clear();
        self.transparent.clear();
    }

    pub fn vertex_count(&self) -> usize {
        self.opaque.vertex_count() + self.transparent.vertex_count()
    }

    pub fn triangle_count(&self) -> usize {
        (self.opaque.index_count() + self.transparent.index_count()) / 3
    }
}
