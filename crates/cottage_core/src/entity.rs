//! Entity and Material types
//!
//! An Entity is one object in the scene graph: a mesh, a material and a transform.

use std::collections::HashSet;
use std::sync::Arc;
use bitflags::bitflags;
use serde::{Serialize, Deserialize};
use crate::mesh::Mesh;
use crate::shapes::MeshTemplate;
use crate::Transform;

bitflags! {
    /// Flags indicating which parts of an entity have changed and need re-uploading
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct DirtyFlags: u8 {
        /// No changes
        const NONE = 0;
        /// Transform (position, rotation, scale) has changed
        const TRANSFORM = 1 << 0;
        /// Mesh has changed
        const MESH = 1 << 1;
        /// Material has changed
        const MATERIAL = 1 << 2;
        /// All flags set - entity needs full rebuild
        const ALL = Self::TRANSFORM.bits() | Self::MESH.bits() | Self::MATERIAL.bits();
    }
}

/// A flat-shaded material
///
/// Alpha below 1.0 marks the material as transparent; transparent entities
/// are drawn after opaque ones with blending enabled.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Base color as RGBA (each component 0.0-1.0)
    pub base_color: [f32; 4],
}

impl Default for Material {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Material {
    /// Create a new material with the given RGBA color
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            base_color: [r, g, b, a],
        }
    }

    /// Create a new opaque material with the given RGB color
    pub const fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Create an opaque material from a `0xRRGGBB` color
    pub fn from_hex(hex: u32) -> Self {
        let [r, g, b] = hex_to_rgb(hex);
        Self::from_rgb(r, g, b)
    }

    /// Builder: set opacity
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.base_color[3] = opacity.clamp(0.0, 1.0);
        self
    }

    #[inline]
    pub fn opacity(&self) -> f32 {
        self.base_color[3]
    }

    #[inline]
    pub fn is_transparent(&self) -> bool {
        self.base_color[3] < 1.0
    }

    /// White material
    pub const WHITE: Self = Self::from_rgb(1.0, 1.0, 1.0);

    /// Grass stand-in for the ground texture
    pub const GRASS: Self = Self::from_rgb(0.36, 0.55, 0.24);

    /// Stone stand-in for the wall texture
    pub const STONE: Self = Self::from_rgb(0.58, 0.56, 0.52);

    /// Wood stand-in for the roof, door and trunk textures
    pub const WOOD: Self = Self::from_rgb(0.52, 0.37, 0.22);
}

/// Convert a `0xRRGGBB` color to linear-ish 0.0-1.0 components
pub fn hex_to_rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

/// An object in the scene graph
///
/// Each entity has:
/// - An optional name (for lookup by name)
/// - Tags (for categorization and filtering)
/// - A transform
/// - A shared mesh
/// - A material
/// - Dirty flags (for change tracking)
pub struct Entity {
    /// Optional name for this entity (for lookup)
    pub name: Option<String>,
    /// Tags for categorization (e.g., "house", "fence", "model")
    pub tags: HashSet<String>,
    /// The entity's transform in world space
    pub transform: Transform,
    /// The entity's mesh, shared between entities built from the same primitive
    pub mesh: Arc<Mesh>,
    /// The entity's material
    pub material: Material,
    /// Dirty flags for change tracking (what needs rebuilding)
    dirty: DirtyFlags,
}

impl Entity {
    /// Create a new entity with the given mesh
    pub fn new(mesh: Arc<Mesh>) -> Self {
        Self::with_transform(mesh, Transform::identity(), Material::default())
    }

    /// Create a new entity with mesh and material
    pub fn with_material(mesh: Arc<Mesh>, material: Material) -> Self {
        Self::with_transform(mesh, Transform::identity(), material)
    }

    /// Create a new entity with mesh, transform, and material
    pub fn with_transform(mesh: Arc<Mesh>, transform: Transform, material: Material) -> Self {
        Self {
            name: None,
            tags: HashSet::new(),
            transform,
            mesh,
            material,
            dirty: DirtyFlags::ALL, // New entities are dirty
        }
    }

    /// Set the name of this entity (for lookup)
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add a tag to this entity
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    /// Check if this entity has a specific tag
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    // --- Dirty tracking methods ---

    /// Check if this entity has any dirty flags set
    #[inline]
    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    #[inline]
    pub fn dirty_flags(&self) -> DirtyFlags {
        self.dirty
    }

    #[inline]
    pub fn mark_dirty(&mut self, flags: DirtyFlags) {
        self.dirty |= flags;
    }

    #[inline]
    pub fn clear_dirty(&mut self) {
        self.dirty = DirtyFlags::NONE;
    }

    /// Set the transform and mark it as dirty
    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
        self.mark_dirty(DirtyFlags::TRANSFORM);
    }

    /// Set the material and mark it as dirty
    pub fn set_material(&mut self, material: Material) {
        self.material = material;
        self.mark_dirty(DirtyFlags::MATERIAL);
    }
}

/// A serializable entity template
///
/// Unlike Entity, it stores a MeshTemplate rather than vertex data, so it can
/// live in a RON scene file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityTemplate {
    /// Optional name for this entity (for lookup)
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub transform: Transform,
    pub mesh: MeshTemplate,
    pub material: Material,
}

impl EntityTemplate {
    /// Create a new entity template
    pub fn new(mesh: MeshTemplate, transform: Transform, material: Material) -> Self {
        Self {
            name: None,
            tags: Vec::new(),
            transform,
            mesh,
            material,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Convert this template to an Entity
    pub fn to_entity(&self) -> Entity {
        let mut entity = Entity::with_transform(
            Arc::new(self.mesh.create_mesh()),
            self.transform,
            self.material,
        );
        if let Some(ref name) = self.name {
            entity = entity.with_name(name.clone());
        }
        for tag in &self.tags {
            entity = entity.with_tag(tag.clone());
        }
        entity
    }
}
