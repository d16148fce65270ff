//! SceneBuilder - Declarative scene construction
//!
//! Provides a fluent API for building the cottage scene. The builder collects
//! serializable entity templates, so a built scene can also be saved as RON.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};
use std::path::PathBuf;

use cottage_core::{EntityTemplate, Lighting, Material, MeshTemplate, Scene, Transform, World};
use cottage_math::Vec3;

const FENCE_POST_Y: f32 = -0.75;
const FENCE_COLOR: u32 = 0x8b5a2b;

/// Builder for constructing scenes from primitive shapes
///
/// # Example
/// ```ignore
/// let world = SceneBuilder::new("yard")
///     .add_plane("grass", 40.0, 40.0, Transform::from_position(Vec3::ZERO), Material::GRASS)
///     .add_tree(Vec3::new(5.0, 0.0, -5.0))
///     .build();
/// ```
pub struct SceneBuilder {
    scene: Scene,
}

impl SceneBuilder {
    /// Create a new builder for an empty scene
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            scene: Scene::new(name),
        }
    }

    /// The house, yard, fence and tree
    ///
    /// Lighting and the camera start are left to config.
    pub fn cottage() -> Self {
        Self::new("cottage")
            // Ground, laid flat
            .add_plane(
                "grass",
                40.0,
                40.0,
                Transform::from_position_rotation(Vec3::new(0.0, -1.0, 0.0), Vec3::new(-FRAC_PI_2, 0.0, 0.0)),
                Material::GRASS,
            )
            .add_box("walls", 6.0, 4.0, 6.0, Transform::from_position(Vec3::new(0.0, 1.0, 0.0)), Material::STONE)
            // Four-sided cone turned so its edges line up with the walls
            .add_cone(
                "roof",
                4.5,
                3.0,
                4,
                Transform::from_position_rotation(Vec3::new(0.0, 4.5, 0.0), Vec3::new(0.0, FRAC_PI_4, 0.0)),
                Material::WOOD,
            )
            .add_box("door", 1.2, 2.0, 0.1, Transform::from_position(Vec3::new(0.0, 0.0, 3.05)), Material::WOOD)
            .add_box(
                "window",
                1.0,
                1.0,
                0.05,
                Transform::from_position(Vec3::new(2.0, 0.8, 3.0)),
                Material::from_hex(0x87ceeb).with_opacity(0.5),
            )
            .add_box("chimney", 0.5, 2.0, 0.5, Transform::from_position(Vec3::new(-1.0, 4.5, -1.5)), Material::STONE)
            .add_plane(
                "floor",
                6.0,
                6.0,
                Transform::from_position_rotation(Vec3::new(0.0, -0.5, 0.0), Vec3::new(-FRAC_PI_2, 0.0, 0.0)),
                Material::from_hex(0x8b4513),
            )
            .add_box(
                "painting",
                2.5,
                3.0,
                0.0,
                Transform::from_position(Vec3::new(0.0, 1.5, 0.0)),
                Material::from_hex(0xd8c8a8),
            )
            .add_fence_ring(3.0, 3.5, 5.0, 0.6)
            .add_tree(Vec3::new(5.0, 0.0, -5.0))
    }

    pub fn with_lighting(mut self, lighting: Lighting) -> Self {
        self.scene.lighting = Some(lighting);
        self
    }

    /// Where the camera starts before the fly-through
    pub fn with_camera_start(mut self, position: Vec3) -> Self {
        self.scene.camera_start = Some(position.to_array());
        self
    }

    /// External OBJ model to import in the background
    pub fn with_model(mut self, path: impl Into<PathBuf>, position: Vec3) -> Self {
        self.scene = self.scene.with_model(path, position.to_array());
        self
    }

    /// Add an axis-aligned box centered on the transform's position
    pub fn add_box(self, name: &str, width: f32, height: f32, depth: f32, transform: Transform, material: Material) -> Self {
        self.add_shape(name, MeshTemplate::cuboid(width, height, depth), transform, material)
    }

    /// Add a rectangle in the local XY plane
    pub fn add_plane(self, name: &str, width: f32, height: f32, transform: Transform, material: Material) -> Self {
        self.add_shape(name, MeshTemplate::plane(width, height), transform, material)
    }

    pub fn add_cone(
        self,
        name: &str,
        radius: f32,
        height: f32,
        radial_segments: u32,
        transform: Transform,
        material: Material,
    ) -> Self {
        self.add_shape(name, MeshTemplate::cone(radius, height, radial_segments), transform, material)
    }

    pub fn add_cylinder(
        self,
        name: &str,
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        radial_segments: u32,
        transform: Transform,
        material: Material,
    ) -> Self {
        self.add_shape(
            name,
            MeshTemplate::cylinder(radius_top, radius_bottom, height, radial_segments),
            transform,
            material,
        )
    }

    pub fn add_sphere(self, name: &str, radius: f32, segments: u32, transform: Transform, material: Material) -> Self {
        self.add_shape(name, MeshTemplate::sphere(radius, segments, segments), transform, material)
    }

    /// Add a single fence post standing on the ground at (x, z)
    pub fn add_fence_post(mut self, x: f32, z: f32) -> Self {
        self.scene.add_entity(
            EntityTemplate::new(
                MeshTemplate::cuboid(0.1, 0.5, 0.1),
                Transform::from_position(Vec3::new(x, FENCE_POST_Y, z)),
                Material::from_hex(FENCE_COLOR),
            )
            .with_tag("fence"),
        );
        self
    }

    /// Add fence posts around a rectangle
    ///
    /// The front and back rows run along z = ±`z_edge` for x in
    /// [-`x_span`, `x_span`]; the side rows run along x = ±`x_edge` for z in
    /// [-`z_edge`, `z_edge`]. Each row starts at its low end and steps by
    /// `spacing` while still inside the range, so a row whose length is not a
    /// whole number of steps stops short of its far end.
    pub fn add_fence_ring(mut self, x_span: f32, x_edge: f32, z_edge: f32, spacing: f32) -> Self {
        if !(spacing.is_finite() && spacing > 0.0) {
            log::warn!("Ignoring fence ring with spacing {}", spacing);
            return self;
        }
        for x in fence_row(-x_span, x_span, spacing) {
            self = self.add_fence_post(x, z_edge).add_fence_post(x, -z_edge);
        }
        for z in fence_row(-z_edge, z_edge, spacing) {
            self = self.add_fence_post(-x_edge, z).add_fence_post(x_edge, z);
        }
        self
    }

    /// Add a tree: a tapered trunk centered at `base` with a round crown above it
    pub fn add_tree(self, base: Vec3) -> Self {
        self.add_cylinder("trunk", 0.3, 0.5, 2.0, 8, Transform::from_position(base), Material::WOOD)
            .add_sphere(
                "leaves",
                1.5,
                16,
                Transform::from_position(base + Vec3::new(0.0, 2.5, 0.0)),
                Material::from_hex(0x228b22),
            )
    }

    /// Add a custom entity template
    pub fn add_entity(mut self, entity: EntityTemplate) -> Self {
        self.scene.add_entity(entity);
        self
    }

    fn add_shape(mut self, name: &str, mesh: MeshTemplate, transform: Transform, material: Material) -> Self {
        self.scene
            .add_entity(EntityTemplate::new(mesh, transform, material).with_name(name));
        self
    }

    /// Number of entities added so far
    pub fn entity_count(&self) -> usize {
        self.scene.entities.len()
    }

    /// Build the scene and return the populated World
    pub fn build(self) -> World {
        let world = self.scene.instantiate();
        log::info!(
            "Built scene '{}': {} entities, {} triangles",
            self.scene.name,
            world.entity_count(),
            world.triangle_count()
        );
        world
    }

    /// Finish without instantiating, e.g. to save as RON
    pub fn into_scene(self) -> Scene {
        self.scene
    }
}

impl Default for SceneBuilder {
    fn default() -> Self {
        Self::new("untitled")
    }
}

/// Positions from `min` while not past `max`, accumulating `spacing` in f64
fn fence_row(min: f32, max: f32, spacing: f32) -> Vec<f32> {
    let (max, spacing) = (f64::from(max), f64::from(spacing));
    let mut positions = Vec::new();
    let mut value = f64::from(min);
    while value <= max {
        positions.push(value as f32);
        value += spacing;
    }
    positions
}
