//! Scene serialization
//!
//! A [`Scene`] is the on-disk (RON) description of a world: entity templates,
//! optional lighting, an optional camera start point and an optional external
//! model to import in the background.

use serde::{Serialize, Deserialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::entity::EntityTemplate;
use crate::{Lighting, World};

/// External model reference inside a scene file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelTemplate {
    /// Path to the OBJ file
    pub path: PathBuf,
    /// World position the model is placed at once loaded
    #[serde(default)]
    pub position: [f32; 3],
}

/// A serializable scene containing entity templates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    /// Scene name (for display/debugging)
    pub name: String,
    /// Entity templates in this scene
    pub entities: Vec<EntityTemplate>,
    /// Lighting; the default rig is used when absent
    #[serde(default)]
    pub lighting: Option<Lighting>,
    /// Camera start position [x, y, z]
    #[serde(default)]
    pub camera_start: Option<[f32; 3]>,
    /// External model imported after the scene is built
    #[serde(default)]
    pub model: Option<ModelTemplate>,
}

impl Scene {
    /// Create a new empty scene
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entities: Vec::new(),
            lighting: None,
            camera_start: None,
            model: None,
        }
    }

    /// Load a scene from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SceneLoadError> {
        let contents = fs::read_to_string(path)?;
        let scene = ron::from_str(&contents)?;
        Ok(scene)
    }

    /// Save a scene to a RON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SceneSaveError> {
        let pretty = ron::ser::PrettyConfig::new()
            .struct_names(true)
            .enumerate_arrays(false);
        let contents = ron::ser::to_string_pretty(self, pretty)?;
        fs::write(path, contents)?;
        Ok(())
    }

    pub fn add_entity(&mut self, entity: EntityTemplate) {
        self.entities.push(entity);
    }

    pub fn with_lighting(mut self, lighting: Lighting) -> Self {
        self.lighting = Some(lighting);
        self
    }

    pub fn with_camera_start(mut self, x: f32, y: f32, z: f32) -> Self {
        self.camera_start = Some([x, y, z]);
        self
    }

    pub fn with_model(mut self, path: impl Into<PathBuf>, position: [f32; 3]) -> Self {
        self.model = Some(ModelTemplate { path: path.into(), position });
        self
    }

    /// Build a World from this scene's templates
    ///
    /// The external model is not imported here; callers hand it to a
    /// [`ModelLoader`](crate::ModelLoader).
    pub fn instantiate(&self) -> World {
        let mut world = World::with_capacity(self.entities.len())
            .with_lighting(self.lighting.unwrap_or_default());
        for template in &self.entities {
            world.add_entity(template.to_entity());
        }
        world
    }
}

/// Error loading a scene
#[derive(Debug)]
pub enum SceneLoadError {
    /// IO error (file not found, permission denied, etc.)
    Io(io::Error),
    /// Parse error (invalid RON syntax)
    Parse(ron::error::SpannedError),
}

impl From<io::Error> for SceneLoadError {
    fn from(e: io::Error) -> Self {
        SceneLoadError::Io(e)
    }
}

impl From<ron::error::SpannedError> for SceneLoadError {
    fn from(e: ron::error::SpannedError) -> Self {
        SceneLoadError::Parse(e)
    }
}

impl std::fmt::Display for SceneLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneLoadError::Io(e) => write!(f, "IO error: {}", e),
            SceneLoadError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for SceneLoadError {}

/// Error saving a scene
#[derive(Debug)]
pub enum SceneSaveError {
    /// IO error (permission denied, disk full, etc.)
    Io(io::Error),
    /// Serialization error
    Serialize(ron::Error),
}

impl From<io::Error> for SceneSaveError {
    fn from(e: io::Error) -> Self {
        SceneSaveError::Io(e)
    }
}

impl From<ron::Error> for SceneSaveError {
    fn from(e: ron::Error) -> Self {
        SceneSaveError::Serialize(e)
    }
}

impl std::fmt::Display for SceneSaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneSaveError::Io(e) => write!(f, "IO error: {}", e),
            SceneSaveError::Serialize(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

impl std::error::Error for SceneSaveError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Material, MeshTemplate, Transform};
    use cottage_math::Vec3;

    #[test]
    fn test_scene_new() {
        let scene = Scene::new("Test Scene");
        assert_eq!(scene.name, "Test Scene");
        assert!(scene.entities.is_empty());
        assert!(scene.lighting.is_none());
        assert!(scene.camera_start.is_none());
        assert!(scene.model.is_none());
    }

    #[test]
    fn test_scene_builders() {
        let scene = Scene::new("Test")
            .with_camera_start(20.0, 15.0, 30.0)
            .with_model("textures/houses.obj", [0.0, -4.0, 0.0]);
        assert_eq!(scene.camera_start, Some([20.0, 15.0, 30.0]));
        let model = scene.model.unwrap();
        assert_eq!(model.path, PathBuf::from("textures/houses.obj"));
        assert_eq!(model.position, [0.0, -4.0, 0.0]);
    }

    #[test]
    fn test_instantiate() {
        let mut scene = Scene::new("Yard");
        scene.add_entity(
            EntityTemplate::new(
                MeshTemplate::sphere(1.5, 16, 16),
                Transform::from_position(Vec3::new(5.0, 2.5, -5.0)),
                Material::from_hex(0x228b22),
            )
            .with_name("leaves"),
        );
        scene.add_entity(EntityTemplate::new(
            MeshTemplate::cylinder(0.3, 0.5, 2.0, 8),
            Transform::from_position(Vec3::new(5.0, 0.0, -5.0)),
            Material::WOOD,
        ));

        let world = scene.instantiate();
        assert_eq!(world.entity_count(), 2);
        assert!(world.get_by_name("leaves").is_some());
        assert_eq!(*world.lighting(), Lighting::default());
    }

    #[test]
    fn test_instantiate_uses_scene_lighting() {
        let lighting = Lighting { ambient_intensity: 0.2, ..Lighting::default() };
        let world = Scene::new("Dim").with_lighting(lighting).instantiate();
        assert_eq!(world.lighting().ambient_intensity, 0.2);
    }

    #[test]
    fn test_save_and_load_file() {
        let path = std::env::temp_dir().join(format!("cottage_scene_{}.ron", std::process::id()));
        let mut scene = Scene::new("Saved").with_camera_start(1.0, 2.0, 3.0);
        scene.add_entity(
            EntityTemplate::new(MeshTemplate::cuboid(6.0, 4.0, 6.0), Transform::identity(), Material::STONE)
                .with_name("walls")
                .with_tag("house"),
        );
        scene.save(&path).unwrap();

        let loaded = Scene::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.name, "Saved");
        assert_eq!(loaded.camera_start, Some([1.0, 2.0, 3.0]));
        assert_eq!(loaded.entities, scene.entities);
    }

    #[test]
    fn test_parse_scene_file_format() {
        let scene_ron = r#"
Scene(
    name: "Porch",
    entities: [
        EntityTemplate(
            name: Some("door"),
            tags: ["house"],
            transform: Transform(
                position: Vec3(x: 0.0, y: 0.0, z: 3.05),
            ),
            mesh: MeshTemplate(
                type: "Cuboid",
                width: 1.2,
                height: 2.0,
                depth: 0.1,
            ),
            material: Material(base_color: (0.52, 0.37, 0.22, 1.0)),
        ),
    ],
    camera_start: Some((20.0, 15.0, 30.0)),
    model: Some(ModelTemplate(path: "textures/houses.obj", position: (0.0, -4.0, 0.0))),
)
"#;
        let scene: Scene = ron::from_str(scene_ron).unwrap();
        assert_eq!(scene.name, "Porch");
        assert!(scene.lighting.is_none());
        assert_eq!(scene.entities.len(), 1);
        assert_eq!(scene.entities[0].name.as_deref(), Some("door"));
        assert_eq!(scene.entities[0].transform.scale, Vec3::ONE);
        match &scene.entities[0].mesh {
            MeshTemplate::Cuboid { width, height, depth } => {
                assert_eq!(*width, 1.2);
                assert_eq!(*height, 2.0);
                assert_eq!(*depth, 0.1);
            }
            other => panic!("Expected cuboid, got {:?}", other),
        }
        assert_eq!(scene.model.unwrap().position, [0.0, -4.0, 0.0]);
    }

    #[test]
    fn test_load_missing_file() {
        match Scene::load("/nonexistent/scene.ron") {
            Err(SceneLoadError::Io(_)) => {}
            other => panic!("Expected IO error, got {:?}", other.map(|s| s.name)),
        }
    }

    #[test]
    fn test_load_error_display() {
        let err = ron::from_str::<Scene>("Scene(").unwrap_err();
        let msg = format!("{}", SceneLoadError::from(err));
        assert!(msg.contains("Parse error"));
    }
}
