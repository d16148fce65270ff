//! Per-run scene state
//!
//! [`SceneContext`] owns everything the frame loop mutates: the world, the
//! camera, the orbit controls, the camera director and the model loader.
//! There is no global state; the app holds one context and passes it down.

use cottage_core::{
    CameraDirector, Ease, Entity, FlightRig, Material, ModelTemplate, ModelLoader, Scene, TweenError,
    World, Transform, Vec3,
};
use cottage_input::OrbitControls;
use cottage_render::Camera3D;
use std::sync::Arc;

use crate::config::{AppConfig, FlythroughConfig};

/// Flat color given to imported models
const MODEL_MATERIAL: Material = Material::from_rgb(0.8, 0.8, 0.8);

/// Camera plus the controls that track it, as seen by the director
///
/// Every flight write is followed by a controls sync, which re-aims the
/// camera at the orbit target and drops pending user motion.
pub struct ViewRig<'a> {
    pub camera: &'a mut Camera3D,
    pub controls: &'a mut OrbitControls,
}

impl FlightRig for ViewRig<'_> {
    fn camera_position(&self) -> Vec3 {
        self.camera.position
    }

    fn set_camera_position(&mut self, position: Vec3) {
        self.camera.position = position;
    }

    fn on_flight_tick(&mut self) {
        self.controls.sync(&mut *self.camera);
    }
}

/// Everything one running scene owns
pub struct SceneContext {
    pub world: World,
    pub camera: Camera3D,
    pub controls: OrbitControls,
    pub director: CameraDirector,
    pub loader: ModelLoader,
    /// Where the camera goes on reset
    pub home: Vec3,
}

impl SceneContext {
    pub fn new(world: World, camera: Camera3D, controls: OrbitControls) -> Self {
        Self {
            world,
            home: camera.position,
            camera,
            controls,
            director: CameraDirector::new(),
            loader: ModelLoader::new(),
        }
    }

    /// Build the camera and controls from config
    ///
    /// `camera_start` overrides the configured start position (scenes may
    /// carry their own).
    pub fn from_config(world: World, config: &AppConfig, camera_start: Option<Vec3>) -> Self {
        let look_at = Vec3::from_array(config.camera.look_at);
        let start = camera_start.unwrap_or(Vec3::from_array(config.camera.start_position));
        let camera = Camera3D::new()
            .with_position(start)
            .with_target(look_at)
            .with_fov_degrees(config.camera.fov)
            .with_clip(config.camera.near, config.camera.far);

        let c = &config.controls;
        let controls = OrbitControls::new(look_at)
            .with_damping(c.damping, c.damping_factor)
            .with_speeds(c.rotate_speed, c.zoom_speed, c.pan_speed)
            .with_distance_limits(c.min_distance, c.max_distance);

        Self::new(world, camera, controls)
    }

    /// Instantiate a scene and wire it up for a run
    ///
    /// Config supplies the lighting and camera start unless the scene file
    /// sets them. The scene's model wins over the configured one. The opening
    /// flight is scheduled when enabled; a bad ease or duration is logged and
    /// the camera stays at its start.
    pub fn from_scene(source: &Scene, config: &AppConfig) -> Self {
        let mut world = source.instantiate();
        if source.lighting.is_none() {
            world.set_lighting(config.rendering.lighting());
        }
        log::info!(
            "Loaded scene '{}' with {} entities",
            source.name,
            world.entity_count()
        );

        let camera_start = source.camera_start.map(Vec3::from_array);
        let mut ctx = Self::from_config(world, config, camera_start);

        if let Some(model) = source.model.clone().or_else(|| config.scene.model()) {
            ctx.request_model(&model);
        }

        if config.flythrough.enabled {
            if let Err(e) = ctx.start_flythrough(&config.flythrough) {
                log::warn!("Fly-through not started: {}", e);
            }
        }
        ctx
    }

    /// Schedule a camera flight from the current position
    pub fn fly_to(&mut self, destination: Vec3, duration: f32, ease: Ease) -> Result<(), TweenError> {
        let rig = ViewRig {
            camera: &mut self.camera,
            controls: &mut self.controls,
        };
        self.director.fly_to(&rig, destination, duration, ease)
    }

    /// Schedule the configured opening flight
    pub fn start_flythrough(&mut self, config: &FlythroughConfig) -> Result<(), TweenError> {
        let ease = config.ease()?;
        self.fly_to(config.destination(), config.duration, ease)
    }

    /// Advance the active flight; returns whether it is still running
    pub fn tick_flight(&mut self, dt: f32) -> bool {
        let mut rig = ViewRig {
            camera: &mut self.camera,
            controls: &mut self.controls,
        };
        self.director.tick(dt, &mut rig)
    }

    /// Jump the active flight to its destination
    pub fn skip_flight(&mut self) -> bool {
        let mut rig = ViewRig {
            camera: &mut self.camera,
            controls: &mut self.controls,
        };
        self.director.finish(&mut rig)
    }

    /// Cancel any flight and put the camera back at its home position
    pub fn reset_camera(&mut self) {
        self.director.cancel();
        self.controls.reset();
        self.camera.position = self.home;
        self.camera.target = self.controls.target();
    }

    /// Queue an external model for background import
    pub fn request_model(&mut self, model: &ModelTemplate) {
        let placement = Transform::from_position(Vec3::from_array(model.position));
        log::info!("Loading model {}", model.path.display());
        self.loader.load_async(model.path.clone(), placement);
    }

    /// Insert every model that finished importing; returns how many were added
    ///
    /// Failed imports are logged and skipped.
    pub fn apply_loaded_models(&mut self) -> usize {
        let mut added = 0;
        for loaded in self.loader.poll_all() {
            match loaded.result {
                Ok(mesh) => {
                    log::info!(
                        "Loaded model {} ({} triangles)",
                        loaded.path.display(),
                        mesh.triangle_count()
                    );
                    let name = loaded
                        .path
                        .file_stem()
                        .map(|s| s.to_string_lossy().into_owned())
                        .unwrap_or_else(|| "model".to_string());
                    self.world.add_entity(
                        Entity::with_transform(Arc::new(mesh), loaded.placement, MODEL_MATERIAL)
                            .with_name(name)
                            .with_tag("model"),
                    );
                    added += 1;
                }
                Err(e) => {
                    log::warn!("Failed to load model {}: {}", loaded.path.display(), e);
                }
            }
        }
        added
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> SceneContext {
        SceneContext::from_config(World::new(), &AppConfig::default(), None)
    }

    #[test]
    fn test_from_config() {
        let ctx = context();
        assert_eq!(ctx.camera.position, Vec3::new(20.0, 15.0, 30.0));
        assert_eq!(ctx.camera.target, Vec3::ZERO);
        assert_eq!(ctx.home, ctx.camera.position);
        assert!(!ctx.director.is_active());
    }

    #[test]
    fn test_camera_start_override() {
        let ctx = SceneContext::from_config(World::new(), &AppConfig::default(), Some(Vec3::new(1.0, 2.0, 3.0)));
        assert_eq!(ctx.camera.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(ctx.home, Vec3::new(1.0, 2.0, 3.0));
    }

    fn quiet_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.scene.model_path = None;
        config
    }

    #[test]
    fn test_from_scene_uses_config_start_and_lighting() {
        let mut config = quiet_config();
        config.camera.start_position = [1.0, 1.0, 1.0];
        config.rendering.ambient_intensity = 0.1;
        config.flythrough.enabled = false;

        let source = crate::scene::SceneBuilder::cottage().into_scene();
        let ctx = SceneContext::from_scene(&source, &config);

        assert_eq!(ctx.camera.position, Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(ctx.home, Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(ctx.world.lighting().ambient_intensity, 0.1);
        assert_eq!(ctx.world.entity_count(), 64);
        assert!(!ctx.director.is_active());
    }

    #[test]
    fn test_from_scene_file_values_win() {
        let config = quiet_config();
        let lighting = cottage_core::Lighting {
            ambient_intensity: 0.3,
            ..cottage_core::Lighting::default()
        };
        let source = Scene::new("lit")
            .with_lighting(lighting)
            .with_camera_start(5.0, 6.0, 7.0);
        let ctx = SceneContext::from_scene(&source, &config);

        assert_eq!(ctx.home, Vec3::new(5.0, 6.0, 7.0));
        assert_eq!(*ctx.world.lighting(), lighting);
    }

    #[test]
    fn test_from_scene_starts_flythrough() {
        let mut config = quiet_config();
        config.flythrough.destination = [0.0, 1.0, 0.0];
        let ctx = SceneContext::from_scene(&Scene::new("empty"), &config);

        assert!(ctx.director.is_active());
        assert_eq!(ctx.director.destination(), Some(Vec3::new(0.0, 1.0, 0.0)));
        assert_eq!(ctx.loader.pending(), 0);
    }

    #[test]
    fn test_flight_tick_reaims_camera() {
        let mut ctx = context();
        ctx.fly_to(Vec3::new(0.0, 2.0, 3.0), 1.0, Ease::Linear).unwrap();
        ctx.camera.target = Vec3::new(9.0, 9.0, 9.0);

        assert!(ctx.tick_flight(0.5));
        assert_eq!(ctx.camera.target, ctx.controls.target());
        assert!(!ctx.tick_flight(0.5));
        assert_eq!(ctx.camera.position, Vec3::new(0.0, 2.0, 3.0));
    }

    #[test]
    fn test_skip_flight() {
        let mut ctx = context();
        ctx.start_flythrough(&FlythroughConfig::default()).unwrap();
        assert!(ctx.skip_flight());
        assert_eq!(ctx.camera.position, Vec3::new(0.0, 2.0, 3.0));
        assert!(!ctx.director.is_active());
        assert!(!ctx.skip_flight());
    }

    #[test]
    fn test_bad_ease_does_not_start_flight() {
        let mut ctx = context();
        let config = FlythroughConfig {
            ease: "nope".to_string(),
            ..FlythroughConfig::default()
        };
        assert!(ctx.start_flythrough(&config).is_err());
        assert!(!ctx.director.is_active());
    }

    #[test]
    fn test_reset_camera() {
        let mut ctx = context();
        ctx.fly_to(Vec3::ZERO, 2.0, Ease::Linear).unwrap();
        ctx.tick_flight(1.0);
        ctx.reset_camera();
        assert!(!ctx.director.is_active());
        assert_eq!(ctx.camera.position, ctx.home);
    }

    #[test]
    fn test_missing_model_is_skipped() {
        let mut ctx = context();
        ctx.request_model(&ModelTemplate {
            path: "does/not/exist.obj".into(),
            position: [0.0, -4.0, 0.0],
        });

        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(5);
        while ctx.loader.pending() > 0 && std::time::Instant::now() < deadline {
            assert_eq!(ctx.apply_loaded_models(), 0);
            std::thread::sleep(std::time::Duration::from_millis(5));
        }
        assert_eq!(ctx.loader.pending(), 0);
        assert_eq!(ctx.world.entity_count(), 0);
    }
}
