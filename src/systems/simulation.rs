//! Frame simulation system
//!
//! Runs the per-frame update in a fixed order:
//! 1. Insert any models the background loader has finished
//! 2. Advance the camera flight (its hook re-syncs the orbit controls)
//! 3. Apply orbit control input
//!
//! The draw happens after this, so a flight write is always visible in the
//! same frame.

use std::time::Instant;

use crate::context::SceneContext;

/// Longest frame step the simulation accepts, in seconds
pub const MAX_FRAME_DT: f32 = 0.25;

/// Result of a simulation update
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SimulationResult {
    /// Whether geometry needs to be rebuilt and re-uploaded
    pub geometry_dirty: bool,
    /// Whether the camera flight is still running
    pub flight_active: bool,
    /// Whether the orbit controls moved the camera
    pub camera_moved: bool,
}

/// Measures frame time and runs the update order
pub struct SimulationSystem {
    last_frame: Instant,
}

impl SimulationSystem {
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
        }
    }

    /// Measure the frame time and run one frame
    pub fn update(&mut self, scene: &mut SceneContext) -> SimulationResult {
        let now = Instant::now();
        let raw_dt = (now - self.last_frame).as_secs_f32();
        // First frame and refocus can produce huge steps
        let dt = raw_dt.min(MAX_FRAME_DT);
        self.last_frame = now;

        Self::step(dt, scene)
    }

    /// Run one frame with an explicit time step
    pub fn step(dt: f32, scene: &mut SceneContext) -> SimulationResult {
        let models_added = scene.apply_loaded_models();

        let flight_active = scene.tick_flight(dt);

        // User input is ignored while a flight owns the camera
        let camera_moved = if flight_active {
            scene.controls.stop();
            false
        } else {
            scene.controls.update(&mut scene.camera)
        };

        SimulationResult {
            geometry_dirty: models_added > 0 || scene.world.has_dirty_entities(),
            flight_active,
            camera_moved,
        }
    }
}

impl Default for SimulationSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use cottage_core::{Ease, Vec3, World};

    fn scene() -> SceneContext {
        SceneContext::from_config(World::new(), &AppConfig::default(), None)
    }

    #[test]
    fn test_delta_time_capped() {
        let mut sim = SimulationSystem::new();
        let mut scene = scene();
        scene.fly_to(Vec3::ZERO, 10.0, Ease::Linear).unwrap();

        std::thread::sleep(std::time::Duration::from_millis(300));
        sim.update(&mut scene);

        assert!((scene.director.progress() - MAX_FRAME_DT / 10.0).abs() < 1e-6);
    }

    #[test]
    fn test_flight_blocks_user_input() {
        let mut scene = scene();
        scene.fly_to(Vec3::new(0.0, 2.0, 3.0), 1.0, Ease::Linear).unwrap();
        scene.controls.process_scroll(5.0);

        let result = SimulationSystem::step(0.5, &mut scene);
        assert!(result.flight_active);
        assert!(!result.camera_moved);
        assert!(!scene.controls.has_pending_motion());
    }

    #[test]
    fn test_controls_run_after_flight() {
        let mut scene = scene();
        scene.controls.process_scroll(1.0);

        let result = SimulationSystem::step(0.016, &mut scene);
        assert!(!result.flight_active);
        assert!(result.camera_moved);
    }

    #[test]
    fn test_empty_world_is_clean() {
        let mut scene = scene();
        let result = SimulationSystem::step(0.016, &mut scene);
        assert!(!result.geometry_dirty);
    }
}
