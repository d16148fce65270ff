//! Orbit view controls
//!
//! Controls:
//! - Left drag: orbit around the target
//! - Right drag: pan the target
//! - Wheel: zoom toward/away from the target
//!
//! Input is accumulated between frames and applied in [`OrbitControls::update`],
//! which reads the camera's current position first. Anything else that moved the
//! camera (a scripted flight) is therefore respected rather than overwritten.

use std::f32::consts::PI;

use cottage_math::Vec3;
use winit::event::{ElementState, MouseButton};

/// Keeps the polar angle away from the poles so `look_at` stays well defined
const POLAR_EPSILON: f32 = 1e-4;

/// Residual motion below this is dropped when damping
const REST_THRESHOLD: f32 = 1e-6;

/// Orbit/zoom/pan controller working on any [`CameraControl`]
pub struct OrbitControls {
    target: Vec3,
    home_target: Vec3,

    // Mouse state
    rotating: bool,
    panning: bool,

    // Pending motion, consumed (or decayed) by update
    delta_theta: f32,
    delta_phi: f32,
    zoom_scale: f32,
    pan_pixels: (f32, f32),

    viewport_height: f32,

    // Configuration
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

impl OrbitControls {
    /// Create controls orbiting `target`
    pub fn new(target: Vec3) -> Self {
        Self {
            target,
            home_target: target,

            rotating: false,
            panning: false,

            delta_theta: 0.0,
            delta_phi: 0.0,
            zoom_scale: 1.0,
            pan_pixels: (0.0, 0.0),

            viewport_height: 720.0,

            enable_damping: true,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            min_polar_angle: 0.0,
            max_polar_angle: PI,
        }
    }

    /// Process mouse button input
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        let pressed = state == ElementState::Pressed;

        match button {
            MouseButton::Left => self.rotating = pressed,
            MouseButton::Right | MouseButton::Middle => self.panning = pressed,
            _ => {}
        }
    }

    /// Process raw mouse movement in pixels
    pub fn process_mouse_motion(&mut self, delta_x: f64, delta_y: f64) {
        let (dx, dy) = (delta_x as f32, delta_y as f32);
        if self.rotating {
            // A drag across the full viewport height turns a full circle
            let per_pixel = 2.0 * PI * self.rotate_speed / self.viewport_height;
            self.delta_theta -= dx * per_pixel;
            self.delta_phi -= dy * per_pixel;
        } else if self.panning {
            self.pan_pixels.0 += dx;
            self.pan_pixels.1 += dy;
        }
    }

    /// Process wheel input in lines; positive scrolls up and zooms in
    pub fn process_scroll(&mut self, lines: f32) {
        if lines.is_finite() && lines != 0.0 {
            self.zoom_scale *= 0.95f32.powf(self.zoom_speed * lines);
        }
    }

    /// Track the viewport so drag distances scale with window size
    pub fn set_viewport_height(&mut self, height: f32) {
        if height > 0.0 {
            self.viewport_height = height;
        }
    }

    /// Apply pending input to the camera
    ///
    /// Returns true if the camera was written. With nothing pending the camera
    /// is left untouched.
    pub fn update<C: CameraControl>(&mut self, camera: &mut C) -> bool {
        if !self.has_pending_motion() {
            return false;
        }

        let offset = camera.position() - self.target;
        let radius = offset.length();
        let (mut theta, mut phi) = if radius > 0.0 {
            (offset.x.atan2(offset.z), (offset.y / radius).clamp(-1.0, 1.0).acos())
        } else {
            (0.0, PI / 2.0)
        };

        let k = if self.enable_damping { self.damping_factor } else { 1.0 };

        theta += self.delta_theta * k;
        phi += self.delta_phi * k;
        phi = phi
            .clamp(self.min_polar_angle, self.max_polar_angle)
            .clamp(POLAR_EPSILON, PI - POLAR_EPSILON);

        let new_radius = (radius * self.zoom_scale).clamp(self.min_distance, self.max_distance);

        if self.pan_pixels != (0.0, 0.0) {
            let forward = (-offset).normalized();
            let right = forward.cross(Vec3::Y).normalized();
            let up = right.cross(forward).normalized();
            // World units per pixel at the target's depth
            let per_pixel = 2.0 * radius * (camera.fov_y() / 2.0).tan() / self.viewport_height;
            let (px, py) = self.pan_pixels;
            self.target += (right * -px + up * py) * (per_pixel * self.pan_speed * k);
        }

        let new_offset = Vec3::new(
            new_radius * phi.sin() * theta.sin(),
            new_radius * phi.cos(),
            new_radius * phi.sin() * theta.cos(),
        );
        camera.set_position(self.target + new_offset);
        camera.look_at(self.target);

        if self.enable_damping {
            let decay = 1.0 - self.damping_factor;
            self.delta_theta = settle(self.delta_theta * decay);
            self.delta_phi = settle(self.delta_phi * decay);
            self.pan_pixels = (settle(self.pan_pixels.0 * decay), settle(self.pan_pixels.1 * decay));
        } else {
            self.delta_theta = 0.0;
            self.delta_phi = 0.0;
            self.pan_pixels = (0.0, 0.0);
        }
        self.zoom_scale = 1.0;

        true
    }

    /// Re-aim the camera at the target after an external position write
    ///
    /// Pending user motion is discarded so it cannot fight the writer.
    pub fn sync<C: CameraControl>(&mut self, camera: &mut C) {
        self.stop();
        camera.look_at(self.target);
    }

    /// Drop all pending and residual motion
    pub fn stop(&mut self) {
        self.delta_theta = 0.0;
        self.delta_phi = 0.0;
        self.zoom_scale = 1.0;
        self.pan_pixels = (0.0, 0.0);
    }

    /// Restore the original target and drop pending motion
    pub fn reset(&mut self) {
        self.stop();
        self.rotating = false;
        self.panning = false;
        self.target = self.home_target;
    }

    /// True while input or damped residual motion remains
    pub fn has_pending_motion(&self) -> bool {
        self.delta_theta != 0.0
            || self.delta_phi != 0.0
            || self.zoom_scale != 1.0
            || self.pan_pixels != (0.0, 0.0)
    }

    #[inline]
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Move the orbit target; also becomes the reset target
    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
        self.home_target = target;
    }

    /// Builder: enable or disable damping
    pub fn with_damping(mut self, enabled: bool, factor: f32) -> Self {
        self.enable_damping = enabled;
        self.damping_factor = factor.clamp(f32::EPSILON, 1.0);
        self
    }

    /// Builder: set rotate, zoom and pan speeds
    pub fn with_speeds(mut self, rotate: f32, zoom: f32, pan: f32) -> Self {
        self.rotate_speed = rotate;
        self.zoom_speed = zoom;
        self.pan_speed = pan;
        self
    }

    /// Builder: set the allowed distance range from the target
    pub fn with_distance_limits(mut self, min: f32, max: f32) -> Self {
        self.min_distance = min.max(0.0);
        self.max_distance = max.max(self.min_distance);
        self
    }

    /// Builder: set the allowed polar angle range (radians from +Y)
    pub fn with_polar_limits(mut self, min: f32, max: f32) -> Self {
        self.min_polar_angle = min.clamp(0.0, PI);
        self.max_polar_angle = max.clamp(self.min_polar_angle, PI);
        self
    }
}

fn settle(v: f32) -> f32 {
    if v.abs() < REST_THRESHOLD {
        0.0
    } else {
        v
    }
}

/// Trait for camera control
/// Allows the controls to work with different camera implementations
pub trait CameraControl {
    fn position(&self) -> Vec3;
    fn set_position(&mut self, position: Vec3);
    /// Point the camera at `target`
    fn look_at(&mut self, target: Vec3);
    /// Vertical field of view in radians
    fn fov_y(&self) -> f32;
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct TestCamera {
        position: Vec3,
        target: Vec3,
    }

    impl TestCamera {
        fn at(position: Vec3) -> Self {
            Self { position, target: Vec3::ZERO }
        }
    }

    impl CameraControl for TestCamera {
        fn position(&self) -> Vec3 {
            self.position
        }

        fn set_position(&mut self, position: Vec3) {
            self.position = position;
        }

        fn look_at(&mut self, target: Vec3) {
            self.target = target;
        }

        fn fov_y(&self) -> f32 {
            75f32.to_radians()
        }
    }

    fn undamped() -> OrbitControls {
        OrbitControls::new(Vec3::ZERO).with_damping(false, 0.05)
    }

    #[test]
    fn test_no_input_leaves_camera_untouched() {
        let mut controls = OrbitControls::default();
        let mut camera = TestCamera::at(Vec3::new(20.0, 15.0, 30.0));
        camera.target = Vec3::new(1.0, 2.0, 3.0);
        let before = camera;

        assert!(!controls.update(&mut camera));
        assert!(!controls.update(&mut camera));
        assert_eq!(camera, before);
    }

    #[test]
    fn test_left_drag_orbits_at_constant_distance() {
        let mut controls = undamped();
        let mut camera = TestCamera::at(Vec3::new(0.0, 0.0, 10.0));

        controls.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        controls.process_mouse_motion(100.0, 0.0);
        assert!(controls.update(&mut camera));

        assert!((camera.position.length() - 10.0).abs() < EPSILON);
        assert!(camera.position.x < 0.0, "dragging right swings the camera left");
        assert_eq!(camera.target, Vec3::ZERO);
        assert!(!controls.has_pending_motion());
    }

    #[test]
    fn test_motion_without_button_is_ignored() {
        let mut controls = undamped();
        controls.process_mouse_motion(50.0, 50.0);
        assert!(!controls.has_pending_motion());
    }

    #[test]
    fn test_scroll_zooms_and_clamps() {
        let mut controls = undamped().with_distance_limits(2.0, 12.0);
        let mut camera = TestCamera::at(Vec3::new(0.0, 0.0, 10.0));

        controls.process_scroll(1.0);
        controls.update(&mut camera);
        assert!((camera.position.length() - 9.5).abs() < EPSILON);

        controls.process_scroll(-100.0);
        controls.update(&mut camera);
        assert!((camera.position.length() - 12.0).abs() < EPSILON);

        controls.process_scroll(100.0);
        controls.update(&mut camera);
        assert!((camera.position.length() - 2.0).abs() < EPSILON);
    }

    #[test]
    fn test_polar_angle_is_clamped() {
        let mut controls = undamped();
        let mut camera = TestCamera::at(Vec3::new(0.0, 0.0, 10.0));

        controls.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        controls.process_mouse_motion(0.0, 10_000.0);
        controls.update(&mut camera);

        assert!(camera.position.y > 9.9, "swung up to the top");
        assert!(camera.position.z > 0.0, "never exactly on the pole");
    }

    #[test]
    fn test_right_drag_pans_target() {
        let mut controls = undamped();
        let mut camera = TestCamera::at(Vec3::new(0.0, 0.0, 10.0));

        controls.process_mouse_button(MouseButton::Right, ElementState::Pressed);
        controls.process_mouse_motion(100.0, 0.0);
        controls.update(&mut camera);

        assert!(controls.target().x < 0.0);
        assert_eq!(camera.target, controls.target());
        // Panning keeps the viewing direction
        assert!((camera.position - controls.target() - Vec3::new(0.0, 0.0, 10.0)).length() < EPSILON);
    }

    #[test]
    fn test_damping_spreads_motion_and_settles() {
        let mut controls = OrbitControls::new(Vec3::ZERO).with_damping(true, 0.25);
        let mut camera = TestCamera::at(Vec3::new(0.0, 0.0, 10.0));

        controls.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        controls.process_mouse_motion(100.0, 0.0);
        controls.process_mouse_button(MouseButton::Left, ElementState::Released);

        assert!(controls.update(&mut camera));
        assert!(controls.has_pending_motion(), "residual motion after the first damped step");

        let mut frames = 1;
        while controls.update(&mut camera) {
            frames += 1;
            assert!(frames < 1000, "damping never settled");
        }

        let settled = camera;
        assert!(!controls.update(&mut camera));
        assert_eq!(camera, settled);
    }

    #[test]
    fn test_update_respects_external_writes() {
        let mut controls = undamped();
        let mut camera = TestCamera::at(Vec3::new(0.0, 0.0, 10.0));

        camera.position = Vec3::new(0.0, 0.0, 4.0);
        controls.process_scroll(1.0);
        controls.update(&mut camera);
        assert!((camera.position.length() - 3.8).abs() < EPSILON);
    }

    #[test]
    fn test_sync_drops_input_and_aims() {
        let mut controls = OrbitControls::new(Vec3::new(0.0, 1.0, 0.0));
        let mut camera = TestCamera::at(Vec3::new(5.0, 5.0, 5.0));

        controls.process_scroll(3.0);
        controls.sync(&mut camera);

        assert!(!controls.has_pending_motion());
        assert_eq!(camera.position, Vec3::new(5.0, 5.0, 5.0));
        assert_eq!(camera.target, Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_reset_restores_target() {
        let mut controls = undamped();
        let mut camera = TestCamera::at(Vec3::new(0.0, 0.0, 10.0));
        controls.process_mouse_button(MouseButton::Right, ElementState::Pressed);
        controls.process_mouse_motion(40.0, 40.0);
        controls.update(&mut camera);
        assert_ne!(controls.target(), Vec3::ZERO);

        controls.reset();
        assert_eq!(controls.target(), Vec3::ZERO);
        controls.process_mouse_motion(40.0, 40.0);
        assert!(!controls.has_pending_motion(), "buttons released by reset");
    }
}
