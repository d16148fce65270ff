//! View input handling
//!
//! This crate provides orbit-style camera controls driven by winit mouse events.

mod orbit_controls;

pub use orbit_controls::{OrbitControls, CameraControl};
