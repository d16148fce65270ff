//! Cottage - a small 3D scene with a camera fly-through
//!
//! The binary builds the cottage scene, flies the camera from a distant
//! vantage point into the house, then hands the camera to orbit controls.
//! This library exposes the pieces so they can be tested without a window.

pub mod config;
pub mod context;
pub mod input;
pub mod scene;
pub mod systems;

pub use config::AppConfig;
pub use context::{SceneContext, ViewRig};
