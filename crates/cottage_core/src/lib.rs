//! Core types for the cottage scene
//!
//! This crate provides the scene graph and the camera animation core:
//!
//! - [`Transform`] - Position, Euler rotation, and scale
//! - [`Mesh`] - Indexed triangle mesh plus procedural primitives
//! - [`Material`] - Flat color with optional transparency
//! - [`Entity`] - An object in the world with transform, mesh, and material
//! - [`World`] - Container for all entities plus the scene lighting
//! - [`MeshTemplate`] / [`EntityTemplate`] / [`Scene`] - RON-serializable scene description
//! - [`ModelLoader`] - Background OBJ import
//! - [`Ease`] / [`Tween`] - Eased interpolation state machine
//! - [`CameraDirector`] - Drives the camera fly-through through a [`FlightRig`]

mod transform;
mod mesh;
mod shapes;
mod entity;
mod lighting;
mod world;
mod scene;
mod asset_error;
mod obj;
mod model_loader;
pub mod easing;
pub mod tween;
pub mod director;

pub use transform::Transform;
pub use mesh::Mesh;
pub use shapes::MeshTemplate;
pub use entity::{Material, Entity, DirtyFlags, EntityTemplate, hex_to_rgb};
pub use lighting::Lighting;
pub use world::{World, EntityKey};
pub use scene::{Scene, ModelTemplate, SceneLoadError, SceneSaveError};
pub use asset_error::AssetError;
pub use obj::{import_obj, parse_obj};
pub use model_loader::{ModelLoader, ModelLoadResult};
pub use easing::{Ease, Curve};
pub use tween::{Tween, TweenState, TweenError};
pub use director::{CameraDirector, FlightRig};

// Re-export math types for convenience
pub use cottage_math::{Vec3, Mat4, Lerp};
